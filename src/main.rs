mod commands;
mod logging;
mod render;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use daybook_core::Recurrence;
use daybook_core::config::DaybookConfig;
use daybook_core::store::TaskStore;

#[derive(Parser)]
#[command(name = "daybook")]
#[command(about = "Plan tasks on a calendar, once or on a repeat")]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a task to a day
    Add {
        title: String,

        /// Day to add the task to (e.g. "2025-03-20", "tomorrow", "next fri"). Defaults to today
        #[arg(long)]
        on: Option<String>,

        /// How the task repeats: none, daily, weekly, monthly or yearly
        #[arg(short, long, default_value = "none")]
        repeat: Recurrence,
    },
    /// Show the tasks on a day
    Day {
        /// Day to show. Defaults to today
        date: Option<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Show a month grid with markers for days that have tasks
    Month {
        /// Month to show (YYYY-MM). Defaults to the current month
        month: Option<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List tasks day by day over a range
    Agenda {
        /// First day of the range. Defaults to today
        #[arg(long)]
        from: Option<String>,

        /// Last day of the range. Defaults to two weeks after the first day
        #[arg(long)]
        to: Option<String>,
    },
    /// Delete a task by id (a unique prefix is enough)
    Delete {
        id: String,

        /// Skip the confirmation prompt for repeating tasks
        #[arg(short, long)]
        yes: bool,
    },
    /// Show where the config and task files live
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = DaybookConfig::load()?;

    match cli.command {
        Commands::Add { title, on, repeat } => {
            let mut store = open_store(&config)?;
            commands::add::run(&mut store, title, on.as_deref(), repeat)
        }
        Commands::Day { date, json } => {
            let store = open_store(&config)?;
            commands::day::run(&store, &config, date.as_deref(), json)
        }
        Commands::Month { month, json } => {
            let store = open_store(&config)?;
            commands::month::run(&store, &config, month.as_deref(), json)
        }
        Commands::Agenda { from, to } => {
            let store = open_store(&config)?;
            commands::agenda::run(&store, from.as_deref(), to.as_deref())
        }
        Commands::Delete { id, yes } => {
            let mut store = open_store(&config)?;
            commands::delete::run(&mut store, &id, yes)
        }
        Commands::Config => commands::config::run(&config),
    }
}

fn open_store(config: &DaybookConfig) -> Result<TaskStore> {
    let path = config.tasks_path();
    tracing::debug!(path = %path.display(), "opening task store");
    Ok(TaskStore::open(path)?)
}
