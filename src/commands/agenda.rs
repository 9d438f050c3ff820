use anyhow::Result;
use daybook_core::date_range::DateRange;
use daybook_core::store::TaskStore;
use daybook_core::views::agenda;
use owo_colors::OwoColorize;

use crate::render::{Render, day_heading};
use crate::utils::dates::{parse_date, today};

pub fn run(store: &TaskStore, from: Option<&str>, to: Option<&str>) -> Result<()> {
    let from = from.map(parse_date).transpose()?;
    let to = to.map(parse_date).transpose()?;
    let range = DateRange::resolve(from, to, today())?;

    let days = agenda(store.tasks(), &range);
    if days.is_empty() {
        println!(
            "{}",
            format!("Nothing planned between {} and {}.", range.from, range.to).dimmed()
        );
        return Ok(());
    }

    for (day, tasks) in days {
        println!("{}", day_heading(day, None));
        for task in tasks {
            println!("   {}", task.render());
        }
    }

    Ok(())
}
