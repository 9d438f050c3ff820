use anyhow::Result;
use daybook_core::config::DaybookConfig;
use owo_colors::OwoColorize;

pub fn run(config: &DaybookConfig) -> Result<()> {
    println!("{} {}", "Config:".bold(), DaybookConfig::config_path()?.display());
    println!("{} {}", "Tasks: ".bold(), config.tasks_path().display());

    println!("{}", "Categories (first match wins):".bold());
    for rule in config.category_rules().rules() {
        println!("   {} {} → {}", rule.marker(), rule.keyword, rule.category.dimmed());
    }

    Ok(())
}
