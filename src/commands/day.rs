use anyhow::Result;
use daybook_core::config::DaybookConfig;
use daybook_core::store::TaskStore;
use daybook_core::views::day_view;

use crate::render::Render;
use crate::utils::dates::parse_date_or_today;

pub fn run(store: &TaskStore, config: &DaybookConfig, date: Option<&str>, json: bool) -> Result<()> {
    let day = parse_date_or_today(date)?;
    let rules = config.category_rules();
    let view = day_view(store.tasks(), day, &rules);

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        println!("{}", view.render());
    }

    Ok(())
}
