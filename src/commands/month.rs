use anyhow::Result;
use daybook_core::config::DaybookConfig;
use daybook_core::store::TaskStore;
use daybook_core::views::{Month, month_markers};

use crate::render::render_month;
use crate::utils::dates::today;

pub fn run(store: &TaskStore, config: &DaybookConfig, month: Option<&str>, json: bool) -> Result<()> {
    let month = match month {
        Some(s) => s.parse::<Month>()?,
        None => Month::containing(today()),
    };
    let rules = config.category_rules();
    let markers = month_markers(store.tasks(), month, &rules);

    if json {
        println!("{}", serde_json::to_string_pretty(&markers)?);
    } else {
        println!("{}", render_month(month, &markers));
    }

    Ok(())
}
