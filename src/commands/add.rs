use anyhow::Result;
use daybook_core::store::TaskStore;
use daybook_core::task::{Recurrence, Task};
use owo_colors::OwoColorize;

use crate::render::{Render, day_heading};
use crate::utils::dates::parse_date_or_today;

pub fn run(store: &mut TaskStore, title: String, on: Option<&str>, repeat: Recurrence) -> Result<()> {
    let day = parse_date_or_today(on)?;
    let task = store.add(Task::new(title, day, repeat)?)?;

    println!("{}", day_heading(day, None));
    println!("   {} {}", "Added:".green(), task.render());

    Ok(())
}
