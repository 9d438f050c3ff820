use anyhow::Result;
use daybook_core::DaybookError;
use daybook_core::store::TaskStore;
use dialoguer::Confirm;
use owo_colors::OwoColorize;

use crate::render::Render;

pub fn run(store: &mut TaskStore, id_prefix: &str, yes: bool) -> Result<()> {
    let task = store.find_by_prefix(id_prefix)?;
    let id = task.id;
    let label = task.render();

    let confirmed = if task.is_recurring() && !yes {
        Confirm::new()
            .with_prompt(format!(
                "  '{}' repeats {}. Delete it and every future occurrence?",
                task.title, task.recurrence
            ))
            .default(false)
            .interact()?
    } else {
        true
    };

    match store.remove(&id, confirmed) {
        Ok(_) => {
            println!("   {} {}", "Deleted:".red(), label);
            Ok(())
        }
        Err(DaybookError::ConfirmationRequired(_)) => {
            println!("   {}", "Kept, nothing deleted.".dimmed());
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
