//! TUI rendering traits for daybook types.
//!
//! This module provides extension traits that add colored terminal rendering
//! to daybook-core types using owo_colors.

use chrono::{Datelike, NaiveDate};
use daybook_core::DayKind;
use daybook_core::task::{Recurrence, Task};
use daybook_core::views::{DayMarker, DayView, Month};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Recurrence {
    fn render(&self) -> String {
        match self {
            Recurrence::None => String::new(),
            other => format!("↻ {}", other).cyan().to_string(),
        }
    }
}

impl Render for Task {
    fn render(&self) -> String {
        let id = short_id(self);
        let repeat = self.recurrence.render();

        if repeat.is_empty() {
            format!("{} {}", id.dimmed(), self.title)
        } else {
            format!("{} {} {}", id.dimmed(), self.title, repeat)
        }
    }
}

impl Render for DayView<'_> {
    fn render(&self) -> String {
        let mut lines = vec![day_heading(self.date, self.category.map(|c| c.marker()))];

        if self.tasks.is_empty() {
            lines.push(format!("   {}", "No tasks".dimmed()));
        }
        for task in &self.tasks {
            lines.push(format!("   {}", task.render()));
        }

        lines.join("\n")
    }
}

impl Render for DayMarker<'_> {
    /// A 4-column grid cell: day number plus `*` for repeating, `•` for one-off.
    fn render(&self) -> String {
        let day = self.date.day();
        match self.kind {
            DayKind::Empty => format!("{:>3} ", day).dimmed().to_string(),
            DayKind::OneOff => format!("{:>3}•", day).green().to_string(),
            DayKind::Recurring => format!("{:>3}*", day).cyan().to_string(),
        }
    }
}

/// Render a month as a Monday-first grid followed by one line per categorized day.
pub fn render_month(month: Month, markers: &[DayMarker]) -> String {
    let title = month
        .first_day()
        .format("%B %Y")
        .to_string();
    let mut lines = vec![format!("📅 {}", title.bold()), " Mo  Tu  We  Th  Fr  Sa  Su".to_string()];

    let mut row = "    ".repeat(month.leading_blanks() as usize);
    let mut filled = month.leading_blanks();
    for marker in markers {
        row.push_str(&marker.render());
        filled += 1;
        if filled % 7 == 0 {
            lines.push(std::mem::take(&mut row));
        }
    }
    if !row.is_empty() {
        lines.push(row);
    }

    let categorized: Vec<_> = markers
        .iter()
        .filter_map(|m| m.category.map(|c| (m.date, c)))
        .collect();
    if !categorized.is_empty() {
        lines.push(String::new());
        for (date, rule) in categorized {
            lines.push(format!(
                "  {:>2} {} {}",
                date.day(),
                rule.marker(),
                rule.category.dimmed()
            ));
        }
    }

    lines.join("\n")
}

pub fn day_heading(date: NaiveDate, marker: Option<&str>) -> String {
    let heading = date.format("%a %Y-%m-%d").to_string();
    match marker {
        Some(marker) => format!("{} {}", heading.bold(), marker),
        None => heading.bold().to_string(),
    }
}

/// First block of the task id, enough to address it from `delete`.
pub fn short_id(task: &Task) -> String {
    task.id.to_string().chars().take(8).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_id_is_a_prefix() {
        let task = Task::new(
            "Gym",
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            Recurrence::Weekly,
        )
        .unwrap();
        let id = short_id(&task);
        assert_eq!(id.len(), 8);
        assert!(task.id.to_string().starts_with(&id));
    }

    #[test]
    fn one_off_has_no_repeat_label() {
        assert!(Recurrence::None.render().is_empty());
        assert!(Recurrence::Monthly.render().contains("monthly"));
    }

    #[test]
    fn month_grid_has_a_row_per_week() {
        let month = Month::new(2024, 2).unwrap();
        let tasks: Vec<Task> = Vec::new();
        let rules = daybook_core::CategoryRules::default();
        let markers = daybook_core::views::month_markers(&tasks, month, &rules);

        let rendered = render_month(month, &markers);
        // title + weekday header + 5 week rows (Thu 1st .. Thu 29th)
        assert_eq!(rendered.lines().count(), 7);
    }
}
