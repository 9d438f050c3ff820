//! Day, month and agenda views built from the task list.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::classify::{CategoryRule, CategoryRules, DayKind};
use crate::date_range::DateRange;
use crate::error::DaybookError;
use crate::recurrence::{has_any_task, occurrences_between, tasks_active_on};
use crate::task::Task;

/// A displayed calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    /// `None` unless `month` is 1..=12 and the year is representable.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Month { year, month })
    }

    pub fn containing(day: NaiveDate) -> Self {
        Month {
            year: day.year(),
            month: day.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Every day of the month, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let month = self.month;
        self.first_day()
            .iter_days()
            .take_while(move |d| d.month() == month)
    }

    /// Empty cells before day 1 in a Monday-first grid.
    pub fn leading_blanks(&self) -> u32 {
        self.first_day().weekday().num_days_from_monday()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Month {
    type Err = DaybookError;

    /// Parse `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DaybookError::InvalidDate(format!("'{}', expected YYYY-MM", s));

        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;

        Month::new(year, month).ok_or_else(invalid)
    }
}

/// One cell of the month grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayMarker<'a> {
    pub date: NaiveDate,
    pub kind: DayKind,
    pub category: Option<&'a CategoryRule>,
}

impl DayMarker<'_> {
    pub fn has_tasks(&self) -> bool {
        self.kind != DayKind::Empty
    }
}

/// One marker per day of `month`.
pub fn month_markers<'a>(
    tasks: &[Task],
    month: Month,
    rules: &'a CategoryRules,
) -> Vec<DayMarker<'a>> {
    month
        .days()
        .map(|date| {
            if !has_any_task(tasks, date) {
                return DayMarker {
                    date,
                    kind: DayKind::Empty,
                    category: None,
                };
            }

            let active = tasks_active_on(tasks, date);
            DayMarker {
                date,
                kind: DayKind::of(&active),
                category: rules.categorize(&active),
            }
        })
        .collect()
}

/// Tasks for a single day plus its classification.
#[derive(Debug, Clone, Serialize)]
pub struct DayView<'a> {
    pub date: NaiveDate,
    pub kind: DayKind,
    pub category: Option<&'a CategoryRule>,
    pub tasks: Vec<&'a Task>,
}

pub fn day_view<'a>(tasks: &'a [Task], day: NaiveDate, rules: &'a CategoryRules) -> DayView<'a> {
    let active = tasks_active_on(tasks, day);

    DayView {
        date: day,
        kind: DayKind::of(&active),
        category: rules.categorize(&active),
        tasks: active,
    }
}

/// Tasks grouped by the days they occur on within `range`.
///
/// Days without tasks are omitted. Within a day, tasks keep their stored order.
pub fn agenda<'a>(tasks: &'a [Task], range: &DateRange) -> BTreeMap<NaiveDate, Vec<&'a Task>> {
    let mut days: BTreeMap<NaiveDate, Vec<&Task>> = BTreeMap::new();

    for task in tasks {
        for day in occurrences_between(task, range) {
            days.entry(day).or_default().push(task);
        }
    }

    days
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Recurrence;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_tasks() -> Vec<Task> {
        vec![
            Task::new("Gym", date(2024, 1, 15), Recurrence::Weekly).unwrap(),
            Task::new("Physics exam", date(2024, 2, 12), Recurrence::None).unwrap(),
            Task::new("Rent", date(2024, 1, 31), Recurrence::Monthly).unwrap(),
        ]
    }

    #[test]
    fn month_parses_and_displays() {
        let month: Month = "2024-02".parse().unwrap();
        assert_eq!(month, Month::new(2024, 2).unwrap());
        assert_eq!(month.to_string(), "2024-02");
        assert!("2024-13".parse::<Month>().is_err());
        assert!("2024".parse::<Month>().is_err());
        assert!("feb".parse::<Month>().is_err());
    }

    #[test]
    fn month_days_cover_leap_february() {
        let feb = Month::new(2024, 2).unwrap();
        assert_eq!(feb.days().count(), 29);
        assert_eq!(Month::new(2023, 2).unwrap().days().count(), 28);
        // 2024-02-01 is a Thursday
        assert_eq!(feb.leading_blanks(), 3);
    }

    #[test]
    fn month_markers_one_per_day() {
        let tasks = sample_tasks();
        let rules = CategoryRules::default();
        let markers = month_markers(&tasks, Month::new(2024, 2).unwrap(), &rules);

        assert_eq!(markers.len(), 29);
        assert_eq!(markers[0].date, date(2024, 2, 1));

        // Feb 12: weekly gym and the one-off exam; "exam" rule follows "gym"
        let feb12 = &markers[11];
        assert_eq!(feb12.kind, DayKind::Recurring);
        assert_eq!(feb12.category.unwrap().category, "fitness");

        // Feb 13: nothing; rent on the 31st never lands in February
        assert!(!markers[12].has_tasks());
        assert!(markers.iter().all(|m| m.date.day() != 29 || !m.has_tasks()));
    }

    #[test]
    fn day_view_lists_tasks_in_order() {
        let tasks = sample_tasks();
        let rules = CategoryRules::default();
        let view = day_view(&tasks, date(2024, 2, 12), &rules);

        let titles: Vec<_> = view.tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Gym", "Physics exam"]);
        assert_eq!(view.kind, DayKind::Recurring);
    }

    #[test]
    fn day_view_one_off_only() {
        let tasks = vec![Task::new("Physics exam", date(2024, 2, 12), Recurrence::None).unwrap()];
        let rules = CategoryRules::default();
        let view = day_view(&tasks, date(2024, 2, 12), &rules);
        assert_eq!(view.kind, DayKind::OneOff);
        assert_eq!(view.category.unwrap().category, "study");
    }

    #[test]
    fn agenda_groups_by_day() {
        let tasks = sample_tasks();
        let range = DateRange::new(date(2024, 1, 29), date(2024, 2, 12)).unwrap();
        let days = agenda(&tasks, &range);

        let keys: Vec<_> = days.keys().copied().collect();
        assert_eq!(
            keys,
            vec![date(2024, 1, 29), date(2024, 1, 31), date(2024, 2, 5), date(2024, 2, 12)]
        );
        let feb12: Vec<_> = days[&date(2024, 2, 12)].iter().map(|t| t.title.as_str()).collect();
        assert_eq!(feb12, vec!["Gym", "Physics exam"]);
    }

    #[test]
    fn day_view_serializes_for_clients() {
        let tasks = sample_tasks();
        let rules = CategoryRules::default();
        let value = serde_json::to_value(day_view(&tasks, date(2024, 1, 31), &rules)).unwrap();
        assert_eq!(value["date"], "2024-01-31");
        assert_eq!(value["kind"], "recurring");
        assert_eq!(value["tasks"][0]["title"], "Rent");
    }
}
