//! Recurrence evaluation for tasks.
//!
//! Decides whether a task shows up on a given calendar day. Everything here is
//! a pure function of its arguments and works at day granularity.
//!
//! Monthly and yearly repeats never clamp: a task anchored on the 31st is
//! skipped in shorter months, and a Feb 29 anchor only matches in leap years.

use chrono::{Datelike, Days, NaiveDate};

use crate::date_range::DateRange;
use crate::task::{Recurrence, Task};

/// Candidate months scanned by `next_occurrence` for monthly tasks.
/// Any 12 consecutive months contain one with 31 days.
const MONTHLY_SEARCH_MONTHS: i32 = 13;

/// Candidate years scanned for yearly tasks. Leap years are at most 8 apart.
const YEARLY_SEARCH_YEARS: i32 = 9;

/// Whether `task` occurs on `day`.
pub fn is_active(task: &Task, day: NaiveDate) -> bool {
    let anchor = task.anchor_date;
    if day < anchor {
        return false;
    }

    match task.recurrence {
        Recurrence::None => day == anchor,
        Recurrence::Daily => true,
        Recurrence::Weekly => day.weekday() == anchor.weekday(),
        Recurrence::Monthly => day.day() == anchor.day(),
        Recurrence::Yearly => day.month() == anchor.month() && day.day() == anchor.day(),
    }
}

/// Tasks that occur on `day`, in their stored order.
pub fn tasks_active_on(tasks: &[Task], day: NaiveDate) -> Vec<&Task> {
    tasks.iter().filter(|t| is_active(t, day)).collect()
}

/// Whether any task occurs on `day`. Stops at the first match.
pub fn has_any_task(tasks: &[Task], day: NaiveDate) -> bool {
    tasks.iter().any(|t| is_active(t, day))
}

/// Earliest day on or after `from` on which `task` occurs.
///
/// Returns `None` for a one-off task whose day has already passed.
pub fn next_occurrence(task: &Task, from: NaiveDate) -> Option<NaiveDate> {
    let anchor = task.anchor_date;
    let start = from.max(anchor);

    match task.recurrence {
        Recurrence::None => (anchor >= from).then_some(anchor),
        Recurrence::Daily => Some(start),
        Recurrence::Weekly => {
            let target = anchor.weekday().num_days_from_monday();
            let current = start.weekday().num_days_from_monday();
            let offset = (target + 7 - current) % 7;
            start.checked_add_days(Days::new(offset.into()))
        }
        Recurrence::Monthly => (0..MONTHLY_SEARCH_MONTHS)
            .filter_map(|i| {
                let (year, month) = shift_month(start.year(), start.month(), i);
                NaiveDate::from_ymd_opt(year, month, anchor.day())
            })
            .find(|d| *d >= start),
        Recurrence::Yearly => (0..YEARLY_SEARCH_YEARS)
            .filter_map(|i| NaiveDate::from_ymd_opt(start.year() + i, anchor.month(), anchor.day()))
            .find(|d| *d >= start),
    }
}

/// Every day in `range` on which `task` occurs, ascending.
pub fn occurrences_between(task: &Task, range: &DateRange) -> Vec<NaiveDate> {
    let mut days = Vec::new();
    let mut cursor = range.from;

    while let Some(day) = next_occurrence(task, cursor) {
        if day > range.to {
            break;
        }
        days.push(day);
        match day.succ_opt() {
            Some(next) => cursor = next,
            None => break,
        }
    }

    days
}

fn shift_month(year: i32, month: u32, by: i32) -> (i32, u32) {
    let index = year * 12 + (month as i32 - 1) + by;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}
