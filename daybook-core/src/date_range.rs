//! Inclusive range of calendar days.

use chrono::{Days, NaiveDate};

use crate::error::{DaybookError, DaybookResult};

/// Days shown by the agenda when no end is given.
pub const DEFAULT_AGENDA_DAYS: u64 = 14;

/// Inclusive range of days, `from..=to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> DaybookResult<Self> {
        if from > to {
            return Err(DaybookError::InvalidDate(format!(
                "range starts on {} but ends earlier, on {}",
                from, to
            )));
        }
        Ok(DateRange { from, to })
    }

    /// Build a range from optional bounds.
    /// - `from` defaults to `today`
    /// - `to` defaults to `from` + DEFAULT_AGENDA_DAYS
    pub fn resolve(
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        today: NaiveDate,
    ) -> DaybookResult<Self> {
        let from = from.unwrap_or(today);
        let to = match to {
            Some(to) => to,
            None => from
                .checked_add_days(Days::new(DEFAULT_AGENDA_DAYS))
                .unwrap_or(NaiveDate::MAX),
        };
        Self::new(from, to)
    }
}
