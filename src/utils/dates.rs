use anyhow::Result;
use chrono::{Local, NaiveDate};
use daybook_core::task::parse_day;

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a day given on the command line.
///
/// Accepts `YYYY-MM-DD` (or an ISO date-time) and falls back to natural
/// language like "tomorrow" or "next fri". Time-of-day is dropped.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    if let Some(day) = parse_day(input) {
        return Ok(day);
    }

    let expanded = expand_abbreviations(input);
    let dt = fuzzydate::parse(&expanded)
        .map_err(|_| anyhow::anyhow!("Could not parse date: \"{}\"", input))?;

    Ok(dt.date())
}

/// Parse an optional day, defaulting to today.
pub fn parse_date_or_today(input: Option<&str>) -> Result<NaiveDate> {
    match input {
        Some(s) => parse_date(s),
        None => Ok(today()),
    }
}

/// Expand common abbreviations that fuzzydate doesn't handle.
fn expand_abbreviations(input: &str) -> String {
    let abbrevs = [
        ("mon", "monday"),
        ("tue", "tuesday"),
        ("tues", "tuesday"),
        ("wed", "wednesday"),
        ("thu", "thursday"),
        ("thur", "thursday"),
        ("thurs", "thursday"),
        ("fri", "friday"),
        ("sat", "saturday"),
        ("sun", "sunday"),
        ("jan", "january"),
        ("feb", "february"),
        ("mar", "march"),
        ("apr", "april"),
        ("jun", "june"),
        ("jul", "july"),
        ("aug", "august"),
        ("sep", "september"),
        ("sept", "september"),
        ("oct", "october"),
        ("nov", "november"),
        ("dec", "december"),
    ];

    input
        .to_lowercase()
        .split_whitespace()
        .map(|word| {
            abbrevs
                .iter()
                .find(|(abbr, _)| *abbr == word)
                .map(|(_, full)| *full)
                .unwrap_or(word)
        })
        .collect::<Vec<_>>()
        .join(" ")
}
