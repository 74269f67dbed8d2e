//! Calendar period keys shared by the aggregator, report output and plotters.

use chrono::{Datelike, NaiveDate};
use std::fmt;

/// Calendar bucket granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Day,
    Week,
    Month,
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Period::Day => "Day",
            Period::Week => "Week",
            Period::Month => "Month",
        };
        f.write_str(name)
    }
}

/// Canonical string key for the calendar bucket containing `date`.
///
/// Week keys follow ISO-8601 week numbering, so the key's year is the ISO
/// week-year rather than the calendar year: the last days of December can
/// key into week 01 of the next year and the first days of January into
/// week 52/53 of the previous one.
pub fn period_key(date: NaiveDate, period: Period) -> String {
    match period {
        Period::Day => date.format("%Y-%m-%d").to_string(),
        Period::Week => {
            let week = date.iso_week();
            format!("{}-W{:02}", week.year(), week.week())
        }
        Period::Month => date.format("%Y-%m").to_string(),
    }
}
