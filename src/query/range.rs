use chrono::NaiveDate;

use super::error::{QueryError, Result};
use crate::storage::csv::parse_mmddyyyy;
use crate::storage::Value;

/// Inclusive calendar-day range used by the range-filtered queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Accepts `YYYY-MM-DD` or `MM/DD/YYYY` for either bound.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Ok(Self::new(parse_query_date(start)?, parse_query_date(end)?))
    }

    /// Missing and non-date cells are never inside a range.
    pub fn contains(&self, value: &Value) -> bool {
        match value.as_date() {
            Some(date) => date >= self.start && date <= self.end,
            None => false,
        }
    }
}

pub fn parse_query_date(s: &str) -> Result<NaiveDate> {
    let trimmed = s.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| parse_mmddyyyy(trimmed))
        .ok_or_else(|| QueryError::InvalidDate(s.to_string()))
}
