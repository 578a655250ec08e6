//! Aggregate queries over the storm tables.
//!
//! Each component borrows the store and remembers which table it reads;
//! nothing is cached, so every call scans the current table.

mod error;
mod filter;
mod range;

pub mod hail;
pub mod tornado;
pub mod wind;

pub use error::{QueryError, Result};
pub use hail::HailQueries;
pub use range::{parse_query_date, DateRange};
pub use tornado::{scale_rank, TornadoQueries};
pub use wind::WindQueries;

use crate::storage::{Record, Table};

pub const BEGIN_TIME_COLUMN: &str = "BEGIN_TIME";
pub const DAMAGE_PROPERTY_COLUMN: &str = "DAMAGE_PROPERTY_NUM";

/// Row count for top-N queries when the caller has no preference.
pub const DEFAULT_LIMIT: usize = 5;

/// Operations every storm domain supports.
pub trait EventQueries {
    fn table_name(&self) -> &str;

    /// The bound table, or `None` when it is absent or has no rows.
    fn table(&self) -> Option<&Table>;

    /// `(month, count)` pairs, `"01"`..`"12"`, for dated rows only.
    fn monthly_breakdown(&self) -> Vec<(String, usize)> {
        self.table()
            .map(|t| filter::period_breakdown(t, "%m"))
            .unwrap_or_default()
    }

    /// `(year, count)` pairs for dated rows only.
    fn yearly_breakdown(&self) -> Vec<(String, usize)> {
        self.table()
            .map(|t| filter::period_breakdown(t, "%Y"))
            .unwrap_or_default()
    }

    /// Highest `DAMAGE_PROPERTY_NUM` rows, optionally within `range`.
    ///
    /// Rows without a damage figure are kept and rank after every row that
    /// has one.
    fn top_property_damage(&self, range: Option<&DateRange>, limit: usize) -> Vec<Record> {
        match self.table() {
            Some(t) => {
                let rows = filter::rows_in_range(t, range);
                filter::top_by(t, rows, DAMAGE_PROPERTY_COLUMN, limit)
            }
            None => Vec::new(),
        }
    }

    /// Share of rows, in percent, whose `BEGIN_TIME` lies in
    /// `[start_time, end_time]` compared as strings (`"0000"`..`"2359"`).
    fn percent_of_events_in_time_range(&self, start_time: &str, end_time: &str) -> f64 {
        self.table()
            .map(|t| filter::percent_in_time_range(t, BEGIN_TIME_COLUMN, start_time, end_time))
            .unwrap_or(0.0)
    }
}
