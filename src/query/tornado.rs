use super::filter;
use super::range::DateRange;
use super::EventQueries;
use crate::storage::{Record, StormStore, Table, Value};

pub const SCALE_COLUMN: &str = "TOR_F_SCALE";
pub const LENGTH_COLUMN: &str = "TOR_LENGTH";

/// Rank given to a requested scale nobody recognises.
const UNKNOWN_REQUEST_RANK: i32 = 0;
/// Rank given to a row whose own scale is unrecognised; below every real code.
const UNKNOWN_ROW_RANK: i32 = -999;

/// Position of a Fujita / Enhanced Fujita code in the severity order.
/// `F2` and `EF2` share a rank; `FU`/`EFU` (unrated) sit below `F0`.
pub fn scale_rank(code: &str) -> Option<i32> {
    let rank = match code {
        "FU" | "EFU" => -1,
        "F0" | "EF0" => 0,
        "F1" | "EF1" => 1,
        "F2" | "EF2" => 2,
        "F3" | "EF3" => 3,
        "F4" | "EF4" => 4,
        "F5" | "EF5" => 5,
        _ => return None,
    };
    Some(rank)
}

pub struct TornadoQueries<'a> {
    store: &'a dyn StormStore,
    table_name: String,
}

impl<'a> TornadoQueries<'a> {
    pub fn new(store: &'a dyn StormStore) -> Self {
        Self::with_table(store, "tornado")
    }

    pub fn with_table(store: &'a dyn StormStore, table: impl Into<String>) -> Self {
        Self {
            store,
            table_name: table.into(),
        }
    }

    /// Tornadoes in `range` whose scale is exactly `scale`, e.g. `"EF2"`.
    pub fn count_ef_tornadoes_exact(&self, scale: &str, range: &DateRange) -> usize {
        self.table()
            .map(|t| {
                let column = t.get_column_index(SCALE_COLUMN);
                filter::count_in_range(t, range, |row| t.cell(row, column).as_text() == Some(scale))
            })
            .unwrap_or(0)
    }

    /// Tornadoes in `range` rated `scale` or stronger.
    ///
    /// An unrecognised `scale` is read as rank 0 (`EF0`), so `"XX"` counts
    /// every rated tornado. Rows with an unrecognised scale never count.
    pub fn count_ef_tornadoes_at_least(&self, scale: &str, range: &DateRange) -> usize {
        let min_rank = scale_rank(scale).unwrap_or(UNKNOWN_REQUEST_RANK);
        self.table()
            .map(|t| {
                let column = t.get_column_index(SCALE_COLUMN);
                filter::count_in_range(t, range, |row| match t.cell(row, column) {
                    Value::Missing => false,
                    value => row_rank(value) >= min_rank,
                })
            })
            .unwrap_or(0)
    }

    /// Longest tracks in the whole table; rows without a length are dropped.
    pub fn top_tornado_length(&self, limit: usize) -> Vec<Record> {
        match self.table() {
            Some(t) => {
                let column = t.get_column_index(LENGTH_COLUMN);
                let rows = t
                    .iter()
                    .filter(|row| !t.cell(row, column).is_missing())
                    .collect();
                filter::top_by(t, rows, LENGTH_COLUMN, limit)
            }
            None => Vec::new(),
        }
    }

    pub fn percent_of_tornadoes_between_times(&self, start_time: &str, end_time: &str) -> f64 {
        self.percent_of_events_in_time_range(start_time, end_time)
    }
}

fn row_rank(value: &Value) -> i32 {
    value
        .as_text()
        .and_then(scale_rank)
        .unwrap_or(UNKNOWN_ROW_RANK)
}

impl EventQueries for TornadoQueries<'_> {
    fn table_name(&self) -> &str {
        &self.table_name
    }

    fn table(&self) -> Option<&Table> {
        filter::populated(self.store.get(&self.table_name), &self.table_name)
    }
}
