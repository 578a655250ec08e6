use super::filter;
use super::range::DateRange;
use super::EventQueries;
use crate::storage::{StormStore, Table};

pub const SIZE_COLUMN: &str = "HAIL SIZE (INCHES)";

pub struct HailQueries<'a> {
    store: &'a dyn StormStore,
    table_name: String,
}

impl<'a> HailQueries<'a> {
    pub fn new(store: &'a dyn StormStore) -> Self {
        Self::with_table(store, "hail")
    }

    pub fn with_table(store: &'a dyn StormStore, table: impl Into<String>) -> Self {
        Self {
            store,
            table_name: table.into(),
        }
    }

    /// Hail reports in `range` with stones of at least `min_inches`.
    pub fn count_hail_above_size(&self, min_inches: f64, range: &DateRange) -> usize {
        self.table()
            .map(|t| {
                let size = t.get_column_index(SIZE_COLUMN);
                filter::count_in_range(t, range, |row| filter::at_least(t.cell(row, size), min_inches))
            })
            .unwrap_or(0)
    }

    pub fn percent_of_hail_in_time_range(&self, start_time: &str, end_time: &str) -> f64 {
        self.percent_of_events_in_time_range(start_time, end_time)
    }
}

impl EventQueries for HailQueries<'_> {
    fn table_name(&self) -> &str {
        &self.table_name
    }

    fn table(&self) -> Option<&Table> {
        filter::populated(self.store.get(&self.table_name), &self.table_name)
    }
}
