use super::filter;
use super::range::DateRange;
use super::EventQueries;
use crate::storage::{StormStore, Table};

pub const MAGNITUDE_COLUMN: &str = "MAGNITUDE (Knots)";

pub struct WindQueries<'a> {
    store: &'a dyn StormStore,
    table_name: String,
}

impl<'a> WindQueries<'a> {
    pub fn new(store: &'a dyn StormStore) -> Self {
        Self::with_table(store, "wind")
    }

    pub fn with_table(store: &'a dyn StormStore, table: impl Into<String>) -> Self {
        Self {
            store,
            table_name: table.into(),
        }
    }

    /// Gusts of at least `min_knots` inside `range`.
    pub fn count_wind_gusts(&self, min_knots: f64, range: &DateRange) -> usize {
        self.table()
            .map(|t| {
                let magnitude = t.get_column_index(MAGNITUDE_COLUMN);
                filter::count_in_range(t, range, |row| {
                    filter::at_least(t.cell(row, magnitude), min_knots)
                })
            })
            .unwrap_or(0)
    }

    /// Percent of all events, regardless of date, with a magnitude strictly
    /// below `gust_knots`.
    pub fn get_percentile_rank(&self, gust_knots: f64) -> f64 {
        self.table()
            .map(|t| filter::percent_below(t, MAGNITUDE_COLUMN, gust_knots))
            .unwrap_or(0.0)
    }
}

impl EventQueries for WindQueries<'_> {
    fn table_name(&self) -> &str {
        &self.table_name
    }

    fn table(&self) -> Option<&Table> {
        filter::populated(self.store.get(&self.table_name), &self.table_name)
    }
}
