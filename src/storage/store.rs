use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use super::csv::{CsvError, CsvReader};
use super::table::{Row, Table, Value};

/// Tables every store starts out with.
pub const DEFAULT_TABLES: [&str; 3] = ["wind", "tornado", "hail"];

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("CSV path does not exist: {0}")]
    NotFound(PathBuf),
    #[error("Unsupported operation: {0}")]
    Unsupported(String),
    #[error(transparent)]
    Csv(#[from] CsvError),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// The contract shared with the older SQL-backed storm database, so callers
/// can swap one store for the other.
pub trait StormStore {
    /// Registers `table_name` as absent, dropping anything previously loaded.
    fn create(&mut self, table_name: &str);

    /// Reads `path` and publishes it under `table_name`. On failure the
    /// previous table under that name is left as it was.
    fn load(&mut self, path: &Path, table_name: &str) -> Result<()>;

    /// `None` when the table was never loaded. Callers treat that like an
    /// empty table.
    fn get(&self, table_name: &str) -> Option<&Table>;

    fn close(&mut self) {}

    /// Raw SQL entry point of the legacy store.
    fn raw_query(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>>;
}

/// In-memory store: every table lives in process memory for the session.
pub struct TableStore {
    tables: HashMap<String, Option<Table>>,
    reader: CsvReader,
}

impl TableStore {
    pub fn new() -> Self {
        Self::with_reader(CsvReader::new())
    }

    pub fn with_reader(reader: CsvReader) -> Self {
        let tables = DEFAULT_TABLES
            .iter()
            .map(|name| (name.to_string(), None))
            .collect();
        Self { tables, reader }
    }

    pub fn table_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn is_loaded(&self, table_name: &str) -> bool {
        self.get(table_name).is_some()
    }
}

impl Default for TableStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StormStore for TableStore {
    fn create(&mut self, table_name: &str) {
        self.tables.insert(table_name.to_string(), None);
    }

    fn load(&mut self, path: &Path, table_name: &str) -> Result<()> {
        if !path.exists() {
            return Err(StoreError::NotFound(path.to_path_buf()));
        }

        let table = self.reader.read_file(path, table_name)?;
        info!(
            table = table_name,
            path = %path.display(),
            rows = table.row_count(),
            columns = table.column_count(),
            "loaded table"
        );
        self.tables.insert(table_name.to_string(), Some(table));
        Ok(())
    }

    fn get(&self, table_name: &str) -> Option<&Table> {
        self.tables.get(table_name).and_then(Option::as_ref)
    }

    fn raw_query(&self, sql: &str, _params: &[Value]) -> Result<Vec<Row>> {
        warn!(sql, "raw query issued against the in-memory store");
        Err(StoreError::Unsupported(
            "raw_query() is not available on the in-memory store".to_string(),
        ))
    }
}
