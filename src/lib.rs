pub mod cli;
pub mod query;
pub mod storage;

pub use query::{DateRange, EventQueries, HailQueries, QueryError, TornadoQueries, WindQueries};
pub use storage::table::{Column, DataType, Record, Schema, Table, Value};
pub use storage::{CsvReader, StoreError, StormStore, TableStore};
