pub mod csv;
pub mod store;
pub mod table;

pub use self::csv::{CsvError, CsvReader, DATE_COLUMN};
pub use self::store::{StoreError, StormStore, TableStore};
pub use self::table::{Column, DataType, Record, Row, Schema, Table, Value};
