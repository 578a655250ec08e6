use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, warn};

use super::table::{Column, DataType, Row, Schema, Table, Value};

/// Name of the column parsed as a calendar date.
pub const DATE_COLUMN: &str = "DATE";

const DEFAULT_MISSING_VALUES: [&str; 3] = ["", "None", "NaN"];

#[derive(Error, Debug)]
pub enum CsvError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Parse error at line {line}: {message}")]
    Parse { line: u64, message: String },
    #[error("Empty CSV file")]
    EmptyFile,
}

/// Reads a headered CSV into a typed [`Table`].
///
/// Every field starts out as text. Sentinel strings become [`Value::Missing`].
/// Each column is then coerced to numbers as a whole: if any non-missing
/// value fails to parse, the whole column stays text. A column named `DATE`
/// is parsed as `MM/DD/YYYY` instead, with unparsable values left missing.
pub struct CsvReader {
    delimiter: u8,
    missing_values: Vec<String>,
}

impl Default for CsvReader {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvReader {
    pub fn new() -> Self {
        Self {
            delimiter: b',',
            missing_values: DEFAULT_MISSING_VALUES.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Replaces the sentinel set. Matching is exact, no trimming.
    pub fn with_missing_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.missing_values = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn read_file(&self, path: &Path, table_name: &str) -> Result<Table, CsvError> {
        let file = File::open(path)?;
        self.read_from_reader(BufReader::new(file), table_name)
    }

    pub fn read_from_reader<R: Read>(&self, reader: R, table_name: &str) -> Result<Table, CsvError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader.headers()?.iter().map(str::to_string).collect();
        if headers.is_empty() {
            return Err(CsvError::EmptyFile);
        }

        // Raw cells, column-major, with sentinels already folded to None.
        let mut raw_columns: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];

        for result in csv_reader.records() {
            let record = result?;
            if record.len() > headers.len() {
                let line = record.position().map(|p| p.line()).unwrap_or_default();
                return Err(CsvError::Parse {
                    line,
                    message: format!(
                        "expected at most {} fields, found {}",
                        headers.len(),
                        record.len()
                    ),
                });
            }
            for (i, column) in raw_columns.iter_mut().enumerate() {
                let cell = record
                    .get(i)
                    .filter(|field| !self.is_missing(field))
                    .map(str::to_string);
                column.push(cell);
            }
        }

        let mut columns = Vec::with_capacity(headers.len());
        let mut typed_columns = Vec::with_capacity(headers.len());

        for (name, raw) in headers.iter().zip(raw_columns) {
            let (data_type, values) = if name == DATE_COLUMN {
                let values = parse_date_column(&raw);
                let unparsed = raw
                    .iter()
                    .zip(&values)
                    .filter(|(cell, value)| cell.is_some() && value.is_missing())
                    .count();
                if unparsed > 0 {
                    warn!(table = table_name, unparsed, "DATE values did not match MM/DD/YYYY");
                }
                (DataType::Date, values)
            } else {
                coerce_column(raw)
            };
            debug!(table = table_name, column = %name, %data_type, "column type");
            columns.push(Column::new(name.clone(), data_type));
            typed_columns.push(values);
        }

        let row_count = typed_columns.first().map(Vec::len).unwrap_or(0);
        let mut iters: Vec<_> = typed_columns.into_iter().map(Vec::into_iter).collect();
        let rows = (0..row_count)
            .map(|_| {
                Row::new(
                    iters
                        .iter_mut()
                        .map(|it| it.next().unwrap_or(Value::Missing))
                        .collect(),
                )
            })
            .collect();

        Ok(Table::with_rows(table_name, Schema::new(columns), rows))
    }

    fn is_missing(&self, field: &str) -> bool {
        self.missing_values.iter().any(|m| m == field)
    }
}

/// All-or-nothing numeric coercion for one column.
fn coerce_column(raw: Vec<Option<String>>) -> (DataType, Vec<Value>) {
    let numbers: Option<Vec<Value>> = raw
        .iter()
        .map(|cell| match cell {
            Some(s) => parse_number(s).map(Value::Number),
            None => Some(Value::Missing),
        })
        .collect();

    match numbers {
        Some(values) => (DataType::Number, values),
        None => {
            let values = raw
                .into_iter()
                .map(|cell| cell.map(Value::Text).unwrap_or(Value::Missing))
                .collect();
            (DataType::Text, values)
        }
    }
}

fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

fn parse_date_column(raw: &[Option<String>]) -> Vec<Value> {
    raw.iter()
        .map(|cell| {
            cell.as_deref()
                .and_then(parse_mmddyyyy)
                .map(Value::Date)
                .unwrap_or(Value::Missing)
        })
        .collect()
}

/// Parses `MM/DD/YYYY`. Month and day may drop their leading zero; the year
/// must be exactly four digits.
pub fn parse_mmddyyyy(s: &str) -> Option<NaiveDate> {
    let mut parts = s.trim().split('/');
    let (month, day, year) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    let digits = |part: &str, min: usize, max: usize| {
        (min..=max).contains(&part.len()) && part.bytes().all(|b| b.is_ascii_digit())
    };
    if !digits(month, 1, 2) || !digits(day, 1, 2) || !digits(year, 4, 4) {
        return None;
    }

    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}
