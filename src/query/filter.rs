//! Full-table scans shared by the domain query components.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::BTreeMap;

use tracing::debug;

use super::range::DateRange;
use crate::storage::{Record, Row, Table, Value, DATE_COLUMN};

/// Treats an absent table and a zero-row table alike.
pub(crate) fn populated<'t>(table: Option<&'t Table>, name: &str) -> Option<&'t Table> {
    match table {
        Some(t) if !t.is_empty() => Some(t),
        _ => {
            debug!(table = name, "table absent or empty");
            None
        }
    }
}

/// Counts rows dated inside `range` that also satisfy `keep`.
pub(crate) fn count_in_range<F>(table: &Table, range: &DateRange, keep: F) -> usize
where
    F: Fn(&Row) -> bool,
{
    let date = table.get_column_index(DATE_COLUMN);
    table
        .iter()
        .filter(|row| range.contains(table.cell(row, date)) && keep(*row))
        .count()
}

/// `column >= threshold`, only ever true for numeric cells.
pub(crate) fn at_least(value: &Value, threshold: f64) -> bool {
    value.as_number().is_some_and(|n| n >= threshold)
}

/// Groups dated rows by `date.format(pattern)`; labels come back ascending.
pub(crate) fn period_breakdown(table: &Table, pattern: &str) -> Vec<(String, usize)> {
    let date = table.get_column_index(DATE_COLUMN);
    let mut groups: BTreeMap<String, usize> = BTreeMap::new();
    for row in table.iter() {
        if let Some(d) = table.cell(row, date).as_date() {
            *groups.entry(d.format(pattern).to_string()).or_insert(0) += 1;
        }
    }
    groups.into_iter().collect()
}

/// Descending order with missing cells placed after every real value.
fn descending_missing_last(a: &Value, b: &Value) -> Ordering {
    match (a.is_missing(), b.is_missing()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(a).unwrap_or(Ordering::Equal),
    }
}

/// Sorts `rows` descending by `column` (stable, missing last) and copies out
/// the first `limit` as records.
pub(crate) fn top_by<'t>(
    table: &'t Table,
    mut rows: Vec<&'t Row>,
    column: &str,
    limit: usize,
) -> Vec<Record> {
    let index = table.get_column_index(column);
    rows.sort_by(|a, b| descending_missing_last(table.cell(a, index), table.cell(b, index)));
    rows.into_iter()
        .take(limit)
        .map(|row| table.record(row))
        .collect()
}

/// Rows whose date falls in `range`, or every row when no range is given.
pub(crate) fn rows_in_range<'t>(table: &'t Table, range: Option<&DateRange>) -> Vec<&'t Row> {
    let date = table.get_column_index(DATE_COLUMN);
    table
        .iter()
        .filter(|row| range.map_or(true, |r| r.contains(table.cell(row, date))))
        .collect()
}

/// String form of a clock cell for lexicographic comparison.
///
/// A column of `HHMM` strings is usually coerced to numbers on load, so
/// integral numbers are padded back to four digits. Missing compares as "".
pub(crate) fn time_key(value: &Value) -> Cow<'_, str> {
    match value {
        Value::Text(s) => Cow::Borrowed(s.as_str()),
        Value::Number(n) if n.fract() == 0.0 && (0.0..=9999.0).contains(n) => {
            Cow::Owned(format!("{:04}", *n as u32))
        }
        Value::Missing => Cow::Borrowed(""),
        other => Cow::Owned(other.to_string()),
    }
}

/// Percentage of all rows whose `column` sits in `[start, end]` as strings.
pub(crate) fn percent_in_time_range(table: &Table, column: &str, start: &str, end: &str) -> f64 {
    let total = table.row_count();
    if total == 0 {
        return 0.0;
    }
    let index = table.get_column_index(column);
    let in_range = table
        .iter()
        .filter(|row| {
            let key = time_key(table.cell(row, index));
            let key: &str = &key;
            key >= start && key <= end
        })
        .count();
    in_range as f64 / total as f64 * 100.0
}

/// Percentage of all rows whose numeric `column` is strictly below `value`.
pub(crate) fn percent_below(table: &Table, column: &str, value: f64) -> f64 {
    let total = table.row_count();
    if total == 0 {
        return 0.0;
    }
    let index = table.get_column_index(column);
    let below = table
        .iter()
        .filter(|row| table.cell(row, index).as_number().is_some_and(|n| n < value))
        .count();
    below as f64 / total as f64 * 100.0
}
