//! Table views.
//!
//! Sorting and column projection over a dataset. A view is always a fresh
//! copy; the dataset it came from is never touched.

use std::cmp::Ordering;

use serde::Deserialize;
use tracing::debug;

use crate::models::{Dataset, Record, Scalar};

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    #[serde(alias = "asc")]
    Ascending,
    #[serde(alias = "desc")]
    Descending,
}

impl SortOrder {
    pub fn from_ascending(ascending: bool) -> Self {
        if ascending {
            SortOrder::Ascending
        } else {
            SortOrder::Descending
        }
    }
}

/// What to do to a dataset when building a view.
#[derive(Debug, Clone, Default)]
pub struct ViewOptions {
    pub sort_key: Option<String>,
    pub order: SortOrder,
    /// Columns removed from every row
    pub exclude: Vec<String>,
    /// If non-empty, only these columns are kept (applied after `exclude`)
    pub include: Vec<String>,
    pub limit: Option<usize>,
}

impl ViewOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sort_by(mut self, key: impl Into<String>, order: SortOrder) -> Self {
        self.sort_key = Some(key.into());
        self.order = order;
        self
    }

    pub fn exclude<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude.extend(columns.into_iter().map(Into::into));
        self
    }

    pub fn include<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include.extend(columns.into_iter().map(Into::into));
        self
    }

    pub fn limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }
}

/// Sort key of one row. `Missing` orders below every present value.
#[derive(Debug, Clone, PartialEq)]
enum SortValue {
    Missing,
    Number(f64),
    Text(String),
}

impl SortValue {
    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortValue::Missing, SortValue::Missing) => Ordering::Equal,
            (SortValue::Missing, _) => Ordering::Less,
            (_, SortValue::Missing) => Ordering::Greater,
            (SortValue::Number(a), SortValue::Number(b)) => a.total_cmp(b),
            (SortValue::Text(a), SortValue::Text(b)) => a.cmp(b),
            // Only one kind is produced per sort
            (SortValue::Number(_), SortValue::Text(_)) => Ordering::Less,
            (SortValue::Text(_), SortValue::Number(_)) => Ordering::Greater,
        }
    }
}

/// Whether every present value of `column` reads as a number.
/// `None` when no row has the column.
fn column_is_numeric(records: &[Record], column: &str) -> Option<bool> {
    let mut present = records
        .iter()
        .map(|r| r.get(column))
        .filter(|v| !v.is_absent())
        .peekable();
    present.peek()?;
    Some(present.all(|v| v.as_f64().is_some()))
}

fn sort_value(value: &Scalar, numeric: bool) -> SortValue {
    if value.is_absent() {
        SortValue::Missing
    } else if numeric {
        value.as_f64().map_or(SortValue::Missing, SortValue::Number)
    } else {
        SortValue::Text(value.display_text())
    }
}

/// Build an ordered, projected copy of `dataset`.
///
/// The sort is stable. Rows missing the sort key sort as the smallest
/// value. A sort key no row has leaves rows in dataset order, and unknown
/// column names in `exclude`/`include` are ignored.
pub fn view(dataset: &Dataset, options: &ViewOptions) -> Vec<Record> {
    let records = dataset.records();
    let mut rows: Vec<&Record> = records.iter().collect();

    if let Some(key) = options.sort_key.as_deref() {
        match column_is_numeric(records, key) {
            Some(numeric) => {
                let mut keyed: Vec<(SortValue, &Record)> = rows
                    .into_iter()
                    .map(|r| (sort_value(r.get(key), numeric), r))
                    .collect();
                match options.order {
                    SortOrder::Ascending => keyed.sort_by(|a, b| a.0.compare(&b.0)),
                    SortOrder::Descending => keyed.sort_by(|a, b| b.0.compare(&a.0)),
                }
                rows = keyed.into_iter().map(|(_, r)| r).collect();
            }
            None => debug!(
                "Sort key {:?} not present in {}, keeping source order",
                key,
                dataset.name()
            ),
        }
    }

    if let Some(limit) = options.limit {
        rows.truncate(limit);
    }

    rows.into_iter()
        .map(|r| project(r, &options.exclude, &options.include))
        .collect()
}

/// Drop `exclude` columns, then keep only `include` columns if any are given.
pub fn project(record: &Record, exclude: &[String], include: &[String]) -> Record {
    record.retain_columns(|column| {
        !exclude.iter().any(|c| c == column)
            && (include.is_empty() || include.iter().any(|c| c == column))
    })
}

/// Column names across `records`, in order of first appearance.
pub fn columns(records: &[Record]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for record in records {
        for column in record.columns() {
            if !seen.iter().any(|c| c == column) {
                seen.push(column.to_string());
            }
        }
    }
    seen
}
