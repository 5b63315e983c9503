//! Column-wise reductions for distribution charts.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::models::{Dataset, Record};

/// Clutch table columns that are not per-situation counts.
pub const CLUTCH_NON_DISTRIBUTION_COLUMNS: [&str; 5] = [
    "Player",
    "Main Agent",
    "Total Clutches",
    "Clutch Attempts",
    "Clutch %",
];

/// Column totals, in the order the columns were requested.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnSums {
    sums: Vec<(String, f64)>,
}

impl ColumnSums {
    pub fn get(&self, column: &str) -> Option<f64> {
        self.sums.iter().find(|(c, _)| c == column).map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.sums.iter().map(|(c, v)| (c.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.sums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sums.is_empty()
    }
}

impl Serialize for ColumnSums {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sums.len()))?;
        for (column, sum) in &self.sums {
            map.serialize_entry(column, sum)?;
        }
        map.end()
    }
}

/// Sum each requested column over `dataset`.
///
/// Missing or non-numeric cells count as 0. Every requested column gets an
/// entry, even when the dataset is empty; a column requested twice appears
/// once, at its first position.
pub fn sum_columns<S: AsRef<str>>(dataset: &Dataset, columns: &[S]) -> ColumnSums {
    let mut sums: Vec<(String, f64)> = Vec::with_capacity(columns.len());
    for column in columns {
        let column = column.as_ref();
        if sums.iter().any(|(c, _)| c == column) {
            continue;
        }
        let total = dataset
            .iter()
            .map(|r| r.number(column).unwrap_or(0.0))
            .sum();
        sums.push((column.to_string(), total));
    }
    ColumnSums { sums }
}

/// Per-situation clutch columns (`1v2`, `1v3`, ...) of a clutch table:
/// every column except the player, agent and totals.
pub fn clutch_distribution_columns(records: &[Record]) -> Vec<String> {
    crate::view::columns(records)
        .into_iter()
        .filter(|c| !CLUTCH_NON_DISTRIBUTION_COLUMNS.contains(&c.as_str()))
        .collect()
}
