//! Schema-less records.
//!
//! Source files carry no fixed schema, so every cell is a [`Scalar`] and a
//! [`Record`] is an ordered list of named cells. Lookups never fail: a column
//! that is not present reads back as [`Scalar::Absent`].

use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

static ABSENT: Scalar = Scalar::Absent;

/// A single cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Absent,
    Bool(bool),
    Number(Number),
    Text(String),
}

impl Scalar {
    /// Convert a JSON value into a cell.
    ///
    /// `null` becomes [`Scalar::Absent`]; arrays and objects are kept as their
    /// compact JSON text so they stay displayable.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => Scalar::Absent,
            Value::Bool(b) => Scalar::Bool(b),
            Value::Number(n) => Scalar::Number(n),
            Value::String(s) => Scalar::Text(s),
            other => Scalar::Text(other.to_string()),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Scalar::Absent)
    }

    /// Numeric view of the cell.
    ///
    /// Text that parses as a number (optionally with a trailing `%`) counts
    /// as numeric, since upstream exports sometimes quote percentages.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Number(n) => n.as_f64(),
            Scalar::Text(s) => {
                let trimmed = s.trim();
                let trimmed = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();
                trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
            }
            Scalar::Absent | Scalar::Bool(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Text used for string comparison and plain rendering.
    pub fn display_text(&self) -> String {
        match self {
            Scalar::Absent => String::new(),
            Scalar::Bool(b) => b.to_string(),
            Scalar::Number(n) => n.to_string(),
            Scalar::Text(s) => s.clone(),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Text(s)
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Number(n.into())
    }
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Self {
        Number::from_f64(n).map_or(Scalar::Absent, Scalar::Number)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scalar::Absent => serializer.serialize_none(),
            Scalar::Bool(b) => serializer.serialize_bool(*b),
            Scalar::Number(n) => n.serialize(serializer),
            Scalar::Text(s) => serializer.serialize_str(s),
        }
    }
}

/// An ordered mapping from column name to cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, Scalar)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from `(column, value)` pairs, keeping their order.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Scalar>,
    {
        let mut record = Self::new();
        for (k, v) in pairs {
            record.insert(k, v);
        }
        record
    }

    /// Convert a JSON object, preserving its key order.
    pub fn from_json_object(object: Map<String, Value>) -> Self {
        Self {
            fields: object
                .into_iter()
                .map(|(k, v)| (k, Scalar::from_json(v)))
                .collect(),
        }
    }

    /// Set a column. An existing column keeps its position.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Scalar>) {
        let column = column.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == column) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((column, value)),
        }
    }

    /// Look up a column; missing columns read as [`Scalar::Absent`].
    pub fn get(&self, column: &str) -> &Scalar {
        self.fields
            .iter()
            .find(|(k, _)| k == column)
            .map(|(_, v)| v)
            .unwrap_or(&ABSENT)
    }

    pub fn contains(&self, column: &str) -> bool {
        !self.get(column).is_absent()
    }

    pub fn number(&self, column: &str) -> Option<f64> {
        self.get(column).as_f64()
    }

    /// First of `columns` that holds a number.
    pub fn number_any(&self, columns: &[&str]) -> Option<f64> {
        columns.iter().find_map(|c| self.number(c))
    }

    pub fn text(&self, column: &str) -> Option<&str> {
        self.get(column).as_str()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Scalar)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Copy of this record keeping only the columns accepted by `keep`.
    pub fn retain_columns<F>(&self, mut keep: F) -> Record
    where
        F: FnMut(&str) -> bool,
    {
        Record {
            fields: self
                .fields
                .iter()
                .filter(|(k, _)| keep(k.as_str()))
                .cloned()
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let object = Map::<String, Value>::deserialize(deserializer)?;
        Ok(Record::from_json_object(object))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_column_reads_absent() {
        let record = Record::from_pairs([("Player", "Alice")]);
        assert!(record.get("Kills").is_absent());
        assert_eq!(record.number("Kills"), None);
        assert!(!record.contains("Kills"));
    }

    #[test]
    fn test_json_object_keeps_key_order() {
        let value = json!({"Player": "A", "Kills": 5, "Deaths": 2, "Agent": "Jett"});
        let record: Record = serde_json::from_value(value).unwrap();
        let columns: Vec<&str> = record.columns().collect();
        assert_eq!(columns, vec!["Player", "Kills", "Deaths", "Agent"]);
    }

    #[test]
    fn test_null_becomes_absent() {
        let record: Record = serde_json::from_value(json!({"ACS": null})).unwrap();
        assert!(record.get("ACS").is_absent());
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn test_numeric_text_and_percent() {
        assert_eq!(Scalar::from("12.5").as_f64(), Some(12.5));
        assert_eq!(Scalar::from("45%").as_f64(), Some(45.0));
        assert_eq!(Scalar::from("Jett").as_f64(), None);
        assert_eq!(Scalar::Bool(true).as_f64(), None);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut record = Record::from_pairs([("A", 1i64), ("B", 2i64)]);
        record.insert("A", 10i64);
        let columns: Vec<&str> = record.columns().collect();
        assert_eq!(columns, vec!["A", "B"]);
        assert_eq!(record.number("A"), Some(10.0));
    }

    #[test]
    fn test_serialize_round_trips_order() {
        let record = Record::from_pairs([
            ("Player", Scalar::from("A")),
            ("Kills", Scalar::from(5i64)),
            ("Rated", Scalar::Bool(false)),
        ]);
        let text = serde_json::to_string(&record).unwrap();
        assert_eq!(text, r#"{"Player":"A","Kills":5,"Rated":false}"#);
    }

    #[test]
    fn test_number_any_uses_first_present() {
        let record = Record::from_pairs([("K", 7i64)]);
        assert_eq!(record.number_any(&["Kills", "K"]), Some(7.0));
        assert_eq!(record.number_any(&["Deaths", "D"]), None);
    }
}
