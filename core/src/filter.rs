//! WHERE-style record matching.
//!
//! A [`Filter`] is a list of `column = value` conditions joined by AND. A
//! record matches when it has every filtered column and each value is equal,
//! type included, to the expected value.

use crate::validate::{strip_quotes, validate_value};
use crate::{ColumnType, Record, TableSchema, Value};

/// Conjunction of exact-equality conditions.
///
/// # Examples
///
/// ```
/// use flatfile_core::{Filter, Record, Value};
///
/// let mut record = Record::with_id(1);
/// record.set("name", Value::from("Ann"));
///
/// assert!(Filter::new().matches(&record));
/// assert!(Filter::new().with("name", "Ann").matches(&record));
/// assert!(!Filter::new().with("name", "Bo").matches(&record));
/// assert!(!Filter::new().with("missing", "Ann").matches(&record));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    conditions: Vec<(String, Value)>,
}

impl Filter {
    /// Creates a filter with no conditions, which matches every record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a `column = value` condition.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(column, value);
        self
    }

    /// Adds a `column = value` condition in place.
    pub fn push(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.conditions.push((column.into(), value.into()));
    }

    /// Iterates over the conditions in order.
    pub fn conditions(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.conditions.iter().map(|(c, v)| (c.as_str(), v))
    }

    /// Returns `true` if the filter has no conditions.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Returns `true` if `record` satisfies every condition.
    pub fn matches(&self, record: &Record) -> bool {
        self.conditions
            .iter()
            .all(|(column, expected)| record.get(column) == Some(expected))
    }

    /// Coerces each expected value to its column's declared type.
    ///
    /// Quoted text is unquoted first for `int` and `bool` columns, so
    /// `age="30"` matches like `age=30`. Conditions on undeclared columns, or
    /// whose value does not coerce, are kept unchanged and so never match a
    /// well-typed record.
    pub fn resolve(&self, schema: &TableSchema) -> Self {
        let conditions = self
            .conditions
            .iter()
            .map(|(column, value)| {
                let typed = schema
                    .column_type(column)
                    .and_then(|ty| coerce(value, ty))
                    .unwrap_or_else(|| value.clone());
                (column.clone(), typed)
            })
            .collect();
        Self { conditions }
    }
}

fn coerce(value: &Value, ty: ColumnType) -> Option<Value> {
    match (ty, value) {
        (ColumnType::Int | ColumnType::Bool, Value::Text(text)) => {
            validate_value(&Value::from(strip_quotes(text)), ty).ok()
        }
        _ => validate_value(value, ty).ok(),
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Filter {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self {
            conditions: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
