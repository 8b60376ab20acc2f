//! Record filters
//!
//! A filter sees a record's key and decoded content and decides whether the
//! record belongs in the result. Filters passed to a load are combined with
//! logical AND. Any `Fn(&str, &Value) -> bool` closure is a filter:
//!
//! ```
//! use gitdata_store::{RecordFilter, Value};
//!
//! let wip = |_key: &str, data: &Value| data["mode"] == "wip";
//! assert!(wip.matches("a", &serde_json::json!({"mode": "wip"})));
//! ```

use std::collections::HashSet;

use serde_json::Value;

use crate::{Error, Result};

/// Predicate over a record's key and content.
pub trait RecordFilter {
    fn matches(&self, key: &str, data: &Value) -> bool;
}

impl<F> RecordFilter for F
where
    F: Fn(&str, &Value) -> bool,
{
    fn matches(&self, key: &str, data: &Value) -> bool {
        self(key, data)
    }
}

/// True when every filter matches. Stops at the first mismatch.
pub fn all_match(filters: &[&dyn RecordFilter], key: &str, data: &Value) -> bool {
    filters.iter().all(|filter| filter.matches(key, data))
}

/// The value at `pointer` equals `expected`.
pub fn field_equals(pointer: impl Into<String>, expected: impl Into<Value>) -> impl RecordFilter {
    let pointer = pointer.into();
    let expected = expected.into();
    move |_: &str, data: &Value| data.pointer(&pointer) == Some(&expected)
}

/// Like [`field_equals`], with a missing field treated as `default`.
pub fn field_equals_or(
    pointer: impl Into<String>,
    expected: impl Into<Value>,
    default: impl Into<Value>,
) -> impl RecordFilter {
    let pointer = pointer.into();
    let expected = expected.into();
    let default = default.into();
    move |_: &str, data: &Value| data.pointer(&pointer).unwrap_or(&default) == &expected
}

/// The array at `pointer` contains `item`.
pub fn list_contains(pointer: impl Into<String>, item: impl Into<Value>) -> impl RecordFilter {
    let pointer = pointer.into();
    let item = item.into();
    move |_: &str, data: &Value| {
        data.pointer(&pointer)
            .and_then(Value::as_array)
            .is_some_and(|items| items.contains(&item))
    }
}

/// The record lists `owner` under `owners`.
pub fn owner_is(owner: impl Into<String>) -> impl RecordFilter {
    list_contains("/owners", owner.into())
}

/// The record's `mode` is `mode`; records without one are `enabled`.
pub fn mode_is(mode: impl Into<String>) -> impl RecordFilter {
    field_equals_or("/mode", mode.into(), "enabled")
}

/// The record key is one of `keys`.
pub fn key_in<I, S>(keys: I) -> impl RecordFilter
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let keys: HashSet<String> = keys.into_iter().map(Into::into).collect();
    move |key: &str, _: &Value| keys.contains(key)
}

/// Inverts `filter`.
pub fn not<F: RecordFilter>(filter: F) -> impl RecordFilter {
    move |key: &str, data: &Value| !filter.matches(key, data)
}

/// True when at least one of `filters` matches.
pub fn any_of(filters: Vec<Box<dyn RecordFilter>>) -> impl RecordFilter {
    move |key: &str, data: &Value| filters.iter().any(|f| f.matches(key, data))
}

/// `field.path=value` filter as typed on a command line.
///
/// Dots separate nested fields. A string field matches when equal to the
/// value; an array field matches when it has an equal string member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMatch {
    pointer: String,
    value: String,
}

impl FieldMatch {
    pub fn parse(expression: &str) -> Result<Self> {
        let invalid = |message: &str| Error::InvalidFilter {
            expression: expression.to_string(),
            message: message.to_string(),
        };

        let (field, value) = expression
            .split_once('=')
            .ok_or_else(|| invalid("expected FIELD=VALUE"))?;
        let field = field.trim();
        if field.is_empty() || field.split('.').any(str::is_empty) {
            return Err(invalid("field name is empty"));
        }

        Ok(Self {
            pointer: field_pointer(field),
            value: value.trim().to_string(),
        })
    }

    pub fn pointer(&self) -> &str {
        &self.pointer
    }
}

impl RecordFilter for FieldMatch {
    fn matches(&self, _key: &str, data: &Value) -> bool {
        match data.pointer(&self.pointer) {
            Some(Value::String(s)) => *s == self.value,
            Some(Value::Array(items)) => items
                .iter()
                .any(|item| item.as_str() == Some(self.value.as_str())),
            Some(Value::Number(n)) => n.to_string() == self.value,
            Some(Value::Bool(b)) => b.to_string() == self.value,
            _ => false,
        }
    }
}

/// Convert `a.b.c` into the JSON pointer `/a/b/c`.
pub(crate) fn field_pointer(field: &str) -> String {
    field
        .split('.')
        .map(|part| format!("/{}", part.replace('~', "~0").replace('/', "~1")))
        .collect()
}
