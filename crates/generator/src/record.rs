//! Mapping builder used to assemble schema records field by field.

use serde_yaml::{Mapping, Value};

/// An ordered schema record under construction.
///
/// [`Record::copy`] and [`Record::copy_with`] are the single place where "emit only if present"
/// is decided: `None` produces no key at all, while any `Some` value is written, including
/// `false`, `0`, and the empty string.
#[derive(Debug, Default)]
pub(crate) struct Record {
    fields: Mapping,
}

impl Record {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Writes `value` under `key`, replacing any earlier entry while keeping its position.
    pub(crate) fn insert(&mut self, key: &str, value: impl Into<Value>) -> &mut Self {
        self.fields.insert(Value::from(key), value.into());
        self
    }

    /// Copies a present source value under `key`, which may differ from the source's own name.
    pub(crate) fn copy<T>(&mut self, key: &str, source: Option<T>) -> &mut Self
    where
        T: Into<Value>,
    {
        self.copy_with(key, source, Into::into)
    }

    /// Like [`Record::copy`], converting the source through `transform` first.
    pub(crate) fn copy_with<T, F>(&mut self, key: &str, source: Option<T>, transform: F) -> &mut Self
    where
        F: FnOnce(T) -> Value,
    {
        if let Some(value) = source {
            self.insert(key, transform(value));
        }
        self
    }

    /// Copies a nested mapping only when it holds at least one entry.
    pub(crate) fn copy_non_empty(&mut self, key: &str, mapping: Mapping) -> &mut Self {
        if !mapping.is_empty() {
            self.insert(key, Value::Mapping(mapping));
        }
        self
    }

    pub(crate) fn into_mapping(self) -> Mapping {
        self.fields
    }

    pub(crate) fn into_value(self) -> Value {
        Value::Mapping(self.fields)
    }
}
