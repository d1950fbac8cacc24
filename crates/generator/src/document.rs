use serde::Serialize;
use serde_yaml::{Mapping, Value};

/// Schema-shaped output of [`crate::generate`].
///
/// A plain nested structure of mappings, sequences, and scalars with keys in generation order.
/// Equality compares mappings as maps, so two documents with the same content in a different
/// key order are equal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Document(Mapping);

impl Document {
    pub(crate) fn new(root: Mapping) -> Self {
        Self(root)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_mapping(&self) -> &Mapping {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Mapping(self.0)
    }
}

impl From<Document> for Value {
    fn from(document: Document) -> Self {
        document.into_value()
    }
}
