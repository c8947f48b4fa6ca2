use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single catalog record, kept exactly as it appeared in the source file.
///
/// Only the `id` key is interpreted. Key order is preserved and a repeated
/// key keeps its first position with the last value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Item {
    fields: Map<String, Value>,
}

impl Item {
    pub fn new(id: impl Into<String>) -> Self {
        Self::default().with_field("id", Value::String(id.into()))
    }

    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    /// Lookup key. `None` when the record has no `id` or it is not a string;
    /// such records load fine but can never be matched.
    pub fn id(&self) -> Option<&str> {
        self.fields.get("id").and_then(Value::as_str)
    }

    /// Exact, case-sensitive comparison against the requested id.
    pub fn has_id(&self, id: &str) -> bool {
        self.id() == Some(id)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}
