//! Named schemas and field declarations
//!
//! A [`FieldSpec`] describes one declared parameter or schema field: the type
//! it resolves through, an optional comment, the required flag and, for ENUM
//! fields, the literal values. A [`Schema`] is an ordered field map that can
//! be registered under a name and referenced from endpoint responses.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One declared parameter or schema field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Type registry key (e.g. `"TrimString"`) or schema reference
    pub type_ref: String,
    /// Comment emitted as the field's doc comment
    pub comment: Option<String>,
    /// Field-level required flag
    pub required: bool,
    /// Literal values for ENUM fields, e.g. `["asc", "desc"]`
    pub params: Option<Value>,
}

impl FieldSpec {
    /// Create a field of the given type, optional by default.
    pub fn new(type_ref: impl Into<String>) -> Self {
        Self {
            type_ref: type_ref.into(),
            comment: None,
            required: false,
            params: None,
        }
    }

    /// Attach a comment.
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Mark the field required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Attach ENUM literal values.
    pub fn params(mut self, params: Value) -> Self {
        self.params = Some(params);
        self
    }

    /// First ENUM literal, if any. Emitters derive the TypeScript type of an
    /// ENUM field from this value.
    pub fn first_param(&self) -> Option<&Value> {
        match &self.params {
            Some(Value::Array(values)) => values.first(),
            _ => None,
        }
    }
}

/// An ordered map of named fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    pub fields: BTreeMap<String, FieldSpec>,
}

impl Schema {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field, consuming and returning the schema for chaining.
    pub fn field(mut self, name: impl Into<String>, spec: FieldSpec) -> Self {
        self.fields.insert(name.into(), spec);
        self
    }

    /// Whether the schema declares no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Named schemas, iterated in name order.
///
/// Re-registering a name replaces the previous schema.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: BTreeMap<String, Schema>,
}

impl SchemaRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a schema under a name.
    pub fn register(&mut self, name: impl Into<String>, schema: Schema) {
        self.schemas.insert(name.into(), schema);
    }

    /// Whether a schema name is registered.
    pub fn has(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// Look up a schema by name.
    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.schemas.get(name)
    }

    /// Iterate `(name, schema)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Schema)> {
        self.schemas.iter()
    }

    /// Number of registered schemas.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
