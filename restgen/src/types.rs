//! Value-type registry
//!
//! Every parameter and schema field declares its type by key ("TrimString",
//! "Integer", ...). The registry maps each key to the TypeScript type
//! expression used when emitting interfaces, plus a human description that
//! ends up in generated doc comments.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A registered value type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    /// Registry key, e.g. `"TrimString"`
    pub key: String,
    /// TypeScript type expression this key maps to, e.g. `"string"`
    pub ts_type: String,
    /// Human description shown in generated doc comments
    pub description: String,
}

/// Ordered collection of registered value types.
///
/// Iteration order is the key's sort order, so generated output is stable
/// regardless of registration order. Re-registering a key replaces the
/// previous descriptor.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: BTreeMap<String, TypeDescriptor>,
}

impl TypeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry pre-loaded with the framework's built-in types.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for (key, ts_type, description) in DEFAULT_TYPES {
            registry.register(*key, *ts_type, *description);
        }
        registry
    }

    /// Register a type. Re-registering a key replaces the previous entry.
    pub fn register(
        &mut self,
        key: impl Into<String>,
        ts_type: impl Into<String>,
        description: impl Into<String>,
    ) {
        let key = key.into();
        let descriptor = TypeDescriptor {
            key: key.clone(),
            ts_type: ts_type.into(),
            description: description.into(),
        };
        self.types.insert(key, descriptor);
    }

    /// Whether a type key is registered.
    pub fn has(&self, key: &str) -> bool {
        self.types.contains_key(key)
    }

    /// Look up a descriptor by key.
    pub fn get(&self, key: &str) -> Option<&TypeDescriptor> {
        self.types.get(key)
    }

    /// Iterate descriptors in key order.
    pub fn iter(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.types.values()
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Built-in types installed by [`TypeRegistry::with_defaults`].
///
/// ENUM has no fixed TypeScript type: fields carry their literal values and
/// the emitters derive the type from the first literal, falling back to the
/// `string` registered here when no literals are given.
const DEFAULT_TYPES: &[(&str, &str, &str)] = &[
    ("Boolean", "boolean", "Boolean value"),
    ("Date", "Date", "Date string"),
    ("String", "string", "String"),
    ("TrimString", "string", "String with surrounding whitespace trimmed"),
    ("Number", "number", "Numeric value"),
    ("Integer", "number", "Integer"),
    ("Float", "number", "Floating point number"),
    ("Object", "Record<string, any>", "Plain object"),
    ("Array", "any[]", "Array"),
    ("JSON", "any", "Object parsed from a JSON string"),
    ("JSONString", "string", "JSON string"),
    ("Any", "any", "Any type"),
    ("MongoIdString", "string", "MongoDB ObjectId string"),
    ("Email", "string", "Email address"),
    ("Domain", "string", "Domain name, e.g. example.com"),
    ("Alpha", "string", "Alphabetic string (a-zA-Z)"),
    ("AlphaNumeric", "string", "Alphanumeric string (a-zA-Z0-9)"),
    ("Ascii", "string", "ASCII string"),
    ("Base64", "string", "Base64 string"),
    ("URL", "string", "URL string"),
    ("ENUM", "string", "Enumeration over declared literal values"),
    ("IntArray", "number[]", "Array of integers"),
    ("StringArray", "string[]", "Array of strings"),
    ("NullableString", "string", "String that may be null"),
    ("NullableInteger", "number", "Integer that may be null"),
];
