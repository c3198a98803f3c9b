//! TypeScript source emitters.
//!
//! Each submodule renders one artifact family from the registry or from
//! introspected metadata. Emitters return plain strings; the [`Writer`]
//! applies formatting and the skip-if-exists policy on top.
//!
//! [`Writer`]: crate::writer::Writer

pub mod config;
pub mod core;
pub mod errors;
pub mod harness;
pub mod models;
pub mod params;
pub mod postman;
pub mod responses;
pub mod schemas;
pub mod service;
pub mod types;

use std::collections::BTreeSet;

use restgen::{FieldSpec, Registry};

/// Import, symbol and getter fragments contributed to the core container
/// class by the model and service stages.
#[derive(Debug, Default)]
pub struct FragmentBundle {
    /// Import statement, empty when there is nothing to import
    pub import: String,
    /// `const X_M_SYM = Symbol("X");` lines
    pub symbols: Vec<String>,
    /// Getter blocks for the container class body
    pub getters: Vec<String>,
}

impl FragmentBundle {
    /// Bundle that contributes nothing, used when a stage was skipped.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Escape a string into a double-quoted TypeScript literal.
pub(crate) fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}

/// `["a", "b"]` literal from string items.
pub(crate) fn string_array(items: &[String]) -> String {
    let quoted: Vec<String> = items.iter().map(|item| quote(item)).collect();
    format!("[{}]", quoted.join(", "))
}

/// Standard banner for fully generated files.
pub(crate) fn file_header(label: &str) -> String {
    format!("/**\n * @file {label}\n * Generated by restgen, do not edit\n */\n")
}

/// Render one interface member from a field spec.
///
/// Type resolution order: registered type (ENUM narrows to the literal type
/// of its first allowed value), then schema reference with an optional `[]`
/// suffix, then `any`. Resolved schema references are collected into
/// `schema_refs` so the caller can emit the import line.
pub(crate) fn field_member(
    name: &str,
    spec: &FieldSpec,
    required: bool,
    registry: &Registry,
    schema_refs: &mut BTreeSet<String>,
) -> String {
    let mut member = String::new();
    if let Some(comment) = spec.comment.as_deref().filter(|c| !c.is_empty()) {
        member.push_str(&format!("/** {comment} */\n"));
    }
    let marker = if required { "" } else { "?" };
    let ts_type = resolve_field_type(spec, registry, schema_refs);
    member.push_str(&format!("{name}{marker}: {ts_type};"));
    member
}

fn resolve_field_type(
    spec: &FieldSpec,
    registry: &Registry,
    schema_refs: &mut BTreeSet<String>,
) -> String {
    if let Some(descriptor) = registry.types().get(&spec.type_ref) {
        if descriptor.key == "ENUM" {
            if let Some(first) = spec.first_param() {
                return literal_type(first).to_string();
            }
        }
        if descriptor.ts_type.is_empty() {
            return "any".to_string();
        }
        return descriptor.ts_type.clone();
    }
    let (base, array) = match spec.type_ref.strip_suffix("[]") {
        Some(base) => (base, "[]"),
        None => (spec.type_ref.as_str(), ""),
    };
    if registry.schemas().has(base) {
        let reference = format!("ISchema{base}");
        schema_refs.insert(reference.clone());
        return format!("{reference}{array}");
    }
    "any".to_string()
}

/// TypeScript name for a literal's runtime type, the way `typeof` reports it
/// (arrays and maps both come back as `object`).
fn literal_type(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::String(_) => "string",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::Bool(_) => "boolean",
        _ => "object",
    }
}

/// Import line for collected schema references.
pub(crate) fn schema_import(refs: &BTreeSet<String>) -> String {
    let names: Vec<&str> = refs.iter().map(String::as_str).collect();
    format!("import {{ {} }} from \"./schemas.gen\";\n", names.join(", "))
}
