//! Schema interface emission (`schemas.gen.ts`).

use restgen::{Registry, Schema};
use tracing::debug;

/// Render `schemas.gen.ts`: one `ISchema*` interface per registered schema,
/// in name order. Every member is emitted required; optionality is a
/// per-endpoint concern and lives in the params interfaces.
pub fn generate(registry: &Registry) -> String {
    let mut parts: Vec<String> = Vec::new();
    for (name, schema) in registry.schemas().iter() {
        if name.is_empty() {
            continue;
        }
        parts.push(interface(name, schema));
    }
    if parts.is_empty() {
        return "export default {};\n".to_string();
    }
    parts.join("\n")
}

fn interface(name: &str, schema: &Schema) -> String {
    let mut code = format!("export interface ISchema{name} {{\n");
    for (field, spec) in &schema.fields {
        let comment = spec.comment.as_deref().filter(|c| !c.is_empty()).unwrap_or(field);
        code.push_str(&format!("/** {comment} */\n"));
        code.push_str(&format!(
            "{field}: {};\n",
            member_type(name, field, &spec.type_ref)
        ));
    }
    code.push_str("}\n");
    code
}

/// Coarse mapping from type keys to member types. Anything without String,
/// Integer or Date in its key comes out as `any`.
fn member_type(schema: &str, field: &str, type_ref: &str) -> &'static str {
    if type_ref.contains("String") {
        return "string";
    }
    if type_ref.contains("Integer") {
        return "number";
    }
    if type_ref.contains("Date") {
        return "Date";
    }
    debug!("no member mapping for {}.{} ({}), using any", schema, field, type_ref);
    "any"
}
