//! Parameter interface emission (`params.gen.ts`).

use std::collections::BTreeSet;

use restgen::Registry;

use super::{field_member, schema_import};
use crate::naming::pascal_ident;

/// Render `params.gen.ts`: one `IParams*` interface per endpoint, in key
/// order. Path, query and body parameters are merged into one interface;
/// body wins on name clashes.
pub fn generate(registry: &Registry) -> String {
    let mut schema_refs = BTreeSet::new();
    let mut parts: Vec<String> = Vec::new();
    for endpoint in registry.endpoints() {
        let mut code = String::new();
        if !endpoint.title.is_empty() {
            code.push_str(&format!("/** {} parameters */\n", endpoint.title));
        }
        code.push_str(&format!(
            "export interface IParams{} {{\n",
            pascal_ident(&endpoint.key)
        ));
        for (name, spec) in endpoint.all_params() {
            let required = endpoint.is_required(name, spec);
            code.push_str(&field_member(name, spec, required, registry, &mut schema_refs));
            code.push('\n');
        }
        code.push_str("}\n");
        parts.push(code);
    }
    if !schema_refs.is_empty() {
        parts.insert(0, schema_import(&schema_refs));
    }
    parts.join("\n")
}
