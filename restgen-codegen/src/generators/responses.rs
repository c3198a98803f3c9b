//! Response type emission (`responses.gen.ts`).

use std::collections::BTreeSet;

use restgen::{Registry, ResponseSpec};
use tracing::debug;

use super::{field_member, schema_import};
use crate::naming::pascal_ident;

/// Render `responses.gen.ts`: an `IResponse*` type per endpoint, in key
/// order. Endpoints without a declared response get an `any` alias so the
/// test client always has something to name.
pub fn generate(registry: &Registry) -> String {
    let mut schema_refs = BTreeSet::new();
    let mut parts: Vec<String> = Vec::new();
    let mut any_endpoint = false;
    for endpoint in registry.endpoints() {
        any_endpoint = true;
        let ident = pascal_ident(&endpoint.key);
        let mut code = String::new();
        if !endpoint.title.is_empty() {
            code.push_str(&format!("/** {} response */\n", endpoint.title));
        }
        match &endpoint.response {
            None => code.push_str(&format!("export type IResponse{ident} = any;\n")),
            Some(ResponseSpec::Schema(reference)) => {
                code.push_str(&alias(&ident, reference, registry, &mut schema_refs));
            }
            Some(ResponseSpec::Fields(fields)) => {
                code.push_str(&format!("export interface IResponse{ident} {{\n"));
                for (name, spec) in fields {
                    code.push_str(&field_member(name, spec, spec.required, registry, &mut schema_refs));
                    code.push('\n');
                }
                code.push_str("}\n");
            }
        }
        parts.push(code);
    }
    if !any_endpoint {
        return "export default {};\n".to_string();
    }
    if !schema_refs.is_empty() {
        parts.insert(0, schema_import(&schema_refs));
    }
    parts.join("\n")
}

fn alias(
    ident: &str,
    reference: &str,
    registry: &Registry,
    schema_refs: &mut BTreeSet<String>,
) -> String {
    let (base, array) = match reference.strip_suffix("[]") {
        Some(base) => (base, "[]"),
        None => (reference, ""),
    };
    if registry.schemas().has(base) {
        let name = format!("ISchema{base}");
        schema_refs.insert(name.clone());
        return format!("export type IResponse{ident} = {name}{array};\n");
    }
    debug!("response references unknown schema {}, using any", reference);
    format!("export type IResponse{ident} = any;\n")
}
