//! Core container emission (`core.gen.ts`).
//!
//! The container classes give request handlers lazy access to every model
//! and service through cached getters. Both classes are always emitted, even
//! empty, so downstream imports stay valid when a stage was skipped.

use super::FragmentBundle;

/// Render `core.gen.ts` from the model and service fragments.
pub fn generate(models: &FragmentBundle, services: &FragmentBundle) -> String {
    let mut code = String::from("import { BaseService, BaseModel, CoreGen } from \"../../core\";\n\n");
    if !models.import.is_empty() {
        code.push_str(&models.import);
        code.push('\n');
    }
    if !services.import.is_empty() {
        code.push_str(&services.import);
        code.push('\n');
    }
    code.push('\n');
    for symbol in &services.symbols {
        code.push_str(symbol);
        code.push('\n');
    }
    code.push_str("\nexport class Service extends CoreGen<BaseService> {");
    for getter in &services.getters {
        code.push_str(getter);
    }
    code.push_str("\n}\n\n");
    for symbol in &models.symbols {
        code.push_str(symbol);
        code.push('\n');
    }
    code.push_str("\nexport class Model extends CoreGen<BaseModel> {");
    for getter in &models.getters {
        code.push_str(getter);
    }
    code.push_str("\n}\n");
    code
}
