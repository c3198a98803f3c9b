//! Error class emission (`errors.gen.ts`).
//!
//! Every descriptor in the catalog becomes an `Error` subclass carrying its
//! code and flags, so handlers can `throw new NotFoundError("note 42")` and
//! middleware can decide from `show`/`log` what to surface.

use restgen::{ErrorDescriptor, Registry};

use super::quote;
use crate::naming::{first_upper_case, underscore_to_camel_case};

const PRELUDE: &str = "/* tslint:disable: max-classes-per-file */\n";

const IERROR: &str = "\
/** Typed error contract */
export interface IError {
/** Numeric error code */
code: number;
/** Default description */
description: string;
/** Registry name */
name: string;
/** Whether the error is exposed to callers */
show: boolean;
/** Whether occurrences are logged */
log: boolean;
/** Message the instance was built with */
msg: string;
}
";

/// Render `errors.gen.ts` from the error catalog. An empty catalog still
/// yields the `IError` interface.
pub fn generate(registry: &Registry) -> String {
    let mut parts = vec![PRELUDE.to_string(), IERROR.to_string()];
    for descriptor in registry.errors().iter() {
        parts.push(error_class(descriptor));
    }
    parts.join("\n")
}

fn error_class(error: &ErrorDescriptor) -> String {
    let class = first_upper_case(&underscore_to_camel_case(&error.name));
    let description = quote(&error.description);
    let prefixed = quote(&format!("{} : ", error.description));
    let mut code = String::new();
    code.push_str(&format!("/** {} - {} */\n", error.name, error.description));
    code.push_str(&format!("export class {class} extends Error implements IError {{\n"));
    code.push_str(&format!("public code = {};\n", error.code));
    code.push_str(&format!("public description = {description};\n"));
    code.push_str(&format!("public name = {};\n", quote(&error.name)));
    code.push_str(&format!("public show = {};\n", error.show));
    code.push_str(&format!("public log = {};\n", error.log));
    code.push_str("public msg: string;\n");
    code.push('\n');
    code.push_str("constructor(message?: string) {\n");
    code.push_str(&format!("super(message ? {prefixed} + message : {description});\n"));
    code.push_str(&format!("this.msg = message || {description};\n"));
    code.push_str("}\n");
    code.push_str("}\n");
    code
}
