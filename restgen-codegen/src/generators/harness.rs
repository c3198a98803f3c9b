//! Test harness emission: the typed API client (`test/api/api.gen.ts`) and
//! starter mocha suites per endpoint group.

use std::collections::BTreeSet;

use regex::Regex;
use restgen::{Endpoint, Registry};

use crate::error::{CodegenError, Result};
use crate::naming::{camel_ident, key_path, pascal_ident};

/// Render the typed client: four methods per endpoint wrapping the transport
/// agent. `Raw` returns the unchecked call, `Ok`/`Err` assert the outcome,
/// `Verify` additionally checks the response against the declared schema.
pub fn generate_client(registry: &Registry) -> String {
    let param_re = Regex::new(r":([A-Za-z0-9_]+)").expect("path parameter pattern is valid");
    let mut refs: BTreeSet<String> = BTreeSet::new();
    let mut methods: Vec<String> = Vec::new();
    for endpoint in registry.endpoints() {
        refs.insert(format!("IParams{}", pascal_ident(&endpoint.key)));
        methods.push(client_methods(endpoint, &registry.info.base_path, &param_re));
    }

    let mut code = String::from("import TestAgent from \"../agent\";\n");
    if !refs.is_empty() {
        let names: Vec<&str> = refs.iter().map(String::as_str).collect();
        code.push_str(&format!(
            "import {{ {} }} from \"../../src/global\";\n",
            names.join(", ")
        ));
    }
    code.push_str("\nexport default class APITest<T> extends TestAgent<T> {\n");
    code.push_str(&methods.join("\n"));
    code.push_str("}\n");
    code
}

fn client_methods(endpoint: &Endpoint, base_path: &str, param_re: &Regex) -> String {
    let name = camel_ident(&endpoint.key);
    let ident = pascal_ident(&endpoint.key);
    let key = &endpoint.key;
    let title = &endpoint.title;
    let call = endpoint.method.as_call();
    let path = param_re
        .replace_all(key_path(key), "$${input!.$1}")
        .into_owned();
    let quoted: Vec<String> = endpoint
        .path_param_names()
        .iter()
        .map(|n| format!("\"{n}\""))
        .collect();
    let params = format!("[{}]", quoted.join(", "));

    let mut code = String::new();
    code.push_str(&format!("/** {title} */\n"));
    code.push_str(&format!("{name}Raw(input?: IParams{ident}, example?: string) {{\n"));
    code.push_str(&format!(
        "return this.{call}(`{base_path}{path}`, input, example, {params});\n"
    ));
    code.push_str("}\n\n");

    code.push_str(&format!("/** {title} (success) */\n"));
    code.push_str(&format!("{name}Ok(input?: IParams{ident}, example?: string) {{\n"));
    code.push_str(&format!("return this.{name}Raw(input, example).success();\n"));
    code.push_str("}\n\n");

    code.push_str(&format!("/** {title} (error) */\n"));
    code.push_str(&format!("{name}Err(input?: IParams{ident}, example?: string) {{\n"));
    code.push_str(&format!("return this.{name}Raw(input, example).error();\n"));
    code.push_str("}\n\n");

    code.push_str(&format!("/** {title} (verify) */\n"));
    code.push_str(&format!(
        "async {name}Verify(input?: IParams{ident}, example?: string) {{\n"
    ));
    code.push_str(&format!("const ret = await this.{name}Ok(input, example);\n"));
    code.push_str(&format!("const opt = this.api.api.$apis.get(\"{key}\")!.options;\n"));
    code.push_str("const schema = opt.responseSchema || opt.response;\n");
    code.push_str("return this.verifyOutput(ret, schema);\n");
    code.push_str("}\n");
    code
}

/// Render a starter mocha suite for one endpoint group. Inputs come from the
/// shared fixture object, keyed by parameter name, so the file runs after
/// filling in the group fixtures.
///
/// Fails when the group matches no endpoints.
pub fn generate_group_suite(registry: &Registry, group: &str) -> Result<String> {
    let group_lower = group.to_lowercase();
    let endpoints: Vec<&Endpoint> = registry
        .endpoints()
        .filter(|e| e.group.to_lowercase() == group_lower)
        .collect();
    if endpoints.is_empty() {
        return Err(CodegenError::ValidationError(format!(
            "no endpoints found for group: {group}"
        )));
    }

    let base_path = &registry.info.base_path;
    let mut blocks: Vec<String> = Vec::new();
    for endpoint in endpoints {
        let mut names: Vec<&String> = Vec::new();
        for name in endpoint.query.keys().chain(endpoint.body.keys()) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        let input_chain = if names.is_empty() {
            String::new()
        } else {
            let entries: Vec<String> = names.iter().map(|n| format!("{n}: share.{n}")).collect();
            format!("\n.input({{ {} }})", entries.join(", "))
        };
        blocks.push(format!(
            "it('{title}', async () => {{\nconst ret = await agent.{call}('{base_path}{path}'){input_chain}\n.takeExample('{title}')\n.success();\nassert.ok(ret);\n}});",
            title = endpoint.title,
            call = endpoint.method.as_call(),
            path = key_path(&endpoint.key),
        ));
    }

    Ok(format!(
        "import {{ assert }} from \"chai\";\n\nimport apiService from \"./init\";\n\nconst agent = apiService.test.session();\nconst shareData = apiService.shareTestData.data;\nconst share = Object.assign({{}}, shareData.core, shareData.{group});\n\ndescribe('API - {group}', () => {{\n\n{body}\n}});\n",
        body = blocks.join("\n\n")
    ))
}
