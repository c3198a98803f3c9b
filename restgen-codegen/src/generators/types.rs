//! Type table emission (`types.gen.ts`).

use restgen::Registry;

use super::quote;

/// Render `types.gen.ts`: a single `TYPES` constant mapping every registered
/// type key to itself, with the type's description as its doc comment.
pub fn generate(registry: &Registry) -> String {
    let mut code = String::from("export const TYPES = {\n");
    for descriptor in registry.types().iter() {
        if !descriptor.description.is_empty() {
            code.push_str(&format!("/** {} */\n", descriptor.description));
        }
        code.push_str(&format!("{}: {},\n", descriptor.key, quote(&descriptor.key)));
    }
    code.push_str("};\n");
    code
}

#[cfg(test)]
mod tests {
    use restgen::Registry;

    use super::generate;

    #[test]
    fn table_lists_types_in_key_order() {
        let registry = Registry::new();
        let code = generate(&registry);
        assert!(code.starts_with("export const TYPES = {"));
        assert!(code.trim_end().ends_with("};"));
        assert!(code.contains("Boolean: \"Boolean\","));
        assert!(code.contains("/** Integer */\nInteger: \"Integer\","));
        let any = code.find("Any:").unwrap();
        let type_string = code.find("String:").unwrap();
        assert!(any < type_string);
    }

    #[test]
    fn custom_types_are_included() {
        let mut registry = Registry::new();
        registry.register_type("Money", "string", "Decimal carried as a string");
        let code = generate(&registry);
        assert!(code.contains("/** Decimal carried as a string */\nMoney: \"Money\","));
    }
}
