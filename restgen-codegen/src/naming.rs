//! Naming utilities for code generation
//!
//! These mirror the helper functions shipped inside the generated projects,
//! so identifiers derived here match what the project derives at runtime.

/// Uppercase the first character, if it is not whitespace.
pub fn first_upper_case(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) if !first.is_whitespace() => {
            first.to_uppercase().chain(chars).collect()
        }
        _ => input.to_string(),
    }
}

/// Lowercase the first character, if it is not whitespace.
pub fn first_lower_case(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) if !first.is_whitespace() => {
            first.to_lowercase().chain(chars).collect()
        }
        _ => input.to_string(),
    }
}

fn is_separator(ch: char) -> bool {
    matches!(ch, '_' | '.' | '-' | ' ')
}

/// Convert an underscore/dot/dash/space separated name to lowerCamelCase.
///
/// Leading separators are stripped, the rest is lowercased wholesale, then
/// the character after each interior separator run is uppercased. Trailing
/// separator runs are dropped: `"user_name_"` becomes `"userName"`.
pub fn underscore_to_camel_case(input: &str) -> String {
    let trimmed = input.trim_start_matches(is_separator);
    let lowered = trimmed.to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut upper_next = false;
    for ch in lowered.chars() {
        if is_separator(ch) {
            upper_next = true;
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

/// lowerCamelCase identifier for an endpoint key: `/` and `:` become `_`,
/// then the result is camel-cased. `"GET_/base/index"` -> `"getBaseIndex"`.
pub fn camel_ident(key: &str) -> String {
    let flattened = key.replace(['/', ':'], "_");
    underscore_to_camel_case(&flattened)
}

/// PascalCase identifier for an endpoint key.
/// `"GET_/base/index"` -> `"GetBaseIndex"`.
pub fn pascal_ident(key: &str) -> String {
    first_upper_case(&camel_ident(key))
}

/// Name of the memoization symbol constant for a camel-case property.
/// `"userInfo"` -> `"USERINFO_M_SYM"`.
pub fn cache_symbol(name: &str) -> String {
    format!("{}_M_SYM", name.to_uppercase())
}

/// Route path of an endpoint key: everything after the first `_`.
/// `"GET_/base/index"` -> `"/base/index"`.
pub fn key_path(key: &str) -> &str {
    match key.find('_') {
        Some(idx) => &key[idx + 1..],
        None => key,
    }
}
