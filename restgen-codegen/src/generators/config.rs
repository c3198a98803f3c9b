//! Configuration interface emission (`config.gen.ts`).
//!
//! The target project loads `config/base.yaml` and overlays
//! `config/{env}.yaml` at boot. This stage loads the same files, merges them
//! the same way, and emits one interface per nested object so `config.mysql.
//! host` is typed instead of `any`. Comments are mined from the raw base
//! file and re-attached to the matching keys. YAML has no reflection for
//! comments, so the mining is line-based and best-effort: a miss loses the
//! comment, never the key.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde_yaml::{mapping::Entry, Mapping, Value};

use crate::error::Result;
use crate::naming::first_upper_case;

/// Merged configuration tree plus the raw base file for comment mining
pub struct LoadedConfig {
    pub value: Value,
    pub base_text: String,
}

/// Load `base.yaml` and the `{env}.yaml` overlay from `config_dir`.
///
/// Mirrors the runtime bootstrap: `env` and `ispro` are injected first,
/// later files win key by key. A missing overlay file is fine; a missing
/// base file is an error.
pub fn load_config_tree(config_dir: &Path, env: &str) -> Result<LoadedConfig> {
    let base_text = fs::read_to_string(config_dir.join("base.yaml"))?;

    let mut root = Value::Mapping(Mapping::new());
    insert_key(&mut root, "env", Value::String(env.to_string()));
    insert_key(&mut root, "ispro", Value::Bool(env == "production" || env == "prod"));

    let base: Value = serde_yaml::from_str(&base_text)?;
    if base.is_mapping() {
        deep_merge(&mut root, base);
    }

    let overlay_path = config_dir.join(format!("{env}.yaml"));
    if overlay_path.exists() {
        let overlay: Value = serde_yaml::from_str(&fs::read_to_string(&overlay_path)?)?;
        if overlay.is_mapping() {
            deep_merge(&mut root, overlay);
        }
    }

    Ok(LoadedConfig {
        value: root,
        base_text,
    })
}

fn insert_key(root: &mut Value, key: &str, value: Value) {
    if let Value::Mapping(map) = root {
        map.insert(Value::String(key.to_string()), value);
    }
}

/// Merge `incoming` into `target`: maps merge key by key, everything else
/// (scalars, sequences) replaces wholesale.
fn deep_merge(target: &mut Value, incoming: Value) {
    match (target, incoming) {
        (Value::Mapping(current), Value::Mapping(overrides)) => {
            for (key, value) in overrides {
                match current.entry(key) {
                    Entry::Occupied(mut slot) => deep_merge(slot.get_mut(), value),
                    Entry::Vacant(slot) => {
                        slot.insert(value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

/// Pull comments out of raw YAML, keyed by lowercased dotted key path.
///
/// A trailing `# note` on a key line wins; otherwise a full-line comment
/// directly above the key is used. Nesting is tracked by indentation. List
/// items and blank lines drop any pending comment.
pub fn mine_comments(text: &str) -> BTreeMap<String, String> {
    let mut comments = BTreeMap::new();
    let mut stack: Vec<(usize, String)> = Vec::new();
    let mut pending: Option<String> = None;

    for raw in text.lines() {
        let line = raw.trim_end();
        let stripped = line.trim_start();
        if stripped.is_empty() {
            pending = None;
            continue;
        }
        if let Some(rest) = stripped.strip_prefix('#') {
            pending = Some(rest.trim().to_string());
            continue;
        }
        let Some((key, rest)) = split_key(stripped) else {
            pending = None;
            continue;
        };
        let indent = line.len() - stripped.len();
        while stack.last().is_some_and(|(depth, _)| *depth >= indent) {
            stack.pop();
        }
        stack.push((indent, key.to_string()));

        let comment = trailing_comment(rest).or_else(|| pending.take());
        if let Some(comment) = comment.filter(|c| !c.is_empty()) {
            let path: Vec<String> = stack.iter().map(|(_, k)| k.to_lowercase()).collect();
            comments.insert(path.join("."), comment);
        }
        pending = None;
    }
    comments
}

/// Split a `key: rest` line. Returns `None` for list items and lines that do
/// not look like a plain mapping key.
fn split_key(line: &str) -> Option<(&str, &str)> {
    if line.starts_with('-') {
        return None;
    }
    let (head, rest) = line.split_once(':')?;
    let key = head.trim().trim_matches('"').trim_matches('\'');
    if key.is_empty() || key.contains(' ') || key.contains('#') {
        return None;
    }
    Some((key, rest))
}

/// Comment after the value on a key line. A `#` only counts when preceded by
/// whitespace and outside quotes.
fn trailing_comment(rest: &str) -> Option<String> {
    let mut in_quote: Option<char> = None;
    let mut prev_space = true;
    for (i, ch) in rest.char_indices() {
        match in_quote {
            Some(q) => {
                if ch == q {
                    in_quote = None;
                }
            }
            None => match ch {
                '"' | '\'' => in_quote = Some(ch),
                '#' if prev_space => {
                    let comment = rest[i + 1..].trim();
                    if comment.is_empty() {
                        return None;
                    }
                    return Some(comment.to_string());
                }
                _ => {}
            },
        }
        prev_space = ch.is_whitespace();
    }
    None
}

/// Render `config.gen.ts`. Child interfaces are emitted before the root
/// `IConfig`, which keeps an index signature for keys only present in
/// overlay files.
pub fn generate(loaded: &LoadedConfig) -> String {
    let comments = mine_comments(&loaded.base_text);
    let mut interfaces: Vec<String> = Vec::new();
    emit_interface(&loaded.value, &[], &comments, &mut interfaces);
    let mut code = interfaces.join("\n\n");
    code.push('\n');
    code
}

fn emit_interface(
    value: &Value,
    path: &[String],
    comments: &BTreeMap<String, String>,
    result: &mut Vec<String>,
) {
    let mut lines = vec![format!("export interface {} {{", interface_name(path))];
    if path.is_empty() {
        lines.push("[key: string]: any;".to_string());
    }
    if let Value::Mapping(map) = value {
        for (key, child) in map {
            let Some(key) = scalar_key(key) else { continue };
            let mut child_path = path.to_vec();
            child_path.push(key.clone());
            if let Some(comment) = comments.get(&comment_key(&child_path)) {
                lines.push(format!("/** {comment} */"));
            }
            let member = member_key(&key);
            match child {
                Value::Mapping(_) => {
                    emit_interface(child, &child_path, comments, result);
                    lines.push(format!("{member}: {};", interface_name(&child_path)));
                }
                Value::Sequence(items) => {
                    lines.push(sequence_member(&member, items.first(), &child_path, comments, result));
                }
                other => lines.push(format!("{member}: {};", scalar_type(other))),
            }
        }
    }
    lines.push("}".to_string());
    result.push(lines.join("\n"));
}

/// Member line for a sequence value, typed from its first element. A
/// sequence of maps gets an element interface named after the key path.
fn sequence_member(
    member: &str,
    first: Option<&Value>,
    child_path: &[String],
    comments: &BTreeMap<String, String>,
    result: &mut Vec<String>,
) -> String {
    match first {
        Some(Value::String(_)) => format!("{member}: string[];"),
        Some(Value::Number(_)) => format!("{member}: number[];"),
        Some(Value::Bool(_)) => format!("{member}: boolean[];"),
        Some(element @ Value::Mapping(_)) => {
            emit_interface(element, child_path, comments, result);
            format!("{member}: {}[];", interface_name(child_path))
        }
        _ => format!("{member}: any[];"),
    }
}

/// Interface name from the key path: `["mysql", "pool"]` -> `IMysqlPool`.
/// The full path is used so sibling subtrees with same-named children do not
/// collide.
fn interface_name(path: &[String]) -> String {
    if path.is_empty() {
        return "IConfig".to_string();
    }
    let mut name = String::from("I");
    for segment in path {
        let clean: String = segment
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
            .collect();
        name.push_str(&first_upper_case(&clean));
    }
    name
}

fn comment_key(path: &[String]) -> String {
    let lowered: Vec<String> = path.iter().map(|s| s.to_lowercase()).collect();
    lowered.join(".")
}

/// Keys that are not valid identifiers are emitted quoted.
fn member_key(key: &str) -> String {
    let valid = !key.is_empty()
        && key
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if valid {
        key.to_string()
    } else {
        super::quote(key)
    }
}

fn scalar_type(value: &Value) -> &'static str {
    match value {
        Value::String(_) => "string",
        Value::Number(_) => "number",
        Value::Bool(_) => "boolean",
        _ => "any",
    }
}

fn scalar_key(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
