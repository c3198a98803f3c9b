//! Service directory scanning.
//!
//! Services are hand-written files under `src/services`. This stage does not
//! generate them; it reads the directory, finds `BaseService` subclasses by
//! line matching, and produces the barrel export plus the fragments the core
//! container needs to expose each service as a cached getter.

use std::fs;
use std::path::Path;

use regex::Regex;
use tracing::debug;

use super::{file_header, quote, FragmentBundle};
use crate::error::Result;
use crate::naming::{cache_symbol, first_lower_case};

/// What a scan of the services directory produced
pub struct ServiceScan {
    /// `services/index.ts` content
    pub index: String,
    /// Fragments for the core container
    pub bundle: FragmentBundle,
}

/// Scan `services_dir` for `.ts` files exporting a `BaseService` subclass.
///
/// Files are visited in name order so output does not depend on directory
/// enumeration order. `index*` files are skipped; only the first class per
/// file is picked up. The doc-comment line nearest above the class becomes
/// the getter's comment.
pub fn scan(services_dir: &Path) -> Result<ServiceScan> {
    let mut stems: Vec<String> = Vec::new();
    for entry in fs::read_dir(services_dir)? {
        let entry = entry?;
        if !entry.path().is_file() {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        let Some(stem) = name.strip_suffix(".ts") else { continue };
        if stem.starts_with("index") {
            continue;
        }
        stems.push(stem.to_string());
    }
    stems.sort();

    let comment_re = Regex::new(r"^\s*\* (.*)").expect("comment pattern is valid");
    let class_re = Regex::new(r"^export class(.*)extends BaseService").expect("class pattern is valid");

    let mut index_lines = vec![file_header("service export")];
    let mut classes: Vec<(String, String)> = Vec::new();
    for stem in &stems {
        index_lines.push(format!("export * from \"./{stem}\";"));
        let text = fs::read_to_string(services_dir.join(format!("{stem}.ts")))?;
        let mut comment = String::new();
        for line in text.lines() {
            if let Some(caps) = comment_re.captures(line) {
                comment = caps.get(1).map_or("", |m| m.as_str()).trim().to_string();
                continue;
            }
            if let Some(caps) = class_re.captures(line) {
                let name: String = caps
                    .get(1)
                    .map_or("", |m| m.as_str())
                    .chars()
                    .filter(|c| !c.is_whitespace())
                    .collect();
                if !name.is_empty() {
                    classes.push((name, comment.clone()));
                } else {
                    debug!("unnamed service class in {}.ts, skipped", stem);
                }
                break;
            }
        }
    }

    let mut bundle = FragmentBundle::empty();
    if !classes.is_empty() {
        let names: Vec<&str> = classes.iter().map(|(n, _)| n.as_str()).collect();
        bundle.import = format!("import {{ {} }} from \"../../services\";", names.join(", "));
    }
    for (name, comment) in &classes {
        let symbol = cache_symbol(name);
        bundle.symbols.push(format!("const {symbol} = Symbol({});", quote(name)));
        let property = first_lower_case(name).replacen("Service", "", 1);
        bundle.getters.push(format!(
            "\n/** {comment} */\nget {property}() {{\nreturn this.getCache({symbol}, {name});\n}}"
        ));
    }

    Ok(ServiceScan {
        index: index_lines.join("\n"),
        bundle,
    })
}
