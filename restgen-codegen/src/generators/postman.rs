//! Postman collection emission (`docs/postman.json`).

use restgen::Registry;
use serde_json::{json, Value};
use tracing::debug;

use crate::naming::key_path;

/// Render a Postman v2.0 collection: one folder per declared group, one
/// request per endpoint. Ungrouped endpoints are left out.
pub fn generate(registry: &Registry) -> Value {
    let mut folders: Vec<Value> = Vec::new();
    for (key, display) in registry.groups() {
        let mut items: Vec<Value> = Vec::new();
        for endpoint in registry.endpoints_in_group(key) {
            items.push(json!({
                "name": endpoint.title,
                "request": {
                    "url": format!("{{{{HOST}}}}{}", key_path(&endpoint.key)),
                    "method": endpoint.method.as_key(),
                    "header": [{ "key": "Content-Type", "value": "application/json" }],
                },
            }));
        }
        folders.push(json!({ "name": display, "item": items }));
    }
    for endpoint in registry.endpoints() {
        if endpoint.group.is_empty() {
            debug!("endpoint {} has no group, left out of the collection", endpoint.key);
        }
    }

    json!({
        "variables": [{
            "enabled": true,
            "key": "HOST",
            "value": format!("{}{}", registry.info.host, registry.info.base_path),
            "type": "text",
        }],
        "info": {
            "name": registry.info.title,
            "_postman_id": "",
            "description": registry.info.description,
            "schema": "https://schema.getpostman.com/json/collection/v2.0.0/collection.json",
        },
        "item": folders,
    })
}
