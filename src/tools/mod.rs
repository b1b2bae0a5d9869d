//! Handlers behind each MCP tool.
//!
//! Handlers return user-facing text on both paths; the server passes the
//! `Err` text straight back to the client as a tool error.

pub mod find_components;
pub mod find_icons;
pub mod get_component_docs;
pub mod list_components;
pub mod validate_component_api;

pub use find_components::*;
pub use find_icons::*;
pub use get_component_docs::*;
pub use list_components::*;
pub use validate_component_api::*;

use crate::catalog::{ComponentCatalog, LoadedCatalog};
use std::sync::Arc;

/// Load the catalog on first use, turning failures into tool error text.
pub(crate) async fn loaded_catalog(catalog: &ComponentCatalog) -> Result<Arc<LoadedCatalog>, String> {
    catalog.load().await.map_err(|e| {
        tracing::warn!("Component catalog unavailable: {}", e);
        e.to_string()
    })
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::catalog::ComponentCatalog;
    use crate::manifest::Manifest;
    use serde_json::json;

    /// forge-button, forge-icon-button and forge-card in one manifest.
    pub(crate) fn catalog() -> ComponentCatalog {
        let manifest: Manifest = serde_json::from_value(json!({
            "schemaVersion": "1.0.0",
            "modules": [{
                "kind": "javascript-module",
                "path": "lib/button/button.js",
                "declarations": [
                    {
                        "kind": "class",
                        "name": "ButtonComponent",
                        "tagName": "forge-button",
                        "customElement": true,
                        "summary": "Buttons trigger actions.",
                        "members": [
                            { "kind": "field", "name": "disabled", "type": { "text": "boolean" } },
                            { "kind": "field", "name": "raised", "deprecated": "Use variant instead." },
                            { "kind": "method", "name": "focus" }
                        ],
                        "attributes": [{ "name": "disabled" }],
                        "events": [{ "name": "forge-button-click" }]
                    },
                    {
                        "kind": "class",
                        "name": "IconButtonComponent",
                        "tagName": "forge-icon-button",
                        "customElement": true,
                        "summary": "A compact button showing only an icon."
                    },
                    {
                        "kind": "class",
                        "name": "CardComponent",
                        "tagName": "forge-card",
                        "customElement": true,
                        "summary": "Groups related content."
                    }
                ]
            }]
        }))
        .unwrap();
        ComponentCatalog::from_manifests(vec![manifest]).unwrap()
    }
}
