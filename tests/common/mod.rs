//! Shared test fixtures for integration tests.
//!
//! [`TempWorkspace`] gives each test its own directory tree. The manifest
//! builders produce the small component library the scenarios run against:
//! `forge-button` (public `disabled: boolean`, public `focus()`, deprecated
//! `raised`), `forge-icon-button`, `forge-button-toggle-group` and
//! `forge-card`.

use forge_docs_mcp::manifest::Manifest;
use rstest::fixture;
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory that is removed when dropped.
#[allow(dead_code)] // Methods used across different integration test crates
pub struct TempWorkspace {
    _temp: TempDir,
    root: PathBuf,
}

#[allow(dead_code)] // Methods used across different integration test crates
impl TempWorkspace {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().to_path_buf();
        Self { _temp: temp, root }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Creates a directory (and all parent directories) within this workspace.
    pub fn create_dir(&self, path: &str) {
        let full_path = self.root.join(path);
        std::fs::create_dir_all(&full_path)
            .unwrap_or_else(|e| panic!("Failed to create directory '{}': {}", path, e));
    }

    /// Creates a file, along with any missing parent directories.
    pub fn create_file(&self, path: &str, content: &str) {
        let full_path = self.root.join(path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap_or_else(|e| {
                panic!("Failed to create parent directory for '{}': {}", path, e)
            });
        }
        std::fs::write(&full_path, content)
            .unwrap_or_else(|e| panic!("Failed to write file '{}': {}", path, e));
    }

    pub fn write_manifest(&self, path: &str, manifest: &Value) {
        self.create_file(path, &manifest.to_string());
    }

    /// A project with `package.json` and the given manifest installed under
    /// `node_modules/<package>/custom-elements.json`.
    pub fn install_package(&self, package: &str, manifest: &Value) {
        if !self.root.join("package.json").exists() {
            self.create_file("package.json", r#"{ "name": "app" }"#);
        }
        self.write_manifest(
            &format!("node_modules/{package}/custom-elements.json"),
            manifest,
        );
    }
}

impl Default for TempWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

/// A manifest with one module holding `declarations`.
pub fn manifest_json(path: &str, declarations: Vec<Value>) -> Value {
    json!({
        "schemaVersion": "1.0.0",
        "modules": [{
            "kind": "javascript-module",
            "path": path,
            "declarations": declarations,
        }]
    })
}

pub fn element(tag: &str, name: &str, summary: &str) -> Value {
    json!({
        "kind": "class",
        "name": name,
        "tagName": tag,
        "customElement": true,
        "summary": summary,
    })
}

pub fn button() -> Value {
    json!({
        "kind": "class",
        "name": "ButtonComponent",
        "tagName": "forge-button",
        "customElement": true,
        "summary": "Buttons let users take actions with a single tap.",
        "members": [
            {
                "kind": "field",
                "name": "disabled",
                "type": { "text": "boolean" },
                "default": "false",
                "description": "Disables the button.",
                "attribute": "disabled"
            },
            {
                "kind": "field",
                "name": "raised",
                "type": { "text": "boolean" },
                "deprecated": "Use variant=\"raised\" instead."
            },
            {
                "kind": "field",
                "name": "_internals",
                "privacy": "private"
            },
            {
                "kind": "method",
                "name": "focus",
                "parameters": [
                    { "name": "options", "type": { "text": "FocusOptions" }, "optional": true }
                ]
            }
        ],
        "attributes": [
            { "name": "disabled", "type": { "text": "boolean" }, "fieldName": "disabled" },
            { "name": "variant", "type": { "text": "string" } }
        ],
        "events": [{ "name": "forge-button-click" }],
        "slots": [{ "name": "", "description": "Button label." }, { "name": "start" }],
        "cssParts": [{ "name": "root" }]
    })
}

/// The component library used across scenarios.
pub fn library_json() -> Value {
    manifest_json(
        "lib/index.js",
        vec![
            button(),
            element(
                "forge-icon-button",
                "IconButtonComponent",
                "A compact icon-only control.",
            ),
            element(
                "forge-button-toggle-group",
                "ButtonToggleGroupComponent",
                "Groups toggle buttons together.",
            ),
            element("forge-card", "CardComponent", "Groups related content."),
            element("forge-dialog", "DialogComponent", "Modal windows."),
        ],
    )
}

#[allow(dead_code)] // Used across different integration test crates
pub fn library_manifest() -> Manifest {
    serde_json::from_value(library_json()).expect("fixture manifest deserializes")
}

#[allow(dead_code)] // Used across different integration test crates
#[fixture]
pub fn workspace() -> TempWorkspace {
    forge_docs_mcp::tracing::init();
    TempWorkspace::new()
}
