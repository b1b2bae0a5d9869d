//! MCP server for web component library documentation.
//!
//! Component metadata comes from Custom Elements Manifests found in a
//! project's installed packages or a bundled fallback directory. The crate
//! indexes those manifests once and serves search, documentation and API
//! validation over them.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod icons;
pub mod manifest;
pub mod search;
pub mod server;
pub mod tools;
pub mod tracing;
pub mod validate;

pub use catalog::{ComponentCatalog, ComponentIndex};
pub use error::{CatalogError, IconError};
pub use server::ForgeDocsServer;
