//! Error handling types and utilities.

use std::path::PathBuf;

/// A specialized Result type for application-level glue (CLI, startup).
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` methods.
pub type Result<T> = anyhow::Result<T>;

/// Errors surfaced by the component catalog and its loading boundary.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// No manifest source produced any data.
    #[error(
        "No component manifests found. Looked in: {}. Install the component packages \
         in your project or point --bundled-manifests at a directory of *-custom-elements.json files.",
        describe_attempts(.attempted)
    )]
    NoManifests { attempted: Vec<String> },

    /// The index was queried before a successful load.
    #[error("Component catalog has not been loaded yet")]
    NotLoaded,

    #[error("Component not found: {tag_name}. Available components: {}", .available.join(", "))]
    ComponentNotFound {
        tag_name: String,
        available: Vec<String>,
    },

    /// Malformed option combinations. Unknown `searchIn` field names are ignored rather
    /// than reported through this variant.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Failed to parse manifest {}: {source}", .path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn describe_attempts(attempted: &[String]) -> String {
    if attempted.is_empty() {
        "(no sources configured)".to_string()
    } else {
        attempted.join("; ")
    }
}

/// Errors from the remote icon metadata catalog.
///
/// Messages are kept as strings so one failed fetch can be handed to every
/// caller that was waiting on it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IconError {
    #[error("Icon metadata request failed: {0}")]
    Request(String),

    #[error("Icon metadata request returned HTTP {0}")]
    Status(u16),

    #[error("Icon metadata could not be decoded: {0}")]
    Decode(String),

    #[error("Icon metadata request timed out after {0} seconds")]
    Timeout(u64),
}
