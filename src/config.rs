//! Runtime configuration shared by the server and the CLI subcommands.

use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Packages looked up in `node_modules` before the scope is scanned.
pub const DEFAULT_PACKAGES: &[&str] = &["@tylertech/forge", "@tylertech/forge-extended"];

/// npm scope scanned for additional component packages.
pub const DEFAULT_SCOPE: &str = "@tylertech";

/// Published icon metadata: a JSON array of `{ name, data, keywords }`.
pub const DEFAULT_ICON_METADATA_URL: &str =
    "https://cdn.forge.tylertech.com/v1/metadata/icons/tyler-icons-metadata-all.json";

pub const DEFAULT_ICON_TIMEOUT_SECS: u64 = 30;

/// Directory name of the manifests shipped next to the binary.
pub const BUNDLED_MANIFESTS_DIR: &str = "bundled-manifests";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Where to start looking for installed packages.
    pub project_dir: PathBuf,
    /// Fallback directory of `*-custom-elements.json` files.
    pub bundled_manifests: PathBuf,
    pub packages: Vec<String>,
    pub scope: String,
    pub icon_metadata_url: String,
    pub icon_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            bundled_manifests: default_bundled_manifests_dir(),
            packages: DEFAULT_PACKAGES.iter().map(|p| (*p).to_string()).collect(),
            scope: DEFAULT_SCOPE.to_string(),
            icon_metadata_url: DEFAULT_ICON_METADATA_URL.to_string(),
            icon_timeout: Duration::from_secs(DEFAULT_ICON_TIMEOUT_SECS),
        }
    }
}

/// `<directory of the running executable>/bundled-manifests`.
pub fn default_bundled_manifests_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_default()
        .join(BUNDLED_MANIFESTS_DIR)
}

/// Expand a leading `~` to the user's home directory.
///
/// Other paths, and `~` when no home directory is known, come back unchanged.
pub fn expand_tilde(path: &str) -> Cow<'_, str> {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return Cow::Owned(home.join(stripped).display().to_string());
        }
    } else if path == "~"
        && let Some(home) = dirs::home_dir()
    {
        return Cow::Owned(home.display().to_string());
    }
    Cow::Borrowed(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    #[test]
    fn defaults_name_both_packages() {
        let config = Config::default();
        check!(config.packages == ["@tylertech/forge", "@tylertech/forge-extended"]);
        check!(config.scope == "@tylertech");
        check!(config.icon_timeout == Duration::from_secs(30));
        check!(config.bundled_manifests.ends_with(BUNDLED_MANIFESTS_DIR));
    }

    #[test]
    fn tilde_expansion() {
        check!(expand_tilde("/abs/path") == "/abs/path");
        check!(expand_tilde("relative/~") == "relative/~");
        if let Some(home) = dirs::home_dir() {
            check!(expand_tilde("~") == home.display().to_string());
            check!(
                expand_tilde("~/work/app")
                    == home.join("work/app").display().to_string()
            );
        }
    }
}
