//! Where component manifests come from.
//!
//! Two sources exist: the packages installed in the user's project, found by
//! walking up from the project directory, and a directory of manifests
//! bundled next to the server binary. The catalog consults them in order.

use crate::error::CatalogError;
use crate::manifest::Manifest;
use futures::future::BoxFuture;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File name a package ships its manifest under.
pub const MANIFEST_FILE_NAME: &str = "custom-elements.json";

/// Suffix of the files in a bundled manifests directory.
pub const BUNDLED_SUFFIX: &str = "-custom-elements.json";

/// Files and directories whose presence marks a project root.
const PROJECT_INDICATORS: &[&str] = &[
    "package.json",
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    ".git",
    "node_modules",
];

/// A parsed manifest and the package it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageManifest {
    pub package_name: String,
    pub manifest_path: PathBuf,
    pub manifest: Manifest,
}

/// Something that can produce package manifests.
///
/// Sources never fail as a whole: unreadable entries are logged and skipped,
/// and "nothing found" is an empty list.
pub trait ManifestSource: Send + Sync {
    /// Human-readable location, used when every source comes up empty.
    fn describe(&self) -> String;

    fn load(&self) -> BoxFuture<'_, Vec<PackageManifest>>;
}

/// Read and parse one manifest file.
pub async fn read_manifest(path: &Path) -> Result<Manifest, CatalogError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    serde_json::from_str(&text).map_err(|source| CatalogError::Manifest {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a manifest, logging and discarding any failure.
async fn try_read_manifest(package_name: &str, path: PathBuf) -> Option<PackageManifest> {
    match read_manifest(&path).await {
        Ok(manifest) => {
            debug!(
                package = package_name,
                path = %path.display(),
                modules = manifest.modules.len(),
                "Loaded manifest"
            );
            Some(PackageManifest {
                package_name: package_name.to_string(),
                manifest_path: path,
                manifest,
            })
        }
        Err(e) => {
            warn!("Skipping manifest: {}", e);
            None
        }
    }
}

/// Package manager that owns a project root, judged by its lockfile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectKind {
    Npm,
    Yarn,
    Pnpm,
    Git,
    Unknown,
}

/// A directory that looks like the root of a JavaScript project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRoot {
    pub path: PathBuf,
    pub kind: ProjectKind,
    pub has_node_modules: bool,
}

impl ProjectRoot {
    fn analyze(dir: &Path) -> Option<Self> {
        let has = |name: &str| dir.join(name).exists();
        if !PROJECT_INDICATORS.iter().any(|name| has(name)) {
            return None;
        }

        let kind = if has("yarn.lock") {
            ProjectKind::Yarn
        } else if has("pnpm-lock.yaml") {
            ProjectKind::Pnpm
        } else if has("package-lock.json") {
            ProjectKind::Npm
        } else if has(".git") {
            ProjectKind::Git
        } else {
            ProjectKind::Unknown
        };

        Some(Self {
            path: dir.to_path_buf(),
            kind,
            has_node_modules: dir.join("node_modules").is_dir(),
        })
    }

    pub fn node_modules(&self) -> Option<PathBuf> {
        self.has_node_modules.then(|| self.path.join("node_modules"))
    }
}

/// Every project root from `start` up to the filesystem root, nearest first.
///
/// Nested workspaces and hoisted `node_modules` directories are both covered
/// because the walk does not stop at the first root it finds.
pub fn discover_project_roots(start: &Path) -> Vec<ProjectRoot> {
    let roots: Vec<ProjectRoot> = start.ancestors().filter_map(ProjectRoot::analyze).collect();
    for root in &roots {
        debug!(
            "Project root at {} ({:?}, node_modules: {})",
            root.path.display(),
            root.kind,
            root.has_node_modules
        );
    }
    roots
}

/// Manifests of the component packages installed in a project.
#[derive(Debug, Clone)]
pub struct InstalledPackages {
    project_dir: PathBuf,
    packages: Vec<String>,
    scope: String,
}

impl InstalledPackages {
    /// `packages` are looked up first, in order; any other package under
    /// `scope` that ships a manifest is added after them.
    pub fn new(project_dir: impl Into<PathBuf>, packages: Vec<String>, scope: impl Into<String>) -> Self {
        Self {
            project_dir: project_dir.into(),
            packages,
            scope: scope.into(),
        }
    }

    async fn discover(&self) -> Vec<PackageManifest> {
        let node_modules: Vec<PathBuf> = discover_project_roots(&self.project_dir)
            .iter()
            .filter_map(ProjectRoot::node_modules)
            .collect();

        if node_modules.is_empty() {
            debug!(
                "No node_modules found above {}",
                self.project_dir.display()
            );
            return Vec::new();
        }

        let mut found: Vec<PackageManifest> = Vec::new();

        // nearest node_modules wins for each known package
        for package in &self.packages {
            for dir in &node_modules {
                let path = dir.join(package).join(MANIFEST_FILE_NAME);
                if !path.is_file() {
                    continue;
                }
                if let Some(manifest) = try_read_manifest(package, path).await {
                    found.push(manifest);
                    break;
                }
            }
        }

        for dir in &node_modules {
            for (package, path) in self.scan_scope(&dir.join(&self.scope)).await {
                if found.iter().any(|m| m.package_name == package) {
                    continue;
                }
                if let Some(manifest) = try_read_manifest(&package, path).await {
                    found.push(manifest);
                }
            }
        }

        found
    }

    /// Packages under a scope directory that ship a manifest, sorted by name.
    async fn scan_scope(&self, scope_dir: &Path) -> Vec<(String, PathBuf)> {
        let mut entries = match tokio::fs::read_dir(scope_dir).await {
            Ok(entries) => entries,
            Err(_) => return Vec::new(),
        };

        let mut packages = Vec::new();
        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    warn!("Failed to scan {}: {}", scope_dir.display(), e);
                    break;
                }
            };
            let manifest_path = entry.path().join(MANIFEST_FILE_NAME);
            if !manifest_path.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            packages.push((format!("{}/{}", self.scope, name), manifest_path));
        }
        packages.sort();
        packages
    }
}

impl ManifestSource for InstalledPackages {
    fn describe(&self) -> String {
        format!(
            "installed packages ({}) above {}",
            self.packages.join(", "),
            self.project_dir.display()
        )
    }

    fn load(&self) -> BoxFuture<'_, Vec<PackageManifest>> {
        Box::pin(self.discover())
    }
}

/// Manifests shipped alongside the server as `<package>-custom-elements.json`.
#[derive(Debug, Clone)]
pub struct BundledManifests {
    dir: PathBuf,
}

impl BundledManifests {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn read_all(&self) -> Vec<PackageManifest> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) => {
                debug!("No bundled manifests at {}: {}", self.dir.display(), e);
                return Vec::new();
            }
        };

        let mut files = Vec::new();
        while let Ok(Some(entry)) = entries.next_entry().await {
            let file_name = entry.file_name().to_string_lossy().into_owned();
            if file_name.ends_with(BUNDLED_SUFFIX) {
                files.push((file_name, entry.path()));
            }
        }
        files.sort();

        let mut manifests = Vec::with_capacity(files.len());
        for (file_name, path) in files {
            let package = package_name_from_file(&file_name);
            if let Some(manifest) = try_read_manifest(&package, path).await {
                manifests.push(manifest);
            }
        }
        manifests
    }
}

impl ManifestSource for BundledManifests {
    fn describe(&self) -> String {
        format!("bundled manifests in {}", self.dir.display())
    }

    fn load(&self) -> BoxFuture<'_, Vec<PackageManifest>> {
        Box::pin(self.read_all())
    }
}

/// `@tylertech-forge-extended-custom-elements.json` → `@tylertech/forge-extended`.
///
/// The first hyphen of a scoped name separates scope and package, since
/// npm scopes cannot themselves contain the flattened `/`.
pub fn package_name_from_file(file_name: &str) -> String {
    let stem = file_name.strip_suffix(BUNDLED_SUFFIX).unwrap_or(file_name);
    match stem.strip_prefix('@').and_then(|rest| rest.split_once('-')) {
        Some((scope, package)) => format!("@{scope}/{package}"),
        None => stem.to_string(),
    }
}
