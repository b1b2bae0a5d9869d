//! The component catalog: manifests discovered, merged and indexed once.

pub mod index;
pub mod sources;

pub use index::ComponentIndex;
pub use sources::{
    BundledManifests, InstalledPackages, ManifestSource, PackageManifest, ProjectKind, ProjectRoot,
    discover_project_roots, read_manifest,
};

use crate::config::Config;
use crate::error::CatalogError;
use crate::manifest::Manifest;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::OnceCell;

/// A package that contributed to the loaded catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedPackage {
    pub name: String,
    pub manifest_path: PathBuf,
}

/// Result of a successful load. Read-only once built.
#[derive(Debug)]
pub struct LoadedCatalog {
    pub index: ComponentIndex,
    pub packages: Vec<LoadedPackage>,
}

/// Lazily loaded component index shared by every tool.
///
/// The first [`load`](Self::load) walks the sources in order and keeps the
/// first non-empty result. Concurrent callers wait on that single load; a
/// failed load stores nothing, so the next call starts over.
pub struct ComponentCatalog {
    sources: Vec<Box<dyn ManifestSource>>,
    loaded: OnceCell<Arc<LoadedCatalog>>,
}

impl std::fmt::Debug for ComponentCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentCatalog")
            .field(
                "sources",
                &self.sources.iter().map(|s| s.describe()).collect::<Vec<_>>(),
            )
            .field("loaded", &self.loaded.initialized())
            .finish()
    }
}

impl ComponentCatalog {
    pub fn new(sources: Vec<Box<dyn ManifestSource>>) -> Self {
        Self {
            sources,
            loaded: OnceCell::new(),
        }
    }

    /// Installed packages first, bundled manifests as the fallback.
    pub fn from_config(config: &Config) -> Self {
        Self::new(vec![
            Box::new(InstalledPackages::new(
                &config.project_dir,
                config.packages.clone(),
                config.scope.clone(),
            )),
            Box::new(BundledManifests::new(&config.bundled_manifests)),
        ])
    }

    /// An already-loaded catalog over in-memory manifests.
    pub fn from_manifests(manifests: Vec<Manifest>) -> Result<Self, CatalogError> {
        let index = ComponentIndex::from_manifests(manifests)?;
        let loaded = Arc::new(LoadedCatalog {
            index,
            packages: Vec::new(),
        });
        Ok(Self {
            sources: Vec::new(),
            loaded: OnceCell::new_with(Some(loaded)),
        })
    }

    /// Load the catalog if needed and return it.
    pub async fn load(&self) -> Result<Arc<LoadedCatalog>, CatalogError> {
        self.loaded
            .get_or_try_init(|| self.build())
            .await
            .map(Arc::clone)
    }

    /// The catalog, if a load has already succeeded.
    pub fn loaded(&self) -> Result<Arc<LoadedCatalog>, CatalogError> {
        self.loaded.get().cloned().ok_or(CatalogError::NotLoaded)
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.initialized()
    }

    async fn build(&self) -> Result<Arc<LoadedCatalog>, CatalogError> {
        let started = Instant::now();
        let mut attempted = Vec::with_capacity(self.sources.len());

        for source in &self.sources {
            let description = source.describe();
            tracing::debug!("Looking for manifests: {}", description);

            let manifests = source.load().await;
            if manifests.is_empty() {
                attempted.push(description);
                continue;
            }

            let packages: Vec<LoadedPackage> = manifests
                .iter()
                .map(|m| LoadedPackage {
                    name: m.package_name.clone(),
                    manifest_path: m.manifest_path.clone(),
                })
                .collect();
            let index =
                ComponentIndex::from_manifests(manifests.into_iter().map(|m| m.manifest).collect())?;

            tracing::info!(
                components = index.len(),
                packages = packages.len(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Loaded component catalog from {}",
                description
            );
            return Ok(Arc::new(LoadedCatalog { index, packages }));
        }

        tracing::warn!("No component manifests found");
        Err(CatalogError::NoManifests { attempted })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use futures::future::BoxFuture;

    struct Empty;

    impl ManifestSource for Empty {
        fn describe(&self) -> String {
            "nowhere".to_string()
        }

        fn load(&self) -> BoxFuture<'_, Vec<PackageManifest>> {
            Box::pin(async { Vec::new() })
        }
    }

    #[tokio::test]
    async fn not_loaded_until_load_succeeds() {
        let catalog = ComponentCatalog::new(vec![Box::new(Empty), Box::new(Empty)]);
        check!(!catalog.is_loaded());
        check!(let Err(CatalogError::NotLoaded) = catalog.loaded());

        let err = catalog.load().await.unwrap_err();
        let CatalogError::NoManifests { attempted } = err else {
            panic!("expected NoManifests");
        };
        check!(attempted == ["nowhere", "nowhere"]);
        check!(!catalog.is_loaded());
    }

    #[test]
    fn preloaded_catalog_is_ready() {
        let catalog = ComponentCatalog::from_manifests(vec![Manifest {
            schema_version: "1.0.0".into(),
            readme: None,
            modules: Vec::new(),
        }])
        .unwrap();
        check!(catalog.is_loaded());
        check!(catalog.loaded().unwrap().index.is_empty());
    }

    #[test]
    fn preloading_nothing_fails() {
        check!(let Err(CatalogError::NoManifests { .. }) = ComponentCatalog::from_manifests(vec![]));
    }
}
