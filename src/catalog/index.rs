//! Tag name → declaration index built from a merged manifest.

use crate::error::CatalogError;
use crate::manifest::{Declaration, Manifest, merge_manifests};
use indexmap::IndexMap;

/// Immutable lookup table of custom element declarations keyed by tag name.
///
/// Iteration follows first-insertion order of each tag name. When two
/// declarations share a tag name the later one replaces the earlier one in
/// place: a package loaded later deliberately overrides an earlier package's
/// definition of the same element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentIndex {
    components: IndexMap<String, Declaration>,
}

impl ComponentIndex {
    /// Index every custom element class in the manifest.
    ///
    /// Declarations that are not classes, are not flagged as custom elements,
    /// or have no tag name are skipped silently.
    pub fn build(manifest: Manifest) -> Self {
        let mut components = IndexMap::new();
        let mut skipped = 0usize;

        for module in manifest.modules {
            for declaration in module.declarations {
                let Some(tag) = declaration.custom_element_tag() else {
                    skipped += 1;
                    continue;
                };
                let tag = tag.to_string();
                if let Some(previous) = components.insert(tag.clone(), declaration) {
                    tracing::debug!(
                        tag_name = %tag,
                        replaced = %previous.name,
                        "Duplicate tag name, later declaration wins"
                    );
                }
            }
        }

        tracing::debug!(
            indexed = components.len(),
            skipped,
            "Built component index"
        );

        Self { components }
    }

    /// Merge the given manifests and index the result.
    pub fn from_manifests(manifests: Vec<Manifest>) -> Result<Self, CatalogError> {
        merge_manifests(manifests).map(Self::build)
    }

    pub fn get(&self, tag_name: &str) -> Option<&Declaration> {
        self.components.get(tag_name)
    }

    /// Look up a component, producing the suggestion-bearing error when absent.
    pub fn require(&self, tag_name: &str) -> Result<&Declaration, CatalogError> {
        self.get(tag_name)
            .ok_or_else(|| CatalogError::ComponentNotFound {
                tag_name: tag_name.to_string(),
                available: self.tag_names(),
            })
    }

    /// All declarations in insertion order.
    pub fn all(&self) -> impl ExactSizeIterator<Item = &Declaration> {
        self.components.values()
    }

    /// Tag names sorted lexicographically.
    pub fn tag_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.components.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}
