//! Combining per-package manifests into one logical document.

use super::types::{Manifest, Module};
use crate::error::CatalogError;
use indexmap::IndexMap;
use indexmap::map::Entry;

/// Merge manifests by module path.
///
/// A single manifest is returned as-is. Otherwise the first manifest supplies
/// `schemaVersion` and `readme`; modules sharing a path have their declarations
/// and exports concatenated in input order, and modules unique to one manifest
/// are carried through unchanged. Duplicate tag names are left for the index
/// to resolve.
pub fn merge_manifests(manifests: Vec<Manifest>) -> Result<Manifest, CatalogError> {
    let mut manifests = manifests.into_iter();
    let Some(first) = manifests.next() else {
        return Err(CatalogError::NoManifests {
            attempted: Vec::new(),
        });
    };

    let mut rest = manifests.peekable();
    if rest.peek().is_none() {
        return Ok(first);
    }

    let schema_version = first.schema_version.clone();
    let readme = first.readme.clone();

    let mut modules: IndexMap<String, Module> = IndexMap::new();
    for manifest in std::iter::once(first).chain(rest) {
        for module in manifest.modules {
            match modules.entry(module.path.clone()) {
                Entry::Occupied(mut slot) => append_module(slot.get_mut(), module),
                Entry::Vacant(slot) => {
                    slot.insert(module);
                }
            }
        }
    }

    Ok(Manifest {
        schema_version,
        readme,
        modules: modules.into_values().collect(),
    })
}

fn append_module(existing: &mut Module, incoming: Module) {
    existing.declarations.extend(incoming.declarations);

    if let Some(more) = incoming.exports {
        existing.exports.get_or_insert_with(Vec::new).extend(more);
    }
}
