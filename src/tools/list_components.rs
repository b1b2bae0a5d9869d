use super::loaded_catalog;
use crate::catalog::ComponentCatalog;
use crate::format::{ComponentListContext, Render};

/// Table of every component with links to its documentation.
pub async fn handle_list_components(catalog: &ComponentCatalog) -> Result<String, String> {
    let loaded = loaded_catalog(catalog).await?;
    Ok(ComponentListContext {
        components: loaded.index.all().collect(),
        limit: None,
    }
    .render())
}
