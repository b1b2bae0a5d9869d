use super::loaded_catalog;
use crate::catalog::ComponentCatalog;
use crate::format::{ComponentDocContext, ComponentNamesContext, DocSection, DocView, Render};
use rmcp::schemars;
use serde::Deserialize;

/// Rendition of a component's documentation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum DocFormat {
    /// Complete API reference
    #[default]
    Full,
    /// Brief overview with API counts
    Summary,
}

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct GetComponentDocsRequest {
    /// Component tag name (e.g. "forge-button", "forge-card"). Omit to list component names.
    #[serde(default)]
    pub component: Option<String>,
    /// Optional: specific sections to include (properties, methods, events, slots, css-custom-properties, css-parts, css-classes, states). Only applies to the full format.
    #[serde(default)]
    pub sections: Option<Vec<String>>,
    /// Documentation format: full (default) or summary
    #[serde(default)]
    pub format: DocFormat,
}

/// Documentation for one component, or the list of names when none is given.
pub async fn handle_get_component_docs(
    catalog: &ComponentCatalog,
    request: GetComponentDocsRequest,
) -> Result<String, String> {
    let loaded = loaded_catalog(catalog).await?;

    let Some(tag_name) = request
        .component
        .as_deref()
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
    else {
        return Ok(ComponentNamesContext {
            names: loaded.index.tag_names(),
        }
        .render());
    };

    let component = loaded
        .index
        .require(tag_name)
        .map_err(|e| format!("{e}. Use list_components to see available components."))?;

    let sections = request.sections.unwrap_or_default();
    let (view, unknown_sections) = match request.format {
        DocFormat::Summary => (DocView::Summary, Vec::new()),
        DocFormat::Full if sections.is_empty() => (DocView::Full, Vec::new()),
        DocFormat::Full => {
            let mut known = Vec::new();
            let mut unknown = Vec::new();
            for name in sections {
                match DocSection::parse(&name) {
                    Some(section) if !known.contains(&section) => known.push(section),
                    Some(_) => {}
                    None => unknown.push(name),
                }
            }
            (DocView::Sections(known), unknown)
        }
    };

    Ok(ComponentDocContext {
        component,
        view,
        unknown_sections,
    }
    .render())
}
