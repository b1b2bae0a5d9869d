use super::loaded_catalog;
use crate::catalog::ComponentCatalog;
use crate::format::{ComponentListContext, Render, SearchResultsContext};
use crate::search::tokenize::query_terms;
use crate::search::{SearchField, SearchOptions, search_all};
use rmcp::schemars;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FindComponentsRequest {
    /// Search query to find components by name, description, or features. Leave empty to list all components.
    #[serde(default)]
    pub query: Option<String>,
    /// Optional: what to search in (all, name, description, properties, methods, events, slots, css-parts, states, keywords). Default: all
    #[serde(default)]
    pub search_in: Option<Vec<String>>,
    /// Optional: maximum number of results (default: 10 for search, unlimited when listing)
    #[serde(default)]
    pub limit: Option<usize>,
    /// Optional: require every search term to match (default: false)
    #[serde(default)]
    pub match_all: bool,
    /// Optional: include related components in results (default: false)
    #[serde(default)]
    pub include_related: bool,
}

/// Search components, or list them all when the query has no terms.
pub async fn handle_find_components(
    catalog: &ComponentCatalog,
    request: FindComponentsRequest,
) -> Result<String, String> {
    let loaded = loaded_catalog(catalog).await?;
    let query = request.query.as_deref().unwrap_or_default().trim();
    let terms = query_terms(query);

    if terms.is_empty() {
        return Ok(ComponentListContext {
            components: loaded.index.all().collect(),
            limit: request.limit.filter(|&limit| limit > 0),
        }
        .render());
    }

    let options = SearchOptions {
        fields: SearchField::resolve(request.search_in.as_deref().unwrap_or_default()),
        limit: request.limit,
        match_all: request.match_all,
        include_related: request.include_related,
    };

    let mut results = search_all(&loaded.index, query, &options);
    if results.is_empty() {
        return Ok(format!(
            "No components found matching \"{query}\". Try different search terms like \"button\", \
             \"input\", \"dialog\", or call find_components without a query to see all available components."
        ));
    }

    let limit = options.effective_limit();
    let has_more = results.len() > limit;
    results.truncate(limit);

    Ok(SearchResultsContext {
        query,
        terms,
        results: &results,
        has_more,
    }
    .render())
}
