//! MCP server exposing the component catalog and icon search as tools.

use crate::catalog::ComponentCatalog;
use crate::config::Config;
use crate::error::IconError;
use crate::icons::IconCatalog;
use crate::tools::{
    FindComponentsRequest, FindIconsRequest, GetComponentDocsRequest,
    ValidateComponentApiRequest, handle_find_components, handle_find_icons,
    handle_get_component_docs, handle_list_components, handle_validate_component_api,
};
use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    schemars::{self, JsonSchema, generate::SchemaSettings},
    tool, tool_handler, tool_router,
};
use std::sync::Arc;

/// MCP server for component library documentation.
#[derive(Clone)]
pub struct ForgeDocsServer {
    /// Component manifests, loaded on the first tool call
    catalog: Arc<ComponentCatalog>,

    /// Remote icon metadata, fetched on the first icon search
    icons: Arc<IconCatalog>,

    /// Tool router for handling MCP tool calls
    tool_router: ToolRouter<Self>,
}

impl std::fmt::Debug for ForgeDocsServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForgeDocsServer")
            .field("catalog", &self.catalog)
            .field("icons", &self.icons)
            .finish()
    }
}

#[tool_router]
impl ForgeDocsServer {
    pub fn new(catalog: Arc<ComponentCatalog>, icons: Arc<IconCatalog>) -> Self {
        Self {
            catalog,
            icons,
            tool_router: Self::tool_router(),
        }
    }

    /// Build the catalogs described by `config`.
    pub fn from_config(config: &Config) -> Result<Self, IconError> {
        let catalog = ComponentCatalog::from_config(config);
        let icons = IconCatalog::remote(config.icon_metadata_url.clone(), config.icon_timeout)?;
        Ok(Self::new(Arc::new(catalog), Arc::new(icons)))
    }

    pub fn catalog(&self) -> &Arc<ComponentCatalog> {
        &self.catalog
    }

    #[tool(
        description = "Browse all available Tyler Forge components with descriptions. Returns a table of every component with its purpose and a link to its documentation."
    )]
    async fn list_components(&self) -> std::result::Result<String, String> {
        handle_list_components(&self.catalog).await
    }

    #[tool(
        description = "Search Tyler Forge components by name, description, or functionality with fuzzy matching. Supports multi-term queries like \"app bar drawer\". Returns all components when no query is provided.",
        input_schema = inline_schema_for_type::<FindComponentsRequest>()
    )]
    async fn find_components(
        &self,
        Parameters(request): Parameters<FindComponentsRequest>,
    ) -> std::result::Result<String, String> {
        handle_find_components(&self.catalog, request).await
    }

    #[tool(
        description = "Get documentation for a Tyler Forge component: the full API reference, selected sections, or a summary overview. Returns the component name list when no component is specified.",
        input_schema = inline_schema_for_type::<GetComponentDocsRequest>()
    )]
    async fn get_component_docs(
        &self,
        Parameters(request): Parameters<GetComponentDocsRequest>,
    ) -> std::result::Result<String, String> {
        handle_get_component_docs(&self.catalog, request).await
    }

    #[tool(
        description = "Validate Tyler Forge component-specific API usage after code generation. Do not use this to validate standard HTML attributes (id, class, style), ARIA attributes (aria-*), or data attributes (data-*); these are valid on all elements. Only validate component-specific properties, attributes, events, methods, slots, CSS properties, parts, and classes.",
        input_schema = inline_schema_for_type::<ValidateComponentApiRequest>()
    )]
    async fn validate_component_api(
        &self,
        Parameters(request): Parameters<ValidateComponentApiRequest>,
    ) -> std::result::Result<String, String> {
        handle_validate_component_api(&self.catalog, request).await
    }

    #[tool(
        description = "Search Tyler Icons with natural language queries. Finds the closest matching icons by name and keywords.",
        input_schema = inline_schema_for_type::<FindIconsRequest>()
    )]
    async fn find_icons(
        &self,
        Parameters(request): Parameters<FindIconsRequest>,
    ) -> std::result::Result<String, String> {
        handle_find_icons(&self.icons, request).await
    }
}

#[tool_handler]
impl ServerHandler for ForgeDocsServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build())
            .with_protocol_version(ProtocolVersion::V_2024_11_05)
            .with_server_info(Implementation::from_build_env())
            .with_instructions(
                "forge-docs-mcp: Tyler Forge web component documentation. \
                 Component metadata is read from the project's installed packages, \
                 falling back to bundled manifests. Use find_components to locate a component, \
                 get_component_docs for its API, and validate_component_api to check generated code.",
            )
    }
}

/// Generate an inline JSON schema for MCP tools
///
/// Unlike rmcp's default `schema_for_type()`, this function sets `inline_subschemas = true`
/// to generate inline enum definitions instead of $ref patterns. This ensures MCP Inspector
/// displays enums as dropdown widgets rather than raw JSON input fields.
pub fn inline_schema_for_type<T: JsonSchema>() -> Arc<JsonObject> {
    let mut settings = SchemaSettings::draft07();
    settings.transforms = vec![Box::new(schemars::transform::AddNullable::default())];
    settings.inline_subschemas = true;

    let generator = settings.into_generator();
    let schema = generator.into_root_schema_for::<T>();
    let object = serde_json::to_value(schema).expect("failed to serialize schema");

    let json_object = match object {
        serde_json::Value::Object(object) => object,
        _ => panic!("Schema serialization produced non-object value"),
    };

    Arc::new(json_object)
}
