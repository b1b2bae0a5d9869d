use anyhow::{Context, anyhow};
use clap::Parser;
use forge_docs_mcp::catalog::ComponentCatalog;
use forge_docs_mcp::cli::{Cli, Commands, DocsFormat};
use forge_docs_mcp::config::Config;
use forge_docs_mcp::error::Result;
use forge_docs_mcp::icons::IconCatalog;
use forge_docs_mcp::server::ForgeDocsServer;
use forge_docs_mcp::tools::{
    DocFormat, FindComponentsRequest, FindIconsRequest, GetComponentDocsRequest,
    ValidateComponentApiRequest, handle_find_components, handle_find_icons,
    handle_get_component_docs, handle_list_components, handle_validate_component_api,
};
use rmcp::{ServiceExt, transport::stdio};

#[tokio::main]
async fn main() -> Result<()> {
    forge_docs_mcp::tracing::init();

    let cli = Cli::parse();
    let config = cli.global.into_config();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(&config).await,
        command => {
            let output = run_command(&config, command).await?;
            println!("{}", output.trim_end());
            Ok(())
        }
    }
}

async fn serve(config: &Config) -> Result<()> {
    tracing::info!(
        project_dir = %config.project_dir.display(),
        bundled_manifests = %config.bundled_manifests.display(),
        "Starting forge-docs-mcp MCP server"
    );

    let server =
        ForgeDocsServer::from_config(config).context("Failed to set up icon metadata client")?;
    let service = server.serve(stdio()).await.inspect_err(|e| {
        tracing::error!("Error serving MCP server: {:?}", e);
    })?;

    service.waiting().await?;
    Ok(())
}

/// One-shot subcommands print the same text the MCP tools return.
async fn run_command(config: &Config, command: Commands) -> Result<String> {
    let catalog = ComponentCatalog::from_config(config);
    let output = match command {
        Commands::Serve => Err("serve has no one-shot output".to_string()),
        Commands::List => handle_list_components(&catalog).await,
        Commands::Search {
            query,
            limit,
            match_all,
            include_related,
            search_in,
        } => {
            let request = FindComponentsRequest {
                query: Some(query),
                search_in: Some(search_in),
                limit,
                match_all,
                include_related,
            };
            handle_find_components(&catalog, request).await
        }
        Commands::Docs {
            tag,
            format,
            sections,
        } => {
            let request = GetComponentDocsRequest {
                component: Some(tag),
                sections: Some(sections),
                format: match format {
                    DocsFormat::Full => DocFormat::Full,
                    DocsFormat::Summary => DocFormat::Summary,
                },
            };
            handle_get_component_docs(&catalog, request).await
        }
        Commands::Validate { tag, apis } => {
            let request = ValidateComponentApiRequest {
                component: tag,
                apis: apis.into(),
            };
            handle_validate_component_api(&catalog, request).await
        }
        Commands::Icons { query, limit } => {
            let icons = IconCatalog::remote(config.icon_metadata_url.clone(), config.icon_timeout)
                .context("Failed to set up icon metadata client")?;
            handle_find_icons(&icons, FindIconsRequest { query, limit }).await
        }
    };
    output.map_err(|e| anyhow!(e))
}
