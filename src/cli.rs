use crate::config::{
    Config, DEFAULT_ICON_METADATA_URL, DEFAULT_ICON_TIMEOUT_SECS, DEFAULT_PACKAGES, DEFAULT_SCOPE,
    default_bundled_manifests_dir, expand_tilde,
};
use crate::validate::ApiRequest;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(name = "forge-docs-mcp", version)]
#[command(about = "Tyler Forge component documentation for AI assistants", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Defaults to `serve`
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Project directory to search for installed component packages
    #[arg(long, global = true, env = "FORGE_MCP_PROJECT_DIR")]
    pub project_dir: Option<String>,

    /// Directory of bundled *-custom-elements.json files
    #[arg(long, global = true, env = "FORGE_MCP_BUNDLED_MANIFESTS")]
    pub bundled_manifests: Option<String>,

    /// Package to look up in node_modules (repeatable)
    #[arg(long = "package", global = true, env = "FORGE_MCP_PACKAGES", value_delimiter = ',')]
    pub packages: Vec<String>,

    /// npm scope scanned for additional component packages
    #[arg(long, global = true, env = "FORGE_MCP_SCOPE", default_value = DEFAULT_SCOPE)]
    pub scope: String,

    /// URL of the icon metadata JSON
    #[arg(
        long,
        global = true,
        env = "FORGE_MCP_ICON_METADATA_URL",
        default_value = DEFAULT_ICON_METADATA_URL
    )]
    pub icon_metadata_url: String,

    /// Timeout for the icon metadata request, in seconds
    #[arg(
        long,
        global = true,
        env = "FORGE_MCP_ICON_TIMEOUT_SECS",
        default_value_t = DEFAULT_ICON_TIMEOUT_SECS
    )]
    pub icon_timeout_secs: u64,
}

impl GlobalArgs {
    pub fn into_config(self) -> Config {
        let defaults = Config::default();
        Config {
            project_dir: self
                .project_dir
                .map_or(defaults.project_dir, |dir| expand_path(&dir)),
            bundled_manifests: self
                .bundled_manifests
                .map_or_else(default_bundled_manifests_dir, |dir| expand_path(&dir)),
            packages: if self.packages.is_empty() {
                DEFAULT_PACKAGES.iter().map(|p| (*p).to_string()).collect()
            } else {
                self.packages
            },
            scope: self.scope,
            icon_metadata_url: self.icon_metadata_url,
            icon_timeout: Duration::from_secs(self.icon_timeout_secs),
        }
    }
}

fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(expand_tilde(path).into_owned())
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the MCP server over stdio
    Serve,
    /// Print the component table
    List,
    /// Search components
    Search {
        query: String,
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        #[arg(long)]
        match_all: bool,
        #[arg(long)]
        include_related: bool,
        /// Field to search in (repeatable; default: all)
        #[arg(long = "search-in")]
        search_in: Vec<String>,
    },
    /// Print a component's documentation
    Docs {
        tag: String,
        #[arg(long, value_enum, default_value_t = DocsFormat::Full)]
        format: DocsFormat,
        /// Section to include (repeatable)
        #[arg(long = "section")]
        sections: Vec<String>,
    },
    /// Check API names against a component
    Validate {
        tag: String,
        #[command(flatten)]
        apis: ApiArgs,
    },
    /// Search icons
    Icons {
        query: String,
        #[arg(short = 'n', long)]
        limit: Option<i64>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DocsFormat {
    Full,
    Summary,
}

#[derive(Debug, Args)]
pub struct ApiArgs {
    #[arg(long = "property")]
    pub properties: Vec<String>,
    #[arg(long = "attribute")]
    pub attributes: Vec<String>,
    #[arg(long = "event")]
    pub events: Vec<String>,
    #[arg(long = "method")]
    pub methods: Vec<String>,
    #[arg(long = "slot")]
    pub slots: Vec<String>,
    #[arg(long = "css-property")]
    pub css_properties: Vec<String>,
    #[arg(long = "css-part")]
    pub css_parts: Vec<String>,
    #[arg(long = "css-class")]
    pub css_classes: Vec<String>,
}

impl From<ApiArgs> for ApiRequest {
    fn from(args: ApiArgs) -> Self {
        Self {
            properties: args.properties,
            attributes: args.attributes,
            events: args.events,
            methods: args.methods,
            slots: args.slots,
            css_properties: args.css_properties,
            css_parts: args.css_parts,
            css_classes: args.css_classes,
        }
    }
}
