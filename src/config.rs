// ⚙️ Configuration - Command-line flags with environment fallbacks

use crate::entities::Cookbook;
use crate::resolver::DEFAULT_MAX_DEPTH;
use clap::{Args, Parser};

/// The original service listened on 8080
pub const DEFAULT_BIND: &str = "127.0.0.1:8080";

/// Limits applied while summarizing recipes
#[derive(Debug, Clone, Args)]
pub struct ResolveOptions {
    /// Maximum recipe nesting a summary may walk through
    #[arg(long, env = "COOKBOOK_MAX_DEPTH", default_value_t = DEFAULT_MAX_DEPTH, value_parser = parse_max_depth)]
    pub max_depth: usize,
}

impl ResolveOptions {
    /// Empty cookbook configured with these limits
    pub fn cookbook(&self) -> Cookbook {
        Cookbook::new().with_max_depth(self.max_depth)
    }
}

impl Default for ResolveOptions {
    fn default() -> Self {
        ResolveOptions {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Settings for the HTTP server
#[derive(Debug, Clone, Parser)]
#[command(name = "cookbook-server", version, about = "Serve a cookbook over HTTP")]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, env = "COOKBOOK_BIND", default_value = DEFAULT_BIND)]
    pub bind: String,

    #[command(flatten)]
    pub resolve: ResolveOptions,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind: DEFAULT_BIND.to_string(),
            resolve: ResolveOptions::default(),
        }
    }
}

fn parse_max_depth(value: &str) -> Result<usize, String> {
    let depth: usize = value
        .parse()
        .map_err(|_| format!("'{}' is not a whole number", value))?;

    if depth == 0 {
        return Err("max depth must be at least 1".to_string());
    }

    Ok(depth)
}

/// Install the tracing subscriber (RUST_LOG, default "info")
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}
