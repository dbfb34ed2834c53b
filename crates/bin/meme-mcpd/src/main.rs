//! Daemon entry point for the mcp4meme server.
//!
//! Loads configuration from the command line and environment, selects the live
//! or mock data source, and serves MCP over stdio or streamable HTTP.

mod config;
mod source;

use meme_core::control::MemeControlPlane;
use meme_core::resources::ResourceCatalog;
use meme_core::source::SourceMode;
use meme_mcp::Mcp4Meme;
use meme_mcp::server::{McpHttpServerConfig, serve_stdio, serve_streamable_http};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::MemeConfig;
use crate::source::build_source;

const DEFAULT_LOG_FILTER: &str = "meme=info,rmcp=warn";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // stdout carries the protocol in stdio mode, so logs always go to stderr.
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = MemeConfig::from_args()?;
    match config.source_mode() {
        SourceMode::Live => info!(endpoint = %config.bitquery_url, "using Bitquery data source"),
        SourceMode::Mock if config.bitquery_api_key.is_some() => {
            warn!("mock data forced; ignoring Bitquery API key");
        }
        SourceMode::Mock => warn!("BITQUERY_API_KEY not set; serving mock data"),
    }

    let control = MemeControlPlane::new(build_source(&config)?);
    let resources = ResourceCatalog::new(
        control.mode(),
        config.bitquery_url.clone(),
        env!("CARGO_PKG_VERSION"),
    );
    let server = Mcp4Meme::new(&control, resources)?;
    info!(tools = server.tools().len(), "tool registry ready");

    if config.http {
        let http = McpHttpServerConfig::new(config.http_addr).with_stateful_mode(config.http_stateful);
        serve_streamable_http(server, http).await
    } else {
        info!("serving MCP over stdio");
        serve_stdio(server).await
    }
}
