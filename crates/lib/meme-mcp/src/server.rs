//! MCP server runners for mcp4meme.

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::get;
use rmcp::serve_server;
use rmcp::transport::io::stdio;
use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig,
    StreamableHttpService,
    session::local::LocalSessionManager,
};
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::info;

use crate::Mcp4Meme;

pub const DEFAULT_HTTP_PORT: u16 = 8000;

type ServeResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Configuration for the MCP streamable HTTP server.
#[derive(Debug, Clone)]
pub struct McpHttpServerConfig {
    pub addr: SocketAddr,
    pub stateful_mode: bool,
    pub sse_keep_alive: Option<Duration>,
    pub sse_retry: Option<Duration>,
}

impl McpHttpServerConfig {
    #[must_use]
    pub const fn new(addr: SocketAddr) -> Self {
        Self {
            addr,
            stateful_mode: true,
            sse_keep_alive: Some(Duration::from_secs(15)),
            sse_retry: Some(Duration::from_secs(3)),
        }
    }

    #[must_use]
    pub const fn with_stateful_mode(mut self, stateful_mode: bool) -> Self {
        self.stateful_mode = stateful_mode;
        self
    }
}

impl Default for McpHttpServerConfig {
    fn default() -> Self {
        Self::new(SocketAddr::from((Ipv4Addr::LOCALHOST, DEFAULT_HTTP_PORT)))
    }
}

/// Serves the MCP server over stdio.
///
/// # Errors
/// Returns any transport or server error.
pub async fn serve_stdio(server: Mcp4Meme) -> ServeResult {
    let (stdin, stdout) = stdio();
    serve_transport(server, stdin, stdout).await
}

/// Serves the MCP server over any byte stream pair until the peer disconnects.
///
/// # Errors
/// Returns any transport or server error.
pub async fn serve_transport<R, W>(server: Mcp4Meme, reader: R, writer: W) -> ServeResult
where
    R: AsyncRead + Send + Unpin + 'static,
    W: AsyncWrite + Send + Unpin + 'static,
{
    let running = serve_server(server, (reader, writer)).await?;
    let _ = running.waiting().await?;
    Ok(())
}

/// Builds the HTTP router: `/mcp` for the protocol, `/health` for probes.
#[must_use]
pub fn build_router(server: &Mcp4Meme, config: &McpHttpServerConfig) -> Router {
    let factory = server.clone();
    let service: StreamableHttpService<Mcp4Meme, LocalSessionManager> = StreamableHttpService::new(
        move || Ok(factory.clone()),
        Arc::new(LocalSessionManager::default()),
        StreamableHttpServerConfig {
            sse_keep_alive: config.sse_keep_alive,
            sse_retry: config.sse_retry,
            stateful_mode: config.stateful_mode,
            ..Default::default()
        },
    );

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .nest_service("/mcp", service)
}

/// Serves the MCP server using streamable HTTP transport until Ctrl-C.
///
/// # Errors
/// Returns any listener or server error.
pub async fn serve_streamable_http(server: Mcp4Meme, config: McpHttpServerConfig) -> ServeResult {
    let app = build_router(&server, &config);
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!(addr = %listener.local_addr()?, "mcp4meme listening on streamable HTTP");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await?;
    Ok(())
}
