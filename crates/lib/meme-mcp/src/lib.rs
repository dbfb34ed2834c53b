//! MCP server implementation for mcp4meme.
//!
//! This crate exposes the tool registry and resource catalog through an rmcp
//! `ServerHandler`, and provides the stdio and streamable HTTP runners.

mod helpers;
mod tools;
pub mod server;

use std::sync::Arc;

use meme_core::control::MemeControlPlane;
use meme_core::registry::{RegistryError, ToolRegistry};
use meme_core::resources::ResourceCatalog;
#[allow(deprecated)]
use rmcp::model::{CallToolRequestParam, PaginatedRequestParam, ReadResourceRequestParam};
use rmcp::model::{
    AnnotateAble,
    CallToolResult,
    ErrorCode,
    ListResourcesResult,
    ListToolsResult,
    RawResource,
    ReadResourceResult,
    ResourceContents,
    ServerCapabilities,
    ServerInfo,
    Tool,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData, RoleServer, ServerHandler};
use tracing::debug;

pub use tools::build_registry;

const SERVER_INSTRUCTIONS: &str = r"mcp4meme answers questions about Four.meme tokens on BNB Smart Chain.

Tools:
- `get_trending_tokens`: rank tokens by `volume` or `trades` over `1h`, `6h`, `24h` or `7d`.
- `get_bonding_curve_progress`: bonding curve completion and status (early, active,
  approaching_graduation, graduated). Tokens graduate at 95%.
- `search_tokens_by_progress`: recently active tokens with progress in [min_progress, max_progress].
- `get_token_migration_status`: whether a token moved to a DEX, and which pools it trades in.
- `get_latest_trades`, `get_token_price`, `get_token_volume`, `get_top_traders`: market data per token.
- `add`, `multiply`, `get_greeting`: demo tools.

Notes:
- `token_address` must be a 0x-prefixed 40 hex digit contract address.
- Upstream failures are reported in the result's `error` field with `error_kind` set to
  `upstream_error`; invalid arguments return an error object with `kind` set to
  `validation_error`.
- Read `config://mcp4meme` to learn whether the server runs on mock data.";

/// MCP server wrapper around the tool registry and resource catalog.
#[derive(Clone)]
pub struct Mcp4Meme {
    tools: Arc<ToolRegistry>,
    resources: Arc<ResourceCatalog>,
}

impl Mcp4Meme {
    /// Declares every tool against `control`.
    ///
    /// # Errors
    /// Returns `RegistryError` if the tool declarations collide.
    pub fn new(control: &MemeControlPlane, resources: ResourceCatalog) -> Result<Self, RegistryError> {
        let tools = build_registry(control)?;
        Ok(Self::with_parts(Arc::new(tools), Arc::new(resources)))
    }

    /// Creates a server from shared parts.
    #[must_use]
    pub const fn with_parts(tools: Arc<ToolRegistry>, resources: Arc<ResourceCatalog>) -> Self {
        Self { tools, resources }
    }

    #[must_use]
    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    fn tool_list(&self) -> Vec<Tool> {
        self.tools
            .descriptors()
            .map(|descriptor| {
                Tool::new(
                    descriptor.name,
                    descriptor.description,
                    Arc::new(descriptor.input_schema()),
                )
            })
            .collect()
    }
}

#[allow(deprecated)]
impl ServerHandler for Mcp4Meme {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult::with_all_items(self.tool_list()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        debug!(tool = %request.name, "tools/call");
        let arguments = request.arguments.unwrap_or_default();
        let outcome = self.tools.dispatch(&request.name, &arguments).await;
        helpers::call_result(outcome)
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, ErrorData> {
        let resources = ResourceCatalog::descriptors()
            .iter()
            .map(|descriptor| {
                let mut resource = RawResource::new(descriptor.uri, descriptor.name);
                resource.description = Some(descriptor.description.to_string());
                resource.mime_type = Some(descriptor.mime_type.to_string());
                resource.no_annotation()
            })
            .collect();
        Ok(ListResourcesResult::with_all_items(resources))
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, ErrorData> {
        debug!(uri = %request.uri, "resources/read");
        let document = self
            .resources
            .read(&request.uri)
            .map_err(|err| helpers::resource_err(&err))?;
        let text = serde_json::to_string_pretty(&document).map_err(|err| {
            helpers::mcp_err(ErrorCode::INTERNAL_ERROR, err.to_string())
        })?;
        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(text, request.uri)],
        })
    }
}
