//! Static configuration resources exposed over MCP.

use meme_store::schema::{
    BONDING_CURVE_FORMULA,
    FOURMEME_PROXY_ADDRESS,
    GRADUATION_THRESHOLD,
    INITIAL_REAL_TOKEN_RESERVES,
    NETWORK_BSC,
    RESERVED_TOKENS,
    RESOURCE_PROXY_CONFIG,
    RESOURCE_SERVER_CONFIG,
};
use serde_json::{Value, json};

use crate::registry::ToolError;
use crate::source::SourceMode;

pub const SERVER_NAME: &str = "MCP4Meme Server";
pub const JSON_MIME_TYPE: &str = "application/json";

/// Analytics capabilities advertised in the server resource.
pub const FEATURES: &[&str] = &[
    "trending_tokens",
    "bonding_curve_progress",
    "latest_trades",
    "token_migration_status",
    "token_price",
    "token_volume",
    "top_traders",
    "search_tokens_by_progress",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceDescriptor {
    pub uri: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub mime_type: &'static str,
}

const DESCRIPTORS: [ResourceDescriptor; 2] = [
    ResourceDescriptor {
        uri: RESOURCE_SERVER_CONFIG,
        name: "mcp4meme_config",
        description: "MCP4Meme server configuration",
        mime_type: JSON_MIME_TYPE,
    },
    ResourceDescriptor {
        uri: RESOURCE_PROXY_CONFIG,
        name: "fourmeme_proxy_config",
        description: "Four.meme proxy contract configuration",
        mime_type: JSON_MIME_TYPE,
    },
];

/// Read-only documents describing how this server is configured.
#[derive(Debug, Clone)]
pub struct ResourceCatalog {
    mode: SourceMode,
    bitquery_endpoint: String,
    version: String,
}

impl ResourceCatalog {
    #[must_use]
    pub fn new(
        mode: SourceMode,
        bitquery_endpoint: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            mode,
            bitquery_endpoint: bitquery_endpoint.into(),
            version: version.into(),
        }
    }

    #[must_use]
    pub const fn descriptors() -> &'static [ResourceDescriptor] {
        &DESCRIPTORS
    }

    /// Renders the document behind `uri`.
    ///
    /// # Errors
    /// Returns `ToolError::NotFound` for URIs outside the catalog.
    pub fn read(&self, uri: &str) -> Result<Value, ToolError> {
        match uri {
            RESOURCE_SERVER_CONFIG => Ok(json!({
                "name": SERVER_NAME,
                "version": self.version,
                "features": FEATURES,
                "networks": [NETWORK_BSC],
                "fourmeme_proxy": FOURMEME_PROXY_ADDRESS,
                "api_endpoints": { "bitquery": self.bitquery_endpoint },
                "mock_mode": self.mode.is_mock(),
            })),
            RESOURCE_PROXY_CONFIG => Ok(json!({
                "contract_address": FOURMEME_PROXY_ADDRESS,
                "network": NETWORK_BSC,
                "graduation_threshold": GRADUATION_THRESHOLD,
                "initial_real_token_reserves": INITIAL_REAL_TOKEN_RESERVES,
                "reserved_tokens": RESERVED_TOKENS,
                "bonding_curve_formula": BONDING_CURVE_FORMULA,
            })),
            other => Err(ToolError::NotFound(format!("unknown resource: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meme_store::schema::BITQUERY_API_URL;

    fn catalog(mode: SourceMode) -> ResourceCatalog {
        ResourceCatalog::new(mode, BITQUERY_API_URL, "0.1.0")
    }

    #[test]
    fn server_config_reports_mock_mode() {
        let doc = catalog(SourceMode::Mock).read(RESOURCE_SERVER_CONFIG).unwrap();
        assert_eq!(doc["mock_mode"], true);
        assert_eq!(doc["networks"], json!(["bsc"]));
        assert_eq!(doc["api_endpoints"]["bitquery"], BITQUERY_API_URL);

        let live = catalog(SourceMode::Live).read(RESOURCE_SERVER_CONFIG).unwrap();
        assert_eq!(live["mock_mode"], false);
    }

    #[test]
    fn proxy_config_carries_curve_constants() {
        let doc = catalog(SourceMode::Mock).read(RESOURCE_PROXY_CONFIG).unwrap();
        assert_eq!(doc["contract_address"], FOURMEME_PROXY_ADDRESS);
        assert_eq!(doc["graduation_threshold"], 95.0);
        assert_eq!(doc["bonding_curve_formula"], BONDING_CURVE_FORMULA);
        assert_eq!(doc["reserved_tokens"], 200_000_000.0);
    }

    #[test]
    fn every_descriptor_is_readable() {
        let catalog = catalog(SourceMode::Mock);
        for descriptor in ResourceCatalog::descriptors() {
            assert!(catalog.read(descriptor.uri).is_ok());
        }
    }

    #[test]
    fn unknown_uri_is_not_found() {
        let err = catalog(SourceMode::Mock).read("config://nope").unwrap_err();
        assert_eq!(err.kind(), "not_found_error");
    }
}
