//! MCP tool declarations.
//!
//! Tools are grouped by domain: demo arithmetic, market data (trending,
//! trades, price, volume, traders), and bonding curve lifecycle.

use meme_core::control::MemeControlPlane;
use meme_core::registry::{
    Constraint,
    ParamSpec,
    ParamValue,
    RegistryError,
    ToolArgs,
    ToolError,
    ToolRegistry,
};
use meme_core::source::Timeframe;
use meme_store::schema::{DEFAULT_LIMIT, DEFAULT_TIMEFRAME, MAX_LIMIT, TIMEFRAMES};
use serde::Serialize;
use serde_json::Value;

mod curve;
mod demo;
mod market;

/// Declares every tool against the given control plane.
///
/// # Errors
/// Returns `RegistryError::DuplicateTool` if two tools share a name.
pub fn build_registry(control: &MemeControlPlane) -> Result<ToolRegistry, RegistryError> {
    let mut registry = ToolRegistry::new();
    demo::register(&mut registry)?;
    market::register(&mut registry, control)?;
    curve::register(&mut registry, control)?;
    Ok(registry)
}

fn to_payload<T: Serialize>(report: &T) -> Result<Value, ToolError> {
    Ok(serde_json::to_value(report)?)
}

fn token_param() -> ParamSpec {
    ParamSpec::address("token_address", "Token contract address on BSC")
}

fn timeframe_param() -> ParamSpec {
    ParamSpec::string("timeframe", "Look-back window: 1h, 6h, 24h or 7d")
        .with_constraint(Constraint::OneOf(TIMEFRAMES))
        .with_default(ParamValue::String(DEFAULT_TIMEFRAME.to_string()))
}

fn limit_param(description: &'static str) -> ParamSpec {
    ParamSpec::integer("limit", description)
        .with_constraint(Constraint::IntRange {
            min: 1,
            max: MAX_LIMIT,
        })
        .with_default(ParamValue::Integer(DEFAULT_LIMIT))
}

fn timeframe_arg(args: &ToolArgs) -> Result<Timeframe, ToolError> {
    args.string("timeframe")?.parse().map_err(ToolError::Validation)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use meme_core::source::MockSource;
    use serde_json::{Map, json};

    use super::*;

    const TOKEN: &str = "0xabcdef0000000000000000000000000000abcdef";

    fn registry() -> ToolRegistry {
        let control = MemeControlPlane::new(Arc::new(MockSource::new()));
        build_registry(&control).unwrap()
    }

    fn args(value: &Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn declares_every_tool_once() {
        let names: Vec<&str> = registry().descriptors().map(|tool| tool.name).collect();
        assert_eq!(
            names,
            vec![
                "add",
                "multiply",
                "get_greeting",
                "get_trending_tokens",
                "get_latest_trades",
                "get_token_price",
                "get_token_volume",
                "get_top_traders",
                "get_bonding_curve_progress",
                "get_token_migration_status",
                "search_tokens_by_progress",
            ]
        );
    }

    #[tokio::test]
    async fn analytics_tools_answer_in_mock_mode() {
        let registry = registry();
        let token_only = json!({ "token_address": TOKEN });
        let cases = [
            ("get_trending_tokens", json!({}), "trending_tokens"),
            ("get_latest_trades", token_only.clone(), "trades"),
            ("get_token_price", token_only.clone(), "price_usd"),
            ("get_token_volume", token_only.clone(), "volume_usd"),
            ("get_top_traders", token_only.clone(), "traders"),
            ("get_bonding_curve_progress", token_only.clone(), "progress_percentage"),
            ("get_token_migration_status", token_only, "is_migrated"),
            ("search_tokens_by_progress", json!({}), "tokens"),
        ];
        for (name, raw, key) in cases {
            let outcome = registry.dispatch(name, &args(&raw)).await;
            assert!(!outcome.is_error, "{name}: {}", outcome.payload);
            assert!(outcome.payload.get(key).is_some(), "{name} lacks {key}");
            assert!(outcome.payload.get("error").is_none(), "{name} reported an error");
        }
    }

    #[tokio::test]
    async fn defaults_fill_missing_arguments() {
        let payload = registry()
            .invoke("get_trending_tokens", &Map::new())
            .await
            .unwrap();
        assert_eq!(payload["timeframe"], "24h");
        assert_eq!(payload["sort_by"], "volume");
        assert_eq!(payload["total_found"], 10);
    }

    #[tokio::test]
    async fn out_of_range_arguments_are_rejected() {
        let registry = registry();
        let cases = [
            ("get_trending_tokens", json!({ "limit": 0 })),
            ("get_trending_tokens", json!({ "limit": 101 })),
            ("get_trending_tokens", json!({ "timeframe": "2d" })),
            ("get_trending_tokens", json!({ "sort_by": "holders" })),
            ("get_latest_trades", json!({ "token_address": "not-an-address" })),
            ("get_token_volume", json!({ "token_address": TOKEN, "timeframe": 24 })),
            ("search_tokens_by_progress", json!({ "min_progress": -1.0 })),
            ("search_tokens_by_progress", json!({ "min_progress": 80.0, "max_progress": 20.0 })),
            ("get_token_price", json!({})),
        ];
        for (name, raw) in cases {
            let outcome = registry.dispatch(name, &args(&raw)).await;
            assert!(outcome.is_error, "{name} accepted {raw}");
            assert_eq!(outcome.payload["status"], "error");
            assert_eq!(outcome.payload["error"]["kind"], "validation_error", "{name} {raw}");
        }
    }

    #[tokio::test]
    async fn progress_search_stays_in_range() {
        let payload = registry()
            .invoke(
                "search_tokens_by_progress",
                &args(&json!({ "min_progress": 90.0, "max_progress": 95.0, "limit": 100 })),
            )
            .await
            .unwrap();
        for token in payload["tokens"].as_array().unwrap() {
            let progress = token["progress_percentage"].as_f64().unwrap();
            assert!((90.0..=95.0).contains(&progress));
        }
    }

    #[tokio::test]
    async fn unknown_tool_is_not_found() {
        let outcome = registry().dispatch("get_token_holders", &Map::new()).await;
        assert!(outcome.is_error);
        assert_eq!(outcome.payload["error"]["kind"], "not_found_error");
    }
}
