use std::sync::Arc;

use meme_core::source::{
    DataSource,
    LiveSource,
    LiveSourceConfig,
    MockSource,
    SourceMode,
    SourceResult,
};

use crate::config::MemeConfig;

/// Picks the data source once, from the configured credential.
pub fn build_source(config: &MemeConfig) -> SourceResult<Arc<dyn DataSource>> {
    match (config.source_mode(), config.bitquery_api_key.as_deref()) {
        (SourceMode::Live, Some(api_key)) => {
            let live = LiveSourceConfig::new(api_key)
                .with_endpoint(config.bitquery_url.clone())
                .with_timeout(config.upstream_timeout);
            Ok(Arc::new(LiveSource::new(live)?))
        }
        _ => Ok(Arc::new(MockSource::new())),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn config(api_key: Option<&str>, force_mock: bool) -> MemeConfig {
        MemeConfig {
            http: false,
            http_addr: "127.0.0.1:8000".parse().expect("valid addr"),
            http_stateful: true,
            bitquery_api_key: api_key.map(str::to_string),
            bitquery_url: "http://127.0.0.1:9/graphql".to_string(),
            upstream_timeout: Duration::from_secs(1),
            force_mock,
        }
    }

    #[test]
    fn key_builds_live_source() {
        let source = build_source(&config(Some("key"), false)).expect("live source");
        assert_eq!(source.mode(), SourceMode::Live);
    }

    #[test]
    fn missing_or_overridden_key_builds_mock_source() {
        let source = build_source(&config(None, false)).expect("mock source");
        assert_eq!(source.mode(), SourceMode::Mock);
        let source = build_source(&config(Some("key"), true)).expect("mock source");
        assert_eq!(source.mode(), SourceMode::Mock);
    }
}
