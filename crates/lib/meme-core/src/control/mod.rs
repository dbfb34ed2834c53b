use std::sync::Arc;

use meme_store::schema::INITIAL_REAL_TOKEN_RESERVES;

use crate::registry::ToolError;
use crate::source::{DataSource, SourceError, SourceMode};

pub mod curve;
pub mod market;

/// Rows fetched before filtering in `search_tokens_by_progress`.
pub const PROGRESS_SEARCH_POOL: usize = 100;

/// Turns data source snapshots into tool reports.
///
/// Source failures never escape: they are logged and returned in the report's
/// `error` field alongside empty payload fields.
#[derive(Clone)]
pub struct MemeControlPlane {
    source: Arc<dyn DataSource>,
}

impl MemeControlPlane {
    #[must_use]
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self { source }
    }

    #[must_use]
    pub fn mode(&self) -> SourceMode {
        self.source.mode()
    }
}

/// Bonding curve completion for the tokens still held by the proxy.
#[must_use]
pub fn curve_progress(left_tokens: f64) -> f64 {
    (100.0 - (left_tokens * 100.0) / INITIAL_REAL_TOKEN_RESERVES).clamp(0.0, 100.0)
}

/// `(error_kind, error)` report fields for a failed upstream query.
fn upstream_fields(err: &SourceError) -> (Option<String>, Option<String>) {
    let failure = ToolError::Upstream(err.to_string());
    (Some(failure.kind().to_string()), Some(failure.message().to_string()))
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_follows_proxy_formula() {
        assert!((curve_progress(INITIAL_REAL_TOKEN_RESERVES) - 0.0).abs() < 1e-9);
        assert!((curve_progress(0.0) - 100.0).abs() < 1e-9);
        assert!((curve_progress(200_000_000.0) - 75.0).abs() < 1e-9);
    }

    #[test]
    fn upstream_failures_carry_their_kind() {
        let err = SourceError::Http {
            status: 502,
            body: "bad gateway".to_string(),
        };
        let (kind, message) = upstream_fields(&err);
        assert_eq!(kind.as_deref(), Some("upstream_error"));
        assert_eq!(message.as_deref(), Some("HTTP 502: bad gateway"));
    }

    #[test]
    fn progress_is_clamped() {
        assert!((curve_progress(-5.0) - 100.0).abs() < 1e-9);
        assert!(curve_progress(INITIAL_REAL_TOKEN_RESERVES * 2.0).abs() < 1e-9);
    }
}
