use meme_store::schema::GRADUATION_THRESHOLD;
use meme_store::{
    BondingCurveReport,
    CurveStatus,
    DexPair,
    MigrationReport,
    MigrationStatus,
    ProgressEntry,
    ProgressSearchReport,
};
use tracing::{debug, warn};

use super::{MemeControlPlane, PROGRESS_SEARCH_POOL, curve_progress, upstream_fields};

const NO_CURVE_TRANSFERS: &str = "No transfers to Four.meme contract found";
const CURVE_ONLY: &str = "Token still trading only on Four.meme bonding curve";

impl MemeControlPlane {
    /// Progress of a token along its bonding curve.
    pub async fn bonding_curve_progress(&self, token_address: &str) -> BondingCurveReport {
        debug!(token = token_address, "computing bonding curve progress");
        let mut report = BondingCurveReport {
            token_address: token_address.to_string(),
            symbol: String::new(),
            name: String::new(),
            progress_percentage: 0.0,
            status: CurveStatus::Early,
            graduation_threshold: GRADUATION_THRESHOLD,
            left_tokens: "0".to_string(),
            last_activity: None,
            message: None,
            error_kind: None,
            error: None,
        };

        match self.source.curve_balance(token_address).await {
            Ok(Some(balance)) => {
                let progress = curve_progress(balance.left_tokens);
                report.symbol = balance.token.symbol;
                report.name = balance.token.name;
                report.progress_percentage = progress;
                report.status = CurveStatus::from_progress(progress);
                report.left_tokens = balance.left_tokens.to_string();
                report.last_activity = balance.last_activity;
            }
            Ok(None) => report.message = Some(NO_CURVE_TRANSFERS.to_string()),
            Err(err) => {
                warn!(token = token_address, error = %err, "bonding curve query failed");
                report.status = CurveStatus::Unknown;
                (report.error_kind, report.error) = upstream_fields(&err);
            }
        }
        report
    }

    /// Whether a token has left the bonding curve for a DEX pool.
    pub async fn migration_status(&self, token_address: &str) -> MigrationReport {
        debug!(token = token_address, "checking migration status");
        let trades = match self.source.dex_trades(token_address).await {
            Ok(trades) => trades,
            Err(err) => {
                warn!(token = token_address, error = %err, "migration query failed");
                let (error_kind, error) = upstream_fields(&err);
                return MigrationReport {
                    token_address: token_address.to_string(),
                    is_migrated: false,
                    status: MigrationStatus::Unknown,
                    migration_timestamp: None,
                    dex_pairs: Vec::new(),
                    total_dex_pairs: 0,
                    message: None,
                    error_kind,
                    error,
                };
            }
        };

        let Some(first) = trades.first() else {
            return MigrationReport {
                token_address: token_address.to_string(),
                is_migrated: false,
                status: MigrationStatus::BondingCurveOnly,
                migration_timestamp: None,
                dex_pairs: Vec::new(),
                total_dex_pairs: 0,
                message: Some(CURVE_ONLY.to_string()),
                error_kind: None,
                error: None,
            };
        };
        let migration_timestamp = Some(first.block_time.clone());

        let mut dex_pairs: Vec<DexPair> = Vec::new();
        for trade in trades {
            let seen = dex_pairs.iter().any(|pair| {
                pair.dex_name == trade.dex_name && pair.dex_contract == trade.dex_contract
            });
            if !seen {
                dex_pairs.push(DexPair {
                    dex_name: trade.dex_name,
                    dex_contract: trade.dex_contract,
                    buy_token: trade.buy_symbol,
                    sell_token: trade.sell_symbol,
                });
            }
        }

        MigrationReport {
            token_address: token_address.to_string(),
            is_migrated: true,
            status: MigrationStatus::MigratedToDex,
            migration_timestamp,
            total_dex_pairs: dex_pairs.len(),
            dex_pairs,
            message: None,
            error_kind: None,
            error: None,
        }
    }

    /// Recently active tokens whose progress lies in `[min_progress, max_progress]`.
    pub async fn search_by_progress(
        &self,
        min_progress: f64,
        max_progress: f64,
        limit: usize,
    ) -> ProgressSearchReport {
        debug!(min_progress, max_progress, limit, "searching tokens by progress");
        let mut report = ProgressSearchReport {
            min_progress,
            max_progress,
            tokens: Vec::new(),
            total_found: 0,
            error_kind: None,
            error: None,
        };

        match self.source.curve_balances(PROGRESS_SEARCH_POOL).await {
            Ok(balances) => {
                report.tokens = balances
                    .into_iter()
                    .filter_map(|balance| {
                        let progress = curve_progress(balance.left_tokens);
                        (min_progress..=max_progress)
                            .contains(&progress)
                            .then(|| ProgressEntry {
                                token_address: balance.token.address,
                                symbol: balance.token.symbol,
                                name: balance.token.name,
                                progress_percentage: progress,
                                status: CurveStatus::from_progress(progress),
                            })
                    })
                    .take(limit)
                    .collect();
                report.total_found = report.tokens.len();
            }
            Err(err) => {
                warn!(error = %err, "progress search query failed");
                (report.error_kind, report.error) = upstream_fields(&err);
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::control::testing::{FailingSource, FixedSource};
    use crate::source::{CurveBalance, DexTradeSnapshot, MockSource, TokenIdentity};

    const TOKEN: &str = "0xabcdef0000000000000000000000000000abcdef";

    fn balance(address: &str, left_tokens: f64) -> CurveBalance {
        CurveBalance {
            token: TokenIdentity {
                address: address.to_string(),
                symbol: "PEPE".to_string(),
                name: "Pepe".to_string(),
            },
            left_tokens,
            last_activity: Some("2025-06-01T00:00:00Z".to_string()),
        }
    }

    fn dex_trade(dex: &str, contract: &str, time: &str) -> DexTradeSnapshot {
        DexTradeSnapshot {
            dex_name: dex.to_string(),
            dex_contract: contract.to_string(),
            buy_symbol: "PEPE".to_string(),
            sell_symbol: "WBNB".to_string(),
            block_time: time.to_string(),
        }
    }

    #[tokio::test]
    async fn progress_is_derived_from_left_tokens() {
        let source = FixedSource {
            balances: vec![balance(TOKEN, 40_000_000.0)],
            ..FixedSource::default()
        };
        let plane = MemeControlPlane::new(Arc::new(source));
        let report = plane.bonding_curve_progress(TOKEN).await;
        assert!((report.progress_percentage - 95.0).abs() < 1e-9);
        assert_eq!(report.status, CurveStatus::Graduated);
        assert_eq!(report.symbol, "PEPE");
        assert!(report.error.is_none());
    }

    #[tokio::test]
    async fn missing_curve_data_reports_early() {
        let plane = MemeControlPlane::new(Arc::new(FixedSource::default()));
        let report = plane.bonding_curve_progress(TOKEN).await;
        assert_eq!(report.status, CurveStatus::Early);
        assert!(report.progress_percentage.abs() < f64::EPSILON);
        assert_eq!(report.message.as_deref(), Some(NO_CURVE_TRANSFERS));
        assert!(report.error_kind.is_none());
    }

    #[tokio::test]
    async fn upstream_failure_lands_in_error_field() {
        let plane = MemeControlPlane::new(Arc::new(FailingSource));
        let report = plane.bonding_curve_progress(TOKEN).await;
        assert_eq!(report.status, CurveStatus::Unknown);
        assert_eq!(report.error.as_deref(), Some("HTTP 500: boom"));
        assert_eq!(report.error_kind.as_deref(), Some("upstream_error"));

        let migration = plane.migration_status(TOKEN).await;
        assert_eq!(migration.status, MigrationStatus::Unknown);
        assert!(migration.error.is_some());

        let search = plane.search_by_progress(0.0, 100.0, 10).await;
        assert!(search.tokens.is_empty());
        assert!(search.error.is_some());
    }

    #[tokio::test]
    async fn migration_deduplicates_pairs_and_keeps_first_time() {
        let source = FixedSource {
            dex_trades: vec![
                dex_trade("pancake_swap_v2", "0xpool", "2025-06-01T00:00:00Z"),
                dex_trade("pancake_swap_v2", "0xpool", "2025-06-01T00:01:00Z"),
                dex_trade("pancake_swap_v3", "0xother", "2025-06-01T00:02:00Z"),
            ],
            ..FixedSource::default()
        };
        let plane = MemeControlPlane::new(Arc::new(source));
        let report = plane.migration_status(TOKEN).await;
        assert!(report.is_migrated);
        assert_eq!(report.status, MigrationStatus::MigratedToDex);
        assert_eq!(report.total_dex_pairs, 2);
        assert_eq!(report.migration_timestamp.as_deref(), Some("2025-06-01T00:00:00Z"));
    }

    #[tokio::test]
    async fn unmigrated_token_stays_on_curve() {
        let plane = MemeControlPlane::new(Arc::new(FixedSource::default()));
        let report = plane.migration_status(TOKEN).await;
        assert!(!report.is_migrated);
        assert_eq!(report.status, MigrationStatus::BondingCurveOnly);
        assert_eq!(report.message.as_deref(), Some(CURVE_ONLY));
    }

    #[tokio::test]
    async fn search_keeps_only_tokens_in_range() {
        let plane = MemeControlPlane::new(Arc::new(MockSource::new()));
        let report = plane.search_by_progress(90.0, 95.0, 100).await;
        assert!(report.error.is_none());
        assert_eq!(report.total_found, report.tokens.len());
        for entry in &report.tokens {
            assert!((90.0..=95.0).contains(&entry.progress_percentage));
        }
    }

    #[tokio::test]
    async fn search_truncates_to_limit() {
        let source = FixedSource {
            balances: (0..5)
                .map(|idx| balance(&format!("0x{idx}"), 400_000_000.0))
                .collect(),
            ..FixedSource::default()
        };
        let plane = MemeControlPlane::new(Arc::new(source));
        let report = plane.search_by_progress(0.0, 100.0, 3).await;
        assert_eq!(report.total_found, 3);
        assert!(report.tokens.iter().all(|entry| entry.status == CurveStatus::Active));
    }
}
