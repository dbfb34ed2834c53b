use serde::{Deserialize, Serialize};

use crate::schema::{ACTIVE_THRESHOLD, APPROACHING_THRESHOLD, GRADUATION_THRESHOLD};

/// Where a token sits on its bonding curve.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CurveStatus {
    Early,
    Active,
    ApproachingGraduation,
    Graduated,
    Unknown,
}

impl CurveStatus {
    /// Classifies a progress percentage against the graduation thresholds.
    #[must_use]
    pub fn from_progress(progress: f64) -> Self {
        if progress < ACTIVE_THRESHOLD {
            Self::Early
        } else if progress < APPROACHING_THRESHOLD {
            Self::Active
        } else if progress < GRADUATION_THRESHOLD {
            Self::ApproachingGraduation
        } else {
            Self::Graduated
        }
    }
}

/// Whether a token still trades only on the bonding curve.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MigrationStatus {
    BondingCurveOnly,
    MigratedToDex,
    Unknown,
}

/// A single entry in the trending token ranking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrendingToken {
    pub rank: usize,
    pub token_address: String,
    pub symbol: String,
    pub name: String,
    pub trade_count: u64,
    pub volume_usd: String,
}

/// Report for `get_trending_tokens`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrendingTokensReport {
    pub trending_tokens: Vec<TrendingToken>,
    pub total_found: usize,
    pub timeframe: String,
    pub sort_by: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Report for `get_bonding_curve_progress`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BondingCurveReport {
    pub token_address: String,
    pub symbol: String,
    pub name: String,
    pub progress_percentage: f64,
    pub status: CurveStatus,
    pub graduation_threshold: f64,
    pub left_tokens: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_activity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// One trade on the Four.meme bonding curve.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TradeRecord {
    pub transaction_hash: String,
    pub timestamp: String,
    pub block_number: u64,
    pub buyer: String,
    pub seller: String,
    pub buy_amount: String,
    pub sell_amount: String,
    pub price_usd: String,
    pub buy_token: String,
    pub sell_token: String,
}

/// Report for `get_latest_trades`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LatestTradesReport {
    pub token_address: String,
    pub trades: Vec<TradeRecord>,
    pub total_trades: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A DEX pool observed trading a migrated token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DexPair {
    pub dex_name: String,
    pub dex_contract: String,
    pub buy_token: String,
    pub sell_token: String,
}

/// Report for `get_token_migration_status`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MigrationReport {
    pub token_address: String,
    pub is_migrated: bool,
    pub status: MigrationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub migration_timestamp: Option<String>,
    pub dex_pairs: Vec<DexPair>,
    pub total_dex_pairs: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Report for `get_token_price`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenPriceReport {
    pub token_address: String,
    pub symbol: String,
    pub name: String,
    pub price_usd: f64,
    pub price_in_quote: f64,
    pub quote_symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_trade_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Report for `get_token_volume`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenVolumeReport {
    pub token_address: String,
    pub timeframe: String,
    pub volume_usd: String,
    pub trade_count: u64,
    pub unique_traders: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A trader ranked by USD volume on one token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TraderRanking {
    pub rank: usize,
    pub address: String,
    pub trade_count: u64,
    pub volume_usd: String,
}

/// Report for `get_top_traders`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TopTradersReport {
    pub token_address: String,
    pub timeframe: String,
    pub traders: Vec<TraderRanking>,
    pub total_traders: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A token matched by progress search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressEntry {
    pub token_address: String,
    pub symbol: String,
    pub name: String,
    pub progress_percentage: f64,
    pub status: CurveStatus,
}

/// Report for `search_tokens_by_progress`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressSearchReport {
    pub min_progress: f64,
    pub max_progress: f64,
    pub tokens: Vec<ProgressEntry>,
    pub total_found: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
