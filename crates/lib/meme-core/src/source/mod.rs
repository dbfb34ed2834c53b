//! Data sources behind the query adapter.
//!
//! `DataSource` is the single seam between the control plane and the outside
//! world. `LiveSource` asks the Bitquery GraphQL API; `MockSource` derives
//! deterministic values from its inputs. One of them is chosen at startup.

use std::error::Error;
use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use meme_store::TradeRecord;

pub mod live;
pub mod mock;
mod queries;
mod wire;

pub use live::{LiveSource, LiveSourceConfig};
pub use mock::MockSource;

/// Which implementation answers upstream questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceMode {
    Live,
    Mock,
}

impl SourceMode {
    #[must_use]
    pub const fn is_mock(self) -> bool {
        matches!(self, Self::Mock)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    Client(String),
    Http { status: u16, body: String },
    EmptyResponse,
    InvalidJson(String),
    Transport(String),
    GraphQl(String),
    Decode(String),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Client(message) => write!(f, "Client setup failed: {message}"),
            Self::Http { status, body } => write!(f, "HTTP {status}: {body}"),
            Self::EmptyResponse => write!(f, "Empty response from API"),
            Self::InvalidJson(snippet) => write!(f, "Invalid JSON response: {snippet}..."),
            Self::Transport(message) => write!(f, "Request failed: {message}"),
            Self::GraphQl(message) => write!(f, "GraphQL error: {message}"),
            Self::Decode(message) => write!(f, "Failed to parse response: {message}"),
        }
    }
}

impl Error for SourceError {}

pub type SourceResult<T> = Result<T, SourceError>;

/// Look-back window for aggregate queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeframe {
    OneHour,
    SixHours,
    OneDay,
    SevenDays,
}

impl Timeframe {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OneHour => "1h",
            Self::SixHours => "6h",
            Self::OneDay => "24h",
            Self::SevenDays => "7d",
        }
    }

    #[must_use]
    pub const fn hours(self) -> i64 {
        match self {
            Self::OneHour => 1,
            Self::SixHours => 6,
            Self::OneDay => 24,
            Self::SevenDays => 24 * 7,
        }
    }

    /// Start of the window ending at `now`.
    #[must_use]
    pub fn since(self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - Duration::hours(self.hours())
    }

    /// RFC 3339 timestamp (`Z` suffix) for the start of the window ending now.
    #[must_use]
    pub fn since_rfc3339(self) -> String {
        self.since(Utc::now())
            .to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "1h" => Ok(Self::OneHour),
            "6h" => Ok(Self::SixHours),
            "24h" => Ok(Self::OneDay),
            "7d" => Ok(Self::SevenDays),
            other => Err(format!("unsupported timeframe: {other}")),
        }
    }
}

/// Ranking key for trending tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Volume,
    Trades,
}

impl SortKey {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Volume => "volume",
            Self::Trades => "trades",
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "volume" => Ok(Self::Volume),
            "trades" => Ok(Self::Trades),
            other => Err(format!("unsupported sort key: {other}")),
        }
    }
}

/// Contract address, symbol and name of a token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenIdentity {
    pub address: String,
    pub symbol: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendingSnapshot {
    pub token: TokenIdentity,
    pub trade_count: u64,
    pub volume_usd: String,
}

/// Tokens still held by the Four.meme proxy for one token.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveBalance {
    pub token: TokenIdentity,
    pub left_tokens: f64,
    pub last_activity: Option<String>,
}

/// A trade of the token on a DEX other than the bonding curve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DexTradeSnapshot {
    pub dex_name: String,
    pub dex_contract: String,
    pub buy_symbol: String,
    pub sell_symbol: String,
    pub block_time: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceSnapshot {
    pub token: TokenIdentity,
    pub price_usd: f64,
    pub price_in_quote: f64,
    pub quote_symbol: String,
    pub block_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeSnapshot {
    pub volume_usd: String,
    pub trade_count: u64,
    pub unique_traders: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraderSnapshot {
    pub address: String,
    pub trade_count: u64,
    pub volume_usd: String,
}

/// Upstream questions the control plane can ask.
#[async_trait]
pub trait DataSource: Send + Sync {
    fn mode(&self) -> SourceMode;

    async fn trending_tokens(
        &self,
        timeframe: Timeframe,
        sort: SortKey,
        limit: usize,
    ) -> SourceResult<Vec<TrendingSnapshot>>;

    /// Proxy-held balance of one token; `None` when the proxy never held it.
    async fn curve_balance(&self, token_address: &str) -> SourceResult<Option<CurveBalance>>;

    /// Proxy-held balances of recently active tokens.
    async fn curve_balances(&self, limit: usize) -> SourceResult<Vec<CurveBalance>>;

    async fn latest_trades(
        &self,
        token_address: &str,
        limit: usize,
    ) -> SourceResult<Vec<TradeRecord>>;

    /// Earliest trades of the token outside the bonding curve, oldest first.
    async fn dex_trades(&self, token_address: &str) -> SourceResult<Vec<DexTradeSnapshot>>;

    async fn latest_price(&self, token_address: &str) -> SourceResult<Option<PriceSnapshot>>;

    async fn volume(
        &self,
        token_address: &str,
        timeframe: Timeframe,
    ) -> SourceResult<VolumeSnapshot>;

    /// Traders ordered by descending USD volume.
    async fn top_traders(
        &self,
        token_address: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> SourceResult<Vec<TraderSnapshot>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeframe_round_trips_through_names() {
        for name in meme_store::schema::TIMEFRAMES {
            let timeframe: Timeframe = name.parse().unwrap();
            assert_eq!(timeframe.as_str(), *name);
        }
        assert!("2d".parse::<Timeframe>().is_err());
    }

    #[test]
    fn since_subtracts_window() {
        let now = DateTime::parse_from_rfc3339("2025-06-02T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let since = Timeframe::OneDay.since(now);
        assert_eq!(since.to_rfc3339_opts(SecondsFormat::Secs, true), "2025-06-01T00:00:00Z");
    }

    #[test]
    fn source_errors_render_upstream_messages() {
        let err = SourceError::Http {
            status: 401,
            body: "unauthorized".into(),
        };
        assert_eq!(err.to_string(), "HTTP 401: unauthorized");
        assert_eq!(SourceError::EmptyResponse.to_string(), "Empty response from API");
    }
}
