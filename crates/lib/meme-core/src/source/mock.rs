//! Deterministic offline data source.
//!
//! Values are derived from a SHA-256 digest of the (lower-cased) token address
//! or a fixed label, so the same input always yields the same payload.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use meme_store::TradeRecord;
use meme_store::schema::{
    FOURMEME_PROXY_ADDRESS,
    GRADUATION_THRESHOLD,
    INITIAL_REAL_TOKEN_RESERVES,
};
use sha2::{Digest, Sha256};

use super::{
    CurveBalance,
    DataSource,
    DexTradeSnapshot,
    PriceSnapshot,
    SortKey,
    SourceMode,
    SourceResult,
    Timeframe,
    TokenIdentity,
    TraderSnapshot,
    TrendingSnapshot,
    VolumeSnapshot,
};

/// 2025-06-01T00:00:00Z; mock timestamps count backwards from here.
const MOCK_EPOCH_SECS: i64 = 1_748_736_000;
const MOCK_HEAD_BLOCK: u64 = 51_000_000;
const MOCK_BNB_USD: f64 = 600.0;
const QUOTE_SYMBOL: &str = "WBNB";
const MOCK_DEXES: &[&str] = &["pancake_swap_v2", "pancake_swap_v3"];

type Seed = [u8; 32];

fn seed(label: &str) -> Seed {
    Sha256::digest(label.to_ascii_lowercase().as_bytes()).into()
}

/// Uniform value in `[0, 1]` taken from two digest bytes.
fn unit(seed: &Seed, slot: usize) -> f64 {
    let idx = (slot * 2) % seed.len();
    f64::from(u16::from_be_bytes([seed[idx], seed[idx + 1]])) / f64::from(u16::MAX)
}

fn small(seed: &Seed, slot: usize, modulo: u32) -> u32 {
    u32::from(seed[slot % seed.len()]) % modulo.max(1)
}

fn mock_address(label: &str) -> String {
    format!("0x{}", hex::encode(&seed(label)[..20]))
}

fn mock_hash(label: &str) -> String {
    format!("0x{}", hex::encode(seed(label)))
}

fn mock_time(seconds_ago: u32) -> String {
    DateTime::<Utc>::from_timestamp(MOCK_EPOCH_SECS - i64::from(seconds_ago), 0)
        .map(|time| time.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_default()
}

fn identity(token_address: &str) -> TokenIdentity {
    let seed = seed(token_address);
    let symbol = format!("M{}", hex::encode_upper(&seed[..2]));
    TokenIdentity {
        address: token_address.to_string(),
        name: format!("Mock Meme {symbol}"),
        symbol,
    }
}

fn progress_of(token_address: &str) -> f64 {
    unit(&seed(token_address), 0) * 100.0
}

fn price_of(token_address: &str) -> f64 {
    0.000_001 + unit(&seed(token_address), 1) * 0.000_5
}

fn rank_divisor(index: usize) -> f64 {
    f64::from(u32::try_from(index + 1).unwrap_or(u32::MAX))
}

/// Serves synthetic data shaped exactly like `LiveSource` replies.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockSource;

impl MockSource {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn balance_of(token_address: &str) -> CurveBalance {
        let progress = progress_of(token_address);
        CurveBalance {
            token: identity(token_address),
            left_tokens: INITIAL_REAL_TOKEN_RESERVES * (1.0 - progress / 100.0),
            last_activity: Some(mock_time(small(&seed(token_address), 4, 3_600))),
        }
    }
}

#[async_trait]
impl DataSource for MockSource {
    fn mode(&self) -> SourceMode {
        SourceMode::Mock
    }

    async fn trending_tokens(
        &self,
        timeframe: Timeframe,
        sort: SortKey,
        limit: usize,
    ) -> SourceResult<Vec<TrendingSnapshot>> {
        let hours = f64::from(u32::try_from(timeframe.hours()).unwrap_or(1));
        let mut ranked: Vec<(f64, TrendingSnapshot)> = (0..limit)
            .map(|idx| {
                let address = mock_address(&format!("fourmeme-trending-{idx}"));
                let seed = seed(&address);
                let trades =
                    (20 + small(&seed, 6, 200)) * u32::try_from(timeframe.hours()).unwrap_or(1);
                let volume = (1_000.0 + unit(&seed, 3) * 50_000.0) * hours;
                let snapshot = TrendingSnapshot {
                    token: identity(&address),
                    trade_count: u64::from(trades),
                    volume_usd: format!("{volume:.2}"),
                };
                let key = match sort {
                    SortKey::Volume => volume,
                    SortKey::Trades => f64::from(trades),
                };
                (key, snapshot)
            })
            .collect();
        ranked.sort_by(|left, right| right.0.total_cmp(&left.0));
        Ok(ranked.into_iter().map(|(_, snapshot)| snapshot).collect())
    }

    async fn curve_balance(&self, token_address: &str) -> SourceResult<Option<CurveBalance>> {
        Ok(Some(Self::balance_of(token_address)))
    }

    async fn curve_balances(&self, limit: usize) -> SourceResult<Vec<CurveBalance>> {
        Ok((0..limit)
            .map(|idx| Self::balance_of(&mock_address(&format!("fourmeme-token-{idx}"))))
            .collect())
    }

    async fn latest_trades(
        &self,
        token_address: &str,
        limit: usize,
    ) -> SourceResult<Vec<TradeRecord>> {
        let token = identity(token_address);
        let price = price_of(token_address);
        let mut seconds_ago = 0_u32;
        let mut block = MOCK_HEAD_BLOCK;

        Ok((0..limit)
            .map(|idx| {
                let label = format!("{token_address}:trade:{idx}");
                let seed = seed(&label);
                seconds_ago += 3 + small(&seed, 0, 120);
                block -= 1 + u64::from(small(&seed, 1, 40));
                let tokens = 10_000.0 + unit(&seed, 2) * 5_000_000.0;
                let usd = tokens * price;
                TradeRecord {
                    transaction_hash: mock_hash(&label),
                    timestamp: mock_time(seconds_ago),
                    block_number: block,
                    buyer: mock_address(&format!("{label}:buyer")),
                    seller: FOURMEME_PROXY_ADDRESS.to_ascii_lowercase(),
                    buy_amount: format!("{tokens:.4}"),
                    sell_amount: format!("{:.8}", usd / MOCK_BNB_USD),
                    price_usd: format!("{usd:.4}"),
                    buy_token: token.symbol.clone(),
                    sell_token: QUOTE_SYMBOL.to_string(),
                }
            })
            .collect())
    }

    async fn dex_trades(&self, token_address: &str) -> SourceResult<Vec<DexTradeSnapshot>> {
        if progress_of(token_address) < GRADUATION_THRESHOLD {
            return Ok(Vec::new());
        }
        let token = identity(token_address);
        let seed = seed(token_address);
        let graduated_ago = 3_600 + small(&seed, 7, 200) * 60;

        // The same pool usually shows up more than once in the first trades.
        let pools = [MOCK_DEXES[0], MOCK_DEXES[0], MOCK_DEXES[1]];
        Ok(pools
            .iter()
            .enumerate()
            .map(|(idx, dex)| DexTradeSnapshot {
                dex_name: (*dex).to_string(),
                dex_contract: mock_address(&format!("{token_address}:{dex}")),
                buy_symbol: token.symbol.clone(),
                sell_symbol: QUOTE_SYMBOL.to_string(),
                block_time: mock_time(
                    graduated_ago.saturating_sub(u32::try_from(idx).unwrap_or(0) * 30),
                ),
            })
            .collect())
    }

    async fn latest_price(&self, token_address: &str) -> SourceResult<Option<PriceSnapshot>> {
        let price_usd = price_of(token_address);
        Ok(Some(PriceSnapshot {
            token: identity(token_address),
            price_usd,
            price_in_quote: price_usd / MOCK_BNB_USD,
            quote_symbol: QUOTE_SYMBOL.to_string(),
            block_time: mock_time(small(&seed(token_address), 8, 600)),
        }))
    }

    async fn volume(
        &self,
        token_address: &str,
        timeframe: Timeframe,
    ) -> SourceResult<VolumeSnapshot> {
        let seed = seed(token_address);
        let hours = u32::try_from(timeframe.hours()).unwrap_or(1);
        let trade_count = (5 + small(&seed, 5, 50)) * hours;
        let volume = f64::from(trade_count) * (20.0 + unit(&seed, 5) * 500.0);
        Ok(VolumeSnapshot {
            volume_usd: format!("{volume:.2}"),
            trade_count: u64::from(trade_count),
            unique_traders: u64::from(trade_count / 3 + 1),
        })
    }

    async fn top_traders(
        &self,
        token_address: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> SourceResult<Vec<TraderSnapshot>> {
        let token_seed = seed(token_address);
        let hours = f64::from(u32::try_from(timeframe.hours()).unwrap_or(1));
        let top_volume = (500.0 + unit(&token_seed, 6) * 20_000.0) * hours.sqrt();

        Ok((0..limit)
            .map(|idx| {
                let label = format!("{token_address}:trader:{idx}");
                let trader_seed = seed(&label);
                TraderSnapshot {
                    address: mock_address(&label),
                    trade_count: u64::from(1 + small(&trader_seed, 0, 60)),
                    volume_usd: format!("{:.2}", top_volume / rank_divisor(idx)),
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKEN: &str = "0xabcdef0000000000000000000000000000abcdef";

    #[tokio::test]
    async fn values_are_deterministic_per_address() {
        let source = MockSource::new();
        let first = source.latest_price(TOKEN).await.unwrap();
        let shouting = format!("0x{}", TOKEN[2..].to_uppercase());
        let second = source.latest_price(&shouting).await.unwrap();
        assert_eq!(
            first.map(|price| price.price_usd),
            second.map(|price| price.price_usd)
        );
    }

    #[tokio::test]
    async fn curve_balance_stays_within_reserves() {
        let balances = MockSource::new().curve_balances(50).await.unwrap();
        assert_eq!(balances.len(), 50);
        for balance in balances {
            assert!(balance.left_tokens >= 0.0);
            assert!(balance.left_tokens <= INITIAL_REAL_TOKEN_RESERVES);
        }
    }

    #[tokio::test]
    async fn trending_respects_sort_and_limit() {
        let tokens = MockSource::new()
            .trending_tokens(Timeframe::OneDay, SortKey::Trades, 7)
            .await
            .unwrap();
        assert_eq!(tokens.len(), 7);
        assert!(tokens.windows(2).all(|pair| pair[0].trade_count >= pair[1].trade_count));
    }

    #[tokio::test]
    async fn trades_walk_backwards_in_time() {
        let trades = MockSource::new().latest_trades(TOKEN, 5).await.unwrap();
        assert_eq!(trades.len(), 5);
        assert!(trades.windows(2).all(|pair| pair[0].block_number > pair[1].block_number));
        assert!(trades.iter().all(|trade| trade.transaction_hash.len() == 66));
    }
}
