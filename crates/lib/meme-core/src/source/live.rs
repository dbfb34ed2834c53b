//! Bitquery-backed data source.

use std::time::Duration;

use async_trait::async_trait;
use meme_store::TradeRecord;
use meme_store::schema::{
    BITQUERY_API_URL,
    FOURMEME_PROTOCOL,
    FOURMEME_PROXY_ADDRESS,
    RESERVED_TOKENS,
};
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, warn};

use super::queries;
use super::wire::{
    BalanceRow,
    BalanceRows,
    DexTradeRows,
    EvmData,
    GraphQlResponse,
    TradeByTokensRows,
};
use super::{
    CurveBalance,
    DataSource,
    DexTradeSnapshot,
    PriceSnapshot,
    SortKey,
    SourceError,
    SourceMode,
    SourceResult,
    Timeframe,
    TokenIdentity,
    TraderSnapshot,
    TrendingSnapshot,
    VolumeSnapshot,
};

const INVALID_JSON_SNIPPET_CHARS: usize = 200;

/// Connection settings for `LiveSource`.
#[derive(Clone)]
pub struct LiveSourceConfig {
    pub endpoint: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl LiveSourceConfig {
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            endpoint: BITQUERY_API_URL.to_string(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(30),
        }
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Answers upstream questions with Bitquery GraphQL queries.
#[derive(Clone)]
pub struct LiveSource {
    client: Client,
    endpoint: String,
}

impl LiveSource {
    /// Builds the HTTP client with the credential headers attached.
    ///
    /// # Errors
    /// Returns `SourceError::Client` if the key is not a valid header value or
    /// the client cannot be built.
    pub fn new(config: LiveSourceConfig) -> SourceResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert("x-api-key", sensitive_header(&config.api_key)?);
        headers.insert(
            AUTHORIZATION,
            sensitive_header(&format!("Bearer {}", config.api_key))?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|err| SourceError::Client(err.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint,
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Posts a query and decodes `data.EVM` into `T`.
    async fn execute<T>(&self, query: &str, variables: Value) -> SourceResult<T>
    where
        T: DeserializeOwned + Send,
    {
        debug!(endpoint = %self.endpoint, "executing bitquery query");
        let payload = json!({ "query": query, "variables": variables });
        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|err| SourceError::Transport(err.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| SourceError::Transport(err.to_string()))?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "bitquery returned an error status");
            return Err(SourceError::Http {
                status: status.as_u16(),
                body,
            });
        }
        if body.trim().is_empty() {
            return Err(SourceError::EmptyResponse);
        }

        let reply: GraphQlResponse = serde_json::from_str(&body).map_err(|_| {
            SourceError::InvalidJson(body.chars().take(INVALID_JSON_SNIPPET_CHARS).collect())
        })?;

        if let Some(errors) = reply.errors.filter(|errors| !errors.is_empty()) {
            let messages: Vec<String> = errors.into_iter().map(|err| err.message).collect();
            return Err(SourceError::GraphQl(messages.join("; ")));
        }

        let data = reply
            .data
            .ok_or_else(|| SourceError::Decode("reply has no data".to_string()))?;
        let envelope: EvmData<T> =
            serde_json::from_value(data).map_err(|err| SourceError::Decode(err.to_string()))?;
        Ok(envelope.evm)
    }
}

fn sensitive_header(value: &str) -> SourceResult<HeaderValue> {
    let mut header =
        HeaderValue::from_str(value).map_err(|err| SourceError::Client(err.to_string()))?;
    header.set_sensitive(true);
    Ok(header)
}

fn balance_snapshot(row: BalanceRow) -> CurveBalance {
    CurveBalance {
        token: TokenIdentity {
            address: row.currency.smart_contract,
            symbol: row.currency.symbol,
            name: row.currency.name,
        },
        left_tokens: (row.balance - RESERVED_TOKENS).max(0.0),
        last_activity: Some(row.last_activity).filter(|time| !time.is_empty()),
    }
}

const fn order_field(sort: SortKey) -> &'static str {
    match sort {
        SortKey::Volume => "volume_usd",
        SortKey::Trades => "trade_count",
    }
}

#[async_trait]
impl DataSource for LiveSource {
    fn mode(&self) -> SourceMode {
        SourceMode::Live
    }

    async fn trending_tokens(
        &self,
        timeframe: Timeframe,
        sort: SortKey,
        limit: usize,
    ) -> SourceResult<Vec<TrendingSnapshot>> {
        let rows: TradeByTokensRows = self
            .execute(
                queries::TRENDING_TOKENS,
                json!({
                    "limit": limit,
                    "since": timeframe.since_rfc3339(),
                    "orderField": order_field(sort),
                    "protocol": FOURMEME_PROTOCOL,
                }),
            )
            .await?;

        Ok(rows
            .rows
            .into_iter()
            .map(|row| TrendingSnapshot {
                token: TokenIdentity {
                    address: row.trade.currency.smart_contract,
                    symbol: row.trade.currency.symbol,
                    name: row.trade.currency.name,
                },
                trade_count: row.trade_count,
                volume_usd: row.volume_usd,
            })
            .collect())
    }

    async fn curve_balance(&self, token_address: &str) -> SourceResult<Option<CurveBalance>> {
        let rows: BalanceRows = self
            .execute(
                queries::CURVE_BALANCE,
                json!({ "tokenAddress": token_address, "proxy": FOURMEME_PROXY_ADDRESS }),
            )
            .await?;
        Ok(rows.rows.into_iter().next().map(balance_snapshot))
    }

    async fn curve_balances(&self, limit: usize) -> SourceResult<Vec<CurveBalance>> {
        let rows: BalanceRows = self
            .execute(
                queries::CURVE_BALANCES,
                json!({ "proxy": FOURMEME_PROXY_ADDRESS, "limit": limit }),
            )
            .await?;
        Ok(rows.rows.into_iter().map(balance_snapshot).collect())
    }

    async fn latest_trades(
        &self,
        token_address: &str,
        limit: usize,
    ) -> SourceResult<Vec<TradeRecord>> {
        let rows: DexTradeRows = self
            .execute(
                queries::LATEST_TRADES,
                json!({
                    "tokenAddress": token_address,
                    "limit": limit,
                    "protocol": FOURMEME_PROTOCOL,
                }),
            )
            .await?;

        Ok(rows
            .rows
            .into_iter()
            .map(|row| TradeRecord {
                transaction_hash: row.transaction.hash,
                timestamp: row.block.time,
                block_number: row.block.number,
                buyer: row.trade.buy.buyer,
                seller: row.trade.sell.seller,
                buy_amount: row.trade.buy.amount,
                sell_amount: row.trade.sell.amount,
                price_usd: row.trade.buy.amount_in_usd,
                buy_token: row.trade.buy.currency.symbol,
                sell_token: row.trade.sell.currency.symbol,
            })
            .collect())
    }

    async fn dex_trades(&self, token_address: &str) -> SourceResult<Vec<DexTradeSnapshot>> {
        let rows: DexTradeRows = self
            .execute(
                queries::DEX_TRADES,
                json!({ "tokenAddress": token_address, "protocol": FOURMEME_PROTOCOL }),
            )
            .await?;

        Ok(rows
            .rows
            .into_iter()
            .map(|row| DexTradeSnapshot {
                dex_name: row.trade.dex.protocol_name,
                dex_contract: row.trade.dex.smart_contract,
                buy_symbol: row.trade.buy.currency.symbol,
                sell_symbol: row.trade.sell.currency.symbol,
                block_time: row.block.time,
            })
            .collect())
    }

    async fn latest_price(&self, token_address: &str) -> SourceResult<Option<PriceSnapshot>> {
        let rows: DexTradeRows = self
            .execute(queries::LATEST_PRICE, json!({ "tokenAddress": token_address }))
            .await?;

        Ok(rows.rows.into_iter().next().map(|row| {
            let currency = row.trade.buy.currency;
            PriceSnapshot {
                token: TokenIdentity {
                    address: currency.smart_contract,
                    symbol: currency.symbol,
                    name: currency.name,
                },
                price_usd: row.trade.buy.price_in_usd,
                price_in_quote: row.trade.buy.price,
                quote_symbol: row.trade.sell.currency.symbol,
                block_time: row.block.time,
            }
        }))
    }

    async fn volume(
        &self,
        token_address: &str,
        timeframe: Timeframe,
    ) -> SourceResult<VolumeSnapshot> {
        let rows: TradeByTokensRows = self
            .execute(
                queries::TOKEN_VOLUME,
                json!({ "tokenAddress": token_address, "since": timeframe.since_rfc3339() }),
            )
            .await?;

        Ok(rows.rows.into_iter().next().map_or_else(
            || VolumeSnapshot {
                volume_usd: "0".to_string(),
                trade_count: 0,
                unique_traders: 0,
            },
            |row| VolumeSnapshot {
                volume_usd: row.volume_usd,
                trade_count: row.trade_count,
                unique_traders: row.unique_traders,
            },
        ))
    }

    async fn top_traders(
        &self,
        token_address: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> SourceResult<Vec<TraderSnapshot>> {
        let rows: TradeByTokensRows = self
            .execute(
                queries::TOP_TRADERS,
                json!({
                    "tokenAddress": token_address,
                    "since": timeframe.since_rfc3339(),
                    "limit": limit,
                }),
            )
            .await?;

        Ok(rows
            .rows
            .into_iter()
            .map(|row| TraderSnapshot {
                address: row.transaction.from,
                trade_count: row.trade_count,
                volume_usd: row.volume_usd,
            })
            .collect())
    }
}
