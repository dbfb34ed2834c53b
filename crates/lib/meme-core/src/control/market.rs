use meme_store::{
    LatestTradesReport,
    TokenPriceReport,
    TokenVolumeReport,
    TopTradersReport,
    TraderRanking,
    TrendingToken,
    TrendingTokensReport,
};
use tracing::{debug, warn};

use super::{MemeControlPlane, upstream_fields};
use crate::source::{SortKey, Timeframe};

const NO_TRADES: &str = "No trades found for token";

impl MemeControlPlane {
    /// Most traded Four.meme tokens in the window, ranked from 1.
    pub async fn trending_tokens(
        &self,
        timeframe: Timeframe,
        sort: SortKey,
        limit: usize,
    ) -> TrendingTokensReport {
        debug!(timeframe = timeframe.as_str(), sort = sort.as_str(), limit, "fetching trending tokens");
        let mut report = TrendingTokensReport {
            trending_tokens: Vec::new(),
            total_found: 0,
            timeframe: timeframe.as_str().to_string(),
            sort_by: sort.as_str().to_string(),
            error_kind: None,
            error: None,
        };

        match self.source.trending_tokens(timeframe, sort, limit).await {
            Ok(rows) => {
                report.trending_tokens = rows
                    .into_iter()
                    .take(limit)
                    .enumerate()
                    .map(|(idx, row)| TrendingToken {
                        rank: idx + 1,
                        token_address: row.token.address,
                        symbol: row.token.symbol,
                        name: row.token.name,
                        trade_count: row.trade_count,
                        volume_usd: row.volume_usd,
                    })
                    .collect();
                report.total_found = report.trending_tokens.len();
            }
            Err(err) => {
                warn!(error = %err, "trending tokens query failed");
                (report.error_kind, report.error) = upstream_fields(&err);
            }
        }
        report
    }

    /// Most recent bonding curve trades of a token, newest first.
    pub async fn latest_trades(&self, token_address: &str, limit: usize) -> LatestTradesReport {
        debug!(token = token_address, limit, "fetching latest trades");
        match self.source.latest_trades(token_address, limit).await {
            Ok(mut trades) => {
                trades.truncate(limit);
                LatestTradesReport {
                    token_address: token_address.to_string(),
                    total_trades: trades.len(),
                    trades,
                    error_kind: None,
                    error: None,
                }
            }
            Err(err) => {
                warn!(token = token_address, error = %err, "latest trades query failed");
                let (error_kind, error) = upstream_fields(&err);
                LatestTradesReport {
                    token_address: token_address.to_string(),
                    trades: Vec::new(),
                    total_trades: 0,
                    error_kind,
                    error,
                }
            }
        }
    }

    /// Price of the token's most recent trade.
    pub async fn token_price(&self, token_address: &str) -> TokenPriceReport {
        debug!(token = token_address, "fetching token price");
        let mut report = TokenPriceReport {
            token_address: token_address.to_string(),
            symbol: String::new(),
            name: String::new(),
            price_usd: 0.0,
            price_in_quote: 0.0,
            quote_symbol: String::new(),
            last_trade_time: None,
            message: None,
            error_kind: None,
            error: None,
        };

        match self.source.latest_price(token_address).await {
            Ok(Some(price)) => {
                report.symbol = price.token.symbol;
                report.name = price.token.name;
                report.price_usd = price.price_usd;
                report.price_in_quote = price.price_in_quote;
                report.quote_symbol = price.quote_symbol;
                report.last_trade_time = Some(price.block_time).filter(|time| !time.is_empty());
            }
            Ok(None) => report.message = Some(NO_TRADES.to_string()),
            Err(err) => {
                warn!(token = token_address, error = %err, "token price query failed");
                (report.error_kind, report.error) = upstream_fields(&err);
            }
        }
        report
    }

    /// Aggregate USD volume, trade count and unique traders in the window.
    pub async fn token_volume(&self, token_address: &str, timeframe: Timeframe) -> TokenVolumeReport {
        debug!(token = token_address, timeframe = timeframe.as_str(), "fetching token volume");
        match self.source.volume(token_address, timeframe).await {
            Ok(volume) => TokenVolumeReport {
                token_address: token_address.to_string(),
                timeframe: timeframe.as_str().to_string(),
                volume_usd: volume.volume_usd,
                trade_count: volume.trade_count,
                unique_traders: volume.unique_traders,
                error_kind: None,
                error: None,
            },
            Err(err) => {
                warn!(token = token_address, error = %err, "token volume query failed");
                let (error_kind, error) = upstream_fields(&err);
                TokenVolumeReport {
                    token_address: token_address.to_string(),
                    timeframe: timeframe.as_str().to_string(),
                    volume_usd: "0".to_string(),
                    trade_count: 0,
                    unique_traders: 0,
                    error_kind,
                    error,
                }
            }
        }
    }

    /// Traders of a token ranked by USD volume in the window.
    pub async fn top_traders(
        &self,
        token_address: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> TopTradersReport {
        debug!(token = token_address, timeframe = timeframe.as_str(), limit, "fetching top traders");
        let mut report = TopTradersReport {
            token_address: token_address.to_string(),
            timeframe: timeframe.as_str().to_string(),
            traders: Vec::new(),
            total_traders: 0,
            error_kind: None,
            error: None,
        };

        match self.source.top_traders(token_address, timeframe, limit).await {
            Ok(rows) => {
                report.traders = rows
                    .into_iter()
                    .take(limit)
                    .enumerate()
                    .map(|(idx, row)| TraderRanking {
                        rank: idx + 1,
                        address: row.address,
                        trade_count: row.trade_count,
                        volume_usd: row.volume_usd,
                    })
                    .collect();
                report.total_traders = report.traders.len();
            }
            Err(err) => {
                warn!(token = token_address, error = %err, "top traders query failed");
                (report.error_kind, report.error) = upstream_fields(&err);
            }
        }
        report
    }
}
