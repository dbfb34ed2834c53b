//! Bitquery reply shapes.
//!
//! Every field is defaulted so a partial row still maps. Bitquery renders
//! large numbers as strings, so numeric fields accept both encodings.

use serde::de::{Deserializer, Error as _};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct GraphQlResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct EvmData<T> {
    #[serde(rename = "EVM")]
    pub evm: T,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Currency {
    pub name: String,
    pub symbol: String,
    pub smart_contract: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TradeByTokensRows {
    #[serde(rename = "DEXTradeByTokens")]
    pub rows: Vec<TradeByTokensRow>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TradeByTokensRow {
    #[serde(rename = "Trade")]
    pub trade: CurrencyHolder,
    #[serde(rename = "Transaction")]
    pub transaction: TransactionFrom,
    #[serde(deserialize_with = "lenient_string")]
    pub volume_usd: String,
    #[serde(deserialize_with = "lenient_u64")]
    pub trade_count: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub unique_traders: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct CurrencyHolder {
    pub currency: Currency,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct TransactionFrom {
    pub from: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BalanceRows {
    #[serde(rename = "BalanceUpdates")]
    pub rows: Vec<BalanceRow>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BalanceRow {
    #[serde(rename = "Currency")]
    pub currency: Currency,
    #[serde(deserialize_with = "lenient_f64")]
    pub balance: f64,
    #[serde(deserialize_with = "lenient_string")]
    pub last_activity: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DexTradeRows {
    #[serde(rename = "DEXTrades")]
    pub rows: Vec<DexTradeRow>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct DexTradeRow {
    pub transaction: TransactionHash,
    pub block: Block,
    pub trade: DexTrade,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct TransactionHash {
    pub hash: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Block {
    pub time: String,
    #[serde(deserialize_with = "lenient_u64")]
    pub number: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct DexTrade {
    pub dex: Dex,
    pub buy: TradeSide,
    pub sell: TradeSide,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Dex {
    pub protocol_name: String,
    pub smart_contract: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct TradeSide {
    pub buyer: String,
    pub seller: String,
    #[serde(deserialize_with = "lenient_string")]
    pub amount: String,
    #[serde(rename = "AmountInUSD", deserialize_with = "lenient_string")]
    pub amount_in_usd: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub price: f64,
    #[serde(rename = "PriceInUSD", deserialize_with = "lenient_f64")]
    pub price_in_usd: f64,
    pub currency: Currency,
}

/// Accepts a string, a number, or null (as an empty string).
pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(value) => value,
        other => other.to_string(),
    })
}

/// Accepts a number, a numeric string, or null (as zero).
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(0.0),
        Value::Number(number) => Ok(number.as_f64().unwrap_or_default()),
        Value::String(value) if value.trim().is_empty() => Ok(0.0),
        Value::String(value) => value.trim().parse().map_err(D::Error::custom),
        other => Err(D::Error::custom(format!("expected number, got {other}"))),
    }
}

/// Accepts a non-negative integer, an integer string, or null (as zero).
pub fn lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(0),
        Value::Number(number) => number
            .as_u64()
            .ok_or_else(|| D::Error::custom(format!("expected unsigned integer, got {number}"))),
        Value::String(value) if value.trim().is_empty() => Ok(0),
        Value::String(value) => value.trim().parse().map_err(D::Error::custom),
        other => Err(D::Error::custom(format!("expected integer, got {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numeric_fields_accept_strings_and_numbers() {
        let row: BalanceRow = serde_json::from_value(json!({
            "Currency": {"Symbol": "PEPE"},
            "balance": "123.5",
            "last_activity": "2025-06-01T00:00:00Z"
        }))
        .unwrap();
        assert!((row.balance - 123.5).abs() < f64::EPSILON);
        assert_eq!(row.currency.symbol, "PEPE");

        let block: Block = serde_json::from_value(json!({"Time": "t", "Number": "42"})).unwrap();
        assert_eq!(block.number, 42);

        let side: TradeSide = serde_json::from_value(json!({"AmountInUSD": 12.25})).unwrap();
        assert_eq!(side.amount_in_usd, "12.25");
    }

    #[test]
    fn missing_fields_default() {
        let row: TradeByTokensRow = serde_json::from_value(json!({})).unwrap();
        assert_eq!(row.trade_count, 0);
        assert!(row.volume_usd.is_empty());
    }
}
