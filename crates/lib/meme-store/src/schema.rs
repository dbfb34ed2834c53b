pub const BITQUERY_API_URL: &str = "https://streaming.bitquery.io/graphql";
pub const FOURMEME_PROXY_ADDRESS: &str = "0x5c952063c7fc8610FFDB798152D69F0B9550762b";
pub const FOURMEME_PROTOCOL: &str = "fourmeme_v1";
pub const NETWORK_BSC: &str = "bsc";

pub const GRADUATION_THRESHOLD: f64 = 95.0;
pub const APPROACHING_THRESHOLD: f64 = 90.0;
pub const ACTIVE_THRESHOLD: f64 = 50.0;
pub const INITIAL_REAL_TOKEN_RESERVES: f64 = 800_000_000.0;
/// Tokens the proxy holds back for the DEX pool; never sold on the curve.
pub const RESERVED_TOKENS: f64 = 200_000_000.0;
pub const BONDING_CURVE_FORMULA: &str =
    "100 - (((balance - reservedTokens) * 100) / initialRealTokenReserves)";

pub const RESOURCE_SERVER_CONFIG: &str = "config://mcp4meme";
pub const RESOURCE_PROXY_CONFIG: &str = "config://fourmeme-proxy";

pub const TIMEFRAMES: &[&str] = &["1h", "6h", "24h", "7d"];
pub const SORT_KEYS: &[&str] = &["volume", "trades"];

pub const DEFAULT_TIMEFRAME: &str = "24h";
pub const DEFAULT_SORT_KEY: &str = "volume";
pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;
