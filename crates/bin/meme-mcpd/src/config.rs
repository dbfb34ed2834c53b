use clap::{Parser, builder::BoolishValueParser};
use meme_core::source::SourceMode;
use meme_store::schema::BITQUERY_API_URL;
use std::error::Error;
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

const DEFAULT_MCP_HTTP_ADDR: &str = "127.0.0.1:8000";
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;

#[derive(Parser, Debug)]
#[command(name = "meme-mcpd", version, about = "Four.meme analytics over MCP.")]
struct CliArgs {
    /// Serve streamable HTTP instead of stdio.
    #[arg(
        long = "http",
        env = "MEME_MCP_HTTP",
        default_value_t = false,
        value_parser = BoolishValueParser::new()
    )]
    http: bool,

    #[arg(long, env = "MEME_MCP_HTTP_ADDR", default_value = DEFAULT_MCP_HTTP_ADDR)]
    http_addr: SocketAddr,

    #[arg(
        long,
        env = "MEME_MCP_HTTP_STATEFUL",
        default_value_t = true,
        value_parser = BoolishValueParser::new()
    )]
    http_stateful: bool,

    #[arg(long, env = "BITQUERY_API_KEY", hide_env_values = true)]
    bitquery_api_key: Option<String>,

    #[arg(long, env = "BITQUERY_API_URL", default_value = BITQUERY_API_URL)]
    bitquery_url: String,

    #[arg(
        long,
        env = "MEME_UPSTREAM_TIMEOUT_SECS",
        default_value_t = DEFAULT_UPSTREAM_TIMEOUT_SECS
    )]
    upstream_timeout_secs: u64,

    /// Serve mock data even when an API key is configured.
    #[arg(
        long,
        env = "MEME_FORCE_MOCK",
        default_value_t = false,
        value_parser = BoolishValueParser::new()
    )]
    force_mock: bool,
}

/// Runtime configuration loaded from CLI arguments and environment variables.
#[derive(Clone)]
pub struct MemeConfig {
    pub http: bool,
    pub http_addr: SocketAddr,
    pub http_stateful: bool,
    pub bitquery_api_key: Option<String>,
    pub bitquery_url: String,
    pub upstream_timeout: Duration,
    pub force_mock: bool,
}

#[derive(Debug)]
pub enum ConfigError {
    MissingSetting(&'static str),
    InvalidSetting { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSetting(name) => write!(f, "missing required setting: {name}"),
            Self::InvalidSetting { name, value } => {
                write!(f, "invalid {name} value: {value}")
            }
        }
    }
}

impl Error for ConfigError {}

impl MemeConfig {
    pub fn from_args() -> Result<Self, ConfigError> {
        Self::try_from(CliArgs::parse())
    }

    /// Live when a key is configured and mock mode is not forced.
    pub const fn source_mode(&self) -> SourceMode {
        if self.bitquery_api_key.is_some() && !self.force_mock {
            SourceMode::Live
        } else {
            SourceMode::Mock
        }
    }
}

impl TryFrom<CliArgs> for MemeConfig {
    type Error = ConfigError;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let bitquery_api_key = args
            .bitquery_api_key
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        let bitquery_url = args.bitquery_url.trim().to_string();
        if bitquery_url.is_empty() {
            return Err(ConfigError::MissingSetting("BITQUERY_API_URL"));
        }
        if !(bitquery_url.starts_with("http://") || bitquery_url.starts_with("https://")) {
            return Err(ConfigError::InvalidSetting {
                name: "BITQUERY_API_URL",
                value: bitquery_url,
            });
        }

        if args.upstream_timeout_secs == 0 {
            return Err(ConfigError::InvalidSetting {
                name: "MEME_UPSTREAM_TIMEOUT_SECS",
                value: args.upstream_timeout_secs.to_string(),
            });
        }

        Ok(Self {
            http: args.http,
            http_addr: args.http_addr,
            http_stateful: args.http_stateful,
            bitquery_api_key,
            bitquery_url,
            upstream_timeout: Duration::from_secs(args.upstream_timeout_secs),
            force_mock: args.force_mock,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> CliArgs {
        CliArgs {
            http: false,
            http_addr: DEFAULT_MCP_HTTP_ADDR.parse().expect("valid MCP addr"),
            http_stateful: true,
            bitquery_api_key: None,
            bitquery_url: BITQUERY_API_URL.to_string(),
            upstream_timeout_secs: DEFAULT_UPSTREAM_TIMEOUT_SECS,
            force_mock: false,
        }
    }

    #[test]
    fn missing_key_selects_mock_mode() {
        let config = MemeConfig::try_from(base_args()).expect("config should parse");
        assert_eq!(config.source_mode(), SourceMode::Mock);
        assert_eq!(config.upstream_timeout, Duration::from_secs(30));
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let mut args = base_args();
        args.bitquery_api_key = Some("   ".to_string());
        let config = MemeConfig::try_from(args).expect("config should parse");
        assert!(config.bitquery_api_key.is_none());
        assert_eq!(config.source_mode(), SourceMode::Mock);
    }

    #[test]
    fn key_selects_live_mode_unless_forced() {
        let mut args = base_args();
        args.bitquery_api_key = Some("secret".to_string());
        let config = MemeConfig::try_from(args).expect("config should parse");
        assert_eq!(config.source_mode(), SourceMode::Live);

        let mut args = base_args();
        args.bitquery_api_key = Some("secret".to_string());
        args.force_mock = true;
        let config = MemeConfig::try_from(args).expect("config should parse");
        assert_eq!(config.source_mode(), SourceMode::Mock);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let mut args = base_args();
        args.upstream_timeout_secs = 0;
        let err = MemeConfig::try_from(args).err().expect("zero timeout must fail");
        assert!(matches!(
            err,
            ConfigError::InvalidSetting {
                name: "MEME_UPSTREAM_TIMEOUT_SECS",
                ..
            }
        ));
    }

    #[test]
    fn url_must_be_http() {
        let mut args = base_args();
        args.bitquery_url = "ftp://bitquery.io".to_string();
        assert!(MemeConfig::try_from(args).is_err());

        let mut args = base_args();
        args.bitquery_url = "  ".to_string();
        assert!(matches!(
            MemeConfig::try_from(args),
            Err(ConfigError::MissingSetting("BITQUERY_API_URL"))
        ));
    }

    #[test]
    fn cli_flags_parse() {
        let args = CliArgs::try_parse_from([
            "meme-mcpd",
            "--http",
            "--http-addr",
            "0.0.0.0:9000",
            "--upstream-timeout-secs",
            "5",
        ])
        .expect("flags should parse");
        let config = MemeConfig::try_from(args).expect("config should parse");
        assert!(config.http);
        assert_eq!(config.http_addr.port(), 9000);
        assert_eq!(config.upstream_timeout, Duration::from_secs(5));
    }
}
