use meme_core::control::MemeControlPlane;
use meme_core::registry::{
    Constraint,
    ParamSpec,
    ParamValue,
    RegistryError,
    ToolArgs,
    ToolDescriptor,
    ToolError,
    ToolRegistry,
    handler,
};
use meme_core::source::SortKey;
use meme_store::schema::{DEFAULT_SORT_KEY, SORT_KEYS};

use super::{limit_param, timeframe_arg, timeframe_param, to_payload, token_param};

pub fn register(
    registry: &mut ToolRegistry,
    control: &MemeControlPlane,
) -> Result<(), RegistryError> {
    let plane = control.clone();
    registry.register(
        ToolDescriptor::new(
            "get_trending_tokens",
            "Rank Four.meme tokens by trading volume or trade count over a time window.",
        )
        .param(timeframe_param())
        .param(
            ParamSpec::string("sort_by", "Ranking key: volume or trades")
                .with_constraint(Constraint::OneOf(SORT_KEYS))
                .with_default(ParamValue::String(DEFAULT_SORT_KEY.to_string())),
        )
        .param(limit_param("Number of tokens to return (1-100)")),
        handler(move |args: ToolArgs| {
            let plane = plane.clone();
            async move {
                let timeframe = timeframe_arg(&args)?;
                let sort: SortKey = args.string("sort_by")?.parse().map_err(ToolError::Validation)?;
                let limit = args.limit("limit")?;
                to_payload(&plane.trending_tokens(timeframe, sort, limit).await)
            }
        }),
    )?;

    let plane = control.clone();
    registry.register(
        ToolDescriptor::new(
            "get_latest_trades",
            "Latest Four.meme bonding curve trades for a token, newest first.",
        )
        .param(token_param())
        .param(limit_param("Number of trades to return (1-100)")),
        handler(move |args: ToolArgs| {
            let plane = plane.clone();
            async move {
                let token = args.string("token_address")?;
                let limit = args.limit("limit")?;
                to_payload(&plane.latest_trades(token, limit).await)
            }
        }),
    )?;

    let plane = control.clone();
    registry.register(
        ToolDescriptor::new(
            "get_token_price",
            "Price of a token's most recent trade, in USD and in the quote currency.",
        )
        .param(token_param()),
        handler(move |args: ToolArgs| {
            let plane = plane.clone();
            async move { to_payload(&plane.token_price(args.string("token_address")?).await) }
        }),
    )?;

    let plane = control.clone();
    registry.register(
        ToolDescriptor::new(
            "get_token_volume",
            "USD volume, trade count and unique traders for a token over a time window.",
        )
        .param(token_param())
        .param(timeframe_param()),
        handler(move |args: ToolArgs| {
            let plane = plane.clone();
            async move {
                let timeframe = timeframe_arg(&args)?;
                to_payload(&plane.token_volume(args.string("token_address")?, timeframe).await)
            }
        }),
    )?;

    let plane = control.clone();
    registry.register(
        ToolDescriptor::new(
            "get_top_traders",
            "Traders of a token ranked by USD volume over a time window.",
        )
        .param(token_param())
        .param(timeframe_param())
        .param(limit_param("Number of traders to return (1-100)")),
        handler(move |args: ToolArgs| {
            let plane = plane.clone();
            async move {
                let timeframe = timeframe_arg(&args)?;
                let limit = args.limit("limit")?;
                let report = plane
                    .top_traders(args.string("token_address")?, timeframe, limit)
                    .await;
                to_payload(&report)
            }
        }),
    )
}
