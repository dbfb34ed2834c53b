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

use super::{limit_param, to_payload, token_param};

const PROGRESS_RANGE: Constraint = Constraint::FloatRange {
    min: 0.0,
    max: 100.0,
};

pub fn register(
    registry: &mut ToolRegistry,
    control: &MemeControlPlane,
) -> Result<(), RegistryError> {
    let plane = control.clone();
    registry.register(
        ToolDescriptor::new(
            "get_bonding_curve_progress",
            "Bonding curve completion of a Four.meme token and its graduation status.",
        )
        .param(token_param()),
        handler(move |args: ToolArgs| {
            let plane = plane.clone();
            async move {
                to_payload(&plane.bonding_curve_progress(args.string("token_address")?).await)
            }
        }),
    )?;

    let plane = control.clone();
    registry.register(
        ToolDescriptor::new(
            "get_token_migration_status",
            "Whether a token graduated from the bonding curve to a DEX, with the pools it trades in.",
        )
        .param(token_param()),
        handler(move |args: ToolArgs| {
            let plane = plane.clone();
            async move { to_payload(&plane.migration_status(args.string("token_address")?).await) }
        }),
    )?;

    let plane = control.clone();
    registry.register(
        ToolDescriptor::new(
            "search_tokens_by_progress",
            "Recently active Four.meme tokens whose bonding curve progress lies in a range.",
        )
        .param(
            ParamSpec::float("min_progress", "Lowest progress percentage (0-100)")
                .with_constraint(PROGRESS_RANGE)
                .with_default(ParamValue::Float(0.0)),
        )
        .param(
            ParamSpec::float("max_progress", "Highest progress percentage (0-100)")
                .with_constraint(PROGRESS_RANGE)
                .with_default(ParamValue::Float(100.0)),
        )
        .param(limit_param("Number of tokens to return (1-100)")),
        handler(move |args: ToolArgs| {
            let plane = plane.clone();
            async move {
                let min = args.float("min_progress")?;
                let max = args.float("max_progress")?;
                if min > max {
                    return Err(ToolError::Validation(format!(
                        "min_progress ({min}) must not exceed max_progress ({max})"
                    )));
                }
                let limit = args.limit("limit")?;
                to_payload(&plane.search_by_progress(min, max, limit).await)
            }
        }),
    )
}
