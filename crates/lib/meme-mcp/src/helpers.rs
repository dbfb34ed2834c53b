use std::borrow::Cow;

use meme_core::registry::{ToolError, ToolOutcome};
use rmcp::ErrorData;
use rmcp::model::{CallToolResult, Content, ErrorCode};

pub fn mcp_err(code: ErrorCode, message: impl Into<Cow<'static, str>>) -> ErrorData {
    ErrorData {
        code,
        message: message.into(),
        data: None,
    }
}

/// Maps a resource lookup failure onto the matching JSON-RPC error.
pub fn resource_err(err: &ToolError) -> ErrorData {
    let code = match err {
        ToolError::NotFound(_) => ErrorCode::RESOURCE_NOT_FOUND,
        ToolError::Validation(_) => ErrorCode::INVALID_PARAMS,
        ToolError::Upstream(_) | ToolError::Internal(_) => ErrorCode::INTERNAL_ERROR,
    };
    mcp_err(code, err.message().to_string())
}

/// Wraps a registry outcome as a tool result, flagging error envelopes.
pub fn call_result(outcome: ToolOutcome) -> Result<CallToolResult, ErrorData> {
    let content = vec![Content::json(outcome.payload)?];
    if outcome.is_error {
        Ok(CallToolResult::error(content))
    } else {
        Ok(CallToolResult::success(content))
    }
}
