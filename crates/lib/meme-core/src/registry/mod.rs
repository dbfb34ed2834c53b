//! Stateless dispatch table for MCP tools.
//!
//! Each tool is declared once at startup with an explicit parameter schema.
//! Incoming calls are validated against that schema before the handler runs,
//! and every failure is reported as a `ToolError` instead of escaping the
//! boundary.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

use futures::future::BoxFuture;
use serde_json::{Map, Value, json};
use tracing::debug;

pub mod params;

pub use params::{Constraint, ParamKind, ParamSpec, ParamValue, ToolArgs, is_evm_address};

pub type ToolFuture = BoxFuture<'static, Result<Value, ToolError>>;
pub type ToolHandlerFn = Arc<dyn Fn(ToolArgs) -> ToolFuture + Send + Sync + 'static>;

/// Error returned to the calling agent for a tool call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolError {
    Validation(String),
    NotFound(String),
    Upstream(String),
    Internal(String),
}

impl ToolError {
    /// Stable machine-readable kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::NotFound(_) => "not_found_error",
            Self::Upstream(_) => "upstream_error",
            Self::Internal(_) => "internal_error",
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Validation(message)
            | Self::NotFound(message)
            | Self::Upstream(message)
            | Self::Internal(message) => message,
        }
    }

    /// Structured error object returned in place of a tool result.
    #[must_use]
    pub fn to_envelope(&self) -> Value {
        json!({
            "status": "error",
            "error": {
                "kind": self.kind(),
                "message": self.message(),
            }
        })
    }
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind(), self.message())
    }
}

impl Error for ToolError {}

impl From<serde_json::Error> for ToolError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("failed to serialize tool result: {err}"))
    }
}

#[derive(Debug)]
pub enum RegistryError {
    DuplicateTool(String),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateTool(name) => write!(f, "tool already registered: {name}"),
        }
    }
}

impl Error for RegistryError {}

/// Static declaration of a callable tool.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub params: Vec<ParamSpec>,
}

impl ToolDescriptor {
    #[must_use]
    pub const fn new(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            params: Vec::new(),
        }
    }

    #[must_use]
    pub fn param(mut self, param: ParamSpec) -> Self {
        self.params.push(param);
        self
    }

    /// JSON Schema object for the tool's arguments.
    #[must_use]
    pub fn input_schema(&self) -> Map<String, Value> {
        let properties: Map<String, Value> = self
            .params
            .iter()
            .map(|param| (param.name.to_string(), param.schema()))
            .collect();
        let required: Vec<&str> = self
            .params
            .iter()
            .filter(|param| param.is_required())
            .map(|param| param.name)
            .collect();

        let mut schema = Map::new();
        schema.insert("type".into(), Value::from("object"));
        schema.insert("properties".into(), Value::Object(properties));
        schema.insert("required".into(), json!(required));
        schema.insert("additionalProperties".into(), Value::Bool(false));
        schema
    }
}

/// Result of `ToolRegistry::dispatch`: a payload, flagged when it is an error envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolOutcome {
    pub payload: Value,
    pub is_error: bool,
}

struct RegisteredTool {
    descriptor: ToolDescriptor,
    handler: ToolHandlerFn,
}

/// Registry of tools keyed by name, kept in registration order.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<RegisteredTool>,
    index: HashMap<&'static str, usize>,
}

impl ToolRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a tool.
    ///
    /// # Errors
    /// Returns `RegistryError::DuplicateTool` if the name is already taken.
    pub fn register(
        &mut self,
        descriptor: ToolDescriptor,
        handler: ToolHandlerFn,
    ) -> Result<(), RegistryError> {
        if self.index.contains_key(descriptor.name) {
            return Err(RegistryError::DuplicateTool(descriptor.name.to_string()));
        }
        self.index.insert(descriptor.name, self.tools.len());
        self.tools.push(RegisteredTool {
            descriptor,
            handler,
        });
        Ok(())
    }

    #[must_use]
    pub fn descriptor(&self, name: &str) -> Option<&ToolDescriptor> {
        self.index.get(name).map(|&idx| &self.tools[idx].descriptor)
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.tools.iter().map(|tool| &tool.descriptor)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Resolves, validates and runs a tool.
    ///
    /// # Errors
    /// Returns `ToolError::NotFound` for unknown names, `ToolError::Validation`
    /// for bad arguments, or whatever the handler reports.
    pub async fn invoke(&self, name: &str, args: &Map<String, Value>) -> Result<Value, ToolError> {
        let Some(&idx) = self.index.get(name) else {
            return Err(ToolError::NotFound(format!("unknown tool: {name}")));
        };
        let tool = &self.tools[idx];
        let validated = ToolArgs::validate(&tool.descriptor.params, args)?;
        debug!(tool = name, "invoking tool");
        (tool.handler)(validated).await
    }

    /// Like `invoke`, but always yields a structured payload.
    pub async fn dispatch(&self, name: &str, args: &Map<String, Value>) -> ToolOutcome {
        match self.invoke(name, args).await {
            Ok(payload) => ToolOutcome {
                payload,
                is_error: false,
            },
            Err(err) => {
                debug!(tool = name, kind = err.kind(), "tool call failed: {}", err.message());
                ToolOutcome {
                    payload: err.to_envelope(),
                    is_error: true,
                }
            }
        }
    }
}

/// Wraps an async closure into a `ToolHandlerFn`.
pub fn handler<F, Fut>(f: F) -> ToolHandlerFn
where
    F: Fn(ToolArgs) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value, ToolError>> + Send + 'static,
{
    Arc::new(move |args: ToolArgs| -> ToolFuture { Box::pin(f(args)) })
}
