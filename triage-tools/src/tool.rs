//! The tool abstraction exposed to transports.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::error::Result;

/// A reusable piece of callable functionality with a JSON argument contract.
///
/// Tools take a JSON argument object, validate it against their schema, and
/// answer with a JSON value. They hold no per-call state: session or
/// conversation continuity belongs to the caller.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The wire name callers dispatch on.
    fn name(&self) -> &'static str;

    /// A one-line description of what the tool does.
    fn description(&self) -> &'static str;

    /// JSON schema for the argument object, or `None` for tools without
    /// arguments.
    fn parameters_schema(&self) -> Option<Value>;

    /// Execute the tool against the given argument object.
    async fn execute(&self, args: Value) -> Result<Value>;
}

/// A tool's advertised contract, for discovery endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDescriptor {
    /// The wire name callers dispatch on.
    pub name: &'static str,
    /// Human-readable description.
    pub description: &'static str,
    /// JSON schema for the argument object, if the tool takes any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Value>,
}

impl ToolDescriptor {
    pub(crate) fn of(tool: &dyn Tool) -> Self {
        Self {
            name: tool.name(),
            description: tool.description(),
            parameters: tool.parameters_schema(),
        }
    }
}
