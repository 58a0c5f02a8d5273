//! The wrapper that turns a raw [`Tool`] into a `Result`-argument-aware,
//! always-`Result`-returning call.

use serde_json::Value;
use toolagent_result::AgentResult;

use crate::error::ToolError;
use crate::tool::{Tool, ToolArgs};

/// An argument as seen before a tool call: either already-resolved JSON, or
/// the `AgentResult` a previous tool/combine step produced.
///
/// The workflow executor builds these from its variable bindings; a bare
/// [`ResultArg::Value`] is used for literal arguments which by definition
/// can never be in an error state.
#[derive(Debug, Clone)]
pub enum ResultArg {
    /// A literal, or an already-unwrapped value.
    Value(Value),
    /// The result of a previous step — may be ok or err.
    Result(AgentResult<Value, ToolError>),
}

impl ResultArg {
    fn into_value_or_err(self) -> Result<Value, AgentResult<Value, ToolError>> {
        match self {
            Self::Value(v) => Ok(v),
            Self::Result(r) => {
                if r.is_err() {
                    Err(r)
                } else {
                    // `ok` results from a single tool call always carry
                    // exactly one value; a combined result used directly
                    // as an argument is a caller programming error, but we
                    // degrade gracefully by taking the first value rather
                    // than panicking mid-workflow.
                    let value = r
                        .values()
                        .first()
                        .cloned()
                        .unwrap_or(Value::Null);
                    Ok(value)
                }
            }
        }
    }
}

/// Invoke `tool` against arguments that may themselves be pending
/// `AgentResult`s, performing the tool wrapper's three-step contract:
///
/// 1. **Argument unwrapping.** Every positional argument, then every named
///    argument, is inspected in order. The first one found in an error
///    state short-circuits the call entirely — that `AgentResult` is
///    returned unchanged, and `tool.call` is never invoked.
/// 2. **Success path.** If every argument is ok, the raw callable runs and
///    its return value is wrapped as [`AgentResult::ok`].
/// 3. **Failure path.** If the raw callable returns `Err`, that error is
///    captured and returned as [`AgentResult::err`] — never propagated as a
///    bare Rust `Result::Err` to the caller.
pub async fn invoke(
    tool: &dyn Tool,
    positional: Vec<ResultArg>,
    named: Vec<(String, ResultArg)>,
) -> AgentResult<Value, ToolError> {
    let mut resolved_positional = Vec::with_capacity(positional.len());
    for arg in positional {
        match arg.into_value_or_err() {
            Ok(value) => resolved_positional.push(value),
            Err(short_circuit) => return short_circuit,
        }
    }

    let mut resolved_named = std::collections::BTreeMap::new();
    for (name, arg) in named {
        match arg.into_value_or_err() {
            Ok(value) => {
                resolved_named.insert(name, value);
            }
            Err(short_circuit) => return short_circuit,
        }
    }

    let args = ToolArgs {
        positional: resolved_positional,
        named: resolved_named,
    };

    match tool.call(args).await {
        Ok(value) => AgentResult::ok(value),
        Err(error) => AgentResult::err(error),
    }
}
