//! The [`Tool`] trait: a single side-effectful leaf operation.

use async_trait::async_trait;
use serde_json::Value;

use crate::descriptor::ToolDescriptor;
use crate::error::ToolError;

/// The positional and named arguments handed to a raw tool callable, after
/// the wrapper has already unwrapped any `AgentResult`-typed arguments.
///
/// Kept as `serde_json::Value` rather than a typed struct per tool, mirroring
/// the dynamically-typed original: the workflow layer that calls tools
/// doesn't know each tool's Rust parameter types, only their JSON shape.
#[derive(Debug, Clone, Default)]
pub struct ToolArgs {
    /// Arguments supplied positionally, in call order.
    pub positional: Vec<Value>,
    /// Arguments supplied by keyword.
    pub named: std::collections::BTreeMap<String, Value>,
}

impl ToolArgs {
    /// Build an argument list from positional values only.
    pub fn positional(values: impl IntoIterator<Item = Value>) -> Self {
        Self {
            positional: values.into_iter().collect(),
            named: std::collections::BTreeMap::new(),
        }
    }

    /// Look up an argument by parameter name, checking positional values
    /// against the tool's declared parameter order first, then the named
    /// map.
    pub fn get(&self, index: usize, name: &str) -> Option<&Value> {
        self.positional
            .get(index)
            .or_else(|| self.named.get(name))
    }
}

/// A side-effectful leaf operation: the unit of work a workflow chains
/// together. Implementors are generated by the `#[tool]` attribute macro
/// from a plain async method; this trait is the type-erased shape the
/// registry and the workflow executor actually invoke.
///
/// A `Tool` never panics and never returns a bare error to its caller that
/// bypasses the result algebra — see [`crate::invoke`] for the wrapper that
/// callers should actually go through.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Static name, docstring, and parameter list.
    fn descriptor(&self) -> &ToolDescriptor;

    /// Run the tool against already-unwrapped arguments.
    ///
    /// Implementations should perform whatever side effect the tool
    /// represents and return `Ok` with the JSON-encoded result, or `Err`
    /// with a [`ToolError`] describing the failure. Raw Rust panics are not
    /// caught here — tool bodies that can fail should return `Err`, not
    /// panic, exactly as a workflow's raw callable is expected to raise a
    /// catchable exception rather than abort the interpreter.
    async fn call(&self, args: ToolArgs) -> Result<Value, ToolError>;
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    struct Add;

    #[async_trait]
    impl Tool for Add {
        fn descriptor(&self) -> &ToolDescriptor {
            static DESCRIPTOR: std::sync::OnceLock<ToolDescriptor> = std::sync::OnceLock::new();
            DESCRIPTOR.get_or_init(|| {
                ToolDescriptor::new("add", "Add two numbers together")
                    .with_param("a", "f64")
                    .with_param("b", "f64")
            })
        }

        async fn call(&self, args: ToolArgs) -> Result<Value, ToolError> {
            let a = args
                .get(0, "a")
                .and_then(Value::as_f64)
                .ok_or_else(|| ToolError::missing_argument("a"))?;
            let b = args
                .get(1, "b")
                .and_then(Value::as_f64)
                .ok_or_else(|| ToolError::missing_argument("b"))?;
            Ok(Value::from(a + b))
        }
    }

    #[tokio::test]
    async fn calls_raw_callable_with_positional_args() {
        let add = Add;
        let result = add
            .call(ToolArgs::positional([Value::from(1.0), Value::from(2.0)]))
            .await
            .unwrap();
        assert_eq!(result, Value::from(3.0));
    }

    #[tokio::test]
    async fn missing_argument_surfaces_as_tool_error() {
        let add = Add;
        let err = add.call(ToolArgs::default()).await.unwrap_err();
        assert!(err.is_argument_error());
    }
}
