//! Error type produced when a wrapped tool call fails.

/// Error type for all tool invocations.
///
/// Unlike a panic or raised exception, a tool never unwinds: a failure
/// inside the raw callable is captured here and handed back as the error
/// side of an [`AgentResult`](toolagent_result::AgentResult), per the tool
/// wrapper's failure-path contract.
#[derive(Debug, Clone, thiserror::Error)]
#[non_exhaustive]
pub enum ToolError {
    /// The raw callable returned an error.
    #[error("{0}")]
    Failed(String),

    /// A required argument was not supplied.
    #[error("missing required argument `{name}`")]
    MissingArgument {
        /// Name of the missing argument.
        name: String,
    },

    /// An argument was supplied with the wrong shape.
    #[error("argument `{name}` has wrong type: expected {expected}, got {got}")]
    TypeMismatch {
        /// Name of the mismatched argument.
        name: String,
        /// Type name the tool declared.
        expected: String,
        /// Type name actually observed in the argument's JSON value.
        got: String,
    },

    /// No tool with the given name is registered on the agent.
    #[error("unknown tool `{0}`")]
    UnknownTool(String),
}

impl ToolError {
    /// Wrap an arbitrary failure message as a tool failure.
    pub fn failed(msg: impl Into<String>) -> Self {
        Self::Failed(msg.into())
    }

    /// Build a missing-argument error.
    pub fn missing_argument(name: impl Into<String>) -> Self {
        Self::MissingArgument { name: name.into() }
    }

    /// Build a type-mismatch error.
    pub fn type_mismatch(
        name: impl Into<String>,
        expected: impl Into<String>,
        got: impl Into<String>,
    ) -> Self {
        Self::TypeMismatch {
            name: name.into(),
            expected: expected.into(),
            got: got.into(),
        }
    }

    /// `true` for errors raised before the raw callable ever ran.
    #[must_use]
    pub fn is_argument_error(&self) -> bool {
        matches!(
            self,
            Self::MissingArgument { .. } | Self::TypeMismatch { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn failed_display() {
        let err = ToolError::failed("division by zero");
        assert_eq!(err.to_string(), "division by zero");
        assert!(!err.is_argument_error());
    }

    #[test]
    fn missing_argument_is_argument_error() {
        let err = ToolError::missing_argument("b");
        assert!(err.is_argument_error());
        assert_eq!(err.to_string(), "missing required argument `b`");
    }

    #[test]
    fn type_mismatch_display() {
        let err = ToolError::type_mismatch("a", "number", "string");
        assert!(err.is_argument_error());
        assert_eq!(
            err.to_string(),
            "argument `a` has wrong type: expected number, got string"
        );
    }

    #[test]
    fn unknown_tool_is_not_argument_error() {
        let err = ToolError::UnknownTool("frobnicate".into());
        assert!(!err.is_argument_error());
    }
}
