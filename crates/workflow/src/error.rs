//! Errors raised while building, serializing, or rebuilding a workflow.

/// Errors from the graph ⇄ workflow round trip.
#[derive(Debug, Clone, thiserror::Error)]
#[non_exhaustive]
pub enum WorkflowError {
    /// A graph submitted to [`crate::deserializer::rebuild`] named one or
    /// more tools the owning agent does not have.
    #[error("The following tools are not available: {}", .0.join(", "))]
    Deserialization(Vec<String>),

    /// `update_workflow_from_graph` (or an equivalent lookup) was asked
    /// for a workflow name the agent's registry does not contain.
    #[error("unrecognised workflow `{0}`")]
    UnrecognisedWorkflow(String),

    /// The submitted graph contains a cycle.
    #[error("workflow graph contains a cycle")]
    Cyclic,

    /// An edge referenced a port id that does not exist in the graph.
    #[error("dangling edge: {0} has no matching port")]
    DanglingEdge(String),

    /// A non-literal input port was neither targeted by an edge nor bound
    /// to a variable visible earlier in dependency order.
    #[error("input port `{0}` is unbound: no producing edge and no earlier binding")]
    UnboundInput(String),

    /// Graph JSON failed to parse.
    #[error("malformed workflow graph: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl WorkflowError {
    /// Build a [`WorkflowError::Deserialization`] naming the missing tools,
    /// matching the reference implementation's error text exactly.
    pub fn unavailable_tools(names: impl IntoIterator<Item = String>) -> Self {
        Self::Deserialization(names.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn deserialization_error_message_matches_reference_format() {
        let err = WorkflowError::unavailable_tools(["does_not_exist".to_string()]);
        assert_eq!(
            err.to_string(),
            "The following tools are not available: does_not_exist"
        );
    }

    #[test]
    fn unrecognised_workflow_display() {
        let err = WorkflowError::UnrecognisedWorkflow("ghost".to_string());
        assert_eq!(err.to_string(), "unrecognised workflow `ghost`");
    }
}
