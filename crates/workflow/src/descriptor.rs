//! The stored workflow descriptor: name, docstring, and source (as steps).

use crate::step::Step;

/// Name, docstring, and stored step sequence of one workflow.
///
/// Lifetime equals the lifetime of the owning agent. The step sequence is
/// the Rust analogue of "original source text, decorator lines stripped,
/// indentation normalised" — kept around so [`crate::deserializer`] can
/// replace it wholesale after a graph edit without needing to re-derive it
/// from anything else.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowDescriptor {
    /// The workflow's name, used as its key in the agent's workflow
    /// registry.
    pub name: String,
    /// First line of the workflow's documentation.
    pub description: String,
    /// Formal parameter names, in call order — the Rust analogue of a
    /// workflow method's signature besides `self`. `start`'s positional
    /// `args` bind to these names before the first step runs.
    pub params: Vec<String>,
    /// The stored, executable step sequence.
    pub steps: Vec<Step>,
}
