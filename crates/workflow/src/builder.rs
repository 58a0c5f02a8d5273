//! Fluent construction of a [`WorkflowDescriptor`].

use crate::descriptor::WorkflowDescriptor;
use crate::step::{Arg, CallExpr, ReturnExpr, Step, StepExpr};

/// Builds a [`WorkflowDescriptor`] one statement at a time, in source order.
///
/// This is the explicit builder API the spec's design notes recommend as
/// the most portable way to reproduce source-level rewriting without a
/// language-specific parser: callers describe the workflow's shape
/// directly, instead of writing a function body this crate would have to
/// parse back out again.
///
/// ```
/// use toolagent_workflow::{Arg, CallExpr, WorkflowBuilder};
///
/// // s = self.add(1, 2); return self.multiply(s, 3)
/// let workflow = WorkflowBuilder::new("calculate", "add then multiply")
///     .call("s", CallExpr::new("add", [Arg::lit(1.0), Arg::lit(2.0)]))
///     .return_call(CallExpr::new("multiply", [Arg::var("s"), Arg::lit(3.0)]))
///     .build();
///
/// assert_eq!(workflow.steps.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct WorkflowBuilder {
    name: String,
    description: String,
    params: Vec<String>,
    steps: Vec<Step>,
}

impl WorkflowBuilder {
    /// Start a new workflow with the given name and first docstring line.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            params: Vec::new(),
            steps: Vec::new(),
        }
    }

    /// Declare a formal parameter, bound from `start`'s positional `args`
    /// before the first step runs.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>) -> Self {
        self.params.push(name.into());
        self
    }

    /// Append `var = self.tool(args)`.
    #[must_use]
    pub fn call(mut self, var: impl Into<String>, call: CallExpr) -> Self {
        self.steps.push(Step::call(var, call));
        self
    }

    /// Append `var = left | right`.
    #[must_use]
    pub fn combine(mut self, var: impl Into<String>, left: Arg, right: Arg) -> Self {
        self.steps.push(Step::combine(var, left, right));
        self
    }

    /// Append a bare `self.tool(args)` expression statement whose result is
    /// discarded. Still becomes a node in the dataflow graph.
    #[must_use]
    pub fn expr(mut self, call: CallExpr) -> Self {
        self.steps.push(Step::Expr(call));
        self
    }

    /// Append an arbitrary step, for callers building steps programmatically.
    #[must_use]
    pub fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    /// Terminate the workflow with `return self.tool(args)`.
    #[must_use]
    pub fn return_call(mut self, call: CallExpr) -> Self {
        self.steps.push(Step::Return(ReturnExpr::Call(call)));
        self
    }

    /// Terminate the workflow with `return left | right`.
    #[must_use]
    pub fn return_combine(mut self, left: Arg, right: Arg) -> Self {
        self.steps
            .push(Step::Return(ReturnExpr::Combine { left, right }));
        self
    }

    /// Terminate the workflow with `return <var>`.
    #[must_use]
    pub fn return_var(mut self, var: impl Into<String>) -> Self {
        self.steps.push(Step::Return(ReturnExpr::Var(var.into())));
        self
    }

    /// Finish building, producing the stored workflow source.
    #[must_use]
    pub fn build(self) -> WorkflowDescriptor {
        WorkflowDescriptor {
            name: self.name,
            description: self.description,
            params: self.params,
            steps: self.steps,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn builds_calculator_workflow() {
        let workflow = WorkflowBuilder::new("calculate", "add then multiply")
            .call("s", CallExpr::new("add", [Arg::lit(1.0), Arg::lit(2.0)]))
            .return_call(CallExpr::new("multiply", [Arg::var("s"), Arg::lit(3.0)]))
            .build();

        assert_eq!(workflow.name, "calculate");
        assert_eq!(workflow.steps.len(), 2);
    }
}
