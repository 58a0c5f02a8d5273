//! The workflow builder DSL.
//!
//! A workflow's "source" is not parsed from text — it's assembled by
//! calling [`WorkflowBuilder`] methods directly, the most portable of the
//! three rewriting strategies available to a non-Python host: a builder API
//! the caller invokes explicitly. What the reference implementation gets by
//! parsing Python source, this gets for free as already-structured data;
//! the dataflow graph in [`crate::graph`] is extracted straight from it, no
//! AST walk required.

use serde_json::Value;

/// One argument to a tool call or combine expression: either a variable
/// bound by an earlier step, or a literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// A literal value — can never be in an error state, so it is never a
    /// source of short-circuiting.
    Literal(Value),
    /// A reference to a variable bound by an earlier [`Step::Assign`].
    Var(String),
}

impl Arg {
    /// A literal argument.
    pub fn lit(value: impl Into<Value>) -> Self {
        Self::Literal(value.into())
    }

    /// A reference to a previously-bound variable.
    pub fn var(name: impl Into<String>) -> Self {
        Self::Var(name.into())
    }

    /// `true` for [`Arg::Literal`] — mirrors the reference implementation's
    /// quote-surrounded-name heuristic, but as an explicit flag rather than
    /// a string convention (see the workspace's literal-port design note).
    #[must_use]
    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }
}

/// A direct call to one of the agent's own tools: `self.<tool>(<args>)`.
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    /// Name of the tool being called. Must exist in the agent's tool set.
    pub tool: String,
    /// Positional arguments, in call order.
    pub args: Vec<Arg>,
}

impl CallExpr {
    /// Build a call expression.
    pub fn new(tool: impl Into<String>, args: impl IntoIterator<Item = Arg>) -> Self {
        Self {
            tool: tool.into(),
            args: args.into_iter().collect(),
        }
    }
}

/// The right-hand side of an assignment step: either a tool call or a
/// combine (`|`) expression.
#[derive(Debug, Clone, PartialEq)]
pub enum StepExpr {
    /// `x = self.tool(args)`
    Call(CallExpr),
    /// `x = a | b`
    Combine { left: Arg, right: Arg },
}

/// The expression a workflow's `return` statement returns.
#[derive(Debug, Clone, PartialEq)]
pub enum ReturnExpr {
    /// `return self.tool(args)` — yields once more before returning.
    Call(CallExpr),
    /// `return a | b` — per the spec this generation of the transformer
    /// does not wrap combine-returns in an extra yield (unlike tool-call
    /// returns), so this variant is silent at run time.
    Combine { left: Arg, right: Arg },
    /// `return x` — a bare variable reference, not a call; never yields.
    Var(String),
}

/// One statement in a workflow body.
///
/// The workflow AST transformer (here: the execution cursor in
/// [`crate::runner`]) inserts a suspension point after every
/// [`Step::Assign`] regardless of whether its expression is a call or a
/// combine, and after the call in a [`Step::Return`] whose expression is a
/// [`ReturnExpr::Call`] — but *not* after a bare [`Step::Expr`] call, and
/// not for a combine or variable return. All other step shapes execute
/// silently.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// `x = self.tool(args)` or `x = a | b` — binds `var`, always yields.
    Assign { var: String, expr: StepExpr },
    /// `self.tool(args)` with its result discarded — still a node in the
    /// dataflow graph, but (per the reference transformer) does not yield.
    Expr(CallExpr),
    /// The workflow's terminal statement.
    Return(ReturnExpr),
}

impl Step {
    /// Convenience constructor for `var = self.tool(args)`.
    pub fn call(var: impl Into<String>, call: CallExpr) -> Self {
        Self::Assign {
            var: var.into(),
            expr: StepExpr::Call(call),
        }
    }

    /// Convenience constructor for `var = left | right`.
    pub fn combine(var: impl Into<String>, left: Arg, right: Arg) -> Self {
        Self::Assign {
            var: var.into(),
            expr: StepExpr::Combine { left, right },
        }
    }
}
