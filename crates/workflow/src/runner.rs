//! Executes a workflow's stored steps one suspension point at a time.
//!
//! This is the Rust shape of the reference implementation's generator:
//! rather than a `futures::Stream`, [`WorkflowCursor`] exposes a plain
//! async `next`, because that is all the step-wise executor ever needs —
//! "give me the next intermediate result". [`crate::step`] documents which
//! steps yield and which run silently; this module is the interpreter that
//! honours those rules.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use toolagent_result::AgentResult;
use toolagent_tool::{ResultArg, ToolError, ToolRegistry, invoke};

use crate::step::{Arg, CallExpr, ReturnExpr, Step, StepExpr};

/// The uniform result every suspension point in a workflow produces.
pub type StepResult = AgentResult<Value, ToolError>;

/// A suspended, resumable run of one workflow's stored steps.
///
/// Owns `Arc`-shared copies of its steps and the agent's tool registry so
/// it can be moved into a kernel session and driven across separate
/// `continue` calls without borrowing from the registry that created it —
/// the registry is free to have its workflow edited (and the backing steps
/// replaced) while an already-started cursor keeps running the version it
/// was handed.
pub struct WorkflowCursor {
    steps: Arc<Vec<Step>>,
    tools: Arc<ToolRegistry>,
    vars: HashMap<String, StepResult>,
    pos: usize,
    done: bool,
}

impl WorkflowCursor {
    /// Start a new run, binding `inputs` (the workflow's positional `args`
    /// zipped against its declared parameter names by the caller) as
    /// already-ok variables visible to the first step.
    #[must_use]
    pub fn new(
        steps: Arc<Vec<Step>>,
        tools: Arc<ToolRegistry>,
        inputs: HashMap<String, Value>,
    ) -> Self {
        let vars = inputs
            .into_iter()
            .map(|(name, value)| (name, AgentResult::ok(value)))
            .collect();
        Self {
            steps,
            tools,
            vars,
            pos: 0,
            done: false,
        }
    }

    fn resolve(&self, arg: &Arg) -> StepResult {
        match arg {
            Arg::Literal(value) => AgentResult::ok(value.clone()),
            Arg::Var(name) => self.vars.get(name).cloned().unwrap_or_else(|| {
                AgentResult::err(ToolError::failed(format!("unbound variable `{name}`")))
            }),
        }
    }

    fn resolve_arg(&self, arg: &Arg) -> ResultArg {
        match arg {
            Arg::Literal(value) => ResultArg::Value(value.clone()),
            Arg::Var(_) => ResultArg::Result(self.resolve(arg)),
        }
    }

    async fn call(&self, call: &CallExpr) -> StepResult {
        let Some(tool) = self.tools.get(&call.tool) else {
            return AgentResult::err(ToolError::UnknownTool(call.tool.clone()));
        };
        let positional = call.args.iter().map(|a| self.resolve_arg(a)).collect();
        invoke(tool.as_ref(), positional, Vec::new()).await
    }

    /// Pull the next intermediate result, or `None` once the workflow body
    /// is exhausted — including once a non-yielding `return` (a combine
    /// expression or a bare variable) has been reached.
    pub async fn next(&mut self) -> Option<StepResult> {
        while self.pos < self.steps.len() && !self.done {
            let step = &self.steps[self.pos];
            self.pos += 1;

            match step {
                Step::Assign {
                    var,
                    expr: StepExpr::Call(call),
                } => {
                    let result = self.call(call).await;
                    self.vars.insert(var.clone(), result.clone());
                    return Some(result);
                }
                Step::Assign {
                    var,
                    expr: StepExpr::Combine { left, right },
                } => {
                    let combined = self.resolve(left).combine(self.resolve(right));
                    self.vars.insert(var.clone(), combined.clone());
                    return Some(combined);
                }
                Step::Expr(call) => {
                    // Bare expression: runs for effect, result discarded,
                    // never yields.
                    let _ = self.call(call).await;
                }
                Step::Return(ReturnExpr::Call(call)) => {
                    let result = self.call(call).await;
                    self.done = true;
                    return Some(result);
                }
                Step::Return(ReturnExpr::Combine { left, right }) => {
                    // Per the open question this spec resolves in favour of
                    // the more recent transformer behaviour: combine
                    // returns are silent, unlike tool-call returns.
                    let _ = self.resolve(left).combine(self.resolve(right));
                    self.done = true;
                }
                Step::Return(ReturnExpr::Var(_)) => {
                    self.done = true;
                }
            }
        }
        self.done = true;
        None
    }

    /// `true` iff a subsequent call to [`next`](Self::next) is guaranteed
    /// to return `None`.
    ///
    /// This is a best-effort peek, not a full lookahead: it is precise
    /// whenever the most recently yielded step was the workflow's last
    /// step, or a tool-call return (which always marks itself done). A
    /// trailing non-yielding step (a combine or bare-variable return after
    /// the last yielding step) is only discovered on the next `next()`
    /// call, which then yields `None` as usual.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.done || self.pos >= self.steps.len()
    }
}

/// What draining a workflow to completion (the non-step-wise execution
/// path) settles on.
#[derive(Debug, Clone)]
pub enum DrainOutcome {
    /// The workflow ran to completion without error. Carries the last
    /// yielded ok [`StepResult`]'s outcome — `Single` for a plain tool
    /// call, `Combined` if the final yield was a combine.
    Value(toolagent_result::Outcome<Value>),
    /// The first err result encountered. Matches the reference
    /// implementation's executor, which stops draining (via an early
    /// process exit) the instant an err is observed rather than
    /// continuing to pull further elements.
    Err(StepResult),
    /// The workflow never yielded anything at all.
    NoYields,
}

/// Drain `cursor` to completion or to the first error, whichever comes
/// first.
pub async fn drain(mut cursor: WorkflowCursor) -> DrainOutcome {
    let mut last_ok: Option<StepResult> = None;
    while let Some(result) = cursor.next().await {
        if result.is_err() {
            return DrainOutcome::Err(result);
        }
        last_ok = Some(result);
    }
    match last_ok {
        Some(result) => DrainOutcome::Value(
            result
                .unwrap(),
        ),
        None => DrainOutcome::NoYields,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::builder::WorkflowBuilder;
    use async_trait::async_trait;
    use toolagent_tool::{Tool, ToolArgs, ToolDescriptor};

    struct Add;
    struct Multiply;
    struct AlwaysFails;

    #[async_trait]
    impl Tool for Add {
        fn descriptor(&self) -> &ToolDescriptor {
            static D: std::sync::OnceLock<ToolDescriptor> = std::sync::OnceLock::new();
            D.get_or_init(|| {
                ToolDescriptor::new("add", "Add two numbers")
                    .with_param("a", "f64")
                    .with_param("b", "f64")
            })
        }
        async fn call(&self, args: ToolArgs) -> Result<Value, ToolError> {
            let a = args.get(0, "a").and_then(Value::as_f64).unwrap_or(0.0);
            let b = args.get(1, "b").and_then(Value::as_f64).unwrap_or(0.0);
            Ok(Value::from(a + b))
        }
    }

    #[async_trait]
    impl Tool for Multiply {
        fn descriptor(&self) -> &ToolDescriptor {
            static D: std::sync::OnceLock<ToolDescriptor> = std::sync::OnceLock::new();
            D.get_or_init(|| {
                ToolDescriptor::new("multiply", "Multiply two numbers")
                    .with_param("a", "f64")
                    .with_param("b", "f64")
            })
        }
        async fn call(&self, args: ToolArgs) -> Result<Value, ToolError> {
            let a = args.get(0, "a").and_then(Value::as_f64).unwrap_or(0.0);
            let b = args.get(1, "b").and_then(Value::as_f64).unwrap_or(0.0);
            Ok(Value::from(a * b))
        }
    }

    #[async_trait]
    impl Tool for AlwaysFails {
        fn descriptor(&self) -> &ToolDescriptor {
            static D: std::sync::OnceLock<ToolDescriptor> = std::sync::OnceLock::new();
            D.get_or_init(|| ToolDescriptor::new("fail", "Always fails"))
        }
        async fn call(&self, _args: ToolArgs) -> Result<Value, ToolError> {
            Err(ToolError::failed("boom"))
        }
    }

    fn calculator_registry() -> Arc<ToolRegistry> {
        let mut reg = ToolRegistry::new();
        reg.register(Arc::new(Add));
        reg.register(Arc::new(Multiply));
        reg.register(Arc::new(AlwaysFails));
        Arc::new(reg)
    }

    #[tokio::test]
    async fn calculator_yields_add_then_multiply_then_exhausts() {
        // s = self.add(1, 2); return self.multiply(s, 3)
        let workflow = WorkflowBuilder::new("calculate", "add then multiply")
            .call("s", CallExpr::new("add", [Arg::lit(1.0), Arg::lit(2.0)]))
            .return_call(CallExpr::new("multiply", [Arg::var("s"), Arg::lit(3.0)]))
            .build();

        let mut cursor = WorkflowCursor::new(
            Arc::new(workflow.steps),
            calculator_registry(),
            HashMap::new(),
        );

        let first = cursor.next().await.unwrap();
        assert_eq!(first.values(), &[Value::from(3.0)]);
        assert!(!cursor.is_done());

        let second = cursor.next().await.unwrap();
        assert_eq!(second.values(), &[Value::from(9.0)]);
        assert!(cursor.is_done());

        assert!(cursor.next().await.is_none());
    }

    #[tokio::test]
    async fn drain_returns_final_value() {
        let workflow = WorkflowBuilder::new("calculate", "")
            .call("s", CallExpr::new("add", [Arg::lit(1.0), Arg::lit(2.0)]))
            .return_call(CallExpr::new("multiply", [Arg::var("s"), Arg::lit(3.0)]))
            .build();

        let cursor = WorkflowCursor::new(
            Arc::new(workflow.steps),
            calculator_registry(),
            HashMap::new(),
        );

        match drain(cursor).await {
            DrainOutcome::Value(toolagent_result::Outcome::Single(v)) => {
                assert_eq!(v, Value::from(9.0));
            }
            other => panic!("expected Value(Single(9.0)), got {other:?}"),
        }
    }

    #[tokio::test]
    async fn err_argument_short_circuits_downstream_tool() {
        // cat(fail(), "t") must not invoke the raw multiply body.
        let workflow = WorkflowBuilder::new("broken", "")
            .call("bad", CallExpr::new("fail", []))
            .return_call(CallExpr::new("multiply", [Arg::var("bad"), Arg::lit(3.0)]))
            .build();

        let cursor = WorkflowCursor::new(
            Arc::new(workflow.steps),
            calculator_registry(),
            HashMap::new(),
        );

        match drain(cursor).await {
            DrainOutcome::Err(err) => assert_eq!(err.errors().len(), 1),
            other => panic!("expected Err, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn bare_expression_runs_but_does_not_yield() {
        let workflow = WorkflowBuilder::new("with_bare", "")
            .expr(CallExpr::new("add", [Arg::lit(1.0), Arg::lit(1.0)]))
            .return_call(CallExpr::new("multiply", [Arg::lit(2.0), Arg::lit(2.0)]))
            .build();

        let mut cursor = WorkflowCursor::new(
            Arc::new(workflow.steps),
            calculator_registry(),
            HashMap::new(),
        );

        let only = cursor.next().await.unwrap();
        assert_eq!(only.values(), &[Value::from(4.0)]);
        assert!(cursor.next().await.is_none());
    }

    #[tokio::test]
    async fn combine_return_is_silent_but_still_resolves() {
        let workflow = WorkflowBuilder::new("combine_return", "")
            .call("a", CallExpr::new("add", [Arg::lit(1.0), Arg::lit(1.0)]))
            .call("b", CallExpr::new("add", [Arg::lit(2.0), Arg::lit(2.0)]))
            .return_combine(Arg::var("a"), Arg::var("b"))
            .build();

        let mut cursor = WorkflowCursor::new(
            Arc::new(workflow.steps),
            calculator_registry(),
            HashMap::new(),
        );

        let first = cursor.next().await.unwrap();
        assert_eq!(first.values(), &[Value::from(2.0)]);
        let second = cursor.next().await.unwrap();
        assert_eq!(second.values(), &[Value::from(4.0)]);
        // The combine-return itself never yields.
        assert!(cursor.next().await.is_none());
    }

    #[tokio::test]
    async fn inputs_bind_declared_parameters() {
        let workflow = WorkflowBuilder::new("scaled", "")
            .param("x")
            .return_call(CallExpr::new("multiply", [Arg::var("x"), Arg::lit(10.0)]))
            .build();

        let mut inputs = HashMap::new();
        inputs.insert("x".to_string(), Value::from(4.0));

        let mut cursor =
            WorkflowCursor::new(Arc::new(workflow.steps), calculator_registry(), inputs);

        let result = cursor.next().await.unwrap();
        assert_eq!(result.values(), &[Value::from(40.0)]);
    }
}
