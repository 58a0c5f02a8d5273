//! # toolagent-executor
//!
//! The step-wise execution service: `start`/`continue`/`cancel` over a
//! single agent's registry, running tools and workflows inside a
//! [`Sandbox`](toolagent_sandbox::Sandbox).
//!
//! Tool execution is always single-shot — no kernel is ever allocated for
//! it. Workflow execution started with `step_by_step` allocates a
//! [`KernelId`] and records the session in an in-memory map so a later
//! `continue` call can resume the same cursor; without `step_by_step` the
//! workflow is drained to completion in one call.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod session;

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use dashmap::DashMap;
use rand::Rng;
use serde_json::Value;
use toolagent_core::KernelId;
use toolagent_registry::AgentRegistry;
use toolagent_result::AgentResult;
use toolagent_sandbox::Sandbox;
use toolagent_tool::{ToolArgs, ToolError};
use toolagent_workflow::DrainOutcome;

pub use error::ExecutorError;
use session::{Identity, KernelSession};

/// Which member kind `start` is being asked to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    /// A single leaf tool.
    Tool,
    /// A multi-step workflow.
    Workflow,
}

/// A `start` or `continue` request, reduced to what matters for dispatch
/// and continuation validation.
#[derive(Debug, Clone)]
pub struct StartRequest {
    /// Name of the module the agent class would be loaded from. Carried
    /// for continuation-identity purposes only; this executor runs
    /// already-linked Rust code, so no module is actually loaded.
    pub module: String,
    /// Name the agent instance is bound to.
    pub agent_var: String,
    /// Whether `method_name` names a tool or a workflow.
    pub method_kind: MethodKind,
    /// Name of the tool or workflow to run.
    pub method_name: String,
    /// Positional arguments.
    pub args: Vec<Value>,
    /// Keyword arguments.
    pub kwargs: BTreeMap<String, Value>,
    /// If `true` and `method_kind` is `Workflow`, only the first element is
    /// pulled and a kernel is retained for later `continue` calls. Ignored
    /// for tools, which are always single-shot.
    pub step_by_step: bool,
}

/// What one `start` or `continue` call hands back.
#[derive(Debug, Clone)]
pub struct StepResponse {
    /// The result produced by this call — a tool's unwrapped outcome, one
    /// workflow yield, or (for a non-stepwise drain) the workflow's final
    /// outcome.
    pub result: AgentResult<Value, ToolError>,
    /// `Some` iff a kernel remains active and a further `continue` call
    /// would advance it; `None` if this call's result is terminal.
    pub kernel_id: Option<KernelId>,
}

/// Runs one agent's tools and workflows inside a [`Sandbox`], tracking
/// active kernel sessions.
pub struct Executor {
    registry: Arc<AgentRegistry>,
    sandbox: Arc<dyn Sandbox>,
    kernels: DashMap<KernelId, KernelSession>,
    counter: AtomicU32,
}

impl Executor {
    /// Build an executor over `registry`, dispatching into `sandbox`.
    #[must_use]
    pub fn new(registry: Arc<AgentRegistry>, sandbox: Arc<dyn Sandbox>) -> Self {
        Self {
            registry,
            sandbox,
            kernels: DashMap::new(),
            counter: AtomicU32::new(0),
        }
    }

    /// Number of kernels currently active. Exposed for the lifecycle
    /// invariant that every started kernel is eventually removed.
    #[must_use]
    pub fn active_kernel_count(&self) -> usize {
        self.kernels.len()
    }

    fn next_kernel_id(&self) -> KernelId {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) % 100;
        let mut rng = rand::rng();
        let suffix: String = (0..3)
            .map(|_| char::from(rng.random_range(b'a'..=b'z')))
            .collect();
        KernelId::new(format!("k{n:02}{suffix}"))
    }

    /// Begin running `req.method_name`.
    pub async fn start(&self, req: StartRequest) -> Result<StepResponse, ExecutorError> {
        self.sandbox.boot().await?;

        match req.method_kind {
            MethodKind::Tool => self.start_tool(&req).await,
            MethodKind::Workflow => self.start_workflow(req).await,
        }
    }

    async fn start_tool(&self, req: &StartRequest) -> Result<StepResponse, ExecutorError> {
        let tools = self.registry.tools();
        let tool = tools
            .get(&req.method_name)
            .ok_or_else(|| ExecutorError::NotFound(req.method_name.clone()))?
            .clone();
        let args = ToolArgs {
            positional: req.args.clone(),
            named: req.kwargs.clone(),
        };
        let result = self.sandbox.run_tool(tool, args).await?;
        Ok(StepResponse {
            result,
            kernel_id: None,
        })
    }

    async fn start_workflow(&self, req: StartRequest) -> Result<StepResponse, ExecutorError> {
        let workflow = self
            .registry
            .workflow(&req.method_name)
            .ok_or_else(|| ExecutorError::NotFound(req.method_name.clone()))?;
        let inputs = bind_inputs(&workflow.params, &req.args, &req.kwargs);
        let tools = self.registry.tools();
        let mut cursor = self
            .sandbox
            .start_workflow(Arc::new(workflow.steps), tools, inputs)
            .await?;

        if req.step_by_step {
            match cursor.next().await {
                None => Ok(StepResponse {
                    result: AgentResult::ok(Value::Array(Vec::new())),
                    kernel_id: None,
                }),
                Some(result) => {
                    if result.is_err() || cursor.is_done() {
                        return Ok(StepResponse {
                            result,
                            kernel_id: None,
                        });
                    }
                    let kernel_id = self.next_kernel_id();
                    self.kernels.insert(
                        kernel_id.clone(),
                        KernelSession {
                            identity: Identity {
                                module: req.module,
                                agent_var: req.agent_var,
                                method_name: req.method_name,
                                args: req.args,
                                kwargs: req.kwargs,
                            },
                            cursor,
                        },
                    );
                    Ok(StepResponse {
                        result,
                        kernel_id: Some(kernel_id),
                    })
                }
            }
        } else {
            let result = match toolagent_workflow::runner::drain(cursor).await {
                DrainOutcome::Value(outcome) => ok_from_outcome(outcome),
                DrainOutcome::Err(err) => err,
                DrainOutcome::NoYields => AgentResult::ok(Value::Array(Vec::new())),
            };
            Ok(StepResponse {
                result,
                kernel_id: None,
            })
        }
    }

    /// Resume `kernel_id`, re-asserting the same `(method, args, kwargs)`
    /// tuple `start` was called with.
    pub async fn r#continue(
        &self,
        kernel_id: &KernelId,
        reasserted: &StartRequest,
    ) -> Result<StepResponse, ExecutorError> {
        // Taken out of the map (rather than held via a guard) so the cursor
        // can be driven across an `.await` without keeping a shard locked.
        let mut session = self
            .kernels
            .remove(kernel_id)
            .map(|(_, s)| s)
            .ok_or_else(|| ExecutorError::KernelNotFound(kernel_id.clone()))?;

        if session.identity.method_name != reasserted.method_name
            || session.identity.args != reasserted.args
            || session.identity.kwargs != reasserted.kwargs
        {
            self.kernels.insert(kernel_id.clone(), session);
            return Err(ExecutorError::ParameterMismatch(kernel_id.clone()));
        }

        match session.cursor.next().await {
            None => Ok(StepResponse {
                result: AgentResult::ok(Value::Array(Vec::new())),
                kernel_id: None,
            }),
            Some(result) => {
                if result.is_err() || session.cursor.is_done() {
                    Ok(StepResponse {
                        result,
                        kernel_id: None,
                    })
                } else {
                    self.kernels.insert(kernel_id.clone(), session);
                    Ok(StepResponse {
                        result,
                        kernel_id: Some(kernel_id.clone()),
                    })
                }
            }
        }
    }

    /// Drop `kernel_id`'s session. Errors if no such kernel is active; the
    /// sandbox interpreter itself is left running either way.
    pub fn cancel(&self, kernel_id: &KernelId) -> Result<(), ExecutorError> {
        self.kernels
            .remove(kernel_id)
            .map(|_| ())
            .ok_or_else(|| ExecutorError::KernelNotFound(kernel_id.clone()))
    }
}

fn bind_inputs(
    params: &[String],
    args: &[Value],
    kwargs: &BTreeMap<String, Value>,
) -> HashMap<String, Value> {
    let mut inputs: HashMap<String, Value> = params
        .iter()
        .zip(args.iter())
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect();
    for (name, value) in kwargs {
        inputs.insert(name.clone(), value.clone());
    }
    inputs
}

fn ok_from_outcome(outcome: toolagent_result::Outcome<Value>) -> AgentResult<Value, ToolError> {
    match outcome {
        toolagent_result::Outcome::Single(v) => AgentResult::ok(v),
        toolagent_result::Outcome::Combined(values) => values
            .into_iter()
            .map(AgentResult::ok)
            .reduce(AgentResult::combine)
            .unwrap_or_else(|| AgentResult::ok(Value::Array(Vec::new()))),
    }
}
