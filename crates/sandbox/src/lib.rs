//! # toolagent-sandbox
//!
//! The isolation boundary the step-wise executor runs agent code inside.
//!
//! The design notes this workspace follows single out three shapes for
//! this boundary — a subprocess interpreter, an ephemeral container per
//! session, or an embedded sandbox living in the same process — and leave
//! the choice to the implementer, since the only contract that matters
//! upstream is "a `kernel_id` identifies a resumable suspended workflow".
//! [`InProcessSandbox`] is the embedded-sandbox choice: agent code being a
//! first-party Rust crate rather than dynamically loaded, there is no
//! foreign code here to fence off with OS-level primitives, only a boot
//! lifecycle and a serialized "one message in flight" execution discipline
//! to preserve.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;
use toolagent_result::AgentResult;
use toolagent_tool::{Tool, ToolArgs, ToolError, ToolRegistry, invoke};
use toolagent_workflow::{Step, WorkflowCursor};

pub use error::SandboxError;

/// The interpreter boundary a tool call or a workflow cursor runs inside.
///
/// Every method is async and takes `&self` (not `&mut self`): the
/// concurrency model calls for one executor actor serializing access, not
/// for the sandbox itself to hand out exclusive borrows. [`boot`](Self::boot)
/// is idempotent and must be called (directly or by the first
/// [`run_tool`](Self::run_tool)/[`start_workflow`](Self::start_workflow)
/// call) before either runs.
#[async_trait]
pub trait Sandbox: Send + Sync {
    /// Bring the interpreter up if it isn't already. Idempotent; a failed
    /// boot leaves the sandbox in the same not-booted state so a caller can
    /// retry.
    async fn boot(&self) -> Result<(), SandboxError>;

    /// `true` iff [`boot`](Self::boot) has succeeded and
    /// [`shutdown`](Self::shutdown) has not since been called.
    fn is_alive(&self) -> bool;

    /// Run one tool call to completion, single-shot — no kernel is
    /// allocated, matching the executor's tool-call contract.
    async fn run_tool(
        &self,
        tool: Arc<dyn Tool>,
        args: ToolArgs,
    ) -> Result<AgentResult<Value, ToolError>, SandboxError>;

    /// Start a workflow cursor inside the sandbox, bound to `inputs`.
    async fn start_workflow(
        &self,
        steps: Arc<Vec<Step>>,
        tools: Arc<ToolRegistry>,
        inputs: HashMap<String, Value>,
    ) -> Result<WorkflowCursor, SandboxError>;

    /// Tear the interpreter down. Idempotent; does not affect any already
    /// in-flight [`WorkflowCursor`], which owns its own state independent
    /// of the sandbox that started it.
    async fn shutdown(&self);
}

/// The embedded, same-process sandbox: no subprocess, no container, no
/// dynamic module loading — agent tools and workflows are ordinary Rust
/// values already linked into this binary. What it still models faithfully
/// is the *lifecycle*: lazy boot, a liveness flag the executor checks
/// before dispatching, and a single in-flight message at a time, enforced
/// with a `tokio::sync::Mutex` rather than relying on the caller to
/// serialize access itself.
pub struct InProcessSandbox {
    alive: AtomicBool,
    inflight: Mutex<()>,
}

impl InProcessSandbox {
    /// Construct a sandbox that has not yet booted.
    #[must_use]
    pub fn new() -> Self {
        Self {
            alive: AtomicBool::new(false),
            inflight: Mutex::new(()),
        }
    }
}

impl Default for InProcessSandbox {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Sandbox for InProcessSandbox {
    async fn boot(&self) -> Result<(), SandboxError> {
        if self.alive.load(Ordering::Acquire) {
            return Ok(());
        }
        self.alive.store(true, Ordering::Release);
        tracing::info!("in-process sandbox booted");
        Ok(())
    }

    fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    async fn run_tool(
        &self,
        tool: Arc<dyn Tool>,
        args: ToolArgs,
    ) -> Result<AgentResult<Value, ToolError>, SandboxError> {
        if !self.is_alive() {
            return Err(SandboxError::NotAlive);
        }
        let _permit = self.inflight.lock().await;
        let positional = args
            .positional
            .into_iter()
            .map(toolagent_tool::ResultArg::Value)
            .collect();
        let named = args
            .named
            .into_iter()
            .map(|(k, v)| (k, toolagent_tool::ResultArg::Value(v)))
            .collect();
        Ok(invoke(tool.as_ref(), positional, named).await)
    }

    async fn start_workflow(
        &self,
        steps: Arc<Vec<Step>>,
        tools: Arc<ToolRegistry>,
        inputs: HashMap<String, Value>,
    ) -> Result<WorkflowCursor, SandboxError> {
        if !self.is_alive() {
            return Err(SandboxError::NotAlive);
        }
        Ok(WorkflowCursor::new(steps, tools, inputs))
    }

    async fn shutdown(&self) {
        self.alive.store(false, Ordering::Release);
        tracing::info!("in-process sandbox shut down");
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use toolagent_tool::ToolDescriptor;

    use super::*;

    struct Echo;

    #[async_trait]
    impl Tool for Echo {
        fn descriptor(&self) -> &ToolDescriptor {
            static D: std::sync::OnceLock<ToolDescriptor> = std::sync::OnceLock::new();
            D.get_or_init(|| ToolDescriptor::new("echo", "Echoes its argument").with_param("x", "any"))
        }
        async fn call(&self, args: ToolArgs) -> Result<Value, ToolError> {
            Ok(args.get(0, "x").cloned().unwrap_or(Value::Null))
        }
    }

    #[tokio::test]
    async fn run_tool_fails_before_boot() {
        let sandbox = InProcessSandbox::new();
        let err = sandbox
            .run_tool(Arc::new(Echo), ToolArgs::positional([Value::from(1)]))
            .await
            .unwrap_err();
        assert!(matches!(err, SandboxError::NotAlive));
    }

    #[tokio::test]
    async fn boot_is_idempotent_and_enables_calls() {
        let sandbox = InProcessSandbox::new();
        sandbox.boot().await.unwrap();
        sandbox.boot().await.unwrap();
        assert!(sandbox.is_alive());

        let result = sandbox
            .run_tool(Arc::new(Echo), ToolArgs::positional([Value::from(42)]))
            .await
            .unwrap();
        assert_eq!(result.values(), &[Value::from(42)]);
    }

    #[tokio::test]
    async fn shutdown_then_run_tool_fails_again() {
        let sandbox = InProcessSandbox::new();
        sandbox.boot().await.unwrap();
        sandbox.shutdown().await;
        assert!(!sandbox.is_alive());
        let err = sandbox
            .run_tool(Arc::new(Echo), ToolArgs::default())
            .await
            .unwrap_err();
        assert!(matches!(err, SandboxError::NotAlive));
    }

    #[tokio::test]
    async fn start_workflow_requires_boot() {
        let sandbox = InProcessSandbox::new();
        let err = sandbox
            .start_workflow(Arc::new(Vec::new()), Arc::new(ToolRegistry::new()), HashMap::new())
            .await
            .unwrap_err();
        assert!(matches!(err, SandboxError::NotAlive));
    }
}
