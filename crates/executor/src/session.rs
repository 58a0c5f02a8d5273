//! A single suspended, resumable workflow run.

use std::collections::BTreeMap;

use serde_json::Value;
use toolagent_workflow::WorkflowCursor;

/// The `(module, agent_var, method_name, args, kwargs)` tuple a kernel was
/// started with. `continue` must re-assert an identical value; a mismatch
/// is rejected without advancing the cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    /// Name of the module the agent class was loaded from, for continuation
    /// validation only — this executor never loads modules dynamically.
    pub module: String,
    /// Name the agent instance is bound to in its owning scope.
    pub agent_var: String,
    /// Name of the workflow method driving this kernel.
    pub method_name: String,
    /// Positional arguments the workflow was started with.
    pub args: Vec<Value>,
    /// Keyword arguments the workflow was started with.
    pub kwargs: BTreeMap<String, Value>,
}

/// One active kernel: the identity it was started with, plus the live
/// cursor inside the sandbox. Removed from the executor's kernel map the
/// moment it terminates or is cancelled.
pub struct KernelSession {
    pub(crate) identity: Identity,
    pub(crate) cursor: WorkflowCursor,
}
