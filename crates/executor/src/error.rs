//! Errors the step-wise executor can surface.

use toolagent_core::KernelId;

/// Failures from `start`/`continue`/`cancel`.
#[derive(Debug, Clone, thiserror::Error)]
#[non_exhaustive]
pub enum ExecutorError {
    /// `start` named a tool or workflow the agent's registry doesn't have.
    #[error("no tool or workflow named `{0}`")]
    NotFound(String),

    /// `continue`/`cancel` named a `kernel_id` with no active session.
    #[error("no active kernel `{0}`")]
    KernelNotFound(KernelId),

    /// `continue` re-asserted a `(method, args, kwargs)` tuple different
    /// from the one `start` recorded for this kernel.
    #[error("continuation arguments do not match the session that started `{0}`")]
    ParameterMismatch(KernelId),

    /// The sandbox interpreter failed to boot or was not alive when
    /// dispatch was attempted.
    #[error(transparent)]
    Sandbox(#[from] toolagent_sandbox::SandboxError),
}
