//! Errors raised by the sandbox boundary.

/// Failures from booting or dispatching into the sandbox.
#[derive(Debug, Clone, thiserror::Error)]
#[non_exhaustive]
pub enum SandboxError {
    /// A tool or workflow was dispatched before [`boot`](crate::Sandbox::boot)
    /// succeeded, or after [`shutdown`](crate::Sandbox::shutdown) tore the
    /// interpreter down.
    #[error("sandbox interpreter is not running")]
    NotAlive,

    /// The interpreter failed to come up.
    #[error("sandbox failed to boot: {0}")]
    BootFailed(String),
}
