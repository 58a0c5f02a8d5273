//! # toolagent-tool
//!
//! The tool wrapper: turns a plain async callable into a `Result`-returning,
//! `Result`-argument-aware **tool**. A tool is the side-effectful leaf of a
//! workflow — arithmetic, I/O, an HTTP call — whose outcome is always an
//! [`AgentResult`](toolagent_result::AgentResult), never a raw exception.
//!
//! - [`Tool`] is the trait a tool implementation satisfies.
//! - [`invoke`] is the wrapper: it unwraps `AgentResult`-typed arguments,
//!   short-circuits on the first error, and otherwise runs the tool and
//!   wraps its outcome.
//! - [`ToolRegistry`] is the per-agent name → tool map built at agent
//!   construction time.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod descriptor;
mod error;
mod registry;
mod tool;
mod wrapper;

pub use descriptor::{ParamDescriptor, ToolDescriptor};
pub use error::ToolError;
pub use registry::ToolRegistry;
pub use tool::{Tool, ToolArgs};
pub use wrapper::{invoke, ResultArg};
