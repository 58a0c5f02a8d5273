//! # toolagent-workflow
//!
//! Workflows are tool calls chained together: a stored sequence of
//! [`Step`]s, built once (by [`WorkflowBuilder`]) and from then on runnable
//! three different ways —
//!
//! - drained to completion by [`runner::drain`],
//! - stepped one suspension point at a time by [`runner::WorkflowCursor`]
//!   (what the step-wise executor drives), or
//! - round-tripped through a [`WorkflowGraph`] for visual editing and
//!   rebuilt back into steps by [`deserializer::rebuild`].
//!
//! None of these three views is the "real" one; they're projections of the
//! same stored step sequence, the same way the reference implementation's
//! function source, its AST, and its dataflow graph are three views of one
//! workflow method.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod deserializer;
mod descriptor;
mod error;
mod graph;
pub mod runner;
mod step;

pub use builder::WorkflowBuilder;
pub use deserializer::rebuild;
pub use descriptor::WorkflowDescriptor;
pub use error::WorkflowError;
pub use graph::{Edge, Node, Port, Position, WorkflowGraph};
pub use runner::{DrainOutcome, StepResult, WorkflowCursor};
pub use step::{Arg, CallExpr, ReturnExpr, Step, StepExpr};
