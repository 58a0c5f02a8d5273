//! # toolagent-macros
//!
//! Compile-time discovery for agents: the `#[tool]`/`#[workflow]` markers
//! and the `#[agent]` attribute that reads them.
//!
//! The reference framework builds an agent's tool/workflow registry by
//! scanning an *instance* for members carrying an `is_tool`/`is_workflow`
//! marker at construction time — Rust has no such runtime introspection
//! over methods, so this crate moves the scan to compile time instead:
//! `#[agent]` walks the `impl` block it's applied to, finds every
//! `#[tool]`/`#[workflow]` method, and generates the wrapper and
//! registration code a runtime scan would have produced by hand.
//!
//! ```ignore
//! use std::sync::Arc;
//! use toolagent_macros::{agent, tool, workflow};
//! use toolagent_workflow::{Arg, CallExpr, WorkflowBuilder, WorkflowDescriptor};
//!
//! pub struct Calculator;
//!
//! #[agent]
//! impl Calculator {
//!     /// Add two numbers.
//!     #[tool]
//!     async fn add(&self, a: f64, b: f64) -> Result<f64, std::convert::Infallible> {
//!         Ok(a + b)
//!     }
//!
//!     /// Multiply two numbers.
//!     #[tool]
//!     async fn multiply(&self, a: f64, b: f64) -> Result<f64, std::convert::Infallible> {
//!         Ok(a * b)
//!     }
//!
//!     /// Add then multiply.
//!     #[workflow]
//!     fn calculate() -> WorkflowDescriptor {
//!         WorkflowBuilder::new("calculate", "Add then multiply")
//!             .call("s", CallExpr::new("add", [Arg::lit(1.0), Arg::lit(2.0)]))
//!             .return_call(CallExpr::new("multiply", [Arg::var("s"), Arg::lit(3.0)]))
//!             .build()
//!     }
//! }
//!
//! let registry = Arc::new(Calculator).into_registry();
//! ```

#![forbid(unsafe_code)]

extern crate proc_macro;

use proc_macro::TokenStream;

mod agent;
mod support;

/// Marks an `async fn` inside an `#[agent]`-annotated impl block as a tool:
/// a side-effectful leaf operation wrapped in a
/// [`Result`](https://docs.rs/toolagent-result)-returning, argument-aware call.
///
/// The method's first doc-comment line becomes the tool's description; its
/// non-receiver parameters become declared parameters, looked up by name
/// out of [`ToolArgs`](../toolagent_tool/struct.ToolArgs.html) at call time.
/// The method must return `Result<T, E>` (or a bare `T`, treated as
/// infallible) where `T: Serialize` and, if present, `E: Display`.
///
/// `#[tool(name = "...")]` registers the tool under a name other than the
/// method's own, for when the two need to diverge (e.g. a Rust keyword or
/// a name already used by another tool on the same agent).
#[proc_macro_attribute]
pub fn tool(attr: TokenStream, item: TokenStream) -> TokenStream {
    let _ = attr;
    agent::expand_tool_marker(item)
}

/// Marks an associated function (no `&self`) inside an `#[agent]`-annotated
/// impl block as a workflow: it must return a
/// [`WorkflowDescriptor`](../toolagent_workflow/struct.WorkflowDescriptor.html),
/// typically assembled with
/// [`WorkflowBuilder`](../toolagent_workflow/struct.WorkflowBuilder.html).
///
/// No `&self` parameter because a workflow's stored steps are the same for
/// every instance of the agent — unlike a tool call, a workflow has no
/// per-instance state of its own, only the tool calls it chains together.
#[proc_macro_attribute]
pub fn workflow(attr: TokenStream, item: TokenStream) -> TokenStream {
    let _ = attr;
    agent::expand_workflow_marker(item)
}

/// Scans the annotated inherent `impl` block for `#[tool]`/`#[workflow]`
/// methods and generates `into_registry`, building an
/// [`AgentRegistry`](../toolagent_registry/struct.AgentRegistry.html) from
/// what it found.
#[proc_macro_attribute]
pub fn agent(attr: TokenStream, item: TokenStream) -> TokenStream {
    let _ = attr;
    agent::expand_agent(item)
}
