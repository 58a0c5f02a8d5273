//! # toolagent-sdk
//!
//! The single import an agent author reaches for: the `#[agent]`/`#[tool]`/
//! `#[workflow]` macros, the workflow builder DSL, and the executor
//! machinery to run what they describe, re-exported from one place so a
//! downstream crate doesn't need to know which internal crate each type
//! actually lives in.
//!
//! ```
//! use std::sync::Arc;
//! use toolagent_sdk::prelude::*;
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
//!         WorkflowBuilder::new("calculate", "add then multiply")
//!             .call("s", CallExpr::new("add", [Arg::lit(1.0), Arg::lit(2.0)]))
//!             .return_call(CallExpr::new("multiply", [Arg::var("s"), Arg::lit(3.0)]))
//!             .build()
//!     }
//! }
//!
//! # async fn run() {
//! let registry = Arc::new(Arc::new(Calculator).into_registry());
//! let sandbox = Arc::new(InProcessSandbox::new());
//! let executor = Executor::new(registry, sandbox);
//!
//! let response = executor
//!     .start(StartRequest {
//!         module: "calculator".into(),
//!         agent_var: "calc".into(),
//!         method_kind: MethodKind::Workflow,
//!         method_name: "calculate".into(),
//!         args: vec![],
//!         kwargs: Default::default(),
//!         step_by_step: false,
//!     })
//!     .await
//!     .unwrap();
//!
//! assert_eq!(response.result.unwrap().single(), Some(serde_json::json!(9.0)));
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Everything an agent author needs in scope, in one `use`.
pub mod prelude {
    pub use toolagent_error::AggregateError;
    pub use toolagent_executor::{
        Executor, ExecutorError, MethodKind, StartRequest, StepResponse,
    };
    pub use toolagent_macros::{agent, tool, workflow};
    pub use toolagent_registry::AgentRegistry;
    pub use toolagent_result::{AgentResult, Outcome};
    pub use toolagent_sandbox::{InProcessSandbox, Sandbox, SandboxError};
    pub use toolagent_tool::{
        ParamDescriptor, ResultArg, Tool, ToolArgs, ToolDescriptor, ToolError, ToolRegistry,
        invoke,
    };
    pub use toolagent_workflow::{
        Arg, CallExpr, DrainOutcome, ReturnExpr, Step, StepExpr, WorkflowBuilder,
        WorkflowDescriptor, WorkflowError, WorkflowGraph, rebuild,
    };
}

pub use prelude::*;
