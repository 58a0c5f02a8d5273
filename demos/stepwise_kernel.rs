//! Exercises the kernel lifecycle directly: a mismatched continuation is
//! rejected, a cancel drops the session, and a second cancel on the same
//! id correctly reports not-found.

use std::sync::Arc;

use toolagent_sdk::prelude::*;

pub struct Greeter;

#[agent]
impl Greeter {
    /// Return a greeting for `name`.
    #[tool]
    async fn greet(&self, name: String) -> Result<String, std::convert::Infallible> {
        Ok(format!("hello, {name}"))
    }

    /// Shout a string.
    #[tool]
    async fn shout(&self, text: String) -> Result<String, std::convert::Infallible> {
        Ok(text.to_uppercase())
    }

    /// `g = greet(name); return shout(g)` — two yields per run.
    #[workflow]
    fn greet_loudly() -> WorkflowDescriptor {
        WorkflowBuilder::new("greet_loudly", "greet then shout")
            .param("name")
            .call("g", CallExpr::new("greet", [Arg::var("name")]))
            .return_call(CallExpr::new("shout", [Arg::var("g")]))
            .build()
    }
}

fn start_request(name: &str) -> StartRequest {
    StartRequest {
        module: "greeter".into(),
        agent_var: "greeter".into(),
        method_kind: MethodKind::Workflow,
        method_name: "greet_loudly".into(),
        args: vec![serde_json::json!(name)],
        kwargs: Default::default(),
        step_by_step: true,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let registry = Arc::new(Arc::new(Greeter).into_registry());
    let sandbox = Arc::new(InProcessSandbox::new());
    let executor = Executor::new(registry, sandbox);

    let response = executor.start(start_request("ada")).await?;
    let kernel_id = response
        .kernel_id
        .clone()
        .expect("first of two yields leaves a kernel active");
    println!("step 1: {:?}, kernel={kernel_id}", response.result.values());

    let mismatch = executor.r#continue(&kernel_id, &start_request("not-ada")).await;
    println!("mismatched continue: {mismatch:?}");
    assert!(matches!(mismatch, Err(ExecutorError::ParameterMismatch(_))));

    let response = executor.r#continue(&kernel_id, &start_request("ada")).await?;
    println!("step 2: {:?}, kernel={:?}", response.result.values(), response.kernel_id);
    assert!(response.kernel_id.is_none());
    assert_eq!(executor.active_kernel_count(), 0);

    let response = executor.start(start_request("grace")).await?;
    let kernel_id = response.kernel_id.expect("kernel active after first yield");
    executor.cancel(&kernel_id)?;
    let second_cancel = executor.cancel(&kernel_id);
    println!("second cancel: {second_cancel:?}");
    assert!(matches!(second_cancel, Err(ExecutorError::KernelNotFound(_))));

    Ok(())
}
