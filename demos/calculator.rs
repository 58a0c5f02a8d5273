//! A calculator agent: two tools chained through a workflow, run both as a
//! single blocking call and as a drained step-wise stream.

use std::sync::Arc;

use toolagent_sdk::prelude::*;

pub struct Calculator;

#[agent]
impl Calculator {
    /// Add two numbers together.
    #[tool]
    async fn add(&self, a: f64, b: f64) -> Result<f64, std::convert::Infallible> {
        Ok(a + b)
    }

    /// Multiply two numbers.
    #[tool]
    async fn multiply(&self, a: f64, b: f64) -> Result<f64, std::convert::Infallible> {
        Ok(a * b)
    }

    /// Divide the first number by the second.
    #[tool]
    async fn divide(&self, a: f64, b: f64) -> Result<f64, String> {
        if b == 0.0 {
            return Err("cannot divide by zero".to_string());
        }
        Ok(a / b)
    }

    /// `s = add(1, 2); return multiply(s, 3)` — the worked example from the
    /// calculator scenario: one yield for the add, one for the multiply.
    #[workflow]
    fn calculate() -> WorkflowDescriptor {
        WorkflowBuilder::new("calculate", "add then multiply")
            .call("s", CallExpr::new("add", [Arg::lit(1.0), Arg::lit(2.0)]))
            .return_call(CallExpr::new("multiply", [Arg::var("s"), Arg::lit(3.0)]))
            .build()
    }

    /// `return divide(10, 0)` — demonstrates a tool failure propagating
    /// straight through the workflow without ever reaching `multiply`.
    #[workflow]
    fn calculate_with_error() -> WorkflowDescriptor {
        WorkflowBuilder::new("calculate_with_error", "divide by zero, unguarded")
            .return_call(CallExpr::new("divide", [Arg::lit(10.0), Arg::lit(0.0)]))
            .build()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let registry = Arc::new(Arc::new(Calculator).into_registry());
    let sandbox = Arc::new(InProcessSandbox::new());
    let executor = Executor::new(Arc::clone(&registry), sandbox);

    println!("=== Single tool call ===");
    let response = executor
        .start(StartRequest {
            module: "calculator".into(),
            agent_var: "calc".into(),
            method_kind: MethodKind::Tool,
            method_name: "add".into(),
            args: vec![serde_json::json!(5.0), serde_json::json!(3.0)],
            kwargs: Default::default(),
            step_by_step: false,
        })
        .await?;
    println!("5 + 3 = {:?}", response.result.unwrap().single());

    println!("\n=== Workflow, drained to completion ===");
    let response = executor
        .start(StartRequest {
            module: "calculator".into(),
            agent_var: "calc".into(),
            method_kind: MethodKind::Workflow,
            method_name: "calculate".into(),
            args: vec![],
            kwargs: Default::default(),
            step_by_step: false,
        })
        .await?;
    println!("calculate() = {:?}", response.result.unwrap().single());

    println!("\n=== Workflow, stepped one yield at a time ===");
    let mut response = executor
        .start(StartRequest {
            module: "calculator".into(),
            agent_var: "calc".into(),
            method_kind: MethodKind::Workflow,
            method_name: "calculate".into(),
            args: vec![],
            kwargs: Default::default(),
            step_by_step: true,
        })
        .await?;
    loop {
        println!("yield: {:?}", response.result.values());
        let Some(kernel_id) = response.kernel_id.clone() else {
            break;
        };
        response = executor
            .r#continue(
                &kernel_id,
                &StartRequest {
                    module: "calculator".into(),
                    agent_var: "calc".into(),
                    method_kind: MethodKind::Workflow,
                    method_name: "calculate".into(),
                    args: vec![],
                    kwargs: Default::default(),
                    step_by_step: true,
                },
            )
            .await?;
    }

    println!("\n=== Error propagation ===");
    let response = executor
        .start(StartRequest {
            module: "calculator".into(),
            agent_var: "calc".into(),
            method_kind: MethodKind::Workflow,
            method_name: "calculate_with_error".into(),
            args: vec![],
            kwargs: Default::default(),
            step_by_step: false,
        })
        .await?;
    println!("calculate_with_error() errors: {:?}", response.result.errors());

    assert_eq!(executor.active_kernel_count(), 0);
    Ok(())
}
