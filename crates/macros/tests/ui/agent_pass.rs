use std::sync::Arc;

use toolagent_macros::{agent, tool, workflow};
use toolagent_tool::ToolArgs;
use toolagent_workflow::{Arg, CallExpr, WorkflowBuilder, WorkflowDescriptor};

pub struct Calculator;

#[agent]
impl Calculator {
    /// Add two numbers.
    #[tool]
    async fn add(&self, a: f64, b: f64) -> Result<f64, std::convert::Infallible> {
        Ok(a + b)
    }

    /// Multiply two numbers.
    #[tool(name = "mul")]
    async fn multiply(&self, a: f64, b: f64) -> Result<f64, std::convert::Infallible> {
        Ok(a * b)
    }

    /// Add then multiply.
    #[workflow]
    fn calculate() -> WorkflowDescriptor {
        WorkflowBuilder::new("calculate", "add then multiply")
            .call("s", CallExpr::new("add", [Arg::lit(1.0), Arg::lit(2.0)]))
            .return_call(CallExpr::new("mul", [Arg::var("s"), Arg::lit(3.0)]))
            .build()
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let registry = Arc::new(Calculator).into_registry();

    assert!(registry.tools().contains("add"));
    assert!(registry.tools().contains("mul"));
    assert!(registry.workflow("calculate").is_some());

    let add = registry.tools().get("add").unwrap().clone();
    let sum = add
        .call(ToolArgs::positional([
            serde_json::Value::from(1.0),
            serde_json::Value::from(2.0),
        ]))
        .await
        .unwrap();
    assert_eq!(sum, serde_json::Value::from(3.0));
}
