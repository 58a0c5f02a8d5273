use toolagent_macros::{agent, tool, workflow};
use toolagent_workflow::WorkflowDescriptor;

pub struct Calculator;

#[agent]
impl Calculator {
    #[tool]
    async fn add(&self, a: f64, b: f64) -> Result<f64, std::convert::Infallible> {
        Ok(a + b)
    }

    #[workflow]
    fn calculate(&self) -> WorkflowDescriptor {
        unimplemented!()
    }
}

fn main() {}
