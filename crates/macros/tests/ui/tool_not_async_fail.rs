use toolagent_macros::{agent, tool};

pub struct Calculator;

#[agent]
impl Calculator {
    #[tool]
    fn add(&self, a: f64, b: f64) -> Result<f64, std::convert::Infallible> {
        Ok(a + b)
    }
}

fn main() {}
