//! Extracts a workflow's dataflow graph, round-trips it through JSON, then
//! feeds it back in unedited through `update_workflow_from_graph` — the
//! external-editor loop the registry exists to support.

use std::sync::Arc;

use toolagent_sdk::prelude::*;

pub struct Catenator;

#[agent]
impl Catenator {
    /// Return the argument unchanged, tagged with a label.
    #[tool]
    async fn tag(&self, label: String) -> Result<String, std::convert::Infallible> {
        Ok(label)
    }

    /// Join two strings with a dash.
    #[tool]
    async fn join(&self, a: String, b: String) -> Result<String, std::convert::Infallible> {
        Ok(format!("{a}-{b}"))
    }

    /// `r1 = tag("d1"); r2 = tag("d2"); return join(r1, r2)`
    #[workflow]
    fn combine_tags() -> WorkflowDescriptor {
        WorkflowBuilder::new("combine_tags", "tag two labels, then join them")
            .call("r1", CallExpr::new("tag", [Arg::lit("d1")]))
            .call("r2", CallExpr::new("tag", [Arg::lit("d2")]))
            .return_call(CallExpr::new("join", [Arg::var("r1"), Arg::var("r2")]))
            .build()
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let registry = Arc::new(Arc::new(Catenator).into_registry());

    let graph = registry
        .get_workflow_graph("combine_tags")
        .expect("workflow registered");
    println!("nodes: {}, edges: {}", graph.nodes.len(), graph.edges.len());

    let json = graph.to_json()?;
    println!("{json}");

    let reloaded = WorkflowGraph::from_json(&json)?;
    registry.update_workflow_from_graph("combine_tags", &reloaded)?;

    let rebuilt = registry
        .workflow("combine_tags")
        .expect("workflow still registered after rebuild");
    println!("rebuilt steps: {}", rebuilt.steps.len());

    Ok(())
}
