//! # toolagent-registry
//!
//! The per-agent introspection surface: which tools and workflows an agent
//! exposes, and the read-mostly edit path a visual graph editor drives
//! through [`AgentRegistry::update_workflow_from_graph`].
//!
//! Built once, at agent construction, by whatever discovery mechanism
//! collects `Arc<dyn Tool>`s and [`WorkflowDescriptor`]s (in this codebase,
//! the `#[tool]`/`#[workflow]` macros in `toolagent-macros`); read-heavy and
//! lock-free for tool lookups thereafter, with only the workflow map behind
//! a lock to support in-place graph edits.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;
use toolagent_tool::{ToolDescriptor, ToolRegistry};
use toolagent_workflow::{WorkflowDescriptor, WorkflowError, WorkflowGraph};

/// Name → tool mapping plus name → workflow mapping for one agent instance.
///
/// The tool side is immutable after construction (tools are never edited at
/// runtime); the workflow side supports in-place replacement through
/// [`update_workflow_from_graph`](Self::update_workflow_from_graph), guarded
/// by a single `RwLock` as the concurrency model calls for — one lock
/// covering both the read path (`get_workflow_graph`, introspection) and
/// the write path (graph edits).
pub struct AgentRegistry {
    tools: Arc<ToolRegistry>,
    workflows: RwLock<HashMap<String, WorkflowDescriptor>>,
}

impl AgentRegistry {
    /// Build a registry from an already-populated tool registry and a set
    /// of discovered workflow descriptors.
    #[must_use]
    pub fn new(tools: ToolRegistry, workflows: impl IntoIterator<Item = WorkflowDescriptor>) -> Self {
        let workflows = workflows
            .into_iter()
            .map(|w| (w.name.clone(), w))
            .collect();
        Self {
            tools: Arc::new(tools),
            workflows: RwLock::new(workflows),
        }
    }

    /// Shared handle to the agent's tool registry.
    #[must_use]
    pub fn tools(&self) -> Arc<ToolRegistry> {
        Arc::clone(&self.tools)
    }

    /// Clone of one workflow's stored descriptor, or `None` if no workflow
    /// with that name was registered.
    #[must_use]
    pub fn workflow(&self, name: &str) -> Option<WorkflowDescriptor> {
        self.workflows.read().get(name).cloned()
    }

    /// Names of every registered workflow, in no particular order.
    #[must_use]
    pub fn workflow_names(&self) -> Vec<String> {
        self.workflows.read().keys().cloned().collect()
    }

    /// Extract the current dataflow graph for `name`, or `None` if no such
    /// workflow is registered.
    #[must_use]
    pub fn get_workflow_graph(&self, name: &str) -> Option<WorkflowGraph> {
        self.workflows
            .read()
            .get(name)
            .map(|w| WorkflowGraph::from_steps(&w.steps))
    }

    /// Rebuild `name`'s stored steps from an edited `graph` and replace the
    /// registry entry in place.
    ///
    /// Fails with [`WorkflowError::UnrecognisedWorkflow`] if `name` isn't
    /// registered, without taking the write lock; fails with whatever
    /// [`toolagent_workflow::rebuild`] reports (unavailable tools, a cycle,
    /// a dangling edge, an unbound input) if the graph itself doesn't
    /// validate, leaving the existing workflow untouched either way.
    pub fn update_workflow_from_graph(
        &self,
        name: &str,
        graph: &WorkflowGraph,
    ) -> Result<(), WorkflowError> {
        let params = {
            let workflows = self.workflows.read();
            let existing = workflows
                .get(name)
                .ok_or_else(|| WorkflowError::UnrecognisedWorkflow(name.to_string()))?;
            existing.params.clone()
        };

        let steps = toolagent_workflow::rebuild(graph, &self.tools, &params)?;

        let mut workflows = self.workflows.write();
        if let Some(existing) = workflows.get_mut(name) {
            existing.steps = steps;
            tracing::info!(workflow = name, "rebuilt workflow from edited graph");
        }
        Ok(())
    }

    /// A textual self-description: one line per tool (name and first
    /// docstring line), then per workflow its node list, labeling the last
    /// node's output `[return]` — mirroring the reference implementation's
    /// quirk of describing a workflow's terminal value as the output of
    /// its last call site, whether or not that call site was the one
    /// written as `return`.
    #[must_use]
    pub fn describe(&self) -> String {
        let mut out = String::new();
        let mut tool_names: Vec<&ToolDescriptor> = self.tools.list();
        tool_names.sort_by(|a, b| a.name.cmp(&b.name));
        out.push_str("Tools:\n");
        for tool in tool_names {
            out.push_str(&format!("  {} — {}\n", tool.name, tool.description));
        }

        out.push_str("Workflows:\n");
        let workflows = self.workflows.read();
        let mut names: Vec<&String> = workflows.keys().collect();
        names.sort();
        for name in names {
            let workflow = &workflows[name];
            out.push_str(&format!("  {name} — {}\n", workflow.description));
            let graph = WorkflowGraph::from_steps(&workflow.steps);
            let last_index = graph.nodes.len().saturating_sub(1);
            for (i, node) in graph.nodes.iter().enumerate() {
                let label = if node.outputs.is_empty() && i == last_index {
                    "[return]".to_string()
                } else if let Some(output) = node.outputs.first() {
                    output.name.clone()
                } else {
                    "[discarded]".to_string()
                };
                out.push_str(&format!("    {} = {}(...)\n", label, node.node_type));
            }
        }
        out
    }

    /// A structured JSON report: per tool, its description and parameter
    /// name → type name map; per workflow, its stored steps rendered as a
    /// graph (nodes with ports and types, edges).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.report())
    }

    /// As [`to_json`](Self::to_json), additionally writing the report to
    /// `path`.
    pub fn to_json_file(&self, path: impl AsRef<std::path::Path>) -> std::io::Result<String> {
        let json = self
            .to_json()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, &json)?;
        Ok(json)
    }

    fn report(&self) -> Report {
        let mut tools: Vec<ToolReport> = self
            .tools
            .list()
            .into_iter()
            .map(|t| ToolReport {
                name: t.name.clone(),
                description: t.description.clone(),
                params: t
                    .params
                    .iter()
                    .map(|p| (p.name.clone(), p.type_name.clone()))
                    .collect(),
            })
            .collect();
        tools.sort_by(|a, b| a.name.cmp(&b.name));

        let workflows = self.workflows.read();
        let mut workflow_reports: Vec<WorkflowReport> = workflows
            .values()
            .map(|w| WorkflowReport {
                name: w.name.clone(),
                description: w.description.clone(),
                graph: WorkflowGraph::from_steps(&w.steps),
            })
            .collect();
        workflow_reports.sort_by(|a, b| a.name.cmp(&b.name));

        Report {
            tools,
            workflows: workflow_reports,
        }
    }
}

#[derive(Debug, Serialize)]
struct Report {
    tools: Vec<ToolReport>,
    workflows: Vec<WorkflowReport>,
}

#[derive(Debug, Serialize)]
struct ToolReport {
    name: String,
    description: String,
    params: HashMap<String, String>,
}

#[derive(Debug, Serialize)]
struct WorkflowReport {
    name: String,
    description: String,
    graph: WorkflowGraph,
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    use super::*;
    use serde_json::Value;
    use toolagent_tool::{Tool, ToolArgs, ToolError};
    use toolagent_workflow::{Arg, CallExpr, WorkflowBuilder};

    struct Add;

    #[async_trait]
    impl Tool for Add {
        fn descriptor(&self) -> &ToolDescriptor {
            static D: std::sync::OnceLock<ToolDescriptor> = std::sync::OnceLock::new();
            D.get_or_init(|| {
                ToolDescriptor::new("add", "Add two numbers")
                    .with_param("a", "f64")
                    .with_param("b", "f64")
            })
        }
        async fn call(&self, args: ToolArgs) -> Result<Value, ToolError> {
            let a = args.get(0, "a").and_then(Value::as_f64).unwrap_or(0.0);
            let b = args.get(1, "b").and_then(Value::as_f64).unwrap_or(0.0);
            Ok(Value::from(a + b))
        }
    }

    struct Multiply;

    #[async_trait]
    impl Tool for Multiply {
        fn descriptor(&self) -> &ToolDescriptor {
            static D: std::sync::OnceLock<ToolDescriptor> = std::sync::OnceLock::new();
            D.get_or_init(|| {
                ToolDescriptor::new("multiply", "Multiply two numbers")
                    .with_param("a", "f64")
                    .with_param("b", "f64")
            })
        }
        async fn call(&self, args: ToolArgs) -> Result<Value, ToolError> {
            let a = args.get(0, "a").and_then(Value::as_f64).unwrap_or(0.0);
            let b = args.get(1, "b").and_then(Value::as_f64).unwrap_or(0.0);
            Ok(Value::from(a * b))
        }
    }

    fn make_registry() -> AgentRegistry {
        let mut tools = ToolRegistry::new();
        tools.register(Arc::new(Add));
        tools.register(Arc::new(Multiply));

        let workflow = WorkflowBuilder::new("calculate", "add then multiply")
            .call("s", CallExpr::new("add", [Arg::lit(1.0), Arg::lit(2.0)]))
            .return_call(CallExpr::new("multiply", [Arg::var("s"), Arg::lit(3.0)]))
            .build();

        AgentRegistry::new(tools, [workflow])
    }

    #[test]
    fn get_workflow_graph_matches_from_steps() {
        let registry = make_registry();
        let graph = registry.get_workflow_graph("calculate").unwrap();
        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.edges.len(), 1);
    }

    #[test]
    fn unrecognised_workflow_is_rejected_without_touching_registry() {
        let registry = make_registry();
        let empty_graph = WorkflowGraph {
            nodes: vec![],
            edges: vec![],
        };
        let err = registry
            .update_workflow_from_graph("ghost", &empty_graph)
            .unwrap_err();
        assert_eq!(err.to_string(), "unrecognised workflow `ghost`");
        assert!(registry.workflow("calculate").is_some());
    }

    #[test]
    fn update_workflow_from_graph_round_trips() {
        let registry = make_registry();
        let graph = registry.get_workflow_graph("calculate").unwrap();
        registry
            .update_workflow_from_graph("calculate", &graph)
            .unwrap();
        let workflow = registry.workflow("calculate").unwrap();
        assert_eq!(workflow.steps.len(), 2);
    }

    #[test]
    fn update_with_unknown_tool_fails_and_leaves_workflow_untouched() {
        let registry = make_registry();
        let mut graph = registry.get_workflow_graph("calculate").unwrap();
        graph.nodes[0].node_type = "does_not_exist".to_string();

        let err = registry
            .update_workflow_from_graph("calculate", &graph)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "The following tools are not available: does_not_exist"
        );
        let workflow = registry.workflow("calculate").unwrap();
        assert_eq!(workflow.steps.len(), 2);
    }

    #[test]
    fn describe_lists_tools_and_labels_final_node_return() {
        let registry = make_registry();
        let description = registry.describe();
        assert!(description.contains("add — Add two numbers"));
        assert!(description.contains("[return]"));
    }

    #[test]
    fn to_json_reports_tool_params_and_workflow_graph() {
        let registry = make_registry();
        let json = registry.to_json().unwrap();
        let parsed: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["tools"][0]["name"], "add");
        assert_eq!(parsed["workflows"][0]["name"], "calculate");
        assert_eq!(parsed["workflows"][0]["graph"]["nodes"].as_array().unwrap().len(), 2);
    }
}
