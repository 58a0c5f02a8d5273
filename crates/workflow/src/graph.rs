//! The dataflow graph: tool-call nodes and variable-dependency edges
//! extracted from a workflow's stored steps.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use toolagent_core::{EdgeId, NodeId, PortId};

use crate::step::{Arg, CallExpr, ReturnExpr, Step, StepExpr};

/// A typed, named input or output slot on a graph [`Node`].
///
/// `id` follows `<node_id>:input:<index>` or `<node_id>:output:<index>`.
/// `literal` is an explicit flag rather than the reference implementation's
/// surrounding-quote-character heuristic on `name` — see the workspace
/// design notes on why a numeric literal and a bare variable must not be
/// conflated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Port {
    /// Globally unique within the owning graph.
    pub id: PortId,
    /// Either the bound variable name this port reads from/writes to, or
    /// the literal's JSON-rendered form when `literal` is set.
    pub name: String,
    /// The tool parameter's declared type name (for inputs), or the
    /// producing tool's return type name (for outputs).
    #[serde(rename = "type")]
    pub type_name: String,
    /// `true` iff this is a literal argument rather than a variable
    /// reference. Always `false` for output ports.
    pub literal: bool,
}

/// Advisory 2D position for external visual editors. Not interpreted by
/// this crate beyond round-tripping it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// One tool-call site in a workflow.
///
/// Only the three call shapes the dataflow serializer recognises —
/// assignment, bare expression, and tool-call return — produce nodes.
/// Combine (`|`) steps and bare variable returns are invisible to the
/// graph even though they are observable in the execution yield stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    #[serde(rename = "type")]
    pub node_type: String,
    pub inputs: Vec<Port>,
    pub outputs: Vec<Port>,
    pub position: Position,
}

/// A directed link from a producing output port to a consuming input port.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub source: PortId,
    pub target: PortId,
}

/// The full dataflow graph of a workflow: nodes plus the edges between
/// their ports.
///
/// Invariants (enforced by [`crate::deserializer`], not by this type
/// itself, so that a graph returned from [`from_steps`](WorkflowGraph::from_steps)
/// — which is already valid by construction — never pays validation cost
/// it doesn't need):
/// - port ids are globally unique and decomposable into `(node, side, index)`
/// - every non-literal input port targets exactly one edge, or names a
///   variable bound earlier in dependency order
/// - literal ports never have incoming edges
/// - the graph is acyclic
/// - node execution order respects topological order of edges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowGraph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

fn port_id(node: &NodeId, side: &str, index: usize) -> PortId {
    PortId::new(format!("{node}:{side}:{index}"))
}

fn arg_port(node_id: &NodeId, index: usize, arg: &Arg) -> Port {
    let (name, literal, type_name) = match arg {
        Arg::Literal(value) => (render_literal(value), true, json_type_name(value)),
        Arg::Var(name) => (name.clone(), false, "unknown".to_string()),
    };
    Port {
        id: port_id(node_id, "input", index),
        name,
        type_name,
        literal,
    }
}

fn render_literal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn json_type_name(value: &Value) -> String {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
    .to_string()
}

/// Events the dataflow walk can see in a workflow body — the three shapes
/// `self.<tool>(args)` can appear in. Only these become graph nodes;
/// combine expressions and bare variable returns are not call shapes and
/// are invisible to the walk (they still yield or not, per
/// [`crate::step::Step`], but they carry no node).
enum CallSite<'a> {
    Assigned { var: &'a str, call: &'a CallExpr },
    Bare { call: &'a CallExpr },
    Returned { call: &'a CallExpr },
}

fn call_sites(steps: &[Step]) -> Vec<CallSite<'_>> {
    steps
        .iter()
        .filter_map(|step| match step {
            Step::Assign {
                var,
                expr: StepExpr::Call(call),
            } => Some(CallSite::Assigned { var, call }),
            Step::Assign {
                expr: StepExpr::Combine { .. },
                ..
            } => None,
            Step::Expr(call) => Some(CallSite::Bare { call }),
            Step::Return(ReturnExpr::Call(call)) => Some(CallSite::Returned { call }),
            Step::Return(ReturnExpr::Combine { .. } | ReturnExpr::Var(_)) => None,
        })
        .collect()
}

impl WorkflowGraph {
    /// Extract the dataflow graph from a workflow's stored steps.
    ///
    /// Node ids are assigned `node_<k>` in the order call sites appear,
    /// `k` counting only call-shaped steps (assignment, bare expression, or
    /// tool-call return) — combine assignments and variable returns don't
    /// consume a slot. Edges are resolved by matching each non-literal
    /// input port's name against the most recent output port of the same
    /// name produced by an earlier node; multiple downstream consumers of
    /// the same output are permitted. Positions are laid out along a
    /// single row, left to right.
    #[must_use]
    pub fn from_steps(steps: &[Step]) -> Self {
        let sites = call_sites(steps);
        let mut nodes = Vec::with_capacity(sites.len());
        let mut edges = Vec::new();
        // name -> (node index, output port id) of the most recent producer.
        let mut producers: HashMap<String, (usize, PortId)> = HashMap::new();

        for (k, site) in sites.into_iter().enumerate() {
            let node_id = NodeId::new(format!("node_{k}"));
            let (call, output_var) = match site {
                CallSite::Assigned { var, call } => (call, Some(var)),
                CallSite::Bare { call } | CallSite::Returned { call } => (call, None),
            };

            let inputs: Vec<Port> = call
                .args
                .iter()
                .enumerate()
                .map(|(i, arg)| arg_port(&node_id, i, arg))
                .collect();

            for (i, arg) in call.args.iter().enumerate() {
                if let Arg::Var(name) = arg {
                    if let Some((_, source_port)) = producers.get(name) {
                        edges.push(Edge {
                            id: EdgeId::new(format!("edge_{}", edges.len())),
                            source: source_port.clone(),
                            target: inputs[i].id.clone(),
                        });
                    }
                }
            }

            let outputs = if let Some(var) = output_var {
                let output_id = port_id(&node_id, "output", 0);
                producers.insert(var.to_string(), (k, output_id.clone()));
                vec![Port {
                    id: output_id,
                    name: var.to_string(),
                    type_name: "unknown".to_string(),
                    literal: false,
                }]
            } else {
                Vec::new()
            };

            nodes.push(Node {
                id: node_id,
                node_type: call.tool.clone(),
                inputs,
                outputs,
                position: Position {
                    x: k as f64 * 200.0,
                    y: 0.0,
                },
            });
        }

        Self { nodes, edges }
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from a JSON string. This is a pure structural
    /// round-trip; it does not validate node types against any tool set —
    /// see [`crate::deserializer::rebuild`] for that.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::builder::WorkflowBuilder;

    #[test]
    fn calculator_workflow_has_one_edge_between_add_and_multiply() {
        let workflow = WorkflowBuilder::new("calculate", "")
            .call("s", CallExpr::new("add", [Arg::lit(1.0), Arg::lit(2.0)]))
            .return_call(CallExpr::new("multiply", [Arg::var("s"), Arg::lit(3.0)]))
            .build();

        let graph = WorkflowGraph::from_steps(&workflow.steps);
        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.edges.len(), 1);
        assert_eq!(graph.nodes[0].node_type, "add");
        assert_eq!(graph.nodes[1].node_type, "multiply");
        assert_eq!(graph.edges[0].source, graph.nodes[0].outputs[0].id);
        assert_eq!(graph.edges[0].target, graph.nodes[1].inputs[0].id);
    }

    #[test]
    fn graph_round_trip_three_nodes_two_edges() {
        let workflow = WorkflowBuilder::new("combine_two", "")
            .call("r1", CallExpr::new("t1", [Arg::lit("d1")]))
            .call("r2", CallExpr::new("t1", [Arg::lit("d2")]))
            .call("f", CallExpr::new("t2", [Arg::var("r1"), Arg::var("r2")]))
            .return_var("f")
            .build();

        let graph = WorkflowGraph::from_steps(&workflow.steps);
        assert_eq!(graph.nodes.len(), 3);
        assert_eq!(graph.edges.len(), 2);

        let json = graph.to_json().unwrap();
        let back = WorkflowGraph::from_json(&json).unwrap();
        assert_eq!(graph, back);
    }

    #[test]
    fn combine_assignment_produces_no_node() {
        let workflow = WorkflowBuilder::new("combine_only", "")
            .combine("c", Arg::var("a"), Arg::var("b"))
            .return_var("c")
            .build();

        let graph = WorkflowGraph::from_steps(&workflow.steps);
        assert!(graph.nodes.is_empty());
    }

    #[test]
    fn literal_ports_never_gain_incoming_edges() {
        let workflow = WorkflowBuilder::new("one_call", "")
            .return_call(CallExpr::new("add", [Arg::lit(1.0), Arg::lit(2.0)]))
            .build();

        let graph = WorkflowGraph::from_steps(&workflow.steps);
        assert!(graph.edges.is_empty());
        assert!(graph.nodes[0].inputs.iter().all(|p| p.literal));
    }
}
