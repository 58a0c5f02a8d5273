//! Rebuilds a workflow's stored step sequence from an edited
//! [`WorkflowGraph`].
//!
//! Mirrors the reference implementation's `deserialize_workflow`: nodes are
//! emitted in dependency order (a node's producers always precede it), each
//! becoming either an assignment (if it has an output port) or a bare
//! expression statement (if it doesn't). No `return` statement is ever
//! synthesized — the workflow's final value is simply whatever the last
//! emitted step yields, exactly as it is in the original.

use std::collections::{HashMap, HashSet};

use serde_json::Value;
use toolagent_core::{NodeId, PortId};
use toolagent_tool::ToolRegistry;

use crate::error::WorkflowError;
use crate::graph::{Node, Port, WorkflowGraph};
use crate::step::{Arg, CallExpr, Step};

fn parse_literal(port: &Port) -> Result<Value, WorkflowError> {
    let value = match port.type_name.as_str() {
        "null" => Value::Null,
        "bool" => Value::Bool(port.name == "true"),
        "number" => serde_json::Number::from_f64(port.name.parse::<f64>().unwrap_or(0.0))
            .map_or(Value::Null, Value::Number),
        "array" | "object" => serde_json::from_str(&port.name)?,
        _ => Value::String(port.name.clone()),
    };
    Ok(value)
}

/// Rebuild a workflow's steps from `graph`, validating that every node
/// names a tool present in `tools` and that every non-literal input port
/// either has a producing edge or refers to one of `params` (the
/// workflow's own formal parameters, which are bound before the first
/// step and therefore never appear as a node output).
pub fn rebuild(
    graph: &WorkflowGraph,
    tools: &ToolRegistry,
    params: &[String],
) -> Result<Vec<Step>, WorkflowError> {
    let mut missing: Vec<String> = Vec::new();
    for node in &graph.nodes {
        if !tools.contains(&node.node_type) && !missing.contains(&node.node_type) {
            missing.push(node.node_type.clone());
        }
    }
    if !missing.is_empty() {
        return Err(WorkflowError::unavailable_tools(missing));
    }

    let mut port_owner: HashMap<&PortId, &NodeId> = HashMap::new();
    for node in &graph.nodes {
        for port in node.inputs.iter().chain(node.outputs.iter()) {
            port_owner.insert(&port.id, &node.id);
        }
    }
    for edge in &graph.edges {
        if !port_owner.contains_key(&edge.source) {
            return Err(WorkflowError::DanglingEdge(edge.source.to_string()));
        }
        if !port_owner.contains_key(&edge.target) {
            return Err(WorkflowError::DanglingEdge(edge.target.to_string()));
        }
    }

    // target port id -> source port id
    let incoming: HashMap<&PortId, &PortId> = graph
        .edges
        .iter()
        .map(|e| (&e.target, &e.source))
        .collect();

    let nodes_by_id: HashMap<&NodeId, &Node> = graph.nodes.iter().map(|n| (&n.id, n)).collect();

    fn output_var<'a>(node: &'a Node) -> Option<&'a str> {
        node.outputs.first().map(|p| p.name.as_str())
    }

    // node -> the nodes producing each of its non-literal inputs.
    let mut deps: HashMap<&NodeId, Vec<&NodeId>> = HashMap::new();
    for node in &graph.nodes {
        let mut producers = Vec::new();
        for port in &node.inputs {
            if port.literal {
                continue;
            }
            if let Some(source) = incoming.get(&port.id) {
                producers.push(port_owner[source]);
            } else if !params.iter().any(|p| p == &port.name) {
                return Err(WorkflowError::UnboundInput(port.id.to_string()));
            }
        }
        deps.insert(&node.id, producers);
    }

    let mut emitted: Vec<Step> = Vec::with_capacity(graph.nodes.len());
    let mut done: HashSet<&NodeId> = HashSet::new();
    let mut in_progress: HashSet<&NodeId> = HashSet::new();

    #[allow(clippy::too_many_arguments)]
    fn emit<'a>(
        node_id: &'a NodeId,
        nodes_by_id: &HashMap<&'a NodeId, &'a Node>,
        deps: &HashMap<&'a NodeId, Vec<&'a NodeId>>,
        incoming: &HashMap<&'a PortId, &'a PortId>,
        port_owner: &HashMap<&'a PortId, &'a NodeId>,
        done: &mut HashSet<&'a NodeId>,
        in_progress: &mut HashSet<&'a NodeId>,
        emitted: &mut Vec<Step>,
    ) -> Result<(), WorkflowError> {
        if done.contains(node_id) {
            return Ok(());
        }
        if !in_progress.insert(node_id) {
            return Err(WorkflowError::Cyclic);
        }

        for dep in &deps[node_id] {
            emit(
                dep,
                nodes_by_id,
                deps,
                incoming,
                port_owner,
                done,
                in_progress,
                emitted,
            )?;
        }

        let node = nodes_by_id[node_id];
        let mut args = Vec::with_capacity(node.inputs.len());
        for port in &node.inputs {
            let arg = if port.literal {
                Arg::Literal(parse_literal(port)?)
            } else if let Some(source) = incoming.get(&port.id) {
                let producer = nodes_by_id[port_owner[source]];
                Arg::Var(output_var(producer).unwrap_or(&port.name).to_string())
            } else {
                Arg::Var(port.name.clone())
            };
            args.push(arg);
        }
        let call = CallExpr::new(node.node_type.clone(), args);
        let step = match output_var(node) {
            Some(var) => Step::call(var.to_string(), call),
            None => Step::Expr(call),
        };
        emitted.push(step);

        in_progress.remove(node_id);
        done.insert(node_id);
        Ok(())
    }

    for node in &graph.nodes {
        emit(
            &node.id,
            &nodes_by_id,
            &deps,
            &incoming,
            &port_owner,
            &mut done,
            &mut in_progress,
            &mut emitted,
        )?;
    }

    Ok(emitted)
}
