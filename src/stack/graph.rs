//! Creation-order dependency hints.
//!
//! Dependency hints are directed edges among declared resources expressing
//! required creation order. They do not change the declarations themselves,
//! only the order the external provisioning engine applies them in. The
//! graph supports:
//!
//! - Cycle detection (a hinted graph must stay a DAG)
//! - Topological creation order
//! - DOT export for visualization

use std::collections::HashMap;

use petgraph::algo::{tarjan_scc, toposort};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A node in the hint graph: one declared resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HintNode {
    /// Logical id of the resource.
    pub id: String,
    /// Resource name.
    pub name: String,
    /// Engine resource type.
    pub resource_type: String,
}

impl HintNode {
    /// Create a hint node.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        resource_type: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            resource_type: resource_type.into(),
        }
    }
}

/// A creation-order edge: `to` must not be created before `from`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreationHint {
    /// Prerequisite resource id.
    pub from_id: String,
    /// Dependent resource id.
    pub to_id: String,
    /// Optional description.
    pub description: Option<String>,
}

impl CreationHint {
    /// Create a hint edge.
    pub fn new(from_id: impl Into<String>, to_id: impl Into<String>) -> Self {
        Self {
            from_id: from_id.into(),
            to_id: to_id.into(),
            description: None,
        }
    }

    /// Add a description.
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }
}

/// The dependency hint graph over declared resources.
#[derive(Debug, Clone, Default)]
pub struct HintGraph {
    graph: DiGraph<HintNode, CreationHint>,
    node_indices: HashMap<String, NodeIndex>,
}

impl HintGraph {
    /// Create an empty hint graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resource in the graph.
    pub fn add_resource(&mut self, node: HintNode) -> NodeIndex {
        if let Some(&idx) = self.node_indices.get(&node.id) {
            if let Some(existing) = self.graph.node_weight_mut(idx) {
                *existing = node;
            }
            return idx;
        }
        let id = node.id.clone();
        let idx = self.graph.add_node(node);
        self.node_indices.insert(id, idx);
        idx
    }

    /// Add a creation-order hint between two registered resources.
    pub fn add_hint(&mut self, hint: CreationHint) -> Result<()> {
        let from_idx = self
            .node_indices
            .get(&hint.from_id)
            .ok_or_else(|| Error::ResourceNotFound(hint.from_id.clone()))?;
        let to_idx = self
            .node_indices
            .get(&hint.to_id)
            .ok_or_else(|| Error::ResourceNotFound(hint.to_id.clone()))?;

        self.graph.add_edge(*from_idx, *to_idx, hint);
        Ok(())
    }

    /// Direct prerequisites of a resource, the template's depends-on list.
    pub fn prerequisites(&self, id: &str) -> Vec<String> {
        let mut deps = Vec::new();
        if let Some(&idx) = self.node_indices.get(id) {
            for edge in self.graph.edges_directed(idx, Direction::Incoming) {
                deps.push(edge.weight().from_id.clone());
            }
        }
        deps.sort();
        deps
    }

    /// Check for hint cycles.
    pub fn has_cycles(&self) -> bool {
        let sccs = tarjan_scc(&self.graph);
        sccs.iter().any(|scc| scc.len() > 1)
    }

    /// Topological creation order respecting all hints.
    pub fn creation_order(&self) -> Result<Vec<String>> {
        match toposort(&self.graph, None) {
            Ok(order) => Ok(order
                .into_iter()
                .filter_map(|idx| self.graph.node_weight(idx).map(|n| n.id.clone()))
                .collect()),
            Err(_) => {
                let cycle: Vec<String> = tarjan_scc(&self.graph)
                    .into_iter()
                    .find(|scc| scc.len() > 1)
                    .map(|scc| {
                        scc.into_iter()
                            .filter_map(|idx| self.graph.node_weight(idx).map(|n| n.id.clone()))
                            .collect()
                    })
                    .unwrap_or_default();
                Err(Error::DependencyCycle(cycle.join(" -> ")))
            }
        }
    }

    /// Number of registered resources.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of hint edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Generate a DOT representation for visualization.
    pub fn to_dot(&self) -> String {
        let mut output = String::new();
        output.push_str("digraph creation_order {\n");
        output.push_str("  rankdir=LR;\n");
        output.push_str("  node [shape=box];\n\n");

        for idx in self.graph.node_indices() {
            if let Some(node) = self.graph.node_weight(idx) {
                let label = format!("{}\\n{}", node.id, node.resource_type);
                output.push_str(&format!("  \"{}\" [label=\"{}\"];\n", node.id, label));
            }
        }

        output.push('\n');

        for edge in self.graph.edge_references() {
            let hint = edge.weight();
            output.push_str(&format!("  \"{}\" -> \"{}\";\n", hint.from_id, hint.to_id));
        }

        output.push_str("}\n");
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_node_graph() -> HintGraph {
        let mut graph = HintGraph::new();
        graph.add_resource(HintNode::new("a", "first", "Test::A"));
        graph.add_resource(HintNode::new("b", "second", "Test::B"));
        graph.add_resource(HintNode::new("c", "third", "Test::C"));
        graph
    }

    #[test]
    fn test_empty_graph() {
        let graph = HintGraph::new();
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
        assert!(!graph.has_cycles());
    }

    #[test]
    fn test_hint_requires_registered_resources() {
        let mut graph = three_node_graph();
        assert!(graph.add_hint(CreationHint::new("a", "b")).is_ok());
        assert!(matches!(
            graph.add_hint(CreationHint::new("a", "ghost")),
            Err(Error::ResourceNotFound(_))
        ));
    }

    #[test]
    fn test_prerequisites() {
        let mut graph = three_node_graph();
        graph.add_hint(CreationHint::new("a", "c")).unwrap();
        graph.add_hint(CreationHint::new("b", "c")).unwrap();

        assert_eq!(graph.prerequisites("c"), vec!["a", "b"]);
        assert!(graph.prerequisites("a").is_empty());
    }

    #[test]
    fn test_creation_order_respects_hints() {
        let mut graph = three_node_graph();
        graph.add_hint(CreationHint::new("a", "b")).unwrap();
        graph.add_hint(CreationHint::new("b", "c")).unwrap();

        let order = graph.creation_order().unwrap();
        let pos = |id: &str| order.iter().position(|x| x == id).unwrap();
        assert!(pos("a") < pos("b"));
        assert!(pos("b") < pos("c"));
    }

    #[test]
    fn test_cycle_detection() {
        let mut graph = three_node_graph();
        graph.add_hint(CreationHint::new("a", "b")).unwrap();
        graph.add_hint(CreationHint::new("b", "c")).unwrap();
        graph.add_hint(CreationHint::new("c", "a")).unwrap();

        assert!(graph.has_cycles());
        assert!(matches!(
            graph.creation_order(),
            Err(Error::DependencyCycle(_))
        ));
    }

    #[test]
    fn test_to_dot() {
        let mut graph = three_node_graph();
        graph.add_hint(CreationHint::new("a", "b")).unwrap();

        let dot = graph.to_dot();
        assert!(dot.contains("digraph"));
        assert!(dot.contains("\"a\" -> \"b\""));
    }
}
