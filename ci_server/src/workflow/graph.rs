//! Workflow graph snapshot: job nodes, pseudo-trigger nodes and trigger edges.

use serde::{Deserialize, Serialize};

/// Pseudo-trigger for pull-request events.
pub const PR_TRIGGER: &str = "~pr";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowGraph {
    #[serde(default)]
    pub nodes: Vec<WorkflowNode>,
    #[serde(default)]
    pub edges: Vec<WorkflowEdge>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowNode {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

/// `src` triggers `dest`. Join markers and other edge attributes are not
/// needed for reachability and are ignored on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowEdge {
    pub src: String,
    pub dest: String,
}

impl WorkflowGraph {
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_screwdriver_style_graph() {
        let raw = r#"{
            "nodes": [{ "name": "~pr" }, { "name": "~commit" }, { "name": "main", "id": 7 }],
            "edges": [{ "src": "~pr", "dest": "main" }, { "src": "~commit", "dest": "main", "join": true }]
        }"#;
        let graph: WorkflowGraph = serde_json::from_str(raw).unwrap();
        assert_eq!(graph.nodes.len(), 3);
        assert_eq!(graph.edges[1], WorkflowEdge { src: "~commit".to_string(), dest: "main".to_string() });
        assert_eq!(graph.nodes[2].id, Some(7));
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let graph: WorkflowGraph = serde_json::from_str("{}").unwrap();
        assert!(graph.is_empty());
        assert!(graph.nodes.is_empty());
    }
}
