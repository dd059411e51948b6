use serde::{Deserialize, Serialize};

use super::neighborhood::Neighborhood;
use super::street::Street;

/// Nodo del grafo (un bairro)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
}

/// Arista del grafo (una rua)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub source: String,
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Datos que se entregan tal cual al widget de grafos
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl GraphData {
    pub fn from_network(neighborhoods: &[Neighborhood], streets: &[Street]) -> Self {
        let nodes = neighborhoods
            .iter()
            .map(|n| GraphNode {
                id: n.id.to_string(),
                label: n.name.clone(),
            })
            .collect();

        let edges = streets
            .iter()
            .map(|s| GraphEdge {
                id: Some(s.id.to_string()),
                source: s.origin_id.to_string(),
                target: s.destination_id.to_string(),
                label: Some(format!("{} km", s.distance)),
            })
            .collect();

        Self { nodes, edges }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}
