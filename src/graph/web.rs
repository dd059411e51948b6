use crate::models::GraphData;
use crate::utils::graph_ffi;

use super::GraphRenderer;

/// Renderizador web sobre vis-network (vía `window.renderNetworkGraph`)
pub struct VisNetworkRenderer {
    container_id: String,
}

impl VisNetworkRenderer {
    pub fn new(container_id: impl Into<String>) -> Self {
        Self {
            container_id: container_id.into(),
        }
    }
}

impl GraphRenderer for VisNetworkRenderer {
    fn render(&mut self, graph: &GraphData) -> Result<(), String> {
        let json = serde_json::to_string(graph)
            .map_err(|e| format!("Error serializando grafo: {}", e))?;
        log::info!(
            "🕸️ Renderizando grafo en #{}: {} nodos, {} aristas",
            self.container_id,
            graph.nodes.len(),
            graph.edges.len()
        );
        graph_ffi::render_network_graph(&self.container_id, &json)
    }
}
