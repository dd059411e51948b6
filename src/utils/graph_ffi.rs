// ============================================================================
// GRAPH FFI - Foreign Function Interface para JavaScript (vis-network)
// ============================================================================
// Solo wrappers para funciones JS - Sin estado, sin lógica de layout
// ============================================================================

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// `window.renderNetworkGraph(containerId, graphJson)` definido en index.html;
    /// usa la física force-layout por defecto de vis-network
    #[wasm_bindgen(js_name = renderNetworkGraph, catch)]
    fn render_network_graph_js(container_id: &str, graph_json: &str) -> Result<(), JsValue>;
}

pub fn render_network_graph(container_id: &str, graph_json: &str) -> Result<(), String> {
    render_network_graph_js(container_id, graph_json)
        .map_err(|e| format!("Error renderizando grafo: {:?}", e))
}
