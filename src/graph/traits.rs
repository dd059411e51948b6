use crate::models::GraphData;

/// Widget externo que dibuja el grafo (sin layout local)
pub trait GraphRenderer {
    /// Sustituye el grafo dibujado por `graph`
    fn render(&mut self, graph: &GraphData) -> Result<(), String>;

    /// Vaciar el lienzo
    fn clear(&mut self) -> Result<(), String> {
        self.render(&GraphData::default())
    }
}
