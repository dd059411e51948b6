// Módulo del grafo de bairros/ruas con implementaciones por plataforma

#[cfg(target_arch = "wasm32")]
pub mod web;

// Traits comunes para todas las plataformas
pub mod traits;

pub use traits::*;
