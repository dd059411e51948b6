use serde::{Deserialize, Serialize};

use super::resource::{EntityId, Resource};

/// Bairro: nodo del grafo de ruas, origen/destino de rotas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Neighborhood {
    pub id: EntityId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeighborhoodRequest {
    pub name: String,
}

impl Resource for Neighborhood {
    type Request = NeighborhoodRequest;
    const PATH: &'static str = "/neighborhoods";
    const LABEL_KEY: &'static str = "neighborhood";

    fn id(&self) -> EntityId {
        self.id
    }

    fn to_request(&self) -> NeighborhoodRequest {
        NeighborhoodRequest {
            name: self.name.clone(),
        }
    }
}
