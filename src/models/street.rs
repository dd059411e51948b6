use serde::{Deserialize, Serialize};

use super::resource::{EntityId, Resource};

/// Rua: arista dirigida entre dos bairros, con distancia positiva
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Street {
    pub id: EntityId,
    pub origin_id: EntityId,
    #[serde(default)]
    pub origin_name: Option<String>,
    pub destination_id: EntityId,
    #[serde(default)]
    pub destination_name: Option<String>,
    pub distance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreetRequest {
    pub origin_id: EntityId,
    pub destination_id: EntityId,
    pub distance: f64,
}

impl Resource for Street {
    type Request = StreetRequest;
    const PATH: &'static str = "/streets";
    const LABEL_KEY: &'static str = "street";

    fn id(&self) -> EntityId {
        self.id
    }

    fn to_request(&self) -> StreetRequest {
        StreetRequest {
            origin_id: self.origin_id,
            destination_id: self.destination_id,
            distance: self.distance,
        }
    }
}
