use serde::{Deserialize, Serialize};

use super::residue::{canonical_order, ResidueType};
use super::resource::{EntityId, Resource};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionPoint {
    pub id: EntityId,
    pub name: String,
    pub responsible_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    #[serde(default)]
    pub residue_types: Vec<ResidueType>,
    pub neighborhood_id: EntityId,
    #[serde(default)]
    pub neighborhood_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionPointRequest {
    pub name: String,
    pub responsible_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub residue_types: Vec<ResidueType>,
    pub neighborhood_id: EntityId,
}

impl Resource for CollectionPoint {
    type Request = CollectionPointRequest;
    const PATH: &'static str = "/collection-points";
    const LABEL_KEY: &'static str = "collection_point";

    fn id(&self) -> EntityId {
        self.id
    }

    fn to_request(&self) -> CollectionPointRequest {
        CollectionPointRequest {
            name: self.name.clone(),
            responsible_name: self.responsible_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
            residue_types: canonical_order(&self.residue_types),
            neighborhood_id: self.neighborhood_id,
        }
    }
}
