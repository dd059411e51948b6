use serde::{Deserialize, Serialize};

use super::residue::{canonical_order, ResidueType};
use super::resource::{EntityId, Resource};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Truck {
    pub id: EntityId,
    pub license_plate: String,
    pub driver_name: String,
    pub capacity: f64,
    #[serde(default)]
    pub residue_types: Vec<ResidueType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TruckRequest {
    pub license_plate: String,
    pub driver_name: String,
    pub capacity: f64,
    pub residue_types: Vec<ResidueType>,
}

impl Resource for Truck {
    type Request = TruckRequest;
    const PATH: &'static str = "/trucks";
    const LABEL_KEY: &'static str = "truck";

    fn id(&self) -> EntityId {
        self.id
    }

    fn to_request(&self) -> TruckRequest {
        TruckRequest {
            license_plate: self.license_plate.clone(),
            driver_name: self.driver_name.clone(),
            capacity: self.capacity,
            residue_types: canonical_order(&self.residue_types),
        }
    }
}
