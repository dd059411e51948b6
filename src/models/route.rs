use serde::{Deserialize, Serialize};

use super::residue::ResidueType;
use super::resource::{EntityId, Resource};

/// Parada de una rota (un bairro); el orden lo calcula el backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteStop {
    pub order: u32,
    pub neighborhood_id: EntityId,
    pub neighborhood_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub id: EntityId,
    pub name: String,
    pub truck_id: EntityId,
    #[serde(default)]
    pub truck_license_plate: Option<String>,
    pub residue_type: ResidueType,
    #[serde(default)]
    pub total_distance: f64,
    #[serde(default)]
    pub stops: Vec<RouteStop>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRequest {
    pub name: String,
    pub truck_id: EntityId,
    pub origin_neighborhood_id: EntityId,
    pub destination_neighborhood_id: EntityId,
    pub residue_type: ResidueType,
}

impl Route {
    /// Primera parada según `order`
    pub fn origin(&self) -> Option<&RouteStop> {
        self.stops.iter().min_by_key(|stop| stop.order)
    }

    /// Última parada según `order`
    pub fn destination(&self) -> Option<&RouteStop> {
        self.stops.iter().max_by_key(|stop| stop.order)
    }
}

impl Resource for Route {
    type Request = RouteRequest;
    const PATH: &'static str = "/routes";
    const LABEL_KEY: &'static str = "route";

    fn id(&self) -> EntityId {
        self.id
    }

    fn to_request(&self) -> RouteRequest {
        RouteRequest {
            name: self.name.clone(),
            truck_id: self.truck_id,
            origin_neighborhood_id: self.origin().map(|s| s.neighborhood_id).unwrap_or_default(),
            destination_neighborhood_id: self
                .destination()
                .map(|s| s.neighborhood_id)
                .unwrap_or_default(),
            residue_type: self.residue_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projection_uses_first_and_last_stop_by_order() {
        let route = Route {
            id: 3,
            name: "Rota Centro-Norte".to_string(),
            truck_id: 1,
            truck_license_plate: Some("TRK-0001".to_string()),
            residue_type: ResidueType::Paper,
            total_distance: 25.0,
            // Desordenadas a propósito
            stops: vec![
                RouteStop { order: 2, neighborhood_id: 9, neighborhood_name: "Norte".into() },
                RouteStop { order: 0, neighborhood_id: 4, neighborhood_name: "Centro".into() },
                RouteStop { order: 1, neighborhood_id: 7, neighborhood_name: "Meio".into() },
            ],
        };

        let request = route.to_request();
        assert_eq!(request.origin_neighborhood_id, 4);
        assert_eq!(request.destination_neighborhood_id, 9);
    }
}
