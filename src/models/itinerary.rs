use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::residue::ResidueType;
use super::resource::{EntityId, Resource};
use super::route::RouteStop;

/// Una ejecución programada: caminhão + rota + fecha
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    pub id: EntityId,
    pub route_id: EntityId,
    #[serde(default)]
    pub route_name: Option<String>,
    pub truck_id: EntityId,
    #[serde(default)]
    pub truck_license_plate: Option<String>,
    /// yyyy-MM-dd
    pub date: NaiveDate,
    #[serde(default)]
    pub total_distance: f64,
    #[serde(default)]
    pub residue_type: Option<ResidueType>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub stops: Vec<RouteStop>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryRequest {
    pub route_id: EntityId,
    pub truck_id: EntityId,
    pub date: NaiveDate,
}

impl Resource for Itinerary {
    type Request = ItineraryRequest;
    const PATH: &'static str = "/itineraries";
    const LABEL_KEY: &'static str = "itinerary";

    fn id(&self) -> EntityId {
        self.id
    }

    fn to_request(&self) -> ItineraryRequest {
        ItineraryRequest {
            route_id: self.route_id,
            truck_id: self.truck_id,
            date: self.date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_travels_as_plain_iso_day() {
        let json = r#"{"id":5,"routeId":3,"truckId":1,"date":"2024-06-01","completed":false}"#;
        let itinerary: Itinerary = serde_json::from_str(json).unwrap();
        assert_eq!(itinerary.date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());

        let body = serde_json::to_value(itinerary.to_request()).unwrap();
        assert_eq!(body["date"], "2024-06-01");
        assert_eq!(body["routeId"], 3);
    }
}
