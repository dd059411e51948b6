// ============================================================================
// ITINERARY SERVICE - CRUD + consultas por fecha/caminhão/periodo
// ============================================================================

use chrono::NaiveDate;

use crate::error::ApiResult;
use crate::models::{EntityId, Itinerary, Resource};
use crate::services::api_client::ApiClient;
use crate::services::resource_client::ResourceClient;
use crate::utils::constants::DATE_FORMAT;

#[derive(Clone)]
pub struct ItineraryService {
    resources: ResourceClient<Itinerary>,
}

impl ItineraryService {
    pub fn new(api: ApiClient) -> Self {
        Self {
            resources: ResourceClient::new(api),
        }
    }

    /// CRUD paginado estándar
    pub fn resources(&self) -> &ResourceClient<Itinerary> {
        &self.resources
    }

    fn api(&self) -> &ApiClient {
        self.resources.api()
    }

    pub async fn by_date(&self, date: NaiveDate) -> ApiResult<Vec<Itinerary>> {
        let path = format!("{}/date/{}", Itinerary::PATH, date.format(DATE_FORMAT));
        self.api().get(&path, Vec::new()).await
    }

    pub async fn by_truck(&self, truck_id: EntityId) -> ApiResult<Vec<Itinerary>> {
        let path = format!("{}/truck/{}", Itinerary::PATH, truck_id);
        self.api().get(&path, Vec::new()).await
    }

    pub async fn by_period(&self, start: NaiveDate, end: NaiveDate) -> ApiResult<Vec<Itinerary>> {
        let path = format!("{}/period", Itinerary::PATH);
        let query = vec![
            ("start".to_string(), start.format(DATE_FORMAT).to_string()),
            ("end".to_string(), end.format(DATE_FORMAT).to_string()),
        ];
        self.api().get(&path, query).await
    }

    /// Marca la ejecución como completada
    pub async fn complete(&self, id: EntityId) -> ApiResult<()> {
        log::info!("✅ Completando itinerario {}", id);
        let path = format!("{}/{}/complete", Itinerary::PATH, id);
        self.api().put_empty(&path).await
    }
}
