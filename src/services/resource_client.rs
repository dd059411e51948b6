// ============================================================================
// RESOURCE CLIENT - CRUD genérico por entidad
// ============================================================================
// Un intento por llamada. Los errores se propagan tal cual; el fallback
// (página vacía, mensajes) es cosa de los viewmodels.
// ============================================================================

use std::marker::PhantomData;

use crate::error::ApiResult;
use crate::models::{EntityId, Page, PageRequest, Resource};
use crate::services::api_client::ApiClient;

pub struct ResourceClient<R: Resource> {
    api: ApiClient,
    _resource: PhantomData<R>,
}

impl<R: Resource> Clone for ResourceClient<R> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> ResourceClient<R> {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            _resource: PhantomData,
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    fn item_path(id: EntityId) -> String {
        format!("{}/{}", R::PATH, id)
    }

    pub async fn list(&self, page: u32, size: u32) -> ApiResult<Page<R>> {
        self.list_with(&PageRequest::new(page, size)).await
    }

    pub async fn list_with(&self, request: &PageRequest) -> ApiResult<Page<R>> {
        let page: Page<R> = self.api.get(R::PATH, request.query_pairs()).await?;
        if !page.is_consistent() {
            log::warn!(
                "⚠️ Página inconsistente en {}: {} elementos, página {}/{}",
                R::PATH,
                page.len(),
                page.page_number,
                page.total_pages
            );
        }
        Ok(page)
    }

    /// 404 llega como `ApiError::NotFound`
    pub async fn get_by_id(&self, id: EntityId) -> ApiResult<R> {
        self.api.get(&Self::item_path(id), Vec::new()).await
    }

    pub async fn create(&self, payload: &R::Request) -> ApiResult<R> {
        log::info!("➕ Creando en {}", R::PATH);
        self.api.post(R::PATH, payload).await
    }

    /// Reemplazo completo (PUT)
    pub async fn update(&self, id: EntityId, payload: &R::Request) -> ApiResult<R> {
        log::info!("✏️ Actualizando {}/{}", R::PATH, id);
        self.api.put(&Self::item_path(id), payload).await
    }

    pub async fn delete(&self, id: EntityId) -> ApiResult<()> {
        log::info!("🗑️ Eliminando {}/{}", R::PATH, id);
        self.api.delete(&Self::item_path(id)).await
    }
}
