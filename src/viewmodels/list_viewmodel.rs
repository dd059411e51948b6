// ============================================================================
// LIST VIEWMODEL - Listados paginados (genérico por entidad)
// ============================================================================
// Idle -> Loading -> {Loaded, Failed}. Una respuesta de una carga ya
// superada se descarta (contador de generación).
// ============================================================================

use std::cell::{Cell, RefCell};
use std::future::Future;

use serde::Serialize;

use crate::app::AppContext;
use crate::error::{ApiError, ApiResult};
use crate::models::{EntityId, Page, PageRequest, Resource, SortDirection};
use crate::services::ResourceClient;
use crate::state::ReactiveState;
use crate::utils::i18n::{t, t_with};
use crate::viewmodels::message_or;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LoadPhase {
    Idle,
    Loading,
    Loaded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListState<T> {
    pub phase: LoadPhase,
    /// Página vacía canónica si la carga falló
    pub page: Page<T>,
    pub error: Option<String>,
    pub deleting: Option<EntityId>,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            phase: LoadPhase::Idle,
            page: Page::empty(),
            error: None,
            deleting: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    /// Id ausente o inválido
    Rejected,
    Cancelled,
    Deleted,
    Failed(ApiError),
}

/// Valida id, pide confirmación y borra; notifica el resultado
pub(crate) async fn confirm_and_delete<F, Fut>(
    ctx: &AppContext,
    label_key: &str,
    id: Option<EntityId>,
    delete: F,
) -> DeleteOutcome
where
    F: FnOnce(EntityId) -> Fut,
    Fut: Future<Output = ApiResult<()>>,
{
    let lang = ctx.lang();
    let entity = t(label_key, lang);

    let Some(id) = id.filter(|id| *id > 0) else {
        log::warn!("⚠️ Borrado rechazado: id inválido ({:?})", id);
        ctx.notifier.error(&t_with("invalid_id", lang, &[("entity", &entity)]));
        return DeleteOutcome::Rejected;
    };

    let question = t_with(
        "delete_confirm",
        lang,
        &[("entity", &entity.to_lowercase()), ("id", &id.to_string())],
    );
    if !ctx.confirmer.confirm(&question) {
        return DeleteOutcome::Cancelled;
    }

    match delete(id).await {
        Ok(()) => {
            ctx.notifier
                .success(&t_with("record_deleted", lang, &[("entity", &entity)]));
            DeleteOutcome::Deleted
        }
        Err(e) => {
            let fallback = t_with("delete_failed", lang, &[("entity", &entity)]);
            ctx.notifier.error(&message_or(&e, fallback));
            DeleteOutcome::Failed(e)
        }
    }
}

pub struct ListViewModel<R: Resource> {
    ctx: AppContext,
    client: ResourceClient<R>,
    state: ReactiveState<ListState<R>>,
    page_request: RefCell<PageRequest>,
    generation: Cell<u64>,
}

impl<R: Resource> ListViewModel<R> {
    pub fn new(ctx: AppContext) -> Self {
        let page_size = ctx.config.default_page_size;
        Self {
            client: ctx.resources::<R>(),
            ctx,
            state: ReactiveState::new(ListState::default()),
            page_request: RefCell::new(PageRequest::new(0, page_size)),
            generation: Cell::new(0),
        }
    }

    pub fn state(&self) -> &ReactiveState<ListState<R>> {
        &self.state
    }

    pub fn snapshot(&self) -> ListState<R> {
        self.state.snapshot()
    }

    pub fn page_request(&self) -> PageRequest {
        self.page_request.borrow().clone()
    }

    /// Entrada a la vista: primera página
    pub async fn activate(&self) {
        self.page_request.borrow_mut().page = 0;
        self.load().await;
    }

    pub async fn reload(&self) {
        self.load().await;
    }

    pub async fn go_to_page(&self, page: u32) {
        self.page_request.borrow_mut().page = page;
        self.load().await;
    }

    pub async fn set_sort(&self, field: &str, direction: SortDirection) {
        {
            let mut request = self.page_request.borrow_mut();
            *request = request.clone().sorted_by(field, direction);
            request.page = 0;
        }
        self.load().await;
    }

    async fn load(&self) {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        let request = self.page_request();

        self.state.update(|s| {
            s.phase = LoadPhase::Loading;
            s.error = None;
        });

        let result = self.client.list_with(&request).await;

        if self.generation.get() != generation {
            log::debug!("⏭️ Respuesta obsoleta de {} descartada (gen {})", R::PATH, generation);
            return;
        }

        match result {
            Ok(page) => {
                log::info!("📋 {}: {} de {} registros", R::PATH, page.len(), page.total_elements);
                self.state.update(|s| {
                    s.phase = LoadPhase::Loaded;
                    s.page = page;
                });
            }
            Err(e) => {
                log::error!("❌ Error cargando {}: {}", R::PATH, e);
                let lang = self.ctx.lang();
                let fallback =
                    t_with("list_load_failed", lang, &[("entity", &t(R::LABEL_KEY, lang))]);
                let message = message_or(&e, fallback);
                self.state.update(|s| {
                    s.phase = LoadPhase::Failed;
                    s.page = Page::empty();
                    s.error = Some(message);
                });
            }
        }
    }

    /// Tras borrar, recarga completa; si falla, la lista visible no cambia
    pub async fn delete(&self, id: Option<EntityId>) -> DeleteOutcome {
        let client = self.client.clone();
        let state = self.state.clone();
        let outcome = confirm_and_delete(&self.ctx, R::LABEL_KEY, id, |id| async move {
            state.update(|s| s.deleting = Some(id));
            client.delete(id).await
        })
        .await;

        self.state.update(|s| s.deleting = None);
        if outcome == DeleteOutcome::Deleted {
            self.reload().await;
        }
        outcome
    }
}
