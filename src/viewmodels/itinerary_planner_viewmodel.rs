// ============================================================================
// ITINERARY PLANNER VIEWMODEL - Itinerarios de un día
// ============================================================================

use std::cell::Cell;

use chrono::NaiveDate;
use serde::Serialize;

use crate::app::AppContext;
use crate::error::ApiError;
use crate::models::{EntityId, Itinerary, Resource};
use crate::services::ItineraryService;
use crate::state::ReactiveState;
use crate::utils::i18n::{t, t_with};
use crate::viewmodels::list_viewmodel::{confirm_and_delete, DeleteOutcome, LoadPhase};
use crate::viewmodels::message_or;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannerState {
    pub date: NaiveDate,
    pub phase: LoadPhase,
    /// Vacía si la carga falló
    pub itineraries: Vec<Itinerary>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CompleteOutcome {
    Completed,
    /// Ya notificado; la lista visible no cambia
    Failed(ApiError),
}

pub struct ItineraryPlannerViewModel {
    ctx: AppContext,
    service: ItineraryService,
    state: ReactiveState<PlannerState>,
    generation: Cell<u64>,
}

impl ItineraryPlannerViewModel {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            service: ctx.itineraries(),
            ctx,
            state: ReactiveState::new(PlannerState {
                date: chrono::Local::now().date_naive(),
                phase: LoadPhase::Idle,
                itineraries: Vec::new(),
                error: None,
            }),
            generation: Cell::new(0),
        }
    }

    pub fn state(&self) -> &ReactiveState<PlannerState> {
        &self.state
    }

    pub fn snapshot(&self) -> PlannerState {
        self.state.snapshot()
    }

    pub async fn activate(&self) {
        self.select_date(chrono::Local::now().date_naive()).await;
    }

    pub async fn select_date(&self, date: NaiveDate) {
        self.state.update(|s| s.date = date);
        self.reload().await;
    }

    pub async fn reload(&self) {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        let date = self.state.with(|s| s.date);
        self.state.update(|s| {
            s.phase = LoadPhase::Loading;
            s.error = None;
        });

        let result = self.service.by_date(date).await;
        if self.generation.get() != generation {
            log::debug!("⏭️ Itinerarios de {} descartados (gen {})", date, generation);
            return;
        }

        match result {
            Ok(itineraries) => {
                log::info!("🗓️ {} itinerarios para {}", itineraries.len(), date);
                self.state.update(|s| {
                    s.phase = LoadPhase::Loaded;
                    s.itineraries = itineraries;
                });
            }
            Err(e) => {
                log::error!("❌ Error cargando itinerarios de {}: {}", date, e);
                let lang = self.ctx.lang();
                let fallback = t_with(
                    "list_load_failed",
                    lang,
                    &[("entity", &t(Itinerary::LABEL_KEY, lang))],
                );
                let message = message_or(&e, fallback);
                self.state.update(|s| {
                    s.phase = LoadPhase::Failed;
                    s.itineraries.clear();
                    s.error = Some(message);
                });
            }
        }
    }

    pub async fn delete(&self, id: Option<EntityId>) -> DeleteOutcome {
        let client = self.service.resources().clone();
        let outcome =
            confirm_and_delete(&self.ctx, Itinerary::LABEL_KEY, id, |id| async move {
                client.delete(id).await
            })
            .await;
        if outcome == DeleteOutcome::Deleted {
            self.reload().await;
        }
        outcome
    }

    /// Marca la ejecución como completada y recarga el día
    pub async fn complete(&self, id: EntityId) -> CompleteOutcome {
        let lang = self.ctx.lang();
        match self.service.complete(id).await {
            Ok(()) => {
                self.ctx.notifier.success(&t("itinerary_completed", lang));
                self.reload().await;
                CompleteOutcome::Completed
            }
            Err(e) => {
                self.ctx
                    .notifier
                    .error(&message_or(&e, t("complete_failed", lang)));
                CompleteOutcome::Failed(e)
            }
        }
    }
}
