// ============================================================================
// VIEWMODELS - Estado + lógica UI (sin DOM)
// ============================================================================
// Los errores de la API terminan aquí: se traducen a estado y avisos,
// nunca se propagan a la vista
// ============================================================================

pub mod dashboard_viewmodel;
pub mod form;
pub mod itinerary_planner_viewmodel;
pub mod list_viewmodel;
pub mod login_viewmodel;

pub use dashboard_viewmodel::{BranchResult, DashboardState, DashboardSummary, DashboardViewModel, LoadGroup};
pub use form::{FormPhase, FormState, FormViewModel, SubmitOutcome};
pub use itinerary_planner_viewmodel::{CompleteOutcome, ItineraryPlannerViewModel, PlannerState};
pub use list_viewmodel::{DeleteOutcome, ListState, ListViewModel, LoadPhase};
pub use login_viewmodel::{LoginState, LoginViewModel};

use crate::error::ApiError;

/// Mensaje del servidor si lo hay; si no, `fallback`
pub(crate) fn message_or(error: &ApiError, fallback: String) -> String {
    error
        .server_message()
        .map(str::to_string)
        .unwrap_or(fallback)
}
