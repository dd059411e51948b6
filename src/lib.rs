// ============================================================================
// GREENLOG ADMIN - FRONTEND MVVM (RUST + WASM)
// ============================================================================
// Arquitectura MVVM:
// - ViewModels: Estado + Lógica UI (listados, formularios, dashboard, login)
// - Services: SOLO comunicación API
// - State: Store de sesión observable con Rc<RefCell>
// - Models: Estructuras compartidas con backend
// - Router: Rutas + guard de sesión
// - Screens: Pantalla activa por ruta (lo que ve el JS)
// ============================================================================

pub mod app;
pub mod config;
pub mod error;
pub mod graph;
pub mod models;
pub mod router;
pub mod screens;
pub mod services;
pub mod state;
pub mod utils;
pub mod viewmodels;

#[cfg(test)]
pub(crate) mod testing;

pub use app::AppContext;
pub use config::AppConfig;
pub use error::{ApiError, ApiResult, FieldErrors};

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;

    use crate::app::AppContext;
    use crate::config::CONFIG;
    use crate::graph::web::VisNetworkRenderer;
    use crate::graph::GraphRenderer;
    use crate::models::SortDirection;
    use crate::router::HistoryNavigator;
    use crate::screens::ScreenHost;
    use crate::utils::constants::APP_NAME;
    use crate::viewmodels::form::validation::{parse_date, parse_id};
    use crate::viewmodels::{CompleteOutcome, DeleteOutcome};

    /// Contenedor del grafo en index.html
    const GRAPH_CONTAINER_ID: &str = "network-graph";

    // Pantallas de la app (solo en el navegador)
    thread_local! {
        static APP: RefCell<Option<Rc<ScreenHost>>> = RefCell::new(None);
    }

    fn host() -> Option<Rc<ScreenHost>> {
        let host = APP.with(|app| app.borrow().clone());
        if host.is_none() {
            log::warn!("⚠️ App no inicializada");
        }
        host
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        // Inicializar panic hook para mejor debugging
        console_error_panic_hook::set_once();

        if CONFIG.is_logging_enabled() {
            wasm_logger::init(wasm_logger::Config::default());
        }
        log::info!("🚀 {} - Rust + MVVM", APP_NAME);

        let host = Rc::new(
            ScreenHost::new(AppContext::browser()).with_graph_renderer(|| -> Box<dyn GraphRenderer> {
                Box::new(VisNetworkRenderer::new(GRAPH_CONTAINER_ID))
            }),
        );
        APP.with(|app| *app.borrow_mut() = Some(host.clone()));

        let path = HistoryNavigator::current_path();
        wasm_bindgen_futures::spawn_local(async move {
            let route = host.open(&path).await;
            log::info!("🧭 Ruta inicial: {}", route.path());
        });
        Ok(())
    }

    /// Navegación desde JS (enlaces del menú); devuelve la ruta final
    #[wasm_bindgen]
    pub async fn navigate_to(path: String) -> String {
        match host() {
            Some(host) => host.open(&path).await.path(),
            None => path,
        }
    }

    /// Estado de la pantalla actual para pintarla
    #[wasm_bindgen]
    pub fn view_state() -> String {
        host()
            .map(|host| host.state_json().to_string())
            .unwrap_or_else(|| "null".to_string())
    }

    #[wasm_bindgen]
    pub async fn login(username: String, password: String) -> bool {
        match host() {
            Some(host) => host.login(&username, &password).await,
            None => false,
        }
    }

    /// Cerrar sesión desde el header
    #[wasm_bindgen]
    pub async fn logout() {
        if let Some(host) = host() {
            host.logout().await;
        }
    }

    #[wasm_bindgen]
    pub async fn refresh() {
        if let Some(host) = host() {
            host.refresh().await;
        }
    }

    #[wasm_bindgen]
    pub async fn go_to_page(page: u32) {
        if let Some(host) = host() {
            host.go_to_page(page).await;
        }
    }

    #[wasm_bindgen]
    pub async fn sort_by(field: String, descending: bool) {
        let direction = if descending {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        if let Some(host) = host() {
            host.sort_by(&field, direction).await;
        }
    }

    /// Id tal cual viene del DOM; uno inválido lo rechaza el listado
    #[wasm_bindgen]
    pub async fn delete_record(id: String) -> bool {
        match host() {
            Some(host) => host.delete(parse_id(&id)).await == Some(DeleteOutcome::Deleted),
            None => false,
        }
    }

    #[wasm_bindgen]
    pub fn set_field(name: &str, value: &str) {
        if let Some(host) = host() {
            host.set_field(name, value);
        }
    }

    #[wasm_bindgen]
    pub fn set_checked(name: &str, index: usize, checked: bool) {
        if let Some(host) = host() {
            host.set_checked(name, index, checked);
        }
    }

    #[wasm_bindgen]
    pub async fn submit_form() -> bool {
        match host() {
            Some(host) => host.submit().await,
            None => false,
        }
    }

    #[wasm_bindgen]
    pub async fn cancel_form() {
        if let Some(host) = host() {
            host.cancel().await;
        }
    }

    /// Fecha `yyyy-MM-dd` del planificador
    #[wasm_bindgen]
    pub async fn select_date(date: String) {
        let Some(date) = parse_date(&date) else {
            log::warn!("⚠️ Fecha inválida: {}", date);
            return;
        };
        if let Some(host) = host() {
            host.select_date(date).await;
        }
    }

    #[wasm_bindgen]
    pub async fn complete_itinerary(id: String) -> bool {
        let Some(id) = parse_id(&id) else {
            log::warn!("⚠️ Id de itinerario inválido: {}", id);
            return false;
        };
        match host() {
            Some(host) => host.complete(id).await == Some(CompleteOutcome::Completed),
            None => false,
        }
    }
}
