// ============================================================================
// APP - Contexto de la aplicación
// ============================================================================
// Dueño del store de sesión, el cliente API y los colaboradores de UI.
// Todo se inyecta: no hay singletons fuera del arranque en el navegador.
// ============================================================================

use std::rc::Rc;

use crate::config::AppConfig;
use crate::graph::GraphRenderer;
use crate::models::Resource;
use crate::router::{AppRoute, Navigation, Navigator, SessionGuard};
use crate::services::{
    ApiClient, AuthInterceptor, AuthService, Confirmer, HttpTransport, ItineraryService,
    Notifier, ResourceClient,
};
use crate::state::SessionStore;
use crate::utils::storage::KeyValueStorage;
use crate::viewmodels::form::{FormSchema, FormViewModel};
use crate::viewmodels::{
    DashboardViewModel, ItineraryPlannerViewModel, ListViewModel, LoginViewModel,
};

#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub session: SessionStore,
    pub api: ApiClient,
    pub notifier: Rc<dyn Notifier>,
    pub confirmer: Rc<dyn Confirmer>,
    pub navigator: Rc<dyn Navigator>,
}

impl AppContext {
    /// Restaura la sesión guardada e instala el interceptor de auth
    pub fn new(
        config: AppConfig,
        transport: Rc<dyn HttpTransport>,
        storage: Rc<dyn KeyValueStorage>,
        notifier: Rc<dyn Notifier>,
        confirmer: Rc<dyn Confirmer>,
        navigator: Rc<dyn Navigator>,
    ) -> Self {
        let session = SessionStore::new(storage);
        session.restore();

        let api = ApiClient::new(&config, transport)
            .with_interceptor(Rc::new(AuthInterceptor::new(session.clone())));
        log::info!("🔧 API en {}", api.base_url());

        Self {
            config,
            session,
            api,
            notifier,
            confirmer,
            navigator,
        }
    }

    /// Colaboradores del navegador
    #[cfg(target_arch = "wasm32")]
    pub fn browser() -> Self {
        use crate::config::CONFIG;
        use crate::router::HistoryNavigator;
        use crate::services::{AlertNotifier, BrowserConfirmer, GlooTransport};
        use crate::utils::storage::BrowserStorage;

        Self::new(
            CONFIG.clone(),
            Rc::new(GlooTransport),
            Rc::new(BrowserStorage),
            Rc::new(AlertNotifier),
            Rc::new(BrowserConfirmer),
            Rc::new(HistoryNavigator),
        )
    }

    pub fn lang(&self) -> &str {
        &self.config.language
    }

    pub fn resources<R: Resource>(&self) -> ResourceClient<R> {
        ResourceClient::new(self.api.clone())
    }

    pub fn itineraries(&self) -> ItineraryService {
        ItineraryService::new(self.api.clone())
    }

    pub fn auth(&self) -> AuthService {
        AuthService::new(self.api.clone(), self.session.clone(), self.navigator.clone())
    }

    pub fn guard(&self) -> SessionGuard {
        SessionGuard::new(self.session.clone())
    }

    /// Pasa por el guard; devuelve la ruta a la que realmente se fue
    pub fn navigate(&self, route: AppRoute) -> AppRoute {
        let target = match self.guard().resolve(route) {
            Navigation::Allow(route) => route,
            Navigation::Redirect(route) => {
                log::info!("↪️ Redirigido a {}", route.path());
                route
            }
        };
        self.navigator.navigate(&target);
        target
    }

    pub fn open_path(&self, path: &str) -> AppRoute {
        self.navigate(AppRoute::parse(path))
    }

    pub fn login_viewmodel(&self) -> LoginViewModel {
        LoginViewModel::new(self.clone())
    }

    pub fn dashboard_viewmodel(&self, renderer: Option<Box<dyn GraphRenderer>>) -> DashboardViewModel {
        let vm = DashboardViewModel::new(self.clone());
        if let Some(renderer) = renderer {
            vm.attach_renderer(renderer);
        }
        vm
    }

    pub fn list_viewmodel<R: Resource>(&self) -> ListViewModel<R> {
        ListViewModel::new(self.clone())
    }

    pub fn form_viewmodel<S: FormSchema>(&self) -> FormViewModel<S> {
        FormViewModel::new(self.clone())
    }

    pub fn planner_viewmodel(&self) -> ItineraryPlannerViewModel {
        ItineraryPlannerViewModel::new(self.clone())
    }
}
