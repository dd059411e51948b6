// ============================================================================
// ROUTER - Rutas de la app + guard de sesión
// ============================================================================
// El guard solo mira si hay token guardado; la caducidad la decide el backend
// ============================================================================

use crate::models::EntityId;
use crate::state::session_state::SessionStore;
use crate::utils::constants::APP_NAME;

/// Secciones CRUD del panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Neighborhoods,
    Trucks,
    CollectionPoints,
    Routes,
    Itineraries,
    Streets,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Neighborhoods,
        Section::Trucks,
        Section::CollectionPoints,
        Section::Routes,
        Section::Itineraries,
        Section::Streets,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Section::Neighborhoods => "neighborhoods",
            Section::Trucks => "trucks",
            Section::CollectionPoints => "collection-points",
            Section::Routes => "routes",
            Section::Itineraries => "itineraries",
            Section::Streets => "streets",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.slug() == slug)
    }

    fn plural(&self) -> &'static str {
        match self {
            Section::Neighborhoods => "Neighborhoods",
            Section::Trucks => "Trucks",
            Section::CollectionPoints => "Collection Points",
            Section::Routes => "Routes",
            Section::Itineraries => "Itinerary Planner",
            Section::Streets => "Streets",
        }
    }

    fn singular(&self) -> &'static str {
        match self {
            Section::Neighborhoods => "Neighborhood",
            Section::Trucks => "Truck",
            Section::CollectionPoints => "Collection Point",
            Section::Routes => "Route",
            Section::Itineraries => "Itinerary",
            Section::Streets => "Street",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppRoute {
    Login,
    Dashboard,
    List(Section),
    New(Section),
    Edit(Section, EntityId),
    NotFound,
}

impl AppRoute {
    /// `""`, `"/"` y `"/dashboard"` llevan al dashboard; lo desconocido a NotFound
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] | ["dashboard"] => AppRoute::Dashboard,
            ["login"] => AppRoute::Login,
            [slug] => Section::from_slug(slug).map_or(AppRoute::NotFound, AppRoute::List),
            [slug, "new"] => Section::from_slug(slug).map_or(AppRoute::NotFound, AppRoute::New),
            [slug, "edit", id] => match (Section::from_slug(slug), id.parse::<EntityId>()) {
                (Some(section), Ok(id)) if id > 0 => AppRoute::Edit(section, id),
                _ => AppRoute::NotFound,
            },
            _ => AppRoute::NotFound,
        }
    }

    pub fn path(&self) -> String {
        match self {
            AppRoute::Login => "/login".to_string(),
            AppRoute::Dashboard => "/dashboard".to_string(),
            AppRoute::List(section) => format!("/{}", section.slug()),
            AppRoute::New(section) => format!("/{}/new", section.slug()),
            AppRoute::Edit(section, id) => format!("/{}/edit/{}", section.slug(), id),
            AppRoute::NotFound => "/not-found".to_string(),
        }
    }

    pub fn title(&self) -> String {
        let page = match self {
            AppRoute::Login => "Login".to_string(),
            AppRoute::Dashboard => "Dashboard".to_string(),
            AppRoute::List(section) => section.plural().to_string(),
            AppRoute::New(section) => format!("New {}", section.singular()),
            AppRoute::Edit(section, _) => format!("Edit {}", section.singular()),
            AppRoute::NotFound => "Page Not Found".to_string(),
        };
        format!("{} - {}", page, APP_NAME)
    }

    pub fn requires_auth(&self) -> bool {
        !matches!(self, AppRoute::Login | AppRoute::NotFound)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Allow(AppRoute),
    Redirect(AppRoute),
}

impl Navigation {
    pub fn target(&self) -> AppRoute {
        match self {
            Navigation::Allow(route) | Navigation::Redirect(route) => *route,
        }
    }
}

#[derive(Clone)]
pub struct SessionGuard {
    session: SessionStore,
}

impl SessionGuard {
    pub fn new(session: SessionStore) -> Self {
        Self { session }
    }

    pub fn resolve(&self, route: AppRoute) -> Navigation {
        if route.requires_auth() && !self.session.is_authenticated() {
            log::warn!("🔒 {} requiere sesión, redirigiendo a login", route.path());
            Navigation::Redirect(AppRoute::Login)
        } else {
            Navigation::Allow(route)
        }
    }
}

/// Cambio de vista (history del navegador o registro en tests)
pub trait Navigator {
    fn navigate(&self, route: &AppRoute);
}

#[cfg(target_arch = "wasm32")]
#[derive(Clone, Copy, Debug, Default)]
pub struct HistoryNavigator;

#[cfg(target_arch = "wasm32")]
impl HistoryNavigator {
    pub fn current_path() -> String {
        web_sys::window()
            .and_then(|win| win.location().pathname().ok())
            .unwrap_or_default()
    }
}

#[cfg(target_arch = "wasm32")]
impl Navigator for HistoryNavigator {
    fn navigate(&self, route: &AppRoute) {
        let Some(win) = web_sys::window() else {
            return;
        };
        if let Ok(history) = win.history() {
            let path = route.path();
            if let Err(e) = history.push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&path)) {
                log::error!("❌ Error navegando a {}: {:?}", path, e);
            }
        }
        if let Some(document) = win.document() {
            document.set_title(&route.title());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;
    use crate::utils::storage::MemoryStorage;
    use std::rc::Rc;

    #[test]
    fn paths_parse_back_to_routes() {
        let routes = [
            AppRoute::Login,
            AppRoute::Dashboard,
            AppRoute::List(Section::CollectionPoints),
            AppRoute::New(Section::Trucks),
            AppRoute::Edit(Section::Streets, 42),
        ];
        for route in routes {
            assert_eq!(AppRoute::parse(&route.path()), route);
        }
    }

    #[test]
    fn empty_and_unknown_paths() {
        assert_eq!(AppRoute::parse(""), AppRoute::Dashboard);
        assert_eq!(AppRoute::parse("/"), AppRoute::Dashboard);
        assert_eq!(AppRoute::parse("/bairros"), AppRoute::NotFound);
        assert_eq!(AppRoute::parse("/trucks/edit/abc"), AppRoute::NotFound);
        assert_eq!(AppRoute::parse("/trucks/edit/0"), AppRoute::NotFound);
        assert_eq!(AppRoute::parse("/routes?page=2"), AppRoute::List(Section::Routes));
    }

    #[test]
    fn titles_carry_the_app_name() {
        assert_eq!(AppRoute::List(Section::Itineraries).title(), "Itinerary Planner - GreenLog");
        assert_eq!(AppRoute::Edit(Section::Trucks, 1).title(), "Edit Truck - GreenLog");
    }

    #[test]
    fn guard_redirects_without_token() {
        let session = SessionStore::new(Rc::new(MemoryStorage::new()));
        let guard = SessionGuard::new(session.clone());

        assert_eq!(
            guard.resolve(AppRoute::List(Section::Trucks)),
            Navigation::Redirect(AppRoute::Login)
        );
        assert_eq!(guard.resolve(AppRoute::Login), Navigation::Allow(AppRoute::Login));
        assert_eq!(guard.resolve(AppRoute::NotFound), Navigation::Allow(AppRoute::NotFound));

        session.start(
            "tok".into(),
            User {
                id: "1".into(),
                username: "admin".into(),
            },
        );
        assert_eq!(guard.resolve(AppRoute::Dashboard), Navigation::Allow(AppRoute::Dashboard));
    }
}
