// ============================================================================
// SCREENS - Pantalla activa por ruta
// ============================================================================
// Cada navegación (de la vista o de un viewmodel) crea el viewmodel de la
// ruta y lo activa. La vista solo lee el estado como JSON.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::app::AppContext;
use crate::graph::GraphRenderer;
use crate::models::{
    CollectionPoint, EntityId, Itinerary, Neighborhood, Resource, Route, SortDirection, Street,
    Truck,
};
use crate::router::{AppRoute, Navigator, Section};
use crate::viewmodels::form::{
    CollectionPointForm, FieldValue, FormModel, FormSchema, FormState, FormViewModel,
    ItineraryForm, NeighborhoodForm, RouteForm, StreetForm, SubmitOutcome, TruckForm,
};
use crate::viewmodels::{
    CompleteOutcome, DashboardViewModel, DeleteOutcome, ItineraryPlannerViewModel, ListViewModel,
    LoginViewModel,
};

/// Apunta la última ruta pedida y delega en el navegador real
pub struct TrackingNavigator {
    inner: Rc<dyn Navigator>,
    pending: Cell<Option<AppRoute>>,
}

impl TrackingNavigator {
    pub fn new(inner: Rc<dyn Navigator>) -> Self {
        Self {
            inner,
            pending: Cell::new(None),
        }
    }

    /// Ruta pedida desde la última llamada, si la hay
    pub fn take(&self) -> Option<AppRoute> {
        self.pending.take()
    }
}

impl Navigator for TrackingNavigator {
    fn navigate(&self, route: &AppRoute) {
        self.pending.set(Some(*route));
        self.inner.navigate(route);
    }
}

/// Lo que la vista puede pedirle a cualquier listado paginado
#[async_trait(?Send)]
pub trait ListScreen {
    async fn activate(&self);
    async fn go_to_page(&self, page: u32);
    async fn sort_by(&self, field: &str, direction: SortDirection);
    async fn delete(&self, id: Option<EntityId>) -> DeleteOutcome;
    fn state_json(&self) -> Value;
}

#[async_trait(?Send)]
impl<R: Resource + Serialize> ListScreen for ListViewModel<R> {
    async fn activate(&self) {
        ListViewModel::activate(self).await;
    }

    async fn go_to_page(&self, page: u32) {
        ListViewModel::go_to_page(self, page).await;
    }

    async fn sort_by(&self, field: &str, direction: SortDirection) {
        self.set_sort(field, direction).await;
    }

    async fn delete(&self, id: Option<EntityId>) -> DeleteOutcome {
        ListViewModel::delete(self, id).await
    }

    fn state_json(&self) -> Value {
        to_json(&self.snapshot())
    }
}

/// Lo que la vista puede pedirle a cualquier formulario de alta/edición
#[async_trait(?Send)]
pub trait FormScreen {
    async fn activate(&self, id: Option<EntityId>);
    fn set_text(&self, name: &str, value: &str);
    fn set_checked(&self, name: &str, index: usize, checked: bool);
    /// `true` si se guardó
    async fn submit(&self) -> bool;
    fn cancel(&self);
    fn state_json(&self, lang: &str) -> Value;
}

#[async_trait(?Send)]
impl<S: FormSchema> FormScreen for FormViewModel<S> {
    async fn activate(&self, id: Option<EntityId>) {
        FormViewModel::activate(self, id).await;
    }

    fn set_text(&self, name: &str, value: &str) {
        FormViewModel::set_text(self, name, value);
    }

    fn set_checked(&self, name: &str, index: usize, checked: bool) {
        FormViewModel::set_checked(self, name, index, checked);
    }

    async fn submit(&self) -> bool {
        matches!(FormViewModel::submit(self).await, SubmitOutcome::Saved(_))
    }

    fn cancel(&self) {
        FormViewModel::cancel(self);
    }

    fn state_json(&self, lang: &str) -> Value {
        form_json(&self.snapshot(), lang)
    }
}

fn to_json<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or_else(|e| {
        log::error!("❌ Estado no serializable: {}", e);
        Value::Null
    })
}

/// Valor y mensajes visibles de cada control, en orden de declaración
fn fields_json(form: &FormModel, lang: &str) -> Value {
    let mut fields = Map::new();
    for name in form.names() {
        let Some(control) = form.control(name) else {
            continue;
        };
        let value = match &control.value {
            FieldValue::Text(text) => json!(text),
            FieldValue::Checks(checks) => json!(checks),
        };
        fields.insert(
            name.to_string(),
            json!({ "value": value, "errors": form.visible_errors(name, lang) }),
        );
    }
    Value::Object(fields)
}

fn form_json(state: &FormState, lang: &str) -> Value {
    json!({
        "phase": state.phase,
        "recordId": state.record_id,
        "fields": fields_json(&state.form, lang),
        "options": state.options,
        "formErrors": state.form_errors,
        "warning": state.warning,
    })
}

fn list_screen(ctx: &AppContext, section: Section) -> Rc<dyn ListScreen> {
    match section {
        Section::Neighborhoods => Rc::new(ctx.list_viewmodel::<Neighborhood>()),
        Section::Trucks => Rc::new(ctx.list_viewmodel::<Truck>()),
        Section::CollectionPoints => Rc::new(ctx.list_viewmodel::<CollectionPoint>()),
        Section::Routes => Rc::new(ctx.list_viewmodel::<Route>()),
        Section::Itineraries => Rc::new(ctx.list_viewmodel::<Itinerary>()),
        Section::Streets => Rc::new(ctx.list_viewmodel::<Street>()),
    }
}

fn form_screen(ctx: &AppContext, section: Section) -> Rc<dyn FormScreen> {
    match section {
        Section::Neighborhoods => Rc::new(ctx.form_viewmodel::<NeighborhoodForm>()),
        Section::Trucks => Rc::new(ctx.form_viewmodel::<TruckForm>()),
        Section::CollectionPoints => Rc::new(ctx.form_viewmodel::<CollectionPointForm>()),
        Section::Routes => Rc::new(ctx.form_viewmodel::<RouteForm>()),
        Section::Itineraries => Rc::new(ctx.form_viewmodel::<ItineraryForm>()),
        Section::Streets => Rc::new(ctx.form_viewmodel::<StreetForm>()),
    }
}

#[derive(Clone)]
pub enum Screen {
    /// Antes de la primera navegación
    Blank,
    Login(Rc<LoginViewModel>),
    Dashboard(Rc<DashboardViewModel>),
    List(Section, Rc<dyn ListScreen>),
    /// El listado de itinerarios es el planificador por día
    Planner(Rc<ItineraryPlannerViewModel>),
    Form(Section, Rc<dyn FormScreen>),
    NotFound,
}

type RendererFactory = Box<dyn Fn() -> Box<dyn GraphRenderer>>;

pub struct ScreenHost {
    ctx: AppContext,
    tracker: Rc<TrackingNavigator>,
    route: Cell<Option<AppRoute>>,
    screen: RefCell<Screen>,
    graph_renderer: Option<RendererFactory>,
}

impl ScreenHost {
    /// Envuelve el navegador del contexto para seguir las navegaciones
    pub fn new(ctx: AppContext) -> Self {
        let tracker = Rc::new(TrackingNavigator::new(ctx.navigator.clone()));
        let ctx = AppContext {
            navigator: tracker.clone(),
            ..ctx
        };
        Self {
            ctx,
            tracker,
            route: Cell::new(None),
            screen: RefCell::new(Screen::Blank),
            graph_renderer: None,
        }
    }

    /// Widget nuevo para cada entrada al dashboard
    pub fn with_graph_renderer(
        mut self,
        factory: impl Fn() -> Box<dyn GraphRenderer> + 'static,
    ) -> Self {
        self.graph_renderer = Some(Box::new(factory));
        self
    }

    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    pub fn route(&self) -> Option<AppRoute> {
        self.route.get()
    }

    pub fn screen(&self) -> Screen {
        self.screen.borrow().clone()
    }

    /// Navegación pedida por la vista; devuelve la ruta en la que se acabó
    pub async fn open(&self, path: &str) -> AppRoute {
        self.ctx.open_path(path);
        self.follow().await;
        self.route().unwrap_or(AppRoute::NotFound)
    }

    /// Vuelve a entrar en la ruta actual (re-fetch)
    pub async fn refresh(&self) {
        if let Some(route) = self.route() {
            self.enter(route).await;
            self.follow().await;
        }
    }

    /// Entra en cada ruta pedida hasta que no quede ninguna pendiente
    async fn follow(&self) {
        while let Some(route) = self.tracker.take() {
            self.enter(route).await;
        }
    }

    fn build(&self, route: AppRoute) -> Screen {
        match route {
            AppRoute::Login => Screen::Login(Rc::new(self.ctx.login_viewmodel())),
            AppRoute::Dashboard => {
                let renderer = self.graph_renderer.as_ref().map(|factory| factory());
                Screen::Dashboard(Rc::new(self.ctx.dashboard_viewmodel(renderer)))
            }
            AppRoute::List(Section::Itineraries) => {
                Screen::Planner(Rc::new(self.ctx.planner_viewmodel()))
            }
            AppRoute::List(section) => Screen::List(section, list_screen(&self.ctx, section)),
            AppRoute::New(section) | AppRoute::Edit(section, _) => {
                Screen::Form(section, form_screen(&self.ctx, section))
            }
            AppRoute::NotFound => Screen::NotFound,
        }
    }

    async fn enter(&self, route: AppRoute) {
        log::info!("🖥️ Pantalla {}", route.path());
        let screen = self.build(route);
        self.route.set(Some(route));
        *self.screen.borrow_mut() = screen.clone();

        match (screen, route) {
            (Screen::Dashboard(vm), _) => vm.activate().await,
            (Screen::List(_, vm), _) => vm.activate().await,
            (Screen::Planner(vm), _) => vm.activate().await,
            (Screen::Form(_, vm), AppRoute::Edit(_, id)) => vm.activate(Some(id)).await,
            (Screen::Form(_, vm), _) => vm.activate(None).await,
            (Screen::Blank | Screen::Login(_) | Screen::NotFound, _) => {}
        }
    }

    /// `true` si se abrió sesión (y ya se está en el dashboard)
    pub async fn login(&self, username: &str, password: &str) -> bool {
        let Screen::Login(vm) = self.screen() else {
            log::warn!("⚠️ Login fuera de la pantalla de login");
            return false;
        };
        vm.set_username(username);
        vm.set_password(password);
        let user = vm.submit().await;
        self.follow().await;
        user.is_some()
    }

    pub async fn logout(&self) {
        self.ctx.auth().logout();
        self.follow().await;
    }

    pub async fn go_to_page(&self, page: u32) {
        if let Screen::List(_, vm) = self.screen() {
            vm.go_to_page(page).await;
        }
    }

    pub async fn sort_by(&self, field: &str, direction: SortDirection) {
        if let Screen::List(_, vm) = self.screen() {
            vm.sort_by(field, direction).await;
        }
    }

    /// `None` si la pantalla actual no lista nada
    pub async fn delete(&self, id: Option<EntityId>) -> Option<DeleteOutcome> {
        match self.screen() {
            Screen::List(_, vm) => Some(vm.delete(id).await),
            Screen::Planner(vm) => Some(vm.delete(id).await),
            _ => None,
        }
    }

    pub fn set_field(&self, name: &str, value: &str) {
        if let Screen::Form(_, vm) = self.screen() {
            vm.set_text(name, value);
        }
    }

    pub fn set_checked(&self, name: &str, index: usize, checked: bool) {
        if let Screen::Form(_, vm) = self.screen() {
            vm.set_checked(name, index, checked);
        }
    }

    /// `true` si se guardó (y ya se está en el listado)
    pub async fn submit(&self) -> bool {
        let Screen::Form(_, vm) = self.screen() else {
            return false;
        };
        let saved = vm.submit().await;
        self.follow().await;
        saved
    }

    pub async fn cancel(&self) {
        if let Screen::Form(_, vm) = self.screen() {
            vm.cancel();
            self.follow().await;
        }
    }

    pub async fn select_date(&self, date: NaiveDate) {
        if let Screen::Planner(vm) = self.screen() {
            vm.select_date(date).await;
        }
    }

    pub async fn complete(&self, id: EntityId) -> Option<CompleteOutcome> {
        match self.screen() {
            Screen::Planner(vm) => Some(vm.complete(id).await),
            _ => None,
        }
    }

    /// `{screen, path, title, state}` para pintar la pantalla actual
    pub fn state_json(&self) -> Value {
        let lang = self.ctx.lang();
        let (screen, state) = match self.screen() {
            Screen::Blank => ("blank", Value::Null),
            Screen::Login(vm) => {
                let login = vm.snapshot();
                (
                    "login",
                    json!({
                        "fields": fields_json(&login.form, lang),
                        "submitting": login.submitting,
                        "error": login.error,
                    }),
                )
            }
            Screen::Dashboard(vm) => ("dashboard", to_json(&vm.snapshot())),
            Screen::List(_, vm) => ("list", vm.state_json()),
            Screen::Planner(vm) => ("planner", to_json(&vm.snapshot())),
            Screen::Form(_, vm) => ("form", vm.state_json(lang)),
            Screen::NotFound => ("notFound", Value::Null),
        };
        let route = self.route();
        json!({
            "screen": screen,
            "path": route.map(|r| r.path()),
            "title": route.map(|r| r.title()),
            "state": state,
        })
    }
}
