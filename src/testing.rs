// ============================================================================
// TESTING - Transporte y colaboradores en memoria
// ============================================================================

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;
use futures::channel::oneshot;

use crate::app::AppContext;
use crate::config::AppConfig;
use crate::graph::GraphRenderer;
use crate::models::GraphData;
use crate::router::{AppRoute, Navigator};
use crate::services::{Confirmer, HttpMethod, HttpRequest, HttpResponse, HttpTransport, Notifier};
use crate::utils::constants::{AUTH_TOKEN_KEY, CURRENT_USER_KEY};
use crate::utils::storage::{KeyValueStorage, MemoryStorage};

pub const TEST_BASE_URL: &str = "http://greenlog.test/api";
pub const TEST_TOKEN: &str = "test-token";

enum Reply {
    Response(HttpResponse),
    NetworkError(String),
    Deferred(oneshot::Receiver<HttpResponse>),
}

struct Rule {
    method: HttpMethod,
    path: String,
    reply: Reply,
}

/// Respuestas guionizadas por método + ruta, consumidas en orden
#[derive(Clone, Default)]
pub struct MockTransport {
    rules: Rc<RefCell<VecDeque<Rule>>>,
    requests: Rc<RefCell<Vec<HttpRequest>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn json_response(status: u16, body: serde_json::Value) -> HttpResponse {
        HttpResponse::new(status, body.to_string())
    }

    fn push(&self, method: HttpMethod, path: &str, reply: Reply) {
        self.rules.borrow_mut().push_back(Rule {
            method,
            path: path.to_string(),
            reply,
        });
    }

    pub fn reply_json(&self, method: HttpMethod, path: &str, body: serde_json::Value) {
        self.push(method, path, Reply::Response(Self::json_response(200, body)));
    }

    pub fn reply_status(&self, method: HttpMethod, path: &str, status: u16, body: &str) {
        self.push(method, path, Reply::Response(HttpResponse::new(status, body)));
    }

    pub fn reply_network_error(&self, method: HttpMethod, path: &str, message: &str) {
        self.push(method, path, Reply::NetworkError(message.to_string()));
    }

    /// La respuesta llega cuando el test la envía por el canal
    pub fn reply_deferred(
        &self,
        method: HttpMethod,
        path: &str,
        receiver: oneshot::Receiver<HttpResponse>,
    ) {
        self.push(method, path, Reply::Deferred(receiver));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.borrow().last().cloned()
    }
}

#[async_trait(?Send)]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, String> {
        let path = request
            .url
            .strip_prefix(TEST_BASE_URL)
            .unwrap_or(&request.url)
            .to_string();
        let method = request.method;
        self.requests.borrow_mut().push(request);

        let rule = {
            let mut rules = self.rules.borrow_mut();
            let position = rules
                .iter()
                .position(|rule| rule.method == method && rule.path == path);
            match position.and_then(|index| rules.remove(index)) {
                Some(rule) => rule,
                None => panic!("unexpected request: {} {}", method.as_str(), path),
            }
        };

        match rule.reply {
            Reply::Response(response) => Ok(response),
            Reply::NetworkError(message) => Err(message),
            Reply::Deferred(receiver) => receiver
                .await
                .map_err(|_| "deferred reply dropped".to_string()),
        }
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    successes: RefCell<Vec<String>>,
    errors: RefCell<Vec<String>>,
    infos: RefCell<Vec<String>>,
}

impl RecordingNotifier {
    pub fn successes(&self) -> Vec<String> {
        self.successes.borrow().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.borrow().clone()
    }

    pub fn infos(&self) -> Vec<String> {
        self.infos.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.successes.borrow_mut().push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.errors.borrow_mut().push(message.to_string());
    }

    fn info(&self, message: &str) {
        self.infos.borrow_mut().push(message.to_string());
    }
}

/// Responde siempre lo mismo (por defecto "sí") y guarda las preguntas
pub struct FixedConfirmer {
    answer: Cell<bool>,
    questions: RefCell<Vec<String>>,
}

impl Default for FixedConfirmer {
    fn default() -> Self {
        Self {
            answer: Cell::new(true),
            questions: RefCell::new(Vec::new()),
        }
    }
}

impl FixedConfirmer {
    pub fn answer(&self, answer: bool) {
        self.answer.set(answer);
    }

    pub fn questions(&self) -> Vec<String> {
        self.questions.borrow().clone()
    }
}

impl Confirmer for FixedConfirmer {
    fn confirm(&self, message: &str) -> bool {
        self.questions.borrow_mut().push(message.to_string());
        self.answer.get()
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    routes: RefCell<Vec<AppRoute>>,
}

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<AppRoute> {
        self.routes.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: &AppRoute) {
        self.routes.borrow_mut().push(*route);
    }
}

#[derive(Clone, Default)]
pub struct RecordingGraphRenderer {
    rendered: Rc<RefCell<Vec<GraphData>>>,
}

impl RecordingGraphRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rendered(&self) -> Vec<GraphData> {
        self.rendered.borrow().clone()
    }
}

impl GraphRenderer for RecordingGraphRenderer {
    fn render(&mut self, graph: &GraphData) -> Result<(), String> {
        self.rendered.borrow_mut().push(graph.clone());
        Ok(())
    }
}

pub struct Fixture {
    pub ctx: AppContext,
    pub storage: Rc<MemoryStorage>,
    pub notifier: Rc<RecordingNotifier>,
    pub confirmer: Rc<FixedConfirmer>,
    pub navigator: Rc<RecordingNavigator>,
}

fn test_config() -> AppConfig {
    AppConfig {
        api_base_url: format!("{}/", TEST_BASE_URL),
        language: "EN".to_string(),
        ..AppConfig::default()
    }
}

fn build_fixture(transport: MockTransport, storage: Rc<MemoryStorage>) -> Fixture {
    let notifier = Rc::new(RecordingNotifier::default());
    let confirmer = Rc::new(FixedConfirmer::default());
    let navigator = Rc::new(RecordingNavigator::default());
    let ctx = AppContext::new(
        test_config(),
        Rc::new(transport),
        storage.clone(),
        notifier.clone(),
        confirmer.clone(),
        navigator.clone(),
    );
    Fixture {
        ctx,
        storage,
        notifier,
        confirmer,
        navigator,
    }
}

/// Contexto con una sesión guardada (se restaura al crearlo)
pub fn test_context(transport: MockTransport) -> Fixture {
    let storage = Rc::new(MemoryStorage::new());
    storage.set(AUTH_TOKEN_KEY, TEST_TOKEN).unwrap();
    storage
        .set(CURRENT_USER_KEY, r#"{"id":"1","username":"admin"}"#)
        .unwrap();
    build_fixture(transport, storage)
}

/// Contexto sin sesión
pub fn anonymous_context(transport: MockTransport) -> Fixture {
    build_fixture(transport, Rc::new(MemoryStorage::new()))
}
