// ============================================================================
// DASHBOARD VIEWMODEL - Resumen + grafo de bairros
// ============================================================================
// Dos grupos de carga independientes. Cada rama del resumen puede fallar
// sola; el grafo necesita bairros y ruas a la vez.
// ============================================================================

use std::cell::RefCell;

use chrono::NaiveDate;
use futures::join;
use serde::Serialize;

use crate::app::AppContext;
use crate::error::{ApiError, ApiResult};
use crate::graph::GraphRenderer;
use crate::models::{CollectionPoint, GraphData, Neighborhood, Resource, Route, Street, Truck};
use crate::services::ItineraryService;
use crate::state::ReactiveState;
use crate::utils::i18n::t;

/// Resultado de una rama del fan-out
#[derive(Debug, Clone, PartialEq)]
pub enum BranchResult<T> {
    Loaded(T),
    Failed(ApiError),
}

impl<T> BranchResult<T> {
    pub fn is_failed(&self) -> bool {
        matches!(self, BranchResult::Failed(_))
    }

    /// Valor cargado o el de reserva
    pub fn or(self, fallback: T) -> T {
        match self {
            BranchResult::Loaded(value) => value,
            BranchResult::Failed(_) => fallback,
        }
    }
}

impl<T> From<ApiResult<T>> for BranchResult<T> {
    fn from(result: ApiResult<T>) -> Self {
        match result {
            Ok(value) => BranchResult::Loaded(value),
            Err(e) => BranchResult::Failed(e),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub trucks: u64,
    pub collection_points: u64,
    pub routes: u64,
    pub itineraries_today: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadGroup<T> {
    pub loading: bool,
    pub error: Option<String>,
    pub data: T,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardState {
    pub date: NaiveDate,
    pub summary: LoadGroup<DashboardSummary>,
    pub graph: LoadGroup<GraphData>,
}

/// Une las cuatro ramas; las fallidas cuentan 0
pub fn reduce_summary(
    trucks: BranchResult<u64>,
    collection_points: BranchResult<u64>,
    routes: BranchResult<u64>,
    itineraries_today: BranchResult<u64>,
    lang: &str,
) -> LoadGroup<DashboardSummary> {
    let failed = [&trucks, &collection_points, &routes, &itineraries_today]
        .iter()
        .filter(|branch| branch.is_failed())
        .count();
    if failed > 0 {
        log::warn!("⚠️ Resumen parcial: {} de 4 ramas fallaron", failed);
    }

    LoadGroup {
        loading: false,
        error: (failed > 0).then(|| t("summary_partial", lang)),
        data: DashboardSummary {
            trucks: trucks.or(0),
            collection_points: collection_points.or(0),
            routes: routes.or(0),
            itineraries_today: itineraries_today.or(0),
        },
    }
}

pub struct DashboardViewModel {
    ctx: AppContext,
    itineraries: ItineraryService,
    state: ReactiveState<DashboardState>,
    renderer: RefCell<Option<Box<dyn GraphRenderer>>>,
}

impl DashboardViewModel {
    pub fn new(ctx: AppContext) -> Self {
        let today = chrono::Local::now().date_naive();
        Self {
            itineraries: ctx.itineraries(),
            ctx,
            state: ReactiveState::new(DashboardState {
                date: today,
                summary: LoadGroup::default(),
                graph: LoadGroup::default(),
            }),
            renderer: RefCell::new(None),
        }
    }

    /// Widget donde se dibuja el grafo (opcional)
    pub fn attach_renderer(&self, renderer: Box<dyn GraphRenderer>) {
        *self.renderer.borrow_mut() = Some(renderer);
    }

    pub fn state(&self) -> &ReactiveState<DashboardState> {
        &self.state
    }

    pub fn snapshot(&self) -> DashboardState {
        self.state.snapshot()
    }

    pub async fn activate(&self) {
        self.activate_on(chrono::Local::now().date_naive()).await;
    }

    /// "Hoy" explícito para los itinerarios del día
    pub async fn activate_on(&self, date: NaiveDate) {
        log::info!("📊 Cargando dashboard ({})", date);
        self.state.update(|s| {
            s.date = date;
            s.summary.loading = true;
            s.summary.error = None;
            s.graph.loading = true;
            s.graph.error = None;
        });
        join!(self.load_summary(date), self.load_graph());
    }

    async fn total_of<R: Resource>(&self) -> ApiResult<u64> {
        self.ctx
            .resources::<R>()
            .list(0, 1)
            .await
            .map(|page| page.total_elements)
    }

    async fn load_summary(&self, date: NaiveDate) {
        let (trucks, collection_points, routes, today) = join!(
            self.total_of::<Truck>(),
            self.total_of::<CollectionPoint>(),
            self.total_of::<Route>(),
            self.itineraries.by_date(date),
        );
        let summary = reduce_summary(
            trucks.into(),
            collection_points.into(),
            routes.into(),
            today.map(|list| list.len() as u64).into(),
            self.ctx.lang(),
        );
        self.state.update(|s| s.summary = summary);
    }

    async fn load_graph(&self) {
        let size = self.ctx.config.lookup_page_size;
        let neighborhoods = self.ctx.resources::<Neighborhood>();
        let streets = self.ctx.resources::<Street>();
        let (neighborhoods, streets) = join!(neighborhoods.list(0, size), streets.list(0, size));

        let graph = match (neighborhoods, streets) {
            (Ok(neighborhoods), Ok(streets)) => {
                GraphData::from_network(&neighborhoods.content, &streets.content)
            }
            (Err(e), _) | (_, Err(e)) => {
                log::error!("❌ Error cargando datos del grafo: {}", e);
                self.fail_graph();
                return;
            }
        };

        let rendered = match self.renderer.borrow_mut().as_mut() {
            Some(renderer) => renderer.render(&graph),
            None => Ok(()),
        };
        if let Err(e) = rendered {
            log::error!("❌ {}", e);
            self.fail_graph();
            return;
        }

        self.state.update(|s| {
            s.graph = LoadGroup {
                loading: false,
                error: None,
                data: graph,
            }
        });
    }

    fn fail_graph(&self) {
        let message = t("graph_failed", self.ctx.lang());
        self.state.update(|s| {
            s.graph = LoadGroup {
                loading: false,
                error: Some(message),
                data: GraphData::default(),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::HttpMethod;
    use crate::testing::{test_context, MockTransport, RecordingGraphRenderer};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn total_page(total: u64) -> serde_json::Value {
        json!({"content": [], "pageNumber": 0, "pageSize": 1, "totalElements": total,
               "totalPages": total, "last": total == 0})
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn reducer_counts_failed_branches_as_zero() {
        let group = reduce_summary(
            BranchResult::Loaded(4),
            BranchResult::Failed(ApiError::Network("down".into())),
            BranchResult::Loaded(2),
            BranchResult::Loaded(1),
            "EN",
        );
        assert_eq!(
            group.data,
            DashboardSummary { trucks: 4, collection_points: 0, routes: 2, itineraries_today: 1 }
        );
        assert_eq!(group.error.as_deref(), Some("Some summary data could not be loaded."));

        let clean = reduce_summary(
            BranchResult::Loaded(1),
            BranchResult::Loaded(1),
            BranchResult::Loaded(1),
            BranchResult::Loaded(0),
            "EN",
        );
        assert_eq!(clean.error, None);
    }

    #[tokio::test]
    async fn partial_failure_keeps_the_other_counts_and_the_graph() {
        let transport = MockTransport::new();
        transport.reply_json(HttpMethod::Get, "/trucks", total_page(7));
        transport.reply_status(HttpMethod::Get, "/collection-points", 500, "");
        transport.reply_json(HttpMethod::Get, "/routes", total_page(3));
        transport.reply_json(
            HttpMethod::Get,
            "/itineraries/date/2024-06-01",
            json!([
                {"id": 1, "routeId": 1, "truckId": 1, "date": "2024-06-01"},
                {"id": 2, "routeId": 2, "truckId": 2, "date": "2024-06-01"}
            ]),
        );
        transport.reply_json(
            HttpMethod::Get,
            "/neighborhoods",
            json!({"content": [{"id": 1, "name": "Centro"}, {"id": 2, "name": "Vila"}],
                   "pageNumber": 0, "pageSize": 1000, "totalElements": 2, "totalPages": 1, "last": true}),
        );
        transport.reply_json(
            HttpMethod::Get,
            "/streets",
            json!({"content": [{"id": 9, "originId": 1, "destinationId": 2, "distance": 1.2}],
                   "pageNumber": 0, "pageSize": 1000, "totalElements": 1, "totalPages": 1, "last": true}),
        );
        let fixture = test_context(transport.clone());
        let renderer = RecordingGraphRenderer::new();
        let vm = DashboardViewModel::new(fixture.ctx.clone());
        vm.attach_renderer(Box::new(renderer.clone()));

        vm.activate_on(day()).await;

        let state = vm.snapshot();
        assert_eq!(
            state.summary.data,
            DashboardSummary { trucks: 7, collection_points: 0, routes: 3, itineraries_today: 2 }
        );
        assert!(!state.summary.loading);
        assert!(state.summary.error.is_some());

        assert_eq!(state.graph.error, None);
        assert_eq!(state.graph.data.nodes.len(), 2);
        assert_eq!(state.graph.data.edges[0].label.as_deref(), Some("1.2 km"));
        assert_eq!(renderer.rendered(), vec![state.graph.data.clone()]);
    }

    #[tokio::test]
    async fn graph_fails_when_either_source_fails() {
        let transport = MockTransport::new();
        for path in ["/trucks", "/collection-points", "/routes"] {
            transport.reply_json(HttpMethod::Get, path, total_page(1));
        }
        transport.reply_json(HttpMethod::Get, "/itineraries/date/2024-06-01", json!([]));
        transport.reply_json(
            HttpMethod::Get,
            "/neighborhoods",
            json!({"content": [{"id": 1, "name": "Centro"}], "pageNumber": 0, "pageSize": 1000,
                   "totalElements": 1, "totalPages": 1, "last": true}),
        );
        transport.reply_network_error(HttpMethod::Get, "/streets", "timeout");
        let fixture = test_context(transport.clone());
        let vm = DashboardViewModel::new(fixture.ctx.clone());

        vm.activate_on(day()).await;

        let state = vm.snapshot();
        assert_eq!(state.summary.error, None);
        assert_eq!(state.summary.data.itineraries_today, 0);
        assert_eq!(state.graph.error.as_deref(), Some("Could not load the neighborhood graph."));
        assert!(state.graph.data.is_empty());
        assert!(!state.graph.loading);
    }

    #[tokio::test]
    async fn summary_lists_ask_for_a_single_row() {
        let transport = MockTransport::new();
        for path in ["/trucks", "/collection-points", "/routes"] {
            transport.reply_json(HttpMethod::Get, path, total_page(0));
        }
        transport.reply_json(HttpMethod::Get, "/itineraries/date/2024-06-01", json!([]));
        transport.reply_status(HttpMethod::Get, "/neighborhoods", 500, "");
        transport.reply_status(HttpMethod::Get, "/streets", 500, "");
        let fixture = test_context(transport.clone());
        let vm = DashboardViewModel::new(fixture.ctx.clone());

        vm.activate_on(day()).await;

        let sizes: Vec<Option<String>> = transport
            .requests()
            .iter()
            .filter(|r| r.url.ends_with("/trucks") || r.url.ends_with("/routes"))
            .map(|r| r.query_param("size").map(str::to_string))
            .collect();
        assert_eq!(sizes, vec![Some("1".to_string()), Some("1".to_string())]);
    }
}
