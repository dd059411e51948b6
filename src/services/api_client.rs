// ============================================================================
// API CLIENT - SOLO COMUNICACIÓN HTTP (Stateless)
// ============================================================================
// NO tiene lógica de negocio: construye la petición, aplica interceptores,
// envía y clasifica la respuesta en ApiError
// ============================================================================

use std::rc::Rc;

use serde::{de::DeserializeOwned, Serialize};

use crate::config::AppConfig;
use crate::error::{ApiError, ApiResult};
use crate::services::http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
use crate::state::session_state::SessionStore;

/// Modifica cada petición saliente antes del envío
pub trait RequestInterceptor {
    fn intercept(&self, request: &mut HttpRequest);
}

/// Adjunta `Authorization: Bearer <token>` si hay sesión
pub struct AuthInterceptor {
    session: SessionStore,
}

impl AuthInterceptor {
    pub fn new(session: SessionStore) -> Self {
        Self { session }
    }
}

impl RequestInterceptor for AuthInterceptor {
    fn intercept(&self, request: &mut HttpRequest) {
        if let Some(token) = self.session.token() {
            request.set_header("Authorization", &format!("Bearer {}", token));
        }
    }
}

/// Cliente API - SOLO comunicación HTTP (stateless)
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    transport: Rc<dyn HttpTransport>,
    interceptors: Vec<Rc<dyn RequestInterceptor>>,
}

impl ApiClient {
    pub fn new(config: &AppConfig, transport: Rc<dyn HttpTransport>) -> Self {
        Self {
            base_url: config.base_url().to_string(),
            transport,
            interceptors: Vec::new(),
        }
    }

    pub fn with_interceptor(mut self, interceptor: Rc<dyn RequestInterceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> ApiResult<T> {
        let request = HttpRequest::new(HttpMethod::Get, self.url(path)).with_query(query);
        let response = self.execute(request).await?;
        decode(&response)
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> ApiResult<T> {
        let request = HttpRequest::new(HttpMethod::Post, self.url(path))
            .with_json(body)?;
        let response = self.execute(request).await?;
        decode(&response)
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> ApiResult<T> {
        let request = HttpRequest::new(HttpMethod::Put, self.url(path))
            .with_json(body)?;
        let response = self.execute(request).await?;
        decode(&response)
    }

    /// PUT sin cuerpo; ignora la respuesta
    pub async fn put_empty(&self, path: &str) -> ApiResult<()> {
        let request = HttpRequest::new(HttpMethod::Put, self.url(path));
        self.execute(request).await.map(|_| ())
    }

    /// DELETE; 204 o 200 con cualquier cuerpo es éxito
    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        let request = HttpRequest::new(HttpMethod::Delete, self.url(path));
        self.execute(request).await.map(|_| ())
    }

    async fn execute(&self, mut request: HttpRequest) -> ApiResult<HttpResponse> {
        for interceptor in &self.interceptors {
            interceptor.intercept(&mut request);
        }

        log::debug!("🌐 {} {}", request.method.as_str(), request.url);
        let method = request.method;
        let url = request.url.clone();

        let response = self.transport.send(request).await.map_err(|e| {
            log::error!("❌ {} {} sin respuesta: {}", method.as_str(), url, e);
            ApiError::Network(e)
        })?;

        if response.is_success() {
            Ok(response)
        } else {
            let error = ApiError::from_response(response.status, &response.body);
            log::warn!("⚠️ {} {} -> HTTP {}: {}", method.as_str(), url, response.status, error);
            Err(error)
        }
    }
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> ApiResult<T> {
    serde_json::from_str(&response.body).map_err(|e| {
        log::error!("❌ Parse error (HTTP {}): {}", response.status, e);
        ApiError::unexpected_shape(response.status, e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{test_context, MockTransport};
    use std::collections::BTreeMap;

    #[tokio::test]
    async fn unserializable_body_is_not_a_network_failure() {
        let transport = MockTransport::new();
        let fixture = test_context(transport.clone());
        // Claves no-string: serde_json no puede serializar el mapa
        let body: BTreeMap<(i64, i64), i64> = BTreeMap::from([((1, 2), 3)]);

        let result: ApiResult<serde_json::Value> = fixture.ctx.api.post("/streets", &body).await;

        assert!(matches!(result, Err(ApiError::Serialization(_))));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn transport_failure_is_a_network_error() {
        let transport = MockTransport::new();
        transport.reply_network_error(HttpMethod::Delete, "/trucks/1", "connection refused");
        let fixture = test_context(transport.clone());

        let result = fixture.ctx.api.delete("/trucks/1").await;

        assert_eq!(result, Err(ApiError::Network("connection refused".into())));
    }
}
