// ============================================================================
// SERVICES - SOLO comunicación con el backend
// ============================================================================

pub mod api_client;
pub mod auth_service;
pub mod http;
pub mod itinerary_service;
pub mod resource_client;
pub mod ui;

pub use api_client::{ApiClient, AuthInterceptor, RequestInterceptor};
pub use auth_service::AuthService;
pub use http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
pub use itinerary_service::ItineraryService;
pub use resource_client::ResourceClient;
pub use ui::{Confirmer, LogNotifier, Notifier};

#[cfg(target_arch = "wasm32")]
pub use http::GlooTransport;
#[cfg(target_arch = "wasm32")]
pub use ui::{AlertNotifier, BrowserConfirmer};
