// ============================================================================
// AUTH SERVICE - Login / logout contra el backend
// ============================================================================

use std::rc::Rc;

use crate::error::ApiResult;
use crate::models::{LoginCredentials, LoginResponse, User};
use crate::router::{AppRoute, Navigator};
use crate::services::api_client::ApiClient;
use crate::state::session_state::SessionStore;

const LOGIN_PATH: &str = "/auth/login";

#[derive(Clone)]
pub struct AuthService {
    api: ApiClient,
    session: SessionStore,
    navigator: Rc<dyn Navigator>,
}

impl AuthService {
    pub fn new(api: ApiClient, session: SessionStore, navigator: Rc<dyn Navigator>) -> Self {
        Self {
            api,
            session,
            navigator,
        }
    }

    /// Guarda token + usuario y notifica a los subscribers de la sesión
    pub async fn login(&self, credentials: &LoginCredentials) -> ApiResult<User> {
        log::info!("🔐 Login para usuario: {}", credentials.username);
        let response: LoginResponse = self.api.post(LOGIN_PATH, credentials).await?;
        self.session.start(response.token, response.user.clone());
        Ok(response.user)
    }

    pub fn logout(&self) {
        self.session.clear();
        self.navigator.navigate(&AppRoute::Login);
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }
}
