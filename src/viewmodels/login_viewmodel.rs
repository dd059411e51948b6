// ============================================================================
// LOGIN VIEWMODEL
// ============================================================================

use crate::app::AppContext;
use crate::models::{LoginCredentials, User};
use crate::router::AppRoute;
use crate::services::AuthService;
use crate::state::ReactiveState;
use crate::utils::i18n::{t, t_with};
use crate::viewmodels::form::validation::{FormModel, Validator};
use crate::viewmodels::message_or;

#[derive(Debug, Clone)]
pub struct LoginState {
    pub form: FormModel,
    pub submitting: bool,
    pub error: Option<String>,
}

pub struct LoginViewModel {
    ctx: AppContext,
    auth: AuthService,
    state: ReactiveState<LoginState>,
}

fn login_form() -> FormModel {
    FormModel::new()
        .text("username", "", vec![Validator::Required, Validator::MinLength(3)])
        .text("password", "", vec![Validator::Required, Validator::MinLength(6)])
}

impl LoginViewModel {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            auth: ctx.auth(),
            ctx,
            state: ReactiveState::new(LoginState {
                form: login_form(),
                submitting: false,
                error: None,
            }),
        }
    }

    pub fn state(&self) -> &ReactiveState<LoginState> {
        &self.state
    }

    pub fn snapshot(&self) -> LoginState {
        self.state.snapshot()
    }

    pub fn set_username(&self, value: &str) {
        self.state.update(|s| {
            s.form.set_text("username", value);
            s.error = None;
        });
    }

    pub fn set_password(&self, value: &str) {
        self.state.update(|s| {
            s.form.set_text("password", value);
            s.error = None;
        });
    }

    /// Devuelve el usuario si el login fue bien (ya navegado al dashboard)
    pub async fn submit(&self) -> Option<User> {
        let lang = self.ctx.lang();
        let current = self.state.snapshot();
        if current.submitting {
            return None;
        }

        let mut form = current.form;
        form.mark_all_touched();
        if !form.is_valid() {
            self.state.update(|s| s.form = form);
            self.ctx.notifier.error(&t("form_invalid", lang));
            return None;
        }

        let credentials = LoginCredentials {
            username: form.text_value("username").trim().to_string(),
            password: form.text_value("password").to_string(),
        };
        self.state.update(|s| {
            s.form = form;
            s.submitting = true;
            s.error = None;
        });

        match self.auth.login(&credentials).await {
            Ok(user) => {
                self.ctx
                    .notifier
                    .success(&t_with("login_success", lang, &[("user", &user.username)]));
                self.state.update(|s| {
                    s.submitting = false;
                    s.form.fill_text("password", "");
                });
                self.ctx.navigate(AppRoute::Dashboard);
                Some(user)
            }
            Err(e) => {
                log::warn!("🔐 Login rechazado: {}", e);
                let message = message_or(&e, t("login_failed", lang));
                self.ctx.notifier.error(&message);
                self.state.update(|s| {
                    s.submitting = false;
                    s.error = Some(message);
                });
                None
            }
        }
    }

    pub fn logout(&self) {
        self.auth.logout();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::HttpMethod;
    use crate::testing::{anonymous_context, test_context, MockTransport};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[tokio::test]
    async fn login_stores_session_and_goes_to_dashboard() {
        let transport = MockTransport::new();
        transport.reply_json(
            HttpMethod::Post,
            "/auth/login",
            json!({"token": "jwt-abc", "user": {"id": "1", "username": "admin"}}),
        );
        let fixture = anonymous_context(transport.clone());
        let vm = LoginViewModel::new(fixture.ctx.clone());

        vm.set_username("admin");
        vm.set_password("secret123");
        let user = vm.submit().await;

        assert_eq!(user.map(|u| u.username), Some("admin".to_string()));
        assert_eq!(fixture.ctx.session.token().as_deref(), Some("jwt-abc"));
        assert_eq!(fixture.navigator.routes(), vec![AppRoute::Dashboard]);
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(
                transport.requests()[0].body.as_deref().unwrap()
            )
            .unwrap(),
            json!({"username": "admin", "password": "secret123"})
        );
    }

    #[tokio::test]
    async fn rejected_login_without_message_uses_generic_text() {
        let transport = MockTransport::new();
        transport.reply_status(HttpMethod::Post, "/auth/login", 401, "");
        let fixture = anonymous_context(transport.clone());
        let vm = LoginViewModel::new(fixture.ctx.clone());

        vm.set_username("admin");
        vm.set_password("wrong-pass");

        assert!(vm.submit().await.is_none());
        assert_eq!(vm.snapshot().error.as_deref(), Some("Invalid username or password."));
        assert!(!fixture.ctx.session.is_authenticated());
        assert!(fixture.navigator.routes().is_empty());
    }

    #[tokio::test]
    async fn short_password_is_blocked_locally() {
        let transport = MockTransport::new();
        let fixture = test_context(transport.clone());
        let vm = LoginViewModel::new(fixture.ctx.clone());

        vm.set_username("admin");
        vm.set_password("123");

        assert!(vm.submit().await.is_none());
        assert!(transport.requests().is_empty());
        assert_eq!(
            vm.snapshot().form.visible_errors("password", "EN"),
            vec!["Must have at least 6 characters."]
        );
    }

    #[tokio::test]
    async fn logout_clears_and_returns_to_login() {
        let transport = MockTransport::new();
        let fixture = test_context(transport);
        assert!(fixture.ctx.session.is_authenticated());
        let vm = LoginViewModel::new(fixture.ctx.clone());

        vm.logout();

        assert!(!fixture.ctx.session.is_authenticated());
        assert!(fixture.storage.is_empty());
        assert_eq!(fixture.navigator.routes(), vec![AppRoute::Login]);
    }
}
