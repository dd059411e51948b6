// ============================================================================
// SESSION STATE - Usuario actual + token (observable, persistido)
// ============================================================================
// `authToken` se guarda en crudo y `currentUser` como JSON, igual que el
// resto de clientes del backend
// ============================================================================

use std::rc::Rc;

use crate::models::User;
use crate::state::reactivity::{ReactiveState, SubscriptionId};
use crate::utils::constants::{AUTH_TOKEN_KEY, CURRENT_USER_KEY};
use crate::utils::storage::{load_from_storage, save_to_storage, KeyValueStorage};

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: Option<User>,
}

/// Store de sesión inyectado en el contexto de la app
#[derive(Clone)]
pub struct SessionStore {
    storage: Rc<dyn KeyValueStorage>,
    state: ReactiveState<Option<Session>>,
}

impl SessionStore {
    pub fn new(storage: Rc<dyn KeyValueStorage>) -> Self {
        Self {
            storage,
            state: ReactiveState::new(None),
        }
    }

    /// Recuperar la sesión guardada al arrancar
    pub fn restore(&self) -> bool {
        let token = self
            .storage
            .get(AUTH_TOKEN_KEY)
            .filter(|t| !t.trim().is_empty());

        match token {
            Some(token) => {
                let user: Option<User> = load_from_storage(self.storage.as_ref(), CURRENT_USER_KEY);
                log::info!(
                    "🔑 Sesión restaurada{}",
                    user.as_ref()
                        .map(|u| format!(" para {}", u.username))
                        .unwrap_or_default()
                );
                self.state.set(Some(Session { token, user }));
                true
            }
            None => {
                log::info!("🔒 Sin sesión guardada");
                self.state.set(None);
                false
            }
        }
    }

    pub fn start(&self, token: String, user: User) {
        if let Err(e) = self.storage.set(AUTH_TOKEN_KEY, &token) {
            log::error!("❌ Error guardando token: {}", e);
        }
        if let Err(e) = save_to_storage(self.storage.as_ref(), CURRENT_USER_KEY, &user) {
            log::error!("❌ Error guardando usuario: {}", e);
        }
        log::info!("✅ Sesión iniciada para {}", user.username);
        self.state.set(Some(Session {
            token,
            user: Some(user),
        }));
    }

    pub fn clear(&self) {
        for key in [AUTH_TOKEN_KEY, CURRENT_USER_KEY] {
            if let Err(e) = self.storage.remove(key) {
                log::warn!("⚠️ Error eliminando '{}': {}", key, e);
            }
        }
        log::info!("🚪 Sesión cerrada");
        self.state.set(None);
    }

    pub fn token(&self) -> Option<String> {
        self.state.with(|s| s.as_ref().map(|s| s.token.clone()))
    }

    pub fn current_user(&self) -> Option<User> {
        self.state.with(|s| s.as_ref().and_then(|s| s.user.clone()))
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.with(Option::is_some)
    }

    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(Option<&User>) + 'static,
    {
        self.state
            .subscribe(move |session| callback(session.as_ref().and_then(|s| s.user.as_ref())))
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.state.unsubscribe(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::storage::MemoryStorage;
    use std::cell::RefCell;

    fn user() -> User {
        User {
            id: "7".into(),
            username: "operator".into(),
        }
    }

    #[test]
    fn start_persists_and_restore_reads_back() {
        let storage = Rc::new(MemoryStorage::new());
        let store = SessionStore::new(storage.clone());
        store.start("tok-123".into(), user());

        assert_eq!(storage.get(AUTH_TOKEN_KEY).as_deref(), Some("tok-123"));

        let fresh = SessionStore::new(storage);
        assert!(fresh.restore());
        assert_eq!(fresh.token().as_deref(), Some("tok-123"));
        assert_eq!(fresh.current_user(), Some(user()));
    }

    #[test]
    fn clear_removes_keys_and_notifies() {
        let storage = Rc::new(MemoryStorage::new());
        let store = SessionStore::new(storage.clone());
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        store.subscribe(move |u| sink.borrow_mut().push(u.map(|u| u.username.clone())));

        store.start("tok".into(), user());
        store.clear();

        assert!(storage.is_empty());
        assert!(!store.is_authenticated());
        assert_eq!(*events.borrow(), vec![Some("operator".to_string()), None]);
    }

    #[test]
    fn token_without_user_still_counts_as_session() {
        let storage = Rc::new(MemoryStorage::new());
        storage.set(AUTH_TOKEN_KEY, "tok").unwrap();
        storage.set(CURRENT_USER_KEY, "{broken").unwrap();

        let store = SessionStore::new(storage);
        assert!(store.restore());
        assert!(store.is_authenticated());
        assert_eq!(store.current_user(), None);
    }
}
