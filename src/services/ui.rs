// ============================================================================
// UI SERVICE - Notificaciones y confirmaciones
// ============================================================================
// Los viewmodels solo conocen los traits; el navegador usa alert/confirm
// ============================================================================

/// Avisos visibles para el usuario
pub trait Notifier {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
    fn info(&self, message: &str);
}

/// Pregunta sí/no bloqueante
pub trait Confirmer {
    fn confirm(&self, message: &str) -> bool;
}

/// Solo escribe en el log (sin navegador)
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn success(&self, message: &str) {
        log::info!("✅ {}", message);
    }

    fn error(&self, message: &str) {
        log::error!("❌ {}", message);
    }

    fn info(&self, message: &str) {
        log::info!("ℹ️ {}", message);
    }
}

#[cfg(target_arch = "wasm32")]
#[derive(Clone, Copy, Debug, Default)]
pub struct AlertNotifier;

#[cfg(target_arch = "wasm32")]
impl AlertNotifier {
    fn alert(message: &str) {
        if let Some(win) = web_sys::window() {
            let _ = win.alert_with_message(message);
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl Notifier for AlertNotifier {
    fn success(&self, message: &str) {
        LogNotifier.success(message);
        Self::alert(&format!("✅ {}", message));
    }

    fn error(&self, message: &str) {
        LogNotifier.error(message);
        Self::alert(&format!("❌ {}", message));
    }

    fn info(&self, message: &str) {
        LogNotifier.info(message);
        Self::alert(message);
    }
}

#[cfg(target_arch = "wasm32")]
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserConfirmer;

#[cfg(target_arch = "wasm32")]
impl Confirmer for BrowserConfirmer {
    fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .and_then(|win| win.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
}
