use serde::{Deserialize, Serialize};

use crate::utils::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_LANGUAGE, DEFAULT_LOOKUP_PAGE_SIZE, DEFAULT_PAGE_SIZE,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// URL base del backend, incluye el prefijo `/api`
    pub api_base_url: String,
    /// Tamaño de página de los listados
    pub default_page_size: u32,
    /// Tamaño de página para rellenar los desplegables de los formularios
    pub lookup_page_size: u32,
    /// "EN" | "PT"
    pub language: String,
    pub enable_logging: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            default_page_size: DEFAULT_PAGE_SIZE,
            lookup_page_size: DEFAULT_LOOKUP_PAGE_SIZE,
            language: DEFAULT_LANGUAGE.to_string(),
            enable_logging: true,
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        Self {
            api_base_url: option_env!("API_BASE_URL")
                .unwrap_or(DEFAULT_API_BASE_URL)
                .to_string(),
            default_page_size: parse_or(option_env!("DEFAULT_PAGE_SIZE"), DEFAULT_PAGE_SIZE),
            lookup_page_size: parse_or(option_env!("LOOKUP_PAGE_SIZE"), DEFAULT_LOOKUP_PAGE_SIZE),
            language: option_env!("APP_LANGUAGE")
                .unwrap_or(DEFAULT_LANGUAGE)
                .to_uppercase(),
            enable_logging: parse_or(option_env!("ENABLE_LOGGING"), true),
        }
    }

    /// URL base sin la barra final
    pub fn base_url(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }

    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }
}

fn parse_or<T: std::str::FromStr>(raw: Option<&str>, default: T) -> T {
    match raw {
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            log::warn!("⚠️ Valor de configuración inválido '{}', usando el valor por defecto", value);
            default
        }),
        None => default,
    }
}

// Configuración global estática (solo la usa el arranque en el navegador)
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}
