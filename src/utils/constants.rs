/// URL base del backend cuando no se configura `API_BASE_URL`
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";

pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Página "grande" para rellenar desplegables (bairros, caminhões, rotas)
pub const DEFAULT_LOOKUP_PAGE_SIZE: u32 = 1000;

pub const DEFAULT_LANGUAGE: &str = "EN";

pub const APP_NAME: &str = "GreenLog";

// Claves de localStorage
pub const AUTH_TOKEN_KEY: &str = "authToken";
pub const CURRENT_USER_KEY: &str = "currentUser";

/// Formato de fecha del backend para itinerarios
pub const DATE_FORMAT: &str = "%Y-%m-%d";
