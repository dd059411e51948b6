// ============================================================================
// ERRORES DE LA API
// ============================================================================
// Clasificación única de las respuestas no-2xx. Los services solo propagan,
// los viewmodels deciden qué ve el usuario.
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

/// Errores por campo devueltos por el backend (campo -> mensaje)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Solo acepta un objeto JSON; una lista de mensajes por campo se queda con el primero
    fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let mut fields = FieldErrors::new();
        for (field, raw) in object {
            let message = match raw {
                Value::String(s) => s.clone(),
                Value::Array(items) => match items.iter().find_map(Value::as_str) {
                    Some(first) => first.to_string(),
                    None => continue,
                },
                Value::Null => continue,
                other => other.to_string(),
            };
            fields.insert(field.clone(), message);
        }
        Some(fields)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = FieldErrors::new();
        for (k, v) in iter {
            fields.insert(k, v);
        }
        fields
    }
}

/// Cuerpo de error del backend: `{ message?, errors? }`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Option<Value>,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Sin respuesta (fallo de transporte)
    #[error("Network error: {0}")]
    Network(String),

    #[error("Not found: {}", .message.as_deref().unwrap_or("resource does not exist"))]
    NotFound { message: Option<String> },

    #[error("Validation failed on {} field(s)", .fields.len())]
    Validation {
        message: Option<String>,
        fields: FieldErrors,
    },

    /// Regla de negocio (p.ej. caminhão ya agendado ese día)
    #[error("Request rejected ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    BusinessRule { status: u16, message: Option<String> },

    #[error("Unauthorized: {}", .message.as_deref().unwrap_or("session rejected"))]
    Unauthorized { message: Option<String> },

    /// El cuerpo de la petición no se pudo serializar (no llegó a enviarse)
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// 5xx o respuesta con forma desconocida
    #[error("Server error ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Server { status: u16, message: Option<String> },
}

impl ApiError {
    /// Clasifica una respuesta no-2xx a partir del status y el cuerpo
    pub fn from_response(status: u16, body: &str) -> Self {
        let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
        let fields = parsed.errors.as_ref().and_then(FieldErrors::from_value);
        let message = parsed
            .message
            .filter(|m| !m.trim().is_empty())
            .or_else(|| parsed.errors.as_ref().and_then(flat_message));

        match status {
            404 => ApiError::NotFound { message },
            401 | 403 => ApiError::Unauthorized { message },
            400 | 422 if fields.as_ref().is_some_and(|f| !f.is_empty()) => ApiError::Validation {
                message,
                fields: fields.unwrap_or_default(),
            },
            400 | 409 | 422 => ApiError::BusinessRule { status, message },
            _ => ApiError::Server { status, message },
        }
    }

    /// Respuesta 2xx cuyo cuerpo no tiene la forma esperada
    pub fn unexpected_shape(status: u16, detail: impl std::fmt::Display) -> Self {
        ApiError::Server {
            status,
            message: Some(format!("Unexpected response shape: {}", detail)),
        }
    }

    /// Mensaje legible proporcionado por el servidor, si lo hay
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Network(_) | ApiError::Serialization(_) => None,
            ApiError::NotFound { message }
            | ApiError::Validation { message, .. }
            | ApiError::BusinessRule { message, .. }
            | ApiError::Unauthorized { message }
            | ApiError::Server { message, .. } => message.as_deref(),
        }
    }

    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ApiError::Validation { fields, .. } => Some(fields),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(error: serde_json::Error) -> Self {
        ApiError::Serialization(error.to_string())
    }
}

/// `errors` como texto o lista de textos
fn flat_message(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Array(items) => {
            let parts: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            (!parts.is_empty()).then(|| parts.join("; "))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_map_on_400_is_a_validation_failure() {
        let body = r#"{"message":"Invalid payload","errors":{"licensePlate":"already taken","capacity":["must be positive","too small"]}}"#;
        let error = ApiError::from_response(400, body);

        let fields = error.field_errors().expect("validation error");
        assert_eq!(fields.get("licensePlate"), Some("already taken"));
        assert_eq!(fields.get("capacity"), Some("must be positive"));
        assert_eq!(error.server_message(), Some("Invalid payload"));
    }

    #[test]
    fn flat_message_on_409_is_a_business_rule() {
        let body = r#"{"success":false,"message":"Truck 1 is already scheduled on 2024-06-01."}"#;
        let error = ApiError::from_response(409, body);
        assert_eq!(
            error,
            ApiError::BusinessRule {
                status: 409,
                message: Some("Truck 1 is already scheduled on 2024-06-01.".to_string())
            }
        );
    }

    #[test]
    fn string_errors_become_the_message() {
        let error = ApiError::from_response(400, r#"{"errors":["name is required","name too short"]}"#);
        assert_eq!(error.server_message(), Some("name is required; name too short"));
        assert!(error.field_errors().is_none());
    }

    #[test]
    fn statuses_without_body() {
        assert!(ApiError::from_response(404, "").is_not_found());
        assert!(matches!(ApiError::from_response(401, ""), ApiError::Unauthorized { message: None }));
        assert!(matches!(
            ApiError::from_response(500, "<html>Internal Server Error</html>"),
            ApiError::Server { status: 500, message: None }
        ));
        assert!(matches!(
            ApiError::from_response(400, ""),
            ApiError::BusinessRule { status: 400, message: None }
        ));
    }

    #[test]
    fn network_errors_carry_no_server_message() {
        let error = ApiError::Network("connection refused".into());
        assert_eq!(error.server_message(), None);
        assert_eq!(error.to_string(), "Network error: connection refused");
    }
}
