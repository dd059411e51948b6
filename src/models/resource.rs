use std::fmt::Debug;

use serde::{de::DeserializeOwned, Serialize};

/// Identificador numérico de todas las entidades
pub type EntityId = i64;

/// Contrato común de las entidades expuestas por el backend
pub trait Resource: Clone + Debug + DeserializeOwned + 'static {
    /// Cuerpo de POST/PUT (reemplazo completo)
    type Request: Serialize + Clone + Debug + PartialEq + 'static;

    /// Ruta REST relativa a la URL base, p.ej. `/trucks`
    const PATH: &'static str;

    /// Clave i18n del nombre de la entidad
    const LABEL_KEY: &'static str;

    fn id(&self) -> EntityId;

    /// Proyección a la forma de petición (lo que un formulario reenviaría)
    fn to_request(&self) -> Self::Request;
}
