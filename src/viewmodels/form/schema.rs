// ============================================================================
// FORM SCHEMA - Qué campos tiene cada formulario y cómo se arma el payload
// ============================================================================

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::Resource;
use crate::router::Section;
use crate::viewmodels::form::validation::FormModel;

/// Desplegables que un formulario necesita antes de estar listo
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LookupSource {
    Trucks,
    Neighborhoods,
    Routes,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

pub type FormOptions = BTreeMap<LookupSource, Vec<SelectOption>>;

pub trait FormSchema: 'static {
    type Entity: Resource;

    /// Lista a la que se vuelve tras guardar o al fallar la carga
    const SECTION: Section;

    /// Formulario en blanco (modo creación)
    fn build_form() -> FormModel;

    fn lookups() -> &'static [LookupSource] {
        &[]
    }

    /// Reglas entre campos; claves i18n
    fn cross_field_errors(_form: &FormModel) -> Vec<&'static str> {
        Vec::new()
    }

    /// Aviso cuando los datos de apoyo no permiten usar el formulario
    fn lookup_warning(_options: &FormOptions) -> Option<&'static str> {
        None
    }

    /// Volcar un registro cargado en los controles
    fn populate(form: &mut FormModel, entity: &Self::Entity);

    /// Solo se llama con el formulario válido; `Err` es una clave i18n
    fn payload(form: &FormModel) -> Result<<Self::Entity as Resource>::Request, &'static str>;
}
