// ============================================================================
// FORM MODEL - Controles, validadores y errores del servidor
// ============================================================================

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

use crate::error::FieldErrors;
use crate::models::EntityId;
use crate::utils::constants::DATE_FORMAT;
use crate::utils::i18n::{t, t_with};

lazy_static! {
    static ref EMAIL_RE: Regex =
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex");
}

#[derive(Debug, Clone)]
pub enum Validator {
    Required,
    MinLength(usize),
    Min(f64),
    Pattern(&'static Regex),
    Email,
    /// Grupo de checkboxes con al menos uno marcado
    AtLeastOne,
    Number,
    /// yyyy-MM-dd
    Date,
}

/// Error de un validador: clave i18n + parámetro opcional `{n}`
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub key: &'static str,
    pub param: Option<String>,
}

impl ValidationError {
    fn new(key: &'static str) -> Self {
        Self { key, param: None }
    }

    fn with_param(key: &'static str, param: impl ToString) -> Self {
        Self {
            key,
            param: Some(param.to_string()),
        }
    }

    pub fn message(&self, lang: &str) -> String {
        match &self.param {
            Some(n) => t_with(self.key, lang, &[("n", n)]),
            None => t(self.key, lang),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Checks(Vec<bool>),
}

impl Validator {
    /// Solo `Required`/`AtLeastOne` fallan con valor vacío
    fn check(&self, value: &FieldValue) -> Option<ValidationError> {
        match (self, value) {
            (Validator::Required, FieldValue::Text(text)) => {
                text.trim().is_empty().then(|| ValidationError::new("required"))
            }
            (Validator::Required | Validator::AtLeastOne, FieldValue::Checks(checks)) => {
                (!checks.iter().any(|c| *c)).then(|| ValidationError::new("at_least_one"))
            }
            (_, FieldValue::Text(text)) if text.trim().is_empty() => None,
            (Validator::MinLength(n), FieldValue::Text(text)) => (text.chars().count() < *n)
                .then(|| ValidationError::with_param("min_length", n)),
            (Validator::Number, FieldValue::Text(text)) => parse_number(text)
                .is_none()
                .then(|| ValidationError::new("invalid_number")),
            (Validator::Min(min), FieldValue::Text(text)) => match parse_number(text) {
                Some(number) if number < *min => Some(ValidationError::with_param("min", min)),
                _ => None,
            },
            (Validator::Pattern(re), FieldValue::Text(text)) => {
                (!re.is_match(text)).then(|| ValidationError::new("pattern"))
            }
            (Validator::Email, FieldValue::Text(text)) => {
                (!EMAIL_RE.is_match(text.trim())).then(|| ValidationError::new("email"))
            }
            (Validator::Date, FieldValue::Text(text)) => parse_date(text)
                .is_none()
                .then(|| ValidationError::new("invalid_date")),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FormControl {
    pub value: FieldValue,
    pub validators: Vec<Validator>,
    pub touched: bool,
    pub server_error: Option<String>,
}

impl FormControl {
    pub fn errors(&self) -> Vec<ValidationError> {
        self.validators
            .iter()
            .filter_map(|v| v.check(&self.value))
            .collect()
    }

    pub fn is_valid(&self) -> bool {
        self.server_error.is_none() && self.errors().is_empty()
    }
}

/// Formulario con controles en orden de declaración
#[derive(Debug, Clone, Default)]
pub struct FormModel {
    controls: Vec<(&'static str, FormControl)>,
}

impl FormModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &'static str, initial: &str, validators: Vec<Validator>) -> Self {
        self.controls.push((
            name,
            FormControl {
                value: FieldValue::Text(initial.to_string()),
                validators,
                touched: false,
                server_error: None,
            },
        ));
        self
    }

    pub fn checks(mut self, name: &'static str, len: usize, validators: Vec<Validator>) -> Self {
        self.controls.push((
            name,
            FormControl {
                value: FieldValue::Checks(vec![false; len]),
                validators,
                touched: false,
                server_error: None,
            },
        ));
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.controls.iter().map(|(name, _)| *name)
    }

    pub fn control(&self, name: &str) -> Option<&FormControl> {
        self.controls
            .iter()
            .find(|(existing, _)| *existing == name)
            .map(|(_, control)| control)
    }

    fn control_mut(&mut self, name: &str) -> Option<&mut FormControl> {
        self.controls
            .iter_mut()
            .find(|(existing, _)| *existing == name)
            .map(|(_, control)| control)
    }

    /// Cambio del usuario: marca touched y descarta el error del servidor
    pub fn set_text(&mut self, name: &str, value: &str) -> bool {
        match self.control_mut(name) {
            Some(control) => {
                control.value = FieldValue::Text(value.to_string());
                control.touched = true;
                control.server_error = None;
                true
            }
            None => {
                log::warn!("⚠️ Campo desconocido: {}", name);
                false
            }
        }
    }

    pub fn set_checked(&mut self, name: &str, index: usize, checked: bool) -> bool {
        match self.control_mut(name) {
            Some(control) => match &mut control.value {
                FieldValue::Checks(checks) if index < checks.len() => {
                    checks[index] = checked;
                    control.touched = true;
                    control.server_error = None;
                    true
                }
                _ => false,
            },
            None => false,
        }
    }

    /// Rellenar sin marcar touched (carga en modo edición)
    pub fn fill_text(&mut self, name: &str, value: &str) {
        if let Some(control) = self.control_mut(name) {
            control.value = FieldValue::Text(value.to_string());
        }
    }

    pub fn fill_checks(&mut self, name: &str, checks: Vec<bool>) {
        if let Some(control) = self.control_mut(name) {
            control.value = FieldValue::Checks(checks);
        }
    }

    pub fn text_value(&self, name: &str) -> &str {
        match self.control(name).map(|c| &c.value) {
            Some(FieldValue::Text(text)) => text,
            _ => "",
        }
    }

    pub fn checks_value(&self, name: &str) -> Vec<bool> {
        match self.control(name).map(|c| &c.value) {
            Some(FieldValue::Checks(checks)) => checks.clone(),
            _ => Vec::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.controls.iter().all(|(_, control)| control.is_valid())
    }

    /// Errores locales de todos los campos (touched o no)
    pub fn errors(&self) -> Vec<(&'static str, ValidationError)> {
        self.controls
            .iter()
            .flat_map(|(name, control)| control.errors().into_iter().map(move |e| (*name, e)))
            .collect()
    }

    /// Mensajes a mostrar bajo el campo: solo tras tocarlo, o si el servidor lo rechazó
    pub fn visible_errors(&self, name: &str, lang: &str) -> Vec<String> {
        let Some(control) = self.control(name) else {
            return Vec::new();
        };
        let mut messages = Vec::new();
        if control.touched {
            messages.extend(control.errors().iter().map(|e| e.message(lang)));
        }
        if let Some(server) = &control.server_error {
            messages.push(server.clone());
        }
        messages
    }

    pub fn mark_all_touched(&mut self) {
        for (_, control) in &mut self.controls {
            control.touched = true;
        }
    }

    /// Vuelca los errores por campo del backend; devuelve los campos sin control
    pub fn bind_server_errors(&mut self, fields: &FieldErrors) -> Vec<String> {
        let mut unmatched = Vec::new();
        for (field, message) in fields.iter() {
            match self.control_mut(field) {
                Some(control) => {
                    control.server_error = Some(message.to_string());
                    control.touched = true;
                }
                None => unmatched.push(field.to_string()),
            }
        }
        unmatched
    }

    pub fn clear_server_errors(&mut self) {
        for (_, control) in &mut self.controls {
            control.server_error = None;
        }
    }
}

/// Identificador de un `<select>`: entero positivo
pub fn parse_id(raw: &str) -> Option<EntityId> {
    raw.trim().parse::<EntityId>().ok().filter(|id| *id > 0)
}

pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}
