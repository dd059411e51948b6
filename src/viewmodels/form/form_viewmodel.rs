// ============================================================================
// FORM VIEWMODEL - Alta / edición genérica
// ============================================================================
// Initializing -> {CreateReady, EditLoading -> EditReady} -> Submitting
//   -> {Success, ValidationFailed, SubmitFailed}
// Una carga fallida en edición vuelve al listado (LoadFailed)
// ============================================================================

use std::marker::PhantomData;

use futures::future::join_all;
use serde::Serialize;

use crate::app::AppContext;
use crate::error::{ApiError, ApiResult, FieldErrors};
use crate::models::{EntityId, Neighborhood, Resource, Route, Truck};
use crate::router::AppRoute;
use crate::services::ResourceClient;
use crate::state::ReactiveState;
use crate::utils::i18n::{t, t_with};
use crate::viewmodels::form::schema::{FormOptions, FormSchema, LookupSource, SelectOption};
use crate::viewmodels::form::validation::FormModel;
use crate::viewmodels::message_or;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FormPhase {
    Initializing,
    CreateReady,
    EditLoading,
    EditReady,
    Submitting,
    Success,
    ValidationFailed,
    SubmitFailed,
    LoadFailed,
}

impl FormPhase {
    /// Estados en los que se acepta un envío
    pub fn accepts_submit(&self) -> bool {
        matches!(
            self,
            FormPhase::CreateReady
                | FormPhase::EditReady
                | FormPhase::ValidationFailed
                | FormPhase::SubmitFailed
        )
    }
}

#[derive(Debug, Clone)]
pub struct FormState {
    pub phase: FormPhase,
    pub form: FormModel,
    pub options: FormOptions,
    /// Errores a nivel de formulario (reglas entre campos, campos sin control)
    pub form_errors: Vec<String>,
    pub warning: Option<String>,
    pub record_id: Option<EntityId>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome<E> {
    /// Validación local fallida; no hubo petición
    Invalid(Vec<String>),
    /// Formulario no listo o envío en curso
    Busy,
    Saved(E),
    ValidationFailed(FieldErrors),
    Failed(ApiError),
}

async fn load_lookup(ctx: &AppContext, source: LookupSource) -> ApiResult<Vec<SelectOption>> {
    let size = ctx.config.lookup_page_size;
    let options = match source {
        LookupSource::Trucks => ctx
            .resources::<Truck>()
            .list(0, size)
            .await?
            .content
            .into_iter()
            .map(|truck| SelectOption {
                value: truck.id.to_string(),
                label: truck.license_plate,
            })
            .collect(),
        LookupSource::Neighborhoods => ctx
            .resources::<Neighborhood>()
            .list(0, size)
            .await?
            .content
            .into_iter()
            .map(|neighborhood| SelectOption {
                value: neighborhood.id.to_string(),
                label: neighborhood.name,
            })
            .collect(),
        LookupSource::Routes => ctx
            .resources::<Route>()
            .list(0, size)
            .await?
            .content
            .into_iter()
            .map(|route| SelectOption {
                value: route.id.to_string(),
                label: route.name,
            })
            .collect(),
    };
    Ok(options)
}

pub struct FormViewModel<S: FormSchema> {
    ctx: AppContext,
    client: ResourceClient<S::Entity>,
    state: ReactiveState<FormState>,
    _schema: PhantomData<S>,
}

impl<S: FormSchema> FormViewModel<S> {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            client: ctx.resources::<S::Entity>(),
            ctx,
            state: ReactiveState::new(FormState {
                phase: FormPhase::Initializing,
                form: S::build_form(),
                options: FormOptions::new(),
                form_errors: Vec::new(),
                warning: None,
                record_id: None,
            }),
            _schema: PhantomData,
        }
    }

    pub fn state(&self) -> &ReactiveState<FormState> {
        &self.state
    }

    pub fn snapshot(&self) -> FormState {
        self.state.snapshot()
    }

    fn entity_label(&self) -> String {
        t(S::Entity::LABEL_KEY, self.ctx.lang())
    }

    /// `id` presente = modo edición
    pub async fn activate(&self, id: Option<EntityId>) {
        self.state.set(FormState {
            phase: FormPhase::Initializing,
            form: S::build_form(),
            options: FormOptions::new(),
            form_errors: Vec::new(),
            warning: None,
            record_id: id,
        });

        let options = self.load_options().await;
        let warning = S::lookup_warning(&options).map(|key| t(key, self.ctx.lang()));
        if let Some(warning) = &warning {
            self.ctx.notifier.info(warning);
        }
        self.state.update(|s| {
            s.options = options;
            s.warning = warning;
        });

        let Some(id) = id else {
            self.state.update(|s| s.phase = FormPhase::CreateReady);
            return;
        };

        self.state.update(|s| s.phase = FormPhase::EditLoading);
        match self.client.get_by_id(id).await {
            Ok(entity) => {
                log::info!("📝 {}/{} cargado para edición", S::Entity::PATH, id);
                self.state.update(|s| {
                    S::populate(&mut s.form, &entity);
                    s.phase = FormPhase::EditReady;
                });
            }
            Err(e) => {
                log::error!("❌ Error cargando {}/{}: {}", S::Entity::PATH, id, e);
                let lang = self.ctx.lang();
                let entity = self.entity_label();
                let message = if e.is_not_found() {
                    t_with("record_not_found", lang, &[("entity", &entity)])
                } else {
                    message_or(&e, t_with("record_load_failed", lang, &[("entity", &entity)]))
                };
                self.ctx.notifier.error(&message);
                self.state.update(|s| s.phase = FormPhase::LoadFailed);
                self.ctx.navigate(AppRoute::List(S::SECTION));
            }
        }
    }

    /// Desplegables en paralelo; uno que falla queda vacío
    async fn load_options(&self) -> FormOptions {
        let sources = S::lookups();
        let results = join_all(sources.iter().map(|source| load_lookup(&self.ctx, *source))).await;

        let mut options = FormOptions::new();
        let mut failed = false;
        for (source, result) in sources.iter().zip(results) {
            let values = result.unwrap_or_else(|e| {
                log::error!("❌ Error cargando opciones {:?}: {}", source, e);
                failed = true;
                Vec::new()
            });
            options.insert(*source, values);
        }
        if failed {
            self.ctx.notifier.error(&t("lookup_failed", self.ctx.lang()));
        }
        options
    }

    pub fn set_text(&self, name: &str, value: &str) {
        self.state.update(|s| {
            s.form.set_text(name, value);
            s.form_errors.clear();
        });
    }

    pub fn set_checked(&self, name: &str, index: usize, checked: bool) {
        self.state.update(|s| {
            s.form.set_checked(name, index, checked);
        });
    }

    /// Payload con los valores actuales, si el formulario es válido
    pub fn current_payload(&self) -> Option<<S::Entity as Resource>::Request> {
        self.state.with(|s| {
            if s.form.is_valid() && S::cross_field_errors(&s.form).is_empty() {
                S::payload(&s.form).ok()
            } else {
                None
            }
        })
    }

    pub async fn submit(&self) -> SubmitOutcome<S::Entity> {
        let lang = self.ctx.lang();
        let current = self.state.snapshot();
        if !current.phase.accepts_submit() {
            log::warn!("⚠️ Envío ignorado en fase {:?}", current.phase);
            return SubmitOutcome::Busy;
        }

        // Validación local
        let mut form = current.form;
        form.mark_all_touched();
        let cross: Vec<String> = S::cross_field_errors(&form)
            .into_iter()
            .map(|key| t(key, lang))
            .collect();
        let payload = if form.is_valid() && cross.is_empty() {
            S::payload(&form).map_err(|key| vec![t(key, lang)])
        } else {
            Err(cross)
        };
        let payload = match payload {
            Ok(payload) => payload,
            Err(form_errors) => {
                self.ctx.notifier.error(&t("form_invalid", lang));
                self.state.update(|s| {
                    s.form = form;
                    s.form_errors = form_errors.clone();
                });
                return SubmitOutcome::Invalid(form_errors);
            }
        };

        self.state.update(|s| {
            s.form = form;
            s.form_errors.clear();
            s.phase = FormPhase::Submitting;
        });

        let result = match current.record_id {
            Some(id) => self.client.update(id, &payload).await,
            None => self.client.create(&payload).await,
        };

        let entity_label = self.entity_label();
        match result {
            Ok(entity) => {
                let key = if current.record_id.is_some() {
                    "record_updated"
                } else {
                    "record_created"
                };
                self.ctx
                    .notifier
                    .success(&t_with(key, lang, &[("entity", &entity_label)]));
                self.state.update(|s| s.phase = FormPhase::Success);
                self.ctx.navigate(AppRoute::List(S::SECTION));
                SubmitOutcome::Saved(entity)
            }
            Err(ApiError::Validation { fields, .. }) => {
                self.ctx.notifier.error(&t("validation_failed", lang));
                self.state.update(|s| {
                    let unmatched = s.form.bind_server_errors(&fields);
                    s.form_errors = unmatched
                        .iter()
                        .filter_map(|field| fields.get(field).map(|m| format!("{}: {}", field, m)))
                        .collect();
                    s.phase = FormPhase::ValidationFailed;
                });
                SubmitOutcome::ValidationFailed(fields)
            }
            Err(e) => {
                self.ctx
                    .notifier
                    .error(&message_or(&e, t("unexpected_error", lang)));
                self.state.update(|s| s.phase = FormPhase::SubmitFailed);
                SubmitOutcome::Failed(e)
            }
        }
    }

    /// Volver al listado sin guardar
    pub fn cancel(&self) {
        self.ctx.navigate(AppRoute::List(S::SECTION));
    }
}
