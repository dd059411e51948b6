pub mod form_viewmodel;
pub mod schema;
pub mod schemas;
pub mod validation;

pub use form_viewmodel::{FormPhase, FormState, FormViewModel, SubmitOutcome};
pub use schema::{FormOptions, FormSchema, LookupSource, SelectOption};
pub use schemas::{
    CollectionPointForm, ItineraryForm, NeighborhoodForm, RouteForm, StreetForm, TruckForm,
};
pub use validation::{FieldValue, FormControl, FormModel, ValidationError, Validator};
