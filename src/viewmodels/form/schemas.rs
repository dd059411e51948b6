// ============================================================================
// FORMULARIOS POR ENTIDAD
// ============================================================================
// Los nombres de control coinciden con los campos JSON del backend para que
// los errores por campo caigan en su sitio
// ============================================================================

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::residue::{build_checkboxes, selected_from_checkboxes};
use crate::models::{
    CollectionPoint, CollectionPointRequest, Itinerary, ItineraryRequest, Neighborhood,
    NeighborhoodRequest, ResidueType, Route, RouteRequest, Street, StreetRequest, Truck,
    TruckRequest,
};
use crate::router::Section;
use crate::utils::constants::DATE_FORMAT;
use crate::viewmodels::form::schema::{FormOptions, FormSchema, LookupSource};
use crate::viewmodels::form::validation::{
    parse_date, parse_id, parse_number, FormModel, Validator,
};

lazy_static! {
    /// ABC-1234 o Mercosul ABC1D23
    static ref LICENSE_PLATE_RE: Regex =
        Regex::new(r"^[A-Z]{3}-?[0-9][A-Z0-9][0-9]{2}$").expect("license plate regex");
    static ref PHONE_RE: Regex = Regex::new(r"^\+?[\d\s()-]{10,}$").expect("phone regex");
}

fn id_field(form: &FormModel, name: &str) -> Result<i64, &'static str> {
    parse_id(form.text_value(name)).ok_or("required")
}

fn number_field(form: &FormModel, name: &str) -> Result<f64, &'static str> {
    parse_number(form.text_value(name)).ok_or("invalid_number")
}

fn residue_types(form: &FormModel) -> Vec<ResidueType> {
    selected_from_checkboxes(&form.checks_value("residueTypes"))
}

// ============================================================================
// BAIRRO
// ============================================================================

pub struct NeighborhoodForm;

impl FormSchema for NeighborhoodForm {
    type Entity = Neighborhood;
    const SECTION: Section = Section::Neighborhoods;

    fn build_form() -> FormModel {
        FormModel::new().text("name", "", vec![Validator::Required, Validator::MinLength(3)])
    }

    fn populate(form: &mut FormModel, entity: &Neighborhood) {
        form.fill_text("name", &entity.name);
    }

    fn payload(form: &FormModel) -> Result<NeighborhoodRequest, &'static str> {
        Ok(NeighborhoodRequest {
            name: form.text_value("name").to_string(),
        })
    }
}

// ============================================================================
// CAMINHÃO
// ============================================================================

pub struct TruckForm;

impl FormSchema for TruckForm {
    type Entity = Truck;
    const SECTION: Section = Section::Trucks;

    fn build_form() -> FormModel {
        FormModel::new()
            .text(
                "licensePlate",
                "",
                vec![Validator::Required, Validator::Pattern(&LICENSE_PLATE_RE)],
            )
            .text("driverName", "", vec![Validator::Required, Validator::MinLength(3)])
            .text(
                "capacity",
                "",
                vec![Validator::Required, Validator::Number, Validator::Min(1.0)],
            )
            .checks("residueTypes", ResidueType::ALL.len(), vec![Validator::AtLeastOne])
    }

    fn populate(form: &mut FormModel, entity: &Truck) {
        form.fill_text("licensePlate", &entity.license_plate);
        form.fill_text("driverName", &entity.driver_name);
        form.fill_text("capacity", &entity.capacity.to_string());
        form.fill_checks("residueTypes", build_checkboxes(&entity.residue_types));
    }

    fn payload(form: &FormModel) -> Result<TruckRequest, &'static str> {
        Ok(TruckRequest {
            license_plate: form.text_value("licensePlate").to_string(),
            driver_name: form.text_value("driverName").to_string(),
            capacity: number_field(form, "capacity")?,
            residue_types: residue_types(form),
        })
    }
}

// ============================================================================
// PONTO DE COLETA
// ============================================================================

pub struct CollectionPointForm;

impl FormSchema for CollectionPointForm {
    type Entity = CollectionPoint;
    const SECTION: Section = Section::CollectionPoints;

    fn build_form() -> FormModel {
        FormModel::new()
            .text("name", "", vec![Validator::Required, Validator::MinLength(3)])
            .text("neighborhoodId", "", vec![Validator::Required])
            .text("responsibleName", "", vec![Validator::Required])
            .text("email", "", vec![Validator::Required, Validator::Email])
            .text("phone", "", vec![Validator::Required, Validator::Pattern(&PHONE_RE)])
            .text("address", "", vec![Validator::Required])
            .checks("residueTypes", ResidueType::ALL.len(), vec![Validator::AtLeastOne])
    }

    fn lookups() -> &'static [LookupSource] {
        &[LookupSource::Neighborhoods]
    }

    fn populate(form: &mut FormModel, entity: &CollectionPoint) {
        form.fill_text("name", &entity.name);
        form.fill_text("neighborhoodId", &entity.neighborhood_id.to_string());
        form.fill_text("responsibleName", &entity.responsible_name);
        form.fill_text("email", &entity.email);
        form.fill_text("phone", &entity.phone);
        form.fill_text("address", &entity.address);
        form.fill_checks("residueTypes", build_checkboxes(&entity.residue_types));
    }

    fn payload(form: &FormModel) -> Result<CollectionPointRequest, &'static str> {
        Ok(CollectionPointRequest {
            name: form.text_value("name").to_string(),
            responsible_name: form.text_value("responsibleName").to_string(),
            email: form.text_value("email").to_string(),
            phone: form.text_value("phone").to_string(),
            address: form.text_value("address").to_string(),
            residue_types: residue_types(form),
            neighborhood_id: id_field(form, "neighborhoodId")?,
        })
    }
}

// ============================================================================
// RUA
// ============================================================================

pub struct StreetForm;

impl FormSchema for StreetForm {
    type Entity = Street;
    const SECTION: Section = Section::Streets;

    fn build_form() -> FormModel {
        FormModel::new()
            .text("originId", "", vec![Validator::Required])
            .text("destinationId", "", vec![Validator::Required])
            .text(
                "distance",
                "",
                vec![Validator::Required, Validator::Number, Validator::Min(0.01)],
            )
    }

    fn lookups() -> &'static [LookupSource] {
        &[LookupSource::Neighborhoods]
    }

    fn cross_field_errors(form: &FormModel) -> Vec<&'static str> {
        match (
            parse_id(form.text_value("originId")),
            parse_id(form.text_value("destinationId")),
        ) {
            (Some(origin), Some(destination)) if origin == destination => {
                vec!["origin_equals_destination"]
            }
            _ => Vec::new(),
        }
    }

    fn lookup_warning(options: &FormOptions) -> Option<&'static str> {
        let count = options
            .get(&LookupSource::Neighborhoods)
            .map_or(0, Vec::len);
        (count < 2).then_some("not_enough_neighborhoods")
    }

    fn populate(form: &mut FormModel, entity: &Street) {
        form.fill_text("originId", &entity.origin_id.to_string());
        form.fill_text("destinationId", &entity.destination_id.to_string());
        form.fill_text("distance", &entity.distance.to_string());
    }

    fn payload(form: &FormModel) -> Result<StreetRequest, &'static str> {
        Ok(StreetRequest {
            origin_id: id_field(form, "originId")?,
            destination_id: id_field(form, "destinationId")?,
            distance: number_field(form, "distance")?,
        })
    }
}

// ============================================================================
// ROTA
// ============================================================================

pub struct RouteForm;

impl FormSchema for RouteForm {
    type Entity = Route;
    const SECTION: Section = Section::Routes;

    fn build_form() -> FormModel {
        FormModel::new()
            .text("name", "", vec![Validator::Required, Validator::MinLength(3)])
            .text("truckId", "", vec![Validator::Required])
            .text("originNeighborhoodId", "", vec![Validator::Required])
            .text("destinationNeighborhoodId", "", vec![Validator::Required])
            .text("residueType", "", vec![Validator::Required])
    }

    fn lookups() -> &'static [LookupSource] {
        &[LookupSource::Trucks, LookupSource::Neighborhoods]
    }

    fn populate(form: &mut FormModel, entity: &Route) {
        form.fill_text("name", &entity.name);
        form.fill_text("truckId", &entity.truck_id.to_string());
        if let Some(origin) = entity.origin() {
            form.fill_text("originNeighborhoodId", &origin.neighborhood_id.to_string());
        }
        if let Some(destination) = entity.destination() {
            form.fill_text(
                "destinationNeighborhoodId",
                &destination.neighborhood_id.to_string(),
            );
        }
        form.fill_text("residueType", entity.residue_type.as_str());
    }

    fn payload(form: &FormModel) -> Result<RouteRequest, &'static str> {
        Ok(RouteRequest {
            name: form.text_value("name").to_string(),
            truck_id: id_field(form, "truckId")?,
            origin_neighborhood_id: id_field(form, "originNeighborhoodId")?,
            destination_neighborhood_id: id_field(form, "destinationNeighborhoodId")?,
            residue_type: ResidueType::parse(form.text_value("residueType")).ok_or("required")?,
        })
    }
}

// ============================================================================
// ITINERÁRIO
// ============================================================================

pub struct ItineraryForm;

impl FormSchema for ItineraryForm {
    type Entity = Itinerary;
    const SECTION: Section = Section::Itineraries;

    fn build_form() -> FormModel {
        let today = chrono::Local::now().date_naive();
        FormModel::new()
            .text("routeId", "", vec![Validator::Required])
            .text("truckId", "", vec![Validator::Required])
            .text(
                "date",
                &today.format(DATE_FORMAT).to_string(),
                vec![Validator::Required, Validator::Date],
            )
    }

    fn lookups() -> &'static [LookupSource] {
        &[LookupSource::Routes, LookupSource::Trucks]
    }

    fn populate(form: &mut FormModel, entity: &Itinerary) {
        form.fill_text("routeId", &entity.route_id.to_string());
        form.fill_text("truckId", &entity.truck_id.to_string());
        form.fill_text("date", &entity.date.format(DATE_FORMAT).to_string());
    }

    fn payload(form: &FormModel) -> Result<ItineraryRequest, &'static str> {
        Ok(ItineraryRequest {
            route_id: id_field(form, "routeId")?,
            truck_id: id_field(form, "truckId")?,
            date: parse_date(form.text_value("date")).ok_or("invalid_date")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Resource, RouteStop};
    use crate::viewmodels::form::schema::SelectOption;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn edit_payload<S: FormSchema>(entity: &S::Entity) -> <S::Entity as Resource>::Request {
        let mut form = S::build_form();
        S::populate(&mut form, entity);
        assert!(form.is_valid(), "loaded record should validate: {:?}", form.errors());
        S::payload(&form).expect("payload")
    }

    #[test]
    fn unchanged_edit_forms_reproduce_the_request_projection() {
        let truck = Truck {
            id: 3,
            license_plate: "ABC1D23".into(),
            driver_name: "J. Silva".into(),
            capacity: 1250.5,
            residue_types: vec![ResidueType::Plastic, ResidueType::Glass],
        };
        assert_eq!(edit_payload::<TruckForm>(&truck), truck.to_request());

        let point = CollectionPoint {
            id: 9,
            name: "Ecoponto Centro".into(),
            responsible_name: "Maria".into(),
            email: "maria@greenlog.org".into(),
            phone: "(11) 98765-4321".into(),
            address: "Rua A, 100".into(),
            residue_types: vec![ResidueType::Paper, ResidueType::Metal, ResidueType::Organic],
            neighborhood_id: 2,
            neighborhood_name: Some("Centro".into()),
        };
        assert_eq!(edit_payload::<CollectionPointForm>(&point), point.to_request());

        let street = Street {
            id: 4,
            origin_id: 1,
            origin_name: None,
            destination_id: 2,
            destination_name: None,
            distance: 0.75,
        };
        assert_eq!(edit_payload::<StreetForm>(&street), street.to_request());

        let route = Route {
            id: 5,
            name: "Rota Norte".into(),
            truck_id: 3,
            truck_license_plate: None,
            residue_type: ResidueType::Organic,
            total_distance: 12.0,
            stops: vec![
                RouteStop { order: 2, neighborhood_id: 8, neighborhood_name: "Vila".into() },
                RouteStop { order: 1, neighborhood_id: 1, neighborhood_name: "Centro".into() },
            ],
        };
        assert_eq!(edit_payload::<RouteForm>(&route), route.to_request());

        let itinerary = Itinerary {
            id: 6,
            route_id: 5,
            route_name: None,
            truck_id: 3,
            truck_license_plate: None,
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            total_distance: 12.0,
            residue_type: None,
            completed: false,
            stops: Vec::new(),
        };
        assert_eq!(edit_payload::<ItineraryForm>(&itinerary), itinerary.to_request());

        let neighborhood = Neighborhood { id: 1, name: "Centro".into() };
        assert_eq!(edit_payload::<NeighborhoodForm>(&neighborhood), neighborhood.to_request());
    }

    #[test]
    fn unchanged_edit_ignores_backend_residue_order() {
        let truck = Truck {
            id: 3,
            license_plate: "ABC1D23".into(),
            driver_name: "J. Silva".into(),
            capacity: 900.0,
            residue_types: vec![ResidueType::Glass, ResidueType::Plastic],
        };
        let payload = edit_payload::<TruckForm>(&truck);
        assert_eq!(payload, truck.to_request());
        assert_eq!(payload.residue_types, vec![ResidueType::Plastic, ResidueType::Glass]);

        let point = CollectionPoint {
            id: 9,
            name: "Ecoponto Sul".into(),
            responsible_name: "Ana".into(),
            email: "ana@greenlog.org".into(),
            phone: "(11) 91234-5678".into(),
            address: "Rua B, 20".into(),
            residue_types: vec![ResidueType::Organic, ResidueType::Paper, ResidueType::Organic],
            neighborhood_id: 2,
            neighborhood_name: None,
        };
        assert_eq!(edit_payload::<CollectionPointForm>(&point), point.to_request());
    }

    #[test]
    fn license_plate_formats() {
        for plate in ["ABC-1234", "ABC1234", "ABC1D23"] {
            let mut form = TruckForm::build_form();
            form.set_text("licensePlate", plate);
            assert!(form.control("licensePlate").unwrap().is_valid(), "{}", plate);
        }
        let mut form = TruckForm::build_form();
        form.set_text("licensePlate", "AB-12");
        assert!(!form.control("licensePlate").unwrap().is_valid());
    }

    #[test]
    fn street_rejects_same_origin_and_destination() {
        let mut form = StreetForm::build_form();
        form.set_text("originId", "1");
        form.set_text("destinationId", "1");
        form.set_text("distance", "3");
        assert_eq!(StreetForm::cross_field_errors(&form), vec!["origin_equals_destination"]);

        form.set_text("destinationId", "2");
        assert!(StreetForm::cross_field_errors(&form).is_empty());
    }

    #[test]
    fn street_warns_with_fewer_than_two_neighborhoods() {
        let mut options = FormOptions::new();
        assert_eq!(StreetForm::lookup_warning(&options), Some("not_enough_neighborhoods"));

        options.insert(
            LookupSource::Neighborhoods,
            vec![
                SelectOption { value: "1".into(), label: "Centro".into() },
                SelectOption { value: "2".into(), label: "Vila".into() },
            ],
        );
        assert_eq!(StreetForm::lookup_warning(&options), None);
    }

    #[test]
    fn itinerary_date_defaults_to_today() {
        let form = ItineraryForm::build_form();
        let today = chrono::Local::now().date_naive();
        assert_eq!(parse_date(form.text_value("date")), Some(today));
    }
}
