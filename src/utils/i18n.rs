// ============================================================================
// MÓDULO DE INTERNACIONALIZACIÓN
// ============================================================================
// Mensajes visibles para el usuario (notificaciones, validaciones)
// Idiomas: "EN" (por defecto) y "PT"
// ============================================================================

use std::collections::HashMap;

/// Obtener diccionario de traducciones para un idioma
fn get_translations(lang: &str) -> HashMap<&'static str, &'static str> {
    let mut translations = HashMap::new();
    let lang_upper = lang.to_uppercase();

    match lang_upper.as_str() {
        "PT" => {
            // Entidades
            translations.insert("neighborhood", "Bairro");
            translations.insert("truck", "Caminhão");
            translations.insert("collection_point", "Ponto de coleta");
            translations.insert("street", "Rua");
            translations.insert("route", "Rota");
            translations.insert("itinerary", "Itinerário");

            // Formularios
            translations.insert("form_invalid", "Por favor, corrija os erros no formulário.");
            translations.insert("validation_failed", "Foram encontrados erros de validação.");
            translations.insert("unexpected_error", "Ocorreu um erro inesperado. Tente novamente.");
            translations.insert("record_load_failed", "Erro ao carregar os dados: {entity}.");
            translations.insert("record_not_found", "{entity} não encontrado(a).");
            translations.insert("record_created", "{entity} criado(a) com sucesso!");
            translations.insert("record_updated", "{entity} atualizado(a) com sucesso!");
            translations.insert("lookup_failed", "Erro ao carregar dados para o formulário.");
            translations.insert("not_enough_neighborhoods", "É necessário cadastrar pelo menos dois bairros para criar ruas.");
            translations.insert("origin_equals_destination", "origem e destino devem ser diferentes");

            // Validadores
            translations.insert("required", "Campo obrigatório.");
            translations.insert("min_length", "Deve ter pelo menos {n} caracteres.");
            translations.insert("min", "O valor mínimo é {n}.");
            translations.insert("pattern", "Formato inválido.");
            translations.insert("email", "E-mail inválido.");
            translations.insert("at_least_one", "Selecione pelo menos uma opção.");
            translations.insert("invalid_number", "Deve ser um número.");
            translations.insert("invalid_date", "Data inválida (aaaa-mm-dd).");

            // Listados
            translations.insert("list_load_failed", "Ocorreu um erro inesperado ao carregar a lista: {entity}.");
            translations.insert("invalid_id", "ID inválido ({entity}). Não é possível excluir.");
            translations.insert("delete_confirm", "Você tem certeza que deseja excluir {entity} (ID: {id})? Esta ação não pode ser desfeita.");
            translations.insert("record_deleted", "{entity} excluído(a) com sucesso!");
            translations.insert("delete_failed", "Ocorreu um erro ao excluir: {entity}.");
            translations.insert("itinerary_completed", "Itinerário concluído com sucesso!");
            translations.insert("complete_failed", "Erro ao concluir o itinerário.");

            // Dashboard
            translations.insert("summary_partial", "Não foi possível carregar alguns dados do resumo.");
            translations.insert("graph_failed", "Não foi possível carregar o grafo de bairros.");

            // Login
            translations.insert("login_failed", "Usuário ou senha inválidos.");
            translations.insert("login_success", "Bem-vindo(a), {user}!");
        }
        _ => {
            // Entidades
            translations.insert("neighborhood", "Neighborhood");
            translations.insert("truck", "Truck");
            translations.insert("collection_point", "Collection point");
            translations.insert("street", "Street");
            translations.insert("route", "Route");
            translations.insert("itinerary", "Itinerary");

            // Formularios
            translations.insert("form_invalid", "Please correct the errors in the form.");
            translations.insert("validation_failed", "Validation errors were found.");
            translations.insert("unexpected_error", "An unexpected error occurred. Please try again.");
            translations.insert("record_load_failed", "Could not load the data: {entity}.");
            translations.insert("record_not_found", "{entity} not found.");
            translations.insert("record_created", "{entity} created successfully!");
            translations.insert("record_updated", "{entity} updated successfully!");
            translations.insert("lookup_failed", "Error loading form data.");
            translations.insert("not_enough_neighborhoods", "At least two neighborhoods are required to create streets.");
            translations.insert("origin_equals_destination", "origin and destination must differ");

            // Validadores
            translations.insert("required", "This field is required.");
            translations.insert("min_length", "Must have at least {n} characters.");
            translations.insert("min", "Must be at least {n}.");
            translations.insert("pattern", "Invalid format.");
            translations.insert("email", "Invalid e-mail address.");
            translations.insert("at_least_one", "Select at least one option.");
            translations.insert("invalid_number", "Must be a number.");
            translations.insert("invalid_date", "Invalid date (yyyy-mm-dd).");

            // Listados
            translations.insert("list_load_failed", "An unexpected error occurred while loading the list: {entity}.");
            translations.insert("invalid_id", "Invalid {entity} ID. Cannot delete.");
            translations.insert("delete_confirm", "Are you sure you want to delete this {entity} (ID: {id})? This action cannot be undone.");
            translations.insert("record_deleted", "{entity} deleted successfully!");
            translations.insert("delete_failed", "An error occurred while deleting: {entity}.");
            translations.insert("itinerary_completed", "Itinerary marked as completed!");
            translations.insert("complete_failed", "Could not complete the itinerary.");

            // Dashboard
            translations.insert("summary_partial", "Some summary data could not be loaded.");
            translations.insert("graph_failed", "Could not load the neighborhood graph.");

            // Login
            translations.insert("login_failed", "Invalid username or password.");
            translations.insert("login_success", "Welcome, {user}!");
        }
    }

    translations
}

/// Función de traducción
///
/// Devuelve la clave si no hay traducción
pub fn t(key: &str, lang: &str) -> String {
    let translations = get_translations(lang);

    if let Some(translation) = translations.get(key) {
        return translation.to_string();
    }

    key.to_string()
}

/// Traducción con parámetros `{nombre}`
pub fn t_with(key: &str, lang: &str, params: &[(&str, &str)]) -> String {
    params
        .iter()
        .fold(t(key, lang), |text, (name, value)| {
            text.replace(&format!("{{{}}}", name), value)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_key_falls_back_to_key() {
        assert_eq!(t("no_existe", "EN"), "no_existe");
    }

    #[test]
    fn params_are_substituted() {
        assert_eq!(
            t_with("record_created", "EN", &[("entity", "Truck")]),
            "Truck created successfully!"
        );
        assert_eq!(
            t_with("min_length", "pt", &[("n", "3")]),
            "Deve ter pelo menos 3 caracteres."
        );
    }
}
