//! User facing texts shown in the error slots and views.

use abi::Error;

pub const UNEXPECTED_ERROR: &str = "Ha ocurrido un error inesperado. Inténtalo de nuevo.";
pub const REGISTER_FAILED: &str = "Error al registrarse";
pub const LOGIN_FAILED: &str = "Error al iniciar sesión";
pub const SEARCH_FAILED: &str = "No se pudo consultar la disponibilidad";
pub const MISSING_FIELDS: &str = "Completa los campos obligatorios";
pub const NO_AVAILABILITY: &str = "No hay disponibilidad para las fechas seleccionadas.";

/// Text for the error slot of a form.
///
/// Configuration and input problems are shown as is, a rejected request shows
/// the server text when it sent one and `rejected_fallback` otherwise, and
/// transport or decoding failures get the generic message.
pub fn user_message(err: &Error, rejected_fallback: &str) -> String {
    match err {
        Error::Rejected { message, .. } => message
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(rejected_fallback)
            .to_string(),
        Error::InvalidSearch(_) => err.to_string(),
        e if e.is_config() => e.to_string(),
        _ => UNEXPECTED_ERROR.to_string(),
    }
}
