//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! de entrada y reglas básicas de los registros.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

use crate::utils::errors::AppError;

lazy_static! {
    static ref EMAIL_RE: Regex =
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap();
}

/// Validar formato de email
pub fn validate_email(value: &str) -> Result<(), AppError> {
    if !EMAIL_RE.is_match(value) {
        return Err(AppError::Validation(format!(
            "El correo electrónico '{}' no es válido",
            value
        )));
    }
    Ok(())
}

/// Validar y convertir string a fecha en formato YYYY-MM-DD
pub fn parse_date(value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        AppError::Validation("Las fechas deben estar en formato YYYY-MM-DD".to_string())
    })
}

/// Validar que un campo de texto no esté vacío
pub fn validate_not_empty(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!(
            "El campo '{}' debe tener un valor",
            field
        )));
    }
    Ok(())
}

/// Validar que un valor sea positivo
pub fn validate_positive<T: PartialOrd + std::fmt::Display + num_traits::Zero>(
    field: &str,
    value: T,
) -> Result<(), AppError> {
    if value <= T::zero() {
        return Err(AppError::Validation(format!(
            "El campo '{}' debe ser mayor que cero (recibido: {})",
            field, value
        )));
    }
    Ok(())
}

/// Validar que un valor sea no negativo
pub fn validate_non_negative<T: PartialOrd + std::fmt::Display + num_traits::Zero>(
    field: &str,
    value: T,
) -> Result<(), AppError> {
    if value < T::zero() {
        return Err(AppError::Validation(format!(
            "El campo '{}' no puede ser negativo (recibido: {})",
            field, value
        )));
    }
    Ok(())
}

/// Validar que un valor esté en una lista de valores permitidos
pub fn validate_member(field: &str, value: &str, allowed: &[&str]) -> Result<(), AppError> {
    if !allowed.contains(&value) {
        return Err(AppError::Validation(format!(
            "El valor '{}' para '{}' no está permitido. Opciones: {}",
            value,
            field,
            allowed.join(", ")
        )));
    }
    Ok(())
}

/// Validar formato de matrícula de vehículo
pub fn validate_license_plate(value: &str) -> Result<(), AppError> {
    // Formato básico: XX-123-XX o similar
    let clean_plate = value.replace([' ', '-', '_'], "");
    if clean_plate.len() < 5 || clean_plate.len() > 10 {
        return Err(AppError::Validation(format!(
            "La matrícula '{}' no tiene un formato válido",
            value
        )));
    }
    Ok(())
}
