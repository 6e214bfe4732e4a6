//! Utilidades transversales de la aplicación

pub mod errors;
pub mod ids;
pub mod jwt;
pub mod validation;
