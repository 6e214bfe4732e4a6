//! Modelos de dominio del sistema de alquiler

pub mod rental;
pub mod user;
pub mod vehicle;

pub use rental::Rental;
pub use user::User;
pub use vehicle::Vehicle;
