//! Modelo de Rental
//!
//! Un alquiler referencia un vehículo y un usuario (o el centinela de
//! invitado), con fechas de calendario y coste total calculado una sola
//! vez en la reserva. El flag `active` solo transiciona true → false.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Valor reservado de `user_id` para alquileres sin usuario autenticado
pub const GUEST_USER_ID: &str = "INVITADO";

/// Nombre mostrado en el resumen cuando el alquiler es de un invitado
pub const GUEST_DISPLAY_NAME: &str = "Invitado";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Rental {
    pub id: String,
    pub vehicle_id: String,
    pub user_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_cost: rust_decimal::Decimal,
    pub active: bool,
}

impl Rental {
    pub fn is_guest(&self) -> bool {
        self.user_id == GUEST_USER_ID
    }
}
