use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::Rental;
use crate::services::pricing::PriceQuote;

// Request para reservar un coche. Las fechas llegan como texto y se
// validan como fechas de calendario en la capa de negocio.
#[derive(Debug, Deserialize)]
pub struct ReserveRentalRequest {
    pub license_plate: String,
    pub start_date: String,
    pub end_date: String,
    pub email: Option<String>,
}

// Parámetros del presupuesto sin reserva
#[derive(Debug, Deserialize)]
pub struct PriceQuoteQuery {
    pub license_plate: String,
    pub start_date: String,
    pub end_date: String,
    pub email: Option<String>,
}

// Response de alquiler
#[derive(Debug, Serialize)]
pub struct RentalResponse {
    pub id: String,
    pub vehicle_id: String,
    pub user_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_cost: Decimal,
    pub active: bool,
}

impl From<Rental> for RentalResponse {
    fn from(r: Rental) -> Self {
        Self {
            id: r.id,
            vehicle_id: r.vehicle_id,
            user_id: r.user_id,
            start_date: r.start_date,
            end_date: r.end_date,
            total_cost: r.total_cost,
            active: r.active,
        }
    }
}

// Resumen de una reserva confirmada. Es el valor que consume el
// formateador de facturas; no tiene comportamiento propio.
#[derive(Debug, Clone, Serialize)]
pub struct RentalSummary {
    pub rental_id: String,
    pub license_plate: String,
    pub brand: String,
    pub model: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub daily_rate: Decimal,
    pub discount_rate: Decimal,
    pub total_cost: Decimal,
    pub user_id: String,
    pub user_name: String,
}

// Response del presupuesto
#[derive(Debug, Serialize)]
pub struct PriceQuoteResponse {
    pub daily_rate: Decimal,
    pub discount_rate: Decimal,
    pub duration_days: i64,
    pub total: Decimal,
}

impl From<PriceQuote> for PriceQuoteResponse {
    fn from(q: PriceQuote) -> Self {
        Self {
            daily_rate: q.daily_rate,
            discount_rate: q.discount_rate,
            duration_days: q.duration_days,
            total: q.total,
        }
    }
}
