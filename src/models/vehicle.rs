//! Modelo de Vehicle
//!
//! Representa los coches disponibles para alquilar y sus características.
//! Mapea exactamente a la tabla `vehicles` / al archivo `vehicles.csv`.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Categorías de tipo de vehículo admitidas
pub const CATEGORY_TYPES: [&str; 7] = [
    "Familiar",
    "Deportivo",
    "SUV",
    "Sedán",
    "Hatchback",
    "Superdeportivo",
    "Luxury",
];

/// Categorías de precio admitidas
pub const CATEGORY_PRICES: [&str; 4] = ["Premium", "Medio", "Básico", "Lujo"];

/// Combustibles admitidos
pub const FUEL_TYPES: [&str; 4] = ["Gasolina", "Diésel", "Híbrido", "Eléctrico"];

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: String,
    pub license_plate: String,
    pub brand: String,
    pub model: String,
    pub category_type: String,
    pub category_price: String,
    pub year: i32,
    pub daily_rate: rust_decimal::Decimal,
    pub mileage: i64,
    pub color: String,
    pub fuel_type: String,
    pub horsepower: i32,
    pub seats: i32,
    pub available: bool,
}
