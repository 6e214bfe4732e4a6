use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::Vehicle;

// Request para registrar un vehículo
#[derive(Debug, Deserialize)]
pub struct RegisterVehicleRequest {
    pub license_plate: String,
    pub brand: String,
    pub model: String,
    pub category_type: String,
    pub category_price: String,
    pub year: i32,
    pub daily_rate: Decimal,
    pub mileage: i64,
    pub color: String,
    pub fuel_type: String,
    pub horsepower: i32,
    pub seats: i32,
    pub available: Option<bool>,
}

// Request para actualizar la matrícula de un vehículo
#[derive(Debug, Deserialize)]
pub struct UpdateLicensePlateRequest {
    pub license_plate: String,
}

// Filtros opcionales para el listado de coches disponibles
#[derive(Debug, Default, Deserialize)]
pub struct AvailableVehiclesQuery {
    pub category_price: Option<String>,
    pub category_type: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
}

// Response de vehículo
#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    pub id: String,
    pub license_plate: String,
    pub brand: String,
    pub model: String,
    pub category_type: String,
    pub category_price: String,
    pub year: i32,
    pub daily_rate: Decimal,
    pub mileage: i64,
    pub color: String,
    pub fuel_type: String,
    pub horsepower: i32,
    pub seats: i32,
    pub available: bool,
}

impl From<Vehicle> for VehicleResponse {
    fn from(v: Vehicle) -> Self {
        Self {
            id: v.id,
            license_plate: v.license_plate,
            brand: v.brand,
            model: v.model,
            category_type: v.category_type,
            category_price: v.category_price,
            year: v.year,
            daily_rate: v.daily_rate,
            mileage: v.mileage,
            color: v.color,
            fuel_type: v.fuel_type,
            horsepower: v.horsepower,
            seats: v.seats,
            available: v.available,
        }
    }
}
