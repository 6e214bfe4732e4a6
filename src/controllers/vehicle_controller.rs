//! Operaciones de gestión de la flota

use std::sync::Arc;

use rust_decimal::Decimal;
use tokio::sync::Mutex;

use crate::dto::common::ApiResponse;
use crate::dto::vehicle_dto::{
    AvailableVehiclesQuery, RegisterVehicleRequest, UpdateLicensePlateRequest, VehicleResponse,
};
use crate::models::vehicle::{Vehicle, CATEGORY_PRICES, CATEGORY_TYPES, FUEL_TYPES};
use crate::state::AppState;
use crate::storage::SnapshotGateway;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::ids::next_vehicle_id;
use crate::utils::validation::{
    validate_license_plate, validate_member, validate_non_negative, validate_not_empty,
    validate_positive,
};

pub struct VehicleController {
    gateway: Arc<dyn SnapshotGateway>,
    write_lock: Arc<Mutex<()>>,
}

impl VehicleController {
    pub fn new(state: &AppState) -> Self {
        Self {
            gateway: state.gateway.clone(),
            write_lock: state.write_lock.clone(),
        }
    }

    /// Registrar un nuevo coche en la flota
    pub async fn register(
        &self,
        request: RegisterVehicleRequest,
    ) -> AppResult<ApiResponse<VehicleResponse>> {
        validate_not_empty("marca", &request.brand)?;
        validate_not_empty("modelo", &request.model)?;
        validate_not_empty("matricula", &request.license_plate)?;
        validate_license_plate(&request.license_plate)?;
        validate_member("categoria_tipo", &request.category_type, &CATEGORY_TYPES)?;
        validate_member("categoria_precio", &request.category_price, &CATEGORY_PRICES)?;
        validate_member("combustible", &request.fuel_type, &FUEL_TYPES)?;

        if request.daily_rate <= Decimal::ZERO {
            return Err(AppError::Validation(
                "El precio diario debe ser mayor que cero".to_string(),
            ));
        }
        validate_non_negative("kilometraje", request.mileage)?;
        validate_positive("cv", request.horsepower)?;
        if request.seats < 2 {
            return Err(AppError::Validation(
                "Las plazas del coche deben ser al menos 2".to_string(),
            ));
        }

        let _guard = self.write_lock.lock().await;

        let mut vehicles = self.gateway.load_vehicles().await?;
        if vehicles
            .iter()
            .any(|v| v.license_plate == request.license_plate)
        {
            return Err(AppError::Conflict(format!(
                "La matrícula {} ya está registrada",
                request.license_plate
            )));
        }

        let vehicle = Vehicle {
            id: next_vehicle_id(&vehicles),
            license_plate: request.license_plate,
            brand: request.brand,
            model: request.model,
            category_type: request.category_type,
            category_price: request.category_price,
            year: request.year,
            daily_rate: request.daily_rate,
            mileage: request.mileage,
            color: request.color,
            fuel_type: request.fuel_type,
            horsepower: request.horsepower,
            seats: request.seats,
            available: request.available.unwrap_or(true),
        };

        vehicles.push(vehicle.clone());
        self.gateway.save_vehicles(&vehicles).await?;

        tracing::info!("Coche {} registrado con matrícula {}", vehicle.id, vehicle.license_plate);

        Ok(ApiResponse::success_with_message(
            VehicleResponse::from(vehicle),
            "Coche registrado exitosamente".to_string(),
        ))
    }

    /// Actualizar la matrícula de un coche existente
    pub async fn update_license_plate(
        &self,
        vehicle_id: &str,
        request: UpdateLicensePlateRequest,
    ) -> AppResult<ApiResponse<VehicleResponse>> {
        validate_not_empty("matricula", &request.license_plate)?;
        validate_license_plate(&request.license_plate)?;

        let _guard = self.write_lock.lock().await;

        let mut vehicles = self.gateway.load_vehicles().await?;

        if vehicles
            .iter()
            .any(|v| v.license_plate == request.license_plate && v.id != vehicle_id)
        {
            return Err(AppError::Conflict(format!(
                "La matrícula {} ya está registrada en otro coche",
                request.license_plate
            )));
        }

        let vehicle = vehicles
            .iter_mut()
            .find(|v| v.id == vehicle_id)
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "No se encontró ningún coche con el ID {}",
                    vehicle_id
                ))
            })?;

        vehicle.license_plate = request.license_plate;
        let updated = vehicle.clone();

        self.gateway.save_vehicles(&vehicles).await?;

        Ok(ApiResponse::success_with_message(
            VehicleResponse::from(updated),
            "Matrícula actualizada exitosamente".to_string(),
        ))
    }

    /// Eliminar un coche de la flota.
    /// Un coche con alquiler activo no puede eliminarse: dejaría el
    /// alquiler apuntando a un coche inexistente.
    pub async fn delete(&self, vehicle_id: &str) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;

        let mut vehicles = self.gateway.load_vehicles().await?;
        let position = vehicles
            .iter()
            .position(|v| v.id == vehicle_id)
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "No se encontró ningún coche con el ID {}",
                    vehicle_id
                ))
            })?;

        let rentals = self.gateway.load_rentals().await?;
        if rentals.iter().any(|r| r.vehicle_id == vehicle_id && r.active) {
            return Err(AppError::Validation(format!(
                "El coche {} tiene un alquiler activo y no puede eliminarse",
                vehicle_id
            )));
        }

        vehicles.remove(position);
        self.gateway.save_vehicles(&vehicles).await?;

        tracing::info!("Coche {} eliminado de la flota", vehicle_id);
        Ok(())
    }

    /// Listar coches disponibles, con filtros opcionales por categoría,
    /// marca y modelo
    pub async fn list_available(
        &self,
        query: AvailableVehiclesQuery,
    ) -> AppResult<Vec<VehicleResponse>> {
        let vehicles = self.gateway.load_vehicles().await?;

        let matches = |value: &str, filter: &Option<String>| {
            filter.as_deref().map_or(true, |f| f == value)
        };

        Ok(vehicles
            .into_iter()
            .filter(|v| v.available)
            .filter(|v| matches(&v.category_price, &query.category_price))
            .filter(|v| matches(&v.category_type, &query.category_type))
            .filter(|v| matches(&v.brand, &query.brand))
            .filter(|v| matches(&v.model, &query.model))
            .map(VehicleResponse::from)
            .collect())
    }

    /// Detalle de un coche por matrícula
    pub async fn get_by_plate(&self, license_plate: &str) -> AppResult<VehicleResponse> {
        let vehicles = self.gateway.load_vehicles().await?;
        vehicles
            .into_iter()
            .find(|v| v.license_plate == license_plate)
            .map(VehicleResponse::from)
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "No se encontró ningún coche con la matrícula {}",
                    license_plate
                ))
            })
    }

    /// Categorías de precio presentes en la flota actual
    pub async fn price_categories(&self) -> AppResult<Vec<String>> {
        let vehicles = self.gateway.load_vehicles().await?;
        Ok(distinct(vehicles.iter().map(|v| v.category_price.clone())))
    }

    /// Categorías de tipo presentes en la flota actual
    pub async fn type_categories(&self) -> AppResult<Vec<String>> {
        let vehicles = self.gateway.load_vehicles().await?;
        Ok(distinct(vehicles.iter().map(|v| v.category_type.clone())))
    }
}

/// Valores únicos preservando el orden de aparición
fn distinct(values: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = Vec::new();
    for value in values {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}
