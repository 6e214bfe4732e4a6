//! Gestión del ciclo de vida de los alquileres
//!
//! Orquesta la reserva y la finalización manteniendo consistentes las
//! colecciones de coches y alquileres: un coche tiene como mucho un
//! alquiler activo, y `active` solo transiciona de true a false.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::dto::rental_dto::{PriceQuoteQuery, RentalSummary, ReserveRentalRequest};
use crate::models::rental::{Rental, GUEST_DISPLAY_NAME, GUEST_USER_ID};
use crate::services::pricing::{self, PriceQuote, GUEST_TIER};
use crate::state::AppState;
use crate::storage::SnapshotGateway;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::ids::next_rental_id;
use crate::utils::validation::{parse_date, validate_email};

pub struct RentalController {
    gateway: Arc<dyn SnapshotGateway>,
    write_lock: Arc<Mutex<()>>,
}

/// Identidad resuelta del arrendatario: usuario registrado o invitado
struct Renter {
    user_id: String,
    name: String,
    tier: String,
}

impl RentalController {
    pub fn new(state: &AppState) -> Self {
        Self {
            gateway: state.gateway.clone(),
            write_lock: state.write_lock.clone(),
        }
    }

    /// Registra un nuevo alquiler y devuelve el resumen para facturar.
    ///
    /// Las validaciones fallan en orden fijo: coche, email, formato de
    /// fechas, rango de fechas, disponibilidad, usuario registrado.
    pub async fn reserve(&self, request: ReserveRentalRequest) -> AppResult<RentalSummary> {
        // La disponibilidad comprobada aquí debe seguir siendo cierta al
        // confirmar, así que todo el ciclo va dentro del lock de escritura.
        let _guard = self.write_lock.lock().await;

        let mut vehicles = self.gateway.load_vehicles().await?;
        let position = vehicles
            .iter()
            .position(|v| v.license_plate == request.license_plate)
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "No se encontró ningún coche con la matrícula {}",
                    request.license_plate
                ))
            })?;

        if let Some(email) = request.email.as_deref() {
            validate_email(email)?;
        }

        let start_date = parse_date(&request.start_date)?;
        let end_date = parse_date(&request.end_date)?;
        if start_date >= end_date {
            return Err(AppError::Validation(
                "La fecha de inicio debe ser anterior a la fecha de fin".to_string(),
            ));
        }

        if !vehicles[position].available {
            return Err(AppError::Validation(format!(
                "El coche {} - {} no está disponible",
                vehicles[position].brand, vehicles[position].model
            )));
        }

        let renter = self.resolve_renter(request.email.as_deref()).await?;

        let quote = pricing::compute_price(
            start_date,
            end_date,
            vehicles[position].daily_rate,
            &renter.tier,
        )?;

        let mut rentals = self.gateway.load_rentals().await?;
        let rental_id = next_rental_id(&rentals);
        rentals.push(Rental {
            id: rental_id.clone(),
            vehicle_id: vehicles[position].id.clone(),
            user_id: renter.user_id.clone(),
            start_date,
            end_date,
            total_cost: quote.total,
            active: true,
        });

        vehicles[position].available = false;

        // Los alquileres se escriben primero y el coche al final: si la
        // escritura de alquileres falla, el coche no queda marcado como
        // no disponible sin un alquiler que lo respalde.
        self.gateway.save_rentals(&rentals).await?;
        self.gateway.save_vehicles(&vehicles).await?;

        let vehicle = &vehicles[position];
        tracing::info!(
            "Alquiler {} registrado: coche {} del {} al {}",
            rental_id,
            vehicle.license_plate,
            start_date,
            end_date
        );

        Ok(RentalSummary {
            rental_id,
            license_plate: vehicle.license_plate.clone(),
            brand: vehicle.brand.clone(),
            model: vehicle.model.clone(),
            start_date,
            end_date,
            daily_rate: quote.daily_rate,
            discount_rate: quote.discount_rate,
            total_cost: quote.total,
            user_id: renter.user_id,
            user_name: renter.name,
        })
    }

    /// Finaliza un alquiler activo y libera el coche asociado
    pub async fn complete(&self, rental_id: &str) -> AppResult<bool> {
        let _guard = self.write_lock.lock().await;

        let mut rentals = self.gateway.load_rentals().await?;
        let position = rentals
            .iter()
            .position(|r| r.id == rental_id)
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "No se encontró ningún alquiler con el ID {}",
                    rental_id
                ))
            })?;

        if !rentals[position].active {
            return Err(AppError::Validation(
                "El alquiler ya está finalizado".to_string(),
            ));
        }

        let mut vehicles = self.gateway.load_vehicles().await?;
        let vehicle_position = vehicles
            .iter()
            .position(|v| v.id == rentals[position].vehicle_id)
            .ok_or_else(|| {
                AppError::Storage(format!(
                    "El coche {} referenciado por el alquiler {} no existe",
                    rentals[position].vehicle_id, rental_id
                ))
            })?;

        rentals[position].active = false;
        vehicles[vehicle_position].available = true;

        self.gateway.save_rentals(&rentals).await?;
        self.gateway.save_vehicles(&vehicles).await?;

        tracing::info!(
            "Alquiler {} finalizado: coche {} disponible de nuevo",
            rental_id,
            vehicles[vehicle_position].license_plate
        );

        Ok(true)
    }

    /// Historial de alquileres de un usuario, en orden de inserción.
    /// Una lista vacía es un resultado válido, distinto de usuario inexistente.
    pub async fn history(&self, user_id: &str) -> AppResult<Vec<Rental>> {
        let users = self.gateway.load_users().await?;
        if !users.iter().any(|u| u.id == user_id) {
            return Err(AppError::NotFound(format!(
                "No se encontró ningún usuario con el ID {}",
                user_id
            )));
        }

        let rentals = self.gateway.load_rentals().await?;
        Ok(rentals
            .into_iter()
            .filter(|r| r.user_id == user_id)
            .collect())
    }

    /// Todos los alquileres registrados
    pub async fn list(&self) -> AppResult<Vec<Rental>> {
        self.gateway.load_rentals().await
    }

    /// Detalle de un alquiler por su ID
    pub async fn get_by_id(&self, rental_id: &str) -> AppResult<Rental> {
        let rentals = self.gateway.load_rentals().await?;
        rentals
            .into_iter()
            .find(|r| r.id == rental_id)
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "No se encontró ningún alquiler con el ID {}",
                    rental_id
                ))
            })
    }

    /// Presupuesto sin reserva: mismas validaciones que la reserva,
    /// ningún cambio de estado.
    pub async fn quote(&self, query: PriceQuoteQuery) -> AppResult<PriceQuote> {
        let vehicles = self.gateway.load_vehicles().await?;
        let vehicle = vehicles
            .iter()
            .find(|v| v.license_plate == query.license_plate)
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "No se encontró ningún coche con la matrícula {}",
                    query.license_plate
                ))
            })?;

        if let Some(email) = query.email.as_deref() {
            validate_email(email)?;
        }

        let start_date = parse_date(&query.start_date)?;
        let end_date = parse_date(&query.end_date)?;
        if start_date >= end_date {
            return Err(AppError::Validation(
                "La fecha de inicio debe ser anterior a la fecha de fin".to_string(),
            ));
        }

        if !vehicle.available {
            return Err(AppError::Validation(format!(
                "El coche con matrícula {} no está disponible",
                query.license_plate
            )));
        }

        let renter = self.resolve_renter(query.email.as_deref()).await?;

        pricing::compute_price(start_date, end_date, vehicle.daily_rate, &renter.tier)
    }

    async fn resolve_renter(&self, email: Option<&str>) -> AppResult<Renter> {
        match email {
            Some(email) => {
                let users = self.gateway.load_users().await?;
                let user = users
                    .into_iter()
                    .find(|u| u.email == email)
                    .ok_or_else(|| {
                        AppError::NotFound(format!(
                            "No se encontró el usuario con email {}",
                            email
                        ))
                    })?;
                Ok(Renter {
                    user_id: user.id,
                    name: user.name,
                    tier: user.role,
                })
            }
            None => Ok(Renter {
                user_id: GUEST_USER_ID.to_string(),
                name: GUEST_DISPLAY_NAME.to_string(),
                tier: GUEST_TIER.to_string(),
            }),
        }
    }
}
