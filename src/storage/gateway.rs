//! Gateway de persistencia por snapshots
//!
//! El núcleo de negocio trabaja sobre colecciones completas: cada
//! operación carga el snapshot de una colección, lo muta en memoria y
//! lo vuelve a escribir entero. La implementación concreta (CSV o
//! PostgreSQL) queda detrás de este trait.

use async_trait::async_trait;

use crate::models::{Rental, User, Vehicle};
use crate::utils::errors::AppResult;

#[async_trait]
pub trait SnapshotGateway: Send + Sync {
    async fn load_vehicles(&self) -> AppResult<Vec<Vehicle>>;
    async fn save_vehicles(&self, vehicles: &[Vehicle]) -> AppResult<()>;

    async fn load_users(&self) -> AppResult<Vec<User>>;
    async fn save_users(&self, users: &[User]) -> AppResult<()>;

    async fn load_rentals(&self) -> AppResult<Vec<Rental>>;
    async fn save_rentals(&self, rentals: &[Rental]) -> AppResult<()>;
}
