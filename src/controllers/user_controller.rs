//! Operaciones de administración de usuarios

use std::sync::Arc;

use bcrypt::{hash, DEFAULT_COST};
use tokio::sync::Mutex;
use validator::Validate;

use crate::dto::common::ApiResponse;
use crate::dto::user_dto::{UpdatePasswordRequest, UserResponse};
use crate::state::AppState;
use crate::storage::SnapshotGateway;
use crate::utils::errors::{AppError, AppResult};

pub struct UserController {
    gateway: Arc<dyn SnapshotGateway>,
    write_lock: Arc<Mutex<()>>,
}

impl UserController {
    pub fn new(state: &AppState) -> Self {
        Self {
            gateway: state.gateway.clone(),
            write_lock: state.write_lock.clone(),
        }
    }

    /// Listar todos los usuarios, sin hashes de contraseña
    pub async fn list(&self) -> AppResult<Vec<UserResponse>> {
        let users = self.gateway.load_users().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    /// Detalle de un usuario por email
    pub async fn get_by_email(&self, email: &str) -> AppResult<UserResponse> {
        let users = self.gateway.load_users().await?;
        users
            .into_iter()
            .find(|u| u.email == email)
            .map(UserResponse::from)
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "No se encontró ningún usuario con el email {}",
                    email
                ))
            })
    }

    /// Actualizar la contraseña de un usuario
    pub async fn update_password(
        &self,
        email: &str,
        request: UpdatePasswordRequest,
    ) -> AppResult<ApiResponse<()>> {
        request.validate()?;

        let _guard = self.write_lock.lock().await;

        let mut users = self.gateway.load_users().await?;
        let user = users.iter_mut().find(|u| u.email == email).ok_or_else(|| {
            AppError::NotFound(format!(
                "No se encontró ningún usuario con el email {}",
                email
            ))
        })?;

        user.password_hash = hash(&request.new_password, DEFAULT_COST)
            .map_err(|e| AppError::Hash(format!("Error hashing password: {}", e)))?;

        self.gateway.save_users(&users).await?;

        Ok(ApiResponse::message_only(
            "Contraseña actualizada exitosamente".to_string(),
        ))
    }

    /// Dar de baja un usuario por email
    pub async fn delete(&self, email: &str) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;

        let mut users = self.gateway.load_users().await?;
        let position = users.iter().position(|u| u.email == email).ok_or_else(|| {
            AppError::NotFound(format!(
                "No se encontró ningún usuario con el email {}",
                email
            ))
        })?;

        let removed = users.remove(position);
        self.gateway.save_users(&users).await?;

        tracing::info!("Usuario {} dado de baja", removed.id);
        Ok(())
    }
}
