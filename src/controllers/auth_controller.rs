//! Registro, inicio y cierre de sesión

use std::collections::HashSet;
use std::sync::Arc;

use bcrypt::{hash, verify, DEFAULT_COST};
use tokio::sync::{Mutex, RwLock};
use validator::Validate;

use crate::config::EnvironmentConfig;
use crate::dto::auth_dto::{LoginRequest, LoginResponse, SignupRequest};
use crate::dto::common::ApiResponse;
use crate::dto::user_dto::UserResponse;
use crate::models::user::{User, ROLES};
use crate::state::AppState;
use crate::storage::SnapshotGateway;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::ids::next_user_id;
use crate::utils::jwt::generate_token;
use crate::utils::validation::{validate_email, validate_member, validate_not_empty};

pub struct AuthController {
    gateway: Arc<dyn SnapshotGateway>,
    write_lock: Arc<Mutex<()>>,
    revoked_tokens: Arc<RwLock<HashSet<String>>>,
    config: EnvironmentConfig,
}

impl AuthController {
    pub fn new(state: &AppState) -> Self {
        Self {
            gateway: state.gateway.clone(),
            write_lock: state.write_lock.clone(),
            revoked_tokens: state.revoked_tokens.clone(),
            config: state.config.clone(),
        }
    }

    /// Dar de alta un usuario nuevo
    pub async fn signup(&self, request: SignupRequest) -> AppResult<ApiResponse<UserResponse>> {
        request.validate()?;
        validate_not_empty("nombre", &request.name)?;
        validate_member("rol", &request.role, &ROLES)?;
        validate_email(&request.email)?;

        let _guard = self.write_lock.lock().await;

        let mut users = self.gateway.load_users().await?;
        if users.iter().any(|u| u.email == request.email) {
            return Err(AppError::Conflict(
                "El correo electrónico ya está registrado".to_string(),
            ));
        }

        let password_hash = hash(&request.password, DEFAULT_COST)
            .map_err(|e| AppError::Hash(format!("Error hashing password: {}", e)))?;

        let user = User {
            id: next_user_id(&users),
            name: request.name,
            role: request.role,
            email: request.email,
            password_hash,
        };

        users.push(user.clone());
        self.gateway.save_users(&users).await?;

        tracing::info!("Usuario {} registrado", user.id);

        Ok(ApiResponse::success_with_message(
            UserResponse::from(user),
            "Usuario registrado exitosamente".to_string(),
        ))
    }

    /// Iniciar sesión y emitir un token de acceso.
    /// Email desconocido y contraseña incorrecta responden igual para no
    /// revelar qué correos existen.
    pub async fn login(&self, request: LoginRequest) -> AppResult<LoginResponse> {
        let users = self.gateway.load_users().await?;
        let user = users
            .into_iter()
            .find(|u| u.email == request.email)
            .ok_or_else(|| AppError::Unauthorized("Credenciales inválidas".to_string()))?;

        let valid = verify(&request.password, &user.password_hash)
            .map_err(|e| AppError::Hash(format!("Error verifying password: {}", e)))?;

        if !valid {
            return Err(AppError::Unauthorized("Credenciales inválidas".to_string()));
        }

        let token = generate_token(&user, &self.config)?;

        tracing::info!("Sesión iniciada para el usuario {}", user.id);

        Ok(LoginResponse::new(token, UserResponse::from(user)))
    }

    /// Revocar el token de la sesión actual
    pub async fn logout(&self, jti: String) -> ApiResponse<()> {
        let mut revoked = self.revoked_tokens.write().await;
        revoked.insert(jti);
        ApiResponse::message_only("Sesión cerrada exitosamente".to_string())
    }
}
