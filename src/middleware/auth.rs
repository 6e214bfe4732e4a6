//! Middleware de autenticación JWT
//!
//! Maneja la extracción del token, su verificación contra el secreto y
//! la lista de revocados, y la inyección del usuario autenticado en la
//! request. La identidad viaja siempre como parámetro de request, nunca
//! como estado global.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::models::user::ROLE_ADMIN;
use crate::state::AppState;
use crate::storage::SnapshotGateway;
use crate::utils::errors::AppError;
use crate::utils::jwt::{extract_token_from_header, verify_token};

/// Usuario autenticado que se inyecta en las requests
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub jti: String,
}

impl AuthenticatedUser {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

/// Resolver el usuario autenticado a partir de los headers.
///
/// El rol se toma del registro actual del usuario, no del token, para
/// que un cambio de rol surta efecto sin esperar a la expiración.
async fn authenticate(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<AuthenticatedUser, AppError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Token de autorización requerido".to_string()))?;

    let token = extract_token_from_header(auth_header)?;
    let claims = verify_token(token, &state.config)?;

    if state.is_token_revoked(&claims.jti).await {
        return Err(AppError::Unauthorized("El token ha sido revocado".to_string()));
    }

    let users = state.gateway.load_users().await?;
    let user = users
        .into_iter()
        .find(|u| u.id == claims.sub)
        .ok_or_else(|| AppError::Unauthorized("Usuario no encontrado".to_string()))?;

    Ok(AuthenticatedUser {
        user_id: user.id,
        name: user.name,
        email: user.email,
        role: user.role,
        jti: claims.jti,
    })
}

/// Middleware de autenticación obligatoria
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = authenticate(&state, request.headers()).await?;
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Middleware opcional de autenticación (rutas que admiten invitados).
///
/// Si llega un token tiene que ser válido; una request sin header de
/// autorización continúa como invitado.
pub async fn optional_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if request.headers().contains_key(header::AUTHORIZATION) {
        let user = authenticate(&state, request.headers()).await?;
        request.extensions_mut().insert(user);
    }
    Ok(next.run(request).await)
}

/// Middleware para rutas exclusivas de administradores
pub async fn admin_only_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = authenticate(&state, request.headers()).await?;

    if !user.is_admin() {
        return Err(AppError::Forbidden(
            "Se requieren permisos de administrador".to_string(),
        ));
    }

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}
