use axum::{
    extract::{Path, State},
    middleware,
    routing::{delete, get, put},
    Extension, Json, Router,
};

use crate::controllers::user_controller::UserController;
use crate::dto::common::ApiResponse;
use crate::dto::user_dto::{UpdatePasswordRequest, UserResponse};
use crate::middleware::auth::{admin_only_middleware, auth_middleware, AuthenticatedUser};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_user_router(state: &AppState) -> Router<AppState> {
    let admin = Router::new()
        .route("/", get(list_users))
        .route("/:email", delete(delete_user))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            admin_only_middleware,
        ));

    let authenticated = Router::new()
        .route("/details/:email", get(get_user))
        .route("/:email/password", put(update_password))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    admin.merge(authenticated)
}

async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let controller = UserController::new(&state);
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn get_user(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(email): Path<String>,
) -> Result<Json<UserResponse>, AppError> {
    if !user.is_admin() && user.email != email {
        return Err(AppError::Forbidden("Acceso no autorizado".to_string()));
    }

    let controller = UserController::new(&state);
    let response = controller.get_by_email(&email).await?;
    Ok(Json(response))
}

async fn update_password(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(email): Path<String>,
    Json(request): Json<UpdatePasswordRequest>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    // Solo el propio usuario puede cambiar su contraseña
    if user.email != email {
        return Err(AppError::Forbidden("Acceso no autorizado".to_string()));
    }

    let controller = UserController::new(&state);
    let response = controller.update_password(&email, request).await?;
    Ok(Json(response))
}

async fn delete_user(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = UserController::new(&state);
    controller.delete(&email).await?;
    Ok(Json(ApiResponse::message_only(format!(
        "El usuario con email {} ha sido eliminado exitosamente",
        email
    ))))
}
