use axum::{
    extract::{Path, Query, State},
    middleware,
    routing::{delete, get, post, put},
    Json, Router,
};

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::common::ApiResponse;
use crate::dto::vehicle_dto::{
    AvailableVehiclesQuery, RegisterVehicleRequest, UpdateLicensePlateRequest, VehicleResponse,
};
use crate::middleware::auth::admin_only_middleware;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router(state: &AppState) -> Router<AppState> {
    let admin = Router::new()
        .route("/", post(register_vehicle))
        .route("/:id/license-plate", put(update_license_plate))
        .route("/:id", delete(delete_vehicle))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            admin_only_middleware,
        ));

    let public = Router::new()
        .route("/available", get(list_available))
        .route("/categories/price", get(price_categories))
        .route("/categories/type", get(type_categories))
        .route("/details/:plate", get(get_vehicle));

    admin.merge(public)
}

async fn register_vehicle(
    State(state): State<AppState>,
    Json(request): Json<RegisterVehicleRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.register(request).await?;
    Ok(Json(response))
}

async fn update_license_plate(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateLicensePlateRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.update_license_plate(&id, request).await?;
    Ok(Json(response))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = VehicleController::new(&state);
    controller.delete(&id).await?;
    Ok(Json(ApiResponse::message_only(format!(
        "El coche {} ha sido eliminado exitosamente",
        id
    ))))
}

async fn list_available(
    State(state): State<AppState>,
    Query(query): Query<AvailableVehiclesQuery>,
) -> Result<Json<Vec<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.list_available(query).await?;
    Ok(Json(response))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(plate): Path<String>,
) -> Result<Json<VehicleResponse>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.get_by_plate(&plate).await?;
    Ok(Json(response))
}

async fn price_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.price_categories().await?;
    Ok(Json(response))
}

async fn type_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.type_categories().await?;
    Ok(Json(response))
}
