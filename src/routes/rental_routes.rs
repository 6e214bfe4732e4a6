use axum::{
    extract::{Path, Query, State},
    middleware,
    routing::{get, post, put},
    Extension, Json, Router,
};

use crate::controllers::rental_controller::RentalController;
use crate::dto::common::ApiResponse;
use crate::dto::rental_dto::{
    PriceQuoteQuery, PriceQuoteResponse, RentalResponse, RentalSummary, ReserveRentalRequest,
};
use crate::middleware::auth::{
    admin_only_middleware, auth_middleware, optional_auth_middleware, AuthenticatedUser,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_rental_router(state: &AppState) -> Router<AppState> {
    let admin = Router::new()
        .route("/list", get(list_rentals))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            admin_only_middleware,
        ));

    let authenticated = Router::new()
        .route("/details/:id", get(get_rental))
        .route("/:id/complete", put(complete_rental))
        .route("/history/:user_id", get(rental_history))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // La reserva y el presupuesto admiten invitados: el token es
    // opcional, pero si llega debe ser válido.
    let open = Router::new()
        .route("/", post(reserve_rental))
        .route("/quote", get(price_quote))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            optional_auth_middleware,
        ));

    admin.merge(authenticated).merge(open)
}

async fn reserve_rental(
    State(state): State<AppState>,
    user: Option<Extension<AuthenticatedUser>>,
    Json(mut request): Json<ReserveRentalRequest>,
) -> Result<Json<ApiResponse<RentalSummary>>, AppError> {
    if let Some(Extension(user)) = user {
        if user.is_admin() {
            return Err(AppError::Forbidden(
                "Los administradores no pueden alquilar coches".to_string(),
            ));
        }
        // Identidad del token cuando el body no trae email
        if request.email.is_none() {
            request.email = Some(user.email.clone());
        }
    }

    let controller = RentalController::new(&state);
    let summary = controller.reserve(request).await?;

    // El resumen queda listo para el formateador de facturas externo;
    // un fallo de formateo ya no afecta a la reserva confirmada.
    tracing::info!(
        "Resumen del alquiler {} disponible para facturación",
        summary.rental_id
    );

    Ok(Json(ApiResponse::success_with_message(
        summary,
        "Alquiler registrado exitosamente".to_string(),
    )))
}

async fn complete_rental(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = RentalController::new(&state);

    // Un admin finaliza cualquier alquiler; un cliente solo los suyos
    let rental = controller.get_by_id(&id).await?;
    if !user.is_admin() && rental.user_id != user.user_id {
        return Err(AppError::Forbidden("Acceso no autorizado".to_string()));
    }

    controller.complete(&id).await?;
    Ok(Json(ApiResponse::message_only(format!(
        "Alquiler {} finalizado correctamente",
        id
    ))))
}

async fn rental_history(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<RentalResponse>>, AppError> {
    if !user.is_admin() && user.user_id != user_id {
        return Err(AppError::Forbidden("Acceso no autorizado".to_string()));
    }

    let controller = RentalController::new(&state);
    let rentals = controller.history(&user_id).await?;
    Ok(Json(rentals.into_iter().map(RentalResponse::from).collect()))
}

async fn get_rental(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<Json<RentalResponse>, AppError> {
    let controller = RentalController::new(&state);
    let rental = controller.get_by_id(&id).await?;

    if !user.is_admin() && rental.user_id != user.user_id {
        return Err(AppError::Forbidden("Acceso no autorizado".to_string()));
    }

    Ok(Json(RentalResponse::from(rental)))
}

async fn list_rentals(
    State(state): State<AppState>,
) -> Result<Json<Vec<RentalResponse>>, AppError> {
    let controller = RentalController::new(&state);
    let rentals = controller.list().await?;
    Ok(Json(rentals.into_iter().map(RentalResponse::from).collect()))
}

async fn price_quote(
    State(state): State<AppState>,
    Query(query): Query<PriceQuoteQuery>,
) -> Result<Json<PriceQuoteResponse>, AppError> {
    let controller = RentalController::new(&state);
    let quote = controller.quote(query).await?;
    Ok(Json(PriceQuoteResponse::from(quote)))
}
