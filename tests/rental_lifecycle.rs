//! Tests de ciclo de vida de alquileres sobre el gateway CSV

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tempfile::TempDir;

use car_rental::config::EnvironmentConfig;
use car_rental::controllers::rental_controller::RentalController;
use car_rental::dto::rental_dto::{PriceQuoteQuery, ReserveRentalRequest};
use car_rental::models::rental::GUEST_USER_ID;
use car_rental::models::{User, Vehicle};
use car_rental::state::AppState;
use car_rental::storage::{CsvGateway, SnapshotGateway};
use car_rental::utils::errors::AppError;

fn vehicle(id: &str, plate: &str, daily_rate: i64) -> Vehicle {
    Vehicle {
        id: id.to_string(),
        license_plate: plate.to_string(),
        brand: "Seat".to_string(),
        model: "Ibiza".to_string(),
        category_type: "Hatchback".to_string(),
        category_price: "Básico".to_string(),
        year: 2020,
        daily_rate: Decimal::from(daily_rate),
        mileage: 35_000,
        color: "Blanco".to_string(),
        fuel_type: "Gasolina".to_string(),
        horsepower: 95,
        seats: 5,
        available: true,
    }
}

fn client(id: &str, email: &str) -> User {
    User {
        id: id.to_string(),
        name: "Juan Pérez".to_string(),
        role: "cliente".to_string(),
        email: email.to_string(),
        password_hash: "$2b$12$hash-de-pruebas".to_string(),
    }
}

fn reserve_request(
    plate: &str,
    start: &str,
    end: &str,
    email: Option<&str>,
) -> ReserveRentalRequest {
    ReserveRentalRequest {
        license_plate: plate.to_string(),
        start_date: start.to_string(),
        end_date: end.to_string(),
        email: email.map(str::to_string),
    }
}

async fn setup(vehicles: Vec<Vehicle>, users: Vec<User>) -> (TempDir, AppState) {
    let dir = tempfile::tempdir().unwrap();
    let gateway = Arc::new(CsvGateway::new(dir.path()).unwrap());
    gateway.save_vehicles(&vehicles).await.unwrap();
    gateway.save_users(&users).await.unwrap();
    let state = AppState::new(gateway, EnvironmentConfig::default());
    (dir, state)
}

#[tokio::test]
async fn guest_reservation_computes_price_and_blocks_vehicle() {
    let (_dir, state) = setup(vec![vehicle("UID01", "9676 LRX", 100)], vec![]).await;
    let controller = RentalController::new(&state);

    let summary = controller
        .reserve(reserve_request("9676 LRX", "2024-01-01", "2024-01-04", None))
        .await
        .unwrap();

    assert_eq!(summary.rental_id, "A001");
    assert_eq!(summary.total_cost, Decimal::from(300));
    assert_eq!(summary.user_id, GUEST_USER_ID);
    assert_eq!(summary.discount_rate, Decimal::ONE);

    let vehicles = state.gateway.load_vehicles().await.unwrap();
    assert!(!vehicles[0].available);

    let rentals = state.gateway.load_rentals().await.unwrap();
    assert_eq!(rentals.len(), 1);
    assert_eq!(rentals[0].vehicle_id, "UID01");
    assert!(rentals[0].active);
    assert_eq!(
        rentals[0].start_date,
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    );
}

#[tokio::test]
async fn second_reservation_on_same_vehicle_is_rejected() {
    let (_dir, state) = setup(vec![vehicle("UID01", "9676 LRX", 100)], vec![]).await;
    let controller = RentalController::new(&state);

    controller
        .reserve(reserve_request("9676 LRX", "2024-01-01", "2024-01-04", None))
        .await
        .unwrap();

    let result = controller
        .reserve(reserve_request("9676 LRX", "2024-01-05", "2024-01-08", None))
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));

    // Sin cambios de estado: sigue habiendo un único alquiler
    let rentals = state.gateway.load_rentals().await.unwrap();
    assert_eq!(rentals.len(), 1);
}

#[tokio::test]
async fn registered_client_gets_discounted_price() {
    let (_dir, state) = setup(
        vec![vehicle("UID01", "9676 LRX", 100)],
        vec![client("U001", "a@b.com")],
    )
    .await;
    let controller = RentalController::new(&state);

    let summary = controller
        .reserve(reserve_request(
            "9676 LRX",
            "2024-01-01",
            "2024-01-04",
            Some("a@b.com"),
        ))
        .await
        .unwrap();

    assert_eq!(summary.total_cost, Decimal::new(28200, 2));
    assert_eq!(summary.user_id, "U001");
    assert_eq!(summary.discount_rate, Decimal::new(94, 2));
}

#[tokio::test]
async fn inverted_date_range_changes_nothing() {
    let (_dir, state) = setup(vec![vehicle("UID01", "9676 LRX", 100)], vec![]).await;
    let controller = RentalController::new(&state);

    let result = controller
        .reserve(reserve_request("9676 LRX", "2024-01-05", "2024-01-01", None))
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));

    let vehicles = state.gateway.load_vehicles().await.unwrap();
    assert!(vehicles[0].available);
    assert!(state.gateway.load_rentals().await.unwrap().is_empty());
}

#[tokio::test]
async fn equal_dates_are_rejected() {
    let (_dir, state) = setup(vec![vehicle("UID01", "9676 LRX", 100)], vec![]).await;
    let controller = RentalController::new(&state);

    let result = controller
        .reserve(reserve_request("9676 LRX", "2024-01-01", "2024-01-01", None))
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn malformed_dates_are_rejected() {
    let (_dir, state) = setup(vec![vehicle("UID01", "9676 LRX", 100)], vec![]).await;
    let controller = RentalController::new(&state);

    let result = controller
        .reserve(reserve_request("9676 LRX", "01/01/2024", "04/01/2024", None))
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn unknown_plate_is_not_found_before_other_validations() {
    let (_dir, state) = setup(vec![vehicle("UID01", "9676 LRX", 100)], vec![]).await;
    let controller = RentalController::new(&state);

    // Aunque el email sea inválido, el coche inexistente se detecta primero
    let result = controller
        .reserve(reserve_request(
            "0000 XXX",
            "2024-01-01",
            "2024-01-04",
            Some("no-es-un-email"),
        ))
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn invalid_email_is_rejected() {
    let (_dir, state) = setup(vec![vehicle("UID01", "9676 LRX", 100)], vec![]).await;
    let controller = RentalController::new(&state);

    let result = controller
        .reserve(reserve_request(
            "9676 LRX",
            "2024-01-01",
            "2024-01-04",
            Some("no-es-un-email"),
        ))
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
    assert!(state.gateway.load_rentals().await.unwrap().is_empty());
}

#[tokio::test]
async fn unknown_user_email_is_not_found_and_changes_nothing() {
    let (_dir, state) = setup(vec![vehicle("UID01", "9676 LRX", 100)], vec![]).await;
    let controller = RentalController::new(&state);

    let result = controller
        .reserve(reserve_request(
            "9676 LRX",
            "2024-01-01",
            "2024-01-04",
            Some("nadie@example.com"),
        ))
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    let vehicles = state.gateway.load_vehicles().await.unwrap();
    assert!(vehicles[0].available);
    assert!(state.gateway.load_rentals().await.unwrap().is_empty());
}

#[tokio::test]
async fn complete_releases_vehicle_and_is_one_way() {
    let (_dir, state) = setup(vec![vehicle("UID01", "9676 LRX", 100)], vec![]).await;
    let controller = RentalController::new(&state);

    let summary = controller
        .reserve(reserve_request("9676 LRX", "2024-01-01", "2024-01-04", None))
        .await
        .unwrap();

    assert!(controller.complete(&summary.rental_id).await.unwrap());

    let vehicles = state.gateway.load_vehicles().await.unwrap();
    assert!(vehicles[0].available);
    let rentals = state.gateway.load_rentals().await.unwrap();
    assert!(!rentals[0].active);

    // Finalizar dos veces el mismo alquiler es un error de negocio
    let result = controller.complete(&summary.rental_id).await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn complete_unknown_rental_is_not_found_without_side_effects() {
    let (_dir, state) = setup(vec![vehicle("UID01", "9676 LRX", 100)], vec![]).await;
    let controller = RentalController::new(&state);

    let result = controller.complete("A999").await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    let vehicles = state.gateway.load_vehicles().await.unwrap();
    assert!(vehicles[0].available);
}

#[tokio::test]
async fn reserve_is_not_idempotent() {
    let (_dir, state) = setup(vec![vehicle("UID01", "9676 LRX", 100)], vec![]).await;
    let controller = RentalController::new(&state);

    let first = controller
        .reserve(reserve_request("9676 LRX", "2024-01-01", "2024-01-04", None))
        .await
        .unwrap();
    controller.complete(&first.rental_id).await.unwrap();

    let second = controller
        .reserve(reserve_request("9676 LRX", "2024-01-01", "2024-01-04", None))
        .await
        .unwrap();

    // Cada reserva crea un alquiler nuevo con su propio ID
    assert_ne!(first.rental_id, second.rental_id);
    assert_eq!(second.rental_id, "A002");
    assert_eq!(state.gateway.load_rentals().await.unwrap().len(), 2);
}

#[tokio::test]
async fn history_returns_user_rentals_in_insertion_order() {
    let mut second_vehicle = vehicle("UID02", "1234 ABC", 50);
    second_vehicle.model = "León".to_string();
    let (_dir, state) = setup(
        vec![vehicle("UID01", "9676 LRX", 100), second_vehicle],
        vec![client("U001", "a@b.com"), client("U002", "otro@b.com")],
    )
    .await;
    let controller = RentalController::new(&state);

    controller
        .reserve(reserve_request(
            "9676 LRX",
            "2024-01-01",
            "2024-01-04",
            Some("a@b.com"),
        ))
        .await
        .unwrap();
    controller
        .reserve(reserve_request(
            "1234 ABC",
            "2024-02-01",
            "2024-02-03",
            Some("a@b.com"),
        ))
        .await
        .unwrap();

    let history = controller.history("U001").await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].id, "A001");
    assert_eq!(history[1].id, "A002");

    // Un usuario existente sin alquileres obtiene una lista vacía
    let empty = controller.history("U002").await.unwrap();
    assert!(empty.is_empty());

    // Un usuario inexistente es un error de "no encontrado"
    let result = controller.history("U999").await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn guest_rentals_do_not_appear_in_any_user_history() {
    let (_dir, state) = setup(
        vec![vehicle("UID01", "9676 LRX", 100)],
        vec![client("U001", "a@b.com")],
    )
    .await;
    let controller = RentalController::new(&state);

    controller
        .reserve(reserve_request("9676 LRX", "2024-01-01", "2024-01-04", None))
        .await
        .unwrap();

    assert!(controller.history("U001").await.unwrap().is_empty());
}

#[tokio::test]
async fn quote_previews_price_without_state_change() {
    let (_dir, state) = setup(
        vec![vehicle("UID01", "9676 LRX", 100)],
        vec![client("U001", "a@b.com")],
    )
    .await;
    let controller = RentalController::new(&state);

    let quote = controller
        .quote(PriceQuoteQuery {
            license_plate: "9676 LRX".to_string(),
            start_date: "2024-01-01".to_string(),
            end_date: "2024-01-04".to_string(),
            email: Some("a@b.com".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(quote.total, Decimal::new(28200, 2));
    assert_eq!(quote.duration_days, 3);

    let vehicles = state.gateway.load_vehicles().await.unwrap();
    assert!(vehicles[0].available);
    assert!(state.gateway.load_rentals().await.unwrap().is_empty());
}

#[tokio::test]
async fn total_cost_is_not_recomputed_after_reservation() {
    let (_dir, state) = setup(vec![vehicle("UID01", "9676 LRX", 100)], vec![]).await;
    let controller = RentalController::new(&state);

    let summary = controller
        .reserve(reserve_request("9676 LRX", "2024-01-01", "2024-01-04", None))
        .await
        .unwrap();

    // Cambiar la tarifa del coche después de reservar no toca el coste
    let mut vehicles = state.gateway.load_vehicles().await.unwrap();
    vehicles[0].daily_rate = Decimal::from(999);
    state.gateway.save_vehicles(&vehicles).await.unwrap();

    let rental = controller.get_by_id(&summary.rental_id).await.unwrap();
    assert_eq!(rental.total_cost, Decimal::from(300));
}
