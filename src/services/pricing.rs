//! Motor de cálculo de precios de alquiler
//!
//! Función pura sobre sus entradas: duración en días de calendario,
//! precio diario del vehículo y descuento por tipo de usuario. El
//! redondeo monetario es un asunto de presentación y no se aplica aquí.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::user::ROLE_CLIENT;
use crate::utils::errors::AppError;

/// Tier aplicado cuando no hay usuario autenticado ni email
pub const GUEST_TIER: &str = "invitado";

/// Componentes del precio calculado para una reserva
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceQuote {
    pub daily_rate: Decimal,
    pub discount_rate: Decimal,
    pub duration_days: i64,
    pub total: Decimal,
}

/// Multiplicador de descuento según el tipo de usuario.
///
/// Un tier desconocido no es un error: se aplica multiplicador 1.0
/// (sin descuento). Comportamiento permisivo heredado del negocio.
pub fn discount_for_tier(tier: &str) -> Decimal {
    match tier {
        ROLE_CLIENT => Decimal::new(94, 2),
        _ => Decimal::ONE,
    }
}

/// Calcula el precio total de un alquiler.
///
/// La fecha de inicio debe ser estrictamente anterior a la de fin y el
/// precio diario mayor que cero; en otro caso se rechaza la operación.
pub fn compute_price(
    start_date: NaiveDate,
    end_date: NaiveDate,
    daily_rate: Decimal,
    tier: &str,
) -> Result<PriceQuote, AppError> {
    if start_date >= end_date {
        return Err(AppError::Validation(
            "La fecha de inicio debe ser anterior a la fecha de fin".to_string(),
        ));
    }

    if daily_rate <= Decimal::ZERO {
        return Err(AppError::Validation(
            "El precio diario debe ser mayor que cero".to_string(),
        ));
    }

    let duration_days = (end_date - start_date).num_days();
    let discount_rate = discount_for_tier(tier);
    let total = daily_rate * Decimal::from(duration_days) * discount_rate;

    Ok(PriceQuote {
        daily_rate,
        discount_rate,
        duration_days,
        total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_guest_price_three_days() {
        let quote = compute_price(
            date(2024, 1, 1),
            date(2024, 1, 4),
            Decimal::from(100),
            GUEST_TIER,
        )
        .unwrap();
        assert_eq!(quote.duration_days, 3);
        assert_eq!(quote.total, Decimal::from(300));
        assert_eq!(quote.discount_rate, Decimal::ONE);
    }

    #[test]
    fn test_client_discount_applied() {
        let quote = compute_price(
            date(2024, 1, 1),
            date(2024, 1, 4),
            Decimal::from(100),
            ROLE_CLIENT,
        )
        .unwrap();
        assert_eq!(quote.total, Decimal::new(28200, 2));
        assert_eq!(quote.discount_rate, Decimal::new(94, 2));
    }

    #[test]
    fn test_client_price_is_94_percent_of_guest_price() {
        let guest = compute_price(
            date(2024, 3, 10),
            date(2024, 3, 17),
            Decimal::new(5550, 2),
            GUEST_TIER,
        )
        .unwrap();
        let client = compute_price(
            date(2024, 3, 10),
            date(2024, 3, 17),
            Decimal::new(5550, 2),
            ROLE_CLIENT,
        )
        .unwrap();
        assert_eq!(client.total, guest.total * Decimal::new(94, 2));
    }

    #[test]
    fn test_unknown_tier_gets_no_discount() {
        let quote = compute_price(
            date(2024, 1, 1),
            date(2024, 1, 2),
            Decimal::from(80),
            "socio-vip",
        )
        .unwrap();
        assert_eq!(quote.total, Decimal::from(80));
    }

    #[test]
    fn test_admin_tier_gets_no_discount() {
        let quote = compute_price(
            date(2024, 1, 1),
            date(2024, 1, 3),
            Decimal::from(50),
            "admin",
        )
        .unwrap();
        assert_eq!(quote.total, Decimal::from(100));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let result = compute_price(
            date(2024, 1, 5),
            date(2024, 1, 1),
            Decimal::from(100),
            GUEST_TIER,
        );
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_equal_dates_rejected() {
        let result = compute_price(
            date(2024, 1, 1),
            date(2024, 1, 1),
            Decimal::from(100),
            GUEST_TIER,
        );
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_non_positive_rate_rejected() {
        let result = compute_price(
            date(2024, 1, 1),
            date(2024, 1, 2),
            Decimal::ZERO,
            GUEST_TIER,
        );
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_pure_function_same_inputs_same_output() {
        let a = compute_price(
            date(2024, 6, 1),
            date(2024, 6, 11),
            Decimal::from(75),
            ROLE_CLIENT,
        )
        .unwrap();
        let b = compute_price(
            date(2024, 6, 1),
            date(2024, 6, 11),
            Decimal::from(75),
            ROLE_CLIENT,
        )
        .unwrap();
        assert_eq!(a, b);
    }
}
