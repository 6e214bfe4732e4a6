//! Generación de identificadores secuenciales
//!
//! Los identificadores se derivan del snapshot actual de cada colección:
//! prefijo fijo más sufijo numérico con padding de ceros (UID01, U001, A001).

use crate::models::rental::Rental;
use crate::models::user::User;
use crate::models::vehicle::Vehicle;

pub const VEHICLE_ID_PREFIX: &str = "UID";
pub const USER_ID_PREFIX: &str = "U";
pub const RENTAL_ID_PREFIX: &str = "A";

/// Deriva el siguiente ID secuencial a partir de los IDs existentes.
///
/// Se toma el mayor sufijo numérico presente y se suma uno, de modo que
/// huecos por bajas no producen IDs duplicados. `width` es un mínimo de
/// dígitos; las secuencias largas siguen contando sin truncarse.
pub fn next_id<'a>(
    prefix: &str,
    width: usize,
    existing: impl IntoIterator<Item = &'a str>,
) -> String {
    let max = existing
        .into_iter()
        .filter_map(|id| id.strip_prefix(prefix))
        .filter_map(|suffix| suffix.parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    format!("{}{:0width$}", prefix, max + 1, width = width)
}

pub fn next_vehicle_id(vehicles: &[Vehicle]) -> String {
    next_id(VEHICLE_ID_PREFIX, 2, vehicles.iter().map(|v| v.id.as_str()))
}

pub fn next_user_id(users: &[User]) -> String {
    next_id(USER_ID_PREFIX, 3, users.iter().map(|u| u.id.as_str()))
}

pub fn next_rental_id(rentals: &[Rental]) -> String {
    next_id(RENTAL_ID_PREFIX, 3, rentals.iter().map(|r| r.id.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_id_empty_collection() {
        assert_eq!(next_id("A", 3, []), "A001");
        assert_eq!(next_id("UID", 2, []), "UID01");
    }

    #[test]
    fn test_next_id_increments_max() {
        let ids = ["A001", "A003", "A002"];
        assert_eq!(next_id("A", 3, ids), "A004");
    }

    #[test]
    fn test_next_id_ignores_gaps_and_foreign_ids() {
        // Un ID con otro prefijo o sufijo no numérico no debe romper la secuencia
        let ids = ["U001", "X999", "U007", "Uabc"];
        assert_eq!(next_id("U", 3, ids), "U008");
    }

    #[test]
    fn test_next_id_width_is_a_minimum() {
        let ids = ["UID99"];
        assert_eq!(next_id("UID", 2, ids), "UID100");
        let ids = ["A999"];
        assert_eq!(next_id("A", 3, ids), "A1000");
    }
}
