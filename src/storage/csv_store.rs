//! Gateway de persistencia sobre archivos CSV
//!
//! Una colección por archivo bajo el directorio de datos configurado.
//! Un archivo ausente se carga como colección vacía. Las escrituras van
//! a un archivo temporal que se renombra sobre el definitivo, de modo
//! que una escritura fallida nunca trunca el snapshot anterior.

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::models::{Rental, User, Vehicle};
use crate::storage::gateway::SnapshotGateway;
use crate::utils::errors::{AppError, AppResult};

const VEHICLES_FILE: &str = "vehicles.csv";
const USERS_FILE: &str = "users.csv";
const RENTALS_FILE: &str = "rentals.csv";

pub struct CsvGateway {
    data_dir: PathBuf,
}

impl CsvGateway {
    pub fn new(data_dir: impl Into<PathBuf>) -> AppResult<Self> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir).map_err(|e| {
            AppError::Storage(format!(
                "No se pudo crear el directorio de datos {}: {}",
                data_dir.display(),
                e
            ))
        })?;
        Ok(Self { data_dir })
    }

    fn path(&self, file: &str) -> PathBuf {
        self.data_dir.join(file)
    }

    fn load_collection<T: DeserializeOwned>(&self, file: &str) -> AppResult<Vec<T>> {
        let path = self.path(file);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::Reader::from_path(&path)?;
        let mut rows = Vec::new();
        for result in reader.deserialize() {
            rows.push(result?);
        }
        Ok(rows)
    }

    fn save_collection<T: Serialize>(&self, file: &str, rows: &[T]) -> AppResult<()> {
        let path = self.path(file);
        let tmp_path = self.path(&format!("{}.tmp", file));

        {
            let mut writer = csv::Writer::from_path(&tmp_path)?;
            for row in rows {
                writer.serialize(row)?;
            }
            writer.flush()?;
        }

        rename_into_place(&tmp_path, &path)
    }
}

fn rename_into_place(tmp_path: &Path, path: &Path) -> AppResult<()> {
    fs::rename(tmp_path, path).map_err(|e| {
        AppError::Storage(format!(
            "No se pudo reemplazar el snapshot {}: {}",
            path.display(),
            e
        ))
    })
}

#[async_trait]
impl SnapshotGateway for CsvGateway {
    async fn load_vehicles(&self) -> AppResult<Vec<Vehicle>> {
        self.load_collection(VEHICLES_FILE)
    }

    async fn save_vehicles(&self, vehicles: &[Vehicle]) -> AppResult<()> {
        self.save_collection(VEHICLES_FILE, vehicles)
    }

    async fn load_users(&self) -> AppResult<Vec<User>> {
        self.load_collection(USERS_FILE)
    }

    async fn save_users(&self, users: &[User]) -> AppResult<()> {
        self.save_collection(USERS_FILE, users)
    }

    async fn load_rentals(&self) -> AppResult<Vec<Rental>> {
        self.load_collection(RENTALS_FILE)
    }

    async fn save_rentals(&self, rentals: &[Rental]) -> AppResult<()> {
        self.save_collection(RENTALS_FILE, rentals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn sample_vehicle() -> Vehicle {
        Vehicle {
            id: "UID01".to_string(),
            license_plate: "9676 LRX".to_string(),
            brand: "Toyota".to_string(),
            model: "Corolla".to_string(),
            category_type: "Sedán".to_string(),
            category_price: "Medio".to_string(),
            year: 2021,
            daily_rate: Decimal::from(55),
            mileage: 48_000,
            color: "Rojo".to_string(),
            fuel_type: "Híbrido".to_string(),
            horsepower: 122,
            seats: 5,
            available: true,
        }
    }

    fn sample_rental() -> Rental {
        Rental {
            id: "A001".to_string(),
            vehicle_id: "UID01".to_string(),
            user_id: "U001".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 4).unwrap(),
            total_cost: Decimal::new(15510, 2),
            active: true,
        }
    }

    #[tokio::test]
    async fn test_missing_files_load_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = CsvGateway::new(dir.path()).unwrap();
        assert!(gateway.load_vehicles().await.unwrap().is_empty());
        assert!(gateway.load_users().await.unwrap().is_empty());
        assert!(gateway.load_rentals().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_vehicles_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = CsvGateway::new(dir.path()).unwrap();

        gateway.save_vehicles(&[sample_vehicle()]).await.unwrap();
        let loaded = gateway.load_vehicles().await.unwrap();

        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, "UID01");
        assert_eq!(loaded[0].license_plate, "9676 LRX");
        assert_eq!(loaded[0].daily_rate, Decimal::from(55));
        assert_eq!(loaded[0].fuel_type, "Híbrido");
        assert!(loaded[0].available);
    }

    #[tokio::test]
    async fn test_rentals_round_trip_preserves_order_and_dates() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = CsvGateway::new(dir.path()).unwrap();

        let mut second = sample_rental();
        second.id = "A002".to_string();
        second.active = false;

        gateway
            .save_rentals(&[sample_rental(), second])
            .await
            .unwrap();
        let loaded = gateway.load_rentals().await.unwrap();

        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].id, "A001");
        assert_eq!(loaded[1].id, "A002");
        assert_eq!(
            loaded[0].start_date,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
        assert_eq!(loaded[0].total_cost, Decimal::new(15510, 2));
        assert!(!loaded[1].active);
    }

    #[tokio::test]
    async fn test_save_overwrites_previous_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = CsvGateway::new(dir.path()).unwrap();

        gateway.save_rentals(&[sample_rental()]).await.unwrap();
        gateway.save_rentals(&[]).await.unwrap();

        assert!(gateway.load_rentals().await.unwrap().is_empty());
    }
}
