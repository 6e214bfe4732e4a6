//! Gateway de persistencia sobre PostgreSQL
//!
//! Mantiene la semántica de snapshots del trait: la carga lee la tabla
//! completa y el guardado reemplaza su contenido dentro de una única
//! transacción, por lo que un snapshot se confirma de forma atómica.
//!
//! Esquema esperado:
//!   vehicles (id TEXT PRIMARY KEY, license_plate TEXT UNIQUE, brand TEXT,
//!             model TEXT, category_type TEXT, category_price TEXT,
//!             year INT, daily_rate NUMERIC, mileage BIGINT, color TEXT,
//!             fuel_type TEXT, horsepower INT, seats INT, available BOOL)
//!   users    (id TEXT PRIMARY KEY, name TEXT, role TEXT,
//!             email TEXT UNIQUE, password_hash TEXT)
//!   rentals  (id TEXT PRIMARY KEY, vehicle_id TEXT, user_id TEXT,
//!             start_date DATE, end_date DATE, total_cost NUMERIC,
//!             active BOOL)

use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::{Rental, User, Vehicle};
use crate::storage::gateway::SnapshotGateway;
use crate::utils::errors::AppResult;

pub struct PostgresGateway {
    pool: PgPool,
}

impl PostgresGateway {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SnapshotGateway for PostgresGateway {
    async fn load_vehicles(&self) -> AppResult<Vec<Vehicle>> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT id, license_plate, brand, model, category_type, category_price,
                   year, daily_rate, mileage, color, fuel_type, horsepower, seats, available
            FROM vehicles
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    async fn save_vehicles(&self, vehicles: &[Vehicle]) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM vehicles").execute(&mut *tx).await?;
        for v in vehicles {
            sqlx::query(
                r#"
                INSERT INTO vehicles (id, license_plate, brand, model, category_type,
                                      category_price, year, daily_rate, mileage, color,
                                      fuel_type, horsepower, seats, available)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
                "#,
            )
            .bind(&v.id)
            .bind(&v.license_plate)
            .bind(&v.brand)
            .bind(&v.model)
            .bind(&v.category_type)
            .bind(&v.category_price)
            .bind(v.year)
            .bind(v.daily_rate)
            .bind(v.mileage)
            .bind(&v.color)
            .bind(&v.fuel_type)
            .bind(v.horsepower)
            .bind(v.seats)
            .bind(v.available)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn load_users(&self) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, name, role, email, password_hash FROM users ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn save_users(&self, users: &[User]) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM users").execute(&mut *tx).await?;
        for u in users {
            sqlx::query(
                "INSERT INTO users (id, name, role, email, password_hash) VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(&u.id)
            .bind(&u.name)
            .bind(&u.role)
            .bind(&u.email)
            .bind(&u.password_hash)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn load_rentals(&self) -> AppResult<Vec<Rental>> {
        let rentals = sqlx::query_as::<_, Rental>(
            r#"
            SELECT id, vehicle_id, user_id, start_date, end_date, total_cost, active
            FROM rentals
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rentals)
    }

    async fn save_rentals(&self, rentals: &[Rental]) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM rentals").execute(&mut *tx).await?;
        for r in rentals {
            sqlx::query(
                r#"
                INSERT INTO rentals (id, vehicle_id, user_id, start_date, end_date, total_cost, active)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(&r.id)
            .bind(&r.vehicle_id)
            .bind(&r.user_id)
            .bind(r.start_date)
            .bind(r.end_date)
            .bind(r.total_cost)
            .bind(r.active)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
