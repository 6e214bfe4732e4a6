//! Capa de persistencia

pub mod csv_store;
pub mod gateway;
pub mod postgres_store;

pub use csv_store::CsvGateway;
pub use gateway::SnapshotGateway;
pub use postgres_store::PostgresGateway;
