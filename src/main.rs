use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info};

use car_rental::config::environment::{EnvironmentConfig, STORAGE_BACKEND_POSTGRES};
use car_rental::database;
use car_rental::routes::create_router;
use car_rental::state::AppState;
use car_rental::storage::{CsvGateway, PostgresGateway, SnapshotGateway};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    info!("🚗 Car Rental Backend");
    info!("=====================");

    let config = EnvironmentConfig::from_env();

    // Inicializar el gateway de persistencia configurado
    let gateway: Arc<dyn SnapshotGateway> = match config.storage_backend.as_str() {
        STORAGE_BACKEND_POSTGRES => {
            let database_url = config
                .database_url
                .clone()
                .ok_or_else(|| anyhow::anyhow!("DATABASE_URL must be set for the postgres backend"))?;
            let pool = match database::create_pool(&database_url).await {
                Ok(pool) => pool,
                Err(e) => {
                    error!("❌ Error conectando a la base de datos: {}", e);
                    return Err(e);
                }
            };
            info!("✅ PostgreSQL conectado exitosamente");
            Arc::new(PostgresGateway::new(pool))
        }
        _ => {
            let gateway = CsvGateway::new(&config.data_dir)?;
            info!("✅ Almacenamiento CSV en '{}'", config.data_dir);
            Arc::new(gateway)
        }
    };

    let addr: SocketAddr = config.server_addr().parse()?;
    let state = AppState::new(gateway, config);
    let app = create_router(state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Estado del servicio");
    info!("🔑 Auth:");
    info!("   POST /api/auth/signup - Registrar usuario");
    info!("   POST /api/auth/login - Iniciar sesión");
    info!("   POST /api/auth/logout - Cerrar sesión");
    info!("👤 Usuarios:");
    info!("   GET  /api/users - Listar usuarios (admin)");
    info!("   GET  /api/users/details/:email - Detalles de usuario");
    info!("   PUT  /api/users/:email/password - Cambiar contraseña");
    info!("   DELETE /api/users/:email - Dar de baja (admin)");
    info!("🚙 Coches:");
    info!("   POST /api/vehicles - Registrar coche (admin)");
    info!("   GET  /api/vehicles/available - Coches disponibles");
    info!("   GET  /api/vehicles/details/:plate - Detalles de coche");
    info!("   GET  /api/vehicles/categories/price - Categorías de precio");
    info!("   GET  /api/vehicles/categories/type - Categorías de tipo");
    info!("   PUT  /api/vehicles/:id/license-plate - Actualizar matrícula (admin)");
    info!("   DELETE /api/vehicles/:id - Eliminar coche (admin)");
    info!("📋 Alquileres:");
    info!("   POST /api/rentals - Reservar coche");
    info!("   GET  /api/rentals/quote - Presupuesto sin reserva");
    info!("   GET  /api/rentals/list - Listar alquileres (admin)");
    info!("   GET  /api/rentals/details/:id - Detalles de alquiler");
    info!("   PUT  /api/rentals/:id/complete - Finalizar alquiler");
    info!("   GET  /api/rentals/history/:user_id - Historial de usuario");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
