//! Shared application state
//!
//! Estado compartido que viaja por el router de Axum: el gateway de
//! persistencia, la configuración, el conjunto de tokens revocados y el
//! lock global que serializa las operaciones de escritura.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::config::EnvironmentConfig;
use crate::storage::SnapshotGateway;

#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<dyn SnapshotGateway>,
    pub config: EnvironmentConfig,
    // jti de tokens invalidados por logout
    pub revoked_tokens: Arc<RwLock<HashSet<String>>>,
    // Serializa los ciclos cargar-mutar-guardar sobre los snapshots
    pub write_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(gateway: Arc<dyn SnapshotGateway>, config: EnvironmentConfig) -> Self {
        Self {
            gateway,
            config,
            revoked_tokens: Arc::new(RwLock::new(HashSet::new())),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Revocar un token por su jti
    pub async fn revoke_token(&self, jti: String) {
        let mut revoked = self.revoked_tokens.write().await;
        revoked.insert(jti);
    }

    /// Verificar si un token fue revocado
    pub async fn is_token_revoked(&self, jti: &str) -> bool {
        let revoked = self.revoked_tokens.read().await;
        revoked.contains(jti)
    }
}
