//! Modelo de User
//!
//! Usuarios del sistema, clientes o administradores. La contraseña se
//! persiste únicamente como hash bcrypt y nunca viaja en las respuestas.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_CLIENT: &str = "cliente";

/// Roles permitidos al registrar un usuario
pub const ROLES: [&str; 2] = [ROLE_ADMIN, ROLE_CLIENT];

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: String,
    pub name: String,
    pub role: String,
    pub email: String,
    pub password_hash: String,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}
