use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::User;

// Response de usuario (sin hash de contraseña)
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub role: String,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            role: user.role,
            email: user.email,
        }
    }
}

// Request para actualizar la contraseña del propio usuario
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePasswordRequest {
    #[validate(length(min = 6, max = 100))]
    pub new_password: String,
}
