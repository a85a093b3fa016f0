use serde::{Deserialize, Serialize};

use crate::domain::entities::users::User;

/// Public view of a user; the password hash is never included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id_or_default(),
            username: user.username,
            email: user.email,
        }
    }
}
