//! User Entity
//!
//! Account record owned by the auth service. `username` and `email` are unique
//! (enforced by indexes on the `users` collection and checked before writes).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub username: String,
    /// bcrypt hash; never leaves the service.
    pub password_hash: String,
    pub email: String,
}

impl User {
    /// A not yet persisted user.
    pub fn new(username: String, password_hash: String, email: String) -> Self {
        Self {
            id: None,
            username,
            password_hash,
            email,
        }
    }

    /// Id of a persisted user, `0` when unsaved.
    pub fn id_or_default(&self) -> i64 {
        self.id.unwrap_or_default()
    }
}
