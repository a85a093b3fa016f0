use std::sync::Arc;

use crate::{
    core::errors::AppError,
    domain::{
        dto::users::{CreateUserRequest, UpdateUserRequest, UserResponse},
        entities::users::User,
    },
    repositories::users::UserRepository,
};

/// User CRUD plus credential checks for the login form.
pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(user_repo: Arc<dyn UserRepository>, bcrypt_cost: u32) -> Self {
        Self {
            user_repo,
            bcrypt_cost,
        }
    }

    pub async fn get_all_users(&self) -> Result<Vec<UserResponse>, AppError> {
        let users = self.user_repo.find_all().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    pub async fn get_user_by_id(&self, id: i64) -> Result<UserResponse, AppError> {
        self.user_repo
            .find_by_id(id)
            .await?
            .map(UserResponse::from)
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }

    /// Creates an account. Username is checked before email; either clash is a 409.
    pub async fn create_user(&self, request: CreateUserRequest) -> Result<UserResponse, AppError> {
        if self.user_repo.exists_by_username(&request.username).await? {
            return Err(AppError::ConflictError("Username already exists".to_string()));
        }

        if self.user_repo.exists_by_email(&request.email).await? {
            return Err(AppError::ConflictError("Email already exists".to_string()));
        }

        let hash_start = std::time::Instant::now();
        let password_hash = self.hash_password(&request.password)?;
        log::debug!("Password hashing took: {:?}", hash_start.elapsed());

        let user = User::new(request.username, password_hash, request.email);
        let created = self.user_repo.save(user).await?;

        log::info!("User created: {} (id {})", created.username, created.id_or_default());

        Ok(UserResponse::from(created))
    }

    /// Overwrites the fields present in `request`. A blank password is ignored.
    pub async fn update_user(
        &self,
        id: i64,
        request: UpdateUserRequest,
    ) -> Result<UserResponse, AppError> {
        let mut user = self
            .user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))?;

        if let Some(username) = request.username {
            if username != user.username && self.user_repo.exists_by_username(&username).await? {
                return Err(AppError::ConflictError("Username already exists".to_string()));
            }
            user.username = username;
        }

        if let Some(email) = request.email {
            if email != user.email && self.user_repo.exists_by_email(&email).await? {
                return Err(AppError::ConflictError("Email already exists".to_string()));
            }
            user.email = email;
        }

        if let Some(password) = request.password.filter(|p| !p.trim().is_empty()) {
            user.password_hash = self.hash_password(&password)?;
        }

        let updated = self.user_repo.save(user).await?;
        Ok(UserResponse::from(updated))
    }

    pub async fn delete_user(&self, id: i64) -> Result<(), AppError> {
        if !self.user_repo.delete_by_id(id).await? {
            return Err(AppError::NotFound(format!("User {} not found", id)));
        }

        log::info!("User deleted: {}", id);
        Ok(())
    }

    /// Checks a username/password pair. Unknown user and wrong password fail alike.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User, AppError> {
        let invalid = || AppError::AuthenticationError("Invalid username or password".to_string());

        let user = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or_else(invalid)?;

        let is_valid = bcrypt::verify(password, &user.password_hash)
            .map_err(|e| AppError::InternalError(format!("Password verification failed: {}", e)))?;

        if !is_valid {
            log::warn!("Failed login for user '{}'", username);
            return Err(invalid());
        }

        Ok(user)
    }

    fn hash_password(&self, password: &str) -> Result<String, AppError> {
        bcrypt::hash(password, self.bcrypt_cost)
            .map_err(|e| AppError::InternalError(format!("Password hashing failed: {}", e)))
    }
}
