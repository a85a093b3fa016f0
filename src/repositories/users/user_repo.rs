use std::sync::Arc;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{Collection, IndexModel, bson::doc, options::IndexOptions};

use crate::{core::errors::AppError, db::Database, domain::entities::users::User};

const COLLECTION: &str = "users";

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<User>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    async fn exists_by_username(&self, username: &str) -> Result<bool, AppError>;

    async fn exists_by_email(&self, email: &str) -> Result<bool, AppError>;

    /// Inserts when `user.id` is `None` (assigning an id), replaces otherwise.
    async fn save(&self, user: User) -> Result<User, AppError>;

    /// Returns `false` when nothing was deleted.
    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError>;
}

pub struct MongoUserRepository {
    db: Arc<Database>,
}

impl MongoUserRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<User> {
        self.db.get_database().collection::<User>(COLLECTION)
    }

    /// Unique indexes on `username` and `email`.
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let username_index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("username_unique".to_string())
                    .build(),
            )
            .build();

        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("email_unique".to_string())
                    .build(),
            )
            .build();

        self.collection()
            .create_indexes([username_index, email_index])
            .await?;

        Ok(())
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn find_all(&self) -> Result<Vec<User>, AppError> {
        let cursor = self.collection().find(doc! {}).sort(doc! { "_id": 1 }).await?;
        Ok(cursor.try_collect::<Vec<User>>().await?)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self.collection().find_one(doc! { "_id": id }).await?)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .collection()
            .find_one(doc! { "username": username })
            .await?)
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, AppError> {
        let count = self
            .collection()
            .count_documents(doc! { "username": username })
            .limit(1)
            .await?;
        Ok(count > 0)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, AppError> {
        let count = self
            .collection()
            .count_documents(doc! { "email": email })
            .limit(1)
            .await?;
        Ok(count > 0)
    }

    async fn save(&self, mut user: User) -> Result<User, AppError> {
        match user.id {
            Some(id) => {
                self.collection()
                    .replace_one(doc! { "_id": id }, &user)
                    .await?;
            }
            None => {
                user.id = Some(self.db.next_id(COLLECTION).await?);
                self.collection().insert_one(&user).await?;
            }
        }
        Ok(user)
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError> {
        let result = self.collection().delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}
