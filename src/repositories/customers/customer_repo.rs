use std::sync::Arc;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{Collection, IndexModel, bson::doc, options::IndexOptions};

use crate::{core::errors::AppError, db::Database, domain::entities::customers::Customer};

const COLLECTION: &str = "customers";

#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Customer>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Customer>, AppError>;

    async fn find_by_user_id(&self, user_id: i64) -> Result<Option<Customer>, AppError>;

    async fn exists_by_user_id(&self, user_id: i64) -> Result<bool, AppError>;

    /// Inserts when `customer.id` is `None` (assigning an id), replaces otherwise.
    async fn save(&self, customer: Customer) -> Result<Customer, AppError>;

    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError>;
}

pub struct MongoCustomerRepository {
    db: Arc<Database>,
}

impl MongoCustomerRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<Customer> {
        self.db.get_database().collection::<Customer>(COLLECTION)
    }

    /// One profile per user.
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let user_index = IndexModel::builder()
            .keys(doc! { "user_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("user_id_unique".to_string())
                    .build(),
            )
            .build();

        self.collection().create_index(user_index).await?;
        Ok(())
    }
}

#[async_trait]
impl CustomerRepository for MongoCustomerRepository {
    async fn find_all(&self) -> Result<Vec<Customer>, AppError> {
        let cursor = self.collection().find(doc! {}).sort(doc! { "_id": 1 }).await?;
        Ok(cursor.try_collect::<Vec<Customer>>().await?)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Customer>, AppError> {
        Ok(self.collection().find_one(doc! { "_id": id }).await?)
    }

    async fn find_by_user_id(&self, user_id: i64) -> Result<Option<Customer>, AppError> {
        Ok(self
            .collection()
            .find_one(doc! { "user_id": user_id })
            .await?)
    }

    async fn exists_by_user_id(&self, user_id: i64) -> Result<bool, AppError> {
        let count = self
            .collection()
            .count_documents(doc! { "user_id": user_id })
            .limit(1)
            .await?;
        Ok(count > 0)
    }

    async fn save(&self, mut customer: Customer) -> Result<Customer, AppError> {
        match customer.id {
            Some(id) => {
                self.collection()
                    .replace_one(doc! { "_id": id }, &customer)
                    .await?;
            }
            None => {
                customer.id = Some(self.db.next_id(COLLECTION).await?);
                self.collection().insert_one(&customer).await?;
            }
        }
        Ok(customer)
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError> {
        let result = self.collection().delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}
