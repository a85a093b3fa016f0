use std::sync::Arc;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{Collection, bson::doc};

use crate::{core::errors::AppError, db::Database, domain::entities::products::Product};

const COLLECTION: &str = "products";

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Product>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, AppError>;

    /// Inserts when `product.id` is `None` (assigning an id), replaces otherwise.
    async fn save(&self, product: Product) -> Result<Product, AppError>;

    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError>;
}

pub struct MongoProductRepository {
    db: Arc<Database>,
}

impl MongoProductRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<Product> {
        self.db.get_database().collection::<Product>(COLLECTION)
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    async fn find_all(&self) -> Result<Vec<Product>, AppError> {
        let cursor = self.collection().find(doc! {}).sort(doc! { "_id": 1 }).await?;
        Ok(cursor.try_collect::<Vec<Product>>().await?)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, AppError> {
        Ok(self.collection().find_one(doc! { "_id": id }).await?)
    }

    async fn save(&self, mut product: Product) -> Result<Product, AppError> {
        match product.id {
            Some(id) => {
                self.collection()
                    .replace_one(doc! { "_id": id }, &product)
                    .await?;
            }
            None => {
                product.id = Some(self.db.next_id(COLLECTION).await?);
                self.collection().insert_one(&product).await?;
            }
        }
        Ok(product)
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError> {
        let result = self.collection().delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}
