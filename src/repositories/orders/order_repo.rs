use std::sync::Arc;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{Collection, IndexModel, bson::doc, options::IndexOptions};

use crate::{
    core::errors::AppError,
    db::Database,
    domain::entities::orders::{Order, OrderStatus},
};

const COLLECTION: &str = "orders";

#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Order>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Order>, AppError>;

    async fn find_by_customer_id(&self, customer_id: i64) -> Result<Vec<Order>, AppError>;

    /// Inserts when `order.id` is `None` (assigning an id), replaces otherwise.
    async fn save(&self, order: Order) -> Result<Order, AppError>;

    /// Sets the status and returns the updated order, or `None` when it does not exist.
    async fn update_status(&self, id: i64, status: OrderStatus) -> Result<Option<Order>, AppError>;

    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError>;
}

pub struct MongoOrderRepository {
    db: Arc<Database>,
}

impl MongoOrderRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<Order> {
        self.db.get_database().collection::<Order>(COLLECTION)
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let customer_index = IndexModel::builder()
            .keys(doc! { "customer_id": 1 })
            .options(
                IndexOptions::builder()
                    .name("customer_id".to_string())
                    .build(),
            )
            .build();

        self.collection().create_index(customer_index).await?;
        Ok(())
    }
}

#[async_trait]
impl OrderRepository for MongoOrderRepository {
    async fn find_all(&self) -> Result<Vec<Order>, AppError> {
        let cursor = self.collection().find(doc! {}).sort(doc! { "_id": 1 }).await?;
        Ok(cursor.try_collect::<Vec<Order>>().await?)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Order>, AppError> {
        Ok(self.collection().find_one(doc! { "_id": id }).await?)
    }

    async fn find_by_customer_id(&self, customer_id: i64) -> Result<Vec<Order>, AppError> {
        let cursor = self
            .collection()
            .find(doc! { "customer_id": customer_id })
            .sort(doc! { "_id": 1 })
            .await?;
        Ok(cursor.try_collect::<Vec<Order>>().await?)
    }

    async fn save(&self, mut order: Order) -> Result<Order, AppError> {
        match order.id {
            Some(id) => {
                self.collection()
                    .replace_one(doc! { "_id": id }, &order)
                    .await?;
            }
            None => {
                order.id = Some(self.db.next_id(COLLECTION).await?);
                self.collection().insert_one(&order).await?;
            }
        }
        Ok(order)
    }

    async fn update_status(&self, id: i64, status: OrderStatus) -> Result<Option<Order>, AppError> {
        let options = mongodb::options::FindOneAndUpdateOptions::builder()
            .return_document(mongodb::options::ReturnDocument::After)
            .build();

        Ok(self
            .collection()
            .find_one_and_update(
                doc! { "_id": id },
                doc! { "$set": { "status": status.to_string() } },
            )
            .with_options(options)
            .await?)
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError> {
        let result = self.collection().delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}
