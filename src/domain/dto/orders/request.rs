use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::orders::OrderStatus;

/// Body of `POST /orders`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub product_id: i64,

    #[validate(range(min = 1, message = "Quantity must be positive"))]
    pub quantity: i32,
}

/// Query string of `PUT /orders/{id}/status`.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusQuery {
    pub status: OrderStatus,
}
