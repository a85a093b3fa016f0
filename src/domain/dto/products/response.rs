use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::entities::products::Product;

/// Product as returned by the product service and read back by the order service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
    pub quantity: i32,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.unwrap_or_default(),
            name: product.name,
            price: product.price,
            quantity: product.quantity,
        }
    }
}
