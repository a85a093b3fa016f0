use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Inventory record.
///
/// `price` is stored as a decimal string so no precision is lost in BSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub price: Decimal,
    pub quantity: i32,
}

impl Product {
    pub fn has_stock_for(&self, requested: i32) -> bool {
        self.quantity >= requested
    }
}
