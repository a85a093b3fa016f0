use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::errors::AppError;

/// Lifecycle state of an order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Created but not yet accepted.
    Pending,
    /// Stock was available when the order was placed.
    #[default]
    Confirmed,
    Shipped,
    Completed,
    Cancelled,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::Confirmed => write!(f, "CONFIRMED"),
            Self::Shipped => write!(f, "SHIPPED"),
            Self::Completed => write!(f, "COMPLETED"),
            Self::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// A placed order.
///
/// `customer_id` and `product_id` reference records owned by other services and are
/// copied in at creation time; `total_price` is fixed then as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub customer_id: i64,
    pub product_id: i64,
    pub quantity: i32,
    pub total_price: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// New confirmed order priced at `unit_price × quantity`.
    ///
    /// Fails with a `ValidationError` when the total does not fit a [`Decimal`].
    pub fn confirmed(
        customer_id: i64,
        product_id: i64,
        quantity: i32,
        unit_price: Decimal,
    ) -> Result<Self, AppError> {
        let total_price = unit_price
            .checked_mul(Decimal::from(quantity))
            .ok_or_else(|| AppError::ValidationError("Total price out of range".to_string()))?;

        Ok(Self {
            id: None,
            customer_id,
            product_id,
            quantity,
            total_price,
            status: OrderStatus::Confirmed,
            created_at: Utc::now(),
        })
    }
}
