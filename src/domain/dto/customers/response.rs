use serde::{Deserialize, Serialize};

use crate::domain::entities::customers::Customer;

/// Customer as returned by the customer service and read back by the order service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub address: Option<String>,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id.unwrap_or_default(),
            user_id: customer.user_id,
            name: customer.name,
            phone: customer.phone,
            address: customer.address,
        }
    }
}
