use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::dto::validation::{not_blank, optional};

/// Body of `POST /customers`. The owning `userId` comes from the token, never the body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerRequest {
    #[validate(custom(function = "not_blank"))]
    pub name: String,

    #[validate(custom(function = "not_blank"))]
    pub phone: String,

    #[serde(default)]
    pub address: Option<String>,
}

/// Body of `PUT /customers/{id}`; `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_update_customer"))]
pub struct UpdateCustomerRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

fn validate_update_customer(request: &UpdateCustomerRequest) -> Result<(), ValidationError> {
    optional("name", request.name.as_deref(), not_blank)?;
    optional("phone", request.phone.as_deref(), not_blank)
}
