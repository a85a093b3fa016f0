use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::dto::validation::{not_blank, optional, positive_decimal};

/// Body of `POST /products`. `price` accepts a JSON number or a decimal string.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(custom(function = "not_blank"))]
    pub name: String,

    #[validate(custom(function = "positive_decimal"))]
    pub price: Decimal,

    #[validate(range(min = 1, message = "Quantity must be positive"))]
    pub quantity: i32,
}

/// Body of `PUT /products/{id}`; `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_update_product"))]
pub struct UpdateProductRequest {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub price: Option<Decimal>,

    #[serde(default)]
    #[validate(range(min = 1, message = "Quantity must be positive"))]
    pub quantity: Option<i32>,
}

fn validate_update_product(request: &UpdateProductRequest) -> Result<(), ValidationError> {
    optional("name", request.name.as_deref(), not_blank)?;
    optional("price", request.price.as_ref(), positive_decimal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_accepts_numeric_and_string_prices() {
        let numeric: CreateProductRequest =
            serde_json::from_str(r#"{"name":"Lamp","price":12.5,"quantity":3}"#).unwrap();
        let text: CreateProductRequest =
            serde_json::from_str(r#"{"name":"Lamp","price":"12.50","quantity":3}"#).unwrap();

        assert_eq!(numeric.price, text.price);
        assert!(numeric.validate().is_ok());
    }

    #[test]
    fn test_create_rejects_non_positive_values() {
        let request = CreateProductRequest {
            name: "Lamp".to_string(),
            price: Decimal::ZERO,
            quantity: 0,
        };
        let errors = request.validate().unwrap_err();

        assert!(errors.field_errors().contains_key("price"));
        assert!(errors.field_errors().contains_key("quantity"));
    }

    #[test]
    fn test_update_validates_only_present_fields() {
        assert!(UpdateProductRequest::default().validate().is_ok());

        let negative_price = UpdateProductRequest {
            price: Some(Decimal::new(-1, 0)),
            ..Default::default()
        };
        assert!(negative_price.validate().is_err());

        let zero_quantity = UpdateProductRequest {
            quantity: Some(0),
            ..Default::default()
        };
        assert!(zero_quantity.validate().is_err());
    }
}
