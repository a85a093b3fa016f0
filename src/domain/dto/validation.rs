//! Field rules shared by request DTOs.

use rust_decimal::Decimal;
use validator::ValidationError;

/// Rejects empty and whitespace-only strings.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_blank");
        error.message = Some("must not be blank".into());
        return Err(error);
    }
    Ok(())
}

/// Rejects zero and negative amounts.
pub fn positive_decimal(value: &Decimal) -> Result<(), ValidationError> {
    if *value <= Decimal::ZERO {
        let mut error = ValidationError::new("positive");
        error.message = Some("must be greater than 0".into());
        return Err(error);
    }
    Ok(())
}

/// Applies `rule` to an optional value, naming the field in the error.
pub(crate) fn optional<T: ?Sized>(
    field: &'static str,
    value: Option<&T>,
    rule: fn(&T) -> Result<(), ValidationError>,
) -> Result<(), ValidationError> {
    match value {
        Some(value) => rule(value).map_err(|mut error| {
            let message = error
                .message
                .clone()
                .unwrap_or_else(|| "is invalid".into());
            error.message = Some(format!("{} {}", field, message).into());
            error
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_blank() {
        assert!(not_blank("Alice").is_ok());
        assert!(not_blank("").is_err());
        assert!(not_blank("   ").is_err());
    }

    #[test]
    fn test_positive_decimal() {
        assert!(positive_decimal(&Decimal::new(1, 2)).is_ok());
        assert!(positive_decimal(&Decimal::ZERO).is_err());
        assert!(positive_decimal(&Decimal::new(-5, 0)).is_err());
    }

    #[test]
    fn test_optional_names_the_field() {
        assert!(optional("name", None::<&str>, not_blank).is_ok());

        let error = optional("name", Some(" "), not_blank).unwrap_err();
        assert_eq!(error.message.unwrap(), "name must not be blank");
    }
}
