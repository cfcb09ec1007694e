use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::address::NewAddress;
use crate::forms::sanitize_inline_text;

/// Errors that can occur while processing the address form.
#[derive(Debug, Error)]
pub enum AddressFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),
}

/// Form payload for storing a delivery address.
#[derive(Debug, Deserialize, Validate)]
pub struct AddAddressForm {
    #[validate(length(min = 1, max = 255))]
    pub full_name: String,
    #[validate(length(min = 1, max = 255))]
    pub street: String,
    #[validate(length(min = 1, max = 16))]
    pub zip_code: String,
    #[validate(length(min = 1, max = 128))]
    pub city: String,
    #[validate(length(min = 1, max = 32))]
    pub phone: String,
}

impl AddAddressForm {
    /// Validates and sanitizes the payload into a domain `NewAddress`.
    pub fn into_new_address(self, user_id: i32) -> Result<NewAddress, AddressFormError> {
        self.validate()?;

        let required = |value: &str, field: &'static str| {
            let sanitized = sanitize_inline_text(value);
            if sanitized.is_empty() {
                Err(AddressFormError::EmptyField(field))
            } else {
                Ok(sanitized)
            }
        };

        Ok(NewAddress {
            user_id,
            full_name: required(&self.full_name, "full name")?,
            street: required(&self.street, "street")?,
            zip_code: required(&self.zip_code, "zip code")?,
            city: required(&self.city, "city")?,
            phone: required(&self.phone, "phone")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> AddAddressForm {
        AddAddressForm {
            full_name: " Ann  Smith ".to_string(),
            street: "1 Main St".to_string(),
            zip_code: "01234".to_string(),
            city: "Springfield".to_string(),
            phone: "+1 555 0100".to_string(),
        }
    }

    #[test]
    fn address_form_keeps_leading_zeroes_in_zip() {
        let address = form().into_new_address(4).expect("expected valid address");

        assert_eq!(address.user_id, 4);
        assert_eq!(address.full_name, "Ann Smith");
        assert_eq!(address.zip_code, "01234");
    }

    #[test]
    fn address_form_rejects_whitespace_fields() {
        let mut form = form();
        form.city = "   ".to_string();

        assert!(matches!(
            form.into_new_address(4),
            Err(AddressFormError::EmptyField("city"))
        ));
    }
}
