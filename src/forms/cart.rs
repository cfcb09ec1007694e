use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::cart::{MAX_CART_QUANTITY, MIN_CART_QUANTITY};

/// Errors that can occur while processing cart forms.
#[derive(Debug, Error)]
pub enum CartFormError {
    #[error("quantity must be between {} and {}", MIN_CART_QUANTITY, MAX_CART_QUANTITY)]
    InvalidQuantity(#[from] ValidationErrors),
}

fn default_quantity() -> i32 {
    MIN_CART_QUANTITY
}

/// Form payload for adding a product to the cart.
#[derive(Debug, Deserialize, Validate)]
pub struct AddToCartForm {
    #[validate(range(min = MIN_CART_QUANTITY, max = MAX_CART_QUANTITY))]
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

impl AddToCartForm {
    pub fn into_quantity(self) -> Result<i32, CartFormError> {
        self.validate()?;
        Ok(self.quantity)
    }
}

/// Payload of the quantity update endpoint, accepted as a form or JSON body.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdateQuantityForm {
    #[validate(range(min = MIN_CART_QUANTITY, max = MAX_CART_QUANTITY))]
    pub quantity: i32,
}

impl UpdateQuantityForm {
    pub fn into_quantity(self) -> Result<i32, CartFormError> {
        self.validate()?;
        Ok(self.quantity)
    }
}
