use pushkind_common::routes::empty_string_as_none;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::order::{OrderStatus, PaymentMethod};

#[derive(Debug, Error)]
pub enum CheckoutFormError {
    #[error("unknown payment method `{0}`")]
    PaymentMethod(String),
    #[error("unknown order status `{0}`")]
    Status(String),
}

/// Form payload submitted from the checkout page.
#[derive(Debug, Deserialize)]
pub struct PlaceOrderForm {
    /// Saved address to deliver to; empty for pickup.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub address_id: Option<String>,
    pub payment_method: String,
}

/// Normalized checkout request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceOrderPayload {
    pub address_id: Option<i32>,
    pub payment_method: PaymentMethod,
}

impl PlaceOrderForm {
    pub fn into_payload(self) -> Result<PlaceOrderPayload, CheckoutFormError> {
        let payment_method = PaymentMethod::parse(&self.payment_method)
            .ok_or_else(|| CheckoutFormError::PaymentMethod(self.payment_method.clone()))?;

        // A malformed id cannot belong to the user, treat it as no address.
        let address_id = self
            .address_id
            .as_deref()
            .and_then(|raw| raw.trim().parse::<i32>().ok())
            .filter(|id| *id > 0);

        Ok(PlaceOrderPayload {
            address_id,
            payment_method,
        })
    }
}

/// Form payload used by managers to move an order through its lifecycle.
#[derive(Debug, Deserialize)]
pub struct ChangeOrderStatusForm {
    pub status: String,
}

impl ChangeOrderStatusForm {
    pub fn into_status(self) -> Result<OrderStatus, CheckoutFormError> {
        OrderStatus::parse(&self.status).ok_or(CheckoutFormError::Status(self.status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn place_order_form_parses_payment_and_address() {
        let form = PlaceOrderForm {
            address_id: Some("8".to_string()),
            payment_method: "card".to_string(),
        };

        let payload = form.into_payload().expect("expected valid checkout");

        assert_eq!(payload.address_id, Some(8));
        assert_eq!(payload.payment_method, PaymentMethod::Card);
    }

    #[test]
    fn place_order_form_rejects_unknown_payment_method() {
        let form = PlaceOrderForm {
            address_id: None,
            payment_method: "credit_card".to_string(),
        };

        assert!(matches!(
            form.into_payload(),
            Err(CheckoutFormError::PaymentMethod(value)) if value == "credit_card"
        ));
    }

    #[test]
    fn status_form_accepts_known_values_only() {
        let ok = ChangeOrderStatusForm {
            status: "on_hold".to_string(),
        };
        let bad = ChangeOrderStatusForm {
            status: "shipped".to_string(),
        };

        assert_eq!(ok.into_status().ok(), Some(OrderStatus::OnHold));
        assert!(bad.into_status().is_err());
    }
}
