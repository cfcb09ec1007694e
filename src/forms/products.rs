use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::pricing::{MAX_DISCOUNT_PERCENT, MAX_PRODUCT_AMOUNT};
use crate::domain::product::{NewProduct, UpdateProduct};
use crate::forms::{optional_multiline, sanitize_inline_text};

/// Maximum allowed length for a product name.
const NAME_MAX_LEN: usize = 255;
const NAME_MAX_LEN_VALIDATOR: u64 = NAME_MAX_LEN as u64;

const SHORT_DESCRIPTION_MAX_LEN_VALIDATOR: u64 = 512;

/// Result type returned by the product form helpers.
pub type ProductFormResult<T> = Result<T, ProductFormError>;

/// Errors that can occur while processing product forms.
#[derive(Debug, Error)]
pub enum ProductFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The provided name is empty after sanitization.
    #[error("product name cannot be empty")]
    EmptyName,
    /// A specification line is not in `key: value` form.
    #[error("specification line {line} must look like `key: value`")]
    InvalidSpecification { line: usize },
}

/// Form payload emitted when submitting the "Add product" form.
///
/// Monetary fields are entered in minor currency units.
#[derive(Debug, Deserialize, Validate)]
pub struct AddProductForm {
    #[validate(range(min = 1))]
    pub category_id: i32,
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    #[validate(range(min = 0, max = MAX_PRODUCT_AMOUNT))]
    pub price: i64,
    #[serde(default)]
    #[validate(range(min = 0, max = MAX_DISCOUNT_PERCENT))]
    pub discount: i32,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub quantity: i32,
    #[serde(default)]
    #[validate(range(min = 0, max = MAX_PRODUCT_AMOUNT))]
    pub shipping_cost: i64,
    #[serde(default)]
    #[validate(length(max = SHORT_DESCRIPTION_MAX_LEN_VALIDATOR))]
    pub short_description: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// One `key: value` pair per line.
    #[serde(default)]
    pub specifications: Option<String>,
}

impl AddProductForm {
    /// Validates and sanitizes the payload into a domain `NewProduct`.
    pub fn into_new_product(self, hub_id: i32) -> ProductFormResult<NewProduct> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(ProductFormError::EmptyName);
        }

        let specifications = parse_specifications(self.specifications.as_deref().unwrap_or(""))?;

        let mut new_product = NewProduct::new(hub_id, self.category_id, name, self.price)
            .with_discount(self.discount)
            .with_quantity(self.quantity)
            .with_shipping_cost(self.shipping_cost)
            .with_specifications(specifications);

        if let Some(text) = self
            .short_description
            .as_deref()
            .map(sanitize_inline_text)
            .filter(|text| !text.is_empty())
        {
            new_product = new_product.with_short_description(text);
        }

        if let Some(description) = optional_multiline(self.description.as_deref()) {
            new_product = new_product.with_description(description);
        }

        Ok(new_product)
    }
}

/// Form payload emitted when editing an existing product.
///
/// Every editable field is submitted, the result replaces the stored values.
#[derive(Debug, Deserialize, Validate)]
pub struct EditProductForm {
    #[validate(range(min = 1))]
    pub product_id: i32,
    #[validate(range(min = 1))]
    pub category_id: i32,
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    #[validate(range(min = 0, max = MAX_PRODUCT_AMOUNT))]
    pub price: i64,
    #[serde(default)]
    #[validate(range(min = 0, max = MAX_DISCOUNT_PERCENT))]
    pub discount: i32,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub quantity: i32,
    #[serde(default)]
    #[validate(range(min = 0, max = MAX_PRODUCT_AMOUNT))]
    pub shipping_cost: i64,
    #[serde(default)]
    #[validate(length(max = SHORT_DESCRIPTION_MAX_LEN_VALIDATOR))]
    pub short_description: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub specifications: Option<String>,
}

impl EditProductForm {
    /// Validates and sanitizes the payload into a full `UpdateProduct`.
    ///
    /// Returns the product identifier alongside the update.
    pub fn into_update_product(self, hub_id: i32) -> ProductFormResult<(i32, UpdateProduct)> {
        self.validate()?;

        let product_id = self.product_id;
        let add = AddProductForm {
            category_id: self.category_id,
            name: self.name,
            price: self.price,
            discount: self.discount,
            quantity: self.quantity,
            shipping_cost: self.shipping_cost,
            short_description: self.short_description,
            description: self.description,
            specifications: self.specifications,
        };

        let new_product = add.into_new_product(hub_id)?;

        Ok((product_id, UpdateProduct::from(new_product)))
    }
}

/// Parse `key: value` lines into a specification map.
///
/// Blank lines are skipped and later duplicates replace earlier ones.
pub fn parse_specifications(input: &str) -> ProductFormResult<Map<String, Value>> {
    let mut specifications = Map::new();

    for (index, raw) in input.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let Some((key, value)) = line.split_once(':') else {
            return Err(ProductFormError::InvalidSpecification { line: index + 1 });
        };

        let key = sanitize_inline_text(key);
        if key.is_empty() {
            return Err(ProductFormError::InvalidSpecification { line: index + 1 });
        }

        specifications.insert(key, Value::String(sanitize_inline_text(value)));
    }

    Ok(specifications)
}
