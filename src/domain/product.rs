use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::pricing::{self, PricedLine};

/// Products created within this many days are flagged as new.
pub const NEW_PRODUCT_DAYS: i64 = 7;

/// Number of specification entries shown in product cards.
pub const FIRST_SPECS_LIMIT: usize = 5;

/// Domain representation of a product offered by a hub.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Product {
    /// Unique identifier of the product.
    pub id: i32,
    /// Owning hub identifier.
    pub hub_id: i32,
    /// Category the product belongs to.
    pub category_id: i32,
    /// Human-readable name of the product.
    pub name: String,
    /// Price in minor currency units before discount.
    pub price: i64,
    /// Discount in percent, always within `0..=100`.
    pub discount: i32,
    /// Units in stock.
    pub quantity: i32,
    /// Shipping charged once per cart line.
    pub shipping_cost: i64,
    /// Optional teaser shown in listings.
    pub short_description: Option<String>,
    /// Optional longer description shown on the detail page.
    pub description: Option<String>,
    /// Free-form specification table.
    pub specifications: Map<String, Value>,
    /// Timestamp for when the product record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the product record.
    pub updated_at: NaiveDateTime,
}

impl Product {
    /// Unit price with the discount applied.
    pub fn current_price(&self) -> i64 {
        pricing::current_price(self.price, self.discount)
    }

    /// Whether the product was created less than [`NEW_PRODUCT_DAYS`] before `now`.
    pub fn is_new(&self, now: NaiveDateTime) -> bool {
        now - Duration::days(NEW_PRODUCT_DAYS) <= self.created_at
    }

    /// Leading specification entries used in compact listings.
    pub fn first_specs(&self) -> Vec<(String, Value)> {
        self.specifications
            .iter()
            .take(FIRST_SPECS_LIMIT)
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Pricing inputs for `quantity` units of this product.
    pub fn priced_line(&self, quantity: i32) -> PricedLine {
        PricedLine::new(self.price, self.discount, self.shipping_cost, quantity)
    }
}

/// Payload required to insert a new product for a hub.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub hub_id: i32,
    pub category_id: i32,
    pub name: String,
    pub price: i64,
    pub discount: i32,
    pub quantity: i32,
    pub shipping_cost: i64,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub specifications: Map<String, Value>,
}

impl NewProduct {
    /// Build a new product payload without discount, stock or shipping.
    pub fn new(hub_id: i32, category_id: i32, name: impl Into<String>, price: i64) -> Self {
        Self {
            hub_id,
            category_id,
            name: name.into(),
            price,
            discount: 0,
            quantity: 0,
            shipping_cost: 0,
            short_description: None,
            description: None,
            specifications: Map::new(),
        }
    }

    /// Set the discount percent.
    pub fn with_discount(mut self, discount: i32) -> Self {
        self.discount = discount;
        self
    }

    /// Set the number of units in stock.
    pub fn with_quantity(mut self, quantity: i32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Set the shipping cost per line.
    pub fn with_shipping_cost(mut self, shipping_cost: i64) -> Self {
        self.shipping_cost = shipping_cost;
        self
    }

    /// Attach a short teaser text.
    pub fn with_short_description(mut self, text: impl Into<String>) -> Self {
        self.short_description = Some(text.into());
        self
    }

    /// Attach a descriptive text to the product payload.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replace the specification table.
    pub fn with_specifications(mut self, specifications: Map<String, Value>) -> Self {
        self.specifications = specifications;
        self
    }
}

/// Full replacement of the editable product fields.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateProduct {
    pub category_id: i32,
    pub name: String,
    pub price: i64,
    pub discount: i32,
    pub quantity: i32,
    pub shipping_cost: i64,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub specifications: Map<String, Value>,
    /// Timestamp captured when the patch was created.
    pub updated_at: NaiveDateTime,
}

impl From<NewProduct> for UpdateProduct {
    fn from(value: NewProduct) -> Self {
        Self {
            category_id: value.category_id,
            name: value.name,
            price: value.price,
            discount: value.discount,
            quantity: value.quantity,
            shipping_cost: value.shipping_cost,
            short_description: value.short_description,
            description: value.description,
            specifications: value.specifications,
            updated_at: chrono::Local::now().naive_utc(),
        }
    }
}

/// Query definition used to list products for a hub.
#[derive(Debug, Clone, Default)]
pub struct ProductListQuery {
    /// Owning hub identifier.
    pub hub_id: i32,
    /// Restrict results to these categories when set.
    pub category_ids: Option<Vec<i32>>,
    /// Optional name or description search term.
    pub search: Option<String>,
}

impl ProductListQuery {
    /// Construct a query that targets all products belonging to `hub_id`.
    pub fn new(hub_id: i32) -> Self {
        Self {
            hub_id,
            category_ids: None,
            search: None,
        }
    }

    /// Restrict the results to the given categories.
    pub fn categories(mut self, category_ids: impl Into<Vec<i32>>) -> Self {
        self.category_ids = Some(category_ids.into());
        self
    }

    /// Filter the results by a search term applied to the name or description.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }
}
