use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde_json::{Map, Value};

use crate::domain::product::{
    NewProduct as DomainNewProduct, Product as DomainProduct, UpdateProduct as DomainUpdateProduct,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::products)]
pub struct Product {
    pub id: i32,
    pub hub_id: i32,
    pub category_id: i32,
    pub name: String,
    pub price: i64,
    pub discount: i32,
    pub quantity: i32,
    pub shipping_cost: i64,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub specifications: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct<'a> {
    pub hub_id: i32,
    pub category_id: i32,
    pub name: &'a str,
    pub price: i64,
    pub discount: i32,
    pub quantity: i32,
    pub shipping_cost: i64,
    pub short_description: Option<&'a str>,
    pub description: Option<&'a str>,
    pub specifications: String,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::products)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateProduct<'a> {
    pub category_id: i32,
    pub name: &'a str,
    pub price: i64,
    pub discount: i32,
    pub quantity: i32,
    pub shipping_cost: i64,
    pub short_description: Option<&'a str>,
    pub description: Option<&'a str>,
    pub specifications: String,
    pub updated_at: NaiveDateTime,
}

fn decode_specifications(raw: &str) -> Map<String, Value> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => map,
        Ok(_) | Err(_) => {
            log::warn!("Ignoring malformed product specifications: {raw}");
            Map::new()
        }
    }
}

fn encode_specifications(map: &Map<String, Value>) -> String {
    Value::Object(map.clone()).to_string()
}

impl From<Product> for DomainProduct {
    fn from(value: Product) -> Self {
        Self {
            id: value.id,
            hub_id: value.hub_id,
            category_id: value.category_id,
            name: value.name,
            price: value.price,
            discount: value.discount,
            quantity: value.quantity,
            shipping_cost: value.shipping_cost,
            short_description: value.short_description,
            description: value.description,
            specifications: decode_specifications(&value.specifications),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewProduct> for NewProduct<'a> {
    fn from(value: &'a DomainNewProduct) -> Self {
        Self {
            hub_id: value.hub_id,
            category_id: value.category_id,
            name: value.name.as_str(),
            price: value.price,
            discount: value.discount,
            quantity: value.quantity,
            shipping_cost: value.shipping_cost,
            short_description: value.short_description.as_deref(),
            description: value.description.as_deref(),
            specifications: encode_specifications(&value.specifications),
        }
    }
}

impl<'a> From<&'a DomainUpdateProduct> for UpdateProduct<'a> {
    fn from(value: &'a DomainUpdateProduct) -> Self {
        Self {
            category_id: value.category_id,
            name: value.name.as_str(),
            price: value.price,
            discount: value.discount,
            quantity: value.quantity,
            shipping_cost: value.shipping_cost,
            short_description: value.short_description.as_deref(),
            description: value.description.as_deref(),
            specifications: encode_specifications(&value.specifications),
            updated_at: value.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_specifications_decode_to_empty_map() {
        assert!(decode_specifications("not json").is_empty());
        assert!(decode_specifications("[1, 2]").is_empty());
    }
}
