use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::review::{NewReview as DomainNewReview, Review as DomainReview};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::reviews)]
pub struct Review {
    pub id: i32,
    pub product_id: i32,
    pub rating: i32,
    pub name: String,
    pub email: String,
    pub review_text: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::reviews)]
pub struct NewReview<'a> {
    pub product_id: i32,
    pub rating: i32,
    pub name: &'a str,
    pub email: &'a str,
    pub review_text: &'a str,
}

impl From<Review> for DomainReview {
    fn from(value: Review) -> Self {
        Self {
            id: value.id,
            product_id: value.product_id,
            rating: value.rating,
            name: value.name,
            email: value.email,
            review_text: value.review_text,
            created_at: value.created_at,
        }
    }
}

impl<'a> From<&'a DomainNewReview> for NewReview<'a> {
    fn from(value: &'a DomainNewReview) -> Self {
        Self {
            product_id: value.product_id,
            rating: value.rating,
            name: value.name.as_str(),
            email: value.email.as_str(),
            review_text: value.review_text.as_str(),
        }
    }
}
