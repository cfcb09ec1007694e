use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

/// Customer review attached to a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Review {
    pub id: i32,
    pub product_id: i32,
    /// Star rating within `MIN_RATING..=MAX_RATING`.
    pub rating: i32,
    pub name: String,
    pub email: String,
    pub review_text: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub product_id: i32,
    pub rating: i32,
    pub name: String,
    pub email: String,
    pub review_text: String,
}

/// Mean rating rounded to one decimal, `None` without reviews.
pub fn average_rating(reviews: &[Review]) -> Option<f64> {
    if reviews.is_empty() {
        return None;
    }
    let sum: i64 = reviews.iter().map(|review| i64::from(review.rating)).sum();
    let average = sum as f64 / reviews.len() as f64;
    Some((average * 10.0).round() / 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(rating: i32) -> Review {
        Review {
            id: rating,
            product_id: 1,
            rating,
            name: "Ann".to_string(),
            email: "ann@example.com".to_string(),
            review_text: "Fine".to_string(),
            created_at: NaiveDateTime::default(),
        }
    }

    #[test]
    fn average_rating_rounds_to_one_decimal() {
        assert_eq!(average_rating(&[]), None);
        assert_eq!(average_rating(&[review(5), review(4), review(4)]), Some(4.3));
    }
}
