use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::review::{MAX_RATING, MIN_RATING, NewReview};
use crate::forms::{sanitize_inline_text, sanitize_multiline_text};

#[derive(Debug, Error)]
pub enum ReviewFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("review text cannot be empty")]
    EmptyText,
}

/// Form payload for reviewing a product.
#[derive(Debug, Deserialize, Validate)]
pub struct AddReviewForm {
    #[validate(range(min = MIN_RATING, max = MAX_RATING))]
    pub rating: i32,
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 4096))]
    pub review_text: String,
}

impl AddReviewForm {
    pub fn into_new_review(self, product_id: i32) -> Result<NewReview, ReviewFormError> {
        self.validate()?;

        let review_text = sanitize_multiline_text(&self.review_text);
        if review_text.is_empty() {
            return Err(ReviewFormError::EmptyText);
        }

        Ok(NewReview {
            product_id,
            rating: self.rating,
            name: sanitize_inline_text(&self.name),
            email: self.email.trim().to_lowercase(),
            review_text,
        })
    }
}
