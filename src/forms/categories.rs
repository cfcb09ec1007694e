use std::collections::HashSet;

use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::category::{NewCategory, UpdateCategory};
use crate::forms::{optional_multiline, sanitize_inline_text};

/// Maximum length allowed for a category name.
const NAME_MAX_LEN: usize = 128;
const NAME_MAX_LEN_VALIDATOR: u64 = NAME_MAX_LEN as u64;

/// Maximum length allowed for a category description.
const DESCRIPTION_MAX_LEN: usize = 2048;
const DESCRIPTION_MAX_LEN_VALIDATOR: u64 = DESCRIPTION_MAX_LEN as u64;

/// Result type returned by the category form helpers.
pub type CategoryFormResult<T> = Result<T, CategoryFormError>;

/// Errors that can occur while processing category forms.
#[derive(Debug, Error)]
pub enum CategoryFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The provided name is empty after sanitization.
    #[error("category name cannot be empty")]
    EmptyName,
    /// Supplied identifier field could not be parsed.
    #[error("invalid {field} `{value}`")]
    InvalidIdentifier { field: &'static str, value: String },
}

/// Form payload emitted when submitting the "Add category" form.
#[derive(Debug, Deserialize, Validate)]
pub struct AddCategoryForm {
    /// Name entered by the user.
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    /// Optional description for the category.
    #[validate(length(max = DESCRIPTION_MAX_LEN_VALIDATOR))]
    #[serde(default)]
    pub description: Option<String>,
    /// Optional parent category identifier in string form.
    #[serde(default)]
    pub parent_id: Option<String>,
}

impl AddCategoryForm {
    /// Validates and sanitizes the payload into a domain `NewCategory`.
    pub fn into_new_category(self, hub_id: i32) -> CategoryFormResult<NewCategory> {
        self.validate()?;

        let sanitized_name = sanitize_inline_text(&self.name);
        if sanitized_name.is_empty() {
            return Err(CategoryFormError::EmptyName);
        }

        let parent_id = parse_optional_i32(self.parent_id, "parent category")?;

        let mut new_category = NewCategory::new(hub_id, sanitized_name);
        if let Some(description) = optional_multiline(self.description.as_deref()) {
            new_category = new_category.with_description(description);
        }
        if let Some(parent_id) = parent_id {
            new_category = new_category.with_parent_id(parent_id);
        }

        Ok(new_category)
    }
}

/// Normalized payload produced by the "Edit category" form.
#[derive(Debug)]
pub struct EditCategoryPayload {
    /// Identifier of the category to update.
    pub category_id: i32,
    /// Rename and description data applied to the category.
    pub update: UpdateCategory,
}

/// Form payload emitted when editing an existing category.
#[derive(Debug, Deserialize, Validate)]
pub struct EditCategoryForm {
    #[validate(range(min = 1))]
    pub category_id: i32,
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    #[validate(length(max = DESCRIPTION_MAX_LEN_VALIDATOR))]
    #[serde(default)]
    pub description: Option<String>,
}

impl EditCategoryForm {
    /// Validates and sanitizes the payload into a domain `UpdateCategory`.
    pub fn into_update_category(self) -> CategoryFormResult<EditCategoryPayload> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(CategoryFormError::EmptyName);
        }

        let description = optional_multiline(self.description.as_deref());

        Ok(EditCategoryPayload {
            category_id: self.category_id,
            update: UpdateCategory::new(name, description),
        })
    }
}

/// Normalized payload produced by the "Assign child categories" form.
#[derive(Debug)]
pub struct AssignChildCategoriesPayload {
    /// Identifier of the parent category.
    pub parent_id: i32,
    /// Unique list of child category identifiers to associate with the parent.
    pub child_ids: Vec<i32>,
}

/// Form payload emitted when submitting the "Assign child categories" form.
///
/// `child_ids` repeats once per selected checkbox, so the payload must be
/// decoded with `serde_html_form`.
#[derive(Debug, Deserialize)]
pub struct AssignChildCategoriesForm {
    pub parent_id: i32,
    #[serde(default)]
    pub child_ids: Vec<i32>,
}

impl AssignChildCategoriesForm {
    /// Sanitizes the payload into a normalized assignment request.
    ///
    /// Non-positive ids and duplicates are dropped. The parent id itself is
    /// kept so the service can reject the cycle explicitly.
    pub fn into_payload(self) -> AssignChildCategoriesPayload {
        let mut seen = HashSet::new();
        let child_ids = self
            .child_ids
            .into_iter()
            .filter(|child_id| *child_id > 0 && seen.insert(*child_id))
            .collect();

        AssignChildCategoriesPayload {
            parent_id: self.parent_id,
            child_ids,
        }
    }
}

fn parse_optional_i32(
    value: Option<String>,
    field: &'static str,
) -> CategoryFormResult<Option<i32>> {
    let Some(raw) = value else {
        return Ok(None);
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    match trimmed.parse::<i32>() {
        Ok(parsed) if parsed > 0 => Ok(Some(parsed)),
        Ok(_) => Ok(None),
        Err(_) => Err(CategoryFormError::InvalidIdentifier {
            field,
            value: trimmed.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_category_form_sanitizes_and_converts() {
        let form = AddCategoryForm {
            name: "  Fresh Produce  ".to_string(),
            description: Some("  Fruits\n\n Vegetables  ".to_string()),
            parent_id: Some(" 12 ".to_string()),
        };

        let new_category = form
            .into_new_category(5)
            .expect("expected conversion to succeed");

        assert_eq!(new_category.hub_id, 5);
        assert_eq!(new_category.name, "Fresh Produce");
        assert_eq!(
            new_category.description.as_deref(),
            Some("Fruits\n\nVegetables")
        );
        assert_eq!(new_category.parent_id, Some(12));
    }

    #[test]
    fn add_category_form_rejects_empty_name() {
        let form = AddCategoryForm {
            name: "   ".to_string(),
            description: None,
            parent_id: None,
        };

        let result = form.into_new_category(1);

        assert!(matches!(result, Err(CategoryFormError::EmptyName)));
    }

    #[test]
    fn add_category_form_rejects_invalid_parent_id() {
        let form = AddCategoryForm {
            name: "Pantry".to_string(),
            description: None,
            parent_id: Some("abc".to_string()),
        };

        let result = form.into_new_category(1);

        assert!(matches!(
            result,
            Err(CategoryFormError::InvalidIdentifier { field, value })
                if field == "parent category" && value == "abc"
        ));
    }

    #[test]
    fn assign_child_categories_form_filters_duplicates() {
        let form = AssignChildCategoriesForm {
            parent_id: 10,
            child_ids: vec![11, 12, 11, -1, 0],
        };

        let payload = form.into_payload();

        assert_eq!(payload.parent_id, 10);
        assert_eq!(payload.child_ids, vec![11, 12]);
    }

    #[test]
    fn assign_child_categories_form_decodes_repeated_fields() {
        let form: AssignChildCategoriesForm =
            serde_html_form::from_str("parent_id=3&child_ids=4&child_ids=5")
                .expect("expected form to decode");

        assert_eq!(form.parent_id, 3);
        assert_eq!(form.child_ids, vec![4, 5]);
    }

    #[test]
    fn edit_category_form_builds_payload() {
        let form = EditCategoryForm {
            category_id: 42,
            name: "  Pantry  ".to_string(),
            description: Some(" Dry goods ".to_string()),
        };

        let payload = form
            .into_update_category()
            .expect("expected payload conversion to succeed");

        assert_eq!(payload.category_id, 42);
        assert_eq!(payload.update.name, "Pantry");
        assert_eq!(payload.update.description.as_deref(), Some("Dry goods"));
    }

    #[test]
    fn edit_category_form_clears_blank_description() {
        let form = EditCategoryForm {
            category_id: 2,
            name: " Pantry ".to_string(),
            description: Some("  ".to_string()),
        };

        let payload = form
            .into_update_category()
            .expect("expected payload conversion to succeed");

        assert!(payload.update.description.is_none());
    }

    #[test]
    fn edit_category_form_rejects_zero_id() {
        let form = EditCategoryForm {
            category_id: 0,
            name: "Pantry".to_string(),
            description: None,
        };

        assert!(matches!(
            form.into_update_category(),
            Err(CategoryFormError::Validation(_))
        ));
    }
}
