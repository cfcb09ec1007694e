use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::check_role;

use crate::SERVICE_MANAGER_ROLE;
use crate::domain::category::{Category, CategoryTreeNode, build_category_tree, category_path};
use crate::forms::categories::{AddCategoryForm, AssignChildCategoriesForm, EditCategoryForm};
use crate::repository::{CategoryReader, CategoryWriter};
use crate::services::{ServiceError, ServiceResult};

/// Data required to render the categories index template.
pub struct CategoryTreeData {
    /// Hierarchical representation of the categories.
    pub tree: Vec<CategoryTreeNode>,
}

/// Loads the category management page.
pub fn load_categories<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<CategoryTreeData>
where
    R: CategoryReader + ?Sized,
{
    if !check_role(SERVICE_MANAGER_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    load_category_tree(repo, user)
}

/// Category navigation shown to every shopper of the hub.
pub fn load_category_tree<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<CategoryTreeData>
where
    R: CategoryReader + ?Sized,
{
    let flat = repo.list_categories(user.hub_id)?;

    Ok(CategoryTreeData {
        tree: build_category_tree(&flat),
    })
}

/// Creates a new category for the authenticated user's hub.
pub fn create_category<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddCategoryForm,
) -> ServiceResult<Category>
where
    R: CategoryReader + CategoryWriter + ?Sized,
{
    if !check_role(SERVICE_MANAGER_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let new_category = form
        .into_new_category(user.hub_id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    if repo
        .get_category_by_name(&new_category.name, user.hub_id)?
        .is_some()
    {
        return Err(ServiceError::Conflict);
    }

    repo.create_category(&new_category)
        .map_err(ServiceError::from)
}

/// Renames an existing category; the slug follows the new name.
pub fn modify_category<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: EditCategoryForm,
) -> ServiceResult<Category>
where
    R: CategoryReader + CategoryWriter + ?Sized,
{
    if !check_role(SERVICE_MANAGER_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let payload = form
        .into_update_category()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    if repo
        .get_category_by_id(payload.category_id, user.hub_id)?
        .is_none()
    {
        return Err(ServiceError::NotFound);
    }

    let holder = repo.get_category_by_name(&payload.update.name, user.hub_id)?;
    if holder.is_some_and(|holder| holder.id != payload.category_id) {
        return Err(ServiceError::Conflict);
    }

    repo.update_category(payload.category_id, user.hub_id, &payload.update)
        .map_err(ServiceError::from)
}

/// Replaces the direct children of a category.
///
/// Rejects selections that would put the parent, or one of its ancestors,
/// beneath itself.
pub fn assign_child_categories<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AssignChildCategoriesForm,
) -> ServiceResult<Category>
where
    R: CategoryReader + CategoryWriter + ?Sized,
{
    if !check_role(SERVICE_MANAGER_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let payload = form.into_payload();
    let categories = repo.list_categories(user.hub_id)?;

    let lineage = category_path(&categories, payload.parent_id);
    if lineage.is_empty() {
        return Err(ServiceError::NotFound);
    }

    if let Some(ancestor) = lineage
        .iter()
        .find(|ancestor| payload.child_ids.contains(&ancestor.id))
    {
        return Err(ServiceError::Form(format!(
            "Категория «{}» не может стать дочерней для своего потомка.",
            ancestor.name
        )));
    }

    repo.assign_child_categories(user.hub_id, payload.parent_id, &payload.child_ids)
        .map_err(ServiceError::from)
}

/// Deletes a category together with its descendants and their products.
pub fn remove_category<R>(repo: &R, user: &AuthenticatedUser, category_id: i32) -> ServiceResult<()>
where
    R: CategoryWriter + ?Sized,
{
    if !check_role(SERVICE_MANAGER_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    repo.delete_category(category_id, user.hub_id)
        .map_err(ServiceError::from)
}
