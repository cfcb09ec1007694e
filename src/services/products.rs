use chrono::Local;
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::check_role;

use crate::SERVICE_MANAGER_ROLE;
use crate::domain::category::{CategoryTreeNode, build_category_tree};
use crate::domain::product::{Product, ProductListQuery};
use crate::forms::products::{AddProductForm, EditProductForm};
use crate::repository::{CategoryReader, ProductReader, ProductWriter};
use crate::services::catalog::ProductCard;
use crate::services::{ServiceError, ServiceResult};

/// Data required to render the product management page.
pub struct ProductsPageData {
    pub products: Vec<ProductCard>,
    /// Categories offered in the product forms.
    pub categories: Vec<CategoryTreeNode>,
}

/// Loads every product of the hub for managers.
pub fn load_products<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<ProductsPageData>
where
    R: CategoryReader + ProductReader + ?Sized,
{
    if !check_role(SERVICE_MANAGER_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let now = Local::now().naive_utc();
    let products = repo
        .list_products(ProductListQuery::new(user.hub_id))?
        .into_iter()
        .map(|product| ProductCard::new(product, now))
        .collect();

    let categories = build_category_tree(&repo.list_categories(user.hub_id)?);

    Ok(ProductsPageData {
        products,
        categories,
    })
}

/// Creates a product in one of the hub's categories.
pub fn create_product<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddProductForm,
) -> ServiceResult<Product>
where
    R: ProductWriter + ?Sized,
{
    if !check_role(SERVICE_MANAGER_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let new_product = form
        .into_new_product(user.hub_id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.create_product(&new_product)
        .map_err(ServiceError::from)
}

/// Replaces the editable fields of an existing product.
pub fn modify_product<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: EditProductForm,
) -> ServiceResult<Product>
where
    R: ProductReader + ProductWriter + ?Sized,
{
    if !check_role(SERVICE_MANAGER_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let (product_id, updates) = form
        .into_update_product(user.hub_id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    if repo.get_product_by_id(product_id, user.hub_id)?.is_none() {
        return Err(ServiceError::NotFound);
    }

    repo.update_product(product_id, user.hub_id, &updates)
        .map_err(ServiceError::from)
}

/// Deletes a product; placed orders keep their snapshot of it.
pub fn remove_product<R>(repo: &R, user: &AuthenticatedUser, product_id: i32) -> ServiceResult<()>
where
    R: ProductWriter + ?Sized,
{
    if !check_role(SERVICE_MANAGER_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    repo.delete_product(product_id, user.hub_id)
        .map_err(ServiceError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::{HUB_ID, category, manager, product, shopper};
    use pushkind_common::repository::errors::RepositoryError;

    fn add_form() -> AddProductForm {
        AddProductForm {
            category_id: 1,
            name: "Kettle".to_string(),
            price: 4_000,
            discount: 25,
            quantity: 3,
            shipping_cost: 200,
            short_description: None,
            description: None,
            specifications: Some("Volume: 1.7 l".to_string()),
        }
    }

    #[test]
    fn load_products_requires_role() {
        let repo = MockRepository::new();

        assert!(matches!(
            load_products(&repo, &shopper()),
            Err(ServiceError::Unauthorized)
        ));
    }

    #[test]
    fn load_products_returns_cards_and_categories() {
        let mut repo = MockRepository::new();
        repo.expect_list_products()
            .withf(|query| query.hub_id == HUB_ID && query.category_ids.is_none())
            .returning(|_| Ok(vec![product(1, 1000, 10, 0)]));
        repo.expect_list_categories()
            .returning(|_| Ok(vec![category(1, None, "Kitchen")]));

        let data = load_products(&repo, &manager()).expect("expected products");

        assert_eq!(data.products[0].current_price, 900);
        assert_eq!(data.categories.len(), 1);
    }

    #[test]
    fn create_product_persists_validated_form() {
        let mut repo = MockRepository::new();
        repo.expect_create_product()
            .times(1)
            .withf(|new_product| {
                new_product.hub_id == HUB_ID
                    && new_product.discount == 25
                    && new_product.specifications.contains_key("Volume")
            })
            .returning(|_| Ok(product(5, 4_000, 25, 200)));

        let created = create_product(&repo, &manager(), add_form()).expect("expected product");

        assert_eq!(created.current_price(), 3_000);
    }

    #[test]
    fn create_product_rejects_out_of_range_discount() {
        let mut repo = MockRepository::new();
        repo.expect_create_product().never();

        let mut form = add_form();
        form.discount = 150;

        assert!(matches!(
            create_product(&repo, &manager(), form),
            Err(ServiceError::Form(_))
        ));
    }

    #[test]
    fn create_product_reports_foreign_category() {
        let mut repo = MockRepository::new();
        repo.expect_create_product()
            .returning(|_| Err(RepositoryError::NotFound));

        assert!(matches!(
            create_product(&repo, &manager(), add_form()),
            Err(ServiceError::NotFound)
        ));
    }

    #[test]
    fn modify_product_requires_existing_product() {
        let mut repo = MockRepository::new();
        repo.expect_get_product_by_id().returning(|_, _| Ok(None));
        repo.expect_update_product().never();

        let form = EditProductForm {
            product_id: 3,
            category_id: 1,
            name: "Kettle".to_string(),
            price: 100,
            discount: 0,
            quantity: 0,
            shipping_cost: 0,
            short_description: None,
            description: None,
            specifications: None,
        };

        assert!(matches!(
            modify_product(&repo, &manager(), form),
            Err(ServiceError::NotFound)
        ));
    }

    #[test]
    fn remove_product_deletes_entry() {
        let mut repo = MockRepository::new();
        repo.expect_delete_product()
            .times(1)
            .withf(|product_id, hub_id| *product_id == 4 && *hub_id == HUB_ID)
            .returning(|_, _| Ok(()));

        assert!(remove_product(&repo, &manager(), 4).is_ok());
    }
}
