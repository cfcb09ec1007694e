use chrono::{Local, NaiveDateTime};
use pushkind_common::domain::auth::AuthenticatedUser;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::category::{Category, CategoryTreeNode, build_category_tree, category_path, descendant_ids};
use crate::domain::pricing::format_minor_units;
use crate::domain::product::{Product, ProductListQuery};
use crate::domain::review::{Review, average_rating};
use crate::forms::reviews::AddReviewForm;
use crate::repository::{CategoryReader, ProductReader, ReviewReader, ReviewWriter};
use crate::services::{ServiceError, ServiceResult};

/// Product prepared for listing templates.
#[derive(Debug, Clone, Serialize)]
pub struct ProductCard {
    pub product: Product,
    pub current_price: i64,
    pub price_formatted: String,
    pub current_price_formatted: String,
    pub is_new: bool,
    pub first_specs: Vec<(String, Value)>,
}

impl ProductCard {
    pub fn new(product: Product, now: NaiveDateTime) -> Self {
        let current_price = product.current_price();
        Self {
            current_price,
            price_formatted: format_minor_units(product.price),
            current_price_formatted: format_minor_units(current_price),
            is_new: product.is_new(now),
            first_specs: product.first_specs(),
            product,
        }
    }
}

/// Query string accepted by the catalog pages.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    #[serde(default)]
    pub search: Option<String>,
}

/// Data required to render the catalog page.
pub struct CatalogData {
    pub tree: Vec<CategoryTreeNode>,
    /// Category selected through the slug, if any.
    pub category: Option<Category>,
    /// Root-first chain ending at the selected category.
    pub breadcrumbs: Vec<Category>,
    pub products: Vec<ProductCard>,
    pub search: Option<String>,
}

/// Data required to render the product page.
pub struct ProductDetailData {
    pub card: ProductCard,
    pub breadcrumbs: Vec<Category>,
    pub reviews: Vec<Review>,
    pub average_rating: Option<f64>,
}

/// Lists the hub's products, newest first.
///
/// Selecting a category includes the products of every category beneath it.
pub fn load_catalog<R>(
    repo: &R,
    user: &AuthenticatedUser,
    category_slug: Option<&str>,
    search: Option<&str>,
) -> ServiceResult<CatalogData>
where
    R: CategoryReader + ProductReader + ?Sized,
{
    let categories = repo.list_categories(user.hub_id)?;

    let category = match category_slug.map(str::trim).filter(|slug| !slug.is_empty()) {
        Some(slug) => Some(
            repo.get_category_by_slug(slug, user.hub_id)?
                .ok_or(ServiceError::NotFound)?,
        ),
        None => None,
    };

    let search = search
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_string);

    let mut query = ProductListQuery::new(user.hub_id);
    let mut breadcrumbs = Vec::new();
    if let Some(category) = &category {
        query = query.categories(descendant_ids(&categories, category.id));
        breadcrumbs = category_path(&categories, category.id);
    }
    if let Some(term) = &search {
        query = query.search(term.clone());
    }

    let now = Local::now().naive_utc();
    let products = repo
        .list_products(query)?
        .into_iter()
        .map(|product| ProductCard::new(product, now))
        .collect();

    Ok(CatalogData {
        tree: build_category_tree(&categories),
        category,
        breadcrumbs,
        products,
        search,
    })
}

/// Loads a product with its reviews and category breadcrumbs.
pub fn load_product<R>(
    repo: &R,
    user: &AuthenticatedUser,
    product_id: i32,
) -> ServiceResult<ProductDetailData>
where
    R: CategoryReader + ProductReader + ReviewReader + ?Sized,
{
    let product = repo
        .get_product_by_id(product_id, user.hub_id)?
        .ok_or(ServiceError::NotFound)?;

    let categories = repo.list_categories(user.hub_id)?;
    let breadcrumbs = category_path(&categories, product.category_id);
    let reviews = repo.list_reviews(product.id)?;

    Ok(ProductDetailData {
        card: ProductCard::new(product, Local::now().naive_utc()),
        breadcrumbs,
        average_rating: average_rating(&reviews),
        reviews,
    })
}

/// Stores a review for a product of the user's hub.
pub fn add_review<R>(
    repo: &R,
    user: &AuthenticatedUser,
    product_id: i32,
    form: AddReviewForm,
) -> ServiceResult<Review>
where
    R: ProductReader + ReviewWriter + ?Sized,
{
    if repo.get_product_by_id(product_id, user.hub_id)?.is_none() {
        return Err(ServiceError::NotFound);
    }

    let new_review = form
        .into_new_review(product_id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.create_review(&new_review).map_err(ServiceError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::{HUB_ID, category, fixed_datetime, product, shopper};

    fn tree() -> Vec<Category> {
        vec![
            category(1, None, "Beverages"),
            category(2, Some(1), "Hot Drinks"),
            category(3, Some(2), "Coffee"),
            category(4, None, "Snacks"),
        ]
    }

    #[test]
    fn product_card_applies_discount() {
        let card = ProductCard::new(product(1, 1000, 10, 300), fixed_datetime());

        assert_eq!(card.current_price, 900);
        assert_eq!(card.current_price_formatted, "9.00");
        assert!(card.is_new);
    }

    #[test]
    fn load_catalog_includes_descendant_categories() {
        let mut repo = MockRepository::new();
        repo.expect_list_categories().returning(|_| Ok(tree()));
        repo.expect_get_category_by_slug()
            .withf(|slug, hub_id| slug == "hot-drinks" && *hub_id == HUB_ID)
            .returning(|_, _| Ok(Some(category(2, Some(1), "Hot Drinks"))));
        repo.expect_list_products()
            .times(1)
            .withf(|query| {
                query.hub_id == HUB_ID && query.category_ids == Some(vec![2, 3])
            })
            .returning(|_| Ok(vec![product(7, 500, 0, 0)]));

        let data = load_catalog(&repo, &shopper(), Some("hot-drinks"), None)
            .expect("expected catalog");

        assert_eq!(data.products.len(), 1);
        let crumbs: Vec<i32> = data.breadcrumbs.iter().map(|c| c.id).collect();
        assert_eq!(crumbs, vec![1, 2]);
        assert_eq!(data.tree.len(), 2);
    }

    #[test]
    fn load_catalog_rejects_unknown_slug() {
        let mut repo = MockRepository::new();
        repo.expect_list_categories().returning(|_| Ok(tree()));
        repo.expect_get_category_by_slug()
            .returning(|_, _| Ok(None));
        repo.expect_list_products().never();

        let result = load_catalog(&repo, &shopper(), Some("missing"), None);

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn load_catalog_ignores_blank_search() {
        let mut repo = MockRepository::new();
        repo.expect_list_categories().returning(|_| Ok(Vec::new()));
        repo.expect_list_products()
            .withf(|query| query.search.is_none() && query.category_ids.is_none())
            .returning(|_| Ok(Vec::new()));

        let data = load_catalog(&repo, &shopper(), None, Some("   ")).expect("expected catalog");

        assert!(data.search.is_none());
    }

    #[test]
    fn load_product_collects_reviews_and_breadcrumbs() {
        let mut repo = MockRepository::new();
        repo.expect_get_product_by_id().returning(|id, _| {
            let mut item = product(id, 2000, 0, 0);
            item.category_id = 3;
            Ok(Some(item))
        });
        repo.expect_list_categories().returning(|_| Ok(tree()));
        repo.expect_list_reviews().returning(|product_id| {
            Ok([5, 4]
                .into_iter()
                .enumerate()
                .map(|(index, rating)| Review {
                    id: index as i32 + 1,
                    product_id,
                    rating,
                    name: "Ann".to_string(),
                    email: "ann@example.com".to_string(),
                    review_text: "Good".to_string(),
                    created_at: fixed_datetime(),
                })
                .collect())
        });

        let data = load_product(&repo, &shopper(), 5).expect("expected product");

        assert_eq!(data.card.product.id, 5);
        assert_eq!(data.breadcrumbs.len(), 3);
        assert_eq!(data.average_rating, Some(4.5));
    }

    #[test]
    fn add_review_requires_product_in_hub() {
        let mut repo = MockRepository::new();
        repo.expect_get_product_by_id().returning(|_, _| Ok(None));
        repo.expect_create_review().never();

        let form = AddReviewForm {
            rating: 5,
            name: "Ann".to_string(),
            email: "ann@example.com".to_string(),
            review_text: "Great".to_string(),
        };

        let result = add_review(&repo, &shopper(), 5, form);

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }
}
