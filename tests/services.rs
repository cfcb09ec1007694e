use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_storefront::SERVICE_MANAGER_ROLE;
use pushkind_storefront::domain::order::OrderStatus;
use pushkind_storefront::forms::cart::{AddToCartForm, UpdateQuantityForm};
use pushkind_storefront::forms::categories::{AddCategoryForm, AssignChildCategoriesForm};
use pushkind_storefront::forms::checkout::{ChangeOrderStatusForm, PlaceOrderForm};
use pushkind_storefront::forms::products::AddProductForm;
use pushkind_storefront::repository::DieselRepository;
use pushkind_storefront::services::{ServiceError, cart, catalog, categories, orders, products};

mod common;

fn user(email: &str, roles: &[&str]) -> AuthenticatedUser {
    AuthenticatedUser {
        sub: email.into(),
        email: email.into(),
        hub_id: 1,
        name: "User".into(),
        roles: roles.iter().map(|role| role.to_string()).collect(),
        exp: 0,
    }
}

fn category_form(name: &str, parent_id: Option<i32>) -> AddCategoryForm {
    AddCategoryForm {
        name: name.to_string(),
        description: None,
        parent_id: parent_id.map(|id| id.to_string()),
    }
}

fn product_form(category_id: i32, name: &str) -> AddProductForm {
    AddProductForm {
        category_id,
        name: name.to_string(),
        price: 500,
        discount: 10,
        quantity: 10,
        shipping_cost: 250,
        short_description: None,
        description: None,
        specifications: Some("Origin: Japan\nWeight: 100 g".to_string()),
    }
}

#[test]
fn shopper_browses_subtree_and_places_order() {
    let test_db = common::TestDb::new("service_shopper_places_order.db");
    let repo = DieselRepository::new(test_db.pool());
    let manager = user("manager@example.com", &[SERVICE_MANAGER_ROLE]);
    let shopper = user("shopper@example.com", &[]);
    let stranger = user("stranger@example.com", &[]);

    let root = categories::create_category(&repo, &manager, category_form("Tea", None)).unwrap();
    let child =
        categories::create_category(&repo, &manager, category_form("Green Tea", Some(root.id)))
            .unwrap();
    let product = products::create_product(&repo, &manager, product_form(child.id, "Sencha"))
        .unwrap();
    assert_eq!(product.specifications.len(), 2);

    let page = catalog::load_catalog(&repo, &shopper, Some(&root.slug), None).unwrap();
    assert_eq!(page.products.len(), 1);
    assert_eq!(page.products[0].current_price, 450);
    assert!(page.products[0].is_new);

    let missing = catalog::load_catalog(&repo, &shopper, Some("no-such-slug"), None);
    assert!(matches!(missing, Err(ServiceError::NotFound)));

    cart::add_to_cart(&repo, &shopper, product.id, AddToCartForm { quantity: 1 }).unwrap();
    let item =
        cart::add_to_cart(&repo, &shopper, product.id, AddToCartForm { quantity: 1 }).unwrap();
    assert_eq!(item.quantity, 2);

    let too_many =
        cart::add_to_cart(&repo, &shopper, product.id, AddToCartForm { quantity: 99 });
    assert!(matches!(too_many, Err(ServiceError::Form(_))));

    let update =
        cart::update_cart_quantity(&repo, &shopper, item.id, UpdateQuantityForm { quantity: 3 })
            .unwrap();
    assert_eq!(update.new_quantity, 3);
    assert_eq!(update.total_sum, 1350);
    assert_eq!(update.total_count, 3);

    let foreign =
        cart::update_cart_quantity(&repo, &stranger, item.id, UpdateQuantityForm { quantity: 1 });
    assert!(matches!(foreign, Err(ServiceError::NotFound)));

    let order = orders::place_order(
        &repo,
        &shopper,
        PlaceOrderForm {
            address_id: None,
            payment_method: "cash".to_string(),
        },
    )
    .unwrap();
    assert_eq!(order.totals().grand_total, 1600);
    assert!(cart::load_cart(&repo, &shopper).unwrap().lines.is_empty());

    let again = orders::place_order(
        &repo,
        &shopper,
        PlaceOrderForm {
            address_id: None,
            payment_method: "cash".to_string(),
        },
    );
    assert!(matches!(again, Err(ServiceError::Form(_))));

    assert!(matches!(
        orders::load_order(&repo, &stranger, order.id),
        Err(ServiceError::NotFound)
    ));
    assert_eq!(orders::load_order(&repo, &manager, order.id).unwrap().order.id, order.id);

    orders::change_order_status(
        &repo,
        &manager,
        order.id,
        ChangeOrderStatusForm {
            status: "completed".to_string(),
        },
    )
    .unwrap();
    let completed =
        orders::load_hub_orders(&repo, &manager, Some(OrderStatus::Completed)).unwrap();
    assert_eq!(completed.len(), 1);
    assert_eq!(orders::load_orders(&repo, &stranger).unwrap().len(), 0);
}

#[test]
fn category_management_rejects_cycles_and_duplicates() {
    let test_db = common::TestDb::new("service_category_management.db");
    let repo = DieselRepository::new(test_db.pool());
    let manager = user("manager@example.com", &[SERVICE_MANAGER_ROLE]);

    let root = categories::create_category(&repo, &manager, category_form("Tea", None)).unwrap();
    let child =
        categories::create_category(&repo, &manager, category_form("Green", Some(root.id)))
            .unwrap();

    let duplicate = categories::create_category(&repo, &manager, category_form("Tea", None));
    assert!(matches!(duplicate, Err(ServiceError::Conflict)));

    let cycle = categories::assign_child_categories(
        &repo,
        &manager,
        AssignChildCategoriesForm {
            parent_id: child.id,
            child_ids: vec![root.id],
        },
    );
    assert!(matches!(cycle, Err(ServiceError::Form(_))));

    let shopper = user("shopper@example.com", &[]);
    let denied = categories::load_categories(&repo, &shopper);
    assert!(matches!(denied, Err(ServiceError::Unauthorized)));

    categories::remove_category(&repo, &manager, root.id).unwrap();
    let tree = categories::load_categories(&repo, &manager).unwrap();
    assert!(tree.tree.is_empty());
}
