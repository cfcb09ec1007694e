use std::env;

use actix_files::Files;
use actix_identity::IdentityMiddleware;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::{App, HttpServer, middleware, web};
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
use dotenvy::dotenv;
use pushkind_common::db::establish_connection_pool;
use pushkind_common::middleware::RedirectUnauthorized;
use pushkind_common::models::config::CommonServerConfig;
use pushkind_common::routes::{logout, not_assigned};
use tera::Tera;

use pushkind_storefront::repository::DieselRepository;
use pushkind_storefront::routes::addresses::{add_address, delete_address, show_addresses};
use pushkind_storefront::routes::api::api_v1_categories;
use pushkind_storefront::routes::cart::{
    post_add_to_cart, post_cart_quantity, post_remove_cart_item, show_cart,
};
use pushkind_storefront::routes::categories::{
    add_category, assign_category, delete_category, edit_category, show_categories,
};
use pushkind_storefront::routes::favorites::{
    post_add_favorite, post_remove_favorite, show_favorites,
};
use pushkind_storefront::routes::main::{post_review, show_category, show_index, show_product};
use pushkind_storefront::routes::orders::{
    post_checkout, post_order_status, show_checkout, show_hub_orders, show_order, show_orders,
};
use pushkind_storefront::routes::products::{
    add_product, delete_product, edit_product, show_products,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let database_url = env::var("DATABASE_URL").unwrap_or("app.db".to_string());
    let port = env::var("PORT").unwrap_or("8080".to_string());
    let port = port.parse::<u16>().unwrap_or(8080);
    let address = env::var("ADDRESS").unwrap_or("127.0.0.1".to_string());

    let secret = env::var("SECRET_KEY");
    let secret_key = match &secret {
        Ok(key) => Key::from(key.as_bytes()),
        Err(_) => {
            log::warn!("SECRET_KEY is not set, sessions will not survive a restart");
            Key::generate()
        }
    };

    let auth_service_url = match env::var("AUTH_SERVICE_URL") {
        Ok(auth_service_url) => auth_service_url,
        Err(_) => {
            log::error!("AUTH_SERVICE_URL environment variable not set");
            std::process::exit(1);
        }
    };

    let common_config = CommonServerConfig {
        secret: secret.unwrap_or_default(),
        auth_service_url,
    };

    let domain = env::var("DOMAIN").unwrap_or("localhost".to_string());

    let pool = match establish_connection_pool(&database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = match Tera::new("templates/**/*") {
        Ok(t) => t,
        Err(e) => {
            log::error!("Parsing error(s): {e}");
            std::process::exit(1);
        }
    };

    log::info!("Starting storefront on {address}:{port}");

    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(Some(format!(".{domain}")))
                    .build(),
            )
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .service(not_assigned)
            .service(
                web::scope("/api")
                    .wrap(RedirectUnauthorized)
                    .service(api_v1_categories),
            )
            .service(
                web::scope("")
                    .wrap(RedirectUnauthorized)
                    .service(show_index)
                    .service(show_category)
                    .service(show_product)
                    .service(post_review)
                    .service(show_cart)
                    .service(post_add_to_cart)
                    .service(post_cart_quantity)
                    .service(post_remove_cart_item)
                    .service(show_favorites)
                    .service(post_add_favorite)
                    .service(post_remove_favorite)
                    .service(show_addresses)
                    .service(add_address)
                    .service(delete_address)
                    .service(show_checkout)
                    .service(post_checkout)
                    .service(show_orders)
                    // Must precede `/orders/{order_id}`.
                    .service(show_hub_orders)
                    .service(show_order)
                    .service(post_order_status)
                    .service(show_categories)
                    .service(add_category)
                    .service(assign_category)
                    .service(edit_category)
                    .service(delete_category)
                    .service(show_products)
                    .service(add_product)
                    .service(edit_product)
                    .service(delete_product)
                    .service(logout),
            )
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(common_config.clone()))
    })
    .bind((address, port))?
    .run()
    .await
}
