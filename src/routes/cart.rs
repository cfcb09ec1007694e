use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::models::config::CommonServerConfig;
use pushkind_common::routes::{base_context, redirect, render_template};
use serde_json::json;
use tera::Tera;

use crate::forms::cart::{AddToCartForm, UpdateQuantityForm};
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::cart::{add_to_cart, load_cart, remove_cart_item, update_cart_quantity};

#[get("/cart")]
pub async fn show_cart(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match load_cart(repo.get_ref(), &user) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "cart",
                &server_config.auth_service_url,
            );
            context.insert("lines", &data.lines);
            context.insert("totals", &data.totals);
            context.insert("subtotal", &data.totals.subtotal_formatted());
            context.insert("grand_total", &data.totals.grand_total_formatted());
            render_template(&tera, "cart/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to load cart: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/cart/add/{product_id}")]
pub async fn post_add_to_cart(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddToCartForm>,
) -> impl Responder {
    let product_id = path.into_inner();

    match add_to_cart(repo.get_ref(), &user, product_id, form) {
        Ok(_) => {
            FlashMessage::success("Товар добавлен в корзину.").send();
            redirect("/cart")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Товар не найден.").send();
            redirect("/")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/cart")
        }
        Err(err) => {
            log::error!("Failed to add product {product_id} to cart: {err}");
            FlashMessage::error("Не удалось добавить товар в корзину.").send();
            redirect("/cart")
        }
    }
}

#[post("/cart/{item_id}/quantity")]
/// Set the quantity of a cart line and return the refreshed cart totals as JSON.
pub async fn post_cart_quantity(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<UpdateQuantityForm>,
) -> impl Responder {
    let item_id = path.into_inner();

    match update_cart_quantity(repo.get_ref(), &user, item_id, form) {
        Ok(update) => HttpResponse::Ok().json(update),
        Err(ServiceError::Form(message)) => {
            HttpResponse::BadRequest().json(json!({ "error": message }))
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to update cart item {item_id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/cart/{item_id}/remove")]
pub async fn post_remove_cart_item(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let item_id = path.into_inner();

    match remove_cart_item(repo.get_ref(), &user, item_id) {
        Ok(()) => {
            FlashMessage::success("Товар удалён из корзины.").send();
            redirect("/cart")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Позиция не найдена.").send();
            redirect("/cart")
        }
        Err(err) => {
            log::error!("Failed to remove cart item {item_id}: {err}");
            FlashMessage::error("Не удалось удалить товар из корзины.").send();
            redirect("/cart")
        }
    }
}
