use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::models::config::CommonServerConfig;
use pushkind_common::routes::{base_context, redirect, render_template};
use serde::Deserialize;
use tera::Tera;

use crate::domain::order::{OrderStatus, PaymentMethod};
use crate::forms::checkout::{ChangeOrderStatusForm, PlaceOrderForm};
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::orders::{
    change_order_status, load_checkout, load_hub_orders, load_order, load_orders, place_order,
};

#[derive(Debug, Default, Deserialize)]
pub struct HubOrdersQuery {
    #[serde(default)]
    pub status: Option<String>,
}

#[get("/checkout")]
pub async fn show_checkout(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match load_checkout(repo.get_ref(), &user) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "checkout",
                &server_config.auth_service_url,
            );
            context.insert("lines", &data.cart.lines);
            context.insert("totals", &data.cart.totals);
            context.insert("subtotal", &data.cart.totals.subtotal_formatted());
            context.insert("grand_total", &data.cart.totals.grand_total_formatted());
            context.insert("addresses", &data.addresses);
            context.insert(
                "payment_methods",
                &[PaymentMethod::Cash.as_str(), PaymentMethod::Card.as_str()],
            );
            render_template(&tera, "orders/checkout.html", &context)
        }
        Err(err) => {
            log::error!("Failed to load checkout: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/checkout")]
pub async fn post_checkout(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<PlaceOrderForm>,
) -> impl Responder {
    match place_order(repo.get_ref(), &user, form) {
        Ok(order) => {
            FlashMessage::success(format!("Заказ №{} оформлен.", order.id)).send();
            redirect(&format!("/orders/{}", order.id))
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/checkout")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Адрес не найден.").send();
            redirect("/checkout")
        }
        Err(err) => {
            log::error!("Failed to place an order: {err}");
            FlashMessage::error("Не удалось оформить заказ.").send();
            redirect("/checkout")
        }
    }
}

#[get("/orders")]
pub async fn show_orders(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match load_orders(repo.get_ref(), &user) {
        Ok(orders) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "orders",
                &server_config.auth_service_url,
            );
            context.insert("orders", &orders);
            render_template(&tera, "orders/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to list orders: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/orders/manage")]
pub async fn show_hub_orders(
    params: web::Query<HubOrdersQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let status = params.status.as_deref().and_then(OrderStatus::parse);

    match load_hub_orders(repo.get_ref(), &user, status) {
        Ok(orders) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "manage_orders",
                &server_config.auth_service_url,
            );
            context.insert("orders", &orders);
            context.insert("status", &status);
            context.insert("statuses", &OrderStatus::ALL);
            render_template(&tera, "orders/manage.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Недостаточно прав.").send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to list hub orders: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/orders/{order_id}")]
pub async fn show_order(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let order_id = path.into_inner();

    match load_order(repo.get_ref(), &user, order_id) {
        Ok(view) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "orders",
                &server_config.auth_service_url,
            );
            context.insert("view", &view);
            context.insert("statuses", &OrderStatus::ALL);
            render_template(&tera, "orders/show.html", &context)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Заказ не найден.").send();
            redirect("/orders")
        }
        Err(err) => {
            log::error!("Failed to load order {order_id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/orders/{order_id}/status")]
pub async fn post_order_status(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<ChangeOrderStatusForm>,
) -> impl Responder {
    let order_id = path.into_inner();
    let order_url = format!("/orders/{order_id}");

    match change_order_status(repo.get_ref(), &user, order_id, form) {
        Ok(_) => {
            FlashMessage::success("Статус заказа изменён.").send();
            redirect(&order_url)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Недостаточно прав.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(&order_url)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Заказ не найден.").send();
            redirect("/orders/manage")
        }
        Err(err) => {
            log::error!("Failed to change status of order {order_id}: {err}");
            FlashMessage::error("Не удалось изменить статус заказа.").send();
            redirect(&order_url)
        }
    }
}
