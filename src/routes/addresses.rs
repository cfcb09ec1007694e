use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::models::config::CommonServerConfig;
use pushkind_common::routes::{base_context, redirect, render_template};
use tera::Tera;

use crate::forms::addresses::AddAddressForm;
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::addresses::{create_address, load_addresses, remove_address};

#[get("/addresses")]
pub async fn show_addresses(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match load_addresses(repo.get_ref(), &user) {
        Ok(addresses) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "addresses",
                &server_config.auth_service_url,
            );
            context.insert("addresses", &addresses);
            render_template(&tera, "addresses/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to load addresses: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/addresses/add")]
pub async fn add_address(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddAddressForm>,
) -> impl Responder {
    match create_address(repo.get_ref(), &user, form) {
        Ok(_) => {
            FlashMessage::success("Адрес сохранён.").send();
            redirect("/checkout")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/addresses")
        }
        Err(err) => {
            log::error!("Failed to add an address: {err}");
            FlashMessage::error("Не удалось сохранить адрес.").send();
            redirect("/addresses")
        }
    }
}

#[post("/addresses/{address_id}/delete")]
pub async fn delete_address(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let address_id = path.into_inner();

    match remove_address(repo.get_ref(), &user, address_id) {
        Ok(()) => {
            FlashMessage::success("Адрес удалён.").send();
            redirect("/addresses")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Адрес не найден.").send();
            redirect("/addresses")
        }
        Err(err) => {
            log::error!("Failed to delete address {address_id}: {err}");
            FlashMessage::error("Не удалось удалить адрес.").send();
            redirect("/addresses")
        }
    }
}
