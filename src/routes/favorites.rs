use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::models::config::CommonServerConfig;
use pushkind_common::routes::{base_context, redirect, render_template};
use tera::Tera;

use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::favorites::{add_favorite, load_favorites, remove_favorite};

#[get("/favorites")]
pub async fn show_favorites(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match load_favorites(repo.get_ref(), &user) {
        Ok(favorites) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "favorites",
                &server_config.auth_service_url,
            );
            context.insert("favorites", &favorites);
            render_template(&tera, "favorites/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to load favorites: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/favorites/add/{product_id}")]
pub async fn post_add_favorite(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let product_id = path.into_inner();

    match add_favorite(repo.get_ref(), &user, product_id) {
        Ok(_) => {
            FlashMessage::success("Товар добавлен в избранное.").send();
            redirect("/favorites")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Товар не найден.").send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to add product {product_id} to favorites: {err}");
            FlashMessage::error("Не удалось добавить товар в избранное.").send();
            redirect("/favorites")
        }
    }
}

#[post("/favorites/{favorite_id}/remove")]
pub async fn post_remove_favorite(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let favorite_id = path.into_inner();

    match remove_favorite(repo.get_ref(), &user, favorite_id) {
        Ok(()) => {
            FlashMessage::success("Товар удалён из избранного.").send();
            redirect("/favorites")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Запись не найдена.").send();
            redirect("/favorites")
        }
        Err(err) => {
            log::error!("Failed to remove favorite {favorite_id}: {err}");
            FlashMessage::error("Не удалось удалить товар из избранного.").send();
            redirect("/favorites")
        }
    }
}
