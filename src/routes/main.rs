use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::models::config::CommonServerConfig;
use pushkind_common::routes::{base_context, redirect, render_template};
use tera::Tera;

use crate::forms::reviews::AddReviewForm;
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::catalog::{CatalogData, CatalogQuery, add_review, load_catalog, load_product};

fn render_catalog(
    data: CatalogData,
    user: &AuthenticatedUser,
    flash_messages: &IncomingFlashMessages,
    server_config: &CommonServerConfig,
    tera: &Tera,
) -> HttpResponse {
    let mut context = base_context(
        flash_messages,
        user,
        "index",
        &server_config.auth_service_url,
    );
    context.insert("category_tree", &data.tree);
    context.insert("category", &data.category);
    context.insert("breadcrumbs", &data.breadcrumbs);
    context.insert("products", &data.products);
    context.insert("search", &data.search);
    render_template(tera, "main/index.html", &context)
}

#[get("/")]
pub async fn show_index(
    params: web::Query<CatalogQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match load_catalog(repo.get_ref(), &user, None, params.search.as_deref()) {
        Ok(data) => render_catalog(data, &user, &flash_messages, &server_config, &tera),
        Err(err) => {
            log::error!("Failed to load catalog: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/category/{slug}")]
pub async fn show_category(
    path: web::Path<String>,
    params: web::Query<CatalogQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let slug = path.into_inner();

    match load_catalog(repo.get_ref(), &user, Some(&slug), params.search.as_deref()) {
        Ok(data) => render_catalog(data, &user, &flash_messages, &server_config, &tera),
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Категория не найдена.").send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to load category {slug}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/product/{product_id}")]
pub async fn show_product(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let product_id = path.into_inner();

    match load_product(repo.get_ref(), &user, product_id) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "index",
                &server_config.auth_service_url,
            );
            context.insert("card", &data.card);
            context.insert("breadcrumbs", &data.breadcrumbs);
            context.insert("reviews", &data.reviews);
            context.insert("average_rating", &data.average_rating);
            render_template(&tera, "main/product.html", &context)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Товар не найден.").send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to load product {product_id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/product/{product_id}/reviews")]
pub async fn post_review(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddReviewForm>,
) -> impl Responder {
    let product_id = path.into_inner();
    let product_url = format!("/product/{product_id}");

    match add_review(repo.get_ref(), &user, product_id, form) {
        Ok(_) => {
            FlashMessage::success("Спасибо за отзыв.").send();
            redirect(&product_url)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Товар не найден.").send();
            redirect("/")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(&product_url)
        }
        Err(err) => {
            log::error!("Failed to add a review for product {product_id}: {err}");
            FlashMessage::error("Ошибка при добавлении отзыва.").send();
            redirect(&product_url)
        }
    }
}
