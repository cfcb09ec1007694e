use actix_web::{HttpResponse, Responder, get, web};
use pushkind_common::domain::auth::AuthenticatedUser;

use crate::repository::DieselRepository;
use crate::services::categories::load_category_tree;

#[get("/v1/categories")]
/// Return the hub's category tree as JSON, siblings ordered by name.
pub async fn api_v1_categories(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match load_category_tree(repo.get_ref(), &user) {
        Ok(data) => HttpResponse::Ok().json(data.tree),
        Err(err) => {
            log::error!("Failed to list categories: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
