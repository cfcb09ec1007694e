use chrono::Local;
use pushkind_common::domain::auth::AuthenticatedUser;
use serde::Serialize;

use crate::domain::favorite::Favorite;
use crate::repository::{FavoriteReader, FavoriteWriter, ProductReader, UserReader, UserWriter};
use crate::services::catalog::ProductCard;
use crate::services::users::ensure_user;
use crate::services::{ServiceError, ServiceResult};

/// Favorite entry with the product's current price.
#[derive(Debug, Clone, Serialize)]
pub struct FavoriteCard {
    pub favorite_id: i32,
    pub card: ProductCard,
}

/// Loads the user's favorites, newest first.
pub fn load_favorites<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Vec<FavoriteCard>>
where
    R: FavoriteReader + UserReader + UserWriter + ?Sized,
{
    let owner = ensure_user(repo, user)?;
    let now = Local::now().naive_utc();

    Ok(repo
        .list_favorites(owner.id)?
        .into_iter()
        .map(|entry| FavoriteCard {
            favorite_id: entry.favorite.id,
            card: ProductCard::new(entry.product, now),
        })
        .collect())
}

/// Bookmarks a product; bookmarking it twice keeps a single entry.
pub fn add_favorite<R>(
    repo: &R,
    user: &AuthenticatedUser,
    product_id: i32,
) -> ServiceResult<Favorite>
where
    R: FavoriteWriter + ProductReader + UserReader + UserWriter + ?Sized,
{
    if repo.get_product_by_id(product_id, user.hub_id)?.is_none() {
        return Err(ServiceError::NotFound);
    }

    let owner = ensure_user(repo, user)?;

    repo.add_favorite(owner.id, product_id)
        .map_err(ServiceError::from)
}

pub fn remove_favorite<R>(
    repo: &R,
    user: &AuthenticatedUser,
    favorite_id: i32,
) -> ServiceResult<()>
where
    R: FavoriteWriter + UserReader + UserWriter + ?Sized,
{
    let owner = ensure_user(repo, user)?;

    repo.remove_favorite(favorite_id, owner.id)
        .map_err(ServiceError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::favorite::FavoriteProduct;
    use crate::services::test_support::{USER_ID, fixed_datetime, product, repo_with_user, shopper};
    use pushkind_common::repository::errors::RepositoryError;

    fn favorite(id: i32, product_id: i32) -> Favorite {
        Favorite {
            id,
            user_id: USER_ID,
            product_id,
            created_at: fixed_datetime(),
        }
    }

    #[test]
    fn load_favorites_shows_discounted_price() {
        let mut repo = repo_with_user();
        repo.expect_list_favorites().returning(|_| {
            Ok(vec![FavoriteProduct {
                favorite: favorite(4, 2),
                product: product(2, 1000, 10, 0),
            }])
        });

        let favorites = load_favorites(&repo, &shopper()).expect("expected favorites");

        assert_eq!(favorites[0].favorite_id, 4);
        assert_eq!(favorites[0].card.current_price, 900);
    }

    #[test]
    fn add_favorite_checks_product_hub() {
        let mut repo = repo_with_user();
        repo.expect_get_product_by_id().returning(|_, _| Ok(None));
        repo.expect_add_favorite().never();

        assert!(matches!(
            add_favorite(&repo, &shopper(), 2),
            Err(ServiceError::NotFound)
        ));
    }

    #[test]
    fn add_favorite_delegates_to_repository() {
        let mut repo = repo_with_user();
        repo.expect_get_product_by_id()
            .returning(|id, _| Ok(Some(product(id, 100, 0, 0))));
        repo.expect_add_favorite()
            .times(1)
            .withf(|user_id, product_id| *user_id == USER_ID && *product_id == 2)
            .returning(|_, product_id| Ok(favorite(1, product_id)));

        assert!(add_favorite(&repo, &shopper(), 2).is_ok());
    }

    #[test]
    fn remove_favorite_of_another_user_is_not_found() {
        let mut repo = repo_with_user();
        repo.expect_remove_favorite()
            .returning(|_, _| Err(RepositoryError::NotFound));

        assert!(matches!(
            remove_favorite(&repo, &shopper(), 9),
            Err(ServiceError::NotFound)
        ));
    }
}
