use pushkind_common::domain::auth::AuthenticatedUser;

use crate::domain::user::{NewUser, User};
use crate::repository::{UserReader, UserWriter};
use crate::services::{ServiceError, ServiceResult};

/// Resolve the local user record for the authenticated identity, creating it
/// on first use.
pub fn ensure_user<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<User>
where
    R: UserReader + UserWriter + ?Sized,
{
    if let Some(existing) = repo.get_user_by_email(&user.email, user.hub_id)? {
        return Ok(existing);
    }

    match repo.create_user(&NewUser::from(user)) {
        Ok(created) => {
            log::info!("Registered storefront user {} in hub {}", created.email, created.hub_id);
            Ok(created)
        }
        Err(err) => {
            // A concurrent request may have inserted the same (hub, email) pair.
            match repo.get_user_by_email(&user.email, user.hub_id)? {
                Some(existing) => Ok(existing),
                None => Err(ServiceError::from(err)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::{shopper, stored_user};
    use pushkind_common::repository::errors::RepositoryError;

    #[test]
    fn ensure_user_returns_existing_record() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_email()
            .times(1)
            .returning(|_, _| Ok(Some(stored_user())));
        repo.expect_create_user().never();

        let user = ensure_user(&repo, &shopper()).expect("expected user");

        assert_eq!(user.id, stored_user().id);
    }

    #[test]
    fn ensure_user_creates_missing_record_with_lowercase_email() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_email()
            .times(1)
            .returning(|_, _| Ok(None));
        repo.expect_create_user()
            .times(1)
            .withf(|new_user| new_user.email == "shopper@example.com" && new_user.hub_id == 9)
            .returning(|_| Ok(stored_user()));

        let mut identity = shopper();
        identity.email = "Shopper@Example.com".to_string();

        assert!(ensure_user(&repo, &identity).is_ok());
    }

    #[test]
    fn ensure_user_rereads_after_failed_insert() {
        let mut repo = MockRepository::new();
        let mut calls = 0;
        repo.expect_get_user_by_email()
            .times(2)
            .returning(move |_, _| {
                calls += 1;
                if calls == 1 {
                    Ok(None)
                } else {
                    Ok(Some(stored_user()))
                }
            });
        repo.expect_create_user()
            .times(1)
            .returning(|_| Err(RepositoryError::NotFound));

        assert!(ensure_user(&repo, &shopper()).is_ok());
    }
}
