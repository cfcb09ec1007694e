use pushkind_common::domain::auth::AuthenticatedUser;

use crate::domain::address::Address;
use crate::forms::addresses::AddAddressForm;
use crate::repository::{AddressReader, AddressWriter, UserReader, UserWriter};
use crate::services::users::ensure_user;
use crate::services::{ServiceError, ServiceResult};

pub fn load_addresses<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Vec<Address>>
where
    R: AddressReader + UserReader + UserWriter + ?Sized,
{
    let owner = ensure_user(repo, user)?;

    repo.list_addresses(owner.id).map_err(ServiceError::from)
}

pub fn create_address<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddAddressForm,
) -> ServiceResult<Address>
where
    R: AddressWriter + UserReader + UserWriter + ?Sized,
{
    let owner = ensure_user(repo, user)?;

    let new_address = form
        .into_new_address(owner.id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.create_address(&new_address)
        .map_err(ServiceError::from)
}

/// Deletes an address; orders that used it keep no reference to it.
pub fn remove_address<R>(
    repo: &R,
    user: &AuthenticatedUser,
    address_id: i32,
) -> ServiceResult<()>
where
    R: AddressWriter + UserReader + UserWriter + ?Sized,
{
    let owner = ensure_user(repo, user)?;

    repo.delete_address(address_id, owner.id)
        .map_err(ServiceError::from)
}
