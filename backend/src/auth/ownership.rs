//! Ownership checks for mutating operations on user-owned records.
//!
//! Services call `authorize_owner` strictly after confirming the resource
//! exists and before performing the mutation. Absent resources are a 404 at
//! the call site, so ownership is never evaluated for something that does
//! not exist.

use crate::database::models::{Cleanup, DietMeal, User};
use crate::errors::{ServiceError, ServiceResult};

/// A record with an authoritative owner, fixed at creation.
pub trait Owned {
    fn owner_id(&self) -> i64;
}

impl Owned for Cleanup {
    fn owner_id(&self) -> i64 {
        self.user_id
    }
}

impl Owned for DietMeal {
    fn owner_id(&self) -> i64 {
        self.user_id
    }
}

impl Owned for User {
    fn owner_id(&self) -> i64 {
        self.id
    }
}

/// Rejects the operation with `Forbidden` unless the authenticated identity
/// owns the resource.
pub fn authorize_owner<T: Owned>(
    resource: &T,
    identity_id: i64,
    denial: &str,
) -> ServiceResult<()> {
    if resource.owner_id() != identity_id {
        return Err(ServiceError::forbidden(denial));
    }
    Ok(())
}
