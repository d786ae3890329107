//! Ownership trait for user-owned records.
//!
//! Submissions belong to the customer who created them. Handlers call
//! `check_ownership` before any owner-only mutation.

use super::{DomainError, ErrorCode, UserId};

/// Trait for aggregates that have a single owner.
pub trait OwnedByUser {
    /// Returns the ID of the user who owns this resource.
    fn owner_id(&self) -> &UserId;

    /// Returns `true` if `user_id` matches `owner_id()`.
    fn is_owner(&self, user_id: &UserId) -> bool {
        self.owner_id() == user_id
    }

    /// Validates ownership, returning `Forbidden` if the user is not the owner.
    ///
    /// The error deliberately carries no owner detail so that callers
    /// cannot tell who owns a record.
    fn check_ownership(&self, user_id: &UserId) -> Result<(), DomainError> {
        if self.is_owner(user_id) {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::Forbidden,
                "User does not own this resource",
            ))
        }
    }
}
