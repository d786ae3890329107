//! Command infrastructure for application handlers.
//!
//! Every handler receives a `CommandMetadata` that carries the acting
//! user, their role, and a correlation id for log stitching.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Role, UserId};

/// Metadata context for command and query handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMetadata {
    /// The user executing this command.
    pub user_id: UserId,

    /// Role asserted by the identity collaborator.
    pub role: Role,

    /// Links related operations across a single user request.
    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,
}

impl CommandMetadata {
    /// Creates new command metadata for an actor.
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self {
            user_id,
            role,
            correlation_id: None,
        }
    }

    /// Builder: Add correlation ID for request tracing.
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    /// Returns the correlation ID, generating one if not set.
    pub fn correlation_id(&self) -> String {
        self.correlation_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }

    /// Returns true when the actor may see every user's records.
    pub fn sees_all(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
impl CommandMetadata {
    /// Creates a test fixture for the given user and role.
    pub fn test_fixture(user: &str, role: Role) -> Self {
        Self::new(UserId::new(user).unwrap(), role).with_correlation_id("test-correlation-id")
    }
}
