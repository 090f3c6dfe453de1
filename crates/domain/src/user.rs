//! User — the account a subscription belongs to.

use serde::{Deserialize, Serialize};

use crate::error::{NutriHubError, ValidationError};
use crate::id::UserId;
use crate::time::{Timestamp, now};

/// An application user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub created_at: Timestamp,
}

/// The public part of a [`User`], embedded in plan listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

impl User {
    /// Create a user with a fresh id.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: UserId::new(),
            name: name.into(),
            email: email.into(),
            created_at: now(),
        }
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`NutriHubError::Validation`] when `name` is empty or
    /// `email` does not look like an address.
    pub fn validate(&self) -> Result<(), NutriHubError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        let looks_like_email = self
            .email
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty());
        if !looks_like_email {
            return Err(ValidationError::InvalidEmail(self.email.clone()).into());
        }
        Ok(())
    }

    #[must_use]
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}
