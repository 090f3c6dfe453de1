//! User service — the minimal user use-cases subscriptions depend on.

use nutrihub_domain::error::{NotFoundError, NutriHubError};
use nutrihub_domain::id::UserId;
use nutrihub_domain::user::User;

use crate::ports::UserRepository;

/// Application service for users.
pub struct UserService<R> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Register a user after validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`NutriHubError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, user), fields(user_email = %user.email))]
    pub async fn create_user(&self, user: User) -> Result<User, NutriHubError> {
        user.validate()?;
        self.repo.create(user).await
    }

    /// Look up a user by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`NutriHubError::NotFound`] when no user with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_user(&self, id: UserId) -> Result<User, NutriHubError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "User",
                id: id.to_string(),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::InMemoryStore;
    use nutrihub_domain::error::ValidationError;

    #[tokio::test]
    async fn should_create_and_fetch_user() {
        let svc = UserService::new(InMemoryStore::default());
        let user = svc
            .create_user(User::new("Dewi", "dewi@example.com"))
            .await
            .unwrap();

        let fetched = svc.get_user(user.id).await.unwrap();
        assert_eq!(fetched.email, "dewi@example.com");
    }

    #[tokio::test]
    async fn should_reject_invalid_email() {
        let svc = UserService::new(InMemoryStore::default());
        let result = svc.create_user(User::new("Dewi", "nope")).await;
        assert!(matches!(
            result,
            Err(NutriHubError::Validation(ValidationError::InvalidEmail(_)))
        ));
    }

    #[tokio::test]
    async fn should_return_not_found_when_user_missing() {
        let svc = UserService::new(InMemoryStore::default());
        let err = svc.get_user(UserId::new()).await.unwrap_err();
        assert_eq!(err.to_string(), "User not found");
    }
}
