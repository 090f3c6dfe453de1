//! Subscription service — admin use-cases for user subscriptions.

use nutrihub_domain::error::{NotFoundError, NutriHubError};
use nutrihub_domain::id::{PlanId, SubscriptionId, UserId};
use nutrihub_domain::pagination::{Page, PageRequest};
use nutrihub_domain::subscription::{
    PaymentStatus, Subscription, SubscriptionStatus, SubscriptionUpdate,
};
use nutrihub_domain::time::now;
use nutrihub_domain::transaction::Transaction;

use crate::ports::{PlanRepository, SubscriptionRepository, TransactionRepository, UserRepository};

fn subscription_not_found(id: SubscriptionId) -> NutriHubError {
    NotFoundError {
        entity: "Subscription",
        id: id.to_string(),
    }
    .into()
}

/// Application service for subscriptions.
///
/// Holds the plan and user repositories only to check that referenced
/// records exist.
pub struct SubscriptionService<S, P, U, T> {
    subscriptions: S,
    plans: P,
    users: U,
    transactions: T,
}

impl<S, P, U, T> SubscriptionService<S, P, U, T>
where
    S: SubscriptionRepository,
    P: PlanRepository,
    U: UserRepository,
    T: TransactionRepository,
{
    /// Create a new service backed by the given repositories.
    pub fn new(subscriptions: S, plans: P, users: U, transactions: T) -> Self {
        Self {
            subscriptions,
            plans,
            users,
            transactions,
        }
    }

    async fn ensure_plan(&self, id: PlanId) -> Result<(), NutriHubError> {
        if self.plans.get_by_id(id).await?.is_none() {
            return Err(NotFoundError {
                entity: "Subscription plan",
                id: id.to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Subscribe `user_id` to `plan_id`, starting now.
    ///
    /// # Errors
    ///
    /// Returns [`NutriHubError::NotFound`] when the user or plan is missing,
    /// or a storage error from a repository.
    #[tracing::instrument(skip(self))]
    pub async fn create_subscription(
        &self,
        user_id: UserId,
        plan_id: PlanId,
        status: Option<SubscriptionStatus>,
    ) -> Result<Subscription, NutriHubError> {
        if self.users.get_by_id(user_id).await?.is_none() {
            return Err(NotFoundError {
                entity: "User",
                id: user_id.to_string(),
            }
            .into());
        }
        let plan = self.plans.get_by_id(plan_id).await?.ok_or_else(|| {
            NutriHubError::from(NotFoundError {
                entity: "Subscription plan",
                id: plan_id.to_string(),
            })
        })?;

        let mut subscription = Subscription::start(user_id, &plan);
        if let Some(status) = status {
            subscription.status = status;
        }
        subscription.validate()?;
        self.subscriptions.create(subscription).await
    }

    /// One page of subscriptions, optionally filtered by status.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn list_subscriptions(
        &self,
        page: PageRequest,
        status: Option<SubscriptionStatus>,
    ) -> Result<Page<Subscription>, NutriHubError> {
        self.subscriptions.list(page, status).await
    }

    /// Look up a subscription by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`NutriHubError::NotFound`] when no subscription with `id`
    /// exists, or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_subscription(&self, id: SubscriptionId) -> Result<Subscription, NutriHubError> {
        self.subscriptions
            .get_by_id(id)
            .await?
            .ok_or_else(|| subscription_not_found(id))
    }

    /// Apply a partial update to a subscription.
    ///
    /// # Errors
    ///
    /// Returns [`NutriHubError::NotFound`] when the subscription or the new
    /// plan is missing, [`NutriHubError::Validation`] when the period is
    /// inverted, or a storage error from a repository.
    #[tracing::instrument(skip(self, patch))]
    pub async fn update_subscription(
        &self,
        id: SubscriptionId,
        patch: SubscriptionUpdate,
    ) -> Result<Subscription, NutriHubError> {
        let mut subscription = self.get_subscription(id).await?;
        if let Some(plan_id) = patch.plan_id {
            self.ensure_plan(plan_id).await?;
        }
        subscription.apply(patch)?;
        self.subscriptions
            .update(subscription)
            .await?
            .ok_or_else(|| subscription_not_found(id))
    }

    /// Delete a subscription together with its transactions.
    ///
    /// # Errors
    ///
    /// Returns [`NutriHubError::NotFound`] when nothing was deleted, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_subscription(&self, id: SubscriptionId) -> Result<(), NutriHubError> {
        if self.subscriptions.delete(id).await? {
            Ok(())
        } else {
            Err(subscription_not_found(id))
        }
    }

    /// Set the payment status of a subscription, leaving every other field
    /// but `updated_at` as is.
    ///
    /// # Errors
    ///
    /// Returns [`NutriHubError::NotFound`] when the subscription is missing,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn update_payment_status(
        &self,
        id: SubscriptionId,
        status: PaymentStatus,
    ) -> Result<Subscription, NutriHubError> {
        let previous = self.get_subscription(id).await?.payment_status;
        let subscription = self
            .subscriptions
            .set_payment_status(id, status, now())
            .await?
            .ok_or_else(|| subscription_not_found(id))?;

        tracing::info!(
            target: "audit",
            action = "update_payment_status",
            resource = "subscription",
            resource_id = %id,
            from = %previous,
            to = %status,
            "payment status updated"
        );
        Ok(subscription)
    }

    /// Every transaction recorded against a subscription, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`NutriHubError::NotFound`] when the subscription is missing,
    /// or a storage error from a repository.
    #[tracing::instrument(skip(self))]
    pub async fn list_transactions(
        &self,
        id: SubscriptionId,
    ) -> Result<Vec<Transaction>, NutriHubError> {
        self.get_subscription(id).await?;
        self.transactions.find_by_subscription(id).await
    }
}
