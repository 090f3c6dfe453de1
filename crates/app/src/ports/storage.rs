//! Storage port — repository traits for persistence.

use std::future::Future;

use nutrihub_domain::error::NutriHubError;
use nutrihub_domain::id::{NutritionId, PlanId, SubscriptionId, TransactionId, UserId};
use nutrihub_domain::nutrition::NutritionRecord;
use nutrihub_domain::pagination::{Page, PageRequest};
use nutrihub_domain::plan::SubscriptionPlan;
use nutrihub_domain::subscription::{PaymentStatus, Subscription, SubscriptionStatus};
use nutrihub_domain::time::Timestamp;
use nutrihub_domain::transaction::Transaction;
use nutrihub_domain::user::{User, UserSummary};

/// Repository for persisting and querying [`User`]s.
pub trait UserRepository {
    /// Create a new user in storage.
    fn create(&self, user: User) -> impl Future<Output = Result<User, NutriHubError>> + Send;

    /// Get a user by its unique identifier.
    fn get_by_id(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<Option<User>, NutriHubError>> + Send;
}

/// Repository for persisting and querying [`SubscriptionPlan`]s.
pub trait PlanRepository {
    /// Create a new plan in storage.
    fn create(
        &self,
        plan: SubscriptionPlan,
    ) -> impl Future<Output = Result<SubscriptionPlan, NutriHubError>> + Send;

    /// Get a plan by its unique identifier.
    fn get_by_id(
        &self,
        id: PlanId,
    ) -> impl Future<Output = Result<Option<SubscriptionPlan>, NutriHubError>> + Send;

    /// Get all plans, cheapest first.
    fn get_all(&self) -> impl Future<Output = Result<Vec<SubscriptionPlan>, NutriHubError>> + Send;

    /// Overwrite an existing plan.
    fn update(
        &self,
        plan: SubscriptionPlan,
    ) -> impl Future<Output = Result<SubscriptionPlan, NutriHubError>> + Send;

    /// Distinct users holding a subscription to the plan, by name.
    fn find_subscribers(
        &self,
        id: PlanId,
    ) -> impl Future<Output = Result<Vec<UserSummary>, NutriHubError>> + Send;

    /// Number of distinct users holding a subscription to the plan.
    fn count_subscribers(
        &self,
        id: PlanId,
    ) -> impl Future<Output = Result<u64, NutriHubError>> + Send;
}

/// Repository for persisting and querying [`Subscription`]s.
pub trait SubscriptionRepository {
    /// Create a new subscription in storage.
    fn create(
        &self,
        subscription: Subscription,
    ) -> impl Future<Output = Result<Subscription, NutriHubError>> + Send;

    /// Get a subscription by its unique identifier.
    fn get_by_id(
        &self,
        id: SubscriptionId,
    ) -> impl Future<Output = Result<Option<Subscription>, NutriHubError>> + Send;

    /// One page of subscriptions, newest first, optionally filtered by status.
    fn list(
        &self,
        page: PageRequest,
        status: Option<SubscriptionStatus>,
    ) -> impl Future<Output = Result<Page<Subscription>, NutriHubError>> + Send;

    /// Overwrite an existing subscription.
    ///
    /// Resolves to `None` when no row has this id.
    fn update(
        &self,
        subscription: Subscription,
    ) -> impl Future<Output = Result<Option<Subscription>, NutriHubError>> + Send;

    /// Write `payment_status` and `updated_at` only, leaving every other
    /// column as stored, and return the row as it now reads.
    ///
    /// Resolves to `None` when no row has this id.
    fn set_payment_status(
        &self,
        id: SubscriptionId,
        status: PaymentStatus,
        updated_at: Timestamp,
    ) -> impl Future<Output = Result<Option<Subscription>, NutriHubError>> + Send;

    /// Delete a subscription and its transactions.
    ///
    /// Resolves to `false` when nothing was deleted.
    fn delete(
        &self,
        id: SubscriptionId,
    ) -> impl Future<Output = Result<bool, NutriHubError>> + Send;
}

/// Repository for persisting and querying [`Transaction`]s.
pub trait TransactionRepository {
    /// Persist a new transaction.
    fn create(
        &self,
        transaction: Transaction,
    ) -> impl Future<Output = Result<Transaction, NutriHubError>> + Send;

    /// Get a transaction by its unique identifier.
    fn get_by_id(
        &self,
        id: TransactionId,
    ) -> impl Future<Output = Result<Option<Transaction>, NutriHubError>> + Send;

    /// One page of all transactions, newest first.
    fn list(
        &self,
        page: PageRequest,
    ) -> impl Future<Output = Result<Page<Transaction>, NutriHubError>> + Send;

    /// Every transaction of a subscription, newest first.
    fn find_by_subscription(
        &self,
        id: SubscriptionId,
    ) -> impl Future<Output = Result<Vec<Transaction>, NutriHubError>> + Send;
}

/// Repository for the nutrition reference table.
pub trait NutritionRepository {
    /// Insert a new record. A taken `code` resolves to a conflict error.
    fn create(
        &self,
        record: NutritionRecord,
    ) -> impl Future<Output = Result<NutritionRecord, NutriHubError>> + Send;

    /// Get a record by its unique identifier.
    fn get_by_id(
        &self,
        id: NutritionId,
    ) -> impl Future<Output = Result<Option<NutritionRecord>, NutriHubError>> + Send;

    /// Get a record by its reference-table code.
    fn get_by_code(
        &self,
        code: &str,
    ) -> impl Future<Output = Result<Option<NutritionRecord>, NutriHubError>> + Send;

    /// Every record of a food group, ordered by code.
    fn find_by_group(
        &self,
        group: &str,
    ) -> impl Future<Output = Result<Vec<NutritionRecord>, NutriHubError>> + Send;

    /// Overwrite an existing record. A taken `code` resolves to a conflict error.
    fn update(
        &self,
        record: NutritionRecord,
    ) -> impl Future<Output = Result<NutritionRecord, NutriHubError>> + Send;

    /// Delete a record. Resolves to `false` when nothing was deleted.
    fn delete(&self, id: NutritionId) -> impl Future<Output = Result<bool, NutriHubError>> + Send;
}
