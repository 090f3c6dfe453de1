//! Shared application state for axum handlers.

use std::sync::Arc;

use nutrihub_app::ports::{
    NutritionRepository, PlanRepository, SubscriptionRepository, TransactionRepository,
    UserRepository,
};
use nutrihub_app::services::nutrition_service::NutritionService;
use nutrihub_app::services::plan_service::PlanService;
use nutrihub_app::services::subscription_service::SubscriptionService;
use nutrihub_app::services::transaction_service::TransactionService;
use nutrihub_app::services::user_service::UserService;

/// Application state shared across all axum handlers.
///
/// Generic over the user, plan, subscription, transaction and nutrition
/// repositories to avoid dynamic dispatch. `Clone` is implemented manually
/// so the repositories themselves do not need to be `Clone`; only the
/// `Arc` wrappers are cloned.
pub struct AppState<U, P, S, T, N> {
    /// User accounts.
    pub user_service: Arc<UserService<U>>,
    /// Subscription plan catalogue.
    pub plan_service: Arc<PlanService<P>>,
    /// Subscriptions and their payment status.
    pub subscription_service: Arc<SubscriptionService<S, P, U, T>>,
    /// Transaction log.
    pub transaction_service: Arc<TransactionService<T, S>>,
    /// Nutrition reference table.
    pub nutrition_service: Arc<NutritionService<N>>,
}

impl<U, P, S, T, N> Clone for AppState<U, P, S, T, N> {
    fn clone(&self) -> Self {
        Self {
            user_service: Arc::clone(&self.user_service),
            plan_service: Arc::clone(&self.plan_service),
            subscription_service: Arc::clone(&self.subscription_service),
            transaction_service: Arc::clone(&self.transaction_service),
            nutrition_service: Arc::clone(&self.nutrition_service),
        }
    }
}

impl<U, P, S, T, N> AppState<U, P, S, T, N>
where
    U: UserRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    T: TransactionRepository + Send + Sync + 'static,
    N: NutritionRepository + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(
        user_service: UserService<U>,
        plan_service: PlanService<P>,
        subscription_service: SubscriptionService<S, P, U, T>,
        transaction_service: TransactionService<T, S>,
        nutrition_service: NutritionService<N>,
    ) -> Self {
        Self {
            user_service: Arc::new(user_service),
            plan_service: Arc::new(plan_service),
            subscription_service: Arc::new(subscription_service),
            transaction_service: Arc::new(transaction_service),
            nutrition_service: Arc::new(nutrition_service),
        }
    }
}
