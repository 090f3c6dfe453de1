//! Plan service — use-cases for managing subscription plans.

use nutrihub_domain::error::{NotFoundError, NutriHubError};
use nutrihub_domain::id::PlanId;
use nutrihub_domain::plan::{PlanUpdate, PlanView, PlanWithUsers, SubscriptionPlan};

use crate::ports::PlanRepository;

/// Application service for subscription plans.
pub struct PlanService<R> {
    repo: R,
}

impl<R: PlanRepository> PlanService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Create a new plan after validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`NutriHubError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, plan), fields(plan_name = %plan.name))]
    pub async fn create_plan(&self, plan: SubscriptionPlan) -> Result<PlanView, NutriHubError> {
        plan.validate()?;
        let plan = self.repo.create(plan).await?;
        PlanView::try_from(&plan)
    }

    /// Look up a plan by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`NutriHubError::NotFound`] when no plan with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_plan(&self, id: PlanId) -> Result<SubscriptionPlan, NutriHubError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Subscription plan",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// Look up a plan by id and decode it for display.
    ///
    /// # Errors
    ///
    /// Returns [`NutriHubError::NotFound`] when missing and
    /// [`NutriHubError::Corrupted`] when its stored features are malformed.
    pub async fn get_plan_view(&self, id: PlanId) -> Result<PlanView, NutriHubError> {
        let plan = self.get_plan(id).await?;
        PlanView::try_from(&plan)
    }

    /// List every plan with its subscriber count, and the subscribers
    /// themselves when `with_users` is set.
    ///
    /// # Errors
    ///
    /// Returns [`NutriHubError::Corrupted`] when a plan's stored features
    /// are malformed, or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn list_plans(&self, with_users: bool) -> Result<Vec<PlanWithUsers>, NutriHubError> {
        let plans = self.repo.get_all().await?;
        let mut result = Vec::with_capacity(plans.len());
        for plan in &plans {
            let view = PlanView::try_from(plan)?;
            let (users, user_count) = if with_users {
                let users = self.repo.find_subscribers(plan.id).await?;
                let count = users.len() as u64;
                (Some(users), count)
            } else {
                (None, self.repo.count_subscribers(plan.id).await?)
            };
            result.push(PlanWithUsers {
                plan: view,
                users,
                user_count,
            });
        }
        Ok(result)
    }

    /// Apply a partial update to a plan.
    ///
    /// # Errors
    ///
    /// Returns [`NutriHubError::NotFound`] when the plan is missing,
    /// [`NutriHubError::Validation`] when the result breaks an invariant,
    /// [`NutriHubError::Corrupted`] when stored features cannot be decoded,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self, patch))]
    pub async fn update_plan(
        &self,
        id: PlanId,
        patch: PlanUpdate,
    ) -> Result<PlanView, NutriHubError> {
        let mut plan = self.get_plan(id).await?;
        plan.apply(patch)?;
        let plan = self.repo.update(plan).await?;
        PlanView::try_from(&plan)
    }
}
