//! Subscription — a user's association with a plan over a validity period.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{NutriHubError, ValidationError};
use crate::id::{PlanId, SubscriptionId, UserId};
use crate::plan::SubscriptionPlan;
use crate::time::{Timestamp, now, period_end};

/// Lifecycle status of a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Expired,
    #[default]
    Pending,
    Cancelled,
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => f.write_str("active"),
            Self::Expired => f.write_str("expired"),
            Self::Pending => f.write_str("pending"),
            Self::Cancelled => f.write_str("cancelled"),
        }
    }
}

impl FromStr for SubscriptionStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "expired" => Ok(Self::Expired),
            "pending" => Ok(Self::Pending),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            _ => Err(ValidationError::UnknownVariant {
                kind: "subscription status",
                value: s.to_string(),
            }),
        }
    }
}

/// Payment state of a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Failed,
    Refunded,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => f.write_str("pending"),
            Self::Paid => f.write_str("paid"),
            Self::Failed => f.write_str("failed"),
            Self::Refunded => f.write_str("refunded"),
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            "failed" => Ok(Self::Failed),
            "refunded" => Ok(Self::Refunded),
            _ => Err(ValidationError::UnknownVariant {
                kind: "payment status",
                value: s.to_string(),
            }),
        }
    }
}

/// A user's subscription to a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub user_id: UserId,
    pub plan_id: PlanId,
    pub status: SubscriptionStatus,
    pub payment_status: PaymentStatus,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Subscription {
    /// Start a pending, unpaid subscription to `plan` right now.
    ///
    /// The validity period is taken from the plan.
    #[must_use]
    pub fn start(user_id: UserId, plan: &SubscriptionPlan) -> Self {
        let start_date = now();
        Self {
            id: SubscriptionId::new(),
            user_id,
            plan_id: plan.id,
            status: SubscriptionStatus::Pending,
            payment_status: PaymentStatus::Pending,
            start_date,
            end_date: period_end(start_date, plan.validity_days),
            created_at: start_date,
            updated_at: start_date,
        }
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EndBeforeStart`] when the validity period
    /// is inverted.
    pub fn validate(&self) -> Result<(), NutriHubError> {
        if self.end_date < self.start_date {
            return Err(ValidationError::EndBeforeStart.into());
        }
        Ok(())
    }

    /// Apply a partial update in place and bump `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`NutriHubError::Validation`] if the result breaks an invariant.
    pub fn apply(&mut self, patch: SubscriptionUpdate) -> Result<(), NutriHubError> {
        if let Some(plan_id) = patch.plan_id {
            self.plan_id = plan_id;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(start) = patch.start_date {
            self.start_date = start;
        }
        if let Some(end) = patch.end_date {
            self.end_date = end;
        }
        self.updated_at = now();
        self.validate()
    }

    /// Change the payment status and nothing else but `updated_at`.
    pub fn set_payment_status(&mut self, status: PaymentStatus, at: Timestamp) {
        self.payment_status = status;
        self.updated_at = at;
    }
}

/// Fields an admin may change on a subscription. `None` leaves the value as is.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SubscriptionUpdate {
    pub plan_id: Option<PlanId>,
    pub status: Option<SubscriptionStatus>,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
}
