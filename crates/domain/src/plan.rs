//! Subscription plan — a priced tier with feature flags and a scan quota.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CorruptedDataError, NutriHubError, ValidationError};
use crate::id::PlanId;
use crate::time::{Timestamp, now};
use crate::user::UserSummary;

/// Feature name → enabled flag.
pub type Features = BTreeMap<String, bool>;

/// Message surfaced when the stored feature flags cannot be decoded.
pub const MALFORMED_FEATURES: &str = "Error parsing plan features";

/// Render an amount in rupiah, e.g. `Rp 49000`.
#[must_use]
pub fn format_price(amount: i64) -> String {
    format!("Rp {amount}")
}

/// A subscription tier as stored.
///
/// `features` holds the raw JSON object exactly as persisted; use
/// [`SubscriptionPlan::parsed_features`] to read it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionPlan {
    pub id: PlanId,
    pub name: String,
    pub price: i64,
    pub description: String,
    pub ai_scan_limit: i32,
    pub validity_days: i32,
    pub features: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl SubscriptionPlan {
    /// Create a builder for constructing a [`SubscriptionPlan`].
    #[must_use]
    pub fn builder() -> SubscriptionPlanBuilder {
        SubscriptionPlanBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`NutriHubError::Validation`] when:
    /// - `name` is empty ([`ValidationError::EmptyName`])
    /// - `price` is negative ([`ValidationError::NegativePrice`])
    /// - `ai_scan_limit` is negative ([`ValidationError::NegativeScanLimit`])
    /// - `validity_days` is not positive ([`ValidationError::NonPositiveValidity`])
    pub fn validate(&self) -> Result<(), NutriHubError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if self.price < 0 {
            return Err(ValidationError::NegativePrice.into());
        }
        if self.ai_scan_limit < 0 {
            return Err(ValidationError::NegativeScanLimit.into());
        }
        if self.validity_days <= 0 {
            return Err(ValidationError::NonPositiveValidity.into());
        }
        Ok(())
    }

    /// Decode the stored feature flags.
    ///
    /// # Errors
    ///
    /// Returns [`NutriHubError::Corrupted`] when the stored value is not a
    /// JSON object of booleans.
    pub fn parsed_features(&self) -> Result<Features, NutriHubError> {
        serde_json::from_str(&self.features).map_err(|_| {
            CorruptedDataError {
                message: MALFORMED_FEATURES,
            }
            .into()
        })
    }

    #[must_use]
    pub fn price_formatted(&self) -> String {
        format_price(self.price)
    }

    /// Apply a partial update in place and bump `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`NutriHubError::Validation`] if the result breaks an invariant.
    pub fn apply(&mut self, patch: PlanUpdate) -> Result<(), NutriHubError> {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(limit) = patch.ai_scan_limit {
            self.ai_scan_limit = limit;
        }
        if let Some(days) = patch.validity_days {
            self.validity_days = days;
        }
        if let Some(features) = patch.features {
            self.features = encode_features(&features);
        }
        if let Some(active) = patch.is_active {
            self.is_active = active;
        }
        self.updated_at = now();
        self.validate()
    }
}

fn encode_features(features: &Features) -> String {
    // a map of strings to bools always serializes
    serde_json::to_string(features).unwrap_or_else(|_| "{}".to_string())
}

/// Fields an admin may change on a plan. `None` leaves the value as is.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PlanUpdate {
    pub name: Option<String>,
    pub price: Option<i64>,
    pub description: Option<String>,
    pub ai_scan_limit: Option<i32>,
    pub validity_days: Option<i32>,
    pub features: Option<Features>,
    pub is_active: Option<bool>,
}

/// Plan view returned by admin endpoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanView {
    pub id: PlanId,
    pub name: String,
    pub price: i64,
    pub price_formatted: String,
    pub description: String,
    pub ai_scan_limit: i32,
    pub validity_days: i32,
    pub features: Features,
    pub is_active: bool,
}

impl TryFrom<&SubscriptionPlan> for PlanView {
    type Error = NutriHubError;

    fn try_from(plan: &SubscriptionPlan) -> Result<Self, Self::Error> {
        Ok(Self {
            id: plan.id,
            name: plan.name.clone(),
            price: plan.price,
            price_formatted: plan.price_formatted(),
            description: plan.description.clone(),
            ai_scan_limit: plan.ai_scan_limit,
            validity_days: plan.validity_days,
            features: plan.parsed_features()?,
            is_active: plan.is_active,
        })
    }
}

/// A plan together with the users subscribed to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanWithUsers {
    #[serde(flatten)]
    pub plan: PlanView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<UserSummary>>,
    pub user_count: u64,
}

/// Step-by-step builder for [`SubscriptionPlan`].
#[derive(Debug, Default)]
pub struct SubscriptionPlanBuilder {
    id: Option<PlanId>,
    name: Option<String>,
    price: i64,
    description: Option<String>,
    ai_scan_limit: i32,
    validity_days: Option<i32>,
    features: Features,
    is_active: Option<bool>,
}

impl SubscriptionPlanBuilder {
    #[must_use]
    pub fn id(mut self, id: PlanId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn price(mut self, price: i64) -> Self {
        self.price = price;
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn ai_scan_limit(mut self, limit: i32) -> Self {
        self.ai_scan_limit = limit;
        self
    }

    #[must_use]
    pub fn validity_days(mut self, days: i32) -> Self {
        self.validity_days = Some(days);
        self
    }

    #[must_use]
    pub fn feature(mut self, name: impl Into<String>, enabled: bool) -> Self {
        self.features.insert(name.into(), enabled);
        self
    }

    #[must_use]
    pub fn features(mut self, features: Features) -> Self {
        self.features = features;
        self
    }

    #[must_use]
    pub fn is_active(mut self, active: bool) -> Self {
        self.is_active = Some(active);
        self
    }

    /// Consume the builder, validate, and return a [`SubscriptionPlan`].
    ///
    /// Validity defaults to 30 days and new plans are active.
    ///
    /// # Errors
    ///
    /// Returns [`NutriHubError::Validation`] if an invariant fails.
    pub fn build(self) -> Result<SubscriptionPlan, NutriHubError> {
        let created_at = now();
        let plan = SubscriptionPlan {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            price: self.price,
            description: self.description.unwrap_or_default(),
            ai_scan_limit: self.ai_scan_limit,
            validity_days: self.validity_days.unwrap_or(30),
            features: encode_features(&self.features),
            is_active: self.is_active.unwrap_or(true),
            created_at,
            updated_at: created_at,
        };
        plan.validate()?;
        Ok(plan)
    }
}
