//! Transaction — a payment record attached to a subscription.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{NutriHubError, ValidationError};
use crate::id::{SubscriptionId, TransactionId, UserId};
use crate::plan::format_price;
use crate::time::{Timestamp, now};

/// Currency used when none is given.
pub const DEFAULT_CURRENCY: &str = "IDR";

/// Outcome of a payment attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    #[default]
    Pending,
    Success,
    Failed,
    Refunded,
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => f.write_str("pending"),
            Self::Success => f.write_str("success"),
            Self::Failed => f.write_str("failed"),
            Self::Refunded => f.write_str("refunded"),
        }
    }
}

impl FromStr for TransactionStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "success" => Ok(Self::Success),
            "failed" => Ok(Self::Failed),
            "refunded" => Ok(Self::Refunded),
            _ => Err(ValidationError::UnknownVariant {
                kind: "transaction status",
                value: s.to_string(),
            }),
        }
    }
}

/// A financial record tied to a subscription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub subscription_id: SubscriptionId,
    pub user_id: UserId,
    pub amount: i64,
    pub currency: String,
    pub payment_method: String,
    pub status: TransactionStatus,
    pub reference: Option<String>,
    pub created_at: Timestamp,
}

impl Transaction {
    /// Create a pending transaction in the default currency.
    #[must_use]
    pub fn new(
        subscription_id: SubscriptionId,
        user_id: UserId,
        amount: i64,
        payment_method: impl Into<String>,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            subscription_id,
            user_id,
            amount,
            currency: DEFAULT_CURRENCY.to_string(),
            payment_method: payment_method.into(),
            status: TransactionStatus::Pending,
            reference: None,
            created_at: now(),
        }
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NonPositiveAmount`] when `amount <= 0`.
    pub fn validate(&self) -> Result<(), NutriHubError> {
        if self.amount <= 0 {
            return Err(ValidationError::NonPositiveAmount.into());
        }
        Ok(())
    }

    #[must_use]
    pub fn amount_formatted(&self) -> String {
        format_price(self.amount)
    }
}
