//! Record identifiers.
//!
//! Every table keys its rows by a random v4 UUID, stored as lowercase
//! hyphenated text and exposed as such in URLs (`/admin/subscriptions/{id}`)
//! and JSON bodies. Each entity gets its own newtype so a plan id cannot be
//! handed to a subscription lookup.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! record_id {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// A fresh random id for a record about to be inserted.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0.hyphenated(), f)
            }
        }

        /// Accepts any UUID spelling `uuid` understands; [`Display`](fmt::Display)
        /// always renders the canonical lowercase form.
        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }
    };
}

record_id!(
    /// Key of a [`User`](crate::user::User).
    UserId
);

record_id!(
    /// Key of a [`SubscriptionPlan`](crate::plan::SubscriptionPlan).
    PlanId
);

record_id!(
    /// Key of a [`Subscription`](crate::subscription::Subscription).
    SubscriptionId
);

record_id!(
    /// Key of a [`Transaction`](crate::transaction::Transaction).
    TransactionId
);

record_id!(
    /// Key of a [`NutritionRecord`](crate::nutrition::NutritionRecord).
    NutritionId
);
