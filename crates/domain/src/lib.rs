//! # nutrihub-domain
//!
//! Pure domain model for the nutrihub administrative backend.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps, pagination
//! - Define **Plans** (priced tiers with feature flags and an AI scan quota)
//! - Define **Subscriptions** (a user's association with a plan over a period)
//! - Define **Transactions** (payment records tied to a subscription)
//! - Define **Users** (the accounts subscriptions belong to)
//! - Define **Nutrition records** (the food composition reference table)
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod pagination;
pub mod time;

pub mod nutrition;
pub mod plan;
pub mod subscription;
pub mod transaction;
pub mod user;
