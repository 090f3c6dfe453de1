//! # nutrihub-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `UserRepository` — create and look up users
//!   - `PlanRepository` — CRUD for plans plus subscriber queries
//!   - `SubscriptionRepository` — CRUD and paginated listing of subscriptions
//!   - `TransactionRepository` — append and query the payment log
//!   - `NutritionRepository` — CRUD for the nutrition reference table
//! - Define **driving/inbound ports** as use-case structs:
//!   - `SubscriptionService` — list, inspect, patch, delete, payment status
//!   - `TransactionService` — paginated log, detail, recording
//!   - `PlanService` — list with subscribers, inspect, patch
//!   - `UserService`, `NutritionService`
//! - Orchestrate domain objects without knowing *how* persistence works
//!
//! ## Dependency rule
//! Depends on `nutrihub-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;

#[cfg(test)]
mod testing;
