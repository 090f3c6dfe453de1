//! # nutrihub-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the admin JSON API (`/admin/subscriptions`, `/admin/transactions`,
//!   `/admin/subscription-plans`, `/admin/users`)
//! - Serve the nutrition reference API (`/nutrition`)
//! - Map HTTP requests into application service calls (driving adapter)
//! - Wrap results in the `status`/`message`/`data` envelopes and map
//!   failures to error envelopes with a matching status code
//!
//! ## Dependency rule
//! Depends on `nutrihub-app` (for port traits and services) and
//! `nutrihub-domain` (for domain types used in request/response mapping).
//! Never leaks axum types into the domain.

pub mod api;
pub mod error;
pub mod response;
pub mod router;
pub mod state;
