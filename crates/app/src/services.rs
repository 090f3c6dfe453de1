//! Application services — use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod nutrition_service;
pub mod plan_service;
pub mod subscription_service;
pub mod transaction_service;
pub mod user_service;
