//! # nutrihub-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `nutrihub-app::ports::storage`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `nutrihub-app` (for port traits) and `nutrihub-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod codec;
pub mod error;
mod nutrition_repo;
mod plan_repo;
pub mod pool;
mod subscription_repo;
mod transaction_repo;
mod user_repo;

pub use nutrition_repo::SqliteNutritionRepository;
pub use plan_repo::SqlitePlanRepository;
pub use pool::{Config, Database};
pub use subscription_repo::SqliteSubscriptionRepository;
pub use transaction_repo::SqliteTransactionRepository;
pub use user_repo::SqliteUserRepository;
