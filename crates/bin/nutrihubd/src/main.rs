//! # nutrihubd — nutrihub daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialize logging
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct repository implementations (adapters)
//! - Construct application services, injecting repositories via port traits
//! - Build the axum router, injecting application services
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use nutrihub_adapter_http_axum::state::AppState;
use nutrihub_adapter_storage_sqlite_sqlx::{
    SqliteNutritionRepository, SqlitePlanRepository, SqliteSubscriptionRepository,
    SqliteTransactionRepository, SqliteUserRepository,
};
use nutrihub_app::services::nutrition_service::NutritionService;
use nutrihub_app::services::plan_service::PlanService;
use nutrihub_app::services::subscription_service::SubscriptionService;
use nutrihub_app::services::transaction_service::TransactionService;
use nutrihub_app::services::user_service::UserService;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();

    // Database
    let db = nutrihub_adapter_storage_sqlite_sqlx::Config {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await?;
    let pool = db.pool().clone();

    // Repositories
    let user_repo = SqliteUserRepository::new(pool.clone());
    let plan_repo = SqlitePlanRepository::new(pool.clone());
    let subscription_repo = SqliteSubscriptionRepository::new(pool.clone());
    let transaction_repo = SqliteTransactionRepository::new(pool.clone());
    let nutrition_repo = SqliteNutritionRepository::new(pool);

    // Services
    let subscription_service = SubscriptionService::new(
        subscription_repo.clone(),
        plan_repo.clone(),
        user_repo.clone(),
        transaction_repo.clone(),
    );
    let transaction_service = TransactionService::new(transaction_repo, subscription_repo);

    // HTTP
    let state = AppState::new(
        UserService::new(user_repo),
        PlanService::new(plan_repo),
        subscription_service,
        transaction_service,
        NutritionService::new(nutrition_repo),
    );
    let app = nutrihub_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "nutrihubd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("nutrihubd stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::info!("received Ctrl+C, shutting down"),
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for Ctrl+C");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                tracing::info!("received SIGTERM, shutting down");
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
