//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use nutrihub_app::ports::{
    NutritionRepository, PlanRepository, SubscriptionRepository, TransactionRepository,
    UserRepository,
};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Nests the admin routes under `/admin` and mounts the nutrition routes
/// at the root. Includes a [`TraceLayer`] that logs each HTTP
/// request/response at the `DEBUG` level using the `tracing` ecosystem.
pub fn build<U, P, S, T, N>(state: AppState<U, P, S, T, N>) -> Router
where
    U: UserRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    T: TransactionRepository + Send + Sync + 'static,
    N: NutritionRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest("/admin", crate::api::admin_routes())
        .merge(crate::api::nutrition_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
