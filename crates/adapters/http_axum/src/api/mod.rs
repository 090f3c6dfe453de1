//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod nutrition;
#[allow(clippy::missing_errors_doc)]
pub mod plans;
#[allow(clippy::missing_errors_doc)]
pub mod subscriptions;
#[allow(clippy::missing_errors_doc)]
pub mod transactions;
#[allow(clippy::missing_errors_doc)]
pub mod users;

use std::str::FromStr;

use axum::Router;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query};
use axum::routing::{get, patch, post};

use nutrihub_app::ports::{
    NutritionRepository, PlanRepository, SubscriptionRepository, TransactionRepository,
    UserRepository,
};

use crate::error::ApiError;
use crate::state::AppState;

/// Parse a path or body identifier, naming `thing` in the error message.
fn parse_id<I: FromStr>(raw: &str, thing: &str) -> Result<I, ApiError> {
    I::from_str(raw.trim()).map_err(|_| ApiError::invalid_id(thing))
}

/// Parse the `{id}` segment. A segment axum cannot decode is as malformed
/// as one that is not a UUID.
fn path_id<I: FromStr>(
    path: Result<Path<String>, PathRejection>,
    thing: &str,
) -> Result<I, ApiError> {
    match path {
        Ok(Path(raw)) => parse_id(&raw, thing),
        Err(rejection) => {
            tracing::debug!(reason = %rejection.body_text(), "rejected path parameter");
            Err(ApiError::invalid_id(thing))
        }
    }
}

/// List queries never reject: an undecodable query string means defaults.
fn query_or_default<Q: Default>(query: Result<Query<Q>, QueryRejection>) -> Q {
    query.map_or_else(
        |rejection| {
            tracing::debug!(reason = %rejection.body_text(), "ignored query string");
            Q::default()
        },
        |Query(query)| query,
    )
}

/// Build the `/admin` sub-router.
pub fn admin_routes<U, P, S, T, N>() -> Router<AppState<U, P, S, T, N>>
where
    U: UserRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    T: TransactionRepository + Send + Sync + 'static,
    N: NutritionRepository + Send + Sync + 'static,
{
    Router::new()
        // Subscriptions
        .route(
            "/subscriptions",
            get(subscriptions::list::<U, P, S, T, N>).post(subscriptions::create::<U, P, S, T, N>),
        )
        .route(
            "/subscriptions/{id}",
            get(subscriptions::get::<U, P, S, T, N>)
                .patch(subscriptions::update::<U, P, S, T, N>)
                .delete(subscriptions::delete::<U, P, S, T, N>),
        )
        .route(
            "/subscriptions/{id}/transactions",
            get(subscriptions::list_transactions::<U, P, S, T, N>)
                .post(subscriptions::record_transaction::<U, P, S, T, N>),
        )
        .route(
            "/subscriptions/{id}/payment-status",
            patch(subscriptions::update_payment_status::<U, P, S, T, N>),
        )
        // Transactions
        .route("/transactions", get(transactions::list::<U, P, S, T, N>))
        .route("/transactions/{id}", get(transactions::get::<U, P, S, T, N>))
        // Plans
        .route(
            "/subscription-plans",
            get(plans::list::<U, P, S, T, N>).post(plans::create::<U, P, S, T, N>),
        )
        .route(
            "/subscription-plans/{id}",
            get(plans::get::<U, P, S, T, N>).patch(plans::update::<U, P, S, T, N>),
        )
        // Users
        .route("/users", post(users::create::<U, P, S, T, N>))
        .route("/users/{id}", get(users::get::<U, P, S, T, N>))
}

/// Build the nutrition routes, mounted at the root.
pub fn nutrition_routes<U, P, S, T, N>() -> Router<AppState<U, P, S, T, N>>
where
    U: UserRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    T: TransactionRepository + Send + Sync + 'static,
    N: NutritionRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/nutrition", post(nutrition::create::<U, P, S, T, N>))
        .route(
            "/nutrition/{id}",
            get(nutrition::get::<U, P, S, T, N>)
                .put(nutrition::update::<U, P, S, T, N>)
                .delete(nutrition::delete::<U, P, S, T, N>),
        )
        .route(
            "/nutrition/code/{code}",
            get(nutrition::get_by_code::<U, P, S, T, N>),
        )
        .route(
            "/nutrition/group/{group}",
            get(nutrition::list_by_group::<U, P, S, T, N>),
        )
}
