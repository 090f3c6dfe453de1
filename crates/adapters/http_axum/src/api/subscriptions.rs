//! Admin handlers for user subscriptions.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use nutrihub_app::ports::{
    NutritionRepository, PlanRepository, SubscriptionRepository, TransactionRepository,
    UserRepository,
};
use nutrihub_app::services::transaction_service::NewTransaction;
use nutrihub_domain::error::NutriHubError;
use nutrihub_domain::id::{PlanId, SubscriptionId, UserId};
use nutrihub_domain::pagination::PageRequest;
use nutrihub_domain::subscription::{
    PaymentStatus, Subscription, SubscriptionStatus, SubscriptionUpdate,
};
use nutrihub_domain::transaction::{Transaction, TransactionStatus};

use super::{parse_id, path_id, query_or_default};
use crate::error::ApiError;
use crate::response::{Envelope, MessageOnly, PaginatedResults};
use crate::state::AppState;

/// Query string of the list endpoint. Values stay raw so that garbage
/// falls back to the defaults instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub status: Option<String>,
}

/// Request body for creating a subscription.
#[derive(Debug, Deserialize)]
pub struct CreateSubscriptionRequest {
    pub user_id: String,
    pub plan_id: String,
    pub status: Option<SubscriptionStatus>,
}

/// Request body for changing the payment status.
#[derive(Debug, Deserialize)]
pub struct UpdatePaymentStatusRequest {
    pub status: PaymentStatus,
}

/// Request body for recording a transaction against a subscription.
#[derive(Debug, Deserialize)]
pub struct RecordTransactionRequest {
    pub amount: i64,
    pub currency: Option<String>,
    pub payment_method: String,
    pub status: Option<TransactionStatus>,
    pub reference: Option<String>,
}

impl From<RecordTransactionRequest> for NewTransaction {
    fn from(req: RecordTransactionRequest) -> Self {
        Self {
            amount: req.amount,
            currency: req.currency,
            payment_method: req.payment_method,
            status: req.status,
            reference: req.reference,
        }
    }
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<PaginatedResults<Subscription>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from endpoints returning a single subscription.
pub enum SubscriptionResponse {
    Ok(Json<Envelope<Subscription>>),
    Created(Json<Envelope<Subscription>>),
}

impl IntoResponse for SubscriptionResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    Ok(Json<MessageOnly>),
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the transaction endpoints of a subscription.
pub enum TransactionsResponse {
    Ok(Json<Envelope<Vec<Transaction>>>),
    Created(Json<Envelope<Transaction>>),
}

impl IntoResponse for TransactionsResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

fn parse_status_filter(raw: Option<&str>) -> Result<Option<SubscriptionStatus>, NutriHubError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => Ok(Some(value.parse()?)),
    }
}

/// `GET /admin/subscriptions`
pub async fn list<U, P, S, T, N>(
    State(state): State<AppState<U, P, S, T, N>>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<ListResponse, ApiError>
where
    U: UserRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    T: TransactionRepository + Send + Sync + 'static,
    N: NutritionRepository + Send + Sync + 'static,
{
    let query = query_or_default(query);
    let page = PageRequest::from_raw(query.page.as_deref(), query.limit.as_deref());
    let status = parse_status_filter(query.status.as_deref())?;
    let subscriptions = state
        .subscription_service
        .list_subscriptions(page, status)
        .await?;
    Ok(ListResponse::Ok(Json(PaginatedResults::success(
        "User subscriptions retrieved successfully",
        subscriptions,
    ))))
}

/// `POST /admin/subscriptions`
pub async fn create<U, P, S, T, N>(
    State(state): State<AppState<U, P, S, T, N>>,
    payload: Result<Json<CreateSubscriptionRequest>, JsonRejection>,
) -> Result<SubscriptionResponse, ApiError>
where
    U: UserRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    T: TransactionRepository + Send + Sync + 'static,
    N: NutritionRepository + Send + Sync + 'static,
{
    let Json(req) = payload?;
    let user_id: UserId = parse_id(&req.user_id, "user")?;
    let plan_id: PlanId = parse_id(&req.plan_id, "plan")?;
    let subscription = state
        .subscription_service
        .create_subscription(user_id, plan_id, req.status)
        .await?;
    Ok(SubscriptionResponse::Created(Json(Envelope::success(
        "User subscription created successfully",
        subscription,
    ))))
}

/// `GET /admin/subscriptions/{id}`
pub async fn get<U, P, S, T, N>(
    State(state): State<AppState<U, P, S, T, N>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<SubscriptionResponse, ApiError>
where
    U: UserRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    T: TransactionRepository + Send + Sync + 'static,
    N: NutritionRepository + Send + Sync + 'static,
{
    let id: SubscriptionId = path_id(path, "subscription")?;
    let subscription = state.subscription_service.get_subscription(id).await?;
    Ok(SubscriptionResponse::Ok(Json(Envelope::success(
        "User subscription details retrieved successfully",
        subscription,
    ))))
}

/// `PATCH /admin/subscriptions/{id}`
pub async fn update<U, P, S, T, N>(
    State(state): State<AppState<U, P, S, T, N>>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<SubscriptionUpdate>, JsonRejection>,
) -> Result<SubscriptionResponse, ApiError>
where
    U: UserRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    T: TransactionRepository + Send + Sync + 'static,
    N: NutritionRepository + Send + Sync + 'static,
{
    let id: SubscriptionId = path_id(path, "subscription")?;
    let Json(patch) = payload?;
    let subscription = state
        .subscription_service
        .update_subscription(id, patch)
        .await?;
    Ok(SubscriptionResponse::Ok(Json(Envelope::success(
        "User subscription updated successfully",
        subscription,
    ))))
}

/// `DELETE /admin/subscriptions/{id}`
pub async fn delete<U, P, S, T, N>(
    State(state): State<AppState<U, P, S, T, N>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<DeleteResponse, ApiError>
where
    U: UserRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    T: TransactionRepository + Send + Sync + 'static,
    N: NutritionRepository + Send + Sync + 'static,
{
    let id: SubscriptionId = path_id(path, "subscription")?;
    state.subscription_service.delete_subscription(id).await?;
    Ok(DeleteResponse::Ok(Json(MessageOnly::success(
        "User subscription deleted successfully",
    ))))
}

/// `PATCH /admin/subscriptions/{id}/payment-status`
pub async fn update_payment_status<U, P, S, T, N>(
    State(state): State<AppState<U, P, S, T, N>>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<UpdatePaymentStatusRequest>, JsonRejection>,
) -> Result<SubscriptionResponse, ApiError>
where
    U: UserRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    T: TransactionRepository + Send + Sync + 'static,
    N: NutritionRepository + Send + Sync + 'static,
{
    let id: SubscriptionId = path_id(path, "subscription")?;
    let Json(req) = payload?;
    let subscription = state
        .subscription_service
        .update_payment_status(id, req.status)
        .await?;
    Ok(SubscriptionResponse::Ok(Json(Envelope::success(
        "Payment status updated successfully",
        subscription,
    ))))
}

/// `GET /admin/subscriptions/{id}/transactions`
pub async fn list_transactions<U, P, S, T, N>(
    State(state): State<AppState<U, P, S, T, N>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<TransactionsResponse, ApiError>
where
    U: UserRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    T: TransactionRepository + Send + Sync + 'static,
    N: NutritionRepository + Send + Sync + 'static,
{
    let id: SubscriptionId = path_id(path, "subscription")?;
    let transactions = state.subscription_service.list_transactions(id).await?;
    Ok(TransactionsResponse::Ok(Json(Envelope::success(
        "Transaction logs retrieved successfully",
        transactions,
    ))))
}

/// `POST /admin/subscriptions/{id}/transactions`
pub async fn record_transaction<U, P, S, T, N>(
    State(state): State<AppState<U, P, S, T, N>>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<RecordTransactionRequest>, JsonRejection>,
) -> Result<TransactionsResponse, ApiError>
where
    U: UserRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    T: TransactionRepository + Send + Sync + 'static,
    N: NutritionRepository + Send + Sync + 'static,
{
    let id: SubscriptionId = path_id(path, "subscription")?;
    let Json(req) = payload?;
    let transaction = state
        .transaction_service
        .record_transaction(id, req.into())
        .await?;
    Ok(TransactionsResponse::Created(Json(Envelope::success(
        "Transaction recorded successfully",
        transaction,
    ))))
}
