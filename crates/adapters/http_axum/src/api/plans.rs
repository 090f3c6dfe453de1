//! Admin handlers for subscription plans.

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
use nutrihub_domain::id::PlanId;
use nutrihub_domain::plan::{Features, PlanUpdate, PlanView, PlanWithUsers, SubscriptionPlan};

use super::{path_id, query_or_default};
use crate::error::ApiError;
use crate::response::Envelope;
use crate::state::AppState;

/// Query string of the list endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub with_users: Option<String>,
}

impl ListQuery {
    /// The usual boolean spellings (`1`, `t`, `T`, `true`, `True`, `TRUE`)
    /// switch the flag on. Anything else, garbage included, leaves it off.
    fn with_users(&self) -> bool {
        self.with_users
            .as_deref()
            .map(str::trim)
            .is_some_and(|v| matches!(v, "1" | "t" | "T" | "true" | "True" | "TRUE"))
    }
}

/// Request body for creating a plan.
#[derive(Debug, Deserialize)]
pub struct CreatePlanRequest {
    pub name: String,
    pub price: i64,
    pub description: Option<String>,
    pub ai_scan_limit: Option<i32>,
    pub validity_days: Option<i32>,
    #[serde(default)]
    pub features: Features,
    pub is_active: Option<bool>,
}

impl CreatePlanRequest {
    fn into_plan(self) -> Result<SubscriptionPlan, ApiError> {
        let mut builder = SubscriptionPlan::builder()
            .name(self.name)
            .price(self.price)
            .features(self.features);
        if let Some(description) = self.description {
            builder = builder.description(description);
        }
        if let Some(limit) = self.ai_scan_limit {
            builder = builder.ai_scan_limit(limit);
        }
        if let Some(days) = self.validity_days {
            builder = builder.validity_days(days);
        }
        if let Some(active) = self.is_active {
            builder = builder.is_active(active);
        }
        Ok(builder.build()?)
    }
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Envelope<Vec<PlanWithUsers>>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from endpoints returning a single plan.
pub enum PlanResponse {
    Ok(Json<Envelope<PlanView>>),
    Created(Json<Envelope<PlanView>>),
}

impl IntoResponse for PlanResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// `GET /admin/subscription-plans`
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
    let plans = state.plan_service.list_plans(query.with_users()).await?;
    Ok(ListResponse::Ok(Json(Envelope::success(
        "All subscription plans retrieved successfully",
        plans,
    ))))
}

/// `POST /admin/subscription-plans`
pub async fn create<U, P, S, T, N>(
    State(state): State<AppState<U, P, S, T, N>>,
    payload: Result<Json<CreatePlanRequest>, JsonRejection>,
) -> Result<PlanResponse, ApiError>
where
    U: UserRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    T: TransactionRepository + Send + Sync + 'static,
    N: NutritionRepository + Send + Sync + 'static,
{
    let Json(req) = payload?;
    let plan = state.plan_service.create_plan(req.into_plan()?).await?;
    Ok(PlanResponse::Created(Json(Envelope::success(
        "Subscription plan created successfully",
        plan,
    ))))
}

/// `GET /admin/subscription-plans/{id}`
pub async fn get<U, P, S, T, N>(
    State(state): State<AppState<U, P, S, T, N>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<PlanResponse, ApiError>
where
    U: UserRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    T: TransactionRepository + Send + Sync + 'static,
    N: NutritionRepository + Send + Sync + 'static,
{
    let id: PlanId = path_id(path, "plan")?;
    let plan = state.plan_service.get_plan_view(id).await?;
    Ok(PlanResponse::Ok(Json(Envelope::success(
        "Subscription plan details retrieved successfully",
        plan,
    ))))
}

/// `PATCH /admin/subscription-plans/{id}`
pub async fn update<U, P, S, T, N>(
    State(state): State<AppState<U, P, S, T, N>>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<PlanUpdate>, JsonRejection>,
) -> Result<PlanResponse, ApiError>
where
    U: UserRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    T: TransactionRepository + Send + Sync + 'static,
    N: NutritionRepository + Send + Sync + 'static,
{
    let id: PlanId = path_id(path, "plan")?;
    let Json(patch) = payload?;
    let plan = state.plan_service.update_plan(id, patch).await?;
    Ok(PlanResponse::Ok(Json(Envelope::success(
        "Subscription plan updated successfully",
        plan,
    ))))
}
