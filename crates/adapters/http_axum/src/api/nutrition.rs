//! Handlers for the nutrition reference table.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use nutrihub_app::ports::{
    NutritionRepository, PlanRepository, SubscriptionRepository, TransactionRepository,
    UserRepository,
};
use nutrihub_domain::id::NutritionId;
use nutrihub_domain::nutrition::{NutritionData, NutritionRecord};

use super::path_id;
use crate::error::ApiError;
use crate::response::{Envelope, MessageOnly};
use crate::state::AppState;

/// Possible responses from endpoints returning a single record.
pub enum RecordResponse {
    Ok(Json<Envelope<NutritionRecord>>),
    Created(Json<Envelope<NutritionRecord>>),
}

impl IntoResponse for RecordResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the group listing.
pub enum ListResponse {
    Ok(Json<Envelope<Vec<NutritionRecord>>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
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

/// `POST /nutrition`
pub async fn create<U, P, S, T, N>(
    State(state): State<AppState<U, P, S, T, N>>,
    payload: Result<Json<NutritionData>, JsonRejection>,
) -> Result<RecordResponse, ApiError>
where
    U: UserRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    T: TransactionRepository + Send + Sync + 'static,
    N: NutritionRepository + Send + Sync + 'static,
{
    let Json(data) = payload?;
    let record = state.nutrition_service.create(data).await?;
    Ok(RecordResponse::Created(Json(Envelope::success(
        "Nutrition record created successfully",
        record,
    ))))
}

/// `GET /nutrition/{id}`
pub async fn get<U, P, S, T, N>(
    State(state): State<AppState<U, P, S, T, N>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<RecordResponse, ApiError>
where
    U: UserRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    T: TransactionRepository + Send + Sync + 'static,
    N: NutritionRepository + Send + Sync + 'static,
{
    let id: NutritionId = path_id(path, "nutrition")?;
    let record = state.nutrition_service.get_by_id(id).await?;
    Ok(RecordResponse::Ok(Json(Envelope::success(
        "Nutrition record retrieved successfully",
        record,
    ))))
}

/// `GET /nutrition/code/{code}`
pub async fn get_by_code<U, P, S, T, N>(
    State(state): State<AppState<U, P, S, T, N>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<RecordResponse, ApiError>
where
    U: UserRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    T: TransactionRepository + Send + Sync + 'static,
    N: NutritionRepository + Send + Sync + 'static,
{
    let Path(code) = path?;
    let record = state.nutrition_service.get_by_code(&code).await?;
    Ok(RecordResponse::Ok(Json(Envelope::success(
        "Nutrition record retrieved successfully",
        record,
    ))))
}

/// `GET /nutrition/group/{group}`
pub async fn list_by_group<U, P, S, T, N>(
    State(state): State<AppState<U, P, S, T, N>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<ListResponse, ApiError>
where
    U: UserRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    T: TransactionRepository + Send + Sync + 'static,
    N: NutritionRepository + Send + Sync + 'static,
{
    let Path(group) = path?;
    let records = state.nutrition_service.list_by_group(&group).await?;
    Ok(ListResponse::Ok(Json(Envelope::success(
        "Nutrition records retrieved successfully",
        records,
    ))))
}

/// `PUT /nutrition/{id}`
pub async fn update<U, P, S, T, N>(
    State(state): State<AppState<U, P, S, T, N>>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<NutritionData>, JsonRejection>,
) -> Result<RecordResponse, ApiError>
where
    U: UserRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    T: TransactionRepository + Send + Sync + 'static,
    N: NutritionRepository + Send + Sync + 'static,
{
    let id: NutritionId = path_id(path, "nutrition")?;
    let Json(data) = payload?;
    let record = state.nutrition_service.update(id, data).await?;
    Ok(RecordResponse::Ok(Json(Envelope::success(
        "Nutrition record updated successfully",
        record,
    ))))
}

/// `DELETE /nutrition/{id}`
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
    let id: NutritionId = path_id(path, "nutrition")?;
    state.nutrition_service.delete(id).await?;
    Ok(DeleteResponse::Ok(Json(MessageOnly::success(
        "Nutrition record deleted successfully",
    ))))
}
