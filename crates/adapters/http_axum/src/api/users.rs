//! Admin handlers for user accounts.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use nutrihub_app::ports::{
    NutritionRepository, PlanRepository, SubscriptionRepository, TransactionRepository,
    UserRepository,
};
use nutrihub_domain::id::UserId;
use nutrihub_domain::user::User;

use super::path_id;
use crate::error::ApiError;
use crate::response::Envelope;
use crate::state::AppState;

/// Request body for creating a user.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
}

/// Possible responses from the user endpoints.
pub enum UserResponse {
    Ok(Json<Envelope<User>>),
    Created(Json<Envelope<User>>),
}

impl IntoResponse for UserResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// `POST /admin/users`
pub async fn create<U, P, S, T, N>(
    State(state): State<AppState<U, P, S, T, N>>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<UserResponse, ApiError>
where
    U: UserRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    T: TransactionRepository + Send + Sync + 'static,
    N: NutritionRepository + Send + Sync + 'static,
{
    let Json(req) = payload?;
    let user = state
        .user_service
        .create_user(User::new(req.name, req.email))
        .await?;
    Ok(UserResponse::Created(Json(Envelope::success(
        "User created successfully",
        user,
    ))))
}

/// `GET /admin/users/{id}`
pub async fn get<U, P, S, T, N>(
    State(state): State<AppState<U, P, S, T, N>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<UserResponse, ApiError>
where
    U: UserRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    T: TransactionRepository + Send + Sync + 'static,
    N: NutritionRepository + Send + Sync + 'static,
{
    let id: UserId = path_id(path, "user")?;
    let user = state.user_service.get_user(id).await?;
    Ok(UserResponse::Ok(Json(Envelope::success(
        "User details retrieved successfully",
        user,
    ))))
}
