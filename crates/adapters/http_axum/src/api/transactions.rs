//! Admin handlers for the transaction log.

use axum::Json;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use nutrihub_app::ports::{
    NutritionRepository, PlanRepository, SubscriptionRepository, TransactionRepository,
    UserRepository,
};
use nutrihub_domain::id::TransactionId;
use nutrihub_domain::pagination::PageRequest;
use nutrihub_domain::transaction::Transaction;

use super::{path_id, query_or_default};
use crate::error::ApiError;
use crate::response::{Envelope, PaginatedData};
use crate::state::AppState;

/// Query string of the list endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<PaginatedData<Transaction>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<Envelope<Transaction>>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /admin/transactions`
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
    let transactions = state.transaction_service.list_transactions(page).await?;
    Ok(ListResponse::Ok(Json(PaginatedData::success(
        "All transaction logs retrieved successfully",
        transactions,
    ))))
}

/// `GET /admin/transactions/{id}`
pub async fn get<U, P, S, T, N>(
    State(state): State<AppState<U, P, S, T, N>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<GetResponse, ApiError>
where
    U: UserRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    T: TransactionRepository + Send + Sync + 'static,
    N: NutritionRepository + Send + Sync + 'static,
{
    let id: TransactionId = path_id(path, "transaction")?;
    let transaction = state.transaction_service.get_transaction(id).await?;
    Ok(GetResponse::Ok(Json(Envelope::success(
        "Transaction details retrieved successfully",
        transaction,
    ))))
}
