//! End-to-end tests for the full nutrihubd stack.
//!
//! Each test spins up the complete application (in-memory `SQLite`, real repos,
//! real services, real axum router) and exercises the HTTP layer via
//! `tower::ServiceExt::oneshot`; no TCP port is bound.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use nutrihub_adapter_http_axum::router;
use nutrihub_adapter_http_axum::state::AppState;
use nutrihub_adapter_storage_sqlite_sqlx::{
    Config, SqliteNutritionRepository, SqlitePlanRepository, SqliteSubscriptionRepository,
    SqliteTransactionRepository, SqliteUserRepository,
};
use nutrihub_app::services::nutrition_service::NutritionService;
use nutrihub_app::services::plan_service::PlanService;
use nutrihub_app::services::subscription_service::SubscriptionService;
use nutrihub_app::services::transaction_service::TransactionService;
use nutrihub_app::services::user_service::UserService;
use serde_json::{Value, json};
use sqlx::SqlitePool;
use tower::ServiceExt;

/// Build a fully-wired router backed by an in-memory `SQLite` database.
async fn app() -> Router {
    app_with_pool().await.0
}

/// Same as [`app`], also handing back the pool for tests that tamper with
/// stored rows.
async fn app_with_pool() -> (Router, SqlitePool) {
    let db = Config {
        database_url: "sqlite::memory:".to_string(),
    }
    .build()
    .await
    .expect("in-memory database should initialise");

    let pool = db.pool().clone();

    let users = SqliteUserRepository::new(pool.clone());
    let plans = SqlitePlanRepository::new(pool.clone());
    let subscriptions = SqliteSubscriptionRepository::new(pool.clone());
    let transactions = SqliteTransactionRepository::new(pool.clone());

    let state = AppState::new(
        UserService::new(users.clone()),
        PlanService::new(plans.clone()),
        SubscriptionService::new(subscriptions.clone(), plans, users, transactions.clone()),
        TransactionService::new(transactions, subscriptions),
        NutritionService::new(SqliteNutritionRepository::new(pool.clone())),
    );

    (router::build(state), pool)
}

async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn create_user(app: &Router, name: &str) -> String {
    let email = format!("{}@example.com", name.to_lowercase());
    let (status, body) = call(
        app,
        "POST",
        "/admin/users",
        Some(json!({"name": name, "email": email})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"]["id"].as_str().unwrap().to_string()
}

async fn create_plan(app: &Router, name: &str, price: i64) -> String {
    let (status, body) = call(
        app,
        "POST",
        "/admin/subscription-plans",
        Some(json!({
            "name": name,
            "price": price,
            "ai_scan_limit": 50,
            "validity_days": 30,
            "features": {"meal_plan": true, "export": false}
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"]["id"].as_str().unwrap().to_string()
}

async fn create_subscription(app: &Router, user_id: &str, plan_id: &str, status: &str) -> String {
    let (code, body) = call(
        app,
        "POST",
        "/admin/subscriptions",
        Some(json!({"user_id": user_id, "plan_id": plan_id, "status": status})),
    )
    .await;
    assert_eq!(code, StatusCode::CREATED);
    body["data"]["id"].as_str().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_return_ok_when_health_check_called() {
    let resp = app()
        .await
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Subscriptions
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_get_existing_subscription() {
    let app = app().await;
    let user = create_user(&app, "Sari").await;
    let plan = create_plan(&app, "Premium", 49_000).await;
    let id = create_subscription(&app, &user, &plan, "active").await;

    let (status, body) = call(&app, "GET", &format!("/admin/subscriptions/{id}"), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(
        body["message"],
        "User subscription details retrieved successfully"
    );
    assert_eq!(body["data"]["id"], id.as_str());
    assert_eq!(body["data"]["status"], "active");
    assert_eq!(body["data"]["payment_status"], "pending");
}

#[tokio::test]
async fn should_paginate_subscriptions_and_report_totals() {
    let app = app().await;
    let user = create_user(&app, "Budi").await;
    let plan = create_plan(&app, "Basic", 19_000).await;
    for _ in 0..5 {
        create_subscription(&app, &user, &plan, "active").await;
    }
    create_subscription(&app, &user, &plan, "expired").await;

    let (status, body) = call(&app, "GET", "/admin/subscriptions?page=2&limit=4", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"].as_array().unwrap().len(), 2);
    assert_eq!(body["page"], 2);
    assert_eq!(body["limit"], 4);
    assert_eq!(body["totalResults"], 6);
    assert_eq!(body["totalPages"], 6 / 4 + 1);

    let (_, body) = call(&app, "GET", "/admin/subscriptions?status=expired", None).await;
    assert_eq!(body["totalResults"], 1);
    assert_eq!(body["results"][0]["status"], "expired");
}

#[tokio::test]
async fn should_report_extra_page_when_total_is_multiple_of_limit() {
    let app = app().await;
    let user = create_user(&app, "Dewi").await;
    let plan = create_plan(&app, "Basic", 19_000).await;
    for _ in 0..4 {
        create_subscription(&app, &user, &plan, "active").await;
    }

    let (_, body) = call(&app, "GET", "/admin/subscriptions?limit=2", None).await;
    assert_eq!(body["totalResults"], 4);
    assert_eq!(body["totalPages"], 3);
}

#[tokio::test]
async fn should_update_only_payment_status() {
    let app = app().await;
    let user = create_user(&app, "Rina").await;
    let plan = create_plan(&app, "Premium", 49_000).await;
    let id = create_subscription(&app, &user, &plan, "active").await;
    let uri = format!("/admin/subscriptions/{id}");
    let (_, before) = call(&app, "GET", &uri, None).await;

    let (status, body) = call(
        &app,
        "PATCH",
        &format!("{uri}/payment-status"),
        Some(json!({"status": "paid"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Payment status updated successfully");

    let (_, after) = call(&app, "GET", &uri, None).await;
    assert_eq!(after["data"]["payment_status"], "paid");
    for field in ["status", "plan_id", "user_id", "start_date", "end_date"] {
        assert_eq!(after["data"][field], before["data"][field], "{field}");
    }
}

#[tokio::test]
async fn should_patch_subscription_fields() {
    let app = app().await;
    let user = create_user(&app, "Agus").await;
    let basic = create_plan(&app, "Basic", 19_000).await;
    let premium = create_plan(&app, "Premium", 49_000).await;
    let id = create_subscription(&app, &user, &basic, "pending").await;

    let (status, body) = call(
        &app,
        "PATCH",
        &format!("/admin/subscriptions/{id}"),
        Some(json!({"plan_id": premium, "status": "cancelled"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["plan_id"], premium.as_str());
    assert_eq!(body["data"]["status"], "cancelled");
}

#[tokio::test]
async fn should_return_not_found_after_delete() {
    let app = app().await;
    let user = create_user(&app, "Tono").await;
    let plan = create_plan(&app, "Basic", 19_000).await;
    let id = create_subscription(&app, &user, &plan, "active").await;
    let uri = format!("/admin/subscriptions/{id}");

    let (status, body) = call(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User subscription deleted successfully");

    let (status, body) = call(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 404);
    assert_eq!(body["status"], "error");

    let (status, _) = call(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_reject_subscription_for_unknown_user() {
    let app = app().await;
    let plan = create_plan(&app, "Basic", 19_000).await;

    let (status, body) = call(
        &app,
        "POST",
        "/admin/subscriptions",
        Some(json!({"user_id": "00000000-0000-4000-8000-000000000000", "plan_id": plan})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found");
}

#[tokio::test]
async fn should_return_invalid_format_for_malformed_ids() {
    let app = app().await;

    for (method, uri) in [
        ("GET", "/admin/subscriptions/123"),
        ("PATCH", "/admin/subscriptions/123"),
        ("DELETE", "/admin/subscriptions/123"),
        ("GET", "/admin/subscriptions/123/transactions"),
        ("PATCH", "/admin/subscriptions/123/payment-status"),
        ("GET", "/admin/transactions/123"),
        ("GET", "/admin/subscription-plans/123"),
        ("PATCH", "/admin/subscription-plans/123"),
        ("GET", "/admin/users/123"),
        ("GET", "/nutrition/123"),
        ("PUT", "/nutrition/123"),
        ("DELETE", "/nutrition/123"),
        ("GET", "/admin/subscriptions/%FF"),
        ("PATCH", "/admin/subscriptions/%FF/payment-status"),
    ] {
        let (status, body) = call(&app, method, uri, Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{method} {uri}");
        let message = body["message"].as_str().unwrap();
        assert!(message.ends_with("ID format"), "{method} {uri}: {message}");
    }
}

// ---------------------------------------------------------------------------
// Transactions
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_record_and_list_transactions() {
    let app = app().await;
    let user = create_user(&app, "Lina").await;
    let plan = create_plan(&app, "Premium", 49_000).await;
    let sub = create_subscription(&app, &user, &plan, "active").await;
    let sub_uri = format!("/admin/subscriptions/{sub}/transactions");

    let (status, body) = call(
        &app,
        "POST",
        &sub_uri,
        Some(json!({"amount": 49000, "payment_method": "qris", "status": "success"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["currency"], "IDR");
    assert_eq!(body["data"]["user_id"], user.as_str());
    let tx_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = call(&app, "GET", &sub_uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, body) = call(&app, "GET", "/admin/transactions", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["id"], tx_id.as_str());
    assert_eq!(body["totalResults"], 1);
    assert_eq!(body["totalPages"], 1);

    let (status, body) = call(&app, "GET", &format!("/admin/transactions/{tx_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["amount"], 49000);
}

#[tokio::test]
async fn should_reject_non_positive_transaction_amount() {
    let app = app().await;
    let user = create_user(&app, "Eko").await;
    let plan = create_plan(&app, "Basic", 19_000).await;
    let sub = create_subscription(&app, &user, &plan, "active").await;

    let (status, _) = call(
        &app,
        "POST",
        &format!("/admin/subscriptions/{sub}/transactions"),
        Some(json!({"amount": 0, "payment_method": "cash"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Plans
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_list_plans_with_and_without_users() {
    let app = app().await;
    let user = create_user(&app, "Maya").await;
    let plan = create_plan(&app, "Premium", 49_000).await;
    create_subscription(&app, &user, &plan, "active").await;
    create_subscription(&app, &user, &plan, "expired").await;

    let (status, body) = call(&app, "GET", "/admin/subscription-plans?with_users=TRUE", None).await;
    assert_eq!(status, StatusCode::OK);
    let listed = &body["data"][0];
    assert_eq!(listed["price_formatted"], "Rp 49000");
    assert_eq!(listed["features"]["meal_plan"], true);
    assert_eq!(listed["user_count"], 1);
    assert_eq!(listed["users"][0]["name"], "Maya");

    let (_, body) = call(&app, "GET", "/admin/subscription-plans?with_users=nah", None).await;
    assert!(body["data"][0].get("users").is_none());
}

#[tokio::test]
async fn should_fail_plan_read_when_stored_features_are_not_json() {
    let (app, pool) = app_with_pool().await;
    let plan = create_plan(&app, "Broken", 10_000).await;

    sqlx::query("UPDATE subscription_plans SET features = '{broken' WHERE id = ?")
        .bind(plan.as_str())
        .execute(&pool)
        .await
        .unwrap();

    let (status, body) = call(&app, "GET", &format!("/admin/subscription-plans/{plan}"), None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], 500);
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Error parsing plan features");

    let (status, body) = call(&app, "GET", "/admin/subscription-plans", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Error parsing plan features");
}

#[tokio::test]
async fn should_update_plan_partially() {
    let app = app().await;
    let plan = create_plan(&app, "Premium", 49_000).await;
    let uri = format!("/admin/subscription-plans/{plan}");

    let (status, body) = call(
        &app,
        "PATCH",
        &uri,
        Some(json!({"price": 59000, "is_active": false})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Subscription plan updated successfully");

    let (_, body) = call(&app, "GET", &uri, None).await;
    assert_eq!(body["data"]["price"], 59000);
    assert_eq!(body["data"]["is_active"], false);
    assert_eq!(body["data"]["name"], "Premium");
    assert_eq!(body["data"]["ai_scan_limit"], 50);
}

// ---------------------------------------------------------------------------
// Nutrition
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_manage_nutrition_records() {
    let app = app().await;
    let rice = json!({
        "code": "AR001",
        "name": "Beras giling",
        "food_group": "Serealia",
        "energy": 357.0,
        "protein": 8.4
    });

    let (status, body) = call(&app, "POST", "/nutrition", Some(rice.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, _) = call(&app, "POST", "/nutrition", Some(rice)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = call(&app, "GET", "/nutrition/code/AR001", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], id.as_str());

    let (_, body) = call(&app, "GET", "/nutrition/group/Serealia", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, body) = call(
        &app,
        "PUT",
        &format!("/nutrition/{id}"),
        Some(json!({"code": "AR001", "name": "Beras merah", "food_group": "Serealia"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Beras merah");
    assert!(body["data"]["energy"].is_null());

    let (status, _) = call(&app, "DELETE", &format!("/nutrition/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = call(&app, "GET", &format!("/nutrition/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
