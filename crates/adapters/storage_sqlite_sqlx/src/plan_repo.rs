//! `SQLite` implementation of [`PlanRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use nutrihub_app::ports::PlanRepository;
use nutrihub_domain::error::NutriHubError;
use nutrihub_domain::id::PlanId;
use nutrihub_domain::plan::SubscriptionPlan;
use nutrihub_domain::user::UserSummary;

use crate::codec::{decode, decode_ts, encode_ts, to_u64};
use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`SubscriptionPlan`].
///
/// `features` is passed through untouched; decoding it is a domain concern.
struct Wrapper(SubscriptionPlan);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let created_at: String = row.try_get("created_at")?;
        let updated_at: String = row.try_get("updated_at")?;

        Ok(Self(SubscriptionPlan {
            id: decode(&id)?,
            name: row.try_get("name")?,
            price: row.try_get("price")?,
            description: row.try_get("description")?,
            ai_scan_limit: row.try_get("ai_scan_limit")?,
            validity_days: row.try_get("validity_days")?,
            features: row.try_get("features")?,
            is_active: row.try_get("is_active")?,
            created_at: decode_ts(&created_at)?,
            updated_at: decode_ts(&updated_at)?,
        }))
    }
}

struct SummaryWrapper(UserSummary);

impl<'r> FromRow<'r, SqliteRow> for SummaryWrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        Ok(Self(UserSummary {
            id: decode(&id)?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO subscription_plans
        (id, name, price, description, ai_scan_limit, validity_days, features, is_active, created_at, updated_at)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
";
const SELECT_BY_ID: &str = "SELECT * FROM subscription_plans WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM subscription_plans ORDER BY price, name";
const UPDATE: &str = r"
    UPDATE subscription_plans
    SET name = ?, price = ?, description = ?, ai_scan_limit = ?, validity_days = ?,
        features = ?, is_active = ?, updated_at = ?
    WHERE id = ?
";
const SELECT_SUBSCRIBERS: &str = r"
    SELECT DISTINCT u.id, u.name, u.email
    FROM users u
    JOIN subscriptions s ON s.user_id = u.id
    WHERE s.plan_id = ?
    ORDER BY u.name, u.id
";
const COUNT_SUBSCRIBERS: &str =
    "SELECT COUNT(DISTINCT user_id) FROM subscriptions WHERE plan_id = ?";

/// `SQLite`-backed subscription plan repository.
#[derive(Clone)]
pub struct SqlitePlanRepository {
    pool: SqlitePool,
}

impl SqlitePlanRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl PlanRepository for SqlitePlanRepository {
    async fn create(&self, plan: SubscriptionPlan) -> Result<SubscriptionPlan, NutriHubError> {
        sqlx::query(INSERT)
            .bind(plan.id.to_string())
            .bind(&plan.name)
            .bind(plan.price)
            .bind(&plan.description)
            .bind(plan.ai_scan_limit)
            .bind(plan.validity_days)
            .bind(&plan.features)
            .bind(plan.is_active)
            .bind(encode_ts(plan.created_at))
            .bind(encode_ts(plan.updated_at))
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(plan)
    }

    async fn get_by_id(&self, id: PlanId) -> Result<Option<SubscriptionPlan>, NutriHubError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(row.map(|w| w.0))
    }

    async fn get_all(&self) -> Result<Vec<SubscriptionPlan>, NutriHubError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn update(&self, plan: SubscriptionPlan) -> Result<SubscriptionPlan, NutriHubError> {
        sqlx::query(UPDATE)
            .bind(&plan.name)
            .bind(plan.price)
            .bind(&plan.description)
            .bind(plan.ai_scan_limit)
            .bind(plan.validity_days)
            .bind(&plan.features)
            .bind(plan.is_active)
            .bind(encode_ts(plan.updated_at))
            .bind(plan.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(plan)
    }

    async fn find_subscribers(&self, id: PlanId) -> Result<Vec<UserSummary>, NutriHubError> {
        let rows: Vec<SummaryWrapper> = sqlx::query_as(SELECT_SUBSCRIBERS)
            .bind(id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn count_subscribers(&self, id: PlanId) -> Result<u64, NutriHubError> {
        let (count,): (i64,) = sqlx::query_as(COUNT_SUBSCRIBERS)
            .bind(id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(to_u64(count))
    }
}
