//! `SQLite` implementation of [`SubscriptionRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use nutrihub_app::ports::SubscriptionRepository;
use nutrihub_domain::error::NutriHubError;
use nutrihub_domain::id::SubscriptionId;
use nutrihub_domain::pagination::{Page, PageRequest};
use nutrihub_domain::subscription::{PaymentStatus, Subscription, SubscriptionStatus};
use nutrihub_domain::time::Timestamp;

use crate::codec::{decode, decode_ts, encode_ts, to_i64, to_u64};
use crate::error::StorageError;

struct Wrapper(Subscription);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let user_id: String = row.try_get("user_id")?;
        let plan_id: String = row.try_get("plan_id")?;
        let status: String = row.try_get("status")?;
        let payment_status: String = row.try_get("payment_status")?;
        let start_date: String = row.try_get("start_date")?;
        let end_date: String = row.try_get("end_date")?;
        let created_at: String = row.try_get("created_at")?;
        let updated_at: String = row.try_get("updated_at")?;

        Ok(Self(Subscription {
            id: decode(&id)?,
            user_id: decode(&user_id)?,
            plan_id: decode(&plan_id)?,
            status: decode(&status)?,
            payment_status: decode(&payment_status)?,
            start_date: decode_ts(&start_date)?,
            end_date: decode_ts(&end_date)?,
            created_at: decode_ts(&created_at)?,
            updated_at: decode_ts(&updated_at)?,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO subscriptions
        (id, user_id, plan_id, status, payment_status, start_date, end_date, created_at, updated_at)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
";
const SELECT_BY_ID: &str = "SELECT * FROM subscriptions WHERE id = ?";
const SELECT_PAGE: &str = r"
    SELECT * FROM subscriptions
    WHERE ?1 IS NULL OR status = ?1
    ORDER BY created_at DESC, id
    LIMIT ?2 OFFSET ?3
";
const COUNT: &str = "SELECT COUNT(*) FROM subscriptions WHERE ?1 IS NULL OR status = ?1";
const UPDATE: &str = r"
    UPDATE subscriptions
    SET plan_id = ?, status = ?, payment_status = ?, start_date = ?, end_date = ?, updated_at = ?
    WHERE id = ?
";
const UPDATE_PAYMENT_STATUS: &str =
    "UPDATE subscriptions SET payment_status = ?, updated_at = ? WHERE id = ?";
const DELETE_TRANSACTIONS: &str = "DELETE FROM transactions WHERE subscription_id = ?";
const DELETE_BY_ID: &str = "DELETE FROM subscriptions WHERE id = ?";

/// `SQLite`-backed subscription repository.
#[derive(Clone)]
pub struct SqliteSubscriptionRepository {
    pool: SqlitePool,
}

impl SqliteSubscriptionRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl SubscriptionRepository for SqliteSubscriptionRepository {
    async fn create(&self, subscription: Subscription) -> Result<Subscription, NutriHubError> {
        sqlx::query(INSERT)
            .bind(subscription.id.to_string())
            .bind(subscription.user_id.to_string())
            .bind(subscription.plan_id.to_string())
            .bind(subscription.status.to_string())
            .bind(subscription.payment_status.to_string())
            .bind(encode_ts(subscription.start_date))
            .bind(encode_ts(subscription.end_date))
            .bind(encode_ts(subscription.created_at))
            .bind(encode_ts(subscription.updated_at))
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(subscription)
    }

    async fn get_by_id(&self, id: SubscriptionId) -> Result<Option<Subscription>, NutriHubError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(row.map(|w| w.0))
    }

    async fn list(
        &self,
        page: PageRequest,
        status: Option<SubscriptionStatus>,
    ) -> Result<Page<Subscription>, NutriHubError> {
        let status = status.map(|s| s.to_string());

        let (total,): (i64,) = sqlx::query_as(COUNT)
            .bind(status.as_deref())
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::from)?;

        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_PAGE)
            .bind(status.as_deref())
            .bind(i64::from(page.limit))
            .bind(to_i64(page.offset()))
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Page {
            items: rows.into_iter().map(|w| w.0).collect(),
            request: page,
            total_results: to_u64(total),
        })
    }

    async fn update(
        &self,
        subscription: Subscription,
    ) -> Result<Option<Subscription>, NutriHubError> {
        let result = sqlx::query(UPDATE)
            .bind(subscription.plan_id.to_string())
            .bind(subscription.status.to_string())
            .bind(subscription.payment_status.to_string())
            .bind(encode_ts(subscription.start_date))
            .bind(encode_ts(subscription.end_date))
            .bind(encode_ts(subscription.updated_at))
            .bind(subscription.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok((result.rows_affected() > 0).then_some(subscription))
    }

    async fn set_payment_status(
        &self,
        id: SubscriptionId,
        status: PaymentStatus,
        updated_at: Timestamp,
    ) -> Result<Option<Subscription>, NutriHubError> {
        let result = sqlx::query(UPDATE_PAYMENT_STATUS)
            .bind(status.to_string())
            .bind(encode_ts(updated_at))
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_by_id(id).await
    }

    async fn delete(&self, id: SubscriptionId) -> Result<bool, NutriHubError> {
        let mut tx = self.pool.begin().await.map_err(StorageError::from)?;

        sqlx::query(DELETE_TRANSACTIONS)
            .bind(id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(StorageError::from)?;
        let result = sqlx::query(DELETE_BY_ID)
            .bind(id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(StorageError::from)?;

        tx.commit().await.map_err(StorageError::from)?;
        Ok(result.rows_affected() > 0)
    }
}
