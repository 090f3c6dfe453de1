//! `SQLite` implementation of [`TransactionRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use nutrihub_app::ports::TransactionRepository;
use nutrihub_domain::error::NutriHubError;
use nutrihub_domain::id::{SubscriptionId, TransactionId};
use nutrihub_domain::pagination::{Page, PageRequest};
use nutrihub_domain::transaction::Transaction;

use crate::codec::{decode, decode_ts, encode_ts, to_i64, to_u64};
use crate::error::StorageError;

struct Wrapper(Transaction);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let subscription_id: String = row.try_get("subscription_id")?;
        let user_id: String = row.try_get("user_id")?;
        let status: String = row.try_get("status")?;
        let created_at: String = row.try_get("created_at")?;

        Ok(Self(Transaction {
            id: decode(&id)?,
            subscription_id: decode(&subscription_id)?,
            user_id: decode(&user_id)?,
            amount: row.try_get("amount")?,
            currency: row.try_get("currency")?,
            payment_method: row.try_get("payment_method")?,
            status: decode(&status)?,
            reference: row.try_get("reference")?,
            created_at: decode_ts(&created_at)?,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO transactions
        (id, subscription_id, user_id, amount, currency, payment_method, status, reference, created_at)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
";
const SELECT_BY_ID: &str = "SELECT * FROM transactions WHERE id = ?";
const SELECT_PAGE: &str = "SELECT * FROM transactions ORDER BY created_at DESC, id LIMIT ? OFFSET ?";
const COUNT: &str = "SELECT COUNT(*) FROM transactions";
const SELECT_BY_SUBSCRIPTION: &str =
    "SELECT * FROM transactions WHERE subscription_id = ? ORDER BY created_at DESC, id";

/// `SQLite`-backed transaction repository.
#[derive(Clone)]
pub struct SqliteTransactionRepository {
    pool: SqlitePool,
}

impl SqliteTransactionRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl TransactionRepository for SqliteTransactionRepository {
    async fn create(&self, transaction: Transaction) -> Result<Transaction, NutriHubError> {
        sqlx::query(INSERT)
            .bind(transaction.id.to_string())
            .bind(transaction.subscription_id.to_string())
            .bind(transaction.user_id.to_string())
            .bind(transaction.amount)
            .bind(&transaction.currency)
            .bind(&transaction.payment_method)
            .bind(transaction.status.to_string())
            .bind(transaction.reference.as_deref())
            .bind(encode_ts(transaction.created_at))
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(transaction)
    }

    async fn get_by_id(&self, id: TransactionId) -> Result<Option<Transaction>, NutriHubError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(row.map(|w| w.0))
    }

    async fn list(&self, page: PageRequest) -> Result<Page<Transaction>, NutriHubError> {
        let (total,): (i64,) = sqlx::query_as(COUNT)
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::from)?;

        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_PAGE)
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

    async fn find_by_subscription(
        &self,
        id: SubscriptionId,
    ) -> Result<Vec<Transaction>, NutriHubError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_SUBSCRIPTION)
            .bind(id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan_repo::SqlitePlanRepository;
    use crate::pool::Config;
    use crate::subscription_repo::SqliteSubscriptionRepository;
    use crate::user_repo::SqliteUserRepository;
    use nutrihub_app::ports::{PlanRepository, SubscriptionRepository, UserRepository};
    use nutrihub_domain::plan::SubscriptionPlan;
    use nutrihub_domain::subscription::Subscription;
    use nutrihub_domain::transaction::TransactionStatus;
    use nutrihub_domain::user::User;

    async fn setup() -> (SqliteTransactionRepository, Subscription, Subscription) {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        let pool = db.pool().clone();

        let user = User::new("Joko", "joko@example.com");
        let plan = SubscriptionPlan::builder().name("Basic").build().unwrap();
        SqliteUserRepository::new(pool.clone())
            .create(user.clone())
            .await
            .unwrap();
        SqlitePlanRepository::new(pool.clone())
            .create(plan.clone())
            .await
            .unwrap();
        let subs = SqliteSubscriptionRepository::new(pool.clone());
        let first = subs
            .create(Subscription::start(user.id, &plan))
            .await
            .unwrap();
        let second = subs
            .create(Subscription::start(user.id, &plan))
            .await
            .unwrap();

        (SqliteTransactionRepository::new(pool), first, second)
    }

    #[tokio::test]
    async fn should_create_and_retrieve_transaction() {
        let (repo, sub, _) = setup().await;
        let mut tx = Transaction::new(sub.id, sub.user_id, 19_000, "ewallet");
        tx.status = TransactionStatus::Success;
        tx.reference = Some("PAY-42".to_string());

        repo.create(tx.clone()).await.unwrap();

        let fetched = repo.get_by_id(tx.id).await.unwrap().unwrap();
        assert_eq!(fetched, tx);
    }

    #[tokio::test]
    async fn should_return_none_when_transaction_not_found() {
        let (repo, _, _) = setup().await;
        assert!(repo.get_by_id(TransactionId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn should_reject_transaction_for_unknown_subscription() {
        let (repo, sub, _) = setup().await;
        let tx = Transaction::new(SubscriptionId::new(), sub.user_id, 1, "cash");
        assert!(repo.create(tx).await.is_err());
    }

    #[tokio::test]
    async fn should_paginate_all_transactions() {
        let (repo, first, second) = setup().await;
        for amount in 1..=3 {
            repo.create(Transaction::new(first.id, first.user_id, amount, "cash"))
                .await
                .unwrap();
        }
        repo.create(Transaction::new(second.id, second.user_id, 10, "cash"))
            .await
            .unwrap();

        let page = repo.list(PageRequest::new(1, 3)).await.unwrap();
        assert_eq!(page.items.len(), 3);
        assert_eq!(page.total_results, 4);
        assert_eq!(page.total_pages(), 2);
    }

    #[tokio::test]
    async fn should_find_only_transactions_of_subscription() {
        let (repo, first, second) = setup().await;
        repo.create(Transaction::new(first.id, first.user_id, 1, "cash"))
            .await
            .unwrap();
        repo.create(Transaction::new(second.id, second.user_id, 2, "cash"))
            .await
            .unwrap();

        let found = repo.find_by_subscription(second.id).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].amount, 2);
    }
}
