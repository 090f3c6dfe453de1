//! Transaction service — read access to the payment log and recording of
//! new payments.

use nutrihub_domain::error::{NotFoundError, NutriHubError};
use nutrihub_domain::id::{SubscriptionId, TransactionId};
use nutrihub_domain::pagination::{Page, PageRequest};
use nutrihub_domain::transaction::{DEFAULT_CURRENCY, Transaction, TransactionStatus};

use crate::ports::{SubscriptionRepository, TransactionRepository};

/// Payment details supplied when recording a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub amount: i64,
    pub currency: Option<String>,
    pub payment_method: String,
    pub status: Option<TransactionStatus>,
    pub reference: Option<String>,
}

/// Application service for transactions.
pub struct TransactionService<T, S> {
    transactions: T,
    subscriptions: S,
}

impl<T, S> TransactionService<T, S>
where
    T: TransactionRepository,
    S: SubscriptionRepository,
{
    /// Create a new service backed by the given repositories.
    pub fn new(transactions: T, subscriptions: S) -> Self {
        Self {
            transactions,
            subscriptions,
        }
    }

    /// One page of every transaction, newest first.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn list_transactions(
        &self,
        page: PageRequest,
    ) -> Result<Page<Transaction>, NutriHubError> {
        self.transactions.list(page).await
    }

    /// Look up a transaction by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`NutriHubError::NotFound`] when no transaction with `id`
    /// exists, or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_transaction(&self, id: TransactionId) -> Result<Transaction, NutriHubError> {
        self.transactions.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Transaction",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// Record a payment against a subscription, attributed to the
    /// subscription's user.
    ///
    /// # Errors
    ///
    /// Returns [`NutriHubError::NotFound`] when the subscription is missing,
    /// [`NutriHubError::Validation`] when the amount is not positive, or a
    /// storage error from a repository.
    #[tracing::instrument(skip(self, input), fields(amount = input.amount))]
    pub async fn record_transaction(
        &self,
        subscription_id: SubscriptionId,
        input: NewTransaction,
    ) -> Result<Transaction, NutriHubError> {
        let subscription = self
            .subscriptions
            .get_by_id(subscription_id)
            .await?
            .ok_or_else(|| {
                NutriHubError::from(NotFoundError {
                    entity: "Subscription",
                    id: subscription_id.to_string(),
                })
            })?;

        let mut transaction = Transaction::new(
            subscription.id,
            subscription.user_id,
            input.amount,
            input.payment_method,
        );
        transaction.currency = input
            .currency
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());
        transaction.status = input.status.unwrap_or_default();
        transaction.reference = input.reference;
        transaction.validate()?;

        self.transactions.create(transaction).await
    }
}
