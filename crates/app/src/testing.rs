//! In-memory implementation of every storage port, for service tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use nutrihub_domain::error::{ConflictError, NutriHubError};
use nutrihub_domain::id::{NutritionId, PlanId, SubscriptionId, TransactionId, UserId};
use nutrihub_domain::nutrition::NutritionRecord;
use nutrihub_domain::pagination::{Page, PageRequest};
use nutrihub_domain::plan::SubscriptionPlan;
use nutrihub_domain::subscription::{PaymentStatus, Subscription, SubscriptionStatus};
use nutrihub_domain::time::Timestamp;
use nutrihub_domain::transaction::Transaction;
use nutrihub_domain::user::{User, UserSummary};

use crate::ports::{
    NutritionRepository, PlanRepository, SubscriptionRepository, TransactionRepository,
    UserRepository,
};

#[derive(Default)]
struct Tables {
    users: HashMap<UserId, User>,
    plans: HashMap<PlanId, SubscriptionPlan>,
    subscriptions: HashMap<SubscriptionId, Subscription>,
    transactions: HashMap<TransactionId, Transaction>,
    nutrition: HashMap<NutritionId, NutritionRecord>,
}

/// Shared in-memory tables; clones see the same data.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
}

fn paginate<T>(mut items: Vec<T>, request: PageRequest) -> Page<T> {
    let total_results = items.len() as u64;
    let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
    let items = if offset >= items.len() {
        Vec::new()
    } else {
        items.drain(offset..).take(request.limit as usize).collect()
    };
    Page {
        items,
        request,
        total_results,
    }
}

impl UserRepository for InMemoryStore {
    async fn create(&self, user: User) -> Result<User, NutriHubError> {
        self.tables
            .lock()
            .unwrap()
            .users
            .insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_by_id(&self, id: UserId) -> Result<Option<User>, NutriHubError> {
        Ok(self.tables.lock().unwrap().users.get(&id).cloned())
    }
}

impl PlanRepository for InMemoryStore {
    async fn create(&self, plan: SubscriptionPlan) -> Result<SubscriptionPlan, NutriHubError> {
        self.tables
            .lock()
            .unwrap()
            .plans
            .insert(plan.id, plan.clone());
        Ok(plan)
    }

    async fn get_by_id(&self, id: PlanId) -> Result<Option<SubscriptionPlan>, NutriHubError> {
        Ok(self.tables.lock().unwrap().plans.get(&id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<SubscriptionPlan>, NutriHubError> {
        let mut plans: Vec<_> = self.tables.lock().unwrap().plans.values().cloned().collect();
        plans.sort_by_key(|p| p.price);
        Ok(plans)
    }

    async fn update(&self, plan: SubscriptionPlan) -> Result<SubscriptionPlan, NutriHubError> {
        self.tables
            .lock()
            .unwrap()
            .plans
            .insert(plan.id, plan.clone());
        Ok(plan)
    }

    async fn find_subscribers(&self, id: PlanId) -> Result<Vec<UserSummary>, NutriHubError> {
        let tables = self.tables.lock().unwrap();
        let mut ids: Vec<UserId> = tables
            .subscriptions
            .values()
            .filter(|s| s.plan_id == id)
            .map(|s| s.user_id)
            .collect();
        ids.sort();
        ids.dedup();
        let mut users: Vec<UserSummary> = ids
            .iter()
            .filter_map(|uid| tables.users.get(uid).map(User::summary))
            .collect();
        users.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(users)
    }

    async fn count_subscribers(&self, id: PlanId) -> Result<u64, NutriHubError> {
        let users = PlanRepository::find_subscribers(self, id).await?;
        Ok(users.len() as u64)
    }
}

impl SubscriptionRepository for InMemoryStore {
    async fn create(&self, subscription: Subscription) -> Result<Subscription, NutriHubError> {
        self.tables
            .lock()
            .unwrap()
            .subscriptions
            .insert(subscription.id, subscription.clone());
        Ok(subscription)
    }

    async fn get_by_id(&self, id: SubscriptionId) -> Result<Option<Subscription>, NutriHubError> {
        Ok(self.tables.lock().unwrap().subscriptions.get(&id).cloned())
    }

    async fn list(
        &self,
        page: PageRequest,
        status: Option<SubscriptionStatus>,
    ) -> Result<Page<Subscription>, NutriHubError> {
        let mut items: Vec<Subscription> = self
            .tables
            .lock()
            .unwrap()
            .subscriptions
            .values()
            .filter(|s| status.is_none_or(|st| s.status == st))
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paginate(items, page))
    }

    async fn update(
        &self,
        subscription: Subscription,
    ) -> Result<Option<Subscription>, NutriHubError> {
        let mut tables = self.tables.lock().unwrap();
        Ok(tables
            .subscriptions
            .get_mut(&subscription.id)
            .map(|stored| {
                *stored = subscription.clone();
                subscription
            }))
    }

    async fn set_payment_status(
        &self,
        id: SubscriptionId,
        status: PaymentStatus,
        updated_at: Timestamp,
    ) -> Result<Option<Subscription>, NutriHubError> {
        let mut tables = self.tables.lock().unwrap();
        Ok(tables.subscriptions.get_mut(&id).map(|stored| {
            stored.set_payment_status(status, updated_at);
            stored.clone()
        }))
    }

    async fn delete(&self, id: SubscriptionId) -> Result<bool, NutriHubError> {
        let mut tables = self.tables.lock().unwrap();
        tables.transactions.retain(|_, t| t.subscription_id != id);
        Ok(tables.subscriptions.remove(&id).is_some())
    }
}

impl TransactionRepository for InMemoryStore {
    async fn create(&self, transaction: Transaction) -> Result<Transaction, NutriHubError> {
        self.tables
            .lock()
            .unwrap()
            .transactions
            .insert(transaction.id, transaction.clone());
        Ok(transaction)
    }

    async fn get_by_id(&self, id: TransactionId) -> Result<Option<Transaction>, NutriHubError> {
        Ok(self.tables.lock().unwrap().transactions.get(&id).cloned())
    }

    async fn list(&self, page: PageRequest) -> Result<Page<Transaction>, NutriHubError> {
        let mut items: Vec<Transaction> = self
            .tables
            .lock()
            .unwrap()
            .transactions
            .values()
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paginate(items, page))
    }

    async fn find_by_subscription(
        &self,
        id: SubscriptionId,
    ) -> Result<Vec<Transaction>, NutriHubError> {
        let mut items: Vec<Transaction> = self
            .tables
            .lock()
            .unwrap()
            .transactions
            .values()
            .filter(|t| t.subscription_id == id)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }
}

fn code_taken(tables: &Tables, record: &NutritionRecord) -> bool {
    tables
        .nutrition
        .values()
        .any(|r| r.data.code == record.data.code && r.id != record.id)
}

impl NutritionRepository for InMemoryStore {
    async fn create(&self, record: NutritionRecord) -> Result<NutritionRecord, NutriHubError> {
        let mut tables = self.tables.lock().unwrap();
        if code_taken(&tables, &record) {
            return Err(ConflictError {
                entity: "Nutrition record",
                field: "code",
                value: record.data.code,
            }
            .into());
        }
        tables.nutrition.insert(record.id, record.clone());
        Ok(record)
    }

    async fn get_by_id(&self, id: NutritionId) -> Result<Option<NutritionRecord>, NutriHubError> {
        Ok(self.tables.lock().unwrap().nutrition.get(&id).cloned())
    }

    async fn get_by_code(&self, code: &str) -> Result<Option<NutritionRecord>, NutriHubError> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .nutrition
            .values()
            .find(|r| r.data.code == code)
            .cloned())
    }

    async fn find_by_group(&self, group: &str) -> Result<Vec<NutritionRecord>, NutriHubError> {
        let mut items: Vec<NutritionRecord> = self
            .tables
            .lock()
            .unwrap()
            .nutrition
            .values()
            .filter(|r| r.data.food_group == group)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.data.code.cmp(&b.data.code));
        Ok(items)
    }

    async fn update(&self, record: NutritionRecord) -> Result<NutritionRecord, NutriHubError> {
        let mut tables = self.tables.lock().unwrap();
        if code_taken(&tables, &record) {
            return Err(ConflictError {
                entity: "Nutrition record",
                field: "code",
                value: record.data.code,
            }
            .into());
        }
        tables.nutrition.insert(record.id, record.clone());
        Ok(record)
    }

    async fn delete(&self, id: NutritionId) -> Result<bool, NutriHubError> {
        Ok(self.tables.lock().unwrap().nutrition.remove(&id).is_some())
    }
}
