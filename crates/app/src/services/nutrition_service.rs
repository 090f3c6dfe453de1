//! Nutrition service — CRUD over the food composition reference table.

use nutrihub_domain::error::{ConflictError, NotFoundError, NutriHubError};
use nutrihub_domain::id::NutritionId;
use nutrihub_domain::nutrition::{NutritionData, NutritionRecord};

use crate::ports::NutritionRepository;

const ENTITY: &str = "Nutrition record";

fn not_found(id: impl ToString) -> NutriHubError {
    NotFoundError {
        entity: ENTITY,
        id: id.to_string(),
    }
    .into()
}

/// Application service for nutrition records.
pub struct NutritionService<R> {
    repo: R,
}

impl<R: NutritionRepository> NutritionService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    async fn ensure_code_free(
        &self,
        code: &str,
        owner: Option<NutritionId>,
    ) -> Result<(), NutriHubError> {
        match self.repo.get_by_code(code).await? {
            Some(existing) if Some(existing.id) != owner => Err(ConflictError {
                entity: ENTITY,
                field: "code",
                value: code.to_string(),
            }
            .into()),
            _ => Ok(()),
        }
    }

    /// Insert a new record under a fresh id.
    ///
    /// # Errors
    ///
    /// Returns [`NutriHubError::Validation`] if invariants fail,
    /// [`NutriHubError::Conflict`] if the code is taken, or a storage error.
    #[tracing::instrument(skip(self, data), fields(code = %data.code))]
    pub async fn create(&self, data: NutritionData) -> Result<NutritionRecord, NutriHubError> {
        data.validate()?;
        self.ensure_code_free(&data.code, None).await?;
        self.repo.create(NutritionRecord::new(data)).await
    }

    /// Look up a record by id.
    ///
    /// # Errors
    ///
    /// Returns [`NutriHubError::NotFound`] when missing, or a storage error.
    #[tracing::instrument(skip(self))]
    pub async fn get_by_id(&self, id: NutritionId) -> Result<NutritionRecord, NutriHubError> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Look up a record by its reference-table code.
    ///
    /// # Errors
    ///
    /// Returns [`NutriHubError::NotFound`] when missing, or a storage error.
    #[tracing::instrument(skip(self))]
    pub async fn get_by_code(&self, code: &str) -> Result<NutritionRecord, NutriHubError> {
        self.repo
            .get_by_code(code)
            .await?
            .ok_or_else(|| not_found(code))
    }

    /// Every record of a food group. An unknown group yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn list_by_group(&self, group: &str) -> Result<Vec<NutritionRecord>, NutriHubError> {
        self.repo.find_by_group(group).await
    }

    /// Replace every field of an existing record.
    ///
    /// # Errors
    ///
    /// Returns [`NutriHubError::NotFound`] when missing,
    /// [`NutriHubError::Validation`] if invariants fail,
    /// [`NutriHubError::Conflict`] if the new code belongs to another record,
    /// or a storage error.
    #[tracing::instrument(skip(self, data), fields(code = %data.code))]
    pub async fn update(
        &self,
        id: NutritionId,
        data: NutritionData,
    ) -> Result<NutritionRecord, NutriHubError> {
        data.validate()?;
        self.get_by_id(id).await?;
        self.ensure_code_free(&data.code, Some(id)).await?;
        self.repo.update(NutritionRecord { id, data }).await
    }

    /// Delete a record.
    ///
    /// # Errors
    ///
    /// Returns [`NutriHubError::NotFound`] when nothing was deleted, or a
    /// storage error.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: NutritionId) -> Result<(), NutriHubError> {
        if self.repo.delete(id).await? {
            Ok(())
        } else {
            Err(not_found(id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::InMemoryStore;

    fn make_service() -> NutritionService<InMemoryStore> {
        NutritionService::new(InMemoryStore::default())
    }

    fn entry(code: &str, group: &str) -> NutritionData {
        NutritionData {
            code: code.to_string(),
            name: format!("Food {code}"),
            food_group: group.to_string(),
            energy: Some(100.0),
            ..NutritionData::default()
        }
    }

    #[tokio::test]
    async fn should_create_and_fetch_by_id_and_code() {
        let svc = make_service();
        let created = svc.create(entry("AR001", "Serealia")).await.unwrap();

        assert_eq!(svc.get_by_id(created.id).await.unwrap(), created);
        assert_eq!(svc.get_by_code("AR001").await.unwrap().id, created.id);
    }

    #[tokio::test]
    async fn should_reject_duplicate_code() {
        let svc = make_service();
        svc.create(entry("AR001", "Serealia")).await.unwrap();
        let result = svc.create(entry("AR001", "Umbi")).await;
        assert!(matches!(result, Err(NutriHubError::Conflict(_))));
    }

    #[tokio::test]
    async fn should_list_group_ordered_by_code() {
        let svc = make_service();
        svc.create(entry("AR002", "Serealia")).await.unwrap();
        svc.create(entry("AR001", "Serealia")).await.unwrap();
        svc.create(entry("BR001", "Umbi")).await.unwrap();

        let cereals = svc.list_by_group("Serealia").await.unwrap();
        let codes: Vec<&str> = cereals.iter().map(|r| r.data.code.as_str()).collect();
        assert_eq!(codes, ["AR001", "AR002"]);
        assert!(svc.list_by_group("Buah").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_replace_fields_on_update() {
        let svc = make_service();
        let created = svc.create(entry("AR001", "Serealia")).await.unwrap();

        let mut data = entry("AR001", "Serealia");
        data.energy = None;
        data.protein = Some(7.5);
        let updated = svc.update(created.id, data).await.unwrap();

        assert!(updated.data.energy.is_none());
        assert_eq!(updated.data.protein, Some(7.5));
    }

    #[tokio::test]
    async fn should_reject_update_taking_another_records_code() {
        let svc = make_service();
        svc.create(entry("AR001", "Serealia")).await.unwrap();
        let other = svc.create(entry("AR002", "Serealia")).await.unwrap();

        let result = svc.update(other.id, entry("AR001", "Serealia")).await;
        assert!(matches!(result, Err(NutriHubError::Conflict(_))));
    }

    #[tokio::test]
    async fn should_return_not_found_after_delete() {
        let svc = make_service();
        let created = svc.create(entry("AR001", "Serealia")).await.unwrap();

        svc.delete(created.id).await.unwrap();

        assert!(matches!(
            svc.get_by_id(created.id).await,
            Err(NutriHubError::NotFound(_))
        ));
        assert!(matches!(
            svc.delete(created.id).await,
            Err(NutriHubError::NotFound(_))
        ));
    }
}
