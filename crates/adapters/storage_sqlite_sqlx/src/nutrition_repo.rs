//! `SQLite` implementation of [`NutritionRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use nutrihub_app::ports::NutritionRepository;
use nutrihub_domain::error::NutriHubError;
use nutrihub_domain::id::NutritionId;
use nutrihub_domain::nutrition::{NutritionData, NutritionRecord};

use crate::codec::decode;
use crate::error::{StorageError, conflict_or_storage};

struct Wrapper(NutritionRecord);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;

        Ok(Self(NutritionRecord {
            id: decode(&id)?,
            data: NutritionData {
                code: row.try_get("code")?,
                name: row.try_get("name")?,
                food_group: row.try_get("food_group")?,
                source: row.try_get("source")?,
                edible_portion: row.try_get("edible_portion")?,
                water: row.try_get("water")?,
                energy: row.try_get("energy")?,
                protein: row.try_get("protein")?,
                fat: row.try_get("fat")?,
                carbohydrate: row.try_get("carbohydrate")?,
                fiber: row.try_get("fiber")?,
                ash: row.try_get("ash")?,
                calcium: row.try_get("calcium")?,
                phosphorus: row.try_get("phosphorus")?,
                iron: row.try_get("iron")?,
                sodium: row.try_get("sodium")?,
                potassium: row.try_get("potassium")?,
                copper: row.try_get("copper")?,
                zinc: row.try_get("zinc")?,
                retinol: row.try_get("retinol")?,
                beta_carotene: row.try_get("beta_carotene")?,
                total_carotene: row.try_get("total_carotene")?,
                thiamine: row.try_get("thiamine")?,
                riboflavin: row.try_get("riboflavin")?,
                niacin: row.try_get("niacin")?,
                vitamin_c: row.try_get("vitamin_c")?,
            },
        }))
    }
}

// Nutrient placeholders follow the order of `NutritionData::nutrients`.
const INSERT: &str = r"
    INSERT INTO nutrition
        (id, code, name, food_group, source,
         edible_portion, water, energy, protein, fat, carbohydrate, fiber, ash,
         calcium, phosphorus, iron, sodium, potassium, copper, zinc,
         retinol, beta_carotene, total_carotene,
         thiamine, riboflavin, niacin, vitamin_c)
    VALUES (?, ?, ?, ?, ?,
            ?, ?, ?, ?, ?, ?, ?, ?,
            ?, ?, ?, ?, ?, ?, ?,
            ?, ?, ?,
            ?, ?, ?, ?)
";
const UPDATE: &str = r"
    UPDATE nutrition
    SET code = ?, name = ?, food_group = ?, source = ?,
        edible_portion = ?, water = ?, energy = ?, protein = ?, fat = ?,
        carbohydrate = ?, fiber = ?, ash = ?,
        calcium = ?, phosphorus = ?, iron = ?, sodium = ?, potassium = ?,
        copper = ?, zinc = ?,
        retinol = ?, beta_carotene = ?, total_carotene = ?,
        thiamine = ?, riboflavin = ?, niacin = ?, vitamin_c = ?
    WHERE id = ?
";
const SELECT_BY_ID: &str = "SELECT * FROM nutrition WHERE id = ?";
const SELECT_BY_CODE: &str = "SELECT * FROM nutrition WHERE code = ?";
const SELECT_BY_GROUP: &str = "SELECT * FROM nutrition WHERE food_group = ? ORDER BY code";
const DELETE_BY_ID: &str = "DELETE FROM nutrition WHERE id = ?";

/// `SQLite`-backed nutrition repository.
#[derive(Clone)]
pub struct SqliteNutritionRepository {
    pool: SqlitePool,
}

impl SqliteNutritionRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn fetch_one_by(
        &self,
        sql: &'static str,
        key: &str,
    ) -> Result<Option<NutritionRecord>, NutriHubError> {
        let row: Option<Wrapper> = sqlx::query_as(sql)
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(row.map(|w| w.0))
    }
}

impl NutritionRepository for SqliteNutritionRepository {
    async fn create(&self, record: NutritionRecord) -> Result<NutritionRecord, NutriHubError> {
        let data = &record.data;
        let mut query = sqlx::query(INSERT)
            .bind(record.id.to_string())
            .bind(&data.code)
            .bind(&data.name)
            .bind(&data.food_group)
            .bind(data.source.as_deref());
        for (_, value) in data.nutrients() {
            query = query.bind(value);
        }

        query
            .execute(&self.pool)
            .await
            .map_err(|err| conflict_or_storage(err, "Nutrition record", "code", &data.code))?;

        Ok(record)
    }

    async fn get_by_id(&self, id: NutritionId) -> Result<Option<NutritionRecord>, NutriHubError> {
        self.fetch_one_by(SELECT_BY_ID, &id.to_string()).await
    }

    async fn get_by_code(&self, code: &str) -> Result<Option<NutritionRecord>, NutriHubError> {
        self.fetch_one_by(SELECT_BY_CODE, code).await
    }

    async fn find_by_group(&self, group: &str) -> Result<Vec<NutritionRecord>, NutriHubError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_GROUP)
            .bind(group)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn update(&self, record: NutritionRecord) -> Result<NutritionRecord, NutriHubError> {
        let data = &record.data;
        let mut query = sqlx::query(UPDATE)
            .bind(&data.code)
            .bind(&data.name)
            .bind(&data.food_group)
            .bind(data.source.as_deref());
        for (_, value) in data.nutrients() {
            query = query.bind(value);
        }

        query
            .bind(record.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|err| conflict_or_storage(err, "Nutrition record", "code", &data.code))?;

        Ok(record)
    }

    async fn delete(&self, id: NutritionId) -> Result<bool, NutriHubError> {
        let result = sqlx::query(DELETE_BY_ID)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(result.rows_affected() > 0)
    }
}
