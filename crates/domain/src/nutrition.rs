//! Nutrition record — one entry of the food composition reference table.
//!
//! Values are expressed per 100 g of edible portion. Apart from the
//! identifying fields every nutrient is optional: the reference table
//! leaves cells empty where no measurement exists.

use serde::{Deserialize, Serialize};

use crate::error::{NutriHubError, ValidationError};
use crate::id::NutritionId;

/// Everything about a food entry except its identifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionData {
    /// Reference-table code, unique across records (e.g. `AR001`).
    pub code: String,
    pub name: String,
    /// Food group the entry is listed under (cereals, tubers, …).
    pub food_group: String,
    /// Where the measurement comes from.
    #[serde(default)]
    pub source: Option<String>,
    /// Edible portion, percent.
    #[serde(default)]
    pub edible_portion: Option<f64>,
    /// Grams.
    #[serde(default)]
    pub water: Option<f64>,
    /// Kilocalories.
    #[serde(default)]
    pub energy: Option<f64>,
    #[serde(default)]
    pub protein: Option<f64>,
    #[serde(default)]
    pub fat: Option<f64>,
    #[serde(default)]
    pub carbohydrate: Option<f64>,
    #[serde(default)]
    pub fiber: Option<f64>,
    #[serde(default)]
    pub ash: Option<f64>,
    /// Milligrams.
    #[serde(default)]
    pub calcium: Option<f64>,
    #[serde(default)]
    pub phosphorus: Option<f64>,
    #[serde(default)]
    pub iron: Option<f64>,
    #[serde(default)]
    pub sodium: Option<f64>,
    #[serde(default)]
    pub potassium: Option<f64>,
    #[serde(default)]
    pub copper: Option<f64>,
    #[serde(default)]
    pub zinc: Option<f64>,
    /// Micrograms.
    #[serde(default)]
    pub retinol: Option<f64>,
    #[serde(default)]
    pub beta_carotene: Option<f64>,
    #[serde(default)]
    pub total_carotene: Option<f64>,
    /// Milligrams.
    #[serde(default)]
    pub thiamine: Option<f64>,
    #[serde(default)]
    pub riboflavin: Option<f64>,
    #[serde(default)]
    pub niacin: Option<f64>,
    #[serde(default)]
    pub vitamin_c: Option<f64>,
}

impl NutritionData {
    /// Every nutrient column by name, in storage order.
    #[must_use]
    pub fn nutrients(&self) -> [(&'static str, Option<f64>); 22] {
        [
            ("edible_portion", self.edible_portion),
            ("water", self.water),
            ("energy", self.energy),
            ("protein", self.protein),
            ("fat", self.fat),
            ("carbohydrate", self.carbohydrate),
            ("fiber", self.fiber),
            ("ash", self.ash),
            ("calcium", self.calcium),
            ("phosphorus", self.phosphorus),
            ("iron", self.iron),
            ("sodium", self.sodium),
            ("potassium", self.potassium),
            ("copper", self.copper),
            ("zinc", self.zinc),
            ("retinol", self.retinol),
            ("beta_carotene", self.beta_carotene),
            ("total_carotene", self.total_carotene),
            ("thiamine", self.thiamine),
            ("riboflavin", self.riboflavin),
            ("niacin", self.niacin),
            ("vitamin_c", self.vitamin_c),
        ]
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`NutriHubError::Validation`] when an identifying field is
    /// blank or a nutrient is negative, NaN or infinite.
    pub fn validate(&self) -> Result<(), NutriHubError> {
        if self.code.trim().is_empty() {
            return Err(ValidationError::EmptyCode.into());
        }
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if self.food_group.trim().is_empty() {
            return Err(ValidationError::EmptyFoodGroup.into());
        }
        for (field, value) in self.nutrients() {
            if let Some(v) = value {
                if !v.is_finite() || v < 0.0 {
                    return Err(ValidationError::InvalidNutrient { field }.into());
                }
            }
        }
        Ok(())
    }
}

/// A stored nutrition entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionRecord {
    pub id: NutritionId,
    #[serde(flatten)]
    pub data: NutritionData,
}

impl NutritionRecord {
    /// Wrap `data` under a fresh identifier.
    #[must_use]
    pub fn new(data: NutritionData) -> Self {
        Self {
            id: NutritionId::new(),
            data,
        }
    }

    /// Check domain invariants. See [`NutritionData::validate`].
    ///
    /// # Errors
    ///
    /// Returns [`NutriHubError::Validation`] when the data is invalid.
    pub fn validate(&self) -> Result<(), NutriHubError> {
        self.data.validate()
    }
}
