use serde::{Deserialize, Serialize};

use super::services::MacroChange;
use crate::days::Macros;
use crate::error::{required_amount, AppError};

#[derive(Debug, Deserialize)]
pub struct NutritionRequest {
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fats: Option<f64>,
    pub calories: Option<f64>,
}

impl NutritionRequest {
    pub fn macros(&self) -> Result<Macros, AppError> {
        Ok(Macros {
            protein: required_amount("protein", self.protein)?,
            carbs: required_amount("carbs", self.carbs)?,
            fats: required_amount("fats", self.fats)?,
            calories: required_amount("calories", self.calories)?,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionResponse {
    pub previous_protein: f64,
    pub added_protein: f64,
    pub protein: f64,
    pub previous_carbs: f64,
    pub added_carbs: f64,
    pub carbs: f64,
    pub previous_fats: f64,
    pub added_fats: f64,
    pub fats: f64,
    pub previous_calories: f64,
    pub added_calories: f64,
    pub calories: f64,
    pub previous_deficit: f64,
    pub deficit: f64,
}

impl From<MacroChange> for NutritionResponse {
    fn from(c: MacroChange) -> Self {
        Self {
            previous_protein: c.previous.protein,
            added_protein: c.delta.protein,
            protein: c.total.protein,
            previous_carbs: c.previous.carbs,
            added_carbs: c.delta.carbs,
            carbs: c.total.carbs,
            previous_fats: c.previous.fats,
            added_fats: c.delta.fats,
            fats: c.total.fats,
            previous_calories: c.previous.calories,
            added_calories: c.delta.calories,
            calories: c.total.calories,
            previous_deficit: c.previous_deficit,
            deficit: c.deficit,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaloriesResponse {
    pub daily_cal: f64,
}
