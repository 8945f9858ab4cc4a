use serde::{Deserialize, Serialize};

use super::repo_types::{FoodItem, NewFood};
use crate::days::Macros;
use crate::error::{required_amount, AppError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodRequest {
    pub name: Option<String>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fats: Option<f64>,
    pub calories: Option<f64>,
    pub serving_size: Option<f64>,
    pub serving_unit: Option<String>,
}

impl TryFrom<FoodRequest> for NewFood {
    type Error = AppError;

    fn try_from(req: FoodRequest) -> Result<Self, Self::Error> {
        let name = req
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| AppError::validation("name is required"))?;
        let serving_size = match req.serving_size {
            Some(size) => Some(required_amount("servingSize", Some(size))?),
            None => None,
        };
        Ok(Self {
            name,
            macros: Macros {
                protein: required_amount("protein", req.protein)?,
                carbs: required_amount("carbs", req.carbs)?,
                fats: required_amount("fats", req.fats)?,
                calories: required_amount("calories", req.calories)?,
            },
            serving_size,
            serving_unit: req
                .serving_unit
                .map(|u| u.trim().to_string())
                .filter(|u| !u.is_empty()),
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggedFoodResponse {
    pub food_id: String,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub calories: f64,
    pub previous_deficit: f64,
    pub deficit_delta: f64,
    pub deficit: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedFoodResponse {
    pub food_id: String,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub calories: f64,
    pub removed_calories: f64,
    pub previous_deficit: f64,
    pub deficit: f64,
}

#[derive(Debug, Serialize)]
pub struct FoodListResponse {
    pub foods: Vec<FoodItem>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub day: String,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub calories: f64,
    pub deficit: f64,
    pub foods: Vec<FoodItem>,
}
