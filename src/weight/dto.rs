use serde::{Deserialize, Serialize};

use super::services::WeighIn;
use crate::error::{required_positive, AppError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightRequest {
    pub weight: Option<f64>,
    pub bloated: Option<bool>,
    pub poop: Option<bool>,
    pub watery: Option<bool>,
    pub is_bad_sleep: Option<bool>,
}

impl TryFrom<WeightRequest> for WeighIn {
    type Error = AppError;

    fn try_from(req: WeightRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            weight: required_positive("weight", req.weight)?,
            bloated: req.bloated.unwrap_or(false),
            poop: req.poop.unwrap_or(false),
            watery: req.watery.unwrap_or(false),
            bad_sleep: req.is_bad_sleep.unwrap_or(false),
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightLoggedResponse {
    pub previous_weight: Option<f64>,
    pub weight: f64,
    pub bloated: bool,
    pub poop: bool,
    pub watery: bool,
    pub bad_sleep: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightResponse {
    pub weight: Option<f64>,
    pub previous_weight: Option<f64>,
    pub change: Option<f64>,
}
