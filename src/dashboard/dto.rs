use serde::{Deserialize, Serialize};

use super::services::DayPoint;
use crate::error::{required, AppError};

/// Days shown by the history view when none are asked for.
pub const DEFAULT_HISTORY_DAYS: usize = 7;

#[derive(Debug, Deserialize)]
pub struct WeekQuery {
    pub week: Option<String>,
}

impl WeekQuery {
    pub fn tag(self) -> Result<String, AppError> {
        required(
            "week",
            self.week.map(|w| w.trim().to_string()).filter(|w| !w.is_empty()),
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub days: Option<usize>,
}

impl HistoryQuery {
    pub fn days(&self, max: usize) -> Result<usize, AppError> {
        let n = self.days.unwrap_or(DEFAULT_HISTORY_DAYS);
        if n == 0 || n > max {
            return Err(AppError::validation(format!("days must be between 1 and {max}")));
        }
        Ok(n)
    }
}

#[derive(Debug, Serialize)]
pub struct WeeksResponse {
    pub weeks: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeficitsResponse {
    pub daily_deficit: f64,
    pub weekly_deficit: f64,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub days: Vec<DayPoint>,
}
