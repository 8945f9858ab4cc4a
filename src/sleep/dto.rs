use serde::{Deserialize, Serialize};

use super::services::{parse_clock_time, sleep_hours, SleepLog};
use crate::days::DayRecord;
use crate::error::{required, AppError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SleepType {
    Duration,
    Timing,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepRequest {
    pub sleep_type: Option<SleepType>,
    pub sleep_quality: Option<String>,
    pub bed_time: Option<String>,
    pub wake_time: Option<String>,
    pub sleep_window: Option<String>,
}

fn non_empty(field: &str, value: Option<String>) -> Result<String, AppError> {
    required(field, value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()))
}

fn clock_time(field: &str, value: Option<String>) -> Result<String, AppError> {
    let v = non_empty(field, value)?;
    if parse_clock_time(&v).is_none() {
        return Err(AppError::validation(format!("{field} must be HH:MM")));
    }
    Ok(v)
}

impl TryFrom<SleepRequest> for SleepLog {
    type Error = AppError;

    fn try_from(req: SleepRequest) -> Result<Self, Self::Error> {
        Ok(match required("sleepType", req.sleep_type)? {
            SleepType::Duration => SleepLog::Duration {
                quality: non_empty("sleepQuality", req.sleep_quality)?,
            },
            SleepType::Timing => SleepLog::Timing {
                bed_time: clock_time("bedTime", req.bed_time)?,
                wake_time: clock_time("wakeTime", req.wake_time)?,
                window: req
                    .sleep_window
                    .map(|w| w.trim().to_string())
                    .filter(|w| !w.is_empty()),
            },
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepResponse {
    pub sleep_quality: Option<String>,
    pub bed_time: Option<String>,
    pub wake_time: Option<String>,
    pub sleep_window: Option<String>,
    pub hours: Option<f64>,
}

impl From<&DayRecord> for SleepResponse {
    fn from(rec: &DayRecord) -> Self {
        let hours = rec
            .bed_time
            .as_deref()
            .zip(rec.wake_time.as_deref())
            .and_then(|(bed, wake)| sleep_hours(bed, wake));
        Self {
            sleep_quality: rec.sleep_quality.clone(),
            bed_time: rec.bed_time.clone(),
            wake_time: rec.wake_time.clone(),
            sleep_window: rec.sleep_window.clone(),
            hours,
        }
    }
}
