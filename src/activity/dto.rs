use serde::Deserialize;

use super::services::Exercise;
use crate::error::{optional_amount, required, required_amount, required_positive, AppError};

#[derive(Debug, Deserialize)]
pub struct StepsRequest {
    pub steps: Option<f64>,
    pub burn: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseType {
    Zone2,
    Vo2Max,
    Gym,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseRequest {
    pub exercise_type: Option<ExerciseType>,
    pub duration: Option<f64>,
    pub distance: Option<f64>,
    pub vo2max: Option<f64>,
    pub workout_type: Option<String>,
    pub burn: Option<f64>,
}

impl TryFrom<ExerciseRequest> for Exercise {
    type Error = AppError;

    fn try_from(req: ExerciseRequest) -> Result<Self, Self::Error> {
        let kind = required("exerciseType", req.exercise_type)?;
        let burn = optional_amount("burn", req.burn)?;
        Ok(match kind {
            ExerciseType::Zone2 => Exercise::Zone2 {
                duration: required_positive("duration", req.duration)?,
                distance: optional_amount("distance", req.distance)?,
                burn,
            },
            ExerciseType::Vo2Max => Exercise::Vo2Max {
                score: required_positive("vo2max", req.vo2max)?,
                burn,
            },
            ExerciseType::Gym => Exercise::Gym {
                duration: required_positive("duration", req.duration)?,
                workout_type: req
                    .workout_type
                    .map(|w| w.trim().to_string())
                    .filter(|w| !w.is_empty()),
                burn,
            },
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct BikeRequest {
    pub duration: Option<f64>,
    pub distance: Option<f64>,
    pub burn: Option<f64>,
}

impl TryFrom<BikeRequest> for Exercise {
    type Error = AppError;

    fn try_from(req: BikeRequest) -> Result<Self, Self::Error> {
        Ok(Exercise::Cycling {
            duration: required_positive("duration", req.duration)?,
            distance: required_amount("distance", req.distance)?,
            burn: required_amount("burn", req.burn)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn exercise_types_use_lowercase_names() {
        let req: ExerciseRequest =
            serde_json::from_value(json!({ "exerciseType": "vo2max", "vo2max": 51.0 })).unwrap();
        assert_eq!(req.exercise_type, Some(ExerciseType::Vo2Max));
        assert_eq!(
            Exercise::try_from(req).ok().map(|e| e.kind()),
            Some("vo2max")
        );

        assert!(serde_json::from_value::<ExerciseRequest>(json!({ "exerciseType": "Zone2" })).is_err());
    }
}
