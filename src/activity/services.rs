use serde::Serialize;

use crate::days::DayRecord;

#[derive(Debug, Clone, PartialEq)]
pub enum Exercise {
    Zone2 {
        duration: f64,
        distance: f64,
        burn: f64,
    },
    Vo2Max {
        score: f64,
        burn: f64,
    },
    Gym {
        duration: f64,
        workout_type: Option<String>,
        burn: f64,
    },
    Cycling {
        duration: f64,
        distance: f64,
        burn: f64,
    },
}

impl Exercise {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Zone2 { .. } => "zone2",
            Self::Vo2Max { .. } => "vo2max",
            Self::Gym { .. } => "gym",
            Self::Cycling { .. } => "cycling",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepsChange {
    pub previous_steps: f64,
    pub added_steps: f64,
    pub total_steps: f64,
    pub burn: f64,
    pub previous_deficit: f64,
    pub deficit: f64,
}

/// Before/added/after of an accumulated quantity.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Tally {
    previous: f64,
    added: f64,
    total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseChange {
    pub exercise_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub added_duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub added_distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_vo2max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vo2max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workout_type: Option<String>,
    pub burn: f64,
    pub total_burn: f64,
    pub previous_deficit: f64,
    pub deficit: f64,
}

impl ExerciseChange {
    fn set_duration(&mut self, t: Tally) {
        self.previous_duration = Some(t.previous);
        self.added_duration = Some(t.added);
        self.total_duration = Some(t.total);
    }

    fn set_distance(&mut self, t: Tally) {
        self.previous_distance = Some(t.previous);
        self.added_distance = Some(t.added);
        self.total_distance = Some(t.total);
    }
}

fn tally(field: &mut f64, added: f64) -> Tally {
    let previous = *field;
    *field += added;
    Tally {
        previous,
        added,
        total: *field,
    }
}

/// Movement calories count toward the day's burn and widen the deficit.
fn add_burn(rec: &mut DayRecord, burn: f64) {
    rec.kcal_from_movement += burn;
    rec.deficit += burn;
}

pub fn log_steps(rec: &mut DayRecord, steps: f64, burn: f64) -> StepsChange {
    let previous_deficit = rec.deficit;
    let t = tally(&mut rec.steps, steps);
    add_burn(rec, burn);
    StepsChange {
        previous_steps: t.previous,
        added_steps: t.added,
        total_steps: t.total,
        burn,
        previous_deficit,
        deficit: rec.deficit,
    }
}

pub fn log_exercise(rec: &mut DayRecord, exercise: Exercise) -> ExerciseChange {
    let previous_deficit = rec.deficit;
    let kind = exercise.kind();
    let mut change = ExerciseChange {
        exercise_type: kind,
        previous_duration: None,
        added_duration: None,
        total_duration: None,
        previous_distance: None,
        added_distance: None,
        total_distance: None,
        previous_vo2max: None,
        vo2max: None,
        workout_type: None,
        burn: 0.0,
        total_burn: 0.0,
        previous_deficit,
        deficit: previous_deficit,
    };

    let burn = match exercise {
        Exercise::Zone2 {
            duration,
            distance,
            burn,
        } => {
            change.set_duration(tally(&mut rec.zone2_duration, duration));
            change.set_distance(tally(&mut rec.zone2_distance, distance));
            burn
        }
        Exercise::Vo2Max { score, burn } => {
            change.previous_vo2max = rec.vo2max.replace(score);
            change.vo2max = Some(score);
            burn
        }
        Exercise::Gym {
            duration,
            workout_type,
            burn,
        } => {
            change.set_duration(tally(&mut rec.gym_duration, duration));
            if workout_type.is_some() {
                rec.workout_type = workout_type;
            }
            change.workout_type = rec.workout_type.clone();
            burn
        }
        Exercise::Cycling {
            duration,
            distance,
            burn,
        } => {
            change.set_duration(tally(&mut rec.cycling_duration, duration));
            change.set_distance(tally(&mut rec.cycling_distance, distance));
            burn
        }
    };

    add_burn(rec, burn);
    change.burn = burn;
    change.total_burn = rec.kcal_from_movement;
    change.deficit = rec.deficit;
    change
}
