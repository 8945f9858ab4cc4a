use serde::Serialize;

use crate::store::{Properties, PropertyValue, Row};

/// Property names of the daily table.
pub mod props {
    pub const DAY: &str = "Day";
    pub const WEEK: &str = "Week";
    pub const PROTEIN: &str = "Protein";
    pub const CARBS: &str = "Carbs";
    pub const FATS: &str = "Fats";
    pub const CALORIES: &str = "Calories";
    pub const DEFICIT: &str = "Deficit";
    pub const STEPS: &str = "Steps";
    pub const KCAL_FROM_MOVEMENT: &str = "Kcal From Movement";
    pub const ZONE2_DURATION: &str = "Zone2 Duration";
    pub const ZONE2_DISTANCE: &str = "Zone2 Distance";
    pub const CYCLING_DURATION: &str = "Cycling Duration";
    pub const CYCLING_DISTANCE: &str = "Cycling Distance";
    pub const GYM_DURATION: &str = "Gym Duration";
    pub const WORKOUT_TYPE: &str = "Workout Type";
    pub const VO2MAX: &str = "VO2Max";
    pub const WEIGHT: &str = "Weight";
    pub const BLOATED: &str = "Bloated";
    pub const POOP: &str = "Poop";
    pub const WATERY: &str = "Watery";
    pub const BAD_SLEEP: &str = "Bad Sleep";
    pub const SLEEP_QUALITY: &str = "Sleep Quality";
    pub const BED_TIME: &str = "Bed Time";
    pub const WAKE_TIME: &str = "Wake Time";
    pub const SLEEP_WINDOW: &str = "Sleep Window";
    pub const FOODS: &str = "Foods";
}

/// Protein/carbs/fats in grams, calories in kcal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Macros {
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub calories: f64,
}

/// One day of the log, decoded from its row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayRecord {
    /// Row id; `None` until the record has been written.
    pub id: Option<String>,
    pub day: String,
    pub week: Vec<String>,
    pub macros: Macros,
    pub deficit: f64,
    pub steps: f64,
    pub kcal_from_movement: f64,
    pub zone2_duration: f64,
    pub zone2_distance: f64,
    pub cycling_duration: f64,
    pub cycling_distance: f64,
    pub gym_duration: f64,
    pub workout_type: Option<String>,
    pub vo2max: Option<f64>,
    pub weight: Option<f64>,
    pub bloated: bool,
    pub poop: bool,
    pub watery: bool,
    pub bad_sleep: bool,
    pub sleep_quality: Option<String>,
    pub bed_time: Option<String>,
    pub wake_time: Option<String>,
    pub sleep_window: Option<String>,
    pub foods: Vec<String>,
}

impl DayRecord {
    /// A record for a day that has no row yet.
    pub fn fresh(day: String, week: Option<&str>, calorie_budget: f64) -> Self {
        Self {
            day,
            week: week.map(|w| vec![w.to_string()]).unwrap_or_default(),
            deficit: calorie_budget,
            ..Self::default()
        }
    }

    pub fn from_row(row: &Row) -> Self {
        use props::*;
        Self {
            id: Some(row.id.clone()),
            day: row.text(DAY),
            week: row.tags(WEEK),
            macros: Macros {
                protein: row.number(PROTEIN),
                carbs: row.number(CARBS),
                fats: row.number(FATS),
                calories: row.number(CALORIES),
            },
            deficit: row.number(DEFICIT),
            steps: row.number(STEPS),
            kcal_from_movement: row.number(KCAL_FROM_MOVEMENT),
            zone2_duration: row.number(ZONE2_DURATION),
            zone2_distance: row.number(ZONE2_DISTANCE),
            cycling_duration: row.number(CYCLING_DURATION),
            cycling_distance: row.number(CYCLING_DISTANCE),
            gym_duration: row.number(GYM_DURATION),
            workout_type: row.select(WORKOUT_TYPE),
            vo2max: row.opt_number(VO2MAX),
            weight: row.opt_number(WEIGHT),
            bloated: row.checkbox(BLOATED),
            poop: row.checkbox(POOP),
            watery: row.checkbox(WATERY),
            bad_sleep: row.checkbox(BAD_SLEEP),
            sleep_quality: row.select(SLEEP_QUALITY),
            bed_time: row.opt_text(BED_TIME),
            wake_time: row.opt_text(WAKE_TIME),
            sleep_window: row.opt_text(SLEEP_WINDOW),
            foods: row.relation(FOODS),
        }
    }

    /// Every property of the record in store form.
    pub fn to_properties(&self) -> Properties {
        use props::*;
        use PropertyValue::*;

        let text = |s: &Option<String>| RichText(s.clone().unwrap_or_default());
        [
            (DAY, Title(self.day.clone())),
            (WEEK, MultiSelect(self.week.clone())),
            (PROTEIN, Number(Some(self.macros.protein))),
            (CARBS, Number(Some(self.macros.carbs))),
            (FATS, Number(Some(self.macros.fats))),
            (CALORIES, Number(Some(self.macros.calories))),
            (DEFICIT, Number(Some(self.deficit))),
            (STEPS, Number(Some(self.steps))),
            (KCAL_FROM_MOVEMENT, Number(Some(self.kcal_from_movement))),
            (ZONE2_DURATION, Number(Some(self.zone2_duration))),
            (ZONE2_DISTANCE, Number(Some(self.zone2_distance))),
            (CYCLING_DURATION, Number(Some(self.cycling_duration))),
            (CYCLING_DISTANCE, Number(Some(self.cycling_distance))),
            (GYM_DURATION, Number(Some(self.gym_duration))),
            (WORKOUT_TYPE, Select(self.workout_type.clone())),
            (VO2MAX, Number(self.vo2max)),
            (WEIGHT, Number(self.weight)),
            (BLOATED, Checkbox(self.bloated)),
            (POOP, Checkbox(self.poop)),
            (WATERY, Checkbox(self.watery)),
            (BAD_SLEEP, Checkbox(self.bad_sleep)),
            (SLEEP_QUALITY, Select(self.sleep_quality.clone())),
            (BED_TIME, text(&self.bed_time)),
            (WAKE_TIME, text(&self.wake_time)),
            (SLEEP_WINDOW, text(&self.sleep_window)),
            (FOODS, Relation(self.foods.clone())),
        ]
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
    }

    /// Properties whose value differs from `before`.
    pub fn changes_since(&self, before: &DayRecord) -> Properties {
        let old = before.to_properties();
        self.to_properties()
            .into_iter()
            .filter(|(name, value)| old.get(name) != Some(value))
            .collect()
    }
}
