use serde::Serialize;

use crate::days::{DailySnapshot, DayRecord};
use crate::weight::services::weight_trend;

/// One day of the weekly and monthly views.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPoint {
    pub day: String,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub calories: f64,
    pub deficit: f64,
    pub steps: f64,
    pub kcal_from_movement: f64,
    pub weight: Option<f64>,
}

impl From<&DayRecord> for DayPoint {
    fn from(rec: &DayRecord) -> Self {
        Self {
            day: rec.day.clone(),
            protein: rec.macros.protein,
            carbs: rec.macros.carbs,
            fats: rec.macros.fats,
            calories: rec.macros.calories,
            deficit: rec.deficit,
            steps: rec.steps,
            kcal_from_movement: rec.kcal_from_movement,
            weight: rec.weight,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub calories: f64,
    pub deficit: f64,
    pub steps: f64,
    pub kcal_from_movement: f64,
}

impl Totals {
    fn add(&mut self, p: &DayPoint) {
        self.protein += p.protein;
        self.carbs += p.carbs;
        self.fats += p.fats;
        self.calories += p.calories;
        self.deficit += p.deficit;
        self.steps += p.steps;
        self.kcal_from_movement += p.kcal_from_movement;
    }

    fn per_day(&self, days: usize) -> Self {
        let denom = if days == 0 { 1.0 } else { days as f64 };
        let avg = |v: f64| round2(v / denom);
        Self {
            protein: avg(self.protein),
            carbs: avg(self.carbs),
            fats: avg(self.fats),
            calories: avg(self.calories),
            deficit: avg(self.deficit),
            steps: avg(self.steps),
            kcal_from_movement: avg(self.kcal_from_movement),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekSummary {
    pub week: String,
    pub days_counted: usize,
    pub days: Vec<DayPoint>,
    pub totals: Totals,
    pub averages: Totals,
}

/// Per-day points of a week ordered by day, with sums and per-day averages
/// over the days that have a record.
pub fn summarize_week(week: &str, records: &[DayRecord]) -> WeekSummary {
    let mut days: Vec<DayPoint> = records.iter().map(DayPoint::from).collect();
    days.sort_by(|a, b| a.day.cmp(&b.day));

    let mut totals = Totals::default();
    for p in &days {
        totals.add(p);
    }
    WeekSummary {
        week: week.to_string(),
        days_counted: days.len(),
        averages: totals.per_day(days.len()),
        totals,
        days,
    }
}

pub fn weekly_deficit(records: &[DayRecord]) -> f64 {
    records.iter().map(|r| r.deficit).sum()
}

/// Everything the tracker page shows about today, in one flat object.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tracker {
    pub day: String,
    pub week: Option<String>,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub calories: f64,
    pub deficit: f64,
    pub weekly_deficit: f64,
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
    pub previous_weight: Option<f64>,
    pub weight_change: Option<f64>,
    pub bloated: bool,
    pub poop: bool,
    pub watery: bool,
    pub bad_sleep: bool,
    pub sleep_quality: Option<String>,
    pub bed_time: Option<String>,
    pub wake_time: Option<String>,
    pub sleep_window: Option<String>,
    pub food_count: usize,
}

pub fn tracker(snap: &DailySnapshot, week_records: &[DayRecord]) -> Tracker {
    let rec = snap.current();
    let (_, previous_weight, weight_change) = weight_trend(snap);
    Tracker {
        week: rec.week.first().cloned(),
        protein: rec.macros.protein,
        carbs: rec.macros.carbs,
        fats: rec.macros.fats,
        calories: rec.macros.calories,
        deficit: rec.deficit,
        weekly_deficit: weekly_deficit(week_records),
        steps: rec.steps,
        kcal_from_movement: rec.kcal_from_movement,
        zone2_duration: rec.zone2_duration,
        zone2_distance: rec.zone2_distance,
        cycling_duration: rec.cycling_duration,
        cycling_distance: rec.cycling_distance,
        gym_duration: rec.gym_duration,
        vo2max: rec.vo2max,
        weight: rec.weight,
        previous_weight,
        weight_change,
        bloated: rec.bloated,
        poop: rec.poop,
        watery: rec.watery,
        bad_sleep: rec.bad_sleep,
        food_count: rec.foods.len(),
        day: rec.day,
        workout_type: rec.workout_type,
        sleep_quality: rec.sleep_quality,
        bed_time: rec.bed_time,
        wake_time: rec.wake_time,
        sleep_window: rec.sleep_window,
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
