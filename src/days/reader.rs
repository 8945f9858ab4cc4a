use time::Date;

use super::key::{day_key, previous_day};
use super::repo::recent_days;
use super::repo_types::DayRecord;
use crate::state::AppState;

/// Rows fetched per read; one month covers every day-over-day comparison.
pub const LOOKBACK_DAYS: usize = 31;

/// The lookback window of daily records, fetched in one query.
#[derive(Debug, Clone)]
pub struct DailySnapshot {
    pub today: Date,
    days: Vec<DayRecord>,
}

impl DailySnapshot {
    pub async fn load(st: &AppState) -> anyhow::Result<Self> {
        let days = recent_days(st, LOOKBACK_DAYS).await?;
        Ok(Self::new(st.today(), days))
    }

    pub fn new(today: Date, days: Vec<DayRecord>) -> Self {
        Self { today, days }
    }

    /// The record keyed with `date`, if any.
    pub fn on(&self, date: Date) -> Option<&DayRecord> {
        let key = day_key(date);
        self.days.iter().find(|d| d.day == key)
    }

    /// Today's record, or an empty one carrying today's key.
    pub fn current(&self) -> DayRecord {
        self.on(self.today).cloned().unwrap_or_else(|| DayRecord {
            day: day_key(self.today),
            ..DayRecord::default()
        })
    }

    pub fn yesterday(&self) -> Option<&DayRecord> {
        self.on(previous_day(self.today))
    }

    /// Records of the `count` days ending today, oldest first. Days without a
    /// row are left out.
    pub fn last_days(&self, count: usize) -> Vec<DayRecord> {
        let mut date = self.today;
        let mut out = Vec::with_capacity(count);
        for _ in 0..count {
            if let Some(rec) = self.on(date) {
                out.push(rec.clone());
            }
            date = previous_day(date);
        }
        out.reverse();
        out
    }
}
