use crate::days::{DailySnapshot, DayRecord};

/// A morning check-in.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WeighIn {
    pub weight: f64,
    pub bloated: bool,
    pub poop: bool,
    pub watery: bool,
    pub bad_sleep: bool,
}

/// Weight and health flags are replaced, never summed. The latest check-in
/// overwrites every flag.
pub fn record_weigh_in(rec: &mut DayRecord, w: WeighIn) -> Option<f64> {
    rec.bloated = w.bloated;
    rec.poop = w.poop;
    rec.watery = w.watery;
    rec.bad_sleep = w.bad_sleep;
    rec.weight.replace(w.weight)
}

/// Today's weight, yesterday's, and the difference when both exist.
pub fn weight_trend(snap: &DailySnapshot) -> (Option<f64>, Option<f64>, Option<f64>) {
    let today = snap.current().weight;
    let yesterday = snap.yesterday().and_then(|d| d.weight);
    let change = today.zip(yesterday).map(|(t, y)| round2(t - y));
    (today, yesterday, change)
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn latest_weigh_in_wins() {
        let mut rec = DayRecord::default();
        assert_eq!(record_weigh_in(&mut rec, WeighIn { weight: 81.0, ..Default::default() }), None);
        assert_eq!(
            record_weigh_in(&mut rec, WeighIn { weight: 80.4, bloated: true, poop: true, ..Default::default() }),
            Some(81.0)
        );
        assert_eq!(rec.weight, Some(80.4));
        assert!(rec.bloated && rec.poop);

        record_weigh_in(&mut rec, WeighIn { weight: 80.2, poop: true, ..Default::default() });
        assert_eq!(rec.weight, Some(80.2));
        assert!(!rec.bloated);
        assert!(rec.poop);
    }

    #[test]
    fn trend_needs_both_days() {
        let day = |key: &str, weight| DayRecord {
            day: key.into(),
            weight,
            ..DayRecord::default()
        };
        let snap = DailySnapshot::new(
            date!(2024 - 03 - 01),
            vec![day("2024 / 03 / 01", Some(80.3)), day("2024 / 02 / 29", Some(80.9))],
        );
        assert_eq!(weight_trend(&snap), (Some(80.3), Some(80.9), Some(-0.6)));

        let snap = DailySnapshot::new(date!(2024 - 03 - 01), vec![day("2024 / 03 / 01", Some(80.3))]);
        assert_eq!(weight_trend(&snap), (Some(80.3), None, None));
    }
}
