use lazy_static::lazy_static;
use regex::Regex;

use crate::days::DayRecord;

#[derive(Debug, Clone, PartialEq)]
pub enum SleepLog {
    /// How the night felt, as one of the store's quality options.
    Duration { quality: String },
    Timing {
        bed_time: String,
        wake_time: String,
        window: Option<String>,
    },
}

/// Minutes past midnight of an `HH:MM` 24-hour time.
pub fn parse_clock_time(s: &str) -> Option<u32> {
    lazy_static! {
        static ref TIME_RE: Regex = Regex::new(r"^([01]?\d|2[0-3]):([0-5]\d)$").unwrap();
    }
    let caps = TIME_RE.captures(s.trim())?;
    let hours: u32 = caps[1].parse().ok()?;
    let minutes: u32 = caps[2].parse().ok()?;
    Some(hours * 60 + minutes)
}

/// Hours between going to bed and waking, crossing midnight when needed.
pub fn sleep_hours(bed_time: &str, wake_time: &str) -> Option<f64> {
    let bed = parse_clock_time(bed_time)?;
    let wake = parse_clock_time(wake_time)?;
    let minutes = (wake + 24 * 60 - bed) % (24 * 60);
    Some((f64::from(minutes) / 60.0 * 100.0).round() / 100.0)
}

pub fn sleep_window(bed_time: &str, wake_time: &str) -> String {
    format!("{} - {}", bed_time.trim(), wake_time.trim())
}

/// Sleep fields are replaced; a timing log recomputes the window unless one
/// is supplied.
pub fn record_sleep(rec: &mut DayRecord, log: SleepLog) {
    match log {
        SleepLog::Duration { quality } => rec.sleep_quality = Some(quality),
        SleepLog::Timing {
            bed_time,
            wake_time,
            window,
        } => {
            rec.sleep_window = Some(window.unwrap_or_else(|| sleep_window(&bed_time, &wake_time)));
            rec.bed_time = Some(bed_time);
            rec.wake_time = Some(wake_time);
        }
    }
}
