use time::{Date, OffsetDateTime, UtcOffset};

/// Source of "today". Every record key is derived from it.
pub trait Clock: Send + Sync {
    fn today(&self) -> Date;
}

/// Wall clock shifted to a fixed UTC offset.
pub struct SystemClock {
    offset: UtcOffset,
}

impl SystemClock {
    pub fn new(offset: UtcOffset) -> Self {
        Self { offset }
    }

    /// Uses `hours` when given, otherwise the host's local offset, falling
    /// back to UTC when the platform cannot report it.
    pub fn from_offset_hours(hours: Option<i8>) -> anyhow::Result<Self> {
        let offset = match hours {
            Some(h) => UtcOffset::from_hms(h, 0, 0)?,
            None => UtcOffset::current_local_offset().unwrap_or_else(|_| {
                tracing::warn!("local utc offset unavailable; using UTC for day keys");
                UtcOffset::UTC
            }),
        };
        Ok(Self::new(offset))
    }
}

impl Clock for SystemClock {
    fn today(&self) -> Date {
        OffsetDateTime::now_utc().to_offset(self.offset).date()
    }
}

#[cfg(test)]
pub struct FixedClock(pub Date);

#[cfg(test)]
impl Clock for FixedClock {
    fn today(&self) -> Date {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn fixed_clock_returns_its_date() {
        assert_eq!(FixedClock(date!(2024 - 03 - 07)).today(), date!(2024 - 03 - 07));
    }

    #[test]
    fn explicit_offset_is_honored() {
        let clock = SystemClock::from_offset_hours(Some(-5)).unwrap();
        let expected = OffsetDateTime::now_utc()
            .to_offset(UtcOffset::from_hms(-5, 0, 0).unwrap())
            .date();
        // Tolerate a midnight rollover between the two reads.
        let today = clock.today();
        assert!(today == expected || today == expected.next_day().unwrap());
    }

    #[test]
    fn out_of_range_offset_is_rejected() {
        assert!(SystemClock::from_offset_hours(Some(30)).is_err());
    }
}
