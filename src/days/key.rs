use time::Date;

/// Canonical record key for a date: `"YYYY / MM / DD"`.
pub fn day_key(date: Date) -> String {
    format!(
        "{} / {:02} / {:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// The calendar day before `date`, rolling over month and year boundaries.
pub fn previous_day(date: Date) -> Date {
    date.previous_day().unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn key_is_zero_padded_with_spaced_slashes() {
        assert_eq!(day_key(date!(2024 - 03 - 07)), "2024 / 03 / 07");
        assert_eq!(day_key(date!(2023 - 12 - 31)), "2023 / 12 / 31");
    }

    #[test]
    fn previous_day_rolls_over_month_and_year() {
        assert_eq!(previous_day(date!(2024 - 03 - 07)), date!(2024 - 03 - 06));
        assert_eq!(previous_day(date!(2024 - 03 - 01)), date!(2024 - 02 - 29));
        assert_eq!(previous_day(date!(2024 - 01 - 01)), date!(2023 - 12 - 31));
        assert_eq!(day_key(previous_day(date!(2024 - 01 - 01))), "2023 / 12 / 31");
    }
}
