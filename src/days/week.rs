use lazy_static::lazy_static;
use regex::Regex;
use time::{Date, Month};

const MONTH_ABBREVIATIONS: [(&str, Month); 12] = [
    ("JAN", Month::January),
    ("FEB", Month::February),
    ("MAR", Month::March),
    ("APR", Month::April),
    ("MAY", Month::May),
    ("JUN", Month::June),
    ("JUL", Month::July),
    ("AUG", Month::August),
    ("SEPT", Month::September),
    ("OCT", Month::October),
    ("NOV", Month::November),
    ("DEC", Month::December),
];

/// A week tag broken into the parts the matcher needs.
#[derive(Debug, Clone, PartialEq, Eq)]
struct WeekRange {
    first: Month,
    /// Set for tags spanning two months (`[MARCH & APR] 31-6`).
    second: Option<Month>,
    start: u8,
    end: u8,
}

impl WeekRange {
    fn parse(tag: &str) -> Option<Self> {
        lazy_static! {
            static ref RANGE_RE: Regex = Regex::new(r"(\d{1,2})\s*-\s*(\d{1,2})").unwrap();
        }
        let caps = RANGE_RE.captures(tag)?;
        let start = caps[1].parse().ok()?;
        let end = caps[2].parse().ok()?;

        let upper = tag.to_uppercase();
        let (first, second) = match upper.split_once('&') {
            Some((left, right)) => (month_in(left)?, Some(month_in(right)?)),
            None => (month_in(&upper)?, None),
        };
        Some(Self {
            first,
            second,
            start,
            end,
        })
    }

    fn contains(&self, date: Date) -> bool {
        let day = date.day();
        match self.second {
            Some(second) => {
                (date.month() == self.first && day >= self.start)
                    || (date.month() == second && day <= self.end)
            }
            None => date.month() == self.first && (self.start..=self.end).contains(&day),
        }
    }
}

/// Earliest month abbreviation appearing in `text`.
fn month_in(text: &str) -> Option<Month> {
    MONTH_ABBREVIATIONS
        .iter()
        .filter_map(|(abbr, month)| text.find(abbr).map(|pos| (pos, *month)))
        .min_by_key(|(pos, _)| *pos)
        .map(|(_, month)| month)
}

/// First tag in `tags` whose embedded day range covers `date`.
pub fn match_week_tag(date: Date, tags: &[String]) -> Option<&str> {
    tags.iter()
        .map(String::as_str)
        .find(|tag| WeekRange::parse(tag).is_some_and(|range| range.contains(date)))
}
