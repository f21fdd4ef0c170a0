use chrono::{Datelike, NaiveDate};

/// Calendar (year, month) pair used to join series. Built straight from the
/// date components, so no timezone can move a record into a neighbouring month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    fn ordinal(&self) -> i64 {
        self.year as i64 * 12 + self.month as i64 - 1
    }
}

pub fn months_between(start: MonthKey, end: MonthKey) -> i64 {
    end.ordinal() - start.ordinal()
}

/// "Jan 2024" style label.
pub fn month_label(date: NaiveDate) -> String {
    date.format("%b %Y").to_string()
}

pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Percentage change from `first` to `last`.
///
/// Returns `None` when the baseline is zero or the result is not finite,
/// so callers have to decide what an unmeasurable change means.
pub fn growth_rate(first: f64, last: f64) -> Option<f64> {
    if first == 0.0 {
        return None;
    }
    let rate = (last - first) / first * 100.0;
    rate.is_finite().then_some(rate)
}

/// `part` as a percentage of `whole`, with the same zero handling as [`growth_rate`].
pub fn percentage_of(part: f64, whole: f64) -> Option<f64> {
    if whole == 0.0 {
        return None;
    }
    let rate = part / whole * 100.0;
    rate.is_finite().then_some(rate)
}

/// Parses the date formats seen in exported spreadsheets.
/// Date-times keep their calendar date; the time and offset are ignored.
pub fn parse_flexible_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let date_part = raw.split(['T', ' ']).next().unwrap_or(raw);

    const FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
    for format in FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(date_part, format) {
            return Some(date);
        }
    }

    // Month-only values such as "2024-03" refer to the first of the month
    NaiveDate::parse_from_str(&format!("{}-01", date_part), "%Y-%m-%d").ok()
}
