//! Calendar helpers.
//!
//! Dates travel as `dd/mm/yyyy` text at the edges and as [`NaiveDate`]
//! inside the engine. Every rule that depends on "today" has an `_on`
//! variant taking the reference date explicitly, which is what the engine
//! calls with its [`Clock`].

use chrono::{Datelike, Local, Months, NaiveDate};
use serde::{Deserialize, Serialize};

pub const DATE_FORMAT: &str = "%d/%m/%Y";
pub const MIN_YEAR: i32 = 1900;
pub const GOAL_HORIZON_YEARS: u32 = 50;

/// Source of "today" for date rules and dashboard periods.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Clock {
    #[default]
    System,
    Fixed(NaiveDate),
}

impl Clock {
    pub fn today(self) -> NaiveDate {
        match self {
            Clock::System => Local::now().date_naive(),
            Clock::Fixed(date) => date,
        }
    }
}

/// Parse a `dd/mm/yyyy` string into a real calendar date.
///
/// Returns `None` on a wrong number of fields, non numeric fields, impossible
/// dates (31/02, 29/02 on non leap years) and years before [`MIN_YEAR`].
/// Single digit days and months (`1/3/2024`) are accepted.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let mut parts = text.trim().split('/');
    let day = numeric_field(parts.next()?)?;
    let month = numeric_field(parts.next()?)?;
    let year = numeric_field(parts.next()?)?;
    if parts.next().is_some() {
        return None;
    }

    let year = i32::try_from(year).ok()?;
    if year < MIN_YEAR {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

fn numeric_field(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Well formed date with a year between [`MIN_YEAR`] and the current year.
pub fn is_valid_date(text: &str) -> bool {
    is_valid_date_on(text, Clock::System.today())
}

pub fn is_valid_date_on(text: &str, today: NaiveDate) -> bool {
    parse_date(text).is_some_and(|date| date.year() <= today.year())
}

/// Same as [`is_valid_date`] and not after today.
pub fn is_past_or_today(text: &str) -> bool {
    is_past_or_today_on(text, Clock::System.today())
}

pub fn is_past_or_today_on(text: &str, today: NaiveDate) -> bool {
    parse_date(text).is_some_and(|date| date <= today)
}

/// Strictly after today and no later than today plus `max_years` years.
pub fn is_valid_goal_date(text: &str, max_years: u32) -> bool {
    is_valid_goal_date_on(text, max_years, Clock::System.today())
}

pub fn is_valid_goal_date_on(text: &str, max_years: u32, today: NaiveDate) -> bool {
    let Some(date) = parse_date(text) else {
        return false;
    };
    let Some(horizon) = today.checked_add_months(Months::new(max_years.saturating_mul(12))) else {
        return false;
    };
    date > today && date <= horizon
}

/// A (month, year) pair used to filter transactions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub month: u32,
    pub year: i32,
}

impl Period {
    pub fn new(month: u32, year: i32) -> Self {
        Self { month, year }
    }

    pub fn of(date: NaiveDate) -> Self {
        Self::new(date.month(), date.year())
    }

    /// Day of month is ignored.
    pub fn contains(self, date: NaiveDate) -> bool {
        date.month() == self.month && date.year() == self.year
    }

    /// The month before, rolling January back to December of the prior year.
    pub fn previous(self) -> Self {
        if self.month <= 1 {
            Self::new(12, self.year - 1)
        } else {
            Self::new(self.month - 1, self.year)
        }
    }
}

/// Serde adapter storing a [`NaiveDate`] as `dd/mm/yyyy`.
pub mod dmy {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_date(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_date(&raw).ok_or_else(|| D::Error::custom(format!("invalid date: {raw}")))
    }
}
