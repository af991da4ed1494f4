use chrono::{Duration, Local, NaiveDate};
use std::fmt;

/// A schedule date: either "whatever today is when the request is made"
/// or a concrete calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameDate {
    Now,
    Date(NaiveDate),
}

impl GameDate {
    pub fn today() -> Self {
        GameDate::Date(Local::now().date_naive())
    }

    /// Resolve to a concrete date. `Now` resolves at call time.
    pub fn resolve(&self) -> NaiveDate {
        match self {
            GameDate::Now => Local::now().date_naive(),
            GameDate::Date(d) => *d,
        }
    }

    pub fn add_days(&self, days: i64) -> Self {
        GameDate::Date(self.resolve() + Duration::days(days))
    }

    /// Format as the `YYYY-MM-DD` path segment the backend expects.
    pub fn to_api_string(&self) -> String {
        self.resolve().format("%Y-%m-%d").to_string()
    }
}

impl fmt::Display for GameDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_api_string())
    }
}
