//! The month and year that a budget covers.

use std::fmt::Display;

use serde::Deserialize;
use time::{Date, Month};

use crate::Error;

/// The earliest year a budget can be planned for.
pub const MIN_YEAR: i32 = 1;
/// The latest year a budget can be planned for.
pub const MAX_YEAR: i32 = 9999;

/// A budget period, e.g. January 2025.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BudgetPeriod {
    year: i32,
    month: Month,
}

impl BudgetPeriod {
    /// Create a budget period from a month number (1-12) and a year.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidMonth] if `month` is not between 1 and 12, or
    /// [Error::InvalidYear] if `year` is not between [MIN_YEAR] and [MAX_YEAR].
    pub fn new(month: u8, year: i32) -> Result<Self, Error> {
        let month = Month::try_from(month).map_err(|_| Error::InvalidMonth(month))?;

        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(Error::InvalidYear(year));
        }

        Ok(Self { year, month })
    }

    /// The budget period containing `date`.
    pub fn containing(date: Date) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The month number, 1 for January through to 12 for December.
    pub fn month_number(&self) -> u8 {
        self.month.into()
    }

    /// The year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The period one month earlier.
    pub fn previous(&self) -> Self {
        let year = if self.month == Month::January {
            self.year - 1
        } else {
            self.year
        };

        Self {
            year,
            month: self.month.previous(),
        }
    }

    /// The period one month later.
    pub fn next(&self) -> Self {
        let year = if self.month == Month::December {
            self.year + 1
        } else {
            self.year
        };

        Self {
            year,
            month: self.month.next(),
        }
    }

    /// Whether `date` falls within this period.
    pub fn contains(&self, date: Date) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl Display for BudgetPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.month, self.year)
    }
}

/// Query parameters that select a budget period, e.g. `?month=1&year=2025`.
///
/// Missing parameters default to the current month.
#[derive(Debug, Default, Deserialize)]
pub struct BudgetPeriodQuery {
    /// The month number, 1 for January through to 12 for December.
    pub month: Option<u8>,
    /// The year, e.g. 2025.
    pub year: Option<i32>,
}

impl BudgetPeriodQuery {
    /// Resolve the query to a budget period, filling in missing parts from
    /// `today`.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidMonth] if the month is not between 1 and 12, or
    /// [Error::InvalidYear] if the year is out of range.
    pub fn resolve(&self, today: Date) -> Result<BudgetPeriod, Error> {
        let current = BudgetPeriod::containing(today);

        BudgetPeriod::new(
            self.month.unwrap_or(current.month_number()),
            self.year.unwrap_or(current.year()),
        )
    }
}
