//! Calendar month periods used to filter reports.
//!
//! A period covers the half-open range `[first day of month, first day of next month)` so
//! December rolls over into January of the following year.

use chrono::{Datelike, NaiveDate};

use crate::model::dashboard::{MonthDto, PeriodDto};

const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9998;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonthPeriod {
    start: NaiveDate,
}

impl MonthPeriod {
    /// Creates the period for `year`/`month`.
    ///
    /// # Returns
    /// - `Some(MonthPeriod)` - Month is within 1..=12 and year within the supported range
    /// - `None` - Invalid year or month
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return None;
        }

        NaiveDate::from_ymd_opt(year, month, 1).map(|start| Self { start })
    }

    /// The month `date` falls in
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            start: date.with_day(1).unwrap_or(date),
        }
    }

    /// Resolves `year`/`month` query parameters.
    ///
    /// A missing parameter takes its value from `today`. If either parameter is present but does
    /// not parse, or the pair does not form a valid month, the month containing `today` is used.
    pub fn from_params(year: Option<&str>, month: Option<&str>, today: NaiveDate) -> Self {
        let fallback = Self::containing(today);

        let year = match year.map(str::trim).filter(|y| !y.is_empty()) {
            Some(raw) => match raw.parse::<i32>() {
                Ok(year) => year,
                Err(_) => return fallback,
            },
            None => today.year(),
        };

        let month = match month.map(str::trim).filter(|m| !m.is_empty()) {
            Some(raw) => match raw.parse::<u32>() {
                Ok(month) => month,
                Err(_) => return fallback,
            },
            None => today.month(),
        };

        Self::new(year, month).unwrap_or(fallback)
    }

    pub fn year(&self) -> i32 {
        self.start.year()
    }

    pub fn month(&self) -> u32 {
        self.start.month()
    }

    /// Inclusive lower bound
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Exclusive upper bound, the first day of the following month
    pub fn end(&self) -> NaiveDate {
        let (year, month) = if self.month() == 12 {
            (self.year() + 1, 1)
        } else {
            (self.year(), self.month() + 1)
        };

        NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MAX)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start() && date < self.end()
    }

    pub fn next(&self) -> Self {
        Self::containing(self.end())
    }

    pub fn previous(&self) -> Self {
        Self::containing(self.start.pred_opt().unwrap_or(self.start))
    }

    pub fn to_dto(&self) -> PeriodDto {
        let previous = self.previous();
        let next = self.next();

        PeriodDto {
            year: self.year(),
            month: self.month(),
            start: self.start(),
            end: self.end(),
            previous: MonthDto {
                year: previous.year(),
                month: previous.month(),
            },
            next: MonthDto {
                year: next.year(),
                month: next.month(),
            },
        }
    }
}
