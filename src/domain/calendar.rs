use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// A calendar month with no day component
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Add a signed number of months, saturating at the supported date range
    pub fn plus_months(&self, delta: i64) -> Self {
        let index = self.year as i64 * 12 + (self.month as i64 - 1) + delta;
        let min = NaiveDate::MIN.year() as i64 * 12;
        let max = NaiveDate::MAX.year() as i64 * 12 + 11;
        let index = index.clamp(min, max);
        Self {
            year: index.div_euclid(12) as i32,
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn length_of_month(&self) -> u32 {
        let (year, month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        match NaiveDate::from_ymd_opt(year, month, 1) {
            Some(next) => next.signed_duration_since(self.first_day()).num_days() as u32,
            // December of the last supported year
            None => 31,
        }
    }

    /// Date for a 1-based day of this month
    pub fn at_day(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Signed number of months from `self` to `other`
    pub fn months_until(&self, other: YearMonth) -> i64 {
        (other.year as i64 * 12 + other.month as i64) - (self.year as i64 * 12 + self.month as i64)
    }

    /// English month name and year, e.g. "October 2026"
    pub fn title(&self) -> String {
        self.first_day().format("%B %Y").to_string()
    }
}

/// The cells of a month laid out in week rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    /// Blank cells before the first day
    pub start_offset: usize,
    /// Number of week rows
    pub rows: usize,
    /// `rows * 7` cells, `None` for blanks
    pub cells: Vec<Option<NaiveDate>>,
}

impl MonthGrid {
    pub fn build(month: YearMonth, week_start: Weekday) -> Self {
        let first = month.first_day();
        let days = month.length_of_month() as usize;
        let start_offset = (first.weekday().num_days_from_monday() as usize + 7
            - week_start.num_days_from_monday() as usize)
            % 7;
        let total = start_offset + days;
        let rows = total / 7 + usize::from(total % 7 != 0);

        let mut cells = Vec::with_capacity(rows * 7);
        for index in 0..rows * 7 {
            if index < start_offset || index >= total {
                cells.push(None);
            } else {
                cells.push(month.at_day((index - start_offset + 1) as u32));
            }
        }

        Self {
            start_offset,
            rows,
            cells,
        }
    }

    pub fn week(&self, row: usize) -> &[Option<NaiveDate>] {
        let start = (row * 7).min(self.cells.len());
        let end = (start + 7).min(self.cells.len());
        &self.cells[start..end]
    }
}

/// Weekdays in display order starting from `week_start`
pub fn weekday_header(week_start: Weekday) -> [Weekday; 7] {
    let mut days = [week_start; 7];
    for i in 1..7 {
        days[i] = days[i - 1].succ();
    }
    days
}

#[cfg(test)]
impl YearMonth {
    /// `month` is 1-based
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if !(1..=12).contains(&month) {
            return None;
        }
        if year < NaiveDate::MIN.year() || year > NaiveDate::MAX.year() {
            return None;
        }
        Some(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }
}
