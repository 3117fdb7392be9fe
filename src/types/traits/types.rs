use chrono::NaiveDate;
use std::fmt;
use std::fmt::{Display, Formatter};

/// A calendar year, used to slice datasets and comparison tables.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Hash)]
pub struct Year(pub i32);
impl Year {
    pub fn get(self) -> i32 {
        self.0
    }
}

impl Display for Year {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

/// A calendar month within a specific year.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Hash)]
pub struct Month(pub i32, pub u32);
impl Month {
    pub fn year(self) -> i32 {
        self.0
    }
    pub fn month(self) -> u32 {
        self.1
    }
    pub fn new(month: u32, year: i32) -> Self {
        Self(year, month)
    }
}

impl Display for Month {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.0, self.1)
    }
}

/// Inclusive date bounds resolved from an [`crate::AnyDate`] or [`crate::DatePeriod`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct StartEndDate {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl StartEndDate {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_end_date_contains_is_inclusive() {
        let day = |m, d| NaiveDate::from_ymd_opt(2024, m, d).unwrap();
        let bounds = StartEndDate {
            start: day(3, 1),
            end: day(3, 31),
        };
        assert!(bounds.contains(day(3, 1)));
        assert!(bounds.contains(day(3, 15)));
        assert!(bounds.contains(day(3, 31)));
        assert!(!bounds.contains(day(2, 29)));
        assert!(!bounds.contains(day(4, 1)));
    }
}
