use crate::types::traits::types::{Month, StartEndDate, Year};
use crate::types::traits::utils::last_day_of_month;
use chrono::NaiveDate;

/// Anything that can be resolved into an inclusive day range: a single date,
/// a [`Year`], a [`Month`], or a string such as `"2021-06-01"`, `"2021-06"` or `"2021"`.
pub trait AnyDate {
    fn get_date_range(self) -> Option<StartEndDate>;
}

impl AnyDate for NaiveDate {
    fn get_date_range(self) -> Option<StartEndDate> {
        Some(StartEndDate {
            start: self,
            end: self,
        })
    }
}

impl AnyDate for &str {
    fn get_date_range(self) -> Option<StartEndDate> {
        let trimmed = self.trim();
        if let Ok(naive_date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            return naive_date.get_date_range();
        }
        if let Some((year, month)) = trimmed.split_once('-') {
            let year = year.parse::<i32>().ok()?;
            let month = month.parse::<u32>().ok()?;
            return Month(year, month).get_date_range();
        }
        trimmed.parse::<i32>().ok().and_then(|y| Year(y).get_date_range())
    }
}

impl AnyDate for String {
    fn get_date_range(self) -> Option<StartEndDate> {
        self.as_str().get_date_range()
    }
}

impl AnyDate for Year {
    fn get_date_range(self) -> Option<StartEndDate> {
        Some(StartEndDate {
            start: NaiveDate::from_ymd_opt(self.0, 1, 1)?,
            end: NaiveDate::from_ymd_opt(self.0, 12, 31)?,
        })
    }
}

impl AnyDate for Month {
    fn get_date_range(self) -> Option<StartEndDate> {
        Some(StartEndDate {
            start: NaiveDate::from_ymd_opt(self.year(), self.month(), 1)?,
            end: last_day_of_month(self.year(), self.month())?,
        })
    }
}
