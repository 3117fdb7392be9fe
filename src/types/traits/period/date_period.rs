use crate::types::traits::any::any_date::AnyDate;
use crate::types::traits::types::{Month, StartEndDate, Year};
use chrono::NaiveDate;
use std::ops::RangeInclusive;

/// A span of days used to slice a dataset, e.g. a [`Year`] or a [`Month`].
pub trait DatePeriod {
    fn get_date_period(self) -> Option<StartEndDate>;
}

impl DatePeriod for Year {
    fn get_date_period(self) -> Option<StartEndDate> {
        self.get_date_range()
    }
}

impl DatePeriod for Month {
    fn get_date_period(self) -> Option<StartEndDate> {
        self.get_date_range()
    }
}

impl DatePeriod for RangeInclusive<NaiveDate> {
    fn get_date_period(self) -> Option<StartEndDate> {
        let (start, end) = self.into_inner();
        (start <= end).then_some(StartEndDate { start, end })
    }
}
