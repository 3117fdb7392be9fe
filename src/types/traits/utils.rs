use chrono::NaiveDate;

/// Last calendar day of `month` in `year`, or `None` for an invalid month.
pub(crate) fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let first_of_next = match month {
        1..=11 => NaiveDate::from_ymd_opt(year, month + 1, 1)?,
        12 => NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?,
        _ => return None,
    };
    first_of_next.pred_opt()
}
