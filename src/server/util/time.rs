//! Date calculation utilities.
//!
//! This module provides the date arithmetic used by leave requests, analytics windows and
//! reminder jobs. All calculations operate on `NaiveDate` values in UTC.

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::{model::performance::ReportPeriod, server::error::Error};

/// Today's date in UTC.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// The current UTC time without timezone, as stored in timestamp columns.
pub fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

/// Number of calendar days covered by a leave request, counting both endpoints.
///
/// # Arguments
/// - `start` - First day of leave
/// - `end` - Last day of leave, not before `start`
///
/// # Returns
/// The inclusive day count, e.g. 2024-12-20 to 2024-12-24 is 5 days
pub fn inclusive_days(start: NaiveDate, end: NaiveDate) -> i32 {
    ((end - start).num_days() + 1) as i32
}

/// First date included in an analytics or report window ending `today`.
///
/// # Arguments
/// - `period` - Length of the window
/// - `today` - Last date of the window
///
/// # Returns
/// - `Ok(NaiveDate)` - One month, three months or one year before `today`
/// - `Err(Error::ParseError)` - The subtraction fell outside chrono's supported range
pub fn period_start(period: ReportPeriod, today: NaiveDate) -> Result<NaiveDate, Error> {
    months_before(today, period_months(period))
}

fn period_months(period: ReportPeriod) -> u32 {
    match period {
        ReportPeriod::CurrentMonth => 1,
        ReportPeriod::CurrentQuarter => 3,
        ReportPeriod::CurrentYear => 12,
    }
}

/// The date `months` calendar months before `date`, clamped to the end of shorter months.
pub fn months_before(date: NaiveDate, months: u32) -> Result<NaiveDate, Error> {
    date.checked_sub_months(Months::new(months)).ok_or_else(|| {
        Error::ParseError(format!("Failed to subtract {} months from {}", months, date))
    })
}

/// Midnight at the start of `date`.
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Whether `date` falls on the same month and day as `today`.
pub fn is_same_day_of_year(date: NaiveDate, today: NaiveDate) -> bool {
    date.month() == today.month() && date.day() == today.day()
}

/// Completed years between `hire_date` and `today`.
pub fn years_of_service(hire_date: NaiveDate, today: NaiveDate) -> i32 {
    let mut years = today.year() - hire_date.year();
    if (today.month(), today.day()) < (hire_date.month(), hire_date.day()) {
        years -= 1;
    }
    years
}

/// Formats a date as `YYYY-MM`, used to bucket work hours by month.
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Expect both endpoints to be counted
    #[test]
    fn inclusive_days_counts_both_ends() {
        assert_eq!(inclusive_days(date(2024, 12, 20), date(2024, 12, 24)), 5);
        assert_eq!(inclusive_days(date(2024, 3, 1), date(2024, 3, 1)), 1);
    }

    /// Expect inclusive day counts to cross month and leap day boundaries
    #[test]
    fn inclusive_days_across_leap_day() {
        assert_eq!(inclusive_days(date(2024, 2, 27), date(2024, 3, 1)), 4);
    }

    /// Expect each period to step back by whole calendar months
    #[test]
    fn period_start_steps_back_by_months() -> Result<(), crate::server::error::Error> {
        let today = date(2025, 5, 31);

        assert_eq!(period_start(ReportPeriod::CurrentMonth, today)?, date(2025, 4, 30));
        assert_eq!(period_start(ReportPeriod::CurrentQuarter, today)?, date(2025, 2, 28));
        assert_eq!(period_start(ReportPeriod::CurrentYear, today)?, date(2024, 5, 31));

        Ok(())
    }

    /// Expect years of service to only increment on or after the anniversary
    #[test]
    fn years_of_service_respects_anniversary() {
        let hired = date(2020, 6, 15);

        assert_eq!(years_of_service(hired, date(2025, 6, 14)), 4);
        assert_eq!(years_of_service(hired, date(2025, 6, 15)), 5);
    }

    #[test]
    fn month_key_is_zero_padded() {
        assert_eq!(month_key(date(2025, 3, 9)), "2025-03");
    }
}
