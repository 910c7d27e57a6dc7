//! Calendar arithmetic for one bucket unit.
//!
//! An [`Interval`] is built from a parsed bucket keyword and cadence. It knows how to
//! snap a date to the start of its bucket and how to step forwards or backwards by
//! whole units. Every function here is pure and takes its dates explicitly.
//!
//! # Arithmetic rules
//!
//! | Unit  | Start of bucket          | Step                                          |
//! |-------|--------------------------|-----------------------------------------------|
//! | day   | the date itself          | n days                                        |
//! | week  | most recent week start   | 7·n days                                      |
//! | month | day 1 of the month       | n months, day clamped to the month length     |
//! | year  | January 1                | n years, Feb 29 → Mar 1 in non-leap years     |

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use serde::Serialize;

use crate::bucket::Unit;
use crate::error::{BucketError, Result};

// ── Configurable week start ─────────────────────────────────────────────────

/// Which day begins a week for week-bucket alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStartDay {
    /// US/Canada convention (Sunday = day 0 of the week).
    #[default]
    Sunday,
    /// ISO 8601 standard (Monday = day 0 of the week).
    Monday,
}

/// Options for phrase resolution.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Which day starts the week for week buckets.
    pub week_start: WeekStartDay,
}

/// How many days `weekday` is from the week-start day.
fn days_from_week_start(weekday: Weekday, week_start: WeekStartDay) -> u64 {
    match week_start {
        WeekStartDay::Monday => weekday.num_days_from_monday() as u64,
        WeekStartDay::Sunday => weekday.num_days_from_sunday() as u64,
    }
}

// ── Interval ────────────────────────────────────────────────────────────────

/// Date arithmetic for a single bucket unit, parameterized by the keyword that
/// selected it and a cadence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interval {
    unit: Unit,
    bucket: String,
    cadence: u32,
    week_start: WeekStartDay,
}

impl Interval {
    /// Select the interval for a bucket keyword.
    ///
    /// The keyword is kept verbatim: `"weekly"` and `"week"` both select [`Unit::Week`],
    /// but only the former aligns dates to the start of the week.
    ///
    /// # Errors
    ///
    /// Returns [`BucketError::UnsupportedBucket`] if the keyword is not in the unit table.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use date_buckets::bucket::Unit;
    /// use date_buckets::interval::{Interval, WeekStartDay};
    ///
    /// let weekly = Interval::resolve("weekly", 1, WeekStartDay::Sunday).unwrap();
    /// assert_eq!(weekly.unit(), Unit::Week);
    ///
    /// let monday = NaiveDate::from_ymd_opt(2022, 11, 21).unwrap();
    /// let sunday = NaiveDate::from_ymd_opt(2022, 11, 20).unwrap();
    /// assert_eq!(weekly.get_start_date(monday), sunday);
    /// ```
    pub fn resolve(bucket: &str, cadence: u32, week_start: WeekStartDay) -> Result<Self> {
        let unit = Unit::from_keyword(bucket)?;
        Ok(Self {
            unit,
            bucket: bucket.to_string(),
            cadence,
            week_start,
        })
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// The keyword this interval was resolved from.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn cadence(&self) -> u32 {
        self.cadence
    }

    pub fn week_start(&self) -> WeekStartDay {
        self.week_start
    }

    /// Whether [`get_start_date`](Self::get_start_date) snaps dates for this keyword.
    pub fn aligns(&self) -> bool {
        self.unit.is_aligning(&self.bucket)
    }

    /// Snap `date` to the start of its bucket if the keyword calls for it,
    /// otherwise return it unchanged.
    pub fn get_start_date(&self, date: NaiveDate) -> NaiveDate {
        if self.aligns() {
            self.start_of_bucket(date)
        } else {
            date
        }
    }

    /// The first day of the bucket containing `date`, regardless of keyword.
    pub fn start_of_bucket(&self, date: NaiveDate) -> NaiveDate {
        match self.unit {
            Unit::Day => date,
            Unit::Week => {
                let back = days_from_week_start(date.weekday(), self.week_start);
                date.checked_sub_days(Days::new(back)).unwrap_or(NaiveDate::MIN)
            }
            Unit::Month => date - Days::new(u64::from(date.day0())),
            Unit::Year => date - Days::new(u64::from(date.ordinal0())),
        }
    }

    /// Move `date` forward by `n` units.
    ///
    /// # Errors
    ///
    /// Returns [`BucketError::OutOfRange`] if the result is not representable.
    pub fn add_interval(&self, date: NaiveDate, n: u32) -> Result<NaiveDate> {
        let shifted = match self.unit {
            Unit::Day => date.checked_add_days(Days::new(u64::from(n))),
            Unit::Week => date.checked_add_days(Days::new(7 * u64::from(n))),
            Unit::Month => date.checked_add_months(Months::new(n)),
            Unit::Year => i32::try_from(n)
                .ok()
                .and_then(|years| shift_years(date, years)),
        };
        shifted.ok_or_else(|| self.out_of_range(date, '+', n))
    }

    /// Move `date` backward by `n` units.
    ///
    /// # Errors
    ///
    /// Returns [`BucketError::OutOfRange`] if the result is not representable.
    pub fn subtract_interval(&self, date: NaiveDate, n: u32) -> Result<NaiveDate> {
        let shifted = match self.unit {
            Unit::Day => date.checked_sub_days(Days::new(u64::from(n))),
            Unit::Week => date.checked_sub_days(Days::new(7 * u64::from(n))),
            Unit::Month => date.checked_sub_months(Months::new(n)),
            Unit::Year => i32::try_from(n)
                .ok()
                .and_then(|years| shift_years(date, -years)),
        };
        shifted.ok_or_else(|| self.out_of_range(date, '-', n))
    }

    /// One cadence step forward from `date`.
    pub fn step(&self, date: NaiveDate) -> Result<NaiveDate> {
        self.add_interval(date, self.cadence)
    }

    fn out_of_range(&self, date: NaiveDate, sign: char, n: u32) -> BucketError {
        BucketError::OutOfRange(format!("{date} {sign} {n} {}(s)", self.unit))
    }
}

/// Same month and day `years` away; a Feb 29 that does not exist in the
/// destination year becomes Mar 1.
fn shift_years(date: NaiveDate, years: i32) -> Option<NaiveDate> {
    let year = date.year().checked_add(years)?;
    NaiveDate::from_ymd_opt(year, date.month(), date.day()).or_else(|| {
        if date.month() == 2 && date.day() == 29 {
            NaiveDate::from_ymd_opt(year, 3, 1)
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn interval(bucket: &str, cadence: u32) -> Interval {
        Interval::resolve(bucket, cadence, WeekStartDay::Sunday).unwrap()
    }

    // ── factory tests ───────────────────────────────────────────────────

    #[test]
    fn test_resolve_selects_unit_for_every_spelling() {
        for entry in &crate::bucket::KEYWORD_TABLE {
            for spelling in entry.spellings {
                let resolved = interval(spelling, 1);
                assert_eq!(resolved.unit(), entry.unit, "{spelling}");
                assert_eq!(resolved.bucket(), *spelling);
            }
        }
    }

    #[test]
    fn test_resolve_unsupported_bucket() {
        for word in ["quarterly", "termly", "biannually"] {
            let err = Interval::resolve(word, 1, WeekStartDay::Sunday).unwrap_err();
            assert!(matches!(err, BucketError::UnsupportedBucket(_)), "{word}");
            assert!(err.to_string().contains(word), "got: {err}");
        }
    }

    #[test]
    fn test_resolve_keeps_cadence_and_week_start() {
        let resolved = Interval::resolve("week", 3, WeekStartDay::Monday).unwrap();
        assert_eq!(resolved.cadence(), 3);
        assert_eq!(resolved.week_start(), WeekStartDay::Monday);
    }

    // ── alignment tests ─────────────────────────────────────────────────

    #[test]
    fn test_week_start_from_monday_is_previous_sunday() {
        let weekly = interval("weekly", 1);
        assert_eq!(weekly.get_start_date(date(2022, 11, 21)), date(2022, 11, 20));
    }

    #[test]
    fn test_week_start_on_sunday_is_unchanged() {
        let weekly = interval("this_week", 0);
        assert_eq!(weekly.get_start_date(date(2022, 11, 20)), date(2022, 11, 20));
    }

    #[test]
    fn test_week_start_from_saturday() {
        let weekly = interval("last_week", 1);
        assert_eq!(weekly.get_start_date(date(2022, 11, 26)), date(2022, 11, 20));
    }

    #[test]
    fn test_week_start_monday_option() {
        let weekly = Interval::resolve("weekly", 1, WeekStartDay::Monday).unwrap();
        assert_eq!(weekly.get_start_date(date(2022, 11, 21)), date(2022, 11, 21));
        assert_eq!(weekly.get_start_date(date(2022, 11, 20)), date(2022, 11, 14));
    }

    #[test]
    fn test_week_start_crosses_year_boundary() {
        // Tuesday 2023-01-03 → Sunday 2023-01-01; Saturday 2022-12-31 → Sunday 2022-12-25
        let weekly = interval("weekly", 1);
        assert_eq!(weekly.get_start_date(date(2023, 1, 3)), date(2023, 1, 1));
        assert_eq!(weekly.get_start_date(date(2022, 12, 31)), date(2022, 12, 25));
    }

    #[test]
    fn test_month_start() {
        let monthly = interval("monthly", 1);
        assert_eq!(monthly.get_start_date(date(2022, 11, 9)), date(2022, 11, 1));
        assert_eq!(monthly.get_start_date(date(2024, 2, 29)), date(2024, 2, 1));
    }

    #[test]
    fn test_year_start() {
        let yearly = interval("yearly", 1);
        assert_eq!(yearly.get_start_date(date(2022, 11, 9)), date(2022, 1, 1));
        assert_eq!(yearly.get_start_date(date(2024, 12, 31)), date(2024, 1, 1));
    }

    #[test]
    fn test_day_never_aligns() {
        for bucket in ["day", "today", "yesterday"] {
            let daily = interval(bucket, 1);
            assert!(!daily.aligns());
            assert_eq!(daily.get_start_date(date(2022, 11, 9)), date(2022, 11, 9));
        }
    }

    #[test]
    fn test_bare_units_skip_alignment() {
        for bucket in ["week", "month", "year"] {
            let bare = interval(bucket, 2);
            assert!(!bare.aligns(), "{bucket}");
            assert_eq!(bare.get_start_date(date(2022, 11, 9)), date(2022, 11, 9));
        }
    }

    #[test]
    fn test_start_of_bucket_ignores_keyword() {
        assert_eq!(interval("year", 1).start_of_bucket(date(2022, 11, 9)), date(2022, 1, 1));
        assert_eq!(interval("month", 1).start_of_bucket(date(2022, 11, 9)), date(2022, 11, 1));
        assert_eq!(interval("week", 1).start_of_bucket(date(2022, 11, 9)), date(2022, 11, 6));
    }

    // ── arithmetic tests ────────────────────────────────────────────────

    #[test]
    fn test_day_add_subtract() {
        let daily = interval("day", 1);
        assert_eq!(daily.add_interval(date(2022, 12, 31), 1).unwrap(), date(2023, 1, 1));
        assert_eq!(daily.subtract_interval(date(2022, 3, 1), 1).unwrap(), date(2022, 2, 28));
        assert_eq!(daily.add_interval(date(2022, 3, 1), 0).unwrap(), date(2022, 3, 1));
    }

    #[test]
    fn test_week_add_subtract() {
        let weekly = interval("week", 1);
        assert_eq!(weekly.add_interval(date(2022, 11, 6), 1).unwrap(), date(2022, 11, 13));
        assert_eq!(weekly.add_interval(date(2022, 12, 25), 2).unwrap(), date(2023, 1, 8));
        assert_eq!(weekly.subtract_interval(date(2022, 11, 21), 2).unwrap(), date(2022, 11, 7));
    }

    #[test]
    fn test_month_add_clamps_day() {
        let monthly = interval("month", 1);
        assert_eq!(monthly.add_interval(date(2023, 1, 31), 1).unwrap(), date(2023, 2, 28));
        assert_eq!(monthly.add_interval(date(2024, 1, 31), 1).unwrap(), date(2024, 2, 29));
        assert_eq!(monthly.add_interval(date(2022, 11, 1), 2).unwrap(), date(2023, 1, 1));
    }

    #[test]
    fn test_month_subtract_clamps_day() {
        let monthly = interval("month", 1);
        assert_eq!(monthly.subtract_interval(date(2022, 3, 31), 1).unwrap(), date(2022, 2, 28));
        assert_eq!(monthly.subtract_interval(date(2022, 1, 15), 2).unwrap(), date(2021, 11, 15));
    }

    #[test]
    fn test_year_add_subtract() {
        let yearly = interval("year", 1);
        assert_eq!(yearly.add_interval(date(2022, 11, 9), 2).unwrap(), date(2024, 11, 9));
        assert_eq!(yearly.subtract_interval(date(2022, 1, 1), 1).unwrap(), date(2021, 1, 1));
    }

    #[test]
    fn test_year_leap_day_rolls_to_march_first() {
        let yearly = interval("year", 1);
        assert_eq!(yearly.add_interval(date(2024, 2, 29), 1).unwrap(), date(2025, 3, 1));
        assert_eq!(yearly.subtract_interval(date(2024, 2, 29), 1).unwrap(), date(2023, 3, 1));
        assert_eq!(yearly.add_interval(date(2024, 2, 29), 4).unwrap(), date(2028, 2, 29));
    }

    #[test]
    fn test_leap_day_round_trip_is_not_invertible() {
        // Feb 29 + 1 year = Mar 1; Mar 1 - 1 year = Mar 1.
        let yearly = interval("year", 1);
        let there = yearly.add_interval(date(2024, 2, 29), 1).unwrap();
        let back = yearly.subtract_interval(there, 1).unwrap();
        assert_eq!(back, date(2024, 3, 1));
    }

    #[test]
    fn test_step_uses_cadence() {
        let two_months = interval("month", 2);
        assert_eq!(two_months.step(date(2022, 11, 9)).unwrap(), date(2023, 1, 9));
    }

    #[test]
    fn test_out_of_range() {
        let yearly = interval("year", 1);
        let err = yearly.add_interval(NaiveDate::MAX, 1).unwrap_err();
        assert!(matches!(err, BucketError::OutOfRange(_)), "got: {err}");

        let daily = interval("day", 1);
        let err = daily.subtract_interval(NaiveDate::MIN, 1).unwrap_err();
        assert!(matches!(err, BucketError::OutOfRange(_)), "got: {err}");
    }

    // ── property tests ──────────────────────────────────────────────────

    fn any_date() -> impl Strategy<Value = NaiveDate> {
        (1900i32..2200, 1u32..=12, 1u32..=31)
            .prop_map(|(y, m, d)| {
                NaiveDate::from_ymd_opt(y, m, d)
                    .unwrap_or_else(|| NaiveDate::from_ymd_opt(y, m, 28).unwrap())
            })
    }

    proptest! {
        #[test]
        fn prop_day_and_week_round_trip(d in any_date(), n in 0u32..2000) {
            for bucket in ["day", "week"] {
                let iv = interval(bucket, 1);
                let there = iv.add_interval(d, n).unwrap();
                prop_assert_eq!(iv.subtract_interval(there, n).unwrap(), d);
            }
        }

        #[test]
        fn prop_month_round_trip_for_early_days(d in any_date(), n in 0u32..600) {
            prop_assume!(d.day() <= 28);
            let iv = interval("month", 1);
            let there = iv.add_interval(d, n).unwrap();
            prop_assert_eq!(iv.subtract_interval(there, n).unwrap(), d);
        }

        #[test]
        fn prop_year_round_trip_except_leap_day(d in any_date(), n in 0u32..100) {
            prop_assume!(!(d.month() == 2 && d.day() == 29));
            let iv = interval("year", 1);
            let there = iv.add_interval(d, n).unwrap();
            prop_assert_eq!(iv.subtract_interval(there, n).unwrap(), d);
        }

        #[test]
        fn prop_start_of_bucket_is_on_or_before(d in any_date()) {
            for bucket in ["weekly", "monthly", "yearly"] {
                let iv = interval(bucket, 1);
                let start = iv.get_start_date(d);
                prop_assert!(start <= d);
                prop_assert_eq!(iv.get_start_date(start), start);
            }
        }

        #[test]
        fn prop_week_start_lands_on_week_start_day(d in any_date()) {
            let sunday = Interval::resolve("weekly", 1, WeekStartDay::Sunday).unwrap();
            let monday = Interval::resolve("weekly", 1, WeekStartDay::Monday).unwrap();
            prop_assert_eq!(sunday.get_start_date(d).weekday(), Weekday::Sun);
            prop_assert_eq!(monday.get_start_date(d).weekday(), Weekday::Mon);
            prop_assert!((d - sunday.get_start_date(d)).num_days() < 7);
        }
    }
}
