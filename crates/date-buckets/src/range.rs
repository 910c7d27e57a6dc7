//! Split a date span into consecutive, aligned buckets.
//!
//! [`BucketRanges`] walks an [`Interval`] from a start date to an end date and yields
//! [`DateRange`]s whose exclusive end is the next range's start, so the output has no
//! gaps and no overlaps. [`FormattedRanges`] renders the same walk as strings.
//!
//! The walk continues while the current start is on or before the end date, so the
//! last bucket always covers the end date and usually extends past it.

use std::fmt::Write as _;
use std::iter::FusedIterator;

use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::error::{BucketError, Result};
use crate::interval::{Interval, ResolveOptions, WeekStartDay};
use crate::phrase::parse_interval_spec;
use crate::resolve::resolve_date_at;

/// Default output format for [`FormattedRanges`].
pub const DEFAULT_FORMAT: &str = "%Y-%m-%d";

/// A half-open date range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    /// First day after the range.
    pub end: NaiveDate,
}

impl DateRange {
    /// The last day inside the range.
    pub fn last_day(&self) -> NaiveDate {
        self.end.pred_opt().unwrap_or(self.end)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }

    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

/// Options for [`iterate_range_at`].
#[derive(Debug, Clone)]
pub struct RangeOptions {
    /// Report each range's last day instead of the first day after it.
    pub end_inclusive: bool,
    /// strftime-style format for both dates of each pair.
    pub format: String,
    pub week_start: WeekStartDay,
}

impl Default for RangeOptions {
    fn default() -> Self {
        Self {
            end_inclusive: false,
            format: DEFAULT_FORMAT.to_string(),
            week_start: WeekStartDay::default(),
        }
    }
}

impl RangeOptions {
    fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            week_start: self.week_start,
        }
    }
}

// ── BucketRanges ────────────────────────────────────────────────────────────

/// Lazy sequence of aligned buckets between two dates.
///
/// Stops once the current start passes `end`, or if the next bucket boundary
/// would fall outside the representable date range.
#[derive(Debug, Clone)]
pub struct BucketRanges {
    interval: Interval,
    current: Option<NaiveDate>,
    end: NaiveDate,
}

impl BucketRanges {
    /// Start walking `interval` from `start` (aligned via
    /// [`Interval::get_start_date`]) through `end` inclusive.
    pub fn new(interval: Interval, start: NaiveDate, end: NaiveDate) -> Self {
        let first = interval.get_start_date(start);
        Self {
            interval,
            current: Some(first),
            end,
        }
    }

    pub fn interval(&self) -> &Interval {
        &self.interval
    }
}

impl Iterator for BucketRanges {
    type Item = DateRange;

    fn next(&mut self) -> Option<DateRange> {
        let start = self.current.filter(|start| *start <= self.end)?;
        match self.interval.step(start) {
            Ok(end) => {
                self.current = Some(end);
                Some(DateRange { start, end })
            }
            Err(_) => {
                self.current = None;
                None
            }
        }
    }
}

impl FusedIterator for BucketRanges {}

// ── FormattedRanges ─────────────────────────────────────────────────────────

/// [`BucketRanges`] rendered as `(start, end)` strings.
#[derive(Debug, Clone)]
pub struct FormattedRanges {
    ranges: BucketRanges,
    end_inclusive: bool,
    format: String,
}

impl FormattedRanges {
    /// # Errors
    ///
    /// Returns [`BucketError::InvalidFormat`] if `format` cannot render a date.
    pub fn new(ranges: BucketRanges, end_inclusive: bool, format: &str) -> Result<Self> {
        check_format(format)?;
        Ok(Self {
            ranges,
            end_inclusive,
            format: format.to_string(),
        })
    }

    fn render(&self, date: NaiveDate) -> String {
        date.format(&self.format).to_string()
    }
}

impl Iterator for FormattedRanges {
    type Item = (String, String);

    fn next(&mut self) -> Option<(String, String)> {
        let range = self.ranges.next()?;
        let end = if self.end_inclusive {
            range.last_day()
        } else {
            range.end
        };
        Some((self.render(range.start), self.render(end)))
    }
}

impl FusedIterator for FormattedRanges {}

/// Reject strftime strings that chrono cannot render for a plain date, such as
/// unknown specifiers or time-of-day fields.
fn check_format(format: &str) -> Result<()> {
    let mut probe = String::new();
    write!(probe, "{}", NaiveDate::MIN.format(format))
        .map_err(|_| BucketError::InvalidFormat(format!("'{format}'")))
}

// ── entry points ────────────────────────────────────────────────────────────

/// Buckets between two concrete dates.
///
/// # Errors
///
/// Returns any error from [`parse_interval_spec`] or [`Interval::resolve`].
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use date_buckets::interval::ResolveOptions;
/// use date_buckets::range::date_range;
///
/// let start = NaiveDate::from_ymd_opt(2022, 11, 9).unwrap();
/// let end = NaiveDate::from_ymd_opt(2022, 11, 15).unwrap();
/// let buckets: Vec<_> = date_range(start, end, "monthly", &ResolveOptions::default())
///     .unwrap()
///     .collect();
///
/// assert_eq!(buckets.len(), 1);
/// assert_eq!(buckets[0].start, NaiveDate::from_ymd_opt(2022, 11, 1).unwrap());
/// assert_eq!(buckets[0].end, NaiveDate::from_ymd_opt(2022, 12, 1).unwrap());
/// ```
pub fn date_range(
    start: NaiveDate,
    end: NaiveDate,
    interval: &str,
    options: &ResolveOptions,
) -> Result<BucketRanges> {
    let spec = parse_interval_spec(interval)?;
    let interval = Interval::resolve(&spec.bucket, spec.cadence, options.week_start)?;
    Ok(BucketRanges::new(interval, start, end))
}

/// Buckets between two date expressions, anchored on the local date.
///
/// `start` and `end` accept anything [`crate::resolve::resolve_date`] accepts.
/// See [`iterate_range_at`].
pub fn iterate_range(
    start: &str,
    end: &str,
    interval: &str,
    end_inclusive: bool,
    format: &str,
) -> Result<FormattedRanges> {
    let options = RangeOptions {
        end_inclusive,
        format: format.to_string(),
        ..RangeOptions::default()
    };
    iterate_range_at(Local::now().date_naive(), start, end, interval, &options)
}

/// Buckets between two date expressions resolved against an explicit `today`.
///
/// The interval spec is parsed first, then both endpoints are resolved, then the
/// start is aligned to its bucket. Bare multiplier specs (`"2_year"`) are not aligned.
///
/// # Errors
///
/// Returns the first parse, resolution or format error encountered.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use date_buckets::range::{iterate_range_at, RangeOptions};
///
/// let today = NaiveDate::from_ymd_opt(2022, 11, 21).unwrap();
/// let pairs: Vec<_> = iterate_range_at(
///     today,
///     "2022-11-09",
///     "2022-11-15",
///     "weekly",
///     &RangeOptions::default(),
/// )
/// .unwrap()
/// .collect();
///
/// assert_eq!(pairs[0], ("2022-11-06".to_string(), "2022-11-13".to_string()));
/// assert_eq!(pairs[1], ("2022-11-13".to_string(), "2022-11-20".to_string()));
/// assert_eq!(pairs.len(), 2);
/// ```
pub fn iterate_range_at(
    today: NaiveDate,
    start: &str,
    end: &str,
    interval: &str,
    options: &RangeOptions,
) -> Result<FormattedRanges> {
    let spec = parse_interval_spec(interval)?;
    let interval = Interval::resolve(&spec.bucket, spec.cadence, options.week_start)?;

    let resolve_options = options.resolve_options();
    let start = resolve_date_at(today, start, &resolve_options)?;
    let end = resolve_date_at(today, end, &resolve_options)?;

    let ranges = BucketRanges::new(interval, start, end);
    FormattedRanges::new(ranges, options.end_inclusive, &options.format)
}
