//! Resolve a date expression, either an ISO date or a past phrase, to a calendar date.
//!
//! [`resolve_date_at`] takes the "today" anchor explicitly and never reads the
//! system clock; [`resolve_date`] is the convenience wrapper that anchors on the
//! local date.

use std::sync::LazyLock;

use chrono::{Local, NaiveDate};
use regex::Regex;

use crate::error::{BucketError, Result};
use crate::interval::{Interval, ResolveOptions};
use crate::phrase::parse_past_phrase;

static ISO_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4}-\d{2}-\d{2}").unwrap());

/// Resolve a date expression against the local system date.
///
/// See [`resolve_date_at`] for the accepted forms.
pub fn resolve_date(text: &str) -> Result<NaiveDate> {
    resolve_date_at(Local::now().date_naive(), text, &ResolveOptions::default())
}

/// Resolve a date expression against an explicit `today`.
///
/// # Accepted forms
///
/// - `YYYY-MM-DD` is parsed as-is.
/// - Past phrases (`today`, `yesterday`, `this_week`, `last_month`, `3_days_ago`, ...)
///   snap `today` to the start of the phrase's bucket when the keyword calls for it,
///   then step back `cadence` units. `this_*` and `today` have cadence 0 and therefore
///   resolve to the bucket start itself.
///
/// # Errors
///
/// Returns [`BucketError::InvalidDate`] for text that looks like an ISO date but is
/// not one (`"2022-13-01"`, `"2022-11-14T10:00"`), and any phrase or bucket error
/// otherwise.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use date_buckets::interval::ResolveOptions;
/// use date_buckets::resolve::resolve_date_at;
///
/// let monday = NaiveDate::from_ymd_opt(2022, 11, 21).unwrap();
/// let opts = ResolveOptions::default();
///
/// let last_week = resolve_date_at(monday, "last_week", &opts).unwrap();
/// assert_eq!(last_week, NaiveDate::from_ymd_opt(2022, 11, 13).unwrap());
/// ```
pub fn resolve_date_at(
    today: NaiveDate,
    text: &str,
    options: &ResolveOptions,
) -> Result<NaiveDate> {
    let trimmed = text.trim();
    if ISO_DATE_RE.is_match(trimmed) {
        return NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .map_err(|e| BucketError::InvalidDate(format!("'{trimmed}': {e}")));
    }

    let phrase = parse_past_phrase(text)?;
    let interval = Interval::resolve(&phrase.bucket, phrase.cadence, options.week_start)?;
    let start = interval.get_start_date(today);
    interval.subtract_interval(start, phrase.cadence)
}
