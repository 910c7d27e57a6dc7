//! # date-buckets
//!
//! Human-friendly date phrases in, aligned calendar buckets out.
//!
//! Resolves expressions such as `"yesterday"`, `"last_month"`, `"3_weeks_ago"` or
//! `"2022-11-14"` to concrete dates, and splits a start/end span into consecutive,
//! non-overlapping buckets at a cadence such as `"weekly"` or `"2_month"`.
//!
//! ## Modules
//!
//! - [`phrase`]: the two phrase grammars (past dates, interval specs)
//! - [`bucket`]: canonical units and the shared keyword table
//! - [`interval`]: per-unit alignment and calendar arithmetic
//! - [`resolve`]: date expression → `NaiveDate`
//! - [`range`]: bucket iteration between two dates
//! - [`error`]: Error types

pub mod bucket;
pub mod error;
pub mod interval;
pub mod phrase;
pub mod range;
pub mod resolve;

pub use bucket::{Unit, UnitKeywords, KEYWORD_TABLE};
pub use error::{BucketError, Result};
pub use interval::{Interval, ResolveOptions, WeekStartDay};
pub use phrase::{parse_interval_spec, parse_past_phrase, PhraseSpec};
pub use range::{
    date_range, iterate_range, iterate_range_at, BucketRanges, DateRange, FormattedRanges,
    RangeOptions, DEFAULT_FORMAT,
};
pub use resolve::{resolve_date, resolve_date_at};
