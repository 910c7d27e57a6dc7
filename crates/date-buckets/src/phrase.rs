//! Phrase grammars that turn free-form text into a `(cadence, bucket)` pair.
//!
//! There are two independent grammars:
//!
//! - [`parse_past_phrase`] reads single-date expressions that point into the past:
//!   `"today"`, `"yesterday"`, `"this_month"`, `"last_year"`, `"3_weeks_ago"`.
//! - [`parse_interval_spec`] reads cadence specs that describe a bucket size:
//!   `"day"`, `"weekly"`, `"2_month"`, `"3 years"`.
//!
//! Both normalize (trim, lowercase) before matching and return the bucket keyword
//! verbatim so that [`crate::interval::Interval::resolve`] can decide on alignment.
//! Neither grammar guesses: anything that does not match a rule is an error.

use serde::Serialize;

use crate::bucket::Unit;
use crate::error::{BucketError, Result};

/// The outcome of parsing a phrase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhraseSpec {
    /// How many bucket units the phrase spans or offsets by.
    pub cadence: u32,
    /// The bucket keyword as parsed (`"week"`, `"weekly"`, `"last_week"`, ...).
    pub bucket: String,
}

impl PhraseSpec {
    fn new(cadence: u32, bucket: &str) -> Self {
        Self {
            cadence,
            bucket: bucket.trim().to_string(),
        }
    }

    /// The canonical unit of the parsed bucket keyword.
    ///
    /// # Errors
    ///
    /// Returns [`BucketError::UnsupportedBucket`] if the keyword is not in the unit table.
    pub fn unit(&self) -> Result<Unit> {
        Unit::from_keyword(&self.bucket)
    }
}

// ── past phrases ────────────────────────────────────────────────────────────

/// Parse a past-date phrase into its cadence and bucket.
///
/// # Grammar
///
/// - `yesterday`, `last_week`, `last_month`, `last_year` → cadence 1
/// - `today`, `this_week`, `this_month`, `this_year` → cadence 0
/// - `<N>_<unit>_ago` → cadence N, with one trailing `s` stripped from the unit
///
/// # Errors
///
/// - [`BucketError::InvalidInput`] if the text has no letters
/// - [`BucketError::InvalidDateValue`] if an underscore phrase is not `<N>_<unit>_ago`
/// - [`BucketError::InvalidCadence`] if `N` is not a non-negative integer
/// - [`BucketError::UnresolvedPhrase`] if no rule applies
///
/// # Examples
///
/// ```
/// use date_buckets::phrase::parse_past_phrase;
///
/// let spec = parse_past_phrase("2_Weeks_Ago").unwrap();
/// assert_eq!(spec.cadence, 2);
/// assert_eq!(spec.bucket, "week");
/// ```
pub fn parse_past_phrase(text: &str) -> Result<PhraseSpec> {
    let normalized = normalize_phrase(text)?;

    if let Some(spec) = try_past_literal(&normalized) {
        return Ok(spec);
    }

    if normalized.contains('_') {
        return parse_ago_phrase(&normalized);
    }

    Err(BucketError::UnresolvedPhrase(format!(
        "cannot parse date phrase: '{normalized}'"
    )))
}

fn try_past_literal(s: &str) -> Option<PhraseSpec> {
    match s {
        "yesterday" | "last_week" | "last_month" | "last_year" => Some(PhraseSpec::new(1, s)),
        "today" | "this_week" | "this_month" | "this_year" => Some(PhraseSpec::new(0, s)),
        _ => None,
    }
}

/// `<N>_<unit>_ago`, e.g. `"3_months_ago"`.
fn parse_ago_phrase(s: &str) -> Result<PhraseSpec> {
    let parts: Vec<&str> = s.split('_').collect();
    match parts.as_slice() {
        [cadence, bucket, "ago"] => {
            let cadence = parse_cadence(cadence, s)?;
            Ok(PhraseSpec::new(cadence, singularize(bucket)))
        }
        _ => Err(BucketError::InvalidDateValue(format!(
            "expected '<N>_<unit>_ago', got '{s}'"
        ))),
    }
}

// ── interval specs ──────────────────────────────────────────────────────────

/// Parse an interval spec into its cadence and bucket.
///
/// # Grammar
///
/// - `day`, `weekly`, `monthly`, `yearly` → cadence 1
/// - `<N>_<unit>` or `<N> <unit>` → cadence N, with one trailing `s` stripped from the unit
///
/// # Errors
///
/// - [`BucketError::InvalidInput`] if the text has no letters
/// - [`BucketError::InvalidInterval`] if the text has more than two `_` segments
/// - [`BucketError::InvalidCadence`] if `N` is not a positive integer
/// - [`BucketError::UnresolvedPhrase`] if no rule applies (e.g. bare `"weeks"`)
pub fn parse_interval_spec(text: &str) -> Result<PhraseSpec> {
    let normalized = normalize_phrase(text)?;

    if let Some(spec) = try_interval_literal(&normalized) {
        return Ok(spec);
    }

    if normalized.split('_').count() > 2 {
        return Err(BucketError::InvalidInterval(format!(
            "expected '<N>_<unit>', got '{normalized}'"
        )));
    }

    let parts: Vec<&str> = normalized.split(['_', ' ']).collect();
    match parts.as_slice() {
        [cadence, bucket] => {
            let cadence = parse_cadence(cadence, &normalized)?;
            if cadence == 0 {
                return Err(BucketError::InvalidCadence(format!(
                    "interval cadence must be at least 1: '{normalized}'"
                )));
            }
            Ok(PhraseSpec::new(cadence, singularize(bucket)))
        }
        _ => Err(BucketError::UnresolvedPhrase(format!(
            "cannot parse interval: '{normalized}'"
        ))),
    }
}

fn try_interval_literal(s: &str) -> Option<PhraseSpec> {
    match s {
        "day" | "weekly" | "monthly" | "yearly" => Some(PhraseSpec::new(1, s)),
        _ => None,
    }
}

// ── shared helpers ──────────────────────────────────────────────────────────

/// Trim and lowercase; reject text without a single letter.
fn normalize_phrase(text: &str) -> Result<String> {
    let normalized = text.trim().to_lowercase();
    if !normalized.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(BucketError::InvalidInput(format!(
            "expected a phrase containing letters, got '{}'",
            text.trim()
        )));
    }
    Ok(normalized)
}

fn parse_cadence(raw: &str, phrase: &str) -> Result<u32> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| BucketError::InvalidCadence(format!("'{raw}' in '{phrase}'")))
}

/// `"weeks"` → `"week"`. Only a single trailing `s` is removed.
fn singularize(unit: &str) -> &str {
    unit.strip_suffix('s').unwrap_or(unit)
}
