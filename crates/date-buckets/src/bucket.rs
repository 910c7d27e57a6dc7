//! Canonical bucket units and the keyword table that maps phrase spellings onto them.
//!
//! Both phrase grammars hand back the keyword they parsed verbatim (`"week"`,
//! `"weekly"`, `"last_week"`). [`KEYWORD_TABLE`] is the single place that decides
//! which [`Unit`] a keyword belongs to and whether that keyword snaps dates to the
//! start of their bucket.

use std::fmt;

use serde::Serialize;

use crate::error::{BucketError, Result};

/// One of the four calendar units a bucket can be measured in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Day,
    Week,
    Month,
    Year,
}

/// Accepted spellings for one [`Unit`].
#[derive(Debug, Clone, Copy)]
pub struct UnitKeywords {
    pub unit: Unit,
    /// Every keyword that resolves to `unit`.
    pub spellings: &'static [&'static str],
    /// The subset of `spellings` that means "start of the current/most recent bucket".
    /// Bare unit words never align: `2_months` counts from the exact date.
    pub aligned: &'static [&'static str],
}

/// The canonical unit table, searched in order.
pub static KEYWORD_TABLE: [UnitKeywords; 4] = [
    UnitKeywords {
        unit: Unit::Day,
        spellings: &["day", "yesterday", "today"],
        aligned: &[],
    },
    UnitKeywords {
        unit: Unit::Week,
        spellings: &["week", "weekly", "last_week", "this_week"],
        aligned: &["weekly", "last_week", "this_week"],
    },
    UnitKeywords {
        unit: Unit::Month,
        spellings: &["month", "monthly", "last_month", "this_month"],
        aligned: &["monthly", "last_month", "this_month"],
    },
    UnitKeywords {
        unit: Unit::Year,
        spellings: &["year", "yearly", "last_year", "this_year"],
        aligned: &["yearly", "last_year", "this_year"],
    },
];

impl Unit {
    /// Look up the unit a bucket keyword belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`BucketError::UnsupportedBucket`] for keywords outside the table,
    /// such as `"quarterly"` or `"termly"`.
    pub fn from_keyword(keyword: &str) -> Result<Unit> {
        KEYWORD_TABLE
            .iter()
            .find(|entry| entry.spellings.iter().any(|s| *s == keyword))
            .map(|entry| entry.unit)
            .ok_or_else(|| BucketError::UnsupportedBucket(format!("'{keyword}'")))
    }

    /// Whether `keyword` snaps dates to the start of this unit's bucket.
    pub fn is_aligning(self, keyword: &str) -> bool {
        self.keywords().aligned.iter().any(|s| *s == keyword)
    }

    /// The table row for this unit.
    pub fn keywords(self) -> &'static UnitKeywords {
        match self {
            Unit::Day => &KEYWORD_TABLE[0],
            Unit::Week => &KEYWORD_TABLE[1],
            Unit::Month => &KEYWORD_TABLE[2],
            Unit::Year => &KEYWORD_TABLE[3],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Unit::Day => "day",
            Unit::Week => "week",
            Unit::Month => "month",
            Unit::Year => "year",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_spelling_resolves_to_its_row() {
        for entry in &KEYWORD_TABLE {
            for spelling in entry.spellings {
                assert_eq!(Unit::from_keyword(spelling).unwrap(), entry.unit, "{spelling}");
            }
        }
    }

    #[test]
    fn test_keywords_row_matches_unit() {
        for unit in [Unit::Day, Unit::Week, Unit::Month, Unit::Year] {
            assert_eq!(unit.keywords().unit, unit);
        }
    }

    #[test]
    fn test_aligned_spellings_are_subset_of_spellings() {
        for entry in &KEYWORD_TABLE {
            for aligned in entry.aligned {
                assert!(entry.spellings.contains(aligned), "{aligned}");
            }
        }
    }

    #[test]
    fn test_spellings_are_unique_across_units() {
        let mut seen = std::collections::HashSet::new();
        for entry in &KEYWORD_TABLE {
            for spelling in entry.spellings {
                assert!(seen.insert(*spelling), "duplicate spelling {spelling}");
            }
        }
    }

    #[test]
    fn test_unsupported_keywords() {
        for word in ["quarterly", "termly", "biannually", "weeks", ""] {
            let err = Unit::from_keyword(word).unwrap_err();
            assert!(matches!(err, BucketError::UnsupportedBucket(_)), "{word}");
        }
    }

    #[test]
    fn test_bare_units_do_not_align() {
        assert!(!Unit::Day.is_aligning("day"));
        assert!(!Unit::Week.is_aligning("week"));
        assert!(!Unit::Month.is_aligning("month"));
        assert!(!Unit::Year.is_aligning("year"));
    }

    #[test]
    fn test_period_keywords_align() {
        assert!(Unit::Week.is_aligning("weekly"));
        assert!(Unit::Week.is_aligning("last_week"));
        assert!(Unit::Month.is_aligning("this_month"));
        assert!(Unit::Year.is_aligning("yearly"));
        assert!(!Unit::Day.is_aligning("yesterday"));
    }

    #[test]
    fn test_unit_display() {
        assert_eq!(Unit::Month.to_string(), "month");
        assert_eq!(serde_json::to_string(&Unit::Year).unwrap(), "\"year\"");
    }
}
