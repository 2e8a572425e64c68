//! # Catalog Primitives
//!
//! Hardcoded constants for the Marquee catalog.
//!
//! The catalog itself only enforces identifier and existence rules. The
//! field limits below are published here so that every caller validating
//! input before it reaches the catalog agrees on the same numbers.

use chrono::NaiveDate;

/// Identifiers are rounded up to a multiple of this step.
pub const ID_STEP: u64 = 10_000;

/// Number of films returned by a ranking when the caller does not say.
pub const DEFAULT_TOP_COUNT: usize = 10;

// =============================================================================
// INPUT VALIDATION LIMITS
// =============================================================================

/// Maximum length of a film description, in characters.
pub const MAX_DESCRIPTION_LENGTH: usize = 200;

/// Earliest accepted release date as `(year, month, day)`.
///
/// The first public film screening.
pub const CINEMA_BIRTH_DATE: (i32, u32, u32) = (1895, 12, 28);

/// The earliest accepted release date.
#[must_use]
pub fn cinema_birth_date() -> NaiveDate {
    let (year, month, day) = CINEMA_BIRTH_DATE;
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}
