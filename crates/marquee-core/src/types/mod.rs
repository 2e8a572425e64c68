//! # Core Type Definitions
//!
//! This module contains all core types for the Marquee catalog:
//! - Entity identifiers (`FilmId`, `UserId`) and the `EntityKind` tag
//! - Entity records (`Film`, `User`)
//! - Error types (`CatalogError`)
//!
//! ## Wire Shape
//!
//! Records serialize with camelCase field names. Dates are ISO `YYYY-MM-DD`,
//! film duration is a whole number of seconds, and relationship sets are
//! plain arrays of ids in ascending order.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Store-assigned identifier of a film.
///
/// `FilmId(0)` never names a stored film; it is what an unassigned draft carries.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct FilmId(pub u64);

/// Store-assigned identifier of a user.
///
/// `UserId(0)` never names a stored user; it is what an unassigned draft carries.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl FilmId {
    /// Get the raw identifier value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl UserId {
    /// Get the raw identifier value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl From<u64> for FilmId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl From<FilmId> for u64 {
    fn from(id: FilmId) -> Self {
        id.0
    }
}

impl From<u64> for UserId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl From<UserId> for u64 {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl fmt::Display for FilmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The kind of entity a store holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Film,
    User,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Film => f.write_str("Film"),
            Self::User => f.write_str("User"),
        }
    }
}

// =============================================================================
// FILM
// =============================================================================

/// A catalog item.
///
/// `likes` holds the ids of users who endorsed the film. It is only grown
/// through [`crate::Likes`]; a deleted user's id stays in the set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Film {
    #[serde(default)]
    pub id: FilmId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub release_date: NaiveDate,
    #[serde(with = "duration_secs")]
    pub duration: Duration,
    #[serde(default)]
    pub likes: BTreeSet<UserId>,
}

impl Film {
    /// Create an unassigned film draft with no description and no likes.
    #[must_use]
    pub fn new(name: impl Into<String>, release_date: NaiveDate, duration: Duration) -> Self {
        Self {
            id: FilmId::default(),
            name: name.into(),
            description: None,
            release_date,
            duration,
            likes: BTreeSet::new(),
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Number of users who like this film.
    #[must_use]
    pub fn like_count(&self) -> usize {
        self.likes.len()
    }
}

// =============================================================================
// USER
// =============================================================================

/// An actor of the social graph.
///
/// `friends` is symmetric across the store: it is only changed through
/// [`crate::Friendships`], which always updates both sides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub id: UserId,
    pub email: String,
    pub login: String,
    /// Display name. Blank names are replaced by the login when stored.
    #[serde(default)]
    pub name: String,
    pub birthday: NaiveDate,
    #[serde(default)]
    pub friends: BTreeSet<UserId>,
}

impl User {
    /// Create an unassigned user draft with a blank name and no friends.
    #[must_use]
    pub fn new(email: impl Into<String>, login: impl Into<String>, birthday: NaiveDate) -> Self {
        Self {
            id: UserId::default(),
            email: email.into(),
            login: login.into(),
            name: String::new(),
            birthday,
            friends: BTreeSet::new(),
        }
    }

    /// Set the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// Film durations travel as whole seconds.
mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the Marquee catalog.
///
/// - No silent failures
/// - Use `Result<T, CatalogError>` for fallible operations
/// - The catalog never panics; every error is recoverable by the caller
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// An identifier did not resolve to a stored record.
    #[error("{kind} not found with id: {id}")]
    NotFound { kind: EntityKind, id: u64 },

    /// A ranking was requested for zero films.
    #[error("Count must be a positive integer")]
    InvalidCount,

    /// A field failed validation before reaching the catalog.
    #[error("{0}")]
    Validation(String),

    /// The configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(String),
}

impl CatalogError {
    /// Build a `NotFound` error for the given kind and raw id.
    pub fn not_found(kind: EntityKind, id: impl Into<u64>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Check whether this is a `NotFound` error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn film_serializes_camel_case_with_seconds() {
        let film = Film::new("Alien", date(1979, 5, 25), Duration::from_secs(7020));
        let json = serde_json::to_value(&film).expect("serialize");

        assert_eq!(json["releaseDate"], "1979-05-25");
        assert_eq!(json["duration"], 7020);
        assert_eq!(json["likes"], serde_json::json!([]));
        assert!(json.get("description").is_none());
    }

    #[test]
    fn film_deserializes_without_id_or_likes() {
        let json = r#"{"name":"Heat","releaseDate":"1995-12-15","duration":10200}"#;
        let film: Film = serde_json::from_str(json).expect("deserialize");

        assert_eq!(film.id, FilmId(0));
        assert_eq!(film.duration, Duration::from_secs(10200));
        assert!(film.likes.is_empty());
    }

    #[test]
    fn user_name_defaults_to_empty() {
        let json = r#"{"email":"a@b.io","login":"neo","birthday":"1990-01-01"}"#;
        let user: User = serde_json::from_str(json).expect("deserialize");
        assert!(user.name.is_empty());
    }

    #[test]
    fn relationship_sets_serialize_in_ascending_order() {
        let mut user = User::new("a@b.io", "neo", date(1990, 1, 1));
        user.friends.insert(UserId(30));
        user.friends.insert(UserId(10));
        user.friends.insert(UserId(20));

        let json = serde_json::to_value(&user).expect("serialize");
        assert_eq!(json["friends"], serde_json::json!([10, 20, 30]));
    }

    #[test]
    fn not_found_message_names_kind_and_id() {
        let err = CatalogError::not_found(EntityKind::User, UserId(42));
        assert_eq!(err.to_string(), "User not found with id: 42");
        assert!(err.is_not_found());
        assert!(!CatalogError::InvalidCount.is_not_found());
    }
}
