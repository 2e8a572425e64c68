//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API. Successful
//! responses carry `Film`/`User` records from the core directly; only the
//! inbound payloads and the error body are defined here.

use super::validation;
use chrono::{Local, NaiveDate, NaiveDateTime};
use marquee_core::{CatalogError, Film, FilmId, User, UserId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::time::Duration;

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// FILM REQUEST
// =============================================================================

/// Film payload for create (`POST /films`) and update (`PUT /films`).
///
/// Every field is optional at the JSON level so that a missing field is
/// reported with a validation message instead of a parse error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilmRequest {
    /// Ignored on create. On update, a missing id is 0 and resolves to nothing.
    pub id: u64,
    pub name: Option<String>,
    pub description: Option<String>,
    pub release_date: Option<NaiveDate>,
    /// Whole seconds.
    pub duration: Option<i64>,
    pub likes: BTreeSet<u64>,
}

impl FilmRequest {
    /// Convert to a Film, validating fields.
    ///
    /// The first failing rule is reported. `likes` is carried over verbatim,
    /// so an update replaces the stored like set with the one sent.
    pub fn to_film(&self) -> Result<Film, CatalogError> {
        let name = validation::film_name(self.name.as_deref())?;
        let description = validation::description(self.description.as_deref())?;
        let release_date = validation::release_date(self.release_date)?;
        let duration = validation::duration_secs(self.duration)?;

        Ok(Film {
            id: FilmId(self.id),
            name,
            description,
            release_date,
            duration: Duration::from_secs(duration),
            likes: self.likes.iter().copied().map(UserId).collect(),
        })
    }
}

// =============================================================================
// USER REQUEST
// =============================================================================

/// User payload for create (`POST /users`) and update (`PUT /users`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserRequest {
    /// Ignored on create. On update, a missing id is 0 and resolves to nothing.
    pub id: u64,
    pub email: Option<String>,
    pub login: Option<String>,
    /// Blank or missing names are replaced by the login in the catalog.
    pub name: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub friends: BTreeSet<u64>,
}

impl UserRequest {
    /// Convert to a User, validating fields against the given current date.
    ///
    /// `friends` is carried over verbatim, so an update replaces the stored
    /// friend set with the one sent.
    pub fn to_user(&self, today: NaiveDate) -> Result<User, CatalogError> {
        let email = validation::email(self.email.as_deref())?;
        let login = validation::login(self.login.as_deref())?;
        let birthday = validation::birthday(self.birthday, today)?;

        Ok(User {
            id: UserId(self.id),
            email,
            login,
            name: self.name.clone().unwrap_or_default(),
            birthday,
            friends: self.friends.iter().copied().map(UserId).collect(),
        })
    }
}

// =============================================================================
// POPULAR QUERY
// =============================================================================

/// Query string of `GET /films/popular`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PopularQuery {
    pub count: Option<i64>,
}

impl PopularQuery {
    /// Resolve the requested count, falling back to `default`.
    ///
    /// Negative counts are rejected here; zero is passed on and rejected by
    /// the ranking.
    pub fn resolve(&self, default: usize) -> Result<usize, CatalogError> {
        match self.count {
            None => Ok(default),
            Some(n) => usize::try_from(n).map_err(|_| {
                CatalogError::Validation("Count must be a positive integer".to_string())
            }),
        }
    }
}

// =============================================================================
// ERROR RESPONSE
// =============================================================================

/// Body of every failed request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Request path that failed.
    pub url: String,
    pub message: String,
    /// Numeric HTTP status.
    pub status: u16,
    /// Server local time of the failure.
    pub timestamp: NaiveDateTime,
}

impl ErrorResponse {
    pub fn new(url: impl Into<String>, message: impl Into<String>, status: u16) -> Self {
        Self {
            url: url.into(),
            message: message.into(),
            status,
            timestamp: Local::now().naive_local(),
        }
    }
}
