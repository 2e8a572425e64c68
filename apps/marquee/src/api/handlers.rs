//! # API Endpoint Handlers
//!
//! This module implements the actual HTTP endpoint handlers.
//!
//! Read-only handlers take the catalog's read lock; every mutating handler
//! takes the write lock for the whole operation.

use super::{
    AppState,
    types::{ErrorResponse, FilmRequest, HealthResponse, PopularQuery, UserRequest},
    validation,
};
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use marquee_core::{CatalogError, FilmId, UserId};
use serde::Serialize;

// =============================================================================
// RESPONSE MAPPING
// =============================================================================

/// HTTP status for a catalog error.
pub fn status_for(err: &CatalogError) -> StatusCode {
    match err {
        CatalogError::NotFound { .. } => StatusCode::NOT_FOUND,
        CatalogError::InvalidCount | CatalogError::Validation(_) => StatusCode::BAD_REQUEST,
        CatalogError::Config(_) | CatalogError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Build the error body for a failed request and log it.
fn error_response(uri: &Uri, err: &CatalogError) -> Response {
    let status = status_for(err);
    if status.is_server_error() {
        tracing::error!(path = %uri.path(), status = status.as_u16(), "{}", err);
    } else {
        tracing::warn!(path = %uri.path(), status = status.as_u16(), "{}", err);
    }
    let body = ErrorResponse::new(uri.path(), err.to_string(), status.as_u16());
    (status, Json(body)).into_response()
}

/// 200 with the value as JSON, or the mapped error.
fn respond<T: Serialize>(uri: &Uri, result: Result<T, CatalogError>) -> Response {
    match result {
        Ok(value) => (StatusCode::OK, Json(value)).into_response(),
        Err(e) => error_response(uri, &e),
    }
}

/// 200 with an empty body, or the mapped error.
fn respond_empty(uri: &Uri, result: Result<(), CatalogError>) -> Response {
    match result {
        Ok(()) => StatusCode::OK.into_response(),
        Err(e) => error_response(uri, &e),
    }
}

/// Unwrap a JSON body, turning parse failures into validation errors.
fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, CatalogError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| CatalogError::Validation(rejection.body_text()))
}

/// Unwrap path parameters, turning parse failures into validation errors.
fn params<T>(path: Result<Path<T>, PathRejection>) -> Result<T, CatalogError> {
    path.map(|Path(value)| value)
        .map_err(|rejection| CatalogError::Validation(rejection.body_text()))
}

fn film_id(path: Result<Path<u64>, PathRejection>) -> Result<FilmId, CatalogError> {
    params(path).and_then(|raw| validation::positive_id(raw, "id").map(FilmId))
}

fn user_id(path: Result<Path<u64>, PathRejection>) -> Result<UserId, CatalogError> {
    params(path).and_then(|raw| validation::positive_id(raw, "id").map(UserId))
}

/// `/films/{id}/like/{userId}`
fn film_and_user(
    path: Result<Path<(u64, u64)>, PathRejection>,
) -> Result<(FilmId, UserId), CatalogError> {
    let (film, user) = params(path)?;
    Ok((
        FilmId(validation::positive_id(film, "id")?),
        UserId(validation::positive_id(user, "userId")?),
    ))
}

/// `/users/{id}/friends/{friendId}` and `/users/{id}/friends/common/{otherId}`
fn user_pair(
    path: Result<Path<(u64, u64)>, PathRejection>,
    other_field: &str,
) -> Result<(UserId, UserId), CatalogError> {
    let (user, other) = params(path)?;
    Ok((
        UserId(validation::positive_id(user, "id")?),
        UserId(validation::positive_id(other, other_field)?),
    ))
}

// =============================================================================
// HEALTH & STATUS HANDLERS
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

/// Catalog counts.
pub async fn status_handler(State(state): State<AppState>) -> impl IntoResponse {
    let catalog = state.catalog.read().await;
    (StatusCode::OK, Json(catalog.stats()))
}

// =============================================================================
// FILM HANDLERS
// =============================================================================

pub async fn list_films_handler(State(state): State<AppState>, uri: Uri) -> Response {
    let catalog = state.catalog.read().await;
    respond(&uri, catalog.films())
}

pub async fn get_film_handler(
    State(state): State<AppState>,
    uri: Uri,
    path: Result<Path<u64>, PathRejection>,
) -> Response {
    let catalog = state.catalog.read().await;
    respond(&uri, film_id(path).and_then(|id| catalog.film(id)))
}

pub async fn create_film_handler(
    State(state): State<AppState>,
    uri: Uri,
    payload: Result<Json<FilmRequest>, JsonRejection>,
) -> Response {
    let draft = match body(payload).and_then(|request| request.to_film()) {
        Ok(film) => film,
        Err(e) => return error_response(&uri, &e),
    };
    let mut catalog = state.catalog.write().await;
    respond(&uri, catalog.create_film(draft))
}

pub async fn update_film_handler(
    State(state): State<AppState>,
    uri: Uri,
    payload: Result<Json<FilmRequest>, JsonRejection>,
) -> Response {
    let film = match body(payload).and_then(|request| request.to_film()) {
        Ok(film) => film,
        Err(e) => return error_response(&uri, &e),
    };
    let mut catalog = state.catalog.write().await;
    respond(&uri, catalog.update_film(film))
}

pub async fn delete_film_handler(
    State(state): State<AppState>,
    uri: Uri,
    path: Result<Path<u64>, PathRejection>,
) -> Response {
    let mut catalog = state.catalog.write().await;
    respond_empty(&uri, film_id(path).and_then(|id| catalog.delete_film(id)))
}

/// Most-liked films. `count` defaults to the configured value.
pub async fn popular_films_handler(
    State(state): State<AppState>,
    uri: Uri,
    query: Result<Query<PopularQuery>, QueryRejection>,
) -> Response {
    let count = match query {
        Ok(Query(q)) => q.resolve(state.popular_default),
        Err(rejection) => Err(CatalogError::Validation(rejection.body_text())),
    };
    let catalog = state.catalog.read().await;
    respond(&uri, count.and_then(|n| catalog.top_films(n)))
}

// =============================================================================
// LIKE HANDLERS
// =============================================================================

pub async fn add_like_handler(
    State(state): State<AppState>,
    uri: Uri,
    path: Result<Path<(u64, u64)>, PathRejection>,
) -> Response {
    let ids = film_and_user(path);
    let mut catalog = state.catalog.write().await;
    respond_empty(&uri, ids.and_then(|(f, u)| catalog.add_like(f, u)))
}

pub async fn remove_like_handler(
    State(state): State<AppState>,
    uri: Uri,
    path: Result<Path<(u64, u64)>, PathRejection>,
) -> Response {
    let ids = film_and_user(path);
    let mut catalog = state.catalog.write().await;
    respond_empty(&uri, ids.and_then(|(f, u)| catalog.remove_like(f, u)))
}

// =============================================================================
// USER HANDLERS
// =============================================================================

pub async fn list_users_handler(State(state): State<AppState>, uri: Uri) -> Response {
    let catalog = state.catalog.read().await;
    respond(&uri, catalog.users())
}

pub async fn get_user_handler(
    State(state): State<AppState>,
    uri: Uri,
    path: Result<Path<u64>, PathRejection>,
) -> Response {
    let catalog = state.catalog.read().await;
    respond(&uri, user_id(path).and_then(|id| catalog.user(id)))
}

pub async fn create_user_handler(
    State(state): State<AppState>,
    uri: Uri,
    payload: Result<Json<UserRequest>, JsonRejection>,
) -> Response {
    let today = Utc::now().date_naive();
    let draft = match body(payload).and_then(|request| request.to_user(today)) {
        Ok(user) => user,
        Err(e) => return error_response(&uri, &e),
    };
    let mut catalog = state.catalog.write().await;
    respond(&uri, catalog.create_user(draft))
}

pub async fn update_user_handler(
    State(state): State<AppState>,
    uri: Uri,
    payload: Result<Json<UserRequest>, JsonRejection>,
) -> Response {
    let today = Utc::now().date_naive();
    let user = match body(payload).and_then(|request| request.to_user(today)) {
        Ok(user) => user,
        Err(e) => return error_response(&uri, &e),
    };
    let mut catalog = state.catalog.write().await;
    respond(&uri, catalog.update_user(user))
}

pub async fn delete_user_handler(
    State(state): State<AppState>,
    uri: Uri,
    path: Result<Path<u64>, PathRejection>,
) -> Response {
    let mut catalog = state.catalog.write().await;
    respond_empty(&uri, user_id(path).and_then(|id| catalog.delete_user(id)))
}

// =============================================================================
// FRIEND HANDLERS
// =============================================================================

pub async fn add_friend_handler(
    State(state): State<AppState>,
    uri: Uri,
    path: Result<Path<(u64, u64)>, PathRejection>,
) -> Response {
    let ids = user_pair(path, "friendId");
    let mut catalog = state.catalog.write().await;
    respond_empty(&uri, ids.and_then(|(u, f)| catalog.add_friend(u, f)))
}

pub async fn remove_friend_handler(
    State(state): State<AppState>,
    uri: Uri,
    path: Result<Path<(u64, u64)>, PathRejection>,
) -> Response {
    let ids = user_pair(path, "friendId");
    let mut catalog = state.catalog.write().await;
    respond_empty(&uri, ids.and_then(|(u, f)| catalog.remove_friend(u, f)))
}

pub async fn list_friends_handler(
    State(state): State<AppState>,
    uri: Uri,
    path: Result<Path<u64>, PathRejection>,
) -> Response {
    let catalog = state.catalog.read().await;
    respond(&uri, user_id(path).and_then(|id| catalog.friends(id)))
}

pub async fn common_friends_handler(
    State(state): State<AppState>,
    uri: Uri,
    path: Result<Path<(u64, u64)>, PathRejection>,
) -> Response {
    let ids = user_pair(path, "otherId");
    let catalog = state.catalog.read().await;
    respond(&uri, ids.and_then(|(u, o)| catalog.common_friends(u, o)))
}
