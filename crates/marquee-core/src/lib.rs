//! # marquee-core
//!
//! The in-memory catalog engine for Marquee - THE CATALOG.
//!
//! This crate tracks two entity kinds, films and users, and two relations
//! over them: a symmetric friendship graph between users and a like relation
//! from users to films. On top of the likes it ranks films by popularity.
//!
//! ## Layers
//!
//! - `store`: the generic `EntityStore` contract and its in-memory table
//! - `friendship` / `likes`: relationship maintenance through the stores
//! - `ranking`: most-liked ordering with a deterministic tie-break
//! - `catalog`: one value owning both stores, the unit a server locks
//!
//! ## Architectural Constraints
//!
//! - Has NO async, NO network dependencies (pure Rust)
//! - Never validates field formats; callers hand it already-checked values
//! - Always checks that identifiers resolve, failing with `NotFound`
//! - Does not cascade deletes into relationship sets

// =============================================================================
// MODULES
// =============================================================================

pub mod catalog;
pub mod friendship;
pub mod id;
pub mod likes;
pub mod primitives;
pub mod ranking;
pub mod store;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{CatalogError, EntityKind, Film, FilmId, User, UserId};

// =============================================================================
// RE-EXPORTS: Catalog Engine
// =============================================================================

pub use catalog::{Catalog, CatalogStats};
pub use friendship::Friendships;
pub use id::IdGenerator;
pub use likes::Likes;
pub use ranking::Ranking;
pub use store::{Entity, EntityStore, InMemoryStore};
