//! # Ranking Engine
//!
//! Orders films by popularity: descending like count, ties broken by
//! ascending film id so equal counts always come out in the same order.

use crate::store::EntityStore;
use crate::{CatalogError, Film};
use std::cmp::Ordering;

/// Most-liked film queries.
pub struct Ranking;

impl Ranking {
    /// The `count` most-liked films, most liked first.
    ///
    /// Returns every film when `count` exceeds the catalog size.
    /// A `count` of zero is rejected with `InvalidCount`.
    pub fn top_films<F: EntityStore<Film>>(
        films: &F,
        count: usize,
    ) -> Result<Vec<Film>, CatalogError> {
        if count == 0 {
            return Err(CatalogError::InvalidCount);
        }

        let mut ranked = films.list()?;
        ranked.sort_by(Self::compare);
        ranked.truncate(count);
        Ok(ranked)
    }

    /// Popularity order: more likes first, then lower id first.
    #[must_use]
    pub fn compare(a: &Film, b: &Film) -> Ordering {
        b.like_count()
            .cmp(&a.like_count())
            .then_with(|| a.id.cmp(&b.id))
    }
}
