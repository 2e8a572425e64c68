//! # Likes Module
//!
//! The user -> film endorsement relation. Each film keeps the set of user ids
//! that like it; users hold nothing.
//!
//! Both the film and the user must exist for adds and removes. The user is
//! checked with an explicit lookup on the user store.

use crate::store::EntityStore;
use crate::{CatalogError, Film, FilmId, User, UserId};
use tracing::info;

/// Operations on the like relation between a film store and a user store.
pub struct Likes;

impl Likes {
    /// Record that a user likes a film. Liking twice is a no-op.
    pub fn add<F, U>(
        films: &mut F,
        users: &U,
        film_id: FilmId,
        user_id: UserId,
    ) -> Result<(), CatalogError>
    where
        F: EntityStore<Film>,
        U: EntityStore<User>,
    {
        let mut film = films.read(film_id)?;
        let user = users.read(user_id)?;

        film.likes.insert(user.id);
        films.update(film)?;

        info!(%film_id, %user_id, "like added");
        Ok(())
    }

    /// Withdraw a like. Removing a like that was never given succeeds.
    pub fn remove<F, U>(
        films: &mut F,
        users: &U,
        film_id: FilmId,
        user_id: UserId,
    ) -> Result<(), CatalogError>
    where
        F: EntityStore<Film>,
        U: EntityStore<User>,
    {
        let mut film = films.read(film_id)?;
        let user = users.read(user_id)?;

        film.likes.remove(&user.id);
        films.update(film)?;

        info!(%film_id, %user_id, "like removed");
        Ok(())
    }
}
