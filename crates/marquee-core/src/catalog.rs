//! # Catalog Module
//!
//! The Catalog owns one store per entity kind and exposes every catalog
//! operation as a method. It is the single value a server wraps in a lock;
//! holding that lock for the length of a call makes each operation,
//! including the two-sided friendship updates, atomic to other callers.

use crate::friendship::Friendships;
use crate::id::IdGenerator;
use crate::likes::Likes;
use crate::ranking::Ranking;
use crate::store::{EntityStore, InMemoryStore};
use crate::{CatalogError, Film, FilmId, User, UserId};
use serde::{Deserialize, Serialize};

/// Summary counts over the whole catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CatalogStats {
    pub film_count: usize,
    pub user_count: usize,
    /// Sum of like-set sizes over all films.
    pub like_count: usize,
    /// Number of friendship pairs (each pair counted once).
    pub friendship_count: usize,
}

/// Film and user stores plus the relationship operations over them.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    films: InMemoryStore<Film>,
    users: InMemoryStore<User>,
}

impl Catalog {
    /// Create an empty catalog with entropy-seeded identifiers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty catalog whose identifiers follow the given seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            films: InMemoryStore::with_id_generator(IdGenerator::seeded(seed)),
            users: InMemoryStore::with_id_generator(IdGenerator::seeded(seed.wrapping_add(1))),
        }
    }

    // =========================================================================
    // FILMS
    // =========================================================================

    pub fn create_film(&mut self, draft: Film) -> Result<Film, CatalogError> {
        self.films.create(draft)
    }

    pub fn film(&self, id: FilmId) -> Result<Film, CatalogError> {
        self.films.read(id)
    }

    pub fn update_film(&mut self, film: Film) -> Result<Film, CatalogError> {
        self.films.update(film)
    }

    pub fn delete_film(&mut self, id: FilmId) -> Result<(), CatalogError> {
        self.films.delete(id)
    }

    pub fn films(&self) -> Result<Vec<Film>, CatalogError> {
        self.films.list()
    }

    // =========================================================================
    // USERS
    // =========================================================================

    pub fn create_user(&mut self, draft: User) -> Result<User, CatalogError> {
        self.users.create(draft)
    }

    pub fn user(&self, id: UserId) -> Result<User, CatalogError> {
        self.users.read(id)
    }

    pub fn update_user(&mut self, user: User) -> Result<User, CatalogError> {
        self.users.update(user)
    }

    /// Delete a user. Friend sets and film likes still naming it are kept.
    pub fn delete_user(&mut self, id: UserId) -> Result<(), CatalogError> {
        self.users.delete(id)
    }

    pub fn users(&self) -> Result<Vec<User>, CatalogError> {
        self.users.list()
    }

    // =========================================================================
    // RELATIONSHIPS
    // =========================================================================

    pub fn add_friend(&mut self, user_id: UserId, friend_id: UserId) -> Result<(), CatalogError> {
        Friendships::add(&mut self.users, user_id, friend_id)
    }

    pub fn remove_friend(
        &mut self,
        user_id: UserId,
        friend_id: UserId,
    ) -> Result<(), CatalogError> {
        Friendships::remove(&mut self.users, user_id, friend_id)
    }

    pub fn friends(&self, user_id: UserId) -> Result<Vec<User>, CatalogError> {
        Friendships::friends_of(&self.users, user_id)
    }

    pub fn common_friends(
        &self,
        user_id: UserId,
        other_id: UserId,
    ) -> Result<Vec<User>, CatalogError> {
        Friendships::common(&self.users, user_id, other_id)
    }

    pub fn add_like(&mut self, film_id: FilmId, user_id: UserId) -> Result<(), CatalogError> {
        Likes::add(&mut self.films, &self.users, film_id, user_id)
    }

    pub fn remove_like(&mut self, film_id: FilmId, user_id: UserId) -> Result<(), CatalogError> {
        Likes::remove(&mut self.films, &self.users, film_id, user_id)
    }

    // =========================================================================
    // RANKING & STATS
    // =========================================================================

    pub fn top_films(&self, count: usize) -> Result<Vec<Film>, CatalogError> {
        Ranking::top_films(&self.films, count)
    }

    /// Count records and relationship links.
    #[must_use]
    pub fn stats(&self) -> CatalogStats {
        let friend_links: usize = self.users.iter().map(|u| u.friends.len()).sum();
        // Self-friendship is one link that lives in a single set.
        let self_links = self
            .users
            .iter()
            .filter(|u| u.friends.contains(&u.id))
            .count();

        CatalogStats {
            film_count: self.films.iter().count(),
            user_count: self.users.iter().count(),
            like_count: self.films.iter().map(Film::like_count).sum(),
            friendship_count: (friend_links - self_links) / 2 + self_links,
        }
    }
}
