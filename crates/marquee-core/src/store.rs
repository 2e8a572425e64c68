//! # Entity Store
//!
//! The authoritative id -> record tables of the catalog.
//!
//! This module implements the `EntityStore` trait once, generically, for both
//! entity kinds. All data structures use `BTreeMap` for deterministic
//! ordering.

use crate::id::IdGenerator;
use crate::{CatalogError, EntityKind, Film, FilmId, User, UserId};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, info};

// =============================================================================
// ENTITY TRAIT
// =============================================================================

/// A record that can live in an [`EntityStore`].
pub trait Entity: Clone + fmt::Debug {
    /// The kind reported in `NotFound` errors and log events.
    const KIND: EntityKind;

    /// The identifier type of this entity.
    type Id: Copy + Ord + fmt::Debug + fmt::Display + From<u64> + Into<u64>;

    /// The record's identifier.
    fn id(&self) -> Self::Id;

    /// Overwrite the record's identifier.
    fn set_id(&mut self, id: Self::Id);

    /// Apply the store's normalization rules. Runs on create and on update.
    fn normalize(&mut self) {}

    /// Empty the relationship set embedded in the record.
    fn clear_relations(&mut self);
}

impl Entity for Film {
    const KIND: EntityKind = EntityKind::Film;
    type Id = FilmId;

    fn id(&self) -> FilmId {
        self.id
    }

    fn set_id(&mut self, id: FilmId) {
        self.id = id;
    }

    fn clear_relations(&mut self) {
        self.likes.clear();
    }
}

impl Entity for User {
    const KIND: EntityKind = EntityKind::User;
    type Id = UserId;

    fn id(&self) -> UserId {
        self.id
    }

    fn set_id(&mut self, id: UserId) {
        self.id = id;
    }

    /// A blank display name falls back to the login.
    fn normalize(&mut self) {
        if self.name.trim().is_empty() {
            self.name.clone_from(&self.login);
        }
    }

    fn clear_relations(&mut self) {
        self.friends.clear();
    }
}

// =============================================================================
// ENTITYSTORE TRAIT
// =============================================================================

/// The EntityStore trait defines the CRUD contract shared by every entity kind.
///
/// All operations return `Result<T, CatalogError>` so that in-memory and any
/// other backends are interchangeable; the in-memory store only fails with
/// `NotFound`.
///
/// `update` is a whole-record replace: the relationship set on the incoming
/// value is stored as given. Callers that only change scalar fields must read
/// the record first or they will clear its relationships.
pub trait EntityStore<T: Entity> {
    /// Store a new record under a fresh identifier.
    ///
    /// Any identifier on `draft` is ignored, normalization is applied and the
    /// relationship set is emptied.
    fn create(&mut self, draft: T) -> Result<T, CatalogError>;

    /// Get the record with the given id.
    fn read(&self, id: T::Id) -> Result<T, CatalogError>;

    /// Replace the stored record that has `entity`'s id.
    fn update(&mut self, entity: T) -> Result<T, CatalogError>;

    /// Remove a record. Other records referencing it are left untouched.
    fn delete(&mut self, id: T::Id) -> Result<(), CatalogError>;

    /// All records. Callers must not rely on the order.
    fn list(&self) -> Result<Vec<T>, CatalogError>;

    /// Check if a record exists.
    fn contains(&self, id: T::Id) -> Result<bool, CatalogError>;

    /// Number of stored records.
    fn count(&self) -> Result<usize, CatalogError>;
}

// =============================================================================
// IN-MEMORY IMPLEMENTATION
// =============================================================================

/// The in-memory entity table.
#[derive(Debug, Clone)]
pub struct InMemoryStore<T: Entity> {
    /// Record storage: Id -> record
    records: BTreeMap<T::Id, T>,

    /// Source of fresh identifiers
    ids: IdGenerator,
}

impl<T: Entity> InMemoryStore<T> {
    /// Create an empty store with an entropy-seeded id source.
    #[must_use]
    pub fn new() -> Self {
        Self::with_id_generator(IdGenerator::new())
    }

    /// Create an empty store drawing ids from the given generator.
    #[must_use]
    pub fn with_id_generator(ids: IdGenerator) -> Self {
        Self {
            records: BTreeMap::new(),
            ids,
        }
    }

    /// Iterate over stored records in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.records.values()
    }
}

impl<T: Entity> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> EntityStore<T> for InMemoryStore<T> {
    fn create(&mut self, mut draft: T) -> Result<T, CatalogError> {
        let id = T::Id::from(self.ids.next_id());
        draft.set_id(id);
        draft.normalize();
        draft.clear_relations();

        self.records.insert(id, draft.clone());
        info!(kind = %T::KIND, %id, "entity created");
        Ok(draft)
    }

    fn read(&self, id: T::Id) -> Result<T, CatalogError> {
        debug!(kind = %T::KIND, %id, "entity read");
        self.records
            .get(&id)
            .cloned()
            .ok_or_else(|| CatalogError::not_found(T::KIND, id))
    }

    fn update(&mut self, mut entity: T) -> Result<T, CatalogError> {
        let id = entity.id();
        let Some(slot) = self.records.get_mut(&id) else {
            return Err(CatalogError::not_found(T::KIND, id));
        };

        entity.normalize();
        slot.clone_from(&entity);
        info!(kind = %T::KIND, %id, "entity updated");
        Ok(entity)
    }

    fn delete(&mut self, id: T::Id) -> Result<(), CatalogError> {
        match self.records.remove(&id) {
            Some(_) => {
                info!(kind = %T::KIND, %id, "entity deleted");
                Ok(())
            }
            None => Err(CatalogError::not_found(T::KIND, id)),
        }
    }

    fn list(&self) -> Result<Vec<T>, CatalogError> {
        Ok(self.records.values().cloned().collect())
    }

    fn contains(&self, id: T::Id) -> Result<bool, CatalogError> {
        Ok(self.records.contains_key(&id))
    }

    fn count(&self) -> Result<usize, CatalogError> {
        Ok(self.records.len())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::time::Duration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn film(name: &str) -> Film {
        Film::new(name, date(1999, 3, 31), Duration::from_secs(8160))
    }

    fn user(login: &str) -> User {
        User::new(format!("{login}@example.com"), login, date(1990, 1, 1))
    }

    fn seeded<T: Entity>() -> InMemoryStore<T> {
        InMemoryStore::with_id_generator(IdGenerator::seeded(1))
    }

    #[test]
    fn create_assigns_fresh_id_ignoring_draft() {
        let mut store = seeded::<Film>();
        let mut draft = film("The Matrix");
        draft.id = FilmId(5);

        let created = store.create(draft).expect("create");

        assert_ne!(created.id, FilmId(5));
        assert_ne!(created.id, FilmId(0));
    }

    #[test]
    fn create_clears_relationships() {
        let mut store = seeded::<User>();
        let mut draft = user("neo");
        draft.friends.insert(UserId(10_000));

        let created = store.create(draft).expect("create");
        assert!(created.friends.is_empty());
    }

    #[test]
    fn create_defaults_blank_name_to_login() {
        let mut store = seeded::<User>();

        let unnamed = store.create(user("neo")).expect("create");
        assert_eq!(unnamed.name, "neo");

        let blank = store.create(user("trinity").with_name("   ")).expect("create");
        assert_eq!(blank.name, "trinity");

        let named = store
            .create(user("morpheus").with_name("Morpheus"))
            .expect("create");
        assert_eq!(named.name, "Morpheus");
    }

    #[test]
    fn read_returns_created_record() {
        let mut store = seeded::<Film>();
        let created = store.create(film("Heat")).expect("create");

        assert_eq!(store.read(created.id).expect("read"), created);
    }

    #[test]
    fn read_missing_is_not_found() {
        let store = seeded::<Film>();
        let err = store.read(FilmId(99_999)).expect_err("missing");

        assert_eq!(
            err,
            CatalogError::NotFound {
                kind: EntityKind::Film,
                id: 99_999
            }
        );
    }

    #[test]
    fn update_replaces_fields_and_keeps_id() {
        let mut store = seeded::<Film>();
        let created = store.create(film("Heat")).expect("create");

        let mut changed = created.clone();
        changed.name = "Heat (Director's Cut)".to_string();
        let updated = store.update(changed).expect("update");

        assert_eq!(updated.id, created.id);
        assert_eq!(
            store.read(created.id).expect("read").name,
            "Heat (Director's Cut)"
        );
    }

    #[test]
    fn update_renormalizes_name() {
        let mut store = seeded::<User>();
        let created = store.create(user("neo").with_name("Thomas")).expect("create");

        let mut changed = created.clone();
        changed.name = String::new();
        let updated = store.update(changed).expect("update");

        assert_eq!(updated.name, "neo");
    }

    #[test]
    fn update_stores_incoming_relationships_verbatim() {
        let mut store = seeded::<Film>();
        let created = store.create(film("Heat")).expect("create");

        let mut liked = created.clone();
        liked.likes.insert(UserId(10_000));
        store.update(liked).expect("update");

        // A fresh value without likes clobbers them: whole-record replace.
        let mut fresh = film("Heat");
        fresh.id = created.id;
        store.update(fresh).expect("update");

        assert!(store.read(created.id).expect("read").likes.is_empty());
    }

    #[test]
    fn update_missing_is_not_found() {
        let mut store = seeded::<User>();
        let mut ghost = user("ghost");
        ghost.id = UserId(123);

        let err = store.update(ghost).expect_err("missing");
        assert!(err.is_not_found());
        assert_eq!(store.count().expect("count"), 0);
    }

    #[test]
    fn delete_removes_and_second_delete_fails() {
        let mut store = seeded::<Film>();
        let created = store.create(film("Heat")).expect("create");

        store.delete(created.id).expect("delete");
        assert!(!store.contains(created.id).expect("contains"));
        assert!(store.delete(created.id).expect_err("gone").is_not_found());
    }

    #[test]
    fn list_returns_every_record() {
        let mut store = seeded::<User>();
        let a = store.create(user("a")).expect("create");
        let b = store.create(user("b")).expect("create");

        let listed = store.list().expect("list");
        assert_eq!(listed.len(), 2);
        assert!(listed.contains(&a));
        assert!(listed.contains(&b));
    }
}
