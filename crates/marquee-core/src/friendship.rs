//! # Friendship Module
//!
//! The symmetric friend graph, stored inside the user records themselves.
//!
//! Every mutation reads both users and writes both back through
//! [`EntityStore::update`], so `b ∈ a.friends` holds exactly when
//! `a ∈ b.friends`. Both endpoints must exist for adds and removes alike.
//!
//! Deleting a user does not cascade: its id stays in former friends' sets and
//! resolving those friends then fails with `NotFound`.

use crate::store::EntityStore;
use crate::{CatalogError, User, UserId};
use std::collections::BTreeSet;
use tracing::info;

/// Operations on the friend graph of a user store.
pub struct Friendships;

impl Friendships {
    /// Make two users friends. Adding an existing friendship is a no-op.
    pub fn add<S: EntityStore<User>>(
        users: &mut S,
        user_id: UserId,
        friend_id: UserId,
    ) -> Result<(), CatalogError> {
        let mut user = users.read(user_id)?;
        let mut friend = users.read(friend_id)?;

        user.friends.insert(friend_id);
        friend.friends.insert(user_id);

        users.update(user)?;
        users.update(friend)?;

        info!(%user_id, %friend_id, "friendship added");
        Ok(())
    }

    /// End a friendship on both sides.
    ///
    /// Removing a link that does not exist succeeds; a missing user does not.
    pub fn remove<S: EntityStore<User>>(
        users: &mut S,
        user_id: UserId,
        friend_id: UserId,
    ) -> Result<(), CatalogError> {
        let mut user = users.read(user_id)?;
        let mut friend = users.read(friend_id)?;

        user.friends.remove(&friend_id);
        friend.friends.remove(&user_id);

        users.update(user)?;
        users.update(friend)?;

        info!(%user_id, %friend_id, "friendship removed");
        Ok(())
    }

    /// Resolve a user's friends to full records, in ascending id order.
    ///
    /// Fails if the user is missing or if any friend id no longer resolves.
    pub fn friends_of<S: EntityStore<User>>(
        users: &S,
        user_id: UserId,
    ) -> Result<Vec<User>, CatalogError> {
        let user = users.read(user_id)?;
        Self::resolve(users, &user.friends)
    }

    /// Friends shared by two users, resolved to full records.
    pub fn common<S: EntityStore<User>>(
        users: &S,
        user_id: UserId,
        other_id: UserId,
    ) -> Result<Vec<User>, CatalogError> {
        let user = users.read(user_id)?;
        let other = users.read(other_id)?;

        let shared: BTreeSet<UserId> = user
            .friends
            .intersection(&other.friends)
            .copied()
            .collect();
        Self::resolve(users, &shared)
    }

    /// Look up every id in the set. The first dangling id fails the whole call.
    fn resolve<S: EntityStore<User>>(
        users: &S,
        ids: &BTreeSet<UserId>,
    ) -> Result<Vec<User>, CatalogError> {
        ids.iter().map(|id| users.read(*id)).collect()
    }
}
