//! The favorites collection.
//!
//! Favorites are kept in insertion order. Re-adding a removed entity places
//! it at the end, never back at its old position.

use std::str::FromStr;

use crate::catalog::{Category, Entity};
use crate::CatalogError;

/// Composite identity of a favorite, rendered as `"{category}-{id}"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FavoriteKey {
    pub category: Category,
    pub id: u32,
}

impl FavoriteKey {
    #[must_use]
    pub fn new(category: Category, id: u32) -> Self {
        Self { category, id }
    }

    #[must_use]
    pub fn of(entity: &Entity) -> Self {
        Self::new(entity.category, entity.id)
    }
}

impl std::fmt::Display for FavoriteKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.category, self.id)
    }
}

impl FromStr for FavoriteKey {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| CatalogError::InvalidFavoriteKey {
            key: s.to_string(),
            reason: reason.to_string(),
        };

        let (category, id) = s
            .split_once('-')
            .ok_or_else(|| invalid("expected <category>-<id>"))?;
        let category = category
            .parse::<Category>()
            .map_err(|_| invalid("unknown category"))?;
        let id = id.parse::<u32>().map_err(|e| invalid(&e.to_string()))?;
        Ok(Self::new(category, id))
    }
}

impl Entity {
    /// The key this entity is stored under when marked as a favorite.
    #[must_use]
    pub fn favorite_key(&self) -> FavoriteKey {
        FavoriteKey::of(self)
    }
}

/// A favorited entity: its key plus a copy of the display fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Favorite {
    pub key: FavoriteKey,
    pub entity: Entity,
}

/// An effective change to the favorites collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoritesChange {
    Added(FavoriteKey),
    Removed(FavoriteKey),
    Cleared,
}

type Listener = Box<dyn Fn(&FavoritesChange) + Send + Sync>;

/// Ordered, deduplicated set of favorites.
///
/// Every mutation that actually changes the collection bumps
/// [`revision`](Self::revision) and notifies subscribers. Calls that leave
/// the collection as it was do neither.
#[derive(Default)]
pub struct FavoritesStore {
    favorites: Vec<Favorite>,
    revision: u64,
    listeners: Vec<Listener>,
}

impl std::fmt::Debug for FavoritesStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavoritesStore")
            .field("favorites", &self.favorites)
            .field("revision", &self.revision)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl FavoritesStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback invoked after every effective change.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: Fn(&FavoritesChange) + Send + Sync + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Counter that increases on every effective change.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[must_use]
    pub fn contains(&self, key: FavoriteKey) -> bool {
        self.favorites.iter().any(|fav| fav.key == key)
    }

    #[must_use]
    pub fn is_favorite(&self, entity: &Entity) -> bool {
        self.contains(entity.favorite_key())
    }

    /// Append `entity` unless it is already a favorite. Returns whether it was added.
    pub fn add(&mut self, entity: &Entity) -> bool {
        let key = entity.favorite_key();
        if self.contains(key) {
            return false;
        }
        self.favorites.push(Favorite {
            key,
            entity: entity.clone(),
        });
        self.changed(FavoritesChange::Added(key));
        true
    }

    /// Remove the favorite stored under `key`. Returns whether anything was removed.
    pub fn remove(&mut self, key: FavoriteKey) -> bool {
        let before = self.favorites.len();
        self.favorites.retain(|fav| fav.key != key);
        if self.favorites.len() == before {
            return false;
        }
        self.changed(FavoritesChange::Removed(key));
        true
    }

    /// Flip the favorite state of `entity`. Returns the state after the flip.
    pub fn toggle(&mut self, entity: &Entity) -> bool {
        if self.is_favorite(entity) {
            self.remove(entity.favorite_key());
            false
        } else {
            self.add(entity);
            true
        }
    }

    pub fn clear(&mut self) {
        if self.favorites.is_empty() {
            return;
        }
        self.favorites.clear();
        self.changed(FavoritesChange::Cleared);
    }

    /// Favorites in insertion order.
    #[must_use]
    pub fn list(&self) -> &[Favorite] {
        &self.favorites
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.favorites.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.favorites.is_empty()
    }

    fn changed(&mut self, change: FavoritesChange) {
        self.revision += 1;
        tracing::debug!(
            ?change,
            revision = self.revision,
            count = self.favorites.len(),
            "favorites changed"
        );
        for listener in &self.listeners {
            listener(&change);
        }
    }
}
