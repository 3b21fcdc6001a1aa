use crate::catalog::{Catalog, Category, Entity};
use crate::favorites::{Favorite, FavoriteKey, FavoritesChange, FavoritesStore};
use crate::CatalogError;

/// The catalog plus the user's favorites.
///
/// This is the whole query and mutation surface a presentation layer gets.
/// Screens hold a reference to it; nothing else touches the favorites.
#[derive(Debug)]
pub struct Storefront {
    catalog: Catalog,
    favorites: FavoritesStore,
}

impl Storefront {
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            favorites: FavoritesStore::new(),
        }
    }

    /// A storefront over the embedded seed catalog.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the embedded seed is invalid.
    pub fn seeded() -> Result<Self, CatalogError> {
        Ok(Self::new(Catalog::seeded()?))
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn stores(&self) -> &[Entity] {
        self.catalog.entities(Category::Store)
    }

    #[must_use]
    pub fn recommended(&self) -> &[Entity] {
        self.catalog.entities(Category::Recommended)
    }

    #[must_use]
    pub fn search(&self, category: Category, query: &str) -> Vec<&Entity> {
        self.catalog.search(category, query)
    }

    /// Resolve `(category, id)` to an entity.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` when the pair does not name a catalog
    /// entity. Callers render a "not found" view for it.
    pub fn get_entity(&self, category: Category, id: u32) -> Result<&Entity, CatalogError> {
        self.catalog.get(category, id)
    }

    #[must_use]
    pub fn is_favorite(&self, entity: &Entity) -> bool {
        self.favorites.is_favorite(entity)
    }

    /// Returns whether `entity` is a favorite after the toggle.
    pub fn toggle_favorite(&mut self, entity: &Entity) -> bool {
        self.favorites.toggle(entity)
    }

    pub fn add_to_favorites(&mut self, entity: &Entity) {
        self.favorites.add(entity);
    }

    pub fn remove_from_favorites(&mut self, key: FavoriteKey) {
        self.favorites.remove(key);
    }

    pub fn clear_favorites(&mut self) {
        self.favorites.clear();
    }

    #[must_use]
    pub fn list_favorites(&self) -> &[Favorite] {
        self.favorites.list()
    }

    /// Revision of the favorites collection, for cheap change detection.
    #[must_use]
    pub fn favorites_revision(&self) -> u64 {
        self.favorites.revision()
    }

    pub fn subscribe_favorites<F>(&mut self, listener: F)
    where
        F: Fn(&FavoritesChange) + Send + Sync + 'static,
    {
        self.favorites.subscribe(listener);
    }

    /// Toggle the entity named by `key`, resolving it through the catalog first.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if `key` does not name a catalog entity.
    pub fn toggle_favorite_by_key(&mut self, key: FavoriteKey) -> Result<bool, CatalogError> {
        let entity = self.catalog.get(key.category, key.id)?.clone();
        Ok(self.favorites.toggle(&entity))
    }
}
