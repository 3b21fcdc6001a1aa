use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CatalogError;

/// Seed catalog compiled into the binary.
const SEED_CATALOG: &str = include_str!("../seed/catalog.yaml");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Store,
    Recommended,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Store => write!(f, "store"),
            Category::Recommended => write!(f, "recommended"),
        }
    }
}

impl FromStr for Category {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "store" => Ok(Category::Store),
            "recommended" => Ok(Category::Recommended),
            _ => Err(CatalogError::UnknownCategory(s.to_string())),
        }
    }
}

/// Which contact channel of an entity a caller wants to reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    Phone,
    Email,
    Website,
}

/// A catalog item. Identity is `(category, id)`; `id` alone repeats across
/// categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub title: String,
    pub distance_km: f64,
    /// Opening hours, display-only (e.g. `"6:00AM-10:00PM"`).
    pub active_time: String,
    /// Average rating on a 0–5 scale.
    pub rating: f64,
    /// Opaque image resource reference.
    pub image: String,
    pub about: String,
    pub phone: String,
    pub website: String,
    pub email: String,
    pub category: Category,
}

impl Entity {
    /// Raw contact value for `kind`, without any URI scheme.
    #[must_use]
    pub fn contact(&self, kind: ContactKind) -> &str {
        match kind {
            ContactKind::Phone => &self.phone,
            ContactKind::Email => &self.email,
            ContactKind::Website => &self.website,
        }
    }
}

/// On-disk shape of a catalog file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    pub stores: Vec<Entity>,
    pub recommended: Vec<Entity>,
}

/// The two fixed entity collections. Immutable once built.
#[derive(Debug, Clone)]
pub struct Catalog {
    stores: Vec<Entity>,
    recommended: Vec<Entity>,
}

impl Catalog {
    /// Build a catalog from the embedded seed data.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the embedded seed fails to parse or validate.
    pub fn seeded() -> Result<Self, CatalogError> {
        Self::from_yaml(SEED_CATALOG)
    }

    /// Parse and validate a catalog from YAML text.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::CatalogFileParse` on malformed YAML and
    /// `CatalogError::Validation` when the contents break a catalog invariant.
    pub fn from_yaml(content: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_yaml::from_str(content)?;
        Self::from_file(file)
    }

    /// Validate an already-deserialized catalog file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Validation` when the contents break a catalog invariant.
    pub fn from_file(file: CatalogFile) -> Result<Self, CatalogError> {
        validate_collection(&file.stores, Category::Store)?;
        validate_collection(&file.recommended, Category::Recommended)?;
        Ok(Self {
            stores: file.stores,
            recommended: file.recommended,
        })
    }

    /// All entities of `category`, in seed order.
    #[must_use]
    pub fn entities(&self, category: Category) -> &[Entity] {
        match category {
            Category::Store => &self.stores,
            Category::Recommended => &self.recommended,
        }
    }

    /// Look up an entity by id within its category.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` when no entity of that category has `id`.
    pub fn get(&self, category: Category, id: u32) -> Result<&Entity, CatalogError> {
        self.entities(category)
            .iter()
            .find(|entity| entity.id == id)
            .ok_or(CatalogError::NotFound { category, id })
    }

    /// Entities of `category` whose title contains `query`, ignoring case.
    ///
    /// An empty query matches everything. Seed order is preserved.
    #[must_use]
    pub fn search(&self, category: Category, query: &str) -> Vec<&Entity> {
        let needle = query.to_lowercase();
        self.entities(category)
            .iter()
            .filter(|entity| entity.title.to_lowercase().contains(&needle))
            .collect()
    }
}

/// Load and validate a catalog from a YAML file.
///
/// # Errors
///
/// Returns `CatalogError` if the file cannot be read, parsed, or fails validation.
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let content = std::fs::read_to_string(path).map_err(|e| CatalogError::CatalogFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let catalog = Catalog::from_yaml(&content)?;
    tracing::debug!(
        path = %path.display(),
        stores = catalog.stores.len(),
        recommended = catalog.recommended.len(),
        "loaded catalog file"
    );
    Ok(catalog)
}

fn validate_collection(entities: &[Entity], expected: Category) -> Result<(), CatalogError> {
    let mut seen_ids = HashSet::new();

    for entity in entities {
        if entity.title.trim().is_empty() {
            return Err(CatalogError::Validation(format!(
                "{expected} {} has an empty title",
                entity.id
            )));
        }

        if entity.category != expected {
            return Err(CatalogError::Validation(format!(
                "'{}' is listed under {expected} but declares category {}",
                entity.title, entity.category
            )));
        }

        if !(0.0..=5.0).contains(&entity.rating) {
            return Err(CatalogError::Validation(format!(
                "'{}' has invalid rating {}; must be between 0 and 5",
                entity.title, entity.rating
            )));
        }

        if !entity.distance_km.is_finite() || entity.distance_km < 0.0 {
            return Err(CatalogError::Validation(format!(
                "'{}' has invalid distance {}",
                entity.title, entity.distance_km
            )));
        }

        if !seen_ids.insert(entity.id) {
            return Err(CatalogError::Validation(format!(
                "duplicate {expected} id: {}",
                entity.id
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
