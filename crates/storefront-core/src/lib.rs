//! Catalog, favorites, and configuration for the storefront browser.
//!
//! Everything here is synchronous. The [`Storefront`] is the one owned
//! mutable object a presentation layer holds; it is passed around by
//! reference rather than looked up from ambient state.

pub mod app_config;
pub mod catalog;
pub mod config;
pub mod favorites;
pub mod storefront;

use thiserror::Error;

pub use app_config::{AppConfig, Environment, LocationPermission};
pub use catalog::{load_catalog, Catalog, CatalogFile, Category, ContactKind, Entity};
pub use config::{load_app_config, load_app_config_from_env};
pub use favorites::{Favorite, FavoriteKey, FavoritesChange, FavoritesStore};
pub use storefront::Storefront;

/// Errors raised while looking up or loading catalog entities.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{category} {id} not found")]
    NotFound { category: Category, id: u32 },

    #[error("unknown category: {0}")]
    UnknownCategory(String),

    #[error("invalid favorite key \"{key}\": {reason}")]
    InvalidFavoriteKey { key: String, reason: String },

    #[error("failed to read catalog file {path}: {source}")]
    CatalogFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog file: {0}")]
    CatalogFileParse(#[from] serde_yaml::Error),

    #[error("catalog validation error: {0}")]
    Validation(String),
}

/// Errors raised while building [`AppConfig`] from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
