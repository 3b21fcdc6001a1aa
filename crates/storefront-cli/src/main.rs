mod locate;
mod render;

use clap::{Parser, Subcommand};
use storefront_core::{load_catalog, Catalog, CatalogError, Category, FavoriteKey, Storefront};
use tracing_subscriber::EnvFilter;

use crate::locate::{run_locate, LocateArgs};
use crate::render::DetailTab;

#[derive(Debug, Parser)]
#[command(name = "storefront")]
#[command(about = "Browse stores and recommended items")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List stores, optionally filtered by title
    Stores {
        #[arg(long, short)]
        search: Option<String>,
    },
    /// List recommended items, optionally filtered by title
    Recommended {
        #[arg(long, short)]
        search: Option<String>,
    },
    /// Show the details view for one entity
    Show {
        /// `store` or `recommended`
        category: Category,
        id: u32,
        #[arg(long, value_enum, default_value_t = DetailTab::About)]
        tab: DetailTab,
    },
    /// Toggle favorites in order and print the resulting list
    Favorites {
        /// Favorite key such as `store-1`; repeatable
        #[arg(long = "toggle", value_name = "KEY")]
        toggles: Vec<FavoriteKey>,
        /// Clear all favorites after applying toggles
        #[arg(long)]
        clear: bool,
    },
    /// Resolve the device location to an address
    Locate {
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,
        /// Answer the permission prompt with "deny"
        #[arg(long)]
        deny: bool,
        /// Truncate long addresses as on a narrow display
        #[arg(long)]
        narrow: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = storefront_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let catalog = match &config.catalog_path {
        Some(path) => load_catalog(path)?,
        None => Catalog::seeded()?,
    };
    let mut storefront = Storefront::new(catalog);
    storefront.subscribe_favorites(|change| tracing::info!(?change, "favorites updated"));

    match cli.command {
        Some(Commands::Stores { search }) => {
            print!(
                "{}",
                render::entity_list(&storefront, Category::Store, search.as_deref().unwrap_or(""))
            );
        }
        Some(Commands::Recommended { search }) => {
            print!(
                "{}",
                render::entity_list(
                    &storefront,
                    Category::Recommended,
                    search.as_deref().unwrap_or("")
                )
            );
        }
        Some(Commands::Show { category, id, tab }) => {
            let entity = match storefront.get_entity(category, id) {
                Ok(entity) => entity,
                Err(CatalogError::NotFound { .. }) => {
                    anyhow::bail!("Store not found ({category} {id})")
                }
                Err(e) => return Err(e.into()),
            };
            print!("{}", render::details(&storefront, entity, tab));
        }
        Some(Commands::Favorites { toggles, clear }) => {
            for key in toggles {
                let now_favorite = storefront.toggle_favorite_by_key(key)?;
                tracing::debug!(%key, now_favorite, "toggled favorite");
            }
            if clear {
                storefront.clear_favorites();
            }
            print!("{}", render::favorites(&storefront));
        }
        Some(Commands::Locate {
            lat,
            lon,
            deny,
            narrow,
        }) => {
            let args = LocateArgs {
                position: lat.zip(lon),
                deny,
                narrow,
            };
            println!("{}", run_locate(&config, args).await?);
        }
        None => {
            print!("{}", render::entity_list(&storefront, Category::Store, ""));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests;
