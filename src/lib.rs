pub mod app;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod favorites;
pub mod model;
pub mod render;
pub mod state;
pub mod store;

pub use app::App;
pub use client::{EdamamClient, Filters, RecipeSource};
pub use config::AppConfig;
pub use error::{RecipeError, Result};
pub use favorites::FavoritesStore;
pub use model::{DietTag, HealthTag, Nutrient, Recipe};
pub use state::{FetchRequest, FetchTicket, ResultsState, SearchState, Section};
pub use store::{FileStore, KeyValueStore, MemoryStore};

use log::debug;

/// Load the file-backed favorites described by `config`.
///
/// Needs no API credentials.
pub fn open_favorites(config: &AppConfig) -> FavoritesStore<FileStore> {
    let storage = FileStore::new(&config.storage.dir);
    debug!("Favorites stored in {}", storage.root().display());
    FavoritesStore::load_with_key(storage, config.storage.favorites_key.clone())
}

/// Build an application wired to the recipe API and file-backed favorites,
/// as described by `config`.
pub fn open_app(config: &AppConfig) -> Result<App<EdamamClient, FileStore>> {
    let client = EdamamClient::new(&config.api)?;
    Ok(App::new(client, open_favorites(config)))
}

/// One-off search without any UI state.
pub async fn search_recipes(
    config: &AppConfig,
    query: &str,
    filters: &Filters,
) -> Result<Vec<Recipe>> {
    let client = EdamamClient::new(&config.api)?;
    client.search(query.trim(), filters).await
}
