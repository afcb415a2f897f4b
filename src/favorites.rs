use crate::error::Result;
use crate::model::Recipe;
use crate::store::KeyValueStore;
use log::{debug, warn};
use std::collections::HashSet;

/// Storage key used when none is configured
pub const DEFAULT_FAVORITES_KEY: &str = "favorites";

/// Ordered list of saved recipes, mirrored to durable storage.
///
/// Recipes are identified by URI; the list never holds two entries with
/// the same URI and keeps insertion order. Every mutation that changes the
/// list rewrites the whole list under a single key. If that write fails the
/// in-memory list keeps the change and the error is returned to the caller.
pub struct FavoritesStore<S: KeyValueStore> {
    storage: S,
    key: String,
    recipes: Vec<Recipe>,
}

impl<S: KeyValueStore> FavoritesStore<S> {
    /// Load favorites stored under [`DEFAULT_FAVORITES_KEY`].
    pub fn load(storage: S) -> Self {
        Self::load_with_key(storage, DEFAULT_FAVORITES_KEY)
    }

    /// Load favorites stored under `key`.
    ///
    /// Never fails: missing, unreadable or malformed data yields an empty list.
    pub fn load_with_key(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let recipes = match storage.get(&key) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Recipe>>(&raw) {
                Ok(recipes) => dedup_by_uri(recipes),
                Err(e) => {
                    warn!("Ignoring malformed favorites under '{}': {}", key, e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Could not read favorites under '{}': {}", key, e);
                Vec::new()
            }
        };
        debug!("Loaded {} favorites", recipes.len());

        Self {
            storage,
            key,
            recipes,
        }
    }

    pub fn is_favorite(&self, uri: &str) -> bool {
        self.recipes.iter().any(|r| r.uri == uri)
    }

    /// Append `recipe` unless a recipe with the same URI is already saved.
    pub fn add(&mut self, recipe: Recipe) -> Result<()> {
        if self.is_favorite(&recipe.uri) {
            return Ok(());
        }
        self.recipes.push(recipe);
        self.persist()
    }

    /// Remove the recipe with this URI. Returns whether anything was removed.
    pub fn remove(&mut self, uri: &str) -> Result<bool> {
        let before = self.recipes.len();
        self.recipes.retain(|r| r.uri != uri);
        if self.recipes.len() == before {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    /// Remove the recipe if saved, add it otherwise.
    /// Returns whether the recipe is saved afterwards.
    pub fn toggle(&mut self, recipe: &Recipe) -> Result<bool> {
        if self.is_favorite(&recipe.uri) {
            self.remove(&recipe.uri)?;
            Ok(false)
        } else {
            self.add(recipe.clone())?;
            Ok(true)
        }
    }

    pub fn list(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn get(&self, index: usize) -> Option<&Recipe> {
        self.recipes.get(index)
    }

    pub fn count(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn persist(&self) -> Result<()> {
        let serialized = serde_json::to_string(&self.recipes)?;
        self.storage.set(&self.key, &serialized).map_err(|e| {
            warn!("Failed to persist {} favorites: {}", self.recipes.len(), e);
            e
        })
    }
}

fn dedup_by_uri(recipes: Vec<Recipe>) -> Vec<Recipe> {
    let mut seen = HashSet::new();
    recipes
        .into_iter()
        .filter(|r| seen.insert(r.uri.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecipeError;
    use crate::store::MemoryStore;

    /// Storage whose reads always fail.
    struct UnreadableStore;

    impl KeyValueStore for UnreadableStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(RecipeError::Storage("permission denied".to_string()))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Ok(())
        }
    }

    fn recipe(uri: &str, label: &str) -> Recipe {
        Recipe {
            uri: uri.to_string(),
            label: label.to_string(),
            calories: 500.0,
            servings: 2.0,
            ..Default::default()
        }
    }

    fn stored(store: &FavoritesStore<MemoryStore>) -> Option<String> {
        store.storage().get(DEFAULT_FAVORITES_KEY).unwrap()
    }

    #[test]
    fn test_load_empty_storage() {
        let store = FavoritesStore::load(MemoryStore::new());
        assert_eq!(store.count(), 0);
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_load_malformed_storage() {
        for raw in ["not json", "{\"uri\": 1}", "[{\"label\": \"no uri\"}]", ""] {
            let storage = MemoryStore::with_value(DEFAULT_FAVORITES_KEY, raw);
            let store = FavoritesStore::load(storage);
            assert_eq!(store.count(), 0, "input: {:?}", raw);
        }
    }

    #[test]
    fn test_load_unreadable_storage() {
        let mut store = FavoritesStore::load(UnreadableStore);
        assert_eq!(store.count(), 0);
        assert!(!store.is_favorite("a"));

        // Still usable once loaded
        store.add(recipe("a", "A")).unwrap();
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn test_load_drops_duplicate_uris() {
        let raw = r#"[{"uri": "a", "label": "A"}, {"uri": "b", "label": "B"}, {"uri": "a", "label": "A again"}]"#;
        let store = FavoritesStore::load(MemoryStore::with_value(DEFAULT_FAVORITES_KEY, raw));

        let labels: Vec<_> = store.list().iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["A", "B"]);
    }

    #[test]
    fn test_add_then_is_favorite() {
        let mut store = FavoritesStore::load(MemoryStore::new());
        store.add(recipe("a", "A")).unwrap();
        assert!(store.is_favorite("a"));
        assert!(!store.is_favorite("b"));
    }

    #[test]
    fn test_remove_then_not_favorite() {
        let mut store = FavoritesStore::load(MemoryStore::new());
        store.add(recipe("a", "A")).unwrap();
        assert!(store.remove("a").unwrap());
        assert!(!store.is_favorite("a"));
        assert!(!store.remove("a").unwrap());
    }

    #[test]
    fn test_add_twice_keeps_single_entry_and_order() {
        let mut store = FavoritesStore::load(MemoryStore::new());
        store.add(recipe("a", "A")).unwrap();
        store.add(recipe("b", "B")).unwrap();
        store.add(recipe("a", "A duplicate")).unwrap();

        let uris: Vec<_> = store.list().iter().map(|r| r.uri.as_str()).collect();
        assert_eq!(uris, vec!["a", "b"]);
        assert_eq!(store.list()[0].label, "A");
        assert_eq!(store.count(), store.list().len());
    }

    #[test]
    fn test_toggle_twice_restores_membership_and_storage() {
        let mut store = FavoritesStore::load(MemoryStore::new());
        store.add(recipe("a", "A")).unwrap();
        let snapshot = stored(&store);

        let r = recipe("b", "B");
        assert!(store.toggle(&r).unwrap());
        assert!(store.is_favorite("b"));
        assert!(!store.toggle(&r).unwrap());
        assert!(!store.is_favorite("b"));

        assert_eq!(stored(&store), snapshot);
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn test_every_mutation_is_persisted() {
        let mut store = FavoritesStore::load(MemoryStore::new());
        store.add(recipe("a", "A")).unwrap();
        store.add(recipe("b", "B")).unwrap();
        store.remove("a").unwrap();

        let reloaded: Vec<Recipe> = serde_json::from_str(&stored(&store).unwrap()).unwrap();
        assert_eq!(reloaded, vec![recipe("b", "B")]);
    }

    #[test]
    fn test_persisted_list_reloads() {
        let mut store = FavoritesStore::load(MemoryStore::new());
        store.add(recipe("a", "A")).unwrap();
        store.add(recipe("b", "B")).unwrap();
        let raw = stored(&store).unwrap();

        let reloaded = FavoritesStore::load(MemoryStore::with_value(DEFAULT_FAVORITES_KEY, &raw));
        let labels: Vec<_> = reloaded.list().iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["A", "B"]);
    }

    #[test]
    fn test_write_failure_keeps_in_memory_change() {
        let mut store = FavoritesStore::load(MemoryStore::new());
        store.storage().set_simulate_write_error(true);

        assert!(store.add(recipe("a", "A")).is_err());
        assert!(store.is_favorite("a"));
        assert_eq!(stored(&store), None);
    }

    #[test]
    fn test_custom_key() {
        let mut store = FavoritesStore::load_with_key(MemoryStore::new(), "saved");
        store.add(recipe("a", "A")).unwrap();
        assert!(store.storage().get("saved").unwrap().is_some());
        assert!(store.storage().get(DEFAULT_FAVORITES_KEY).unwrap().is_none());
    }
}
