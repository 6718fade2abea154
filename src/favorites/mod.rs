// ABOUTME: Favorites store persisting saved recipes in a single key-value slot
// ABOUTME: Identity-based add, remove, confirmed clear, export, and change observers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SpiceSync Contributors

//! # Favorites
//!
//! The collection is one JSON array stored under
//! [`FAVORITES_KEY`](crate::constants::storage::FAVORITES_KEY), newest first,
//! unique by [`RecipeId`](crate::models::RecipeId).
//!
//! Reads degrade: missing or corrupt data loads as an empty list.
//! Writes replace the whole slot at once, so a failed write leaves the
//! previous collection in place.

mod storage;

pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};

use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::constants::labels::CLEAR_CONFIRMATION;
use crate::constants::storage::{EXPORT_FILE_NAME, FAVORITES_KEY};
use crate::models::Recipe;

/// Asks the user to approve a destructive action
pub trait Confirm {
    /// Show `prompt` and report whether the user agreed
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Notified with the full collection after every successful write
pub trait FavoritesObserver: Send + Sync {
    /// The persisted collection changed to `favorites`
    fn favorites_changed(&self, favorites: &[Recipe]);
}

/// Favorites collection over a [`KeyValueStorage`]
pub struct FavoritesStore<S> {
    storage: S,
    key: String,
    observers: Vec<Arc<dyn FavoritesObserver>>,
}

impl FavoritesStore<FileStorage> {
    /// File-backed store inside `dir`
    #[must_use]
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        Self::new(FileStorage::new(dir))
    }
}

impl<S: KeyValueStorage> FavoritesStore<S> {
    /// Store using the standard favorites key
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, FAVORITES_KEY)
    }

    /// Store using a custom key
    #[must_use]
    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            observers: Vec::new(),
        }
    }

    /// Register an observer for collection changes
    pub fn subscribe(&mut self, observer: Arc<dyn FavoritesObserver>) {
        self.observers.push(observer);
    }

    /// Underlying storage
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Read the collection, reporting missing data as empty and corrupt data as an error
    ///
    /// # Errors
    ///
    /// Returns an error when storage cannot be read or does not hold a JSON array.
    pub fn try_load(&self) -> Result<Vec<Recipe>, StorageError> {
        self.storage
            .get(&self.key)?
            .map_or_else(|| Ok(Vec::new()), |raw| Self::parse_artifact(&raw))
    }

    /// Read the collection; failures are logged and load as empty
    #[must_use]
    pub fn load(&self) -> Vec<Recipe> {
        self.try_load().unwrap_or_else(|e| {
            warn!("Failed to load favorites: {e}");
            Vec::new()
        })
    }

    /// Replace the persisted collection
    ///
    /// # Errors
    ///
    /// Returns an error when serialization or the write fails; the previous
    /// collection is then still stored and observers are not notified.
    pub fn save(&self, favorites: &[Recipe]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(favorites)?;
        self.storage.set(&self.key, &raw).inspect_err(|e| {
            warn!("Failed to save favorites: {e}");
        })?;

        debug!(count = favorites.len(), "Saved favorites");
        for observer in &self.observers {
            observer.favorites_changed(favorites);
        }
        Ok(())
    }

    /// Number of saved recipes
    #[must_use]
    pub fn count(&self) -> usize {
        self.load().len()
    }

    /// Whether a recipe with the same identity is saved
    #[must_use]
    pub fn is_favorited(&self, recipe: &Recipe) -> bool {
        let id = recipe.identity();
        self.load().iter().any(|saved| saved.identity() == id)
    }

    /// Saved recipe with the same identity as `recipe`
    #[must_use]
    pub fn find(&self, recipe: &Recipe) -> Option<Recipe> {
        let id = recipe.identity();
        self.load().into_iter().find(|saved| saved.identity() == id)
    }

    /// Save `recipe` at the front unless its identity is already present
    ///
    /// Returns `false` without writing when the recipe was already saved.
    ///
    /// # Errors
    ///
    /// Returns an error when the write fails.
    pub fn add(&self, recipe: &Recipe) -> Result<bool, StorageError> {
        let mut favorites = self.load();
        let id = recipe.identity();
        if favorites.iter().any(|saved| saved.identity() == id) {
            debug!(recipe = %id, "Already a favorite");
            return Ok(false);
        }

        favorites.insert(0, recipe.normalized());
        self.save(&favorites)?;
        info!(recipe = %id, "Added favorite");
        Ok(true)
    }

    /// Remove every entry with the identity of `recipe`; absent entries are a no-op
    ///
    /// # Errors
    ///
    /// Returns an error when the write fails.
    pub fn remove(&self, recipe: &Recipe) -> Result<(), StorageError> {
        let id = recipe.identity();
        let mut favorites = self.load();
        let before = favorites.len();
        favorites.retain(|saved| saved.identity() != id);

        self.save(&favorites)?;
        if favorites.len() < before {
            info!(recipe = %id, "Removed favorite");
        }
        Ok(())
    }

    /// Flip the saved state of `recipe`; returns the new state
    ///
    /// # Errors
    ///
    /// Returns an error when the write fails.
    pub fn toggle(&self, recipe: &Recipe) -> Result<bool, StorageError> {
        if self.is_favorited(recipe) {
            self.remove(recipe)?;
            Ok(false)
        } else {
            self.add(recipe)?;
            Ok(true)
        }
    }

    /// Empty the collection after the user confirms
    ///
    /// Returns `false` and leaves storage untouched when confirmation is declined.
    ///
    /// # Errors
    ///
    /// Returns an error when the write fails.
    pub fn clear(&self, confirm: &dyn Confirm) -> Result<bool, StorageError> {
        if !confirm.confirm(CLEAR_CONFIRMATION) {
            debug!("Clear favorites declined");
            return Ok(false);
        }
        self.save(&[])?;
        info!("Cleared favorites");
        Ok(true)
    }

    /// Pretty-printed JSON of the collection; does not modify state
    ///
    /// # Errors
    ///
    /// Returns an error when serialization fails.
    pub fn export(&self) -> Result<String, StorageError> {
        Ok(serde_json::to_string_pretty(&self.load())?)
    }

    /// Write the export artifact into `dir` as `spicesync_favorites.json`
    ///
    /// # Errors
    ///
    /// Returns an error when serialization or the write fails.
    pub fn export_to_dir(&self, dir: &Path) -> Result<PathBuf, StorageError> {
        let path = dir.join(EXPORT_FILE_NAME);
        self.export_to_file(&path)?;
        Ok(path)
    }

    /// Write the export artifact to `path`
    ///
    /// # Errors
    ///
    /// Returns an error when serialization or the write fails.
    pub fn export_to_file(&self, path: &Path) -> Result<(), StorageError> {
        let artifact = self.export()?;
        fs::write(path, artifact).map_err(|source| StorageError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "Exported favorites");
        Ok(())
    }

    /// Decode a stored value or export artifact
    ///
    /// Entries that are not recipes are skipped so one bad item cannot
    /// cost the rest of the collection on the next write.
    ///
    /// # Errors
    ///
    /// Returns an error when `raw` is not a JSON array.
    pub fn parse_artifact(raw: &str) -> Result<Vec<Recipe>, StorageError> {
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        match serde_json::from_str::<Value>(raw)? {
            Value::Array(items) => Ok(items
                .into_iter()
                .enumerate()
                .filter_map(|(index, item)| decode_entry(index, item))
                .collect()),
            Value::Null => Ok(Vec::new()),
            other => Err(StorageError::Corrupt(format!(
                "expected an array, found {}",
                json_kind(&other)
            ))),
        }
    }
}

fn decode_entry(index: usize, item: Value) -> Option<Recipe> {
    if !item.is_object() {
        warn!(index, "Skipping favorite that is {}", json_kind(&item));
        return None;
    }
    serde_json::from_value(item)
        .inspect_err(|e| warn!(index, "Skipping undecodable favorite: {e}"))
        .ok()
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Ingredient;
    use std::sync::Mutex;

    fn soup() -> Recipe {
        Recipe::new("Soup").with_ingredients(vec![
            Ingredient::plain("Carrot"),
            Ingredient::plain("Onion"),
        ])
    }

    #[derive(Default)]
    struct Recorder {
        counts: Mutex<Vec<usize>>,
    }

    impl FavoritesObserver for Recorder {
        fn favorites_changed(&self, favorites: &[Recipe]) {
            self.counts.lock().unwrap().push(favorites.len());
        }
    }

    #[test]
    fn test_add_prepends_and_deduplicates() {
        let store = FavoritesStore::new(MemoryStorage::new());
        assert!(store.add(&soup()).unwrap());
        assert!(store.add(&Recipe::new("Stew")).unwrap());
        assert!(!store.add(&soup().with_steps(["different"])).unwrap());

        let titles: Vec<String> = store.load().into_iter().map(|r| r.title).collect();
        assert_eq!(titles, vec!["Stew", "Soup"]);
    }

    #[test]
    fn test_corrupt_slot_loads_empty() {
        let store = FavoritesStore::new(MemoryStorage::with_value(FAVORITES_KEY, "{not json"));
        assert!(store.try_load().is_err());
        assert!(store.load().is_empty());

        let store = FavoritesStore::new(MemoryStorage::with_value(FAVORITES_KEY, "{}"));
        assert!(matches!(store.try_load(), Err(StorageError::Corrupt(_))));
    }

    #[test]
    fn test_bad_entries_do_not_cost_the_rest() {
        let store = FavoritesStore::new(MemoryStorage::with_value(
            FAVORITES_KEY,
            r#"[{"title":"Keep me"}, null, 42, "Stew"]"#,
        ));
        assert_eq!(store.count(), 1);

        store.add(&Recipe::new("New")).unwrap();
        let titles: Vec<String> = store.load().into_iter().map(|r| r.title).collect();
        assert_eq!(titles, vec!["New", "Keep me"]);
    }

    #[test]
    fn test_clear_requires_confirmation() {
        let store = FavoritesStore::new(MemoryStorage::new());
        store.add(&soup()).unwrap();

        assert!(!store.clear(&|_: &str| false).unwrap());
        assert_eq!(store.count(), 1);

        let seen = Mutex::new(String::new());
        let confirm = |prompt: &str| {
            *seen.lock().unwrap() = prompt.to_owned();
            true
        };
        assert!(store.clear(&confirm).unwrap());
        assert_eq!(store.count(), 0);
        assert_eq!(
            *seen.lock().unwrap(),
            "Clear all favorites? This cannot be undone."
        );
    }

    #[test]
    fn test_observers_see_each_write() {
        let recorder = Arc::new(Recorder::default());
        let mut store = FavoritesStore::new(MemoryStorage::new());
        store.subscribe(recorder.clone());

        store.add(&soup()).unwrap();
        store.add(&soup()).unwrap();
        store.remove(&soup()).unwrap();

        assert_eq!(*recorder.counts.lock().unwrap(), vec![1, 0]);
    }

    #[test]
    fn test_toggle() {
        let store = FavoritesStore::new(MemoryStorage::new());
        assert!(store.toggle(&soup()).unwrap());
        assert!(store.is_favorited(&soup()));
        assert!(!store.toggle(&soup()).unwrap());
        assert!(!store.is_favorited(&soup()));
    }

    #[test]
    fn test_export_is_pretty_and_read_only() {
        let store = FavoritesStore::new(MemoryStorage::new());
        store.add(&soup()).unwrap();
        let before = store.storage().get(FAVORITES_KEY).unwrap();

        let artifact = store.export().unwrap();
        assert!(artifact.starts_with("[\n  {"));
        assert_eq!(store.storage().get(FAVORITES_KEY).unwrap(), before);
    }
}
