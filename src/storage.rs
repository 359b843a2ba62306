// Key-value storage backends and JSON document helpers

use crate::models::{AppSettings, ShoppingList};
use eyre::{Context, Result, eyre};
use fs2::FileExt;
use serde::{Serialize, de::DeserializeOwned};
use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Key holding the JSON array of every list
pub const LISTS_KEY: &str = "shopping_lists";
/// Key holding the settings object
pub const SETTINGS_KEY: &str = "shopping_settings";

/// Synchronous string-keyed storage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-process storage, mostly for tests and previews
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One `<key>.json` file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open or create a storage directory
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let dir = path.as_ref().to_path_buf();
        fs::create_dir_all(&dir).context("Failed to create storage directory")?;
        debug!(dir = ?dir, "Opened file storage");
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(Some(content))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        let tmp_path = path.with_extension("json.tmp");
        let lock_path = path.with_extension("json.lock");

        let lock = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)
            .with_context(|| format!("Failed to open {}", lock_path.display()))?;
        lock.lock_exclusive().context("Failed to acquire file lock")?;

        // Readers only ever see the old or the new document
        let mut file = fs::File::create(&tmp_path)
            .with_context(|| format!("Failed to open {} for writing", tmp_path.display()))?;
        file.write_all(value.as_bytes())?;
        file.sync_all()?;
        fs::rename(&tmp_path, &path).with_context(|| format!("Failed to replace {}", path.display()))?;

        // Lock is released when the lock file is dropped
        Ok(())
    }
}

fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(eyre!("Storage key cannot be empty"));
    }
    if key.len() > 64 {
        return Err(eyre!("Storage key too long: {} (max 64 chars)", key));
    }
    if !key.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '-') {
        return Err(eyre!("Invalid storage key: {} (must be alphanumeric with _/-)", key));
    }
    Ok(())
}

/// A value persisted as a single JSON document under a fixed key
pub trait Document: Serialize + DeserializeOwned + Default {
    fn storage_key() -> &'static str;
}

impl Document for Vec<ShoppingList> {
    fn storage_key() -> &'static str {
        LISTS_KEY
    }
}

impl Document for AppSettings {
    fn storage_key() -> &'static str {
        SETTINGS_KEY
    }
}

/// Load a document, degrading to its default when absent or malformed.
///
/// Failing to read the storage itself is an error, so a later write cannot
/// replace data that is still there.
pub fn load_document<D: Document, S: KeyValueStore + ?Sized>(storage: &S) -> Result<D> {
    let key = D::storage_key();

    let Some(raw) = storage
        .get(key)
        .with_context(|| format!("Failed to read stored {}", key))?
    else {
        debug!(key, "No stored document, using default");
        return Ok(D::default());
    };

    match serde_json::from_str(&raw) {
        Ok(doc) => {
            info!(key, bytes = raw.len(), "Loaded stored document");
            Ok(doc)
        }
        Err(e) => {
            warn!(key, error = ?e, "Failed to parse stored document, using default");
            Ok(D::default())
        }
    }
}

/// Serialize and write a document under its key
pub fn save_document<D: Document, S: KeyValueStore + ?Sized>(storage: &mut S, doc: &D) -> Result<()> {
    let key = D::storage_key();
    let json = serde_json::to_string(doc).context("Failed to serialize document")?;
    storage
        .set(key, &json)
        .with_context(|| format!("Failed to persist {}", key))?;
    debug!(key, bytes = json.len(), "Persisted document");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SortField, Theme};
    use tempfile::TempDir;

    #[test]
    fn test_memory_storage_get_set() {
        let mut storage = MemoryStorage::new();
        assert!(storage.get("k").unwrap().is_none());

        storage.set("k", "v1").unwrap();
        storage.set("k", "v2").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v2"));
    }

    #[test]
    fn test_file_storage_creates_directory() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("nested/shoplist");

        let storage = FileStorage::open(&dir).unwrap();
        assert!(dir.exists());
        assert_eq!(storage.dir(), dir.as_path());
    }

    #[test]
    fn test_file_storage_overwrites_whole_value() {
        let temp = TempDir::new().unwrap();
        let mut storage = FileStorage::open(temp.path()).unwrap();

        storage.set("shopping_lists", "[1,2,3,4,5,6]").unwrap();
        storage.set("shopping_lists", "[]").unwrap();

        assert_eq!(storage.get("shopping_lists").unwrap().as_deref(), Some("[]"));
        let content = fs::read_to_string(temp.path().join("shopping_lists.json")).unwrap();
        assert_eq!(content, "[]");
    }

    #[test]
    fn test_file_storage_leaves_no_temp_file() {
        let temp = TempDir::new().unwrap();
        let mut storage = FileStorage::open(temp.path()).unwrap();

        storage.set("shopping_lists", "[]").unwrap();
        fs::write(temp.path().join("shopping_lists.json.tmp"), "[{torn").unwrap();
        storage.set("shopping_lists", "[1]").unwrap();

        assert!(!temp.path().join("shopping_lists.json.tmp").exists());
        assert_eq!(storage.get("shopping_lists").unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn test_file_storage_missing_key() {
        let temp = TempDir::new().unwrap();
        let storage = FileStorage::open(temp.path()).unwrap();
        assert!(storage.get("nothing_here").unwrap().is_none());
    }

    #[test]
    fn test_file_storage_rejects_bad_keys() {
        let temp = TempDir::new().unwrap();
        let mut storage = FileStorage::open(temp.path()).unwrap();

        assert!(storage.set("../escape", "x").is_err());
        assert!(storage.set("", "x").is_err());
        assert!(storage.get(&"a".repeat(65)).is_err());
    }

    #[test]
    fn test_load_document_absent_is_default() {
        let storage = MemoryStorage::new();
        let lists: Vec<ShoppingList> = load_document(&storage).unwrap();
        assert!(lists.is_empty());
        assert_eq!(load_document::<AppSettings, _>(&storage).unwrap(), AppSettings::default());
    }

    #[test]
    fn test_load_document_malformed_is_default() {
        let storage = MemoryStorage::new()
            .with_entry(LISTS_KEY, "{malformed json")
            .with_entry(SETTINGS_KEY, r#"{"theme":"neon"}"#);

        let lists: Vec<ShoppingList> = load_document(&storage).unwrap();
        assert!(lists.is_empty());
        assert_eq!(load_document::<AppSettings, _>(&storage).unwrap(), AppSettings::default());
    }

    #[test]
    fn test_load_document_merges_partial_settings() {
        let storage = MemoryStorage::new().with_entry(SETTINGS_KEY, r#"{"defaultSort":"price"}"#);
        let settings: AppSettings = load_document(&storage).unwrap();
        assert_eq!(settings.default_sort, SortField::Price);
        assert_eq!(settings.theme, Theme::System);
    }

    /// Storage whose reads always fail
    struct UnreadableStorage;

    impl KeyValueStore for UnreadableStorage {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(eyre!("permission denied"))
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_load_document_read_failure_is_error() {
        let err = load_document::<Vec<ShoppingList>, _>(&UnreadableStorage).unwrap_err();
        assert!(format!("{:#}", err).contains("permission denied"));
    }

    #[test]
    fn test_save_document_uses_fixed_key() {
        let mut storage = MemoryStorage::new();
        let settings = AppSettings {
            theme: Theme::Dark,
            ..AppSettings::default()
        };
        save_document(&mut storage, &settings).unwrap();

        let raw = storage.get(SETTINGS_KEY).unwrap().unwrap();
        assert_eq!(
            raw,
            r#"{"theme":"dark","defaultSort":"category","defaultSortDirection":"asc"}"#
        );
    }
}
