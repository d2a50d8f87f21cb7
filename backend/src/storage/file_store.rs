//! File-backed key-value store.
//!
//! Each key is one file, `<base>/<key>.json`. Writes go to a temp file that
//! is then renamed over the target, so a crash mid-write leaves the previous
//! value in place.

use anyhow::{bail, Context, Result};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

use super::traits::KeyValueStore;

#[derive(Debug, Clone)]
pub struct FileStore {
    base_directory: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `base_directory`, creating it if needed
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_directory = base_directory.as_ref().to_path_buf();
        if !base_directory.exists() {
            fs::create_dir_all(&base_directory)
                .with_context(|| format!("Failed to create data directory {:?}", base_directory))?;
            info!("Created data directory: {:?}", base_directory);
        }
        Ok(Self { base_directory })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    fn key_path(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
            bail!("Invalid storage key: {:?}", key);
        }
        Ok(self.base_directory.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key)?;
        if !path.exists() {
            debug!("No stored value for key {}", key);
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {:?}", path))?;
        Ok(Some(content))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key)?;

        // Atomic write using temp file
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, value).with_context(|| format!("Failed to write {:?}", temp_path))?;
        fs::rename(&temp_path, &path)
            .with_context(|| format!("Failed to move {:?} into place", temp_path))?;

        debug!("Stored {} bytes under key {}", value.len(), key);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.key_path(key)?;
        if path.exists() {
            fs::remove_file(&path).with_context(|| format!("Failed to remove {:?}", path))?;
            debug!("Removed key {}", key);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test_store() -> (FileStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().join("data")).unwrap();
        (store, temp_dir)
    }

    #[test]
    fn test_new_creates_directory() {
        let (store, _temp_dir) = setup_test_store();
        assert!(store.base_directory().is_dir());
    }

    #[test]
    fn test_set_and_get() {
        let (store, _temp_dir) = setup_test_store();
        assert_eq!(store.get("princeton-classes").unwrap(), None);

        store.set("princeton-classes", "[]").unwrap();
        assert_eq!(store.get("princeton-classes").unwrap(), Some("[]".to_string()));
        assert!(store.base_directory().join("princeton-classes.json").exists());
        assert!(!store.base_directory().join("princeton-classes.tmp").exists());

        store.set("princeton-classes", "[1]").unwrap();
        assert_eq!(store.get("princeton-classes").unwrap(), Some("[1]".to_string()));
    }

    #[test]
    fn test_remove() {
        let (store, _temp_dir) = setup_test_store();
        store.set("key", "value").unwrap();
        store.remove("key").unwrap();
        assert_eq!(store.get("key").unwrap(), None);

        // Missing key is fine
        store.remove("key").unwrap();
    }

    #[test]
    fn test_values_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        FileStore::new(temp_dir.path()).unwrap().set("key", "\"c1\"").unwrap();

        let reopened = FileStore::new(temp_dir.path()).unwrap();
        assert_eq!(reopened.get("key").unwrap(), Some("\"c1\"".to_string()));
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let (store, _temp_dir) = setup_test_store();
        assert!(store.set("../escape", "x").is_err());
        assert!(store.get("").is_err());
    }
}
