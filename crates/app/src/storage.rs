//! JSON file store
//!
//! Keeps every key in a single JSON object on disk. Writes go to a sibling temporary
//! file that is renamed over the original.

use std::{
    collections::BTreeMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use larder::storage::{KeyValueStore, StorageError};
use tracing::trace;

type Entries = BTreeMap<String, String>;

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Entries, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(Entries::new()),
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(Entries::new()),
            Err(error) => Err(error.into()),
        }
    }

    fn save(&self, entries: &Entries) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");

        fs::write(&tmp, serde_json::to_vec_pretty(entries)?)?;
        fs::rename(&tmp, &self.path)?;

        trace!(path = %self.path.display(), keys = entries.len(), "store written");

        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.load()?;

        entries.insert(key.to_string(), value.to_string());

        self.save(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.load()?;

        if entries.remove(key).is_some() {
            self.save(&entries)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use larder::{
        checkout::{AddressField, CheckoutSession, CheckoutState},
        storage::REMEMBER_ADDRESS_KEY,
    };
    use tempfile::TempDir;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn missing_file_reads_as_empty() -> TestResult {
        let dir = TempDir::new()?;
        let store = JsonFileStore::new(dir.path().join("state.json"));

        assert_eq!(store.get("anything")?, None);

        Ok(())
    }

    #[test]
    fn values_persist_across_instances() -> TestResult {
        let dir = TempDir::new()?;
        let path = dir.path().join("nested").join("state.json");

        JsonFileStore::new(&path).set("k", "v")?;

        assert_eq!(JsonFileStore::new(&path).get("k")?.as_deref(), Some("v"));

        Ok(())
    }

    #[test]
    fn remove_deletes_key() -> TestResult {
        let dir = TempDir::new()?;
        let store = JsonFileStore::new(dir.path().join("state.json"));

        store.set("a", "1")?;
        store.set("b", "2")?;
        store.remove("a")?;
        store.remove("a")?;

        assert_eq!(store.get("a")?, None);
        assert_eq!(store.get("b")?.as_deref(), Some("2"));

        Ok(())
    }

    #[test]
    fn corrupt_file_is_an_encoding_error() -> TestResult {
        let dir = TempDir::new()?;
        let path = dir.path().join("state.json");
        fs::write(&path, "{oops")?;

        let result = JsonFileStore::new(&path).get("k");

        assert!(
            matches!(result, Err(StorageError::Encoding(_))),
            "expected Encoding, got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn remembered_address_survives_restart() -> TestResult {
        let dir = TempDir::new()?;
        let path = dir.path().join("state.json");

        let mut session = CheckoutSession::start(JsonFileStore::new(&path))?;
        session.toggle_remember(true)?;
        for field in AddressField::ALL {
            session.update_field(field, "x")?;
        }

        let reloaded = CheckoutSession::start(JsonFileStore::new(&path))?;

        assert_eq!(reloaded.state(), CheckoutState::Valid);
        assert_eq!(
            JsonFileStore::new(&path).get(REMEMBER_ADDRESS_KEY)?.as_deref(),
            Some("true")
        );

        Ok(())
    }
}
