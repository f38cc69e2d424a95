use crate::domain::ports::PersistenceStore;
use crate::utils::error::Result;
use std::collections::HashMap;
use std::fmt::Write;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Stores each key as a file under `base_path`.
#[derive(Debug, Clone)]
pub struct FileStore {
    base_path: PathBuf,
}

impl FileStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Maps a key to its file. ASCII letters, digits and `-` are kept, every
    /// other byte becomes `_XX` (hex), so distinct keys never share a file.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let mut file_name = String::with_capacity(key.len());
        for byte in key.bytes() {
            if byte.is_ascii_alphanumeric() || byte == b'-' {
                file_name.push(char::from(byte));
            } else {
                let _ = write!(file_name, "_{:02X}", byte);
            }
        }
        self.base_path.join(format!("{}.json", file_name))
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl PersistenceStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let full_path = self.path_for(key);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        // write-then-rename so a crash never leaves a half-written cart
        let tmp_path = full_path.with_extension("json.tmp");
        fs::write(&tmp_path, value)?;
        fs::rename(&tmp_path, &full_path)?;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.lock().insert(key.to_string(), value.to_string());
        store
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // a poisoned map is still a valid map
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl PersistenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<T: PersistenceStore + ?Sized> PersistenceStore for std::sync::Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_key_is_escaped_into_file_name() {
        let store = FileStore::new("/tmp/cart");
        assert_eq!(
            store.path_for("@RocketShoes:cart"),
            PathBuf::from("/tmp/cart/_40RocketShoes_3Acart.json")
        );
        assert_eq!(
            store.path_for("购物车"),
            PathBuf::from("/tmp/cart/_E8_B4_AD_E7_89_A9_E8_BD_A6.json")
        );
    }

    #[test]
    fn test_distinct_keys_never_share_a_file() {
        let store = FileStore::new("/tmp/cart");
        assert_ne!(store.path_for("a:b"), store.path_for("a_b"));
        assert_ne!(store.path_for("a_b"), store.path_for("a_5Fb"));
        assert_ne!(store.path_for("cart"), store.path_for("cart.json"));
    }

    #[test]
    fn test_colliding_keys_keep_separate_carts() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());

        store.set("a:b", "[1]").unwrap();
        store.set("a_b", "[2]").unwrap();

        assert_eq!(store.get("a:b").unwrap().as_deref(), Some("[1]"));
        assert_eq!(store.get("a_b").unwrap().as_deref(), Some("[2]"));
    }

    #[test]
    fn test_file_store_missing_key_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());
        assert_eq!(store.get("@RocketShoes:cart").unwrap(), None);
    }

    #[test]
    fn test_file_store_set_then_get() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().join("nested"));

        store.set("@RocketShoes:cart", "[]").unwrap();
        store.set("@RocketShoes:cart", "[{\"id\":1}]").unwrap();

        assert_eq!(
            store.get("@RocketShoes:cart").unwrap().as_deref(),
            Some("[{\"id\":1}]")
        );
        assert!(!store.path_for("@RocketShoes:cart").with_extension("json.tmp").exists());
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::with_entry("a", "1");
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
        assert_eq!(store.get("b").unwrap(), None);

        store.set("b", "2").unwrap();
        assert_eq!(store.get("b").unwrap().as_deref(), Some("2"));
    }
}
