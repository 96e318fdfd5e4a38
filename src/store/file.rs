//! File-backed store: one JSON document per key

use super::KeyValueStore;
use crate::error::{RosterError, RosterResult};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

const EXTENSION: &str = ".json";

/// Store that keeps each key in its own file under a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir` (created lazily on first write)
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory backing this store
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}{}", encode_key(key), EXTENSION))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> RosterResult<Option<String>> {
        let path = self.key_path(key);
        match fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(RosterError::io(format!("reading {}", path.display()), e)),
        }
    }

    async fn set(&self, key: &str, value: &str) -> RosterResult<()> {
        fs::create_dir_all(&self.dir).await.map_err(|e| {
            RosterError::io(format!("creating store directory {}", self.dir.display()), e)
        })?;

        let path = self.key_path(key);
        fs::write(&path, value)
            .await
            .map_err(|e| RosterError::io(format!("writing {}", path.display()), e))?;

        debug!("Stored {} ({} bytes)", key, value.len());
        Ok(())
    }

    async fn remove(&self, key: &str) -> RosterResult<()> {
        let path = self.key_path(key);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(RosterError::io(format!("removing {}", path.display()), e)),
        }
    }

    async fn keys(&self) -> RosterResult<Vec<String>> {
        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(vec![]),
            Err(e) => return Err(RosterError::io("reading store directory", e)),
        };

        let mut keys = vec![];
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| RosterError::io("reading store entry", e))?
        {
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if let Some(key) = name.strip_suffix(EXTENSION).and_then(decode_key) {
                keys.push(key);
            }
        }

        keys.sort();
        Ok(keys)
    }
}

/// Map an arbitrary key to a file-name-safe form (`%XX` for other bytes)
fn encode_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'_' | b'-' | b'.') {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}

/// Inverse of [`encode_key`]; `None` for names this store did not write
fn decode_key(name: &str) -> Option<String> {
    let bytes = name.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = name.get(i + 1..i + 3)?;
            out.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_store() -> (FileStore, TempDir) {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path().join("store"));
        (store, temp)
    }

    #[test]
    fn key_encoding_is_reversible() {
        for key in ["dataProducts", "profileDataCache_orders.v2", "a/b c%", "ünïcode"] {
            let encoded = encode_key(key);
            assert!(!encoded.contains('/'));
            assert_eq!(decode_key(&encoded).as_deref(), Some(key));
        }
    }

    #[test]
    fn decode_rejects_truncated_escape() {
        assert!(decode_key("abc%4").is_none());
    }

    #[tokio::test]
    async fn set_get_and_overwrite() {
        let (store, _temp) = test_store();

        assert!(store.get("k").await.unwrap().is_none());
        store.set("k", r#"{"a":1}"#).await.unwrap();
        store.set("k", r#"{"a":2}"#).await.unwrap();

        assert_eq!(store.get("k").await.unwrap().as_deref(), Some(r#"{"a":2}"#));
    }

    #[tokio::test]
    async fn keys_on_missing_dir_is_empty() {
        let (store, _temp) = test_store();
        assert!(store.keys().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn remove_missing_key_is_ok() {
        let (store, _temp) = test_store();
        store.remove("nothing").await.unwrap();
    }

    #[tokio::test]
    async fn keys_ignore_foreign_files() {
        let (store, _temp) = test_store();
        store.set("lineageDataCache_t/1", "{}").await.unwrap();
        std::fs::write(store.dir().join("notes.txt"), "hi").unwrap();

        assert_eq!(store.keys().await.unwrap(), vec!["lineageDataCache_t/1"]);
    }

    #[tokio::test]
    async fn delete_by_prefix_on_disk() {
        let (store, _temp) = test_store();
        store.set("profileDataCache_a", "{}").await.unwrap();
        store.set("profileDataCacheX", "{}").await.unwrap();
        store.set("dataProducts", "[]").await.unwrap();

        assert_eq!(store.delete_by_prefix("profileDataCache").await.unwrap(), 2);
        assert_eq!(store.keys().await.unwrap(), vec!["dataProducts"]);
    }
}
