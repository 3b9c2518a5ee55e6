use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::StoragePort;
use crate::error::{BreadcrumbError, Result};

/// File-backed storage: each key is a `<key>.json` file in the data directory.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(BreadcrumbError::Storage(format!(
                "Invalid storage key '{}'",
                key
            )));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl StoragePort for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read(&path) {
            Ok(bytes) => {
                debug!(path = %path.display(), bytes = bytes.len(), "read storage file");
                // Invalid UTF-8 is malformed content, not an I/O failure
                let contents = String::from_utf8(bytes)
                    .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned());
                Ok(Some(contents))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;

        // Write a sibling then rename so readers never see a partial file
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;

        debug!(path = %path.display(), bytes = value.len(), "wrote storage file");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_missing_key_is_none() {
        let tmp = TempDir::new().unwrap();
        let storage = FileStorage::new(tmp.path());
        assert!(storage.read("breadcrumb-decisions").unwrap().is_none());
    }

    #[test]
    fn test_write_then_read() {
        let tmp = TempDir::new().unwrap();
        let storage = FileStorage::new(tmp.path().join("nested"));

        storage.write("breadcrumb-decisions", "[]").unwrap();

        assert_eq!(
            storage.read("breadcrumb-decisions").unwrap().as_deref(),
            Some("[]")
        );
        assert!(tmp.path().join("nested/breadcrumb-decisions.json").exists());
        assert!(!tmp
            .path()
            .join("nested/breadcrumb-decisions.json.tmp")
            .exists());
    }

    #[test]
    fn test_write_overwrites() {
        let tmp = TempDir::new().unwrap();
        let storage = FileStorage::new(tmp.path());

        storage.write("k", "first").unwrap();
        storage.write("k", "second").unwrap();

        assert_eq!(storage.read("k").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_read_invalid_utf8_is_content() {
        let tmp = TempDir::new().unwrap();
        let storage = FileStorage::new(tmp.path());
        fs::write(tmp.path().join("k.json"), b"[\xff]").unwrap();

        let contents = storage.read("k").unwrap().unwrap();
        assert!(contents.starts_with('['));
    }

    #[test]
    fn test_read_error_is_surfaced() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("blocker"), "a file, not a directory").unwrap();
        let storage = FileStorage::new(tmp.path().join("blocker"));

        assert!(matches!(storage.read("k"), Err(BreadcrumbError::Io(_))));
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let tmp = TempDir::new().unwrap();
        let storage = FileStorage::new(tmp.path());

        assert!(storage.write("../escape", "x").is_err());
        assert!(storage.read("a/b").is_err());
        assert!(storage.read("").is_err());
    }
}
