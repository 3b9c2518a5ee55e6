use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use super::StoragePort;
use crate::error::{BreadcrumbError, Result};

/// In-process storage, used by tests and when embedding the store.
#[derive(Default)]
pub struct MemoryStorage {
    values: RefCell<HashMap<String, String>>,
    fail_writes: Cell<u32>,
    fail_reads: Cell<bool>,
    writes: Cell<u32>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-populated with `value` under `key`.
    pub fn with_value(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage
            .values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        storage
    }

    /// Make the next `count` writes fail.
    pub fn fail_next_writes(&self, count: u32) {
        self.fail_writes.set(count);
    }

    /// Make every read fail, as an unreadable backing store would.
    pub fn fail_reads(&self) {
        self.fail_reads.set(true);
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> u32 {
        self.writes.get()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }
}

impl StoragePort for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        if self.fail_reads.get() {
            return Err(BreadcrumbError::Storage("permission denied".to_string()));
        }
        Ok(self.get(key))
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let remaining = self.fail_writes.get();
        if remaining > 0 {
            self.fail_writes.set(remaining - 1);
            return Err(BreadcrumbError::Storage("quota exceeded".to_string()));
        }

        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_write() {
        let storage = MemoryStorage::new();
        assert!(storage.read("k").unwrap().is_none());

        storage.write("k", "v").unwrap();
        assert_eq!(storage.read("k").unwrap().as_deref(), Some("v"));
        assert_eq!(storage.write_count(), 1);
    }

    #[test]
    fn test_fail_next_writes() {
        let storage = MemoryStorage::new();
        storage.fail_next_writes(2);

        assert!(storage.write("k", "1").is_err());
        assert!(storage.write("k", "2").is_err());
        assert!(storage.write("k", "3").is_ok());
        assert_eq!(storage.get("k").as_deref(), Some("3"));
        assert_eq!(storage.write_count(), 1);
    }

    #[test]
    fn test_fail_reads() {
        let storage = MemoryStorage::with_value("k", "v");
        storage.fail_reads();
        assert!(storage.read("k").is_err());
        assert_eq!(storage.get("k").as_deref(), Some("v"));
    }
}
