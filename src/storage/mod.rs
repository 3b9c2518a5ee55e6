//! Durable key-value storage behind the decision store.

mod file_store;
mod memory_store;

pub use file_store::FileStorage;
pub use memory_store::MemoryStorage;

use crate::error::Result;

/// Key the decision collection is stored under.
pub const STORAGE_KEY: &str = "breadcrumb-decisions";

/// A string-valued key-value store the decision store persists through.
///
/// `read` returns `Ok(None)` when nothing has been written for `key`.
/// `write` replaces any previous value.
pub trait StoragePort {
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&self, key: &str, value: &str) -> Result<()>;
}

impl<S: StoragePort + ?Sized> StoragePort for &S {
    fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        (**self).write(key, value)
    }
}

impl<S: StoragePort + ?Sized> StoragePort for Box<S> {
    fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        (**self).write(key, value)
    }
}
