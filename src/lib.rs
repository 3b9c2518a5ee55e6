pub mod cli;
pub mod config;
pub mod entity;
pub mod error;
pub mod export;
pub mod logging;
pub mod search;
pub mod storage;
pub mod store;
pub mod warnings;

pub use entity::Decision;
pub use error::{BreadcrumbError, Result};
pub use storage::{FileStorage, MemoryStorage, StoragePort};
pub use store::DecisionStore;
