//! The decision store: the in-memory collection and its write-through
//! persistence.

use chrono::Local;
use tracing::{debug, warn};

use crate::entity::Decision;
use crate::error::{BreadcrumbError, Result};
use crate::export::{self, Export};
use crate::search;
use crate::storage::{StoragePort, STORAGE_KEY};
use crate::warnings::Warning;

/// Attempts per write-through before giving up (first try plus one retry).
const WRITE_ATTEMPTS: u32 = 2;

/// Owns the decision collection, newest first.
///
/// A store starts unloaded. `load` reads the storage key once and marks the
/// store ready; until then the collection is empty and mutations fail with
/// `NotLoaded`. Every successful mutation rewrites the full collection.
pub struct DecisionStore<S> {
    storage: S,
    key: String,
    decisions: Vec<Decision>,
    ready: bool,
    warnings: Vec<Warning>,
}

impl<S: StoragePort> DecisionStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            decisions: Vec::new(),
            ready: false,
            warnings: Vec::new(),
        }
    }

    /// Create a store and load it.
    pub fn open(storage: S) -> Result<Self> {
        let mut store = Self::new(storage);
        store.load()?;
        Ok(store)
    }

    /// Load the collection from storage. Only the first successful call reads.
    ///
    /// Malformed stored data is discarded and the store starts empty. A
    /// failing read is returned as an error and the store stays unloaded, so
    /// a later mutation cannot overwrite data it never saw. Loading never
    /// writes back.
    pub fn load(&mut self) -> Result<()> {
        if self.ready {
            return Ok(());
        }
        self.decisions = self.read_stored()?;
        self.ready = true;
        debug!(key = %self.key, count = self.decisions.len(), "decision store loaded");
        Ok(())
    }

    fn read_stored(&self) -> Result<Vec<Decision>> {
        let Some(raw) = self.storage.read(&self.key)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str(&raw) {
            Ok(decisions) => Ok(decisions),
            Err(e) => {
                warn!(key = %self.key, error = %e, "discarding malformed stored decisions");
                Ok(Vec::new())
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Current snapshot, newest first.
    pub fn decisions(&self) -> &[Decision] {
        &self.decisions
    }

    pub fn len(&self) -> usize {
        self.decisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }

    /// Log a new decision and put it at the front of the collection.
    ///
    /// Both fields are trimmed. Fails with `EmptyDecision` if nothing is left
    /// of the decision text.
    pub fn add(&mut self, decision: &str, context: &str) -> Result<Decision> {
        self.ensure_ready()?;
        if decision.trim().is_empty() {
            return Err(BreadcrumbError::EmptyDecision);
        }

        let mut entry = Decision::new(decision, context);
        while self.decisions.iter().any(|d| d.id == entry.id) {
            entry = Decision::new(decision, context);
        }

        self.decisions.insert(0, entry.clone());
        debug!(id = %entry.id, "added decision");
        self.persist();

        Ok(entry)
    }

    /// Remove the decision with `id`. Returns whether anything was removed;
    /// an unknown id changes nothing and is not persisted.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        self.ensure_ready()?;

        let before = self.decisions.len();
        self.decisions.retain(|d| d.id != id);
        let removed = self.decisions.len() != before;

        if removed {
            debug!(id, "deleted decision");
            self.persist();
        }

        Ok(removed)
    }

    /// Decisions whose text or context contains `query`, ignoring case.
    /// An empty query returns the whole collection.
    pub fn search(&self, query: &str) -> Vec<Decision> {
        search::filter(&self.decisions, query)
    }

    /// Look up a decision by exact id, then by unique id prefix.
    pub fn resolve_id(&self, id: &str) -> Result<&Decision> {
        if let Some(d) = self.decisions.iter().find(|d| d.id == id) {
            return Ok(d);
        }

        let mut matches = self.decisions.iter().filter(|d| d.id.starts_with(id));
        match (matches.next(), matches.next()) {
            (Some(d), None) if !id.is_empty() => Ok(d),
            (Some(_), _) if !id.is_empty() => Err(BreadcrumbError::AmbiguousId(id.to_string())),
            _ => Err(BreadcrumbError::DecisionNotFound(id.to_string())),
        }
    }

    pub fn export_json(&self) -> Result<Export> {
        export::export_json(&self.decisions, &Local::now())
    }

    pub fn export_markdown(&self) -> Export {
        export::export_markdown(&self.decisions, &Local::now())
    }

    /// Drain warnings queued by earlier operations.
    pub fn take_warnings(&mut self) -> Vec<Warning> {
        std::mem::take(&mut self.warnings)
    }

    fn ensure_ready(&self) -> Result<()> {
        if self.ready {
            Ok(())
        } else {
            Err(BreadcrumbError::NotLoaded)
        }
    }

    /// Write the full collection, retrying once. A write that still fails
    /// leaves the in-memory change in place and queues a warning.
    fn persist(&mut self) {
        let payload = match serde_json::to_string(&self.decisions) {
            Ok(payload) => payload,
            Err(e) => {
                self.queue_persist_failure(0, e.to_string());
                return;
            }
        };

        let mut last_error = String::new();
        for attempt in 1..=WRITE_ATTEMPTS {
            match self.storage.write(&self.key, &payload) {
                Ok(()) => {
                    debug!(key = %self.key, count = self.decisions.len(), attempt, "persisted decisions");
                    return;
                }
                Err(e) => {
                    debug!(key = %self.key, attempt, error = %e, "failed to persist decisions");
                    last_error = e.to_string();
                }
            }
        }

        self.queue_persist_failure(WRITE_ATTEMPTS, last_error);
    }

    fn queue_persist_failure(&mut self, attempts: u32, message: String) {
        self.warnings.push(Warning::PersistFailed {
            key: self.key.clone(),
            attempts,
            message,
        });
    }
}
