// 📖 Cookbook Registry - The catalog of every ingredient and recipe
//
// "Names are identity, entries are values that never change"
//
// - One namespace for both kinds: an ingredient and a recipe never share a name
// - Entries are validated in full before insertion (no partial writes)
// - Writers take the write lock, summaries hold the read lock for the whole walk

use crate::entities::Entry;
use crate::error::{ResolutionError, ValidationError};
use crate::normalize::normalize_name;
use crate::parser;
use crate::resolver::{Resolver, Summary, DEFAULT_MAX_DEPTH};
use indexmap::IndexMap;
use serde_json::Value;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info, warn};

/// Registry of all cookbook entries, keyed by canonical name.
///
/// Cloning is cheap and clones share the same store, so one cookbook can be
/// handed to every request handler. Build a fresh one to start from empty.
#[derive(Clone)]
pub struct Cookbook {
    /// Insertion-ordered entries (append-only)
    entries: Arc<RwLock<IndexMap<String, Entry>>>,

    /// Maximum recipe nesting a summary may walk through
    max_depth: usize,
}

impl Cookbook {
    /// Create new empty cookbook
    pub fn new() -> Self {
        Cookbook {
            entries: Arc::new(RwLock::new(IndexMap::new())),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Builder: cap recipe nesting for summaries (at least one level)
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    // ========================================================================
    // WRITES
    // ========================================================================

    /// Validate a raw client entry and store it.
    ///
    /// Checks run in order: name, uniqueness, type, then type-specific fields.
    /// Returns the canonical name the entry was stored under.
    pub fn add_entry(&self, raw: &Value) -> Result<String, ValidationError> {
        let result = self.try_add_entry(raw);

        match &result {
            Ok(name) => info!(name = %name, "entry added"),
            Err(e) => warn!(error = %e, "entry rejected"),
        }

        result
    }

    fn try_add_entry(&self, raw: &Value) -> Result<String, ValidationError> {
        let name = parser::parse_name(raw)?;

        // Held across the duplicate check and the insert
        let mut entries = self.write();

        if entries.contains_key(&name) {
            return Err(ValidationError::DuplicateName(name));
        }

        let entry = parser::parse_body(name.clone(), raw)?;
        entries.insert(name.clone(), entry);

        Ok(name)
    }

    /// Store an already-typed entry under its own name.
    ///
    /// Same rules as [`Cookbook::add_entry`]; the name must already be canonical.
    pub fn insert(&self, entry: Entry) -> Result<(), ValidationError> {
        // Lookups are exact, so a non-canonical name could never be found again
        if normalize_name(entry.name()).as_deref() != Some(entry.name()) {
            return Err(ValidationError::InvalidName);
        }

        if let Entry::Recipe(recipe) = &entry {
            parser::check_required_items(&recipe.required_items)?;
        }

        let mut entries = self.write();

        if entries.contains_key(entry.name()) {
            return Err(ValidationError::DuplicateName(entry.name().to_string()));
        }

        debug!(name = entry.name(), kind = entry.kind().as_str(), "entry inserted");
        entries.insert(entry.name().to_string(), entry);

        Ok(())
    }

    /// Drop every entry (test reset)
    pub fn clear(&self) {
        self.write().clear();
    }

    // ========================================================================
    // READS
    // ========================================================================

    /// Exact canonical-name lookup
    pub fn lookup(&self, name: &str) -> Option<Entry> {
        self.read().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.read().contains_key(name)
    }

    /// All entries in insertion order
    pub fn entries(&self) -> Vec<Entry> {
        self.read().values().cloned().collect()
    }

    /// All names in insertion order
    pub fn names(&self) -> Vec<String> {
        self.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Expand a recipe into its total cook time and base ingredients.
    ///
    /// The read lock is held for the whole expansion, so the walk sees one
    /// consistent set of entries.
    pub fn summarize(&self, name: &str) -> Result<Summary, ResolutionError> {
        let entries = self.read();
        let result = Resolver::new(&entries).with_max_depth(self.max_depth).summarize(name);

        if let Err(e) = &result {
            warn!(name = %name, error = %e, "summary failed");
        }

        result
    }

    // ========================================================================
    // LOCKING
    // ========================================================================

    // Every write is a single map insert or clear, so a poisoned lock still
    // guards a consistent map.
    fn read(&self) -> RwLockReadGuard<'_, IndexMap<String, Entry>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, IndexMap<String, Entry>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Cookbook {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
