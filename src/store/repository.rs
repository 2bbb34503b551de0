// hcs-logs - Scope store and persistence contract
//
// `ScopeStore` is the in-memory view of every credential scope. It is loaded
// once at startup and passed explicitly (by `&mut`) to whatever mutates it;
// persistence goes through the `ScopeBackend` trait.

use std::collections::BTreeMap;
use std::sync::Mutex;

use super::models::{Credential, ScopeName};
use super::StoreError;

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over where the scope map lives between runs.
pub trait ScopeBackend {
    /// Read every scope. Fails with `StoreError::Parse` on malformed data.
    fn load(&self) -> Result<ScopeStore, StoreError>;

    /// Replace the backing representation with `store` wholesale.
    fn save(&self, store: &ScopeStore) -> Result<(), StoreError>;
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// Ordered map of scope name to credential record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeStore {
    scopes: BTreeMap<ScopeName, Credential>,
}

impl ScopeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from the raw key -> record map of the backing file.
    pub fn from_keyed(raw: BTreeMap<String, Credential>) -> Self {
        let scopes = raw
            .into_iter()
            .map(|(key, cred)| (ScopeName::parse(&key), cred))
            .collect();
        Self { scopes }
    }

    /// The raw key -> record map written to the backing file.
    ///
    /// Refuses custom names that would be stored under `DEFAULT` or a
    /// `remote-` key, since writing them would shadow that scope on disk.
    pub fn to_keyed(&self) -> Result<BTreeMap<String, Credential>, StoreError> {
        self.scopes
            .iter()
            .map(|(name, cred)| {
                if name.is_unambiguous() {
                    Ok((name.key(), cred.clone()))
                } else {
                    Err(StoreError::AmbiguousKey(name.key()))
                }
            })
            .collect()
    }

    pub fn get(&self, name: &ScopeName) -> Option<&Credential> {
        self.scopes.get(name)
    }

    pub fn get_mut(&mut self, name: &ScopeName) -> Result<&mut Credential, StoreError> {
        self.scopes
            .get_mut(name)
            .ok_or_else(|| StoreError::ScopeNotFound(name.key()))
    }

    pub fn contains(&self, name: &ScopeName) -> bool {
        self.scopes.contains_key(name)
    }

    /// Insert or replace a scope, returning the previous record.
    pub fn insert(&mut self, name: ScopeName, credential: Credential) -> Option<Credential> {
        self.scopes.insert(name, credential)
    }

    /// Remove a scope. Unknown names are `ScopeNotFound`.
    pub fn remove(&mut self, name: &ScopeName) -> Result<Credential, StoreError> {
        self.scopes
            .remove(name)
            .ok_or_else(|| StoreError::ScopeNotFound(name.key()))
    }

    /// Record for `name`, else the record for `fallback`, else nothing.
    pub fn lookup(&self, name: &ScopeName, fallback: &ScopeName) -> Option<&Credential> {
        self.scopes.get(name).or_else(|| self.scopes.get(fallback))
    }

    /// The global fallback scope, if configured.
    pub fn default_scope(&self) -> Option<&Credential> {
        self.scopes.get(&ScopeName::Default)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ScopeName, &Credential)> {
        self.scopes.iter()
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }
}

// ─── In-memory backend ───────────────────────────────────────────────────────

/// Backend that keeps the last saved store in memory and counts saves.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    saved: Mutex<(ScopeStore, usize)>,
}

impl MemoryBackend {
    pub fn new(initial: ScopeStore) -> Self {
        Self {
            saved: Mutex::new((initial, 0)),
        }
    }

    /// Number of `save` calls so far.
    pub fn save_count(&self) -> usize {
        self.saved.lock().unwrap_or_else(|e| e.into_inner()).1
    }

    /// A copy of the last saved store.
    pub fn snapshot(&self) -> ScopeStore {
        self.saved.lock().unwrap_or_else(|e| e.into_inner()).0.clone()
    }
}

impl ScopeBackend for MemoryBackend {
    fn load(&self) -> Result<ScopeStore, StoreError> {
        Ok(self.snapshot())
    }

    fn save(&self, store: &ScopeStore) -> Result<(), StoreError> {
        store.to_keyed()?;
        let mut saved = self.saved.lock().unwrap_or_else(|e| e.into_inner());
        saved.0 = store.clone();
        saved.1 += 1;
        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
