//! Load-guarded state container.
//!
//! Every widget keeps its persisted documents in `Synced<T>` cells. A cell
//! reads its key exactly once, then mirrors each effective change back to
//! storage as a full document. Until that first read has finished the cell
//! never writes, so the empty default state cannot clobber what a previous
//! session saved.

use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};

use crate::records::{ByCategory, Category};
use crate::storage::StoreAdapter;
use crate::{log_debug, log_info};

const ENABLE_LOGS: bool = true;

/// A value that can live under one storage key.
pub trait Document: Serialize + DeserializeOwned + Default + Clone + PartialEq + Send + 'static {
    /// Repair a freshly loaded document (fill gaps, clamp ranges).
    fn normalized(self) -> Self {
        self
    }
}

impl<T> Document for Vec<T> where T: Serialize + DeserializeOwned + Clone + PartialEq + Send + 'static {}

impl<C, V> Document for ByCategory<C, V>
where
    C: Category,
    V: Serialize + DeserializeOwned + Default + Clone + PartialEq + Send + 'static,
{
    fn normalized(self) -> Self {
        ByCategory::normalized(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Uninitialized,
    Hydrating,
    Ready,
}

pub type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

pub struct Synced<T: Document> {
    key: &'static str,
    store: StoreAdapter,
    phase: LoadPhase,
    value: T,
    listeners: Vec<Listener<T>>,
}

impl<T: Document> Synced<T> {
    /// Start a cell in `Hydrating` holding the default value. Nothing is read
    /// until [`Synced::hydrate`].
    pub fn new(store: StoreAdapter, key: &'static str) -> Self {
        let mut cell = Self {
            key,
            store,
            phase: LoadPhase::Uninitialized,
            value: T::default(),
            listeners: Vec::new(),
        };
        cell.phase = LoadPhase::Hydrating;
        log_debug!("'{}' hydrating", key);
        cell
    }

    /// `new` followed by `hydrate`.
    pub fn mount(store: StoreAdapter, key: &'static str) -> Self {
        let mut cell = Self::new(store, key);
        cell.hydrate();
        cell
    }

    /// Perform the single storage read and become `Ready`.
    ///
    /// A stored document replaces whatever the cell holds; when nothing is
    /// stored (or it cannot be decoded) the current value is kept. Returns
    /// whether a stored document was found. Calls after the first are no-ops.
    pub fn hydrate(&mut self) -> bool {
        if self.phase != LoadPhase::Hydrating {
            return false;
        }

        let found = match self.store.read::<T>(self.key) {
            Some(stored) => {
                self.value = stored.normalized();
                true
            }
            None => false,
        };

        self.phase = LoadPhase::Ready;
        log_info!(
            "'{}' ready ({})",
            self.key,
            if found { "restored" } else { "no saved data" }
        );
        self.notify();
        found
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn is_loaded(&self) -> bool {
        self.phase == LoadPhase::Ready
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Mutate in place. Persists and notifies only if the value changed.
    pub fn update<R>(&mut self, mutate: impl FnOnce(&mut T) -> R) -> R {
        let before = self.value.clone();
        let result = mutate(&mut self.value);
        if self.value != before {
            self.changed();
        }
        result
    }

    /// Swap in a new value computed elsewhere. Returns whether it differed.
    pub fn replace(&mut self, next: T) -> bool {
        if next == self.value {
            return false;
        }
        self.value = next;
        self.changed();
        true
    }

    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.listeners.push(Arc::new(listener));
    }

    fn changed(&mut self) {
        if self.phase == LoadPhase::Ready {
            // Failures are already logged by the adapter; memory stays authoritative.
            let _ = self.store.write(self.key, &self.value);
        } else {
            log_debug!("'{}' changed before hydration; not persisting", self.key);
        }
        self.notify();
    }

    fn notify(&self) {
        for listener in &self.listeners {
            listener(&self.value);
        }
    }
}
