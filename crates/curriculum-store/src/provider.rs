//! Data provider trait and the store-backed implementation.

use crate::model::{Block, Challenge, Curriculum, Superblock};
use crate::store::{CurriculumStore, StoreStats};
use std::sync::Arc;

/// Read access to the curriculum.
///
/// This is the only surface callers outside the crate use, so the storage
/// behind it can change without touching them. Lookups for unknown ids
/// return `None`.
pub trait DataProvider: Send + Sync {
    /// The curriculum manifest.
    fn curriculum(&self) -> &Curriculum;

    /// Look up a superblock.
    fn superblock(&self, id: &str) -> Option<&Superblock>;

    /// Look up a block.
    fn block(&self, id: &str) -> Option<&Block>;

    /// Look up challenge metadata.
    fn challenge(&self, id: &str) -> Option<&Challenge>;
}

/// [`DataProvider`] over a shared [`CurriculumStore`]. Clones share the store.
#[derive(Debug, Clone)]
pub struct StoreProvider {
    store: Arc<CurriculumStore>,
}

impl StoreProvider {
    /// Wrap a built store.
    pub fn new(store: CurriculumStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Entity counts of the underlying store.
    pub fn stats(&self) -> StoreStats {
        self.store.stats()
    }
}

impl From<CurriculumStore> for StoreProvider {
    fn from(store: CurriculumStore) -> Self {
        Self::new(store)
    }
}

impl DataProvider for StoreProvider {
    fn curriculum(&self) -> &Curriculum {
        self.store.curriculum()
    }

    fn superblock(&self, id: &str) -> Option<&Superblock> {
        self.store.superblock(id)
    }

    fn block(&self, id: &str) -> Option<&Block> {
        self.store.block(id)
    }

    fn challenge(&self, id: &str) -> Option<&Challenge> {
        self.store.challenge(id)
    }
}
