//! In-memory block store.

use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::blockstore::BlockStore;
use crate::error::BoxError;
use crate::types::Cid;

/// Block store that only tracks which identifiers are held.
#[derive(Debug, Default)]
pub struct MemoryBlockStore {
    blocks: RwLock<HashSet<Cid>>,
}

impl MemoryBlockStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a block as held locally.
    pub async fn insert(&self, cid: Cid) {
        self.blocks.write().await.insert(cid);
    }

    /// Forget a block. Returns whether it was held.
    pub async fn remove(&self, cid: &Cid) -> bool {
        self.blocks.write().await.remove(cid)
    }

    /// Number of blocks held.
    pub async fn len(&self) -> usize {
        self.blocks.read().await.len()
    }

    /// Whether no blocks are held.
    pub async fn is_empty(&self) -> bool {
        self.blocks.read().await.is_empty()
    }
}

impl FromIterator<Cid> for MemoryBlockStore {
    fn from_iter<I: IntoIterator<Item = Cid>>(iter: I) -> Self {
        Self {
            blocks: RwLock::new(iter.into_iter().collect()),
        }
    }
}

#[async_trait]
impl BlockStore for MemoryBlockStore {
    async fn has(&self, cid: &Cid) -> Result<bool, BoxError> {
        Ok(self.blocks.read().await.contains(cid))
    }
}
