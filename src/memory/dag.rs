//! In-memory link graph.

use std::collections::{HashMap, HashSet, VecDeque};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::BoxError;
use crate::links::LinkResolver;
use crate::types::Cid;

/// Directed graph of block links.
#[derive(Debug, Default)]
pub struct MemoryDag {
    links: RwLock<HashMap<Cid, Vec<Cid>>>,
}

impl MemoryDag {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `parent` links directly to `children`.
    pub async fn link(&self, parent: Cid, children: Vec<Cid>) {
        self.links
            .write()
            .await
            .entry(parent)
            .or_default()
            .extend(children);
    }
}

#[async_trait]
impl LinkResolver for MemoryDag {
    async fn linked_identifiers(&self, cid: &Cid) -> Result<Vec<Cid>, BoxError> {
        let links = self.links.read().await;
        let mut seen = HashSet::from([cid.clone()]);
        let mut queue = VecDeque::from([cid.clone()]);
        let mut reachable = Vec::new();

        // breadth-first, each block once; cycles back to visited blocks stop here
        while let Some(next) = queue.pop_front() {
            for child in links.get(&next).into_iter().flatten() {
                if seen.insert(child.clone()) {
                    reachable.push(child.clone());
                    queue.push_back(child.clone());
                }
            }
        }
        Ok(reachable)
    }
}
