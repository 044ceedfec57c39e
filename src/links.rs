//! Linked-block resolution for recursive provides.

use async_trait::async_trait;

use crate::error::BoxError;
use crate::types::Cid;

/// Resolves the blocks reachable from a root through the object graph.
#[async_trait]
pub trait LinkResolver: Send + Sync + 'static {
    /// Every identifier transitively linked from `cid`, each listed once.
    ///
    /// The root itself is not part of the result.
    async fn linked_identifiers(&self, cid: &Cid) -> Result<Vec<Cid>, BoxError>;
}
