//! Local block existence checks.

use async_trait::async_trait;
use futures_util::future::try_join_all;
use tracing::trace;

use crate::error::{BoxError, Error, Result};
use crate::types::Cid;

/// Read access to the local content store.
#[async_trait]
pub trait BlockStore: Send + Sync + 'static {
    /// Whether the block for `cid` is stored locally.
    ///
    /// Absence is `Ok(false)`. `Err` is reserved for the store itself failing.
    async fn has(&self, cid: &Cid) -> std::result::Result<bool, BoxError>;

    /// Check every identifier concurrently and return the ones that are absent.
    ///
    /// All checks are joined; a store failure on any of them fails the whole
    /// check. The returned list keeps request order.
    async fn missing(&self, cids: &[Cid]) -> Result<Vec<Cid>> {
        let checks = cids.iter().map(|cid| async move {
            let present = self.has(cid).await.map_err(|source| Error::Store {
                cid: cid.clone(),
                source,
            })?;
            trace!(%cid, present, "local block check");
            Ok::<_, Error>((cid, present))
        });

        let results = try_join_all(checks).await?;
        Ok(results
            .into_iter()
            .filter(|(_, present)| !present)
            .map(|(cid, _)| cid.clone())
            .collect())
    }

    /// True only if every identifier is present locally.
    async fn has_all(&self, cids: &[Cid]) -> Result<bool> {
        Ok(self.missing(cids).await?.is_empty())
    }
}
