//! Provide orchestration: local availability gate, link expansion, announce fan-out.

use std::sync::Arc;

use futures_util::future::try_join_all;
use futures_util::stream::{self, TryStreamExt};
use tracing::{debug, trace, warn};

use crate::error::{Error, Operation, Result};
use crate::links::LinkResolver;
use crate::types::Cid;

use super::{ContentRouting, ProvideOptions, ProvideRequest};

impl ContentRouting {
    /// Announce to the network that this node provides the given blocks.
    ///
    /// Accepts a single [`Cid`] or a collection; duplicates are announced once
    /// and an empty collection succeeds without touching the store or network.
    ///
    /// Every block must be present in the local store, otherwise the call fails
    /// with [`Error::LocalAvailability`] and nothing is announced. With
    /// `recursive`, every block linked from the given ones is checked and
    /// announced as well, which requires a [`LinkResolver`].
    ///
    /// Announces run concurrently, one per identifier. The call succeeds only
    /// if all of them do; the first failure is returned as [`Error::Engine`]
    /// naming the identifier and remaining announces are dropped.
    pub async fn provide<R>(&self, cids: R, options: ProvideOptions) -> Result<()>
    where
        R: Into<ProvideRequest>,
    {
        let mut request = cids.into();
        if request.is_empty() {
            debug!("empty provide request, nothing to announce");
            return Ok(());
        }

        let links = if options.recursive {
            let links = self
                .links
                .as_ref()
                .ok_or_else(|| Error::malformed("recursive provide requires a link resolver"))?;
            Some(Arc::clone(links))
        } else {
            None
        };

        debug!(
            roots = request.len(),
            recursive = options.recursive,
            "provide requested"
        );
        self.ensure_local(request.cids()).await?;

        if let Some(links) = links {
            let linked = expand_links(links.as_ref(), request.cids()).await?;
            let roots = request.len();
            request.extend_unique(linked);
            debug!(roots, linked = request.len() - roots, "expanded linked blocks");
            if request.len() > roots {
                self.ensure_local(&request.cids()[roots..]).await?;
            }
        }

        self.announce(request.into_cids()).await
    }

    /// Fail unless every identifier is held by the local store.
    async fn ensure_local(&self, cids: &[Cid]) -> Result<()> {
        let missing = self.store.missing(cids).await?;
        if missing.is_empty() {
            return Ok(());
        }
        warn!(
            checked = cids.len(),
            missing = missing.len(),
            first_missing = %missing[0],
            "refusing to provide blocks that are not stored locally"
        );
        Err(Error::LocalAvailability { missing })
    }

    async fn announce(&self, cids: Vec<Cid>) -> Result<()> {
        let total = cids.len();
        let limit = self.config.max_inflight_announces;

        stream::iter(cids.into_iter().map(Ok::<_, Error>))
            .try_for_each_concurrent(limit, |cid| async move {
                match self.engine.provide(&cid).await {
                    Ok(()) => {
                        trace!(%cid, "announced provider record");
                        Ok(())
                    }
                    Err(e) => {
                        warn!(%cid, error = %e, "failed to announce provider record");
                        Err(Error::engine_for(Operation::Provide, cid, e))
                    }
                }
            })
            .await?;

        debug!(announced = total, "provide complete");
        Ok(())
    }
}

/// Resolve the linked blocks of every root concurrently, in root order.
async fn expand_links(links: &dyn LinkResolver, roots: &[Cid]) -> Result<Vec<Cid>> {
    let lookups = roots.iter().map(|cid| async move {
        links
            .linked_identifiers(cid)
            .await
            .map_err(|source| Error::Links {
                cid: cid.clone(),
                source,
            })
    });
    let linked = try_join_all(lookups).await?;
    Ok(linked.into_iter().flatten().collect())
}
