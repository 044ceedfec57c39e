//! Content routing over a DHT engine.
//!
//! - Lookups (`query`, `find_providers`, `find_peer`, `get`) and `put`
//!   forward to the [`DhtEngine`] and wrap its failures as [`Error::Engine`]
//! - `provide` checks that every block is held locally before announcing
//!   anything, see [`ContentRouting::provide`]

mod options;
mod provide;

use std::sync::Arc;

use tracing::debug;

use crate::blockstore::BlockStore;
use crate::engine::DhtEngine;
use crate::error::{Error, Operation, Result};
use crate::links::LinkResolver;
use crate::types::{Cid, NetworkAddress, PeerAddressInfo, PeerId};

pub use options::{ProvideOptions, ProvideRequest, RoutingConfig};

/// Content-routing facade over a shared DHT engine and local block store.
///
/// Holds no state of its own besides its collaborators; cloning is cheap and
/// clones share the same engine and store.
///
/// ```ignore
/// let routing = ContentRouting::builder(engine, store)
///     .link_resolver(dag)
///     .build();
///
/// routing.provide(cid, ProvideOptions::default()).await?;
/// let providers = routing.find_providers(&cid).await?;
/// ```
#[derive(Clone)]
pub struct ContentRouting {
    engine: Arc<dyn DhtEngine>,
    store: Arc<dyn BlockStore>,
    links: Option<Arc<dyn LinkResolver>>,
    config: RoutingConfig,
}

impl ContentRouting {
    /// Create a facade with default configuration and no link resolver.
    pub fn new(engine: Arc<dyn DhtEngine>, store: Arc<dyn BlockStore>) -> Self {
        Self::builder(engine, store).build()
    }

    /// Start building a facade around an engine and a local store.
    pub fn builder(
        engine: Arc<dyn DhtEngine>,
        store: Arc<dyn BlockStore>,
    ) -> ContentRoutingBuilder {
        ContentRoutingBuilder {
            engine,
            store,
            links: None,
            config: RoutingConfig::default(),
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }

    /// Peers closest to `peer`.
    pub async fn query(&self, peer: &PeerId) -> Result<Vec<PeerId>> {
        let peers = self
            .engine
            .closest_peers(peer)
            .await
            .map_err(|e| Error::engine(Operation::Query, e))?;
        debug!(%peer, found = peers.len(), "closest peers query complete");
        Ok(peers)
    }

    /// Peers providing `cid`, with their known addresses.
    pub async fn find_providers(&self, cid: &Cid) -> Result<Vec<PeerAddressInfo>> {
        let providers = self
            .engine
            .find_providers(cid)
            .await
            .map_err(|e| Error::engine_for(Operation::FindProviders, cid.clone(), e))?;
        debug!(%cid, found = providers.len(), "provider lookup complete");
        Ok(providers)
    }

    /// Addresses of `peer`, flattened from its record in order.
    ///
    /// A record without addresses yields an empty vec, not an error.
    pub async fn find_peer(&self, peer: &PeerId) -> Result<Vec<NetworkAddress>> {
        let record = self
            .engine
            .find_peer(peer)
            .await
            .map_err(|e| Error::engine(Operation::FindPeer, e))?;
        let addrs = record.into_addresses();
        debug!(%peer, addrs = addrs.len(), "peer lookup complete");
        Ok(addrs)
    }

    /// Value stored under `key`. The bytes are returned unchanged.
    pub async fn get(&self, key: &[u8]) -> Result<Vec<u8>> {
        let value = self
            .engine
            .get(key)
            .await
            .map_err(|e| Error::engine(Operation::Get, e))?;
        debug!(key = %String::from_utf8_lossy(key), len = value.len(), "record read");
        Ok(value)
    }

    /// Store `value` under `key`. No key format is imposed.
    pub async fn put(&self, key: &[u8], value: &[u8]) -> Result<()> {
        self.engine
            .put(key, value)
            .await
            .map_err(|e| Error::engine(Operation::Put, e))?;
        debug!(key = %String::from_utf8_lossy(key), len = value.len(), "record written");
        Ok(())
    }
}

/// Fluent builder for [`ContentRouting`].
pub struct ContentRoutingBuilder {
    engine: Arc<dyn DhtEngine>,
    store: Arc<dyn BlockStore>,
    links: Option<Arc<dyn LinkResolver>>,
    config: RoutingConfig,
}

impl ContentRoutingBuilder {
    /// Set the resolver used to expand recursive provides.
    pub fn link_resolver(mut self, links: Arc<dyn LinkResolver>) -> Self {
        self.links = Some(links);
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: RoutingConfig) -> Self {
        self.config = config;
        self
    }

    /// Bound concurrent announce calls per provide. Default: unbounded.
    pub fn max_inflight_announces(mut self, n: usize) -> Self {
        self.config.max_inflight_announces = Some(n.max(1));
        self
    }

    /// Finish building.
    pub fn build(self) -> ContentRouting {
        ContentRouting {
            engine: self.engine,
            store: self.store,
            links: self.links,
            config: self.config,
        }
    }
}
