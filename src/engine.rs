//! DHT engine seam.
//!
//! The engine owns routing, record validation and transport. The facade only
//! forwards calls to it and wraps its failures; see [`crate::ContentRouting`].

use async_trait::async_trait;

use crate::error::BoxError;
use crate::types::{Cid, PeerAddressInfo, PeerId, PeerRecord};

/// Failure reported by a DHT engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The key or record does not exist in the network.
    #[error("not found")]
    NotFound,

    /// A write reached fewer peers than the engine requires.
    #[error("quorum not met: {achieved}/{required} peers acknowledged")]
    QuorumNotMet {
        /// Acknowledgements required.
        required: usize,
        /// Acknowledgements received.
        achieved: usize,
    },

    /// No route to the target (empty routing table, partition).
    #[error("no route to the target")]
    NoRoute,

    /// Any other engine-specific failure.
    #[error(transparent)]
    Other(#[from] BoxError),
}

impl EngineError {
    /// Wrap an arbitrary engine failure.
    pub fn other<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self::Other(err.into())
    }
}

/// Network operations provided by a DHT engine.
///
/// Each call may suspend on network I/O. Implementations apply their own
/// timeouts; callers never retry through this trait.
#[async_trait]
pub trait DhtEngine: Send + Sync + 'static {
    /// Peers closest (by the engine's metric) to `peer`.
    async fn closest_peers(&self, peer: &PeerId) -> Result<Vec<PeerId>, EngineError>;

    /// Peers that announced they can serve `cid`.
    async fn find_providers(&self, cid: &Cid) -> Result<Vec<PeerAddressInfo>, EngineError>;

    /// Look up the address record of `peer`.
    async fn find_peer(&self, peer: &PeerId) -> Result<PeerRecord, EngineError>;

    /// Read the value stored under `key`.
    async fn get(&self, key: &[u8]) -> Result<Vec<u8>, EngineError>;

    /// Store `value` under `key`.
    async fn put(&self, key: &[u8], value: &[u8]) -> Result<(), EngineError>;

    /// Announce that the local node provides `cid`.
    async fn provide(&self, cid: &Cid) -> Result<(), EngineError>;
}
