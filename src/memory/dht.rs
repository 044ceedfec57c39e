//! Recording in-memory DHT engine.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::trace;

use crate::engine::{DhtEngine, EngineError};
use crate::types::{Cid, NetworkAddress, PeerAddressInfo, PeerId, PeerRecord};

#[derive(Debug, Default)]
struct State {
    offline: bool,
    closest: HashMap<PeerId, Vec<PeerId>>,
    providers: HashMap<Cid, Vec<PeerAddressInfo>>,
    peers: HashMap<PeerId, PeerRecord>,
    records: HashMap<Vec<u8>, Vec<u8>>,
    failing_provides: HashSet<Cid>,
    announced: Vec<Cid>,
}

/// DHT engine answering from local tables and recording every announce.
///
/// Successful announces register the local peer as a provider, so a later
/// `find_providers` returns it. Failures can be scripted per identifier, or
/// for every call with [`set_offline`](Self::set_offline).
#[derive(Debug)]
pub struct MemoryDht {
    local: PeerAddressInfo,
    state: Mutex<State>,
}

impl MemoryDht {
    /// Create an engine for a local peer with the given addresses.
    pub fn new(local_id: PeerId, local_addrs: Vec<NetworkAddress>) -> Self {
        Self {
            local: PeerAddressInfo::new(local_id, local_addrs),
            state: Mutex::new(State::default()),
        }
    }

    /// Script the answer to a closest-peers query.
    pub async fn set_closest_peers(&self, target: PeerId, peers: Vec<PeerId>) {
        self.state.lock().await.closest.insert(target, peers);
    }

    /// Register a remote provider for `cid`.
    pub async fn add_provider(&self, cid: Cid, provider: PeerAddressInfo) {
        self.state
            .lock()
            .await
            .providers
            .entry(cid)
            .or_default()
            .push(provider);
    }

    /// Store the address record of a peer.
    pub async fn set_peer_record(&self, peer: PeerId, record: PeerRecord) {
        self.state.lock().await.peers.insert(peer, record);
    }

    /// Make announces of `cid` fail with [`EngineError::NoRoute`].
    pub async fn fail_provide(&self, cid: Cid) {
        self.state.lock().await.failing_provides.insert(cid);
    }

    /// While offline, every call fails with [`EngineError::NoRoute`].
    pub async fn set_offline(&self, offline: bool) {
        self.state.lock().await.offline = offline;
    }

    /// Every identifier passed to `provide`, in call order, including failed ones.
    pub async fn announced(&self) -> Vec<Cid> {
        self.state.lock().await.announced.clone()
    }

    /// Value currently stored under `key`.
    pub async fn record(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.state.lock().await.records.get(key).cloned()
    }
}

impl State {
    fn online(&self) -> Result<(), EngineError> {
        if self.offline {
            Err(EngineError::NoRoute)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl DhtEngine for MemoryDht {
    async fn closest_peers(&self, peer: &PeerId) -> Result<Vec<PeerId>, EngineError> {
        let state = self.state.lock().await;
        state.online()?;
        Ok(state.closest.get(peer).cloned().unwrap_or_default())
    }

    async fn find_providers(&self, cid: &Cid) -> Result<Vec<PeerAddressInfo>, EngineError> {
        let state = self.state.lock().await;
        state.online()?;
        Ok(state.providers.get(cid).cloned().unwrap_or_default())
    }

    async fn find_peer(&self, peer: &PeerId) -> Result<PeerRecord, EngineError> {
        let state = self.state.lock().await;
        state.online()?;
        state.peers.get(peer).cloned().ok_or(EngineError::NotFound)
    }

    async fn get(&self, key: &[u8]) -> Result<Vec<u8>, EngineError> {
        let state = self.state.lock().await;
        state.online()?;
        state.records.get(key).cloned().ok_or(EngineError::NotFound)
    }

    async fn put(&self, key: &[u8], value: &[u8]) -> Result<(), EngineError> {
        let mut state = self.state.lock().await;
        state.online()?;
        state.records.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    async fn provide(&self, cid: &Cid) -> Result<(), EngineError> {
        let mut state = self.state.lock().await;
        state.announced.push(cid.clone());
        state.online()?;
        if state.failing_provides.contains(cid) {
            trace!(%cid, "scripted announce failure");
            return Err(EngineError::NoRoute);
        }

        let providers = state.providers.entry(cid.clone()).or_default();
        if !providers.iter().any(|p| p.id == self.local.id) {
            providers.push(self.local.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peer(byte: u8) -> PeerId {
        PeerId::from([byte; 32])
    }

    #[tokio::test]
    async fn provide_registers_local_peer_once() {
        let dht = MemoryDht::new(peer(1), Vec::new());
        let cid = Cid::from_bytes(b"a");

        dht.provide(&cid).await.expect("provide");
        dht.provide(&cid).await.expect("provide");

        let providers = dht.find_providers(&cid).await.expect("lookup");
        assert_eq!(providers.len(), 1);
        assert_eq!(providers[0].id, peer(1));
        assert_eq!(dht.announced().await.len(), 2);
    }

    #[tokio::test]
    async fn missing_record_is_not_found() {
        let dht = MemoryDht::new(peer(1), Vec::new());
        assert!(matches!(dht.get(b"/nope").await, Err(EngineError::NotFound)));
        assert!(matches!(
            dht.find_peer(&peer(2)).await,
            Err(EngineError::NotFound)
        ));
    }

    #[tokio::test]
    async fn offline_engine_fails_every_call() {
        let dht = MemoryDht::new(peer(1), Vec::new());
        dht.set_offline(true).await;
        assert!(matches!(
            dht.closest_peers(&peer(2)).await,
            Err(EngineError::NoRoute)
        ));
        assert!(matches!(
            dht.put(b"/k", b"v").await,
            Err(EngineError::NoRoute)
        ));
    }
}
