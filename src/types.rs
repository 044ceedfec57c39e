//! Identifier and record types exchanged with the DHT engine.

use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;

/// Content identifier: an immutable, content-derived key for a block.
///
/// Equality, ordering and hashing are by identifier value. Cloning is cheap.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cid(Arc<[u8]>);

impl Cid {
    /// Wrap raw identifier bytes.
    pub fn from_bytes(bytes: impl AsRef<[u8]>) -> Self {
        Self(Arc::from(bytes.as_ref()))
    }

    /// Raw identifier bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<&[u8]> for Cid {
    fn from(bytes: &[u8]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<Vec<u8>> for Cid {
    fn from(bytes: Vec<u8>) -> Self {
        Self(Arc::from(bytes))
    }
}

impl fmt::Display for Cid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_hex(f, &self.0)
    }
}

impl fmt::Debug for Cid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cid({self})")
    }
}

/// Identifier of a network participant (32 bytes, e.g. an ed25519 public key).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PeerId([u8; 32]);

impl PeerId {
    /// Create a peer identifier from its raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Raw identifier bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl From<[u8; 32]> for PeerId {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_hex(f, &self.0)
    }
}

impl fmt::Debug for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // short form keeps log lines readable
        f.write_str("PeerId(")?;
        write_hex(f, &self.0[..5])?;
        f.write_str(")")
    }
}

/// A network address at which a peer can be reached.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NetworkAddress {
    /// Direct IP address.
    Ip(SocketAddr),
    /// Relay URL through which the peer is reachable.
    Relay(String),
}

impl From<SocketAddr> for NetworkAddress {
    fn from(addr: SocketAddr) -> Self {
        Self::Ip(addr)
    }
}

impl fmt::Display for NetworkAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ip(addr) => write!(f, "{addr}"),
            Self::Relay(url) => write!(f, "relay:{url}"),
        }
    }
}

/// A provider found for some content: the peer and its known addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerAddressInfo {
    /// The providing peer.
    pub id: PeerId,
    /// Addresses known for the peer at lookup time.
    pub addrs: Vec<NetworkAddress>,
}

impl PeerAddressInfo {
    /// Create provider info for a peer.
    pub fn new(id: PeerId, addrs: Vec<NetworkAddress>) -> Self {
        Self { id, addrs }
    }
}

/// Peer record as returned by the engine's peer lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeerRecord {
    /// Address groups, one per transport the peer advertised.
    pub addrs: Vec<Vec<NetworkAddress>>,
}

impl PeerRecord {
    /// A record with a single address group.
    pub fn new(addrs: Vec<NetworkAddress>) -> Self {
        Self { addrs: vec![addrs] }
    }

    /// Add another address group.
    pub fn with_group(mut self, addrs: Vec<NetworkAddress>) -> Self {
        self.addrs.push(addrs);
        self
    }

    /// Flatten all address groups into one ordered sequence.
    ///
    /// A record with no addresses yields an empty vec.
    pub fn into_addresses(self) -> Vec<NetworkAddress> {
        self.addrs.into_iter().flatten().collect()
    }
}

fn write_hex(f: &mut fmt::Formatter<'_>, bytes: &[u8]) -> fmt::Result {
    for b in bytes {
        write!(f, "{b:02x}")?;
    }
    Ok(())
}
