//! Content routing over a pluggable DHT engine.
//!
//! [`ContentRouting`] exposes nearest-peer queries, provider and peer lookups,
//! key/value records and provider announcements. Routing, validation and
//! transport belong to the [`DhtEngine`]; the facade only refuses to announce
//! blocks that the local [`BlockStore`] cannot serve.

#![deny(missing_docs)]

pub mod blockstore;
pub mod engine;
pub mod error;
pub mod links;
pub mod memory;
pub mod routing;
pub mod types;

// Re-export key types
pub use blockstore::BlockStore;
pub use engine::{DhtEngine, EngineError};
pub use error::{BoxError, Error, Operation, Result};
pub use links::LinkResolver;
pub use routing::{
    ContentRouting, ContentRoutingBuilder, ProvideOptions, ProvideRequest, RoutingConfig,
};
pub use types::{Cid, NetworkAddress, PeerAddressInfo, PeerId, PeerRecord};
