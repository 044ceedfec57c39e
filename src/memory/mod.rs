//! In-process collaborators.
//!
//! Useful for embedding the facade without a network, and for tests:
//! - [`MemoryBlockStore`]: set of locally held blocks
//! - [`MemoryDht`]: recording engine with scripted answers and failures
//! - [`MemoryDag`]: link graph resolved by breadth-first traversal

mod dag;
mod dht;
mod store;

pub use dag::MemoryDag;
pub use dht::MemoryDht;
pub use store::MemoryBlockStore;
