//! Error types for dht-content-routing.

use std::fmt;

use crate::engine::EngineError;
use crate::types::Cid;

/// Result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error used by collaborators for their own failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Facade operation an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Closest-peers query.
    Query,
    /// Provider lookup.
    FindProviders,
    /// Peer address lookup.
    FindPeer,
    /// Key/value read.
    Get,
    /// Key/value write.
    Put,
    /// Provider announcement.
    Provide,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Query => "query",
            Self::FindProviders => "find_providers",
            Self::FindPeer => "find_peer",
            Self::Get => "get",
            Self::Put => "put",
            Self::Provide => "provide",
        })
    }
}

/// Main error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The DHT engine failed. The engine's cause is kept as the source.
    #[error("DHT engine error during {operation}{}: {source}", display_cid(.cid))]
    Engine {
        /// Operation that failed.
        operation: Operation,
        /// Identifier being announced or looked up, when there is one.
        cid: Option<Cid>,
        /// Engine-provided cause.
        #[source]
        source: EngineError,
    },

    /// A provide request named blocks that are not in the local store.
    #[error("not all blocks exist locally, cannot provide ({} missing)", .missing.len())]
    LocalAvailability {
        /// Identifiers absent from the local store, in request order.
        missing: Vec<Cid>,
    },

    /// Invalid combination of arguments.
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    /// The local store failed while checking for a block.
    #[error("Local store error for {cid}: {source}")]
    Store {
        /// Identifier being checked.
        cid: Cid,
        /// Store-provided cause.
        #[source]
        source: BoxError,
    },

    /// The link resolver failed while expanding a recursive provide.
    #[error("Link resolution error for {cid}: {source}")]
    Links {
        /// Root identifier being expanded.
        cid: Cid,
        /// Resolver-provided cause.
        #[source]
        source: BoxError,
    },
}

impl Error {
    /// Create a malformed request error.
    pub fn malformed<S: Into<String>>(msg: S) -> Self {
        Self::MalformedRequest(msg.into())
    }

    pub(crate) fn engine(operation: Operation, source: EngineError) -> Self {
        Self::Engine {
            operation,
            cid: None,
            source,
        }
    }

    pub(crate) fn engine_for(operation: Operation, cid: Cid, source: EngineError) -> Self {
        Self::Engine {
            operation,
            cid: Some(cid),
            source,
        }
    }

    /// True when the engine reported that the key or record does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Engine {
                source: EngineError::NotFound,
                ..
            }
        )
    }

    /// The identifier this error is about, if any.
    pub fn cid(&self) -> Option<&Cid> {
        match self {
            Self::Engine { cid, .. } => cid.as_ref(),
            Self::Store { cid, .. } | Self::Links { cid, .. } => Some(cid),
            Self::LocalAvailability { missing } => missing.first(),
            Self::MalformedRequest(_) => None,
        }
    }
}

fn display_cid(cid: &Option<Cid>) -> String {
    match cid {
        Some(cid) => format!(" for {cid}"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_error_names_operation_and_cid() {
        let cid = Cid::from_bytes([0xaa, 0xbb]);
        let err = Error::engine_for(Operation::Provide, cid.clone(), EngineError::NoRoute);
        assert_eq!(
            err.to_string(),
            "DHT engine error during provide for aabb: no route to the target"
        );
        assert_eq!(err.cid(), Some(&cid));
    }

    #[test]
    fn not_found_is_detected_through_wrapper() {
        let err = Error::engine(Operation::Get, EngineError::NotFound);
        assert!(err.is_not_found());
        assert!(!Error::engine(Operation::Get, EngineError::NoRoute).is_not_found());
    }

    #[test]
    fn local_availability_message() {
        let err = Error::LocalAvailability {
            missing: vec![Cid::from_bytes(b"b")],
        };
        assert!(err
            .to_string()
            .starts_with("not all blocks exist locally, cannot provide"));
    }
}
