//! Provide request normalization and facade configuration.

use std::collections::HashSet;

use crate::types::Cid;

/// Options for [`ContentRouting::provide`](super::ContentRouting::provide).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProvideOptions {
    /// Also announce every block transitively linked from the given ones.
    pub recursive: bool,
}

impl ProvideOptions {
    /// Options for a recursive provide.
    pub fn recursive() -> Self {
        Self { recursive: true }
    }
}

/// Configuration for the content-routing facade.
#[derive(Debug, Clone, Default)]
pub struct RoutingConfig {
    /// Upper bound on concurrent announce calls during a provide.
    ///
    /// `None` launches one announce per identifier at once.
    pub max_inflight_announces: Option<usize>,
}

/// The identifiers of a provide call, in order and without duplicates.
///
/// Built from a single [`Cid`] or from any collection of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProvideRequest {
    cids: Vec<Cid>,
}

impl ProvideRequest {
    /// Identifiers in request order.
    pub fn cids(&self) -> &[Cid] {
        &self.cids
    }

    /// Number of distinct identifiers.
    pub fn len(&self) -> usize {
        self.cids.len()
    }

    /// Whether the request names no identifiers.
    pub fn is_empty(&self) -> bool {
        self.cids.is_empty()
    }

    /// Append identifiers not already present, keeping first occurrences.
    pub(crate) fn extend_unique<I>(&mut self, cids: I)
    where
        I: IntoIterator<Item = Cid>,
    {
        let mut seen: HashSet<Cid> = self.cids.iter().cloned().collect();
        for cid in cids {
            if seen.insert(cid.clone()) {
                self.cids.push(cid);
            }
        }
    }

    pub(crate) fn into_cids(self) -> Vec<Cid> {
        self.cids
    }
}

impl FromIterator<Cid> for ProvideRequest {
    fn from_iter<I: IntoIterator<Item = Cid>>(iter: I) -> Self {
        let mut request = Self::default();
        request.extend_unique(iter);
        request
    }
}

impl From<Cid> for ProvideRequest {
    fn from(cid: Cid) -> Self {
        Self { cids: vec![cid] }
    }
}

impl From<&Cid> for ProvideRequest {
    fn from(cid: &Cid) -> Self {
        Self::from(cid.clone())
    }
}

impl From<Vec<Cid>> for ProvideRequest {
    fn from(cids: Vec<Cid>) -> Self {
        cids.into_iter().collect()
    }
}

impl From<&[Cid]> for ProvideRequest {
    fn from(cids: &[Cid]) -> Self {
        cids.iter().cloned().collect()
    }
}

impl<const N: usize> From<[Cid; N]> for ProvideRequest {
    fn from(cids: [Cid; N]) -> Self {
        cids.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cid(name: &str) -> Cid {
        Cid::from_bytes(name)
    }

    #[test]
    fn provide_options_default_is_not_recursive() {
        assert!(!ProvideOptions::default().recursive);
        assert!(ProvideOptions::recursive().recursive);
    }

    #[test]
    fn routing_config_default_is_unbounded() {
        assert_eq!(RoutingConfig::default().max_inflight_announces, None);
    }

    #[test]
    fn single_cid_matches_one_element_collection() {
        let single = ProvideRequest::from(cid("a"));
        let many = ProvideRequest::from(vec![cid("a")]);
        assert_eq!(single, many);
    }

    #[test]
    fn duplicates_are_collapsed_in_order() {
        let request = ProvideRequest::from([cid("b"), cid("a"), cid("b"), cid("c"), cid("a")]);
        assert_eq!(request.cids(), &[cid("b"), cid("a"), cid("c")]);
    }

    #[test]
    fn extend_unique_skips_known_cids() {
        let mut request = ProvideRequest::from(vec![cid("a"), cid("b")]);
        request.extend_unique(vec![cid("b"), cid("c"), cid("c")]);
        assert_eq!(request.len(), 3);
        assert_eq!(request.cids()[2], cid("c"));
    }

    #[test]
    fn empty_collection_normalizes_to_empty_request() {
        assert!(ProvideRequest::from(Vec::<Cid>::new()).is_empty());
    }
}
