//! Insertion-ordered map from export peers to their routes.
//!
//! `PeerRouteMap` never creates entries on lookup: `get()` returns `Option`,
//! and only the export interpreter inserts. Keys keep the order in which
//! peers were first declared, which peer-by-address lookup relies on.

use crate::route::RouteEntity;
use rpsl_types::{AsNumber, IpAddress};
use serde::{Serialize, Serializer};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// The remote end of a peering: one router, or every router of the AS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PeerAddress {
    /// No address given: all peers in the AS.
    Any,
    Ip(IpAddress),
}

impl fmt::Display for PeerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeerAddress::Any => f.write_str("any"),
            PeerAddress::Ip(addr) => addr.fmt(f),
        }
    }
}

impl Serialize for PeerAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<IpAddress> for PeerAddress {
    fn from(addr: IpAddress) -> Self {
        PeerAddress::Ip(addr)
    }
}

/// `(peer AS, peer address)`: the key of a peer's route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PeerKey {
    pub asn: AsNumber,
    pub address: PeerAddress,
}

impl PeerKey {
    pub fn new(asn: AsNumber, address: PeerAddress) -> Self {
        Self { asn, address }
    }
}

impl fmt::Display for PeerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.asn, self.address)
    }
}

/// Routes exported to each peer, keyed in first-declared order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeerRouteMap {
    entries: Vec<(PeerKey, BTreeSet<RouteEntity>)>,
    index: HashMap<PeerKey, usize>,
}

impl PeerRouteMap {
    /// Creates a new empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of peers in the map.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if the map contains the given peer.
    pub fn contains_key(&self, key: &PeerKey) -> bool {
        self.index.contains_key(key)
    }

    /// Returns the routes for the given peer.
    ///
    /// Returns `None` if the peer is not present.
    /// **This never creates entries.**
    pub fn get(&self, key: &PeerKey) -> Option<&BTreeSet<RouteEntity>> {
        self.index.get(key).map(|&idx| &self.entries[idx].1)
    }

    /// Peers in first-declared order.
    pub fn keys(&self) -> impl Iterator<Item = &PeerKey> {
        self.entries.iter().map(|(key, _)| key)
    }

    /// `(peer, routes)` pairs in first-declared order.
    pub fn iter(&self) -> impl Iterator<Item = (&PeerKey, &BTreeSet<RouteEntity>)> {
        self.entries.iter().map(|(key, routes)| (key, routes))
    }

    /// Registers `key` if absent, then unions `routes` into its table.
    pub(crate) fn insert_routes(
        &mut self,
        key: PeerKey,
        routes: impl IntoIterator<Item = RouteEntity>,
    ) {
        let idx = match self.index.get(&key) {
            Some(&idx) => idx,
            None => {
                let idx = self.entries.len();
                self.entries.push((key, BTreeSet::new()));
                self.index.insert(key, idx);
                idx
            }
        };
        self.entries[idx].1.extend(routes);
    }
}
