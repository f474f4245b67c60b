//! Read-only route table views over an AutNum's peer route map.

use crate::peer_map::{PeerAddress, PeerKey, PeerRouteMap};
use crate::route::RouteEntity;
use rpsl_types::AsNumber;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// The routes exported to one peer, or to every peer of one AS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteTable {
    peer_as: AsNumber,
    /// `None` for an AS-wide table.
    peer_address: Option<PeerAddress>,
    routes: BTreeSet<RouteEntity>,
}

impl RouteTable {
    /// The table stored for exactly `(peer_as, peer_address)`; empty if absent.
    pub fn for_peer(map: &PeerRouteMap, peer_as: AsNumber, peer_address: PeerAddress) -> Self {
        let routes = map
            .get(&PeerKey::new(peer_as, peer_address))
            .cloned()
            .unwrap_or_default();
        Self {
            peer_as,
            peer_address: Some(peer_address),
            routes,
        }
    }

    /// The union of every table whose peer is in `peer_as`, including the
    /// wildcard peer.
    pub fn for_as(map: &PeerRouteMap, peer_as: AsNumber) -> Self {
        let routes = map
            .iter()
            .filter(|(key, _)| key.asn == peer_as)
            .flat_map(|(_, routes)| routes.iter().cloned())
            .collect();
        Self {
            peer_as,
            peer_address: None,
            routes,
        }
    }

    pub fn peer_as(&self) -> AsNumber {
        self.peer_as
    }

    pub fn peer_address(&self) -> Option<PeerAddress> {
        self.peer_address
    }

    pub fn routes(&self) -> &BTreeSet<RouteEntity> {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn contains(&self, route: &RouteEntity) -> bool {
        self.routes.contains(route)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RouteEntity> {
        self.routes.iter()
    }
}

impl fmt::Display for RouteTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.peer_address {
            Some(addr) => writeln!(f, "table for {} {}", self.peer_as, addr)?,
            None => writeln!(f, "table for {}", self.peer_as)?,
        }
        for route in &self.routes {
            writeln!(f, "  {}", route)?;
        }
        Ok(())
    }
}
