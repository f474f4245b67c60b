//! Route-set expansion.
//!
//! Sets reference each other by name, forming a directed graph that may
//! contain cycles. Expansion is a depth-first walk carrying the set of names
//! already entered; a name seen twice contributes nothing the second time, so
//! every walk terminates after at most one visit per set.

use crate::document::PolicyDocument;
use crate::route::RouteEntity;
use crate::route_set::Member;
use rpsl_types::{AsNumber, CiString};
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

/// One top-level expansion.
///
/// The visited set lives as long as the resolver; create a new resolver for
/// every independent query.
pub struct RouteSetResolver<'a> {
    document: &'a PolicyDocument,
    visited: HashSet<CiString>,
}

impl<'a> RouteSetResolver<'a> {
    pub fn new(document: &'a PolicyDocument) -> Self {
        Self {
            document,
            visited: HashSet::new(),
        }
    }

    /// Expands `name` into its member routes.
    ///
    /// Returns the empty set if `name` was already entered by this resolver
    /// or is not in the document.
    pub fn resolve(&mut self, name: &CiString) -> BTreeSet<RouteEntity> {
        let mut routes = BTreeSet::new();

        if !self.visited.insert(name.clone()) {
            debug!("Set {} already visited", name);
            return routes;
        }

        let document = self.document;
        let Some(set) = document.route_set(name) else {
            debug!("Set {} not found, contributes no routes", name);
            return routes;
        };

        for member in set.members() {
            match member {
                Member::Prefix(prefix) => {
                    routes.insert(RouteEntity::unmaintained(*prefix));
                }
                Member::AsNumber(asn) => routes.extend(origin_routes(document, *asn)),
                Member::Set(nested) => routes.extend(self.resolve(nested)),
            }
        }

        if let Some(policy) = set.mbrs_by_ref() {
            for route in document.routes_member_of(name) {
                if let Some(maintainer) = policy.admit(route.origin_maintainer()) {
                    routes.insert(RouteEntity::new(*route.prefix(), maintainer));
                }
            }
        }

        debug!("Set {} resolved to {} routes", name, routes.len());
        routes
    }

    /// Returns true if `name` was entered during this resolver's lifetime.
    pub fn visited(&self, name: &CiString) -> bool {
        self.visited.contains(name)
    }
}

/// Every route object originated by `asn`, attributed to its maintainer.
pub(crate) fn origin_routes(
    document: &PolicyDocument,
    asn: AsNumber,
) -> impl Iterator<Item = RouteEntity> + '_ {
    document
        .routes_originated_by(asn)
        .map(|route| route.to_entity())
}
