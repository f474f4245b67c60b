//! The `aut-num` class and its export route tables.

use crate::document::PolicyDocument;
use crate::error::{Diagnostic, PolicyError, PolicyResult};
use crate::export::{ExportInterpreter, ExportTables, PeeringDescriptor};
use crate::peer_map::{PeerAddress, PeerRouteMap};
use crate::table::RouteTable;
use rpsl_object::{AttributeType, ObjectType, RpslAttribute, RpslObject};
use rpsl_types::AsNumber;
use std::fmt;
use tracing::info;

/// Export attribute types interpreted as peering policy.
const EXPORT_ATTRIBUTES: [AttributeType; 2] = [AttributeType::Export, AttributeType::MpExport];

/// An Autonomous System's policy, with its export tables computed once at
/// construction.
#[derive(Debug, Clone)]
pub struct AutNum {
    name: String,
    as_number: AsNumber,
    export_clauses: Vec<String>,
    peer_routes: PeerRouteMap,
    peerings: Vec<PeeringDescriptor>,
    diagnostics: Vec<Diagnostic>,
}

impl AutNum {
    /// Builds an AutNum and its route tables.
    ///
    /// Malformed export clauses do not fail construction; they are available
    /// from [`diagnostics`](Self::diagnostics).
    ///
    /// # Errors
    ///
    /// Fails if `object` is not an `aut-num`, its AS number does not parse,
    /// or `as-name` is missing.
    pub fn new(object: &RpslObject, document: &PolicyDocument) -> PolicyResult<Self> {
        let object_type = object.object_type();
        if object_type != ObjectType::AutNum {
            return Err(PolicyError::wrong_type(ObjectType::AutNum, object_type));
        }

        let key = object.key();
        let as_number: AsNumber = key
            .parse()
            .map_err(|e| PolicyError::invalid(&key, AttributeType::AutNum, e))?;
        let name = object
            .value_for(&AttributeType::AsName)
            .ok_or_else(|| PolicyError::missing(&key, AttributeType::AsName))?;

        let exports: Vec<&RpslAttribute> = object
            .attributes()
            .iter()
            .filter(|a| EXPORT_ATTRIBUTES.contains(a.attr_type()))
            .collect();

        let ExportTables {
            peer_routes,
            peerings,
            diagnostics,
        } = ExportInterpreter::new(document).interpret(exports.iter().copied());

        info!(
            "{} ({}): {} peers from {} export attributes, {} diagnostics",
            name,
            as_number,
            peer_routes.len(),
            exports.len(),
            diagnostics.len()
        );

        Ok(Self {
            name,
            as_number,
            export_clauses: exports.iter().map(|a| a.clean_value()).collect(),
            peer_routes,
            peerings,
            diagnostics,
        })
    }

    /// The `as-name`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn as_number(&self) -> AsNumber {
        self.as_number
    }

    /// Clean values of the export attributes, in order.
    pub fn export_clauses(&self) -> &[String] {
        &self.export_clauses
    }

    pub fn peer_routes(&self) -> &PeerRouteMap {
        &self.peer_routes
    }

    /// Every distinct peering, in declaration order.
    pub fn peerings(&self) -> &[PeeringDescriptor] {
        &self.peerings
    }

    /// Problems found in the export attributes.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Routes exported to exactly `(peer_as, peer_address)`.
    pub fn table_for_peer(&self, peer_as: AsNumber, peer_address: PeerAddress) -> RouteTable {
        RouteTable::for_peer(&self.peer_routes, peer_as, peer_address)
    }

    /// Routes exported to any peer in `peer_as`.
    pub fn table_for_as(&self, peer_as: AsNumber) -> RouteTable {
        RouteTable::for_as(&self.peer_routes, peer_as)
    }

    /// The AS of the first declared peer at `peer_address`.
    pub fn as_of_peer(&self, peer_address: PeerAddress) -> Option<AsNumber> {
        self.peer_routes
            .keys()
            .find(|key| key.address == peer_address)
            .map(|key| key.asn)
    }
}

impl fmt::Display for AutNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.as_number)
    }
}
