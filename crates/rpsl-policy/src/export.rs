//! Export policy interpretation.
//!
//! Each `export`/`mp-export` attribute is tokenized into `(keyword, values)`
//! pairs and scanned for `to <AS> [<addr>...]` followed by `at <router>`.
//! A bad clause is reported as a [`Diagnostic`] and skipped; scanning
//! continues with the next `to`, and other attributes are unaffected.

use crate::document::PolicyDocument;
use crate::error::{Diagnostic, DiagnosticKind};
use crate::filter;
use crate::peer_map::{PeerAddress, PeerKey, PeerRouteMap};
use rpsl_object::{PolicyToken, RpslAttribute};
use rpsl_types::{AsNumber, IpAddress};
use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

/// `(peer AS, peer address, local router)` from one export clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PeeringDescriptor {
    pub peer: PeerKey,
    pub local_router: IpAddress,
}

impl fmt::Display for PeeringDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.peer, self.local_router)
    }
}

/// One well-formed `to ... at ...` clause and its filter words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportClause {
    pub peer_as: AsNumber,
    pub peerings: Vec<PeeringDescriptor>,
    /// Words of the governing `announce`, if any.
    pub filter: Option<Vec<String>>,
}

/// Extracts the peering clauses of one export attribute.
///
/// Problems are appended to `diagnostics`.
pub fn parse_export(attr: &RpslAttribute, diagnostics: &mut Vec<Diagnostic>) -> Vec<ExportClause> {
    let text = attr.clean_value();
    let tokens = attr.token_list();
    let mut clauses = Vec::new();
    let mut report = |kind: DiagnosticKind| {
        warn!("{} in export '{}'", kind, text);
        diagnostics.push(Diagnostic::new(text.as_str(), kind));
    };

    for (i, token) in tokens.iter().enumerate() {
        if !token.is("to") {
            continue;
        }

        let router = match tokens.get(i + 1) {
            Some(at) if at.is("at") && at.values.len() == 1 => &at.values[0],
            _ => {
                report(DiagnosticKind::MalformedPeering);
                continue;
            }
        };

        let Some(as_token) = token.values.first() else {
            report(DiagnosticKind::MissingPeerAs);
            continue;
        };
        let peer_as: AsNumber = match as_token.parse() {
            Ok(asn) => asn,
            Err(_) => {
                report(DiagnosticKind::InvalidPeerAs(as_token.clone()));
                continue;
            }
        };

        let local_router: IpAddress = match router.parse() {
            Ok(addr) => addr,
            Err(_) => {
                report(DiagnosticKind::InvalidRouterAddress(router.clone()));
                continue;
            }
        };

        let addresses: Vec<PeerAddress> = if token.values.len() < 2 {
            vec![PeerAddress::Any]
        } else {
            token.values[1..]
                .iter()
                .filter_map(|value| match value.parse::<IpAddress>() {
                    Ok(addr) => Some(PeerAddress::Ip(addr)),
                    Err(_) => {
                        report(DiagnosticKind::InvalidPeerAddress(value.clone()));
                        None
                    }
                })
                .collect()
        };

        let filter = find_filter(&tokens[i + 2..]);
        if filter.is_none() {
            report(DiagnosticKind::MissingFilter);
        }

        let peerings = addresses
            .into_iter()
            .map(|address| PeeringDescriptor {
                peer: PeerKey::new(peer_as, address),
                local_router,
            })
            .collect();
        clauses.push(ExportClause {
            peer_as,
            peerings,
            filter,
        });
    }

    clauses
}

/// Words of the first `announce` after a peering.
///
/// `except`/`refine` parts following the `announce`, up to the next `to`,
/// are kept with their keyword upper-cased so evaluation can reject them.
fn find_filter(rest: &[PolicyToken]) -> Option<Vec<String>> {
    let idx = rest.iter().position(|t| t.is("announce"))?;
    let mut words = rest[idx].values.clone();
    for token in rest[idx + 1..].iter().take_while(|t| !t.is("to")) {
        if token.is("except") || token.is("refine") {
            words.push(token.keyword.to_ascii_uppercase());
            words.extend(token.values.iter().cloned());
        }
    }
    Some(words)
}

/// Result of interpreting every export attribute of one AutNum.
#[derive(Debug, Clone, Default)]
pub struct ExportTables {
    pub peer_routes: PeerRouteMap,
    pub peerings: Vec<PeeringDescriptor>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Builds peer route tables from export attributes against one document.
pub struct ExportInterpreter<'a> {
    document: &'a PolicyDocument,
}

impl<'a> ExportInterpreter<'a> {
    pub fn new(document: &'a PolicyDocument) -> Self {
        Self { document }
    }

    /// Interprets `attributes` in order, accumulating per-peer routes.
    pub fn interpret<'b>(&self, attributes: impl IntoIterator<Item = &'b RpslAttribute>) -> ExportTables {
        let mut tables = ExportTables::default();

        for attr in attributes {
            for clause in parse_export(attr, &mut tables.diagnostics) {
                let routes = match &clause.filter {
                    Some(words) => match filter::evaluate(self.document, words, clause.peer_as) {
                        Ok(routes) => routes,
                        Err(kind) => {
                            let text = attr.clean_value();
                            warn!("{} in export '{}'", kind, text);
                            tables.diagnostics.push(Diagnostic::new(text, kind));
                            Default::default()
                        }
                    },
                    None => Default::default(),
                };

                for peering in clause.peerings {
                    debug!("{} receives {} routes", peering, routes.len());
                    tables
                        .peer_routes
                        .insert_routes(peering.peer, routes.iter().cloned());
                    if !tables.peerings.contains(&peering) {
                        tables.peerings.push(peering);
                    }
                }
            }
        }

        tables
    }
}
