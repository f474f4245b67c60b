//! Route filter evaluation for `announce` expressions.
//!
//! Terms are unioned. Supported terms are prefixes (bare or in `{ }`), host
//! addresses, AS numbers, `PeerAS`, `ANY` and set names; `OR` is accepted as
//! a separator. Terms are classified like set members.

use crate::document::PolicyDocument;
use crate::error::DiagnosticKind;
use crate::resolver::{origin_routes, RouteSetResolver};
use crate::route::RouteEntity;
use crate::route_set::Member;
use rpsl_types::AsNumber;
use std::collections::BTreeSet;
use tracing::debug;

/// Operators outside the union-only grammar.
const UNSUPPORTED: &[&str] = &["AND", "NOT", "EXCEPT", "REFINE", "(", ")"];

/// Evaluates the words of an `announce` expression.
///
/// `peer_as` is substituted for `PeerAS`. Each set name is expanded with its
/// own resolver, since every term is an independent query.
///
/// # Errors
///
/// Returns [`DiagnosticKind::UnsupportedFilter`] for `AND`, `NOT`, `EXCEPT`,
/// `REFINE` and parentheses.
pub fn evaluate(
    document: &PolicyDocument,
    words: &[String],
    peer_as: AsNumber,
) -> Result<BTreeSet<RouteEntity>, DiagnosticKind> {
    if let Some(op) = words
        .iter()
        .find(|w| UNSUPPORTED.iter().any(|u| w.eq_ignore_ascii_case(u)))
    {
        return Err(DiagnosticKind::UnsupportedFilter(op.clone()));
    }

    let mut routes = BTreeSet::new();
    for word in words {
        if matches!(word.as_str(), "{" | "}") || word.starts_with('^') {
            continue;
        }
        if word.eq_ignore_ascii_case("OR") {
            continue;
        }

        if word.eq_ignore_ascii_case("ANY") {
            routes.extend(document.routes().iter().map(|r| r.to_entity()));
        } else if word.eq_ignore_ascii_case("PeerAS") {
            routes.extend(origin_routes(document, peer_as));
        } else {
            match Member::parse(word) {
                Member::Prefix(prefix) => {
                    routes.insert(RouteEntity::unmaintained(prefix));
                }
                Member::AsNumber(asn) => routes.extend(origin_routes(document, asn)),
                Member::Set(name) => {
                    if document.route_set(&name).is_none() {
                        debug!("Filter term {} is not a known set", name);
                    }
                    routes.extend(RouteSetResolver::new(document).resolve(&name));
                }
            }
        }
    }

    Ok(routes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rpsl_object::read_objects;

    const OBJECTS: &str = "route: 1.1.1.0/24\norigin: AS1\nmnt-by: MNTR-ONE\n\n\
                           route: 2.2.2.0/24\norigin: AS2\n\n\
                           route-set: rs-two\nmembers: 2.2.0.0/16\n";

    fn document() -> PolicyDocument {
        PolicyDocument::from_objects(read_objects(OBJECTS).map(|r| r.unwrap()))
    }

    fn words(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    fn prefixes(routes: &BTreeSet<RouteEntity>) -> Vec<String> {
        routes.iter().map(|r| r.to_string()).collect()
    }

    #[test]
    fn test_prefix_list() {
        let doc = document();
        let routes = evaluate(&doc, &words("{ 9.9.0.0/16 9.8.0.0/16^+ }"), AsNumber::new(2)).unwrap();
        assert_eq!(
            prefixes(&routes),
            vec!["9.8.0.0/16^+ via null", "9.9.0.0/16 via null"]
        );
    }

    #[test]
    fn test_as_number_and_set() {
        let doc = document();
        let routes = evaluate(&doc, &words("AS1 OR rs-two"), AsNumber::new(2)).unwrap();
        assert_eq!(
            prefixes(&routes),
            vec!["1.1.1.0/24 via MNTR-ONE", "2.2.0.0/16 via null"]
        );
    }

    #[test]
    fn test_operator_on_set_and_as_terms() {
        let doc = document();
        let routes = evaluate(&doc, &words("rs-two^+ AS1^24"), AsNumber::new(2)).unwrap();
        assert_eq!(
            prefixes(&routes),
            vec!["1.1.1.0/24 via MNTR-ONE", "2.2.0.0/16 via null"]
        );
        assert_eq!(
            routes,
            evaluate(&doc, &words("rs-two AS1"), AsNumber::new(2)).unwrap()
        );
    }

    #[test]
    fn test_bare_host_address() {
        let doc = document();
        let routes = evaluate(&doc, &words("192.0.2.1 2001:db8::1"), AsNumber::new(2)).unwrap();
        assert_eq!(
            prefixes(&routes),
            vec!["192.0.2.1/32 via null", "2001:db8::1/128 via null"]
        );
    }

    #[test]
    fn test_peer_as() {
        let doc = document();
        let routes = evaluate(&doc, &words("PeerAS"), AsNumber::new(2)).unwrap();
        assert_eq!(prefixes(&routes), vec!["2.2.2.0/24 via null"]);
    }

    #[test]
    fn test_any() {
        let doc = document();
        assert_eq!(evaluate(&doc, &words("ANY"), AsNumber::new(2)).unwrap().len(), 2);
    }

    #[test]
    fn test_unknown_set_is_empty() {
        let doc = document();
        assert!(evaluate(&doc, &words("AS-NOWHERE"), AsNumber::new(2))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_unsupported_operator() {
        let doc = document();
        assert_eq!(
            evaluate(&doc, &words("AS1 AND NOT rs-two"), AsNumber::new(2)),
            Err(DiagnosticKind::UnsupportedFilter("AND".to_string()))
        );
    }
}
