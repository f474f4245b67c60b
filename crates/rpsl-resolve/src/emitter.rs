//! Output emitters.
//!
//! An emitter renders a resolved document (its AutNums and route-sets) into
//! text. The set of emitters is closed; each is selected by name and
//! configured from `key=value` arguments it declares up front.

use crate::error::{ResolveError, Result};
use rpsl_policy::{AutNum, PeerKey, PolicyDocument, RouteEntity};
use rpsl_types::AsNumber;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;

/// Names the available emitters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmitterKind {
    Null,
    Text,
    Json,
}

impl EmitterKind {
    pub const ALL: [EmitterKind; 3] = [EmitterKind::Null, EmitterKind::Text, EmitterKind::Json];

    pub const fn name(self) -> &'static str {
        match self {
            EmitterKind::Null => "null",
            EmitterKind::Text => "text",
            EmitterKind::Json => "json",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            EmitterKind::Null => "discards all output",
            EmitterKind::Text => "human-readable route tables per aut-num, then route-sets",
            EmitterKind::Json => "JSON document of aut-nums, peers, routes and route-sets",
        }
    }

    /// `(argument, description)` pairs accepted by this emitter.
    pub const fn valid_arguments(self) -> &'static [(&'static str, &'static str)] {
        match self {
            EmitterKind::Null => &[],
            EmitterKind::Text => &[("aut-num", "only emit the aut-num with this AS number")],
            EmitterKind::Json => &[("pretty", "indent output (true|false, default true)")],
        }
    }

    /// Looks up an emitter by name, ignoring case.
    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| ResolveError::UnknownEmitter(name.to_string()))
    }
}

/// Describes every emitter and its arguments, for `--list-emitters`.
pub fn list() -> String {
    let mut out = String::new();
    for kind in EmitterKind::ALL {
        let _ = writeln!(out, "{:<6} {}", kind.name(), kind.description());
        for (argument, description) in kind.valid_arguments() {
            let _ = writeln!(out, "         {}=<value>  {}", argument, description);
        }
    }
    out
}

/// A configured emitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emitter {
    Null,
    Text { aut_num: Option<AsNumber> },
    Json { pretty: bool },
}

impl Emitter {
    /// Builds an emitter of `kind` from its arguments.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::InvalidEmitterArgument`] for an argument the
    /// emitter does not declare, or one whose value does not parse.
    pub fn configure(kind: EmitterKind, arguments: &BTreeMap<String, String>) -> Result<Self> {
        let declared = kind.valid_arguments();
        if let Some(unknown) = arguments
            .keys()
            .find(|key| !declared.iter().any(|(name, _)| key.eq_ignore_ascii_case(name)))
        {
            return Err(ResolveError::invalid_argument(
                kind.name(),
                unknown.as_str(),
                "unknown argument",
            ));
        }

        let argument = |name: &str| {
            arguments
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value.as_str())
        };

        match kind {
            EmitterKind::Null => Ok(Emitter::Null),
            EmitterKind::Text => {
                let aut_num = argument("aut-num")
                    .map(|value| {
                        value.parse::<AsNumber>().map_err(|e| {
                            ResolveError::invalid_argument(kind.name(), "aut-num", e.to_string())
                        })
                    })
                    .transpose()?;
                Ok(Emitter::Text { aut_num })
            }
            EmitterKind::Json => {
                let pretty = match argument("pretty") {
                    None => true,
                    Some(value) if value.eq_ignore_ascii_case("true") => true,
                    Some(value) if value.eq_ignore_ascii_case("false") => false,
                    Some(value) => {
                        return Err(ResolveError::invalid_argument(
                            kind.name(),
                            "pretty",
                            format!("expected true or false, got '{}'", value),
                        ))
                    }
                };
                Ok(Emitter::Json { pretty })
            }
        }
    }

    pub fn kind(&self) -> EmitterKind {
        match self {
            Emitter::Null => EmitterKind::Null,
            Emitter::Text { .. } => EmitterKind::Text,
            Emitter::Json { .. } => EmitterKind::Json,
        }
    }

    /// Renders `aut_nums` and the document's route-sets.
    pub fn emit(&self, document: &PolicyDocument, aut_nums: &[AutNum]) -> Result<String> {
        match self {
            Emitter::Null => Ok(String::new()),
            Emitter::Text { aut_num } => Ok(emit_text(document, aut_nums, *aut_num)),
            Emitter::Json { pretty } => {
                let output = JsonDocument::new(document, aut_nums);
                let mut text = if *pretty {
                    serde_json::to_string_pretty(&output)?
                } else {
                    serde_json::to_string(&output)?
                };
                text.push('\n');
                Ok(text)
            }
        }
    }
}

/// Local routers declared for `peer`, in declaration order.
fn local_routers(aut_num: &AutNum, peer: &PeerKey) -> Vec<String> {
    let mut routers: Vec<String> = Vec::new();
    for peering in aut_num.peerings().iter().filter(|p| p.peer == *peer) {
        let router = peering.local_router.to_string();
        if !routers.contains(&router) {
            routers.push(router);
        }
    }
    routers
}

fn emit_text(document: &PolicyDocument, aut_nums: &[AutNum], only: Option<AsNumber>) -> String {
    let mut out = String::new();

    for aut_num in aut_nums
        .iter()
        .filter(|a| only.map_or(true, |asn| a.as_number() == asn))
    {
        let _ = writeln!(out, "aut-num {}", aut_num);
        for peer in aut_num.peer_routes().keys() {
            let table = aut_num.table_for_peer(peer.asn, peer.address);
            let _ = writeln!(
                out,
                "  peer {} at {}",
                peer,
                local_routers(aut_num, peer).join(", ")
            );
            for route in table.iter() {
                let _ = writeln!(out, "    {}", route);
            }
        }
        for diagnostic in aut_num.diagnostics() {
            let _ = writeln!(out, "  warning: {}", diagnostic);
        }
        out.push('\n');
    }

    if only.is_none() {
        for set in document.route_sets() {
            let _ = writeln!(out, "{} {}", set.kind(), set.name());
            for route in set.resolve(document) {
                let _ = writeln!(out, "  {}", route);
            }
            out.push('\n');
        }
    }

    out
}

#[derive(Serialize)]
struct JsonDocument<'a> {
    aut_nums: Vec<JsonAutNum<'a>>,
    route_sets: Vec<JsonRouteSet<'a>>,
}

#[derive(Serialize)]
struct JsonAutNum<'a> {
    as_number: AsNumber,
    name: &'a str,
    peers: Vec<JsonPeer<'a>>,
    diagnostics: Vec<String>,
}

#[derive(Serialize)]
struct JsonPeer<'a> {
    #[serde(flatten)]
    peer: &'a PeerKey,
    local_routers: Vec<String>,
    routes: &'a BTreeSet<RouteEntity>,
}

#[derive(Serialize)]
struct JsonRouteSet<'a> {
    name: &'a str,
    routes: BTreeSet<RouteEntity>,
}

impl<'a> JsonDocument<'a> {
    fn new(document: &'a PolicyDocument, aut_nums: &'a [AutNum]) -> Self {
        let aut_nums = aut_nums
            .iter()
            .map(|aut_num| JsonAutNum {
                as_number: aut_num.as_number(),
                name: aut_num.name(),
                peers: aut_num
                    .peer_routes()
                    .iter()
                    .map(|(peer, routes)| JsonPeer {
                        peer,
                        local_routers: local_routers(aut_num, peer),
                        routes,
                    })
                    .collect(),
                diagnostics: aut_num.diagnostics().iter().map(|d| d.to_string()).collect(),
            })
            .collect();

        let route_sets = document
            .route_sets()
            .into_iter()
            .map(|set| JsonRouteSet {
                name: set.name().as_str(),
                routes: set.resolve(document),
            })
            .collect();

        Self {
            aut_nums,
            route_sets,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rpsl_object::read_objects;

    const OBJECTS: &str = "\
route: 1.1.1.0/24
origin: AS1
mnt-by: MNTR-ONE

route-set: rs-out
members: 10.0.0.0/8, AS1

aut-num: AS1
as-name: ONE-NET
export: to AS2 1.1.1.1 at 3.3.3.3 announce rs-out
export: to AS4 at 3.3.3.3

aut-num: AS2
as-name: TWO-NET
export: to AS1 at 4.4.4.4 announce { 2.2.0.0/16 }
";

    fn resolved() -> (PolicyDocument, Vec<AutNum>) {
        let document = PolicyDocument::from_objects(read_objects(OBJECTS).map(|r| r.unwrap()));
        let aut_nums = document.aut_nums();
        (document, aut_nums)
    }

    fn args(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_from_name() {
        assert_eq!(EmitterKind::from_name("JSON").unwrap(), EmitterKind::Json);
        assert!(matches!(
            EmitterKind::from_name("bird"),
            Err(ResolveError::UnknownEmitter(_))
        ));
    }

    #[test]
    fn test_unknown_argument_rejected() {
        for kind in EmitterKind::ALL {
            let err = Emitter::configure(kind, &args(&[("colour", "red")])).unwrap_err();
            assert!(
                matches!(err, ResolveError::InvalidEmitterArgument { ref argument, .. } if argument == "colour"),
                "{:?}",
                kind
            );
        }
    }

    #[test]
    fn test_bad_argument_values() {
        assert!(Emitter::configure(EmitterKind::Json, &args(&[("pretty", "maybe")])).is_err());
        assert!(Emitter::configure(EmitterKind::Text, &args(&[("aut-num", "ONE")])).is_err());
    }

    #[test]
    fn test_configure() {
        assert_eq!(
            Emitter::configure(EmitterKind::Text, &args(&[("aut-num", "AS2")])).unwrap(),
            Emitter::Text {
                aut_num: Some(AsNumber::new(2))
            }
        );
        assert_eq!(
            Emitter::configure(EmitterKind::Json, &args(&[])).unwrap(),
            Emitter::Json { pretty: true }
        );
    }

    #[test]
    fn test_null_emits_nothing() {
        let (document, aut_nums) = resolved();
        assert_eq!(Emitter::Null.emit(&document, &aut_nums).unwrap(), "");
    }

    #[test]
    fn test_text_output() {
        let (document, aut_nums) = resolved();
        let text = Emitter::Text { aut_num: None }
            .emit(&document, &aut_nums)
            .unwrap();
        let expected = "\
aut-num ONE-NET (AS1)
  peer AS2 1.1.1.1 at 3.3.3.3
    1.1.1.0/24 via MNTR-ONE
    10.0.0.0/8 via null
  peer AS4 any at 3.3.3.3
  warning: missing announce filter in 'to AS4 at 3.3.3.3'

aut-num TWO-NET (AS2)
  peer AS1 any at 4.4.4.4
    2.2.0.0/16 via null

route-set rs-out
  1.1.1.0/24 via MNTR-ONE
  10.0.0.0/8 via null

";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_text_single_aut_num() {
        let (document, aut_nums) = resolved();
        let text = Emitter::Text {
            aut_num: Some(AsNumber::new(2)),
        }
        .emit(&document, &aut_nums)
        .unwrap();
        assert_eq!(
            text,
            "aut-num TWO-NET (AS2)\n  peer AS1 any at 4.4.4.4\n    2.2.0.0/16 via null\n\n"
        );
    }

    #[test]
    fn test_json_output() {
        let (document, aut_nums) = resolved();
        let text = Emitter::Json { pretty: false }
            .emit(&document, &aut_nums)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        let one = &value["aut_nums"][0];
        assert_eq!(one["as_number"], 1);
        assert_eq!(one["name"], "ONE-NET");
        assert_eq!(one["peers"][0]["asn"], 2);
        assert_eq!(one["peers"][0]["address"], "1.1.1.1");
        assert_eq!(one["peers"][0]["local_routers"][0], "3.3.3.3");
        assert_eq!(
            one["peers"][0]["routes"][0],
            serde_json::json!({ "prefix": "1.1.1.0/24", "maintainer": "MNTR-ONE" })
        );
        assert_eq!(one["peers"][1]["address"], "any");
        assert_eq!(one["peers"][1]["routes"], serde_json::json!([]));
        assert_eq!(one["diagnostics"].as_array().unwrap().len(), 1);

        assert_eq!(value["route_sets"][0]["name"], "rs-out");
        assert_eq!(
            value["route_sets"][0]["routes"][1],
            serde_json::json!({ "prefix": "10.0.0.0/8", "maintainer": null })
        );
    }

    #[test]
    fn test_list_mentions_every_emitter() {
        let listing = list();
        for kind in EmitterKind::ALL {
            assert!(listing.contains(kind.name()));
        }
        assert!(listing.contains("pretty=<value>"));
    }
}
