//! RPSL policy resolution.
//!
//! Resolves routing-policy objects into concrete BGP export route tables:
//!
//! - [`RouteSetResolver`]: expands `route-set`/`as-set` membership, following
//!   nested sets and `mbrs-by-ref` back-references, with cycle protection
//! - [`PolicyDocument`]: the read-only index built once per input batch
//! - [`AutNum`]: interprets `export` attributes into a [`PeerRouteMap`]
//! - [`RouteTable`]: per-peer and per-AS views of that map
//!
//! # Architecture
//!
//! 1. Parse the input into [`rpsl_object::RpslObject`]s
//! 2. Index them into a [`PolicyDocument`]
//! 3. Build each [`AutNum`]; its export tables are computed against the
//!    document at construction
//! 4. Query tables with [`AutNum::table_for_peer`] / [`AutNum::table_for_as`]
//!
//! # Example
//!
//! ```
//! use rpsl_object::read_objects;
//! use rpsl_policy::PolicyDocument;
//! use rpsl_types::AsNumber;
//!
//! let text = "route-set: rs-out\nmembers: 1.1.1.0/24\n\n\
//!             aut-num: AS1\nas-name: ONE\nexport: to AS2 at 10.0.0.1 announce rs-out\n";
//! let objects = read_objects(text).collect::<Result<Vec<_>, _>>().unwrap();
//! let document = PolicyDocument::from_objects(objects);
//!
//! let aut_num = document.aut_num(AsNumber::new(1)).unwrap().unwrap();
//! let table = aut_num.table_for_as(AsNumber::new(2));
//! assert_eq!(table.len(), 1);
//! ```

pub mod aut_num;
pub mod document;
pub mod error;
pub mod export;
pub mod filter;
pub mod peer_map;
pub mod resolver;
pub mod route;
pub mod route_set;
pub mod table;

pub use aut_num::AutNum;
pub use document::{PolicyDocument, PolicyDocumentBuilder};
pub use error::{Diagnostic, DiagnosticKind, PolicyError, PolicyResult};
pub use export::{ExportClause, ExportInterpreter, ExportTables, PeeringDescriptor};
pub use peer_map::{PeerAddress, PeerKey, PeerRouteMap};
pub use resolver::RouteSetResolver;
pub use route::{RouteEntity, RouteObject};
pub use route_set::{MbrsByRef, Member, RouteSet};
pub use table::RouteTable;
