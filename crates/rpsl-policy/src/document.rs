//! The policy document index.
//!
//! A [`PolicyDocument`] is built once from a parsed batch of objects and is
//! read-only afterwards. Resolution only ever borrows it, so independent
//! resolutions may share one document across threads.

use crate::aut_num::AutNum;
use crate::error::{PolicyError, PolicyResult};
use crate::resolver::RouteSetResolver;
use crate::route::{RouteEntity, RouteObject};
use crate::route_set::RouteSet;
use rpsl_object::{AttributeType, ObjectType, RpslObject};
use rpsl_types::{AsNumber, CiString, IpPrefix};
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, info, warn};

/// Lookup tables over one batch of policy objects.
#[derive(Debug, Clone, Default)]
pub struct PolicyDocument {
    route_sets: HashMap<CiString, RouteSet>,
    routes: Vec<RouteObject>,
    routes_by_prefix: HashMap<IpPrefix, Vec<usize>>,
    routes_by_set: HashMap<CiString, Vec<usize>>,
    routes_by_origin: HashMap<AsNumber, Vec<usize>>,
    aut_nums: Vec<(AsNumber, RpslObject)>,
    aut_num_index: HashMap<AsNumber, usize>,
}

impl PolicyDocument {
    /// Starts an empty document.
    pub fn builder() -> PolicyDocumentBuilder {
        PolicyDocumentBuilder::default()
    }

    /// Indexes every object, skipping (and logging) ones that fail to build.
    pub fn from_objects(objects: impl IntoIterator<Item = RpslObject>) -> Self {
        let mut builder = Self::builder();
        for object in objects {
            if let Err(e) = builder.add_object(object) {
                warn!("Skipping object: {}", e);
            }
        }
        builder.build()
    }

    /// Looks up a `route-set` or `as-set` by name.
    pub fn route_set(&self, name: &CiString) -> Option<&RouteSet> {
        self.route_sets.get(name)
    }

    /// All sets, sorted by name.
    pub fn route_sets(&self) -> Vec<&RouteSet> {
        let mut sets: Vec<&RouteSet> = self.route_sets.values().collect();
        sets.sort_by(|a, b| a.name().cmp(b.name()));
        sets
    }

    /// All route objects, in input order.
    pub fn routes(&self) -> &[RouteObject] {
        &self.routes
    }

    /// Routes declaring `member-of: <set>`.
    pub fn routes_member_of<'a>(
        &'a self,
        set: &CiString,
    ) -> impl Iterator<Item = &'a RouteObject> + 'a {
        self.lookup(self.routes_by_set.get(set))
    }

    /// Routes whose `origin` is `asn`.
    pub fn routes_originated_by(&self, asn: AsNumber) -> impl Iterator<Item = &RouteObject> + '_ {
        self.lookup(self.routes_by_origin.get(&asn))
    }

    /// Route objects registered for exactly `prefix`.
    pub fn routes_for_prefix(&self, prefix: &IpPrefix) -> impl Iterator<Item = &RouteObject> + '_ {
        self.lookup(self.routes_by_prefix.get(prefix))
    }

    fn lookup<'a>(
        &'a self,
        indices: Option<&'a Vec<usize>>,
    ) -> impl Iterator<Item = &'a RouteObject> + 'a {
        indices
            .into_iter()
            .flatten()
            .map(move |&idx| &self.routes[idx])
    }

    /// The raw `aut-num` object for `asn`.
    pub fn aut_num_object(&self, asn: AsNumber) -> Option<&RpslObject> {
        self.aut_num_index
            .get(&asn)
            .map(|&idx| &self.aut_nums[idx].1)
    }

    /// AS numbers of every indexed `aut-num`, in input order.
    pub fn aut_num_numbers(&self) -> impl Iterator<Item = AsNumber> + '_ {
        self.aut_nums.iter().map(|(asn, _)| *asn)
    }

    /// Builds the [`AutNum`] for `asn`, if one is indexed.
    pub fn aut_num(&self, asn: AsNumber) -> Option<PolicyResult<AutNum>> {
        self.aut_num_object(asn)
            .map(|object| AutNum::new(object, self))
    }

    /// Builds every indexed [`AutNum`], skipping (and logging) failures.
    pub fn aut_nums(&self) -> Vec<AutNum> {
        self.aut_nums
            .iter()
            .filter_map(|(asn, object)| match AutNum::new(object, self) {
                Ok(aut_num) => Some(aut_num),
                Err(e) => {
                    warn!("Skipping aut-num {}: {}", asn, e);
                    None
                }
            })
            .collect()
    }

    /// Expands the named set with a fresh traversal.
    ///
    /// Unknown names resolve to the empty set.
    pub fn resolve_set(&self, name: &CiString) -> BTreeSet<RouteEntity> {
        RouteSetResolver::new(self).resolve(name)
    }
}

/// Accumulates objects into a [`PolicyDocument`].
#[derive(Debug, Default)]
pub struct PolicyDocumentBuilder {
    document: PolicyDocument,
}

impl PolicyDocumentBuilder {
    /// Indexes one object.
    ///
    /// Object classes the resolver does not use are ignored.
    ///
    /// # Errors
    ///
    /// Returns the construction error of a malformed route, set or aut-num;
    /// the document is left unchanged.
    pub fn add_object(&mut self, object: RpslObject) -> PolicyResult<()> {
        match object.object_type() {
            ObjectType::Route | ObjectType::Route6 => {
                let route = RouteObject::from_object(&object)?;
                self.add_route(route);
            }
            ObjectType::RouteSet | ObjectType::AsSet => {
                let set = RouteSet::from_object(&object)?;
                if let Some(old) = self.document.route_sets.insert(set.name().clone(), set) {
                    warn!("Duplicate set {}, keeping the later definition", old.name());
                }
            }
            ObjectType::AutNum => {
                let key = object.key();
                let asn: AsNumber = key
                    .parse()
                    .map_err(|e| PolicyError::invalid(&key, AttributeType::AutNum, e))?;
                let doc = &mut self.document;
                match doc.aut_num_index.get(&asn) {
                    Some(&idx) => {
                        warn!("Duplicate aut-num {}, keeping the later definition", asn);
                        doc.aut_nums[idx].1 = object;
                    }
                    None => {
                        doc.aut_num_index.insert(asn, doc.aut_nums.len());
                        doc.aut_nums.push((asn, object));
                    }
                }
            }
            ObjectType::Other(name) => debug!("Ignoring {} object {}", name, object.key()),
        }
        Ok(())
    }

    fn add_route(&mut self, route: RouteObject) {
        let doc = &mut self.document;
        let idx = doc.routes.len();

        doc.routes_by_prefix
            .entry(*route.prefix().prefix())
            .or_default()
            .push(idx);
        for set in route.member_of() {
            doc.routes_by_set.entry(set.clone()).or_default().push(idx);
        }
        if let Some(origin) = route.origin() {
            doc.routes_by_origin.entry(origin).or_default().push(idx);
        }
        doc.routes.push(route);
    }

    /// Finishes the index.
    pub fn build(self) -> PolicyDocument {
        let doc = self.document;
        info!(
            "Indexed {} routes, {} sets, {} aut-nums",
            doc.routes.len(),
            doc.route_sets.len(),
            doc.aut_nums.len()
        );
        doc
    }
}
