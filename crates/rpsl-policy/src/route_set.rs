//! Route-set and AS-set objects.

use crate::error::{PolicyError, PolicyResult};
use crate::resolver::RouteSetResolver;
use crate::route::{ci_values, RouteEntity};
use crate::PolicyDocument;
use rpsl_object::{AttributeType, ObjectType, RpslObject};
use rpsl_types::{AddressPrefixRange, AsNumber, CiString, IpAddress, IpPrefix};
use std::collections::BTreeSet;
use std::fmt;

/// Keyword granting membership to every referencing route.
pub const MBRS_BY_REF_ANY: &str = "ANY";

/// Which routes may join a set through their own `member-of`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MbrsByRef {
    /// `mbrs-by-ref: ANY`.
    Any,
    /// Only routes maintained by one of these.
    Maintainers(BTreeSet<CiString>),
}

impl MbrsByRef {
    /// Parses the combined `mbrs-by-ref` values. `ANY` anywhere wins; no
    /// values at all means back-references are not accepted.
    fn from_values(values: Vec<CiString>) -> Option<Self> {
        if values.is_empty() {
            None
        } else if values.iter().any(|v| *v == MBRS_BY_REF_ANY) {
            Some(MbrsByRef::Any)
        } else {
            Some(MbrsByRef::Maintainers(values.into_iter().collect()))
        }
    }

    /// Decides admission of a route whose own maintainer (its first
    /// `mnt-by`) is `origin_maintainer`.
    ///
    /// The outer `Option` is admission; the inner one is the maintainer the
    /// resulting entity carries, always the route's own.
    pub fn admit(&self, origin_maintainer: Option<&CiString>) -> Option<Option<CiString>> {
        match self {
            MbrsByRef::Any => Some(origin_maintainer.cloned()),
            MbrsByRef::Maintainers(allowed) => origin_maintainer
                .filter(|m| allowed.contains(*m))
                .map(|m| Some(m.clone())),
        }
    }
}

/// One explicit `members` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Member {
    Prefix(AddressPrefixRange),
    AsNumber(AsNumber),
    Set(CiString),
}

impl Member {
    /// Classifies a member or filter token: prefix range, bare address (a
    /// host prefix), then AS number, else set name.
    ///
    /// A range operator on an AS number or set name is dropped.
    pub fn parse(token: &str) -> Self {
        if let Ok(prefix) = token.parse() {
            return Member::Prefix(prefix);
        }
        if let Ok(address) = token.parse::<IpAddress>() {
            if let Ok(host) = IpPrefix::new(address, address.max_prefix_len()) {
                return Member::Prefix(host.into());
            }
        }
        let name = token.split_once('^').map_or(token, |(name, _)| name);
        match name.parse() {
            Ok(asn) => Member::AsNumber(asn),
            Err(_) => Member::Set(CiString::from(name)),
        }
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Member::Prefix(prefix) => prefix.fmt(f),
            Member::AsNumber(asn) => asn.fmt(f),
            Member::Set(name) => name.fmt(f),
        }
    }
}

/// A parsed `route-set` or `as-set`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSet {
    name: CiString,
    kind: ObjectType,
    members: Vec<Member>,
    mbrs_by_ref: Option<MbrsByRef>,
}

impl RouteSet {
    /// Builds a set from its RPSL object.
    ///
    /// # Errors
    ///
    /// Fails if the object is neither a `route-set` nor an `as-set`.
    pub fn from_object(object: &RpslObject) -> PolicyResult<Self> {
        let kind = object.object_type();
        if !matches!(kind, ObjectType::RouteSet | ObjectType::AsSet) {
            return Err(PolicyError::wrong_type(ObjectType::RouteSet, kind));
        }

        let members = [AttributeType::Members, AttributeType::MpMembers]
            .iter()
            .flat_map(|attr| object.values_for(attr))
            .map(|token| Member::parse(&token))
            .collect();

        Ok(Self {
            name: CiString::from(object.key()),
            kind,
            members,
            mbrs_by_ref: MbrsByRef::from_values(ci_values(object, &AttributeType::MbrsByRef)),
        })
    }

    pub fn name(&self) -> &CiString {
        &self.name
    }

    /// `ObjectType::RouteSet` or `ObjectType::AsSet`.
    pub fn kind(&self) -> &ObjectType {
        &self.kind
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn mbrs_by_ref(&self) -> Option<&MbrsByRef> {
        self.mbrs_by_ref.as_ref()
    }

    /// Expands this set against `document`.
    pub fn resolve(&self, document: &PolicyDocument) -> BTreeSet<RouteEntity> {
        RouteSetResolver::new(document).resolve(&self.name)
    }
}
