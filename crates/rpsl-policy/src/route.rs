//! Route entities and route objects.

use crate::error::{PolicyError, PolicyResult};
use rpsl_object::{AttributeType, ObjectType, RpslObject};
use rpsl_types::{AddressPrefixRange, AsNumber, CiString};
use serde::Serialize;
use std::fmt;

/// A prefix together with the maintainer that contributed it.
///
/// Explicitly listed set members carry no maintainer; routes pulled in
/// through `mbrs-by-ref` or an origin AS carry the route's `mnt-by`. An absent
/// maintainer never equals a present one, so the same prefix can appear once
/// per distinct maintainer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RouteEntity {
    prefix: AddressPrefixRange,
    maintainer: Option<CiString>,
}

impl RouteEntity {
    pub fn new(prefix: AddressPrefixRange, maintainer: Option<CiString>) -> Self {
        Self { prefix, maintainer }
    }

    /// A route with no maintainer, as produced by an explicit member.
    pub fn unmaintained(prefix: AddressPrefixRange) -> Self {
        Self::new(prefix, None)
    }

    pub fn prefix(&self) -> &AddressPrefixRange {
        &self.prefix
    }

    pub fn maintainer(&self) -> Option<&CiString> {
        self.maintainer.as_ref()
    }
}

impl fmt::Display for RouteEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.maintainer {
            Some(mnt) => write!(f, "{} via {}", self.prefix, mnt),
            None => write!(f, "{} via null", self.prefix),
        }
    }
}

/// A parsed `route`/`route6` object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteObject {
    prefix: AddressPrefixRange,
    origin: Option<AsNumber>,
    maintainers: Vec<CiString>,
    member_of: Vec<CiString>,
}

impl RouteObject {
    /// Builds a route from its RPSL object.
    ///
    /// # Errors
    ///
    /// Fails if the object is not a route, or its prefix or origin does not
    /// parse.
    pub fn from_object(object: &RpslObject) -> PolicyResult<Self> {
        let object_type = object.object_type();
        let type_attr = match object_type {
            ObjectType::Route => AttributeType::Route,
            ObjectType::Route6 => AttributeType::Route6,
            found => return Err(PolicyError::wrong_type(ObjectType::Route, found)),
        };

        let key = object.key();
        let prefix = key
            .parse()
            .map_err(|e| PolicyError::invalid(&key, type_attr, e))?;
        let origin = object
            .value_for(&AttributeType::Origin)
            .map(|v| v.parse())
            .transpose()
            .map_err(|e| PolicyError::invalid(&key, AttributeType::Origin, e))?;

        Ok(Self {
            prefix,
            origin,
            maintainers: ci_values(object, &AttributeType::MntBy),
            member_of: ci_values(object, &AttributeType::MemberOf),
        })
    }

    pub fn prefix(&self) -> &AddressPrefixRange {
        &self.prefix
    }

    pub fn origin(&self) -> Option<AsNumber> {
        self.origin
    }

    pub fn maintainers(&self) -> &[CiString] {
        &self.maintainers
    }

    /// The route's own maintainer: its first `mnt-by`.
    pub fn origin_maintainer(&self) -> Option<&CiString> {
        self.maintainers.first()
    }

    pub fn member_of(&self) -> &[CiString] {
        &self.member_of
    }

    /// Returns true if the route names `set` in `member-of`.
    pub fn is_member_of(&self, set: &CiString) -> bool {
        self.member_of.contains(set)
    }

    /// This route as a [`RouteEntity`] attributed to its own maintainer.
    pub fn to_entity(&self) -> RouteEntity {
        RouteEntity::new(self.prefix, self.origin_maintainer().cloned())
    }
}

pub(crate) fn ci_values(object: &RpslObject, attr_type: &AttributeType) -> Vec<CiString> {
    object
        .values_for(attr_type)
        .into_iter()
        .map(CiString::from)
        .collect()
}
