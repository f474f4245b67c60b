//! Error and diagnostic types for policy resolution.
//!
//! [`PolicyError`] is fatal for the construction of ONE object. Problems met
//! while interpreting policy expressions are [`Diagnostic`]s: they are
//! recorded and logged, and interpretation carries on.

use rpsl_object::{AttributeType, ObjectType};
use rpsl_types::ParseError;
use std::fmt;
use thiserror::Error;

/// Result type alias for policy object construction.
pub type PolicyResult<T> = Result<T, PolicyError>;

/// Errors that prevent a policy object from being built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    /// The object is of the wrong class.
    #[error("expected {expected} object, got {found}")]
    WrongObjectType {
        /// The class the constructor accepts.
        expected: ObjectType,
        /// The class of the object supplied.
        found: ObjectType,
    },

    /// A mandatory attribute is absent.
    #[error("{object} is missing mandatory attribute {attribute}")]
    MissingAttribute {
        /// Key of the object.
        object: String,
        /// The missing attribute.
        attribute: AttributeType,
    },

    /// An attribute value failed to parse.
    #[error("invalid {attribute} in {object}: {source}")]
    InvalidAttribute {
        /// Key of the object.
        object: String,
        /// The attribute holding the bad value.
        attribute: AttributeType,
        /// The parse failure.
        #[source]
        source: ParseError,
    },
}

impl PolicyError {
    /// Creates a wrong object type error.
    pub fn wrong_type(expected: ObjectType, found: ObjectType) -> Self {
        Self::WrongObjectType { expected, found }
    }

    /// Creates a missing attribute error.
    pub fn missing(object: impl Into<String>, attribute: AttributeType) -> Self {
        Self::MissingAttribute {
            object: object.into(),
            attribute,
        }
    }

    /// Creates an invalid attribute error.
    pub fn invalid(object: impl Into<String>, attribute: AttributeType, source: ParseError) -> Self {
        Self::InvalidAttribute {
            object: object.into(),
            attribute,
            source,
        }
    }
}

/// What went wrong in one export clause.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiagnosticKind {
    /// `to` not followed by `at` with exactly one address.
    #[error("malformed peering specification")]
    MalformedPeering,

    /// `to` with no peer AS.
    #[error("missing peer AS in peering specification")]
    MissingPeerAs,

    /// The peer AS token is not an AS number.
    #[error("invalid peer AS '{0}'")]
    InvalidPeerAs(String),

    /// A peer address is not an IP address.
    #[error("invalid peer address '{0}'")]
    InvalidPeerAddress(String),

    /// The `at` address is not an IP address.
    #[error("invalid local router address '{0}'")]
    InvalidRouterAddress(String),

    /// No `announce` follows the peering.
    #[error("missing announce filter")]
    MissingFilter,

    /// The filter uses an operator the interpreter does not evaluate.
    #[error("unsupported filter operator '{0}'")]
    UnsupportedFilter(String),
}

/// A non-fatal problem found while interpreting an export attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Clean value of the attribute concerned.
    pub attribute: String,
    /// The problem.
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn new(attribute: impl Into<String>, kind: DiagnosticKind) -> Self {
        Self {
            attribute: attribute.into(),
            kind,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in '{}'", self.kind, self.attribute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrong_type_display() {
        let err = PolicyError::wrong_type(ObjectType::AutNum, ObjectType::Route);
        assert_eq!(err.to_string(), "expected aut-num object, got route");
    }

    #[test]
    fn test_missing_attribute_display() {
        let err = PolicyError::missing("AS1", AttributeType::AsName);
        assert_eq!(err.to_string(), "AS1 is missing mandatory attribute as-name");
    }

    #[test]
    fn test_invalid_attribute_source() {
        use std::error::Error;

        let err = PolicyError::invalid(
            "route",
            AttributeType::Origin,
            ParseError::InvalidAsNumber("ASX".to_string()),
        );
        assert!(err.to_string().contains("invalid origin in route"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::new("to AS2 announce AS1", DiagnosticKind::MalformedPeering);
        assert_eq!(
            diag.to_string(),
            "malformed peering specification in 'to AS2 announce AS1'"
        );
    }
}
