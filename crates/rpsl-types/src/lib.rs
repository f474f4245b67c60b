//! Primitive value types for RPSL policy resolution.
//!
//! This crate provides type-safe representations of the values that appear
//! inside routing-policy objects:
//!
//! - [`IpAddress`]: IPv4 and IPv6 addresses
//! - [`IpPrefix`]: IP network prefixes (CIDR notation)
//! - [`AddressPrefixRange`]: prefixes with an optional `^` range operator
//! - [`AsNumber`]: Autonomous System numbers (`AS64512`)
//! - [`CiString`]: case-insensitive names (set names, maintainers)

mod asn;
mod cistring;
mod ip;
mod range;

pub use asn::AsNumber;
pub use cistring::CiString;
pub use ip::{IpAddress, IpPrefix};
pub use range::{AddressPrefixRange, RangeOperator};

/// Common error type for parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid IP address format: {0}")]
    InvalidIpAddress(String),

    #[error("invalid IP prefix format: {0}")]
    InvalidIpPrefix(String),

    #[error("invalid address prefix range: {0}")]
    InvalidPrefixRange(String),

    #[error("invalid AS number: {0}")]
    InvalidAsNumber(String),
}
