//! Address prefix ranges (`prefix^op`).

use crate::{IpPrefix, ParseError};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Range operator applied to a prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RangeOperator {
    /// No operator: the prefix itself.
    None,
    /// `^-`: exclusive more-specifics.
    Minus,
    /// `^+`: inclusive more-specifics.
    Plus,
    /// `^n`: more-specifics of exactly length n.
    Exact(u8),
    /// `^n-m`: more-specifics of length n through m.
    Range(u8, u8),
}

impl RangeOperator {
    /// Parses the text after `^`, validating lengths against `prefix`.
    fn parse(op: &str, prefix: &IpPrefix) -> Result<Self, String> {
        let parse_len = |s: &str| -> Result<u8, String> {
            let len: u8 = s.parse().map_err(|_| format!("bad length '{}'", s))?;
            if len < prefix.prefix_len() || len > prefix.max_len() {
                return Err(format!(
                    "length {} outside {}..={}",
                    len,
                    prefix.prefix_len(),
                    prefix.max_len()
                ));
            }
            Ok(len)
        };

        match op {
            "-" => Ok(RangeOperator::Minus),
            "+" => Ok(RangeOperator::Plus),
            _ => match op.split_once('-') {
                Some((n, m)) => {
                    let (n, m) = (parse_len(n)?, parse_len(m)?);
                    if n > m {
                        return Err(format!("range {}-{} is inverted", n, m));
                    }
                    Ok(RangeOperator::Range(n, m))
                }
                None => parse_len(op).map(RangeOperator::Exact),
            },
        }
    }
}

impl fmt::Display for RangeOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeOperator::None => Ok(()),
            RangeOperator::Minus => f.write_str("^-"),
            RangeOperator::Plus => f.write_str("^+"),
            RangeOperator::Exact(n) => write!(f, "^{}", n),
            RangeOperator::Range(n, m) => write!(f, "^{}-{}", n, m),
        }
    }
}

/// A prefix with an optional range operator, e.g. `10.0.0.0/8^16-24`.
///
/// Serializes as its RPSL text form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AddressPrefixRange {
    prefix: IpPrefix,
    operator: RangeOperator,
}

impl AddressPrefixRange {
    /// A range covering exactly `prefix`.
    pub const fn exact(prefix: IpPrefix) -> Self {
        Self {
            prefix,
            operator: RangeOperator::None,
        }
    }

    pub const fn prefix(&self) -> &IpPrefix {
        &self.prefix
    }

    pub const fn operator(&self) -> RangeOperator {
        self.operator
    }

    /// Returns true if a range operator is attached.
    pub fn has_operator(&self) -> bool {
        self.operator != RangeOperator::None
    }
}

impl From<IpPrefix> for AddressPrefixRange {
    fn from(prefix: IpPrefix) -> Self {
        Self::exact(prefix)
    }
}

impl fmt::Display for AddressPrefixRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.prefix, self.operator)
    }
}

impl FromStr for AddressPrefixRange {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix_str, op_str) = match s.split_once('^') {
            Some((prefix, op)) => (prefix, Some(op)),
            None => (s, None),
        };

        let prefix: IpPrefix = prefix_str
            .parse()
            .map_err(|_| ParseError::InvalidPrefixRange(s.to_string()))?;
        let operator = match op_str {
            Some(op) => RangeOperator::parse(op, &prefix)
                .map_err(|e| ParseError::InvalidPrefixRange(format!("{}: {}", s, e)))?,
            None => RangeOperator::None,
        };

        Ok(Self { prefix, operator })
    }
}

impl Serialize for AddressPrefixRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AddressPrefixRange {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
