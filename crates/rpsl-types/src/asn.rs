//! Autonomous System numbers.

use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A 32-bit AS number, written `AS<n>` in RPSL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AsNumber(u32);

impl AsNumber {
    pub const fn new(value: u32) -> Self {
        AsNumber(value)
    }

    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for AsNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AS{}", self.0)
    }
}

impl From<u32> for AsNumber {
    fn from(value: u32) -> Self {
        AsNumber(value)
    }
}

impl FromStr for AsNumber {
    type Err = ParseError;

    /// Accepts `AS<n>` and asdot `AS<hi>.<lo>`, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::InvalidAsNumber(s.to_string());

        let digits = match s.get(..2) {
            Some(tag) if tag.eq_ignore_ascii_case("as") => &s[2..],
            _ => return Err(invalid()),
        };
        if digits.is_empty() || digits.starts_with('+') {
            return Err(invalid());
        }

        match digits.split_once('.') {
            Some((hi, lo)) => {
                let hi: u16 = hi.parse().map_err(|_| invalid())?;
                let lo: u16 = lo.parse().map_err(|_| invalid())?;
                Ok(AsNumber((u32::from(hi) << 16) | u32::from(lo)))
            }
            None => digits.parse().map(AsNumber).map_err(|_| invalid()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_asplain() {
        assert_eq!("AS1".parse::<AsNumber>().unwrap(), AsNumber::new(1));
        assert_eq!("as65000".parse::<AsNumber>().unwrap().value(), 65000);
        assert_eq!(
            "AS4294967295".parse::<AsNumber>().unwrap().value(),
            u32::MAX
        );
    }

    #[test]
    fn test_parse_asdot() {
        assert_eq!("AS1.10".parse::<AsNumber>().unwrap().value(), 65546);
    }

    #[test]
    fn test_parse_invalid() {
        for text in ["1", "AS", "AS-FOO", "AS+1", "AS4294967296", "AS1.70000", "rs-set"] {
            assert_eq!(
                text.parse::<AsNumber>(),
                Err(ParseError::InvalidAsNumber(text.to_string())),
                "{}",
                text
            );
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(AsNumber::new(64512).to_string(), "AS64512");
    }
}
