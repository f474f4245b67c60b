//! Generic RPSL objects.

use crate::attribute::{AttributeType, RpslAttribute};
use crate::error::{ObjectError, ObjectResult};
use std::fmt;

/// Object class, taken from the first attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Route,
    Route6,
    RouteSet,
    AsSet,
    AutNum,
    Other(String),
}

impl ObjectType {
    fn from_attribute(attr_type: &AttributeType) -> Self {
        match attr_type {
            AttributeType::Route => ObjectType::Route,
            AttributeType::Route6 => ObjectType::Route6,
            AttributeType::RouteSet => ObjectType::RouteSet,
            AttributeType::AsSet => ObjectType::AsSet,
            AttributeType::AutNum => ObjectType::AutNum,
            other => ObjectType::Other(other.as_str().to_string()),
        }
    }

    /// The attribute type that names objects of this class.
    pub fn type_attribute(&self) -> AttributeType {
        match self {
            ObjectType::Route => AttributeType::Route,
            ObjectType::Route6 => AttributeType::Route6,
            ObjectType::RouteSet => AttributeType::RouteSet,
            ObjectType::AsSet => AttributeType::AsSet,
            ObjectType::AutNum => AttributeType::AutNum,
            ObjectType::Other(name) => AttributeType::Unknown(name.clone()),
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectType::Other(name) => f.write_str(name),
            known => f.write_str(known.type_attribute().as_str()),
        }
    }
}

/// An ordered list of attributes; the first one names the object.
///
/// Objects are immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpslObject {
    attributes: Vec<RpslAttribute>,
}

impl RpslObject {
    /// Builds an object from attributes.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectError::Empty`] if `attributes` is empty.
    pub fn new(attributes: Vec<RpslAttribute>) -> ObjectResult<Self> {
        if attributes.is_empty() {
            return Err(ObjectError::Empty);
        }
        Ok(Self { attributes })
    }

    /// Parses one object from its text form.
    ///
    /// Lines starting with `%` or `#` are skipped. Lines starting with a
    /// space, tab or `+` continue the previous attribute.
    pub fn parse(text: &str) -> ObjectResult<Self> {
        let mut attributes: Vec<RpslAttribute> = Vec::new();

        for (idx, line) in text.lines().enumerate() {
            if line.trim().is_empty() || line.starts_with('%') || line.starts_with('#') {
                continue;
            }

            if let Some(rest) = continuation(line) {
                let last = attributes
                    .pop()
                    .ok_or_else(|| ObjectError::orphan_continuation(line))?;
                let value = format!("{}\n{}", last.value(), rest.trim());
                attributes.push(RpslAttribute::new(last.attr_type().clone(), value));
                continue;
            }

            let (name, value) = line
                .split_once(':')
                .filter(|(name, _)| !name.is_empty() && !name.contains(char::is_whitespace))
                .ok_or_else(|| ObjectError::missing_separator(idx + 1, line))?;

            let attr_type = name.parse().unwrap_or_else(|never| match never {});
            attributes.push(RpslAttribute::new(attr_type, value.trim()));
        }

        Self::new(attributes)
    }

    pub fn attributes(&self) -> &[RpslAttribute] {
        &self.attributes
    }

    /// The attribute that names this object (always the first).
    pub fn type_attribute(&self) -> &RpslAttribute {
        &self.attributes[0]
    }

    pub fn object_type(&self) -> ObjectType {
        ObjectType::from_attribute(self.type_attribute().attr_type())
    }

    /// The object's primary key: the clean value of its type attribute.
    pub fn key(&self) -> String {
        self.type_attribute().clean_value()
    }

    /// First attribute of the given type.
    pub fn find_attribute(&self, attr_type: &AttributeType) -> Option<&RpslAttribute> {
        self.attributes.iter().find(|a| a.attr_type() == attr_type)
    }

    /// All attributes of the given type, in order.
    pub fn find_attributes<'a>(
        &'a self,
        attr_type: &'a AttributeType,
    ) -> impl Iterator<Item = &'a RpslAttribute> + 'a {
        self.attributes
            .iter()
            .filter(move |a| a.attr_type() == attr_type)
    }

    pub fn contains_attribute(&self, attr_type: &AttributeType) -> bool {
        self.find_attribute(attr_type).is_some()
    }

    /// Clean value of the first attribute of the given type.
    pub fn value_for(&self, attr_type: &AttributeType) -> Option<String> {
        self.find_attribute(attr_type).map(RpslAttribute::clean_value)
    }

    /// List values across every attribute of the given type.
    pub fn values_for(&self, attr_type: &AttributeType) -> Vec<String> {
        self.find_attributes(attr_type)
            .flat_map(RpslAttribute::values)
            .collect()
    }
}

impl fmt::Display for RpslObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for attr in &self.attributes {
            writeln!(f, "{}", attr)?;
        }
        Ok(())
    }
}

fn continuation(line: &str) -> Option<&str> {
    match line.chars().next() {
        Some(' ') | Some('\t') => Some(line),
        Some('+') => Some(&line[1..]),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_route() {
        let obj = RpslObject::parse(
            "route: 1.1.1.0/24\norigin: AS1\nmnt-by: MNTR-ONE\nmember-of: rs-set\n",
        )
        .unwrap();
        assert_eq!(obj.object_type(), ObjectType::Route);
        assert_eq!(obj.key(), "1.1.1.0/24");
        assert_eq!(obj.value_for(&AttributeType::Origin).as_deref(), Some("AS1"));
        assert_eq!(obj.values_for(&AttributeType::MemberOf), vec!["rs-set"]);
        assert!(obj.contains_attribute(&AttributeType::MntBy));
        assert!(!obj.contains_attribute(&AttributeType::MbrsByRef));
    }

    #[test]
    fn test_parse_continuation_lines() {
        let obj = RpslObject::parse(
            "route-set: rs-root\nmembers: 1.1.1.0/24,\n  1.1.2.0/24,\n+ rs-recur\n",
        )
        .unwrap();
        assert_eq!(
            obj.values_for(&AttributeType::Members),
            vec!["1.1.1.0/24", "1.1.2.0/24", "rs-recur"]
        );
    }

    #[test]
    fn test_values_span_repeated_attributes() {
        let obj = RpslObject::parse("route-set: rs-a\nmembers: 1.1.1.0/24\nmembers: rs-b\n").unwrap();
        assert_eq!(obj.find_attributes(&AttributeType::Members).count(), 2);
        assert_eq!(
            obj.values_for(&AttributeType::Members),
            vec!["1.1.1.0/24", "rs-b"]
        );
    }

    #[test]
    fn test_parse_skips_comments_and_remarks() {
        let obj = RpslObject::parse("% remark\n# comment\naut-num: AS1\nas-name: ONE\n").unwrap();
        assert_eq!(obj.object_type(), ObjectType::AutNum);
        assert_eq!(obj.attributes().len(), 2);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(RpslObject::parse(""), Err(ObjectError::Empty));
        assert!(matches!(
            RpslObject::parse("route: 1.1.1.0/24\nnot an attribute\n"),
            Err(ObjectError::MissingSeparator { line: 2, .. })
        ));
        assert!(matches!(
            RpslObject::parse(" dangling\nroute: 1.1.1.0/24"),
            Err(ObjectError::OrphanContinuation { .. })
        ));
    }

    #[test]
    fn test_other_object_type() {
        let obj = RpslObject::parse("mntner: MNTR-ONE\n").unwrap();
        assert_eq!(obj.object_type(), ObjectType::Other("mntner".to_string()));
        assert_eq!(obj.object_type().to_string(), "mntner");
    }
}
