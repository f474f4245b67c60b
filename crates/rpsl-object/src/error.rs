//! Error types for object parsing.

use thiserror::Error;

/// Result type alias for object parsing.
pub type ObjectResult<T> = Result<T, ObjectError>;

/// Errors raised while turning text into an [`RpslObject`](crate::RpslObject).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ObjectError {
    /// The paragraph held no attributes.
    #[error("object contains no attributes")]
    Empty,

    /// A line had no `name:` separator.
    #[error("line {line} has no attribute separator: {excerpt}")]
    MissingSeparator {
        /// 1-based line number within the object.
        line: usize,
        /// The offending line.
        excerpt: String,
    },

    /// A continuation line appeared before any attribute.
    #[error("continuation line before first attribute: {excerpt}")]
    OrphanContinuation {
        /// The offending line.
        excerpt: String,
    },
}

/// A paragraph of input that could not be parsed into an object.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unable to parse object '{excerpt}': {source}")]
pub struct ReadError {
    /// The first lines of the paragraph.
    pub excerpt: String,
    /// Why parsing failed.
    #[source]
    pub source: ObjectError,
}

impl ObjectError {
    pub(crate) fn missing_separator(line: usize, text: &str) -> Self {
        Self::MissingSeparator {
            line,
            excerpt: text.trim_end().to_string(),
        }
    }

    pub(crate) fn orphan_continuation(text: &str) -> Self {
        Self::OrphanContinuation {
            excerpt: text.trim_end().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ObjectError::missing_separator(2, "bogus line  ");
        assert_eq!(
            err.to_string(),
            "line 2 has no attribute separator: bogus line"
        );
        assert_eq!(ObjectError::Empty.to_string(), "object contains no attributes");
    }

    #[test]
    fn test_read_error_display() {
        let err = ReadError {
            excerpt: "route: 1.1.1.0/24".to_string(),
            source: ObjectError::Empty,
        };
        assert_eq!(
            err.to_string(),
            "unable to parse object 'route: 1.1.1.0/24': object contains no attributes"
        );
    }
}
