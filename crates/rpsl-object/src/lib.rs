//! RPSL object model.
//!
//! Turns raw routing-policy text into typed, immutable objects:
//!
//! - [`read_objects`]: splits a document into objects, reporting bad ones
//! - [`RpslObject`]: an ordered attribute list with lookup helpers
//! - [`RpslAttribute`]: one attribute, with comment stripping, list splitting
//!   and the `(keyword, values)` tokenizer used for policy expressions
//!
//! # Example
//!
//! ```
//! use rpsl_object::{read_objects, AttributeType, ObjectType};
//!
//! let text = "route: 1.1.1.0/24\norigin: AS1\nmember-of: rs-set\n";
//! let object = read_objects(text).next().unwrap().unwrap();
//!
//! assert_eq!(object.object_type(), ObjectType::Route);
//! assert_eq!(object.values_for(&AttributeType::MemberOf), vec!["rs-set"]);
//! ```

pub mod attribute;
pub mod error;
pub mod object;
pub mod reader;

pub use attribute::{AttributeType, PolicyToken, RpslAttribute, POLICY_KEYWORDS};
pub use error::{ObjectError, ObjectResult, ReadError};
pub use object::{ObjectType, RpslObject};
pub use reader::{read_objects, ObjectReader};
