//! Command line front end for RPSL policy resolution.
//!
//! Reads RPSL objects, resolves every `aut-num` into per-peer export route
//! tables with [`rpsl_policy`], and renders the result with an [`Emitter`].

pub mod config;
pub mod emitter;
pub mod error;
pub mod pipeline;

pub use config::{parse_key_value, LoggingConfig, OutputConfig, ResolveConfig};
pub use emitter::{Emitter, EmitterKind};
pub use error::{ResolveError, Result};
pub use pipeline::{read_input, resolve_text, write_output, Resolution};
