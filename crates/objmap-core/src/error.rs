//! Error types for the objmap core library
//!
//! This module defines the error handling surface for the mapping engine,
//! using thiserror for ergonomic error definitions. The engine is permissive
//! by default and only produces errors for structurally invalid input or,
//! in strict mode, for rule contract violations.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Main error type for objmap operations
#[derive(Error, Debug)]
pub enum Error {
    /// The top-level record was not a JSON object
    #[error("Invalid record: expected a JSON object, found {found}")]
    InvalidRecord { found: String },

    /// Rule configuration errors detected at compile time (strict mode only)
    #[error("Configuration error in rule {rule}: {message}")]
    Configuration { rule: usize, message: String },

    /// An input key was absent from the working record (strict mode only)
    #[error("Missing input key '{key}' in rule {rule}")]
    MissingInput { key: String, rule: usize },

    /// The transform produced a different number of values than the rule
    /// declares output keys (strict mode only)
    #[error(
        "Arity mismatch in rule {rule}: {expected} output key(s), transform produced {produced} value(s)"
    )]
    ArityMismatch {
        rule: usize,
        expected: usize,
        produced: usize,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Strictness modes for mapping execution
///
/// `Permissive` reproduces the silent best-effort behavior of the engine's
/// reference semantics: missing input keys read as null, and transform arity
/// mismatches under-assign or discard. `Strict` turns both into hard errors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MappingMode {
    /// Silent best-effort behavior, compatible with the reference semantics
    #[default]
    Permissive,
    /// Fail fast on missing input keys and transform arity mismatches
    Strict,
}

impl fmt::Display for MappingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MappingMode::Permissive => write!(f, "permissive"),
            MappingMode::Strict => write!(f, "strict"),
        }
    }
}
