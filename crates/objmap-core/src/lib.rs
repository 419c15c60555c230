//! Objmap Core - Declarative record-mapping engine
//!
//! This crate transforms plain JSON-like records according to declarative
//! field-mapping rules: fields can be renamed, merged, split, or
//! value-transformed, always on a deep copy of the input and never by
//! mutating it.
//!
//! # Main Components
//!
//! - **Error Handling**: Error types using `thiserror`, plus the
//!   permissive/strict [`MappingMode`] policy
//! - **Core Types**: [`MappingRule`], [`KeySpec`], [`Transform`], and the
//!   [`MappingSpec`] accepted by the factory
//! - **Rule Compiler**: normalization of rules into execution-ready form
//! - **Pipeline Executor**: ordered stage application over a record snapshot
//!
//! # Example
//!
//! ```
//! use objmap_core::{create_mapper, MappingRule};
//! use serde_json::{json, Value};
//!
//! let mapper = create_mapper(vec![
//!     MappingRule::new(["name", "surname"])
//!         .keyout("fullname")
//!         .transform(|values: Vec<Value>| {
//!             let parts: Vec<&str> = values
//!                 .iter()
//!                 .map(|v| v.as_str().unwrap_or_default())
//!                 .collect();
//!             json!(parts.join(" "))
//!         }),
//! ]);
//!
//! let record = json!({"name": "Juan", "surname": "Munain"});
//! let mapped = mapper.apply(&record).unwrap();
//! assert_eq!(mapped, json!({"fullname": "Juan Munain"}));
//! ```
//!
//! Copyright (c) 2025 Objmap Team
//! Licensed under the Apache-2.0 license

pub mod error;
pub mod mapping;
pub mod types;

// Re-export main types for convenience
pub use error::{Error, MappingMode, Result};
pub use mapping::{create_mapper, CompiledRule, Mapper};
pub use types::{KeySpec, MappingRule, MappingSpec, Transform};
