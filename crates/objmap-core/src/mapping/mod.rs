//! Mapping engine: rule compilation and pipeline execution
//!
//! This module composes the two halves of the engine. The compiler
//! normalizes user-facing rules into execution-ready form; the pipeline
//! applies them in order to an independent snapshot of the input record.
//!
//! Copyright (c) 2025 Objmap Team
//! Licensed under the Apache-2.0 license

pub mod compiler;
pub mod transforms;

mod pipeline;

use crate::error::{MappingMode, Result};
use crate::types::MappingSpec;
use pipeline::Stage;
use serde_json::Value;

pub use compiler::CompiledRule;

/// A reusable, compiled record mapper
///
/// Built once from a mapping spec; each [`apply`](Mapper::apply) call runs
/// the full pipeline against one record and returns a new record, leaving
/// the input untouched. A `Mapper` holds no per-call state and is safe to
/// share and invoke concurrently across threads.
pub struct Mapper {
    stages: Vec<Stage>,
    mode: MappingMode,
}

impl Mapper {
    /// Compile a mapping spec into a permissive-mode mapper
    ///
    /// Accepts a single [`MappingRule`](crate::MappingRule) or an ordered
    /// sequence of rules; both forms behave identically. Permissive
    /// compilation never fails.
    pub fn new(mapping: impl Into<MappingSpec>) -> Self {
        let rules = compiler::compile(mapping.into());
        let mode = MappingMode::Permissive;
        Self {
            stages: build_stages(rules, mode),
            mode,
        }
    }

    /// Compile a mapping spec under an explicit strictness mode
    ///
    /// In [`MappingMode::Strict`], rules with empty key lists are rejected
    /// here, and [`apply`](Mapper::apply) later fails fast on missing input
    /// keys and transform arity mismatches.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`](crate::Error::Configuration) when
    /// strict-mode validation rejects a rule.
    pub fn with_mode(mapping: impl Into<MappingSpec>, mode: MappingMode) -> Result<Self> {
        let rules = compiler::compile(mapping.into());
        if mode == MappingMode::Strict {
            compiler::validate(&rules)?;
        }
        Ok(Self {
            stages: build_stages(rules, mode),
            mode,
        })
    }

    /// Run the pipeline against one record, producing a new record
    ///
    /// The input must be a JSON object at the top level. The returned
    /// record is built on a deep copy of the input; the caller's record is
    /// never modified.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRecord`](crate::Error::InvalidRecord) when
    /// the input is not an object, plus the strict-mode errors documented
    /// on [`Mapper::with_mode`].
    pub fn apply(&self, record: &Value) -> Result<Value> {
        let working = pipeline::snapshot(record)?;
        pipeline::pipe(&self.stages, working)
    }

    /// Number of compiled rules in this mapper
    pub fn rule_count(&self) -> usize {
        self.stages.len()
    }

    /// Strictness mode this mapper was compiled with
    pub fn mode(&self) -> MappingMode {
        self.mode
    }
}

impl std::fmt::Debug for Mapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mapper")
            .field("rules", &self.stages.len())
            .field("mode", &self.mode)
            .finish()
    }
}

fn build_stages(rules: Vec<CompiledRule>, mode: MappingMode) -> Vec<Stage> {
    rules
        .into_iter()
        .enumerate()
        .map(|(index, rule)| pipeline::rule_stage(index, rule, mode))
        .collect()
}

/// Build a reusable mapper from a mapping spec
///
/// The primary factory of the engine: takes a single rule or an ordered
/// sequence of rules and returns a [`Mapper`] whose
/// [`apply`](Mapper::apply) runs the full pipeline on one record per call.
///
/// # Example
///
/// ```
/// use objmap_core::{create_mapper, MappingRule};
/// use serde_json::json;
///
/// let mapper = create_mapper(MappingRule::new("name").keyout("nombre"));
/// let record = json!({"name": "Juan", "age": 30});
/// let mapped = mapper.apply(&record).unwrap();
///
/// assert_eq!(mapped, json!({"nombre": "Juan", "age": 30}));
/// assert_eq!(record["name"], json!("Juan"));
/// ```
pub fn create_mapper(mapping: impl Into<MappingSpec>) -> Mapper {
    Mapper::new(mapping)
}
