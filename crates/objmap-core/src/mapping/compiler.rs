//! Rule compiler: normalizes user-facing mapping rules
//!
//! Converts zero or more [`MappingRule`] entries into an ordered sequence of
//! execution-ready [`CompiledRule`] entries. Compilation is pure and
//! order-preserving: the i-th rule in the spec becomes the i-th compiled
//! rule, applied in that order by the pipeline.
//!
//! Copyright (c) 2025 Objmap Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use crate::types::{MappingRule, MappingSpec, Transform};

/// Normalized, execution-ready form of a mapping rule
///
/// Invariants established here:
/// - `inputs` and `outputs` are explicit ordered key sequences
/// - `outputs` equals `inputs` when the rule declared no `keyout`
/// - `transform` is the identity function when the rule declared none
///
/// The arity contract between `outputs.len()` and the number of values the
/// transform produces is a run-time contract checked only in strict mode.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    /// Input keys, read (and removed) from the working record in order
    pub inputs: Vec<String>,
    /// Output keys, assigned from the produced values in order
    pub outputs: Vec<String>,
    /// Transform applied to the values read from `inputs`
    pub transform: Transform,
}

/// Compile a mapping spec into an ordered sequence of compiled rules
///
/// Never fails: malformed rules (e.g. an empty key list) compile to
/// degenerate rules that read and write nothing, matching the reference's
/// no-compile-time-errors behavior. Strict-mode configuration checks live
/// in [`validate`].
pub fn compile(spec: MappingSpec) -> Vec<CompiledRule> {
    spec.into_rules().into_iter().map(compile_rule).collect()
}

fn compile_rule(rule: MappingRule) -> CompiledRule {
    let (key, keyout, transform) = rule.into_parts();
    let inputs = key.into_vec();
    let outputs = match keyout {
        Some(spec) => spec.into_vec(),
        None => inputs.clone(),
    };
    let transform = transform.unwrap_or_else(Transform::identity);
    log::debug!(
        "compiled rule: {:?} -> {:?} via '{}'",
        inputs,
        outputs,
        transform.name()
    );
    CompiledRule {
        inputs,
        outputs,
        transform,
    }
}

/// Strict-mode configuration checks over a compiled rule sequence
///
/// Rejects rules whose input or output key list is empty; permissive mode
/// lets such rules degenerate to no-ops instead.
pub fn validate(rules: &[CompiledRule]) -> Result<()> {
    for (index, rule) in rules.iter().enumerate() {
        if rule.inputs.is_empty() {
            return Err(Error::Configuration {
                rule: index,
                message: "rule has an empty input key list".to_string(),
            });
        }
        if rule.outputs.is_empty() {
            return Err(Error::Configuration {
                rule: index,
                message: "rule has an empty output key list".to_string(),
            });
        }
    }
    Ok(())
}
