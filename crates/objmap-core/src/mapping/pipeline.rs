//! Pipeline executor: applies compiled rules to a record snapshot
//!
//! The executor threads a working record through an ordered stage sequence:
//! a snapshot stage first, then one application stage per compiled rule.
//! All mutation happens on the snapshot; the caller's record is never
//! touched.
//!
//! Copyright (c) 2025 Objmap Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, MappingMode, Result};
use crate::mapping::compiler::CompiledRule;
use serde_json::Value;

/// One unit of the executor's pipeline
pub(crate) type Stage = Box<dyn Fn(Value) -> Result<Value> + Send + Sync>;

/// Left-to-right composition of pipeline stages
///
/// Each stage receives the previous stage's return value; the first error
/// aborts the remaining stages.
pub(crate) fn pipe(stages: &[Stage], input: Value) -> Result<Value> {
    stages.iter().try_fold(input, |record, stage| stage(record))
}

/// Snapshot stage: deep, fully independent copy of the input record
///
/// `Value::clone` recursively clones nested objects, arrays, and scalars,
/// so the copy shares no mutable structure with the input. The one
/// structural precondition `Value` cannot encode is checked here: the top
/// level must be an object.
pub(crate) fn snapshot(record: &Value) -> Result<Value> {
    if !record.is_object() {
        return Err(Error::InvalidRecord {
            found: value_kind(record).to_string(),
        });
    }
    Ok(record.clone())
}

/// Build the application stage for one compiled rule
///
/// The stage reads and removes every input key (removal happens before any
/// output is written, so an in-place rename is delete-then-reassign), calls
/// the transform with the values in input order, and assigns the produced
/// values to the output keys positionally.
pub(crate) fn rule_stage(index: usize, rule: CompiledRule, mode: MappingMode) -> Stage {
    Box::new(move |mut record: Value| {
        apply_rule(index, &rule, mode, &mut record)?;
        Ok(record)
    })
}

fn apply_rule(
    index: usize,
    rule: &CompiledRule,
    mode: MappingMode,
    record: &mut Value,
) -> Result<()> {
    let object = record.as_object_mut().ok_or_else(|| Error::InvalidRecord {
        found: "non-object working record".to_string(),
    })?;

    // Read-and-remove phase: every input key leaves the record before any
    // output key is written.
    let mut values = Vec::with_capacity(rule.inputs.len());
    for key in &rule.inputs {
        match object.remove(key) {
            Some(value) => values.push(value),
            None => {
                if mode == MappingMode::Strict {
                    return Err(Error::MissingInput {
                        key: key.clone(),
                        rule: index,
                    });
                }
                log::debug!("rule {}: input key '{}' absent, reading null", index, key);
                values.push(Value::Null);
            }
        }
    }

    let produced = coerce_produced(rule.transform.call(values));

    if mode == MappingMode::Strict && produced.len() != rule.outputs.len() {
        return Err(Error::ArityMismatch {
            rule: index,
            expected: rule.outputs.len(),
            produced: produced.len(),
        });
    }
    if produced.len() > rule.outputs.len() {
        log::warn!(
            "rule {}: transform '{}' produced {} value(s) for {} output key(s), discarding extras",
            index,
            rule.transform.name(),
            produced.len(),
            rule.outputs.len()
        );
    }

    // Positional assignment: under-production leaves the remaining output
    // keys absent; over-production discards the extras.
    for (key, value) in rule.outputs.iter().zip(produced) {
        object.insert(key.clone(), value);
    }

    Ok(())
}

/// Coerce a transform's return value to the produced-values sequence
///
/// An array result is spread across the output keys; any other value is a
/// single produced value. To store an array under one output key, wrap it
/// in a single-element array.
fn coerce_produced(value: Value) -> Vec<Value> {
    match value {
        Value::Array(values) => values,
        other => vec![other],
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
