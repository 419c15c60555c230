//! Ready-made transform constructors for common mapping operations
//!
//! Each function builds a named [`Transform`] suitable for
//! [`MappingRule::with_transform`](crate::MappingRule::with_transform).
//! Transforms here are permissive: non-string inputs are stringified via
//! their JSON rendering rather than rejected.
//!
//! Copyright (c) 2025 Objmap Team
//! Licensed under the Apache-2.0 license

use crate::types::Transform;
use serde_json::Value;

/// The identity transform: values pass through unchanged
pub fn identity() -> Transform {
    Transform::identity()
}

/// Replace the input value(s) with a fixed value
pub fn constant(value: Value) -> Transform {
    Transform::named("constant", move |_| value.clone())
}

/// Merge all input values into one string, separated by `sep`
///
/// String inputs contribute their text; other values contribute their JSON
/// rendering. Always produces a single value, so it pairs with a single
/// output key.
pub fn join(sep: impl Into<String>) -> Transform {
    let sep = sep.into();
    Transform::named("join", move |values: Vec<Value>| {
        let parts: Vec<String> = values.iter().map(value_text).collect();
        Value::String(parts.join(&sep))
    })
}

/// Stringify each element, producing one string per element
///
/// A single array input is unpacked first, so a list-valued field splits
/// into one string per list element; the resulting array spreads across the
/// rule's output keys.
pub fn stringify() -> Transform {
    Transform::named("stringify", |values: Vec<Value>| {
        let mut out = Vec::new();
        for value in values {
            match value {
                Value::Array(items) => {
                    out.extend(items.iter().map(|v| Value::String(value_text(v))));
                }
                other => out.push(Value::String(value_text(&other))),
            }
        }
        Value::Array(out)
    })
}

/// Lowercase string input(s); non-strings pass through unchanged
pub fn lowercase() -> Transform {
    Transform::named("lowercase", |values| map_strings(values, str::to_lowercase))
}

/// Uppercase string input(s); non-strings pass through unchanged
pub fn uppercase() -> Transform {
    Transform::named("uppercase", |values| map_strings(values, str::to_uppercase))
}

fn map_strings(values: Vec<Value>, f: fn(&str) -> String) -> Value {
    let mut mapped: Vec<Value> = values
        .into_iter()
        .map(|value| match value {
            Value::String(s) => Value::String(f(&s)),
            other => other,
        })
        .collect();
    if mapped.len() == 1 {
        mapped.pop().unwrap_or(Value::Null)
    } else {
        Value::Array(mapped)
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
