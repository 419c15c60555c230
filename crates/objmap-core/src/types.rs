//! Core types for the objmap mapping engine
//!
//! This module defines the user-facing rule types consumed by the compiler:
//! field-key specifications, transform functions, mapping rules, and the
//! mapping specification accepted by [`crate::create_mapper`].

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// One field key, or an ordered sequence of field keys
///
/// Rules accept either shape for both `key` and `keyout`; the compiler
/// coerces both to an ordered sequence. The serde representation is
/// untagged, so `"name"` and `["name", "surname"]` both deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeySpec {
    /// A single field key
    One(String),
    /// An ordered sequence of field keys
    Many(Vec<String>),
}

impl KeySpec {
    /// Coerce to an ordered key sequence, preserving order
    ///
    /// This is the single normalization point for "one or many" key shapes;
    /// every place a key spec is consumed goes through here.
    pub fn into_vec(self) -> Vec<String> {
        match self {
            KeySpec::One(key) => vec![key],
            KeySpec::Many(keys) => keys,
        }
    }

    /// Number of keys in this spec
    pub fn len(&self) -> usize {
        match self {
            KeySpec::One(_) => 1,
            KeySpec::Many(keys) => keys.len(),
        }
    }

    /// True when the spec names no keys (only possible for the `Many` form)
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<&str> for KeySpec {
    fn from(key: &str) -> Self {
        KeySpec::One(key.to_string())
    }
}

impl From<String> for KeySpec {
    fn from(key: String) -> Self {
        KeySpec::One(key)
    }
}

impl From<Vec<String>> for KeySpec {
    fn from(keys: Vec<String>) -> Self {
        KeySpec::Many(keys)
    }
}

impl From<Vec<&str>> for KeySpec {
    fn from(keys: Vec<&str>) -> Self {
        KeySpec::Many(keys.into_iter().map(String::from).collect())
    }
}

impl<const N: usize> From<[&str; N]> for KeySpec {
    fn from(keys: [&str; N]) -> Self {
        KeySpec::Many(keys.into_iter().map(String::from).collect())
    }
}

/// Signature of a transform function
///
/// Receives the values read from the rule's input keys, in input-key order,
/// and returns the produced value. A returned `Value::Array` is always
/// treated as multiple produced values and spread across the rule's output
/// keys; any other value is a single produced value.
pub type TransformFn = dyn Fn(Vec<Value>) -> Value + Send + Sync;

/// A shareable, named transform function
///
/// Transforms are reference-counted so a compiled mapper stays cheap to
/// clone and safe to call from multiple threads. The name is carried for
/// diagnostics only; it appears in `Debug` output and log messages.
#[derive(Clone)]
pub struct Transform {
    name: Arc<str>,
    func: Arc<TransformFn>,
}

impl Transform {
    /// Wrap a closure as an anonymous transform
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(Vec<Value>) -> Value + Send + Sync + 'static,
    {
        Self::named("custom", func)
    }

    /// Wrap a closure as a named transform
    pub fn named<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(Vec<Value>) -> Value + Send + Sync + 'static,
    {
        Self {
            name: Arc::from(name.into()),
            func: Arc::new(func),
        }
    }

    /// The identity transform: single input, returned unchanged
    ///
    /// Used by the compiler whenever a rule declares no transform.
    pub fn identity() -> Self {
        Self::named("identity", |mut values: Vec<Value>| {
            if values.len() == 1 {
                values.pop().unwrap_or(Value::Null)
            } else {
                Value::Array(values)
            }
        })
    }

    /// Diagnostic name of this transform
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke the transform with values read in input-key order
    pub fn call(&self, values: Vec<Value>) -> Value {
        (self.func)(values)
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transform")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// A user-facing field-mapping rule
///
/// Describes which field(s) to read, how to transform the values, and
/// which field(s) to write. `keyout` defaults to the input keys (the field
/// is rewritten in place under its original name) and `transform` defaults
/// to the identity function.
///
/// # Example
///
/// ```
/// use objmap_core::MappingRule;
/// use serde_json::{json, Value};
///
/// let rule = MappingRule::new(["name", "surname"])
///     .keyout("fullname")
///     .transform(|values: Vec<Value>| {
///         let parts: Vec<String> = values
///             .iter()
///             .map(|v| v.as_str().unwrap_or_default().to_string())
///             .collect();
///         json!(parts.join(" "))
///     });
/// assert_eq!(rule.inputs().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct MappingRule {
    key: KeySpec,
    keyout: Option<KeySpec>,
    transform: Option<Transform>,
}

impl MappingRule {
    /// Create a rule reading the given input key(s)
    pub fn new(key: impl Into<KeySpec>) -> Self {
        Self {
            key: key.into(),
            keyout: None,
            transform: None,
        }
    }

    /// Set the output key(s); omitted means "write back under the input keys"
    pub fn keyout(mut self, keyout: impl Into<KeySpec>) -> Self {
        self.keyout = Some(keyout.into());
        self
    }

    /// Set the transform closure; omitted means the identity function
    pub fn transform<F>(mut self, func: F) -> Self
    where
        F: Fn(Vec<Value>) -> Value + Send + Sync + 'static,
    {
        self.transform = Some(Transform::new(func));
        self
    }

    /// Set a prebuilt [`Transform`], e.g. from [`crate::mapping::transforms`]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }

    /// Input key spec of this rule
    pub fn inputs(&self) -> &KeySpec {
        &self.key
    }

    /// Output key spec of this rule, when explicitly set
    pub fn outputs(&self) -> Option<&KeySpec> {
        self.keyout.as_ref()
    }

    pub(crate) fn into_parts(self) -> (KeySpec, Option<KeySpec>, Option<Transform>) {
        (self.key, self.keyout, self.transform)
    }
}

/// An ordered set of mapping rules, as accepted by [`crate::create_mapper`]
///
/// Built from a single rule or from a sequence of rules; both forms behave
/// identically, a single rule being a one-element sequence.
#[derive(Debug, Clone, Default)]
pub struct MappingSpec {
    rules: Vec<MappingRule>,
}

impl MappingSpec {
    /// Number of rules in the spec
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when the spec carries no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub(crate) fn into_rules(self) -> Vec<MappingRule> {
        self.rules
    }
}

impl From<MappingRule> for MappingSpec {
    fn from(rule: MappingRule) -> Self {
        Self { rules: vec![rule] }
    }
}

impl From<Vec<MappingRule>> for MappingSpec {
    fn from(rules: Vec<MappingRule>) -> Self {
        Self { rules }
    }
}

impl<const N: usize> From<[MappingRule; N]> for MappingSpec {
    fn from(rules: [MappingRule; N]) -> Self {
        Self {
            rules: rules.into_iter().collect(),
        }
    }
}

impl FromIterator<MappingRule> for MappingSpec {
    fn from_iter<I: IntoIterator<Item = MappingRule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}
