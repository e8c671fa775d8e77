//! # Higher-Order Converters
//!
//! Combinators assemble primitive converters into schema trees:
//!
//! - [`pipe`] — sequential composition, short-circuiting on first failure;
//! - [`strukt`] — object validation with per-field converters and a policy
//!   for unlisted fields;
//! - [`uniform_seq`] — one converter applied to every element;
//! - [`tuple_seq`] — fixed-length positional converters;
//! - [`test_conv`] — probe conversion: keeps the error, discards the value;
//! - [`default_to`] — conditional defaulting of absent values.
//!
//! Structural combinators treat an absent input (`Null`) as trivial
//! success: presence is a separate, explicit requirement ([`crate::require`]).

use curator_core::{ErrorTree, NodeBuilder};
use serde_json::{Map, Value};

use crate::context::Context;
use crate::convert::{Convert, Converter};
use crate::outcome::Outcome;

/// Error message for a field or element the schema does not allow.
const UNEXPECTED_ITEM: &str = "Unexpected item";

// ─── Sequential composition ─────────────────────────────────────────

struct Sequential {
    steps: Vec<Converter>,
}

impl Convert for Sequential {
    fn apply(&self, value: Value, ctx: &Context) -> Outcome {
        let mut current = value;
        for step in &self.steps {
            let outcome = step.apply(current, ctx);
            if outcome.error.is_some() {
                // Short-circuit: the remaining steps never see the failing
                // converter's value; the error pairs with the value at the
                // point of failure.
                return outcome;
            }
            current = outcome.value;
        }
        Outcome::ok(current)
    }
}

/// Compose converters left to right. The first failure stops the pipeline.
pub fn pipe(steps: impl IntoIterator<Item = Converter>) -> Converter {
    Converter::new(Sequential {
        steps: steps.into_iter().collect(),
    })
}

// ─── Conditional defaulting ─────────────────────────────────────────

struct DefaultTo {
    fallback: Value,
}

impl Convert for DefaultTo {
    fn apply(&self, value: Value, _ctx: &Context) -> Outcome {
        if value.is_null() {
            Outcome::ok(self.fallback.clone())
        } else {
            Outcome::ok(value)
        }
    }
}

/// Replace an absent value with `fallback`; present values pass unchanged.
pub fn default_to(fallback: Value) -> Converter {
    Converter::new(DefaultTo { fallback })
}

// ─── Object validation ──────────────────────────────────────────────

/// What to do with input fields the schema does not list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnlistedPolicy {
    /// Remove unlisted fields from the output.
    Drop,
    /// Copy unlisted fields into the output unchanged.
    Keep,
    /// Report an `Unexpected item` error for each unlisted field.
    Reject,
}

struct Strukt {
    fields: Vec<(String, Converter)>,
    unlisted: UnlistedPolicy,
}

impl Convert for Strukt {
    fn apply(&self, value: Value, ctx: &Context) -> Outcome {
        let mut input = match value {
            Value::Null => return Outcome::ok(Value::Null),
            Value::Object(map) => map,
            other => return Outcome::fail_with(other, "Value must be a mapping"),
        };

        let mut output = Map::new();
        let mut errors = NodeBuilder::new();
        for (name, converter) in &self.fields {
            let field_value = input.remove(name).unwrap_or(Value::Null);
            let (converted, error) = converter.apply(field_value, ctx).into_parts();
            output.insert(name.clone(), converted);
            errors.insert(name.clone(), error);
        }

        for (name, unlisted_value) in input {
            match self.unlisted {
                UnlistedPolicy::Drop => {}
                UnlistedPolicy::Keep => {
                    output.insert(name, unlisted_value);
                }
                UnlistedPolicy::Reject => {
                    errors.insert(name, Some(ErrorTree::leaf(UNEXPECTED_ITEM)));
                }
            }
        }

        Outcome {
            value: Value::Object(output),
            error: errors.finish(),
        }
    }
}

/// Validate an object node: each listed field's converter runs on the
/// corresponding input field (absent fields are fed the absent-marker);
/// the error mapping contains only fields that failed.
pub fn strukt<K, I>(fields: I, unlisted: UnlistedPolicy) -> Converter
where
    K: Into<String>,
    I: IntoIterator<Item = (K, Converter)>,
{
    Converter::new(Strukt {
        fields: fields
            .into_iter()
            .map(|(name, converter)| (name.into(), converter))
            .collect(),
        unlisted,
    })
}

// ─── Uniform sequences ──────────────────────────────────────────────

struct UniformSequence {
    element: Converter,
}

impl Convert for UniformSequence {
    fn apply(&self, value: Value, ctx: &Context) -> Outcome {
        let items = match value {
            Value::Null => return Outcome::ok(Value::Null),
            Value::Array(items) => items,
            other => return Outcome::fail_with(other, "Value must be a sequence"),
        };

        let mut output = Vec::with_capacity(items.len());
        let mut errors = NodeBuilder::new();
        for (index, item) in items.into_iter().enumerate() {
            let (converted, error) = self.element.apply(item, ctx).into_parts();
            output.push(converted);
            errors.insert_index(index, error);
        }

        Outcome {
            value: Value::Array(output),
            error: errors.finish(),
        }
    }
}

/// Apply one converter to every element; errors are keyed by element index
/// (stringified), containing only indices that failed.
pub fn uniform_seq(element: Converter) -> Converter {
    Converter::new(UniformSequence { element })
}

// ─── Fixed-length tuples ────────────────────────────────────────────

struct TupleSequence {
    positions: Vec<Converter>,
}

impl Convert for TupleSequence {
    fn apply(&self, value: Value, ctx: &Context) -> Outcome {
        let mut items = match value {
            Value::Null => return Outcome::ok(Value::Null),
            Value::Array(items) => items,
            other => return Outcome::fail_with(other, "Value must be a sequence"),
        };

        let surplus = items.len().saturating_sub(self.positions.len());
        let mut output = Vec::with_capacity(self.positions.len());
        let mut errors = NodeBuilder::new();

        // Missing positions are fed the absent-marker.
        while items.len() < self.positions.len() {
            items.push(Value::Null);
        }
        let mut items = items.into_iter();
        for (index, converter) in self.positions.iter().enumerate() {
            let item = items.next().unwrap_or(Value::Null);
            let (converted, error) = converter.apply(item, ctx).into_parts();
            output.push(converted);
            errors.insert_index(index, error);
        }
        for offset in 0..surplus {
            errors.insert_index(
                self.positions.len() + offset,
                Some(ErrorTree::leaf(UNEXPECTED_ITEM)),
            );
        }

        Outcome {
            value: Value::Array(output),
            error: errors.finish(),
        }
    }
}

/// Apply positional converters to a fixed-length sequence. Surplus input
/// elements are rejected; missing ones are fed the absent-marker.
pub fn tuple_seq(positions: impl IntoIterator<Item = Converter>) -> Converter {
    Converter::new(TupleSequence {
        positions: positions.into_iter().collect(),
    })
}

// ─── Probe conversion ───────────────────────────────────────────────

struct TestConv {
    probe: Converter,
}

impl Convert for TestConv {
    fn apply(&self, value: Value, ctx: &Context) -> Outcome {
        let error = self.probe.apply(value.clone(), ctx).error;
        Outcome { value, error }
    }
}

/// Run `probe` for its verdict only: the original value passes through
/// untouched, the probe's error (if any) is kept.
pub fn test_conv(probe: Converter) -> Converter {
    Converter::new(TestConv { probe })
}
