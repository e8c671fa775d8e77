//! # The Convert Trait and the Converter Handle
//!
//! [`Convert`] is the interface every validation unit implements:
//! `(value, context) -> outcome`. Implementations are small composable
//! types — `Sequential`, `Strukt`, `UniformSequence`, `Test`, and the
//! primitives — rather than an inheritance chain or anything inspected at
//! runtime.
//!
//! [`Converter`] is a cheap-clone `Arc` handle over a `Convert`
//! implementation. Schemas hold `Converter`s, build once at process start,
//! and share them across threads: every implementation is `Send + Sync`,
//! stateless, and re-entrant.

use std::sync::Arc;

use serde_json::Value;

use crate::context::Context;
use crate::outcome::Outcome;

/// A pure validation unit: inspects/transforms a value and reports failure
/// as an error tree, never as a panic or an `Err`.
pub trait Convert: Send + Sync {
    /// Apply this converter to one value.
    fn apply(&self, value: Value, ctx: &Context) -> Outcome;
}

/// Shared handle to a converter. Cloning is an `Arc` bump; the same
/// instance may validate unrelated values concurrently.
#[derive(Clone)]
pub struct Converter(Arc<dyn Convert>);

impl Converter {
    /// Wrap a `Convert` implementation in a shareable handle.
    pub fn new(inner: impl Convert + 'static) -> Self {
        Self(Arc::new(inner))
    }

    /// Apply the underlying converter.
    pub fn apply(&self, value: Value, ctx: &Context) -> Outcome {
        self.0.apply(value, ctx)
    }
}

impl std::fmt::Debug for Converter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Converter(..)")
    }
}

impl Convert for Converter {
    fn apply(&self, value: Value, ctx: &Context) -> Outcome {
        self.0.apply(value, ctx)
    }
}

/// The error-free identity converter. Composing with it is a no-op.
pub fn noop() -> Converter {
    struct Noop;
    impl Convert for Noop {
        fn apply(&self, value: Value, _ctx: &Context) -> Outcome {
            Outcome::ok(value)
        }
    }
    Converter::new(Noop)
}
