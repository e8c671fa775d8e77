//! # Conversion Context
//!
//! The shared state threaded through every converter application. The core
//! library is pure, so the context carries no mutable state — it exists so
//! that every converter sees one call shape and so that embedders can hang
//! cross-cutting knobs here without touching the combinator signatures.

/// State passed by reference into every [`crate::Convert::apply`] call.
#[derive(Debug, Clone, Default)]
pub struct Context {
    _private: (),
}

impl Context {
    /// The default conversion context.
    pub fn new() -> Self {
        Self::default()
    }
}
