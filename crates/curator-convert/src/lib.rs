//! # curator-convert — Converter & Combinator Library
//!
//! The atomic unit of validation is a [`Converter`]: a pure, re-entrant
//! function from `(value, context)` to `(transformed value, error | none)`.
//! Schemas are trees of converters assembled from the combinators in this
//! crate; no converter performs side effects — all I/O lives outside the
//! library.
//!
//! ## Contract
//!
//! - The absent-marker is `Value::Null`. Every converter except
//!   [`require`] treats an absent input as trivial success and passes it
//!   through; mandatory fields opt in to presence with `require`.
//! - Converters compose associatively: `pipe([a, pipe([b, c])])` behaves
//!   exactly like `pipe([pipe([a, b]), c])`, and composing with [`noop`]
//!   is a no-op. Property tests in `tests/combinator_laws.rs` hold the
//!   library to this.
//! - [`pipe`] short-circuits on the first failure: the remaining steps are
//!   fully skipped and the outcome pairs the error with the value at the
//!   point of failure.
//!
//! ## Combinators
//!
//! [`pipe`] (sequential), [`strukt`] (object fields + unlisted-field
//! policy), [`uniform_seq`] (one converter per element), [`tuple_seq`]
//! (fixed-length positional), [`test_conv`] (probe conversion whose output
//! is discarded), [`default_to`] (conditional defaulting).

pub mod combinators;
pub mod context;
pub mod convert;
pub mod outcome;
pub mod primitives;
pub mod temporal;
pub mod web;

pub use combinators::{
    default_to, pipe, strukt, test_conv, tuple_seq, uniform_seq, UnlistedPolicy,
};
pub use context::Context;
pub use convert::{noop, Convert, Converter};
pub use outcome::Outcome;
pub use primitives::{
    cleanup_line, empty_to_absent, expect_absent, greater_or_equal, less_or_equal, map, matches,
    not_one_of, one_of, one_of_with, require, test, test_equals, type_check, ValueKind,
};
pub use temporal::{input_to_iso8601_date, input_to_iso8601_datetime};
pub use web::{input_to_email, input_to_url};
