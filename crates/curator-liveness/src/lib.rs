//! # curator-liveness — URL Liveness Sub-Validator
//!
//! The one validator in the system that is not a pure function of its
//! input: [`UrlProbe`] performs a live fetch against a candidate URL and
//! turns the outcome into an alert message (timeout, bad status code,
//! connection error) or success.
//!
//! Verdicts are cached per URL in a shared, thread-safe [`UrlCache`] with
//! a fixed freshness window (5 minutes by default). Within the window,
//! repeated validations of the same URL return the cached verdict without
//! a new network call. Entries are idempotent snapshots, so concurrent
//! refreshes of the same URL are harmless — last writer wins.

pub mod cache;
pub mod probe;
pub mod walker;

pub use cache::UrlCache;
pub use probe::UrlProbe;
pub use walker::check_dataset_urls;
