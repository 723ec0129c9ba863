//! Build-artifact cache for compiled accelerator engines.
//!
//! Compiling an engine from a computation graph is expensive, so this crate
//! decides, without recompiling, whether a previously built engine is still
//! valid for a given graph, hardware target, toolchain version, and
//! input-shape configuration. It provides cache-directory path utilities,
//! deterministic graph fingerprinting for cache keys, a versioned binary
//! codec for shape profiles, and the profile compatibility check that turns
//! a stored profile into a reuse-or-rebuild decision.
//!
//! All reads are fail-safe: a missing, truncated, or otherwise malformed
//! profile file resolves as "must rebuild", never as a hard failure.

#![warn(missing_docs)]

pub mod compat;
pub mod dir;
pub mod error;
pub mod fingerprint;
pub mod profile;
pub mod suffix;

pub use compat::{must_rebuild, validate_request};
pub use error::CacheError;
pub use fingerprint::engine_fingerprint;
pub use suffix::cache_suffix;
