//! Parsing and validation of `kiln.toml` cache configuration files.
//!
//! This crate reads the cache configuration and produces a strongly-typed
//! [`CacheConfig`], including the textual shape-spec syntax
//! (`name:d0xd1,...`) used to request explicit optimization profiles.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod shapes;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str};
pub use shapes::parse_profile_shapes;
pub use types::CacheConfig;
