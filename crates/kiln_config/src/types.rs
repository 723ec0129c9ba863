//! Strongly-typed cache configuration.

use std::path::PathBuf;

use kiln_common::ShapeProfileRequest;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::shapes::parse_profile_shapes;

/// Engine-cache configuration, deserialized from `kiln.toml`.
///
/// The three shape-spec strings use the textual syntax
/// `name1:d0xd1,name2:d0,...`; repeating a tensor name adds another profile.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheConfig {
    /// Root directory for engine, profile, and timing cache files.
    pub cache_dir: PathBuf,

    /// Optional user-supplied prefix for engine cache file names. When unset,
    /// the generated fused-node name is used.
    #[serde(default)]
    pub engine_prefix: Option<String>,

    /// Whether to maintain a per-compute-capability timing cache.
    #[serde(default)]
    pub timing_cache: bool,

    /// Optional path for the plain-text dump of the composed graph.
    #[serde(default)]
    pub graph_dump_path: Option<PathBuf>,

    /// Explicit minimum shapes per optimization profile.
    #[serde(default)]
    pub profile_min_shapes: Option<String>,

    /// Explicit maximum shapes per optimization profile.
    #[serde(default)]
    pub profile_max_shapes: Option<String>,

    /// Explicit optimization-target shapes per optimization profile.
    #[serde(default)]
    pub profile_opt_shapes: Option<String>,
}

impl CacheConfig {
    /// Parses the three shape-spec strings into a [`ShapeProfileRequest`].
    ///
    /// Unset strings parse as empty maps. The result still needs the
    /// cross-map consistency check in the compatibility layer before use.
    pub fn profile_request(&self) -> Result<ShapeProfileRequest, ConfigError> {
        Ok(ShapeProfileRequest {
            min: parse_profile_shapes(self.profile_min_shapes.as_deref().unwrap_or(""))?,
            max: parse_profile_shapes(self.profile_max_shapes.as_deref().unwrap_or(""))?,
            opt: parse_profile_shapes(self.profile_opt_shapes.as_deref().unwrap_or(""))?,
        })
    }
}
