//! Shape-profile data model for dynamic-shape engine caching.
//!
//! A compiled engine supports one or more *profiles*: alternative
//! (min, max, opt) extent assignments for the dynamic dimensions of its input
//! tensors. The types here describe both the normalized stored form (per
//! tensor, per dimension, an ordered profile sequence) and the requested form
//! (per tensor, per profile, a flattened dimension vector) that callers pass
//! in from configuration.

use std::collections::BTreeMap;

/// One profile's extent range for a single dynamic dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeRange {
    /// Smallest extent the engine must accept.
    pub min: i64,
    /// Largest extent the engine must accept.
    pub max: i64,
    /// Extent the compiler optimizes for.
    pub opt: i64,
}

/// Extent bounds from the legacy profile format, which predates opt values.
///
/// Legacy data carries only (min, max); an opt value must never be fabricated
/// for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeBounds {
    /// Smallest extent the engine must accept.
    pub min: i64,
    /// Largest extent the engine must accept.
    pub max: i64,
}

/// Normalized stored profile set: tensor name to dimension index to the
/// ordered profile sequence for that dimension.
///
/// Well-formed maps have the same sequence length (the profile count) for
/// every dimension of every tensor.
pub type ShapeRangeMap = BTreeMap<String, BTreeMap<usize, Vec<ShapeRange>>>;

/// Legacy stored profile set: tensor name to dimension index to a single
/// (min, max) bound. The legacy format can represent only one profile.
pub type LegacyShapeRangeMap = BTreeMap<String, BTreeMap<usize, ShapeBounds>>;

/// Requested shapes: tensor name to a per-profile sequence of flattened
/// dimension vectors, e.g. `{"input_id": [[32, 1], [32, 41]]}` for two
/// profiles over a rank-2 input.
pub type ProfileShapes = BTreeMap<String, Vec<Vec<i64>>>;

/// A caller's requested profile set: parallel min/max/opt shape maps.
///
/// The three maps must share a key set and, per key, an outer (profile-count)
/// length; `kiln_cache::compat::validate_request` checks this before the
/// request is used for caching decisions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShapeProfileRequest {
    /// Per-tensor minimum shapes, one flattened vector per profile.
    pub min: ProfileShapes,
    /// Per-tensor maximum shapes, one flattened vector per profile.
    pub max: ProfileShapes,
    /// Per-tensor optimization-target shapes, one flattened vector per profile.
    pub opt: ProfileShapes,
}

impl ShapeProfileRequest {
    /// Returns the number of profiles in the request.
    ///
    /// Taken from the first non-empty entry of the min-shapes map; an empty
    /// request has zero profiles.
    pub fn num_profiles(&self) -> usize {
        self.min
            .values()
            .map(|profiles| profiles.len())
            .find(|&n| n > 0)
            .unwrap_or(0)
    }

    /// Returns `true` if all three shape maps are empty.
    pub fn is_empty(&self) -> bool {
        self.min.is_empty() && self.max.is_empty() && self.opt.is_empty()
    }
}
