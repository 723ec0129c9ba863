//! Shared leaf types for the kiln engine cache.
//!
//! This crate defines the chained fingerprint hash state and the shape-profile
//! data model used by the cache codec, the compatibility checker, and the
//! configuration parser.

#![warn(missing_docs)]

pub mod hash;
pub mod shapes;

pub use hash::ChainedHash;
pub use shapes::{
    LegacyShapeRangeMap, ProfileShapes, ShapeBounds, ShapeProfileRequest, ShapeRange,
    ShapeRangeMap,
};
