//! Binary codec for shape-profile cache files.
//!
//! A profile file is a bincode-encoded map from tensor name to a flat vector
//! of integers. The current format stores, per tensor, the 4-tuple
//! `(dim, min, max, opt)` once for every (dimension, profile) combination,
//! with the profiles of one dimension contiguous:
//!
//! ```text
//! tensor_a: [dim_0, min_0, max_0, opt_0, dim_0, min_1, max_1, opt_1]
//!            \------- profile 0 ------/  \------- profile 1 ------/
//! ```
//!
//! The legacy format predates opt values and multiple profiles and stores
//! 3-tuples `(dim, min, max)`. Only the current format is ever written;
//! legacy decoding is kept for reading old cache entries. There is no magic
//! or version byte — the caller chooses the decode path.
//!
//! File I/O is whole-file in both directions. A crash mid-write can corrupt
//! an entry; decoding then fails with [`CacheError::MalformedProfile`], which
//! the compatibility checker resolves as a cache miss, never a crash.

use std::collections::BTreeMap;
use std::path::Path;

use kiln_common::{LegacyShapeRangeMap, ShapeBounds, ShapeRange, ShapeRangeMap};

use crate::error::CacheError;

/// On-disk container: tensor name to flat typed numeric vector.
type FlatProfileMap = BTreeMap<String, Vec<i64>>;

fn malformed(reason: impl Into<String>) -> CacheError {
    CacheError::MalformedProfile {
        reason: reason.into(),
    }
}

/// Encodes a profile set into the current on-disk format.
pub fn encode_shape_ranges(shape_ranges: &ShapeRangeMap) -> Result<Vec<u8>, CacheError> {
    let mut flat = FlatProfileMap::new();
    for (tensor, dims) in shape_ranges {
        tracing::debug!(tensor = %tensor, "serializing profile for input tensor");
        let mut values = Vec::new();
        for (&dim, profiles) in dims {
            for range in profiles {
                values.extend_from_slice(&[dim as i64, range.min, range.max, range.opt]);
            }
        }
        flat.insert(tensor.clone(), values);
    }

    bincode::serde::encode_to_vec(&flat, bincode::config::standard()).map_err(|e| {
        CacheError::Serialization {
            reason: e.to_string(),
        }
    })
}

/// Writes a profile set to `path` in the current format.
///
/// Whole-buffer, single write call; there is no partial-write recovery.
pub fn write_shape_ranges(path: &Path, shape_ranges: &ShapeRangeMap) -> Result<(), CacheError> {
    let bytes = encode_shape_ranges(shape_ranges)?;
    std::fs::write(path, bytes).map_err(|e| CacheError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Decodes the flat on-disk container shared by both format generations.
fn decode_flat(bytes: &[u8]) -> Result<FlatProfileMap, CacheError> {
    let (flat, consumed): (FlatProfileMap, usize) =
        bincode::serde::decode_from_slice(bytes, bincode::config::standard())
            .map_err(|e| malformed(e.to_string()))?;
    if consumed != bytes.len() {
        return Err(malformed(format!(
            "{} trailing bytes after profile map",
            bytes.len() - consumed
        )));
    }
    Ok(flat)
}

fn dimension_index(value: i64) -> Result<usize, CacheError> {
    usize::try_from(value).map_err(|_| malformed(format!("negative dimension index {value}")))
}

/// Decodes a current-format profile buffer.
///
/// Consecutive runs of 4 values regroup into `(min, max, opt)` triples,
/// appended in file order so profile order is preserved.
pub fn decode_shape_ranges(bytes: &[u8]) -> Result<ShapeRangeMap, CacheError> {
    let flat = decode_flat(bytes)?;

    let mut shape_ranges = ShapeRangeMap::new();
    for (tensor, values) in flat {
        if values.len() % 4 != 0 {
            return Err(malformed(format!(
                "tensor '{tensor}' has {} values, not a multiple of 4",
                values.len()
            )));
        }

        let mut dims: BTreeMap<usize, Vec<ShapeRange>> = BTreeMap::new();
        for tuple in values.chunks_exact(4) {
            let dim = dimension_index(tuple[0])?;
            let range = ShapeRange {
                min: tuple[1],
                max: tuple[2],
                opt: tuple[3],
            };
            tracing::debug!(tensor = %tensor, dim, ?range, "deserialized profile entry");
            dims.entry(dim).or_default().push(range);
        }
        shape_ranges.insert(tensor, dims);
    }
    Ok(shape_ranges)
}

/// Reads and decodes a current-format profile file.
///
/// The whole file is read into memory before parsing.
pub fn read_shape_ranges(path: &Path) -> Result<ShapeRangeMap, CacheError> {
    let bytes = std::fs::read(path).map_err(|e| CacheError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    decode_shape_ranges(&bytes)
}

/// Decodes a legacy-format profile buffer.
///
/// Legacy data has 3-tuples `(dim, min, max)`: one profile, no opt value.
/// A duplicated dimension entry overwrites the earlier one.
pub fn decode_legacy_shape_ranges(bytes: &[u8]) -> Result<LegacyShapeRangeMap, CacheError> {
    let flat = decode_flat(bytes)?;

    let mut shape_ranges = LegacyShapeRangeMap::new();
    for (tensor, values) in flat {
        if values.len() % 3 != 0 {
            return Err(malformed(format!(
                "tensor '{tensor}' has {} values, not a multiple of 3",
                values.len()
            )));
        }

        let mut dims: BTreeMap<usize, ShapeBounds> = BTreeMap::new();
        for tuple in values.chunks_exact(3) {
            let dim = dimension_index(tuple[0])?;
            dims.insert(
                dim,
                ShapeBounds {
                    min: tuple[1],
                    max: tuple[2],
                },
            );
        }
        shape_ranges.insert(tensor, dims);
    }
    Ok(shape_ranges)
}

/// Reads and decodes a legacy-format profile file.
pub fn read_legacy_shape_ranges(path: &Path) -> Result<LegacyShapeRangeMap, CacheError> {
    let bytes = std::fs::read(path).map_err(|e| CacheError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    decode_legacy_shape_ranges(&bytes)
}
