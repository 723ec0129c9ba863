//! Profile compatibility checking: the reuse-or-rebuild decision.
//!
//! A stored profile is compared against the freshly requested one tensor by
//! tensor, dimension by dimension, profile by profile, with exact integer
//! equality. The check is intentionally conservative: any structural mismatch
//! (missing tensor, differing profile count, out-of-range dimension) forces a
//! rebuild rather than attempting partial reuse.

use std::path::Path;

use kiln_common::ShapeProfileRequest;

use crate::error::CacheError;
use crate::profile::read_shape_ranges;

/// Checks a requested profile set for internal consistency.
///
/// A request is well-formed iff all three of min/max/opt are empty together,
/// or all three share the same key set and, per key, the same outer
/// (profile-count) length. Returns `false` otherwise; callers must treat that
/// as a configuration error and not proceed to caching.
pub fn validate_request(request: &ShapeProfileRequest) -> bool {
    if request.is_empty() {
        return true;
    }

    if request.min.len() != request.max.len() || request.min.len() != request.opt.len() {
        return false;
    }

    for (name, min_profiles) in &request.min {
        let (Some(max_profiles), Some(opt_profiles)) =
            (request.max.get(name), request.opt.get(name))
        else {
            return false;
        };
        if max_profiles.len() != min_profiles.len() || opt_profiles.len() != min_profiles.len() {
            return false;
        }
    }

    true
}

/// Decides whether the engine behind `profile_path` must be rebuilt for the
/// requested profile set.
///
/// Returns `true` (rebuild) when the profile file is missing or malformed,
/// when the stored and requested tensor sets differ, when any stored
/// per-dimension profile count differs from the request's, when a stored
/// dimension index is out of range for the requested flattened shape vector,
/// or when any stored min/max/opt value differs from the requested one.
/// Returns `false` only when every stored entry matches exactly.
pub fn must_rebuild(profile_path: &Path, request: &ShapeProfileRequest) -> bool {
    let stored = match read_shape_ranges(profile_path) {
        Ok(stored) => stored,
        Err(CacheError::Io { path, source }) => {
            tracing::debug!(path = %path.display(), error = %source, "profile cache not readable");
            return true;
        }
        Err(e) => {
            tracing::warn!(path = %profile_path.display(), error = %e, "profile cache malformed, rebuilding");
            return true;
        }
    };

    if stored.len() != request.min.len() {
        tracing::debug!(
            stored = stored.len(),
            requested = request.min.len(),
            "numbers of dynamic shape inputs differ"
        );
        return true;
    }

    let num_profiles = request.num_profiles();

    for (tensor, dims) in &stored {
        let Some(requested_min) = request.min.get(tensor) else {
            tracing::debug!(tensor = %tensor, "stored tensor absent from requested min shapes");
            return true;
        };

        for (&dim, profiles) in dims {
            if profiles.len() != num_profiles {
                tracing::debug!(
                    tensor = %tensor,
                    dim,
                    stored = profiles.len(),
                    requested = num_profiles,
                    "numbers of profiles differ"
                );
                return true;
            }

            for (profile_idx, range) in profiles.iter().enumerate() {
                let requested = requested_min.get(profile_idx).and_then(|min_dims| {
                    Some((
                        *min_dims.get(dim)?,
                        *request.max.get(tensor)?.get(profile_idx)?.get(dim)?,
                        *request.opt.get(tensor)?.get(profile_idx)?.get(dim)?,
                    ))
                });
                let Some((min, max, opt)) = requested else {
                    tracing::debug!(
                        tensor = %tensor,
                        dim,
                        profile_idx,
                        "stored dimension exceeds requested shape vector"
                    );
                    return true;
                };

                if min != range.min || max != range.max || opt != range.opt {
                    tracing::debug!(
                        tensor = %tensor,
                        dim,
                        profile_idx,
                        stored = ?range,
                        requested = ?(min, max, opt),
                        "shape values differ"
                    );
                    return true;
                }
            }
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::write_shape_ranges;
    use kiln_common::{ProfileShapes, ShapeRange, ShapeRangeMap};
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    fn shapes(entries: &[(&str, &[&[i64]])]) -> ProfileShapes {
        entries
            .iter()
            .map(|(name, profiles)| {
                (
                    name.to_string(),
                    profiles.iter().map(|dims| dims.to_vec()).collect(),
                )
            })
            .collect()
    }

    fn stored_single_profile() -> ShapeRangeMap {
        // x: dim 0 ranges over [1, 10] with opt 5.
        let mut map = ShapeRangeMap::new();
        let mut dims = BTreeMap::new();
        dims.insert(
            0,
            vec![ShapeRange {
                min: 1,
                max: 10,
                opt: 5,
            }],
        );
        map.insert("x".to_string(), dims);
        map
    }

    fn matching_request() -> ShapeProfileRequest {
        ShapeProfileRequest {
            min: shapes(&[("x", &[&[1]])]),
            max: shapes(&[("x", &[&[10]])]),
            opt: shapes(&[("x", &[&[5]])]),
        }
    }

    fn write_stored(stored: &ShapeRangeMap) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model_1.profile");
        write_shape_ranges(&path, stored).unwrap();
        (dir, path)
    }

    #[test]
    fn validate_empty_request() {
        assert!(validate_request(&ShapeProfileRequest::default()));
    }

    #[test]
    fn validate_matching_request() {
        assert!(validate_request(&matching_request()));
    }

    #[test]
    fn validate_rejects_missing_key_in_max() {
        let request = ShapeProfileRequest {
            min: shapes(&[("x", &[&[1]])]),
            max: ProfileShapes::new(),
            opt: shapes(&[("x", &[&[5]])]),
        };
        assert!(!validate_request(&request));
    }

    #[test]
    fn validate_rejects_different_key_sets_of_equal_size() {
        let request = ShapeProfileRequest {
            min: shapes(&[("x", &[&[1]])]),
            max: shapes(&[("y", &[&[10]])]),
            opt: shapes(&[("x", &[&[5]])]),
        };
        assert!(!validate_request(&request));
    }

    #[test]
    fn validate_rejects_profile_count_mismatch() {
        let request = ShapeProfileRequest {
            min: shapes(&[("x", &[&[1], &[2]])]),
            max: shapes(&[("x", &[&[10]])]),
            opt: shapes(&[("x", &[&[5], &[6]])]),
        };
        assert!(!validate_request(&request));
    }

    #[test]
    fn rebuild_when_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.profile");
        assert!(must_rebuild(&path, &matching_request()));
    }

    #[test]
    fn rebuild_when_file_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corrupt.profile");
        std::fs::write(&path, b"\xff\xff garbage").unwrap();
        assert!(must_rebuild(&path, &matching_request()));
    }

    #[test]
    fn no_rebuild_on_exact_match() {
        let (_dir, path) = write_stored(&stored_single_profile());
        assert!(!must_rebuild(&path, &matching_request()));
    }

    #[test]
    fn rebuild_when_tensor_counts_differ() {
        let (_dir, path) = write_stored(&stored_single_profile());
        let mut request = matching_request();
        request.min.insert("y".to_string(), vec![vec![1]]);
        request.max.insert("y".to_string(), vec![vec![2]]);
        request.opt.insert("y".to_string(), vec![vec![1]]);
        assert!(must_rebuild(&path, &request));
    }

    #[test]
    fn rebuild_when_stored_tensor_missing_from_request() {
        let (_dir, path) = write_stored(&stored_single_profile());
        let request = ShapeProfileRequest {
            min: shapes(&[("z", &[&[1]])]),
            max: shapes(&[("z", &[&[10]])]),
            opt: shapes(&[("z", &[&[5]])]),
        };
        assert!(must_rebuild(&path, &request));
    }

    #[test]
    fn rebuild_when_profile_counts_differ() {
        let (_dir, path) = write_stored(&stored_single_profile());
        let request = ShapeProfileRequest {
            min: shapes(&[("x", &[&[1], &[1]])]),
            max: shapes(&[("x", &[&[10], &[20]])]),
            opt: shapes(&[("x", &[&[5], &[10]])]),
        };
        assert!(must_rebuild(&path, &request));
    }

    #[test]
    fn rebuild_when_dimension_out_of_range() {
        // Stored dimension index 3 cannot index a rank-1 requested shape.
        let mut stored = ShapeRangeMap::new();
        let mut dims = BTreeMap::new();
        dims.insert(
            3,
            vec![ShapeRange {
                min: 1,
                max: 10,
                opt: 5,
            }],
        );
        stored.insert("x".to_string(), dims);
        let (_dir, path) = write_stored(&stored);
        assert!(must_rebuild(&path, &matching_request()));
    }

    #[test]
    fn rebuild_on_min_value_mismatch() {
        let (_dir, path) = write_stored(&stored_single_profile());
        let mut request = matching_request();
        request.min.insert("x".to_string(), vec![vec![2]]);
        assert!(must_rebuild(&path, &request));
    }

    #[test]
    fn rebuild_on_opt_value_mismatch() {
        let (_dir, path) = write_stored(&stored_single_profile());
        let mut request = matching_request();
        request.opt.insert("x".to_string(), vec![vec![6]]);
        assert!(must_rebuild(&path, &request));
    }

    #[test]
    fn no_rebuild_on_multi_profile_exact_match() {
        let mut stored = ShapeRangeMap::new();
        let mut dims = BTreeMap::new();
        dims.insert(
            0,
            vec![
                ShapeRange {
                    min: 1,
                    max: 8,
                    opt: 4,
                },
                ShapeRange {
                    min: 1,
                    max: 64,
                    opt: 32,
                },
            ],
        );
        stored.insert("x".to_string(), dims);
        let (_dir, path) = write_stored(&stored);

        let request = ShapeProfileRequest {
            min: shapes(&[("x", &[&[1], &[1]])]),
            max: shapes(&[("x", &[&[8], &[64]])]),
            opt: shapes(&[("x", &[&[4], &[32]])]),
        };
        assert!(!must_rebuild(&path, &request));
    }

    #[test]
    fn rebuild_when_second_profile_differs() {
        let mut stored = ShapeRangeMap::new();
        let mut dims = BTreeMap::new();
        dims.insert(
            0,
            vec![
                ShapeRange {
                    min: 1,
                    max: 8,
                    opt: 4,
                },
                ShapeRange {
                    min: 1,
                    max: 64,
                    opt: 32,
                },
            ],
        );
        stored.insert("x".to_string(), dims);
        let (_dir, path) = write_stored(&stored);

        let request = ShapeProfileRequest {
            min: shapes(&[("x", &[&[1], &[1]])]),
            max: shapes(&[("x", &[&[8], &[64]])]),
            opt: shapes(&[("x", &[&[4], &[16]])]),
        };
        assert!(must_rebuild(&path, &request));
    }
}
