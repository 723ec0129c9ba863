//! Parser for the textual shape-spec syntax.
//!
//! A shape-spec string names tensors and their per-profile extents:
//! `input_id:32x1,attention_mask:32x1,input_id:32x41,attention_mask:32x41`
//! parses to `{"input_id": [[32, 1], [32, 41]], "attention_mask": [[32, 1],
//! [32, 41]]}` — repeating a tensor name contributes an additional profile.

use kiln_common::ProfileShapes;

use crate::error::ConfigError;

/// Parses one `name:d0xd1x...` entry into a (name, extents) pair.
fn parse_name_shape_pair(entry: &str) -> Result<(String, Vec<i64>), ConfigError> {
    let malformed = |reason: &str| ConfigError::MalformedShapeSpec {
        spec: entry.to_string(),
        reason: reason.to_string(),
    };

    let (name, shape) = entry.split_once(':').ok_or_else(|| malformed("missing ':'"))?;
    if name.is_empty() {
        return Err(malformed("empty tensor name"));
    }
    if shape.is_empty() {
        return Err(malformed("empty shape"));
    }

    let extents = shape
        .split('x')
        .map(|value| {
            value
                .parse::<i64>()
                .map_err(|_| malformed(&format!("invalid extent '{value}'")))
        })
        .collect::<Result<Vec<i64>, ConfigError>>()?;

    Ok((name.to_string(), extents))
}

/// Parses a full shape-spec string into per-tensor profile shapes.
///
/// An empty input string yields an empty map. Any malformed entry (empty
/// name, empty shape, unparseable extent) fails the whole parse with no
/// partial result.
pub fn parse_profile_shapes(spec: &str) -> Result<ProfileShapes, ConfigError> {
    let mut shapes = ProfileShapes::new();
    if spec.is_empty() {
        return Ok(shapes);
    }

    for entry in spec.split(',') {
        let (name, extents) = parse_name_shape_pair(entry)?;
        tracing::debug!(tensor = %name, extents = ?extents, "parsed profile shape entry");
        shapes.entry(name).or_default().push(extents);
    }

    Ok(shapes)
}
