//! Cache file-name suffix derivation for user-customized prefixes.
//!
//! Generated engine cache names look like
//! `kiln_graph_<model>_<fingerprint>_<partition>_<partition>_<precision>`.
//! When the user customizes the prefix, the fingerprint-and-precision suffix
//! of the generated name still has to be carried over; this module derives it.

/// Derives the cache-name suffix from a fused-node name and its
/// precision-qualified variant.
///
/// The third-from-last `_`-delimited token of `fused_node_name` is the
/// embedded fingerprint digits. The suffix is the remainder of
/// `node_name_with_precision` from the first occurrence of those digits,
/// re-split on `_` with the third token dropped (the duplicated partition
/// index that the generated middle segment carries).
///
/// Returns an empty string when `fused_node_name` has fewer than 3 tokens or
/// when the fingerprint digits do not occur in `node_name_with_precision`.
pub fn cache_suffix(fused_node_name: &str, node_name_with_precision: &str) -> String {
    let tokens: Vec<&str> = fused_node_name.split('_').collect();
    if tokens.len() < 3 {
        return String::new();
    }

    let fingerprint = tokens[tokens.len() - 3];
    let Some(start) = node_name_with_precision.find(fingerprint) else {
        return String::new();
    };

    let mut suffix_group: Vec<&str> = node_name_with_precision[start..].split('_').collect();
    if suffix_group.len() > 2 {
        suffix_group.remove(2);
    }
    suffix_group.join("_")
}
