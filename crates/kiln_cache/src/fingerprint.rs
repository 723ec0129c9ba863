//! Deterministic graph fingerprinting for engine cache keys.
//!
//! The same compiled engine is reused across sessions and models, so the
//! cache key must be unique and deterministic across process runs: identical
//! graph + toolchain + hardware + OS always hashes to the same 64-bit id, and
//! any topology, naming, or version difference changes it with overwhelming
//! probability. Collisions remain possible; the cache layer tolerates them by
//! also checking stored profile contents before reuse rather than trusting
//! the id alone.

use kiln_common::ChainedHash;
use kiln_ir::GraphViewer;

/// Minimum number of characters hashed for the model name.
///
/// Very short names are repeated up to this length before hashing to guard
/// against hash weakness on short inputs. Changing this constant silently
/// invalidates every existing cache.
const MODEL_NAME_HASH_LENGTH: usize = 500;

/// Computes the 64-bit engine fingerprint for a graph and its environment.
///
/// The hash feeds, in order: the top-level model file name (repeated to at
/// least [`MODEL_NAME_HASH_LENGTH`] characters), every declared graph input
/// name, every present node-output name in topological order, an OS tag, the
/// kiln build version, and the hardware runtime and accelerator SDK versions
/// when known. Feed order is significant; the result is the low 64 bits of
/// the final chained 128-bit state.
pub fn engine_fingerprint(
    viewer: &GraphViewer<'_>,
    hardware_version: Option<&str>,
    sdk_version: Option<&str>,
) -> u64 {
    let main_graph = viewer.top_level();
    let mut hash = ChainedHash::new();

    // Hash the file name instead of the full path so that moving a model
    // does not regenerate its cache.
    if let Some(model_name) = main_graph.model_file_name() {
        tracing::debug!(model = model_name, "fingerprinting model");
        let mut repeated = model_name.to_string();
        if !model_name.is_empty() {
            while repeated.len() < MODEL_NAME_HASH_LENGTH {
                repeated.push_str(model_name);
            }
        }
        hash.update_str(&repeated);
    } else {
        tracing::debug!("model path is empty, skipping name feed");
    }

    for input in &viewer.graph().inputs {
        hash.update_str(input);
    }

    for node in &viewer.graph().nodes {
        for output in node.present_outputs() {
            hash.update_str(output);
        }
    }

    #[cfg(target_os = "linux")]
    hash.update_str("LINUX");
    #[cfg(target_os = "windows")]
    hash.update_str("WINDOWS");

    hash.update_str(env!("CARGO_PKG_VERSION"));

    if let Some(version) = hardware_version {
        hash.update_str(version);
    }
    if let Some(version) = sdk_version {
        hash.update_str(version);
    }

    hash.finish64()
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiln_ir::{Graph, Node};

    fn sample_graph() -> Graph {
        Graph::new()
            .with_model_path("/models/encoder.onnx")
            .with_input("tokens")
            .with_input("embedding_table")
            .with_node(
                Node::new("gather0", "Gather")
                    .with_input("embedding_table")
                    .with_input("tokens")
                    .with_output("embedded"),
            )
            .with_node(
                Node::new("norm0", "LayerNormalization")
                    .with_input("embedded")
                    .with_output("normed")
                    .with_missing_output(),
            )
    }

    #[test]
    fn deterministic_across_calls() {
        let graph = sample_graph();
        let viewer = GraphViewer::new(&graph);
        let a = engine_fingerprint(&viewer, Some("12.4"), Some("10.7"));
        let b = engine_fingerprint(&viewer, Some("12.4"), Some("10.7"));
        assert_eq!(a, b);
    }

    #[test]
    fn node_output_rename_changes_fingerprint() {
        let graph = sample_graph();
        let mut renamed = graph.clone();
        renamed.nodes[1].outputs[0] = Some("normed_v2".to_string());

        let a = engine_fingerprint(&GraphViewer::new(&graph), None, None);
        let b = engine_fingerprint(&GraphViewer::new(&renamed), None, None);
        assert_ne!(a, b);
    }

    #[test]
    fn version_strings_change_fingerprint() {
        let graph = sample_graph();
        let viewer = GraphViewer::new(&graph);
        let base = engine_fingerprint(&viewer, Some("12.4"), Some("10.7"));
        assert_ne!(base, engine_fingerprint(&viewer, Some("12.6"), Some("10.7")));
        assert_ne!(base, engine_fingerprint(&viewer, Some("12.4"), Some("10.9")));
        assert_ne!(base, engine_fingerprint(&viewer, None, None));
    }

    #[test]
    fn model_name_changes_fingerprint() {
        let graph = sample_graph();
        let mut renamed = graph.clone();
        renamed.model_path = Some("/models/decoder.onnx".into());

        let a = engine_fingerprint(&GraphViewer::new(&graph), None, None);
        let b = engine_fingerprint(&GraphViewer::new(&renamed), None, None);
        assert_ne!(a, b);
    }

    #[test]
    fn path_change_keeps_fingerprint() {
        let graph = sample_graph();
        let mut moved = graph.clone();
        moved.model_path = Some("/elsewhere/encoder.onnx".into());

        let a = engine_fingerprint(&GraphViewer::new(&graph), None, None);
        let b = engine_fingerprint(&GraphViewer::new(&moved), None, None);
        assert_eq!(a, b);
    }

    #[test]
    fn missing_model_path_skips_name_feed() {
        let named = Graph::new().with_model_path("m.onnx").with_input("x");
        let unnamed = Graph::new().with_input("x");

        let a = engine_fingerprint(&GraphViewer::new(&named), None, None);
        let b = engine_fingerprint(&GraphViewer::new(&unnamed), None, None);
        assert_ne!(a, b);
    }

    #[test]
    fn subgraph_hashes_own_nodes_with_top_level_name() {
        // A subgraph viewer uses the top-level model name but its own inputs
        // and nodes, so it fingerprints differently from its root.
        let root = sample_graph();
        let body = Graph::new().with_input("cond").with_node(
            Node::new("id0", "Identity")
                .with_input("cond")
                .with_output("cond_out"),
        );

        let root_view = GraphViewer::new(&root);
        let body_view = GraphViewer::subgraph(&body, &root_view);
        assert_ne!(
            engine_fingerprint(&root_view, None, None),
            engine_fingerprint(&body_view, None, None)
        );
    }

    #[test]
    fn absent_optional_outputs_do_not_contribute() {
        let graph = sample_graph();
        let mut trimmed = graph.clone();
        // Dropping the absent slot entirely must not change the fingerprint.
        trimmed.nodes[1].outputs.pop();

        let a = engine_fingerprint(&GraphViewer::new(&graph), None, None);
        let b = engine_fingerprint(&GraphViewer::new(&trimmed), None, None);
        assert_eq!(a, b);
    }
}
