//! Computation-graph types walked by the fingerprinter.

use std::path::{Path, PathBuf};

/// A single node in a computation graph.
///
/// Output slots are optional: `None` models an operator output that the model
/// declares but does not produce, which must not contribute to fingerprints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Node name, unique within its graph.
    pub name: String,
    /// Operator kind, e.g. `"Conv"` or `"MatMul"`.
    pub op: String,
    /// Input tensor names.
    pub inputs: Vec<String>,
    /// Output tensor names; `None` marks an absent optional output.
    pub outputs: Vec<Option<String>>,
}

impl Node {
    /// Creates a node with the given name and operator kind.
    pub fn new(name: impl Into<String>, op: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            op: op.into(),
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    /// Adds an input tensor name.
    pub fn with_input(mut self, name: impl Into<String>) -> Self {
        self.inputs.push(name.into());
        self
    }

    /// Adds a present output tensor name.
    pub fn with_output(mut self, name: impl Into<String>) -> Self {
        self.outputs.push(Some(name.into()));
        self
    }

    /// Adds an absent optional output slot.
    pub fn with_missing_output(mut self) -> Self {
        self.outputs.push(None);
        self
    }

    /// Iterates over the output names that actually exist.
    pub fn present_outputs(&self) -> impl Iterator<Item = &str> {
        self.outputs.iter().flatten().map(String::as_str)
    }
}

/// A computation graph with inputs and nodes in topological order.
///
/// `inputs` includes initializer-backed inputs; both kinds participate in
/// fingerprinting. `nodes` must already be topologically sorted — this crate
/// stores, it does not sort.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    /// Path of the model file this graph was loaded from, if any.
    pub model_path: Option<PathBuf>,
    /// Declared graph inputs, including initializer-backed inputs.
    pub inputs: Vec<String>,
    /// Graph nodes in topological order.
    pub nodes: Vec<Node>,
}

impl Graph {
    /// Creates an empty graph with no model path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the model file path.
    pub fn with_model_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.model_path = Some(path.into());
        self
    }

    /// Adds a declared graph input.
    pub fn with_input(mut self, name: impl Into<String>) -> Self {
        self.inputs.push(name.into());
        self
    }

    /// Appends a node. Callers are responsible for topological order.
    pub fn with_node(mut self, node: Node) -> Self {
        self.nodes.push(node);
        self
    }

    /// Returns the file-name component of the model path, if known.
    ///
    /// Only the file name is exposed, never the full path, so moving a model
    /// between directories does not change its identity.
    pub fn model_file_name(&self) -> Option<&str> {
        self.model_path
            .as_deref()
            .and_then(Path::file_name)
            .and_then(|n| n.to_str())
    }
}

/// A read-only view of a graph within its subgraph nesting.
///
/// Subgraphs (e.g. the body of a control-flow node) view their own `Graph`
/// but keep a link to the enclosing viewer, so the top-level ancestor can be
/// recovered without the graph types themselves storing parent pointers.
#[derive(Debug, Clone, Copy)]
pub struct GraphViewer<'g> {
    graph: &'g Graph,
    parent: Option<&'g GraphViewer<'g>>,
}

impl<'g> GraphViewer<'g> {
    /// Creates a viewer for a top-level graph.
    pub fn new(graph: &'g Graph) -> Self {
        Self {
            graph,
            parent: None,
        }
    }

    /// Creates a viewer for a subgraph nested under `parent`.
    pub fn subgraph(graph: &'g Graph, parent: &'g GraphViewer<'g>) -> Self {
        Self {
            graph,
            parent: Some(parent),
        }
    }

    /// Returns the graph this viewer looks at.
    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    /// Returns `true` if this viewer looks at a nested subgraph.
    pub fn is_subgraph(&self) -> bool {
        self.parent.is_some()
    }

    /// Follows parent links until none remains and returns the top-level
    /// ancestor graph.
    pub fn top_level(&self) -> &'g Graph {
        let mut current = self;
        while let Some(parent) = current.parent {
            current = parent;
        }
        current.graph
    }
}
