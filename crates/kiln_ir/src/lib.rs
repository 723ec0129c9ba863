//! Read-only graph surface for engine fingerprinting.
//!
//! This crate defines the minimal computation-graph representation the cache
//! layer needs: declared input names, node outputs in topological order, the
//! model file name, and parent links for subgraphs. It is walked read-only by
//! the fingerprinter; graph construction, optimization, and execution live in
//! the compiler backend, not here.

#![warn(missing_docs)]

pub mod dump;
pub mod graph;

pub use graph::{Graph, GraphViewer, Node};
