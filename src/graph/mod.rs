pub mod edge;
pub mod gnp;
pub mod layout;
pub mod simple;

pub type Node = u32;
pub type NumNodes = Node;
pub type NumEdges = u64;

use std::{fmt::Debug, hash::Hash};

pub use edge::*;
pub use gnp::*;
pub use layout::*;
pub use simple::*;

/// Anything that can serve as a vertex label. Vertices are only ever compared,
/// hashed and copied; the file formats and binaries use [`Node`].
pub trait Vertex: Copy + Ord + Hash + Debug + Send + Sync + 'static {}

impl<T> Vertex for T where T: Copy + Ord + Hash + Debug + Send + Sync + 'static {}

/// Provides getters pertaining to the size of a graph
pub trait GraphNodeOrder {
    /// Returns the number of nodes of the graph
    fn number_of_nodes(&self) -> NumNodes;

    /// Return the number of nodes as usize
    fn len(&self) -> usize {
        self.number_of_nodes() as usize
    }

    /// Returns true if the graph has no nodes (and thus no edges)
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub trait GraphEdgeOrder {
    /// Returns the number of edges of the graph
    fn number_of_edges(&self) -> NumEdges;
}
