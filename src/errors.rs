use std::error::Error;

use thiserror::Error;

use crate::graph::{NumEdges, Vertex};

/// Trait for checking invariants in datastructures
pub trait InvariantCheck<E: Error> {
    fn is_correct(&self) -> Result<(), E>;
}

/// Reasons for rejecting an input graph
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvalidGraph<V: Vertex> {
    #[error("self-loop at vertex {0:?}")]
    SelfLoop(V),
    #[error("edge {{{0:?}, {1:?}}} occurs more than once")]
    DuplicateEdge(V, V),
    #[error("vertex {0:?} is declared more than once")]
    DuplicateVertex(V),
    #[error("vertex {0:?} is not declared")]
    UndeclaredVertex(V),
    #[error("header declares {declared} edges, but {found} were read")]
    EdgeCountMismatch { declared: NumEdges, found: NumEdges },
}

/// Failures surfaced by a [`crate::trace::ContractionTrace`]
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TraceError<V: Vertex> {
    #[error("invalid graph: {0}")]
    InvalidGraph(#[from] InvalidGraph<V>),
    #[error("vertex {0:?} does not exist (anymore)")]
    UnknownVertex(V),
    #[error("cannot contract vertex {0:?} into itself")]
    SelfContraction(V),
    #[error("graph has no vertices left")]
    EmptyGraph,
}

/// Violation of an internal invariant of a trace; only produced by
/// [`InvariantCheck::is_correct`]
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvariantViolation<V: Vertex> {
    #[error("edge {{{0:?}, {1:?}}} is both black and red")]
    ColorOverlap(V, V),
    #[error("edge {{{0:?}, {1:?}}} is only stored at one endpoint")]
    Asymmetric(V, V),
    #[error("vertex {0:?} has a self-loop")]
    SelfLoop(V),
    #[error("vertex {1:?} is a neighbor of {0:?} but does not exist")]
    DanglingNeighbor(V, V),
    #[error("edge {{{0:?}, {1:?}}} has no orientation")]
    MissingOrientation(V, V),
    #[error("orientation ({0:?}, {1:?}) belongs to no edge")]
    StaleOrientation(V, V),
}

/// A contraction sequence could not be replayed; names the offending step
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("contraction #{} ({survivor:?} <- {removed:?}) failed: {source}", .step + 1)]
pub struct ReplayError<V: Vertex> {
    /// Zero-based position within the sequence
    pub step: usize,
    pub survivor: V,
    pub removed: V,
    pub source: TraceError<V>,
}
