//! The contraction trace: a two-colored graph that merges vertices one pair at a
//! time and reports every edge-level change as a [`ChangeRecord`].

pub mod change_record;
pub mod classify;
pub mod orientation;


use std::collections::{BTreeMap, BTreeSet};

use log::trace;

pub use change_record::*;
pub use classify::{Neighborhoods, StateDelta, classify};
pub use orientation::OrientationIndex;

use crate::{
    errors::{InvariantCheck, InvariantViolation, TraceError},
    graph::*,
};

pub type Result<T, V> = std::result::Result<T, TraceError<V>>;

#[derive(Clone, Debug, PartialEq, Eq)]
struct Neighborhood<V> {
    black: BTreeSet<V>,
    red: BTreeSet<V>,
}

impl<V> Default for Neighborhood<V> {
    fn default() -> Self {
        Self {
            black: BTreeSet::new(),
            red: BTreeSet::new(),
        }
    }
}

impl<V: Vertex> Neighborhood<V> {
    fn kind_of(&self, w: V) -> EdgeKind {
        if self.black.contains(&w) {
            EdgeKind::Black
        } else if self.red.contains(&w) {
            EdgeKind::Red
        } else {
            EdgeKind::None
        }
    }
}

/// The current state of a graph under contraction: black and red edges over a
/// common vertex set, plus the canonical orientation of every edge.
///
/// Black and red adjacency live in the same per-vertex entry, so both colors
/// always share one vertex set.
#[derive(Clone, Debug)]
pub struct ContractionTrace<V: Vertex = Node> {
    adj: BTreeMap<V, Neighborhood<V>>,
    orientation: OrientationIndex<V>,
}

impl<V: Vertex> PartialEq for ContractionTrace<V> {
    fn eq(&self, other: &Self) -> bool {
        self.adj == other.adj && self.orientation == other.orientation
    }
}

impl<V: Vertex> Eq for ContractionTrace<V> {}

impl<V: Vertex> ContractionTrace<V> {
    /// Starts a trace in which every edge of `graph` is black. Each edge keeps
    /// the orientation it has in the graph's edge list.
    pub fn new(graph: &Graph<V>) -> Self {
        let mut adj: BTreeMap<V, Neighborhood<V>> = graph
            .vertices()
            .iter()
            .map(|&u| (u, Neighborhood::default()))
            .collect();
        let mut orientation = OrientationIndex::new();

        for &edge in graph.edges() {
            let Edge(u, v) = edge;
            for (a, b) in [(u, v), (v, u)] {
                if let Some(nbrs) = adj.get_mut(&a) {
                    nbrs.black.insert(b);
                }
            }
            orientation.insert(edge);
        }

        Self { adj, orientation }
    }

    /// Validates the edge list (see [`Graph::try_from_edges`]) and starts a trace
    /// on the graph spanned by it
    pub fn try_from_edges(
        edges: impl IntoIterator<Item = impl Into<Edge<V>>>,
    ) -> Result<Self, V> {
        let graph = Graph::try_from_edges(edges)?;
        Ok(Self::new(&graph))
    }

    /// Merges `removed` into `survivor` and returns what happened to the edges.
    ///
    /// Fails without modifying the trace if both arguments are equal or if one
    /// of them does not exist.
    pub fn contract(&mut self, survivor: V, removed: V) -> Result<ChangeRecord<V>, V> {
        if survivor == removed {
            return Err(TraceError::SelfContraction(survivor));
        }

        let nbrs_u = self
            .adj
            .get(&survivor)
            .ok_or(TraceError::UnknownVertex(survivor))?;
        let nbrs_v = self
            .adj
            .get(&removed)
            .ok_or(TraceError::UnknownVertex(removed))?;

        let (record, delta) = classify(
            survivor,
            removed,
            Neighborhoods {
                black_survivor: &nbrs_u.black,
                red_survivor: &nbrs_u.red,
                black_removed: &nbrs_v.black,
                red_removed: &nbrs_v.red,
            },
            &self.orientation,
        );

        self.apply(survivor, removed, delta);

        trace!(
            "contract {removed:?} into {survivor:?}: {} moved, {} faded, {} turned red",
            record.edge_move().len(),
            record.edge_fadeout().len(),
            record.recolor_to_red().len()
        );

        Ok(record)
    }

    fn apply(&mut self, u: V, v: V, delta: StateDelta<V>) {
        for &w in &delta.black_to_red {
            self.remove_black_edge(u, w);
        }
        for &w in &delta.superseded_black {
            self.remove_black_edge(u, w);
        }
        for &w in delta.new_red.iter().chain(&delta.black_to_red) {
            self.add_red_edge(u, w);
        }

        let removed = self.adj.remove(&v).unwrap_or_default();
        for &w in removed.black.iter().chain(&removed.red) {
            self.orientation.remove(v, w);
            if let Some(nbrs) = self.adj.get_mut(&w) {
                nbrs.black.remove(&v);
                nbrs.red.remove(&v);
            }
        }

        for edge in delta.orientations {
            self.orientation.insert(edge);
        }
    }

    fn remove_black_edge(&mut self, a: V, b: V) {
        for (x, y) in [(a, b), (b, a)] {
            if let Some(nbrs) = self.adj.get_mut(&x) {
                nbrs.black.remove(&y);
            }
        }
    }

    fn add_red_edge(&mut self, a: V, b: V) {
        for (x, y) in [(a, b), (b, a)] {
            if let Some(nbrs) = self.adj.get_mut(&x) {
                debug_assert!(!nbrs.black.contains(&y));
                nbrs.red.insert(y);
            }
        }
    }

    /// Maximum number of red edges at any remaining vertex. A single vertex has
    /// red degree 0; a trace without vertices has no maximum and yields
    /// [`TraceError::EmptyGraph`].
    pub fn max_red_degree(&self) -> Result<NumNodes, V> {
        self.adj
            .values()
            .map(|nbrs| nbrs.red.len() as NumNodes)
            .max()
            .ok_or(TraceError::EmptyGraph)
    }

    pub fn has_vertex(&self, u: V) -> bool {
        self.adj.contains_key(&u)
    }

    /// Remaining vertices in ascending order
    pub fn vertices(&self) -> impl Iterator<Item = V> + '_ {
        self.adj.keys().copied()
    }

    pub fn black_neighbors_of(&self, u: V) -> Option<&BTreeSet<V>> {
        self.adj.get(&u).map(|nbrs| &nbrs.black)
    }

    pub fn red_neighbors_of(&self, u: V) -> Option<&BTreeSet<V>> {
        self.adj.get(&u).map(|nbrs| &nbrs.red)
    }

    pub fn red_degree_of(&self, u: V) -> Option<NumNodes> {
        self.adj.get(&u).map(|nbrs| nbrs.red.len() as NumNodes)
    }

    pub fn black_degree_of(&self, u: V) -> Option<NumNodes> {
        self.adj.get(&u).map(|nbrs| nbrs.black.len() as NumNodes)
    }

    pub fn edge_kind(&self, u: V, v: V) -> EdgeKind {
        self.adj
            .get(&u)
            .map_or(EdgeKind::None, |nbrs| nbrs.kind_of(v))
    }

    /// Black edges as normalized pairs in ascending order
    pub fn black_edges(&self) -> impl Iterator<Item = Edge<V>> + '_ {
        self.adj.iter().flat_map(|(&u, nbrs)| {
            nbrs.black.range(u..).filter(move |&&w| w != u).map(move |&w| Edge(u, w))
        })
    }

    /// Red edges as normalized pairs in ascending order
    pub fn red_edges(&self) -> impl Iterator<Item = Edge<V>> + '_ {
        self.adj.iter().flat_map(|(&u, nbrs)| {
            nbrs.red.range(u..).filter(move |&&w| w != u).map(move |&w| Edge(u, w))
        })
    }

    /// All edges with their color; black edges first
    pub fn colored_edges(&self) -> impl Iterator<Item = ColoredEdge<V>> + '_ {
        self.black_edges()
            .map(|e| e.colored(EdgeColor::Black))
            .chain(self.red_edges().map(|e| e.colored(EdgeColor::Red)))
    }

    pub fn number_of_black_edges(&self) -> NumEdges {
        self.adj.values().map(|n| n.black.len() as NumEdges).sum::<NumEdges>() / 2
    }

    pub fn number_of_red_edges(&self) -> NumEdges {
        self.adj.values().map(|n| n.red.len() as NumEdges).sum::<NumEdges>() / 2
    }

    /// Canonical orientation of the edge `{a, b}`, if it exists
    pub fn orientation_of(&self, a: V, b: V) -> Option<Edge<V>> {
        self.orientation.get(a, b)
    }

    pub fn orientation(&self) -> &OrientationIndex<V> {
        &self.orientation
    }
}

impl<V: Vertex> GraphNodeOrder for ContractionTrace<V> {
    fn number_of_nodes(&self) -> NumNodes {
        self.adj.len() as NumNodes
    }
}

impl<V: Vertex> GraphEdgeOrder for ContractionTrace<V> {
    fn number_of_edges(&self) -> NumEdges {
        self.number_of_black_edges() + self.number_of_red_edges()
    }
}

impl<V: Vertex> InvariantCheck<InvariantViolation<V>> for ContractionTrace<V> {
    fn is_correct(&self) -> std::result::Result<(), InvariantViolation<V>> {
        for (&u, nbrs) in &self.adj {
            if nbrs.black.contains(&u) || nbrs.red.contains(&u) {
                return Err(InvariantViolation::SelfLoop(u));
            }

            if let Some(&w) = nbrs.black.intersection(&nbrs.red).next() {
                return Err(InvariantViolation::ColorOverlap(u, w));
            }

            for (&w, color) in nbrs
                .black
                .iter()
                .map(|w| (w, EdgeKind::Black))
                .chain(nbrs.red.iter().map(|w| (w, EdgeKind::Red)))
            {
                let Some(other) = self.adj.get(&w) else {
                    return Err(InvariantViolation::DanglingNeighbor(u, w));
                };

                if other.kind_of(u) != color {
                    return Err(InvariantViolation::Asymmetric(u, w));
                }

                match self.orientation.get(u, w) {
                    Some(edge) if edge.normalized() == Edge(u, w).normalized() => {}
                    _ => return Err(InvariantViolation::MissingOrientation(u, w)),
                }
            }
        }

        for Edge(a, b) in self.orientation.iter() {
            if self.edge_kind(a, b).is_none() {
                return Err(InvariantViolation::StaleOrientation(a, b));
            }
        }

        Ok(())
    }
}
