use fxhash::FxHashSet;

use super::*;
use crate::errors::InvalidGraph;

/// A simple undirected input graph: a vertex list, an edge list without loops or
/// parallel edges, and optionally positions for drawing. The order of the edges
/// is kept since it fixes the initial orientation of each edge in a trace.
#[derive(Clone, Debug)]
pub struct Graph<V: Vertex = Node> {
    vertices: Vec<V>,
    edges: Vec<Edge<V>>,
    layout: Option<Layout<V>>,
}

impl<V: Vertex> Graph<V> {
    /// Validates and builds a graph. Fails on duplicate vertices, self-loops,
    /// edges that occur twice (in either orientation) and edges with an
    /// endpoint missing from `vertices`.
    pub fn try_new(
        vertices: impl IntoIterator<Item = V>,
        edges: impl IntoIterator<Item = impl Into<Edge<V>>>,
    ) -> Result<Self, InvalidGraph<V>> {
        let vertices: Vec<V> = vertices.into_iter().collect();

        let mut known = FxHashSet::default();
        for &u in &vertices {
            if !known.insert(u) {
                return Err(InvalidGraph::DuplicateVertex(u));
            }
        }

        let edges = Self::validate_edges(&known, edges)?;

        Ok(Self {
            vertices,
            edges,
            layout: None,
        })
    }

    /// Builds a graph whose vertices are exactly the endpoints of `edges`,
    /// ordered by their first occurrence.
    pub fn try_from_edges(
        edges: impl IntoIterator<Item = impl Into<Edge<V>>>,
    ) -> Result<Self, InvalidGraph<V>> {
        let edges: Vec<Edge<V>> = edges.into_iter().map(|e| e.into()).collect();

        let mut known = FxHashSet::default();
        let mut vertices = Vec::new();
        for &Edge(u, v) in &edges {
            for x in [u, v] {
                if known.insert(x) {
                    vertices.push(x);
                }
            }
        }

        let edges = Self::validate_edges(&known, edges)?;

        Ok(Self {
            vertices,
            edges,
            layout: None,
        })
    }

    fn validate_edges(
        known: &FxHashSet<V>,
        edges: impl IntoIterator<Item = impl Into<Edge<V>>>,
    ) -> Result<Vec<Edge<V>>, InvalidGraph<V>> {
        let mut seen = FxHashSet::default();

        edges
            .into_iter()
            .map(|e| {
                let edge: Edge<V> = e.into();
                let Edge(u, v) = edge;

                if edge.is_loop() {
                    return Err(InvalidGraph::SelfLoop(u));
                }

                if let Some(&x) = [u, v].iter().find(|&&x| !known.contains(&x)) {
                    return Err(InvalidGraph::UndeclaredVertex(x));
                }

                if !seen.insert(edge.normalized()) {
                    return Err(InvalidGraph::DuplicateEdge(u, v));
                }

                Ok(edge)
            })
            .collect()
    }

    /// Attaches positions. Every positioned vertex has to be part of the graph;
    /// vertices without position are allowed.
    pub fn with_layout(mut self, layout: Layout<V>) -> Result<Self, InvalidGraph<V>> {
        let known: FxHashSet<V> = self.vertices.iter().copied().collect();
        if let Some(u) = layout.vertices().find(|u| !known.contains(u)) {
            return Err(InvalidGraph::UndeclaredVertex(u));
        }

        self.layout = Some(layout);
        Ok(self)
    }

    /// Fails unless the graph has exactly `declared` edges
    pub fn expect_number_of_edges(&self, declared: NumEdges) -> Result<(), InvalidGraph<V>> {
        let found = self.number_of_edges();
        if found != declared {
            return Err(InvalidGraph::EdgeCountMismatch { declared, found });
        }
        Ok(())
    }

    pub fn vertices(&self) -> &[V] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Edge<V>] {
        &self.edges
    }

    pub fn layout(&self) -> Option<&Layout<V>> {
        self.layout.as_ref()
    }

    /// Returns *true* if every vertex has a position
    pub fn has_complete_layout(&self) -> bool {
        self.layout
            .as_ref()
            .is_some_and(|l| l.covers(self.vertices.iter()))
    }
}

impl<V: Vertex> GraphNodeOrder for Graph<V> {
    fn number_of_nodes(&self) -> NumNodes {
        self.vertices.len() as NumNodes
    }
}

impl<V: Vertex> GraphEdgeOrder for Graph<V> {
    fn number_of_edges(&self) -> NumEdges {
        self.edges.len() as NumEdges
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn vertices_from_edges_keep_first_occurrence() {
        let graph = Graph::try_from_edges([(1u32, 2), (1, 3), (2, 3), (2, 4), (3, 5)]).unwrap();
        assert_eq!(graph.vertices(), &[1, 2, 3, 4, 5]);
        assert_eq!(graph.number_of_nodes(), 5);
        assert_eq!(graph.number_of_edges(), 5);
        assert_eq!(graph.edges()[3], Edge(2, 4));
        assert!(graph.layout().is_none());
    }

    #[test]
    fn isolated_vertices() {
        let graph = Graph::try_new(0u32..4, [(0u32, 1)]).unwrap();
        assert_eq!(graph.vertices().iter().copied().collect_vec(), vec![0, 1, 2, 3]);
        assert_eq!(graph.number_of_edges(), 1);
    }

    #[test]
    fn rejects_loops_and_multi_edges() {
        assert_eq!(
            Graph::try_from_edges([(1u32, 2), (3, 3)]).unwrap_err(),
            InvalidGraph::SelfLoop(3)
        );
        assert_eq!(
            Graph::try_from_edges([(1u32, 2), (2, 3), (2, 1)]).unwrap_err(),
            InvalidGraph::DuplicateEdge(2, 1)
        );
        assert_eq!(
            Graph::try_new([1u32, 2], [(1u32, 2), (2, 7)]).unwrap_err(),
            InvalidGraph::UndeclaredVertex(7)
        );
        assert_eq!(
            Graph::try_new([1u32, 2, 1], [(1u32, 2)]).unwrap_err(),
            InvalidGraph::DuplicateVertex(1)
        );
    }

    #[test]
    fn edge_count() {
        let graph = Graph::try_from_edges([(0u32, 1), (1, 2)]).unwrap();
        assert!(graph.expect_number_of_edges(2).is_ok());
        assert_eq!(
            graph.expect_number_of_edges(3).unwrap_err(),
            InvalidGraph::EdgeCountMismatch {
                declared: 3,
                found: 2
            }
        );
    }

    #[test]
    fn layout_must_match_vertices() {
        let graph = Graph::try_new(0u32..2, [(0u32, 1)]).unwrap();

        let partial = Layout::try_from_coordinates([(0u32, [0.0, 0.0])]).unwrap();
        let graph = graph.with_layout(partial).unwrap();
        assert!(!graph.has_complete_layout());

        let full = Layout::try_from_coordinates([(0u32, [0.0, 0.0]), (1, [1.0, 0.0])]).unwrap();
        assert!(graph.clone().with_layout(full).unwrap().has_complete_layout());

        let foreign = Layout::try_from_coordinates([(5u32, [0.0, 0.0])]).unwrap();
        assert_eq!(
            graph.with_layout(foreign).unwrap_err(),
            InvalidGraph::UndeclaredVertex(5)
        );
    }
}
