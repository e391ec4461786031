use fxhash::FxHashMap;

use crate::graph::*;

/// Stores for every edge `{a, b}` one ordered representative. The renderer uses
/// the order to tell which endpoint of an edge slides during a contraction, so
/// the representative must not depend on how the edge is looked up.
#[derive(Clone, Debug)]
pub struct OrientationIndex<V: Vertex = Node> {
    map: FxHashMap<Edge<V>, Edge<V>>,
}

impl<V: Vertex> Default for OrientationIndex<V> {
    fn default() -> Self {
        Self {
            map: FxHashMap::default(),
        }
    }
}

impl<V: Vertex> PartialEq for OrientationIndex<V> {
    fn eq(&self, other: &Self) -> bool {
        self.map == other.map
    }
}

impl<V: Vertex> Eq for OrientationIndex<V> {}

impl<V: Vertex> OrientationIndex<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `edge` the canonical orientation of its endpoints and returns the
    /// previous one, if any
    pub fn insert(&mut self, edge: Edge<V>) -> Option<Edge<V>> {
        self.map.insert(edge.normalized(), edge)
    }

    /// Returns the canonical orientation of `{a, b}`; both argument orders give
    /// the same answer
    pub fn get(&self, a: V, b: V) -> Option<Edge<V>> {
        self.map.get(&Edge(a, b).normalized()).copied()
    }

    /// Like [`OrientationIndex::get`] but for edges that are known to exist.
    ///
    /// # Panics
    /// If `{a, b}` has no orientation
    pub fn oriented(&self, a: V, b: V) -> Edge<V> {
        match self.get(a, b) {
            Some(edge) => edge,
            None => panic!("no orientation stored for {{{a:?}, {b:?}}}"),
        }
    }

    pub fn remove(&mut self, a: V, b: V) -> Option<Edge<V>> {
        self.map.remove(&Edge(a, b).normalized())
    }

    pub fn contains(&self, a: V, b: V) -> bool {
        self.map.contains_key(&Edge(a, b).normalized())
    }

    /// Number of oriented edges
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterates over all canonical orientations in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = Edge<V>> + '_ {
        self.map.values().copied()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn lookup_is_symmetric() {
        let mut index = OrientationIndex::new();
        assert!(index.insert(Edge(4u32, 2)).is_none());

        assert_eq!(index.get(4, 2), Some(Edge(4, 2)));
        assert_eq!(index.get(2, 4), Some(Edge(4, 2)));
        assert_eq!(index.oriented(2, 4), Edge(4, 2));
        assert!(index.contains(2, 4));
        assert!(!index.contains(2, 3));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn reinsert_replaces_orientation() {
        let mut index = OrientationIndex::new();
        index.insert(Edge(3u32, 5));
        assert_eq!(index.insert(Edge(5, 3)), Some(Edge(3, 5)));
        assert_eq!(index.get(3, 5), Some(Edge(5, 3)));
        assert_eq!(index.len(), 1);

        assert_eq!(index.remove(3, 5), Some(Edge(5, 3)));
        assert!(index.is_empty());
        assert_eq!(index.remove(3, 5), None);
    }

    #[test]
    #[should_panic]
    fn oriented_panics_on_missing_edge() {
        let index = OrientationIndex::<u32>::new();
        index.oriented(0, 1);
    }
}
