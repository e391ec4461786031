use serde::{Serialize, Serializer};

use crate::graph::*;

/// Position of a vertex within an oriented edge
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Endpoint {
    First,
    Second,
}

impl Endpoint {
    pub fn index(self) -> usize {
        match self {
            Endpoint::First => 0,
            Endpoint::Second => 1,
        }
    }

    pub fn of<V: Copy>(self, edge: Edge<V>) -> V {
        match self {
            Endpoint::First => edge.0,
            Endpoint::Second => edge.1,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Endpoint::First => Endpoint::Second,
            Endpoint::Second => Endpoint::First,
        }
    }
}

/// The direct edge between the two contracted vertices, which collapses into a
/// point. `survivor` marks the endpoint that stays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeShrink<V = Node> {
    pub edge: Edge<V>,
    pub survivor: Endpoint,
}

impl<V: Copy> EdgeShrink<V> {
    pub fn survivor(&self) -> V {
        self.survivor.of(self.edge)
    }

    pub fn removed(&self) -> V {
        self.survivor.opposite().of(self.edge)
    }
}

/// An edge that keeps one endpoint and swaps the removed vertex for the survivor
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeMove<V = Node> {
    pub from: Edge<V>,
    pub to: Edge<V>,
}

/// Every edge-level change caused by a single contraction. All edges carry the
/// orientation they had right before the contraction, except for the targets of
/// [`EdgeMove`]s.
///
/// Equality ignores the order within each list.
#[derive(Clone, Debug, Serialize)]
#[serde(bound(serialize = "V: Serialize"))]
pub struct ChangeRecord<V: Vertex = Node> {
    pub(super) recolor_to_red: Vec<Edge<V>>,
    pub(super) recolor_white_to_green: Vec<Edge<V>>,
    pub(super) recolor_red_to_green: Vec<Edge<V>>,
    pub(super) edge_shrink: Option<EdgeShrink<V>>,
    pub(super) edge_move: Vec<EdgeMove<V>>,
    pub(super) edge_fadeout: Vec<Edge<V>>,
}

impl<V: Vertex> Default for ChangeRecord<V> {
    fn default() -> Self {
        Self {
            recolor_to_red: Vec::new(),
            recolor_white_to_green: Vec::new(),
            recolor_red_to_green: Vec::new(),
            edge_shrink: None,
            edge_move: Vec::new(),
            edge_fadeout: Vec::new(),
        }
    }
}

impl<V: Vertex> ChangeRecord<V> {
    pub fn from_parts(
        recolor_to_red: Vec<Edge<V>>,
        recolor_white_to_green: Vec<Edge<V>>,
        recolor_red_to_green: Vec<Edge<V>>,
        edge_shrink: Option<EdgeShrink<V>>,
        edge_move: Vec<EdgeMove<V>>,
        edge_fadeout: Vec<Edge<V>>,
    ) -> Self {
        Self {
            recolor_to_red,
            recolor_white_to_green,
            recolor_red_to_green,
            edge_shrink,
            edge_move,
            edge_fadeout,
        }
    }

    /// Edges that turn red; those at the removed vertex also appear in `edge_move`
    pub fn recolor_to_red(&self) -> &[Edge<V>] {
        &self.recolor_to_red
    }

    /// Relocated or superseded edges that were black before the contraction
    pub fn recolor_white_to_green(&self) -> &[Edge<V>] {
        &self.recolor_white_to_green
    }

    /// Relocated or superseded edges that were red before the contraction
    pub fn recolor_red_to_green(&self) -> &[Edge<V>] {
        &self.recolor_red_to_green
    }

    pub fn edge_shrink(&self) -> Option<&EdgeShrink<V>> {
        self.edge_shrink.as_ref()
    }

    pub fn edge_move(&self) -> &[EdgeMove<V>] {
        &self.edge_move
    }

    /// Edges that are discarded once their duplicate has been moved on top
    pub fn edge_fadeout(&self) -> &[Edge<V>] {
        &self.edge_fadeout
    }

    /// Returns *true* if the contraction did not touch a single edge
    pub fn is_empty(&self) -> bool {
        self.recolor_to_red.is_empty()
            && self.recolor_white_to_green.is_empty()
            && self.recolor_red_to_green.is_empty()
            && self.edge_shrink.is_none()
            && self.edge_move.is_empty()
            && self.edge_fadeout.is_empty()
    }

    /// Returns a copy with every list sorted
    pub fn canonicalized(&self) -> Self {
        let sorted = |mut v: Vec<Edge<V>>| {
            v.sort_unstable();
            v
        };

        let mut edge_move = self.edge_move.clone();
        edge_move.sort_unstable();

        Self {
            recolor_to_red: sorted(self.recolor_to_red.clone()),
            recolor_white_to_green: sorted(self.recolor_white_to_green.clone()),
            recolor_red_to_green: sorted(self.recolor_red_to_green.clone()),
            edge_shrink: self.edge_shrink,
            edge_move,
            edge_fadeout: sorted(self.edge_fadeout.clone()),
        }
    }
}

impl<V: Vertex> PartialEq for ChangeRecord<V> {
    fn eq(&self, other: &Self) -> bool {
        let (a, b) = (self.canonicalized(), other.canonicalized());
        a.recolor_to_red == b.recolor_to_red
            && a.recolor_white_to_green == b.recolor_white_to_green
            && a.recolor_red_to_green == b.recolor_red_to_green
            && a.edge_shrink == b.edge_shrink
            && a.edge_move == b.edge_move
            && a.edge_fadeout == b.edge_fadeout
    }
}

impl<V: Vertex> Eq for ChangeRecord<V> {}

impl Serialize for Endpoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.index() as u8)
    }
}

// (first, second, survivor index)
impl<V: Serialize> Serialize for EdgeShrink<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (&self.edge.0, &self.edge.1, self.survivor).serialize(serializer)
    }
}

// (old first, old second, new first, new second)
impl<V: Serialize> Serialize for EdgeMove<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (&self.from.0, &self.from.1, &self.to.0, &self.to.1).serialize(serializer)
    }
}
