use serde::{Deserialize, Serialize};

use super::*;

pub trait EdgeOps {
    fn normalized(&self) -> Self;
    fn is_normalized(&self) -> bool;
    fn is_loop(&self) -> bool;
    fn reverse(&self) -> Self;
}

pub trait ColorQuery {
    fn is_red(&self) -> bool;
    fn is_black(&self) -> bool;
    fn is_none(&self) -> bool;
    fn is_some(&self) -> bool {
        !self.is_none()
    }
}

/// An ordered pair of vertices. Whether the order carries meaning depends on the
/// context; the orientation index of a trace uses it to mark the "first" endpoint.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Serialize, Deserialize)]
pub struct Edge<V = Node>(pub V, pub V);

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Serialize)]
pub struct ColoredEdge<V = Node>(pub V, pub V, pub EdgeColor);

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeColor {
    Black,
    Red,
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum EdgeKind {
    Black,
    Red,
    None,
}

impl ColorQuery for EdgeColor {
    fn is_red(&self) -> bool {
        *self == EdgeColor::Red
    }

    fn is_black(&self) -> bool {
        *self == EdgeColor::Black
    }

    fn is_none(&self) -> bool {
        false
    }
}

impl ColorQuery for EdgeKind {
    fn is_red(&self) -> bool {
        *self == EdgeKind::Red
    }

    fn is_black(&self) -> bool {
        *self == EdgeKind::Black
    }

    fn is_none(&self) -> bool {
        *self == EdgeKind::None
    }
}

impl PartialEq<EdgeKind> for EdgeColor {
    fn eq(&self, other: &EdgeKind) -> bool {
        match *self {
            EdgeColor::Black => *other == EdgeKind::Black,
            EdgeColor::Red => *other == EdgeKind::Red,
        }
    }
}

impl PartialEq<EdgeColor> for EdgeKind {
    fn eq(&self, other: &EdgeColor) -> bool {
        match *self {
            EdgeKind::Black => *other == EdgeColor::Black,
            EdgeKind::Red => *other == EdgeColor::Red,
            EdgeKind::None => false,
        }
    }
}

impl<V: Vertex> Edge<V> {
    /// Returns *true* if `u` is one of the two endpoints
    pub fn contains(&self, u: V) -> bool {
        self.0 == u || self.1 == u
    }

    /// Returns the endpoint opposite to `u`, or `None` if `u` is not incident
    pub fn other(&self, u: V) -> Option<V> {
        if self.0 == u {
            Some(self.1)
        } else if self.1 == u {
            Some(self.0)
        } else {
            None
        }
    }

    /// Replaces every occurrence of `from` by `to`
    pub fn relabeled(&self, from: V, to: V) -> Self {
        let map = |x: V| if x == from { to } else { x };
        Edge(map(self.0), map(self.1))
    }

    pub fn colored(&self, color: EdgeColor) -> ColoredEdge<V> {
        ColoredEdge(self.0, self.1, color)
    }
}

impl<V: Vertex> EdgeOps for Edge<V> {
    fn normalized(&self) -> Self {
        Edge(self.0.min(self.1), self.0.max(self.1))
    }

    fn is_normalized(&self) -> bool {
        self.0 <= self.1
    }

    fn is_loop(&self) -> bool {
        self.0 == self.1
    }

    fn reverse(&self) -> Self {
        Edge(self.1, self.0)
    }
}

impl<V: Vertex> EdgeOps for ColoredEdge<V> {
    fn normalized(&self) -> Self {
        ColoredEdge(self.0.min(self.1), self.0.max(self.1), self.2)
    }

    fn is_normalized(&self) -> bool {
        self.0 <= self.1
    }

    fn is_loop(&self) -> bool {
        self.0 == self.1
    }

    fn reverse(&self) -> Self {
        ColoredEdge(self.1, self.0, self.2)
    }
}

impl<V> From<(V, V)> for Edge<V> {
    fn from(value: (V, V)) -> Self {
        Edge(value.0, value.1)
    }
}

impl<V: Copy> From<&(V, V)> for Edge<V> {
    fn from(value: &(V, V)) -> Self {
        Edge(value.0, value.1)
    }
}

impl<V: Copy> From<&Edge<V>> for Edge<V> {
    fn from(value: &Edge<V>) -> Self {
        *value
    }
}

impl<V> From<Edge<V>> for (V, V) {
    fn from(value: Edge<V>) -> Self {
        (value.0, value.1)
    }
}
