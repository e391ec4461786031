use std::collections::{BTreeMap, BTreeSet};

use itertools::Itertools as _;
use rand::{Rng, seq::IteratorRandom};

use super::{graph::*, prelude::*};

/// Yields `G(n,p)` graphs for every combination of the given sizes and densities
pub fn generate_random_graphs<'a>(
    rng: &'a mut impl Rng,
    sizes: &'a [NumNodes],
    densities: &'a [f64],
) -> impl Iterator<Item = Graph> + 'a {
    sizes
        .iter()
        .cartesian_product(densities.iter())
        .map(move |(&n, &p)| Graph::random_gnp(rng, n, p))
}

/// Contracts random pairs of remaining vertices until `stop_at` vertices remain
pub fn random_contraction_sequence(
    rng: &mut impl Rng,
    graph: &Graph,
    stop_at: NumNodes,
) -> ContractionSequence {
    let mut remaining: BTreeSet<Node> = graph.vertices().iter().copied().collect();
    let mut seq = ContractionSequence::new();

    while remaining.len() > stop_at.max(1) as usize {
        let pair = remaining.iter().copied().choose_multiple(rng, 2);
        let (survivor, removed) = if rng.gen_bool(0.5) {
            (pair[0], pair[1])
        } else {
            (pair[1], pair[0])
        };

        remaining.remove(&removed);
        seq.push(survivor, removed);
    }

    seq
}

/// A plain, independent rendition of a contraction used to cross-check the
/// trace: the survivor keeps a black edge exactly to the common black
/// neighbors and gets red edges to everything else adjacent to either vertex.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NaiveTrigraph {
    black: BTreeMap<Node, BTreeSet<Node>>,
    red: BTreeMap<Node, BTreeSet<Node>>,
}

impl NaiveTrigraph {
    pub fn new(graph: &Graph) -> Self {
        let mut black: BTreeMap<Node, BTreeSet<Node>> = graph
            .vertices()
            .iter()
            .map(|&u| (u, BTreeSet::new()))
            .collect();
        let red = black.clone();

        for &Edge(u, v) in graph.edges() {
            black.get_mut(&u).unwrap().insert(v);
            black.get_mut(&v).unwrap().insert(u);
        }

        Self { black, red }
    }

    pub fn merge_node_into(&mut self, removed: Node, survivor: Node) {
        let black_rem = self.black.remove(&removed).unwrap();
        let red_rem = self.red.remove(&removed).unwrap();
        for nbrs in self.black.values_mut().chain(self.red.values_mut()) {
            nbrs.remove(&removed);
        }

        let black_sur = self.black[&survivor].clone();
        let red_sur = self.red[&survivor].clone();

        let keep_black: BTreeSet<Node> = black_sur.intersection(&black_rem).copied().collect();
        let all: BTreeSet<Node> = black_sur
            .iter()
            .chain(&red_sur)
            .chain(&black_rem)
            .chain(&red_rem)
            .copied()
            .filter(|&w| w != survivor && w != removed)
            .collect();

        for &w in &all {
            self.black.get_mut(&w).unwrap().remove(&survivor);
            self.red.get_mut(&w).unwrap().remove(&survivor);
        }
        self.black.get_mut(&survivor).unwrap().clear();
        self.red.get_mut(&survivor).unwrap().clear();

        for w in all {
            let color = if keep_black.contains(&w) {
                &mut self.black
            } else {
                &mut self.red
            };
            color.get_mut(&w).unwrap().insert(survivor);
            color.get_mut(&survivor).unwrap().insert(w);
        }
    }

    pub fn black_edges(&self) -> Vec<Edge> {
        Self::edges_of(&self.black)
    }

    pub fn red_edges(&self) -> Vec<Edge> {
        Self::edges_of(&self.red)
    }

    fn edges_of(adj: &BTreeMap<Node, BTreeSet<Node>>) -> Vec<Edge> {
        adj.iter()
            .flat_map(|(&u, nbrs)| nbrs.iter().filter(move |&&w| u < w).map(move |&w| Edge(u, w)))
            .collect()
    }
}
