use rand::Rng;
use rand_distr::Geometric;

use super::*;

pub trait GnpGenerator: Sized {
    /// Generates a Gilbert (also, wrongly, known as Erdos-Reyni) graph
    /// The `G(n,p)` contains nodes `0..n` and each of the `n(n-1)/2` edges exists
    /// independently with probability `p`.
    fn random_gnp<R: Rng>(rng: &mut R, n: Node, p: f64) -> Self;
}

impl GnpGenerator for Graph<Node> {
    fn random_gnp<R: Rng>(rng: &mut R, n: Node, p: f64) -> Self {
        let edges: Vec<Edge> = GnpEdges::new(rng, n, p).collect();

        // pairs are drawn in ascending order and only once each, so the result is simple
        match Graph::try_new(0..n, edges) {
            Ok(graph) => graph,
            Err(e) => unreachable!("sampled graph is not simple: {e}"),
        }
    }
}

/// Walks the pairs `u < v` of `0..n` in lexicographic order and yields each one
/// independently with probability `p`. Rejected pairs are jumped over with
/// geometrically distributed skips, so the cost is linear in `n` plus the
/// number of edges.
pub struct GnpEdges<'a, R: Rng> {
    rng: &'a mut R,
    skips: Option<Geometric>,
    n: Node,
    u: Node,
    v: Node,
}

impl<'a, R: Rng> GnpEdges<'a, R> {
    /// A `p` outside of `[0, 1]` yields no edges
    pub fn new(rng: &'a mut R, n: Node, p: f64) -> Self {
        debug_assert!((0.0..=1.0).contains(&p));
        Self {
            rng,
            skips: Geometric::new(p).ok(),
            n,
            u: 0,
            v: 1,
        }
    }
}

impl<R: Rng> Iterator for GnpEdges<'_, R> {
    type Item = Edge;

    fn next(&mut self) -> Option<Self::Item> {
        let skips = self.skips.as_ref()?;
        let mut skip = self.rng.sample(skips);

        while self.u < self.n {
            let left_in_row = (self.n - self.v) as u64;
            if skip < left_in_row {
                let v = self.v + skip as Node;
                self.v = v + 1;
                return Some(Edge(self.u, v));
            }

            skip -= left_in_row;
            self.u += 1;
            self.v = self.u + 1;
        }

        None
    }
}
