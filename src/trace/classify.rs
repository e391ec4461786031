use std::collections::BTreeSet;

use fxhash::FxHashSet;

use super::{change_record::*, orientation::OrientationIndex};
use crate::graph::*;

/// The four neighborhoods a contraction looks at, as stored before the step.
/// The sets may contain the other contracted vertex; it is ignored.
#[derive(Clone, Copy, Debug)]
pub struct Neighborhoods<'a, V> {
    pub black_survivor: &'a BTreeSet<V>,
    pub red_survivor: &'a BTreeSet<V>,
    pub black_removed: &'a BTreeSet<V>,
    pub red_removed: &'a BTreeSet<V>,
}

/// Edge updates at the survivor `u` that carry out a contraction; each entry
/// names the neighbor `w` of the edge `u`-`w`. Edges at the removed vertex are
/// not listed since they all vanish with it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateDelta<V> {
    /// `u`-`w` becomes a red edge; previously absent
    pub new_red: Vec<V>,
    /// `u`-`w` changes from black to red
    pub black_to_red: Vec<V>,
    /// black `u`-`w` is replaced by the red edge relocated from the removed vertex
    pub superseded_black: Vec<V>,
    /// canonical orientations of relocated edges that survive the contraction
    pub orientations: Vec<Edge<V>>,
}

/// Computes, without touching any stored state, how contracting `removed` into
/// `survivor` affects the graph. Neighbors are visited in ascending order, so
/// the same input always yields the same lists in the same order.
pub fn classify<V: Vertex>(
    survivor: V,
    removed: V,
    nbrs: Neighborhoods<'_, V>,
    orientation: &OrientationIndex<V>,
) -> (ChangeRecord<V>, StateDelta<V>) {
    let (u, v) = (survivor, removed);

    let without_pair = |set: &BTreeSet<V>| -> BTreeSet<V> {
        set.iter().copied().filter(|&w| w != u && w != v).collect()
    };

    let black_u = without_pair(nbrs.black_survivor);
    let red_u = without_pair(nbrs.red_survivor);
    let black_v = without_pair(nbrs.black_removed);
    let red_v = without_pair(nbrs.red_removed);

    let all_u: BTreeSet<V> = black_u.union(&red_u).copied().collect();
    let all_v: BTreeSet<V> = black_v.union(&red_v).copied().collect();

    let mut record = ChangeRecord::default();

    let moved = |w: V| {
        let from = orientation.oriented(v, w);
        let to = if from.0 == v { Edge(u, w) } else { Edge(w, u) };
        EdgeMove { from, to }
    };

    if nbrs.black_survivor.contains(&v) || nbrs.red_survivor.contains(&v) {
        let edge = orientation.oriented(u, v);
        let survivor = if edge.0 == u {
            Endpoint::First
        } else {
            Endpoint::Second
        };
        record.edge_shrink = Some(EdgeShrink { edge, survivor });
    }

    // neighbors only of the removed vertex: the edge slides over to u and turns red
    let only_v: Vec<V> = all_v.difference(&all_u).copied().collect();
    for &w in &only_v {
        record.recolor_to_red.push(orientation.oriented(v, w));
        record.edge_move.push(moved(w));
    }

    // neighbors only of the survivor: the edge stays where it is and turns red
    for &w in all_u.difference(&all_v) {
        record.recolor_to_red.push(orientation.oriented(u, w));
    }

    // common neighbors whose u-w edge stays: v-w moves on top of it and fades out
    let black_v_common: BTreeSet<V> = black_v.intersection(&all_u).copied().collect();
    let red_common: BTreeSet<V> = red_v.intersection(&red_u).copied().collect();
    for &w in black_v_common.union(&red_common) {
        let vw = orientation.oriented(v, w);
        let uw = orientation.oriented(u, w);

        record.edge_move.push(moved(w));
        record.edge_fadeout.push(vw);

        if black_v.contains(&w) {
            record.recolor_white_to_green.push(vw);
        } else {
            record.recolor_red_to_green.push(vw);
        }

        if black_u.contains(&w) {
            record.recolor_white_to_green.push(uw);
        } else {
            record.recolor_red_to_green.push(uw);
        }
    }

    // common neighbors with red v-w but black u-w: the red edge moves over and
    // replaces the black one
    let red_v_black_u: Vec<V> = red_v.intersection(&black_u).copied().collect();
    for &w in &red_v_black_u {
        let uw = orientation.oriented(u, w);

        record.recolor_red_to_green.push(orientation.oriented(v, w));
        record.recolor_white_to_green.push(uw);
        record.edge_move.push(moved(w));
        record.edge_fadeout.push(uw);
    }

    let faded: FxHashSet<Edge<V>> = record.edge_fadeout.iter().copied().collect();
    let orientations = record
        .edge_move
        .iter()
        .filter(|m| !faded.contains(&m.from))
        .map(|m| m.to)
        .collect();

    let delta = StateDelta {
        new_red: only_v.into_iter().chain(red_v_black_u.iter().copied()).collect(),
        black_to_red: black_u.difference(&all_v).copied().collect(),
        superseded_black: red_v_black_u,
        orientations,
    };

    (record, delta)
}

#[cfg(test)]
mod test {
    use super::*;

    fn set(nodes: &[u32]) -> BTreeSet<u32> {
        nodes.iter().copied().collect()
    }

    fn index(edges: &[(u32, u32)]) -> OrientationIndex<u32> {
        let mut index = OrientationIndex::new();
        for &(a, b) in edges {
            index.insert(Edge(a, b));
        }
        index
    }

    #[test]
    fn exclusive_neighbors() {
        // u = 0 with black neighbor 1; v = 9 with red neighbor 2
        let orientation = index(&[(0, 1), (2, 9)]);
        let (bu, ru, bv, rv) = (set(&[1]), set(&[]), set(&[]), set(&[2]));

        let (record, delta) = classify(
            0,
            9,
            Neighborhoods {
                black_survivor: &bu,
                red_survivor: &ru,
                black_removed: &bv,
                red_removed: &rv,
            },
            &orientation,
        );

        assert_eq!(record.recolor_to_red(), &[Edge(2, 9), Edge(0, 1)]);
        assert_eq!(
            record.edge_move(),
            &[EdgeMove {
                from: Edge(2, 9),
                to: Edge(2, 0)
            }]
        );
        assert!(record.edge_fadeout().is_empty());
        assert!(record.edge_shrink().is_none());

        assert_eq!(delta.new_red, vec![2]);
        assert_eq!(delta.black_to_red, vec![1]);
        assert!(delta.superseded_black.is_empty());
        assert_eq!(delta.orientations, vec![Edge(2, 0)]);
    }

    #[test]
    fn common_neighbors_keep_survivor_edge() {
        // w = 5 black at both; w = 6 red at both; w = 7 black at v, red at u
        let orientation = index(&[(0, 5), (5, 1), (0, 6), (1, 6), (7, 0), (1, 7)]);
        let (bu, ru, bv, rv) = (set(&[5]), set(&[6, 7]), set(&[5, 7]), set(&[6]));

        let (record, delta) = classify(
            0,
            1,
            Neighborhoods {
                black_survivor: &bu,
                red_survivor: &ru,
                black_removed: &bv,
                red_removed: &rv,
            },
            &orientation,
        );

        assert!(record.recolor_to_red().is_empty());
        assert_eq!(
            record.edge_move(),
            &[
                EdgeMove {
                    from: Edge(5, 1),
                    to: Edge(5, 0)
                },
                EdgeMove {
                    from: Edge(1, 6),
                    to: Edge(0, 6)
                },
                EdgeMove {
                    from: Edge(1, 7),
                    to: Edge(0, 7)
                },
            ]
        );
        assert_eq!(record.edge_fadeout(), &[Edge(5, 1), Edge(1, 6), Edge(1, 7)]);
        assert_eq!(
            record.recolor_white_to_green(),
            &[Edge(5, 1), Edge(0, 5), Edge(1, 7)]
        );
        assert_eq!(record.recolor_red_to_green(), &[Edge(1, 6), Edge(0, 6), Edge(7, 0)]);

        // nothing changes at the survivor
        assert!(delta.new_red.is_empty());
        assert!(delta.black_to_red.is_empty());
        assert!(delta.superseded_black.is_empty());
        assert!(delta.orientations.is_empty());
    }

    #[test]
    fn red_removed_edge_replaces_black_survivor_edge() {
        let orientation = index(&[(3, 5), (4, 3)]);
        let (bu, ru, bv, rv) = (set(&[3]), set(&[]), set(&[]), set(&[3]));

        let (record, delta) = classify(
            5,
            4,
            Neighborhoods {
                black_survivor: &bu,
                red_survivor: &ru,
                black_removed: &bv,
                red_removed: &rv,
            },
            &orientation,
        );

        assert_eq!(record.recolor_red_to_green(), &[Edge(4, 3)]);
        assert_eq!(record.recolor_white_to_green(), &[Edge(3, 5)]);
        assert_eq!(
            record.edge_move(),
            &[EdgeMove {
                from: Edge(4, 3),
                to: Edge(5, 3)
            }]
        );
        assert_eq!(record.edge_fadeout(), &[Edge(3, 5)]);

        assert_eq!(delta.new_red, vec![3]);
        assert_eq!(delta.superseded_black, vec![3]);
        assert!(delta.black_to_red.is_empty());
        assert_eq!(delta.orientations, vec![Edge(5, 3)]);
    }

    #[test]
    fn direct_edge_shrinks() {
        let orientation = index(&[(2, 1)]);
        let (bu, ru, bv, rv) = (set(&[2]), set(&[]), set(&[1]), set(&[]));

        let (record, delta) = classify(
            1,
            2,
            Neighborhoods {
                black_survivor: &bu,
                red_survivor: &ru,
                black_removed: &bv,
                red_removed: &rv,
            },
            &orientation,
        );

        let shrink = record.edge_shrink().unwrap();
        assert_eq!(shrink.edge, Edge(2, 1));
        assert_eq!(shrink.survivor, Endpoint::Second);
        assert_eq!(shrink.survivor(), 1);

        assert!(record.recolor_to_red().is_empty());
        assert!(record.edge_move().is_empty());
        assert_eq!(
            delta,
            StateDelta {
                new_red: vec![],
                black_to_red: vec![],
                superseded_black: vec![],
                orientations: vec![],
            }
        );
    }
}
