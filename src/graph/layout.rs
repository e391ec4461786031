use fxhash::FxHashMap;
use itertools::Itertools;
use serde::Serialize;
use thiserror::Error;

use super::*;

/// A point in space; planar positions carry `z = 0`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Position(pub [f64; 3]);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Planar,
    Spatial,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("positions must have 2 or 3 coordinates, found {0}")]
    UnsupportedDimension(usize),
    #[error("positions mix 2d and 3d coordinates")]
    MixedDimensions,
}

/// Per-vertex positions as supplied by a graph file. The trace engine never
/// looks at them; they are carried along for whoever draws the graph.
#[derive(Clone, Debug)]
pub struct Layout<V = Node> {
    positions: FxHashMap<V, Position>,
    dimension: Dimension,
}

impl<V: Vertex> Layout<V> {
    /// Builds a layout from raw coordinate lists. All lists must have the same
    /// length, either 2 or 3. An empty input yields an empty planar layout.
    pub fn try_from_coordinates<I, C>(coordinates: I) -> Result<Self, LayoutError>
    where
        I: IntoIterator<Item = (V, C)>,
        C: AsRef<[f64]>,
    {
        let mut positions = FxHashMap::default();
        let mut dimension = None;

        for (u, coords) in coordinates {
            let (pos, dim) = match *coords.as_ref() {
                [x, y] => (Position([x, y, 0.0]), Dimension::Planar),
                [x, y, z] => (Position([x, y, z]), Dimension::Spatial),
                ref other => return Err(LayoutError::UnsupportedDimension(other.len())),
            };

            if *dimension.get_or_insert(dim) != dim {
                return Err(LayoutError::MixedDimensions);
            }

            positions.insert(u, pos);
        }

        Ok(Self {
            positions,
            dimension: dimension.unwrap_or(Dimension::Planar),
        })
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    pub fn position_of(&self, u: V) -> Option<Position> {
        self.positions.get(&u).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Returns *true* if every vertex of `vertices` has a position
    pub fn covers<'a>(&self, mut vertices: impl Iterator<Item = &'a V>) -> bool {
        vertices.all(|u| self.positions.contains_key(u))
    }

    pub fn vertices(&self) -> impl Iterator<Item = V> + '_ {
        self.positions.keys().copied()
    }

    /// Positions in ascending vertex order
    pub fn sorted_positions(&self) -> Vec<(V, Position)> {
        self.positions
            .iter()
            .map(|(&u, &p)| (u, p))
            .sorted_by_key(|&(u, _)| u)
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn planar_positions_get_zero_depth() {
        let layout =
            Layout::try_from_coordinates([(1u32, vec![0.5, 1.0]), (2, vec![-1.0, 2.0])]).unwrap();

        assert_eq!(layout.dimension(), Dimension::Planar);
        assert_eq!(layout.position_of(1), Some(Position([0.5, 1.0, 0.0])));
        assert_eq!(layout.position_of(3), None);
        assert!(layout.covers([1, 2].iter()));
        assert!(!layout.covers([1, 2, 3].iter()));
        assert_eq!(
            layout.sorted_positions().into_iter().map(|(u, _)| u).collect_vec(),
            vec![1, 2]
        );
    }

    #[test]
    fn spatial_positions() {
        let layout = Layout::try_from_coordinates([(0u32, [1.0, 2.0, 3.0])]).unwrap();
        assert_eq!(layout.dimension(), Dimension::Spatial);
        assert_eq!(layout.position_of(0), Some(Position([1.0, 2.0, 3.0])));
    }

    #[test]
    fn rejects_bad_dimensions() {
        assert_eq!(
            Layout::try_from_coordinates([(0u32, vec![1.0])]).unwrap_err(),
            LayoutError::UnsupportedDimension(1)
        );
        assert_eq!(
            Layout::try_from_coordinates([(0u32, vec![1.0, 2.0]), (1, vec![1.0, 2.0, 3.0])])
                .unwrap_err(),
            LayoutError::MixedDimensions
        );
    }
}
