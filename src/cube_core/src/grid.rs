use std::fmt::{self, Display};

use itertools::{Itertools, iproduct};

use crate::{
    CubeError,
    moves::{Angle, Axis},
};

/// The largest dimension a grid may be created with. The game only offers
/// 2 through 6; the bound exists so a bogus save file cannot allocate
/// unbounded memory.
pub const MAX_DIMENSION: usize = 32;

/// A cell of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

impl Coord {
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Coord { x, y, z }
    }

    /// The component along `axis`.
    pub fn along(self, axis: Axis) -> usize {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Where this cell ends up after a quarter turn of its slice about
    /// `axis`. The two orthogonal components are taken in cyclic order
    /// `(y, z)`, `(z, x)`, `(x, y)` and a clockwise turn maps `(a, b)` to
    /// `(b, n - 1 - a)`.
    fn turned(self, axis: Axis, angle: Angle, n: usize) -> Coord {
        let Coord { x, y, z } = self;
        let last = n - 1;
        match (axis, angle) {
            (_, Angle::Zero) => self,
            (Axis::X, Angle::Clockwise) => Coord::new(x, z, last - y),
            (Axis::X, Angle::CounterClockwise) => Coord::new(x, last - z, y),
            (Axis::Y, Angle::Clockwise) => Coord::new(last - z, y, x),
            (Axis::Y, Angle::CounterClockwise) => Coord::new(z, y, last - x),
            (Axis::Z, Angle::Clockwise) => Coord::new(y, last - x, z),
            (Axis::Z, Angle::CounterClockwise) => Coord::new(last - y, x, z),
        }
    }
}

impl Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.z)
    }
}

/// The identity of a cubie: the coordinate it occupied when the grid was
/// created. It is only a label and carries no orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CubieId(Coord);

impl CubieId {
    pub fn home(self) -> Coord {
        self.0
    }
}

impl Display for CubieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A read-only copy of every cell's label, compared cell by cell by the
/// solved check.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Snapshot {
    dimension: usize,
    cells: Box<[CubieId]>,
}

impl Snapshot {
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn get(&self, coord: Coord) -> Option<CubieId> {
        cell_index(self.dimension, coord).map(|i| self.cells[i])
    }

    /// Every `(coordinate, label)` pair, in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, CubieId)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &cubie)| (coord_of(self.dimension, i), cubie))
    }
}

impl Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // One line per (y, z) row
        for row in self.cells.chunks(self.dimension) {
            writeln!(f, "{}", row.iter().join(" "))?;
        }
        Ok(())
    }
}

/// The N×N×N arrangement of cubies.
///
/// Cells are stored x-major within y within z, so index
/// `x + n * (y + n * z)` holds the cubie currently at `(x, y, z)`. The
/// storage is always a permutation of the labels assigned by [`CubeGrid::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CubeGrid {
    dimension: usize,
    cells: Box<[CubieId]>,
}

fn cell_index(n: usize, coord: Coord) -> Option<usize> {
    (coord.x < n && coord.y < n && coord.z < n).then(|| coord.x + n * (coord.y + n * coord.z))
}

fn coord_of(n: usize, index: usize) -> Coord {
    Coord::new(index % n, (index / n) % n, index / (n * n))
}

impl CubeGrid {
    /// Create a solved grid where every cubie sits at its home coordinate.
    ///
    /// # Errors
    ///
    /// `InvalidDimension` if `dimension` is below 2 or above
    /// [`MAX_DIMENSION`].
    pub fn new(dimension: usize) -> Result<CubeGrid, CubeError> {
        if !(2..=MAX_DIMENSION).contains(&dimension) {
            return Err(CubeError::InvalidDimension { dimension });
        }

        let cells = iproduct!(0..dimension, 0..dimension, 0..dimension)
            .map(|(z, y, x)| CubieId(Coord::new(x, y, z)))
            .collect();

        Ok(CubeGrid { dimension, cells })
    }

    /// Restore the arrangement captured by [`CubeGrid::snapshot`].
    pub fn from_snapshot(snapshot: &Snapshot) -> CubeGrid {
        CubeGrid {
            dimension: snapshot.dimension,
            cells: snapshot.cells.clone(),
        }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn cubie_at(&self, coord: Coord) -> Option<CubieId> {
        cell_index(self.dimension, coord).map(|i| self.cells[i])
    }

    /// The current coordinate of `cubie`, if it belongs to this grid.
    pub fn position_of(&self, cubie: CubieId) -> Option<Coord> {
        self.cells
            .iter()
            .position(|&c| c == cubie)
            .map(|i| coord_of(self.dimension, i))
    }

    /// The N² coordinates on the plane `axis = index`.
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` if `index` is not below the dimension.
    pub fn slice_indices(&self, axis: Axis, index: usize) -> Result<Vec<Coord>, CubeError> {
        let n = self.dimension;
        if index >= n {
            return Err(CubeError::IndexOutOfRange {
                index,
                dimension: n,
            });
        }

        Ok(self.plane(axis, index))
    }

    fn plane(&self, axis: Axis, index: usize) -> Vec<Coord> {
        let n = self.dimension;
        iproduct!(0..n, 0..n)
            .map(|(a, b)| match axis {
                Axis::X => Coord::new(index, a, b),
                Axis::Y => Coord::new(a, index, b),
                Axis::Z => Coord::new(a, b, index),
            })
            .collect()
    }

    /// Turn one slice a quarter turn. This only moves labels between cells
    /// of the slice; no cubie is created or dropped.
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` if `index` is not below the dimension.
    pub fn rotate_slice(&mut self, axis: Axis, index: usize, angle: Angle) -> Result<(), CubeError> {
        if index >= self.dimension {
            return Err(CubeError::IndexOutOfRange {
                index,
                dimension: self.dimension,
            });
        }
        self.permute_slice(axis, index, angle);
        Ok(())
    }

    /// [`CubeGrid::rotate_slice`] for an index the caller has already
    /// checked against the dimension.
    pub(crate) fn permute_slice(&mut self, axis: Axis, index: usize, angle: Angle) {
        debug_assert!(index < self.dimension);
        if angle == Angle::Zero {
            return;
        }

        let n = self.dimension;
        let slice = self.plane(axis, index);
        let before = slice
            .iter()
            .map(|&coord| self.cells[coord.x + n * (coord.y + n * coord.z)])
            .collect_vec();

        for (&from, cubie) in slice.iter().zip(before) {
            let to = from.turned(axis, angle, n);
            debug_assert_eq!(to.along(axis), index);
            self.cells[to.x + n * (to.y + n * to.z)] = cubie;
        }

        debug_assert!(self.is_bijection());
    }

    /// Turn every slice along `axis`, which reorients the whole cube.
    pub fn rotate_whole(&mut self, axis: Axis, angle: Angle) {
        for index in 0..self.dimension {
            self.permute_slice(axis, index, angle);
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            dimension: self.dimension,
            cells: self.cells.clone(),
        }
    }

    /// Whether every label appears exactly once.
    pub fn is_bijection(&self) -> bool {
        let n = self.dimension;
        let mut seen = vec![false; self.cells.len()];
        self.cells.len() == n * n * n
            && self.cells.iter().all(|cubie| {
                let Some(i) = cell_index(n, cubie.home()) else {
                    return false;
                };
                !std::mem::replace(&mut seen[i], true)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_dimensions() {
        assert!(matches!(
            CubeGrid::new(1),
            Err(CubeError::InvalidDimension { dimension: 1 })
        ));
        assert!(matches!(
            CubeGrid::new(MAX_DIMENSION + 1),
            Err(CubeError::InvalidDimension { .. })
        ));
        assert!(CubeGrid::new(2).is_ok());
    }

    #[test]
    fn labels_match_home_coordinates() {
        let grid = CubeGrid::new(3).unwrap();
        for (coord, cubie) in grid.snapshot().iter() {
            assert_eq!(coord, cubie.home());
        }
        assert_eq!(grid.cubie_at(Coord::new(2, 1, 0)).unwrap().to_string(), "2,1,0");
        assert_eq!(grid.cubie_at(Coord::new(3, 0, 0)), None);
    }

    #[test]
    fn slice_indices_cover_the_plane() {
        let grid = CubeGrid::new(4).unwrap();
        let slice = grid.slice_indices(Axis::Y, 2).unwrap();
        assert_eq!(slice.len(), 16);
        assert!(slice.iter().all(|coord| coord.y == 2));
        assert!(slice.iter().all_unique());

        assert!(matches!(
            grid.slice_indices(Axis::Z, 4),
            Err(CubeError::IndexOutOfRange {
                index: 4,
                dimension: 4
            })
        ));
    }

    #[test]
    fn clockwise_x_matches_closed_form() {
        let mut grid = CubeGrid::new(3).unwrap();
        let before = grid.snapshot();
        grid.rotate_slice(Axis::X, 0, Angle::Clockwise).unwrap();

        // (y, z) -> (z, n - 1 - y)
        for y in 0..3 {
            for z in 0..3 {
                assert_eq!(
                    grid.cubie_at(Coord::new(0, z, 2 - y)),
                    before.get(Coord::new(0, y, z))
                );
            }
        }

        // Other slices are untouched
        for coord in grid.slice_indices(Axis::X, 1).unwrap() {
            assert_eq!(grid.cubie_at(coord), before.get(coord));
        }
    }

    #[test]
    fn four_quarter_turns_are_identity() {
        for n in 2..=6 {
            for axis in Axis::ALL {
                for index in 0..n {
                    let mut grid = CubeGrid::new(n).unwrap();
                    let solved = grid.snapshot();
                    for turn in 0..4 {
                        grid.rotate_slice(axis, index, Angle::Clockwise).unwrap();
                        assert!(grid.is_bijection());
                        assert_eq!(turn == 3, grid.snapshot() == solved);
                    }
                }
            }
        }
    }

    #[test]
    fn turn_then_inverse_is_identity() {
        let mut grid = CubeGrid::new(5).unwrap();
        grid.rotate_slice(Axis::Z, 3, Angle::Clockwise).unwrap();
        let reference = grid.snapshot();
        for axis in Axis::ALL {
            grid.rotate_slice(axis, 1, Angle::CounterClockwise).unwrap();
            grid.rotate_slice(axis, 1, Angle::Clockwise).unwrap();
            assert_eq!(grid.snapshot(), reference);
        }
    }

    #[test]
    fn zero_angle_changes_nothing() {
        let mut grid = CubeGrid::new(3).unwrap();
        let before = grid.snapshot();
        grid.rotate_slice(Axis::Y, 1, Angle::Zero).unwrap();
        assert_eq!(grid.snapshot(), before);
        assert!(grid.rotate_slice(Axis::Y, 3, Angle::Zero).is_err());
    }

    #[test]
    fn whole_cube_turn_is_every_slice_turned() {
        for axis in Axis::ALL {
            let mut whole = CubeGrid::new(4).unwrap();
            whole.rotate_whole(axis, Angle::CounterClockwise);

            let mut sliced = CubeGrid::new(4).unwrap();
            for index in 0..4 {
                sliced.rotate_slice(axis, index, Angle::CounterClockwise).unwrap();
            }
            assert_eq!(whole.snapshot(), sliced.snapshot());
        }
    }

    #[test]
    fn out_of_range_turn_leaves_the_grid_alone() {
        let mut grid = CubeGrid::new(3).unwrap();
        grid.rotate_slice(Axis::X, 2, Angle::Clockwise).unwrap();
        let before = grid.snapshot();
        assert!(matches!(
            grid.rotate_slice(Axis::Z, 3, Angle::Clockwise),
            Err(CubeError::IndexOutOfRange {
                index: 3,
                dimension: 3
            })
        ));
        assert_eq!(grid.snapshot(), before);
    }

    #[test]
    fn position_of_tracks_cubies() {
        let mut grid = CubeGrid::new(3).unwrap();
        let corner = grid.cubie_at(Coord::new(0, 0, 0)).unwrap();
        grid.rotate_slice(Axis::X, 0, Angle::Clockwise).unwrap();
        assert_eq!(grid.position_of(corner), Some(Coord::new(0, 0, 2)));
    }
}
