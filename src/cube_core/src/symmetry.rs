use std::collections::HashSet;

use log::debug;

use crate::{
    CubeError,
    grid::{CubeGrid, Snapshot},
    moves::{Angle, Axis},
};

/// Number of proper rotations of a cube.
pub const ROTATION_COUNT: usize = 24;

/// Every labeling a solved cube can have, one per way of holding it.
///
/// A scrambled cube is solved when it matches any of these exactly, whichever
/// face ends up pointing up.
#[derive(Debug, Clone)]
pub struct SymmetryTable {
    references: Vec<Snapshot>,
}

impl SymmetryTable {
    /// Enumerate the solved references for a fresh grid of `dimension`.
    ///
    /// Whole-cube turns about X with nested whole-cube turns about Y are
    /// recorded first. X and Y turns alone only reach sixteen of the
    /// orientations along that path, so the set is then closed under
    /// whole-cube turns about every axis until nothing new appears.
    ///
    /// # Errors
    ///
    /// `InvalidDimension` if a grid of `dimension` cannot be created.
    pub fn new(dimension: usize) -> Result<SymmetryTable, CubeError> {
        let mut grid = CubeGrid::new(dimension)?;

        let mut references = Vec::with_capacity(ROTATION_COUNT);
        let mut seen = HashSet::with_capacity(ROTATION_COUNT);
        let mut record = |grid: &CubeGrid| {
            let snapshot = grid.snapshot();
            if seen.insert(snapshot.clone()) {
                references.push(snapshot);
            }
        };

        for _ in 0..4 {
            grid.rotate_whole(Axis::X, Angle::Clockwise);
            record(&grid);

            for _ in 0..4 {
                grid.rotate_whole(Axis::Y, Angle::Clockwise);
                record(&grid);
            }

            record(&grid);
        }

        // Close under the full generator set
        let mut frontier = 0;
        while frontier < references.len() {
            let start = CubeGrid::from_snapshot(&references[frontier]);
            frontier += 1;

            for axis in Axis::ALL {
                let mut turned = start.clone();
                turned.rotate_whole(axis, Angle::Clockwise);
                let snapshot = turned.snapshot();
                if seen.insert(snapshot.clone()) {
                    references.push(snapshot);
                }
            }
        }

        debug_assert_eq!(references.len(), ROTATION_COUNT);
        debug!(
            "Computed {} solved references for a {dimension}x{dimension}x{dimension} cube",
            references.len()
        );

        Ok(SymmetryTable { references })
    }

    /// Whether `grid` matches one of the solved references cell for cell.
    pub fn is_solved(&self, grid: &CubeGrid) -> bool {
        let snapshot = grid.snapshot();
        self.references.iter().any(|reference| *reference == snapshot)
    }

    pub fn references(&self) -> &[Snapshot] {
        &self.references
    }

    pub fn len(&self) -> usize {
        self.references.len()
    }

    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }
}
