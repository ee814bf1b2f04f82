#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! The kinematics core of an N×N×N twisty cube: slice rotations over a grid
//! of labeled cubies, solved detection under every orientation of the cube,
//! undo/redo and replayable sessions.

use thiserror::Error;

pub mod engine;
pub mod game;
pub mod grid;
pub mod history;
pub mod moves;
pub mod session;
pub mod symmetry;
pub mod timer;

pub use engine::{ApplyResult, GateState, MoveEngine};
pub use game::Game;
pub use grid::{Coord, CubeGrid, CubieId, MAX_DIMENSION, Snapshot};
pub use history::HistoryManager;
pub use moves::{Angle, Axis, Move};
pub use session::{SESSION_VERSION, SessionData, SessionStore};
pub use symmetry::SymmetryTable;
pub use timer::GameTimer;

#[derive(Error, Debug)]
pub enum CubeError {
    #[error("A cube must have a dimension between 2 and {max}, got {dimension}", max = MAX_DIMENSION)]
    InvalidDimension { dimension: usize },
    #[error("Slice index {index} is out of range for a cube of dimension {dimension}")]
    IndexOutOfRange { index: usize, dimension: usize },
    #[error("The move {move_} does not exist on a cube of dimension {dimension}")]
    InvalidMove { move_: Move, dimension: usize },
    #[error("Angles must be 90, -90 or 0 degrees, got {0}")]
    InvalidAngle(f64),
    #[error("Unknown axis {0:?}, expected X, Y or Z")]
    InvalidAxis(String),
    #[error("Cannot read {0:?} as a move, expected something like X0, Y2' or Z1_")]
    InvalidNotation(String),
    #[error("Could not access the save file: {0}")]
    Io(#[from] std::io::Error),
    #[error("The save file is malformed: {0}")]
    Format(String),
}
