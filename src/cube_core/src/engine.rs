use log::{Level, debug, info, log_enabled, trace};

use crate::{
    CubeError,
    grid::CubeGrid,
    history::HistoryManager,
    moves::{Angle, Axis, Move},
    symmetry::SymmetryTable,
};

/// Whether the engine can accept a move right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GateState {
    #[default]
    Idle,
    /// A rotation has been started and not yet finished. Further move
    /// requests are ignored until it is.
    RotationInProgress,
    /// A scramble owns the engine. Moves applied meanwhile are neither
    /// recorded nor checked for a solve.
    ScramblingInProgress,
}

/// The outcome of [`MoveEngine::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ApplyResult {
    /// False when the request was dropped because a rotation was already in
    /// progress.
    pub applied: bool,
    pub solved: bool,
}

impl ApplyResult {
    const REJECTED: ApplyResult = ApplyResult {
        applied: false,
        solved: false,
    };
}

/// Applies moves to a grid and keeps the history and solved flag in step
/// with it.
#[derive(Debug, Clone)]
pub struct MoveEngine {
    grid: CubeGrid,
    symmetry: SymmetryTable,
    state: GateState,
    solved: bool,
    pub(crate) history: HistoryManager,
}

impl MoveEngine {
    /// Create an engine over a solved grid of `dimension`.
    ///
    /// # Errors
    ///
    /// `InvalidDimension` if the grid cannot be created.
    pub fn new(dimension: usize) -> Result<MoveEngine, CubeError> {
        Ok(MoveEngine {
            grid: CubeGrid::new(dimension)?,
            symmetry: SymmetryTable::new(dimension)?,
            state: GateState::Idle,
            solved: false,
            history: HistoryManager::new(),
        })
    }

    /// Create an engine of `dimension` and apply every move of `log` to it,
    /// unrecorded and unchecked. The undo and redo stacks start out empty and
    /// the replayed moves become the start of the new log.
    ///
    /// # Errors
    ///
    /// `InvalidDimension` for a bad dimension and `InvalidMove` for a move
    /// that does not fit the grid.
    pub fn replay(dimension: usize, log: &[Move]) -> Result<MoveEngine, CubeError> {
        let mut engine = MoveEngine::new(dimension)?;
        for &move_ in log {
            engine.apply(move_, false, false)?;
        }
        info!("Replayed {} moves onto a cube of dimension {dimension}", log.len());
        Ok(engine)
    }

    pub fn dimension(&self) -> usize {
        self.grid.dimension()
    }

    pub fn grid(&self) -> &CubeGrid {
        &self.grid
    }

    pub fn symmetry(&self) -> &SymmetryTable {
        &self.symmetry
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    /// The solved flag from the most recent apply.
    pub fn solved(&self) -> bool {
        self.solved
    }

    fn validate(&self, move_: Move) -> Result<(), CubeError> {
        let dimension = self.dimension();
        if move_.index >= dimension {
            return Err(CubeError::InvalidMove { move_, dimension });
        }
        Ok(())
    }

    /// Apply a single move.
    ///
    /// The move always lands in the log. It is pushed onto the undo stack
    /// only if `record_as_user_move` is set, it actually turns something and
    /// no scramble is running. The solved check only runs if `check_solved`
    /// is set and no scramble is running.
    ///
    /// A request arriving while another rotation is in progress is dropped
    /// and reported with `applied: false`.
    ///
    /// # Errors
    ///
    /// `InvalidMove` if the slice index is out of range. The engine is left
    /// untouched.
    pub fn apply(
        &mut self,
        move_: Move,
        record_as_user_move: bool,
        check_solved: bool,
    ) -> Result<ApplyResult, CubeError> {
        if self.state == GateState::RotationInProgress {
            debug!("Dropping {move_}, a rotation is already in progress");
            return Ok(ApplyResult::REJECTED);
        }
        self.validate(move_)?;

        let resume = self.state;
        self.state = GateState::RotationInProgress;
        Ok(self.complete(move_, record_as_user_move, check_solved, resume))
    }

    /// Claim the gate for a rotation whose playback is driven elsewhere.
    /// Returns false if the engine is busy.
    ///
    /// Every successful call must be followed by [`MoveEngine::finish_rotation`],
    /// with a zero-angle move if the rotation ended up not turning anything.
    pub fn begin_rotation(&mut self) -> bool {
        if self.state != GateState::Idle {
            return false;
        }
        self.state = GateState::RotationInProgress;
        true
    }

    /// Apply the move of a rotation started with
    /// [`MoveEngine::begin_rotation`] and release the gate. Without a
    /// preceding `begin_rotation` this behaves like [`MoveEngine::apply`].
    ///
    /// # Errors
    ///
    /// `InvalidMove` if the slice index is out of range. The gate stays
    /// claimed so the caller can finish with a valid move.
    pub fn finish_rotation(
        &mut self,
        move_: Move,
        record_as_user_move: bool,
        check_solved: bool,
    ) -> Result<ApplyResult, CubeError> {
        if self.state != GateState::RotationInProgress {
            return self.apply(move_, record_as_user_move, check_solved);
        }
        self.validate(move_)?;
        Ok(self.complete(move_, record_as_user_move, check_solved, GateState::Idle))
    }

    fn complete(
        &mut self,
        move_: Move,
        record_as_user_move: bool,
        check_solved: bool,
        resume: GateState,
    ) -> ApplyResult {
        debug_assert_eq!(self.state, GateState::RotationInProgress);
        let scrambling = resume == GateState::ScramblingInProgress;

        // Validated by the caller
        self.grid.permute_slice(move_.axis, move_.index, move_.angle);

        self.solved = check_solved && !scrambling && self.symmetry.is_solved(&self.grid);

        if record_as_user_move && !move_.is_zero() && !scrambling {
            self.history.record_user_move(move_);
        }
        self.history.append_to_log(move_);

        self.state = resume;

        debug!("Applied {move_}");
        if log_enabled!(Level::Trace) {
            trace!("Grid state:\n{}", self.grid.snapshot());
        }

        ApplyResult {
            applied: true,
            solved: self.solved,
        }
    }

    /// Scramble with `count` random quarter turns. See
    /// [`MoveEngine::scramble_with`].
    pub fn scramble(&mut self, count: usize) -> Vec<Move> {
        self.scramble_with(&mut fastrand::Rng::new(), count)
    }

    /// Apply `count` random quarter turns drawn from `rng`. They are logged
    /// but can never be undone. Nothing happens unless the engine is idle.
    ///
    /// Returns the moves that were applied.
    pub fn scramble_with(&mut self, rng: &mut fastrand::Rng, count: usize) -> Vec<Move> {
        if self.state != GateState::Idle {
            debug!("Not scrambling, the engine is busy");
            return Vec::new();
        }

        info!("Scrambling with {count} moves");
        self.state = GateState::ScramblingInProgress;

        let dimension = self.dimension();
        let moves = (0..count)
            .map(|_| {
                let axis = Axis::ALL[rng.usize(..Axis::ALL.len())];
                let index = rng.usize(..dimension);
                let angle = if rng.bool() {
                    Angle::Clockwise
                } else {
                    Angle::CounterClockwise
                };
                let move_ = Move::new(axis, index, angle);

                // In range by construction
                let result = self.apply(move_, false, false);
                debug_assert!(result.is_ok_and(|result| result.applied));
                move_
            })
            .collect();

        self.state = GateState::Idle;
        self.solved = false;
        moves
    }
}
