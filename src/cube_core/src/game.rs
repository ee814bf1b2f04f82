use std::time::Duration;

use log::info;

use crate::{
    CubeError,
    engine::{ApplyResult, GateState, MoveEngine},
    moves::Move,
    session::{SessionData, SessionStore},
    timer::GameTimer,
};

/// One play session: the engine plus the clock, with the rules of the game
/// on top. Once the cube is solved the session is over and further moves are
/// ignored.
#[derive(Debug, Clone)]
pub struct Game {
    engine: MoveEngine,
    timer: GameTimer,
}

impl Game {
    /// Start a new game on a freshly scrambled cube.
    ///
    /// # Errors
    ///
    /// `InvalidDimension` if the cube cannot be created.
    pub fn new(dimension: usize, scramble_moves: usize) -> Result<Game, CubeError> {
        Game::new_with_rng(dimension, scramble_moves, &mut fastrand::Rng::new())
    }

    /// Like [`Game::new`], scrambling with moves drawn from `rng`.
    ///
    /// # Errors
    ///
    /// `InvalidDimension` if the cube cannot be created.
    pub fn new_with_rng(
        dimension: usize,
        scramble_moves: usize,
        rng: &mut fastrand::Rng,
    ) -> Result<Game, CubeError> {
        let mut engine = MoveEngine::new(dimension)?;
        engine.scramble_with(rng, scramble_moves);
        info!("Started a new game of dimension {dimension}");

        Ok(Game {
            engine,
            timer: GameTimer::default(),
        })
    }

    /// Resume a saved session.
    ///
    /// # Errors
    ///
    /// See [`SessionStore::rebuild`].
    pub fn resume(data: &SessionData) -> Result<Game, CubeError> {
        Ok(Game {
            engine: SessionStore::rebuild(data)?,
            timer: GameTimer::new(data.elapsed_seconds),
        })
    }

    pub fn engine(&self) -> &MoveEngine {
        &self.engine
    }

    pub fn timer(&self) -> &GameTimer {
        &self.timer
    }

    pub fn is_won(&self) -> bool {
        self.engine.solved()
    }

    /// Play a move on behalf of the player.
    ///
    /// # Errors
    ///
    /// `InvalidMove` if the slice index is out of range.
    pub fn user_move(&mut self, move_: Move) -> Result<ApplyResult, CubeError> {
        if self.is_won() {
            return Ok(ApplyResult {
                applied: false,
                solved: true,
            });
        }

        let result = self.engine.apply(move_, true, true)?;
        self.after_move();
        Ok(result)
    }

    /// Claim the gate while the input layer plays back a rotation. See
    /// [`MoveEngine::begin_rotation`].
    pub fn begin_rotation(&mut self) -> bool {
        !self.is_won() && self.engine.begin_rotation()
    }

    /// Finish a rotation claimed with [`Game::begin_rotation`]. Ignored once
    /// the cube is solved.
    ///
    /// # Errors
    ///
    /// `InvalidMove` if the slice index is out of range.
    pub fn finish_rotation(&mut self, move_: Move) -> Result<ApplyResult, CubeError> {
        if self.is_won() {
            return Ok(ApplyResult {
                applied: false,
                solved: true,
            });
        }

        let result = self.engine.finish_rotation(move_, true, true)?;
        self.after_move();
        Ok(result)
    }

    pub fn undo(&mut self) -> Option<Move> {
        if self.is_won() {
            return None;
        }
        let undone = self.engine.undo();
        self.after_move();
        undone
    }

    pub fn redo(&mut self) -> Option<Move> {
        if self.is_won() {
            return None;
        }
        let redone = self.engine.redo();
        self.after_move();
        redone
    }

    fn after_move(&mut self) {
        if self.is_won() && self.timer.is_running() {
            self.timer.pause();
            info!("Solved in {}", self.timer.describe());
        }
    }

    /// Advance the clock. Time only counts while the game is being played.
    pub fn tick(&mut self, delta: Duration) {
        if self.engine.state() != GateState::ScramblingInProgress && !self.is_won() {
            self.timer.tick(delta);
        }
    }

    pub fn session_data(&self) -> SessionData {
        SessionData {
            dimension: self.engine.dimension(),
            elapsed_seconds: self.timer.elapsed_seconds(),
            moves: self.engine.history().log().to_vec(),
        }
    }

    /// Save the session, replacing any previous save in `store`.
    ///
    /// # Errors
    ///
    /// `Io` if the save cannot be written.
    pub fn save(&self, store: &SessionStore) -> Result<(), CubeError> {
        store.save(&self.session_data())
    }
}
