use log::debug;

use crate::{
    engine::{GateState, MoveEngine},
    moves::Move,
};

/// Undo and redo stacks, plus the log of every move ever applied.
///
/// The stacks are the editable history of the current session. The log is
/// what gets saved: it grows on every apply, including scrambles, undos and
/// redos, and is never popped.
#[derive(Debug, Clone, Default)]
pub struct HistoryManager {
    undo: Vec<Move>,
    redo: Vec<Move>,
    log: Vec<Move>,
}

impl HistoryManager {
    pub fn new() -> HistoryManager {
        HistoryManager::default()
    }

    /// Push a fresh user move. Whatever was undone before it can no longer
    /// be redone.
    pub fn record_user_move(&mut self, move_: Move) {
        self.undo.push(move_);
        self.redo.clear();
    }

    pub(crate) fn append_to_log(&mut self, move_: Move) {
        self.log.push(move_);
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Moves that can be undone, oldest first.
    pub fn undo_moves(&self) -> &[Move] {
        &self.undo
    }

    /// Inverses stored by undo, oldest first.
    pub fn redo_moves(&self) -> &[Move] {
        &self.redo
    }

    /// Every move applied so far, in order.
    pub fn log(&self) -> &[Move] {
        &self.log
    }
}

impl MoveEngine {
    /// Take back the most recent user move by applying its inverse.
    ///
    /// Returns the move that was taken back, or `None` if there is nothing to
    /// undo or a rotation is still playing. The solved check runs as usual,
    /// so undoing into a solved cube is noticed.
    pub fn undo(&mut self) -> Option<Move> {
        if self.state() != GateState::Idle {
            return None;
        }

        let move_ = self.history.undo.pop()?;
        let inverse = move_.inverse();
        self.apply_unrecorded(inverse);
        self.history.redo.push(inverse);

        debug!("Undid {move_}");
        Some(move_)
    }

    /// Re-apply the most recently undone move.
    ///
    /// Returns the re-applied move, or `None` if there is nothing to redo or a
    /// rotation is still playing.
    pub fn redo(&mut self) -> Option<Move> {
        if self.state() != GateState::Idle {
            return None;
        }

        let stored = self.history.redo.pop()?;
        let move_ = stored.inverse();
        self.apply_unrecorded(move_);
        self.history.undo.push(move_);

        debug!("Redid {move_}");
        Some(move_)
    }

    fn apply_unrecorded(&mut self, move_: Move) {
        // Anything on the stacks was applied to this grid before, so it is in range.
        let applied = self.apply(move_, false, true);
        debug_assert!(applied.is_ok_and(|result| result.applied));
    }
}
