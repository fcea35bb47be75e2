use std::time::Duration;

use crate::{
    core::{Board, Piece, ShapeKind},
    engine::{GameStats, ShapeSource, SourceSeed},
};

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    /// A piece is falling and input is accepted.
    Playing,
    /// The stack reached the spawn area. Only reset leaves this state.
    GameOver,
}

/// One game of falling blocks: the board, the falling piece, the upcoming
/// piece, and the score.
///
/// The session is driven by [`step`](Self::step) for gravity and by the
/// input methods for moves. All of it is pure state manipulation, so a
/// session can be simulated without any frontend attached.
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    current_piece: Piece,
    next_kind: ShapeKind,
    source: ShapeSource,
    seed: SourceSeed,
    stats: GameStats,
    state: SessionState,
    gravity_timer: Duration,
    high_score: u64,
    initial_high_score: u64,
}

impl GameSession {
    /// Creates a session from a seed and the high score to beat.
    #[must_use]
    pub fn new(seed: SourceSeed, high_score: u64) -> Self {
        let mut source = ShapeSource::new(seed);
        let current_piece = Piece::spawn(source.next_kind());
        let next_kind = source.next_kind();
        Self {
            board: Board::new(),
            current_piece,
            next_kind,
            source,
            seed,
            stats: GameStats::default(),
            state: SessionState::Playing,
            gravity_timer: Duration::ZERO,
            high_score,
            initial_high_score: high_score,
        }
    }

    /// The playfield with all locked blocks.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The falling piece.
    #[must_use]
    pub fn current_piece(&self) -> &Piece {
        &self.current_piece
    }

    /// Kind of the piece that spawns after the current one locks.
    #[must_use]
    pub fn next_kind(&self) -> ShapeKind {
        self.next_kind
    }

    /// Score and progression counters.
    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    /// Lifecycle state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Seed this session was created with.
    #[must_use]
    pub fn seed(&self) -> SourceSeed {
        self.seed
    }

    /// Best score seen so far, this game included.
    #[must_use]
    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    /// Returns whether this game beat the high score it started with.
    #[must_use]
    pub fn is_new_high(&self) -> bool {
        self.high_score > self.initial_high_score
    }

    /// Moves the falling piece one column left or right.
    ///
    /// Returns whether the piece moved; a blocked move leaves it in place.
    pub fn move_piece(&mut self, dx: i32) -> bool {
        if self.state.is_game_over() {
            return false;
        }
        let moved = self.current_piece.offset(dx, 0);
        if self.board.is_colliding(&moved) {
            return false;
        }
        self.current_piece = moved;
        true
    }

    /// Rotates the falling piece one quarter turn clockwise.
    ///
    /// If the rotated piece collides in place, a one-column kick to the
    /// right and then to the left is tried before giving up. Returns whether
    /// the rotation stuck.
    pub fn rotate_piece(&mut self) -> bool {
        if self.state.is_game_over() {
            return false;
        }
        let rotated = self.current_piece.rotated_clockwise();
        for kicked in [rotated, rotated.offset(1, 0), rotated.offset(-1, 0)] {
            if !self.board.is_colliding(&kicked) {
                self.current_piece = kicked;
                return true;
            }
        }
        false
    }

    /// Moves the falling piece one row down.
    ///
    /// Returns whether the piece moved. A blocked drop is a plain failed
    /// move; locking only ever happens through gravity or a hard drop.
    pub fn soft_drop(&mut self) -> bool {
        if self.state.is_game_over() {
            return false;
        }
        let dropped = self.current_piece.offset(0, 1);
        if self.board.is_colliding(&dropped) {
            return false;
        }
        self.current_piece = dropped;
        true
    }

    /// Drops the falling piece to the bottom of its column and locks it.
    pub fn hard_drop(&mut self) {
        if self.state.is_game_over() {
            return;
        }
        while !self.board.is_colliding(&self.current_piece.offset(0, 1)) {
            self.current_piece = self.current_piece.offset(0, 1);
        }
        self.lock_and_advance();
    }

    /// Advances gravity by the elapsed wall time.
    ///
    /// When the accumulated time crosses the current fall interval the
    /// accumulator resets to zero and the piece descends one row, locking
    /// when it cannot. At most one descent happens per call.
    pub fn step(&mut self, dt: Duration) {
        if self.state.is_game_over() {
            return;
        }
        self.gravity_timer += dt;
        if self.gravity_timer >= self.stats.fall_interval() {
            self.gravity_timer = Duration::ZERO;
            self.descend();
        }
    }

    /// Starts a fresh game with a new random seed, keeping the high score.
    pub fn reset(&mut self) {
        *self = Self::new(SourceSeed::random(), self.high_score);
    }

    fn descend(&mut self) {
        let dropped = self.current_piece.offset(0, 1);
        if self.board.is_colliding(&dropped) {
            self.lock_and_advance();
        } else {
            self.current_piece = dropped;
        }
    }

    fn lock_and_advance(&mut self) {
        self.board.fill_piece(&self.current_piece);
        let cleared = self.board.clear_lines();
        self.stats.record_lock(cleared);

        self.current_piece = Piece::spawn(self.next_kind);
        self.next_kind = self.source.next_kind();
        if self.board.is_colliding(&self.current_piece) {
            self.state = SessionState::GameOver;
            self.high_score = self.high_score.max(self.stats.score());
        }
    }

    #[cfg(test)]
    pub(crate) fn set_current_piece(&mut self, piece: Piece) {
        self.current_piece = piece;
    }
}
