use blockfall_engine::{Board, Piece, Rotation, ShapeKind};

use crate::evaluator::{TOPOUT_PENALTY, evaluate_board};

/// Weight of the lookahead term in the placement objective.
const LOOKAHEAD_WEIGHT: f64 = 0.5;

/// A target resting position for a piece: the rotation state to reach and
/// the column of the bounding box's left edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Rotation state, counted from the spawn orientation.
    pub rotation: Rotation,
    /// Target column of the bounding box's left edge.
    pub x: i32,
}

/// Enumerates every reachable resting position of `kind` on `board`,
/// yielding the board with the piece locked in place.
///
/// Positions are tried rotation by rotation and left to right within each
/// rotation. A column whose spawn row is already blocked is skipped. Locking
/// leaves full rows in place so the evaluator can reward them.
fn locked_outcomes(board: &Board, kind: ShapeKind) -> impl Iterator<Item = (Placement, Board)> {
    Rotation::ALL.into_iter().flat_map(move |rotation| {
        let width = kind.shape(rotation).width() as i32;
        (0..=Board::WIDTH as i32 - width).filter_map(move |x| {
            let mut piece = Piece::at(kind, rotation, x, 0);
            if board.is_colliding(&piece) {
                return None;
            }
            while !board.is_colliding(&piece.offset(0, 1)) {
                piece = piece.offset(0, 1);
            }
            let mut locked = board.clone();
            locked.fill_piece(&piece);
            Some((Placement { rotation, x }, locked))
        })
    })
}

/// Picks the placement for `current` that minimizes the board score plus a
/// discounted one-ply lookahead over `next`.
///
/// The lookahead takes the best score the next piece can reach on the
/// candidate board; when the next piece has nowhere to spawn it costs a flat
/// topout penalty instead. Ties keep the earliest candidate in enumeration
/// order. Returns `None` only when `current` itself has nowhere to spawn.
#[must_use]
pub fn select_placement(board: &Board, current: ShapeKind, next: ShapeKind) -> Option<Placement> {
    let mut best: Option<(f64, Placement)> = None;
    for (placement, locked) in locked_outcomes(board, current) {
        let lookahead = locked_outcomes(&locked, next)
            .map(|(_, after)| evaluate_board(&after))
            .min()
            .unwrap_or(TOPOUT_PENALTY);
        let objective = evaluate_board(&locked) as f64 + LOOKAHEAD_WEIGHT * lookahead as f64;
        if best.is_none_or(|(score, _)| objective < score) {
            best = Some((objective, placement));
        }
    }
    best.map(|(_, placement)| placement)
}
