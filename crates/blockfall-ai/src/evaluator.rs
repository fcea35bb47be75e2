use blockfall_engine::Board;

/// Penalty added when the stack reaches the top two rows.
pub const TOPOUT_PENALTY: i64 = 10_000;

/// Scores a board position. Lower is better.
///
/// The score is a weighted sum of stack features on the raw board, full rows
/// included. Complete rows score as a large bonus rather than being removed,
/// so the caller can evaluate a locked piece before resolving its clears.
#[must_use]
pub fn evaluate_board(board: &Board) -> i64 {
    let aggregate_height: usize = board.column_heights().iter().sum();
    let mut score = 5 * aggregate_height as i64 + 80 * board.count_holes() as i64
        - 400 * board.count_complete_lines() as i64
        + 3 * board.bumpiness() as i64;
    if board.top_rows_occupied() {
        score += TOPOUT_PENALTY;
    }
    score
}
