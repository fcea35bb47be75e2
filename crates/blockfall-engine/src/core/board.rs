use crate::core::{Piece, ShapeKind};

/// A single board cell.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    /// No block.
    #[default]
    Empty,
    /// A locked block, remembering which kind placed it for rendering.
    Filled(ShapeKind),
}

impl Cell {
    /// Returns whether the cell holds a locked block.
    #[must_use]
    pub fn is_filled(&self) -> bool {
        matches!(self, Self::Filled(_))
    }
}

/// The playfield: a fixed 10x20 grid of cells.
///
/// Row 0 is the top. Coordinates are `i32` so that callers can probe piece
/// positions that poke above the field; rows above the top are treated as
/// empty and unbounded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; Self::WIDTH]; Self::HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Number of columns.
    pub const WIDTH: usize = 10;
    /// Number of rows.
    pub const HEIGHT: usize = 20;

    /// Creates an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; Self::WIDTH]; Self::HEIGHT],
        }
    }

    /// Rows of the board, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell; Self::WIDTH]> {
        self.cells.iter()
    }

    /// Returns the cell at (column `x`, row `y`).
    ///
    /// Out-of-range coordinates read as empty.
    #[must_use]
    pub fn cell(&self, x: i32, y: i32) -> Cell {
        usize::try_from(y)
            .ok()
            .zip(usize::try_from(x).ok())
            .and_then(|(y, x)| Some(*self.cells.get(y)?.get(x)?))
            .unwrap_or(Cell::Empty)
    }

    /// Locks a single cell.
    ///
    /// Out-of-range coordinates are ignored.
    pub fn fill_cell(&mut self, x: i32, y: i32, kind: ShapeKind) {
        if let (Ok(y), Ok(x)) = (usize::try_from(y), usize::try_from(x))
            && y < Self::HEIGHT
            && x < Self::WIDTH
        {
            self.cells[y][x] = Cell::Filled(kind);
        }
    }

    /// Locks a piece's occupied cells into the board.
    ///
    /// Cells above the top row are dropped silently.
    pub fn fill_piece(&mut self, piece: &Piece) {
        for (x, y) in piece.occupied_cells() {
            self.fill_cell(x, y, piece.kind());
        }
    }

    /// Returns whether a piece at this position overlaps walls, the floor,
    /// or locked blocks.
    ///
    /// Cells above the top row only check the walls and floor, so a freshly
    /// spawned piece can hang partly outside the field.
    #[must_use]
    pub fn is_colliding(&self, piece: &Piece) -> bool {
        piece.occupied_cells().any(|(x, y)| {
            x < 0 || x >= Self::WIDTH as i32 || y >= Self::HEIGHT as i32 || self.cell(x, y).is_filled()
        })
    }

    /// Removes every full row and shifts the rows above it down.
    ///
    /// Returns the number of rows removed.
    pub fn clear_lines(&mut self) -> usize {
        let mut cleared = 0;
        let mut y = Self::HEIGHT;
        while y > 0 {
            y -= 1;
            if self.cells[y].iter().all(Cell::is_filled) {
                self.cells.copy_within(..y, 1);
                self.cells[0] = [Cell::Empty; Self::WIDTH];
                cleared += 1;
                // Re-check the row that just shifted into this slot.
                y += 1;
            }
        }
        cleared
    }

    /// Stack height of every column.
    ///
    /// A column's height is the distance from its topmost filled cell to the
    /// floor, or 0 when the column is empty.
    #[must_use]
    pub fn column_heights(&self) -> [usize; Self::WIDTH] {
        let mut heights = [0; Self::WIDTH];
        for (x, height) in heights.iter_mut().enumerate() {
            *height = (0..Self::HEIGHT)
                .find(|&y| self.cells[y][x].is_filled())
                .map_or(0, |y| Self::HEIGHT - y);
        }
        heights
    }

    /// Counts empty cells that have at least one filled cell above them in
    /// the same column.
    #[must_use]
    pub fn count_holes(&self) -> usize {
        let mut holes = 0;
        for x in 0..Self::WIDTH {
            let mut roofed = false;
            for y in 0..Self::HEIGHT {
                if self.cells[y][x].is_filled() {
                    roofed = true;
                } else if roofed {
                    holes += 1;
                }
            }
        }
        holes
    }

    /// Counts full rows without removing them.
    #[must_use]
    pub fn count_complete_lines(&self) -> usize {
        self.cells
            .iter()
            .filter(|row| row.iter().all(Cell::is_filled))
            .count()
    }

    /// Sum of absolute height differences between adjacent columns.
    #[must_use]
    pub fn bumpiness(&self) -> usize {
        let heights = self.column_heights();
        heights
            .windows(2)
            .map(|pair| pair[0].abs_diff(pair[1]))
            .sum()
    }

    /// Returns whether any cell in the top two rows is filled.
    #[must_use]
    pub fn top_rows_occupied(&self) -> bool {
        self.cells[..2]
            .iter()
            .any(|row| row.iter().any(Cell::is_filled))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Rotation;

    fn board_from_rows(rows: &[&str]) -> Board {
        assert!(rows.len() <= Board::HEIGHT);
        let mut board = Board::new();
        let offset = Board::HEIGHT - rows.len();
        for (dy, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), Board::WIDTH);
            for (x, ch) in row.chars().enumerate() {
                if ch == '#' {
                    board.fill_cell(x as i32, (offset + dy) as i32, ShapeKind::O);
                }
            }
        }
        board
    }

    #[test]
    fn test_spawned_pieces_do_not_collide_on_empty_board() {
        let board = Board::new();
        for kind in ShapeKind::ALL {
            assert!(!board.is_colliding(&Piece::spawn(kind)), "{kind:?}");
        }
    }

    #[test]
    fn test_collision_with_walls_and_floor() {
        let board = Board::new();
        let piece = Piece::at(ShapeKind::O, Rotation::default(), 0, 0);
        assert!(board.is_colliding(&piece.offset(-1, 0)));
        assert!(!board.is_colliding(&piece.offset(8, 0)));
        assert!(board.is_colliding(&piece.offset(9, 0)));
        assert!(!board.is_colliding(&piece.offset(0, 18)));
        assert!(board.is_colliding(&piece.offset(0, 19)));
    }

    #[test]
    fn test_collision_skips_cells_above_the_field() {
        let mut board = Board::new();
        let piece = Piece::at(ShapeKind::I, Rotation::new(1), 4, -2);
        assert!(!board.is_colliding(&piece));
        board.fill_cell(4, 1, ShapeKind::O);
        assert!(board.is_colliding(&piece));
    }

    #[test]
    fn test_fill_piece_drops_cells_above_the_field() {
        let mut board = Board::new();
        board.fill_piece(&Piece::at(ShapeKind::I, Rotation::new(1), 0, -2));
        assert!(board.cell(0, 0).is_filled());
        assert!(board.cell(0, 1).is_filled());
        assert_eq!(board.rows().flatten().filter(|c| c.is_filled()).count(), 2);
    }

    #[test]
    fn test_clear_single_line_shifts_rows_down() {
        let mut board = board_from_rows(&[
            "#.........", //
            "##########",
        ]);
        assert_eq!(board.clear_lines(), 1);
        assert_eq!(board, board_from_rows(&["#........."]));
    }

    #[test]
    fn test_clear_separated_lines() {
        let mut board = board_from_rows(&[
            "##########",
            ".#########",
            "##########",
            "#########.",
        ]);
        assert_eq!(board.clear_lines(), 2);
        assert_eq!(
            board,
            board_from_rows(&[
                ".#########", //
                "#########.",
            ])
        );
    }

    #[test]
    fn test_clear_four_stacked_lines() {
        let mut board = board_from_rows(&[
            "..#.......",
            "##########",
            "##########",
            "##########",
            "##########",
        ]);
        assert_eq!(board.clear_lines(), 4);
        assert_eq!(board, board_from_rows(&["..#......."]));
    }

    #[test]
    fn test_column_heights_use_topmost_filled_cell() {
        let board = board_from_rows(&[
            "#.........", //
            "#.#.......",
            "###.......",
        ]);
        let mut expected = [0; Board::WIDTH];
        expected[0] = 3;
        expected[1] = 1;
        expected[2] = 2;
        assert_eq!(board.column_heights(), expected);
    }

    #[test]
    fn test_count_holes_requires_a_roof() {
        let board = board_from_rows(&[
            "#.#.......", //
            ".##.......",
            "#.#.......",
        ]);
        // Column 0 has one roofed gap, column 1 has one below its roof.
        assert_eq!(board.count_holes(), 2);
    }

    #[test]
    fn test_bumpiness_sums_adjacent_differences() {
        let board = board_from_rows(&[
            "#.........", //
            "#.#.......",
            "###.......",
        ]);
        // Heights 3,1,2,0,... -> |3-1| + |1-2| + |2-0| = 5.
        assert_eq!(board.bumpiness(), 5);
    }

    #[test]
    fn test_top_rows_occupied() {
        let mut board = Board::new();
        assert!(!board.top_rows_occupied());
        board.fill_cell(5, 2, ShapeKind::O);
        assert!(!board.top_rows_occupied());
        board.fill_cell(5, 1, ShapeKind::O);
        assert!(board.top_rows_occupied());
    }

    #[test]
    fn test_dropped_i_piece_rests_flat_on_the_floor() {
        let mut board = Board::new();
        let mut piece = Piece::spawn(ShapeKind::I);
        while !board.is_colliding(&piece.offset(0, 1)) {
            piece = piece.offset(0, 1);
        }
        board.fill_piece(&piece);
        let bottom = (Board::HEIGHT - 1) as i32;
        for x in 3..7 {
            assert!(board.cell(x, bottom).is_filled());
        }
        assert_eq!(board.rows().flatten().filter(|c| c.is_filled()).count(), 4);
        assert_eq!(board.count_holes(), 0);
    }

    #[test]
    fn test_count_complete_lines_leaves_board_untouched() {
        let board = board_from_rows(&[
            "#########.", //
            "##########",
            "##########",
        ]);
        assert_eq!(board.count_complete_lines(), 2);
        assert_eq!(board.rows().count(), Board::HEIGHT);
        assert!(board.cell(0, (Board::HEIGHT - 1) as i32).is_filled());
    }
}
