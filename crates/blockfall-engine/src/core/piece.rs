use crate::core::{Board, Rotation, Shape, ShapeKind};

/// A falling piece: a shape kind plus its rotation state and board position.
///
/// The position is the top-left corner of the shape's bounding box in board
/// coordinates. `y` can be negative while a piece pokes above the visible
/// field right after spawning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: ShapeKind,
    rotation: Rotation,
    x: i32,
    y: i32,
}

impl Piece {
    /// Creates a piece of the given kind at the spawn position.
    ///
    /// The spawn column centers the bounding box by halving each side
    /// separately, so odd widths sit one column right of a naive
    /// `(board - piece) / 2` centering.
    #[must_use]
    pub fn spawn(kind: ShapeKind) -> Self {
        let width = kind.spawn_shape().width() as i32;
        Self {
            kind,
            rotation: Rotation::default(),
            x: Board::WIDTH as i32 / 2 - width / 2,
            y: 0,
        }
    }

    /// Creates a piece with an explicit rotation state and position.
    #[must_use]
    pub fn at(kind: ShapeKind, rotation: Rotation, x: i32, y: i32) -> Self {
        Self {
            kind,
            rotation,
            x,
            y,
        }
    }

    /// Shape kind of this piece.
    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// Rotation state of this piece.
    #[must_use]
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Column of the bounding box's left edge.
    #[must_use]
    pub fn x(&self) -> i32 {
        self.x
    }

    /// Row of the bounding box's top edge.
    #[must_use]
    pub fn y(&self) -> i32 {
        self.y
    }

    /// Cell matrix of this piece in its current rotation state.
    #[must_use]
    pub fn shape(&self) -> Shape {
        self.kind.shape(self.rotation)
    }

    /// Returns this piece shifted by `(dx, dy)`.
    #[must_use]
    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Returns this piece rotated one quarter turn clockwise in place.
    ///
    /// The bounding box pivots around its top-left corner; any wall kick is
    /// the caller's concern.
    #[must_use]
    pub fn rotated_clockwise(&self) -> Self {
        Self {
            rotation: self.rotation.stepped(),
            ..*self
        }
    }

    /// Iterates the board coordinates of this piece's occupied cells.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (i32, i32)> {
        let shape = self.shape();
        let (x, y) = (self.x, self.y);
        (0..shape.height()).flat_map(move |cy| {
            (0..shape.width()).filter_map(move |cx| {
                shape
                    .is_occupied(cx, cy)
                    .then(|| (x + cx as i32, y + cy as i32))
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_centers_bounding_box() {
        assert_eq!(Piece::spawn(ShapeKind::I).x(), 3);
        assert_eq!(Piece::spawn(ShapeKind::O).x(), 4);
        // Odd widths round each half separately: 10/2 - 3/2 = 4, not 3.
        for kind in [ShapeKind::T, ShapeKind::L, ShapeKind::J, ShapeKind::S, ShapeKind::Z] {
            assert_eq!(Piece::spawn(kind).x(), 4, "{kind:?}");
        }
        for kind in ShapeKind::ALL {
            assert_eq!(Piece::spawn(kind).y(), 0);
        }
    }

    #[test]
    fn test_offset_moves_position_only() {
        let piece = Piece::spawn(ShapeKind::T);
        let moved = piece.offset(-1, 2);
        assert_eq!((moved.x(), moved.y()), (piece.x() - 1, piece.y() + 2));
        assert_eq!(moved.kind(), piece.kind());
        assert_eq!(moved.rotation(), piece.rotation());
    }

    #[test]
    fn test_rotated_clockwise_keeps_top_left_anchor() {
        let piece = Piece::at(ShapeKind::I, Rotation::default(), 3, 5);
        let rotated = piece.rotated_clockwise();
        assert_eq!((rotated.x(), rotated.y()), (3, 5));
        assert_eq!(rotated.rotation(), Rotation::new(1));
        assert_eq!((rotated.shape().width(), rotated.shape().height()), (1, 4));
    }

    #[test]
    fn test_occupied_cells_in_board_coordinates() {
        let piece = Piece::at(ShapeKind::T, Rotation::default(), 4, 10);
        let cells: Vec<_> = piece.occupied_cells().collect();
        assert_eq!(cells, [(4, 10), (5, 10), (6, 10), (5, 11)]);
    }

    #[test]
    fn test_occupied_cells_can_be_above_the_field() {
        let piece = Piece::at(ShapeKind::O, Rotation::default(), 0, -1);
        let cells: Vec<_> = piece.occupied_cells().collect();
        assert_eq!(cells, [(0, -1), (1, -1), (0, 0), (1, 0)]);
    }
}
