use rand::{Rng, distr::StandardUniform, prelude::Distribution};

/// Enum identifying one of the 7 canonical falling shapes.
///
/// The discriminant order matches the canonical shape table and is also the
/// order the render layer uses to pick colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ShapeKind {
    /// I-shape.
    I = 0,
    /// O-shape.
    O = 1,
    /// T-shape.
    T = 2,
    /// L-shape.
    L = 3,
    /// J-shape.
    J = 4,
    /// S-shape.
    S = 5,
    /// Z-shape.
    Z = 6,
}

impl Distribution<ShapeKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ShapeKind {
        match rng.random_range(0..=6) {
            0 => ShapeKind::I,
            1 => ShapeKind::O,
            2 => ShapeKind::T,
            3 => ShapeKind::L,
            4 => ShapeKind::J,
            5 => ShapeKind::S,
            _ => ShapeKind::Z,
        }
    }
}

impl ShapeKind {
    /// Number of shape kinds (7).
    pub const LEN: usize = 7;

    /// All shape kinds, in discriminant order.
    pub const ALL: [Self; Self::LEN] = [
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::T,
        ShapeKind::L,
        ShapeKind::J,
        ShapeKind::S,
        ShapeKind::Z,
    ];

    /// Returns the cell matrix of this kind in the given rotation state.
    #[must_use]
    pub fn shape(self, rotation: Rotation) -> Shape {
        SHAPE_ROTATIONS[self as usize][rotation.index()]
    }

    /// Returns the cell matrix of this kind in its spawn orientation.
    #[must_use]
    pub fn spawn_shape(self) -> Shape {
        self.shape(Rotation::default())
    }
}

/// Rotation state of a shape.
///
/// Always counts clockwise quarter turns from the canonical spawn
/// orientation, never from the previous rotation state. This keeps rotation
/// indices meaningful across the engine and the placement search: state `n`
/// is the spawn matrix rotated `n` times, full stop.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Rotation(u8);

impl Rotation {
    /// Number of distinct rotation states (4).
    pub const STATES: u8 = 4;

    /// All rotation states, ascending.
    pub const ALL: [Self; 4] = [Self(0), Self(1), Self(2), Self(3)];

    /// Creates a rotation state from a quarter-turn count (wraps modulo 4).
    #[must_use]
    pub const fn new(steps: u8) -> Self {
        Self(steps % Self::STATES)
    }

    /// Returns the state one clockwise quarter turn further.
    #[must_use]
    pub const fn stepped(self) -> Self {
        Self::new(self.0 + 1)
    }

    /// Number of clockwise quarter turns from the spawn orientation (0-3).
    #[must_use]
    pub const fn steps(self) -> u8 {
        self.0
    }

    const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A shape's cell matrix within its bounding box.
///
/// Stored as one bitmask per row: row 0 is the top row, bit `x` of a row is
/// column `x`. Shapes are bounding-box tight (the I-shape spawns as 1×4),
/// which is what spawn centering and the placement search's column
/// enumeration rely on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    rows: [u8; 4],
    width: usize,
    height: usize,
}

impl Shape {
    const fn new(width: usize, height: usize, rows: [u8; 4]) -> Self {
        assert!(width >= 1 && width <= 4);
        assert!(height >= 1 && height <= 4);
        Self {
            rows,
            width,
            height,
        }
    }

    /// Width of the bounding box, in cells.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Height of the bounding box, in cells.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Returns whether the cell at (column `x`, row `y`) is occupied.
    ///
    /// Coordinates outside the bounding box are unoccupied.
    #[must_use]
    pub const fn is_occupied(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.rows[y] & (1 << x) != 0
    }

    /// Returns this matrix rotated one quarter turn clockwise.
    ///
    /// The cell at (row `r`, column `c`) lands at (row `c`,
    /// column `height - 1 - r`); the bounding box transposes with it. Four
    /// applications are the identity.
    #[must_use]
    pub const fn rotated_clockwise(&self) -> Self {
        let mut rows = [0; 4];
        let mut r = 0;
        while r < self.height {
            let mut c = 0;
            while c < self.width {
                if self.rows[r] & (1 << c) != 0 {
                    rows[c] |= 1 << (self.height - 1 - r);
                }
                c += 1;
            }
            r += 1;
        }
        Self::new(self.height, self.width, rows)
    }
}

/// Generates all 4 rotation states from a spawn matrix.
const fn rotations(spawn: Shape) -> [Shape; 4] {
    let mut states = [spawn; 4];
    let mut i = 1;
    while i < 4 {
        states[i] = states[i - 1].rotated_clockwise();
        i += 1;
    }
    states
}

const SHAPE_ROTATIONS: [[Shape; 4]; ShapeKind::LEN] = {
    const fn r(cells: [bool; 4]) -> u8 {
        let mut mask = 0;
        let mut i = 0;
        while i < 4 {
            if cells[i] {
                mask |= 1 << i;
            }
            i += 1;
        }
        mask
    }

    const C: bool = true;
    const E: bool = false;

    [
        // I-shape
        rotations(Shape::new(4, 1, [r([C, C, C, C]), 0, 0, 0])),
        // O-shape
        rotations(Shape::new(2, 2, [r([C, C, E, E]), r([C, C, E, E]), 0, 0])),
        // T-shape
        rotations(Shape::new(3, 2, [r([C, C, C, E]), r([E, C, E, E]), 0, 0])),
        // L-shape
        rotations(Shape::new(3, 2, [r([C, C, C, E]), r([C, E, E, E]), 0, 0])),
        // J-shape
        rotations(Shape::new(3, 2, [r([C, C, C, E]), r([E, E, C, E]), 0, 0])),
        // S-shape
        rotations(Shape::new(3, 2, [r([E, C, C, E]), r([C, C, E, E]), 0, 0])),
        // Z-shape
        rotations(Shape::new(3, 2, [r([C, C, E, E]), r([E, C, C, E]), 0, 0])),
    ]
};
