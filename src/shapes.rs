//! Piece shape catalog: every tetromino kind and its precomputed SRS rotation states.

/// One rotation state: rows of 0/1 occupancy, top row first.
pub type Matrix = &'static [&'static [u8]];

/// Tetromino kinds. `P` is an experimental pentomino kept in the catalog but
/// never handed out by the random selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TetrominoKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
    P,
}

impl TetrominoKind {
    /// The seven kinds eligible for random selection.
    pub const STANDARD: [Self; 7] = [Self::I, Self::J, Self::L, Self::O, Self::S, Self::T, Self::Z];

    /// Every kind in the catalog, including `P`.
    pub const ALL: [Self; 8] = [
        Self::I,
        Self::J,
        Self::L,
        Self::O,
        Self::S,
        Self::T,
        Self::Z,
        Self::P,
    ];

    /// Ordered rotation states; index 0 is the spawn orientation.
    pub fn rotations(self) -> &'static [Matrix] {
        match self {
            Self::I => I_ROTATIONS,
            Self::J => J_ROTATIONS,
            Self::L => L_ROTATIONS,
            Self::O => O_ROTATIONS,
            Self::S => S_ROTATIONS,
            Self::T => T_ROTATIONS,
            Self::Z => Z_ROTATIONS,
            Self::P => P_ROTATIONS,
        }
    }

    #[inline]
    pub fn rotation_count(self) -> usize {
        self.rotations().len()
    }

    /// Matrix for `rotation`, wrapped into range.
    #[inline]
    pub fn matrix(self, rotation: usize) -> Matrix {
        let rotations = self.rotations();
        rotations[rotation % rotations.len()]
    }

    /// Bounding matrix width (columns). Identical for every rotation state.
    #[inline]
    pub fn width(self) -> usize {
        self.rotations()[0][0].len()
    }

    /// Bounding matrix height (rows). Identical for every rotation state.
    #[inline]
    pub fn height(self) -> usize {
        self.rotations()[0].len()
    }

    /// Single-letter name, used by the CLI and in logs.
    pub fn letter(self) -> char {
        match self {
            Self::I => 'I',
            Self::J => 'J',
            Self::L => 'L',
            Self::O => 'O',
            Self::S => 'S',
            Self::T => 'T',
            Self::Z => 'Z',
            Self::P => 'P',
        }
    }

    pub fn from_letter(c: char) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.letter() == c.to_ascii_uppercase())
    }
}

// Rotation states follow the SRS reference orientation chart.

const I_ROTATIONS: &[Matrix] = &[
    &[&[0, 0, 0, 0], &[1, 1, 1, 1], &[0, 0, 0, 0], &[0, 0, 0, 0]],
    &[&[0, 0, 1, 0], &[0, 0, 1, 0], &[0, 0, 1, 0], &[0, 0, 1, 0]],
    &[&[0, 0, 0, 0], &[0, 0, 0, 0], &[1, 1, 1, 1], &[0, 0, 0, 0]],
    &[&[0, 1, 0, 0], &[0, 1, 0, 0], &[0, 1, 0, 0], &[0, 1, 0, 0]],
];

const O_ROTATIONS: &[Matrix] = &[&[&[1, 1], &[1, 1]]];

const T_ROTATIONS: &[Matrix] = &[
    &[&[0, 1, 0], &[1, 1, 1], &[0, 0, 0]],
    &[&[0, 1, 0], &[0, 1, 1], &[0, 1, 0]],
    &[&[0, 0, 0], &[1, 1, 1], &[0, 1, 0]],
    &[&[0, 1, 0], &[1, 1, 0], &[0, 1, 0]],
];

const L_ROTATIONS: &[Matrix] = &[
    &[&[0, 0, 1], &[1, 1, 1], &[0, 0, 0]],
    &[&[0, 1, 0], &[0, 1, 0], &[0, 1, 1]],
    &[&[0, 0, 0], &[1, 1, 1], &[1, 0, 0]],
    &[&[1, 1, 0], &[0, 1, 0], &[0, 1, 0]],
];

const J_ROTATIONS: &[Matrix] = &[
    &[&[1, 0, 0], &[1, 1, 1], &[0, 0, 0]],
    &[&[0, 1, 1], &[0, 1, 0], &[0, 1, 0]],
    &[&[0, 0, 0], &[1, 1, 1], &[0, 0, 1]],
    &[&[0, 1, 0], &[0, 1, 0], &[1, 1, 0]],
];

const S_ROTATIONS: &[Matrix] = &[
    &[&[0, 1, 1], &[1, 1, 0], &[0, 0, 0]],
    &[&[0, 1, 0], &[0, 1, 1], &[0, 0, 1]],
    &[&[0, 0, 0], &[0, 1, 1], &[1, 1, 0]],
    &[&[1, 0, 0], &[1, 1, 0], &[0, 1, 0]],
];

// State 3 duplicates state 1.
const Z_ROTATIONS: &[Matrix] = &[
    &[&[1, 1, 0], &[0, 1, 1], &[0, 0, 0]],
    &[&[0, 0, 1], &[0, 1, 1], &[0, 1, 0]],
    &[&[0, 0, 0], &[1, 1, 0], &[0, 1, 1]],
    &[&[0, 0, 1], &[0, 1, 1], &[0, 1, 0]],
];

const P_ROTATIONS: &[Matrix] = &[
    &[&[0, 1, 0], &[0, 1, 0], &[1, 0, 1]],
    &[&[1, 0, 0], &[0, 1, 1], &[1, 0, 0]],
    &[&[1, 0, 1], &[0, 1, 0], &[0, 1, 0]],
    &[&[0, 0, 1], &[1, 1, 0], &[0, 0, 1]],
];

/// Widest bounding matrix in the catalog; the preview slot is this size square.
pub const MAX_SHAPE_SIZE: usize = 4;
