//! Facelet state model.
//!
//! The cube as 54 sticker labels, 9 per face in U, R, F, D, L, B order. This
//! is the representation handed to the solver and used for solved checks.

use std::fmt;
use std::str::FromStr;

use crate::notation::{Algorithm, Face, Move};
use crate::solver::{Solver, SolverError};

pub const FACELET_COUNT: usize = 54;

/// Source index of each facelet of a face after a clockwise quarter turn.
const FACE_ROTATION: [usize; 9] = [6, 3, 0, 7, 4, 1, 8, 5, 2];

/// For each face, the four strips of stickers on neighbouring faces that a
/// clockwise quarter turn cycles. The contents of strip `k` move to strip
/// `k + 1`, element by element.
#[rustfmt::skip]
const ADJACENT_STRIPS: [[[usize; 3]; 4]; 6] = [
    // U
    [[9, 10, 11], [18, 19, 20], [36, 37, 38], [45, 46, 47]],
    // R
    [[2, 5, 8], [51, 48, 45], [29, 32, 35], [20, 23, 26]],
    // F
    [[6, 7, 8], [9, 12, 15], [29, 28, 27], [44, 41, 38]],
    // D
    [[15, 16, 17], [51, 52, 53], [42, 43, 44], [24, 25, 26]],
    // L
    [[0, 3, 6], [18, 21, 24], [27, 30, 33], [53, 50, 47]],
    // B
    [[0, 1, 2], [42, 39, 36], [35, 34, 33], [11, 14, 17]],
];

/// Error produced when parsing a facelet string.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FaceletError {
    #[error("facelet string has {0} characters, expected 54")]
    WrongLength(usize),
    #[error("unknown sticker {sticker:?} at position {index}")]
    UnknownSticker { index: usize, sticker: char },
    #[error("face {face} appears on {count} stickers, expected 9")]
    WrongCount { face: Face, count: usize },
}

/// The cube as a 54-entry facelet string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FaceletCube {
    stickers: [Face; FACELET_COUNT],
}

impl Default for FaceletCube {
    fn default() -> Self {
        Self::new()
    }
}

impl FaceletCube {
    /// Creates a solved cube.
    pub fn new() -> Self {
        Self {
            stickers: std::array::from_fn(|i| Face::ALL[i / 9]),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn stickers(&self) -> &[Face; FACELET_COUNT] {
        &self.stickers
    }

    /// The 9 stickers of `face`, row by row.
    pub fn face(&self, face: Face) -> [Face; 9] {
        let start = face.index() * 9;
        std::array::from_fn(|i| self.stickers[start + i])
    }

    /// The facelet string, e.g. `UUUUUUUUURRR...`.
    pub fn state(&self) -> String {
        self.to_string()
    }

    pub fn is_solved(&self) -> bool {
        Face::ALL.iter().all(|&face| {
            let stickers = self.face(face);
            stickers.iter().all(|&s| s == stickers[0])
        })
    }

    pub fn apply_move(&mut self, mv: Move) {
        for _ in 0..mv.modifier.quarter_turns() {
            self.quarter_turn(mv.face);
        }
        log::debug!("facelet model applied {mv}");
    }

    /// Applies each move of `algorithm` from left to right.
    pub fn apply_algorithm(&mut self, algorithm: &Algorithm) {
        for &mv in algorithm {
            self.apply_move(mv);
        }
    }

    /// Asks `solver` for an algorithm that solves the current state.
    ///
    /// The cube itself is left as is; apply the returned algorithm to solve it.
    pub fn solve<S: Solver + ?Sized>(&self, solver: &mut S) -> Result<Algorithm, SolverError> {
        solver.solve(self)
    }

    fn quarter_turn(&mut self, face: Face) {
        let old = self.stickers;
        let start = face.index() * 9;
        for (i, &src) in FACE_ROTATION.iter().enumerate() {
            self.stickers[start + i] = old[start + src];
        }
        let strips = &ADJACENT_STRIPS[face.index()];
        for (k, from) in strips.iter().enumerate() {
            let to = &strips[(k + 1) % 4];
            for (&dst, &src) in to.iter().zip(from) {
                self.stickers[dst] = old[src];
            }
        }
    }
}

impl fmt::Display for FaceletCube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for face in &self.stickers {
            write!(f, "{face}")?;
        }
        Ok(())
    }
}

impl FromStr for FaceletCube {
    type Err = FaceletError;

    /// Parses a 54-character facelet string.
    ///
    /// Only the sticker counts are checked; a string with 9 of each label that
    /// no sequence of moves can reach is accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let len = s.chars().count();
        if len != FACELET_COUNT {
            return Err(FaceletError::WrongLength(len));
        }
        let mut stickers = [Face::U; FACELET_COUNT];
        let mut counts = [0; 6];
        for (index, c) in s.chars().enumerate() {
            let face = Face::from_letter(c).ok_or(FaceletError::UnknownSticker { index, sticker: c })?;
            stickers[index] = face;
            counts[face.index()] += 1;
        }
        if let Some(face) = Face::ALL.into_iter().find(|f| counts[f.index()] != 9) {
            return Err(FaceletError::WrongCount {
                face,
                count: counts[face.index()],
            });
        }
        Ok(Self { stickers })
    }
}
