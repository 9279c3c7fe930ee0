//! Face-turn notation.
//!
//! Defines the six faces, the three rotation axes, move modifiers, single
//! moves such as `R'` and whitespace-separated algorithms such as `R U R' U'`.
//! Parsing fails fast on anything outside the 18 legal move tokens so that the
//! two cube models never see a move one of them would silently skip.

use std::fmt;
use std::str::FromStr;

use crate::math::Direction;

/// One of the six faces of the cube.
///
/// The declaration order is the canonical facelet-string order (U, R, F, D, L, B).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Face {
    U,
    R,
    F,
    D,
    L,
    B,
}

impl Face {
    /// All faces in facelet-string order.
    pub const ALL: [Face; 6] = [Face::U, Face::R, Face::F, Face::D, Face::L, Face::B];

    /// Position of this face in the facelet string (0 for U through 5 for B).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Axis that a turn of this face rotates about.
    pub fn axis(self) -> Axis {
        match self {
            Face::U | Face::D => Axis::Y,
            Face::R | Face::L => Axis::X,
            Face::F | Face::B => Axis::Z,
        }
    }

    /// Coordinate of this face's layer on its axis.
    pub fn layer(self) -> i32 {
        match self {
            Face::U | Face::R | Face::F => 1,
            Face::D | Face::L | Face::B => -1,
        }
    }

    /// Sign of the right-handed rotation angle for a clockwise quarter turn.
    ///
    /// Clockwise is as seen looking at the face from outside the cube, so the
    /// faces on the positive side of an axis turn by a negative angle.
    pub fn clockwise_sign(self) -> f32 {
        -(self.layer() as f32)
    }

    /// Direction pointing out of the cube through this face.
    pub fn outward(self) -> Direction {
        match self {
            Face::R => Direction::XPos,
            Face::L => Direction::XNeg,
            Face::U => Direction::YPos,
            Face::D => Direction::YNeg,
            Face::F => Direction::ZPos,
            Face::B => Direction::ZNeg,
        }
    }

    /// Letter used for this face in notation and in facelet strings.
    pub fn letter(self) -> char {
        match self {
            Face::U => 'U',
            Face::R => 'R',
            Face::F => 'F',
            Face::D => 'D',
            Face::L => 'L',
            Face::B => 'B',
        }
    }

    /// Parses a face letter.
    pub fn from_letter(c: char) -> Option<Self> {
        match c {
            'U' => Some(Face::U),
            'R' => Some(Face::R),
            'F' => Some(Face::F),
            'D' => Some(Face::D),
            'L' => Some(Face::L),
            'B' => Some(Face::B),
            _ => None,
        }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Rotation axis of a face turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Index of this axis in a 3D vector.
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
            Axis::Z => write!(f, "z"),
        }
    }
}

/// Suffix of a move token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Modifier {
    /// No suffix: a clockwise quarter turn.
    Clockwise,
    /// `'`: a counter-clockwise quarter turn.
    CounterClockwise,
    /// `2`: a half turn.
    Double,
}

impl Modifier {
    pub const ALL: [Modifier; 3] = [
        Modifier::Clockwise,
        Modifier::CounterClockwise,
        Modifier::Double,
    ];

    /// Number of clockwise quarter turns this modifier amounts to.
    pub fn quarter_turns(self) -> usize {
        match self {
            Modifier::Clockwise => 1,
            Modifier::Double => 2,
            Modifier::CounterClockwise => 3,
        }
    }

    /// Multiplier applied to the clockwise quarter-turn angle.
    pub fn angle_factor(self) -> f32 {
        match self {
            Modifier::Clockwise => 1.0,
            Modifier::CounterClockwise => -1.0,
            Modifier::Double => 2.0,
        }
    }

    pub fn inverse(self) -> Self {
        match self {
            Modifier::Clockwise => Modifier::CounterClockwise,
            Modifier::CounterClockwise => Modifier::Clockwise,
            Modifier::Double => Modifier::Double,
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            Modifier::Clockwise => "",
            Modifier::CounterClockwise => "'",
            Modifier::Double => "2",
        }
    }
}

/// Error produced when a move token or algorithm cannot be parsed.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty move token")]
    Empty,
    #[error("unknown face {face:?} in move {token:?}")]
    UnknownFace { token: String, face: char },
    #[error("unknown modifier {modifier:?} in move {token:?}")]
    UnknownModifier { token: String, modifier: String },
}

/// A single face turn, such as `U`, `R'` or `F2`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub face: Face,
    pub modifier: Modifier,
}

impl Move {
    pub const fn new(face: Face, modifier: Modifier) -> Self {
        Self { face, modifier }
    }

    /// All 18 legal moves, grouped by face.
    pub fn all() -> impl Iterator<Item = Move> {
        Face::ALL
            .into_iter()
            .flat_map(|face| Modifier::ALL.into_iter().map(move |m| Move::new(face, m)))
    }

    pub fn axis(self) -> Axis {
        self.face.axis()
    }

    /// Move that undoes this one.
    pub fn inverse(self) -> Self {
        Self::new(self.face, self.modifier.inverse())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.face, self.modifier.suffix())
    }
}

impl FromStr for Move {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let first = chars.next().ok_or(ParseError::Empty)?;
        let face = Face::from_letter(first).ok_or_else(|| ParseError::UnknownFace {
            token: s.to_owned(),
            face: first,
        })?;
        let modifier = match chars.as_str() {
            "" => Modifier::Clockwise,
            "'" => Modifier::CounterClockwise,
            "2" => Modifier::Double,
            other => {
                return Err(ParseError::UnknownModifier {
                    token: s.to_owned(),
                    modifier: other.to_owned(),
                });
            }
        };
        Ok(Self::new(face, modifier))
    }
}

/// Ordered sequence of moves.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Algorithm(Vec<Move>);

impl Algorithm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn moves(&self) -> &[Move] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, mv: Move) {
        self.0.push(mv);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.0.iter()
    }

    /// Algorithm that undoes this one: the moves reversed, each inverted.
    pub fn inverse(&self) -> Self {
        Self(self.0.iter().rev().map(|mv| mv.inverse()).collect())
    }
}

impl From<Vec<Move>> for Algorithm {
    fn from(moves: Vec<Move>) -> Self {
        Self(moves)
    }
}

impl From<Move> for Algorithm {
    fn from(mv: Move) -> Self {
        Self(vec![mv])
    }
}

impl FromIterator<Move> for Algorithm {
    fn from_iter<I: IntoIterator<Item = Move>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Move> for Algorithm {
    fn extend<I: IntoIterator<Item = Move>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl<'a> IntoIterator for &'a Algorithm {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Algorithm {
    type Item = Move;
    type IntoIter = std::vec::IntoIter<Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, mv) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{mv}")?;
        }
        Ok(())
    }
}

impl FromStr for Algorithm {
    type Err = ParseError;

    /// Parses whitespace-separated move tokens. Empty tokens are discarded.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split_whitespace().map(str::parse).collect()
    }
}
