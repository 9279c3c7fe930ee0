//! Geometric cubie model.
//!
//! The cube is 27 cubies on the integer grid {-1,0,1}³. Each cubie carries the
//! face label of every sticker it has, keyed by the direction that sticker
//! currently points. Moves rotate positions and sticker directions through
//! [`LayerTurn`], and [`CubieCube::facelets`] reads the stickers back out in
//! facelet-string order so the result can be compared against
//! [`crate::facelet::FaceletCube`].

use std::ops::Index;

use nalgebra::Vector3;

use crate::math::{Direction, LayerTurn};
use crate::notation::{Algorithm, Face, Move};

/// Number of cubies, including the hidden core.
pub const CUBIE_COUNT: usize = 27;

/// Face label of each sticker on a cubie, keyed by the direction it points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Orientation([Option<Face>; 6]);

impl Orientation {
    /// Stickers a cubie at `position` has on a solved cube.
    ///
    /// Each outward-facing side gets the label of the face it lies on; sides
    /// facing into the cube get nothing.
    pub fn solved_at(position: &Vector3<i32>) -> Self {
        let mut stickers = [None; 6];
        for face in Face::ALL {
            let axis = face.axis().index();
            if position[axis] == face.layer() {
                stickers[face.outward().index()] = Some(face);
            }
        }
        Self(stickers)
    }

    pub fn get(&self, direction: Direction) -> Option<Face> {
        self.0[direction.index()]
    }

    /// Number of stickers: 3 for corners, 2 for edges, 1 for centers, 0 for the core.
    pub fn sticker_count(&self) -> usize {
        self.0.iter().flatten().count()
    }

    /// Orientation after `turn`: every sticker moves to the direction its old
    /// direction rotates onto.
    pub fn rotated(&self, turn: &LayerTurn) -> Self {
        let images = turn.permute_directions();
        let mut stickers = [None; 6];
        for direction in Direction::ALL {
            stickers[images[direction.index()].index()] = self.get(direction);
        }
        Self(stickers)
    }
}

impl Index<Direction> for Orientation {
    type Output = Option<Face>;

    fn index(&self, direction: Direction) -> &Self::Output {
        &self.0[direction.index()]
    }
}

/// One of the 27 sub-cubes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cubie {
    position: Vector3<i32>,
    orientation: Orientation,
}

impl Cubie {
    fn solved_at(position: Vector3<i32>) -> Self {
        Self {
            position,
            orientation: Orientation::solved_at(&position),
        }
    }

    pub fn position(&self) -> Vector3<i32> {
        self.position
    }

    pub fn orientation(&self) -> &Orientation {
        &self.orientation
    }
}

/// Grid position and outward direction of facelet `index` (0..9) of `face`.
///
/// Rows run top to bottom and columns left to right as seen looking at the
/// face from outside: U with B at the top, D with F at the top, and the four
/// side faces with U at the top.
pub fn facelet_slot(face: Face, index: usize) -> (Vector3<i32>, Direction) {
    let row = (index / 3) as i32;
    let col = (index % 3) as i32;
    let position = match face {
        Face::U => Vector3::new(col - 1, 1, row - 1),
        Face::R => Vector3::new(1, 1 - row, 1 - col),
        Face::F => Vector3::new(col - 1, 1 - row, 1),
        Face::D => Vector3::new(col - 1, -1, 1 - row),
        Face::L => Vector3::new(-1, 1 - row, col - 1),
        Face::B => Vector3::new(1 - col, 1 - row, -1),
    };
    (position, face.outward())
}

fn grid_index(position: &Vector3<i32>) -> Option<usize> {
    if position.iter().all(|c| (-1..=1).contains(c)) {
        Some(((position.x + 1) * 9 + (position.y + 1) * 3 + (position.z + 1)) as usize)
    } else {
        None
    }
}

/// The 27-cubie geometric model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CubieCube {
    cubies: Vec<Cubie>,
}

impl Default for CubieCube {
    fn default() -> Self {
        Self::new()
    }
}

impl CubieCube {
    /// Creates a solved cube with every cubie at its home position.
    pub fn new() -> Self {
        let mut cubies = Vec::with_capacity(CUBIE_COUNT);
        for x in -1..=1 {
            for y in -1..=1 {
                for z in -1..=1 {
                    cubies.push(Cubie::solved_at(Vector3::new(x, y, z)));
                }
            }
        }
        Self { cubies }
    }

    /// Recreates all 27 cubies at identity.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Cubies in creation order. A cubie keeps its index across moves.
    pub fn cubies(&self) -> &[Cubie] {
        &self.cubies
    }

    pub fn cubie_at(&self, position: &Vector3<i32>) -> Option<&Cubie> {
        self.cubies.iter().find(|c| c.position == *position)
    }

    /// Indices of the cubies in the layer that `turn` rotates.
    pub fn layer_indices(&self, turn: &LayerTurn) -> Vec<usize> {
        self.cubies
            .iter()
            .enumerate()
            .filter(|(_, c)| turn.contains(&c.position))
            .map(|(i, _)| i)
            .collect()
    }

    /// Rotates the layer selected by `mv`, updating positions and stickers.
    pub fn apply_move(&mut self, mv: Move) {
        let turn = LayerTurn::from(mv);
        let mut moved = 0;
        for cubie in self.cubies.iter_mut().filter(|c| turn.contains(&c.position)) {
            cubie.position = turn.apply(&cubie.position);
            cubie.orientation = cubie.orientation.rotated(&turn);
            moved += 1;
        }
        debug_assert_eq!(moved, 9, "{mv} moved {moved} cubies");
        log::debug!("cubie model applied {mv} ({} about {}, layer {})", turn.angle, turn.axis, turn.layer);
    }

    pub fn apply_algorithm(&mut self, algorithm: &Algorithm) {
        for &mv in algorithm {
            self.apply_move(mv);
        }
    }

    /// Reads the stickers out as a 54-character facelet string.
    ///
    /// A slot with no sticker facing out, which a consistent model never has,
    /// is written as `?`.
    pub fn facelets(&self) -> String {
        let mut by_position = [None; CUBIE_COUNT];
        for cubie in &self.cubies {
            if let Some(i) = grid_index(&cubie.position) {
                by_position[i] = Some(cubie);
            }
        }
        let mut out = String::with_capacity(54);
        for face in Face::ALL {
            for index in 0..9 {
                let (position, direction) = facelet_slot(face, index);
                let sticker = grid_index(&position)
                    .and_then(|i| by_position[i])
                    .and_then(|cubie| cubie.orientation.get(direction));
                out.push(sticker.map_or('?', Face::letter));
            }
        }
        out
    }

    /// Whether every position holds exactly one cubie, all within the grid.
    pub fn is_well_formed(&self) -> bool {
        let mut seen = [false; CUBIE_COUNT];
        self.cubies.len() == CUBIE_COUNT
            && self.cubies.iter().all(|c| match grid_index(&c.position) {
                Some(i) if !seen[i] => {
                    seen[i] = true;
                    true
                }
                _ => false,
            })
    }
}
