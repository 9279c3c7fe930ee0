//! Layer rotation engine.
//!
//! Pure functions that turn a move into a rotation about one axis and apply it
//! to cubie positions and sticker directions. Nothing here mutates cube state:
//! the committed move in [`crate::cube`] is the full-angle, quantized case of
//! the same computation that animation frames evaluate at fractional angles.

use std::f32::consts::FRAC_PI_2;

use nalgebra::{Rotation3, Unit, Vector3};

use crate::notation::{Axis, Move};

/// Largest distance from the integer lattice a rotated coordinate may have
/// before quantization. Quarter-turn rotations in `f32` land well inside this.
const QUANTIZE_TOLERANCE: f32 = 1e-3;

/// One of the six axis-aligned directions a sticker can face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    XPos,
    XNeg,
    YPos,
    YNeg,
    ZPos,
    ZNeg,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::XPos,
        Direction::XNeg,
        Direction::YPos,
        Direction::YNeg,
        Direction::ZPos,
        Direction::ZNeg,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn unit(self) -> Vector3<f32> {
        match self {
            Direction::XPos => Vector3::new(1.0, 0.0, 0.0),
            Direction::XNeg => Vector3::new(-1.0, 0.0, 0.0),
            Direction::YPos => Vector3::new(0.0, 1.0, 0.0),
            Direction::YNeg => Vector3::new(0.0, -1.0, 0.0),
            Direction::ZPos => Vector3::new(0.0, 0.0, 1.0),
            Direction::ZNeg => Vector3::new(0.0, 0.0, -1.0),
        }
    }

    /// Canonical direction closest to `v`, found by rounding its components.
    ///
    /// The x component is checked first, then y, and anything else is `z-`.
    pub fn nearest(v: &Vector3<f32>) -> Self {
        let r = v.map(f32::round);
        if r.x == 1.0 {
            Direction::XPos
        } else if r.x == -1.0 {
            Direction::XNeg
        } else if r.y == 1.0 {
            Direction::YPos
        } else if r.y == -1.0 {
            Direction::YNeg
        } else if r.z == 1.0 {
            Direction::ZPos
        } else {
            Direction::ZNeg
        }
    }
}

/// Positive unit vector of an axis.
pub fn axis_unit(axis: Axis) -> Unit<Vector3<f32>> {
    match axis {
        Axis::X => Vector3::x_axis(),
        Axis::Y => Vector3::y_axis(),
        Axis::Z => Vector3::z_axis(),
    }
}

/// Right-handed rotation by `angle` radians about `axis`.
pub fn create_rotation(axis: Axis, angle: f32) -> Rotation3<f32> {
    Rotation3::from_axis_angle(&axis_unit(axis), angle)
}

/// Rotates `v` by `angle` about `axis`, pivoting at `layer` on that axis.
///
/// The vector is translated by `-layer` along the axis, rotated about the
/// origin and translated back. The result is not quantized.
pub fn rotate_about_layer(v: &Vector3<f32>, axis: Axis, layer: i32, angle: f32) -> Vector3<f32> {
    let offset = axis_unit(axis).into_inner() * layer as f32;
    create_rotation(axis, angle) * (v - offset) + offset
}

/// Rounds each component of `v` to the nearest integer.
pub fn snap(v: &Vector3<f32>) -> Vector3<i32> {
    debug_assert!(
        quantize_error(v) < QUANTIZE_TOLERANCE,
        "rotated vector {v:?} is not on the integer lattice"
    );
    v.map(|c| c.round() as i32)
}

/// Largest distance of any component of `v` from its nearest integer.
pub fn quantize_error(v: &Vector3<f32>) -> f32 {
    v.iter().map(|c| (c - c.round()).abs()).fold(0.0, f32::max)
}

/// Rotation of one layer derived from a move.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerTurn {
    pub axis: Axis,
    /// Coordinate of the turning layer on `axis`, either 1 or -1.
    pub layer: i32,
    /// Signed rotation angle in radians.
    pub angle: f32,
}

impl From<Move> for LayerTurn {
    fn from(mv: Move) -> Self {
        let face = mv.face;
        Self {
            axis: face.axis(),
            layer: face.layer(),
            angle: FRAC_PI_2 * face.clockwise_sign() * mv.modifier.angle_factor(),
        }
    }
}

impl LayerTurn {
    /// Whether a cubie at `position` belongs to the turning layer.
    pub fn contains(&self, position: &Vector3<i32>) -> bool {
        position[self.axis.index()] == self.layer
    }

    /// Rotation covering `fraction` of the full turn.
    pub fn rotation(&self, fraction: f32) -> Rotation3<f32> {
        create_rotation(self.axis, self.angle * fraction)
    }

    /// Position of a cubie after `fraction` of the turn, without quantization.
    ///
    /// Used for animation frames; `fraction == 1.0` is the committed turn.
    pub fn frame(&self, position: &Vector3<i32>, fraction: f32) -> Vector3<f32> {
        rotate_about_layer(&position.cast::<f32>(), self.axis, self.layer, self.angle * fraction)
    }

    /// Position of a cubie after the full turn, snapped back onto the grid.
    pub fn apply(&self, position: &Vector3<i32>) -> Vector3<i32> {
        snap(&self.frame(position, 1.0))
    }

    /// Where each of the six directions points after the full turn.
    ///
    /// Entry `d.index()` holds the image of direction `d`.
    pub fn permute_directions(&self) -> [Direction; 6] {
        let rotation = self.rotation(1.0);
        Direction::ALL.map(|d| Direction::nearest(&(rotation * d.unit())))
    }
}
