//! 3×3×3 cube state model with a facelet view and a geometric cubie view.
//!
//! The [`facelet`] model holds the cube as a 54-character string and is what a
//! solver works from. The [`cube`] model holds 27 cubies with grid positions
//! and sticker directions, turned by the pure rotation engine in [`math`].
//! Both views implement the same move table from [`notation`] and agree on
//! the facelet string after every move. Renderers, the move sequencer and the
//! controller that gates top-level commands sit on top.

pub mod controller;
pub mod cube;
mod error;
pub mod facelet;
pub mod math;
pub mod notation;
pub mod renderer;
pub mod scramble;
pub mod sequencer;
pub mod settings;
pub mod solver;

pub use controller::{Command, Controller, Outcome};
pub use cube::CubieCube;
pub use error::Error;
pub use facelet::FaceletCube;
pub use notation::{Algorithm, Face, Move};
pub use renderer::{CubeRenderer, ModelRenderer, NetRenderer};
pub use settings::Settings;
pub use solver::{Solver, SolverError};
