//! Solver collaborator.
//!
//! The search that finds a solution is not part of this crate. Anything that
//! can turn a facelet state into a solving algorithm implements [`Solver`].

use crate::facelet::FaceletCube;
use crate::notation::{Algorithm, ParseError};

/// Error reported by a [`Solver`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    #[error("solver failed: {0}")]
    Failed(String),
    #[error("solver returned an invalid algorithm: {0}")]
    InvalidAlgorithm(#[from] ParseError),
}

/// Produces an algorithm that takes a cube state back to solved.
pub trait Solver {
    fn solve(&mut self, cube: &FaceletCube) -> Result<Algorithm, SolverError>;
}

impl<F> Solver for F
where
    F: FnMut(&FaceletCube) -> Result<Algorithm, SolverError>,
{
    fn solve(&mut self, cube: &FaceletCube) -> Result<Algorithm, SolverError> {
        self(cube)
    }
}
