use crate::facelet::FaceletError;
use crate::notation::ParseError;
use crate::renderer::RenderError;
use crate::solver::SolverError;

/// Any error surfaced by the cube controller or sequencer.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Facelet(#[from] FaceletError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Solver(#[from] SolverError),
}
