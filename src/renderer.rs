//! Renderer contract and the headless renderers shipped with the crate.
//!
//! The controller and the sequencer only ever talk to a [`CubeRenderer`]. Two
//! variants live here: [`ModelRenderer`], which drives the geometric cubie
//! model and can stream fractional animation frames to a [`FrameSink`], and
//! [`NetRenderer`], which lays the facelet string out as a flat 2D net.

use std::future::Future;

use nalgebra::{Rotation3, Vector3};

use crate::cube::CubieCube;
use crate::facelet::FaceletCube;
use crate::math::LayerTurn;
use crate::notation::{Face, Move};

/// Width of the flat net in cells.
pub const NET_WIDTH: usize = 12;
/// Height of the flat net in cells.
pub const NET_HEIGHT: usize = 9;

/// Top-left cell of each face in the flat net, in facelet-string order.
const NET_ORIGINS: [(usize, usize); 6] = [
    (3, 0), // U
    (6, 3), // R
    (3, 3), // F
    (3, 6), // D
    (0, 3), // L
    (9, 3), // B
];

/// Error reported by a renderer while applying a move.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("renderer has been disposed")]
    Disposed,
    #[error("render backend failed: {0}")]
    Backend(String),
}

/// Capabilities every renderer provides.
///
/// A renderer owns its own view of the cube and keeps it in step with the
/// moves it is given. `apply_move` resolves once the move is committed and any
/// animation for it has finished.
pub trait CubeRenderer {
    fn apply_move(&mut self, mv: Move) -> impl Future<Output = Result<(), RenderError>>;

    /// The renderer's current facelet string.
    fn state(&self) -> String;

    /// Returns to the solved state, discarding any transient animation state.
    /// A disposed renderer is rebuilt and accepts moves again.
    fn reset(&mut self);

    /// Releases resources. Moves applied afterwards fail with [`RenderError::Disposed`].
    fn dispose(&mut self);
}

/// One intermediate step of a layer turn.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Move being animated
    pub mv: Move,
    /// Portion of the turn completed, in `(0, 1]`
    pub fraction: f32,
    /// Rotation applied to the turning layer at this step
    pub rotation: Rotation3<f32>,
    /// Index and unquantized position of every cubie in the turning layer
    pub moving: Vec<(usize, Vector3<f32>)>,
}

/// Receives animation frames from a [`ModelRenderer`].
pub trait FrameSink {
    fn frame(&mut self, frame: &Frame);
}

impl<F: FnMut(&Frame)> FrameSink for F {
    fn frame(&mut self, frame: &Frame) {
        self(frame)
    }
}

/// Animation settings of a [`ModelRenderer`].
struct Animation {
    /// Number of frames per move
    frames: u32,
    /// Consumer of the frames
    sink: Box<dyn FrameSink>,
}

/// Renderer backed by the geometric cubie model.
///
/// Keeps a parallel facelet string updated with every move, as a mesh renderer
/// would for reporting its state. With no frame sink attached it is headless
/// and every move resolves immediately.
pub struct ModelRenderer {
    /// Cubie positions and sticker directions
    cube: CubieCube,
    /// Facelet string kept alongside the cubie model
    facelets: FaceletCube,
    /// Frame output, if animating
    animation: Option<Animation>,
    /// Set by [`CubeRenderer::dispose`], cleared by [`CubeRenderer::reset`]
    disposed: bool,
}

impl Default for ModelRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelRenderer {
    /// Creates a headless renderer showing a solved cube.
    pub fn new() -> Self {
        Self {
            cube: CubieCube::new(),
            facelets: FaceletCube::new(),
            animation: None,
            disposed: false,
        }
    }

    /// Creates a renderer that emits `frames` frames per move to `sink`.
    ///
    /// # Arguments
    /// * `frames` - Frames per move; 0 disables animation
    /// * `sink` - Consumer of the intermediate frames
    pub fn animated(frames: u32, sink: impl FrameSink + 'static) -> Self {
        Self {
            animation: Some(Animation {
                frames,
                sink: Box::new(sink),
            }),
            ..Self::new()
        }
    }

    /// Geometric model as last committed.
    pub fn cube(&self) -> &CubieCube {
        &self.cube
    }

    /// Builds the frame `fraction` of the way through `mv` without touching the model.
    pub fn preview(&self, mv: Move, fraction: f32) -> Frame {
        let turn = LayerTurn::from(mv);
        let moving = self
            .cube
            .layer_indices(&turn)
            .into_iter()
            .map(|i| (i, turn.frame(&self.cube.cubies()[i].position(), fraction)))
            .collect();
        Frame {
            mv,
            fraction,
            rotation: turn.rotation(fraction),
            moving,
        }
    }

    fn animate(&mut self, mv: Move) {
        let Some(animation) = &self.animation else {
            return;
        };
        let frames = animation.frames;
        for step in 1..=frames {
            let frame = self.preview(mv, step as f32 / frames as f32);
            log::trace!("{mv} frame {step}/{frames}");
            if let Some(animation) = &mut self.animation {
                animation.sink.frame(&frame);
            }
        }
    }
}

impl CubeRenderer for ModelRenderer {
    async fn apply_move(&mut self, mv: Move) -> Result<(), RenderError> {
        if self.disposed {
            return Err(RenderError::Disposed);
        }
        self.animate(mv);
        self.cube.apply_move(mv);
        self.facelets.apply_move(mv);
        debug_assert_eq!(
            self.cube.facelets(),
            self.facelets.state(),
            "cubie model out of step with facelets after {mv}"
        );
        Ok(())
    }

    fn state(&self) -> String {
        self.facelets.state()
    }

    fn reset(&mut self) {
        self.cube.reset();
        self.facelets.reset();
        self.disposed = false;
    }

    fn dispose(&mut self) {
        self.disposed = true;
    }
}

/// Flat 2D renderer that lays the six faces out as a cross-shaped net.
#[derive(Debug, Default, Clone)]
pub struct NetRenderer {
    facelets: FaceletCube,
    disposed: bool,
}

impl NetRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current net, one line per row.
    pub fn net(&self) -> String {
        render_net(&self.facelets)
    }
}

impl CubeRenderer for NetRenderer {
    async fn apply_move(&mut self, mv: Move) -> Result<(), RenderError> {
        if self.disposed {
            return Err(RenderError::Disposed);
        }
        self.facelets.apply_move(mv);
        Ok(())
    }

    fn state(&self) -> String {
        self.facelets.state()
    }

    fn reset(&mut self) {
        self.facelets.reset();
        self.disposed = false;
    }

    fn dispose(&mut self) {
        self.disposed = true;
    }
}

/// Lays `cube` out as a 12×9 net: U on top, L F R B across the middle, D below.
///
/// Cells outside the net are spaces and trailing spaces are trimmed.
pub fn render_net(cube: &FaceletCube) -> String {
    let mut grid = [[' '; NET_WIDTH]; NET_HEIGHT];
    for face in Face::ALL {
        let (ox, oy) = NET_ORIGINS[face.index()];
        for (i, sticker) in cube.face(face).into_iter().enumerate() {
            grid[oy + i / 3][ox + i % 3] = sticker.letter();
        }
    }
    grid.iter()
        .map(|row| row.iter().collect::<String>().trim_end().to_owned())
        .collect::<Vec<_>>()
        .join("\n")
}
