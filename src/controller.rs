//! Cube controller.
//!
//! Owns the facelet model used for solving, one renderer and one solver, and
//! is the single entry point for everything that changes the cube: manual
//! moves, algorithms, scrambles, solves and resets all go through
//! [`Controller::submit`]. At most one of them runs at a time; anything
//! submitted while another command is in flight is ignored.

use std::cell::{Cell, Ref, RefCell};

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::error::Error;
use crate::facelet::FaceletCube;
use crate::notation::{Algorithm, Move};
use crate::renderer::{CubeRenderer, RenderError};
use crate::scramble::generate_scramble;
use crate::sequencer::{Delay, ThreadDelay, execute_moves};
use crate::settings::Settings;
use crate::solver::Solver;

/// A top-level request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Turn one face.
    Move(Move),
    /// Play a sequence of moves.
    Algorithm(Algorithm),
    /// Reset, then play a freshly generated scramble of the given length.
    Scramble(usize),
    /// Ask the solver for a solution and play it.
    Solve,
    /// Return every model to solved.
    Reset,
}

/// What happened to a submitted command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The command ran; holds the moves that were played.
    Completed(Algorithm),
    /// Another command was in flight, so this one was dropped.
    Ignored,
}

/// Marks the controller busy for as long as it lives.
struct BusyGuard<'a>(&'a Cell<bool>);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a Cell<bool>) -> Option<Self> {
        if flag.replace(true) {
            None
        } else {
            Some(Self(flag))
        }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Commits each move to the controller's facelet model once the renderer
/// has finished with it.
struct Tracked<'a, R> {
    renderer: &'a mut R,
    facelets: &'a RefCell<FaceletCube>,
}

impl<R: CubeRenderer> CubeRenderer for Tracked<'_, R> {
    async fn apply_move(&mut self, mv: Move) -> Result<(), RenderError> {
        self.renderer.apply_move(mv).await?;
        self.facelets.borrow_mut().apply_move(mv);
        Ok(())
    }

    fn state(&self) -> String {
        self.renderer.state()
    }

    fn reset(&mut self) {
        self.renderer.reset();
        self.facelets.borrow_mut().reset();
    }

    fn dispose(&mut self) {
        self.renderer.dispose();
    }
}

/// Single-threaded controller tying the facelet model to a renderer.
///
/// Methods take `&self` so that a command can be submitted while another is
/// still awaiting its animation; the second one is then ignored rather than
/// queued.
pub struct Controller<R, S, D = ThreadDelay> {
    /// Facelet model handed to the solver
    facelets: RefCell<FaceletCube>,
    /// Attached renderer
    renderer: RefCell<R>,
    /// External solve search
    solver: RefCell<S>,
    /// Pause between moves
    delay: RefCell<D>,
    /// Source of scrambles
    rng: RefCell<StdRng>,
    /// Timing and scramble defaults
    settings: Settings,
    /// Set while a command is in flight
    busy: Cell<bool>,
}

impl<R: CubeRenderer, S: Solver> Controller<R, S> {
    /// Creates a controller with a solved cube, blocking delays and an
    /// OS-seeded scramble RNG.
    pub fn new(renderer: R, solver: S, settings: Settings) -> Self {
        Self::with_parts(renderer, solver, ThreadDelay, StdRng::from_os_rng(), settings)
    }
}

impl<R: CubeRenderer, S: Solver, D: Delay> Controller<R, S, D> {
    /// Creates a controller from explicit parts.
    ///
    /// # Arguments
    /// * `renderer` - Renderer that animates and reports the cube
    /// * `solver` - Solve search used by [`Command::Solve`]
    /// * `delay` - How to wait between moves
    /// * `rng` - Random source for scrambles
    /// * `settings` - Interval and scramble defaults
    pub fn with_parts(renderer: R, solver: S, delay: D, rng: StdRng, settings: Settings) -> Self {
        Self {
            facelets: RefCell::new(FaceletCube::new()),
            renderer: RefCell::new(renderer),
            solver: RefCell::new(solver),
            delay: RefCell::new(delay),
            rng: RefCell::new(rng),
            settings,
            busy: Cell::new(false),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Whether a command is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }

    /// Copy of the controller's facelet model.
    pub fn facelets(&self) -> FaceletCube {
        *self.facelets.borrow()
    }

    /// The controller's facelet string.
    pub fn state(&self) -> String {
        self.facelets.borrow().state()
    }

    pub fn is_solved(&self) -> bool {
        self.facelets.borrow().is_solved()
    }

    /// The attached renderer, or `None` while a command is using it.
    pub fn renderer(&self) -> Option<Ref<'_, R>> {
        self.renderer.try_borrow().ok()
    }

    /// Runs `command` unless another command is already in flight.
    ///
    /// Returns [`Outcome::Ignored`] without touching any state when busy.
    /// Errors from the renderer or the solver are returned as they are; a
    /// failed solve leaves the cube untouched.
    pub async fn submit(&self, command: Command) -> Result<Outcome, Error> {
        let Some(_guard) = BusyGuard::acquire(&self.busy) else {
            log::warn!("ignoring {command:?}: another command is in flight");
            return Ok(Outcome::Ignored);
        };
        log::info!("running {command:?}");

        let played = match command {
            Command::Move(mv) => {
                let algorithm = Algorithm::from(mv);
                self.play(&algorithm).await?;
                algorithm
            }
            Command::Algorithm(algorithm) => {
                self.play(&algorithm).await?;
                algorithm
            }
            Command::Scramble(length) => {
                let scramble = generate_scramble(length, &mut *self.rng.borrow_mut());
                log::info!("scramble: {scramble}");
                self.facelets.borrow_mut().reset();
                self.renderer.borrow_mut().reset();
                self.play(&scramble).await?;
                scramble
            }
            Command::Solve => {
                let solution = self.facelets.borrow().solve(&mut *self.solver.borrow_mut())?;
                log::info!("solution: {solution}");
                self.play(&solution).await?;
                solution
            }
            Command::Reset => {
                self.facelets.borrow_mut().reset();
                self.renderer.borrow_mut().reset();
                Algorithm::new()
            }
        };
        Ok(Outcome::Completed(played))
    }

    pub async fn apply_move(&self, mv: Move) -> Result<Outcome, Error> {
        self.submit(Command::Move(mv)).await
    }

    /// Parses `algorithm` and submits it. A bad token fails before the busy check.
    pub async fn execute(&self, algorithm: &str) -> Result<Outcome, Error> {
        let algorithm = algorithm.parse()?;
        self.submit(Command::Algorithm(algorithm)).await
    }

    pub async fn scramble(&self, length: usize) -> Result<Outcome, Error> {
        self.submit(Command::Scramble(length)).await
    }

    pub async fn solve(&self) -> Result<Outcome, Error> {
        self.submit(Command::Solve).await
    }

    pub async fn reset(&self) -> Result<Outcome, Error> {
        self.submit(Command::Reset).await
    }

    /// Disposes the renderer. Returns `false` if a command is in flight.
    pub fn dispose(&self) -> bool {
        let Some(_guard) = BusyGuard::acquire(&self.busy) else {
            return false;
        };
        self.renderer.borrow_mut().dispose();
        true
    }

    // The busy gate keeps every other borrow of `renderer` and `delay` out
    // while a sequence is playing.
    #[allow(clippy::await_holding_refcell_ref)]
    async fn play(&self, algorithm: &Algorithm) -> Result<(), Error> {
        let mut renderer = self.renderer.borrow_mut();
        let mut delay = self.delay.borrow_mut();
        let mut tracked = Tracked {
            renderer: &mut *renderer,
            facelets: &self.facelets,
        };
        execute_moves(&mut tracked, algorithm, self.settings.interval, &mut *delay).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::renderer::ModelRenderer;
    use crate::solver::SolverError;

    struct NoDelay;

    impl Delay for NoDelay {
        async fn wait(&mut self, _duration: Duration) {}
    }

    fn controller<S: Solver>(solver: S) -> Controller<ModelRenderer, S, NoDelay> {
        Controller::with_parts(
            ModelRenderer::new(),
            solver,
            NoDelay,
            StdRng::seed_from_u64(11),
            Settings::default(),
        )
    }

    fn unused_solver(_: &FaceletCube) -> Result<Algorithm, SolverError> {
        Err(SolverError::Failed("not expected".into()))
    }

    #[test]
    fn move_updates_both_views() {
        let controller = controller(unused_solver);
        let outcome = pollster::block_on(controller.execute("U F")).unwrap();
        assert_eq!(outcome, Outcome::Completed("U F".parse().unwrap()));
        let renderer = controller.renderer().unwrap();
        assert_eq!(controller.state(), renderer.state());
        assert_eq!(controller.state(), renderer.cube().facelets());
        assert!(!controller.is_busy());
    }

    #[test]
    fn failed_solve_leaves_state_untouched() {
        let controller = controller(unused_solver);
        pollster::block_on(controller.execute("R U")).unwrap();
        let before = controller.state();
        let result = pollster::block_on(controller.solve());
        assert!(matches!(result, Err(Error::Solver(SolverError::Failed(_)))));
        assert_eq!(controller.state(), before);
        assert_eq!(controller.renderer().unwrap().state(), before);
        assert!(!controller.is_busy());
    }

    #[test]
    fn invalid_solution_is_rejected_before_playing() {
        let controller = controller(|_: &FaceletCube| -> Result<Algorithm, SolverError> {
            Ok("R Q".parse::<Algorithm>()?)
        });
        pollster::block_on(controller.execute("R")).unwrap();
        let before = controller.state();
        let result = pollster::block_on(controller.solve());
        assert!(matches!(result, Err(Error::Solver(SolverError::InvalidAlgorithm(_)))));
        assert_eq!(controller.state(), before);
    }

    #[test]
    fn reset_clears_every_view() {
        let controller = controller(unused_solver);
        pollster::block_on(controller.scramble(8)).unwrap();
        pollster::block_on(controller.reset()).unwrap();
        assert!(controller.is_solved());
        let renderer = controller.renderer().unwrap();
        assert_eq!(renderer.state(), controller.state());
        assert_eq!(renderer.cube().facelets(), controller.state());
    }

    #[test]
    fn dispose_blocks_later_moves() {
        let controller = controller(unused_solver);
        assert!(controller.dispose());
        let result = pollster::block_on(controller.execute("U"));
        assert!(matches!(result, Err(Error::Render(RenderError::Disposed))));
        assert!(controller.is_solved());
    }

    #[test]
    fn reset_revives_a_disposed_renderer() {
        let controller = controller(unused_solver);
        assert!(controller.dispose());
        pollster::block_on(controller.reset()).unwrap();
        let outcome = pollster::block_on(controller.execute("U")).unwrap();
        assert_eq!(outcome, Outcome::Completed("U".parse().unwrap()));
        assert_eq!(controller.state(), controller.renderer().unwrap().state());
        assert!(!controller.is_solved());
    }

    #[test]
    fn scramble_starts_from_solved() {
        let controller = controller(unused_solver);
        assert_eq!(controller.settings().interval, Duration::ZERO);
        pollster::block_on(controller.execute("R U F")).unwrap();
        let Outcome::Completed(scramble) = pollster::block_on(controller.scramble(5)).unwrap() else {
            panic!("scramble was ignored");
        };
        let mut expected = FaceletCube::new();
        expected.apply_algorithm(&scramble);
        assert_eq!(controller.facelets(), expected);
        let renderer = controller.renderer().unwrap();
        assert_eq!(renderer.state(), expected.state());
        assert_eq!(renderer.cube().facelets(), expected.state());
    }
}
