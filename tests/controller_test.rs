//! End-to-end behaviour of the controller: scrambles, solves and the busy gate.

mod common;

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::pin::{Pin, pin};
use std::rc::Rc;
use std::task::{Context, Poll, Waker};
use std::time::Duration;

use common::SOLVED;
use cubeview::renderer::RenderError;
use cubeview::sequencer::Delay;
use cubeview::{
    Algorithm, Command, Controller, CubeRenderer, FaceletCube, ModelRenderer, Move, Outcome,
    Settings, Solver, SolverError,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

struct NoDelay;

impl Delay for NoDelay {
    async fn wait(&mut self, _duration: Duration) {}
}

/// Solver that knows which scramble was applied and undoes it.
#[derive(Clone, Default)]
struct UndoScramble(Rc<RefCell<Algorithm>>);

impl Solver for UndoScramble {
    fn solve(&mut self, _cube: &FaceletCube) -> Result<Algorithm, SolverError> {
        Ok(self.0.borrow().inverse())
    }
}

fn no_solver(_: &FaceletCube) -> Result<Algorithm, SolverError> {
    Err(SolverError::Failed("no solver attached".into()))
}

#[test]
fn scramble_then_solve_returns_to_solved() {
    let solver = UndoScramble::default();
    let controller = Controller::with_parts(
        ModelRenderer::new(),
        solver.clone(),
        NoDelay,
        StdRng::seed_from_u64(2024),
        Settings::default(),
    );

    let Outcome::Completed(scramble) = pollster::block_on(controller.scramble(10)).unwrap() else {
        panic!("scramble was ignored");
    };
    assert_eq!(scramble.len(), 10);
    assert!(!controller.is_solved());
    *solver.0.borrow_mut() = scramble;

    let outcome = pollster::block_on(controller.solve()).unwrap();
    assert!(matches!(outcome, Outcome::Completed(ref solution) if solution.len() == 10));
    assert!(controller.is_solved());
    assert_eq!(controller.state(), SOLVED);
    let renderer = controller.renderer().unwrap();
    assert_eq!(renderer.state(), SOLVED);
    assert_eq!(renderer.cube().facelets(), SOLVED);
}

#[test]
fn renderer_and_controller_agree_after_moves() {
    let controller = Controller::with_parts(
        ModelRenderer::new(),
        no_solver,
        NoDelay,
        StdRng::seed_from_u64(5),
        Settings::default(),
    );
    for token in ["U", "F", "R'", "B2", "L", "D'"] {
        let mv: Move = token.parse().unwrap();
        pollster::block_on(controller.apply_move(mv)).unwrap();
        let renderer = controller.renderer().unwrap();
        assert_eq!(renderer.state(), controller.state());
        assert_eq!(renderer.cube().facelets(), controller.state());
    }
}

#[test]
fn interval_applies_between_moves() {
    let waits = Rc::new(Cell::new(0));

    struct CountingDelay(Rc<Cell<usize>>);

    impl Delay for CountingDelay {
        async fn wait(&mut self, duration: Duration) {
            assert_eq!(duration, Duration::from_millis(250));
            self.0.set(self.0.get() + 1);
        }
    }

    let settings = Settings {
        interval: Duration::from_millis(250),
        ..Settings::default()
    };
    let controller = Controller::with_parts(
        ModelRenderer::new(),
        no_solver,
        CountingDelay(Rc::clone(&waits)),
        StdRng::seed_from_u64(5),
        settings,
    );
    pollster::block_on(controller.execute("R U R' U'")).unwrap();
    assert_eq!(waits.get(), 3);
    pollster::block_on(controller.execute("F")).unwrap();
    assert_eq!(waits.get(), 3);
}

/// Future that stays pending until its flag is set.
struct Hold(Rc<Cell<bool>>);

impl Future for Hold {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.0.get() {
            Poll::Ready(())
        } else {
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}

/// Renderer whose moves stay in flight until released.
struct SlowRenderer {
    calls: Rc<Cell<usize>>,
    released: Rc<Cell<bool>>,
    facelets: FaceletCube,
}

impl CubeRenderer for SlowRenderer {
    async fn apply_move(&mut self, mv: Move) -> Result<(), RenderError> {
        self.calls.set(self.calls.get() + 1);
        Hold(Rc::clone(&self.released)).await;
        self.facelets.apply_move(mv);
        Ok(())
    }

    fn state(&self) -> String {
        self.facelets.state()
    }

    fn reset(&mut self) {
        self.facelets.reset();
    }

    fn dispose(&mut self) {}
}

#[test]
fn second_command_is_ignored_while_busy() {
    let calls = Rc::new(Cell::new(0));
    let released = Rc::new(Cell::new(false));
    let renderer = SlowRenderer {
        calls: Rc::clone(&calls),
        released: Rc::clone(&released),
        facelets: FaceletCube::new(),
    };
    let controller = Controller::with_parts(
        renderer,
        no_solver,
        NoDelay,
        StdRng::seed_from_u64(9),
        Settings::default(),
    );

    let mut first = pin!(controller.apply_move("U".parse().unwrap()));
    let mut cx = Context::from_waker(Waker::noop());
    assert!(first.as_mut().poll(&mut cx).is_pending());
    assert_eq!(calls.get(), 1);
    assert!(controller.is_busy());

    for command in [
        Command::Move("R".parse().unwrap()),
        Command::Algorithm("F B".parse().unwrap()),
        Command::Scramble(5),
        Command::Solve,
        Command::Reset,
    ] {
        let outcome = pollster::block_on(controller.submit(command)).unwrap();
        assert_eq!(outcome, Outcome::Ignored);
    }
    assert_eq!(calls.get(), 1);
    assert!(controller.is_solved());
    assert!(controller.renderer().is_none());
    assert!(!controller.dispose());

    released.set(true);
    let outcome = pollster::block_on(first).unwrap();
    assert_eq!(outcome, Outcome::Completed("U".parse().unwrap()));
    assert_eq!(calls.get(), 1);
    assert!(!controller.is_busy());

    let mut expected = FaceletCube::new();
    expected.apply_move("U".parse().unwrap());
    assert_eq!(controller.facelets(), expected);
    assert_eq!(controller.renderer().unwrap().state(), expected.state());

    // The gate is open again.
    pollster::block_on(controller.apply_move("R".parse().unwrap())).unwrap();
    assert_eq!(calls.get(), 2);
}

#[test]
fn bad_algorithm_is_rejected_up_front() {
    let controller = Controller::with_parts(
        ModelRenderer::new(),
        no_solver,
        NoDelay,
        StdRng::seed_from_u64(1),
        Settings::default(),
    );
    let result = pollster::block_on(controller.execute("R U X"));
    assert!(matches!(result, Err(cubeview::Error::Parse(_))));
    assert!(controller.is_solved());
    assert!(!controller.is_busy());
}

/// Model renderer that refuses one particular move.
struct FailingRenderer {
    inner: ModelRenderer,
    fail_on: Move,
}

impl CubeRenderer for FailingRenderer {
    async fn apply_move(&mut self, mv: Move) -> Result<(), RenderError> {
        if mv == self.fail_on {
            return Err(RenderError::Backend(format!("cannot turn {mv}")));
        }
        self.inner.apply_move(mv).await
    }

    fn state(&self) -> String {
        self.inner.state()
    }

    fn reset(&mut self) {
        self.inner.reset();
    }

    fn dispose(&mut self) {
        self.inner.dispose();
    }
}

#[test]
fn failure_midway_keeps_completed_moves() {
    let controller = Controller::with_parts(
        FailingRenderer {
            inner: ModelRenderer::new(),
            fail_on: "F".parse().unwrap(),
        },
        no_solver,
        NoDelay,
        StdRng::seed_from_u64(9),
        Settings::default(),
    );

    let result = pollster::block_on(controller.execute("U R F L"));
    assert!(matches!(
        result,
        Err(cubeview::Error::Render(RenderError::Backend(_)))
    ));
    assert!(!controller.is_busy());

    let mut expected = FaceletCube::new();
    expected.apply_algorithm(&"U R".parse().unwrap());
    assert_eq!(controller.facelets(), expected);
    let renderer = controller.renderer().unwrap();
    assert_eq!(renderer.state(), controller.state());
    assert_eq!(renderer.inner.cube().facelets(), controller.state());
}
