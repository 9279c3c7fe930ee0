//! Command-line front end for the cube model.
//!
//! Applies an algorithm and/or a random scramble, optionally solves the cube
//! back, and prints the resulting net and facelet string. With `--stdin`, each
//! input line is submitted as one more command through the same controller.

use std::cell::RefCell;
use std::io::BufRead;
use std::process::ExitCode;
use std::rc::Rc;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;

use cubeview::notation::ParseError;
use cubeview::renderer::{Frame, render_net};
use cubeview::sequencer::ThreadDelay;
use cubeview::settings::DEFAULT_SCRAMBLE_LENGTH;
use cubeview::{
    Algorithm, Command, Controller, CubeRenderer, FaceletCube, ModelRenderer, NetRenderer,
    Outcome, Settings, Solver, SolverError,
};

/// Turn, scramble and solve a 3x3x3 cube from the terminal.
#[derive(Debug, clap::Parser)]
#[command(version, about)]
struct Args {
    /// Algorithm to apply first, such as "R U R' U'".
    algorithm: Option<String>,
    /// Apply a random scramble of this many moves.
    #[arg(short, long)]
    scramble: Option<usize>,
    /// Seed for the scramble generator.
    #[arg(long)]
    seed: Option<u64>,
    /// Solve the cube after the other commands.
    #[arg(long)]
    solve: bool,
    /// Pause between moves, in milliseconds.
    #[arg(long, default_value_t = 0)]
    interval_ms: u64,
    /// Animation frames per move, logged at trace level.
    #[arg(long, default_value_t = 0)]
    frames: u32,
    /// Use the flat net renderer instead of the cubie model.
    #[arg(long)]
    flat: bool,
    /// Read further commands from standard input: an algorithm, `scramble [N]`,
    /// `solve` or `reset` per line.
    #[arg(long)]
    stdin: bool,
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Cube(#[from] cubeview::Error),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

/// Solves by undoing every move played since the last solve, reset or scramble.
#[derive(Debug, Clone, Default)]
struct Undo(Rc<RefCell<Algorithm>>);

impl Undo {
    fn record(&self, command: &Command, outcome: &Outcome) {
        let Outcome::Completed(played) = outcome else {
            return;
        };
        match command {
            Command::Solve | Command::Reset => *self.0.borrow_mut() = Algorithm::new(),
            Command::Scramble(_) => *self.0.borrow_mut() = played.clone(),
            _ => self.0.borrow_mut().extend(played.iter().copied()),
        }
    }
}

impl Solver for Undo {
    fn solve(&mut self, cube: &FaceletCube) -> Result<Algorithm, SolverError> {
        if cube.is_solved() {
            return Ok(Algorithm::new());
        }
        Ok(self.0.borrow().inverse())
    }
}

fn parse_command(line: &str, settings: &Settings) -> Result<Option<Command>, ParseError> {
    let line = line.trim();
    let mut words = line.split_whitespace();
    let command = match words.next() {
        None => return Ok(None),
        Some("solve") => Command::Solve,
        Some("reset") => Command::Reset,
        Some("scramble") => match words.next().and_then(|n| n.parse().ok()) {
            Some(length) => Command::Scramble(length),
            None => Command::Scramble(settings.scramble_length),
        },
        Some(_) => Command::Algorithm(line.parse()?),
    };
    Ok(Some(command))
}

fn run<R: CubeRenderer>(args: &Args, settings: Settings, renderer: R) -> Result<(), CliError> {
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let undo = Undo::default();
    let controller = Controller::with_parts(renderer, undo.clone(), ThreadDelay, rng, settings);

    let mut commands = Vec::new();
    if let Some(algorithm) = &args.algorithm {
        commands.push(Command::Algorithm(algorithm.parse()?));
    }
    if let Some(length) = args.scramble {
        commands.push(Command::Scramble(length));
    }
    if args.solve {
        commands.push(Command::Solve);
    }

    let submit = |command: Command| -> Result<(), CliError> {
        let outcome = pollster::block_on(controller.submit(command.clone()))?;
        undo.record(&command, &outcome);
        if let Outcome::Completed(played) = &outcome
            && !played.is_empty()
        {
            println!("played: {played}");
        }
        Ok(())
    };

    for command in commands {
        submit(command)?;
    }
    if args.stdin {
        for line in std::io::stdin().lock().lines() {
            match parse_command(&line?, controller.settings()) {
                Ok(Some(command)) => submit(command)?,
                Ok(None) => {}
                Err(e) => {
                    log::error!("{e}");
                    eprintln!("error: {e}");
                }
            }
        }
    }

    println!("{}", render_net(&controller.facelets()));
    println!("{}", controller.state());
    println!("solved: {}", controller.is_solved());
    Ok(())
}

/// Entry point for the cube command-line tool
fn main() -> ExitCode {
    env_logger::builder().format_timestamp(None).init();

    let args = <Args as clap::Parser>::parse();
    let settings = Settings {
        interval: Duration::from_millis(args.interval_ms),
        scramble_length: args.scramble.unwrap_or(DEFAULT_SCRAMBLE_LENGTH),
        animation_frames: args.frames,
    };
    let result = if args.flat {
        run(&args, settings, NetRenderer::new())
    } else if settings.animation_frames > 0 {
        let renderer = ModelRenderer::animated(settings.animation_frames, |frame: &Frame| {
            log::trace!(
                "{} at {:.2}: {} cubies moving",
                frame.mv,
                frame.fraction,
                frame.moving.len()
            );
        });
        run(&args, settings, renderer)
    } else {
        run(&args, settings, ModelRenderer::new())
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
