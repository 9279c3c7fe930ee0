//! Move execution.
//!
//! Plays an algorithm through a renderer one move at a time, never starting a
//! move before the previous one has settled.

use std::future::Future;
use std::time::Duration;

use crate::error::Error;
use crate::notation::Algorithm;
use crate::renderer::{CubeRenderer, RenderError};

/// Waits between moves.
pub trait Delay {
    fn wait(&mut self, duration: Duration) -> impl Future<Output = ()>;
}

/// Delay that blocks the current thread.
///
/// Suits executors like `pollster::block_on` that drive one future on the
/// calling thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadDelay;

impl Delay for ThreadDelay {
    async fn wait(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Applies every move of `algorithm` to `renderer` in order.
///
/// Each move's operation is awaited before the next starts. If `interval` is
/// non-zero, `delay` waits that long after every move except the last. The
/// first renderer error aborts the sequence and is returned; moves already
/// applied stay applied.
///
/// # Arguments
/// * `renderer` - Renderer receiving the moves
/// * `algorithm` - Moves to play
/// * `interval` - Pause between consecutive moves
/// * `delay` - How to pause
pub async fn execute_moves<R, D>(
    renderer: &mut R,
    algorithm: &Algorithm,
    interval: Duration,
    delay: &mut D,
) -> Result<(), RenderError>
where
    R: CubeRenderer,
    D: Delay,
{
    let count = algorithm.len();
    for (i, &mv) in algorithm.iter().enumerate() {
        log::debug!("executing move {}/{count}: {mv}", i + 1);
        renderer.apply_move(mv).await?;
        if !interval.is_zero() && i + 1 < count {
            delay.wait(interval).await;
        }
    }
    Ok(())
}

/// Parses `algorithm` and plays it with [`execute_moves`].
///
/// Parsing finishes before any move is applied, so a bad token leaves the
/// renderer untouched.
pub async fn execute_str<R, D>(
    renderer: &mut R,
    algorithm: &str,
    interval: Duration,
    delay: &mut D,
) -> Result<(), Error>
where
    R: CubeRenderer,
    D: Delay,
{
    let algorithm: Algorithm = algorithm.parse()?;
    execute_moves(renderer, &algorithm, interval, delay).await?;
    Ok(())
}
