//! Background execution helpers.
//!
//! PDF work is CPU-bound and synchronous, so it runs on Tokio's blocking
//! pool while the caller keeps the status line alive.

use tokio::task::JoinHandle;

use crate::error::{PdfToolsError, Result};
use crate::output::animation::LoadingAnimation;

/// Run a blocking closure on the blocking pool and wait for its result.
pub async fn run_blocking<F, T>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.map_err(background_failure)?
}

/// Await a spawned task, ticking `animation` until it completes.
///
/// The animation is drawn immediately, advanced on every interval and
/// erased once the task finishes, whether it succeeded or not.
pub async fn run_with_animation<T>(
    mut handle: JoinHandle<Result<T>>,
    animation: &mut LoadingAnimation,
) -> Result<T> {
    let mut ticker = tokio::time::interval(animation.interval());
    // The first tick of an interval fires immediately.
    ticker.tick().await;
    animation.start();

    let joined = loop {
        tokio::select! {
            joined = &mut handle => break joined,
            _ = ticker.tick() => animation.tick(),
        }
    };

    animation.finish();
    joined.map_err(background_failure)?
}

fn background_failure(err: tokio::task::JoinError) -> PdfToolsError {
    PdfToolsError::other(format!("Background task failed: {err}"))
}
