use crate::{hotkeys::HotkeyListener, platform::Pointer, session::Session};
use parking_lot::Mutex;
use std::{sync::{atomic::{AtomicBool, Ordering}, Arc}, thread, time::{Duration, Instant}};

/// Longest single wait, so a stop request is noticed quickly.
const MAX_WAIT: Duration = Duration::from_millis(50);

/// Background thread that runs the timers and hotkeys of a [`Session`].
///
/// It does not depend on the window repainting, so clicks and hotkeys keep
/// working while the window is minimized.
pub struct ClickJob {
    running: Arc<AtomicBool>,
}

impl ClickJob {
    /// `wake` runs after hotkeys changed something the window shows.
    pub fn spawn<P>(
        session: Arc<Mutex<Session<P>>>,
        hotkeys: HotkeyListener,
        wake: impl Fn() + Send + 'static,
    ) -> Self
    where
        P: Pointer + Send + 'static,
    {
        let running = Arc::new(AtomicBool::new(true));
        let running_clone = Arc::clone(&running);

        let spawned = thread::Builder::new()
            .name("click-job".into())
            .spawn(move || {
                let mut wait = Duration::ZERO;
                while running_clone.load(Ordering::Relaxed) {
                    let keys = hotkeys.wait(wait.min(MAX_WAIT));
                    if !running_clone.load(Ordering::Relaxed) { break; }
                    wait = step(&session, keys, Instant::now(), &wake);
                }
                tracing::debug!("click job stopped");
            });
        if let Err(e) = spawned {
            tracing::error!("could not start click job: {e}");
        }

        Self { running }
    }

    pub fn stop(&self) {
        self.running.store(false, Ordering::Relaxed);
    }
}

/// One pass: apply keys, run due timers, return how long until the next deadline.
fn step<P: Pointer>(
    session: &Mutex<Session<P>>,
    keys: Vec<String>,
    now: Instant,
    wake: &impl Fn(),
) -> Duration {
    let mut session = session.lock();
    let had_keys = !keys.is_empty();
    session.handle_keys(keys);
    session.run_timers(now);
    if had_keys {
        wake();
    }
    session
        .next_wake()
        .map_or(MAX_WAIT, |due| due.saturating_duration_since(now))
}
