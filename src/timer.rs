use std::{sync::{atomic::{AtomicBool, Ordering}, Arc}, time::{Duration, Instant}};

/// A repeating deadline polled by whoever owns it.
///
/// Each firing returns the delay until the next one, so exactly one deadline
/// is pending at a time. The timer never spawns anything itself.
pub struct RepeatingTimer {
    due: Instant,
    running: Arc<AtomicBool>,
}

/// Stops a [`RepeatingTimer`] from anywhere.
#[derive(Clone)]
pub struct TimerHandle {
    running: Arc<AtomicBool>,
}

impl TimerHandle {
    pub fn stop(&self) {
        self.running.store(false, Ordering::Relaxed);
    }
}

impl RepeatingTimer {
    /// First firing happens at `now`.
    pub fn start(now: Instant) -> Self {
        Self { due: now, running: Arc::new(AtomicBool::new(true)) }
    }

    pub fn handle(&self) -> TimerHandle {
        TimerHandle { running: Arc::clone(&self.running) }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// `None` once stopped.
    pub fn next_due(&self) -> Option<Instant> {
        self.is_running().then_some(self.due)
    }

    /// Runs `task` if the deadline has passed and schedules the next one
    /// `task`'s returned delay after `now`. Returns whether it fired.
    pub fn run_due(&mut self, now: Instant, task: impl FnOnce() -> Duration) -> bool {
        if !self.is_running() || now < self.due {
            return false;
        }
        let delay = task();
        self.due = now + delay;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_immediately_then_waits() {
        let t0 = Instant::now();
        let mut timer = RepeatingTimer::start(t0);
        let mut fired = 0;

        assert!(timer.run_due(t0, || { fired += 1; Duration::from_millis(100) }));
        assert_eq!(timer.next_due(), Some(t0 + Duration::from_millis(100)));

        assert!(!timer.run_due(t0 + Duration::from_millis(99), || { fired += 1; Duration::ZERO }));
        assert!(timer.run_due(t0 + Duration::from_millis(100), || { fired += 1; Duration::from_millis(5) }));
        assert_eq!(fired, 2);
    }

    #[test]
    fn test_next_deadline_counts_from_poll_time() {
        let t0 = Instant::now();
        let mut timer = RepeatingTimer::start(t0);
        let late = t0 + Duration::from_millis(40);
        timer.run_due(late, || Duration::from_millis(10));
        assert_eq!(timer.next_due(), Some(late + Duration::from_millis(10)));
    }

    #[test]
    fn test_stopped_timer_never_fires() {
        let t0 = Instant::now();
        let mut timer = RepeatingTimer::start(t0);
        let handle = timer.handle();
        handle.stop();

        assert!(!timer.is_running());
        assert_eq!(timer.next_due(), None);
        assert!(!timer.run_due(t0 + Duration::from_secs(60), || panic!("stopped timer ran")));
    }
}
