use crate::{
    controller::Controller,
    platform::Pointer,
    settings::SettingsStore,
    timer::RepeatingTimer,
};
use rand::rngs::StdRng;
use std::time::{Duration, Instant};

/// How often the "Current X/Y" readout follows the cursor.
pub const READOUT_INTERVAL: Duration = Duration::from_millis(200);

/// The controller plus the two timers driving it and the settings location.
///
/// Shared between the window and the click job behind one mutex.
pub struct Session<P> {
    pub controller: Controller<P>,
    store: Option<SettingsStore>,
    click_timer: RepeatingTimer,
    readout_timer: RepeatingTimer,
    readout: (i32, i32),
    rng: StdRng,
    saved: bool,
}

impl<P: Pointer> Session<P> {
    /// Both timers first fire at `now`.
    pub fn new(controller: Controller<P>, store: Option<SettingsStore>, rng: StdRng, now: Instant) -> Self {
        Self {
            controller,
            store,
            click_timer: RepeatingTimer::start(now),
            readout_timer: RepeatingTimer::start(now),
            readout: (0, 0),
            rng,
            saved: false,
        }
    }

    /// Last sampled cursor position.
    pub fn readout(&self) -> (i32, i32) {
        self.readout
    }

    pub fn handle_keys(&mut self, keys: impl IntoIterator<Item = String>) {
        for key in keys {
            self.controller.handle_key(&key);
        }
    }

    pub fn run_timers(&mut self, now: Instant) {
        let controller = &self.controller;
        let rng = &mut self.rng;
        self.click_timer.run_due(now, || controller.tick(rng));

        let readout = &mut self.readout;
        self.readout_timer.run_due(now, || {
            *readout = controller.pointer().cursor_position();
            READOUT_INTERVAL
        });
    }

    pub fn next_wake(&self) -> Option<Instant> {
        [self.click_timer.next_due(), self.readout_timer.next_due()]
            .into_iter()
            .flatten()
            .min()
    }

    /// Saves once and stops clicking. Later calls do nothing and return false.
    pub fn persist(&mut self) -> bool {
        if self.saved {
            return false;
        }
        self.saved = true;
        self.click_timer.handle().stop();
        if let Some(store) = &self.store {
            self.controller.save(store);
        }
        true
    }
}
