use crate::{platform::Pointer, settings::Settings};
use rand::Rng;
use std::time::Duration;

// -------------- Click Engine --------------
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EngineState {
    #[default]
    Idle,
    Active,
}

#[derive(Debug, Default)]
pub struct ClickEngine {
    state: EngineState,
}

impl ClickEngine {
    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == EngineState::Active
    }

    pub fn toggle(&mut self) -> EngineState {
        self.state = match self.state {
            EngineState::Idle => EngineState::Active,
            EngineState::Active => EngineState::Idle,
        };
        self.state
    }

    /// Clicks once if active and returns how long to wait before the next tick.
    pub fn tick<P: Pointer, R: Rng>(&self, settings: &Settings, pointer: &P, rng: &mut R) -> Duration {
        if self.is_active() {
            let (x, y) = jittered_target(settings, rng);
            pointer.move_to(x, y);
            pointer.left_down(x, y);
            pointer.left_up(x, y);
            tracing::debug!(x, y, "click");
        }
        next_delay(settings, rng)
    }
}

/// Offset in `-radius..=radius`, drawn as a real number and truncated toward zero.
fn jitter<R: Rng>(rng: &mut R, radius: u32) -> i32 {
    let r = radius as f64;
    rng.gen_range(-r..=r) as i32
}

pub fn jittered_target<R: Rng>(settings: &Settings, rng: &mut R) -> (i32, i32) {
    let x = settings.mark_x.saturating_add(jitter(rng, settings.jitter_width));
    let y = settings.mark_y.saturating_add(jitter(rng, settings.jitter_height));
    (x, y)
}

pub fn next_delay<R: Rng>(settings: &Settings, rng: &mut R) -> Duration {
    let min = settings.min_delay_ms.max(1);
    let max = settings.max_delay_ms.max(1);
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    let ms = rng.gen_range(lo as f64..=hi as f64) as u64;
    Duration::from_millis(ms)
}
