//! Game resources (singleton state) that live outside the simulation core.

use bevy::prelude::*;
use std::time::Duration;

use super::TICK_INTERVAL;

/// Lifecycle phase of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayState {
    #[default]
    NotStarted,
    Playing,
    GameOver,
}

/// Fixed-interval clock driving the simulation. Stopped clocks never fire.
#[derive(Resource)]
pub struct Clock {
    timer: Timer,
    running: bool,
}

impl Default for Clock {
    fn default() -> Self {
        Clock::new(TICK_INTERVAL)
    }
}

impl Clock {
    pub fn new(interval: Duration) -> Self {
        Clock {
            timer: Timer::new(interval, TimerMode::Repeating),
            running: false,
        }
    }

    /// Starts the clock from a full interval.
    pub fn start(&mut self) {
        self.timer.reset();
        self.running = true;
    }

    /// Stops the clock. Stopping a stopped clock is a no-op.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advances the clock and returns how many ticks fired.
    pub fn advance(&mut self, delta: Duration) -> u32 {
        if !self.running {
            return 0;
        }
        self.timer.tick(delta);
        self.timer.times_finished_this_tick()
    }
}

/// Time spent playing in the current round.
#[derive(Resource, Default)]
pub struct RoundTimer {
    pub elapsed: Duration,
}

impl RoundTimer {
    pub fn whole_seconds(&self) -> u64 {
        self.elapsed.as_secs()
    }
}
