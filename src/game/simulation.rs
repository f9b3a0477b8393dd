//! The snake simulation: body, heading, apple, score, and the timed color effect.
//!
//! All mutation happens through [`SnakeSimulation::tick`], [`SnakeSimulation::set_heading`],
//! [`SnakeSimulation::resume`], [`SnakeSimulation::reset`] and
//! [`SnakeSimulation::advance_effects`]. Each operation runs to completion and reports
//! what happened as a list of [`SimEvent`]s; the simulation never draws or plays sounds.

use bevy::prelude::*;
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::time::Duration;

use super::{
    ALL_DOTS, COLOR_EFFECT_DURATION, COLOR_EFFECT_EVERY, COLOR_EFFECT_FLICKER, Collision,
    DEFAULT_SNAKE_COLOR, DOT_SIZE, Direction, HEIGHT, INITIAL_DOTS, PlayState, Position,
    SELF_COLLISION_GRACE, SimEvent, WIDTH,
};

/// Rainbow flash shown for a fixed window after every fifth apple.
pub struct ColorEffect {
    window: Option<Timer>,
    flicker: Timer,
    color: Color,
}

impl ColorEffect {
    fn inactive() -> Self {
        ColorEffect {
            window: None,
            flicker: Timer::new(COLOR_EFFECT_FLICKER, TimerMode::Repeating),
            color: DEFAULT_SNAKE_COLOR,
        }
    }

    pub fn is_active(&self) -> bool {
        self.window.is_some()
    }

    /// Current snake color: a random flash while active, the default color otherwise.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Starts the effect. An already running effect keeps its original deadline.
    fn activate(&mut self, rng: &mut StdRng) -> bool {
        if self.is_active() {
            return false;
        }
        self.window = Some(Timer::new(COLOR_EFFECT_DURATION, TimerMode::Once));
        self.flicker.reset();
        self.color = random_color(rng);
        true
    }

    /// Returns `true` when the effect ran out during this step.
    fn advance(&mut self, delta: Duration, rng: &mut StdRng) -> bool {
        let Some(window) = self.window.as_mut() else {
            return false;
        };

        window.tick(delta);
        if window.is_finished() {
            self.clear();
            return true;
        }

        self.flicker.tick(delta);
        if self.flicker.times_finished_this_tick() > 0 {
            self.color = random_color(rng);
        }
        false
    }

    fn clear(&mut self) {
        self.window = None;
        self.color = DEFAULT_SNAKE_COLOR;
    }
}

fn random_color(rng: &mut StdRng) -> Color {
    Color::srgb_u8(rng.random(), rng.random(), rng.random())
}

/// Read-only copy of everything a renderer needs, taken between ticks.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub segments: Vec<Position>,
    pub apple: Position,
    pub score: u32,
    pub high_score: u32,
    pub state: PlayState,
    pub snake_color: Color,
}

/// Inclusive bounds of the region apples are placed in.
pub fn apple_window() -> (Position, Position) {
    let (cells_x, cells_y) = apple_window_cells();
    let min = Position::new(
        WIDTH / 2 - (cells_x / 2) * DOT_SIZE,
        HEIGHT / 2 - (cells_y / 2) * DOT_SIZE,
    );
    let max = Position::new(
        min.x + (cells_x - 1) * DOT_SIZE,
        min.y + (cells_y - 1) * DOT_SIZE,
    );
    (min, max)
}

/// Apples land in the middle half of the board on each axis.
fn apple_window_cells() -> (i32, i32) {
    ((WIDTH / DOT_SIZE) / 2, (HEIGHT / DOT_SIZE) / 2)
}

fn in_bounds(position: Position) -> bool {
    (0..WIDTH).contains(&position.x) && (0..HEIGHT).contains(&position.y)
}

/// The single simulation instance. `reset` reinitializes it in place.
#[derive(Resource)]
pub struct SnakeSimulation {
    /// Head first.
    body: Vec<Position>,
    heading: Direction,
    apple: Position,
    score: u32,
    high_score: u32,
    state: PlayState,
    color_effect: ColorEffect,
    rng: StdRng,
}

impl Default for SnakeSimulation {
    fn default() -> Self {
        SnakeSimulation::with_rng(StdRng::from_os_rng())
    }
}

impl SnakeSimulation {
    /// Creates a simulation drawing apple positions and flash colors from `rng`.
    pub fn with_rng(rng: StdRng) -> Self {
        let mut simulation = SnakeSimulation {
            body: Vec::with_capacity(ALL_DOTS),
            heading: Direction::Right,
            apple: Position::default(),
            score: 0,
            high_score: 0,
            state: PlayState::NotStarted,
            color_effect: ColorEffect::inactive(),
            rng,
        };
        simulation.reset();
        simulation
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn apple(&self) -> Position {
        self.apple
    }

    pub fn state(&self) -> PlayState {
        self.state
    }

    pub fn snake_color(&self) -> Color {
        self.color_effect.color()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            segments: self.body.clone(),
            apple: self.apple,
            score: self.score,
            high_score: self.high_score,
            state: self.state,
            snake_color: self.snake_color(),
        }
    }

    /// Turns the snake unless `direction` would reverse it onto itself.
    pub fn set_heading(&mut self, direction: Direction) {
        if direction != self.heading.opposite() {
            self.heading = direction;
        }
    }

    /// Starts the round. Only legal before the first move of a fresh round.
    pub fn resume(&mut self) -> Vec<SimEvent> {
        if self.state != PlayState::NotStarted {
            return Vec::new();
        }
        self.state = PlayState::Playing;
        vec![SimEvent::Started]
    }

    /// Puts everything except the high score back to the start-of-round state.
    pub fn reset(&mut self) -> Vec<SimEvent> {
        self.body.clear();
        self.body.extend(
            (0..INITIAL_DOTS as i32).map(|i| Position::new(WIDTH / 2 - i * DOT_SIZE, HEIGHT / 2)),
        );
        self.heading = Direction::Right;
        self.score = 0;
        self.state = PlayState::NotStarted;
        self.color_effect.clear();
        self.place_apple();
        vec![SimEvent::Reset]
    }

    /// Advances the snake by one cell, then resolves apples and collisions.
    pub fn tick(&mut self) -> Vec<SimEvent> {
        let mut events = Vec::new();
        if self.state != PlayState::Playing {
            return events;
        }

        let Some(&vacated) = self.body.last() else {
            return events;
        };
        for i in (1..self.body.len()).rev() {
            self.body[i] = self.body[i - 1];
        }
        self.body[0] = self.body[0].step(self.heading);
        let head = self.body[0];

        if head.collides_with(&self.apple) {
            if self.body.len() < ALL_DOTS {
                self.body.push(vacated);
            }
            self.score += 1;
            events.push(SimEvent::AppleEaten {
                position: head,
                score: self.score,
            });
            self.place_apple();

            if self.score % COLOR_EFFECT_EVERY == 0 && self.color_effect.activate(&mut self.rng) {
                events.push(SimEvent::ColorEffectStarted);
            }
        }

        if let Some(cause) = self.collision() {
            self.state = PlayState::GameOver;
            self.high_score = self.high_score.max(self.score);
            events.push(SimEvent::GameOver {
                cause,
                score: self.score,
                high_score: self.high_score,
            });
            if self.color_effect.is_active() {
                self.color_effect.clear();
                events.push(SimEvent::ColorEffectEnded);
            }
        }

        events
    }

    /// Lets timed effects run for `delta` of simulated time.
    pub fn advance_effects(&mut self, delta: Duration) -> Vec<SimEvent> {
        if self.color_effect.advance(delta, &mut self.rng) {
            vec![SimEvent::ColorEffectEnded]
        } else {
            Vec::new()
        }
    }

    fn collision(&self) -> Option<Collision> {
        let head = self.head();
        if self
            .body
            .iter()
            .skip(SELF_COLLISION_GRACE + 1)
            .any(|segment| segment.collides_with(&head))
        {
            Some(Collision::SelfBite)
        } else if !in_bounds(head) {
            Some(Collision::Wall)
        } else {
            None
        }
    }

    // May land on the snake.
    fn place_apple(&mut self) {
        let (min, max) = apple_window();
        self.apple = Position::new(
            self.rng.random_range(min.x / DOT_SIZE..=max.x / DOT_SIZE) * DOT_SIZE,
            self.rng.random_range(min.y / DOT_SIZE..=max.y / DOT_SIZE) * DOT_SIZE,
        );
    }
}

#[cfg(test)]
impl SnakeSimulation {
    pub(crate) fn seeded(seed: u64) -> Self {
        SnakeSimulation::with_rng(StdRng::seed_from_u64(seed))
    }

    pub(crate) fn score(&self) -> u32 {
        self.score
    }

    pub(crate) fn high_score(&self) -> u32 {
        self.high_score
    }

    pub(crate) fn body(&self) -> &[Position] {
        &self.body
    }

    pub(crate) fn dots(&self) -> usize {
        self.body.len()
    }

    pub(crate) fn heading(&self) -> Direction {
        self.heading
    }

    pub(crate) fn color_effect_active(&self) -> bool {
        self.color_effect.is_active()
    }

    pub(crate) fn set_apple(&mut self, apple: Position) {
        self.apple = apple;
    }

    pub(crate) fn set_body(&mut self, body: Vec<Position>) {
        self.body = body;
    }

    pub(crate) fn set_score(&mut self, score: u32) {
        self.score = score;
    }
}
