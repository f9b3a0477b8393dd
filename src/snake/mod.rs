//! Snake plugin - owns the simulation, the tick clock, and the command queue that
//! serializes every mutation of game state.

use bevy::prelude::*;
use std::time::Duration;

use crate::game::{Clock, GameCommand, PlayState, RoundTimer, SimEvent, SnakeSimulation};
use crate::input::{Action, ControlsSet, route};

/// Plugin for the game loop.
pub struct SnakePlugin;

impl Plugin for SnakePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SnakeSimulation>()
            .init_resource::<Clock>()
            .init_resource::<RoundTimer>()
            .add_message::<GameCommand>()
            .add_message::<SimEvent>()
            .add_systems(
                Update,
                (
                    advance_effects,
                    advance_round_timer,
                    advance_clock,
                    process_commands,
                )
                    .chain()
                    .in_set(SimulationSet)
                    .after(ControlsSet),
            );
    }
}

/// Systems that mutate the simulation. Presentation runs after this set.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct SimulationSet;

/// System to turn elapsed time into tick commands.
fn advance_clock(
    time: Res<Time>,
    mut clock: ResMut<Clock>,
    mut command_writer: MessageWriter<GameCommand>,
) {
    for _ in 0..clock.advance(time.delta()) {
        command_writer.write(GameCommand::Tick);
    }
}

/// System to apply queued commands to the simulation in arrival order.
fn process_commands(
    mut command_reader: MessageReader<GameCommand>,
    mut simulation: ResMut<SnakeSimulation>,
    mut clock: ResMut<Clock>,
    mut round_timer: ResMut<RoundTimer>,
    mut event_writer: MessageWriter<SimEvent>,
) {
    for command in command_reader.read() {
        let events = match *command {
            GameCommand::Tick => simulation.tick(),
            GameCommand::Intent(intent) => match route(intent, simulation.state()) {
                Some(Action::Start) => {
                    round_timer.elapsed = Duration::ZERO;
                    let events = simulation.resume();
                    clock.start();
                    events
                }
                Some(Action::Steer(direction)) => {
                    simulation.set_heading(direction);
                    Vec::new()
                }
                Some(Action::Reset) => {
                    // A tick still in flight must not touch the fresh round.
                    clock.stop();
                    round_timer.elapsed = Duration::ZERO;
                    simulation.reset()
                }
                None => Vec::new(),
            },
        };

        for event in events {
            log_event(&event);
            if matches!(event, SimEvent::GameOver { .. }) {
                clock.stop();
            }
            event_writer.write(event);
        }
    }
}

fn log_event(event: &SimEvent) {
    match event {
        SimEvent::Started => info!("Game started"),
        SimEvent::AppleEaten { position, score } => {
            debug!("Apple eaten at ({}, {}), score {}", position.x, position.y, score)
        }
        SimEvent::ColorEffectStarted => debug!("Color effect started"),
        SimEvent::ColorEffectEnded => debug!("Color effect ended"),
        SimEvent::GameOver {
            cause,
            score,
            high_score,
        } => info!(
            "Game over ({:?})! Final score: {}, high score: {}",
            cause, score, high_score
        ),
        SimEvent::Reset => info!("Game reset"),
    }
}

/// System to run the timed color effect on simulated time.
fn advance_effects(
    time: Res<Time>,
    mut simulation: ResMut<SnakeSimulation>,
    mut event_writer: MessageWriter<SimEvent>,
) {
    for event in simulation.advance_effects(time.delta()) {
        log_event(&event);
        event_writer.write(event);
    }
}

/// System to count playing time for the info panel.
fn advance_round_timer(
    time: Res<Time>,
    simulation: Res<SnakeSimulation>,
    mut round_timer: ResMut<RoundTimer>,
) {
    if simulation.state() == PlayState::Playing {
        round_timer.elapsed += time.delta();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::time::TimeUpdateStrategy;

    use crate::game::{DOT_SIZE, Direction, Intent, Position, TICK_INTERVAL};
    use crate::input::ControlsPlugin;

    const PARKED_APPLE: Position = Position::new(0, 380);

    /// Headless app where every update advances time by exactly one tick interval.
    /// The very first update sees no elapsed time.
    fn test_app() -> App {
        test_app_with_step(TICK_INTERVAL)
    }

    fn test_app_with_step(step: Duration) -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<ButtonInput<KeyCode>>()
            .add_plugins((ControlsPlugin, SnakePlugin));
        app.insert_resource(TimeUpdateStrategy::ManualDuration(step));

        let mut simulation = SnakeSimulation::seeded(42);
        simulation.set_apple(PARKED_APPLE);
        app.insert_resource(simulation);
        app
    }

    fn press(app: &mut App, key: KeyCode) {
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(key);
        app.update();
        let mut keys = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        keys.release(key);
        keys.clear();
    }

    fn simulation(app: &App) -> &SnakeSimulation {
        app.world().resource::<SnakeSimulation>()
    }

    #[test]
    fn movement_key_starts_the_round() {
        let mut app = test_app();
        press(&mut app, KeyCode::ArrowUp);

        assert_eq!(simulation(&app).state(), PlayState::Playing);
        assert_eq!(simulation(&app).heading(), Direction::Right);
        assert!(app.world().resource::<Clock>().is_running());
    }

    #[test]
    fn clock_ticks_move_the_snake() {
        let mut app = test_app();
        press(&mut app, KeyCode::KeyD);
        let start = simulation(&app).head();

        app.update();
        assert_eq!(simulation(&app).head().x, start.x + DOT_SIZE);
        app.update();
        assert_eq!(simulation(&app).head().x, start.x + 2 * DOT_SIZE);
    }

    #[test]
    fn steering_is_applied_before_the_next_tick() {
        let mut app = test_app();
        press(&mut app, KeyCode::ArrowRight);
        let start = simulation(&app).head();

        press(&mut app, KeyCode::ArrowUp);

        assert_eq!(simulation(&app).heading(), Direction::Up);
        assert_eq!(simulation(&app).head(), Position::new(start.x, start.y - DOT_SIZE));
    }

    #[test]
    fn nothing_moves_before_the_first_key() {
        let mut app = test_app();
        let start = simulation(&app).head();
        app.update();
        app.update();

        assert_eq!(simulation(&app).head(), start);
        assert!(!app.world().resource::<Clock>().is_running());
    }

    #[test]
    fn collision_stops_the_clock_and_locks_input() {
        let mut app = test_app();
        press(&mut app, KeyCode::ArrowRight);
        app.world_mut()
            .resource_mut::<SnakeSimulation>()
            .set_body(vec![
                Position::new(380, 200),
                Position::new(360, 200),
                Position::new(340, 200),
            ]);

        app.update();
        assert_eq!(simulation(&app).state(), PlayState::GameOver);
        assert!(!app.world().resource::<Clock>().is_running());

        press(&mut app, KeyCode::ArrowUp);
        assert_eq!(simulation(&app).state(), PlayState::GameOver);
        assert_eq!(simulation(&app).heading(), Direction::Right);
    }

    #[test]
    fn reload_returns_to_a_fresh_round() {
        let mut app = test_app();
        press(&mut app, KeyCode::ArrowRight);
        app.world_mut()
            .resource_mut::<SnakeSimulation>()
            .set_body(vec![Position::new(380, 200), Position::new(360, 200)]);
        app.update();
        assert_eq!(simulation(&app).state(), PlayState::GameOver);

        app.world_mut()
            .write_message(GameCommand::Intent(Intent::Reload));
        app.update();

        assert_eq!(simulation(&app).state(), PlayState::NotStarted);
        assert_eq!(simulation(&app).dots(), 3);
        assert_eq!(simulation(&app).score(), 0);
        assert_eq!(app.world().resource::<RoundTimer>().elapsed, Duration::ZERO);
        assert!(!app.world().resource::<Clock>().is_running());
    }

    #[test]
    fn round_timer_counts_only_while_playing() {
        let mut app = test_app();
        app.update();
        assert_eq!(app.world().resource::<RoundTimer>().elapsed, Duration::ZERO);

        press(&mut app, KeyCode::ArrowRight);
        app.update();
        app.update();
        assert_eq!(
            app.world().resource::<RoundTimer>().elapsed,
            TICK_INTERVAL * 2
        );
    }

    #[test]
    fn color_effect_spans_three_seconds_of_frames() {
        let mut app = test_app_with_step(Duration::from_millis(100));
        press(&mut app, KeyCode::ArrowRight);
        {
            let mut simulation = app.world_mut().resource_mut::<SnakeSimulation>();
            simulation.set_score(4);
            let ahead = simulation.head().step(Direction::Right);
            simulation.set_apple(ahead);
        }

        let mut frames = 0;
        while !simulation(&app).color_effect_active() {
            app.update();
            frames += 1;
            assert!(frames < 10, "the apple was never eaten");
        }
        // Keep the snake off the wall while the effect runs out.
        app.world_mut().resource_mut::<Clock>().stop();

        let mut lit = 0;
        while simulation(&app).color_effect_active() {
            app.update();
            lit += 1;
            assert!(lit <= 30, "the effect outlived its window");
        }
        assert_eq!(lit, 30);
    }
}
