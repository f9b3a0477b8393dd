//! UI plugin - camera, info panel, start cue, game over screen, and the reload button.

use bevy::prelude::*;

use crate::game::{
    CONTROL_BAR_HEIGHT, GAME_OVER_COLOR, GameCommand, GameOverUI, HEIGHT, INFO_PANEL_HEIGHT,
    InfoText, Intent, PANEL_COLOR, PlayState, RELOAD_BUTTON_COLOR, RELOAD_BUTTON_HOVER_COLOR,
    ReloadButton, RoundTimer, SCORE_POPUP_DURATION, ScorePopup, SimEvent, SnakeSimulation,
    Snapshot, StartLabel,
};
use crate::input::ControlsSet;
use crate::snake::SimulationSet;

/// Plugin for UI and game flow systems.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_system)
            .add_systems(Update, reload_button_interaction.in_set(ControlsSet))
            .add_systems(
                Update,
                (
                    refresh_panels,
                    game_over_screen,
                    spawn_score_popups,
                    expire_score_popups,
                )
                    .chain()
                    .after(SimulationSet),
            );
    }
}

// Type aliases for the two halves of the control bar
type StartLabelQuery<'w, 's> =
    Query<'w, 's, &'static mut Visibility, (With<StartLabel>, Without<ReloadButton>)>;
type ReloadButtonQuery<'w, 's> =
    Query<'w, 's, &'static mut Visibility, (With<ReloadButton>, Without<StartLabel>)>;
type ReloadInteractionQuery<'w, 's> = Query<
    'w,
    's,
    (&'static Interaction, &'static mut BackgroundColor),
    (Changed<Interaction>, With<ReloadButton>),
>;

/// Text shown by an info panel field.
pub fn info_line(field: InfoText, snapshot: &Snapshot, round_timer: &RoundTimer) -> String {
    match field {
        InfoText::Score => format!("Score: {}", snapshot.score),
        InfoText::HighScore => format!("High Score: {}", snapshot.high_score),
        InfoText::Time => format!("Time: {}s", round_timer.whole_seconds()),
    }
}

fn label(text: impl Into<String>, font_size: f32, color: Color) -> (Text, TextFont, TextColor) {
    (
        Text::new(text),
        TextFont {
            font_size,
            ..default()
        },
        TextColor(color),
    )
}

/// Initial setup system - camera, info panel, and control bar.
fn setup_system(mut commands: Commands) {
    commands.spawn(Camera2d);

    // Info panel above the board
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(0.0),
                width: Val::Percent(100.0),
                height: Val::Px(INFO_PANEL_HEIGHT),
                align_items: AlignItems::Center,
                justify_content: JustifyContent::SpaceBetween,
                padding: UiRect::horizontal(Val::Px(10.0)),
                ..default()
            },
            BackgroundColor(PANEL_COLOR),
        ))
        .with_children(|parent| {
            for field in [InfoText::Score, InfoText::HighScore, InfoText::Time] {
                parent.spawn((label("", 15.0, Color::WHITE), field));
            }
        });

    // Control bar below the board
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(0.0),
                width: Val::Percent(100.0),
                height: Val::Px(CONTROL_BAR_HEIGHT),
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                column_gap: Val::Px(12.0),
                ..default()
            },
            BackgroundColor(PANEL_COLOR),
        ))
        .with_children(|parent| {
            parent.spawn((
                label("Press an arrow key to start", 18.0, Color::WHITE),
                StartLabel,
            ));

            parent
                .spawn((
                    Button,
                    Node {
                        padding: UiRect::axes(Val::Px(14.0), Val::Px(4.0)),
                        ..default()
                    },
                    BackgroundColor(RELOAD_BUTTON_COLOR),
                    Visibility::Hidden,
                    ReloadButton,
                ))
                .with_children(|button| {
                    button.spawn(label("Reload", 16.0, Color::WHITE));
                });
        });
}

/// System to refresh the info panel, and to show the start cue before a round
/// and the reload button after it.
fn refresh_panels(
    simulation: Res<SnakeSimulation>,
    round_timer: Res<RoundTimer>,
    mut texts: Query<(&mut Text, &InfoText)>,
    mut start_label: StartLabelQuery,
    mut reload_button: ReloadButtonQuery,
) -> Result {
    let snapshot = simulation.snapshot();
    for (mut text, field) in texts.iter_mut() {
        *text = Text::new(info_line(*field, &snapshot, &round_timer));
    }

    *start_label.single_mut()? = visible_if(snapshot.state == PlayState::NotStarted);
    *reload_button.single_mut()? = visible_if(snapshot.state == PlayState::GameOver);
    Ok(())
}

fn visible_if(shown: bool) -> Visibility {
    if shown {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    }
}

/// System to queue a reload when the button is clicked.
fn reload_button_interaction(
    mut buttons: ReloadInteractionQuery,
    mut command_writer: MessageWriter<GameCommand>,
) {
    for (interaction, mut background) in buttons.iter_mut() {
        match interaction {
            Interaction::Pressed => {
                command_writer.write(GameCommand::Intent(Intent::Reload));
            }
            Interaction::Hovered => *background = BackgroundColor(RELOAD_BUTTON_HOVER_COLOR),
            Interaction::None => *background = BackgroundColor(RELOAD_BUTTON_COLOR),
        }
    }
}

/// System to open the game over screen when a round ends and close it on reset.
fn game_over_screen(
    mut commands: Commands,
    mut event_reader: MessageReader<SimEvent>,
    screens: Query<Entity, With<GameOverUI>>,
) {
    for event in event_reader.read() {
        match *event {
            SimEvent::GameOver {
                score, high_score, ..
            } => spawn_game_over_screen(&mut commands, score, high_score),
            SimEvent::Reset => {
                for entity in screens.iter() {
                    commands.entity(entity).despawn();
                }
            }
            _ => {}
        }
    }
}

/// Spawns the game over screen over the board.
fn spawn_game_over_screen(commands: &mut Commands, score: u32, high_score: u32) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(INFO_PANEL_HEIGHT),
                width: Val::Percent(100.0),
                height: Val::Px(HEIGHT as f32),
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                flex_direction: FlexDirection::Column,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
            GameOverUI,
        ))
        .with_children(|parent| {
            parent.spawn((
                label("Game Over!", 60.0, GAME_OVER_COLOR),
                Node {
                    margin: UiRect::bottom(Val::Px(20.0)),
                    ..default()
                },
            ));
            parent.spawn(label(format!("Score: {}", score), 30.0, Color::WHITE));
            parent.spawn(label(
                format!("High Score: {}", high_score),
                30.0,
                Color::WHITE,
            ));
        });
}

/// System to flash "+1 Score" after each apple.
fn spawn_score_popups(
    mut commands: Commands,
    mut event_reader: MessageReader<SimEvent>,
    popups: Query<Entity, With<ScorePopup>>,
) {
    for event in event_reader.read() {
        match event {
            SimEvent::AppleEaten { .. } => {
                for entity in popups.iter() {
                    commands.entity(entity).despawn();
                }
                commands.spawn((
                    label("+1 Score", 20.0, Color::srgb(0.0, 1.0, 0.0)),
                    Node {
                        position_type: PositionType::Absolute,
                        right: Val::Px(10.0),
                        bottom: Val::Px(CONTROL_BAR_HEIGHT + 6.0),
                        ..default()
                    },
                    ScorePopup {
                        timer: Timer::new(SCORE_POPUP_DURATION, TimerMode::Once),
                    },
                ));
            }
            SimEvent::GameOver { .. } | SimEvent::Reset => {
                for entity in popups.iter() {
                    commands.entity(entity).despawn();
                }
            }
            _ => {}
        }
    }
}

/// System to remove score popups once their time is up.
fn expire_score_popups(
    mut commands: Commands,
    time: Res<Time>,
    mut popups: Query<(Entity, &mut ScorePopup)>,
) {
    for (entity, mut popup) in popups.iter_mut() {
        popup.timer.tick(time.delta());
        if popup.timer.is_finished() {
            commands.entity(entity).despawn();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn info_panel_lines() {
        let snapshot = SnakeSimulation::seeded(3).snapshot();
        let round_timer = RoundTimer {
            elapsed: Duration::from_millis(12_900),
        };

        assert_eq!(
            info_line(InfoText::Score, &snapshot, &round_timer),
            "Score: 0"
        );
        assert_eq!(
            info_line(InfoText::HighScore, &snapshot, &round_timer),
            "High Score: 0"
        );
        assert_eq!(
            info_line(InfoText::Time, &snapshot, &round_timer),
            "Time: 12s"
        );
    }

    #[test]
    fn hidden_controls_stay_hidden() {
        assert_eq!(visible_if(false), Visibility::Hidden);
        assert_eq!(visible_if(true), Visibility::Inherited);
    }
}
