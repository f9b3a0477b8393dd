//! Rendering plugin - draws the board, the snake, and the apple from simulation snapshots.

use bevy::prelude::*;
use bevy_vector_shapes::prelude::*;

use crate::game::{
    APPLE_COLOR, AppleMarker, BOARD_BORDER_COLOR, BOARD_COLOR, BOARD_OFFSET_Y, DOT_SIZE, HEIGHT,
    Position, SnakeSegmentSprite, SnakeSimulation, WIDTH, Z_APPLE, Z_BOARD, Z_SNAKE,
};
use crate::snake::SimulationSet;

/// Plugin for drawing the board.
pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_board).add_systems(
            Update,
            draw_snapshot.after(SimulationSet),
        );
    }
}

// Type aliases for the segment sprites and the apple shape
type SegmentQuery<'w, 's> = Query<
    'w,
    's,
    (
        Entity,
        &'static SnakeSegmentSprite,
        &'static mut Transform,
        &'static mut Sprite,
    ),
    Without<AppleMarker>,
>;
type AppleQuery<'w, 's> =
    Query<'w, 's, &'static mut Transform, (With<AppleMarker>, Without<SnakeSegmentSprite>)>;

/// Center of a cell in world space. The board's pixel grid grows downwards from its
/// top-left corner, world space grows upwards from the window center.
pub fn cell_to_world(position: Position) -> Vec2 {
    let half = DOT_SIZE as f32 / 2.0;
    Vec2::new(
        position.x as f32 - WIDTH as f32 / 2.0 + half,
        HEIGHT as f32 / 2.0 - position.y as f32 - half + BOARD_OFFSET_Y,
    )
}

fn segment_sprite(color: Color) -> Sprite {
    Sprite::from_color(color, Vec2::splat(DOT_SIZE as f32))
}

/// Startup system - board background, border, and the apple.
fn spawn_board(mut commands: Commands, simulation: Res<SnakeSimulation>) {
    let board_size = Vec2::new(WIDTH as f32, HEIGHT as f32);

    commands.spawn((
        Sprite::from_color(BOARD_COLOR, board_size),
        Transform::from_xyz(0.0, BOARD_OFFSET_Y, Z_BOARD),
    ));

    commands.spawn(ShapeBundle::rect(
        &ShapeConfig {
            color: BOARD_BORDER_COLOR,
            alpha_mode: ShapeAlphaMode::Add,
            hollow: true,
            thickness: 2.0,
            transform: Transform::from_xyz(0.0, BOARD_OFFSET_Y, Z_BOARD + 0.1),
            ..ShapeConfig::default_2d()
        },
        board_size + Vec2::splat(2.0),
    ));

    let apple = cell_to_world(simulation.apple());
    commands.spawn((
        ShapeBundle::circle(
            &ShapeConfig {
                color: APPLE_COLOR,
                transform: Transform::from_xyz(apple.x, apple.y, Z_APPLE),
                ..ShapeConfig::default_2d()
            },
            DOT_SIZE as f32 / 2.0,
        ),
        AppleMarker,
    ));
}

/// System to keep one sprite per body segment and the apple shape in step with
/// the latest snapshot.
fn draw_snapshot(
    mut commands: Commands,
    simulation: Res<SnakeSimulation>,
    mut sprites: SegmentQuery,
    mut apple: AppleQuery,
) -> Result {
    let snapshot = simulation.snapshot();
    apple.single_mut()?.translation = cell_to_world(snapshot.apple).extend(Z_APPLE);

    let mut drawn = 0;

    for (entity, segment, mut transform, mut sprite) in sprites.iter_mut() {
        match snapshot.segments.get(segment.0) {
            Some(&position) => {
                transform.translation = cell_to_world(position).extend(Z_SNAKE);
                sprite.color = snapshot.snake_color;
                drawn += 1;
            }
            None => commands.entity(entity).despawn(),
        }
    }

    for (index, &position) in snapshot.segments.iter().enumerate().skip(drawn) {
        commands.spawn((
            segment_sprite(snapshot.snake_color),
            Transform::from_translation(cell_to_world(position).extend(Z_SNAKE)),
            SnakeSegmentSprite(index),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_corners_map_to_cell_centers() {
        let top_left = cell_to_world(Position::new(0, 0));
        assert_eq!(top_left, Vec2::new(-190.0, 190.0 + BOARD_OFFSET_Y));

        let bottom_right = cell_to_world(Position::new(WIDTH - DOT_SIZE, HEIGHT - DOT_SIZE));
        assert_eq!(bottom_right, Vec2::new(190.0, -190.0 + BOARD_OFFSET_Y));
    }

    #[test]
    fn moving_down_the_grid_moves_down_the_screen() {
        let above = cell_to_world(Position::new(100, 100));
        let below = cell_to_world(Position::new(100, 120));
        assert!(below.y < above.y);
        assert_eq!(above.x, below.x);
    }
}
