//! Game constants for board size, timing, colors, and rendering layers.

use bevy::prelude::*;
use std::time::Duration;

// Board dimensions, in pixels
pub const WIDTH: i32 = 400;
pub const HEIGHT: i32 = 400;
pub const DOT_SIZE: i32 = 20;

/// Maximum number of cells the snake can ever occupy.
pub const ALL_DOTS: usize = ((WIDTH * HEIGHT) / (DOT_SIZE * DOT_SIZE)) as usize;

// Snake rules
pub const INITIAL_DOTS: usize = 3;
/// Trailing segments right behind the head that never count as a self-collision.
pub const SELF_COLLISION_GRACE: usize = 4;
pub const COLOR_EFFECT_EVERY: u32 = 5;

// Timing
pub const TICK_INTERVAL: Duration = Duration::from_millis(130);
pub const COLOR_EFFECT_DURATION: Duration = Duration::from_millis(3000);
pub const COLOR_EFFECT_FLICKER: Duration = Duration::from_millis(100);
pub const SCORE_POPUP_DURATION: Duration = Duration::from_millis(1000);

// Window layout
pub const INFO_PANEL_HEIGHT: f32 = 50.0;
pub const CONTROL_BAR_HEIGHT: f32 = 40.0;
pub const WINDOW_WIDTH: u32 = WIDTH as u32;
pub const WINDOW_HEIGHT: u32 = HEIGHT as u32 + INFO_PANEL_HEIGHT as u32 + CONTROL_BAR_HEIGHT as u32;
/// Vertical shift of the board center so it sits between the two panels.
pub const BOARD_OFFSET_Y: f32 = (CONTROL_BAR_HEIGHT - INFO_PANEL_HEIGHT) / 2.0;

// Colors
pub const DEFAULT_SNAKE_COLOR: Color = Color::srgb(0.306, 0.663, 0.169);
pub const APPLE_COLOR: Color = Color::srgb(1.0, 0.0, 0.0);
pub const BOARD_COLOR: Color = Color::BLACK;
pub const BOARD_BORDER_COLOR: Color = Color::srgba(1.0, 0.65, 0.0, 0.6);
pub const PANEL_COLOR: Color = Color::srgb(1.0, 0.65, 0.0);
pub const GAME_OVER_COLOR: Color = Color::srgb(0.824, 0.004, 0.012);
pub const RELOAD_BUTTON_COLOR: Color = Color::srgb(0.212, 0.337, 0.894);
pub const RELOAD_BUTTON_HOVER_COLOR: Color = Color::srgb(0.329, 0.455, 1.0);

// Z-index constants for rendering layers
pub const Z_BOARD: f32 = 0.0;
pub const Z_APPLE: f32 = 1.0;
pub const Z_SNAKE: f32 = 1.5;
