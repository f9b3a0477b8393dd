use bevy::{prelude::*, window::WindowResolution};
use bevy_vector_shapes::prelude::*;

mod audio;
mod game;
mod input;
mod rendering;
mod snake;
mod ui;

use audio::SoundPlugin;
use game::{BOARD_COLOR, WINDOW_HEIGHT, WINDOW_WIDTH};
use input::ControlsPlugin;
use rendering::RenderingPlugin;
use snake::SnakePlugin;
use ui::UiPlugin;

fn main() {
    App::new()
        .add_plugins((
            DefaultPlugins.set(WindowPlugin {
                primary_window: Some(Window {
                    resolution: WindowResolution::new(WINDOW_WIDTH, WINDOW_HEIGHT),
                    title: "Snake Game".to_string(),
                    resizable: false,
                    ..default()
                }),
                ..default()
            }),
            Shape2dPlugin::default(),
        ))
        .insert_resource(ClearColor(BOARD_COLOR))
        .add_systems(PreStartup, announce_startup)
        .add_plugins((
            ControlsPlugin,
            SnakePlugin,
            RenderingPlugin,
            UiPlugin,
            SoundPlugin,
        ))
        .run();
}

fn announce_startup() {
    info!("Initializing Snake Game...");
}
