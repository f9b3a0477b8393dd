//! Core game module containing shared components, resources, events, constants,
//! and the snake simulation itself.

mod components;
mod constants;
mod events;
mod resources;
mod simulation;

pub use components::*;
pub use constants::*;
pub use events::*;
pub use resources::*;
pub use simulation::*;
