//! ECS components and the small value types shared across plugins.

use bevy::prelude::*;

use super::DOT_SIZE;

/// Cell-aligned position on the board, in pixels from the top-left corner.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    /// Check if this position collides with another position.
    pub fn collides_with(&self, other: &Position) -> bool {
        self.x == other.x && self.y == other.y
    }

    /// The neighbouring cell one step away in `direction`.
    pub fn step(&self, direction: Direction) -> Position {
        match direction {
            Direction::Left => Position::new(self.x - DOT_SIZE, self.y),
            Direction::Right => Position::new(self.x + DOT_SIZE, self.y),
            Direction::Up => Position::new(self.x, self.y - DOT_SIZE),
            Direction::Down => Position::new(self.x, self.y + DOT_SIZE),
        }
    }
}

/// Direction enum for snake movement.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Returns the opposite direction.
    pub fn opposite(&self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }
}

/// Sprite drawing the body segment at this index.
#[derive(Component)]
pub struct SnakeSegmentSprite(pub usize);

/// Component to mark the apple entity.
#[derive(Component)]
pub struct AppleMarker;

/// Info panel text and the value it shows.
#[derive(Component, Clone, Copy, PartialEq, Eq, Debug)]
pub enum InfoText {
    Score,
    HighScore,
    Time,
}

/// Component to mark the "press a key" label.
#[derive(Component)]
pub struct StartLabel;

/// Component to mark the game over overlay UI.
#[derive(Component)]
pub struct GameOverUI;

/// Component to mark the reload button.
#[derive(Component)]
pub struct ReloadButton;

/// Transient "+1 Score" label.
#[derive(Component)]
pub struct ScorePopup {
    pub timer: Timer,
}

/// Looping ambience player.
#[derive(Component)]
pub struct AmbiencePlayer;

/// One-shot game over clip, kept so a new round can cut it off.
#[derive(Component)]
pub struct GameOverPlayer;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_moves_one_cell() {
        let origin = Position::new(200, 200);
        assert_eq!(origin.step(Direction::Left), Position::new(180, 200));
        assert_eq!(origin.step(Direction::Right), Position::new(220, 200));
        assert_eq!(origin.step(Direction::Up), Position::new(200, 180));
        assert_eq!(origin.step(Direction::Down), Position::new(200, 220));
    }

    #[test]
    fn opposite_is_an_involution() {
        for direction in [Direction::Left, Direction::Right, Direction::Up, Direction::Down] {
            assert_ne!(direction, direction.opposite());
            assert_eq!(direction, direction.opposite().opposite());
        }
    }
}
