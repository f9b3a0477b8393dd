//! Game events (messages).

use bevy::prelude::*;

use super::{Direction, Position};

/// Logical command derived from a raw key or a UI control.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Intent {
    Move(Direction),
    Reload,
}

/// Everything that mutates the simulation goes through this queue, one command at a time.
#[derive(Message, Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameCommand {
    Intent(Intent),
    Tick,
}

/// What ended the round.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Collision {
    Wall,
    SelfBite,
}

/// Observable outcome of a simulation operation.
#[derive(Message, Clone, Copy, PartialEq, Eq, Debug)]
pub enum SimEvent {
    Started,
    AppleEaten { position: Position, score: u32 },
    ColorEffectStarted,
    ColorEffectEnded,
    GameOver { cause: Collision, score: u32, high_score: u32 },
    Reset,
}

impl SimEvent {
    /// Sound cues triggered by this event, in playing order.
    pub fn sound_cues(&self) -> &'static [SoundCue] {
        match self {
            SimEvent::Started => &[SoundCue::AmbienceStart],
            SimEvent::AppleEaten { .. } => &[SoundCue::Collect],
            SimEvent::GameOver { .. } => &[SoundCue::AmbienceStop, SoundCue::GameOver],
            SimEvent::ColorEffectStarted | SimEvent::ColorEffectEnded | SimEvent::Reset => &[],
        }
    }
}

/// Named trigger for the sound player.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum SoundCue {
    Collect,
    GameOver,
    AmbienceStart,
    AmbienceStop,
}

impl SoundCue {
    pub fn name(&self) -> &'static str {
        match self {
            SoundCue::Collect => "collect",
            SoundCue::GameOver => "game_over",
            SoundCue::AmbienceStart => "ambience_start",
            SoundCue::AmbienceStop => "ambience_stop",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_over_stops_ambience_before_playing_the_clip() {
        let event = SimEvent::GameOver {
            cause: Collision::Wall,
            score: 3,
            high_score: 3,
        };
        let names: Vec<_> = event.sound_cues().iter().map(SoundCue::name).collect();
        assert_eq!(names, ["ambience_stop", "game_over"]);
    }

    #[test]
    fn silent_events_have_no_cues() {
        assert!(SimEvent::Reset.sound_cues().is_empty());
        assert!(SimEvent::ColorEffectStarted.sound_cues().is_empty());
    }
}
