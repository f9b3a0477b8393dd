//! Sound plugin - loads the sound library and plays clips for simulation events.

use bevy::asset::LoadState;
use bevy::audio::{AudioPlayer, AudioSource, PlaybackSettings};
use bevy::prelude::*;
use std::collections::{HashMap, HashSet};

use crate::game::{AmbiencePlayer, GameOverPlayer, SimEvent, SoundCue};
use crate::snake::SimulationSet;

/// Clips expected under `assets/sounds/`, by file stem.
const CLIP_NAMES: [&str; 3] = ["collect", "game_over", "ambience"];

/// Plugin for sound playback.
pub struct SoundPlugin;

impl Plugin for SoundPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_sounds).add_systems(
            Update,
            (report_failed_sounds, play_sound_cues.after(SimulationSet)),
        );
    }
}

/// Loaded clips. A clip that fails to load stays silent; the game keeps running.
#[derive(Resource, Default)]
pub struct SoundLibrary {
    clips: HashMap<&'static str, Handle<AudioSource>>,
    reported: HashSet<&'static str>,
}

impl SoundLibrary {
    fn clip(&self, name: &str) -> Option<Handle<AudioSource>> {
        let clip = self.clips.get(name).cloned();
        if clip.is_none() {
            warn!("Sound not found: {}", name);
        }
        clip
    }
}

/// File stem of the clip a cue plays or stops.
pub fn clip_name(cue: SoundCue) -> &'static str {
    match cue {
        SoundCue::Collect => "collect",
        SoundCue::GameOver => "game_over",
        SoundCue::AmbienceStart | SoundCue::AmbienceStop => "ambience",
    }
}

/// Startup system to queue every clip for loading and start the ambience loop.
fn load_sounds(mut commands: Commands, asset_server: Res<AssetServer>) {
    info!("Loading local sounds...");

    let mut library = SoundLibrary::default();
    for name in CLIP_NAMES {
        library
            .clips
            .insert(name, asset_server.load(format!("sounds/{}.wav", name)));
    }

    if let Some(ambience) = library.clip(clip_name(SoundCue::AmbienceStart)) {
        commands.spawn((AudioPlayer::new(ambience), PlaybackSettings::LOOP, AmbiencePlayer));
    }
    commands.insert_resource(library);
}

/// System to log each clip that could not be loaded, once.
fn report_failed_sounds(asset_server: Res<AssetServer>, library: Option<ResMut<SoundLibrary>>) {
    let Some(mut library) = library else {
        return;
    };
    let SoundLibrary { clips, reported } = &mut *library;

    for (name, handle) in clips.iter() {
        if let LoadState::Failed(err) = asset_server.load_state(handle)
            && reported.insert(*name)
        {
            warn!("Error loading sound file {}.wav: {}", name, err);
        }
    }
}

/// System to translate simulation events into clip playback.
fn play_sound_cues(
    mut commands: Commands,
    mut event_reader: MessageReader<SimEvent>,
    library: Option<Res<SoundLibrary>>,
    ambience: Query<Entity, With<AmbiencePlayer>>,
    game_over: Query<Entity, With<GameOverPlayer>>,
) {
    let Some(library) = library else {
        event_reader.clear();
        return;
    };

    for event in event_reader.read() {
        for &cue in event.sound_cues() {
            debug!("Sound cue: {}", cue.name());
            match cue {
                SoundCue::Collect => {
                    if let Some(clip) = library.clip(clip_name(cue)) {
                        commands.spawn((AudioPlayer::new(clip), PlaybackSettings::DESPAWN));
                    }
                }
                SoundCue::GameOver => {
                    if let Some(clip) = library.clip(clip_name(cue)) {
                        commands.spawn((
                            AudioPlayer::new(clip),
                            PlaybackSettings::DESPAWN,
                            GameOverPlayer,
                        ));
                    }
                }
                SoundCue::AmbienceStart => {
                    for entity in ambience.iter().chain(game_over.iter()) {
                        commands.entity(entity).despawn();
                    }
                    if let Some(clip) = library.clip(clip_name(cue)) {
                        commands.spawn((AudioPlayer::new(clip), PlaybackSettings::LOOP, AmbiencePlayer));
                    }
                }
                SoundCue::AmbienceStop => {
                    for entity in ambience.iter() {
                        commands.entity(entity).despawn();
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_cue_maps_to_a_known_clip() {
        for cue in [
            SoundCue::Collect,
            SoundCue::GameOver,
            SoundCue::AmbienceStart,
            SoundCue::AmbienceStop,
        ] {
            assert!(CLIP_NAMES.contains(&clip_name(cue)), "{}", cue.name());
        }
    }

    #[test]
    fn ambience_start_and_stop_share_a_clip() {
        assert_eq!(
            clip_name(SoundCue::AmbienceStart),
            clip_name(SoundCue::AmbienceStop)
        );
    }

    #[test]
    fn missing_clip_is_silent() {
        let library = SoundLibrary::default();
        assert!(library.clip("collect").is_none());
    }
}
