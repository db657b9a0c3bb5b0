// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Game tuning, loadable from RON.
//!
//! Every field has a default, so a config file only needs the values it
//! changes:
//!
//! ```ron
//! (
//!     door: (angular_speed: 1.5),
//!     stalker: (spawn_chance: 1.0),
//!     rng_seed: Some(7),
//! )
//! ```

use crate::subtitle::{SubtitleOptions, SubtitleOverrides};
use limen_agents::audio_agent::AudioEngineOptions;
use limen_core::math::{Vec3, FRAC_PI_2};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Failure to load a [`GameConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not valid RON for a `GameConfig`.
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// All game tuning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Audio engine options and the asset table.
    pub audio: AudioConfig,
    /// Portal doors.
    pub door: DoorConfig,
    /// The man in the chair.
    pub sitter: SitterConfig,
    /// The man behind you.
    pub stalker: StalkerConfig,
    /// Radio narration.
    pub narration: NarrationConfig,
    /// The ticking wall clock.
    pub clock: ClockConfig,
    /// Names of scene objects the game systems look up.
    pub scene: SceneNames,
    /// Seed for every random choice; entropy when absent.
    pub rng_seed: Option<u64>,
}

impl GameConfig {
    /// Parses a RON document.
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(source)?)
    }

    /// Reads and parses a RON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let config = Self::from_ron_str(&source)?;
        log::info!("Loaded game config from {}", path.display());
        Ok(config)
    }
}

/// Audio engine options plus where sounds live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Engine tuning, including initial bus gains.
    pub engine: AudioEngineOptions,
    /// Explicit `name -> url` bindings.
    pub assets: BTreeMap<String, String>,
    /// URL prefix of sounds without an explicit binding.
    pub asset_prefix: String,
    /// File extension of sounds without an explicit binding.
    pub asset_extension: String,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            engine: AudioEngineOptions::default(),
            assets: BTreeMap::new(),
            asset_prefix: "/audio/".to_owned(),
            asset_extension: "mp3".to_owned(),
        }
    }
}

impl AudioConfig {
    /// Where the sound called `name` is fetched from.
    pub fn url_for(&self, name: &str) -> String {
        match self.assets.get(name) {
            Some(url) => url.clone(),
            None => format!("{}{}.{}", self.asset_prefix, name, self.asset_extension),
        }
    }
}

/// The forced walk through the start door after it opens.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkInConfig {
    /// How long the walk takes.
    pub duration_secs: f32,
    /// Base walk distance; half the distance to the door is added.
    pub base_distance: f32,
    /// Offset from the door of the point the camera turns to.
    pub look_offset: Vec3,
    /// Turn rate towards the look point.
    pub look_slerp: f32,
    /// Delay before walking.
    pub move_delay_secs: f32,
}

impl Default for WalkInConfig {
    fn default() -> Self {
        Self {
            duration_secs: 2.8,
            base_distance: 2.6,
            look_offset: Vec3::new(-10.0, 0.0, 0.0),
            look_slerp: 2.5,
            move_delay_secs: 0.35,
        }
    }
}

/// Portal door tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoorConfig {
    /// Door swing speed in radians per second.
    pub angular_speed: f32,
    /// How far the start door swings open.
    pub open_angle: f32,
    /// Interact range of the start door.
    pub interact_range: f32,
    /// Range within which the end door reacts.
    pub teleport_range: f32,
    /// Farther than this from the end door, the player is walked closer
    /// before teleporting.
    pub approach_threshold: f32,
    /// Length of the approach walk.
    pub approach_duration_secs: f32,
    /// Distance past the end door the approach walk aims for.
    pub approach_overshoot: f32,
    /// Delay before the teleport is retried after an approach walk.
    pub approach_retry_secs: f32,
    /// Bump trigger: maximum distance to the door center.
    pub bump_distance: f32,
    /// Bump trigger: minimum speed towards the door center.
    pub bump_speed: f32,
    /// Delay from opening to closing the start door.
    pub close_delay_secs: f32,
    /// Forced walk through the start door.
    pub walk_in: WalkInConfig,
}

impl Default for DoorConfig {
    fn default() -> Self {
        Self {
            angular_speed: 1.2,
            open_angle: FRAC_PI_2,
            interact_range: 2.0,
            teleport_range: 3.0,
            approach_threshold: 1.0,
            approach_duration_secs: 1.0,
            approach_overshoot: 0.6,
            approach_retry_secs: 1.1,
            bump_distance: 0.515,
            bump_speed: 1.2,
            close_delay_secs: 3.2,
            walk_in: WalkInConfig::default(),
        }
    }
}

/// Footstep timing of a walking enemy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FootstepCadenceConfig {
    /// Above this speed, steps use `fast_interval`.
    pub fast_speed: f32,
    /// Seconds between steps when fast.
    pub fast_interval: f32,
    /// Seconds between steps otherwise.
    pub slow_interval: f32,
    /// Volume multiplier of each step.
    pub volume: f32,
}

impl Default for FootstepCadenceConfig {
    fn default() -> Self {
        Self {
            fast_speed: 6.0,
            fast_interval: 0.35,
            slow_interval: 0.6,
            volume: 1.0,
        }
    }
}

/// What happens when an enemy gets the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JumpscareConfig {
    /// Stinger sound.
    pub stinger: String,
    /// Stinger volume.
    pub volume: f32,
    /// How long the camera stays pinned to the enemy's face.
    pub camera_lock_secs: f32,
    /// Delay from death to respawn.
    pub respawn_delay_secs: f32,
    /// Head position in the enemy's frame.
    pub head_offset: Vec3,
    /// Camera position relative to the head, in the enemy's frame.
    pub face_offset: Vec3,
}

impl Default for JumpscareConfig {
    fn default() -> Self {
        Self {
            stinger: "jumpscare".to_owned(),
            volume: 1.0,
            camera_lock_secs: 3.0,
            respawn_delay_secs: 3.0,
            head_offset: Vec3::new(0.0, 1.6, 0.0),
            face_offset: Vec3::new(0.0, 0.0, 0.4),
        }
    }
}

/// The man in the chair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SitterConfig {
    /// Where the chair is.
    pub spawn_position: Vec3,
    /// Initial facing.
    pub spawn_yaw: f32,
    /// Gaze dot above which he notices being looked at.
    pub wake_gaze_dot: f32,
    /// He only notices within this distance.
    pub wake_range: f32,
    /// Length of the getting-up clip.
    pub waking_secs: f32,
    /// Length of the run-start clip.
    pub approach_secs: f32,
    /// Chase speed.
    pub chase_speed: f32,
    /// Per-tick slerp factor towards the player.
    pub turn_factor: f32,
    /// He gets the player within this distance.
    pub close_range: f32,
    /// Footstep timing.
    pub footsteps: FootstepCadenceConfig,
    /// Jumpscare tuning.
    pub jumpscare: JumpscareConfig,
    /// Delay before the end door unlocks in the sitter loop.
    pub unlock_after_secs: f32,
}

impl Default for SitterConfig {
    fn default() -> Self {
        Self {
            spawn_position: Vec3::new(-11.7, 0.0, -0.15),
            spawn_yaw: FRAC_PI_2,
            wake_gaze_dot: 0.9,
            wake_range: 10.0,
            waking_secs: 2.4,
            approach_secs: 1.1,
            chase_speed: 4.5,
            turn_factor: 0.1,
            close_range: 1.5,
            footsteps: FootstepCadenceConfig::default(),
            jumpscare: JumpscareConfig::default(),
            unlock_after_secs: 5.0,
        }
    }
}

/// The man who follows behind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StalkerConfig {
    /// Chance a normal loop spawns him.
    pub spawn_chance: f64,
    /// Where he appears.
    pub spawn_position: Vec3,
    /// How far behind the player he keeps.
    pub follow_distance: f32,
    /// Height of his follow point.
    pub follow_height: f32,
    /// Farther than this from the follow point he runs.
    pub catch_up_distance: f32,
    /// Running speed.
    pub fast_speed: f32,
    /// Walking speed.
    pub slow_speed: f32,
    /// He stands still within this distance of the follow point.
    pub arrive_distance: f32,
    /// Flattened gaze dot above which the player has seen him.
    pub gaze_dot: f32,
    /// Per-tick slerp factor towards the player.
    pub turn_factor: f32,
    /// Footstep timing.
    pub footsteps: FootstepCadenceConfig,
    /// Jumpscare tuning.
    pub jumpscare: JumpscareConfig,
}

impl Default for StalkerConfig {
    fn default() -> Self {
        Self {
            spawn_chance: 0.2,
            spawn_position: Vec3::new(0.0, 0.0, 11.0),
            follow_distance: 4.0,
            follow_height: 1.25,
            catch_up_distance: 5.0,
            fast_speed: 8.0,
            slow_speed: 4.0,
            arrive_distance: 0.1,
            gaze_dot: 0.5,
            turn_factor: 0.1,
            footsteps: FootstepCadenceConfig::default(),
            jumpscare: JumpscareConfig::default(),
        }
    }
}

/// One timed subtitle inside a narration paragraph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NarrationCue {
    /// Text shown.
    pub text: String,
    /// Offset from the paragraph start; one second per cue index when absent.
    pub at_ms: Option<u32>,
    /// Timing overrides for this cue.
    pub options: SubtitleOverrides,
}

impl Default for NarrationCue {
    fn default() -> Self {
        Self {
            text: String::new(),
            at_ms: None,
            options: SubtitleOverrides::default(),
        }
    }
}

impl NarrationCue {
    fn timed(at_ms: u32, line_duration_ms: u32, text: &str) -> Self {
        Self {
            text: text.to_owned(),
            at_ms: Some(at_ms),
            options: SubtitleOverrides::line_duration(line_duration_ms),
        }
    }
}

/// One narrated paragraph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NarrationParagraph {
    /// Audio file of the paragraph.
    pub url: String,
    /// Whole-paragraph text, shown when there are no cues.
    pub subtitle: String,
    /// Fine-grained cues.
    pub cues: Vec<NarrationCue>,
    /// Timing overrides for the whole paragraph.
    pub options: SubtitleOverrides,
}

/// The radio broadcast played once the radio is switched on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NarrationConfig {
    /// Paragraphs, in order.
    pub paragraphs: Vec<NarrationParagraph>,
    /// Base subtitle timing.
    pub subtitle_options: SubtitleOptions,
    /// Volume when played from the radio.
    pub volume: f32,
    /// Volume of the non-positional fallback on the ambient bus.
    pub fallback_volume: f32,
    /// Positional reference distance.
    pub ref_distance: f32,
    /// Positional rolloff.
    pub rolloff: f32,
    /// Positional max distance.
    pub max_distance: f32,
    /// Slack after each paragraph before the next starts.
    pub end_margin_secs: f32,
}

impl Default for NarrationConfig {
    fn default() -> Self {
        Self {
            paragraphs: default_paragraphs(),
            subtitle_options: SubtitleOptions::default(),
            volume: 0.18,
            fallback_volume: 0.15,
            ref_distance: 2.0,
            rolloff: 1.5,
            max_distance: 24.0,
            end_margin_secs: 0.05,
        }
    }
}

fn default_paragraphs() -> Vec<NarrationParagraph> {
    let paragraph = |n: u32, cues: Vec<NarrationCue>| {
        let subtitle = cues
            .iter()
            .map(|c| c.text.trim())
            .collect::<Vec<_>>()
            .join(" ");
        NarrationParagraph {
            url: format!("/audio/radio/paragraph_{n}.wav"),
            subtitle,
            cues,
            options: SubtitleOverrides::default(),
        }
    };
    vec![
        paragraph(
            1,
            vec![
                NarrationCue::timed(300, 4900, "...and the time is now 2:17 AM."),
                NarrationCue::timed(4900, 3000, "We return to our top story, a developing situation in the"),
                NarrationCue::timed(7900, 2000, " Maple Creek neighborhood that has left residents in stunned silence."),
            ],
        ),
        paragraph(
            2,
            vec![
                NarrationCue::timed(0, 3400, "Police were called to a small suburban home earlier this evening after neighbors reported..."),
                NarrationCue::timed(3400, 400, "erratic behavior..."),
                NarrationCue::timed(3800, 3000, "and a persistent, high-pitched wailing. What they found has shocked even veteran officers."),
            ],
        ),
        paragraph(
            3,
            vec![
                NarrationCue::timed(0, 6000, "Inside the residence, a 41-year-old father, whose name is being withheld, was discovered in the master bedroom. "),
                NarrationCue::timed(6200, 3100, " He was unharmed, found sitting in a rocking chair, facing the corner."),
                NarrationCue::timed(9400, 4000, " His wife and two children were found deceased in their beds."),
            ],
        ),
        paragraph(
            4,
            vec![
                NarrationCue::timed(0, 4000, "The suspect offered no resistance and has been described by authorities as 'detached' and 'unresponsive' to questioning."),
                NarrationCue::timed(4100, 3000, " He has made only one statement, repeated several times to the arresting officers."),
                NarrationCue::timed(7200, 4000, " He claimed he was, quote, \"Making the colors quiet.\""),
            ],
        ),
    ]
}

/// The ticking wall clock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Sprite holding the tick then the tack.
    pub sound: String,
    /// Where the tack starts inside the sprite.
    pub tack_start: f32,
    /// Seconds between sounds.
    pub interval_secs: f32,
    /// Volume of each sound.
    pub volume: f32,
    /// Positional reference distance.
    pub ref_distance: f32,
    /// Positional rolloff.
    pub rolloff: f32,
    /// Positional max distance.
    pub max_distance: f32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            sound: "clock_tick_tack".to_owned(),
            tack_start: 1.0,
            interval_secs: 1.0,
            volume: 0.7,
            ref_distance: 2.0,
            rolloff: 1.0,
            max_distance: 15.0,
        }
    }
}

/// Names of the scene objects the game systems use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneNames {
    /// The door the player walks in through.
    pub start_door: String,
    /// The door that loops back to the start.
    pub end_door: String,
    /// Helper geometry hidden when the game starts.
    pub hidden_at_start: Vec<String>,
    /// Cutout hidden by the intro.
    pub window_cutter: String,
    /// The radio.
    pub radio: String,
    /// The piano.
    pub piano: String,
    /// The crying wife.
    pub wife: String,
    /// The ticking wall clock.
    pub clock: String,
    /// Objects knocked over in the fallen-objects loop.
    pub fallen_objects: Vec<String>,
    /// Blood shown in the bloody loop.
    pub blood_splatters: Vec<String>,
    /// Picture frames knocked askew while the wife cries.
    pub tilted_frames: Vec<String>,
    /// Light dimmed while the wife cries.
    pub wife_dimmed_light: Option<String>,
    /// Light switched off while the lights flicker.
    pub flicker_off_light: Option<String>,
    /// Light dimmed while the lights flicker.
    pub flicker_dim_light: Option<String>,
    /// Actor name of the man in the chair.
    pub sitter: String,
    /// Actor name of the stalker.
    pub stalker: String,
}

impl Default for SceneNames {
    fn default() -> Self {
        Self {
            start_door: "DoorStart".to_owned(),
            end_door: "DoorEnd".to_owned(),
            hidden_at_start: vec!["DoorStartCutter".to_owned(), "DoorCutterEnd".to_owned()],
            window_cutter: "WindowCutter".to_owned(),
            radio: "Radio".to_owned(),
            piano: "Piano".to_owned(),
            wife: "Wife".to_owned(),
            clock: "Clock".to_owned(),
            fallen_objects: Vec::new(),
            blood_splatters: Vec::new(),
            tilted_frames: vec![
                "hanging_picture_frame_02003".to_owned(),
                "hanging_picture_frame_02002".to_owned(),
                "hanging_picture_frame_02".to_owned(),
                "hanging_picture_frame_02001".to_owned(),
            ],
            wife_dimmed_light: None,
            flicker_off_light: None,
            flicker_dim_light: None,
            sitter: "Sitter".to_owned(),
            stalker: "Stalker".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_document_keeps_other_defaults() {
        let config = GameConfig::from_ron_str("(door: (angular_speed: 2.0), rng_seed: Some(3))")
            .expect("valid config");
        assert_eq!(config.door.angular_speed, 2.0);
        assert_eq!(config.door.close_delay_secs, 3.2);
        assert_eq!(config.rng_seed, Some(3));
        assert_eq!(config.narration.paragraphs.len(), 4);
    }

    #[test]
    fn unknown_syntax_is_a_parse_error() {
        let err = GameConfig::from_ron_str("(door: [").expect_err("broken document");
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn asset_urls_fall_back_to_the_prefix() {
        let mut audio = AudioConfig::default();
        audio
            .assets
            .insert("jumpscare".to_owned(), "/sfx/scream.wav".to_owned());
        assert_eq!(audio.url_for("jumpscare"), "/sfx/scream.wav");
        assert_eq!(audio.url_for("ambient_1"), "/audio/ambient_1.mp3");
    }

    #[test]
    fn load_reads_a_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("game.ron");
        std::fs::write(&path, "(stalker: (spawn_chance: 1.0))").expect("write config");
        let config = GameConfig::load(&path).expect("load config");
        assert_eq!(config.stalker.spawn_chance, 1.0);

        let missing = GameConfig::load(dir.path().join("nope.ron"));
        assert!(matches!(missing, Err(ConfigError::Io(_))));
    }
}
