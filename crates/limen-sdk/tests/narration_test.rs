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

use limen_agents::audio_agent::AudioEngineOptions;
use limen_agents::AudioEngine;
use limen_core::math::Vec3;
use limen_data::state::PlayerPose;
use limen_infra::MemoryAssetSource;
use limen_lanes::audio_lane::ToneSynthLane;
use limen_sdk::config::{NarrationCue, NarrationParagraph};
use limen_sdk::{Game, GameCommand, GameConfig, LoopKind, LoopRegistry, StaticScene};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;

fn runtime() -> Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .expect("tokio runtime")
}

fn cue(text: &str, at_ms: u32) -> NarrationCue {
    NarrationCue {
        text: text.to_owned(),
        at_ms: Some(at_ms),
        ..NarrationCue::default()
    }
}

/// Three paragraphs; the middle one points at audio that does not exist.
fn broadcast_game(runtime: &Runtime) -> Game {
    let mut config = GameConfig::default();
    config.narration.paragraphs = vec![
        NarrationParagraph {
            url: "/radio/one.wav".to_owned(),
            cues: vec![cue("one", 0), cue("two", 200)],
            ..NarrationParagraph::default()
        },
        NarrationParagraph {
            url: "/radio/missing.wav".to_owned(),
            subtitle: "never shown".to_owned(),
            ..NarrationParagraph::default()
        },
        NarrationParagraph {
            url: "/radio/three.wav".to_owned(),
            cues: vec![cue("three", 0)],
            ..NarrationParagraph::default()
        },
    ];

    let audio = AudioEngine::new(
        Arc::new(MemoryAssetSource::new()),
        AudioEngineOptions::default(),
    );
    let synth = ToneSynthLane::new(8_000);
    audio.insert_sound("radio_para_1", synth.sine(300.0, 1.0, 0.3));
    audio.insert_sound("radio_para_3", synth.sine(300.0, 0.5, 0.3));

    let scene = StaticScene::new().with_object_at(&config.scene.radio, Vec3::new(2.0, 1.0, -3.0));
    Game::with_registry(
        config,
        audio,
        scene,
        runtime.handle().clone(),
        LoopRegistry::<LoopKind>::new(),
    )
}

/// Ticks until the narration ends, giving the failed load time to resolve.
fn run_to_end(game: &mut Game) -> Vec<GameCommand> {
    let mut seen = Vec::new();
    for _ in 0..400 {
        seen.extend(game.tick(0.1, PlayerPose::default()));
        if game.narration().is_finished() {
            break;
        }
        std::thread::sleep(Duration::from_millis(2));
    }
    seen
}

fn radio_lines(commands: &[GameCommand]) -> Vec<(String, bool)> {
    commands
        .iter()
        .filter_map(|c| match c {
            GameCommand::RadioSubtitle { text, append, .. } => Some((text.clone(), *append)),
            _ => None,
        })
        .collect()
}

#[test]
fn broadcast_plays_through_skipping_missing_audio() {
    let rt = runtime();
    let mut game = broadcast_game(&rt);
    game.publish(GameCommand::RadioStart);

    let seen = run_to_end(&mut game);
    assert!(game.narration().is_finished());
    assert_eq!(
        radio_lines(&seen),
        vec![
            ("one".to_owned(), false),
            ("two".to_owned(), true),
            ("three".to_owned(), false),
            (String::new(), false),
        ]
    );
    assert_eq!(seen.last(), Some(&GameCommand::RadioNarrationEnd));
    assert_eq!(
        seen.iter()
            .filter(|c| **c == GameCommand::RadioNarrationEnd)
            .count(),
        1
    );
}

#[test]
fn second_start_is_ignored() {
    let rt = runtime();
    let mut game = broadcast_game(&rt);
    game.publish(GameCommand::RadioStart);
    let mut seen = game.tick(0.1, PlayerPose::default());
    game.publish(GameCommand::RadioStart);
    seen.extend(run_to_end(&mut game));

    let lines = radio_lines(&seen);
    assert_eq!(lines.iter().filter(|(text, _)| text == "one").count(), 1);
}

#[test]
fn paragraph_plays_from_the_radio() {
    let rt = runtime();
    let mut game = broadcast_game(&rt);
    game.publish(GameCommand::RadioStart);
    game.tick(0.1, PlayerPose::default());

    let voices = game.audio().voices();
    let voice = voices
        .iter()
        .find(|v| v.name == "radio_para_1")
        .expect("first paragraph is playing");
    assert!(voice.positional);
    assert_eq!(game.narration().current_paragraph(), Some(0));
}
