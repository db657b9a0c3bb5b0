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

use approx::assert_abs_diff_eq;
use limen_agents::audio_agent::AudioEngineOptions;
use limen_agents::AudioEngine;
use limen_core::math::{AffineTransform, Quaternion, Vec3, PI};
use limen_data::state::{InputSnapshot, PlayerPose};
use limen_infra::MemoryAssetSource;
use limen_sdk::portal::{is_bumping, teleport_target};
use limen_sdk::{Game, GameCommand, GameConfig, LoopKind, LoopRegistry, StaticScene};
use std::sync::Arc;
use tokio::runtime::Runtime;

const DT: f32 = 0.1;

/// The start door sits at x = 10 flipped upside down about X; the end door
/// sits at the origin.
fn start_frame() -> AffineTransform {
    AffineTransform::from_translation(Vec3::new(10.0, 0.0, 0.0))
        * AffineTransform::from_rotation(Quaternion::from_axis_angle(Vec3::X, PI))
}

fn runtime() -> Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .expect("tokio runtime")
}

fn game(runtime: &Runtime) -> Game {
    let config = GameConfig::default();
    let scene = StaticScene::new()
        .with_object(&config.scene.start_door, start_frame())
        .with_object(&config.scene.end_door, AffineTransform::IDENTITY);
    let audio = AudioEngine::new(
        Arc::new(MemoryAssetSource::new()),
        AudioEngineOptions::default(),
    );
    let mut game = Game::with_registry(
        config,
        audio,
        scene,
        runtime.handle().clone(),
        LoopRegistry::<LoopKind>::new(),
    );
    game.start();
    game
}

fn interact() -> InputSnapshot {
    InputSnapshot {
        interact: true,
        ..InputSnapshot::default()
    }
}

fn at(x: f32, z: f32) -> PlayerPose {
    PlayerPose::new(Vec3::new(x, 0.0, z), Vec3::new(0.0, 0.0, -1.0))
}

fn teleports(commands: &[GameCommand]) -> Vec<(f32, f32)> {
    commands
        .iter()
        .filter_map(|c| match c {
            GameCommand::TeleportTo { x, z, keep_y, .. } => {
                assert!(*keep_y);
                Some((*x, *z))
            }
            _ => None,
        })
        .collect()
}

#[test]
fn offset_from_the_end_door_carries_to_the_start_door() {
    let target = teleport_target(
        &AffineTransform::IDENTITY,
        &start_frame(),
        Vec3::new(0.5, 1.6, -1.0),
    )
    .expect("invertible");
    assert_abs_diff_eq!(target.position.x, 10.5, epsilon = 1e-4);
    assert_abs_diff_eq!(target.position.z, 1.0, epsilon = 1e-4);
}

#[test]
fn teleport_does_not_depend_on_where_the_level_sits() {
    for offset in [
        Vec3::new(-40.0, 0.0, 3.0),
        Vec3::new(7.5, 2.0, -120.0),
        Vec3::new(1000.0, 0.0, 1000.0),
    ] {
        let shift = AffineTransform::from_translation(offset);
        let player = offset + Vec3::new(0.5, 1.6, -1.0);
        let target =
            teleport_target(&shift, &(shift * start_frame()), player).expect("invertible");
        assert_abs_diff_eq!(target.position.x - offset.x, 10.5, epsilon = 1e-3);
        assert_abs_diff_eq!(target.position.z - offset.z, 1.0, epsilon = 1e-3);
    }
}

#[test]
fn bump_needs_speed_towards_the_door() {
    let door = Vec3::new(0.0, 1.0, -0.4);
    let camera = Vec3::new(0.0, 1.7, 0.0);
    let towards = Vec3::new(0.0, 0.0, -2.0);

    assert!(is_bumping(door, camera, towards, 0.515, 1.2));
    assert!(!is_bumping(door, camera, towards * 0.5, 0.515, 1.2));
    assert!(!is_bumping(door, camera, -towards, 0.515, 1.2));
    assert!(!is_bumping(door + Vec3::new(0.0, 0.0, -2.0), camera, towards, 0.515, 1.2));
}

#[test]
fn standing_on_the_door_center_is_not_a_bump() {
    let camera = Vec3::new(3.0, 1.7, 3.0);
    assert!(!is_bumping(camera.with_y(0.0), camera, Vec3::ZERO, 0.515, 1.2));
    assert!(!is_bumping(camera.with_y(0.0), camera, Vec3::new(0.0, 0.0, -1.0), 0.515, 1.2));
}

#[test]
fn interacting_at_the_end_door_loops_the_player() {
    let rt = runtime();
    let mut game = game(&rt);

    let commands = game.tick_with_input(DT, at(0.5, -0.5), &interact());
    let targets = teleports(&commands);
    assert_eq!(targets.len(), 1);
    assert_abs_diff_eq!(targets[0].0, 10.5, epsilon = 1e-4);
    assert_abs_diff_eq!(targets[0].1, 0.5, epsilon = 1e-4);
    assert!(commands.contains(&GameCommand::DoorOpened));
    assert_eq!(game.run().loop_index(), 1);
}

#[test]
fn far_interaction_walks_closer_and_retries() {
    let rt = runtime();
    let mut game = game(&rt);

    let commands = game.tick_with_input(DT, at(0.0, -2.0), &interact());
    assert!(teleports(&commands).is_empty());
    let walk = commands.iter().find_map(|c| match c {
        GameCommand::ScriptedMove(m) => Some(*m),
        _ => None,
    });
    let walk = walk.expect("approach walk");
    assert_abs_diff_eq!(walk.duration_secs, 1.0);
    assert_abs_diff_eq!(walk.distance, 2.6, epsilon = 1e-4);
    assert_eq!(game.run().loop_index(), 0);

    // Pressing again during the walk does not start a second one.
    let again = game.tick_with_input(DT, at(0.0, -1.5), &interact());
    assert!(!again.iter().any(|c| matches!(c, GameCommand::ScriptedMove(_))));

    let mut seen = Vec::new();
    for _ in 0..12 {
        seen.extend(game.tick(DT, at(0.0, -0.5)));
    }
    assert_eq!(teleports(&seen).len(), 1);
    assert_eq!(game.run().loop_index(), 1);
}

#[test]
fn interaction_out_of_range_does_nothing() {
    let rt = runtime();
    let mut game = game(&rt);

    let commands = game.tick_with_input(DT, at(0.0, -5.0), &interact());
    assert!(teleports(&commands).is_empty());
    assert!(!commands.iter().any(|c| matches!(c, GameCommand::ScriptedMove(_))));
    assert_eq!(game.run().loop_index(), 0);
}

#[test]
fn start_door_stays_shut_after_closing_behind_the_player() {
    let rt = runtime();
    let mut game = game(&rt);

    game.tick_with_input(DT, at(0.5, -0.5), &interact());
    assert!(!game.portal().is_closed_locked());

    let arrived = at(10.5, 0.5);
    for _ in 0..40 {
        game.tick(DT, arrived);
    }
    assert!(game.portal().is_closed_locked());

    let commands = game.tick_with_input(DT, arrived, &interact());
    assert!(!commands.contains(&GameCommand::DoorOpened));
    assert!(teleports(&commands).is_empty());
}
