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
use limen_core::{CommandQueue, Timers};
use limen_data::state::{InputSnapshot, PlayerPose, RunState};
use limen_infra::MemoryAssetSource;
use limen_lanes::audio_lane::ToneSynthLane;
use limen_sdk::encounter::{Encounter, EncounterKind, EnemyBody, Jumpscare, SitterState};
use limen_sdk::{FrameContext, GameCommand, GameConfig, GameEvent, StaticScene};
use std::sync::Arc;
use tokio::runtime::Runtime;

/// Owns everything a [`FrameContext`] borrows.
struct Harness {
    run: RunState,
    audio: AudioEngine,
    scene: StaticScene,
    commands: CommandQueue<GameCommand>,
    config: GameConfig,
    scheduler: Timers<GameEvent>,
    input: InputSnapshot,
    runtime: Runtime,
}

impl Harness {
    fn new() -> Self {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .expect("tokio runtime");
        let audio = AudioEngine::new(
            Arc::new(MemoryAssetSource::new()),
            AudioEngineOptions::default(),
        );
        let config = GameConfig::default();
        let stinger = ToneSynthLane::new(8_000).sine(220.0, 0.5, 0.8);
        audio.insert_sound(&config.sitter.jumpscare.stinger, stinger);

        let mut run = RunState::new();
        run.start();
        Self {
            run,
            audio,
            scene: StaticScene::new(),
            commands: CommandQueue::new(),
            config,
            scheduler: Timers::new(),
            input: InputSnapshot::default(),
            runtime,
        }
    }

    fn ctx(&mut self, dt: f32, pose: PlayerPose) -> FrameContext<'_> {
        FrameContext {
            dt,
            pose,
            input: &self.input,
            run: &mut self.run,
            audio: &mut self.audio,
            scene: &mut self.scene,
            commands: &self.commands,
            config: &self.config,
            scheduler: &mut self.scheduler,
            runtime: self.runtime.handle(),
        }
    }

    fn stinger_voices(&self) -> usize {
        self.audio
            .voices()
            .iter()
            .filter(|v| v.name == self.config.sitter.jumpscare.stinger)
            .count()
    }
}

#[test]
fn strike_kills_once_and_schedules_one_respawn() {
    let mut h = Harness::new();
    let body = EnemyBody::new("Enemy", Vec3::ZERO, 0.0);
    let jumpscare = h.config.sitter.jumpscare.clone();

    let first = Jumpscare::strike(&mut h.ctx(0.0, PlayerPose::default()), &body, &jumpscare);
    assert!(first.is_some());
    assert!(h.run.is_dead());
    assert_eq!(h.stinger_voices(), 1);
    assert_eq!(h.scheduler.len(), 1);

    let second = Jumpscare::strike(&mut h.ctx(0.0, PlayerPose::default()), &body, &jumpscare);
    assert!(second.is_none());
    assert_eq!(h.stinger_voices(), 1);
    assert_eq!(h.scheduler.len(), 1);

    assert_eq!(h.scheduler.advance(jumpscare.respawn_delay_secs), vec![GameEvent::Respawn]);
}

#[test]
fn noticed_sitter_runs_at_the_player_and_strikes() {
    let mut h = Harness::new();
    let mut sitter = Encounter::new(EncounterKind::Sitter, &h.config);
    let spawn = h.config.sitter.spawn_position;
    // Standing a few steps in front of the chair, looking at it.
    let pose = PlayerPose::new(spawn + Vec3::new(3.7, 0.5, 0.0), Vec3::new(-1.0, 0.0, 0.0));

    sitter.spawn(&mut h.ctx(0.0, pose));
    sitter.tick(&mut h.ctx(0.1, pose));
    assert!(matches!(sitter, Encounter::Sitter(ref s) if s.state() == SitterState::WakingUp));
    assert!(!h.run.is_dead());

    for _ in 0..60 {
        sitter.tick(&mut h.ctx(0.1, pose));
    }
    assert!(sitter.has_struck());
    assert!(h.run.is_dead());
    assert_eq!(h.stinger_voices(), 1);
    assert_eq!(h.scheduler.len(), 1);

    let camera_locks = h
        .commands
        .drain()
        .into_iter()
        .filter(|c| matches!(c, GameCommand::CameraLock { .. }))
        .count();
    assert!(camera_locks > 0);
}

#[test]
fn sitter_ignores_a_player_looking_away() {
    let mut h = Harness::new();
    let mut sitter = Encounter::new(EncounterKind::Sitter, &h.config);
    let spawn = h.config.sitter.spawn_position;
    let pose = PlayerPose::new(spawn + Vec3::new(3.7, 0.5, 0.0), Vec3::new(1.0, 0.0, 0.0));

    sitter.spawn(&mut h.ctx(0.0, pose));
    for _ in 0..50 {
        sitter.tick(&mut h.ctx(0.1, pose));
    }
    assert_eq!(sitter.clip(), "Sit");
    assert!(!h.run.is_dead());
}

#[test]
fn stalker_keeps_behind_an_unaware_player() {
    let mut h = Harness::new();
    let mut stalker = Encounter::new(EncounterKind::Stalker, &h.config);
    let pose = PlayerPose::new(Vec3::new(0.0, 1.6, 0.0), Vec3::new(0.0, 0.0, -1.0));

    stalker.spawn(&mut h.ctx(0.0, pose));
    for _ in 0..40 {
        stalker.tick(&mut h.ctx(0.1, pose));
    }

    let behind = Vec3::new(0.0, h.config.stalker.follow_height, h.config.stalker.follow_distance);
    assert!(stalker.body().position.distance(behind) <= h.config.stalker.arrive_distance + 1e-3);
    assert!(!stalker.has_struck());
    assert!(!h.run.is_dead());
}

#[test]
fn stalker_strikes_when_seen() {
    let mut h = Harness::new();
    let mut stalker = Encounter::new(EncounterKind::Stalker, &h.config);
    let behind = PlayerPose::new(Vec3::new(0.0, 1.6, 0.0), Vec3::new(0.0, 0.0, -1.0));

    stalker.spawn(&mut h.ctx(0.0, behind));
    for _ in 0..20 {
        stalker.tick(&mut h.ctx(0.1, behind));
    }
    assert!(!stalker.has_struck());

    let turned = PlayerPose::new(behind.position, Vec3::new(0.0, 0.0, 1.0));
    stalker.tick(&mut h.ctx(0.1, turned));
    assert!(stalker.has_struck());
    assert!(h.run.is_dead());
    assert_eq!(stalker.clip(), "Attack");
}

#[test]
fn despawn_removes_the_actor() {
    let mut h = Harness::new();
    let mut stalker = Encounter::new(EncounterKind::Stalker, &h.config);
    let pose = PlayerPose::default();

    stalker.spawn(&mut h.ctx(0.0, pose));
    let name = stalker.body().name().to_owned();
    assert!(h.scene.object(&name).is_some());

    stalker.despawn(&mut h.ctx(0.0, pose));
    assert!(h.scene.object(&name).is_none());
}
