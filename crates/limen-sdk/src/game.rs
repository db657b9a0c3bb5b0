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

//! The per-frame driver that owns every game system.

use crate::ambience::{ClockAmbience, RadioNarration};
use crate::command::GameCommand;
use crate::config::GameConfig;
use crate::context::{FrameContext, GameEvent};
use crate::loops::{BehaviorFactory, LoopKind, LoopOrchestrator, LoopRegistry};
use crate::portal::PortalSystem;
use crate::scene::{SceneQuery, StaticScene};
use limen_agents::AudioEngine;
use limen_core::command::CommandSender;
use limen_core::{CommandQueue, Timers};
use limen_data::state::{InputCollector, InputSnapshot, PlayerPose, RunState};
use std::collections::BTreeSet;
use tokio::runtime::Handle;

/// Sounds the built-in content plays without loading them itself.
const SHARED_SOUNDS: [&str; 2] = ["lights_on_off", "static_light"];

/// One game session.
///
/// Owns the run state, the audio engine, the scene and every game system, and
/// advances them together in [`Game::tick`]. Nothing here is global; a test
/// builds a fresh `Game` per case.
pub struct Game<S: SceneQuery = StaticScene, F: BehaviorFactory = LoopKind> {
    config: GameConfig,
    run: RunState,
    audio: AudioEngine,
    scene: S,
    commands: CommandQueue<GameCommand>,
    scheduler: Timers<GameEvent>,
    runtime: Handle,
    orchestrator: LoopOrchestrator<F>,
    portal: PortalSystem,
    narration: RadioNarration,
    clock: ClockAmbience,
    input: InputCollector,
    scene_prepared: bool,
}

impl<S: SceneQuery> Game<S, LoopKind> {
    /// A session over the shipped loop table.
    pub fn new(config: GameConfig, audio: AudioEngine, scene: S, runtime: Handle) -> Self {
        Self::with_registry(config, audio, scene, runtime, LoopRegistry::with_default_loops())
    }
}

impl<S: SceneQuery, F: BehaviorFactory> Game<S, F> {
    /// A session over a custom loop table.
    pub fn with_registry(
        config: GameConfig,
        audio: AudioEngine,
        scene: S,
        runtime: Handle,
        registry: LoopRegistry<F>,
    ) -> Self {
        let portal = PortalSystem::new(&config.scene.start_door, &config.scene.end_door);
        Self {
            config,
            run: RunState::new(),
            audio,
            scene,
            commands: CommandQueue::new(),
            scheduler: Timers::new(),
            runtime,
            orchestrator: LoopOrchestrator::new(registry),
            portal,
            narration: RadioNarration::new(),
            clock: ClockAmbience::new(),
            input: InputCollector::new(),
            scene_prepared: false,
        }
    }

    /// Leaves the title screen: the run moves to loop 0.
    pub fn start(&mut self) {
        if self.run.start() {
            log::info!("Run started");
        }
    }

    /// Publishes a signal from the presentation layer, such as
    /// [`GameCommand::RadioStart`] or [`GameCommand::ResumeAudio`]. It is
    /// handled at the start of the next tick.
    pub fn publish(&self, command: GameCommand) {
        self.commands.publish(command);
    }

    /// A handle for publishing signals from other threads.
    pub fn sender(&self) -> CommandSender<GameCommand> {
        self.commands.sender()
    }

    /// Raw input accumulated until the next tick.
    pub fn input_mut(&mut self) -> &mut InputCollector {
        &mut self.input
    }

    /// Runs one frame with the input gathered since the previous one.
    /// Returns the commands published during the frame, in order.
    pub fn tick(&mut self, dt: f32, pose: PlayerPose) -> Vec<GameCommand> {
        let input = self.input.take_snapshot();
        self.tick_with_input(dt, pose, &input)
    }

    /// Runs one frame with an explicit input snapshot.
    pub fn tick_with_input(
        &mut self,
        dt: f32,
        pose: PlayerPose,
        input: &InputSnapshot,
    ) -> Vec<GameCommand> {
        let Self {
            config,
            run,
            audio,
            scene,
            commands,
            scheduler,
            runtime,
            orchestrator,
            portal,
            narration,
            clock,
            scene_prepared,
            ..
        } = self;

        let signals = commands.drain();
        audio.set_listener(pose.position, pose.forward);

        for GameEvent::Respawn in scheduler.advance(dt) {
            if run.is_dead() {
                run.respawn();
                log::info!("Respawned (generation {})", run.respawn_generation());
            }
        }

        let mut ctx = FrameContext {
            dt,
            pose,
            input,
            run: &mut *run,
            audio: &mut *audio,
            scene: &mut *scene,
            commands: &*commands,
            config: &*config,
            scheduler: &mut *scheduler,
            runtime: &*runtime,
        };

        if !*scene_prepared {
            for name in &config.scene.hidden_at_start {
                ctx.show(name, false);
            }
            *scene_prepared = true;
        }

        for signal in signals {
            match signal {
                GameCommand::RadioStart => narration.start(&mut ctx),
                GameCommand::ResumeAudio => ctx.audio.resume(),
                other => log::debug!("Ignoring inbound {}", other.name()),
            }
        }

        orchestrator.sync(&mut ctx);
        orchestrator.tick(&mut ctx);
        portal.tick(&mut ctx);
        narration.tick(&mut ctx);
        if ctx.run.is_started() {
            clock.tick(&mut ctx);
        }

        audio.update(dt);
        commands.drain()
    }

    /// Tears down the mounted loop and the narration.
    pub fn shutdown(&mut self) {
        let Self {
            config,
            run,
            audio,
            scene,
            commands,
            scheduler,
            runtime,
            orchestrator,
            narration,
            ..
        } = self;
        let input = InputSnapshot::default();
        let mut ctx = FrameContext {
            dt: 0.0,
            pose: PlayerPose::default(),
            input: &input,
            run: &mut *run,
            audio: &mut *audio,
            scene: &mut *scene,
            commands: &*commands,
            config: &*config,
            scheduler: &mut *scheduler,
            runtime: &*runtime,
        };
        orchestrator.unmount(&mut ctx);
        narration.cancel(&mut ctx);
        log::info!("Game shut down");
    }

    /// Every `(name, url)` the shipped content needs up front.
    pub fn asset_manifest(&self) -> Vec<(String, String)> {
        let engine = &self.config.audio.engine;
        let mut names: BTreeSet<String> = self.config.audio.assets.keys().cloned().collect();
        names.insert(engine.door_sprite.clone());
        names.extend(engine.footstep_variants.iter().cloned());
        names.insert(self.config.clock.sound.clone());
        names.insert(self.config.sitter.jumpscare.stinger.clone());
        names.insert(self.config.stalker.jumpscare.stinger.clone());
        names.extend(SHARED_SOUNDS.iter().map(|s| (*s).to_owned()));
        names
            .into_iter()
            .map(|name| {
                let url = self.config.audio.url_for(&name);
                (name, url)
            })
            .collect()
    }

    /// Loads [`Game::asset_manifest`]. Returns how many sounds are available.
    pub async fn preload_assets(&self) -> usize {
        let manifest = self.asset_manifest();
        let total = manifest.len();
        let loaded = self.audio.preload(manifest).await;
        log::info!("Preloaded {loaded}/{total} sounds");
        loaded
    }

    /// Tuning.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Run state.
    pub fn run(&self) -> &RunState {
        &self.run
    }

    /// Run state, for the presentation layer to report velocity and pointer
    /// lock.
    pub fn run_mut(&mut self) -> &mut RunState {
        &mut self.run
    }

    /// Audio engine.
    pub fn audio(&self) -> &AudioEngine {
        &self.audio
    }

    /// Audio engine.
    pub fn audio_mut(&mut self) -> &mut AudioEngine {
        &mut self.audio
    }

    /// The scene.
    pub fn scene(&self) -> &S {
        &self.scene
    }

    /// The scene.
    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    /// Loop table and mounted behaviour.
    pub fn orchestrator(&self) -> &LoopOrchestrator<F> {
        &self.orchestrator
    }

    /// Loop table and mounted behaviour.
    pub fn orchestrator_mut(&mut self) -> &mut LoopOrchestrator<F> {
        &mut self.orchestrator
    }

    /// Door and teleport state.
    pub fn portal(&self) -> &PortalSystem {
        &self.portal
    }

    /// Radio broadcast state.
    pub fn narration(&self) -> &RadioNarration {
        &self.narration
    }
}
