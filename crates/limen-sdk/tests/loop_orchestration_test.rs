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
use limen_data::state::{MountKey, PlayerPose};
use limen_infra::MemoryAssetSource;
use limen_sdk::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use tokio::runtime::Runtime;

type Journal = Rc<RefCell<Vec<String>>>;

/// Builds behaviours that write every lifecycle call into a shared journal.
struct Recording {
    name: &'static str,
    journal: Journal,
}

struct RecordingBehavior {
    name: &'static str,
    key: MountKey,
    journal: Journal,
}

impl RecordingBehavior {
    fn note(&self, event: &str) {
        self.journal.borrow_mut().push(format!(
            "{event} {} {}/{}",
            self.name, self.key.loop_index, self.key.respawn_generation
        ));
    }
}

impl LoopBehavior for RecordingBehavior {
    fn on_enter(&mut self, _ctx: &mut FrameContext<'_>) {
        self.note("enter");
    }

    fn on_tick(&mut self, _ctx: &mut FrameContext<'_>) {}

    fn on_exit(&mut self, _ctx: &mut FrameContext<'_>) {
        self.note("exit");
    }
}

impl BehaviorFactory for Recording {
    type Behavior = RecordingBehavior;

    fn create(&self, _config: &GameConfig, key: MountKey) -> RecordingBehavior {
        RecordingBehavior {
            name: self.name,
            key,
            journal: Rc::clone(&self.journal),
        }
    }

    fn name(&self) -> &str {
        self.name
    }
}

fn runtime() -> Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .expect("tokio runtime")
}

fn game(runtime: &Runtime, registry: LoopRegistry<Recording>) -> Game<StaticScene, Recording> {
    let audio = AudioEngine::new(
        Arc::new(MemoryAssetSource::new()),
        AudioEngineOptions::default(),
    );
    Game::with_registry(
        GameConfig::default(),
        audio,
        StaticScene::new(),
        runtime.handle().clone(),
        registry,
    )
}

fn recording(name: &'static str, journal: &Journal) -> Recording {
    Recording {
        name,
        journal: Rc::clone(journal),
    }
}

fn tick(game: &mut Game<StaticScene, Recording>) {
    game.tick(1.0 / 60.0, PlayerPose::default());
}

#[test]
fn nothing_mounts_before_the_run_starts() {
    let rt = runtime();
    let journal = Journal::default();
    let mut registry = LoopRegistry::new();
    registry.register(0, recording("first", &journal));
    let mut game = game(&rt, registry);

    tick(&mut game);
    tick(&mut game);
    assert!(journal.borrow().is_empty());
    assert!(game.orchestrator().mounted().is_none());

    game.start();
    tick(&mut game);
    assert_eq!(*journal.borrow(), vec!["enter first 0/0"]);
}

#[test]
fn advancing_the_loop_exits_before_entering() {
    let rt = runtime();
    let journal = Journal::default();
    let mut registry = LoopRegistry::new();
    registry.register(0, recording("first", &journal));
    registry.register(1, recording("second", &journal));
    let mut game = game(&rt, registry);

    game.start();
    tick(&mut game);
    tick(&mut game);
    game.run_mut().increment_loop();
    tick(&mut game);
    tick(&mut game);

    assert_eq!(
        *journal.borrow(),
        vec!["enter first 0/0", "exit first 0/0", "enter second 1/0"]
    );
}

#[test]
fn respawn_remounts_the_same_loop() {
    let rt = runtime();
    let journal = Journal::default();
    let mut registry = LoopRegistry::new();
    registry.register(0, recording("first", &journal));
    let mut game = game(&rt, registry);

    game.start();
    tick(&mut game);
    assert!(game.run_mut().die());
    game.run_mut().respawn();
    tick(&mut game);

    assert_eq!(
        *journal.borrow(),
        vec!["enter first 0/0", "exit first 0/0", "enter first 0/1"]
    );
    assert_eq!(
        game.orchestrator().mounted_key(),
        Some(MountKey {
            loop_index: 0,
            respawn_generation: 1
        })
    );
}

#[test]
fn unmapped_index_mounts_nothing() {
    let rt = runtime();
    let journal = Journal::default();
    let mut registry = LoopRegistry::new();
    registry.register(0, recording("first", &journal));
    let mut game = game(&rt, registry);

    game.start();
    tick(&mut game);
    game.run_mut().set_loop(42);
    tick(&mut game);
    tick(&mut game);

    assert_eq!(*journal.borrow(), vec!["enter first 0/0", "exit first 0/0"]);
    assert!(game.orchestrator().mounted().is_none());
}

#[test]
fn replaced_registration_is_the_one_mounted() {
    let rt = runtime();
    let journal = Journal::default();
    let mut registry = LoopRegistry::new();
    registry.register(0, recording("a", &journal));
    registry.register(0, recording("b", &journal));
    let mut game = game(&rt, registry);

    game.start();
    tick(&mut game);
    game.run_mut().increment_loop();
    tick(&mut game);

    assert_eq!(*journal.borrow(), vec!["enter b 0/0", "exit b 0/0"]);
}

#[test]
fn enters_and_exits_alternate() {
    let rt = runtime();
    let journal = Journal::default();
    let mut registry = LoopRegistry::new();
    for (i, name) in ["a", "b", "c"].into_iter().enumerate() {
        registry.register(i as i32, recording(name, &journal));
    }
    let mut game = game(&rt, registry);

    game.start();
    for step in 0..12 {
        tick(&mut game);
        match step % 4 {
            0 => {
                game.run_mut().increment_loop();
            }
            1 => {
                game.run_mut().die();
                game.run_mut().respawn();
            }
            2 => game.run_mut().set_loop(step % 3),
            _ => {}
        }
    }

    let journal = journal.borrow();
    for pair in journal.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert_ne!(
            a.starts_with("enter"),
            b.starts_with("enter"),
            "two consecutive {a} / {b}"
        );
    }
}
