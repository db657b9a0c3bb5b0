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

// Limen Sandbox
// Walks a scripted player through the looping corridor without a window.

mod walker;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use limen_core::asset::AssetSource;
use limen_core::math::yaw_towards;
use limen_infra::{CpalAudioDevice, FileAssetSource, MemoryAssetSource};
use limen_lanes::audio_lane::ToneSynthLane;
use limen_sdk::prelude::*;
use walker::Walker;

const FRAME_DT: f32 = 1.0 / 60.0;
const CAMERA_HEIGHT: f32 = 1.6;
const DOOR_HEIGHT: f32 = 1.5;

#[derive(Parser, Debug)]
#[command(version, about = "Headless Limen demo")]
struct Args {
    /// RON game configuration; defaults are used when absent.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory sounds are loaded from. Without it, placeholder tones are
    /// synthesized for every sound the game needs.
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Play through the default output device.
    #[arg(long)]
    audio: bool,

    /// Simulated seconds to run.
    #[arg(long, default_value_t = 120.0)]
    seconds: f32,

    /// Seed for reproducible encounters.
    #[arg(long)]
    seed: Option<u64>,

    /// Seconds the walker waits for a loop to unlock the end door.
    #[arg(long, default_value_t = 12.0)]
    patience: f32,
}

/// Start door at the corridor mouth, end door fourteen units down -X.
fn corridor(config: &GameConfig) -> StaticScene {
    let names = &config.scene;
    let mut scene = StaticScene::new()
        .with_object_at(&names.start_door, Vec3::new(0.0, DOOR_HEIGHT, 0.0))
        .with_object_at(&names.end_door, Vec3::new(-14.0, DOOR_HEIGHT, 0.0))
        .with_object_at(&names.radio, Vec3::new(-4.0, 1.0, 1.4))
        .with_object_at(&names.piano, Vec3::new(-7.0, 0.0, -1.6))
        .with_object_at(&names.clock, Vec3::new(-2.0, 2.2, -1.8))
        .with_object(
            &names.wife,
            AffineTransform::from_translation_yaw(Vec3::new(-10.0, 0.0, 1.5), 1.2),
        )
        .with_light("CeilingLight_1", 1.0)
        .with_light("CeilingLight_2", 1.0)
        .with_light("CeilingLight_3", 1.0);
    for name in names
        .hidden_at_start
        .iter()
        .chain(&names.fallen_objects)
        .chain(&names.blood_splatters)
        .chain(&names.tilted_frames)
        .chain(std::iter::once(&names.window_cutter))
    {
        scene = scene.with_object_at(name, Vec3::new(-6.0, 1.0, 0.0));
    }
    scene
}

fn load_config(args: &Args) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => GameConfig::default(),
    };
    if args.seed.is_some() {
        config.rng_seed = args.seed;
    }
    Ok(config)
}

/// Fills the cache with short tones standing in for real recordings.
fn synthesize_placeholders<S: SceneQuery>(game: &Game<S>) {
    let synth = ToneSynthLane::new(22_050);
    let manifest = game.asset_manifest();
    for (i, (name, _)) in manifest.iter().enumerate() {
        let tone = synth.sine(180.0 + 40.0 * i as f32, 2.0, 0.2);
        game.audio().insert_sound(name, tone);
    }
    for n in 1..=game.config().narration.paragraphs.len() {
        game.audio()
            .insert_sound(&format!("radio_para_{n}"), synth.noise(4.0, 0.1, n as u32));
    }
    log::info!("Synthesized {} placeholder sounds", manifest.len());
}

fn report(command: &GameCommand) {
    match command {
        GameCommand::TeleportTo { x, z, yaw, .. } => {
            log::info!("Teleported to ({x:.2}, {z:.2}) facing {yaw:.2}")
        }
        GameCommand::Subtitle(cue) if !cue.is_clear() => log::info!("Subtitle: {}", cue.text),
        GameCommand::RadioSubtitle { text, .. } if !text.is_empty() => {
            log::info!("Radio: {text}")
        }
        GameCommand::UnlockEndDoor => log::info!("End door unlocked"),
        GameCommand::RadioNarrationEnd => log::info!("Radio went quiet"),
        other => log::debug!("{}", other.name()),
    }
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let config = load_config(&args)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start the async runtime")?;

    let source: Arc<dyn AssetSource> = match &args.assets {
        Some(root) => Arc::new(FileAssetSource::new(root.clone())),
        None => Arc::new(MemoryAssetSource::new()),
    };
    let mut audio = AudioEngine::new(source, config.audio.engine.clone());
    if args.audio {
        audio.attach_device(Box::new(CpalAudioDevice::new()))?;
    }

    let scene = corridor(&config);
    let end_door = scene
        .world_position(&config.scene.end_door)
        .context("Corridor has no end door")?;
    let radio = scene.world_position(&config.scene.radio);

    let mut game = Game::new(config, audio, scene, runtime.handle().clone());
    if args.assets.is_some() {
        runtime.block_on(game.preload_assets());
    } else {
        synthesize_placeholders(&game);
    }

    let start = Vec3::new(-1.0, CAMERA_HEIGHT, 0.0);
    let mut walker = Walker::new(start, yaw_towards(Vec3::new(-1.0, 0.0, 0.0)), args.patience);
    game.start();
    game.publish(GameCommand::ResumeAudio);

    let frames = (args.seconds / FRAME_DT).max(0.0) as u64;
    let mut radio_on = false;
    for _ in 0..frames {
        let step = walker.step(FRAME_DT, end_door, game.run().is_dead());
        game.run_mut().set_player_velocity(step.velocity);
        if step.interact {
            game.input_mut().press_interact();
        }
        if !radio_on && radio.is_some_and(|r| r.distance(walker.position()) < 3.0) {
            radio_on = true;
            game.publish(GameCommand::RadioStart);
        }

        for command in game.tick(FRAME_DT, walker.pose()) {
            report(&command);
            walker.apply(&command);
        }
    }

    game.shutdown();
    log::info!(
        "Finished in loop {} after {} deaths",
        game.run().loop_index(),
        game.run().respawn_generation()
    );
    Ok(())
}
