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

use limen_agents::audio_agent::{
    AudioEngineOptions, MusicOptions, PlayOptions, Segment, SoundGroup,
};
use approx::assert_abs_diff_eq;
use limen_agents::AudioEngine;
use limen_core::asset::LoadError;
use limen_core::audio::StreamInfo;
use limen_infra::MemoryAssetSource;
use limen_lanes::audio_lane::ToneSynthLane;
use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

const RATE: u32 = 8_000;

/// `secs` of a quiet 16-bit mono tone, as WAV bytes.
fn wav_bytes(secs: f32) -> Vec<u8> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).expect("wav writer");
        let frames = (secs * RATE as f32) as usize;
        for i in 0..frames {
            let s = ((i as f32 * 0.05).sin() * 8_000.0) as i16;
            writer.write_sample(s).expect("write sample");
        }
        writer.finalize().expect("finalize wav");
    }
    cursor.into_inner()
}

fn seeded_options() -> AudioEngineOptions {
    AudioEngineOptions {
        rng_seed: Some(7),
        ..AudioEngineOptions::default()
    }
}

fn engine_with(source: Arc<MemoryAssetSource>) -> AudioEngine {
    AudioEngine::new(source, seeded_options())
}

/// An engine with a few synthesized sounds already cached.
fn loaded_engine() -> AudioEngine {
    let engine = engine_with(Arc::new(MemoryAssetSource::new()));
    let synth = ToneSynthLane::new(RATE);
    engine.insert_sound("hum", synth.sine(220.0, 2.0, 0.5));
    engine.insert_sound("blip", synth.sine(880.0, 0.5, 0.5));
    engine.insert_sound("theme", synth.sine(330.0, 4.0, 0.5));
    engine.insert_sound("other_theme", synth.sine(440.0, 4.0, 0.5));
    for variant in ["footstep_1", "footstep_2", "footstep_3"] {
        engine.insert_sound(variant, synth.sine(120.0, 0.2, 0.5));
    }
    engine
}

#[tokio::test]
async fn concurrent_loads_share_one_fetch() {
    let source = Arc::new(MemoryAssetSource::new().with_latency(Duration::from_millis(20)));
    source.insert("/audio/clock.wav", wav_bytes(1.0));
    let engine = engine_with(Arc::clone(&source));

    let (a, b) = tokio::join!(
        engine.load("clock", "/audio/clock.wav"),
        engine.load("clock", "/audio/clock.wav")
    );

    let a = a.expect("first load");
    let b = b.expect("second load");
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(source.fetch_count(), 1);
    assert!(engine.has("clock"));
}

#[tokio::test]
async fn concurrent_failed_loads_share_one_fetch() {
    let source = Arc::new(MemoryAssetSource::new().with_latency(Duration::from_millis(20)));
    let engine = engine_with(Arc::clone(&source));

    let (a, b, c) = tokio::join!(
        engine.load("ghost", "/audio/ghost.wav"),
        engine.load("ghost", "/audio/ghost.wav"),
        engine.load("ghost", "/audio/ghost.wav")
    );

    let expected = LoadError::NotFound {
        url: "/audio/ghost.wav".to_owned(),
    };
    assert_eq!(a.err(), Some(expected.clone()));
    assert_eq!(b.err(), Some(expected.clone()));
    assert_eq!(c.err(), Some(expected));
    assert_eq!(source.fetch_count(), 1);

    source.insert("/audio/ghost.wav", wav_bytes(0.25));
    assert!(engine.load("ghost", "/audio/ghost.wav").await.is_ok());
    assert_eq!(source.fetch_count(), 2);
}

#[tokio::test]
async fn cached_name_is_not_fetched_again() {
    let source = Arc::new(MemoryAssetSource::new());
    source.insert("/audio/clock.wav", wav_bytes(0.5));
    let engine = engine_with(Arc::clone(&source));

    engine.load("clock", "/audio/clock.wav").await.expect("load");
    engine.load("clock", "/audio/clock.wav").await.expect("cached load");
    assert_eq!(source.fetch_count(), 1);
}

#[tokio::test]
async fn missing_and_undecodable_assets_report_errors() {
    let source = Arc::new(MemoryAssetSource::new());
    source.insert("/audio/broken.wav", b"definitely not audio".to_vec());
    let engine = engine_with(Arc::clone(&source));

    let missing = engine.load("ghost", "/audio/ghost.wav").await;
    assert!(matches!(missing, Err(LoadError::NotFound { .. })));

    let broken = engine.load("broken", "/audio/broken.wav").await;
    assert!(matches!(broken, Err(LoadError::Decode { .. })));
    assert!(!engine.has("broken"));
}

#[tokio::test]
async fn failed_load_can_be_retried() {
    let source = Arc::new(MemoryAssetSource::new());
    let engine = engine_with(Arc::clone(&source));

    assert!(engine.load("late", "/audio/late.wav").await.is_err());
    source.insert("/audio/late.wav", wav_bytes(0.5));
    assert!(engine.load("late", "/audio/late.wav").await.is_ok());
}

#[tokio::test]
async fn preload_counts_only_successes() {
    let source = Arc::new(MemoryAssetSource::new());
    source.insert("/audio/a.wav", wav_bytes(0.25));
    source.insert("/audio/b.wav", wav_bytes(0.25));
    let engine = engine_with(Arc::clone(&source));

    let loaded = engine
        .preload([
            ("a", "/audio/a.wav"),
            ("b", "/audio/b.wav"),
            ("c", "/audio/c.wav"),
        ])
        .await;
    assert_eq!(loaded, 2);
}

#[test]
fn one_shot_is_disposed_after_its_duration() {
    let mut engine = loaded_engine();
    let id = engine.play_one_shot("blip", PlayOptions::default()).expect("loaded");
    assert_eq!(engine.voice_count(), 1);

    // 0.5 s of sound plus the disposal margin.
    engine.update(0.55);
    assert!(engine.voice(id).is_some());
    engine.update(0.1);
    assert!(engine.voice(id).is_none());
}

#[test]
fn unloaded_one_shot_is_skipped() {
    let mut engine = loaded_engine();
    assert!(engine.play_one_shot("nope", PlayOptions::default()).is_none());
    assert_eq!(engine.voice_count(), 0);
}

#[test]
fn segment_past_the_end_plays_nothing() {
    let mut engine = loaded_engine();
    let id = engine.play_segment("blip", Segment::starting_at(3.0), PlayOptions::default());
    assert!(id.is_none());
}

#[test]
fn one_loop_per_id() {
    let mut engine = loaded_engine();
    let first = engine.play_looping_segment(
        "hum",
        Segment::new(0.0, 1.0),
        Some("bed"),
        PlayOptions::default(),
    );
    let second = engine.play_looping_segment(
        "hum",
        Segment::new(0.0, 1.0),
        Some("bed"),
        PlayOptions::default(),
    );

    assert_eq!(engine.live_loop_count(), 1);
    assert_eq!(engine.loop_voice("bed"), second.voice());

    let fading = engine
        .voice(first.voice().expect("first started"))
        .expect("still fading out");
    assert_eq!(fading.target_gain, 0.0);

    engine.update(0.3);
    assert!(engine.voice(first.voice().expect("first started")).is_none());
    assert!(engine.voice(second.voice().expect("second started")).is_some());
}

#[test]
fn stale_handle_leaves_newer_loop_alone() {
    let mut engine = loaded_engine();
    let first = engine.play_looping_segment(
        "hum",
        Segment::starting_at(0.0),
        Some("bed"),
        PlayOptions::default(),
    );
    let second = engine.play_looping_segment(
        "hum",
        Segment::starting_at(0.0),
        Some("bed"),
        PlayOptions::default(),
    );

    first.stop(&mut engine);
    assert!(engine.has_loop("bed"));
    assert_eq!(engine.loop_voice("bed"), second.voice());

    second.stop(&mut engine);
    assert!(!engine.has_loop("bed"));
    engine.update(0.3);
    assert_eq!(engine.voice_count(), 0);
}

#[test]
fn loop_starting_past_buffer_end_is_inert() {
    let mut engine = loaded_engine();
    let handle = engine.play_looping_segment(
        "blip",
        Segment::starting_at(0.5),
        Some("x"),
        PlayOptions::default(),
    );
    assert!(handle.is_inert());
    assert!(!engine.has_loop("x"));
    handle.stop(&mut engine);
    assert_eq!(engine.voice_count(), 0);
}

#[test]
fn loop_fades_in() {
    let mut engine = loaded_engine();
    let handle = engine.play_looping_segment(
        "hum",
        Segment::starting_at(0.0),
        None,
        PlayOptions::default().volume(0.8),
    );
    let id = handle.voice().expect("started");
    assert_eq!(engine.voice(id).expect("voice").gain, 0.0);
    engine.update(0.2);
    let voice = engine.voice(id).expect("voice");
    assert!(voice.looping);
    assert_abs_diff_eq!(voice.gain, 0.8, epsilon = 1e-5);
}

#[test]
fn rapid_footsteps_are_rate_limited() {
    let mut engine = loaded_engine();
    let started = (0..5)
        .filter(|_| {
            let id = engine.play_footstep(1.0);
            engine.update(0.01);
            id.is_some()
        })
        .count();
    assert_eq!(started, 1);

    engine.update(0.2);
    assert!(engine.play_footstep(1.0).is_some());
}

#[test]
fn footstep_volume_and_rate_stay_in_range() {
    let mut engine = loaded_engine();
    for _ in 0..20 {
        if let Some(id) = engine.play_footstep(0.5) {
            let voice = engine.voice(id).expect("voice");
            assert!(voice.name.starts_with("footstep_"));
            assert!((0.3..=0.375).contains(&voice.gain));
            assert!((0.95..=1.05).contains(&voice.rate));
        }
        engine.update(0.15);
    }
}

#[test]
fn same_music_is_not_restarted() {
    let mut engine = loaded_engine();
    engine.resume();
    let looping = MusicOptions {
        looping: true,
        ..MusicOptions::default()
    };
    engine.play_music("theme", looping);
    let before = engine.voices();
    engine.play_music("theme", looping);
    assert_eq!(engine.voices(), before);
    assert_eq!(engine.current_music(), Some("theme"));
}

#[test]
fn switching_music_fades_the_old_track() {
    let mut engine = loaded_engine();
    engine.resume();
    let faded = MusicOptions {
        looping: true,
        fade: Some(1.0),
        ..MusicOptions::default()
    };
    engine.play_music("theme", faded);
    engine.update(1.0);
    engine.play_music("other_theme", faded);

    assert_eq!(engine.current_music(), Some("other_theme"));
    let music: Vec<_> = engine
        .voices()
        .into_iter()
        .filter(|v| v.group == SoundGroup::Music)
        .collect();
    assert_eq!(music.len(), 2);

    engine.update(1.1);
    let remaining: Vec<_> = engine.voices().into_iter().map(|v| v.name).collect();
    assert_eq!(remaining, vec!["other_theme".to_owned()]);
}

#[test]
fn music_requested_while_suspended_plays_on_resume() {
    let mut engine = loaded_engine();
    engine.play_music("theme", MusicOptions::default());
    engine.play_music("other_theme", MusicOptions::default());
    assert_eq!(engine.voice_count(), 0);
    assert_eq!(engine.queued_music(), Some("other_theme"));

    engine.resume();
    assert!(engine.is_running());
    assert_eq!(engine.current_music(), Some("other_theme"));
    assert_eq!(engine.queued_music(), None);
}

#[test]
fn stop_music_drops_queued_request() {
    let mut engine = loaded_engine();
    engine.play_music("theme", MusicOptions::default());
    engine.stop_music(None);
    engine.resume();
    assert_eq!(engine.current_music(), None);
    assert_eq!(engine.voice_count(), 0);
}

#[test]
fn muted_bus_renders_silence() {
    let mut engine = loaded_engine();
    engine.resume();
    engine.set_group_volume(SoundGroup::Sfx, 0.0);
    engine.play_one_shot("blip", PlayOptions::on(SoundGroup::Sfx)).expect("loaded");

    let stream = StreamInfo {
        channels: 2,
        sample_rate: RATE,
    };
    let mut out = vec![1.0_f32; 256];
    engine.render(&mut out, &stream);
    assert!(out.iter().all(|s| *s == 0.0));

    engine.set_group_volume(SoundGroup::Sfx, 1.0);
    engine.render(&mut out, &stream);
    assert!(out.iter().any(|s| *s != 0.0));
}

#[test]
fn door_sprite_halves() {
    let mut engine = loaded_engine();
    let synth = ToneSynthLane::new(RATE);
    engine.insert_sound("door_open_close", synth.sine(90.0, 4.0, 0.5));

    let open = engine.play_door_open().expect("open half");
    let close = engine.play_door_close().expect("close half");
    // Open half is [0, 1.5) s, close half [1.52 s, end).
    engine.update(1.7);
    assert!(engine.voice(open).is_none());
    assert!(engine.voice(close).is_some());
    engine.update(1.0);
    assert!(engine.voice(close).is_none());
}
