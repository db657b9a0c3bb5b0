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

use limen_data::assets::SoundData;
use std::f32::consts::TAU;

/// Renders short procedural tones into mono [`SoundData`].
///
/// Used for sounds that have no asset file, such as piano notes: a triangle
/// wave with a fast attack and an exponential tail, and a detuned
/// sawtooth/square cluster for wrong notes.
#[derive(Debug, Clone, Copy)]
pub struct ToneSynthLane {
    sample_rate: u32,
}

impl Default for ToneSynthLane {
    fn default() -> Self {
        Self::new(44_100)
    }
}

impl ToneSynthLane {
    /// A synthesizer rendering at `sample_rate`.
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate: sample_rate.max(1),
        }
    }

    /// A struck note: 20 ms linear attack to 0.4, then an exponential decay
    /// to silence at 1.5 s.
    pub fn piano_note(&self, freq: f32) -> SoundData {
        self.render(1.5, |t| {
            let phase = (t * freq).fract();
            let triangle = 4.0 * (phase - 0.5).abs() - 1.0;
            triangle * envelope(t, 0.02, 0.4, 1.5)
        })
    }

    /// A harsh cluster for a wrong note: a sawtooth sliding down 50 Hz plus a
    /// square 10 Hz above, decaying from 0.3 over 0.5 s.
    pub fn discord(&self, freq: f32) -> SoundData {
        let length = 0.5;
        self.render(length, |t| {
            // Integrated frequency of a linear slide from freq to freq - 50.
            let saw_phase = (freq * t - 50.0 * t * t / (2.0 * length)).fract();
            let saw = 2.0 * saw_phase - 1.0;
            let square = if (t * (freq + 10.0)).fract() < 0.5 { 1.0 } else { -1.0 };
            0.5 * (saw + square) * envelope(t, 0.0, 0.3, length)
        })
    }

    /// A plain sine, mostly useful as a test signal.
    pub fn sine(&self, freq: f32, secs: f32, amplitude: f32) -> SoundData {
        self.render(secs, |t| (TAU * freq * t).sin() * amplitude)
    }

    /// Uniform white noise in `[-amplitude, amplitude]`.
    ///
    /// Deterministic for a given `seed` so looping beds sound the same on
    /// every run.
    pub fn noise(&self, secs: f32, amplitude: f32, seed: u32) -> SoundData {
        // xorshift32 never leaves zero, so nudge the seed off it.
        let mut state = seed.max(1);
        self.render(secs, |_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state as f32 / u32::MAX as f32 * 2.0 - 1.0) * amplitude
        })
    }

    fn render(&self, secs: f32, mut wave: impl FnMut(f32) -> f32) -> SoundData {
        let frames = (secs.max(0.0) * self.sample_rate as f32) as usize;
        let inv_rate = 1.0 / self.sample_rate as f32;
        let samples = (0..frames)
            .map(|i| wave(i as f32 * inv_rate).clamp(-1.0, 1.0))
            .collect();
        SoundData {
            samples,
            channels: 1,
            sample_rate: self.sample_rate,
        }
    }
}

/// Linear attack to `peak`, then exponential decay reaching 0.001 at `end`.
fn envelope(t: f32, attack: f32, peak: f32, end: f32) -> f32 {
    if t < attack {
        return peak * t / attack;
    }
    let decay_span = (end - attack).max(f32::EPSILON);
    let progress = ((t - attack) / decay_span).clamp(0.0, 1.0);
    peak * (0.001_f32 / peak).powf(progress)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piano_note_rises_then_fades() {
        let synth = ToneSynthLane::new(8_000);
        let note = synth.piano_note(440.0);
        assert_eq!(note.frames(), 12_000);

        let peak = |range: std::ops::Range<usize>| {
            note.samples[range].iter().fold(0.0_f32, |m, s| m.max(s.abs()))
        };
        let early = peak(160..800);
        let late = peak(11_000..12_000);
        assert!(early > 0.2 && early <= 0.4);
        assert!(late < 0.01);
    }

    #[test]
    fn noise_is_repeatable_and_bounded() {
        let synth = ToneSynthLane::new(8_000);
        let a = synth.noise(0.25, 0.5, 7);
        let b = synth.noise(0.25, 0.5, 7);
        assert_eq!(a, b);
        assert!(a.samples.iter().all(|s| s.abs() <= 0.5 + 1e-6));
        assert!(a.samples.iter().any(|s| *s > 0.1));
        assert!(a.samples.iter().any(|s| *s < -0.1));
    }

    #[test]
    fn discord_is_short_and_bounded() {
        let cluster = ToneSynthLane::new(8_000).discord(349.23);
        assert_eq!(cluster.frames(), 4_000);
        assert!(cluster.samples.iter().all(|s| s.abs() <= 0.3 + 1e-6));
    }
}
