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

//! The core audio processing lane: routes every voice through the bus graph
//! into the device buffer.

use limen_core::audio::StreamInfo;
use limen_data::audio::MixerState;

/// Mixes all voices of a [`MixerState`] into an interleaved output buffer.
///
/// Per voice: segment addressing, looping within the segment, linear
/// resampling to the device rate, voice gain times bus gain times master,
/// and for positional voices distance attenuation plus equal-power pan. A
/// hard limiter clamps the sum.
#[derive(Debug, Default)]
pub struct BusMixingLane;

impl BusMixingLane {
    /// Creates a new `BusMixingLane`.
    pub fn new() -> Self {
        Self
    }

    /// Renders one buffer. Voices that run off the end of their region are
    /// marked `finished`; nothing is removed here.
    pub fn mix(&self, state: &mut MixerState, output: &mut [f32], stream: &StreamInfo) {
        output.fill(0.0);
        if !state.running || stream.sample_rate == 0 {
            return;
        }

        let channels = stream.channels.max(1) as usize;
        let frames_out = output.len() / channels;
        let listener = state.listener;
        let buses = state.buses;

        for voice in state.voices.iter_mut() {
            if voice.finished {
                continue;
            }
            let region_len = voice.region.len();
            if region_len == 0 {
                voice.finished = true;
                continue;
            }

            let step = voice.sound.sample_rate as f32 / stream.sample_rate as f32 * voice.rate;
            let mut gain = voice.gain.value() * buses.effective(voice.group);

            let mut channel_gain = [gain, gain];
            let mut mono_source = false;
            if let (Some(spatial), Some(listener)) = (voice.spatial, listener) {
                gain *= spatial.attenuation(spatial.position.distance(listener.position));
                let pan = listener.pan_towards(spatial.position);
                channel_gain = [gain * (1.0 - pan).sqrt(), gain * pan.sqrt()];
                mono_source = true;
            }
            if gain == 0.0 {
                // Still advance so a muted voice stays in time.
                voice.cursor += step * frames_out as f32;
                wrap_or_finish(&mut voice.cursor, region_len, voice.looping, &mut voice.finished);
                continue;
            }

            for frame in 0..frames_out {
                let live =
                    wrap_or_finish(
                        &mut voice.cursor,
                        region_len,
                        voice.looping,
                        &mut voice.finished,
                    );
                if !live {
                    break;
                }

                let pos = voice.cursor;
                let f0 = pos.floor() as usize;
                let frac = pos - f0 as f32;
                let f1 = if f0 + 1 < region_len {
                    f0 + 1
                } else if voice.looping {
                    0
                } else {
                    f0
                };
                let a = voice.region.start + f0;
                let b = voice.region.start + f1;

                let out = &mut output[frame * channels..(frame + 1) * channels];
                for (ch, slot) in out.iter_mut().enumerate() {
                    let src_ch = if mono_source { 0 } else { ch };
                    let s0 = voice.sound.sample(a, src_ch);
                    let s1 = voice.sound.sample(b, src_ch);
                    let g = if channels == 1 {
                        gain
                    } else {
                        channel_gain.get(ch).copied().unwrap_or(gain)
                    };
                    *slot += (s0 + (s1 - s0) * frac) * g;
                }

                voice.cursor += step;
            }
        }

        // Limiter.
        for sample in output.iter_mut() {
            *sample = sample.clamp(-1.0, 1.0);
        }
    }
}

/// Wraps a looping cursor back into its region or marks a one-shot finished.
/// Returns whether the voice can still produce a frame.
fn wrap_or_finish(cursor: &mut f32, region_len: usize, looping: bool, finished: &mut bool) -> bool {
    let len = region_len as f32;
    if *cursor < len {
        return true;
    }
    if looping {
        *cursor %= len;
        true
    } else {
        *finished = true;
        false
    }
}
