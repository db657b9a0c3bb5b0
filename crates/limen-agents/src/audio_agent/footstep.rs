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

//! Rate-limited, randomized footsteps.

use super::engine::AudioEngine;
use super::options::PlayOptions;
use limen_data::audio::{SoundGroup, VoiceId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Picks footstep variants and enforces the minimum interval between them.
pub(crate) struct FootstepPicker {
    rng: StdRng,
    last_at: Option<f64>,
}

impl FootstepPicker {
    pub(crate) fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng, last_at: None }
    }

    /// Claims the slot at `now` unless the previous step was too recent.
    fn claim(&mut self, now: f64, min_interval: f32) -> bool {
        if let Some(last) = self.last_at {
            if now - last < f64::from(min_interval) {
                return false;
            }
        }
        self.last_at = Some(now);
        true
    }
}

impl AudioEngine {
    /// Plays a random footstep variant with slight volume and pitch spread.
    ///
    /// Calls closer together than the configured interval are ignored, no
    /// matter how often they come. Returns the voice when one was started.
    pub fn play_footstep(&mut self, volume_multiplier: f32) -> Option<VoiceId> {
        let now = self.timers.now();
        let min_interval = self.options.footstep_min_interval;
        if !self.footsteps.claim(now, min_interval) || self.options.footstep_variants.is_empty() {
            return None;
        }

        let rng = &mut self.footsteps.rng;
        let index = rng.gen_range(0..self.options.footstep_variants.len());
        let volume = (0.6 + rng.gen::<f32>() * 0.15) * volume_multiplier;
        let rate = 0.95 + rng.gen::<f32>() * 0.1;

        let name = self.options.footstep_variants[index].clone();
        if !self.has(&name) {
            return None;
        }
        self.play_one_shot(&name, PlayOptions::on(SoundGroup::Sfx).volume(volume).rate(rate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claim_enforces_interval() {
        let mut picker = FootstepPicker::new(Some(1));
        assert!(picker.claim(0.0, 0.11));
        assert!(!picker.claim(0.05, 0.11));
        assert!(!picker.claim(0.1, 0.11));
        assert!(picker.claim(0.2, 0.11));
    }
}
