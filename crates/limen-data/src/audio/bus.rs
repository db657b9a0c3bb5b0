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

use serde::{Deserialize, Serialize};

/// A routing bus of the audio graph.
///
/// `Master` feeds the output; every other bus feeds `Master`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundGroup {
    /// The final bus every other bus feeds.
    Master,
    /// Short effects: doors, footsteps, stingers.
    Sfx,
    /// The single music track.
    Music,
    /// Looping beds and narration.
    Ambient,
    /// Interface clicks.
    Ui,
}

impl SoundGroup {
    /// The four buses under master, in graph order.
    pub const BUSES: [SoundGroup; 4] = [
        SoundGroup::Sfx,
        SoundGroup::Music,
        SoundGroup::Ambient,
        SoundGroup::Ui,
    ];

    /// Stable lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            SoundGroup::Master => "master",
            SoundGroup::Sfx => "sfx",
            SoundGroup::Music => "music",
            SoundGroup::Ambient => "ambient",
            SoundGroup::Ui => "ui",
        }
    }
}

/// Scalar gain of each bus, each kept in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusGains {
    /// Master bus gain.
    pub master: f32,
    /// Effects bus gain.
    pub sfx: f32,
    /// Music bus gain.
    pub music: f32,
    /// Ambience bus gain.
    pub ambient: f32,
    /// Interface bus gain.
    pub ui: f32,
}

impl Default for BusGains {
    fn default() -> Self {
        Self {
            master: 1.0,
            sfx: 1.0,
            music: 1.0,
            ambient: 1.0,
            ui: 1.0,
        }
    }
}

impl BusGains {
    /// The gain of one bus on its own.
    pub fn get(&self, group: SoundGroup) -> f32 {
        match group {
            SoundGroup::Master => self.master,
            SoundGroup::Sfx => self.sfx,
            SoundGroup::Music => self.music,
            SoundGroup::Ambient => self.ambient,
            SoundGroup::Ui => self.ui,
        }
    }

    /// Sets one bus, clamping into `[0, 1]`. NaN is treated as silence.
    pub fn set(&mut self, group: SoundGroup, gain: f32) {
        let gain = if gain.is_nan() { 0.0 } else { gain.clamp(0.0, 1.0) };
        match group {
            SoundGroup::Master => self.master = gain,
            SoundGroup::Sfx => self.sfx = gain,
            SoundGroup::Music => self.music = gain,
            SoundGroup::Ambient => self.ambient = gain,
            SoundGroup::Ui => self.ui = gain,
        }
    }

    /// Gain a voice routed to `group` receives after passing through master.
    pub fn effective(&self, group: SoundGroup) -> f32 {
        match group {
            SoundGroup::Master => self.master,
            bus => self.master * self.get(bus),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_clamps_into_unit_range() {
        let mut gains = BusGains::default();
        gains.set(SoundGroup::Music, 1.7);
        gains.set(SoundGroup::Sfx, -0.2);
        gains.set(SoundGroup::Ui, f32::NAN);
        assert_eq!(gains.music, 1.0);
        assert_eq!(gains.sfx, 0.0);
        assert_eq!(gains.ui, 0.0);
    }

    #[test]
    fn buses_pass_through_master() {
        let mut gains = BusGains::default();
        gains.set(SoundGroup::Master, 0.5);
        gains.set(SoundGroup::Ambient, 0.4);
        assert_eq!(gains.effective(SoundGroup::Ambient), 0.2);
        assert_eq!(gains.effective(SoundGroup::Master), 0.5);
    }
}
