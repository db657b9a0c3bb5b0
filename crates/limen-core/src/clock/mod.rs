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

//! Monotonic simulation time and fire-once timers.
//!
//! Every delayed action in the game (enemy phase changes, door closing,
//! respawn, sound disposal) is scheduled against simulation time advanced by
//! the tick, never against the wall clock, so tests can step time exactly.

mod timers;

pub use timers::{TimerId, Timers};

/// Seconds of simulation time elapsed since creation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SimClock {
    now: f64,
}

impl SimClock {
    /// A clock at time zero.
    pub const fn new() -> Self {
        Self { now: 0.0 }
    }

    /// Current simulation time in seconds.
    #[inline]
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Moves time forward by `dt` seconds. Negative or non-finite steps are
    /// ignored so the clock never runs backwards.
    pub fn advance(&mut self, dt: f32) -> f64 {
        if dt.is_finite() && dt > 0.0 {
            self.now += f64::from(dt);
        }
        self.now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_ignores_bad_steps() {
        let mut clock = SimClock::new();
        clock.advance(0.5);
        clock.advance(-1.0);
        clock.advance(f32::NAN);
        assert_eq!(clock.now(), 0.5);
    }
}
