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

/// Everything the player did since the previous tick, frozen.
///
/// Taken once per tick from an [`InputCollector`] and lent read-only to every
/// system, so an interact press is seen by all of them or none.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSnapshot {
    /// Strafe axis, `-1` (left) to `1` (right).
    pub move_x: f32,
    /// Forward axis, `-1` (back) to `1` (forward).
    pub move_y: f32,
    /// Horizontal look delta accumulated since the last snapshot.
    pub look_dx: f32,
    /// Vertical look delta accumulated since the last snapshot.
    pub look_dy: f32,
    /// Whether touch controls are active.
    pub touch_mode: bool,
    /// An interact press happened since the last snapshot.
    pub interact: bool,
    /// Radio dial movement in MHz since the last snapshot.
    pub dial_delta: f32,
    /// Piano keys struck since the last snapshot, as semitones above middle C.
    pub key_presses: Vec<u8>,
    /// Whether the player is holding focus on the piano.
    pub focus_held: bool,
}

/// Accumulates raw intents between ticks.
///
/// Held state (move axes, touch mode, focus) persists across snapshots; edge
/// state (look deltas, interact, dial, key presses) is cleared by every
/// [`InputCollector::take_snapshot`].
#[derive(Debug, Default)]
pub struct InputCollector {
    pending: InputSnapshot,
}

impl InputCollector {
    /// An idle collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets both movement axes, clamped to `[-1, 1]`.
    pub fn set_move_axes(&mut self, x: f32, y: f32) {
        self.pending.move_x = x.clamp(-1.0, 1.0);
        self.pending.move_y = y.clamp(-1.0, 1.0);
    }

    /// Adds look movement.
    pub fn add_look_delta(&mut self, dx: f32, dy: f32) {
        self.pending.look_dx += dx;
        self.pending.look_dy += dy;
    }

    /// Switches touch mode.
    pub fn set_touch_mode(&mut self, enabled: bool) {
        self.pending.touch_mode = enabled;
    }

    /// Registers an interact press.
    pub fn press_interact(&mut self) {
        self.pending.interact = true;
    }

    /// Turns the radio dial.
    pub fn turn_dial(&mut self, delta_mhz: f32) {
        self.pending.dial_delta += delta_mhz;
    }

    /// Strikes a piano key.
    pub fn press_key(&mut self, semitone: u8) {
        self.pending.key_presses.push(semitone);
    }

    /// Holds or releases focus.
    pub fn set_focus(&mut self, held: bool) {
        self.pending.focus_held = held;
    }

    /// Freezes the current input and clears the one-shot parts.
    pub fn take_snapshot(&mut self) -> InputSnapshot {
        let snapshot = self.pending.clone();
        self.pending.look_dx = 0.0;
        self.pending.look_dy = 0.0;
        self.pending.interact = false;
        self.pending.dial_delta = 0.0;
        self.pending.key_presses.clear();
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interact_is_consumed_once() {
        let mut input = InputCollector::new();
        input.press_interact();
        assert!(input.take_snapshot().interact);
        assert!(!input.take_snapshot().interact);
    }

    #[test]
    fn held_axes_survive_snapshots() {
        let mut input = InputCollector::new();
        input.set_move_axes(3.0, -0.5);
        input.add_look_delta(4.0, 1.0);
        input.add_look_delta(1.0, 1.0);

        let first = input.take_snapshot();
        assert_eq!((first.move_x, first.move_y), (1.0, -0.5));
        assert_eq!((first.look_dx, first.look_dy), (5.0, 2.0));

        let second = input.take_snapshot();
        assert_eq!(second.move_x, 1.0);
        assert_eq!(second.look_dx, 0.0);
    }
}
