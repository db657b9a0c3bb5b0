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

use limen_core::math::Vec3;

/// Loop index before the first loop has started.
pub const NOT_STARTED: i32 = -1;

/// Identity of one mounted piece of loop content.
///
/// Whenever it changes, whatever was mounted for the previous key is torn
/// down and the content for the new key is mounted from scratch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MountKey {
    /// Which loop is being played.
    pub loop_index: i32,
    /// How many times the player has respawned in this process.
    pub respawn_generation: u64,
}

/// The single shared state of a playthrough.
///
/// Owned by the game and lent to every system each tick. Loop progress is
/// written by the portal, death and respawn by encounters, and velocity and
/// pointer capture by the input layer.
#[derive(Debug, Clone, PartialEq)]
pub struct RunState {
    loop_index: i32,
    respawn_generation: u64,
    is_dead: bool,
    locked: bool,
    player_velocity: Vec3,
}

impl RunState {
    /// A fresh run that has not started yet.
    pub fn new() -> Self {
        Self {
            loop_index: NOT_STARTED,
            respawn_generation: 0,
            is_dead: false,
            locked: false,
            player_velocity: Vec3::ZERO,
        }
    }

    /// Current loop index, [`NOT_STARTED`] before [`RunState::start`].
    pub fn loop_index(&self) -> i32 {
        self.loop_index
    }

    /// Number of respawns so far.
    pub fn respawn_generation(&self) -> u64 {
        self.respawn_generation
    }

    /// The mount key derived from loop index and respawn generation.
    pub fn mount_key(&self) -> MountKey {
        MountKey {
            loop_index: self.loop_index,
            respawn_generation: self.respawn_generation,
        }
    }

    /// Whether the first loop has begun.
    pub fn is_started(&self) -> bool {
        self.loop_index != NOT_STARTED
    }

    /// Enters loop 0 if the run has not started. Returns whether it did.
    pub fn start(&mut self) -> bool {
        if self.is_started() {
            return false;
        }
        self.loop_index = 0;
        true
    }

    /// Jumps to `index`.
    pub fn set_loop(&mut self, index: i32) {
        self.loop_index = index;
    }

    /// Advances to the next loop and returns the new index.
    pub fn increment_loop(&mut self) -> i32 {
        self.loop_index = self.loop_index.saturating_add(1);
        self.loop_index
    }

    /// Whether the player is dead and awaiting respawn.
    pub fn is_dead(&self) -> bool {
        self.is_dead
    }

    /// Marks the player dead. Returns `true` only on the alive to dead
    /// transition; a second call while dead does nothing and returns `false`.
    pub fn die(&mut self) -> bool {
        if self.is_dead {
            return false;
        }
        self.is_dead = true;
        true
    }

    /// Brings the player back and bumps the respawn generation, which forces
    /// all loop content to remount.
    pub fn respawn(&mut self) {
        self.is_dead = false;
        self.respawn_generation += 1;
    }

    /// Whether the pointer is captured for mouse-look.
    pub fn locked(&self) -> bool {
        self.locked
    }

    /// Sets pointer capture.
    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    /// Player velocity in world units per second.
    pub fn player_velocity(&self) -> Vec3 {
        self.player_velocity
    }

    /// Records the player's velocity (world units per second).
    pub fn set_player_velocity(&mut self, velocity: Vec3) {
        self.player_velocity = velocity;
    }
}

impl Default for RunState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_from_sentinel() {
        let mut run = RunState::new();
        assert_eq!(run.loop_index(), NOT_STARTED);
        assert!(run.start());
        assert!(!run.start());
        assert_eq!(run.loop_index(), 0);
    }

    #[test]
    fn die_is_idempotent() {
        let mut run = RunState::new();
        assert!(run.die());
        assert!(!run.die());
        assert!(run.is_dead());
    }

    #[test]
    fn respawn_changes_mount_key() {
        let mut run = RunState::new();
        run.start();
        let before = run.mount_key();
        run.die();
        run.respawn();
        assert!(!run.is_dead());
        assert_ne!(run.mount_key(), before);
        assert_eq!(run.mount_key().loop_index, before.loop_index);
    }
}
