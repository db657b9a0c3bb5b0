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

//! A scripted stand-in for the player.
//!
//! It walks down the corridor towards the end door, waits for the loop to
//! unlock it (or gives up waiting), and presses interact when close. It
//! obeys the movement commands the game publishes, so teleports and forced
//! walks show up in its pose.

use limen_core::math::{yaw_towards, Vec3, PI, TAU};
use limen_sdk::prelude::PlayerPose;
use limen_sdk::{GameCommand, ScriptedMove};

const WALK_SPEED: f32 = 1.6;
const INTERACT_DISTANCE: f32 = 0.8;

/// What the walker wants to do this frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct Step {
    /// World velocity in units per second.
    pub velocity: Vec3,
    /// Whether to press interact.
    pub interact: bool,
}

#[derive(Debug, Clone, Copy)]
struct ForcedWalk {
    delay: f32,
    remaining: f32,
    speed: f32,
    look_at: Option<Vec3>,
    look_slerp: f32,
}

impl ForcedWalk {
    fn from_command(m: &ScriptedMove) -> Self {
        let duration = m.duration_secs.max(1e-3);
        Self {
            delay: m.move_delay_secs,
            remaining: duration,
            speed: m.distance / duration,
            look_at: m.look_at,
            look_slerp: m.look_slerp.unwrap_or(1.0),
        }
    }
}

/// The scripted player.
pub struct Walker {
    position: Vec3,
    yaw: f32,
    forced: Option<ForcedWalk>,
    door_unlocked: bool,
    waited: f32,
    patience: f32,
}

impl Walker {
    /// A walker at `position` with camera yaw `yaw`, waiting at most
    /// `patience` seconds per loop for the end door to unlock.
    pub fn new(position: Vec3, yaw: f32, patience: f32) -> Self {
        Self {
            position,
            yaw,
            forced: None,
            door_unlocked: false,
            waited: 0.0,
            patience,
        }
    }

    /// Where the camera looks.
    pub fn forward(&self) -> Vec3 {
        Vec3::new(-self.yaw.sin(), 0.0, -self.yaw.cos())
    }

    /// The camera pose to hand to the game.
    pub fn pose(&self) -> PlayerPose {
        PlayerPose::new(self.position, self.forward())
    }

    /// Camera position.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Follows a command published by the game.
    pub fn apply(&mut self, command: &GameCommand) {
        match command {
            GameCommand::TeleportTo { x, z, keep_y, yaw } => {
                let y = if *keep_y { self.position.y } else { 0.0 };
                self.position = Vec3::new(*x, y, *z);
                self.yaw = *yaw;
                self.forced = None;
                self.door_unlocked = false;
                self.waited = 0.0;
            }
            GameCommand::ScriptedMove(m) => self.forced = Some(ForcedWalk::from_command(m)),
            GameCommand::UnlockEndDoor => self.door_unlocked = true,
            GameCommand::CameraLookAt(target) => self.yaw = yaw_towards(*target - self.position),
            _ => {}
        }
    }

    /// Advances the walker by `dt`. A dead walker stands still.
    pub fn step(&mut self, dt: f32, end_door: Vec3, dead: bool) -> Step {
        if dead {
            self.forced = None;
            return Step::default();
        }

        if let Some(walk) = &mut self.forced {
            if let Some(target) = walk.look_at {
                let wanted = yaw_towards(target - self.position);
                self.yaw += wrap_angle(wanted - self.yaw) * walk.look_slerp.clamp(0.0, 1.0);
            }
            if walk.delay > 0.0 {
                walk.delay -= dt;
                return Step::default();
            }
            walk.remaining -= dt;
            let speed = walk.speed;
            let finished = walk.remaining <= 0.0;
            let velocity = self.forward() * speed;
            if finished {
                self.forced = None;
            }
            self.position += velocity * dt;
            return Step {
                velocity,
                interact: false,
            };
        }

        if !self.door_unlocked && self.waited < self.patience {
            self.waited += dt;
            if self.waited >= self.patience {
                log::info!("Walker gave up waiting for the end door");
            }
            return Step::default();
        }

        let to_door = (end_door - self.position).flatten();
        let distance = to_door.length();
        if distance <= INTERACT_DISTANCE {
            return Step {
                velocity: Vec3::ZERO,
                interact: true,
            };
        }
        self.yaw = yaw_towards(to_door);
        let velocity = to_door.normalize() * WALK_SPEED;
        self.position += velocity * (dt.min(distance / WALK_SPEED));
        Step {
            velocity,
            interact: false,
        }
    }
}

/// `angle` wrapped into `(-PI, PI]`.
fn wrap_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_up_to_the_door_and_interacts() {
        let mut walker = Walker::new(Vec3::new(-1.0, 1.6, 0.0), 0.0, 0.0);
        let door = Vec3::new(-5.0, 1.5, 0.0);
        let mut pressed = false;
        for _ in 0..300 {
            if walker.step(1.0 / 60.0, door, false).interact {
                pressed = true;
                break;
            }
        }
        assert!(pressed);
        assert!(walker.position().flatten().distance(door.flatten()) <= INTERACT_DISTANCE + 1e-3);
    }

    #[test]
    fn teleport_keeps_height() {
        let mut walker = Walker::new(Vec3::new(0.0, 1.6, 0.0), 0.0, 0.0);
        walker.apply(&GameCommand::TeleportTo {
            x: 3.0,
            z: -2.0,
            keep_y: true,
            yaw: 1.0,
        });
        assert_eq!(walker.position(), Vec3::new(3.0, 1.6, -2.0));
    }

    #[test]
    fn wrap_angle_stays_in_range() {
        for a in [-7.0_f32, -PI, 0.0, PI, 4.0, 13.0] {
            let w = wrap_angle(a);
            assert!(w > -PI - 1e-5 && w <= PI + 1e-5);
        }
    }
}
