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

//! The pair of doors that loops the corridor.
//!
//! The player leaves through the end door and comes back in through the
//! start door. Either door reacts to the interact button or to being walked
//! into; the start door swings open, the end door teleports.

use super::door::DoorAnimator;
use super::teleport::{door_frame, teleport_target};
use crate::command::{GameCommand, ScriptedMove};
use crate::config::DoorConfig;
use crate::context::FrameContext;
use limen_core::math::Vec3;
use limen_core::{TimerId, Timers};

/// Delayed portal work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PortalEvent {
    CloseStartDoor,
    RetryTeleport,
}

/// Whether the player is walking into a door.
///
/// `center` is the door's bounding-box center; its height is replaced by the
/// camera's so only ground-plane distance counts. The player must be within
/// `max_distance` of it and moving towards it faster than `min_speed`
/// (velocity in units per second).
pub fn is_bumping(
    center: Vec3,
    camera: Vec3,
    velocity: Vec3,
    max_distance: f32,
    min_speed: f32,
) -> bool {
    let center = center.with_y(camera.y);
    if center.distance(camera) > max_distance {
        return false;
    }
    let towards = (center - camera).normalize();
    towards.dot(velocity) > min_speed
}

/// Door state shared by both portal doors.
pub struct PortalSystem {
    start: DoorAnimator,
    end_door: String,
    closed_lock: bool,
    timers: Timers<PortalEvent>,
    retry: Option<TimerId>,
    warned_missing: bool,
}

impl PortalSystem {
    /// Doors named `start_door` and `end_door`.
    pub fn new(start_door: &str, end_door: &str) -> Self {
        Self {
            start: DoorAnimator::new(start_door),
            end_door: end_door.to_owned(),
            closed_lock: false,
            timers: Timers::new(),
            retry: None,
            warned_missing: false,
        }
    }

    /// The start door's animator.
    pub fn start_door(&self) -> &DoorAnimator {
        &self.start
    }

    /// Whether the start door was closed behind the player and stays shut
    /// until the next approach to the end door.
    pub fn is_closed_locked(&self) -> bool {
        self.closed_lock
    }

    /// Runs one tick: delayed closes and retries, interaction, bumps and
    /// the swing animation.
    pub fn tick(&mut self, ctx: &mut FrameContext<'_>) {
        if !self.start.capture(&*ctx.scene) {
            if !self.warned_missing {
                log::warn!("Start door '{}' not found, portal disabled", self.start.name());
                self.warned_missing = true;
            }
            return;
        }
        let config = ctx.config.door;

        for event in self.timers.advance(ctx.dt) {
            match event {
                PortalEvent::CloseStartDoor => self.close_start(ctx),
                PortalEvent::RetryTeleport => {
                    self.retry = None;
                    self.try_end_teleport(ctx);
                }
            }
        }

        if ctx.input.interact && !self.try_end_teleport(ctx) {
            self.try_open_start(ctx);
        }

        if !self.start.is_animating() {
            let camera = ctx.pose.position;
            let velocity = ctx.run.player_velocity();
            let bumping = |name: &str, ctx: &FrameContext<'_>| {
                ctx.scene.bounds_center(name).is_some_and(|center| {
                    is_bumping(center, camera, velocity, config.bump_distance, config.bump_speed)
                })
            };
            if bumping(self.start.name(), &*ctx) {
                self.try_open_start(ctx);
            } else if bumping(&self.end_door, &*ctx) {
                self.try_end_teleport(ctx);
            }
        }

        self.start.tick(&mut *ctx.scene, ctx.dt, config.angular_speed);
    }

    /// Opens the start door if the player is close and it is not locked
    /// shut. Returns whether it opened.
    pub fn try_open_start(&mut self, ctx: &mut FrameContext<'_>) -> bool {
        if self.closed_lock || self.start.is_open() {
            return false;
        }
        let Some(door) = ctx.scene.world_position(self.start.name()) else {
            return false;
        };
        let distance = door.distance(ctx.pose.position);
        if distance > ctx.config.door.interact_range {
            return false;
        }
        self.open_start(ctx, distance);
        true
    }

    /// Teleports the player from the end door to the start door, walking
    /// them closer first when they are too far.
    ///
    /// Returns whether the end door handled the request (teleported or
    /// started the approach).
    pub fn try_end_teleport(&mut self, ctx: &mut FrameContext<'_>) -> bool {
        let config = ctx.config.door;
        let Some(end) = ctx.require_position(&self.end_door) else {
            return false;
        };
        let distance = end.distance(ctx.pose.position);
        if distance > config.teleport_range {
            log::debug!("Too far from the end door to teleport ({distance:.2})");
            return false;
        }

        if distance > config.approach_threshold {
            if self.retry.is_some_and(|id| self.timers.is_pending(id)) {
                return true;
            }
            log::debug!("Walking up to the end door before teleporting");
            ctx.publish(GameCommand::ScriptedMove(ScriptedMove::walk(
                config.approach_duration_secs,
                distance + config.approach_overshoot,
            )));
            self.closed_lock = false;
            self.retry = Some(
                self.timers
                    .schedule(config.approach_retry_secs, PortalEvent::RetryTeleport),
            );
            return true;
        }

        let frames = door_frame(&*ctx.scene, &self.end_door)
            .zip(door_frame(&*ctx.scene, self.start.name()));
        let Some((end_frame, start_frame)) = frames else {
            log::warn!("Portal doors not found, cannot teleport");
            return false;
        };
        let Some(target) = teleport_target(&end_frame, &start_frame, ctx.pose.position) else {
            log::warn!("End door '{}' has a degenerate transform", self.end_door);
            return false;
        };

        log::debug!(
            "Teleporting to ({:.2}, {:.2}) yaw {:.3}",
            target.position.x,
            target.position.z,
            target.yaw
        );
        ctx.publish(GameCommand::TeleportTo {
            x: target.position.x,
            z: target.position.z,
            keep_y: true,
            yaw: target.yaw,
        });
        let index = ctx.run.increment_loop();
        log::info!("Entered loop {index}");

        self.closed_lock = false;
        self.open_start(ctx, 0.0);
        true
    }

    fn open_start(&mut self, ctx: &mut FrameContext<'_>, distance: f32) {
        let config = ctx.config.door;
        self.start.open(config.open_angle);
        ctx.audio.play_door_open();
        ctx.publish(GameCommand::DoorOpened);

        if let Some(door) = ctx.scene.world_position(self.start.name()) {
            let walk = config.walk_in;
            ctx.publish(GameCommand::ScriptedMove(ScriptedMove {
                duration_secs: walk.duration_secs,
                distance: walk.base_distance + distance / 2.0,
                lock_look: true,
                look_at: Some(door + walk.look_offset),
                look_slerp: Some(walk.look_slerp),
                move_delay_secs: walk.move_delay_secs,
            }));
        }
        self.timers.cancel_where(|e| *e == PortalEvent::CloseStartDoor);
        self.timers
            .schedule(config.close_delay_secs, PortalEvent::CloseStartDoor);
    }

    fn close_start(&mut self, ctx: &mut FrameContext<'_>) {
        self.start.close();
        ctx.audio.play_door_close();
        self.closed_lock = true;
    }
}
