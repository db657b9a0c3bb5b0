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

//! Door swing animation.

use crate::scene::SceneQuery;

/// Moves `current` towards `target` by at most `max_step`, landing exactly
/// on `target` instead of overshooting. Returns the new angle and whether it
/// arrived.
pub fn step_angle(current: f32, target: f32, max_step: f32) -> (f32, bool) {
    let delta = target - current;
    if delta.abs() <= max_step {
        (target, true)
    } else {
        (current + max_step.copysign(delta), false)
    }
}

/// Swings one door about its local Y axis at a fixed angular speed.
#[derive(Debug, Clone)]
pub struct DoorAnimator {
    name: String,
    closed_yaw: Option<f32>,
    yaw: f32,
    target: f32,
    animating: bool,
    open: bool,
}

impl DoorAnimator {
    /// An animator for the scene object `name`. The closed angle is read
    /// from the scene on first use.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            closed_yaw: None,
            yaw: 0.0,
            target: 0.0,
            animating: false,
            open: false,
        }
    }

    /// Scene object name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Reads the closed angle once. Returns whether the door exists.
    pub fn capture(&mut self, scene: &dyn SceneQuery) -> bool {
        if self.closed_yaw.is_some() {
            return true;
        }
        match scene.local_yaw(&self.name) {
            Some(yaw) => {
                self.closed_yaw = Some(yaw);
                self.yaw = yaw;
                self.target = yaw;
                true
            }
            None => false,
        }
    }

    /// Angle the door rests at when closed.
    pub fn closed_yaw(&self) -> Option<f32> {
        self.closed_yaw
    }

    /// Current swing angle.
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Whether the door is moving.
    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Whether the door is open or opening.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Starts swinging open by `angle`.
    pub fn open(&mut self, angle: f32) {
        if let Some(closed) = self.closed_yaw {
            self.target = closed - angle;
            self.animating = true;
            self.open = true;
        }
    }

    /// Starts swinging back to the closed angle.
    pub fn close(&mut self) {
        if let Some(closed) = self.closed_yaw {
            self.target = closed;
            self.animating = true;
            self.open = false;
        }
    }

    /// Advances the swing by `dt` seconds at `speed` radians per second and
    /// writes the angle into the scene.
    pub fn tick(&mut self, scene: &mut dyn SceneQuery, dt: f32, speed: f32) {
        if !self.animating {
            return;
        }
        let (yaw, arrived) = step_angle(self.yaw, self.target, speed * dt);
        self.yaw = yaw;
        if arrived {
            log::debug!("Door '{}' settled at {:.3} rad", self.name, yaw);
            self.animating = false;
        }
        if !scene.set_local_yaw(&self.name, yaw) {
            log::warn!("Door '{}' vanished from the scene", self.name);
            self.animating = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::StaticScene;
    use approx::assert_abs_diff_eq;
    use limen_core::math::{Vec3, FRAC_PI_2};

    #[test]
    fn step_lands_exactly_on_target() {
        assert_eq!(step_angle(0.0, 1.0, 0.4), (0.4, false));
        assert_eq!(step_angle(0.9, 1.0, 0.4), (1.0, true));
        assert_eq!(step_angle(0.0, -1.0, 2.0), (-1.0, true));
    }

    #[test]
    fn door_swings_open_at_fixed_speed() {
        let mut scene = StaticScene::new().with_object_at("Door", Vec3::ZERO);
        let mut door = DoorAnimator::new("Door");
        assert!(door.capture(&scene));
        door.open(FRAC_PI_2);

        door.tick(&mut scene, 0.5, 1.2);
        assert!(door.is_animating());
        assert_abs_diff_eq!(scene.local_yaw("Door").unwrap_or_default(), -0.6, epsilon = 1e-5);

        for _ in 0..10 {
            door.tick(&mut scene, 0.5, 1.2);
        }
        assert!(!door.is_animating());
        assert_abs_diff_eq!(door.yaw(), -FRAC_PI_2, epsilon = 1e-6);
    }

    #[test]
    fn missing_door_cannot_be_captured() {
        let scene = StaticScene::new();
        let mut door = DoorAnimator::new("Door");
        assert!(!door.capture(&scene));
        door.open(FRAC_PI_2);
        assert!(!door.is_animating());
    }
}
