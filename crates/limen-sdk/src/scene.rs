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

//! Access to the externally authored 3D scene.
//!
//! Scene content is authored outside the game and may omit or rename
//! objects, so every lookup is fallible and every mutation reports whether
//! the object existed. Callers log and carry on when it did not.

use limen_core::math::{AffineTransform, Quaternion, Vec3, Vec4};
use std::collections::{BTreeMap, HashMap};

/// What the game systems may read and change in the scene.
pub trait SceneQuery {
    /// World transform of a named object, including its local yaw.
    fn world_transform(&self, name: &str) -> Option<AffineTransform>;

    /// World position of a named object's origin.
    fn world_position(&self, name: &str) -> Option<Vec3> {
        self.world_transform(name).map(|t| t.translation())
    }

    /// World-space center of a named object's bounding box.
    fn bounds_center(&self, name: &str) -> Option<Vec3>;

    /// Local rotation about Y of a named object.
    fn local_yaw(&self, name: &str) -> Option<f32>;

    /// Sets the local rotation about Y.
    fn set_local_yaw(&mut self, name: &str, yaw: f32) -> bool;

    /// Whether a named object is shown.
    fn is_visible(&self, name: &str) -> Option<bool>;

    /// Shows or hides a named object.
    fn set_visible(&mut self, name: &str, visible: bool) -> bool;

    /// Moves a named object, keeping its orientation.
    fn set_world_position(&mut self, name: &str, position: Vec3) -> bool;

    /// Places a runtime actor (an enemy), creating it when new.
    fn place_actor(&mut self, name: &str, position: Vec3, rotation: Quaternion);

    /// Removes a runtime actor.
    fn remove_actor(&mut self, name: &str) -> bool;

    /// Names of every light in the level.
    fn light_names(&self) -> Vec<String>;

    /// Current intensity of a light.
    fn light_intensity(&self, name: &str) -> Option<f32>;

    /// Sets the intensity of a light.
    fn set_light_intensity(&mut self, name: &str, intensity: f32) -> bool;
}

/// One object of a [`StaticScene`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneObject {
    /// Parent frame of the object.
    pub frame: AffineTransform,
    /// Local rotation about Y, applied after `frame`.
    pub yaw: f32,
    /// Bounding box center in object space.
    pub bounds_center: Vec3,
    /// Whether the object is drawn.
    pub visible: bool,
}

impl SceneObject {
    /// A visible object in `frame` with its bounds centered on its origin.
    pub fn new(frame: AffineTransform) -> Self {
        Self {
            frame,
            yaw: 0.0,
            bounds_center: Vec3::ZERO,
            visible: true,
        }
    }

    /// `frame` followed by the local yaw.
    pub fn world(&self) -> AffineTransform {
        self.frame * AffineTransform::from_rotation(Quaternion::from_yaw(self.yaw))
    }
}

/// An in-memory scene, for headless runs and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticScene {
    objects: HashMap<String, SceneObject>,
    lights: BTreeMap<String, f32>,
}

impl StaticScene {
    /// An empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an object at `frame`.
    pub fn with_object(mut self, name: &str, frame: AffineTransform) -> Self {
        self.insert(name, SceneObject::new(frame));
        self
    }

    /// Adds an object at a plain position.
    pub fn with_object_at(self, name: &str, position: Vec3) -> Self {
        self.with_object(name, AffineTransform::from_translation(position))
    }

    /// Adds a light.
    pub fn with_light(mut self, name: &str, intensity: f32) -> Self {
        self.lights.insert(name.to_owned(), intensity);
        self
    }

    /// Inserts or replaces an object.
    pub fn insert(&mut self, name: &str, object: SceneObject) {
        self.objects.insert(name.to_owned(), object);
    }

    /// A named object.
    pub fn object(&self, name: &str) -> Option<&SceneObject> {
        self.objects.get(name)
    }

    /// Mutable access to a named object.
    pub fn object_mut(&mut self, name: &str) -> Option<&mut SceneObject> {
        self.objects.get_mut(name)
    }
}

impl SceneQuery for StaticScene {
    fn world_transform(&self, name: &str) -> Option<AffineTransform> {
        self.objects.get(name).map(SceneObject::world)
    }

    fn bounds_center(&self, name: &str) -> Option<Vec3> {
        self.objects
            .get(name)
            .map(|o| o.world().transform_point(o.bounds_center))
    }

    fn local_yaw(&self, name: &str) -> Option<f32> {
        self.objects.get(name).map(|o| o.yaw)
    }

    fn set_local_yaw(&mut self, name: &str, yaw: f32) -> bool {
        self.objects.get_mut(name).map(|o| o.yaw = yaw).is_some()
    }

    fn is_visible(&self, name: &str) -> Option<bool> {
        self.objects.get(name).map(|o| o.visible)
    }

    fn set_visible(&mut self, name: &str, visible: bool) -> bool {
        self.objects.get_mut(name).map(|o| o.visible = visible).is_some()
    }

    fn set_world_position(&mut self, name: &str, position: Vec3) -> bool {
        self.objects
            .get_mut(name)
            .map(|o| o.frame.0.cols[3] = Vec4::from_vec3(position, 1.0))
            .is_some()
    }

    fn place_actor(&mut self, name: &str, position: Vec3, rotation: Quaternion) {
        let frame = AffineTransform::from_translation_rotation(position, rotation);
        let object = self
            .objects
            .entry(name.to_owned())
            .or_insert_with(|| SceneObject::new(frame));
        object.frame = frame;
    }

    fn remove_actor(&mut self, name: &str) -> bool {
        self.objects.remove(name).is_some()
    }

    fn light_names(&self) -> Vec<String> {
        self.lights.keys().cloned().collect()
    }

    fn light_intensity(&self, name: &str) -> Option<f32> {
        self.lights.get(name).copied()
    }

    fn set_light_intensity(&mut self, name: &str, intensity: f32) -> bool {
        self.lights.get_mut(name).map(|i| *i = intensity).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use limen_core::math::FRAC_PI_2;

    #[test]
    fn yaw_rotates_about_the_frame_origin() {
        let mut scene = StaticScene::new().with_object_at("Door", Vec3::new(2.0, 0.0, 0.0));
        if let Some(door) = scene.object_mut("Door") {
            door.bounds_center = Vec3::Z;
        }
        assert!(scene.set_local_yaw("Door", FRAC_PI_2));

        let center = scene.bounds_center("Door").expect("door exists");
        assert_abs_diff_eq!(center.x, 3.0, epsilon = 1e-5);
        assert_abs_diff_eq!(center.z, 0.0, epsilon = 1e-5);
        assert_eq!(scene.world_position("Door"), Some(Vec3::new(2.0, 0.0, 0.0)));
    }

    #[test]
    fn missing_objects_report_false() {
        let mut scene = StaticScene::new();
        assert!(!scene.set_visible("Ghost", false));
        assert!(scene.world_transform("Ghost").is_none());
        assert!(!scene.set_light_intensity("Ghost", 1.0));
    }

    #[test]
    fn actors_are_upserted() {
        let mut scene = StaticScene::new();
        scene.place_actor("Stalker", Vec3::new(0.0, 0.0, 11.0), Quaternion::IDENTITY);
        scene.place_actor("Stalker", Vec3::new(1.0, 0.0, 11.0), Quaternion::IDENTITY);
        assert_eq!(scene.world_position("Stalker"), Some(Vec3::new(1.0, 0.0, 11.0)));
        assert!(scene.remove_actor("Stalker"));
        assert!(scene.world_position("Stalker").is_none());
    }
}
