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

//! Portal doors: the swing animation, the teleport relation and the system
//! tying them to player input.

mod door;
mod system;
mod teleport;

pub use door::{step_angle, DoorAnimator};
pub use system::{is_bumping, PortalSystem};
pub use teleport::{door_frame, teleport_target, TeleportTarget};
