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

//! # Limen Infra
//!
//! Concrete implementations of the contracts in `limen-core`: a CPAL output
//! device, a filesystem asset source, and an in-memory asset source for
//! headless runs and tests.

#![warn(missing_docs)]

pub mod asset_source;
pub mod audio;

pub use asset_source::{FileAssetSource, MemoryAssetSource};
pub use audio::backends::cpal::CpalAudioDevice;
