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

//! Contracts for fetching raw asset bytes.
//!
//! Sounds are referenced by name everywhere in the game; the URL a name is
//! bound to is only seen once, when the audio engine loads it through an
//! [`AssetSource`].

mod error;
mod source;

pub use error::LoadError;
pub use source::AssetSource;
