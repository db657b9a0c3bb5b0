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

use thiserror::Error;

/// Failure to make a named asset available.
///
/// Cloneable so every waiter of a shared in-flight load observes the same
/// failure. Call sites treat any variant as "asset unavailable" and skip
/// whatever would have used it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoadError {
    /// Nothing is stored at the requested location.
    #[error("asset not found: {url}")]
    NotFound {
        /// The location that was requested.
        url: String,
    },
    /// Reading the bytes failed.
    #[error("failed to read {url}: {message}")]
    Io {
        /// The location that was requested.
        url: String,
        /// The underlying I/O error, rendered.
        message: String,
    },
    /// The bytes were read but could not be decoded.
    #[error("failed to decode '{name}': {message}")]
    Decode {
        /// The logical name of the asset being decoded.
        name: String,
        /// The decoder's error, rendered.
        message: String,
    },
    /// No decoder handles this kind of file.
    #[error("unsupported asset format: {url}")]
    UnsupportedFormat {
        /// The location that was requested.
        url: String,
    },
}
