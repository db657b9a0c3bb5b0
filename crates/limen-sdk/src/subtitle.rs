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

//! Subtitle cues handed to the presentation layer.

use serde::{Deserialize, Serialize};

/// Line layout and timing of a subtitle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubtitleOptions {
    /// Wrapping width in characters.
    pub max_line_chars: u32,
    /// Fixed time each line stays up, used when `wpm` is zero.
    pub line_duration_ms: u32,
    /// Words per minute for automatic timing; zero disables it.
    pub wpm: u32,
    /// Pause between lines.
    pub gap_ms: u32,
    /// Shortest line time under automatic timing.
    pub min_ms: u32,
    /// Longest line time under automatic timing.
    pub max_ms: u32,
}

impl Default for SubtitleOptions {
    fn default() -> Self {
        Self {
            max_line_chars: 194,
            line_duration_ms: 2600,
            wpm: 0,
            gap_ms: 220,
            min_ms: 1400,
            max_ms: 5200,
        }
    }
}

/// A partial set of [`SubtitleOptions`], layered over a base.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubtitleOverrides {
    /// Replaces [`SubtitleOptions::max_line_chars`].
    pub max_line_chars: Option<u32>,
    /// Replaces [`SubtitleOptions::line_duration_ms`].
    pub line_duration_ms: Option<u32>,
    /// Replaces [`SubtitleOptions::wpm`].
    pub wpm: Option<u32>,
    /// Replaces [`SubtitleOptions::gap_ms`].
    pub gap_ms: Option<u32>,
    /// Replaces [`SubtitleOptions::min_ms`].
    pub min_ms: Option<u32>,
    /// Replaces [`SubtitleOptions::max_ms`].
    pub max_ms: Option<u32>,
}

impl SubtitleOverrides {
    /// Only the line duration set.
    pub fn line_duration(ms: u32) -> Self {
        Self {
            line_duration_ms: Some(ms),
            ..Self::default()
        }
    }

    /// `base` with every field set here replaced.
    pub fn apply(&self, base: SubtitleOptions) -> SubtitleOptions {
        SubtitleOptions {
            max_line_chars: self.max_line_chars.unwrap_or(base.max_line_chars),
            line_duration_ms: self.line_duration_ms.unwrap_or(base.line_duration_ms),
            wpm: self.wpm.unwrap_or(base.wpm),
            gap_ms: self.gap_ms.unwrap_or(base.gap_ms),
            min_ms: self.min_ms.unwrap_or(base.min_ms),
            max_ms: self.max_ms.unwrap_or(base.max_ms),
        }
    }
}

/// One subtitle to show.
///
/// `append` adds the text to what is on screen instead of replacing it. An
/// empty, non-appending cue clears the subtitle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtitleCue {
    /// Text to show.
    pub text: String,
    /// Layout and timing.
    pub options: SubtitleOptions,
    /// Whether to append to the current subtitle.
    pub append: bool,
}

impl SubtitleCue {
    /// A replacing cue with default timing.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            options: SubtitleOptions::default(),
            append: false,
        }
    }

    /// The cue that clears the subtitle.
    pub fn clear() -> Self {
        Self::new("")
    }

    /// Sets the options.
    pub fn with_options(mut self, options: SubtitleOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets append mode.
    pub fn appending(mut self, append: bool) -> Self {
        self.append = append;
        self
    }

    /// Whether this cue clears the subtitle.
    pub fn is_clear(&self) -> bool {
        self.text.is_empty() && !self.append
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_only_given_fields() {
        let merged = SubtitleOverrides::line_duration(9000).apply(SubtitleOptions::default());
        assert_eq!(merged.line_duration_ms, 9000);
        assert_eq!(merged.max_line_chars, 194);
        assert_eq!(merged.gap_ms, 220);
    }

    #[test]
    fn empty_replacing_cue_clears() {
        assert!(SubtitleCue::clear().is_clear());
        assert!(!SubtitleCue::new("").appending(true).is_clear());
    }
}
