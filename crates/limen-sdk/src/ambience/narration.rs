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

//! The news broadcast that plays once the radio comes on.

use crate::command::GameCommand;
use crate::config::NarrationParagraph;
use crate::context::FrameContext;
use crate::load_tracker::LoadTracker;
use crate::subtitle::{SubtitleCue, SubtitleOptions};
use limen_agents::audio_agent::{PlayOptions, SoundGroup, SpatialOptions, VoiceId};
use limen_core::Timers;

#[derive(Debug, Clone, PartialEq)]
enum NarrationEvent {
    Subtitle(SubtitleCue),
    ParagraphEnd,
}

/// The subtitle events of one paragraph, as `(delay_secs, cue)` pairs.
///
/// Cues without an explicit offset fall one second apart. The first cue
/// replaces whatever is on screen, later ones append. A paragraph without
/// cues shows its whole text at once.
pub fn paragraph_cues(
    paragraph: &NarrationParagraph,
    base: SubtitleOptions,
) -> Vec<(f32, SubtitleCue)> {
    let paragraph_options = paragraph.options.apply(base);
    if paragraph.cues.is_empty() {
        return vec![(
            0.0,
            SubtitleCue::new(paragraph.subtitle.clone()).with_options(paragraph_options),
        )];
    }
    paragraph
        .cues
        .iter()
        .enumerate()
        .map(|(idx, cue)| {
            let at_ms = cue.at_ms.unwrap_or(idx as u32 * 1000);
            let options = cue.options.apply(paragraph_options);
            let subtitle = SubtitleCue::new(cue.text.clone())
                .with_options(options)
                .appending(idx > 0);
            (at_ms as f32 / 1000.0, subtitle)
        })
        .collect()
}

/// Plays the narration paragraphs one after another, with subtitles.
///
/// Starts once per game; later start requests are ignored. A paragraph whose
/// audio fails to load is skipped.
#[derive(Default)]
pub struct RadioNarration {
    started: bool,
    finished: bool,
    current: Option<usize>,
    voice: Option<VoiceId>,
    loads: LoadTracker<usize>,
    timers: Timers<NarrationEvent>,
}

impl RadioNarration {
    /// A narration that has not started.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the narration was started.
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Whether the last paragraph ended.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Index of the paragraph playing or loading.
    pub fn current_paragraph(&self) -> Option<usize> {
        self.current
    }

    fn sound_name(index: usize) -> String {
        format!("radio_para_{}", index + 1)
    }

    /// Starts the broadcast from the first paragraph.
    pub fn start(&mut self, ctx: &mut FrameContext<'_>) {
        if self.started {
            log::debug!("Radio narration already started");
            return;
        }
        self.started = true;
        log::info!("Radio narration started");
        self.request(ctx, 0);
    }

    fn request(&mut self, ctx: &mut FrameContext<'_>, index: usize) {
        let config = ctx.config;
        let Some(paragraph) = config.narration.paragraphs.get(index) else {
            self.finish(ctx);
            return;
        };
        self.current = Some(index);
        self.loads.request(
            &*ctx.audio,
            ctx.runtime,
            &Self::sound_name(index),
            &paragraph.url,
            index,
        );
    }

    fn play(&mut self, ctx: &mut FrameContext<'_>, index: usize) {
        let config = ctx.config;
        let narration = &config.narration;
        let name = Self::sound_name(index);
        let Some(sound) = ctx.audio.sound(&name) else {
            self.request(ctx, index + 1);
            return;
        };

        let opts = match ctx.scene.world_position(&config.scene.radio) {
            Some(position) => PlayOptions::on(SoundGroup::Ambient)
                .volume(narration.volume)
                .at(SpatialOptions::at(position)
                    .ref_distance(narration.ref_distance)
                    .rolloff(narration.rolloff)
                    .max_distance(narration.max_distance)),
            None => PlayOptions::on(SoundGroup::Ambient).volume(narration.fallback_volume),
        };
        self.voice = ctx.audio.play_one_shot(&name, opts);
        log::debug!("Radio paragraph {} playing", index + 1);

        let cues = paragraph_cues(&narration.paragraphs[index], narration.subtitle_options);
        for (delay, cue) in cues {
            self.timers.schedule(delay, NarrationEvent::Subtitle(cue));
        }
        self.timers.schedule(
            sound.duration_secs() + narration.end_margin_secs,
            NarrationEvent::ParagraphEnd,
        );
    }

    fn finish(&mut self, ctx: &mut FrameContext<'_>) {
        log::info!("Radio narration finished");
        self.finished = true;
        self.current = None;
        ctx.publish(GameCommand::radio_subtitle(SubtitleCue::clear()));
        ctx.publish(GameCommand::RadioNarrationEnd);
    }

    /// Advances loads, subtitles and paragraph changes.
    pub fn tick(&mut self, ctx: &mut FrameContext<'_>) {
        if !self.started || self.finished {
            return;
        }

        for loaded in self.loads.poll() {
            match loaded.result {
                Ok(_) => self.play(ctx, loaded.tag),
                Err(_) => self.request(ctx, loaded.tag + 1),
            }
        }

        for event in self.timers.advance(ctx.dt) {
            match event {
                NarrationEvent::Subtitle(cue) => ctx.publish(GameCommand::radio_subtitle(cue)),
                NarrationEvent::ParagraphEnd => {
                    self.voice = None;
                    let next = self.current.map_or(0, |i| i + 1);
                    self.timers.clear();
                    self.request(ctx, next);
                    break;
                }
            }
        }
    }

    /// Stops the broadcast for good.
    pub fn cancel(&mut self, ctx: &mut FrameContext<'_>) {
        self.loads.cancel();
        self.timers.clear();
        if let Some(voice) = self.voice.take() {
            ctx.audio.stop_voice(voice);
        }
        self.current = None;
        self.finished = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{NarrationConfig, NarrationCue};
    use crate::subtitle::SubtitleOverrides;

    #[test]
    fn cues_default_one_second_apart_and_append() {
        let paragraph = NarrationParagraph {
            cues: vec![
                NarrationCue {
                    text: "one".into(),
                    ..NarrationCue::default()
                },
                NarrationCue {
                    text: "two".into(),
                    ..NarrationCue::default()
                },
            ],
            ..NarrationParagraph::default()
        };
        let cues = paragraph_cues(&paragraph, SubtitleOptions::default());
        assert_eq!(cues[0].0, 0.0);
        assert!(!cues[0].1.append);
        assert_eq!(cues[1].0, 1.0);
        assert!(cues[1].1.append);
    }

    #[test]
    fn cue_overrides_layer_over_paragraph_overrides() {
        let paragraph = NarrationParagraph {
            options: SubtitleOverrides {
                gap_ms: Some(50),
                line_duration_ms: Some(1000),
                ..SubtitleOverrides::default()
            },
            cues: vec![NarrationCue {
                text: "x".into(),
                at_ms: Some(2500),
                options: SubtitleOverrides::line_duration(4000),
            }],
            ..NarrationParagraph::default()
        };
        let cues = paragraph_cues(&paragraph, SubtitleOptions::default());
        assert_eq!(cues[0].0, 2.5);
        assert_eq!(cues[0].1.options.line_duration_ms, 4000);
        assert_eq!(cues[0].1.options.gap_ms, 50);
        assert_eq!(cues[0].1.options.max_line_chars, 194);
    }

    #[test]
    fn paragraph_without_cues_shows_its_text() {
        let paragraph = NarrationParagraph {
            subtitle: "all of it".into(),
            ..NarrationParagraph::default()
        };
        let cues = paragraph_cues(&paragraph, SubtitleOptions::default());
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].1.text, "all of it");
    }

    #[test]
    fn shipped_broadcast_has_timed_cues() {
        let config = NarrationConfig::default();
        assert_eq!(config.paragraphs.len(), 4);
        let first = paragraph_cues(&config.paragraphs[0], config.subtitle_options);
        assert_eq!(first[0].0, 0.3);
        assert_eq!(first[0].1.options.line_duration_ms, 4900);
    }
}
