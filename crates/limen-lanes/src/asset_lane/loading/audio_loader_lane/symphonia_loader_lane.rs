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

//! Implements a universal asset loader for audio formats using the `symphonia` library.

use super::super::{AssetLoaderLane, DecodeError};
use limen_data::assets::SoundData;
use std::io::Cursor;
use symphonia::core::{
    audio::SampleBuffer, codecs::DecoderOptions, errors::Error as SymphoniaError,
    formats::FormatOptions, io::MediaSourceStream, meta::MetadataOptions, probe::Hint,
};

/// Decodes MP3, OGG, FLAC, WAV and friends with `symphonia`.
#[derive(Debug, Default)]
pub struct SymphoniaLoaderLane;

impl SymphoniaLoaderLane {
    /// Creates a new instance of `SymphoniaLoaderLane`.
    pub fn new() -> Self {
        Self
    }

    /// Decodes `bytes`, using `extension` (if known) to speed up probing.
    pub fn load_with_hint(
        &self,
        bytes: &[u8],
        extension: Option<&str>,
    ) -> Result<SoundData, DecodeError> {
        let mss = MediaSourceStream::new(Box::new(Cursor::new(bytes.to_vec())), Default::default());

        let mut hint = Hint::new();
        if let Some(ext) = extension {
            hint.with_extension(ext);
        }
        let probed = symphonia::default::get_probe().format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )?;
        let mut format_reader = probed.format;

        let track = format_reader
            .default_track()
            .ok_or(DecodeError::MissingTrack)?;
        let track_id = track.id;
        let sample_rate = track
            .codec_params
            .sample_rate
            .ok_or(DecodeError::MissingParameter("sample rate"))?;
        let channels = track
            .codec_params
            .channels
            .ok_or(DecodeError::MissingParameter("channel layout"))?
            .count() as u16;

        let mut decoder =
            symphonia::default::get_codecs().make(&track.codec_params, &DecoderOptions::default())?;

        let mut samples = Vec::<f32>::new();
        loop {
            let packet = match format_reader.next_packet() {
                Ok(packet) => packet,
                // End of stream.
                Err(SymphoniaError::IoError(_)) => break,
                Err(e) => return Err(e.into()),
            };
            if packet.track_id() != track_id {
                continue;
            }
            match decoder.decode(&packet) {
                Ok(decoded) => {
                    // Planar to interleaved.
                    let mut buf =
                        SampleBuffer::<f32>::new(decoded.capacity() as u64, *decoded.spec());
                    buf.copy_interleaved_ref(decoded);
                    samples.extend_from_slice(buf.samples());
                }
                Err(SymphoniaError::DecodeError(e)) => {
                    log::warn!("Skipping corrupt audio packet: {e}");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Ok(SoundData {
            samples,
            channels,
            sample_rate,
        })
    }
}

impl AssetLoaderLane<SoundData> for SymphoniaLoaderLane {
    fn load(&self, bytes: &[u8]) -> Result<SoundData, DecodeError> {
        self.load_with_hint(bytes, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_is_an_error_not_a_panic() {
        let result = SymphoniaLoaderLane::new().load(&[0xde, 0xad, 0xbe, 0xef]);
        assert!(result.is_err());
    }
}
