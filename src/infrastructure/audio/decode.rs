//! Full in-memory decode of audio files

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use hound::{SampleFormat, WavReader};
use rodio::{Decoder, Source};

use crate::application::ports::PlaybackError;
use crate::domain::playback::DecodedClip;

/// Width of the samples rodio's compressed-format decoders produce
const DECODER_SAMPLE_WIDTH: u16 = 2;

/// Decode `path` completely into normalized interleaved samples.
///
/// WAV files are read at their own bit depth. Anything else goes through
/// rodio, which detects the container from the content (MP3, FLAC, Vorbis,
/// or WAV formats hound rejects), so the file extension does not matter.
pub fn decode_file(path: &Path) -> Result<DecodedClip, PlaybackError> {
    let file = File::open(path).map_err(|e| decode_error(path, e))?;
    match WavReader::new(BufReader::new(file)) {
        Ok(reader) => decode_wav(path, reader),
        Err(_) => decode_compressed(path),
    }
}

fn decode_wav(
    path: &Path,
    reader: WavReader<BufReader<File>>,
) -> Result<DecodedClip, PlaybackError> {
    let spec = reader.spec();
    let samples = match spec.sample_format {
        SampleFormat::Float => reader.into_samples::<f32>().collect::<Result<Vec<_>, _>>(),
        SampleFormat::Int => {
            let scale = (1_i64 << (spec.bits_per_sample.saturating_sub(1))) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<Result<Vec<_>, _>>()
        }
    }
    .map_err(|e| decode_error(path, e))?;

    let width = spec.bits_per_sample.div_ceil(8);
    build_clip(path, spec.channels, spec.sample_rate, width, samples)
}

fn decode_compressed(path: &Path) -> Result<DecodedClip, PlaybackError> {
    let file = File::open(path).map_err(|e| decode_error(path, e))?;
    let decoder = Decoder::new(BufReader::new(file)).map_err(|e| decode_error(path, e))?;

    let channels = decoder.channels();
    let sample_rate = decoder.sample_rate();
    let samples: Vec<f32> = decoder.convert_samples().collect();

    build_clip(path, channels, sample_rate, DECODER_SAMPLE_WIDTH, samples)
}

fn build_clip(
    path: &Path,
    channels: u16,
    sample_rate: u32,
    width: u16,
    samples: Vec<f32>,
) -> Result<DecodedClip, PlaybackError> {
    DecodedClip::new(channels, sample_rate, width, samples)
        .ok_or_else(|| decode_error(path, "stream reports an unusable sample format"))
}

fn decode_error(path: &Path, cause: impl std::fmt::Display) -> PlaybackError {
    PlaybackError::Decode(format!("{}: {}", path.display(), cause))
}
