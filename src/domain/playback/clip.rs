//! Decoded clip value object

use std::time::Duration;

/// A fully decoded clip.
///
/// Samples are interleaved and normalized to `[-1.0, 1.0]`. Channel count,
/// sample rate and sample width are those of the source.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedClip {
    channels: u16,
    sample_rate: u32,
    sample_width: u16,
    samples: Vec<f32>,
}

impl DecodedClip {
    /// Returns `None` when the format is unusable (no channels, zero rate,
    /// or a sample width outside 1..=4 bytes).
    pub fn new(
        channels: u16,
        sample_rate: u32,
        sample_width: u16,
        samples: Vec<f32>,
    ) -> Option<Self> {
        if channels == 0 || sample_rate == 0 || !(1..=4).contains(&sample_width) {
            return None;
        }
        Some(Self {
            channels,
            sample_rate,
            sample_width,
            samples,
        })
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Bytes per sample in the source
    pub fn sample_width(&self) -> u16 {
        self.sample_width
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Number of frames (one sample per channel)
    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels as usize
    }

    /// Playing time of the clip
    pub fn duration(&self) -> Duration {
        let frames = self.frames() as u64;
        Duration::from_micros(frames * 1_000_000 / self.sample_rate as u64)
    }

    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unusable_format() {
        assert!(DecodedClip::new(0, 44_100, 2, vec![0.0; 10]).is_none());
        assert!(DecodedClip::new(2, 0, 2, vec![0.0; 10]).is_none());
        assert!(DecodedClip::new(2, 44_100, 0, vec![0.0; 10]).is_none());
        assert!(DecodedClip::new(2, 44_100, 5, vec![0.0; 10]).is_none());
    }

    #[test]
    fn duration_of_stereo_clip() {
        // one second of stereo at 44.1kHz
        let clip = DecodedClip::new(2, 44_100, 2, vec![0.0; 88_200]).unwrap();
        assert_eq!(clip.frames(), 44_100);
        assert_eq!(clip.duration(), Duration::from_secs(1));
    }

    #[test]
    fn duration_of_short_mono_clip() {
        let clip = DecodedClip::new(1, 8_000, 3, vec![0.0; 2_000]).unwrap();
        assert_eq!(clip.sample_width(), 3);
        assert_eq!(clip.duration(), Duration::from_millis(250));
    }

    #[test]
    fn empty_clip() {
        let clip = DecodedClip::new(1, 48_000, 2, Vec::new()).unwrap();
        assert!(clip.is_empty());
        assert_eq!(clip.duration(), Duration::ZERO);
    }
}
