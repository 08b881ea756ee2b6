//! Interleaved PCM clip buffer and frame-level edit operations.

use crate::error::{AudioError, AudioResult};

/// A decoded audio clip: interleaved f32 samples plus format parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioClip {
    sample_rate: u32,
    channels: u16,
    samples: Vec<f32>,
}

impl AudioClip {
    /// Creates a clip from interleaved samples.
    ///
    /// Fails on a zero sample rate, zero channels, or a sample count that is
    /// not a whole number of frames.
    pub fn new(sample_rate: u32, channels: u16, samples: Vec<f32>) -> AudioResult<Self> {
        if sample_rate == 0 {
            return Err(AudioError::InvalidSampleRate { rate: sample_rate });
        }
        if channels == 0 {
            return Err(AudioError::InvalidChannelCount { channels });
        }
        if samples.len() % channels as usize != 0 {
            return Err(AudioError::RaggedBuffer {
                samples: samples.len(),
                channels,
            });
        }
        Ok(Self {
            sample_rate,
            channels,
            samples,
        })
    }

    /// Creates a silent clip of `frames` frames.
    pub fn silence(sample_rate: u32, channels: u16, frames: usize) -> AudioResult<Self> {
        Self::new(sample_rate, channels, vec![0.0; frames * channels as usize])
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of interleaved channels.
    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// The interleaved sample buffer.
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Number of frames (samples per channel).
    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels as usize
    }

    /// Duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.frames() as f64 / self.sample_rate as f64
    }

    /// Per-frame channel average, used for channel-count independent
    /// envelope analysis.
    pub fn mono(&self) -> Vec<f32> {
        if self.channels == 1 {
            return self.samples.clone();
        }
        let channels = self.channels as usize;
        self.samples
            .chunks_exact(channels)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32)
            .collect()
    }

    /// Removes the first `frames` frames. Removing more frames than the clip
    /// holds empties it.
    pub fn drop_leading_frames(&mut self, frames: usize) {
        let samples = (frames * self.channels as usize).min(self.samples.len());
        self.samples.drain(..samples);
    }

    /// Pads with trailing silence or truncates so the clip is exactly
    /// `frames` frames long.
    pub fn resize_frames(&mut self, frames: usize) {
        self.samples.resize(frames * self.channels as usize, 0.0);
    }

    /// Applies a linear fade-in over the first `frames` frames. Gain starts
    /// at exactly zero and reaches unity at the end of the ramp. A zero
    /// length is a no-op; the ramp is clamped to the clip length.
    pub fn fade_in_frames(&mut self, frames: usize) {
        let ramp = frames.min(self.frames());
        if ramp == 0 {
            return;
        }
        let channels = self.channels as usize;
        for (i, frame) in self.samples.chunks_exact_mut(channels).take(ramp).enumerate() {
            let gain = i as f32 / ramp as f32;
            for sample in frame {
                *sample *= gain;
            }
        }
    }

    /// Applies a linear fade-out over the last `frames` frames. Gain falls
    /// monotonically and the final frame is exactly silent. A zero length is
    /// a no-op; the ramp is clamped to the clip length.
    pub fn fade_out_frames(&mut self, frames: usize) {
        let ramp = frames.min(self.frames());
        if ramp == 0 {
            return;
        }
        let channels = self.channels as usize;
        let start = self.frames() - ramp;
        let denom = (ramp - 1).max(1) as f32;
        for (i, frame) in self
            .samples
            .chunks_exact_mut(channels)
            .skip(start)
            .enumerate()
        {
            let gain = if ramp == 1 {
                0.0
            } else {
                (ramp - 1 - i) as f32 / denom
            };
            for sample in frame {
                *sample *= gain;
            }
        }
    }
}
