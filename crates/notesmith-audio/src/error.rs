//! Error types for the audio core.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for audio operations.
pub type AudioResult<T> = Result<T, AudioError>;

/// Errors that can occur while decoding, aligning, or encoding audio.
#[derive(Debug, Error)]
pub enum AudioError {
    /// Invalid sample rate.
    #[error("invalid sample rate: {rate}")]
    InvalidSampleRate {
        /// The invalid sample rate.
        rate: u32,
    },

    /// Invalid channel count.
    #[error("invalid channel count: {channels}")]
    InvalidChannelCount {
        /// The invalid channel count.
        channels: u16,
    },

    /// Invalid duration parameter.
    #[error("invalid duration: {duration} seconds")]
    InvalidDuration {
        /// The invalid duration.
        duration: f64,
    },

    /// Sample buffer length is not a whole number of frames.
    #[error("ragged sample buffer: {samples} samples across {channels} channels")]
    RaggedBuffer {
        /// Total interleaved sample count.
        samples: usize,
        /// Channel count.
        channels: u16,
    },

    /// Failed to read an input file.
    #[error("failed to read {path}: {source}")]
    Read {
        /// The input path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to write an output file.
    #[error("failed to write {path}: {source}")]
    Write {
        /// The output path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Container or codec level decode failure.
    #[error("decode error: {0}")]
    Decode(#[from] symphonia::core::errors::Error),

    /// Vorbis encode failure.
    #[error("encode error: {0}")]
    Encode(#[from] vorbis_rs::VorbisError),

    /// The input contained no decodable audio track.
    #[error("no audio track found in {path}")]
    NoAudioTrack {
        /// The input path.
        path: PathBuf,
    },
}

impl AudioError {
    /// Creates a read error for `path`.
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Creates a write error for `path`.
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_offending_value() {
        let err = AudioError::InvalidSampleRate { rate: 0 };
        assert_eq!(err.to_string(), "invalid sample rate: 0");

        let err = AudioError::RaggedBuffer {
            samples: 7,
            channels: 2,
        };
        assert!(err.to_string().contains("7 samples"));
        assert!(err.to_string().contains("2 channels"));
    }

    #[test]
    fn test_read_helper_carries_path() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = AudioError::read("/in/c4.ogg", io);
        assert!(err.to_string().contains("/in/c4.ogg"));
        assert!(err.to_string().contains("gone"));
    }
}
