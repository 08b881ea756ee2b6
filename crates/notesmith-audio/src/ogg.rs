//! OGG Vorbis decode and encode.
//!
//! Decode goes through symphonia (probe, first audio track, packet loop into
//! an interleaved `SampleBuffer<f32>`); encode goes through vorbis_rs with
//! planar f32 blocks at the encoder's default bitrate management. Sample
//! rate and channel count pass through unchanged in both directions.

use std::fs::File;
use std::io::BufWriter;
use std::num::{NonZeroU32, NonZeroU8};
use std::path::Path;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use vorbis_rs::VorbisEncoderBuilder;

use crate::clip::AudioClip;
use crate::error::{AudioError, AudioResult};

/// Decodes an OGG Vorbis file into an interleaved f32 clip.
///
/// Format-level failures (unreadable file, no audio track, unknown sample
/// rate) are fatal. Packet-level decode errors are logged and skipped, the
/// way a damaged page mid-stream is conventionally handled.
pub fn decode_ogg(path: &Path) -> AudioResult<AudioClip> {
    let file = File::open(path).map_err(|e| AudioError::read(path, e))?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe().format(
        &hint,
        mss,
        &FormatOptions::default(),
        &MetadataOptions::default(),
    )?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| AudioError::NoAudioTrack {
            path: path.to_path_buf(),
        })?;
    let track_id = track.id;

    let sample_rate = track
        .codec_params
        .sample_rate
        .filter(|&rate| rate > 0)
        .ok_or(AudioError::InvalidSampleRate { rate: 0 })?;
    let channels = track
        .codec_params
        .channels
        .map(|c| c.count() as u16)
        .filter(|&c| c > 0)
        .ok_or(AudioError::InvalidChannelCount { channels: 0 })?;

    let mut decoder =
        symphonia::default::get_codecs().make(&track.codec_params, &DecoderOptions::default())?;

    let mut samples: Vec<f32> = Vec::new();
    let mut sample_buf: Option<SampleBuffer<f32>> = None;

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(symphonia::core::errors::Error::IoError(e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => {
                log::warn!("error reading packet from {}: {}", path.display(), e);
                break;
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            Err(e) => {
                log::warn!("error decoding packet from {}: {}", path.display(), e);
                continue;
            }
        };

        if sample_buf.is_none() {
            let spec = *decoded.spec();
            let capacity = decoded.capacity() as u64;
            sample_buf = Some(SampleBuffer::new(capacity, spec));
        }
        if let Some(buf) = sample_buf.as_mut() {
            buf.copy_interleaved_ref(decoded);
            samples.extend_from_slice(buf.samples());
        }
    }

    AudioClip::new(sample_rate, channels, samples)
}

/// Encodes a clip as OGG Vorbis at `path`.
pub fn encode_ogg(path: &Path, clip: &AudioClip) -> AudioResult<()> {
    let sample_rate = NonZeroU32::new(clip.sample_rate())
        .ok_or(AudioError::InvalidSampleRate { rate: 0 })?;
    let channels = u8::try_from(clip.channels())
        .ok()
        .and_then(NonZeroU8::new)
        .ok_or(AudioError::InvalidChannelCount {
            channels: clip.channels(),
        })?;

    let sink = BufWriter::new(File::create(path).map_err(|e| AudioError::write(path, e))?);
    let mut encoder = VorbisEncoderBuilder::new(sample_rate, channels, sink)?.build()?;

    if clip.frames() > 0 {
        encoder.encode_audio_block(&deinterleave(clip))?;
    }
    encoder.finish()?;
    Ok(())
}

/// Splits the interleaved buffer into one plane per channel.
fn deinterleave(clip: &AudioClip) -> Vec<Vec<f32>> {
    let channels = clip.channels() as usize;
    let mut planes = vec![Vec::with_capacity(clip.frames()); channels];
    for frame in clip.samples().chunks_exact(channels) {
        for (plane, &sample) in planes.iter_mut().zip(frame) {
            plane.push(sample);
        }
    }
    planes
}
