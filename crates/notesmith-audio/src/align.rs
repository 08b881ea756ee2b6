//! Envelope-based note alignment and trimming.
//!
//! One master recording becomes one duration-specific clip: the detected
//! attack is pulled toward a canonical offset (shifting left only, so no
//! leading silence is ever introduced), the buffer is padded or truncated to
//! an exact millisecond duration, and fade ramps smooth both boundaries.

use std::path::Path;

use crate::clip::AudioClip;
use crate::envelope::detect_attack_seconds;
use crate::error::{AudioError, AudioResult};
use crate::ogg;

/// Timing parameters for one alignment.
///
/// `length` is the trimmed-note duration in seconds, already fade-adjusted by
/// the caller. `fade` is the fade-out duration in seconds; by the driver's
/// calling convention it carries the nominal (pre-adjustment) note length, so
/// it also participates in the total-duration and center-offset arithmetic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignParams {
    /// Trimmed note duration in seconds.
    pub length: f64,
    /// Fade-out duration in seconds.
    pub fade: f64,
}

impl AlignParams {
    /// Creates validated parameters. Negative or non-finite values are
    /// rejected; zero is allowed and degrades the fades to no-ops.
    pub fn new(length: f64, fade: f64) -> AudioResult<Self> {
        for value in [length, fade] {
            if !value.is_finite() || value < 0.0 {
                return Err(AudioError::InvalidDuration { duration: value });
            }
        }
        Ok(Self { length, fade })
    }

    /// Canonical attack offset: one quarter of the length+fade sum.
    pub fn center_seconds(&self) -> f64 {
        (self.length + self.fade) / 4.0
    }

    /// Exact output duration in milliseconds.
    pub fn total_millis(&self) -> u64 {
        ((self.length + self.fade) * 1000.0).round() as u64
    }

    /// Fade-in ramp length in milliseconds, applied only when the clip was
    /// shifted.
    pub fn fade_in_millis(&self) -> u64 {
        ((self.length / 4.0) * 1000.0).round() as u64
    }

    /// Fade-out ramp length in milliseconds.
    pub fn fade_out_millis(&self) -> u64 {
        (self.fade * 1000.0).round() as u64
    }
}

/// What one alignment did, for callers and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignResult {
    /// Detected attack time in the source recording, seconds.
    pub peak_seconds: f64,
    /// Applied left shift in seconds (0.0 when the attack was already at or
    /// before the canonical offset).
    pub shift_seconds: f64,
    /// Whether a fade-in ramp was applied.
    pub faded_in: bool,
    /// Output clip length in frames.
    pub output_frames: usize,
}

fn millis_to_frames(millis: u64, sample_rate: u32) -> usize {
    (millis as f64 * sample_rate as f64 / 1000.0).round() as usize
}

/// Aligns and trims one clip to the target duration.
///
/// Pure with respect to its inputs: the returned clip is the only product.
/// Silent or empty input is not an error; the attack resolves to time zero,
/// no shift occurs, and the output is the input padded to length.
pub fn align_and_trim(clip: AudioClip, params: AlignParams) -> (AudioClip, AlignResult) {
    let sample_rate = clip.sample_rate();

    let peak_seconds = detect_attack_seconds(&clip.mono(), sample_rate);
    let shift_seconds = (peak_seconds - params.center_seconds()).max(0.0);

    let mut out = clip;
    out.drop_leading_frames((shift_seconds * sample_rate as f64).round() as usize);

    let target_frames = millis_to_frames(params.total_millis(), sample_rate);
    out.resize_frames(target_frames);

    let faded_in = shift_seconds > 0.0;
    if faded_in {
        out.fade_in_frames(millis_to_frames(params.fade_in_millis(), sample_rate));
    }
    out.fade_out_frames(millis_to_frames(params.fade_out_millis(), sample_rate));

    let result = AlignResult {
        peak_seconds,
        shift_seconds,
        faded_in,
        output_frames: out.frames(),
    };
    (out, result)
}

/// Decodes `input`, aligns it, and encodes the result to `output`.
///
/// The one file write to `output` is the only side effect. A missing or
/// unreadable input is fatal; nothing is caught or retried here.
pub fn align_file(input: &Path, output: &Path, params: AlignParams) -> AudioResult<AlignResult> {
    let clip = ogg::decode_ogg(input)?;
    let (aligned, result) = align_and_trim(clip, params);
    ogg::encode_ogg(output, &aligned)?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const RATE: u32 = 1000;

    fn clip_from(samples: Vec<f32>) -> AudioClip {
        AudioClip::new(RATE, 1, samples).unwrap()
    }

    /// A clip whose attack sits in a 100 ms burst starting at `at_frames`.
    fn burst_clip(total_frames: usize, at_frames: usize) -> AudioClip {
        let mut samples = vec![0.0f32; total_frames];
        for s in &mut samples[at_frames..(at_frames + 100).min(total_frames)] {
            *s = 1.0;
        }
        clip_from(samples)
    }

    #[test]
    fn test_params_reject_negative_durations() {
        assert!(AlignParams::new(-0.1, 0.5).is_err());
        assert!(AlignParams::new(0.5, -0.1).is_err());
        assert!(AlignParams::new(f64::NAN, 0.5).is_err());
        assert!(AlignParams::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn test_params_arithmetic() {
        // The driver's convention for the 0.5 s table entry.
        let nominal = 0.5f64;
        let fade = nominal.sqrt() * 0.25;
        let params = AlignParams::new(nominal - fade / 2.0, nominal).unwrap();
        assert_eq!(params.total_millis(), 912);
        assert!((params.center_seconds() - (params.length + 0.5) / 4.0).abs() < 1e-12);
        assert_eq!(params.fade_out_millis(), 500);
        assert_eq!(params.fade_in_millis(), 103);
    }

    #[test]
    fn test_output_duration_is_exact_regardless_of_source_length() {
        let params = AlignParams::new(0.4116, 0.5).unwrap();
        let expected = millis_to_frames(params.total_millis(), RATE);

        for source_frames in [100usize, 912, 3000] {
            let (out, result) = align_and_trim(burst_clip(source_frames, 0), params);
            assert_eq!(out.frames(), expected);
            assert_eq!(result.output_frames, expected);
        }
    }

    #[test]
    fn test_early_peak_leaves_leading_audio_untouched() {
        // Attack at 50 ms, center at (1 + 1) / 4 = 500 ms: no shift.
        let params = AlignParams::new(1.0, 1.0).unwrap();
        let source = burst_clip(3000, 50);
        let leading: Vec<f32> = source.samples()[..400].to_vec();

        let (out, result) = align_and_trim(source, params);
        assert_eq!(result.shift_seconds, 0.0);
        assert!(!result.faded_in);
        assert!(result.peak_seconds <= params.center_seconds());
        assert_eq!(&out.samples()[..400], leading.as_slice());
    }

    #[test]
    fn test_late_peak_shifts_by_exactly_peak_minus_center() {
        // Attack around 800 ms, tight center forces a shift.
        let params = AlignParams::new(0.4, 0.4).unwrap();
        let source = burst_clip(3000, 800);

        let (out, result) = align_and_trim(source.clone(), params);
        assert!(result.peak_seconds > params.center_seconds());
        assert!(
            (result.shift_seconds - (result.peak_seconds - params.center_seconds())).abs() < 1e-12
        );
        assert!(result.faded_in);

        // The fade-in ramp starts at exact silence.
        assert_eq!(out.samples()[0], 0.0);

        // Probe a frame past the fade-in ramp and before the fade-out: it
        // must hold the source audio from `shift` seconds later, unscaled.
        let shift_frames = (result.shift_seconds * RATE as f64).round() as usize;
        let ramp = millis_to_frames(params.fade_in_millis(), RATE);
        let probe = ramp + 100;
        assert_eq!(out.samples()[probe], source.samples()[shift_frames + probe]);
        assert_ne!(out.samples()[probe], 0.0);
    }

    #[test]
    fn test_silent_input_is_padded_not_shifted() {
        let params = AlignParams::new(0.4116, 0.5).unwrap();
        let (out, result) = align_and_trim(clip_from(vec![0.0; 100]), params);
        assert_eq!(result.peak_seconds, 0.0);
        assert_eq!(result.shift_seconds, 0.0);
        assert!(!result.faded_in);
        assert_eq!(out.frames(), millis_to_frames(912, RATE));
        assert!(out.samples().iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_short_source_is_padded_with_trailing_silence() {
        // 100 ms of audio against a ~912 ms target: everything past the
        // source is digital silence (the fade-out then shapes the tail,
        // which is already zero there).
        let params = AlignParams::new(0.4116, 0.5).unwrap();
        let (out, _) = align_and_trim(burst_clip(100, 0), params);
        assert_eq!(out.frames(), 912);
        assert!(out.samples()[412..].iter().all(|&s| s == 0.0));
        assert!(out.samples()[..100].iter().any(|&s| s != 0.0));
    }

    #[test]
    fn test_fade_out_tail_is_monotone_to_silence() {
        let params = AlignParams::new(0.25, 0.25).unwrap();
        let source = clip_from(vec![1.0; 2000]);
        let (out, _) = align_and_trim(source, params);

        let ramp = millis_to_frames(params.fade_out_millis(), RATE);
        let tail = &out.samples()[out.frames() - ramp..];
        assert_eq!(*tail.last().unwrap(), 0.0);
        for pair in tail.windows(2) {
            assert!(pair[1] <= pair[0]);
        }
    }

    #[test]
    fn test_zero_fade_degrades_to_hard_cut() {
        let params = AlignParams::new(0.5, 0.0).unwrap();
        let source = clip_from(vec![1.0; 2000]);
        let (out, result) = align_and_trim(source, params);
        assert_eq!(out.frames(), 500);
        // No fade-out: the tail stays at full amplitude.
        assert_eq!(*out.samples().last().unwrap(), 1.0);
        assert_eq!(result.shift_seconds, 0.0);
    }

    #[test]
    fn test_stereo_edits_apply_to_both_channels() {
        let params = AlignParams::new(0.1, 0.1).unwrap();
        let mut samples = vec![0.0f32; 1200];
        // Identical burst on both channels at frame 30.
        for frame in 30..130 {
            samples[frame * 2] = 0.5;
            samples[frame * 2 + 1] = 0.5;
        }
        let clip = AudioClip::new(RATE, 2, samples).unwrap();
        let (out, _) = align_and_trim(clip, params);
        assert_eq!(out.channels(), 2);
        assert_eq!(out.frames(), 200);
        for frame in out.samples().chunks_exact(2) {
            assert_eq!(frame[0], frame[1]);
        }
    }
}
