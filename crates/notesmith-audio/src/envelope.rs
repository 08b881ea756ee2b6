//! Amplitude-envelope estimation and attack detection.
//!
//! The aligner needs the moment a note's attack lands, not the loudest
//! individual sample. The envelope here is a 30 ms moving average of the
//! absolute amplitude (suppressing single-sample transients), restricted to
//! the first second of audio and multiplied by a linear taper from 1.0 down
//! to 0.0 so that later loud moments such as sustain swells are discounted.

/// Moving-average blur window length in seconds.
const BLUR_WINDOW_SECONDS: f64 = 0.03;

/// How much leading audio the peak search may consider, in seconds.
const SEARCH_WINDOW_SECONDS: f64 = 1.0;

/// Blur window length in samples for a given rate, never below one sample.
pub fn blur_window(sample_rate: u32) -> usize {
    ((BLUR_WINDOW_SECONDS * sample_rate as f64) as usize).max(1)
}

/// Centered moving average of the absolute amplitude, zero-padded at the
/// edges. Output length equals input length.
pub fn smooth_abs(samples: &[f32], window: usize) -> Vec<f64> {
    let window = window.max(1);
    let n = samples.len();
    if n == 0 {
        return Vec::new();
    }

    // Prefix sums of |x| so each window is O(1).
    let mut prefix = Vec::with_capacity(n + 1);
    prefix.push(0.0f64);
    for &s in samples {
        prefix.push(prefix.last().copied().unwrap_or(0.0) + f64::from(s.abs()));
    }

    // Window for index i spans [i - (window - 1 - lead), i + lead].
    let lead = (window - 1) / 2;
    (0..n)
        .map(|i| {
            let hi = (i + lead + 1).min(n);
            let lo = (i + lead + 1).saturating_sub(window).min(n);
            (prefix[hi] - prefix[lo]) / window as f64
        })
        .collect()
}

/// Detects the attack time of a mono amplitude sequence, in seconds.
///
/// Returns 0.0 for empty or silent input, and never more than
/// [`SEARCH_WINDOW_SECONDS`]. The first index attaining the maximum wins, so
/// a flat (all-zero) envelope resolves to the very start of the clip.
///
/// # Panics
/// Debug-asserts that `sample_rate` is non-zero; callers validate formats
/// before analysis.
pub fn detect_attack_seconds(mono: &[f32], sample_rate: u32) -> f64 {
    debug_assert!(sample_rate > 0);
    if mono.is_empty() {
        return 0.0;
    }

    let blurred = smooth_abs(mono, blur_window(sample_rate));

    let search_len = ((SEARCH_WINDOW_SECONDS * sample_rate as f64) as usize).min(blurred.len());
    let taper_denom = search_len.saturating_sub(1).max(1) as f64;

    let mut best_idx = 0usize;
    let mut best_value = f64::MIN;
    for (i, &value) in blurred.iter().take(search_len).enumerate() {
        let taper = if search_len == 1 {
            1.0
        } else {
            1.0 - i as f64 / taper_denom
        };
        let tapered = value * taper;
        if tapered > best_value {
            best_value = tapered;
            best_idx = i;
        }
    }

    best_idx as f64 / sample_rate as f64
}
