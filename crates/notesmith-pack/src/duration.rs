//! The fixed note-duration table and its derived timing arithmetic.
//!
//! Every generated clip targets one entry of [`NOTE_LENGTHS`]. The fade and
//! trimmed-length values derived here feed the aligner with its (length, fade)
//! argument pair; the exact output duration in milliseconds falls out of that
//! pair and is exposed as [`NoteDuration::clip_millis`] so callers and tests
//! never re-derive it by hand.

use std::fmt;

/// Target note lengths in seconds, ordered ascending.
///
/// Playback quantizes arbitrary note lengths to this table, so the set is
/// fixed: changing it invalidates every event name already referenced by
/// consumers.
pub const NOTE_LENGTHS: [f64; 15] = [
    0.125, 0.25, 0.375, 0.5, 0.625, 0.75, 0.875, 1.0, 1.25, 1.5, 1.75, 2.0, 2.5, 3.0, 4.0,
];

/// One entry of the note-duration table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteDuration {
    length: f64,
}

impl NoteDuration {
    /// Iterates over every entry of the table, in order.
    pub fn all() -> impl Iterator<Item = NoteDuration> {
        NOTE_LENGTHS.iter().map(|&length| NoteDuration { length })
    }

    /// Returns the table entry closest to `millis` (first entry wins ties).
    pub fn closest(millis: u32) -> NoteDuration {
        let mut best = NoteDuration {
            length: NOTE_LENGTHS[0],
        };
        for candidate in Self::all() {
            if millis.abs_diff(candidate.millis()) < millis.abs_diff(best.millis()) {
                best = candidate;
            }
        }
        best
    }

    /// Nominal note length in seconds, as listed in the table.
    pub fn seconds(&self) -> f64 {
        self.length
    }

    /// Nominal note length in whole milliseconds.
    ///
    /// This is the value embedded in clip file names and event names, not the
    /// actual duration of the generated audio (see [`clip_millis`]).
    ///
    /// [`clip_millis`]: NoteDuration::clip_millis
    pub fn millis(&self) -> u32 {
        (self.length * 1000.0).round() as u32
    }

    /// Fade-out length in seconds: `sqrt(length) * 0.25`.
    pub fn fade(&self) -> f64 {
        self.length.sqrt() * 0.25
    }

    /// The fade-adjusted duration handed to the aligner as its `length`
    /// argument: `length - fade / 2`.
    pub fn trimmed_length(&self) -> f64 {
        self.length - self.fade() / 2.0
    }

    /// Exact duration of the generated clip in milliseconds.
    ///
    /// The aligner is called with (trimmed length, nominal length) and pads
    /// or truncates to the rounded sum of the two, so the output is always
    /// `round((trimmed_length + length) * 1000)` ms regardless of how long
    /// the master recording was.
    pub fn clip_millis(&self) -> u64 {
        ((self.trimmed_length() + self.length) * 1000.0).round() as u64
    }
}

impl fmt::Display for NoteDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.millis())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_ascending_and_complete() {
        assert_eq!(NOTE_LENGTHS.len(), 15);
        assert!(NOTE_LENGTHS.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(NoteDuration::all().count(), 15);
    }

    #[test]
    fn nominal_millis_are_whole() {
        let millis: Vec<u32> = NoteDuration::all().map(|d| d.millis()).collect();
        assert_eq!(
            millis,
            vec![125, 250, 375, 500, 625, 750, 875, 1000, 1250, 1500, 1750, 2000, 2500, 3000, 4000]
        );
    }

    #[test]
    fn fade_follows_square_root_rule() {
        let half = NoteDuration { length: 0.5 };
        assert!((half.fade() - 0.176_776_695).abs() < 1e-9);
        assert!((half.trimmed_length() - 0.411_611_652).abs() < 1e-9);
    }

    #[test]
    fn clip_millis_matches_known_durations() {
        let by_len = |length: f64| NoteDuration { length }.clip_millis();
        // round((l - sqrt(l)*0.25/2 + l) * 1000)
        assert_eq!(by_len(0.5), 912);
        assert_eq!(by_len(0.125), 206);
        assert_eq!(by_len(1.0), 1875);
        assert_eq!(by_len(4.0), 7750);
    }

    #[test]
    fn clip_is_always_shorter_than_twice_nominal() {
        for duration in NoteDuration::all() {
            let clip = duration.clip_millis();
            assert!(clip > u64::from(duration.millis()));
            assert!(clip < 2 * u64::from(duration.millis()));
        }
    }

    #[test]
    fn closest_snaps_to_nearest_entry() {
        assert_eq!(NoteDuration::closest(600).millis(), 625);
        assert_eq!(NoteDuration::closest(125).millis(), 125);
        assert_eq!(NoteDuration::closest(1).millis(), 125);
        assert_eq!(NoteDuration::closest(10_000).millis(), 4000);
        // Equidistant between 1000 and 1250: the earlier entry wins.
        assert_eq!(NoteDuration::closest(1125).millis(), 1000);
    }

    #[test]
    fn display_uses_nominal_millis() {
        assert_eq!(NoteDuration::closest(500).to_string(), "500ms");
    }
}
