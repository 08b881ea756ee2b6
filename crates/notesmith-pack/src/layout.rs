//! Output tree layout and asset naming.
//!
//! Clip paths, sound-event paths, and event names are all derived from the
//! same (instrument, octave, millis) triple, so the descriptor written to
//! disk can never reference a clip path it was not generated alongside.

use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

/// Octaves for which every instrument provides a master recording.
pub const OCTAVES: RangeInclusive<u8> = 1..=8;

/// Default event-name and audio-category namespace.
pub const DEFAULT_NAMESPACE: &str = "Notesmith";

/// The output pack root plus the namespace all event names are minted under.
#[derive(Debug, Clone)]
pub struct PackLayout {
    root: PathBuf,
    namespace: String,
}

impl PackLayout {
    /// Creates a layout rooted at `root` with the given namespace.
    pub fn new(root: impl Into<PathBuf>, namespace: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            namespace: namespace.into(),
        }
    }

    /// The pack root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The namespace used for event names and the audio category.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Audio category string shared by every generated event.
    pub fn audio_category(&self) -> String {
        format!("{}_Instrument", self.namespace)
    }

    /// Clip path relative to the `Common/` root, as referenced from event
    /// descriptors. Always forward-slashed regardless of platform.
    pub fn clip_rel_path(&self, instrument: &str, octave: u8, millis: u32) -> String {
        format!("Sounds/{instrument}/c{octave}_{millis}ms.ogg")
    }

    /// Absolute on-disk path of a generated clip.
    pub fn clip_path(&self, instrument: &str, octave: u8, millis: u32) -> PathBuf {
        self.root
            .join("Common")
            .join("Sounds")
            .join(instrument)
            .join(format!("c{octave}_{millis}ms.ogg"))
    }

    /// The event name playback systems look the descriptor up by.
    pub fn event_name(&self, instrument: &str, octave: u8, millis: u32) -> String {
        format!(
            "SFX_{}_{instrument}_C{octave}_{millis}ms",
            self.namespace
        )
    }

    /// Absolute on-disk path of a sound-event descriptor.
    pub fn event_path(&self, instrument: &str, octave: u8, millis: u32) -> PathBuf {
        self.root
            .join("Server")
            .join("Audio")
            .join("SoundEvents")
            .join(instrument)
            .join(format!("{}.json", self.event_name(instrument, octave, millis)))
    }

    /// Default location of the MIDI asset tree inside the pack.
    pub fn default_midi_root(&self) -> PathBuf {
        self.root.join("Server").join("Melodies")
    }
}

/// Master recording path for one (instrument, octave) pair.
pub fn master_path(instruments_root: &Path, instrument: &str, octave: u8) -> PathBuf {
    instruments_root
        .join(instrument)
        .join(format!("c{octave}.ogg"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn layout() -> PackLayout {
        PackLayout::new("/pack", DEFAULT_NAMESPACE)
    }

    #[test]
    fn octave_range_covers_one_through_eight() {
        let octaves: Vec<u8> = OCTAVES.collect();
        assert_eq!(octaves, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn clip_paths_agree_with_relative_references() {
        let layout = layout();
        assert_eq!(
            layout.clip_rel_path("piano", 4, 500),
            "Sounds/piano/c4_500ms.ogg"
        );
        assert_eq!(
            layout.clip_path("piano", 4, 500),
            Path::new("/pack/Common/Sounds/piano/c4_500ms.ogg")
        );
    }

    #[test]
    fn event_path_embeds_event_name() {
        let layout = layout();
        let name = layout.event_name("harp", 2, 1250);
        assert_eq!(name, "SFX_Notesmith_harp_C2_1250ms");
        assert_eq!(
            layout.event_path("harp", 2, 1250),
            Path::new("/pack/Server/Audio/SoundEvents/harp/SFX_Notesmith_harp_C2_1250ms.json")
        );
    }

    #[test]
    fn audio_category_derives_from_namespace() {
        assert_eq!(layout().audio_category(), "Notesmith_Instrument");
        assert_eq!(
            PackLayout::new("/p", "Custom").audio_category(),
            "Custom_Instrument"
        );
    }

    #[test]
    fn master_path_uses_c_octave_convention() {
        assert_eq!(
            master_path(Path::new("/instruments"), "flute", 7),
            Path::new("/instruments/flute/c7.ogg")
        );
    }

    #[test]
    fn default_midi_root_lives_under_server() {
        assert_eq!(
            layout().default_midi_root(),
            Path::new("/pack/Server/Melodies")
        );
    }
}
