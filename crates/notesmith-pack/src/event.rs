//! Sound-event descriptor and name-sidecar types.
//!
//! Descriptors are built structurally and serialized with serde rather than
//! by template substitution, so a field value can never collide with another
//! field's placeholder text.

use serde::{Deserialize, Serialize};

use crate::naming::humanize;

/// One layer of a sound event: the clip files it plays and its volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SoundLayer {
    /// Clip paths relative to the `Common/` root, forward-slashed.
    pub files: Vec<String>,
    /// Layer volume offset in the engine's own units.
    pub volume: i64,
}

/// A sound-event descriptor as consumed by the playback system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SoundEvent {
    /// Playback layers; generated events always carry exactly one.
    pub layers: Vec<SoundLayer>,
    /// Event volume offset.
    pub volume: i64,
    /// Pitch offset.
    pub pitch: i64,
    /// Distance at which the event becomes inaudible.
    pub max_distance: i64,
    /// Distance at which attenuation begins.
    pub start_attenuation_distance: i64,
    /// Mixer category the event is routed to.
    pub audio_category: String,
}

impl SoundEvent {
    /// Builds the standard single-layer instrument event for one clip,
    /// with the fixed default volume/pitch/distance values.
    pub fn single_layer(clip_rel_path: impl Into<String>, audio_category: impl Into<String>) -> Self {
        Self {
            layers: vec![SoundLayer {
                files: vec![clip_rel_path.into()],
                volume: 0,
            }],
            volume: 0,
            pitch: 0,
            max_distance: 40,
            start_attenuation_distance: 5,
            audio_category: audio_category.into(),
        }
    }
}

/// Display-name sidecar for a MIDI asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameSidecar {
    /// Human-readable name shown in place of the file name.
    #[serde(rename = "Name")]
    pub name: String,
}

impl NameSidecar {
    /// Synthesizes a sidecar from a file stem, e.g. `grand_piano` becomes
    /// `Grand Piano`.
    pub fn from_stem(stem: &str) -> Self {
        Self {
            name: humanize(stem),
        }
    }
}
