//! Notesmith pack model
//!
//! Shared types describing a generated sound pack:
//!
//! - [`duration`] - the fixed note-length table and its derived fade and
//!   clip-duration arithmetic
//! - [`layout`] - input/output path construction and event naming
//! - [`event`] - sound-event descriptor and name-sidecar serde types
//! - [`naming`] - humanize and title-case filename helpers
//!
//! Everything here is pure data and string/path manipulation; audio
//! processing lives in `notesmith-audio` and the batch driver in
//! `notesmith-cli`.

pub mod duration;
pub mod event;
pub mod layout;
pub mod naming;

pub use duration::{NoteDuration, NOTE_LENGTHS};
pub use event::{NameSidecar, SoundEvent, SoundLayer};
pub use layout::{master_path, PackLayout, DEFAULT_NAMESPACE, OCTAVES};
pub use naming::{humanize, normalize_file_name};
