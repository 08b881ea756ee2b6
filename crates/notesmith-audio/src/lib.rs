//! Notesmith audio core
//!
//! Turns one master note recording into one duration-exact clip:
//!
//! - [`envelope`] - smoothed-amplitude attack detection (30 ms blur, first
//!   second only, early-biased taper)
//! - [`align`] - the align-and-trim pipeline: left-only shift toward a
//!   canonical attack offset, pad/truncate to an exact millisecond duration,
//!   conditional fade-in, unconditional fade-out
//! - [`clip`] - the interleaved PCM buffer the pipeline edits
//! - [`ogg`] - OGG Vorbis decode (symphonia) and encode (vorbis_rs)
//!
//! [`align::align_and_trim`] is pure; [`align::align_file`] wraps it in
//! decode and encode and is the entry point the batch driver calls.

pub mod align;
pub mod clip;
pub mod envelope;
pub mod error;
pub mod ogg;

pub use align::{align_and_trim, align_file, AlignParams, AlignResult};
pub use clip::AudioClip;
pub use error::{AudioError, AudioResult};
