//! Notesmith CLI library.
//!
//! Command implementations for the `notesmith` binary: the full generation
//! pipeline and the MIDI-tree name passes.

pub mod commands;
