//! Generate command implementation
//!
//! Runs the MIDI name passes, then materializes one aligned clip and one
//! sound-event descriptor for every instrument × octave × duration triple.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use colored::Colorize;
use notesmith_audio::{align_file, AlignParams};
use notesmith_pack::{master_path, NoteDuration, PackLayout, SoundEvent, OCTAVES};

use crate::commands::midi;

/// Run the generate command.
///
/// # Arguments
/// * `instruments_root` - Directory of instrument folders holding `c<octave>.ogg` masters
/// * `pack_root` - Output pack root (`Common/` and `Server/` are created under it)
/// * `midi_root` - MIDI tree for the name passes (default: `<pack>/Server/Melodies`)
/// * `namespace` - Event-name and audio-category namespace
/// * `verbose` - Per-clip lines instead of progress dots
///
/// # Returns
/// Exit code 0 on success; any missing master or filesystem failure aborts
/// the run with an error.
pub fn run(
    instruments_root: &str,
    pack_root: &str,
    midi_root: Option<&str>,
    namespace: &str,
    verbose: bool,
) -> Result<ExitCode> {
    let start = Instant::now();

    let instruments_path = Path::new(instruments_root);
    if !instruments_path.exists() {
        anyhow::bail!("instruments directory does not exist: {}", instruments_root);
    }

    let layout = PackLayout::new(pack_root, namespace);
    let midi_root = midi_root
        .map(PathBuf::from)
        .unwrap_or_else(|| layout.default_midi_root());

    println!("{}", "======================================".cyan());
    println!("{}", "  Notesmith Pack Generator".cyan());
    println!("{}", "======================================".cyan());
    println!();
    println!("{} {}", "Instruments:".blue().bold(), instruments_root);
    println!("{} {}", "Pack root:".blue().bold(), pack_root);
    println!("{} {}", "MIDI tree:".blue().bold(), midi_root.display());
    println!("{} {}", "Namespace:".blue().bold(), namespace);
    println!();

    // Name passes first; backfill must see the original filenames.
    let sidecars = midi::backfill_sidecars(&midi_root)?;
    let renames = midi::normalize_filenames(&midi_root)?;

    let instruments = list_instruments(instruments_path)?;
    println!(
        "{} Found {} instrument(s)",
        "INFO".blue().bold(),
        instruments.len()
    );

    let mut clips = 0usize;
    for instrument in &instruments {
        for octave in OCTAVES {
            for duration in NoteDuration::all() {
                generate_note(&layout, instruments_path, instrument, octave, duration)?;
                clips += 1;
                if verbose {
                    println!(
                        "  {} {}",
                        "WROTE".green(),
                        layout
                            .clip_path(instrument, octave, duration.millis())
                            .display()
                    );
                } else {
                    print!("{}", ".".green());
                }
            }
        }
    }
    if !verbose && clips > 0 {
        println!(); // Newline after progress dots
    }

    println!();
    println!("{}", "======================================".cyan());
    println!("{}", "  Generation Summary".cyan());
    println!("{}", "======================================".cyan());
    println!();
    println!("{} {}", "Clips written:".green().bold(), clips);
    println!("{} {}", "Descriptors written:".green().bold(), clips);
    println!("{} {}", "Sidecars created:".blue().bold(), sidecars);
    println!("{} {}", "Files renamed:".blue().bold(), renames);
    println!(
        "{} {:.2}s",
        "Total runtime:".blue().bold(),
        start.elapsed().as_secs_f64()
    );

    Ok(ExitCode::SUCCESS)
}

/// Instrument directory names under the masters root, sorted for
/// deterministic runs.
fn list_instruments(instruments_root: &Path) -> Result<Vec<String>> {
    let mut instruments = Vec::new();
    let entries = fs::read_dir(instruments_root).with_context(|| {
        format!(
            "failed to read instruments directory: {}",
            instruments_root.display()
        )
    })?;
    for entry in entries {
        let entry = entry.with_context(|| {
            format!(
                "failed to read instruments directory: {}",
                instruments_root.display()
            )
        })?;
        if entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
            instruments.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    instruments.sort();
    Ok(instruments)
}

/// Materializes one (instrument, octave, duration) triple: the aligned clip
/// and its sound-event descriptor.
///
/// The aligner receives the fade-adjusted length as `length` and the nominal
/// note length as `fade`; the total duration, center offset, and fade-out
/// all derive from that pairing, so it must not be reordered.
pub fn generate_note(
    layout: &PackLayout,
    instruments_root: &Path,
    instrument: &str,
    octave: u8,
    duration: NoteDuration,
) -> Result<()> {
    let millis = duration.millis();
    let master = master_path(instruments_root, instrument, octave);
    let clip_path = layout.clip_path(instrument, octave, millis);

    if let Some(parent) = clip_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory: {}", parent.display()))?;
    }

    let params = AlignParams::new(duration.trimmed_length(), duration.seconds())
        .context("invalid duration table entry")?;
    align_file(&master, &clip_path, params).with_context(|| {
        format!(
            "failed to generate {} from {}",
            clip_path.display(),
            master.display()
        )
    })?;

    let event = SoundEvent::single_layer(
        layout.clip_rel_path(instrument, octave, millis),
        layout.audio_category(),
    );
    let event_path = layout.event_path(instrument, octave, millis);
    if let Some(parent) = event_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory: {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(&event).context("failed to serialize sound event")?;
    fs::write(&event_path, json)
        .with_context(|| format!("failed to write descriptor: {}", event_path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_list_instruments_sorted_dirs_only() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("piano")).unwrap();
        fs::create_dir(dir.path().join("flute")).unwrap();
        fs::write(dir.path().join("readme.txt"), b"").unwrap();

        let instruments = list_instruments(dir.path()).unwrap();
        assert_eq!(instruments, vec!["flute".to_string(), "piano".to_string()]);
    }

    #[test]
    fn test_list_instruments_missing_root_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(list_instruments(&dir.path().join("absent")).is_err());
    }

    #[test]
    fn test_generate_note_fails_on_missing_master() {
        let dir = tempfile::tempdir().unwrap();
        let instruments = dir.path().join("instruments");
        fs::create_dir_all(instruments.join("piano")).unwrap();
        let layout = PackLayout::new(dir.path().join("pack"), "Notesmith");

        let err = generate_note(
            &layout,
            &instruments,
            "piano",
            4,
            NoteDuration::closest(500),
        )
        .unwrap_err();
        assert!(err.to_string().contains("c4.ogg"));
    }
}
