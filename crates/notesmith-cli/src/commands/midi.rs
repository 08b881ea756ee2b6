//! MIDI-tree name passes: sidecar backfill and filename normalization.
//!
//! Both passes walk a pre-collected, sorted snapshot of the tree rather than
//! a live directory iterator, so the rename pass can never invalidate the
//! listing it is walking. The backfill pass must run before the rename pass:
//! it keys sidecar existence off the original filenames.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use notesmith_pack::naming::normalize_file_name;
use notesmith_pack::NameSidecar;
use walkdir::WalkDir;

/// Run the midi-names command: both passes, in order, with a summary line.
pub fn run(midi_root: &str) -> Result<ExitCode> {
    let root = Path::new(midi_root);

    let sidecars = backfill_sidecars(root)?;
    let renames = normalize_filenames(root)?;

    println!(
        "{} {} sidecar(s) created, {} file(s) renamed",
        "DONE".green().bold(),
        sidecars,
        renames
    );
    Ok(ExitCode::SUCCESS)
}

/// Collects every file under `root`, sorted. A missing root yields an empty
/// listing, making both passes no-ops.
fn snapshot(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        return Ok(Vec::new());
    }
    let mut files: Vec<PathBuf> = Vec::new();
    for entry in WalkDir::new(root).min_depth(1) {
        let entry =
            entry.with_context(|| format!("failed to walk MIDI tree: {}", root.display()))?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

/// Whether a path has a MIDI extension (`mid` or `midi`, any case).
fn is_midi(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("mid") || ext.eq_ignore_ascii_case("midi"))
}

/// Pass 1: create a `<stem>.json` name sidecar next to every MIDI file that
/// does not already have one. Existing sidecars are never touched, which is
/// the whole idempotence story. Returns the number of sidecars created.
pub fn backfill_sidecars(root: &Path) -> Result<usize> {
    let mut created = 0;
    for path in snapshot(root)? {
        if !is_midi(&path) {
            continue;
        }
        let sidecar = path.with_extension("json");
        if sidecar.exists() {
            continue;
        }
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        let payload = NameSidecar::from_stem(stem);
        let json = serde_json::to_string_pretty(&payload)
            .context("failed to serialize name sidecar")?;
        fs::write(&sidecar, json)
            .with_context(|| format!("failed to write sidecar: {}", sidecar.display()))?;
        created += 1;
    }
    Ok(created)
}

/// Pass 2: rename every file whose name differs from its title-cased form
/// (underscore-separated words, extension preserved). Returns the number of
/// renames performed; a second run performs zero.
pub fn normalize_filenames(root: &Path) -> Result<usize> {
    let mut renamed = 0;
    for path in snapshot(root)? {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let corrected = normalize_file_name(name);
        if corrected == name {
            continue;
        }
        let target = path.with_file_name(&corrected);
        fs::rename(&path, &target).with_context(|| {
            format!(
                "failed to rename {} -> {}",
                path.display(),
                target.display()
            )
        })?;
        renamed += 1;
    }
    Ok(renamed)
}
