//! Filename helpers: human-readable display names and title-case
//! normalization for the MIDI asset tree.

/// Converts a file stem into a human-readable display name.
///
/// Underscores and hyphens become spaces, runs of whitespace collapse, and
/// every word is capitalized (first letter uppercase, rest lowercase).
pub fn humanize(stem: &str) -> String {
    stem.replace(['_', '-'], " ")
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Canonical on-disk form of a file stem: title-cased words joined by
/// underscores. `my song` and `MY_SONG` both normalize to `My_Song`.
pub fn normalize_stem(stem: &str) -> String {
    title_case(&stem.replace('_', " ")).replace(' ', "_")
}

/// Canonical on-disk form of a full file name. The extension (if any) is
/// preserved verbatim; only the stem is normalized.
pub fn normalize_file_name(name: &str) -> String {
    let (stem, ext) = split_file_name(name);
    let mut normalized = normalize_stem(stem);
    normalized.push_str(ext);
    normalized
}

/// Splits `name` into (stem, extension-with-dot). Leading dots are part of
/// the stem, so `.gitignore` has no extension.
pub fn split_file_name(name: &str) -> (&str, &str) {
    let leading = name.len() - name.trim_start_matches('.').len();
    match name[leading..].rfind('.') {
        Some(idx) => name.split_at(leading + idx),
        None => (name, ""),
    }
}

/// Title casing over arbitrary text: a letter that follows a non-letter is
/// uppercased, every other letter is lowercased. Digits and punctuation act
/// as word boundaries.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alpha = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}
