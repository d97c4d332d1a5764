//! Stored filename derivation.

const MAX_STEM_LENGTH: usize = 200;
const FALLBACK_STEM: &str = "audio";

/// Sanitize a client-supplied filename so it is safe as a flat storage key.
///
/// Drops any directory components (`/` or `\`), replaces every character outside
/// ASCII `[A-Za-z0-9._-]` with `_`, collapses runs of `_` and of `.`, and trims
/// leading and trailing `.`/`_`. The result never contains `..`. The extension is kept. An empty stem becomes `audio`.
pub fn sanitize_filename(filename: &str) -> String {
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);

    let (stem, ext) = split_extension(base);

    let mut stem = clean(stem, |c| c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_');
    if stem.len() > MAX_STEM_LENGTH {
        stem.truncate(MAX_STEM_LENGTH);
        stem = stem.trim_end_matches(['.', '_']).to_string();
    }
    if stem.is_empty() {
        stem = FALLBACK_STEM.to_string();
    }

    let ext = clean(ext.trim_start_matches('.'), |c| c.is_ascii_alphanumeric());
    if ext.is_empty() {
        stem
    } else {
        format!("{}.{}", stem, ext)
    }
}

/// Split `name` into stem and extension (with its leading dot). A leading dot does
/// not start an extension, so `.mp3` has stem `.mp3` and no extension.
pub fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if idx > 0 => (&name[..idx], &name[idx..]),
        _ => (name, ""),
    }
}

/// Name tried on the `attempt`-th save of `sanitized` at `unix_secs`.
///
/// Attempt 0 is `{stem}_{secs}{ext}`; later attempts add a counter after the timestamp.
pub fn stored_name(sanitized: &str, unix_secs: i64, attempt: u32) -> String {
    let (stem, ext) = split_extension(sanitized);
    if attempt == 0 {
        format!("{}_{}{}", stem, unix_secs, ext)
    } else {
        format!("{}_{}_{}{}", stem, unix_secs, attempt, ext)
    }
}

fn clean(input: &str, keep: impl Fn(char) -> bool) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        let c = if keep(c) { c } else { '_' };
        if (c == '_' || c == '.') && out.ends_with(c) {
            continue;
        }
        out.push(c);
    }
    out.trim_matches(['.', '_']).to_string()
}
