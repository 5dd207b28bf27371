//! Response interpreter for the generation service.
//!
//! The upstream call is instructed to emit only a JSON project payload,
//! but model output is not guaranteed well-formed. Parsing is layered:
//! strict decode of the whole response, then strict decode of the first
//! balanced `{...}` region (models like to wrap the payload in prose),
//! then the placeholder project. No input can make this module fail.

use weaver_types::project::ProjectSnapshot;

/// Parse raw generation output into a usable snapshot.
///
/// Total: any input yields a shape-valid snapshot, substituting the
/// placeholder project when the output is unusable.
pub fn parse_project(raw: &str) -> ProjectSnapshot {
    try_parse_project(raw).unwrap_or_else(ProjectSnapshot::placeholder)
}

/// Like [`parse_project`] but reports failure instead of substituting the
/// placeholder, so callers can tell a fallback from a generated project.
pub fn try_parse_project(raw: &str) -> Option<ProjectSnapshot> {
    if let Some(snapshot) = decode_snapshot(raw) {
        return Some(snapshot);
    }
    extract_braced(raw).and_then(decode_snapshot)
}

/// Strict decode plus shape checks: a non-empty mapping of valid relative
/// paths to `{code}` records. An empty mapping is rejected; it could
/// neither host nor mount anything.
fn decode_snapshot(text: &str) -> Option<ProjectSnapshot> {
    let snapshot: ProjectSnapshot = serde_json::from_str(text).ok()?;
    if snapshot.is_empty() || !snapshot.paths_are_valid() {
        return None;
    }
    Some(snapshot)
}

/// Find the first `{` and its matching close brace, skipping over string
/// literals and escapes, and return the enclosed slice.
fn extract_braced(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }

    None
}
