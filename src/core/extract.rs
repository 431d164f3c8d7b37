//! Fenced code-block extraction from free-form model responses.

use std::sync::OnceLock;

use regex::Regex;

/// First fenced block, optionally tagged with a language hint.
/// Later blocks are silently discarded (known limitation).
fn fence_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // (?s) so `.` spans lines; the tag is anything up to the newline.
        Regex::new(r"(?s)```(?:[A-Za-z0-9_+\-]*)\r?\n(.*?)```").unwrap()
    })
}

/// Pull the corrected code out of a response.
///
/// Returns the first fence's interior with one layer of surrounding
/// whitespace trimmed; if the model answered with plain code and no fence,
/// the whole response is returned trimmed instead.
pub fn extract_code(response: &str) -> String {
    match fence_re().captures(response) {
        Some(caps) => caps[1].trim().to_string(),
        None => response.trim().to_string(),
    }
}
