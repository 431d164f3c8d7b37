//! Splicing a corrected segment back into the original line sequence.

use tracing::warn;

/// Replace the 1-based inclusive `[start, end]` slice of `original` with
/// `fixed_segment`, leaving every other line byte-identical.
///
/// The caller validates bounds; a replacement whose line count differs from
/// the requested span is merged anyway with a non-fatal warning, shifting
/// subsequent line numbers in the result.
pub fn splice_range(original: &str, fixed_segment: &str, start: usize, end: usize) -> String {
    let lines: Vec<&str> = original.split_inclusive('\n').collect();

    let mut replacement: Vec<String> = fixed_segment
        .split_inclusive('\n')
        .map(str::to_string)
        .collect();

    let expected = end - start + 1;
    if replacement.len() != expected {
        warn!(
            got = replacement.len(),
            expected, "corrected segment line count differs from the original segment"
        );
    }

    // Keep the seam intact: if more original lines follow the segment, the
    // last replacement line needs a terminator.
    if end < lines.len()
        && let Some(last) = replacement.last_mut()
        && !last.ends_with('\n')
    {
        last.push('\n');
    }

    let mut merged = String::with_capacity(original.len() + fixed_segment.len());
    for line in &lines[..start - 1] {
        merged.push_str(line);
    }
    for line in &replacement {
        merged.push_str(line);
    }
    for line in &lines[end..] {
        merged.push_str(line);
    }
    merged
}
