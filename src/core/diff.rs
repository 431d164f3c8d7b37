//! Unified diff rendering between the original and candidate text.

use owo_colors::OwoColorize;
use similar::TextDiff;

/// Line-based unified diff with `original`/`fixed` headers and 3 context
/// lines. Returns `None` when the two texts are identical, so callers can
/// skip the confirmation prompt entirely.
pub fn unified(original: &str, candidate: &str) -> Option<String> {
    if original == candidate {
        return None;
    }

    let diff = TextDiff::from_lines(original, candidate);
    let rendered = diff
        .unified_diff()
        .context_radius(3)
        .header("original", "fixed")
        .to_string();

    Some(rendered)
}

/// Print the diff for review, coloring additions/removals unless disabled.
pub fn render(diff: &str, no_color: bool) {
    for line in diff.lines() {
        if no_color {
            println!("{line}");
        } else if line.starts_with("+++") || line.starts_with("---") {
            println!("{}", line.bold());
        } else if line.starts_with("@@") {
            println!("{}", line.cyan());
        } else if line.starts_with('+') {
            println!("{}", line.green());
        } else if line.starts_with('-') {
            println!("{}", line.red());
        } else {
            println!("{line}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_texts_yield_no_diff() {
        assert!(unified("a\nb\n", "a\nb\n").is_none());
    }

    #[test]
    fn changed_line_shows_in_hunk() {
        let diff = unified("a\nb\nc\n", "a\nB\nc\n").unwrap();
        assert!(diff.contains("--- original"));
        assert!(diff.contains("+++ fixed"));
        assert!(diff.contains("-b"));
        assert!(diff.contains("+B"));
    }

    #[test]
    fn hunk_header_carries_line_numbers() {
        let diff = unified("a\nb\nc\nd\ne\nf\ng\nh\ni\nj\n", "a\nb\nc\nd\ne\nf\ng\nh\ni\nJ\n")
            .unwrap();
        assert!(diff.contains("@@"));
    }
}
