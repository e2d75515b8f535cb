//! Normalisation: deterministic cleanup of generated proposal text.
//!
//! Even with an explicit "no placeholders" instruction, chat models tend to
//! answer in Markdown (`**Overview**`) and to leave template slots such as
//! `[Your Name]` behind. Neither belongs in a PDF that is handed to a client,
//! so both are stripped here.
//!
//! ## Rule Order
//!
//! Emphasis markers go first so a placeholder written as `**[Date]**`
//! collapses to `[Date]` and is then removed whole. Trimming runs last so
//! whitespace exposed by either removal at the edges of the text disappears.
//!
//! Removing a placeholder can leave a dangling space before punctuation
//! (`"Hello [Name], welcome"` → `"Hello , welcome"`); that is not repaired.

use once_cell::sync::Lazy;
use regex::Regex;

/// Normalise raw generated text for display and PDF layout.
///
/// Applied in order:
/// 1. Remove every run of one or more `*` characters
/// 2. Remove every `[` … `]` span (shortest match, single line), brackets included
/// 3. Trim leading and trailing whitespace
///
/// Pure and idempotent: `normalize(&normalize(x)) == normalize(x)`.
pub fn normalize(raw: &str) -> String {
    let s = strip_emphasis(raw);
    let s = strip_placeholders(&s);
    s.trim().to_string()
}

// ── Rule 1: Strip emphasis markers ───────────────────────────────────────────

static RE_EMPHASIS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*+").unwrap());

fn strip_emphasis(input: &str) -> String {
    RE_EMPHASIS.replace_all(input, "").into_owned()
}

// ── Rule 2: Strip bracketed placeholders ─────────────────────────────────────

static RE_PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[.*?\]").unwrap());

fn strip_placeholders(input: &str) -> String {
    RE_PLACEHOLDER.replace_all(input, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_example() {
        assert_eq!(normalize("**Hello** [Name], welcome!"), "Hello , welcome!");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \n\t "), "");
    }

    #[test]
    fn test_strip_emphasis_runs() {
        assert_eq!(strip_emphasis("***bold italic*** and *it* and **b**"), "bold italic and it and b");
        assert_eq!(strip_emphasis("no markers"), "no markers");
    }

    #[test]
    fn test_strip_placeholders_shortest_match() {
        assert_eq!(
            strip_placeholders("Dear [Client], from [Your Name]."),
            "Dear , from ."
        );
    }

    #[test]
    fn test_placeholder_does_not_span_lines() {
        let input = "open [ bracket\nclose ] bracket";
        assert_eq!(strip_placeholders(input), input);
    }

    #[test]
    fn test_emphasis_inside_placeholder() {
        assert_eq!(normalize("Date: **[Insert Date]**"), "Date:");
    }

    #[test]
    fn test_nested_brackets_leave_tail() {
        // Shortest match from the first `[` ends at the first `]`.
        assert_eq!(normalize("x [[a]] y"), "x ] y");
    }

    #[test]
    fn test_preserves_paragraph_breaks() {
        let input = "\n\n**Overview**\n\nWe build websites.\n\n**Pricing**\n$5000\n";
        assert_eq!(normalize(input), "Overview\n\nWe build websites.\n\nPricing\n$5000");
    }

    #[test]
    fn test_unicode_survives() {
        assert_eq!(normalize("  Café — “quoted” ✓ [x] "), "Café — “quoted” ✓");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "",
            "plain",
            "**Hello** [Name], welcome!",
            "x [[a]] y",
            "[ ] [",
            "a]\n[b",
            "*[*]*",
            "[a\nb] **c** ",
            "  [leading] text [trailing]  ",
            "***",
            "[[[]]]",
        ];
        for s in samples {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {s:?}");
            assert!(!once.contains('*'), "emphasis left in {once:?}");
        }
    }
}
