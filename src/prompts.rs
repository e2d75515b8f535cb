//! Prompt templates for proposal generation.
//!
//! Centralising the prompt here serves two purposes:
//!
//! 1. **Single source of truth** — tightening a directive (e.g. banning a
//!    new kind of placeholder) requires editing exactly one place.
//!
//! 2. **Testability** — unit tests inspect the built prompt directly without
//!    calling a provider, so prompt regressions are easy to catch.
//!
//! The directives are deliberately explicit (sections, length, framing, no
//! `[placeholders]`) so the generated text needs only the light cleanup in
//! [`crate::pipeline::normalize`].

use crate::request::{ProposalRequest, ProposalStyle};

/// Sections the model must produce, in order.
pub const REQUIRED_SECTIONS: [&str; 6] = [
    "Cover Greeting",
    "Overview",
    "Service Highlights",
    "Pricing",
    "Why Choose Us",
    "Contact Info",
];

/// Fixed directives appended after the variable part of the prompt.
const FRAMING_DIRECTIVE: &str =
    "Make it clear that this proposal is from the provider (us) to the client (them).";
const TONE_DIRECTIVE: &str =
    "Make it polite, structured, client-focused, and at least 1.5 pages long.";
const PLACEHOLDER_DIRECTIVE: &str = "Avoid placeholders like [Your Name] or [Contact Info].";

/// Build the single instruction sent to the generation service.
///
/// Assumes `request` has already passed [`ProposalRequest::validate`].
pub fn build_prompt(request: &ProposalRequest) -> String {
    format!(
        "Create a professional business proposal from '{sender}' to '{client}'. \
         The proposal should offer '{service}' services for a budget of ${budget}. \
         {FRAMING_DIRECTIVE} \
         Include sections: {sections}. \
         {TONE_DIRECTIVE} \
         {PLACEHOLDER_DIRECTIVE} \
         {style}",
        sender = request.sender.name.trim(),
        client = request.client_name.trim(),
        service = request.service.trim(),
        budget = format_budget(request.budget),
        sections = REQUIRED_SECTIONS.join(", "),
        style = style_directive(request.style),
    )
}

/// Tone line for the selected style.
pub fn style_directive(style: ProposalStyle) -> &'static str {
    match style {
        ProposalStyle::Formal => "Write in a formal, businesslike tone.",
        ProposalStyle::Creative => {
            "Write in a creative, engaging tone while staying professional."
        }
    }
}

/// `5000` → `"5000"`, `1234.5` → `"1234.50"`.
pub fn format_budget(budget: f64) -> String {
    if budget.fract() == 0.0 {
        format!("{budget:.0}")
    } else {
        format!("{budget:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::ContactInfo;

    fn request(style: ProposalStyle) -> ProposalRequest {
        ProposalRequest {
            client_name: "Acme Corp".into(),
            service: "Cybersecurity".into(),
            budget: 12000.0,
            sender: ContactInfo::new("Blue Fox Labs", "hi@bluefox.dev", "555-0100"),
            style,
        }
    }

    #[test]
    fn prompt_embeds_variable_fields() {
        let p = build_prompt(&request(ProposalStyle::Formal));
        assert!(p.contains("from 'Blue Fox Labs' to 'Acme Corp'"), "got: {p}");
        assert!(p.contains("'Cybersecurity' services"));
        assert!(p.contains("budget of $12000."));
    }

    #[test]
    fn prompt_contains_every_directive() {
        let p = build_prompt(&request(ProposalStyle::Formal));
        for section in REQUIRED_SECTIONS {
            assert!(p.contains(section), "missing section {section}");
        }
        assert!(p.contains("from the provider (us) to the client (them)"));
        assert!(p.contains("at least 1.5 pages"));
        assert!(p.contains("Avoid placeholders"));
    }

    #[test]
    fn style_only_changes_tone_line() {
        let formal = build_prompt(&request(ProposalStyle::Formal));
        let creative = build_prompt(&request(ProposalStyle::Creative));
        assert_ne!(formal, creative);
        assert_eq!(
            formal.trim_end_matches(style_directive(ProposalStyle::Formal)),
            creative.trim_end_matches(style_directive(ProposalStyle::Creative)),
        );
    }

    #[test]
    fn prompt_is_deterministic() {
        let req = request(ProposalStyle::Creative);
        assert_eq!(build_prompt(&req), build_prompt(&req));
    }

    #[test]
    fn budget_formatting() {
        assert_eq!(format_budget(5000.0), "5000");
        assert_eq!(format_budget(1234.5), "1234.50");
        assert_eq!(format_budget(0.99), "0.99");
    }
}
