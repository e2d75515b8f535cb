//! Error types for the edgequake-proposal library.
//!
//! Two distinct error types reflect two distinct levels of failure:
//!
//! * [`ProposalError`] — the request cannot complete (missing fields, no
//!   font, provider down, disk full). Returned as `Err(ProposalError)` from
//!   the top-level `generate_proposal*` functions.
//!
//! * [`FieldError`] — one form field is unusable. Validation collects every
//!   failing field into [`ProposalError::Validation`] so the user can fix
//!   them all in one pass instead of resubmitting once per field.
//!
//! [`ProposalError::kind`] groups the variants into the four classes a
//! front end needs to decide what to show and whether to let the user retry.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the edgequake-proposal library.
#[derive(Debug, Error)]
pub enum ProposalError {
    // ── Validation errors ─────────────────────────────────────────────────
    /// One or more required form fields are missing or invalid.
    #[error("Please fill all required fields before generating a proposal:{}", format_problems(.problems))]
    Validation { problems: Vec<FieldError> },

    // ── Precondition errors ───────────────────────────────────────────────
    /// The Unicode font file does not exist at the configured path.
    #[error("Missing font file: '{path}'\nPlace DejaVuSans.ttf there or pass --font <PATH>.")]
    FontNotFound { path: PathBuf },

    /// The font file exists but could not be read.
    #[error("Failed to read font file '{path}': {source}")]
    FontUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The font file was read but is not a usable TrueType/OpenType font.
    #[error("Font file '{path}' is not a valid TrueType font: {detail}")]
    FontInvalid { path: PathBuf, detail: String },

    /// The configured provider is not initialised (missing API key etc.).
    #[error("LLM provider '{provider}' is not configured.\n{hint}")]
    ProviderNotConfigured { provider: String, hint: String },

    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── External service errors ───────────────────────────────────────────
    /// The generation call failed (network, auth, quota, bad request).
    #[error("Proposal generation failed: {message}")]
    GenerationFailed { message: String },

    /// The provider answered, but with no text.
    #[error("Proposal generation returned an empty response")]
    EmptyCompletion,

    /// The generation call exceeded the configured timeout.
    #[error("Proposal generation timed out after {secs}s")]
    GenerationTimeout { secs: u64 },

    // ── Render errors ─────────────────────────────────────────────────────
    /// Layout or PDF serialisation failed.
    #[error("Failed to render proposal PDF: {detail}")]
    RenderFailed { detail: String },

    /// Could not create or write the output PDF file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Coarse classification of a [`ProposalError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Bad user input; nothing changed, correct and resubmit.
    Validation,
    /// Missing external setup (font, credential, config); fix and restart.
    Precondition,
    /// The generation service failed; resubmitting may succeed.
    ExternalService,
    /// Document assembly or the file write failed.
    Render,
    /// A bug or runtime failure inside the library.
    Internal,
}

impl ProposalError {
    /// Which class of failure this is.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProposalError::Validation { .. } => ErrorKind::Validation,
            ProposalError::FontNotFound { .. }
            | ProposalError::FontUnreadable { .. }
            | ProposalError::FontInvalid { .. }
            | ProposalError::ProviderNotConfigured { .. }
            | ProposalError::InvalidConfig(_) => ErrorKind::Precondition,
            ProposalError::GenerationFailed { .. }
            | ProposalError::EmptyCompletion
            | ProposalError::GenerationTimeout { .. } => ErrorKind::ExternalService,
            ProposalError::RenderFailed { .. } | ProposalError::OutputWriteFailed { .. } => {
                ErrorKind::Render
            }
            ProposalError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// `true` when the user can resubmit without changing the environment.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::Validation | ErrorKind::ExternalService | ErrorKind::Render
        )
    }
}

/// A single unusable form field.
#[derive(Debug, Clone, PartialEq, Error, serde::Serialize, serde::Deserialize)]
pub enum FieldError {
    #[error("client name is required")]
    MissingClientName,

    #[error("service is required")]
    MissingService,

    #[error("your name / company name is required")]
    MissingSenderName,

    /// Budget must be a finite amount greater than zero.
    #[error("budget must be greater than 0 (got {budget})")]
    NonPositiveBudget { budget: f64 },
}

fn format_problems(problems: &[FieldError]) -> String {
    problems
        .iter()
        .map(|p| format!("\n  • {p}"))
        .collect::<String>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_display_lists_every_field() {
        let e = ProposalError::Validation {
            problems: vec![FieldError::MissingClientName, FieldError::NonPositiveBudget { budget: 0.0 }],
        };
        let msg = e.to_string();
        assert!(msg.contains("client name is required"), "got: {msg}");
        assert!(msg.contains("budget must be greater than 0"), "got: {msg}");
    }

    #[test]
    fn kinds_cover_the_four_classes() {
        assert_eq!(
            ProposalError::Validation { problems: vec![] }.kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            ProposalError::FontNotFound { path: "fonts/x.ttf".into() }.kind(),
            ErrorKind::Precondition
        );
        assert_eq!(ProposalError::EmptyCompletion.kind(), ErrorKind::ExternalService);
        assert_eq!(
            ProposalError::RenderFailed { detail: "boom".into() }.kind(),
            ErrorKind::Render
        );
    }

    #[test]
    fn preconditions_are_not_recoverable() {
        let e = ProposalError::ProviderNotConfigured {
            provider: "openai".into(),
            hint: "set OPENAI_API_KEY".into(),
        };
        assert!(!e.is_recoverable());
        assert!(e.to_string().contains("openai"));
    }

    #[test]
    fn generation_failure_is_recoverable_and_verbatim() {
        let e = ProposalError::GenerationFailed {
            message: "429 quota exceeded".into(),
        };
        assert!(e.is_recoverable());
        assert!(e.to_string().contains("429 quota exceeded"));
    }

    #[test]
    fn font_not_found_display_names_path() {
        let e = ProposalError::FontNotFound {
            path: "fonts/DejaVuSans.ttf".into(),
        };
        assert!(e.to_string().contains("fonts/DejaVuSans.ttf"));
    }
}
