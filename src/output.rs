//! Result types returned by [`crate::generate_proposal`].

use serde::Serialize;
use std::path::PathBuf;

/// Everything a front end needs after a successful run.
#[derive(Debug, Clone, Serialize)]
pub struct ProposalOutput {
    /// Normalised proposal text, for on-screen display.
    pub text: String,
    /// Where the PDF was written.
    pub pdf_path: PathBuf,
    /// The PDF contents, for offering as a download.
    #[serde(skip)]
    pub pdf_bytes: Vec<u8>,
    /// Suggested download file name.
    pub file_name: String,
    /// Outbound share URL mentioning the client.
    pub share_url: String,
    pub stats: ProposalStats,
}

impl ProposalOutput {
    /// MIME type of [`Self::pdf_bytes`].
    pub const MIME_TYPE: &'static str = "application/pdf";
}

/// Timing and usage figures for one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProposalStats {
    pub input_tokens: usize,
    pub output_tokens: usize,
    pub generation_ms: u64,
    pub render_ms: u64,
    pub total_ms: u64,
    pub pages: usize,
    pub pdf_bytes: usize,
}
