//! Progress-callback trait for per-stage generation events.
//!
//! Inject an [`Arc<dyn ProposalProgressCallback>`] via
//! [`crate::config::ProposalConfigBuilder::progress_callback`] to learn when
//! each stage starts and finishes. The binary uses it to drive a spinner; a
//! web front end could forward the events over a socket instead.
//!
//! # Example
//!
//! ```rust
//! use edgequake_proposal::{ProposalProgressCallback, ProposalConfig, Stage};
//! use std::sync::Arc;
//!
//! struct Printer;
//!
//! impl ProposalProgressCallback for Printer {
//!     fn on_stage_complete(&self, stage: Stage, elapsed_ms: u64) {
//!         eprintln!("{stage} done in {elapsed_ms}ms");
//!     }
//! }
//!
//! let config = ProposalConfig::builder()
//!     .progress_callback(Arc::new(Printer) as Arc<dyn ProposalProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use std::fmt;
use std::sync::Arc;

/// A step of the generation pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Field validation and font precondition check.
    Validate,
    /// The external generation call.
    Generate,
    /// Normalisation, layout and PDF serialisation.
    Render,
    /// Writing the PDF to disk.
    Write,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Validate => "validate",
            Stage::Generate => "generate",
            Stage::Render => "render",
            Stage::Write => "write",
        };
        f.pad(s)
    }
}

/// Called by the pipeline as it moves through each [`Stage`].
///
/// All methods have default no-op implementations so callers only override
/// what they care about.
pub trait ProposalProgressCallback: Send + Sync {
    /// Called when a stage begins.
    fn on_stage_start(&self, stage: Stage) {
        let _ = stage;
    }

    /// Called when a stage finishes successfully.
    fn on_stage_complete(&self, stage: Stage, elapsed_ms: u64) {
        let _ = (stage, elapsed_ms);
    }

    /// Called when a stage fails. No later stage runs after this.
    fn on_stage_error(&self, stage: Stage, error: &str) {
        let _ = (stage, error);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl ProposalProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ProposalConfig`].
pub type ProgressCallback = Arc<dyn ProposalProgressCallback>;
