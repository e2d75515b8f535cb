//! # edgequake-proposal
//!
//! Generate personalised, client-ready business proposals with an LLM and
//! render them to a clean, justified PDF.
//!
//! ## Pipeline Overview
//!
//! ```text
//! ProposalRequest
//!  │
//!  ├─ 1. Validate  required fields + font precondition (no API call yet)
//!  ├─ 2. Prompt    fixed template: sections, length, framing, no placeholders
//!  ├─ 3. Generate  one call to gpt-4o-mini / claude / gemini / …
//!  ├─ 4. Clean     strip **emphasis** and [placeholders], trim
//!  ├─ 5. Assemble  title · justified body · contact footer, paginated (A4)
//!  └─ 6. Output    proposal.pdf + on-screen text + share link
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use edgequake_proposal::{generate_proposal, ContactInfo, ProposalConfig, ProposalRequest, ProposalStyle};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Provider auto-detected from OPENAI_API_KEY / ANTHROPIC_API_KEY / GEMINI_API_KEY
//!     let config = ProposalConfig::default();
//!     let request = ProposalRequest {
//!         client_name: "Acme Corp".into(),
//!         service: "Web Development".into(),
//!         budget: 5000.0,
//!         sender: ContactInfo::new("Blue Fox Labs", "hello@bluefox.dev", "+1 555 0100"),
//!         style: ProposalStyle::Formal,
//!     };
//!     let output = generate_proposal(&request, &config).await?;
//!     println!("{}", output.text);
//!     eprintln!("PDF written to {}", output.pdf_path.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Testing without a provider
//!
//! Implement [`ProposalGenerator`] for a stub and call
//! [`generate_proposal_with`]; every other stage runs unchanged.
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `proposal` binary (clap + anyhow + tracing-subscriber + dotenvy) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod generate;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod prompts;
pub mod request;
pub mod share;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ProposalConfig, ProposalConfigBuilder};
pub use error::{ErrorKind, FieldError, ProposalError};
pub use generate::{generate_proposal, generate_proposal_sync, generate_proposal_with, resolve_provider};
pub use output::{ProposalOutput, ProposalStats};
pub use pipeline::assemble::{assemble, ProposalDocument};
pub use pipeline::font::FontResource;
pub use pipeline::llm::{Generation, LlmGenerator, ProposalGenerator};
pub use pipeline::normalize::normalize;
pub use progress::{NoopProgressCallback, ProgressCallback, ProposalProgressCallback, Stage};
pub use prompts::build_prompt;
pub use request::{ContactInfo, ProposalRequest, ProposalStyle};
pub use share::share_link;
