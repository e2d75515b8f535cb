//! Pipeline stages for proposal generation.
//!
//! Each submodule implements exactly one transformation step, so each can be
//! tested on its own and the external pieces (provider, PDF writer) stay
//! behind narrow seams.
//!
//! ## Data Flow
//!
//! ```text
//! prompt ──▶ llm ──▶ normalize ──▶ layout ──▶ render ──▶ write
//! (text)    (LLM)    (cleanup)     (pages)    (printpdf)  (disk)
//! ```
//!
//! 1. [`llm`]       — the only stage with network I/O; behind [`llm::ProposalGenerator`]
//! 2. [`normalize`] — strip emphasis markers and `[placeholders]`
//! 3. [`layout`]    — pure line-breaking, justification and pagination
//! 4. [`render`]    — serialise the layout with the embedded [`font`]
//! 5. [`write`]     — temp-file + rename onto the output path
//!
//! [`assemble`] bundles layout and render into one call.

pub mod assemble;
pub mod font;
pub mod layout;
pub mod llm;
pub mod normalize;
pub mod render;
pub mod write;
