//! Top-level generation entry points.
//!
//! One call = one request: validate the form, check the font, call the
//! provider once, clean the text, assemble and write the PDF. Nothing is
//! cached between calls and there is no retry; any failure is returned as a
//! single [`ProposalError`] and no partial document is written.

use crate::config::ProposalConfig;
use crate::error::ProposalError;
use crate::output::{ProposalOutput, ProposalStats};
use crate::pipeline::assemble::{self, ProposalDocument};
use crate::pipeline::font::FontResource;
use crate::pipeline::llm::{LlmGenerator, ProposalGenerator};
use crate::pipeline::{normalize, write};
use crate::progress::Stage;
use crate::prompts;
use crate::request::ProposalRequest;
use crate::share;
use edgequake_llm::{LLMProvider, ProviderFactory};
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Generate a proposal with the provider described by `config`.
///
/// This is the primary entry point for the library.
///
/// # Errors
/// - [`ProposalError::Validation`] — a required field is missing; no call is made
/// - font / provider precondition errors — fix the environment and restart
/// - [`ProposalError::GenerationFailed`] and friends — resubmit
/// - [`ProposalError::RenderFailed`] / [`ProposalError::OutputWriteFailed`]
pub async fn generate_proposal(
    request: &ProposalRequest,
    config: &ProposalConfig,
) -> Result<ProposalOutput, ProposalError> {
    let provider = resolve_provider(config)?;
    let generator = LlmGenerator::new(provider, config);
    generate_proposal_with(request, config, &generator).await
}

/// Generate a proposal using a caller-supplied [`ProposalGenerator`].
///
/// Validation and the font check both run before `generator` is invoked, so
/// neither bad input nor a missing font ever wastes a generation call.
pub async fn generate_proposal_with<G: ProposalGenerator>(
    request: &ProposalRequest,
    config: &ProposalConfig,
    generator: &G,
) -> Result<ProposalOutput, ProposalError> {
    let total_start = Instant::now();
    info!(
        "Generating proposal for '{}' ({}, {} style)",
        request.client_name.trim(),
        request.service.trim(),
        request.style
    );

    // ── Step 1: Validate input and preconditions ─────────────────────────
    let font = run_stage(config, Stage::Validate, async {
        request.validate()?;
        FontResource::load(&config.font_path).await
    })
    .await?;

    // ── Step 2: Generate ─────────────────────────────────────────────────
    let prompt = prompts::build_prompt(request);
    debug!("Prompt: {} chars", prompt.len());

    let gen_start = Instant::now();
    let generation = run_stage(config, Stage::Generate, generator.generate(&prompt)).await?;
    let generation_ms = gen_start.elapsed().as_millis() as u64;

    // ── Step 3: Normalise and assemble ───────────────────────────────────
    let text = normalize::normalize(&generation.text);
    debug!(
        "Normalised {} → {} chars",
        generation.text.len(),
        text.len()
    );

    let render_start = Instant::now();
    let document = run_stage(config, Stage::Render, assemble_blocking(&text, request, font)).await?;
    let render_ms = render_start.elapsed().as_millis() as u64;

    // ── Step 4: Persist ──────────────────────────────────────────────────
    run_stage(
        config,
        Stage::Write,
        write::write_pdf(&document.bytes, &config.output_path),
    )
    .await?;

    let share_url = share::share_link(&request.client_name)?;

    let stats = ProposalStats {
        input_tokens: generation.input_tokens,
        output_tokens: generation.output_tokens,
        generation_ms,
        render_ms,
        total_ms: total_start.elapsed().as_millis() as u64,
        pages: document.page_count(),
        pdf_bytes: document.bytes.len(),
    };

    info!(
        "Proposal complete: {} pages, {} bytes → {} ({}ms total)",
        stats.pages,
        stats.pdf_bytes,
        config.output_path.display(),
        stats.total_ms
    );

    let file_name = config
        .output_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| crate::config::DEFAULT_OUTPUT_PATH.to_string());

    Ok(ProposalOutput {
        text,
        pdf_path: config.output_path.clone(),
        pdf_bytes: document.bytes,
        file_name,
        share_url,
        stats,
    })
}

/// Synchronous wrapper around [`generate_proposal`].
///
/// Creates a temporary tokio runtime internally.
pub fn generate_proposal_sync(
    request: &ProposalRequest,
    config: &ProposalConfig,
) -> Result<ProposalOutput, ProposalError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| ProposalError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(generate_proposal(request, config))
}

/// Resolve the LLM provider, from most-specific to least-specific.
///
/// 1. **Pre-built provider** (`config.provider`) — used as-is.
/// 2. **Named provider** (`config.provider_name`) with `config.model`.
/// 3. **Environment pair** (`EDGEQUAKE_LLM_PROVIDER` + `EDGEQUAKE_MODEL`).
/// 4. **`OPENAI_API_KEY`** present — OpenAI with `config.model`.
/// 5. **Full auto-detection** (`ProviderFactory::from_env`).
///
/// The binary calls this once at start-up so a missing credential is
/// reported before the user fills in anything.
pub fn resolve_provider(config: &ProposalConfig) -> Result<Arc<dyn LLMProvider>, ProposalError> {
    if let Some(ref provider) = config.provider {
        return Ok(Arc::clone(provider));
    }

    if let Some(ref name) = config.provider_name {
        return create_provider(name, &config.model);
    }

    if let (Ok(prov), Ok(model)) = (
        std::env::var("EDGEQUAKE_LLM_PROVIDER"),
        std::env::var("EDGEQUAKE_MODEL"),
    ) {
        if !prov.is_empty() && !model.is_empty() {
            return create_provider(&prov, &model);
        }
    }

    if let Ok(openai_key) = std::env::var("OPENAI_API_KEY") {
        if !openai_key.is_empty() {
            return create_provider("openai", &config.model);
        }
    }

    let (llm_provider, _embedding) =
        ProviderFactory::from_env().map_err(|e| ProposalError::ProviderNotConfigured {
            provider: "auto".to_string(),
            hint: format!(
                "No LLM provider could be auto-detected from environment.\n\
                Set OPENAI_API_KEY (e.g. in a .env file) or configure a provider.\n\
                Error: {}",
                e
            ),
        })?;

    Ok(llm_provider)
}

fn create_provider(provider_name: &str, model: &str) -> Result<Arc<dyn LLMProvider>, ProposalError> {
    ProviderFactory::create_llm_provider(provider_name, model).map_err(|e| {
        ProposalError::ProviderNotConfigured {
            provider: provider_name.to_string(),
            hint: format!("{e}"),
        }
    })
}

/// Run blocking layout + PDF serialisation off the async worker threads.
async fn assemble_blocking(
    text: &str,
    request: &ProposalRequest,
    font: FontResource,
) -> Result<ProposalDocument, ProposalError> {
    let text = text.to_string();
    let sender = request.sender.clone();
    tokio::task::spawn_blocking(move || assemble::assemble(&text, &sender, &font))
        .await
        .map_err(|e| ProposalError::Internal(format!("Render task panicked: {}", e)))?
}

/// Await one stage, reporting start/complete/error to the progress callback.
async fn run_stage<T>(
    config: &ProposalConfig,
    stage: Stage,
    fut: impl Future<Output = Result<T, ProposalError>>,
) -> Result<T, ProposalError> {
    let cb = config.progress_callback.as_ref();
    if let Some(cb) = cb {
        cb.on_stage_start(stage);
    }
    let start = Instant::now();
    let result = fut.await;
    if let Some(cb) = cb {
        match &result {
            Ok(_) => cb.on_stage_complete(stage, start.elapsed().as_millis() as u64),
            Err(e) => cb.on_stage_error(stage, &e.to_string()),
        }
    }
    result
}
