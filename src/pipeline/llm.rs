//! Generation boundary: send the prompt, get the proposal text back.
//!
//! The rest of the pipeline only sees the narrow [`ProposalGenerator`] trait,
//! so tests swap in a deterministic stub and never touch the network. The
//! production implementation, [`LlmGenerator`], wraps any `edgequake-llm`
//! provider.
//!
//! There is no retry loop: a failed call is reported to the user, who can
//! simply resubmit. An optional timeout bounds how long a hung call blocks.

use crate::config::ProposalConfig;
use crate::error::ProposalError;
use edgequake_llm::{ChatMessage, CompletionOptions, LLMProvider};
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tokio::time::{timeout, Duration};
use tracing::{debug, warn};

/// Raw text returned by the generation service, with usage figures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Generation {
    pub text: String,
    pub input_tokens: usize,
    pub output_tokens: usize,
}

impl Generation {
    /// A generation with no usage figures.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

/// Anything that turns one prompt into one completion.
pub trait ProposalGenerator: Send + Sync {
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<Generation, ProposalError>> + Send;
}

/// [`ProposalGenerator`] backed by an `edgequake-llm` provider.
pub struct LlmGenerator {
    provider: Arc<dyn LLMProvider>,
    options: CompletionOptions,
    timeout_secs: Option<u64>,
}

impl LlmGenerator {
    pub fn new(provider: Arc<dyn LLMProvider>, config: &ProposalConfig) -> Self {
        Self {
            provider,
            options: build_options(config),
            timeout_secs: config.api_timeout_secs,
        }
    }
}

impl ProposalGenerator for LlmGenerator {
    async fn generate(&self, prompt: &str) -> Result<Generation, ProposalError> {
        let start = Instant::now();
        let messages = vec![ChatMessage::user(prompt)];
        let call = self.provider.chat(&messages, Some(&self.options));

        let result = match self.timeout_secs {
            Some(secs) => timeout(Duration::from_secs(secs), call)
                .await
                .map_err(|_| ProposalError::GenerationTimeout { secs })?,
            None => call.await,
        };

        let response = result.map_err(|e| {
            warn!("Generation call failed — {}", e);
            ProposalError::GenerationFailed {
                message: e.to_string(),
            }
        })?;

        debug!(
            "Generation: {} input tokens, {} output tokens, {:?}",
            response.prompt_tokens,
            response.completion_tokens,
            start.elapsed()
        );

        if response.content.trim().is_empty() {
            return Err(ProposalError::EmptyCompletion);
        }

        Ok(Generation {
            text: response.content,
            input_tokens: response.prompt_tokens,
            output_tokens: response.completion_tokens,
        })
    }
}

/// Build `CompletionOptions` from the config.
fn build_options(config: &ProposalConfig) -> CompletionOptions {
    CompletionOptions {
        temperature: Some(config.temperature),
        max_tokens: Some(config.max_tokens),
        ..Default::default()
    }
}
