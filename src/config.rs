//! Configuration types for proposal generation.
//!
//! All run-time behaviour is controlled through [`ProposalConfig`], built via
//! its [`ProposalConfigBuilder`]. The config is created once at start-up and
//! only read afterwards; every request borrows it.
//!
//! Layout geometry (page size, margins, font sizes) is *not* configurable:
//! it lives as constants in [`crate::pipeline::layout`] so every generated
//! document looks the same.

use crate::error::ProposalError;
use crate::progress::ProgressCallback;
use edgequake_llm::LLMProvider;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Where the Unicode font is expected when no path is configured.
pub const DEFAULT_FONT_PATH: &str = "fonts/DejaVuSans.ttf";

/// Where the PDF is written when no path is configured. Overwritten every run.
pub const DEFAULT_OUTPUT_PATH: &str = "proposal.pdf";

/// Configuration for proposal generation.
///
/// # Example
/// ```rust
/// use edgequake_proposal::ProposalConfig;
///
/// let config = ProposalConfig::builder()
///     .model("gpt-4o-mini")
///     .font_path("fonts/DejaVuSans.ttf")
///     .output_path("out/proposal.pdf")
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct ProposalConfig {
    /// LLM model identifier. Default: [`DEFAULT_MODEL`].
    pub model: String,

    /// LLM provider name (e.g. "openai", "anthropic", "ollama").
    /// If None along with `provider`, the provider is detected from the environment.
    pub provider_name: Option<String>,

    /// Pre-constructed LLM provider. Takes precedence over `provider_name`.
    pub provider: Option<Arc<dyn LLMProvider>>,

    /// Sampling temperature for the completion. Default: 0.7.
    pub temperature: f32,

    /// Maximum tokens the model may generate. Default: 4096.
    ///
    /// A 1.5-page proposal is roughly 1 000–1 500 tokens; the headroom keeps
    /// verbose models from being cut off mid-section.
    pub max_tokens: usize,

    /// Unicode TrueType font embedded in the PDF. Default: [`DEFAULT_FONT_PATH`].
    pub font_path: PathBuf,

    /// Output PDF path. Default: [`DEFAULT_OUTPUT_PATH`].
    pub output_path: PathBuf,

    /// Per-call generation timeout in seconds. Default: None (wait indefinitely).
    pub api_timeout_secs: Option<u64>,

    /// Optional per-stage progress callback.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ProposalConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            provider_name: None,
            provider: None,
            temperature: 0.7,
            max_tokens: 4096,
            font_path: PathBuf::from(DEFAULT_FONT_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            api_timeout_secs: None,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ProposalConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProposalConfig")
            .field("model", &self.model)
            .field("provider_name", &self.provider_name)
            .field("provider", &self.provider.as_ref().map(|_| "<dyn LLMProvider>"))
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("font_path", &self.font_path)
            .field("output_path", &self.output_path)
            .field("api_timeout_secs", &self.api_timeout_secs)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn ProposalProgressCallback>"),
            )
            .finish()
    }
}

impl ProposalConfig {
    /// Create a new builder for `ProposalConfig`.
    pub fn builder() -> ProposalConfigBuilder {
        ProposalConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ProposalConfig`].
#[derive(Debug)]
pub struct ProposalConfigBuilder {
    config: ProposalConfig,
}

impl ProposalConfigBuilder {
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub fn provider_name(mut self, name: impl Into<String>) -> Self {
        self.config.provider_name = Some(name.into());
        self
    }

    pub fn provider(mut self, provider: Arc<dyn LLMProvider>) -> Self {
        self.config.provider = Some(provider);
        self
    }

    pub fn temperature(mut self, t: f32) -> Self {
        self.config.temperature = t.clamp(0.0, 2.0);
        self
    }

    pub fn max_tokens(mut self, n: usize) -> Self {
        self.config.max_tokens = n;
        self
    }

    pub fn font_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.font_path = path.into();
        self
    }

    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output_path = path.into();
        self
    }

    pub fn api_timeout_secs(mut self, secs: u64) -> Self {
        self.config.api_timeout_secs = Some(secs);
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ProposalConfig, ProposalError> {
        let c = &self.config;
        if c.model.trim().is_empty() {
            return Err(ProposalError::InvalidConfig("Model must not be empty".into()));
        }
        if c.max_tokens == 0 {
            return Err(ProposalError::InvalidConfig("Max tokens must be ≥ 1".into()));
        }
        if c.api_timeout_secs == Some(0) {
            return Err(ProposalError::InvalidConfig(
                "API timeout must be ≥ 1 second".into(),
            ));
        }
        if c.output_path.as_os_str().is_empty() {
            return Err(ProposalError::InvalidConfig(
                "Output path must not be empty".into(),
            ));
        }
        Ok(self.config)
    }
}
