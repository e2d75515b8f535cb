//! CLI binary for edgequake-proposal.
//!
//! A thin shim over the library crate that maps CLI flags to a
//! `ProposalRequest` + `ProposalConfig`, prints the proposal and reports
//! where the PDF went. Every library error is caught here and shown as one
//! message; the exit code tells scripts which class of failure occurred.

use anyhow::{Context, Result};
use clap::Parser;
use edgequake_proposal::{
    generate_proposal, resolve_provider, ContactInfo, ErrorKind, ProgressCallback, ProposalConfig,
    ProposalError, ProposalOutput, ProposalProgressCallback, ProposalRequest, ProposalStyle, Stage,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn yellow(s: &str) -> String {
    format!("\x1b[33m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: one spinner whose message follows the stage.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}  {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);
        bar.set_style(style);
        bar.set_prefix("Proposal");
        bar.enable_steady_tick(Duration::from_millis(80));
        Arc::new(Self { bar })
    }
}

impl ProposalProgressCallback for CliProgressCallback {
    fn on_stage_start(&self, stage: Stage) {
        let msg = match stage {
            Stage::Validate => "Checking fields…",
            Stage::Generate => "Generating your personalized proposal…",
            Stage::Render => "Laying out PDF…",
            Stage::Write => "Saving PDF…",
        };
        self.bar.set_message(msg);
    }

    fn on_stage_complete(&self, stage: Stage, elapsed_ms: u64) {
        if stage == Stage::Generate || stage == Stage::Render {
            self.bar.println(format!(
                "  {} {:<9} {}",
                green("✓"),
                stage,
                dim(&format!("{:.1}s", elapsed_ms as f64 / 1000.0))
            ));
        }
        if stage == Stage::Write {
            self.bar.finish_and_clear();
        }
    }

    fn on_stage_error(&self, _stage: Stage, _error: &str) {
        // The top-level handler prints the message.
        self.bar.finish_and_clear();
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Formal proposal, PDF written to ./proposal.pdf
  proposal --client "Acme Corp" --service "Web Development" --budget 5000 \
           --name "Blue Fox Labs" --email hello@bluefox.dev --phone "+1 555 0100"

  # Creative style, custom output and font
  proposal --client Acme --service SEO --budget 1200 --name "Jane Doe" \
           --style creative -o out/acme.pdf --font /usr/share/fonts/truetype/dejavu/DejaVuSans.ttf

  # JSON summary for scripting
  proposal --json ... > result.json

ENVIRONMENT VARIABLES:
  OPENAI_API_KEY          OpenAI API key (also read from ./.env)
  ANTHROPIC_API_KEY       Anthropic API key
  GEMINI_API_KEY          Google Gemini API key
  EDGEQUAKE_LLM_PROVIDER  Override provider (openai, anthropic, gemini, ollama)
  EDGEQUAKE_MODEL         Override model ID
  PROPOSAL_FONT           Path to DejaVuSans.ttf (default: fonts/DejaVuSans.ttf)

EXIT CODES:
  0  success
  1  generation or rendering failed (safe to retry)
  2  missing or invalid fields
  3  setup problem: API key, font file or configuration
  4  internal error
"#;

/// Generate a client-ready business proposal and save it as a PDF.
#[derive(Parser, Debug)]
#[command(
    name = "proposal",
    version,
    about = "Generate personalized, client-ready business proposals as PDF",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Client name.
    #[arg(long, default_value = "")]
    client: String,

    /// Service offered (e.g. Cybersecurity, Web Development, SEO).
    #[arg(long, default_value = "")]
    service: String,

    /// Budget in dollars.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    budget: f64,

    /// Your name / company name.
    #[arg(long, env = "PROPOSAL_SENDER_NAME", default_value = "")]
    name: String,

    /// Your email.
    #[arg(long, env = "PROPOSAL_SENDER_EMAIL", default_value = "")]
    email: String,

    /// Your phone number.
    #[arg(long, env = "PROPOSAL_SENDER_PHONE", default_value = "")]
    phone: String,

    /// Proposal style.
    #[arg(long, value_enum, default_value = "formal")]
    style: StyleArg,

    /// Where to write the PDF (overwritten on every run).
    #[arg(short, long, env = "PROPOSAL_OUTPUT", default_value = "proposal.pdf")]
    output: PathBuf,

    /// Unicode TrueType font embedded in the PDF.
    #[arg(long, env = "PROPOSAL_FONT", default_value = "fonts/DejaVuSans.ttf")]
    font: PathBuf,

    /// LLM model ID (e.g. gpt-4o-mini, gpt-4.1, claude-sonnet-4-20250514).
    #[arg(long, env = "EDGEQUAKE_MODEL", default_value = "gpt-4o-mini")]
    model: String,

    /// LLM provider: openai, anthropic, gemini, ollama, azure.
    #[arg(long, env = "EDGEQUAKE_PROVIDER")]
    provider: Option<String>,

    /// LLM temperature (0.0–2.0).
    #[arg(long, env = "PROPOSAL_TEMPERATURE", default_value_t = 0.7)]
    temperature: f32,

    /// Max LLM output tokens.
    #[arg(long, env = "PROPOSAL_MAX_TOKENS", default_value_t = 4096)]
    max_tokens: usize,

    /// Give up on the LLM call after this many seconds (default: wait).
    #[arg(long, env = "PROPOSAL_API_TIMEOUT")]
    api_timeout: Option<u64>,

    /// Print a JSON summary (ProposalOutput) instead of the proposal text.
    #[arg(long)]
    json: bool,

    /// Disable the progress spinner.
    #[arg(long, env = "PROPOSAL_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PROPOSAL_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors and the proposal itself.
    #[arg(short, long, env = "PROPOSAL_QUIET")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum StyleArg {
    Formal,
    Creative,
}

impl From<StyleArg> for ProposalStyle {
    fn from(v: StyleArg) -> Self {
        match v {
            StyleArg::Formal => ProposalStyle::Formal,
            StyleArg::Creative => ProposalStyle::Creative,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env is fine; the key may already be in the environment.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logging(&cli);

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let (code, icon) = match e.downcast_ref::<ProposalError>().map(ProposalError::kind) {
                Some(ErrorKind::Validation) => (2, yellow("⚠")),
                Some(ErrorKind::Precondition) => (3, red("✘")),
                Some(ErrorKind::Internal) => (4, red("✘")),
                Some(ErrorKind::ExternalService | ErrorKind::Render) | None => (1, red("⚠")),
            };
            eprintln!("{icon} Error: {e:#}");
            ExitCode::from(code)
        }
    }
}

fn init_logging(cli: &Cli) {
    // Suppress INFO-level library logs when the spinner is active; the
    // spinner provides all the feedback that matters to the user.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();
}

async fn run(cli: &Cli) -> Result<()> {
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let progress_cb: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new() as Arc<dyn ProposalProgressCallback>)
    } else {
        None
    };

    let mut config = build_config(cli, progress_cb)?;

    // ── Credentials are checked once, before any request ────────────────
    config.provider = Some(resolve_provider(&config)?);

    let request = build_request(cli);
    let output = generate_proposal(&request, &config).await?;

    if cli.json {
        let json = serde_json::to_string_pretty(&output).context("Failed to serialise output")?;
        println!("{json}");
    } else {
        print_proposal(&mut io::stdout().lock(), &output, cli.quiet)?;
    }
    Ok(())
}

/// Map CLI args to `ProposalConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<ProposalConfig> {
    let mut builder = ProposalConfig::builder()
        .model(cli.model.clone())
        .temperature(cli.temperature)
        .max_tokens(cli.max_tokens)
        .font_path(cli.font.clone())
        .output_path(cli.output.clone());

    if let Some(ref name) = cli.provider {
        builder = builder.provider_name(name.clone());
    }
    if let Some(secs) = cli.api_timeout {
        builder = builder.api_timeout_secs(secs);
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    Ok(builder.build()?)
}

fn build_request(cli: &Cli) -> ProposalRequest {
    ProposalRequest {
        client_name: cli.client.clone(),
        service: cli.service.clone(),
        budget: cli.budget,
        sender: ContactInfo::new(cli.name.clone(), cli.email.clone(), cli.phone.clone()),
        style: cli.style.into(),
    }
}

fn print_proposal(handle: &mut impl Write, output: &ProposalOutput, quiet: bool) -> Result<()> {
    if !quiet {
        writeln!(handle, "{}\n", bold("📄 Generated Proposal")).context("Failed to write to stdout")?;
    }
    handle
        .write_all(output.text.as_bytes())
        .context("Failed to write to stdout")?;
    if !output.text.ends_with('\n') {
        handle
            .write_all(b"\n")
            .context("Failed to write to stdout")?;
    }

    if !quiet {
        eprintln!();
        eprintln!(
            "{}  {} page(s)  {}ms  →  {}",
            green("✔"),
            output.stats.pages,
            output.stats.total_ms,
            bold(&output.pdf_path.display().to_string()),
        );
        eprintln!(
            "   {} tokens in  /  {} tokens out",
            dim(&output.stats.input_tokens.to_string()),
            dim(&output.stats.output_tokens.to_string()),
        );
        eprintln!("🔗 Share: {}", output.share_url);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgequake_proposal::ProposalStats;

    /// Accepts `budget` bytes, then fails every write.
    struct ShortWriter {
        written: Vec<u8>,
        budget: usize,
    }

    impl Write for ShortWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.written.len() + buf.len() > self.budget {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"));
            }
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn output(text: &str) -> ProposalOutput {
        ProposalOutput {
            text: text.to_string(),
            pdf_path: PathBuf::from("proposal.pdf"),
            pdf_bytes: Vec::new(),
            file_name: "proposal.pdf".into(),
            share_url: "https://x.com/intent/tweet?text=hi".into(),
            stats: ProposalStats::default(),
        }
    }

    #[test]
    fn quiet_output_is_text_plus_newline() {
        let mut out = ShortWriter { written: Vec::new(), budget: usize::MAX };
        print_proposal(&mut out, &output("Dear Acme"), true).unwrap();
        assert_eq!(out.written, b"Dear Acme\n");
    }

    #[test]
    fn failed_trailing_newline_is_reported() {
        // Room for the text but not the newline.
        let mut out = ShortWriter { written: Vec::new(), budget: 9 };
        let err = print_proposal(&mut out, &output("Dear Acme"), true).unwrap_err();
        assert!(err.to_string().contains("Failed to write to stdout"));
    }
}
