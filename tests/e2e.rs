//! End-to-end tests for edgequake-proposal against a live LLM provider.
//!
//! These make real API calls and are gated behind the `E2E_ENABLED`
//! environment variable so they do not run in CI unless explicitly
//! requested. They also need DejaVu Sans (see `PROPOSAL_TEST_FONT`).
//!
//! Run with:
//!   E2E_ENABLED=1 OPENAI_API_KEY=sk-... cargo test --test e2e -- --nocapture

use edgequake_proposal::{
    generate_proposal, resolve_provider, ContactInfo, ErrorKind, ProposalConfig, ProposalRequest,
    ProposalStyle,
};
use std::path::PathBuf;

const SYSTEM_FONT: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf";

fn font_path() -> PathBuf {
    std::env::var("PROPOSAL_TEST_FONT")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(SYSTEM_FONT))
}

/// Skip this test unless E2E_ENABLED is set and the font exists.
macro_rules! e2e_skip_unless_ready {
    () => {{
        if std::env::var("E2E_ENABLED").is_err() {
            println!("SKIP — set E2E_ENABLED=1 to run e2e tests");
            return;
        }
        let p = font_path();
        if !p.exists() {
            println!("SKIP — font not found: {}", p.display());
            return;
        }
        p
    }};
}

fn request(style: ProposalStyle) -> ProposalRequest {
    ProposalRequest {
        client_name: "Northwind Traders".into(),
        service: "Cybersecurity".into(),
        budget: 12000.0,
        sender: ContactInfo::new("Blue Fox Labs", "hello@bluefox.dev", "+1 555 0100"),
        style,
    }
}

/// Assert the proposal text passes basic quality checks.
fn assert_proposal_quality(text: &str, context: &str) {
    assert!(!text.trim().is_empty(), "[{context}] proposal is empty");
    assert!(!text.contains('*'), "[{context}] emphasis markers survived");
    assert!(
        !text.contains('[') || !text.contains(']'),
        "[{context}] possible placeholder left in output"
    );
    assert!(
        text.len() >= 1500,
        "[{context}] proposal suspiciously short: {} bytes",
        text.len()
    );
    println!("[{context}] ✓  {} bytes, quality checks passed", text.len());
}

#[tokio::test]
async fn test_formal_proposal_live() {
    let font = e2e_skip_unless_ready!();
    let dir = tempfile::tempdir().unwrap();
    let config = ProposalConfig::builder()
        .font_path(font)
        .output_path(dir.path().join("proposal.pdf"))
        .api_timeout_secs(180)
        .build()
        .unwrap();

    let out = generate_proposal(&request(ProposalStyle::Formal), &config)
        .await
        .expect("live generation should succeed");

    assert_proposal_quality(&out.text, "formal");
    assert!(out.pdf_path.exists());
    assert!(out.stats.output_tokens > 0);
    println!("Stats: {:?}", out.stats);
}

#[tokio::test]
async fn test_creative_proposal_live() {
    let font = e2e_skip_unless_ready!();
    let dir = tempfile::tempdir().unwrap();
    let config = ProposalConfig::builder()
        .font_path(font)
        .output_path(dir.path().join("creative.pdf"))
        .build()
        .unwrap();

    let out = generate_proposal(&request(ProposalStyle::Creative), &config)
        .await
        .expect("live generation should succeed");

    assert_proposal_quality(&out.text, "creative");
    assert_eq!(out.file_name, "creative.pdf");
}

#[tokio::test]
async fn test_unknown_provider_is_a_precondition_error() {
    if std::env::var("E2E_ENABLED").is_err() {
        println!("SKIP");
        return;
    }
    let config = ProposalConfig::builder()
        .provider_name("no-such-provider")
        .build()
        .unwrap();

    let err = match resolve_provider(&config) {
        Ok(_) => panic!("unknown provider should not resolve"),
        Err(e) => e,
    };
    assert_eq!(err.kind(), ErrorKind::Precondition);
    assert!(err.to_string().contains("no-such-provider"));
}
