//! Outbound share link offered after a successful generation.

use crate::error::ProposalError;
use reqwest::Url;

const SHARE_ENDPOINT: &str = "https://x.com/intent/tweet";

/// Build the "share on X" intent URL mentioning `client_name`.
///
/// The whole message travels in the `text` query parameter and is
/// form-encoded, so names containing `&`, `#` or spaces cannot break out of
/// the parameter.
pub fn share_link(client_name: &str) -> Result<String, ProposalError> {
    let message = format!(
        "Check out my personalized proposal for {}! Try this app too!",
        client_name.trim()
    );
    let mut url = Url::parse(SHARE_ENDPOINT)
        .map_err(|e| ProposalError::Internal(format!("share endpoint: {e}")))?;
    url.query_pairs_mut().append_pair("text", &message);
    Ok(url.into())
}
