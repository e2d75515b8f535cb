//! The proposal request: the form fields a user submits.
//!
//! A [`ProposalRequest`] lives for exactly one generation. It is validated
//! once, turned into a prompt, and its [`ContactInfo`] is reused for the PDF
//! footer. Nothing here performs I/O.

use crate::error::{FieldError, ProposalError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Who the proposal is from. Printed verbatim in the PDF footer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    /// Sender's name or company name.
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl ContactInfo {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }
}

/// Writing style requested for the proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProposalStyle {
    /// Conventional business register. (default)
    #[default]
    Formal,
    /// Livelier, more persuasive register.
    Creative,
}

impl fmt::Display for ProposalStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProposalStyle::Formal => f.write_str("Formal"),
            ProposalStyle::Creative => f.write_str("Creative"),
        }
    }
}

/// Everything needed to generate one proposal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalRequest {
    pub client_name: String,
    /// What is being offered, e.g. "Web Development".
    pub service: String,
    /// Budget in dollars. Must be finite and greater than zero.
    pub budget: f64,
    pub sender: ContactInfo,
    pub style: ProposalStyle,
}

impl ProposalRequest {
    /// Check every required field, reporting all problems at once.
    ///
    /// Required: client name, service, sender name (non-blank) and a
    /// positive budget. Email and phone are optional; they are printed in
    /// the footer as given.
    pub fn validate(&self) -> Result<(), ProposalError> {
        let mut problems = Vec::new();

        if self.client_name.trim().is_empty() {
            problems.push(FieldError::MissingClientName);
        }
        if self.service.trim().is_empty() {
            problems.push(FieldError::MissingService);
        }
        if !self.budget.is_finite() || self.budget <= 0.0 {
            problems.push(FieldError::NonPositiveBudget {
                budget: self.budget,
            });
        }
        if self.sender.name.trim().is_empty() {
            problems.push(FieldError::MissingSenderName);
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ProposalError::Validation { problems })
        }
    }
}
