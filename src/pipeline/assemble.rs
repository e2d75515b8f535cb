//! Document assembly: normalised text + sender → finished proposal PDF.

use crate::error::ProposalError;
use crate::pipeline::font::FontResource;
use crate::pipeline::layout::{self, DocumentLayout, Region};
use crate::pipeline::render;
use crate::request::ContactInfo;

/// A laid-out, serialised proposal.
#[derive(Debug, Clone)]
pub struct ProposalDocument {
    /// Where every line landed; useful for previews and assertions.
    pub layout: DocumentLayout,
    /// The PDF file contents.
    pub bytes: Vec<u8>,
}

impl ProposalDocument {
    /// The title line, always [`layout::DOCUMENT_TITLE`].
    pub fn title(&self) -> Option<&str> {
        self.layout.title()
    }

    /// Printed footer lines (separator, name, email, phone).
    pub fn footer_lines(&self) -> Vec<&str> {
        self.layout.region_text(Region::Footer)
    }

    pub fn page_count(&self) -> usize {
        self.layout.page_count()
    }
}

/// Lay out and serialise a proposal.
///
/// The result depends only on `normalized`, the three `sender` fields and
/// the font: title, justified body, then the contact footer.
pub fn assemble(
    normalized: &str,
    sender: &ContactInfo,
    font: &FontResource,
) -> Result<ProposalDocument, ProposalError> {
    let layout = layout::layout_document(normalized, sender, font);
    let bytes = render::render_pdf(&layout, font)?;
    if bytes.is_empty() {
        return Err(ProposalError::RenderFailed {
            detail: "PDF writer produced no output".into(),
        });
    }
    Ok(ProposalDocument { layout, bytes })
}
