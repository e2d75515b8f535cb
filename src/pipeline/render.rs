//! PDF serialisation: turn a [`DocumentLayout`] into PDF bytes via printpdf.
//!
//! Every decision about *where* text goes was already made in
//! [`crate::pipeline::layout`]; this stage only embeds the font, creates one
//! PDF page per layout page and draws each span at its baseline. The y axis
//! is flipped here because PDF measures from the bottom-left corner.
//!
//! This is CPU-bound work (font subsetting and stream compression), so the
//! orchestrator runs it inside `tokio::task::spawn_blocking`.

use crate::error::ProposalError;
use crate::pipeline::font::FontResource;
use crate::pipeline::layout::{DocumentLayout, LayoutPage, DOCUMENT_TITLE, PAGE_HEIGHT_MM, PAGE_WIDTH_MM};
use printpdf::{IndirectFontRef, Mm, PdfDocument, PdfLayerReference};
use std::io::Cursor;
use tracing::debug;

const LAYER_NAME: &str = "Proposal";

/// Serialise `layout` to PDF bytes, embedding `font`.
pub fn render_pdf(layout: &DocumentLayout, font: &FontResource) -> Result<Vec<u8>, ProposalError> {
    let (doc, first_page, first_layer) =
        PdfDocument::new(DOCUMENT_TITLE, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), LAYER_NAME);

    let pdf_font = doc
        .add_external_font(Cursor::new(font.bytes()))
        .map_err(|e| ProposalError::RenderFailed {
            detail: format!("could not embed font '{}': {e}", font.path().display()),
        })?;

    for (i, page) in layout.pages.iter().enumerate() {
        let layer = if i == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_idx, layer_idx) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), LAYER_NAME);
            doc.get_page(page_idx).get_layer(layer_idx)
        };
        draw_page(&layer, page, &pdf_font);
    }

    let bytes = doc.save_to_bytes().map_err(|e| ProposalError::RenderFailed {
        detail: e.to_string(),
    })?;
    debug!("Rendered {} pages, {} bytes", layout.page_count(), bytes.len());
    Ok(bytes)
}

fn draw_page(layer: &PdfLayerReference, page: &LayoutPage, font: &IndirectFontRef) {
    for line in &page.lines {
        let baseline = Mm(PAGE_HEIGHT_MM - line.baseline_mm());
        for span in &line.spans {
            layer.use_text(span.text.as_str(), line.font_size_pt, Mm(span.x_mm), baseline, font);
        }
    }
}
