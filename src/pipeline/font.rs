//! The Unicode font resource embedded in every proposal PDF.
//!
//! The built-in PDF base fonts only cover Latin-1, and generated proposals
//! routinely contain curly quotes, dashes, accented names and currency
//! symbols. A TrueType font (DejaVu Sans by default) is therefore a hard
//! precondition: it is loaded and parsed *before* the generation call so a
//! missing file never costs an API request.

use crate::error::ProposalError;
use crate::pipeline::layout::TextMeasure;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;
use ttf_parser::{Face, GlyphId};

const MM_PER_PT: f32 = 25.4 / 72.0;

/// A parsed TrueType font, cheap to clone.
#[derive(Clone)]
pub struct FontResource {
    path: PathBuf,
    data: Arc<Vec<u8>>,
    units_per_em: f32,
    notdef_advance: u16,
}

impl std::fmt::Debug for FontResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontResource")
            .field("path", &self.path)
            .field("bytes", &self.data.len())
            .field("units_per_em", &self.units_per_em)
            .finish()
    }
}

impl FontResource {
    /// Read and validate the font at `path`.
    ///
    /// # Errors
    /// - [`ProposalError::FontNotFound`] if nothing exists at `path`
    /// - [`ProposalError::FontUnreadable`] for any other I/O failure
    /// - [`ProposalError::FontInvalid`] if the bytes are not a TrueType font
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ProposalError> {
        let path = path.as_ref().to_path_buf();
        let data = match tokio::fs::read(&path).await {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ProposalError::FontNotFound { path });
            }
            Err(source) => return Err(ProposalError::FontUnreadable { path, source }),
        };
        Self::from_bytes(path, data)
    }

    /// Validate an in-memory font. `path` is only used in messages.
    pub fn from_bytes(path: impl Into<PathBuf>, data: Vec<u8>) -> Result<Self, ProposalError> {
        let path = path.into();
        let (units_per_em, notdef_advance) = {
            let face = Face::parse(&data, 0).map_err(|e| ProposalError::FontInvalid {
                path: path.clone(),
                detail: e.to_string(),
            })?;
            let upem = face.units_per_em();
            let notdef = face.glyph_hor_advance(GlyphId(0)).unwrap_or(upem / 2);
            (upem, notdef)
        };

        debug!(
            "Loaded font {} ({} bytes, {} units/em)",
            path.display(),
            data.len(),
            units_per_em
        );

        Ok(Self {
            path,
            data: Arc::new(data),
            units_per_em: f32::from(units_per_em.max(1)),
            notdef_advance,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw font file bytes, for embedding.
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Sum of horizontal advances of `text`, in font units.
    fn advance_units(&self, text: &str) -> u32 {
        // Parsing only reads the table directory; the bytes were validated
        // in `from_bytes`.
        let Ok(face) = Face::parse(&self.data, 0) else {
            return text.chars().count() as u32 * u32::from(self.notdef_advance);
        };
        text.chars()
            .map(|c| {
                face.glyph_index(c)
                    .and_then(|g| face.glyph_hor_advance(g))
                    .unwrap_or(self.notdef_advance)
            })
            .map(u32::from)
            .sum()
    }
}

impl TextMeasure for FontResource {
    fn text_width_mm(&self, text: &str, font_size_pt: f32) -> f32 {
        self.advance_units(text) as f32 / self.units_per_em * font_size_pt * MM_PER_PT
    }
}
