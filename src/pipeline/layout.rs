//! Layout: place the title, body and footer on A4 pages.
//!
//! Layout is kept separate from PDF serialisation: every placement decision
//! is a pure function of the text and a [`TextMeasure`]. Tests drive it with a
//! fixed-advance measure; production uses the embedded font's metrics
//! ([`crate::pipeline::font::FontResource`]).
//!
//! ## Coordinates
//!
//! All positions are millimetres measured from the **top-left** corner of the
//! page. [`crate::pipeline::render`] flips the y axis for PDF.
//!
//! ## Page model
//!
//! ```text
//!  ┌──────────────────────────────── 210 mm ─┐
//!  │            15 mm top margin             │
//!  │         Business Proposal   (14pt, C)   │  10 mm line + 10 mm gap
//!  │ 20 ┌───────────────────────────────┐ 20 │
//!  │ mm │ body, 12pt, 8 mm lines,       │ mm │
//!  │    │ justified                     │    │
//!  │    └───────────────────────────────┘    │  5 mm gap
//!  │    ---                                  │
//!  │    Prepared by / Email / Phone  (12pt)  │
//!  │            20 mm break margin           │
//!  └─────────────────────────────────────────┘
//! ```
//!
//! A line that would cross the break margin starts a new page at the top
//! margin. Gaps never trigger a break on their own.

use crate::request::ContactInfo;
use serde::Serialize;

/// Fixed title printed at the top of every proposal.
pub const DOCUMENT_TITLE: &str = "Business Proposal";

/// First footer line, separating the body from the contact block.
pub const FOOTER_SEPARATOR: &str = "---";

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;
pub const MARGIN_LEFT_MM: f32 = 20.0;
pub const MARGIN_RIGHT_MM: f32 = 20.0;
pub const MARGIN_TOP_MM: f32 = 15.0;
/// Distance from the bottom edge at which a new page is started.
pub const MARGIN_BOTTOM_MM: f32 = 20.0;

const TITLE_FONT_PT: f32 = 14.0;
const TITLE_LINE_MM: f32 = 10.0;
const TITLE_GAP_MM: f32 = 10.0;
const BODY_FONT_PT: f32 = 12.0;
const BODY_LINE_MM: f32 = 8.0;
const BODY_GAP_MM: f32 = 5.0;
const FOOTER_FONT_PT: f32 = 12.0;
const FOOTER_LINE_MM: f32 = 8.0;

const MM_PER_PT: f32 = 25.4 / 72.0;
/// Slack for float comparisons against the column width.
const FIT_EPSILON_MM: f32 = 1e-3;

/// Usable width between the left and right margins.
pub const COLUMN_WIDTH_MM: f32 = PAGE_WIDTH_MM - MARGIN_LEFT_MM - MARGIN_RIGHT_MM;

/// Measures rendered text width.
pub trait TextMeasure {
    /// Width of `text` set at `font_size_pt`, in millimetres.
    fn text_width_mm(&self, text: &str, font_size_pt: f32) -> f32;
}

/// Which part of the document a line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    Title,
    Body,
    Footer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    Left,
    Center,
    /// Words spread so the line fills the column exactly.
    Justify,
}

/// A run of text drawn at one position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextSpan {
    pub text: String,
    pub x_mm: f32,
}

/// One laid-out line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutLine {
    pub region: Region,
    /// The line's text with single spaces between words.
    pub text: String,
    pub alignment: Alignment,
    pub font_size_pt: f32,
    /// Top edge of the line's cell.
    pub top_mm: f32,
    pub height_mm: f32,
    /// Positioned runs. Justified lines have one span per word.
    pub spans: Vec<TextSpan>,
}

impl LayoutLine {
    /// Text baseline, vertically centred in the cell.
    pub fn baseline_mm(&self) -> f32 {
        self.top_mm + 0.5 * self.height_mm + 0.3 * self.font_size_pt * MM_PER_PT
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LayoutPage {
    pub lines: Vec<LayoutLine>,
}

/// The complete paginated layout of a proposal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentLayout {
    pub pages: Vec<LayoutPage>,
}

impl DocumentLayout {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All lines in reading order.
    pub fn lines(&self) -> impl Iterator<Item = &LayoutLine> {
        self.pages.iter().flat_map(|p| p.lines.iter())
    }

    /// Text of every line in `region`, in reading order.
    pub fn region_text(&self, region: Region) -> Vec<&str> {
        self.lines()
            .filter(|l| l.region == region)
            .map(|l| l.text.as_str())
            .collect()
    }

    /// The title line's text.
    pub fn title(&self) -> Option<&str> {
        self.region_text(Region::Title).into_iter().next()
    }
}

/// The footer block for `sender`, one entry per printed line.
pub fn footer_block(sender: &ContactInfo) -> [String; 4] {
    [
        FOOTER_SEPARATOR.to_string(),
        format!("Prepared by: {}", sender.name),
        format!("Email: {}", sender.email),
        format!("Phone: {}", sender.phone),
    ]
}

/// Lay out a full proposal: title, justified body, contact footer.
pub fn layout_document(body: &str, sender: &ContactInfo, measure: &dyn TextMeasure) -> DocumentLayout {
    let mut cursor = PageCursor::new(measure);

    cursor.place(Region::Title, DOCUMENT_TITLE.to_string(), Alignment::Center, TITLE_FONT_PT, TITLE_LINE_MM);
    cursor.advance(TITLE_GAP_MM);

    for paragraph in body.lines() {
        let lines = wrap_paragraph(paragraph, BODY_FONT_PT, measure);
        let last = lines.len() - 1;
        for (i, line) in lines.into_iter().enumerate() {
            let alignment = if i < last { Alignment::Justify } else { Alignment::Left };
            cursor.place(Region::Body, line, alignment, BODY_FONT_PT, BODY_LINE_MM);
        }
    }
    cursor.advance(BODY_GAP_MM);

    for entry in footer_block(sender) {
        for line in wrap_verbatim(entry, FOOTER_FONT_PT, measure) {
            cursor.place(Region::Footer, line, Alignment::Left, FOOTER_FONT_PT, FOOTER_LINE_MM);
        }
    }

    DocumentLayout { pages: cursor.pages }
}

struct PageCursor<'a> {
    measure: &'a dyn TextMeasure,
    pages: Vec<LayoutPage>,
    y: f32,
}

impl<'a> PageCursor<'a> {
    fn new(measure: &'a dyn TextMeasure) -> Self {
        Self {
            measure,
            pages: vec![LayoutPage::default()],
            y: MARGIN_TOP_MM,
        }
    }

    fn advance(&mut self, mm: f32) {
        self.y += mm;
    }

    fn place(&mut self, region: Region, text: String, alignment: Alignment, font_size_pt: f32, height_mm: f32) {
        if self.y + height_mm > PAGE_HEIGHT_MM - MARGIN_BOTTOM_MM {
            self.pages.push(LayoutPage::default());
            self.y = MARGIN_TOP_MM;
        }

        let spans = self.position(&text, alignment, font_size_pt);
        let line = LayoutLine {
            region,
            text,
            alignment,
            font_size_pt,
            top_mm: self.y,
            height_mm,
            spans,
        };
        if let Some(page) = self.pages.last_mut() {
            page.lines.push(line);
        }
        self.y += height_mm;
    }

    fn position(&self, text: &str, alignment: Alignment, font_size_pt: f32) -> Vec<TextSpan> {
        if text.is_empty() {
            return Vec::new();
        }
        let column = COLUMN_WIDTH_MM;
        match alignment {
            Alignment::Left => vec![TextSpan {
                text: text.to_string(),
                x_mm: MARGIN_LEFT_MM,
            }],
            Alignment::Center => {
                let width = self.measure.text_width_mm(text, font_size_pt);
                vec![TextSpan {
                    text: text.to_string(),
                    x_mm: MARGIN_LEFT_MM + ((column - width) / 2.0).max(0.0),
                }]
            }
            Alignment::Justify => {
                let words: Vec<&str> = text.split(' ').filter(|w| !w.is_empty()).collect();
                if words.len() < 2 {
                    return vec![TextSpan {
                        text: text.to_string(),
                        x_mm: MARGIN_LEFT_MM,
                    }];
                }
                let widths: Vec<f32> = words
                    .iter()
                    .map(|w| self.measure.text_width_mm(w, font_size_pt))
                    .collect();
                let gap = ((column - widths.iter().sum::<f32>()) / (words.len() - 1) as f32).max(0.0);

                let mut x = MARGIN_LEFT_MM;
                words
                    .iter()
                    .zip(widths)
                    .map(|(word, width)| {
                        let span = TextSpan {
                            text: (*word).to_string(),
                            x_mm: x,
                        };
                        x += width + gap;
                        span
                    })
                    .collect()
            }
        }
    }
}

/// Greedy word wrap of one paragraph to the column width.
///
/// Whitespace runs collapse to a single space. A blank paragraph yields one
/// empty line so vertical spacing is preserved. Words wider than the column
/// are split between characters.
fn wrap_paragraph(paragraph: &str, font_size_pt: f32, measure: &dyn TextMeasure) -> Vec<String> {
    let column = COLUMN_WIDTH_MM + FIT_EPSILON_MM;
    let space = measure.text_width_mm(" ", font_size_pt);

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0_f32;

    for word in paragraph.split_whitespace() {
        let word_width = measure.text_width_mm(word, font_size_pt);

        if !current.is_empty() && current_width + space + word_width <= column {
            current.push(' ');
            current.push_str(word);
            current_width += space + word_width;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }

        if word_width <= column {
            current.push_str(word);
            current_width = word_width;
        } else {
            let mut pieces = break_word(word, font_size_pt, measure);
            let tail = pieces.pop().unwrap_or_default();
            lines.extend(pieces);
            current_width = measure.text_width_mm(&tail, font_size_pt);
            current = tail;
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Fit `text` to the column without touching its whitespace.
///
/// Contact details are printed exactly as supplied, so a line that fits is
/// kept whole and one that doesn't is cut between characters.
fn wrap_verbatim(text: String, font_size_pt: f32, measure: &dyn TextMeasure) -> Vec<String> {
    if measure.text_width_mm(&text, font_size_pt) <= COLUMN_WIDTH_MM + FIT_EPSILON_MM {
        return vec![text];
    }
    break_word(&text, font_size_pt, measure)
}

/// Split an over-long word into column-width pieces (at least one char each).
fn break_word(word: &str, font_size_pt: f32, measure: &dyn TextMeasure) -> Vec<String> {
    let column = COLUMN_WIDTH_MM + FIT_EPSILON_MM;
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut width = 0.0_f32;

    for ch in word.chars() {
        let mut buf = [0u8; 4];
        let ch_width = measure.text_width_mm(ch.encode_utf8(&mut buf), font_size_pt);
        if !piece.is_empty() && width + ch_width > column {
            pieces.push(std::mem::take(&mut piece));
            width = 0.0;
        }
        piece.push(ch);
        width += ch_width;
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every character is 2 mm wide at any size: 85 chars fill the 170 mm column.
    struct FixedAdvance;

    impl TextMeasure for FixedAdvance {
        fn text_width_mm(&self, text: &str, _font_size_pt: f32) -> f32 {
            text.chars().count() as f32 * 2.0
        }
    }

    fn sender() -> ContactInfo {
        ContactInfo::new("Jane Doe", "jane@example.com", "+1 555 0100")
    }

    #[test]
    fn title_is_first_and_centred() {
        let layout = layout_document("Hello.", &sender(), &FixedAdvance);
        let first = &layout.pages[0].lines[0];
        assert_eq!(first.region, Region::Title);
        assert_eq!(first.text, "Business Proposal");
        assert_eq!(first.alignment, Alignment::Center);
        assert_eq!(first.top_mm, MARGIN_TOP_MM);
        // 17 chars * 2 mm = 34 mm, centred in a 170 mm column.
        assert!((first.spans[0].x_mm - (20.0 + 68.0)).abs() < 1e-4);
        assert_eq!(layout.title(), Some("Business Proposal"));
    }

    #[test]
    fn body_starts_after_title_gap() {
        let layout = layout_document("Hello.", &sender(), &FixedAdvance);
        let body = layout.lines().find(|l| l.region == Region::Body).unwrap();
        assert_eq!(body.top_mm, MARGIN_TOP_MM + TITLE_LINE_MM + TITLE_GAP_MM);
    }

    #[test]
    fn footer_lines_are_exact() {
        let layout = layout_document("Body text.", &sender(), &FixedAdvance);
        assert_eq!(
            layout.region_text(Region::Footer),
            ["---", "Prepared by: Jane Doe", "Email: jane@example.com", "Phone: +1 555 0100"]
        );
        let footer = layout.lines().filter(|l| l.region == Region::Footer);
        assert!(footer.into_iter().all(|l| l.alignment == Alignment::Left));
    }

    #[test]
    fn footer_keeps_contact_whitespace() {
        let sender = ContactInfo::new("Jane  Doe", "jane@example.com", "+1  555  0100");
        let layout = layout_document("Body.", &sender, &FixedAdvance);
        assert_eq!(
            layout.region_text(Region::Footer),
            ["---", "Prepared by: Jane  Doe", "Email: jane@example.com", "Phone: +1  555  0100"]
        );
        let phone = layout.lines().find(|l| l.text.starts_with("Phone")).unwrap();
        assert_eq!(phone.spans[0].text, "Phone: +1  555  0100");
    }

    #[test]
    fn overlong_footer_entry_is_cut_not_collapsed() {
        // 13 + 100 chars at 2 mm each: wider than the 170 mm column.
        let name = format!("{}  {}", "a".repeat(49), "b".repeat(49));
        let sender = ContactInfo::new(name.clone(), "", "");
        let layout = layout_document("Body.", &sender, &FixedAdvance);
        let footer = layout.region_text(Region::Footer);
        assert_eq!(footer.len(), 5);
        assert_eq!(footer[1].chars().count(), 85);
        assert_eq!(format!("{}{}", footer[1], footer[2]), format!("Prepared by: {name}"));
    }

    #[test]
    fn regions_appear_in_fixed_order() {
        let layout = layout_document("One.\nTwo.", &sender(), &FixedAdvance);
        let regions: Vec<Region> = layout.lines().map(|l| l.region).collect();
        let first_footer = regions.iter().position(|r| *r == Region::Footer).unwrap();
        assert_eq!(regions[0], Region::Title);
        assert!(regions[1..first_footer].iter().all(|r| *r == Region::Body));
        assert!(regions[first_footer..].iter().all(|r| *r == Region::Footer));
    }

    #[test]
    fn wrapped_lines_are_justified_except_last() {
        let paragraph = "word ".repeat(40);
        let lines = wrap_paragraph(&paragraph, BODY_FONT_PT, &FixedAdvance);
        // "word" = 8 mm, plus 2 mm space: 17 words per 170 mm line.
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].split(' ').count(), 17);

        let layout = layout_document(&paragraph, &sender(), &FixedAdvance);
        let body: Vec<&LayoutLine> = layout.lines().filter(|l| l.region == Region::Body).collect();
        assert_eq!(body[0].alignment, Alignment::Justify);
        assert_eq!(body[2].alignment, Alignment::Left);
    }

    #[test]
    fn justified_line_fills_column() {
        let layout = layout_document(&"ab cdef ".repeat(30), &sender(), &FixedAdvance);
        let line = layout
            .lines()
            .find(|l| l.alignment == Alignment::Justify)
            .unwrap();
        let last = line.spans.last().unwrap();
        let right_edge = last.x_mm + FixedAdvance.text_width_mm(&last.text, 12.0);
        assert!((right_edge - (PAGE_WIDTH_MM - MARGIN_RIGHT_MM)).abs() < 1e-3, "right edge {right_edge}");
        assert_eq!(line.spans[0].x_mm, MARGIN_LEFT_MM);
    }

    #[test]
    fn blank_lines_are_preserved() {
        let layout = layout_document("First.\n\nSecond.", &sender(), &FixedAdvance);
        assert_eq!(layout.region_text(Region::Body), ["First.", "", "Second."]);
    }

    #[test]
    fn long_word_is_broken() {
        let word = "x".repeat(200);
        let lines = wrap_paragraph(&word, BODY_FONT_PT, &FixedAdvance);
        assert_eq!(lines.iter().map(|l| l.chars().count()).collect::<Vec<_>>(), [85, 85, 30]);
    }

    #[test]
    fn long_body_paginates() {
        let body = "A short paragraph line.\n".repeat(80);
        let layout = layout_document(&body, &sender(), &FixedAdvance);
        assert!(layout.page_count() > 1);

        for page in &layout.pages {
            for line in &page.lines {
                assert!(line.top_mm >= MARGIN_TOP_MM);
                assert!(line.top_mm + line.height_mm <= PAGE_HEIGHT_MM - MARGIN_BOTTOM_MM + 1e-3);
            }
        }
        // Continuation pages start at the top margin.
        assert_eq!(layout.pages[1].lines[0].top_mm, MARGIN_TOP_MM);
    }

    #[test]
    fn lines_stay_inside_margins() {
        let body = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. ".repeat(20);
        let layout = layout_document(&body, &sender(), &FixedAdvance);
        for line in layout.lines() {
            for span in &line.spans {
                let right = span.x_mm + FixedAdvance.text_width_mm(&span.text, line.font_size_pt);
                assert!(span.x_mm >= MARGIN_LEFT_MM);
                assert!(right <= PAGE_WIDTH_MM - MARGIN_RIGHT_MM + 1e-3, "overflow: {:?}", line.text);
            }
        }
    }

    #[test]
    fn empty_body_still_has_title_and_footer() {
        let layout = layout_document("", &sender(), &FixedAdvance);
        assert!(layout.region_text(Region::Body).is_empty());
        assert_eq!(layout.title(), Some(DOCUMENT_TITLE));
        assert_eq!(layout.region_text(Region::Footer).len(), 4);
    }

    #[test]
    fn baseline_is_inside_cell() {
        let layout = layout_document("x", &sender(), &FixedAdvance);
        for line in layout.lines() {
            let b = line.baseline_mm();
            assert!(b > line.top_mm && b < line.top_mm + line.height_mm);
        }
    }
}
