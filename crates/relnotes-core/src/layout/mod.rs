//! Pagination of the report document
//!
//! `Paginator` turns a `Document` into absolutely positioned text runs and
//! background fills on fixed-size pages. Header and footer are stamped on
//! afterwards with `LaidOutDocument::apply_overlay`, once the page count is
//! known. A `DocumentWriter` serializes the result.

pub mod metrics;
pub mod pdf;

pub use metrics::FontMetrics;
pub use pdf::PdfWriter;

use crate::errors::Result;
use crate::report::{Block, Document, FontFace, Paragraph, Rgb, Span};
use std::path::Path;

const PARAGRAPH_SPACING: f32 = 4.0;
const LEADING_FACTOR: f32 = 1.2;
const SYMBOL_INDENT: f32 = 15.0;
const LIST_SYMBOL: &str = "\u{2022}";
const TAB: &str = "    ";

const OVERLAY_X: f32 = 25.0;
const HEADER_OFFSET: f32 = 25.0;
const FOOTER_OFFSET: f32 = 20.0;

/// Page size and margins in points, origin at the bottom left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin_top: f32,
    pub margin_right: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
}

impl PageGeometry {
    pub fn a4() -> Self {
        Self {
            width: 595.0,
            height: 842.0,
            margin_top: 50.0,
            margin_right: 50.0,
            margin_bottom: 50.0,
            margin_left: 75.0,
        }
    }

    fn content_width(&self) -> f32 {
        self.width - self.margin_left - self.margin_right
    }

    fn content_top(&self) -> f32 {
        self.height - self.margin_top
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}

/// A run of text at a fixed baseline position.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedText {
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub face: FontFace,
    pub size: f32,
    pub color: Rgb,
}

/// A filled rectangle drawn behind text.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedFill {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: Rgb,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub texts: Vec<PlacedText>,
    pub fills: Vec<PlacedFill>,
}

impl Page {
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty() && self.fills.is_empty()
    }

    /// Texts placed on this page, in placement order.
    pub fn text_runs(&self) -> impl Iterator<Item = &str> {
        self.texts.iter().map(|t| t.text.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LaidOutDocument {
    pub title: String,
    pub geometry: PageGeometry,
    pub pages: Vec<Page>,
}

impl LaidOutDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Stamp a header and footer on every page.
    ///
    /// Both closures receive the 1-based page number and the total page
    /// count. A `\n` in the returned text starts a new line.
    pub fn apply_overlay<H, F>(&mut self, header: H, footer: F)
    where
        H: Fn(usize, usize) -> String,
        F: Fn(usize, usize) -> String,
    {
        let size = crate::report::overlay::OVERLAY_FONT_SIZE;
        let leading = size * LEADING_FACTOR;
        let descent = size * 0.25;
        let total = self.pages.len();
        let top = self.geometry.height;

        for (index, page) in self.pages.iter_mut().enumerate() {
            let number = index + 1;

            let header_text = header(number, total);
            let header_lines: Vec<&str> = header_text.lines().collect();
            let header_bottom = top - HEADER_OFFSET + descent;
            for (i, line) in header_lines.iter().enumerate() {
                let y = header_bottom + (header_lines.len() - 1 - i) as f32 * leading;
                page.texts.push(overlay_text(line, y, size));
            }

            let footer_text = footer(number, total);
            let footer_lines: Vec<&str> = footer_text.lines().collect();
            let footer_bottom = FOOTER_OFFSET + descent;
            for (i, line) in footer_lines.iter().enumerate() {
                let y = footer_bottom + (footer_lines.len() - 1 - i) as f32 * leading;
                page.texts.push(overlay_text(line, y, size));
            }
        }
    }
}

fn overlay_text(line: &str, y: f32, size: f32) -> PlacedText {
    PlacedText {
        x: OVERLAY_X,
        y,
        text: line.trim_end().to_string(),
        face: FontFace::Regular,
        size,
        color: Rgb::BLACK,
    }
}

/// Serializes a laid out document to a file.
pub trait DocumentWriter {
    /// Write `document` to `path`, replacing any existing file.
    fn write(&self, document: &LaidOutDocument, path: &Path) -> Result<()>;
}

/// Flows a `Document` onto pages.
#[derive(Debug, Clone, Default)]
pub struct Paginator {
    geometry: PageGeometry,
    metrics: FontMetrics,
}

impl Paginator {
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            metrics: FontMetrics,
        }
    }

    pub fn layout(&self, document: &Document) -> LaidOutDocument {
        let mut cursor = Cursor::new(self.geometry);

        for section in &document.sections {
            if section.new_page {
                cursor.break_page();
            }
            for block in &section.blocks {
                match block {
                    Block::Paragraph(paragraph) => {
                        self.place_paragraph(&mut cursor, paragraph, 0.0, None);
                        cursor.space(PARAGRAPH_SPACING);
                    }
                    Block::List(items) => {
                        for item in items {
                            self.place_paragraph(&mut cursor, item, SYMBOL_INDENT, Some(LIST_SYMBOL));
                        }
                        cursor.space(PARAGRAPH_SPACING);
                    }
                }
            }
        }

        LaidOutDocument {
            title: document.title.clone(),
            geometry: self.geometry,
            pages: cursor.finish(),
        }
    }

    fn place_paragraph(&self, cursor: &mut Cursor, paragraph: &Paragraph, indent: f32, symbol: Option<&str>) {
        let size = paragraph.font_size;
        let leading = paragraph.fixed_leading.unwrap_or(size * LEADING_FACTOR);
        let left = self.geometry.margin_left;
        let max_width = self.geometry.content_width() - indent;

        let lines = self.wrap(&paragraph.spans, size, max_width);
        for (line_no, line) in lines.iter().enumerate() {
            let baseline = cursor.next_line(leading, size);
            if line_no == 0 {
                if let Some(symbol) = symbol {
                    cursor.text(PlacedText {
                        x: left,
                        y: baseline,
                        text: symbol.to_string(),
                        face: FontFace::Regular,
                        size,
                        color: Rgb::BLACK,
                    });
                }
            }

            let mut x = left + indent;
            for run in line {
                let span = &paragraph.spans[run.span];
                if let Some(background) = span.background {
                    cursor.fill(PlacedFill {
                        x,
                        y: baseline - size * 0.22,
                        width: run.width,
                        height: size * 1.05,
                        color: background,
                    });
                }
                cursor.text(PlacedText {
                    x,
                    y: baseline,
                    text: run.text.clone(),
                    face: span.face,
                    size,
                    color: span.color,
                });
                x += run.width;
            }
        }
    }

    /// Greedy word wrap across spans. Every paragraph yields at least one line.
    fn wrap(&self, spans: &[Span], size: f32, max_width: f32) -> Vec<Vec<Run>> {
        let mut wrapper = LineWrapper::new(max_width);

        for (index, span) in spans.iter().enumerate() {
            let text = span.text.replace('\t', TAB);
            for (segment_no, segment) in text.split('\n').enumerate() {
                if segment_no > 0 {
                    wrapper.hard_break();
                }
                for token in tokens(segment) {
                    let width = self.metrics.width(token, span.face, size);
                    let is_space = token.starts_with(' ');
                    if is_space {
                        wrapper.push_space(index, token, width);
                    } else if width > max_width {
                        for c in token.chars() {
                            let mut buf = [0u8; 4];
                            let ch = c.encode_utf8(&mut buf);
                            wrapper.push_word(index, ch, self.metrics.width(ch, span.face, size));
                        }
                    } else {
                        wrapper.push_word(index, token, width);
                    }
                }
            }
        }

        wrapper.finish()
    }
}

/// Split into alternating runs of spaces and non-spaces.
fn tokens(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut in_space = None;
    for (i, c) in text.char_indices() {
        let space = c == ' ';
        match in_space {
            Some(prev) if prev != space => {
                tokens.push(&text[start..i]);
                start = i;
            }
            _ => {}
        }
        in_space = Some(space);
    }
    if start < text.len() {
        tokens.push(&text[start..]);
    }
    tokens
}

#[derive(Debug, Clone)]
struct Run {
    span: usize,
    text: String,
    width: f32,
}

struct LineWrapper {
    max_width: f32,
    lines: Vec<Vec<Run>>,
    current: Vec<Run>,
    width: f32,
    /// Spaces seen since the last word; emitted only if a word follows on the same line.
    pending: Vec<Run>,
    /// The current line was started by wrapping, so leading spaces are dropped.
    wrapped: bool,
}

impl LineWrapper {
    fn new(max_width: f32) -> Self {
        Self {
            max_width,
            lines: Vec::new(),
            current: Vec::new(),
            width: 0.0,
            pending: Vec::new(),
            wrapped: false,
        }
    }

    fn append(&mut self, span: usize, text: &str, width: f32) {
        match self.current.last_mut() {
            Some(run) if run.span == span => {
                run.text.push_str(text);
                run.width += width;
            }
            _ => self.current.push(Run {
                span,
                text: text.to_string(),
                width,
            }),
        }
        self.width += width;
    }

    fn push_space(&mut self, span: usize, text: &str, width: f32) {
        self.pending.push(Run {
            span,
            text: text.to_string(),
            width,
        });
    }

    fn push_word(&mut self, span: usize, text: &str, width: f32) {
        let spaces: f32 = self.pending.iter().map(|run| run.width).sum();
        if self.width > 0.0 && self.width + spaces + width > self.max_width {
            self.end_line();
            self.wrapped = true;
        }

        let pending = std::mem::take(&mut self.pending);
        if !(self.wrapped && self.current.is_empty()) {
            for run in pending {
                self.append(run.span, &run.text, run.width);
            }
        }
        self.append(span, text, width);
    }

    fn hard_break(&mut self) {
        self.end_line();
        self.wrapped = false;
    }

    fn end_line(&mut self) {
        self.pending.clear();
        self.lines.push(std::mem::take(&mut self.current));
        self.width = 0.0;
    }

    fn finish(mut self) -> Vec<Vec<Run>> {
        self.end_line();
        self.lines
    }
}

struct Cursor {
    geometry: PageGeometry,
    pages: Vec<Page>,
    current: Page,
    /// Top of the next line.
    y: f32,
}

impl Cursor {
    fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            pages: Vec::new(),
            current: Page::default(),
            y: geometry.content_top(),
        }
    }

    fn new_page(&mut self) {
        let finished = std::mem::take(&mut self.current);
        self.pages.push(finished);
        self.y = self.geometry.content_top();
    }

    /// Explicit page break; ignored on a page that is still blank.
    fn break_page(&mut self) {
        if !self.current.is_empty() {
            self.new_page();
        }
    }

    /// Reserve a line of height `leading` and return its baseline.
    fn next_line(&mut self, leading: f32, size: f32) -> f32 {
        if self.y - leading < self.geometry.margin_bottom && !self.current.is_empty() {
            self.new_page();
        }
        let baseline = self.y - (leading + size) / 2.0 - size * 0.1;
        self.y -= leading;
        baseline
    }

    fn space(&mut self, amount: f32) {
        self.y -= amount;
    }

    fn text(&mut self, text: PlacedText) {
        self.current.texts.push(text);
    }

    fn fill(&mut self, fill: PlacedFill) {
        self.current.fills.push(fill);
    }

    fn finish(mut self) -> Vec<Page> {
        self.pages.push(self.current);
        self.pages
    }
}
