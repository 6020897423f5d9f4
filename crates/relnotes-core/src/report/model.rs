//! Backend independent document model
//!
//! The report is described as sections of paragraphs and bulleted lists made
//! of styled spans. Layout and file output live in `crate::layout`.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFace {
    Regular,
    Bold,
    Oblique,
    Mono,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0.0, g: 0.0, b: 0.0 };
    pub const BLUE: Rgb = Rgb { r: 0.0, g: 0.0, b: 1.0 };
    pub const RED: Rgb = Rgb { r: 1.0, g: 0.0, b: 0.0 };
    pub const LIGHT_GRAY: Rgb = Rgb { r: 0.75, g: 0.75, b: 0.75 };
}

/// A run of text sharing one style.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub face: FontFace,
    pub color: Rgb,
    pub background: Option<Rgb>,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            face: FontFace::Regular,
            color: Rgb::BLACK,
            background: None,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self::plain(text).face(FontFace::Bold)
    }

    pub fn mono(text: impl Into<String>) -> Self {
        Self::plain(text).face(FontFace::Mono)
    }

    pub fn face(mut self, face: FontFace) -> Self {
        self.face = face;
        self
    }

    pub fn color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    pub fn highlight(mut self, background: Rgb) -> Self {
        self.background = Some(background);
        self
    }
}

pub const BODY_FONT_SIZE: f32 = 12.0;
pub const LIST_LEADING: f32 = 15.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub spans: Vec<Span>,
    pub font_size: f32,
    /// Distance between baselines; derived from the font size when `None`.
    pub fixed_leading: Option<f32>,
}

impl Paragraph {
    pub fn new() -> Self {
        Self {
            spans: Vec::new(),
            font_size: BODY_FONT_SIZE,
            fixed_leading: None,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new().span(Span::plain(text))
    }

    /// A list item paragraph: fixed 15pt leading.
    pub fn item() -> Self {
        Self {
            fixed_leading: Some(LIST_LEADING),
            ..Self::new()
        }
    }

    pub fn span(mut self, span: Span) -> Self {
        self.spans.push(span);
        self
    }

    pub fn size(mut self, font_size: f32) -> Self {
        self.font_size = font_size;
        self
    }

    /// Concatenated text of all spans.
    pub fn plain_text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

impl Default for Paragraph {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(Paragraph),
    /// Bulleted list, one paragraph per item.
    List(Vec<Paragraph>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionKind {
    Summary,
    Module(String),
    History,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub kind: SectionKind,
    /// Start this section on a fresh page.
    pub new_page: bool,
    pub blocks: Vec<Block>,
}

impl Section {
    pub fn new(kind: SectionKind, new_page: bool) -> Self {
        Self {
            kind,
            new_page,
            blocks: Vec::new(),
        }
    }

    pub fn paragraph(&mut self, paragraph: Paragraph) {
        self.blocks.push(Block::Paragraph(paragraph));
    }

    pub fn list(&mut self, items: Vec<Paragraph>) {
        self.blocks.push(Block::List(items));
    }

    /// Items of every list in the section, flattened to plain text.
    pub fn list_items(&self) -> Vec<String> {
        self.blocks
            .iter()
            .filter_map(|block| match block {
                Block::List(items) => Some(items),
                Block::Paragraph(_) => None,
            })
            .flatten()
            .map(Paragraph::plain_text)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub title: String,
    pub sections: Vec<Section>,
}
