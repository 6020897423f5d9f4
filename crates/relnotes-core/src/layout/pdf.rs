//! PDF output using the printpdf built-in fonts.

use crate::errors::{ReleaseNotesError, Result};
use crate::layout::{DocumentWriter, LaidOutDocument, Page};
use crate::report::{FontFace, Rgb};
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Polygon,
};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

const POINTS_PER_MM: f32 = 72.0 / 25.4;

fn mm(points: f32) -> Mm {
    Mm(points / POINTS_PER_MM)
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb(printpdf::Rgb::new(rgb.r, rgb.g, rgb.b, None))
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    oblique: IndirectFontRef,
    mono: IndirectFontRef,
}

impl Fonts {
    fn load(doc: &PdfDocumentReference) -> Result<Self> {
        let load = |font: BuiltinFont| {
            doc.add_builtin_font(font)
                .map_err(|e| ReleaseNotesError::Render(format!("Failed to load font: {:?}", e)))
        };
        Ok(Self {
            regular: load(BuiltinFont::Helvetica)?,
            bold: load(BuiltinFont::HelveticaBold)?,
            oblique: load(BuiltinFont::HelveticaOblique)?,
            mono: load(BuiltinFont::Courier)?,
        })
    }

    fn get(&self, face: FontFace) -> &IndirectFontRef {
        match face {
            FontFace::Regular => &self.regular,
            FontFace::Bold => &self.bold,
            FontFace::Oblique => &self.oblique,
            FontFace::Mono => &self.mono,
        }
    }
}

/// Writes one PDF page per laid out page.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfWriter;

impl PdfWriter {
    pub fn new() -> Self {
        Self
    }

    fn draw_page(layer: &PdfLayerReference, page: &Page, fonts: &Fonts) {
        for fill in &page.fills {
            let corners = [
                (fill.x, fill.y),
                (fill.x + fill.width, fill.y),
                (fill.x + fill.width, fill.y + fill.height),
                (fill.x, fill.y + fill.height),
            ];
            layer.set_fill_color(color(fill.color));
            layer.add_polygon(Polygon {
                rings: vec![corners
                    .iter()
                    .map(|&(x, y)| (Point::new(mm(x), mm(y)), false))
                    .collect()],
                mode: PaintMode::Fill,
                winding_order: WindingOrder::NonZero,
            });
        }

        for text in &page.texts {
            layer.set_fill_color(color(text.color));
            layer.use_text(
                text.text.clone(),
                text.size,
                mm(text.x),
                mm(text.y),
                fonts.get(text.face),
            );
        }
    }
}

impl DocumentWriter for PdfWriter {
    fn write(&self, document: &LaidOutDocument, path: &Path) -> Result<()> {
        let width = mm(document.geometry.width);
        let height = mm(document.geometry.height);

        let (doc, first_page, first_layer) =
            PdfDocument::new(document.title.as_str(), width, height, "Layer 1");
        let fonts = Fonts::load(&doc)?;

        for (index, page) in document.pages.iter().enumerate() {
            let (page_index, layer_index) = if index == 0 {
                (first_page, first_layer)
            } else {
                doc.add_page(width, height, format!("Page {}, Layer 1", index + 1))
            };
            let layer = doc.get_page(page_index).get_layer(layer_index);
            Self::draw_page(&layer, page, &fonts);
        }

        let file = File::create(path).map_err(|e| {
            ReleaseNotesError::Render(format!("Failed to create {}: {}", path.display(), e))
        })?;
        doc.save(&mut BufWriter::new(file)).map_err(|e| {
            ReleaseNotesError::Render(format!("Failed to write {}: {:?}", path.display(), e))
        })?;

        log::info!("Wrote {} pages to {}", document.pages.len(), path.display());
        Ok(())
    }
}
