//! Document rendering
//!
//! Orchestrates one render: load the template document, register its fonts,
//! then for each region resolve, sanitize, lay out and draw, and finally
//! serialize. All render state (the open document plus the warnings
//! accumulated so far) is owned by the call and threaded through explicitly.

use crate::context::DataContext;
use crate::resolver::resolve;
use crate::schema::*;
use crate::{RenderError, RenderWarning, Result};
use pdf_core::{Align, FontFamilyBuilder, PdfDocument, PdfError};
use textflow::{sanitize, sanitize_fallback};

/// The result of a successful render
#[derive(Debug, Clone)]
pub struct RenderOutput {
    /// The finished document
    pub bytes: Vec<u8>,
    /// Non-fatal conditions encountered along the way, in order
    pub warnings: Vec<RenderWarning>,
}

/// Renders a template's regions into a PDF document
pub struct DocumentRenderer<'a> {
    template: &'a Template,
}

impl<'a> DocumentRenderer<'a> {
    /// Create a renderer for a template
    pub fn new(template: &'a Template) -> Self {
        Self { template }
    }

    /// Load the template's font table into the document from the filesystem
    ///
    /// Hosts without filesystem access (the WASM bindings) register font
    /// bytes on the document directly instead.
    pub fn load_fonts(&self, doc: &mut PdfDocument) -> Result<()> {
        for font_def in &self.template.fonts {
            let mut builder = FontFamilyBuilder::new().regular(read_font(&font_def.regular)?);
            if let Some(path) = &font_def.bold {
                builder = builder.bold(read_font(path)?);
            }
            doc.register_font_family(&font_def.id, builder)?;
        }

        Ok(())
    }

    /// Render all regions into the document, in declaration order
    ///
    /// Returns the warnings collected across regions. Fatal errors are
    /// limited to configuration faults (unknown font family, unreadable
    /// page tree); missing data and out-of-range pages degrade to warnings.
    pub fn render(&self, doc: &mut PdfDocument, context: &DataContext) -> Result<Vec<RenderWarning>> {
        let mut warnings = Vec::new();

        for (index, region) in self.template.regions.iter().enumerate() {
            self.render_region(doc, index, region, context, &mut warnings)?;
        }

        Ok(warnings)
    }

    /// Render a single region
    fn render_region(
        &self,
        doc: &mut PdfDocument,
        index: usize,
        region: &TemplateVariableRegion,
        context: &DataContext,
        warnings: &mut Vec<RenderWarning>,
    ) -> Result<()> {
        let page_count = doc.page_count();
        if region.page == 0 || region.page > page_count {
            warnings.push(RenderWarning::PageOutOfRange {
                region: index,
                page: region.page,
                page_count,
            });
            return Ok(());
        }

        // Resolve the region's source to text
        let raw = match &region.source {
            RegionSource::Raw(text) => text.clone(),
            RegionSource::Bound(field) => field.token(),
        };
        let resolution = resolve(&raw, context);
        warnings.extend(resolution.warnings);

        let clean = sanitize(&resolution.text);
        if clean.trim().is_empty() {
            return Ok(());
        }

        let weight = convert_weight(region.font.weight);
        doc.set_font(&region.font.family, region.font_size)?;
        doc.set_font_weight(weight)?;

        // Lay out against the selected weight's real glyph metrics
        let lines = {
            let font = doc.font_data(&region.font.family, weight)?;
            textflow::layout(
                &clean,
                &font,
                region.font_size,
                &convert_rect(&region.bounds),
                convert_halign(region.text_align),
                convert_valign(region.vertical_align),
            )
        };

        for line in lines {
            self.draw_line(doc, index, region.page, &line, warnings)?;
        }

        Ok(())
    }

    /// Draw one line, retrying once with fallback sanitization
    fn draw_line(
        &self,
        doc: &mut PdfDocument,
        index: usize,
        page: usize,
        line: &textflow::PositionedLine,
        warnings: &mut Vec<RenderWarning>,
    ) -> Result<()> {
        match doc.insert_text(&line.text, page, line.x, line.y, Align::Left) {
            Ok(()) => Ok(()),
            Err(PdfError::UnsupportedGlyph { .. }) => {
                let fallback = sanitize_fallback(&line.text);
                match doc.insert_text(&fallback, page, line.x, line.y, Align::Left) {
                    Ok(()) => Ok(()),
                    Err(PdfError::UnsupportedGlyph { .. }) => {
                        warnings.push(RenderWarning::LineSkipped {
                            region: index,
                            line: line.text.clone(),
                        });
                        Ok(())
                    }
                    Err(e) => Err(e.into()),
                }
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Generate a finished document from template bytes, regions and a context
///
/// This is the engine's entry point: a pure function from (template, data
/// context) to document bytes. Template byte acquisition, and bounding it
/// with a timeout, is the caller's concern.
pub fn generate_document(
    template_bytes: &[u8],
    template: &Template,
    context: &DataContext,
) -> Result<RenderOutput> {
    let mut doc = PdfDocument::open_from_bytes(template_bytes)
        .map_err(|e| RenderError::TemplateLoad(e.to_string()))?;

    let renderer = DocumentRenderer::new(template);
    renderer.load_fonts(&mut doc)?;
    let warnings = renderer.render(&mut doc, context)?;

    let bytes = doc
        .to_bytes()
        .map_err(|e| RenderError::Serialization(e.to_string()))?;

    Ok(RenderOutput { bytes, warnings })
}

/// Suggest a download filename for a generated document
///
/// Built from the subject's name and the generation date, lowercased with
/// unsafe characters replaced.
pub fn suggested_filename(context: &DataContext) -> String {
    let mut parts = vec!["attestation".to_string()];

    for value in [&context.subject.last_name, &context.subject.first_name] {
        if let Some(value) = value {
            let slug = slugify(value);
            if !slug.is_empty() {
                parts.push(slug);
            }
        }
    }
    if let Some(date) = &context.system.generated_date {
        let slug = slugify(date);
        if !slug.is_empty() {
            parts.push(slug);
        }
    }

    format!("{}.pdf", parts.join("_"))
}

fn slugify(value: &str) -> String {
    value
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .trim_matches('-')
        .to_string()
}

fn read_font(path: &str) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| RenderError::Font(format!("Failed to read font {path}: {e}")))
}

fn convert_weight(weight: FontWeight) -> pdf_core::FontWeight {
    match weight {
        FontWeight::Regular => pdf_core::FontWeight::Regular,
        FontWeight::Bold => pdf_core::FontWeight::Bold,
    }
}

fn convert_halign(align: TextAlign) -> textflow::HAlign {
    match align {
        TextAlign::Left => textflow::HAlign::Left,
        TextAlign::Center => textflow::HAlign::Center,
        TextAlign::Right => textflow::HAlign::Right,
    }
}

fn convert_valign(align: VerticalAlign) -> textflow::VAlign {
    match align {
        VerticalAlign::Top => textflow::VAlign::Top,
        VerticalAlign::Middle => textflow::VAlign::Middle,
        VerticalAlign::Bottom => textflow::VAlign::Bottom,
    }
}

fn convert_rect(rect: &Rect) -> textflow::BoxRect {
    textflow::BoxRect::new(rect.x, rect.y, rect.width, rect.height)
}
