//! PDF Document wrapper

use crate::font::{FontData, FontFamily, FontFamilyBuilder, FontWeight};
use crate::text::{generate_text_operators, TextRenderContext};
use crate::{Align, PdfError, Result};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;
use std::path::Path;

/// RGB Color (values 0.0 - 1.0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    /// Create a new RGB color (values 0.0 - 1.0)
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create color from RGB values (0-255)
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Black color
    pub fn black() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }

    /// White color
    pub fn white() -> Self {
        Self::rgb(1.0, 1.0, 1.0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

/// PDF Document wrapper providing high-level operations
pub struct PdfDocument {
    /// The underlying lopdf document
    inner: Document,
    /// Registered font families
    font_families: HashMap<String, FontFamily>,
    /// Current font family name
    current_family: Option<String>,
    /// Current font weight
    current_weight: FontWeight,
    /// Current font size
    current_font_size: f32,
    /// Current text color
    current_text_color: Color,
    /// Embedded fonts (variant name -> PDF object ID)
    embedded_fonts: HashMap<String, ObjectId>,
    /// Page font resources (page number -> variant name -> resource name)
    page_font_resources: HashMap<usize, HashMap<String, String>>,
    /// Next font resource number
    next_font_resource: u32,
    /// Buffered content operators per page (flushed at save time)
    page_content_buffer: HashMap<usize, Vec<u8>>,
}

impl PdfDocument {
    fn from_document(inner: Document) -> Self {
        Self {
            inner,
            font_families: HashMap::new(),
            current_family: None,
            current_weight: FontWeight::default(),
            current_font_size: 12.0,
            current_text_color: Color::default(),
            embedded_fonts: HashMap::new(),
            page_font_resources: HashMap::new(),
            next_font_resource: 1,
            page_content_buffer: HashMap::new(),
        }
    }

    /// Open a PDF document from a file path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let inner = Document::load(path).map_err(|e| PdfError::OpenError(e.to_string()))?;
        Ok(Self::from_document(inner))
    }

    /// Open a PDF document from bytes
    pub fn open_from_bytes(data: &[u8]) -> Result<Self> {
        let inner = Document::load_mem(data).map_err(|e| PdfError::OpenError(e.to_string()))?;
        Ok(Self::from_document(inner))
    }

    /// Get the number of pages in the document
    pub fn page_count(&self) -> usize {
        self.inner.get_pages().len()
    }

    /// Register a font family with regular and optional bold weights
    ///
    /// # Example
    /// ```ignore
    /// doc.register_font_family("body",
    ///     FontFamilyBuilder::new()
    ///         .regular(std::fs::read("DejaVuSans.ttf")?)
    ///         .bold(std::fs::read("DejaVuSans-Bold.ttf")?)
    /// )?;
    /// ```
    pub fn register_font_family(&mut self, name: &str, builder: FontFamilyBuilder) -> Result<()> {
        if self.font_families.contains_key(name) {
            return Err(PdfError::FontAlreadyExists(name.to_string()));
        }

        let family = builder.build(name)?;
        self.font_families.insert(name.to_string(), family);

        Ok(())
    }

    /// Check whether a font family has been registered
    pub fn has_font_family(&self, name: &str) -> bool {
        self.font_families.contains_key(name)
    }

    /// Get the font data for a family and weight (bold falls back to regular)
    pub fn font_data(&self, family: &str, weight: FontWeight) -> Result<&FontData> {
        self.font_families
            .get(family)
            .map(|f| f.variant(weight))
            .ok_or_else(|| PdfError::FontNotFound(family.to_string()))
    }

    /// Set the current font family and size
    pub fn set_font(&mut self, family: &str, size: f32) -> Result<()> {
        if !self.font_families.contains_key(family) {
            return Err(PdfError::FontNotFound(family.to_string()));
        }

        self.current_family = Some(family.to_string());
        self.current_font_size = size;

        Ok(())
    }

    /// Set only the font size (keeps current family/weight)
    pub fn set_font_size(&mut self, size: f32) -> Result<()> {
        if self.current_family.is_none() {
            return Err(PdfError::FontNotFound("No font family set".to_string()));
        }

        self.current_font_size = size;
        Ok(())
    }

    /// Set the font weight (keeps current family/size)
    pub fn set_font_weight(&mut self, weight: FontWeight) -> Result<()> {
        if self.current_family.is_none() {
            return Err(PdfError::FontNotFound("No font family set".to_string()));
        }

        self.current_weight = weight;
        Ok(())
    }

    /// Set the text color
    pub fn set_text_color(&mut self, color: Color) {
        self.current_text_color = color;
    }

    /// Insert text at a specific position
    ///
    /// Rejects text containing characters the selected weight has no glyph
    /// for with [`PdfError::UnsupportedGlyph`]; nothing is buffered in that
    /// case, so the caller may sanitize and retry.
    ///
    /// # Arguments
    /// * `text` - Text to insert
    /// * `page` - Page number (1-indexed)
    /// * `x` - Anchor X coordinate in points (see [`Align`])
    /// * `y` - Y coordinate in points (from the top of the page)
    /// * `align` - Text alignment relative to `x`
    pub fn insert_text(
        &mut self,
        text: &str,
        page: usize,
        x: f64,
        y: f64,
        align: Align,
    ) -> Result<()> {
        let page_count = self.page_count();
        if page == 0 || page > page_count {
            return Err(PdfError::InvalidPage(page, page_count));
        }

        // Nothing to render
        if text.is_empty() {
            return Ok(());
        }

        let family_name = self
            .current_family
            .clone()
            .ok_or_else(|| PdfError::FontNotFound("No font family set".to_string()))?;

        // Measure, glyph-check and encode against the selected weight
        let (font_name, text_width, text_hex) = {
            let font = self.font_data(&family_name, self.current_weight)?;

            if let Some(ch) = font.find_unsupported(text) {
                return Err(PdfError::UnsupportedGlyph {
                    ch,
                    font: font.name.clone(),
                });
            }

            (
                font.name.clone(),
                font.text_width_points(text, self.current_font_size) as f64,
                font.encode_text_hex(text),
            )
        };

        // Track used characters so the font gets embedded at save time
        self.font_families
            .get_mut(&family_name)
            .ok_or_else(|| PdfError::FontNotFound(family_name.clone()))?
            .variant_mut(self.current_weight)
            .add_chars(text);

        // Convert the top-origin y to PDF bottom-origin coordinates
        let page_height = self.page_height(page)?;
        let pdf_y = page_height - y;

        let start_x = match align {
            Align::Left => x,
            Align::Center => x - text_width / 2.0,
            Align::Right => x - text_width,
        };

        let font_resource_name = self.get_or_create_font_ref(&font_name, page);

        let ctx = TextRenderContext {
            font_name: font_resource_name,
            font_size: self.current_font_size,
            color: self.current_text_color,
        };
        let operators = generate_text_operators(&text_hex, start_x, pdf_y, &ctx);

        self.buffer_content(page, &operators);

        Ok(())
    }

    /// Width of `text` in points with the current font and size
    pub fn get_text_width(&self, text: &str) -> Result<f64> {
        let family_name = self
            .current_family
            .as_ref()
            .ok_or_else(|| PdfError::FontNotFound("No font family set".to_string()))?;
        let font = self.font_data(family_name, self.current_weight)?;

        Ok(font.text_width_points(text, self.current_font_size) as f64)
    }

    /// Save the document to a file
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.flush_content_buffers()?;
        self.embed_fonts()?;

        self.inner
            .save(path)
            .map_err(|e| PdfError::SaveError(e.to_string()))?;
        Ok(())
    }

    /// Save the document to bytes
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        self.flush_content_buffers()?;
        self.embed_fonts()?;

        let mut buffer = Vec::new();
        self.inner
            .save_to(&mut buffer)
            .map_err(|e| PdfError::SaveError(e.to_string()))?;

        Ok(buffer)
    }

    /// Get or create a font resource name (e.g., "F1") for a page
    fn get_or_create_font_ref(&mut self, font_name: &str, page: usize) -> String {
        let page_resources = self.page_font_resources.entry(page).or_default();

        if let Some(resource_name) = page_resources.get(font_name) {
            return resource_name.clone();
        }

        let resource_name = format!("F{}", self.next_font_resource);
        self.next_font_resource += 1;

        page_resources.insert(font_name.to_string(), resource_name.clone());

        resource_name
    }

    /// Embed every font that drew at least one character
    fn embed_fonts(&mut self) -> Result<()> {
        self.embedded_fonts.clear();

        let mut font_names: Vec<String> = Vec::new();
        for family in self.font_families.values() {
            for font_data in [Some(&family.regular), family.bold.as_ref()]
                .into_iter()
                .flatten()
            {
                if !font_data.used_chars.is_empty() {
                    font_names.push(font_data.name.clone());
                }
            }
        }
        font_names.sort();
        font_names.dedup();

        for font_name in font_names {
            self.embed_font_object(&font_name)?;
        }

        self.finalize_page_font_resources()?;

        Ok(())
    }

    /// Find font data by variant name across all families
    fn find_font_data(&self, name: &str) -> Result<&FontData> {
        for family in self.font_families.values() {
            for variant in [Some(&family.regular), family.bold.as_ref()]
                .into_iter()
                .flatten()
            {
                if variant.name == name {
                    return Ok(variant);
                }
            }
        }

        Err(PdfError::FontNotFound(name.to_string()))
    }

    /// Embed a single font as a Type0/CIDFontType2 object graph
    fn embed_font_object(&mut self, font_name: &str) -> Result<ObjectId> {
        let font_objects = self.find_font_data(font_name)?.to_pdf_objects()?;

        let font_file_id = self.inner.add_object(font_objects.font_file_stream);

        let mut font_descriptor = font_objects.font_descriptor;
        font_descriptor.set("FontFile2", Object::Reference(font_file_id));
        let font_descriptor_id = self.inner.add_object(font_descriptor);

        let mut cid_font = font_objects.cid_font;
        cid_font.set("FontDescriptor", Object::Reference(font_descriptor_id));
        let cid_font_id = self.inner.add_object(cid_font);

        let mut type0_font = font_objects.type0_font;
        type0_font.set(
            "DescendantFonts",
            Object::Array(vec![Object::Reference(cid_font_id)]),
        );

        let tounicode_id = self.inner.add_object(font_objects.tounicode_stream);
        type0_font.set("ToUnicode", Object::Reference(tounicode_id));

        let type0_font_id = self.inner.add_object(type0_font);

        self.embedded_fonts
            .insert(font_name.to_string(), type0_font_id);

        Ok(type0_font_id)
    }

    /// Add font references to the Resources of every page that used them
    fn finalize_page_font_resources(&mut self) -> Result<()> {
        let page_resources: Vec<(usize, Vec<(String, String)>)> = self
            .page_font_resources
            .iter()
            .map(|(&page, fonts)| {
                let font_list = fonts
                    .iter()
                    .map(|(font, resource)| (font.clone(), resource.clone()))
                    .collect();
                (page, font_list)
            })
            .collect();

        for (page, fonts) in page_resources {
            if !fonts.is_empty() {
                self.add_fonts_to_page_resources(page, &fonts)?;
            }
        }

        Ok(())
    }

    /// Add font references to a page's Resources dictionary
    fn add_fonts_to_page_resources(
        &mut self,
        page: usize,
        fonts: &[(String, String)],
    ) -> Result<()> {
        let pages = self.inner.get_pages();
        let page_id = *pages
            .get(&(page as u32))
            .ok_or(PdfError::InvalidPage(page, pages.len()))?;

        let page_obj = self.inner.get_object(page_id)?;
        let page_dict = page_obj
            .as_dict()
            .map_err(|_| PdfError::SaveError("Page object is not a dictionary".to_string()))?;

        let mut resources_dict = match page_dict.get(b"Resources") {
            Ok(resources) => match resources.as_dict() {
                Ok(dict) => dict.clone(),
                Err(_) => Dictionary::new(),
            },
            Err(_) => Dictionary::new(),
        };

        let mut font_dict = match resources_dict.get(b"Font") {
            Ok(font) => match font.as_dict() {
                Ok(dict) => dict.clone(),
                Err(_) => Dictionary::new(),
            },
            Err(_) => Dictionary::new(),
        };

        for (font_name, resource_name) in fonts {
            let font_ref = self
                .embedded_fonts
                .get(font_name)
                .ok_or_else(|| PdfError::FontNotFound(font_name.to_string()))?;
            font_dict.set(resource_name.as_bytes(), Object::Reference(*font_ref));
        }

        resources_dict.set(b"Font", Object::Dictionary(font_dict));

        let mut new_page_dict = page_dict.clone();
        new_page_dict.set(b"Resources", Object::Dictionary(resources_dict));

        self.inner.objects.insert(page_id, new_page_dict.into());

        Ok(())
    }

    /// Get page height in points
    ///
    /// Extracts the page height from the MediaBox or CropBox, following the
    /// parent inheritance chain when the page itself carries neither.
    pub fn page_height(&self, page: usize) -> Result<f64> {
        let pages = self.inner.get_pages();
        let page_id = *pages
            .get(&(page as u32))
            .ok_or(PdfError::InvalidPage(page, pages.len()))?;

        let media_box = self.get_inherited_media_box(page_id)?;

        extract_height_from_media_box(&media_box)
    }

    /// Get MediaBox, following parent inheritance chain if needed
    fn get_inherited_media_box(&self, page_id: ObjectId) -> Result<Vec<Object>> {
        let mut current_id = page_id;

        // Parent chains deeper than 10 levels are treated as malformed
        for _ in 0..10 {
            let obj = self.inner.get_object(current_id)?;
            let dict = obj
                .as_dict()
                .map_err(|_| PdfError::ParseError("Object is not a dictionary".to_string()))?;

            if let Ok(media_box) = dict.get(b"MediaBox").or_else(|_| dict.get(b"CropBox")) {
                let media_box_array = match media_box {
                    Object::Array(arr) => arr.clone(),
                    Object::Reference(ref_id) => {
                        let referred = self.inner.get_object(*ref_id)?;
                        referred
                            .as_array()
                            .map_err(|_| {
                                PdfError::ParseError(
                                    "MediaBox reference is not an array".to_string(),
                                )
                            })?
                            .clone()
                    }
                    _ => return Err(PdfError::ParseError("MediaBox is not an array".to_string())),
                };
                return Ok(media_box_array);
            }

            if let Ok(Object::Reference(parent_id)) = dict.get(b"Parent") {
                current_id = *parent_id;
                continue;
            }

            break;
        }

        // Fallback: assume A4
        Ok(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(595.28),
            Object::Real(841.89),
        ])
    }

    /// Buffer content operators for a page (written at save time)
    fn buffer_content(&mut self, page: usize, content: &[u8]) {
        self.page_content_buffer
            .entry(page)
            .or_default()
            .extend_from_slice(content);
    }

    /// Flush all buffered content to page streams
    fn flush_content_buffers(&mut self) -> Result<()> {
        let buffers: Vec<(usize, Vec<u8>)> = self.page_content_buffer.drain().collect();

        for (page, content) in buffers {
            if !content.is_empty() {
                self.append_to_content_stream(page, &content)?;
            }
        }

        Ok(())
    }

    /// Append content to a page's content stream
    ///
    /// Handles single streams, referenced streams and stream arrays, and
    /// decompresses existing content before appending.
    fn append_to_content_stream(&mut self, page: usize, content: &[u8]) -> Result<()> {
        let pages = self.inner.get_pages();
        let page_id = *pages
            .get(&(page as u32))
            .ok_or(PdfError::InvalidPage(page, pages.len()))?;

        let (existing_content, page_dict_clone) = {
            let page_obj = self.inner.get_object(page_id)?;
            let page_dict = page_obj
                .as_dict()
                .map_err(|_| PdfError::ParseError("Page object is not a dictionary".to_string()))?;

            let existing_content = match page_dict.get(b"Contents") {
                Ok(contents) => match contents {
                    Object::Stream(stream) => stream
                        .decompressed_content()
                        .unwrap_or_else(|_| stream.content.clone()),
                    Object::Reference(ref_id) => {
                        if let Ok(Object::Stream(stream)) = self.inner.get_object(*ref_id) {
                            stream
                                .decompressed_content()
                                .unwrap_or_else(|_| stream.content.clone())
                        } else {
                            Vec::new()
                        }
                    }
                    Object::Array(arr) => {
                        let mut combined = Vec::new();
                        for obj in arr {
                            match obj {
                                Object::Reference(ref_id) => {
                                    if let Ok(Object::Stream(stream)) =
                                        self.inner.get_object(*ref_id)
                                    {
                                        let data = stream
                                            .decompressed_content()
                                            .unwrap_or_else(|_| stream.content.clone());
                                        combined.extend_from_slice(&data);
                                    }
                                }
                                Object::Stream(stream) => {
                                    let data = stream
                                        .decompressed_content()
                                        .unwrap_or_else(|_| stream.content.clone());
                                    combined.extend_from_slice(&data);
                                }
                                _ => {}
                            }
                        }
                        combined
                    }
                    _ => Vec::new(),
                },
                Err(_) => Vec::new(),
            };

            (existing_content, page_dict.clone())
        };

        let mut new_content = existing_content;
        new_content.extend_from_slice(content);

        let new_stream = Stream::new(Dictionary::new(), new_content);
        let stream_id = self.inner.add_object(new_stream);

        let mut new_page_dict = page_dict_clone;
        new_page_dict.set(b"Contents", Object::Reference(stream_id));

        self.inner.objects.insert(page_id, new_page_dict.into());

        Ok(())
    }
}

/// Extract height from a MediaBox array
fn extract_height_from_media_box(media_box_array: &[Object]) -> Result<f64> {
    if media_box_array.len() >= 4 {
        let y1 = object_as_f64(&media_box_array[1])
            .ok_or_else(|| PdfError::ParseError("Invalid MediaBox y1".to_string()))?;
        let y2 = object_as_f64(&media_box_array[3])
            .ok_or_else(|| PdfError::ParseError("Invalid MediaBox y2".to_string()))?;
        return Ok(y2 - y1);
    }

    Err(PdfError::ParseError("Invalid MediaBox format".to_string()))
}

fn object_as_f64(obj: &Object) -> Option<f64> {
    obj.as_f32()
        .map(|v| v as f64)
        .ok()
        .or_else(|| obj.as_i64().ok().map(|v| v as f64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FontFamily;

    /// Build a minimal single-page A4 PDF in memory
    fn create_test_pdf() -> Vec<u8> {
        let mut doc = Document::new();

        let pages_id = doc.add_object(Object::Dictionary(lopdf::dictionary! {
            "Type" => "Pages",
            "Count" => 1,
            "Kids" => vec![],
        }));

        let contents_id = doc.add_object(Object::Stream(Stream::new(
            lopdf::dictionary! {},
            vec![],
        )));

        let page_id = doc.add_object(Object::Dictionary(lopdf::dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.28.into(), 841.89.into()],
            "Resources" => lopdf::dictionary! {},
            "Contents" => contents_id,
        }));

        let mut pages_dict = doc.get_object(pages_id).unwrap().as_dict().unwrap().clone();
        pages_dict.set("Kids", Object::Array(vec![page_id.into()]));
        doc.objects.insert(pages_id, pages_dict.into());

        let catalog_id = doc.add_object(Object::Dictionary(lopdf::dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        }));
        doc.trailer.set("Root", catalog_id);

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer).unwrap();
        buffer
    }

    /// Inject a faceless stub family; every glyph lookup fails on it
    fn install_stub_family(doc: &mut PdfDocument, name: &str) {
        let stub = FontData {
            name: format!("{name}-regular"),
            ttf_data: vec![0u8; 16],
            used_chars: std::collections::HashSet::new(),
            face: None,
        };
        doc.font_families.insert(
            name.to_string(),
            FontFamily {
                regular: stub,
                bold: None,
            },
        );
    }

    #[test]
    fn test_open_from_bytes_and_page_count() {
        let doc = PdfDocument::open_from_bytes(&create_test_pdf()).unwrap();
        assert_eq!(doc.page_count(), 1);
    }

    #[test]
    fn test_open_invalid_bytes() {
        let result = PdfDocument::open_from_bytes(b"not a pdf");
        assert!(matches!(result, Err(PdfError::OpenError(_))));
    }

    #[test]
    fn test_page_height() {
        let doc = PdfDocument::open_from_bytes(&create_test_pdf()).unwrap();
        let height = doc.page_height(1).unwrap();
        assert!((height - 841.89).abs() < 0.01);
    }

    #[test]
    fn test_insert_text_without_font() {
        let mut doc = PdfDocument::open_from_bytes(&create_test_pdf()).unwrap();
        let result = doc.insert_text("hello", 1, 10.0, 10.0, Align::Left);
        assert!(matches!(result, Err(PdfError::FontNotFound(_))));
    }

    #[test]
    fn test_insert_text_invalid_page() {
        let mut doc = PdfDocument::open_from_bytes(&create_test_pdf()).unwrap();
        let result = doc.insert_text("hello", 2, 10.0, 10.0, Align::Left);
        assert!(matches!(result, Err(PdfError::InvalidPage(2, 1))));
    }

    #[test]
    fn test_insert_text_unsupported_glyph() {
        let mut doc = PdfDocument::open_from_bytes(&create_test_pdf()).unwrap();
        install_stub_family(&mut doc, "stub");
        doc.set_font("stub", 12.0).unwrap();

        let result = doc.insert_text("A", 1, 10.0, 10.0, Align::Left);
        assert!(matches!(
            result,
            Err(PdfError::UnsupportedGlyph { ch: 'A', .. })
        ));
    }

    #[test]
    fn test_empty_text_is_noop() {
        let mut doc = PdfDocument::open_from_bytes(&create_test_pdf()).unwrap();
        install_stub_family(&mut doc, "stub");
        doc.set_font("stub", 12.0).unwrap();

        doc.insert_text("", 1, 10.0, 10.0, Align::Left).unwrap();
        assert!(doc.page_content_buffer.is_empty());
    }

    #[test]
    fn test_set_font_unknown_family() {
        let mut doc = PdfDocument::open_from_bytes(&create_test_pdf()).unwrap();
        assert!(matches!(
            doc.set_font("missing", 12.0),
            Err(PdfError::FontNotFound(_))
        ));
    }

    #[test]
    fn test_to_bytes_roundtrip_without_drawing() {
        let mut doc = PdfDocument::open_from_bytes(&create_test_pdf()).unwrap();
        let bytes = doc.to_bytes().unwrap();

        let reopened = PdfDocument::open_from_bytes(&bytes).unwrap();
        assert_eq!(reopened.page_count(), 1);
    }

    #[test]
    fn test_font_resource_names_are_stable_per_page() {
        let mut doc = PdfDocument::open_from_bytes(&create_test_pdf()).unwrap();
        let first = doc.get_or_create_font_ref("body-regular", 1);
        let second = doc.get_or_create_font_ref("body-regular", 1);
        let other = doc.get_or_create_font_ref("body-bold", 1);
        assert_eq!(first, second);
        assert_ne!(first, other);
    }
}
