//! WASM bindings for attesta
//!
//! JavaScript-friendly API for rendering attestation documents in the
//! browser. The host supplies the template JSON, the base PDF bytes and the
//! font bytes, then receives the finished document plus a suggested
//! filename; offering the file to the user (download, share sheet) stays on
//! the JavaScript side.
//!
//! # Example (JavaScript)
//!
//! ```javascript
//! import init, { DocumentTemplate } from 'attesta-wasm';
//!
//! await init();
//!
//! const template = DocumentTemplate.fromJson(templateJson);
//! template.loadBasePdf(pdfBytes);
//! template.loadFont('body', regularBytes, boldBytes);
//!
//! const result = template.render({ subject: { firstName: 'Alice' } });
//! download(result.bytes(), result.filename);
//! ```

use docgen::{suggested_filename, DataContext, DocumentRenderer};
use pdf_core::{FontFamilyBuilder, PdfDocument};
use wasm_bindgen::prelude::*;

// Panic hook for readable errors in the browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// One registered font family: regular bytes plus optional bold bytes
struct LoadedFont {
    family: String,
    regular: Vec<u8>,
    bold: Option<Vec<u8>>,
}

/// A template plus everything needed to render it
#[wasm_bindgen]
pub struct DocumentTemplate {
    template: docgen::Template,
    base_pdf: Option<Vec<u8>>,
    fonts: Vec<LoadedFont>,
}

#[wasm_bindgen]
impl DocumentTemplate {
    /// Parse a template definition from JSON
    ///
    /// @param templateJson - Template definition (regions and font table)
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(template_json: &str) -> Result<DocumentTemplate, JsValue> {
        let template = docgen::parse_template(template_json)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(DocumentTemplate {
            template,
            base_pdf: None,
            fonts: Vec::new(),
        })
    }

    /// Load the base PDF the regions are drawn onto
    #[wasm_bindgen(js_name = loadBasePdf)]
    pub fn load_base_pdf(&mut self, data: &[u8]) {
        self.base_pdf = Some(data.to_vec());
    }

    /// Load font bytes for a family referenced by the template's regions
    ///
    /// @param family - Family id used in region font selections
    /// @param regular - Regular-weight TTF bytes
    /// @param bold - Optional bold-weight TTF bytes
    #[wasm_bindgen(js_name = loadFont)]
    pub fn load_font(&mut self, family: &str, regular: &[u8], bold: Option<Vec<u8>>) {
        self.fonts.push(LoadedFont {
            family: family.to_string(),
            regular: regular.to_vec(),
            bold,
        });
    }

    /// Render the template with a data context
    ///
    /// @param context - DataContext as a plain object (camelCase groups)
    /// @returns RenderResult with bytes, warnings and a suggested filename
    pub fn render(&self, context: JsValue) -> Result<RenderResult, JsValue> {
        let context: DataContext = serde_wasm_bindgen::from_value(context)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let base_pdf = self
            .base_pdf
            .as_ref()
            .ok_or_else(|| JsValue::from_str("No base PDF loaded"))?;

        let mut doc = PdfDocument::open_from_bytes(base_pdf)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        for font in &self.fonts {
            let mut builder = FontFamilyBuilder::new().regular(font.regular.clone());
            if let Some(bold) = &font.bold {
                builder = builder.bold(bold.clone());
            }
            doc.register_font_family(&font.family, builder)
                .map_err(|e| JsValue::from_str(&e.to_string()))?;
        }

        let renderer = DocumentRenderer::new(&self.template);
        let warnings = renderer
            .render(&mut doc, &context)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let bytes = doc
            .to_bytes()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let warnings: Vec<String> = warnings.iter().map(|w| w.to_string()).collect();
        for warning in &warnings {
            web_sys::console::warn_1(&JsValue::from_str(warning));
        }

        Ok(RenderResult {
            bytes,
            warnings,
            filename: suggested_filename(&context),
        })
    }
}

/// A finished render: document bytes, warnings, suggested filename
#[wasm_bindgen]
pub struct RenderResult {
    bytes: Vec<u8>,
    warnings: Vec<String>,
    filename: String,
}

#[wasm_bindgen]
impl RenderResult {
    /// The finished document as a fresh Uint8Array
    pub fn bytes(&self) -> js_sys::Uint8Array {
        js_sys::Uint8Array::from(self.bytes.as_slice())
    }

    /// Suggested download filename
    #[wasm_bindgen(getter)]
    pub fn filename(&self) -> String {
        self.filename.clone()
    }

    /// Non-fatal warnings collected during the render
    pub fn warnings(&self) -> Vec<JsValue> {
        self.warnings
            .iter()
            .map(|w| JsValue::from_str(w))
            .collect()
    }
}
