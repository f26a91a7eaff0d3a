//! PDF Core - Low-level PDF manipulation
//!
//! This crate provides functionality for:
//! - Opening PDF documents from bytes or files
//! - Embedding TrueType fonts (regular and bold weights)
//! - Inserting text at specific coordinates with a strict glyph policy
//! - Serializing the modified document
//!
//! # Example
//!
//! ```ignore
//! use pdf_core::{Align, FontFamilyBuilder, PdfDocument};
//!
//! let mut doc = PdfDocument::open_from_bytes(&template_bytes)?;
//! doc.register_font_family(
//!     "body",
//!     FontFamilyBuilder::new()
//!         .regular(std::fs::read("DejaVuSans.ttf")?)
//!         .bold(std::fs::read("DejaVuSans-Bold.ttf")?),
//! )?;
//! doc.set_font("body", 12.0)?;
//! doc.insert_text("Hello, World!", 1, 100.0, 700.0, Align::Left)?;
//! let bytes = doc.to_bytes()?;
//! ```

#[cfg(test)]
#[macro_use]
extern crate lopdf;

mod document;
mod font;
mod text;

pub use document::{Color, PdfDocument};
pub use font::{FontData, FontFamily, FontFamilyBuilder, FontObjects, FontWeight};
pub use text::{generate_text_operators, TextRenderContext};

use thiserror::Error;

/// Errors that can occur during PDF operations
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Failed to open PDF: {0}")]
    OpenError(String),

    #[error("Failed to save PDF: {0}")]
    SaveError(String),

    #[error("Font not found: {0}")]
    FontNotFound(String),

    #[error("Font already exists: {0}")]
    FontAlreadyExists(String),

    #[error("Failed to parse font: {0}")]
    FontParseError(String),

    #[error("Invalid page number: {0} (document has {1} pages)")]
    InvalidPage(usize, usize),

    #[error("Font '{font}' has no glyph for {ch:?}")]
    UnsupportedGlyph { ch: char, font: String },

    #[error("PDF parsing error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Lopdf error: {0}")]
    LopdfError(#[from] lopdf::Error),
}

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;

/// Text alignment options
///
/// Alignment is relative to the anchor `x` passed to `insert_text`: `Left`
/// starts at `x`, `Center` centers on `x`, `Right` ends at `x`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}
