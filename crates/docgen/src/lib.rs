//! Docgen - template-driven document generation
//!
//! This crate turns a PDF template plus live business values into a finished
//! document:
//! - Variable region model: positioned boxes with font, size and alignment
//! - Tag catalog and resolver: symbolic tokens expanded from a [`DataContext`]
//! - Document renderer: sanitize, lay out and draw each region, then
//!   serialize
//!
//! # Example
//!
//! ```ignore
//! use docgen::{generate_document, parse_template, DataContext};
//!
//! let template = parse_template(&template_json)?;
//! let context = DataContext { /* per-render values */ ..Default::default() };
//! let output = generate_document(&template_bytes, &template, &context)?;
//! std::fs::write("attestation.pdf", &output.bytes)?;
//! for warning in &output.warnings {
//!     eprintln!("warning: {warning}");
//! }
//! ```

pub mod catalog;
pub mod context;
mod delivery;
mod renderer;
pub mod resolver;
mod schema;

pub use catalog::{Field, FieldGroup};
pub use context::{Counterparty, DataContext, Engagement, Organization, Subject, System};
pub use delivery::Deliver;
pub use renderer::{generate_document, suggested_filename, DocumentRenderer, RenderOutput};
pub use resolver::{resolve, Resolution};
pub use schema::{
    parse_template, FontDef, FontSelection, FontWeight, Rect, RegionSource, Template,
    TemplateVariableRegion, TextAlign, VerticalAlign,
};

use std::fmt;
use thiserror::Error;

/// Fatal errors: no output bytes are produced
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to parse template: {0}")]
    ParseError(String),

    #[error("Failed to load template document: {0}")]
    TemplateLoad(String),

    #[error("Font error: {0}")]
    Font(String),

    #[error("Failed to serialize document: {0}")]
    Serialization(String),

    #[error("PDF error: {0}")]
    Pdf(#[from] pdf_core::PdfError),
}

/// Result type for document generation
pub type Result<T> = std::result::Result<T, RenderError>;

/// Non-fatal conditions collected during one render
///
/// Warnings are returned alongside the output bytes so a caller can surface
/// "document generated with N fields missing" without failing the operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderWarning {
    /// A region referenced a page beyond the template's page count
    PageOutOfRange {
        region: usize,
        page: usize,
        page_count: usize,
    },
    /// A known field had no value; placeholder text was inserted
    MissingField { field: Field },
    /// An unknown token was found; bracketed fallback text was inserted
    UnresolvedTag { name: String },
    /// A line could not be drawn even after fallback sanitization
    LineSkipped { region: usize, line: String },
}

impl fmt::Display for RenderWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderWarning::PageOutOfRange {
                region,
                page,
                page_count,
            } => write!(
                f,
                "region {region} targets page {page} but the template has {page_count} pages"
            ),
            RenderWarning::MissingField { field } => {
                write!(f, "no value for field '{}'", field.name())
            }
            RenderWarning::UnresolvedTag { name } => {
                write!(f, "unknown tag '<{name}>'")
            }
            RenderWarning::LineSkipped { region, line } => {
                write!(f, "region {region}: line {line:?} skipped")
            }
        }
    }
}
