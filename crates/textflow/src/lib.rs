//! Textflow - text sanitization and box layout
//!
//! This crate provides:
//! - Character sanitization for the target font encoding
//! - Greedy word wrapping against measured glyph widths
//! - Horizontal and vertical alignment inside a fixed box
//!
//! Everything here is purely computational: no I/O, no PDF types. Width
//! measurement is abstracted behind the [`TextMeasure`] trait so the layout
//! code can be driven by real font metrics or by a fixed-width stub in tests.
//!
//! # Example
//!
//! ```ignore
//! use textflow::{layout, BoxRect, HAlign, VAlign};
//!
//! let bounds = BoxRect::new(40.0, 120.0, 200.0, 48.0);
//! let lines = layout(text, &font, 12.0, &bounds, HAlign::Left, VAlign::Top);
//! for line in lines {
//!     doc.insert_text(&line.text, page, line.x, line.y, Align::Left)?;
//! }
//! ```

mod layout;
mod measure;
mod sanitize;

pub use layout::{layout, line_height, wrap, BoxRect, HAlign, PositionedLine, VAlign};
pub use layout::LINE_HEIGHT_FACTOR;
pub use measure::TextMeasure;
pub use sanitize::{sanitize, sanitize_fallback};
