//! Width measurement abstraction

/// Glyph-metric measurements at a given font size.
///
/// Implemented over real font data by the PDF layer; tests use fixed-width
/// stubs so layout arithmetic can be checked without font files.
pub trait TextMeasure {
    /// Width of `text` in points when set at `font_size`.
    fn text_width(&self, text: &str, font_size: f32) -> f32;

    /// Distance from the baseline up to the top of the tallest glyphs,
    /// in points, at `font_size`.
    fn ascent(&self, font_size: f32) -> f32;
}

impl<T: TextMeasure + ?Sized> TextMeasure for &T {
    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        (**self).text_width(text, font_size)
    }

    fn ascent(&self, font_size: f32) -> f32 {
        (**self).ascent(font_size)
    }
}
