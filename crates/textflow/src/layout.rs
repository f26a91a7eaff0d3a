//! Greedy word wrapping and box alignment

use crate::measure::TextMeasure;

/// Line height as a multiple of the font size.
pub const LINE_HEIGHT_FACTOR: f64 = 1.2;

/// Line height in points for a font size.
pub fn line_height(font_size: f32) -> f64 {
    font_size as f64 * LINE_HEIGHT_FACTOR
}

/// A region's bounding box, in points, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxRect {
    /// Left edge
    pub x: f64,
    /// Top edge (distance from the top of the page)
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoxRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Horizontal alignment inside a box
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical alignment inside a box
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VAlign {
    #[default]
    Top,
    Middle,
    Bottom,
}

/// One laid-out line with its draw position.
///
/// `x` is the left edge of the line; `y` is the baseline, measured from the
/// top of the page. Conversion to PDF bottom-origin coordinates happens at
/// the drawing layer.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedLine {
    pub text: String,
    pub x: f64,
    pub y: f64,
}

/// Greedily wrap `text` into lines no wider than `max_width` points.
///
/// Words are space-separated and never split: a word wider than `max_width`
/// still gets a line of its own (and overflows the box horizontally rather
/// than producing an empty line). Returns no lines for whitespace-only input.
pub fn wrap(text: &str, measure: &impl TextMeasure, font_size: f32, max_width: f64) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split(' ').filter(|w| !w.is_empty()) {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };

        if measure.text_width(&candidate, font_size) as f64 > max_width && !current.is_empty() {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        } else {
            current = candidate;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

/// Wrap `text` into `bounds` and compute each line's draw position.
///
/// Wrapping is greedy against measured widths at `font_size`. Baselines are
/// emitted top-origin: the first baseline depends on `valign` (block height =
/// line count × line height), subsequent lines stack downward by one line
/// height. Horizontal placement is per line, from that line's measured width.
pub fn layout(
    text: &str,
    measure: &impl TextMeasure,
    font_size: f32,
    bounds: &BoxRect,
    halign: HAlign,
    valign: VAlign,
) -> Vec<PositionedLine> {
    let lines = wrap(text, measure, font_size, bounds.width);
    if lines.is_empty() {
        return Vec::new();
    }

    let lh = line_height(font_size);
    let ascent = measure.ascent(font_size) as f64;
    let block_height = lines.len() as f64 * lh;

    let first_baseline = match valign {
        VAlign::Top => bounds.y + ascent,
        VAlign::Middle => bounds.y + (bounds.height - block_height) / 2.0 + ascent,
        // Last baseline sits one ascent above the bottom edge
        VAlign::Bottom => {
            bounds.y + bounds.height - ascent - (lines.len() - 1) as f64 * lh
        }
    };

    lines
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            let line_width = measure.text_width(&line, font_size) as f64;
            let x = match halign {
                HAlign::Left => bounds.x,
                HAlign::Center => bounds.x + (bounds.width - line_width) / 2.0,
                HAlign::Right => bounds.x + bounds.width - line_width,
            };
            PositionedLine {
                text: line,
                x,
                y: first_baseline + i as f64 * lh,
            }
        })
        .collect()
}
