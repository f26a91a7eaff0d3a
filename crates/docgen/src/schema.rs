//! Template region schema
//!
//! A template is the base PDF plus a declarative list of variable regions,
//! defined once by a template author and read-only input to every render.

use crate::catalog::Field;
use crate::{RenderError, Result};
use serde::{Deserialize, Serialize};

/// Root template definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
    /// Schema version
    pub version: String,

    /// Two-weight font families referenced by regions
    #[serde(default)]
    pub fonts: Vec<FontDef>,

    /// Variable regions, drawn in declaration order
    pub regions: Vec<TemplateVariableRegion>,
}

/// Font family definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontDef {
    /// Family identifier (referenced by regions)
    pub id: String,

    /// Path to the regular-weight TTF file
    pub regular: String,

    /// Path to the bold-weight TTF file; regular is used when absent
    #[serde(default)]
    pub bold: Option<String>,
}

/// A region's bounding box in points, top-left origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Font selection for a region: family plus one of two weights
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontSelection {
    /// Font family id from the template's font table
    pub family: String,

    #[serde(default)]
    pub weight: FontWeight,
}

/// Font weight
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
}

/// Horizontal text alignment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical text alignment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    #[default]
    Top,
    Middle,
    Bottom,
}

/// Where a region's text comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionSource {
    /// A literal string; may contain placeholder tokens
    Raw(String),
    /// A field identifier resolved at render time
    Bound(Field),
}

/// One positioned placeholder region on a template page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateVariableRegion {
    /// Author-facing identifier
    #[serde(default)]
    pub id: Option<String>,

    /// Page number (1-indexed); out-of-range regions are skipped
    pub page: usize,

    /// Bounding box the text is laid out in
    #[serde(rename = "box")]
    pub bounds: Rect,

    /// Font family and weight
    pub font: FontSelection,

    /// Font size in points
    #[serde(rename = "fontSize")]
    pub font_size: f32,

    /// Horizontal alignment
    #[serde(rename = "textAlign")]
    #[serde(default)]
    pub text_align: TextAlign,

    /// Vertical alignment
    #[serde(rename = "verticalAlign")]
    #[serde(default)]
    pub vertical_align: VerticalAlign,

    /// Literal or bound text source
    pub source: RegionSource,
}

/// Parse a template from a JSON string
pub fn parse_template(json: &str) -> Result<Template> {
    serde_json::from_str(json).map_err(|e| RenderError::ParseError(e.to_string()))
}
