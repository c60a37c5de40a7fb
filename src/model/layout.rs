//! Per-page extraction results.

use serde::{Deserialize, Serialize};

use super::BoundingBox;

/// One occurrence of a text token on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    /// The token text
    pub text: String,
    /// Effective font size in points
    pub font_size: f32,
    /// Bounding box in top-left-origin page coordinates
    pub bbox: BoundingBox,
}

/// The full extraction result for a single page.
///
/// This carries every detected element with its geometry; the serializable
/// [`PageRecord`](crate::model::PageRecord) is derived from it, and the
/// annotator consumes the same boxes when drawing overlays.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageLayout {
    /// Page number (1-indexed)
    pub number: u32,

    /// Page width in points
    pub width: f32,

    /// Page height in points
    pub height: f32,

    /// Extracted text, lines joined with newlines, in reading order
    pub text: String,

    /// Every word occurrence, in content-stream order
    pub words: Vec<Word>,

    /// Detected table regions
    pub tables: Vec<BoundingBox>,

    /// Image placements
    pub images: Vec<BoundingBox>,

    /// Extraction failure isolated to this page (lenient mode only)
    pub error: Option<String>,
}

impl PageLayout {
    /// Create an empty page layout with the given dimensions.
    pub fn new(number: u32, width: f32, height: f32) -> Self {
        Self {
            number,
            width,
            height,
            text: String::new(),
            words: Vec::new(),
            tables: Vec::new(),
            images: Vec::new(),
            error: None,
        }
    }

    /// Create a layout recording an isolated per-page failure.
    pub fn failed(number: u32, width: f32, height: f32, error: String) -> Self {
        let mut layout = Self::new(number, width, height);
        layout.error = Some(error);
        layout
    }

    /// The page title: text up to the first line break, trimmed.
    pub fn title(&self) -> String {
        self.text
            .split('\n')
            .next()
            .unwrap_or("")
            .trim()
            .to_string()
    }

    /// Check if the page produced no elements at all.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.words.is_empty() && self.tables.is_empty()
            && self.images.is_empty()
    }
}
