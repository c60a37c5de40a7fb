//! Annotation appearance settings.

/// Stroke color and toggles for the annotation overlay.
#[derive(Debug, Clone)]
pub struct AnnotationStyle {
    /// Stroke color as RGB components in 0.0..=1.0
    pub color: (f32, f32, f32),
    /// Stroke width in points
    pub line_width: f32,
    /// Draw boxes around image placements
    pub draw_images: bool,
    /// Draw boxes around detected table regions
    pub draw_tables: bool,
    /// Draw boxes around word occurrences
    pub draw_words: bool,
}

impl Default for AnnotationStyle {
    fn default() -> Self {
        Self {
            color: (1.0, 0.0, 0.0),
            line_width: 2.0,
            draw_images: true,
            draw_tables: true,
            draw_words: true,
        }
    }
}

impl AnnotationStyle {
    /// Create the default style (red boxes, 2pt stroke, everything drawn).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the stroke color.
    pub fn with_color(mut self, r: f32, g: f32, b: f32) -> Self {
        self.color = (r, g, b);
        self
    }

    /// Set the stroke width in points.
    pub fn with_line_width(mut self, width: f32) -> Self {
        self.line_width = width;
        self
    }

    /// Skip word boxes.
    pub fn without_words(mut self) -> Self {
        self.draw_words = false;
        self
    }

    /// Skip table region boxes.
    pub fn without_tables(mut self) -> Self {
        self.draw_tables = false;
        self
    }

    /// Skip image placement boxes.
    pub fn without_images(mut self) -> Self {
        self.draw_images = false;
        self
    }
}
