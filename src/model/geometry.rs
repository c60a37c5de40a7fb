//! Geometric primitives: bounding boxes and transformation matrices.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in page coordinates.
///
/// Coordinates use a top-left origin: `top` is the distance from the top edge
/// of the page and `bottom > top`. Extraction converts from the PDF's
/// bottom-up coordinate space using the page height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge
    pub x0: f32,
    /// Distance of the upper edge from the top of the page
    pub top: f32,
    /// Right edge
    pub x1: f32,
    /// Distance of the lower edge from the top of the page
    pub bottom: f32,
}

impl BoundingBox {
    /// Create a bounding box from its four edges.
    pub fn new(x0: f32, top: f32, x1: f32, bottom: f32) -> Self {
        Self { x0, top, x1, bottom }
    }

    /// Build a box from PDF (bottom-up) coordinates.
    ///
    /// `y_bottom` and `y_top` are measured from the bottom of a page of the
    /// given height, with `y_top > y_bottom`.
    pub fn from_pdf_coords(x0: f32, y_bottom: f32, x1: f32, y_top: f32, page_height: f32) -> Self {
        Self {
            x0,
            top: page_height - y_top,
            x1,
            bottom: page_height - y_bottom,
        }
    }

    /// Width of the box.
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Height of the box.
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Convert back to a PDF-space rectangle `(x, y, width, height)` suitable
    /// for a `re` operator on a page of the given height.
    pub fn to_pdf_rect(&self, page_height: f32) -> (f32, f32, f32, f32) {
        (
            self.x0,
            page_height - self.bottom,
            self.width(),
            self.height(),
        )
    }
}

/// 2D affine transformation matrix `[a b c d e f]`, row-vector convention as
/// used by PDF content streams.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Default for Matrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl Matrix {
    /// The identity transform.
    pub fn identity() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }

    /// Create a matrix from the six `cm` operands.
    pub fn new(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// Matrix product `self * other` (apply `self` first, then `other`).
    pub fn multiply(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    /// Transform a point.
    pub fn transform(&self, x: f32, y: f32) -> (f32, f32) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bbox_dimensions() {
        let bbox = BoundingBox::new(10.0, 20.0, 110.0, 70.0);
        assert_eq!(bbox.width(), 100.0);
        assert_eq!(bbox.height(), 50.0);
    }

    #[test]
    fn test_bbox_pdf_round_trip() {
        // PDF-space rect: x=200, y=400, 100 wide, 50 tall on a 792pt page.
        let bbox = BoundingBox::from_pdf_coords(200.0, 400.0, 300.0, 450.0, 792.0);
        assert_eq!(bbox.top, 342.0);
        assert_eq!(bbox.bottom, 392.0);

        let (x, y, w, h) = bbox.to_pdf_rect(792.0);
        assert_eq!((x, y, w, h), (200.0, 400.0, 100.0, 50.0));
    }

    #[test]
    fn test_matrix_identity_transform() {
        let m = Matrix::identity();
        assert_eq!(m.transform(3.0, 4.0), (3.0, 4.0));
    }

    #[test]
    fn test_matrix_scale_translate() {
        // 100x50 scale placed at (200, 400): the usual image placement matrix.
        let m = Matrix::new(100.0, 0.0, 0.0, 50.0, 200.0, 400.0);
        assert_eq!(m.transform(0.0, 0.0), (200.0, 400.0));
        assert_eq!(m.transform(1.0, 1.0), (300.0, 450.0));
    }

    #[test]
    fn test_matrix_concat() {
        let scale = Matrix::new(2.0, 0.0, 0.0, 2.0, 0.0, 0.0);
        let translate = Matrix::new(1.0, 0.0, 0.0, 1.0, 10.0, 20.0);
        // Scale first, then translate.
        let m = scale.multiply(&translate);
        assert_eq!(m.transform(1.0, 1.0), (12.0, 22.0));
    }
}
