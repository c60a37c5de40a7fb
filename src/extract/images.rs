//! Image placement detection.
//!
//! Finds image XObjects referenced from a page's resources and tracks the
//! graphics state (q/Q/cm) through the content stream to compute where each
//! `Do` places the image on the page.

use std::collections::HashSet;

use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId};

use crate::error::{Error, Result};
use crate::model::{BoundingBox, Matrix};

use super::spans::{get_number, get_page_content};

/// Compute the bounding box of every image placement on a page, in
/// top-left-origin page coordinates and content-stream order.
pub fn extract_image_boxes(
    doc: &LopdfDocument,
    page_id: ObjectId,
    page_height: f32,
) -> Result<Vec<BoundingBox>> {
    let image_names = image_xobject_names(doc, page_id)?;
    if image_names.is_empty() {
        return Ok(Vec::new());
    }

    let content = get_page_content(doc, page_id)?;
    if content.is_empty() {
        return Ok(Vec::new());
    }

    let content =
        lopdf::content::Content::decode(&content).map_err(|e| Error::ImageExtract(e.to_string()))?;

    let mut boxes = Vec::new();
    let mut ctm = Matrix::identity();
    let mut stack: Vec<Matrix> = Vec::new();

    for op in content.operations {
        match op.operator.as_str() {
            "q" => {
                stack.push(ctm);
            }
            "Q" => {
                if let Some(saved) = stack.pop() {
                    ctm = saved;
                }
            }
            "cm" => {
                if op.operands.len() >= 6 {
                    let m = Matrix::new(
                        get_number(&op.operands[0]).unwrap_or(1.0),
                        get_number(&op.operands[1]).unwrap_or(0.0),
                        get_number(&op.operands[2]).unwrap_or(0.0),
                        get_number(&op.operands[3]).unwrap_or(1.0),
                        get_number(&op.operands[4]).unwrap_or(0.0),
                        get_number(&op.operands[5]).unwrap_or(0.0),
                    );
                    ctm = m.multiply(&ctm);
                }
            }
            "Do" => {
                if let Some(Object::Name(name)) = op.operands.first() {
                    if image_names.contains(name) {
                        boxes.push(placement_bbox(&ctm, page_height));
                    }
                }
            }
            _ => {}
        }
    }

    log::debug!(
        "found {} image placements on page object {:?}",
        boxes.len(),
        page_id
    );

    Ok(boxes)
}

/// Bounding box of the unit square under the current transformation.
///
/// Image space is the unit square; the CTM carries the image's size and
/// position, so transforming all four corners covers rotation and skew.
fn placement_bbox(ctm: &Matrix, page_height: f32) -> BoundingBox {
    let corners = [
        ctm.transform(0.0, 0.0),
        ctm.transform(1.0, 0.0),
        ctm.transform(0.0, 1.0),
        ctm.transform(1.0, 1.0),
    ];

    let mut x_min = f32::MAX;
    let mut x_max = f32::MIN;
    let mut y_min = f32::MAX;
    let mut y_max = f32::MIN;

    for (x, y) in corners {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }

    BoundingBox::from_pdf_coords(x_min, y_min, x_max, y_max, page_height)
}

/// Collect the names of image XObjects reachable from the page's resources.
fn image_xobject_names(doc: &LopdfDocument, page_id: ObjectId) -> Result<HashSet<Vec<u8>>> {
    let page_dict = doc
        .get_dictionary(page_id)
        .map_err(|e| Error::PdfParse(e.to_string()))?;

    let mut names = HashSet::new();

    let resources = match resolve_dict(doc, page_dict.get(b"Resources").ok()) {
        Some(resources) => resources,
        None => return Ok(names),
    };

    let xobjects = match resolve_dict(doc, resources.get(b"XObject").ok()) {
        Some(xobjects) => xobjects,
        None => return Ok(names),
    };

    for (name, obj) in xobjects.iter() {
        let stream = match obj {
            Object::Reference(r) => match doc.get_object(*r) {
                Ok(Object::Stream(s)) => s,
                _ => continue,
            },
            Object::Stream(s) => s,
            _ => continue,
        };

        if let Ok(Object::Name(subtype)) = stream.dict.get(b"Subtype") {
            if subtype == b"Image" {
                names.insert(name.clone());
            }
        }
    }

    Ok(names)
}

/// Follow a reference to a dictionary, or take the dictionary inline.
fn resolve_dict<'a>(doc: &'a LopdfDocument, obj: Option<&'a Object>) -> Option<&'a Dictionary> {
    match obj? {
        Object::Dictionary(d) => Some(d),
        Object::Reference(r) => match doc.get_object(*r) {
            Ok(Object::Dictionary(d)) => Some(d),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placement_bbox_axis_aligned() {
        // cm 100 0 0 50 200 400: a 100x50 image at (200, 400) on a 792pt page.
        let ctm = Matrix::new(100.0, 0.0, 0.0, 50.0, 200.0, 400.0);
        let bbox = placement_bbox(&ctm, 792.0);
        assert!((bbox.x0 - 200.0).abs() < 0.01);
        assert!((bbox.x1 - 300.0).abs() < 0.01);
        assert!((bbox.top - 342.0).abs() < 0.01); // 792 - 450
        assert!((bbox.bottom - 392.0).abs() < 0.01); // 792 - 400
    }

    #[test]
    fn test_placement_bbox_rotated() {
        // 90 degree rotation of a 100x50 image about (200, 400).
        let ctm = Matrix::new(0.0, 100.0, -50.0, 0.0, 200.0, 400.0);
        let bbox = placement_bbox(&ctm, 792.0);
        // Corners land at (200,400), (200,500), (150,400), (150,500).
        assert!((bbox.x0 - 150.0).abs() < 0.01);
        assert!((bbox.x1 - 200.0).abs() < 0.01);
        assert!((bbox.top - 292.0).abs() < 0.01); // 792 - 500
        assert!((bbox.bottom - 392.0).abs() < 0.01); // 792 - 400
    }
}
