//! Bounding-box overlay drawing.
//!
//! Appends a new content stream to each annotated page that strokes a
//! rectangle per detected element. The original page content is never
//! modified; the overlay stream is spliced after it so the boxes paint on
//! top.

use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document as LopdfDocument, Object, Stream};

use crate::detect;
use crate::error::{Error, Result};
use crate::model::{BoundingBox, PageLayout};

use super::style::AnnotationStyle;

/// Draws bounding-box overlays onto a copy of a document.
pub struct Annotator {
    doc: LopdfDocument,
}

impl Annotator {
    /// Open a document from a file path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        detect::detect_version_from_path(&path)?;
        let doc = LopdfDocument::load(path)?;
        Self::from_document(doc)
    }

    /// Open a document from memory.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        detect::detect_version_from_bytes(data)?;
        let doc = LopdfDocument::load_mem(data)?;
        Self::from_document(doc)
    }

    fn from_document(doc: LopdfDocument) -> Result<Self> {
        if doc.is_encrypted() {
            return Err(Error::Encrypted);
        }
        Ok(Self { doc })
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// Draw the overlay for one page from its extracted layout.
    ///
    /// Boxes are drawn images first, then tables, then words, so word boxes
    /// paint on top when regions overlap. A layout with nothing to draw
    /// leaves the page untouched.
    pub fn annotate_page(&mut self, layout: &PageLayout, style: &AnnotationStyle) -> Result<()> {
        let mut boxes: Vec<&BoundingBox> = Vec::new();
        if style.draw_images {
            boxes.extend(layout.images.iter());
        }
        if style.draw_tables {
            boxes.extend(layout.tables.iter());
        }
        if style.draw_words {
            boxes.extend(layout.words.iter().map(|w| &w.bbox));
        }

        if boxes.is_empty() {
            return Ok(());
        }

        let pages = self.doc.get_pages();
        let page_id = *pages
            .get(&layout.number)
            .ok_or(Error::PageOutOfRange(layout.number, pages.len() as u32))?;

        let overlay = overlay_stream(&boxes, layout.height, style)?;
        let stream_id = self.doc.add_object(overlay);

        log::debug!("page {}: overlay with {} boxes", layout.number, boxes.len());

        self.append_content_stream(page_id, stream_id)
    }

    /// Splice a content stream reference after the page's existing content.
    fn append_content_stream(
        &mut self,
        page_id: lopdf::ObjectId,
        stream_id: lopdf::ObjectId,
    ) -> Result<()> {
        let page_dict = self
            .doc
            .get_dictionary(page_id)
            .map_err(|e| Error::Annotate(e.to_string()))?;

        let mut contents: Vec<Object> = match page_dict.get(b"Contents") {
            Ok(Object::Reference(r)) => vec![Object::Reference(*r)],
            Ok(Object::Array(arr)) => arr.clone(),
            _ => Vec::new(),
        };
        contents.push(Object::Reference(stream_id));

        let page_dict = self
            .doc
            .get_object_mut(page_id)
            .and_then(Object::as_dict_mut)
            .map_err(|e| Error::Annotate(e.to_string()))?;
        page_dict.set("Contents", Object::Array(contents));

        Ok(())
    }

    /// Save the annotated document to a file.
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.doc
            .save(path)
            .map_err(|e| Error::Annotate(format!("failed to save: {}", e)))?;
        Ok(())
    }

    /// Serialize the annotated document to memory.
    pub fn save_to_bytes(&mut self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.doc
            .save_to(&mut buffer)
            .map_err(|e| Error::Annotate(format!("failed to serialize: {}", e)))?;
        Ok(buffer)
    }
}

/// Build the overlay content stream for a set of boxes.
fn overlay_stream(
    boxes: &[&BoundingBox],
    page_height: f32,
    style: &AnnotationStyle,
) -> Result<Stream> {
    let mut operations = Vec::with_capacity(boxes.len() + 4);

    let (r, g, b) = style.color;
    operations.push(Operation::new("q", vec![]));
    operations.push(Operation::new("RG", vec![r.into(), g.into(), b.into()]));
    operations.push(Operation::new("w", vec![style.line_width.into()]));

    for bbox in boxes {
        let (x, y, width, height) = bbox.to_pdf_rect(page_height);
        operations.push(Operation::new(
            "re",
            vec![x.into(), y.into(), width.into(), height.into()],
        ));
        operations.push(Operation::new("S", vec![]));
    }

    operations.push(Operation::new("Q", vec![]));

    let content = Content { operations };
    let encoded = content
        .encode()
        .map_err(|e| Error::Annotate(e.to_string()))?;

    Ok(Stream::new(dictionary! {}, encoded))
}
