//! The page extractor: opens a document and produces per-page layouts.

use std::path::Path;

use lopdf::{Document as LopdfDocument, Object, ObjectId};
use rayon::prelude::*;

use crate::detect;
use crate::error::{Error, Result};
use crate::model::PageLayout;

use super::images::extract_image_boxes;
use super::options::{ErrorMode, ExtractOptions};
use super::spans::extract_spans;
use super::tables::TableDetector;
use super::words;

/// US Letter, the fallback when no MediaBox is found.
const DEFAULT_PAGE_SIZE: (f32, f32) = (612.0, 792.0);

/// Extracts text, words, tables and images from every page of a document.
pub struct PageExtractor {
    doc: LopdfDocument,
    options: ExtractOptions,
}

impl PageExtractor {
    /// Open a document from a file path with default options.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ExtractOptions::default())
    }

    /// Open a document from a file path.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ExtractOptions) -> Result<Self> {
        let version = detect::detect_version_from_path(&path)?;
        log::debug!("opening PDF {} (version {})", path.as_ref().display(), version);

        let doc = LopdfDocument::load(path)?;
        Self::from_document(doc, options)
    }

    /// Open a document from memory with default options.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ExtractOptions::default())
    }

    /// Open a document from memory.
    pub fn from_bytes_with_options(data: &[u8], options: ExtractOptions) -> Result<Self> {
        let version = detect::detect_version_from_bytes(data)?;
        log::debug!("opening in-memory PDF (version {})", version);

        let doc = LopdfDocument::load_mem(data)?;
        Self::from_document(doc, options)
    }

    fn from_document(doc: LopdfDocument, options: ExtractOptions) -> Result<Self> {
        if doc.is_encrypted() {
            return Err(Error::Encrypted);
        }
        Ok(Self { doc, options })
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// Extract a single page by 1-indexed page number.
    pub fn extract_page(&self, number: u32) -> Result<PageLayout> {
        let pages = self.doc.get_pages();
        let page_id = *pages
            .get(&number)
            .ok_or(Error::PageOutOfRange(number, pages.len() as u32))?;
        self.extract_page_inner(number, page_id)
    }

    /// Extract every page, in page order.
    ///
    /// In lenient mode a failing page yields a [`PageLayout`] carrying the
    /// error instead of aborting the run.
    pub fn extract(&self) -> Result<Vec<PageLayout>> {
        let pages: Vec<(u32, ObjectId)> = self.doc.get_pages().into_iter().collect();

        let process = |&(number, page_id): &(u32, ObjectId)| -> Result<PageLayout> {
            match self.extract_page_inner(number, page_id) {
                Ok(layout) => Ok(layout),
                Err(e) if self.options.error_mode == ErrorMode::Lenient => {
                    log::warn!("page {} failed, continuing: {}", number, e);
                    let (width, height) = page_dimensions(&self.doc, page_id);
                    Ok(PageLayout::failed(number, width, height, e.to_string()))
                }
                Err(e) => Err(e),
            }
        };

        // Ordered collect in both paths: results come out in page order.
        if self.options.parallel {
            pages.par_iter().map(process).collect()
        } else {
            pages.iter().map(process).collect()
        }
    }

    fn extract_page_inner(&self, number: u32, page_id: ObjectId) -> Result<PageLayout> {
        let (width, height) = page_dimensions(&self.doc, page_id);
        let mut layout = PageLayout::new(number, width, height);

        let spans = extract_spans(&self.doc, page_id)?;
        layout.text = words::page_text(&spans);
        layout.words = words::page_words(&spans, height);
        layout.tables =
            TableDetector::with_config(self.options.tables.clone()).detect(&spans, height);
        layout.images = extract_image_boxes(&self.doc, page_id, height)?;

        log::info!(
            "page {}: {} words, {} tables, {} images",
            number,
            layout.words.len(),
            layout.tables.len(),
            layout.images.len()
        );

        Ok(layout)
    }
}

/// Page width and height from the MediaBox, walking up Parent nodes when the
/// entry is inherited.
fn page_dimensions(doc: &LopdfDocument, page_id: ObjectId) -> (f32, f32) {
    let mut current = page_id;

    for _ in 0..8 {
        let dict = match doc.get_dictionary(current) {
            Ok(d) => d,
            Err(_) => break,
        };

        if let Some(rect) = dict
            .get(b"MediaBox")
            .ok()
            .and_then(|obj| media_box_rect(doc, obj))
        {
            return rect;
        }

        match dict.get(b"Parent") {
            Ok(Object::Reference(r)) => current = *r,
            _ => break,
        }
    }

    DEFAULT_PAGE_SIZE
}

fn media_box_rect(doc: &LopdfDocument, obj: &Object) -> Option<(f32, f32)> {
    let arr = match obj {
        Object::Array(arr) => arr,
        Object::Reference(r) => match doc.get_object(*r) {
            Ok(Object::Array(arr)) => arr,
            _ => return None,
        },
        _ => return None,
    };

    if arr.len() != 4 {
        return None;
    }

    let x0 = arr[0].as_float().ok()?;
    let y0 = arr[1].as_float().ok()?;
    let x1 = arr[2].as_float().ok()?;
    let y1 = arr[3].as_float().ok()?;

    Some(((x1 - x0).abs(), (y1 - y0).abs()))
}
