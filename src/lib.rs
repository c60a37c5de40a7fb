//! # layoutscan
//!
//! PDF page layout extraction and annotation library for Rust.
//!
//! This library extracts per-page text, word-level font sizes and bounding
//! boxes, table regions and image placements from PDF documents, produces a
//! JSON report, and writes an annotated copy of the input with the detected
//! boxes drawn on each page.
//!
//! ## Quick Start
//!
//! ```no_run
//! use layoutscan::pipeline;
//!
//! fn main() -> layoutscan::Result<()> {
//!     // Analyze a PDF and write both outputs
//!     let report = pipeline::run(
//!         "document.pdf",
//!         "out/document_annotated.pdf",
//!         "out/document.json",
//!     )?;
//!     println!("Pages: {}", report.page_count());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Word-level geometry**: Font size and bounding box per word occurrence
//! - **Table detection**: Alignment-based region detection without ruling lines
//! - **Image placements**: Transform-aware bounding boxes per `Do` operation
//! - **Annotation overlay**: Boxes drawn onto a copy of the input PDF
//! - **Parallel processing**: Uses Rayon for multi-page documents
//! - **Failure isolation**: Lenient mode records per-page errors and continues

pub mod annotate;
pub mod detect;
pub mod error;
pub mod extract;
pub mod model;
pub mod pipeline;

// Re-export commonly used types
pub use annotate::{AnnotationStyle, Annotator};
pub use detect::{detect_version_from_bytes, detect_version_from_path, is_pdf};
pub use error::{Error, Result};
pub use extract::{ErrorMode, ExtractOptions, PageExtractor, TableConfig};
pub use model::{
    BoundingBox, JsonFormat, PageLayout, PageRecord, Report, Word, WordInfo, WordMap,
};
pub use pipeline::PipelineOptions;

use std::path::Path;

/// Extract every page of a PDF file and return the report.
///
/// Uses strict error handling: the first failing page aborts. Use
/// [`analyze_file_with_options`] for lenient extraction.
///
/// # Example
///
/// ```no_run
/// use layoutscan::analyze_file;
///
/// let report = analyze_file("document.pdf").unwrap();
/// println!("Pages: {}", report.page_count());
/// ```
pub fn analyze_file<P: AsRef<Path>>(path: P) -> Result<Report> {
    analyze_file_with_options(path, ExtractOptions::default())
}

/// Extract every page of a PDF file with custom options.
pub fn analyze_file_with_options<P: AsRef<Path>>(
    path: P,
    options: ExtractOptions,
) -> Result<Report> {
    let path = path.as_ref();
    let extractor = PageExtractor::open_with_options(path, options)?;
    let layouts = extractor.extract()?;
    Ok(Report::from_layouts(path.display().to_string(), &layouts))
}

/// Extract every page of an in-memory PDF and return the report.
///
/// The report's `pdf_path` is empty since there is no file.
pub fn analyze_bytes(data: &[u8]) -> Result<Report> {
    analyze_bytes_with_options(data, ExtractOptions::default())
}

/// Extract every page of an in-memory PDF with custom options.
pub fn analyze_bytes_with_options(data: &[u8], options: ExtractOptions) -> Result<Report> {
    let extractor = PageExtractor::from_bytes_with_options(data, options)?;
    let layouts = extractor.extract()?;
    Ok(Report::from_layouts("", &layouts))
}

/// Write an annotated copy of a PDF, drawing boxes for every detected
/// element using the given style.
pub fn annotate_file<P, Q>(input: P, output: Q, style: &AnnotationStyle) -> Result<()>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let input = input.as_ref();
    let extractor = PageExtractor::open_with_options(input, ExtractOptions::new().lenient())?;
    let layouts = extractor.extract()?;

    let mut annotator = Annotator::open(input)?;
    for layout in &layouts {
        annotator.annotate_page(layout, style)?;
    }
    annotator.save(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_extract_options_strict() {
        assert_eq!(ExtractOptions::default().error_mode, ErrorMode::Strict);
    }

    #[test]
    fn test_analyze_bytes_rejects_garbage() {
        assert!(matches!(
            analyze_bytes(b"not a pdf"),
            Err(Error::UnknownFormat)
        ));
    }
}
