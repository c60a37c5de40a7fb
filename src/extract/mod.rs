//! Page content extraction: text spans, words, table regions, images.

mod extractor;
mod images;
mod options;
mod spans;
mod tables;
mod words;

pub use extractor::PageExtractor;
pub use options::{ErrorMode, ExtractOptions};
pub use spans::TextSpan;
pub use tables::{TableConfig, TableDetector};
