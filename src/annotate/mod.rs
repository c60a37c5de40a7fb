//! Bounding-box annotation of a document copy.

mod annotator;
mod style;

pub use annotator::Annotator;
pub use style::AnnotationStyle;
