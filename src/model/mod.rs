//! Data model: geometry, per-page layouts, and the serializable report.

mod geometry;
mod layout;
mod report;

pub use geometry::{BoundingBox, Matrix};
pub use layout::{PageLayout, Word};
pub use report::{JsonFormat, PageRecord, Report, WordInfo, WordMap};
