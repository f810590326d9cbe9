//! Data model for outline inference.
//!
//! [`SourceDocument`] and its parts are what the upstream text extractor
//! supplies; [`Line`] is the pipeline's internal unit; [`OutlineResult`] is
//! the only artifact handed back to callers.

mod line;
mod outline;
mod source;

pub use line::Line;
pub use outline::{HeadingLevel, OutlineEntry, OutlineNode, OutlineResult};
pub use source::{BBox, Fragment, PageInfo, SourceDocument, Span, TocEntry};
