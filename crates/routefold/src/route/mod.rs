/// File-name conventions for the page scanner
///
/// Pure parsers that turn one path component of a page file into a route segment.

pub mod pattern;

pub use pattern::{classify_segment, PatternSegmentType};
