//! Catalog metadata documents and their mapping to report records.

pub mod dates;
pub mod document;
pub mod fields;

pub use dates::{normalize_date, parse_compact_date};
pub use document::{Element, MetadataDocument};
pub use fields::extract_record;
