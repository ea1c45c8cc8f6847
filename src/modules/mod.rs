//! Transformation code with no knowledge of where documents come from.

pub mod export;
pub mod import;
pub mod metadata;
